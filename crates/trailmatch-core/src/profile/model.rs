//! UserProfile domain model.
//!
//! A profile is created empty at signup and filled in by the profile-edit
//! flow. Every optional field is an `Option` so reads are total over the
//! stored schema.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::validation::birthdate::age_on;

/// Kinds of adventure a user wants to share.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AdventurePreference {
    Hiking,
    Climbing,
    Camping,
    Kayaking,
    Surfing,
    Skiing,
    Cycling,
    Running,
    Travel,
}

/// Self-assessed skill in one activity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

/// Who the user wants to be matched with.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DatingPreference {
    Men,
    Women,
    Everyone,
}

/// Public profile attached 1:1 to a [`User`](crate::user::User).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub user_id: String,
    pub bio: Option<String>,
    pub adventure_preferences: BTreeSet<AdventurePreference>,
    /// Activity name to skill level.
    pub skill_summary: BTreeMap<String, SkillLevel>,
    pub profile_image_url: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub instagram_url: Option<String>,
    pub facebook_url: Option<String>,
    pub dating_preference: Option<DatingPreference>,
}

impl UserProfile {
    /// An empty profile, as created at signup.
    pub fn empty(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Self::default()
        }
    }

    /// Age in whole years on `today`; `None` without a birthdate or for a
    /// birthdate after `today`.
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        self.birthdate.and_then(|birthdate| age_on(birthdate, today))
    }
}
