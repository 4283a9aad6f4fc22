//! UserProfile DTO

use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use trailmatch_core::TrailmatchError;
use trailmatch_core::profile::{AdventurePreference, DatingPreference, SkillLevel, UserProfile};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Stored form of a `userprofile` document.
///
/// Every optional field serializes as `null` when absent so that an upsert
/// clears it in the store instead of leaving the old value behind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfileDTO {
    pub user_id: String,
    pub bio: Option<String>,
    #[serde(default)]
    pub adventure_preferences: Vec<String>,
    /// JSON object of activity to skill level, encoded as a string.
    pub skill_summary: Option<String>,
    pub profile_image_url: Option<String>,
    /// `YYYY-MM-DD`.
    pub birthdate: Option<String>,
    pub instagram_url: Option<String>,
    pub facebook_url: Option<String>,
    pub dating_preference: Option<String>,
}

impl UserProfileDTO {
    pub fn from_domain(profile: &UserProfile) -> Result<Self, TrailmatchError> {
        let skill_summary = serde_json::to_string(&profile.skill_summary)?;
        Ok(Self {
            user_id: profile.user_id.clone(),
            bio: profile.bio.clone(),
            adventure_preferences: profile
                .adventure_preferences
                .iter()
                .map(ToString::to_string)
                .collect(),
            skill_summary: Some(skill_summary),
            profile_image_url: profile.profile_image_url.clone(),
            birthdate: profile
                .birthdate
                .map(|date| date.format(DATE_FORMAT).to_string()),
            instagram_url: profile.instagram_url.clone(),
            facebook_url: profile.facebook_url.clone(),
            dating_preference: profile.dating_preference.map(|p| p.to_string()),
        })
    }
}

impl TryFrom<UserProfileDTO> for UserProfile {
    type Error = TrailmatchError;

    fn try_from(dto: UserProfileDTO) -> Result<Self, Self::Error> {
        let skill_summary: BTreeMap<String, SkillLevel> = match dto.skill_summary.as_deref() {
            None | Some("") => BTreeMap::new(),
            Some(raw) => serde_json::from_str(raw).map_err(|e| {
                TrailmatchError::json(format!(
                    "Invalid skill_summary for profile '{}': {}",
                    dto.user_id, e
                ))
            })?,
        };

        let adventure_preferences: BTreeSet<AdventurePreference> = dto
            .adventure_preferences
            .iter()
            .filter_map(|raw| match AdventurePreference::from_str(raw) {
                Ok(preference) => Some(preference),
                Err(_) => {
                    tracing::warn!(
                        "Skipping unknown adventure preference '{}' on profile '{}'",
                        raw,
                        dto.user_id
                    );
                    None
                }
            })
            .collect();

        let birthdate = dto
            .birthdate
            .as_deref()
            .filter(|raw| !raw.is_empty())
            .map(|raw| NaiveDate::parse_from_str(raw, DATE_FORMAT))
            .transpose()?;

        let dating_preference = dto.dating_preference.as_deref().and_then(|raw| {
            DatingPreference::from_str(raw)
                .inspect_err(|_| {
                    tracing::warn!(
                        "Ignoring unknown dating preference '{}' on profile '{}'",
                        raw,
                        dto.user_id
                    )
                })
                .ok()
        });

        Ok(UserProfile {
            user_id: dto.user_id,
            bio: dto.bio,
            adventure_preferences,
            skill_summary,
            profile_image_url: dto.profile_image_url,
            birthdate,
            instagram_url: dto.instagram_url,
            facebook_url: dto.facebook_url,
            dating_preference,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn dto(value: Value) -> UserProfileDTO {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_absent_fields_serialize_as_null() {
        let dto = UserProfileDTO::from_domain(&UserProfile::empty("u1")).unwrap();
        let value = serde_json::to_value(&dto).unwrap();
        assert_eq!(value["bio"], Value::Null);
        assert_eq!(value["facebook_url"], Value::Null);
        assert_eq!(value["dating_preference"], Value::Null);
        assert_eq!(value["skill_summary"], json!("{}"));
    }

    #[test]
    fn test_skill_summary_is_a_json_string() {
        let mut profile = UserProfile::empty("u1");
        profile
            .skill_summary
            .insert("climbing".to_string(), SkillLevel::Advanced);
        let dto = UserProfileDTO::from_domain(&profile).unwrap();
        assert_eq!(dto.skill_summary.as_deref(), Some(r#"{"climbing":"advanced"}"#));

        let restored = UserProfile::try_from(dto).unwrap();
        assert_eq!(restored, profile);
    }

    #[test]
    fn test_malformed_skill_summary_fails_read() {
        let dto = dto(json!({
            "user_id": "u1",
            "bio": null,
            "skill_summary": "{not json",
            "profile_image_url": null,
            "birthdate": null,
            "instagram_url": null,
            "facebook_url": null,
            "dating_preference": null
        }));
        let err = UserProfile::try_from(dto).unwrap_err();
        assert!(err.is_serialization());
    }

    #[test]
    fn test_unknown_preferences_are_skipped() {
        let dto = dto(json!({
            "user_id": "u1",
            "bio": "Out every weekend",
            "adventure_preferences": ["hiking", "base-jumping", "Kayaking"],
            "skill_summary": null,
            "profile_image_url": null,
            "birthdate": "1994-05-20",
            "instagram_url": null,
            "facebook_url": null,
            "dating_preference": "everyone"
        }));
        let profile = UserProfile::try_from(dto).unwrap();
        assert_eq!(
            profile.adventure_preferences,
            BTreeSet::from([AdventurePreference::Hiking, AdventurePreference::Kayaking])
        );
        assert_eq!(profile.birthdate, NaiveDate::from_ymd_opt(1994, 5, 20));
        assert_eq!(profile.dating_preference, Some(DatingPreference::Everyone));
    }
}
