//! Document-store collection names.

use strum_macros::{AsRefStr, Display, EnumString};

/// Every collection the data-access layer reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
pub enum Collection {
    #[strum(serialize = "user")]
    User,
    /// `profiles` is the collection name used before the store migration.
    #[strum(to_string = "userprofile", serialize = "profiles")]
    UserProfile,
    #[strum(serialize = "matches")]
    Matches,
    #[strum(serialize = "messages")]
    Messages,
    #[strum(serialize = "conversations")]
    Conversations,
    #[strum(serialize = "credentials")]
    Credentials,
}

impl Collection {
    pub fn name(&self) -> &str {
        self.as_ref()
    }
}
