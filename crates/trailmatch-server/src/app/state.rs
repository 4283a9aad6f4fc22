use std::sync::Arc;
use std::time::Duration;

use trailmatch_application::{AccountService, MatchService, MessagingService, ProfileService};
use trailmatch_infrastructure::StoreConfig;

/// Application state shared across route handlers.
pub struct AppState {
    pub account_service: Arc<AccountService>,
    pub profile_service: Arc<ProfileService>,
    pub match_service: Arc<MatchService>,
    pub messaging_service: Arc<MessagingService>,
    /// Used to build public asset URLs.
    pub store_config: StoreConfig,
    pub fake_contact_delay: Duration,
}
