//! Session Configuration
//!
//! Compile-time defaults; embedding code may override any field.

use std::time::Duration;

/// Key the collection is stored under
pub const STORAGE_KEY: &str = "todos";

/// How long a storage notice stays visible without a newer event
pub const NOTICE_TIMEOUT: Duration = Duration::from_secs(5);

/// User-facing text for a write refused for lack of space
pub const QUOTA_MESSAGE: &str = "Storage quota exceeded – your latest changes may not be saved.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub storage_key: String,
    pub notice_timeout: Duration,
    pub quota_message: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_string(),
            notice_timeout: NOTICE_TIMEOUT,
            quota_message: QUOTA_MESSAGE.to_string(),
        }
    }
}
