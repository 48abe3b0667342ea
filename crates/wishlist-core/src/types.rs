use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// An entry of the movie wishlist, as served by the movie API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub title: String,
    pub watched: bool,
}

/// A bearer credential obtained from the identity provider.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    value: String,
    expires_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    #[must_use]
    pub fn new(value: impl Into<String>, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            value: value.into(),
            expires_at,
        }
    }

    /// Build a token from an OAuth `expires_in` lifetime, counted from `issued_at`.
    #[must_use]
    pub fn with_lifetime(
        value: impl Into<String>,
        issued_at: DateTime<Utc>,
        expires_in_secs: Option<i64>,
    ) -> Self {
        let expires_at = expires_in_secs
            .and_then(Duration::try_seconds)
            .and_then(|lifetime| issued_at.checked_add_signed(lifetime));
        Self::new(value, expires_at)
    }

    /// The raw bearer string.
    pub fn secret(&self) -> &str {
        &self.value
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Whether the token is still usable at `now` with at least `margin` to spare.
    ///
    /// Tokens without a known expiry are never considered fresh.
    pub fn is_fresh(&self, now: DateTime<Utc>, margin: Duration) -> bool {
        self.expires_at.is_some_and(|exp| now + margin < exp)
    }
}

// Keep the secret out of logs.
impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
