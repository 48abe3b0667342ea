/// Core error type for the wishlist system.
///
/// Display strings end up verbatim in JSON-RPC error messages, so response
/// bodies from downstream services are kept as fields and never formatted in.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not authenticate with backend service: {0}")]
    Auth(String),

    #[error("could not authenticate with backend service: identity provider returned HTTP {status}")]
    AuthRejected { status: u16, body: String },

    #[error("movie service request failed: {0}")]
    Upstream(String),

    #[error("movie service returned HTTP {status}")]
    UpstreamRejected { status: u16, body: String },

    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// True when the downstream API refused the bearer token we presented.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::UpstreamRejected { status: 401, .. })
    }
}
