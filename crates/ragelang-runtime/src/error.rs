//! Roast provider errors.

use thiserror::Error;

/// Why a remote roast could not be produced.
///
/// These never reach the user: [`FallbackRoaster`](crate::FallbackRoaster) swallows them and picks
/// a local roast instead.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No API key is configured.
    #[error("no API key configured")]
    MissingApiKey,

    /// Building the client, sending the request or decoding the body failed.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("provider returned HTTP {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// The response carried no usable text.
    #[error("provider response contained no text")]
    EmptyResponse,
}
