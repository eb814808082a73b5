use thiserror::Error;

use super::response::ApiStatus;

pub(crate) const DECODE_FAILED: &str = "could not parse response";

/// Why a nearby search produced no places.
///
/// `Display` is the message shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlacesError {
    /// No HTTP exchange completed (connect, DNS, timeout, body read)
    #[error("{0}")]
    Transport(String),

    /// Upstream answered but reported failure
    #[error("{message}")]
    Api {
        http_status: u16,
        api_status: Option<ApiStatus>,
        message: String,
    },

    /// Body of a successful response did not have the expected shape
    #[error("{}", DECODE_FAILED)]
    Decode(String),
}

impl PlacesError {
    /// Normalize a reqwest failure. The request URL carries the API key, so it is stripped.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        let err = err.without_url();
        let mut message = err.to_string();

        // reqwest's own message is terse ("error sending request"); the cause chain says why
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }

        PlacesError::Transport(message)
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, PlacesError::Transport(_))
    }

    pub fn is_api(&self) -> bool {
        matches!(self, PlacesError::Api { .. })
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, PlacesError::Decode(_))
    }
}
