use presenty_shared::wire;
use presenty_shared::{DecodeError, Rejection, RescanPolicy, WireError};
use thiserror::Error;

use crate::events::Notice;

/// Failure reported by the HTTP layer the host application plugs in.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct TransportError {
    /// HTTP status, when a response was received at all.
    pub status: Option<u16>,
    pub message: String,
    /// Raw response body, if any.
    pub body: Option<String>,
}

impl TransportError {
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
            body: None,
        }
    }

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: format!("Server responded {status}"),
            body: Some(body.into()),
        }
    }
}

/// A collaborator call that did not produce a usable answer.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Request failed: {0}")]
    Transport(#[from] TransportError),

    #[error("Unexpected response: {0}")]
    Wire(#[from] WireError),
}

impl RemoteError {
    /// The backend's own explanation, when it sent one.
    pub fn server_message(&self) -> Option<String> {
        match self {
            RemoteError::Transport(e) => e.body.as_deref().and_then(wire::error_message),
            RemoteError::Wire(_) => None,
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Cooldown store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Scan rejected: {0}")]
    Rejected(#[from] Rejection),

    #[error("No student or teacher is signed in")]
    NotSignedIn,

    #[error("Student profile has not been loaded")]
    IdentityNotLoaded,

    #[error("Device is blocked from signing in for {remaining_minutes} more minute(s)")]
    LoginBlocked { remaining_minutes: i64 },

    #[error("Required field `{0}` is empty")]
    MissingField(&'static str),

    #[error("Division `{0}` is not configured")]
    UnknownDivision(String),

    #[error("{fallback}: {source}")]
    Remote {
        /// Text shown when the backend gave no message of its own.
        fallback: &'static str,
        #[source]
        source: RemoteError,
    },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl From<DecodeError> for ClientError {
    fn from(e: DecodeError) -> Self {
        ClientError::Rejected(Rejection::Invalid(e))
    }
}

impl ClientError {
    /// Wrap a collaborator failure with the text to show if the backend
    /// gave none.
    pub fn remote(fallback: &'static str) -> impl FnOnce(RemoteError) -> Self {
        move |source| ClientError::Remote { fallback, source }
    }

    /// Whether the user can simply try again.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Rejected(r) => {
                !matches!(r, Rejection::Blocked { .. } | Rejection::SessionNotActive)
            }
            ClientError::Remote { .. } | ClientError::Store(_) => true,
            ClientError::MissingField(_) => true,
            ClientError::NotSignedIn
            | ClientError::LoginBlocked { .. }
            | ClientError::IdentityNotLoaded
            | ClientError::UnknownDivision(_) => false,
        }
    }

    /// When a scanner that hit this error may accept the next code.
    pub fn rescan_policy(&self) -> RescanPolicy {
        match self {
            ClientError::Rejected(r) => r.rescan_policy(),
            _ => RescanPolicy::Immediate,
        }
    }

    /// The short message the UI shows for this error.
    pub fn notice(&self) -> Notice {
        let text = match self {
            ClientError::Rejected(r) => r.message(),
            ClientError::NotSignedIn => "Please login again".to_string(),
            ClientError::IdentityNotLoaded => "Student not loaded".to_string(),
            ClientError::LoginBlocked { remaining_minutes } => {
                format!("Blocked. Try again in {remaining_minutes} minute(s)")
            }
            ClientError::MissingField(_) => "Please fill all fields".to_string(),
            ClientError::UnknownDivision(d) => format!("Division {d} is not available"),
            ClientError::Remote { fallback, source } => source
                .server_message()
                .unwrap_or_else(|| fallback.to_string()),
            ClientError::Store(_) => "Could not read scan timer".to_string(),
        };
        Notice::error(text)
    }
}
