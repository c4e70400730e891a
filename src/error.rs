//! Error taxonomy shared by the gateway and the synchronization layer.

use thiserror::Error;

/// Failure of a single gateway round trip.
///
/// Cloneable so that one in-flight fetch can hand the same outcome to every
/// caller waiting on it.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("unauthorized (session invalid or expired; log in again)")]
    Unauthorized,
    #[error("forbidden (insufficient permissions for {path})")]
    Forbidden { path: String },
    #[error("{path}: server returned status {status}")]
    Status { status: u16, path: String },
    #[error("{path}: transport error: {message}")]
    Transport { path: String, message: String },
    #[error("{path}: could not decode response: {message}")]
    Decode { path: String, message: String },
    #[error("{path}: {message}")]
    Io { path: String, message: String },
}

impl GatewayError {
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Unauthorized => Some(401),
            GatewayError::Forbidden { .. } => Some(403),
            GatewayError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum SyncError {
    /// The primary entity of a view could not be fetched; the view is unusable.
    #[error("error while retrieving case {case}: {source}")]
    FatalLoad {
        case: String,
        #[source]
        source: GatewayError,
    },

    /// A create/update/delete failed; local lists were left untouched.
    #[error("{op} failed: {source}")]
    WriteFailure {
        op: &'static str,
        #[source]
        source: GatewayError,
    },

    #[error("fetch failed: {0}")]
    Fetch(#[from] GatewayError),

    #[error("upload of {file} failed: {source}")]
    UploadFailed {
        file: String,
        #[source]
        source: GatewayError,
    },

    #[error("an upload is already in progress")]
    UploadBusy,

    #[error("{action} is not available while the analysis is {state}")]
    NotAllowed {
        action: &'static str,
        state: &'static str,
    },

    /// The view this request belonged to was closed or superseded.
    #[error("view was closed before the response arrived")]
    Detached,

    #[error("no case is open")]
    NoCaseOpen,

    #[error("unknown {kind} {guid}")]
    UnknownEntity { kind: &'static str, guid: String },
}

pub type SyncResult<T> = Result<T, SyncError>;
