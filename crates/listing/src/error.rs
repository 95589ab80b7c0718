//! Errors raised by the list view model and the remote collections it drives.
//!
//! - [`ValidationError`]: a required edit-buffer field is empty. No request is
//!   sent.
//! - [`RemoteError`]: non-2xx answer, transport failure, or a local input the
//!   request could not be built from (nothing sent).
//! - [`ListError::IndexOutOfRange`]: a row outside the current page was
//!   referenced.
//! - [`ListError::Busy`]: the same action is already in flight for the record.
use std::fmt;

use api_types::EntityId;
use thiserror::Error;

use crate::pending::Action;

/// Message used when the server gave no usable error body.
pub const GENERIC_REMOTE_MESSAGE: &str = "unknown error";

/// List view model errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error("row {index} is outside the current page ({len} rows)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("{action} already pending for record {id}")]
    Busy { action: Action, id: EntityId },
}

/// Required fields left empty in an edit buffer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("missing required fields: {}", .missing.join(", "))]
pub struct ValidationError {
    pub missing: Vec<&'static str>,
}

impl ValidationError {
    /// Fails with every label whose `present` flag is false.
    pub(crate) fn check(fields: &[(&'static str, bool)]) -> Result<(), Self> {
        let missing = fields
            .iter()
            .filter(|(_, present)| !present)
            .map(|(label, _)| *label)
            .collect::<Vec<_>>();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Self { missing })
        }
    }
}

/// Failure of a remote call. `status` is `None` when no response was received.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct RemoteError {
    pub status: Option<u16>,
    pub message: String,
    /// The request was never sent because a local input was unusable.
    pub local: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteErrorKind {
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    Validation,
    Server,
    Transport,
    LocalInput,
}

impl RemoteError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
            local: false,
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
            local: false,
        }
    }

    /// A file or other local input needed by the request could not be used.
    pub fn local_input(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
            local: true,
        }
    }

    pub fn kind(&self) -> RemoteErrorKind {
        if self.local {
            return RemoteErrorKind::LocalInput;
        }
        match self.status {
            None => RemoteErrorKind::Transport,
            Some(401) => RemoteErrorKind::Unauthorized,
            Some(403) => RemoteErrorKind::Forbidden,
            Some(404) => RemoteErrorKind::NotFound,
            Some(409) => RemoteErrorKind::Conflict,
            Some(422) => RemoteErrorKind::Validation,
            Some(_) => RemoteErrorKind::Server,
        }
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            _ if self.local => f.write_str(&self.message),
            Some(status) => write!(f, "{status}: {}", self.message),
            None => write!(f, "server unreachable: {}", self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_maps_to_kind() {
        assert_eq!(RemoteError::new(401, "x").kind(), RemoteErrorKind::Unauthorized);
        assert_eq!(RemoteError::new(404, "x").kind(), RemoteErrorKind::NotFound);
        assert_eq!(RemoteError::new(422, "x").kind(), RemoteErrorKind::Validation);
        assert_eq!(RemoteError::new(500, "x").kind(), RemoteErrorKind::Server);
        assert_eq!(RemoteError::transport("x").kind(), RemoteErrorKind::Transport);
    }

    #[test]
    fn local_input_is_not_reported_as_unreachable() {
        let err = RemoteError::local_input("cannot read image eevee.png");
        assert_eq!(err.kind(), RemoteErrorKind::LocalInput);
        assert_eq!(err.status, None);
        assert_eq!(err.to_string(), "cannot read image eevee.png");
        assert_eq!(
            RemoteError::transport("refused").to_string(),
            "server unreachable: refused"
        );
    }

    #[test]
    fn validation_lists_missing_fields() {
        let err = ValidationError::check(&[("name", false), ("email", true), ("password", false)])
            .unwrap_err();
        assert_eq!(err.missing, vec!["name", "password"]);
        assert_eq!(err.to_string(), "missing required fields: name, password");
    }
}
