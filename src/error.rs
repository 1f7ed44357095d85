//! Crate-level error types.

use std::fmt;

/// Errors produced by the columbus-view crate.
#[derive(Debug)]
pub enum ColumbusError {
    /// A collaborator handed to a constructor violates its contract.
    InvalidCollaborator {
        /// Which collaborator was rejected.
        name: &'static str,
        /// What is wrong with it.
        reason: String,
    },
    /// The object was destroyed; only `is_destroyed` may be called.
    Destroyed,
    /// The shared camera was already borrowed when a controller needed it.
    CameraInUse,
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Generic I/O failure.
    Io(std::io::Error),
}

impl ColumbusError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidCollaborator {
            name,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ColumbusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCollaborator { name, reason } => {
                write!(f, "invalid {name}: {reason}")
            }
            Self::Destroyed => {
                write!(f, "this object was destroyed, i.e., destroy() was called")
            }
            Self::CameraInUse => write!(f, "camera is already borrowed"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for ColumbusError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ColumbusError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
