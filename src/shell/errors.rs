//! Shell Errors
//!
//! Errors raised while resolving paths and dispatching commands. Handlers
//! render them as `<command>: <message>` lines.

use thiserror::Error;

use crate::fs::FsError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShellError {
    #[error("{name}: command not found")]
    CommandNotFound { name: String },

    #[error("{path}: No such file or directory")]
    PathNotFound { path: String },

    #[error("{path}: Not a directory")]
    NotADirectory { path: String },

    #[error("{path}: Is a directory")]
    IsADirectory { path: String },

    #[error("cannot create '{path}': File exists")]
    AlreadyExists { path: String },

    #[error("missing operand")]
    MissingOperand,

    #[error(transparent)]
    Fs(#[from] FsError),
}
