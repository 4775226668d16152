//! Core shared types and errors (loader-agnostic).

use std::{io, path::PathBuf};

use thiserror::Error;

/// Hard failures of an OBJ parse. Line numbers are 1-based.
#[derive(Debug, Error)]
pub enum ObjError {
    #[error("Failed to open OBJ file {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read line {line}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("Malformed {expected} '{token}' on line {line}")]
    MalformedNumber {
        line: usize,
        token: String,
        expected: &'static str,
    },

    /// `index` is the value as written in the file (1-based).
    #[error("Position index {index} out of range (declared={count}) on line {line}")]
    IndexOutOfRange {
        line: usize,
        index: i64,
        count: usize,
    },

    #[error("'{tag}' record needs 3 components, found {found} on line {line}")]
    InsufficientComponents {
        line: usize,
        tag: &'static str,
        found: usize,
    },
}

impl ObjError {
    /// Line the error was raised on, if it is tied to one.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Open { .. } => None,
            Self::Read { line, .. }
            | Self::MalformedNumber { line, .. }
            | Self::IndexOutOfRange { line, .. }
            | Self::InsufficientComponents { line, .. } => Some(*line),
        }
    }
}

pub type ObjResult<T> = Result<T, ObjError>;
