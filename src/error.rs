//! Error and warning types shared by the whole pipeline

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::parser::document::DocumentError;

/// Which input document an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentOrigin {
    Remote,
    CustomRules,
}

impl fmt::Display for DocumentOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentOrigin::Remote => f.write_str("subscription"),
            DocumentOrigin::CustomRules => f.write_str("custom rules"),
        }
    }
}

/// Fatal errors. Any of these terminates the run before output is written.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing required input: {0}")]
    MissingInput(String),

    #[error("Failed to download subscription from {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("Subscription server for {url} answered with HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Invalid {origin} document: {source}")]
    Document {
        origin: DocumentOrigin,
        #[source]
        source: DocumentError,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize merged config: {0}")]
    Serialize(#[source] serde_yaml::Error),
}

impl Error {
    pub fn document(origin: DocumentOrigin, source: DocumentError) -> Self {
        Error::Document { origin, source }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Process exit status for this error. Each failure class gets its own code.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::MissingInput(_) => 2,
            Error::Fetch { .. } | Error::HttpStatus { .. } => 3,
            Error::Document { source, .. } => match source {
                DocumentError::Parse(_) => 4,
                DocumentError::InvalidStructure { .. } => 5,
            },
            Error::Io { .. } => 6,
            Error::Serialize(_) => 7,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Non-fatal conditions. The pipeline keeps going with the affected data left out.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PartialMetadataWarning {
    #[error("No Subscription-Userinfo header, traffic info will not be attached")]
    UserinfoAbsent,

    #[error("Subscription-Userinfo header has no numeric key=value pairs: '{0}'")]
    UserinfoUnparseable(String),

    #[error("Custom rules file {} not found, using subscription rules only", .0.display())]
    CustomRulesFileMissing(PathBuf),

    #[error("No valid 'rules' found in custom rules file")]
    CustomRulesAbsent,

    #[error("'rules' in custom rules file is not a list of strings, ignoring it")]
    CustomRulesMalformed,

    #[error("'rules' in subscription is not a list of strings, treating it as empty")]
    RemoteRulesMalformed,
}
