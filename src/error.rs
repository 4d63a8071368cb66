//! Error types for statreport

use thiserror::Error;

/// Errors that can occur while loading compiler configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading file
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// YAML deserialization error
    #[error("Invalid YAML: {source}")]
    Yaml {
        #[from]
        source: serde_yaml::Error,
    },
    /// Values that parse but cannot be used together
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Errors returned by report compilation
#[derive(Debug, Error)]
pub enum CompileError {
    /// The request broke one or more rules
    #[error("{0}")]
    Validation(#[from] ValidationErrors),
}

impl CompileError {
    /// The itemized violations behind this failure
    pub fn messages(&self) -> &[String] {
        match self {
            CompileError::Validation(errors) => errors.messages(),
        }
    }
}

/// An itemized list of request errors, one entry per violation
#[derive(Debug, Clone, Default, PartialEq, Error)]
#[error("invalid report request: {}", .0.join("; "))]
pub struct ValidationErrors(Vec<String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    pub fn extend(&mut self, other: ValidationErrors) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn messages(&self) -> &[String] {
        &self.0
    }

    pub fn into_messages(self) -> Vec<String> {
        self.0
    }

    /// `Ok(())` when nothing was recorded, otherwise the collected errors
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<Vec<String>> for ValidationErrors {
    fn from(messages: Vec<String>) -> Self {
        Self(messages)
    }
}
