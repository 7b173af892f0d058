//! Runtime environment capability for the local store.
//!
//! The store is told where it runs at construction instead of probing for a
//! storage API at call time.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Config string for the client environment.
pub const RUNTIME_ENVIRONMENT_CLIENT: &str = "client";
/// Config string for the server environment.
pub const RUNTIME_ENVIRONMENT_SERVER: &str = "server";

/// Execution context the local store runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuntimeEnvironment {
    /// Interactive client with persistent local storage.
    Client,
    /// Server-side rendering context without local storage.
    Server,
}

impl RuntimeEnvironment {
    /// Stable string id used in configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Client => RUNTIME_ENVIRONMENT_CLIENT,
            Self::Server => RUNTIME_ENVIRONMENT_SERVER,
        }
    }

    /// Whether local storage may be read or written.
    pub fn has_local_storage(self) -> bool {
        matches!(self, Self::Client)
    }
}

impl Display for RuntimeEnvironment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a runtime environment from its configuration string.
pub fn parse_runtime_environment(
    value: &str,
) -> Result<RuntimeEnvironment, RuntimeEnvironmentError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" => Err(RuntimeEnvironmentError::Empty),
        RUNTIME_ENVIRONMENT_CLIENT => Ok(RuntimeEnvironment::Client),
        RUNTIME_ENVIRONMENT_SERVER => Ok(RuntimeEnvironment::Server),
        other => Err(RuntimeEnvironmentError::Unsupported(other.to_string())),
    }
}

/// Runtime environment parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeEnvironmentError {
    Empty,
    Unsupported(String),
}

impl Display for RuntimeEnvironmentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "runtime environment cannot be empty"),
            Self::Unsupported(value) => write!(
                f,
                "unsupported runtime environment `{value}`; expected client|server"
            ),
        }
    }
}

impl Error for RuntimeEnvironmentError {}
