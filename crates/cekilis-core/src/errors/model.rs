use std::collections::BTreeMap;
use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExitCode {
    Success = 0,
    Usage = 2,
    Validation = 3,
    DependencyFailure = 4,
    Internal = 10,
}

impl ExitCode {
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    FetchFailed,
    InvalidMultiplier,
    InvalidArgument,
    Config,
}

impl ErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FetchFailed => "fetch_failed",
            Self::InvalidMultiplier => "invalid_multiplier",
            Self::InvalidArgument => "invalid_argument",
            Self::Config => "config_error",
        }
    }

    #[must_use]
    pub const fn exit_code(self) -> ExitCode {
        match self {
            Self::FetchFailed => ExitCode::DependencyFailure,
            Self::InvalidMultiplier | Self::InvalidArgument => ExitCode::Validation,
            Self::Config => ExitCode::Usage,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Failures surfaced by the storefront core.
///
/// None of these are fatal: callers keep showing the last good state.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Remote read failed or returned no usable document set.
    FetchFailed { collection: String, reason: String },
    /// Cart multiplier below one, or a merge that would overflow.
    InvalidMultiplier { ticket_id: String, multiplier: u32 },
    InvalidArgument {
        name: &'static str,
        reason: String,
    },
    Config(String),
}

impl Error {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::FetchFailed { .. } => ErrorCode::FetchFailed,
            Self::InvalidMultiplier { .. } => ErrorCode::InvalidMultiplier,
            Self::InvalidArgument { .. } => ErrorCode::InvalidArgument,
            Self::Config(_) => ErrorCode::Config,
        }
    }

    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        self.code().exit_code()
    }

    #[must_use]
    pub fn to_machine_error(&self) -> MachineError {
        let machine = MachineError::new(self.code().as_str(), &self.to_string());
        match self {
            Self::FetchFailed { collection, .. } => machine.with_detail("collection", collection),
            Self::InvalidMultiplier {
                ticket_id,
                multiplier,
            } => machine
                .with_detail("ticket_id", ticket_id)
                .with_detail("multiplier", &multiplier.to_string()),
            Self::InvalidArgument { name, .. } => machine.with_detail("argument", name),
            Self::Config(_) => machine,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FetchFailed { collection, reason } => {
                write!(f, "fetching `{collection}` failed: {reason}")
            }
            Self::InvalidMultiplier {
                ticket_id,
                multiplier,
            } => write!(
                f,
                "invalid multiplier {multiplier} for ticket `{ticket_id}`: must be at least 1"
            ),
            Self::InvalidArgument { name, reason } => write!(f, "invalid {name}: {reason}"),
            Self::Config(message) => write!(f, "configuration error: {message}"),
        }
    }
}

impl std::error::Error for Error {}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MachineError {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub details: BTreeMap<String, String>,
}

impl MachineError {
    #[must_use]
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            details: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_detail(mut self, key: &str, value: &str) -> Self {
        self.details.insert(key.to_string(), value.to_string());
        self
    }
}

impl fmt::Display for MachineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for MachineError {}

#[cfg(test)]
mod tests {
    use super::{Error, ErrorCode, ExitCode};

    #[test]
    fn invalid_multiplier_maps_to_validation_exit() {
        let err = Error::InvalidMultiplier {
            ticket_id: "t-1".to_string(),
            multiplier: 0,
        };
        assert_eq!(err.code(), ErrorCode::InvalidMultiplier);
        assert_eq!(err.exit_code(), ExitCode::Validation);
        let machine = err.to_machine_error();
        assert_eq!(machine.code, "invalid_multiplier");
        assert_eq!(machine.details.get("multiplier").map(String::as_str), Some("0"));
    }

    #[test]
    fn fetch_failure_is_a_dependency_failure() {
        let err = Error::FetchFailed {
            collection: "tickets".to_string(),
            reason: "network_error: connection refused".to_string(),
        };
        assert_eq!(err.exit_code(), ExitCode::DependencyFailure);
        assert!(err.to_string().contains("`tickets`"));
    }
}
