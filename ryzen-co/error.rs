use std::fmt;
use std::time::Duration;

use ryzen_co_raw::smu::describe_status;
use ryzen_co_raw::IoError;
use thiserror::Error;

/// Point of the command protocol at which the channel was waiting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitStage {
    /// Waiting for a previous command to finish before issuing ours
    AwaitIdle,
    /// Waiting for our command to complete
    AwaitCompletion,
}

impl fmt::Display for WaitStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaitStage::AwaitIdle => f.write_str("waiting for idle SMU"),
            WaitStage::AwaitCompletion => f.write_str("waiting for completion"),
        }
    }
}

fn status_text(status: &u32) -> &'static str {
    describe_status(*status)
}

#[derive(Error, Debug)]
pub enum SmuError {
    #[error("SMU status unavailable for command 0x{op:02X} while {stage}: {source}")]
    StatusUnavailable {
        op: u32,
        stage: WaitStage,
        source: IoError,
    },

    #[error("Failed to write SMU arguments for command 0x{op:02X}: {source}")]
    ArgWriteFailed { op: u32, source: IoError },

    #[error("Failed to dispatch SMU command 0x{op:02X}: {source}")]
    CommandDispatchFailed { op: u32, source: IoError },

    #[error("SMU rejected command 0x{op:02X} with status 0x{status:02X} ({})", status_text(.status))]
    CommandRejected { op: u32, status: u32 },

    #[error("Failed to read SMU response for command 0x{op:02X}: {source}")]
    ResponseReadFailed { op: u32, source: IoError },

    #[error("SMU command 0x{op:02X} timed out after {waited:?} {stage}")]
    Timeout {
        op: u32,
        stage: WaitStage,
        waited: Duration,
    },

    #[error("Endpoint I/O failed: {0}")]
    Io(#[from] IoError),

    #[error("ryzen_smu driver not loaded: {0} missing")]
    DriverNotLoaded(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("SMU version mismatch: driver reports {expected}, SMU returned {actual}")]
    VersionMismatch { expected: String, actual: String },

    #[error("Unknown processor codename: {0}")]
    UnknownCodename(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

impl SmuError {
    /// Opcode of the failed command, if the error came from the channel
    pub fn op(&self) -> Option<u32> {
        match self {
            SmuError::StatusUnavailable { op, .. }
            | SmuError::ArgWriteFailed { op, .. }
            | SmuError::CommandDispatchFailed { op, .. }
            | SmuError::CommandRejected { op, .. }
            | SmuError::ResponseReadFailed { op, .. }
            | SmuError::Timeout { op, .. } => Some(*op),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SmuError>;
