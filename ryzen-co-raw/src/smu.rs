//! SMU request/response words and the status register convention

/// Number of argument words carried by every SMU command
pub const ARG_WORDS: usize = 6;

/// Status register value while a command is executing.
///
/// The ryzen_smu driver reports 0 while the SMU is busy, the reverse of the
/// usual "0 means idle" convention.
pub const STATUS_BUSY: u32 = 0x00;

/// Status register value after a command completed successfully
pub const STATUS_OK: u32 = 0x01;

/// Failure codes reported by the SMU firmware
pub mod status {
    pub const FAILED: u32 = 0xFF;
    pub const UNKNOWN_CMD: u32 = 0xFE;
    pub const REJECTED_PREREQ: u32 = 0xFD;
    pub const REJECTED_BUSY: u32 = 0xFC;
}

/// Decoded status register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmuStatus {
    /// Command still running, poll again
    Busy,
    /// Command finished, response words are valid
    Ready,
    /// Command finished with the given failure code
    Failed(u32),
}

impl SmuStatus {
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            STATUS_BUSY => SmuStatus::Busy,
            STATUS_OK => SmuStatus::Ready,
            code => SmuStatus::Failed(code),
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, SmuStatus::Busy)
    }
}

/// Human readable description of a status code
pub fn describe_status(code: u32) -> &'static str {
    match code {
        STATUS_BUSY => "busy",
        STATUS_OK => "ok",
        status::FAILED => "failed",
        status::UNKNOWN_CMD => "unknown command",
        status::REJECTED_PREREQ => "rejected: prerequisite unmet",
        status::REJECTED_BUSY => "rejected: busy",
        _ => "unrecognized status",
    }
}

/// One SMU request: an opcode plus six argument words
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    op: u32,
    args: [u32; ARG_WORDS],
}

impl Command {
    /// Command with all arguments zero
    pub const fn new(op: u32) -> Self {
        Self {
            op,
            args: [0; ARG_WORDS],
        }
    }

    /// Command with only the first argument set
    pub const fn with_arg(op: u32, arg1: u32) -> Self {
        Self {
            op,
            args: [arg1, 0, 0, 0, 0, 0],
        }
    }

    pub const fn with_args(op: u32, args: [u32; ARG_WORDS]) -> Self {
        Self { op, args }
    }

    pub const fn op(&self) -> u32 {
        self.op
    }

    pub const fn args(&self) -> &[u32; ARG_WORDS] {
        &self.args
    }
}

/// The six words the SMU leaves in the argument register after a command
///
/// How a word is interpreted is up to the caller; the accessors below are
/// plain bit-casts, never numeric conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Response {
    words: [u32; ARG_WORDS],
}

impl Response {
    pub const fn new(words: [u32; ARG_WORDS]) -> Self {
        Self { words }
    }

    pub const fn words(&self) -> &[u32; ARG_WORDS] {
        &self.words
    }

    /// Raw word, or 0 for an index past the sixth word
    pub fn word(&self, index: usize) -> u32 {
        self.words.get(index).copied().unwrap_or(0)
    }

    /// Word reinterpreted as an IEEE-754 single precision float
    pub fn as_f32(&self, index: usize) -> f32 {
        f32::from_bits(self.word(index))
    }

    /// Word reinterpreted as a two's-complement signed integer
    pub fn as_i32(&self, index: usize) -> i32 {
        self.word(index) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_polarity() {
        assert_eq!(SmuStatus::from_raw(0), SmuStatus::Busy);
        assert_eq!(SmuStatus::from_raw(1), SmuStatus::Ready);
        assert_eq!(SmuStatus::from_raw(0xFE), SmuStatus::Failed(0xFE));
        assert!(SmuStatus::from_raw(STATUS_BUSY).is_busy());
        assert!(!SmuStatus::from_raw(STATUS_OK).is_busy());
    }

    #[test]
    fn test_describe_status() {
        assert_eq!(describe_status(status::UNKNOWN_CMD), "unknown command");
        assert_eq!(describe_status(0x42), "unrecognized status");
    }

    #[test]
    fn test_command_defaults_to_zero_args() {
        let cmd = Command::new(0x6D);
        assert_eq!(cmd.op(), 0x6D);
        assert_eq!(cmd.args(), &[0; 6]);

        let cmd = Command::with_arg(0x02, 1);
        assert_eq!(cmd.args(), &[1, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_response_bit_casts() {
        let resp = Response::new([1.25f32.to_bits(), (-12i32) as u32, 0, 0, 0, 7]);
        assert_eq!(resp.as_f32(0), 1.25);
        assert_eq!(resp.as_i32(1), -12);
        assert_eq!(resp.word(5), 7);
        assert_eq!(resp.word(6), 0);
    }

    #[test]
    fn test_response_f32_is_not_numeric_conversion() {
        let resp = Response::new([100, 0, 0, 0, 0, 0]);
        assert_ne!(resp.as_f32(0), 100.0);
        assert_eq!(resp.as_f32(0).to_bits(), 100);
    }
}
