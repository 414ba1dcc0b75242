//! SMU firmware version word

use crate::register::ArgumentLayout;

/// Version reported in response word 0 of `GET_SMU_VERSION`
///
/// ## Word Format
///
/// | Bits   | Field | Description |
/// |--------|-------|-------------|
/// | 0-7    | patch |             |
/// | 8-15   | minor |             |
/// | 16-23  | major |             |
/// | 24-31  | -     | Program id, ignored |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SmuVersion {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
}

impl ArgumentLayout for SmuVersion {
    fn to_word(&self) -> u32 {
        (u32::from(self.major) << 16) | (u32::from(self.minor) << 8) | u32::from(self.patch)
    }

    fn from_word(word: u32) -> Self {
        Self {
            major: ((word >> 16) & 0xFF) as u8,
            minor: ((word >> 8) & 0xFF) as u8,
            patch: (word & 0xFF) as u8,
        }
    }
}

impl std::fmt::Display for SmuVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_decode() {
        let v = SmuVersion::from_word(0x0054_4FD9);
        assert_eq!(v, SmuVersion { major: 84, minor: 79, patch: 217 });
        assert_eq!(v.to_string(), "84.79.217");
    }

    #[test]
    fn test_version_ignores_program_byte() {
        assert_eq!(SmuVersion::from_word(0x0554_4FD9).to_word(), 0x0054_4FD9);
    }
}
