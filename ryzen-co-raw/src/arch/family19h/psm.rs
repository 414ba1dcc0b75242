//! Curve optimizer (PSM margin) argument layouts for Family 19h
//!
//! The per-core commands carry the target core in the upper twelve bits of
//! argument 1 and the margin in the lower sixteen.

use super::{CCX_PER_CCD, CORES_PER_CCX};
use crate::register::ArgumentLayout;

/// Bits of argument 1 that hold the core address
pub const CORE_MASK_FIELD: u32 = 0xFFF0_0000;

/// Bits of argument 1 that hold the encoded margin
pub const MARGIN_FIELD: u32 = 0x0000_FFFF;

/// Bias added to negative margins before they are truncated to 16 bits
pub const NEGATIVE_MARGIN_BIAS: i32 = 0x10_0000;

/// Logical core coordinates
///
/// ## Word Format
///
/// | Bits   | Field | Description                                |
/// |--------|-------|--------------------------------------------|
/// | 0-19   | -     | Unused (margin lives here in set commands) |
/// | 20-23  | core  | Core index within the CCX                  |
/// | 24-27  | ccx   | CCX index within the CCD (always 0)        |
/// | 28-31  | ccd   | CCD index                                  |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CoreAddress {
    pub core: u32,
    pub ccx: u32,
    pub ccd: u32,
}

impl CoreAddress {
    pub const fn new(core: u32, ccx: u32, ccd: u32) -> Self {
        Self { core, ccx, ccd }
    }

    /// Address with core and ccx reduced modulo the family's unit counts
    pub fn normalized(&self) -> Self {
        Self {
            core: self.core % CORES_PER_CCX,
            ccx: self.ccx % CCX_PER_CCD,
            ccd: self.ccd,
        }
    }

    /// Packed core mask, see [`core_mask`]
    pub fn mask(&self) -> u32 {
        core_mask(self.core, self.ccx, self.ccd)
    }
}

impl std::fmt::Display for CoreAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.ccd, self.ccx, self.core)
    }
}

impl ArgumentLayout for CoreAddress {
    fn to_word(&self) -> u32 {
        self.mask()
    }

    fn from_word(word: u32) -> Self {
        Self {
            core: (word >> 20) & 0xF,
            ccx: (word >> 24) & 0xF,
            ccd: (word >> 28) & 0xF,
        }
    }

    fn validate(&self) -> Result<(), &'static str> {
        if self.ccd > 0xF {
            return Err("CCD index must be <= 15 (4 bits)");
        }
        Ok(())
    }
}

/// Pack (core, ccx, ccd) into the SMU core mask
///
/// `core` and `ccx` are reduced modulo the per-unit counts first. The result
/// only has bits set inside [`CORE_MASK_FIELD`].
pub fn core_mask(core: u32, ccx: u32, ccd: u32) -> u32 {
    let core = (core % CORES_PER_CCX) & 0xF;
    let ccx = (ccx % CCX_PER_CCD) & 0xF;
    let ccd = ccd & 0xF;

    ((((ccd << 4) | ccx) << 4) | core) << 20
}

/// Encode a signed margin into the SMU's 16-bit argument field
///
/// Negative values get [`NEGATIVE_MARGIN_BIAS`] added before truncation.
pub fn margin_encode(margin: i32) -> u32 {
    if margin < 0 {
        (margin.wrapping_add(NEGATIVE_MARGIN_BIAS) as u32) & MARGIN_FIELD
    } else {
        (margin as u32) & MARGIN_FIELD
    }
}

/// Recover a margin from its 16-bit encoding
pub fn margin_decode(word: u32) -> i32 {
    i32::from((word & MARGIN_FIELD) as u16 as i16)
}

/// Curve optimizer margin in counts (one count is roughly 3-5 mV)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PsmMargin(pub i32);

impl ArgumentLayout for PsmMargin {
    fn to_word(&self) -> u32 {
        margin_encode(self.0)
    }

    fn from_word(word: u32) -> Self {
        Self(margin_decode(word))
    }

    fn validate(&self) -> Result<(), &'static str> {
        if i16::try_from(self.0).is_err() {
            return Err("Margin must fit in 16 signed bits");
        }
        Ok(())
    }
}
