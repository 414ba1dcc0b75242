//! AMD Family 19h SMU definitions
//!
//! Covers the RSMU mailbox commands of Zen 3 and Zen 4 desktop processors
//! as exposed by the `ryzen_smu` driver.
//!
//! ## Topology
//!
//! Each CCD carries a single CCX of eight cores. Core addresses are
//! normalized against these counts before they are packed into a command.
//!
//! ## Contents
//!
//! - **cmd** - RSMU opcodes
//! - **psm** - Curve optimizer (PSM margin) core mask and margin encoding
//! - **pbo** - Precision Boost Overdrive scalar encoding
//! - **version** - SMU firmware version word

pub mod cmd;
pub mod pbo;
pub mod psm;
pub mod version;

/// Core complexes per CCD
pub const CCX_PER_CCD: u32 = 1;

/// Cores per core complex
pub const CORES_PER_CCX: u32 = 8 / CCX_PER_CCD;
