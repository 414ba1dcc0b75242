//! # ryzen-co-raw
//!
//! Register-file I/O and SMU command encodings for the `ryzen_smu` Linux
//! driver.
//!
//! This crate provides the byte-level access to the driver's pseudo-files,
//! the SMU request/response word types, and per-family constants and argument
//! layouts (opcodes, core masks, curve optimizer margin encoding). It performs
//! no polling and holds no state; the command protocol lives in `ryzen-co`.
//!
//! ## Features
//!
//! Select the target family via feature flags:
//! - `family19h` (default) - Zen 3 / Zen 4 definitions
//!
//! ## Usage
//!
//! ```
//! use ryzen_co_raw::current_arch::{cmd, psm};
//! use ryzen_co_raw::Command;
//!
//! // Set core 3 of CCD 1 to -15 counts
//! let arg1 = (psm::core_mask(3, 0, 1) & psm::CORE_MASK_FIELD) | psm::margin_encode(-15);
//! let command = Command::with_arg(cmd::SET_PSM_MARGIN_CORE, arg1);
//!
//! assert_eq!(command.args()[0], 0x1030_FFF1);
//! ```

pub mod arch;
pub mod io;
pub mod register;
pub mod smu;

// Re-export for convenience
pub use io::{
    read_fixed_text, read_u32, read_u32x6, write_u32, write_u32_pair, write_u32x6, Endpoint,
    FileEndpoint, IoError, Result,
};
pub use register::ArgumentLayout;
pub use smu::{Command, Response, SmuStatus, STATUS_BUSY, STATUS_OK};

// Export current architecture based on feature flag
#[cfg(feature = "family19h")]
pub use arch::family19h as current_arch;
