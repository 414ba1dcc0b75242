//! Architecture-specific SMU definitions
//!
//! SMU opcodes, core addressing and margin encodings differ between AMD CPU
//! families. This module provides the per-family definitions; the one
//! selected by feature flag is re-exported as `current_arch`.
//!
//! ## Supported Families
//!
//! - **Family 19h** (`family19h` feature) - Zen 3 / Zen 4 desktop parts
//!   (Vermeer, Raphael)

#[cfg(feature = "family19h")]
pub mod family19h;
