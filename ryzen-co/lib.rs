// Macros (must be first for visibility)
#[macro_use]
pub mod macros;

pub mod common;
pub mod config;
pub mod error;
pub mod ops;
pub mod orchestrator;

pub use common::{is_privileged, Codename, Driver, SmuChannel};
pub use config::{ChannelConfig, DispatchPolicy, DriverPaths, Topology, WaitLimit};
pub use error::{Result, SmuError, WaitStage};
pub use ops::Smu;
pub use orchestrator::{SweepConfig, SweepRecord};

// Re-export the register layer
pub use ryzen_co_raw as raw;
pub use ryzen_co_raw::current_arch::psm::CoreAddress;
