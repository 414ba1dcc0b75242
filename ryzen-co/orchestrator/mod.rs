// Multi-command workflows built on the typed operations

pub mod sweep;

pub use sweep::{snapshot, sweep, SweepConfig, SweepRecord};
