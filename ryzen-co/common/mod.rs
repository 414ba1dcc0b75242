pub mod arch;
pub mod channel;
pub mod driver;

#[cfg(test)]
pub(crate) mod sim;

pub use arch::Codename;
pub use channel::SmuChannel;
pub use driver::{is_privileged, Driver};
