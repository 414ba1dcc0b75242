use ryzen_co_raw::current_arch::cmd;
use ryzen_co_raw::current_arch::version::SmuVersion;
use ryzen_co_raw::{ArgumentLayout, Command, Endpoint};

use super::Smu;
use crate::error::{Result, SmuError};

impl<E: Endpoint> Smu<E> {
    /// Firmware version as reported by the SMU itself
    pub fn get_smu_version(&self) -> Result<SmuVersion> {
        let response = self
            .channel
            .execute(&Command::with_arg(cmd::GET_SMU_VERSION, 1))?;
        Ok(SmuVersion::from_word(response.word(0)))
    }

    /// Check the SMU's own version against the one the driver reports
    ///
    /// A mismatch means the command channel is not talking to the firmware
    /// the driver was initialised against.
    pub fn verify_version(&self, driver_version: &str) -> Result<SmuVersion> {
        let version = self.get_smu_version()?;
        let expected = driver_version.trim();

        if version.to_string() != expected {
            return Err(SmuError::VersionMismatch {
                expected: expected.to_string(),
                actual: version.to_string(),
            });
        }

        tracing::info!("Retrieved SMU version: v{}", version);
        Ok(version)
    }
}
