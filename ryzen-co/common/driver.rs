use ryzen_co_raw::{read_fixed_text, FileEndpoint};

use crate::common::arch::Codename;
use crate::common::channel::SmuChannel;
use crate::config::{ChannelConfig, DriverPaths};
use crate::error::{Result, SmuError};
use crate::ops::Smu;

/// Whether the process may touch the SMU (root, or launched through sudo)
pub fn is_privileged() -> bool {
    std::env::var_os("SUDO_USER").is_some() || nix::unistd::geteuid().is_root()
}

/// The ryzen_smu driver's sysfs interface
#[derive(Debug, Clone)]
pub struct Driver {
    paths: DriverPaths,
}

impl Driver {
    pub fn new(paths: DriverPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &DriverPaths {
        &self.paths
    }

    /// The driver creates its version file on load
    pub fn is_loaded(&self) -> bool {
        self.paths.version().exists()
    }

    pub fn ensure_loaded(&self) -> Result<()> {
        if self.is_loaded() {
            Ok(())
        } else {
            Err(SmuError::DriverNotLoaded(
                self.paths.version().path().display().to_string(),
            ))
        }
    }

    pub fn pm_table_supported(&self) -> bool {
        self.paths.pm_table().exists()
    }

    /// Version string as reported by the driver, trailing newline included
    pub fn version(&self) -> Result<String> {
        Ok(read_fixed_text(&self.paths.version(), None)?)
    }

    pub fn codename(&self) -> Result<Codename> {
        Codename::read_from(&self.paths.codename())
    }

    /// Open the command channel and SMN register
    pub fn open(&self, config: ChannelConfig) -> Result<Smu<FileEndpoint>> {
        self.ensure_loaded()?;

        let channel = SmuChannel::new(self.paths.rsmu_cmd(), self.paths.smu_args(), config);
        tracing::info!(
            "Opened SMU channel at {} (poll {:?}, limit {:?}, dispatch {:?})",
            self.paths.root().display(),
            config.poll_interval,
            config.wait_limit,
            config.dispatch
        );

        Ok(Smu::new(channel, self.paths.smn()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_root(tag: &str) -> PathBuf {
        let root = std::env::temp_dir().join(format!("ryzen-co-{tag}-{}", std::process::id()));
        std::fs::create_dir_all(&root).unwrap();
        root
    }

    #[test]
    fn test_missing_driver() {
        let driver = Driver::new(DriverPaths::new("/nonexistent/ryzen_smu_drv"));
        assert!(!driver.is_loaded());
        assert!(!driver.pm_table_supported());
        assert!(matches!(
            driver.open(ChannelConfig::default()),
            Err(SmuError::DriverNotLoaded(_))
        ));
    }

    #[test]
    fn test_loaded_driver_files() {
        let root = scratch_root("driver");
        std::fs::write(root.join("version"), "84.79.217\n").unwrap();
        std::fs::write(root.join("codename"), "20\n").unwrap();

        let driver = Driver::new(DriverPaths::new(&root));
        assert!(driver.is_loaded());
        assert!(!driver.pm_table_supported());
        assert_eq!(driver.version().unwrap(), "84.79.217\n");
        assert_eq!(driver.codename().unwrap(), Codename::Raphael);
        assert!(driver.open(ChannelConfig::default()).is_ok());

        std::fs::remove_dir_all(&root).unwrap();
    }
}
