use std::path::{Path, PathBuf};
use std::time::Duration;

use ryzen_co_raw::current_arch::psm::CoreAddress;
use ryzen_co_raw::current_arch::{CCX_PER_CCD, CORES_PER_CCX};
use ryzen_co_raw::FileEndpoint;

use crate::error::{Result, SmuError};

/// Default location of the ryzen_smu sysfs interface
pub const DEFAULT_DRIVER_ROOT: &str = "/sys/kernel/ryzen_smu_drv";

/// Environment variable overriding [`DEFAULT_DRIVER_ROOT`]
pub const DRIVER_ROOT_ENV: &str = "RYZEN_SMU_ROOT";

/// How long the channel keeps polling a busy SMU
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitLimit {
    /// Fail with a timeout once this much time has passed in one wait
    Bounded(Duration),
    /// Poll until the status changes
    Infinite,
}

/// What to do when writing the opcode register fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchPolicy {
    /// Fail the command
    #[default]
    Strict,
    /// Log the failure and keep polling for completion
    Lenient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelConfig {
    pub poll_interval: Duration,
    pub wait_limit: WaitLimit,
    pub dispatch: DispatchPolicy,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            wait_limit: WaitLimit::Bounded(Duration::from_secs(30)),
            dispatch: DispatchPolicy::Strict,
        }
    }
}

/// Paths of the driver endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverPaths {
    root: PathBuf,
}

impl DriverPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Use `RYZEN_SMU_ROOT` if set, the standard sysfs location otherwise
    pub fn from_env() -> Self {
        match std::env::var_os(DRIVER_ROOT_ENV) {
            Some(root) => {
                tracing::info!("Using driver root from {}: {:?}", DRIVER_ROOT_ENV, root);
                Self::new(root)
            }
            None => Self::new(DEFAULT_DRIVER_ROOT),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn version(&self) -> FileEndpoint {
        FileEndpoint::new(self.root.join("version"))
    }

    pub fn codename(&self) -> FileEndpoint {
        FileEndpoint::new(self.root.join("codename"))
    }

    pub fn pm_table(&self) -> FileEndpoint {
        FileEndpoint::new(self.root.join("pm_table"))
    }

    pub fn smn(&self) -> FileEndpoint {
        FileEndpoint::new(self.root.join("smn"))
    }

    pub fn smu_args(&self) -> FileEndpoint {
        FileEndpoint::new(self.root.join("smu_args"))
    }

    pub fn rsmu_cmd(&self) -> FileEndpoint {
        FileEndpoint::new(self.root.join("rsmu_cmd"))
    }
}

impl Default for DriverPaths {
    fn default() -> Self {
        Self::new(DEFAULT_DRIVER_ROOT)
    }
}

/// Core layout of the processor being addressed
///
/// Topology is not probed; the defaults describe a 16-core two-CCD part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    pub ccds: Vec<u32>,
    pub ccx_per_ccd: u32,
    pub cores_per_ccx: u32,
}

impl Topology {
    pub fn new(ccds: Vec<u32>, ccx_per_ccd: u32, cores_per_ccx: u32) -> Result<Self> {
        if ccds.is_empty() {
            return Err(SmuError::ConfigError("at least one CCD is required".into()));
        }
        if ccx_per_ccd == 0 || ccx_per_ccd > CCX_PER_CCD {
            return Err(SmuError::ConfigError(format!(
                "ccx per ccd must be between 1 and {CCX_PER_CCD}, got {ccx_per_ccd}"
            )));
        }
        if cores_per_ccx == 0 || cores_per_ccx > CORES_PER_CCX {
            return Err(SmuError::ConfigError(format!(
                "cores per ccx must be between 1 and {CORES_PER_CCX}, got {cores_per_ccx}"
            )));
        }
        if let Some(&ccd) = ccds.iter().find(|&&ccd| ccd > 0xF) {
            return Err(SmuError::ConfigError(format!(
                "CCD index {ccd} does not fit the 4-bit core mask field"
            )));
        }

        Ok(Self {
            ccds,
            ccx_per_ccd,
            cores_per_ccx,
        })
    }

    /// Every core address, CCD-major
    pub fn cores(&self) -> Vec<CoreAddress> {
        let mut cores = Vec::new();
        for &ccd in &self.ccds {
            for ccx in 0..self.ccx_per_ccd {
                for core in 0..self.cores_per_ccx {
                    cores.push(CoreAddress::new(core, ccx, ccd));
                }
            }
        }
        cores
    }

    /// Position of a core when all cores are numbered CCD-major
    pub fn linear_index(&self, address: &CoreAddress) -> u32 {
        address.core
            + address.ccx * self.cores_per_ccx
            + address.ccd * self.cores_per_ccx * self.ccx_per_ccd
    }
}

impl Default for Topology {
    fn default() -> Self {
        Self {
            ccds: vec![0, 1],
            ccx_per_ccd: CCX_PER_CCD,
            cores_per_ccx: CORES_PER_CCX,
        }
    }
}

/// Parse a list of range strings like ["0-3", "5", "8-11"] into a sorted,
/// deduplicated Vec<u32>
///
/// Supports single values, inclusive ranges, comma-separated lists and any
/// mix of them.
pub fn parse_range_list(inputs: &[String]) -> Result<Vec<u32>> {
    let mut result = Vec::new();

    for input in inputs {
        for part in input.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }

            if let Some((start_str, end_str)) = part.split_once('-') {
                let start = parse_u32(start_str.trim())?;
                let end = parse_u32(end_str.trim())?;
                if start > end {
                    return Err(SmuError::ParseError(format!("empty range: {part}")));
                }
                result.extend(start..=end);
            } else {
                result.push(parse_u32(part)?);
            }
        }
    }

    result.sort_unstable();
    result.dedup();
    Ok(result)
}

/// Parse a decimal or `0x`-prefixed hexadecimal number
pub fn parse_u32(s: &str) -> Result<u32> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse::<u32>(),
    };
    parsed.map_err(|e| SmuError::ParseError(format!("invalid number {s:?}: {e}")))
}
