// Per-core curve optimizer walks across the configured topology

use ryzen_co_raw::current_arch::psm::CoreAddress;
use ryzen_co_raw::Endpoint;

use crate::config::Topology;
use crate::error::Result;
use crate::ops::Smu;

/// Margin offset the sweep starts from (core 0 of CCD 0 gets this value)
pub const DEFAULT_BASE_MARGIN: i32 = -15;

#[derive(Debug, Clone)]
pub struct SweepConfig {
    pub topology: Topology,
    pub base_margin: i32,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            topology: Topology::default(),
            base_margin: DEFAULT_BASE_MARGIN,
        }
    }
}

/// Outcome of sweeping one core
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepRecord {
    pub address: CoreAddress,
    pub mask: u32,
    pub before: i32,
    pub requested: i32,
    pub after: i32,
}

impl SweepRecord {
    pub fn applied(&self) -> bool {
        self.requested == self.after
    }
}

/// Read the margin of every core in topology order
pub fn snapshot<E: Endpoint>(
    smu: &Smu<E>,
    topology: &Topology,
) -> Result<Vec<(CoreAddress, i32)>> {
    topology
        .cores()
        .into_iter()
        .map(|address| {
            smu.get_psm_margin_core(address)
                .map(|margin| (address, margin))
        })
        .collect()
}

/// Give every core a distinct margin (`base_margin + linear index`) and
/// read it back
///
/// Stops at the first failing command; cores already visited keep their new
/// margin.
pub fn sweep<E: Endpoint>(smu: &Smu<E>, config: &SweepConfig) -> Result<Vec<SweepRecord>> {
    let topology = &config.topology;
    let cores = topology.cores();
    let mut records = Vec::with_capacity(cores.len());

    tracing::info!(
        "Sweeping {} cores starting at margin {}",
        cores.len(),
        config.base_margin
    );

    for address in cores {
        let before = smu.get_psm_margin_core(address)?;
        let requested = config.base_margin + topology.linear_index(&address) as i32;
        smu.set_psm_margin_core(requested, address)?;
        let after = smu.get_psm_margin_core(address)?;

        let record = SweepRecord {
            address,
            mask: address.mask(),
            before,
            requested,
            after,
        };

        if !record.applied() {
            tracing::warn!(
                "Core {} reads back {} after setting {}",
                address,
                after,
                requested
            );
        }
        records.push(record);
    }

    Ok(records)
}
