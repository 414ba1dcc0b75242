use ryzen_co_raw::current_arch::cmd;
use ryzen_co_raw::current_arch::psm::{CoreAddress, PsmMargin, CORE_MASK_FIELD};
use ryzen_co_raw::{ArgumentLayout, Command, Endpoint};

use super::Smu;
use crate::error::{Result, SmuError};

fn checked_margin(margin: i32) -> Result<PsmMargin> {
    let margin = PsmMargin(margin);
    margin
        .validate()
        .map_err(|e| SmuError::InvalidArgument(format!("margin {}: {e}", margin.0)))?;
    Ok(margin)
}

fn checked_mask(address: &CoreAddress) -> Result<u32> {
    address
        .validate()
        .map_err(|e| SmuError::InvalidArgument(format!("core {address}: {e}")))?;
    Ok(address.to_word() & CORE_MASK_FIELD)
}

impl<E: Endpoint> Smu<E> {
    /// Curve optimizer margin of one core
    ///
    /// The reply is a plain two's-complement word, unlike the biased 16-bit
    /// encoding used when setting.
    pub fn get_psm_margin_core(&self, address: CoreAddress) -> Result<i32> {
        let arg1 = checked_mask(&address)?;
        let response = self
            .channel
            .execute(&Command::with_arg(cmd::GET_PSM_MARGIN_CORE, arg1))?;

        let margin = response.as_i32(0);
        tracing::debug!("Core {} margin is {}", address, margin);
        Ok(margin)
    }

    /// Set the curve optimizer margin of one core
    pub fn set_psm_margin_core(&self, margin: i32, address: CoreAddress) -> Result<()> {
        let encoded = checked_margin(margin)?.to_word();
        let arg1 = checked_mask(&address)? | encoded;

        self.channel
            .execute(&Command::with_arg(cmd::SET_PSM_MARGIN_CORE, arg1))?;
        tracing::info!("Core {} margin set to {}", address, margin);
        Ok(())
    }

    /// Set the curve optimizer margin of every core
    pub fn set_psm_margin_all(&self, margin: i32) -> Result<()> {
        let arg1 = checked_margin(margin)?.to_word();

        self.channel
            .execute(&Command::with_arg(cmd::SET_PSM_MARGIN_ALL, arg1))?;
        tracing::info!("All-core margin set to {}", margin);
        Ok(())
    }
}
