use ryzen_co_raw::current_arch::{cmd, pbo};
use ryzen_co_raw::{Command, Endpoint};

use super::Smu;
use crate::error::{Result, SmuError};

impl<E: Endpoint> Smu<E> {
    /// Current PBO scalar
    pub fn get_pbo_scalar(&self) -> Result<f32> {
        let response = self.channel.execute(&Command::new(cmd::GET_PBO_SCALAR))?;
        Ok(pbo::pbo_scalar_from_word(response.word(0)))
    }

    /// Set the PBO scalar, sent to the SMU in hundredths
    pub fn set_pbo_scalar(&self, scalar: f32) -> Result<()> {
        let arg1 = pbo::pbo_scalar_arg(scalar).ok_or_else(|| {
            SmuError::InvalidArgument(format!("PBO scalar {scalar} is not representable"))
        })?;

        self.channel
            .execute(&Command::with_arg(cmd::SET_PBO_SCALAR, arg1))?;
        tracing::info!("PBO scalar set to {}", scalar);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::channel::instant_config;
    use crate::common::sim::SimSmu;

    #[test]
    fn test_get_pbo_scalar_decodes_float_bits() {
        let sim = SimSmu::new().respond(0x6D, [2.5f32.to_bits(), 0, 0, 0, 0, 0]);
        let smu = sim.smu(instant_config());

        assert_eq!(smu.get_pbo_scalar().unwrap(), 2.5);
        assert_eq!(sim.ops(), vec![0x6D]);
        assert_eq!(sim.arg_writes(), vec![[0; 6]]);
    }

    #[test]
    fn test_set_pbo_scalar_sends_hundredths() {
        let sim = SimSmu::new();
        let smu = sim.smu(instant_config());

        smu.set_pbo_scalar(3.0).unwrap();

        assert_eq!(sim.ops(), vec![0x5B]);
        assert_eq!(sim.arg_writes(), vec![[300, 0, 0, 0, 0, 0]]);
    }

    #[test]
    fn test_set_pbo_scalar_rejects_negative_without_io() {
        let sim = SimSmu::new();
        let smu = sim.smu(instant_config());

        assert!(matches!(
            smu.set_pbo_scalar(-1.0),
            Err(SmuError::InvalidArgument(_))
        ));
        assert!(sim.events().is_empty());
    }

    #[test]
    fn test_pbo_failure_propagates() {
        let sim = SimSmu::new().with_statuses(&[1, 0xFF]);
        let smu = sim.smu(instant_config());

        assert!(matches!(
            smu.get_pbo_scalar(),
            Err(SmuError::CommandRejected {
                op: 0x6D,
                status: 0xFF
            })
        ));
    }
}
