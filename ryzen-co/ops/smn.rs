use ryzen_co_raw::{read_u32, write_u32, write_u32_pair, Endpoint};

use super::Smu;
use crate::error::Result;

impl<E: Endpoint> Smu<E> {
    /// Read a System Management Network register
    ///
    /// The driver latches the address on a 4-byte write and returns the
    /// register on the following read; both happen under one lock.
    pub fn read_smn(&self, addr: u32) -> Result<u32> {
        let smn = self.smn.lock();

        write_u32(&*smn, addr)?;
        let value = read_u32(&*smn)?;

        tracing::debug!("SMN read: 0x{:08X} = 0x{:08X}", addr, value);
        Ok(value)
    }

    /// Write a System Management Network register (address and value in one
    /// 8-byte transfer)
    pub fn write_smn(&self, addr: u32, value: u32) -> Result<()> {
        let smn = self.smn.lock();

        write_u32_pair(&*smn, addr, value)?;

        tracing::debug!("SMN write: 0x{:08X} <- 0x{:08X}", addr, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::common::channel::instant_config;
    use crate::common::sim::{Event, SimSmu};

    #[test]
    fn test_read_smn_latches_address_first() {
        let sim = SimSmu::new().with_smn(0x0005_9954, 0x1234_5678);
        let smu = sim.smu(instant_config());

        assert_eq!(smu.read_smn(0x0005_9954).unwrap(), 0x1234_5678);
        assert_eq!(
            sim.events(),
            vec![
                Event::SmnAddress(0x0005_9954),
                Event::SmnRead(0x0005_9954)
            ]
        );
    }

    #[test]
    fn test_write_smn_single_transfer() {
        let sim = SimSmu::new();
        let smu = sim.smu(instant_config());

        smu.write_smn(0x0005_A000, 0xCAFE).unwrap();

        assert_eq!(sim.events(), vec![Event::SmnWrite(0x0005_A000, 0xCAFE)]);
        assert_eq!(sim.smn_value(0x0005_A000), Some(0xCAFE));
        assert!(sim.ops().is_empty());
    }
}
