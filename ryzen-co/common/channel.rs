//! RSMU command channel
//!
//! Executes one command at a time against the `rsmu_cmd` (status/opcode) and
//! `smu_args` (arguments/response) registers:
//!
//! 1. wait until the status register stops reading busy
//! 2. write all six argument words in one transfer
//! 3. write the opcode
//! 4. wait until the status register stops reading busy
//! 5. reject anything but the OK status, otherwise read back six words
//!
//! The register pair is held behind a mutex for the whole sequence, so a
//! channel shared between threads never interleaves two commands.

use std::time::Instant;

use parking_lot::Mutex;
use ryzen_co_raw::{io, Command, Endpoint, Response, SmuStatus};

use crate::config::{ChannelConfig, DispatchPolicy, WaitLimit};
use crate::error::{Result, SmuError, WaitStage};

struct Registers<E> {
    cmd: E,
    args: E,
}

pub struct SmuChannel<E> {
    registers: Mutex<Registers<E>>,
    config: ChannelConfig,
}

impl<E: Endpoint> SmuChannel<E> {
    /// `cmd` is the status/opcode register, `args` the argument register
    pub fn new(cmd: E, args: E, config: ChannelConfig) -> Self {
        Self {
            registers: Mutex::new(Registers { cmd, args }),
            config,
        }
    }

    pub fn config(&self) -> &ChannelConfig {
        &self.config
    }

    /// Run `command` to completion and return the SMU's response words
    pub fn execute(&self, command: &Command) -> Result<Response> {
        let registers = self.registers.lock();
        let op = command.op();

        tracing::debug!("SMU command 0x{:02X} args {:08x?}", op, command.args());

        self.wait_while_busy(&registers.cmd, op, WaitStage::AwaitIdle)?;

        io::write_u32x6(&registers.args, command.args())
            .map_err(|source| SmuError::ArgWriteFailed { op, source })?;

        if let Err(source) = io::write_u32(&registers.cmd, op) {
            match self.config.dispatch {
                DispatchPolicy::Strict => {
                    return Err(SmuError::CommandDispatchFailed { op, source });
                }
                DispatchPolicy::Lenient => {
                    tracing::warn!("Failed to execute SMU command 0x{:02X}: {}", op, source);
                }
            }
        }

        let status = self.wait_while_busy(&registers.cmd, op, WaitStage::AwaitCompletion)?;
        if let SmuStatus::Failed(status) = status {
            tracing::debug!("SMU command 0x{:02X} failed with 0x{:02X}", op, status);
            return Err(SmuError::CommandRejected { op, status });
        }

        let words = io::read_u32x6(&registers.args)
            .map_err(|source| SmuError::ResponseReadFailed { op, source })?;

        tracing::debug!("SMU command 0x{:02X} response {:08x?}", op, words);
        Ok(Response::new(words))
    }

    /// Poll the status register until it reads anything other than busy
    fn wait_while_busy(&self, cmd: &E, op: u32, stage: WaitStage) -> Result<SmuStatus> {
        let started = Instant::now();

        loop {
            let raw = io::read_u32(cmd)
                .map_err(|source| SmuError::StatusUnavailable { op, stage, source })?;

            let status = SmuStatus::from_raw(raw);
            if !status.is_busy() {
                return Ok(status);
            }

            let waited = started.elapsed();
            if let WaitLimit::Bounded(limit) = self.config.wait_limit {
                if waited >= limit {
                    return Err(SmuError::Timeout { op, stage, waited });
                }
            }

            tracing::warn!(
                "SMU busy {} for command 0x{:02X}, retrying in {:?}",
                stage,
                op,
                self.config.poll_interval
            );
            std::thread::sleep(self.config.poll_interval);
        }
    }
}

/// Channel configuration suited to simulated registers: no sleeping, no cap
#[cfg(test)]
pub(crate) fn instant_config() -> ChannelConfig {
    ChannelConfig {
        poll_interval: std::time::Duration::ZERO,
        wait_limit: WaitLimit::Infinite,
        dispatch: DispatchPolicy::Strict,
    }
}
