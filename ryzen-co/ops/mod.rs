//! Typed SMU operations
//!
//! Each operation builds one [`Command`](ryzen_co_raw::Command), runs it on the
//! channel and decodes the reply. Nothing here retries; a failed command is a
//! failed operation.

mod pbo;
mod psm;
mod smn;
mod version;

use parking_lot::Mutex;
use ryzen_co_raw::Endpoint;

use crate::common::channel::SmuChannel;

pub struct Smu<E> {
    channel: SmuChannel<E>,
    smn: Mutex<E>,
}

impl<E: Endpoint> Smu<E> {
    pub fn new(channel: SmuChannel<E>, smn: E) -> Self {
        Self {
            channel,
            smn: Mutex::new(smn),
        }
    }

    pub fn channel(&self) -> &SmuChannel<E> {
        &self.channel
    }
}
