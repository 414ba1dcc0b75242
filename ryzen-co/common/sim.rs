//! In-memory stand-in for the ryzen_smu register files
//!
//! Records every register transfer so tests can assert on the exact protocol
//! sequence a command produced.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use parking_lot::Mutex;
use ryzen_co_raw::{Endpoint, IoError, STATUS_OK};

use crate::common::channel::SmuChannel;
use crate::config::ChannelConfig;
use crate::ops::Smu;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    StatusRead(u32),
    ArgsWrite([u32; 6]),
    OpWrite(u32),
    ResponseRead,
    SmnAddress(u32),
    SmnWrite(u32, u32),
    SmnRead(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Cmd,
    Args,
    Smn,
}

#[derive(Default)]
struct State {
    statuses: VecDeque<u32>,
    settled: u32,
    responses: HashMap<u32, [u32; 6]>,
    args: [u32; 6],
    smn: HashMap<u32, u32>,
    smn_addr: u32,
    events: Vec<Event>,
    short_status: bool,
    short_args_write: bool,
    short_response: bool,
    fail_dispatch: bool,
}

/// Simulated SMU
///
/// Status reads follow the scripted sequence, then report the settled value
/// (OK unless changed). After an opcode write the argument register holds the
/// canned response for that opcode, or keeps the written arguments.
#[derive(Clone)]
pub struct SimSmu {
    state: Arc<Mutex<State>>,
}

impl SimSmu {
    pub fn new() -> Self {
        let state = State {
            settled: STATUS_OK,
            ..Default::default()
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub fn with_statuses(self, statuses: &[u32]) -> Self {
        self.state.lock().statuses.extend(statuses);
        self
    }

    pub fn settle_at(self, status: u32) -> Self {
        self.state.lock().settled = status;
        self
    }

    pub fn respond(self, op: u32, words: [u32; 6]) -> Self {
        self.state.lock().responses.insert(op, words);
        self
    }

    pub fn with_smn(self, addr: u32, value: u32) -> Self {
        self.state.lock().smn.insert(addr, value);
        self
    }

    pub fn short_status(self) -> Self {
        self.state.lock().short_status = true;
        self
    }

    pub fn short_args_write(self) -> Self {
        self.state.lock().short_args_write = true;
        self
    }

    pub fn short_response(self) -> Self {
        self.state.lock().short_response = true;
        self
    }

    pub fn fail_dispatch(self) -> Self {
        self.state.lock().fail_dispatch = true;
        self
    }

    fn endpoint(&self, role: Role) -> SimEndpoint {
        SimEndpoint {
            role,
            state: Arc::clone(&self.state),
        }
    }

    pub fn channel(&self, config: ChannelConfig) -> SmuChannel<SimEndpoint> {
        SmuChannel::new(self.endpoint(Role::Cmd), self.endpoint(Role::Args), config)
    }

    pub fn smu(&self, config: ChannelConfig) -> Smu<SimEndpoint> {
        Smu::new(self.channel(config), self.endpoint(Role::Smn))
    }

    pub fn events(&self) -> Vec<Event> {
        self.state.lock().events.clone()
    }

    /// Opcodes written, in order
    pub fn ops(&self) -> Vec<u32> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::OpWrite(op) => Some(op),
                _ => None,
            })
            .collect()
    }

    /// Argument words written, in order
    pub fn arg_writes(&self) -> Vec<[u32; 6]> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::ArgsWrite(args) => Some(args),
                _ => None,
            })
            .collect()
    }

    /// Status reads that followed the first argument write
    pub fn status_reads_after_dispatch(&self) -> usize {
        self.events()
            .iter()
            .skip_while(|e| !matches!(e, Event::ArgsWrite(_)))
            .filter(|e| matches!(e, Event::StatusRead(_)))
            .count()
    }

    pub fn smn_value(&self, addr: u32) -> Option<u32> {
        self.state.lock().smn.get(&addr).copied()
    }
}

pub struct SimEndpoint {
    role: Role,
    state: Arc<Mutex<State>>,
}

fn word(data: &[u8], index: usize) -> u32 {
    let at = index * 4;
    u32::from_le_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]])
}

fn fill(buf: &mut [u8], words: &[u32]) -> usize {
    let mut n = 0;
    for (chunk, w) in buf.chunks_exact_mut(4).zip(words) {
        chunk.copy_from_slice(&w.to_le_bytes());
        n += 4;
    }
    n
}

impl Endpoint for SimEndpoint {
    fn name(&self) -> &str {
        match self.role {
            Role::Cmd => "sim/rsmu_cmd",
            Role::Args => "sim/smu_args",
            Role::Smn => "sim/smn",
        }
    }

    fn read(&self, buf: &mut [u8]) -> Result<usize, IoError> {
        let mut state = self.state.lock();
        match self.role {
            Role::Cmd => {
                if state.short_status {
                    return Ok(0);
                }
                let status = state.statuses.pop_front().unwrap_or(state.settled);
                state.events.push(Event::StatusRead(status));
                Ok(fill(buf, &[status]))
            }
            Role::Args => {
                state.events.push(Event::ResponseRead);
                let n = fill(buf, &state.args);
                Ok(if state.short_response { n / 2 } else { n })
            }
            Role::Smn => {
                let addr = state.smn_addr;
                let value = state.smn.get(&addr).copied().unwrap_or(0);
                state.events.push(Event::SmnRead(addr));
                Ok(fill(buf, &[value]))
            }
        }
    }

    fn write(&self, data: &[u8]) -> Result<usize, IoError> {
        let mut state = self.state.lock();
        match self.role {
            Role::Cmd => {
                if state.fail_dispatch {
                    return Ok(0);
                }
                let op = word(data, 0);
                state.events.push(Event::OpWrite(op));
                if let Some(response) = state.responses.get(&op).copied() {
                    state.args = response;
                }
                Ok(data.len())
            }
            Role::Args => {
                if state.short_args_write {
                    return Ok(data.len() - 4);
                }
                let mut args = [0u32; 6];
                for (i, arg) in args.iter_mut().enumerate() {
                    *arg = word(data, i);
                }
                state.args = args;
                state.events.push(Event::ArgsWrite(args));
                Ok(data.len())
            }
            Role::Smn => match data.len() {
                4 => {
                    let addr = word(data, 0);
                    state.smn_addr = addr;
                    state.events.push(Event::SmnAddress(addr));
                    Ok(4)
                }
                8 => {
                    let (addr, value) = (word(data, 0), word(data, 1));
                    state.smn.insert(addr, value);
                    state.events.push(Event::SmnWrite(addr, value));
                    Ok(8)
                }
                _ => Ok(0),
            },
        }
    }
}

/// Read-only text endpoint
pub struct TextEndpoint(pub &'static str);

impl Endpoint for TextEndpoint {
    fn name(&self) -> &str {
        "sim/text"
    }

    fn read(&self, buf: &mut [u8]) -> Result<usize, IoError> {
        let bytes = self.0.as_bytes();
        let n = bytes.len().min(buf.len());
        buf[..n].copy_from_slice(&bytes[..n]);
        Ok(n)
    }

    fn write(&self, _data: &[u8]) -> Result<usize, IoError> {
        Ok(0)
    }
}
