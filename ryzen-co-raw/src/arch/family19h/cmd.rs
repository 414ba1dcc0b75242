//! RSMU opcodes for Family 19h

/// Query SMU firmware version (arg1 = 1)
pub const GET_SMU_VERSION: u32 = 0x02;

/// Set the PBO scalar (arg1 = scalar * 100)
pub const SET_PBO_SCALAR: u32 = 0x5B;

/// Read the PBO scalar (response word 0 is an f32)
pub const GET_PBO_SCALAR: u32 = 0x6D;

/// Set the curve optimizer margin of one core (arg1 = core mask | margin)
pub const SET_PSM_MARGIN_CORE: u32 = 0x06;

/// Set the curve optimizer margin of every core (arg1 = margin)
pub const SET_PSM_MARGIN_ALL: u32 = 0x07;

/// Read the curve optimizer margin of one core (arg1 = core mask)
pub const GET_PSM_MARGIN_CORE: u32 = 0xD5;
