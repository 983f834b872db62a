//! Property-channel tag ids and framing constants.
//!
//! Reference: Raspberry Pi firmware wiki, "Mailbox property interface".

/// Get board revision.
pub const TAG_GET_BOARD_REVISION: u32 = 0x0001_0002;

/// Get current clock rate. Value buffer: clock id, rate in Hz.
pub const TAG_GET_CLOCK_RATE: u32 = 0x0003_0002;

/// Get maximum clock rate. Value buffer: clock id, rate in Hz.
pub const TAG_GET_MAX_CLOCK_RATE: u32 = 0x0003_0004;

/// Set clock rate. Value buffer: clock id, rate in Hz, skip-turbo flag.
pub const TAG_SET_CLOCK_RATE: u32 = 0x0003_8002;

/// Get a PoE-HAT register. Value buffer: register, value.
pub const TAG_GET_POE_HAT_VAL: u32 = 0x0003_0049;

/// Set a PoE-HAT register. Value buffer: register, value.
pub const TAG_SET_POE_HAT_VAL: u32 = 0x0003_8049;

/// Set power state. Value buffer: domain id, state (bit 0 = on,
/// bit 1 = wait for the transition).
pub const TAG_SET_POWER_STATE: u32 = 0x0002_8001;

/// Request code placed in the message header.
pub const REQUEST: u32 = 0;

/// Response code reported by the firmware on success.
pub const RESPONSE_OK: u32 = 0x8000_0000;

/// Terminates the tag list.
pub const END_TAG: u32 = 0;

/// Property tags channel (ARM to VC).
pub const CHANNEL_PROPERTY: u32 = 8;
