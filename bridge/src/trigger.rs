//! Trigger mailbox decoding
//!
//! A single 32-bit value delivered with the secure interrupt multiplexes
//! up to four independent sub-requests. High bits select channel work;
//! a value with none of them set is itself a clock-frequency request in
//! MHz.

use bitflags::bitflags;

use crate::config::{CLOCK_REQ_MAX_MHZ, CLOCK_REQ_MIN_MHZ};
use crate::mmio::Reg32;

bitflags! {
    /// Request bits raised in the trigger mailbox register.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TriggerFlags: u32 {
        /// Counter channel wants servicing.
        const COUNTER_CHANNEL = 1 << 28;
        /// Fan channel wants servicing.
        const FAN_CHANNEL = 1 << 29;
        /// The low byte carries a fan PWM duty to apply.
        const FAN_SET = 1 << 30;
    }
}

/// One decoded trigger. Created at interrupt entry, consumed within the
/// same handler invocation, never retained across interrupts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingRequest {
    pub counter_channel: bool,
    pub fan_channel: bool,
    /// Requested fan duty when `FAN_SET` was raised.
    pub fan_duty: Option<u8>,
    /// Clamped clock request in MHz when no request bits were raised.
    pub clock_mhz: Option<u32>,
}

impl PendingRequest {
    /// Classify a raw mailbox value.
    pub fn decode(raw: u32) -> Self {
        let flags = TriggerFlags::from_bits_truncate(raw);
        Self {
            counter_channel: flags.contains(TriggerFlags::COUNTER_CHANNEL),
            fan_channel: flags.contains(TriggerFlags::FAN_CHANNEL),
            fan_duty: flags
                .contains(TriggerFlags::FAN_SET)
                .then(|| (raw & 0xFF) as u8),
            clock_mhz: flags
                .is_empty()
                .then(|| raw.clamp(CLOCK_REQ_MIN_MHZ, CLOCK_REQ_MAX_MHZ)),
        }
    }
}

/// The raw trigger register. Reading yields the raised request bits;
/// writing the value back acknowledges and clears them.
pub struct TriggerMailbox {
    reg: Reg32,
}

impl TriggerMailbox {
    pub const fn new(reg: Reg32) -> Self {
        Self { reg }
    }

    /// Read, acknowledge and classify the pending trigger. The clearing
    /// write happens before any servicing so a stale value cannot
    /// re-raise the level-triggered line.
    pub fn take(&self) -> PendingRequest {
        let raw = self.reg.read();
        self.reg.write(raw);
        PendingRequest::decode(raw)
    }
}
