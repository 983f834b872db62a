//! VideoCore firmware mailbox client
//!
//! # Purpose
//! Synchronous request/response calls to the VideoCore firmware, which
//! performs the actual clock, power and fan PWM control on the board.
//! Callers talk to the [`FirmwareOps`] trait; two backends exist:
//!
//! - [`PropertyMailbox`]: the hardware property-channel transport
//! - [`MockFirmware`] (feature `mock`): a recording double for host tests
//!
//! # Integration Points
//! - Consumed by: the secure-world bridge for clock/fan/power requests
//! - Hardware: BCM2711 mailbox 0/1 register block, property channel 8
//!
//! # Testing Strategy
//! - Unit tests: message framing (host)
//! - Mock backend: records every call, serves canned values, injects
//!   failures so callers can assert on discarded errors

#![no_std]

#[cfg(test)]
extern crate std;

#[cfg(feature = "mock")]
extern crate alloc;

mod hw;
#[cfg(feature = "mock")]
mod mock;
mod tags;

pub use hw::PropertyMailbox;
#[cfg(feature = "mock")]
pub use mock::MockFirmware;

use thiserror::Error;

/// Errors surfaced by a firmware call.
///
/// The transport never retries; a failed exchange is reported once and the
/// caller decides whether it matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MboxError {
    /// The request does not fit the message buffer.
    #[error("request does not fit the mailbox buffer")]
    RequestTooBig,

    /// The read register returned a different message than was sent.
    #[error("mailbox response did not match the request")]
    ChannelMismatch,

    /// The firmware response code did not report success.
    #[error("firmware rejected the request")]
    ResponseFailed,

    /// Injected failure from the mock backend.
    #[cfg(feature = "mock")]
    #[error("injected mock failure")]
    Injected,
}

/// Clock id of the ARM core clock in the clock-rate tags.
pub const CLOCK_ARM: u32 = 3;

/// PoE-HAT register holding the fan PWM duty.
pub const POE_REG_FAN_PWM: u32 = 2;

/// Synchronous call contract to the co-processor firmware.
///
/// Every operation blocks until the firmware answers or the transport
/// reports a failure. Clock rates cross this boundary in Hz.
pub trait FirmwareOps {
    /// Board revision word.
    fn get_board_revision(&mut self) -> Result<u32, MboxError>;

    /// Current ARM clock rate in Hz.
    fn get_clock(&mut self) -> Result<u32, MboxError>;

    /// Maximum supported ARM clock rate in Hz.
    fn max_clock(&mut self) -> Result<u32, MboxError>;

    /// Request an ARM clock rate in Hz.
    fn set_clock(&mut self, hz: u32) -> Result<(), MboxError>;

    /// Current fan PWM duty (0-255).
    fn get_pwm(&mut self) -> Result<u32, MboxError>;

    /// Set the fan PWM duty (0-255).
    fn set_pwm(&mut self, duty: u32) -> Result<(), MboxError>;

    /// Switch a firmware power domain on or off, optionally waiting for
    /// the transition to complete.
    fn set_power(&mut self, domain: u32, on: bool, wait: bool) -> Result<(), MboxError>;
}
