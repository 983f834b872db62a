//! Recording firmware double for host tests.

use alloc::vec::Vec;

use crate::{FirmwareOps, MboxError};

/// Firmware backend that records every call and serves canned values.
///
/// Failure flags make a single operation fail so callers can assert on
/// their discard-and-continue paths. Calls are recorded even when they
/// fail; the call was still made.
#[derive(Debug, Default)]
pub struct MockFirmware {
    pub board_revision: u32,
    pub clock_hz: u32,
    pub max_clock_hz: u32,
    pub pwm: u32,

    pub set_clock_calls: Vec<u32>,
    pub set_pwm_calls: Vec<u32>,
    pub power_calls: Vec<(u32, bool, bool)>,

    pub fail_get_clock: bool,
    pub fail_set_clock: bool,
    pub fail_get_pwm: bool,
    pub fail_set_pwm: bool,
    pub fail_set_power: bool,
}

impl MockFirmware {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FirmwareOps for MockFirmware {
    fn get_board_revision(&mut self) -> Result<u32, MboxError> {
        Ok(self.board_revision)
    }

    fn get_clock(&mut self) -> Result<u32, MboxError> {
        if self.fail_get_clock {
            return Err(MboxError::Injected);
        }
        Ok(self.clock_hz)
    }

    fn max_clock(&mut self) -> Result<u32, MboxError> {
        Ok(self.max_clock_hz)
    }

    fn set_clock(&mut self, hz: u32) -> Result<(), MboxError> {
        self.set_clock_calls.push(hz);
        if self.fail_set_clock {
            return Err(MboxError::Injected);
        }
        self.clock_hz = hz;
        Ok(())
    }

    fn get_pwm(&mut self) -> Result<u32, MboxError> {
        if self.fail_get_pwm {
            return Err(MboxError::Injected);
        }
        Ok(self.pwm)
    }

    fn set_pwm(&mut self, duty: u32) -> Result<(), MboxError> {
        self.set_pwm_calls.push(duty);
        if self.fail_set_pwm {
            return Err(MboxError::Injected);
        }
        self.pwm = duty;
        Ok(())
    }

    fn set_power(&mut self, domain: u32, on: bool, wait: bool) -> Result<(), MboxError> {
        self.power_calls.push((domain, on, wait));
        if self.fail_set_power {
            return Err(MboxError::Injected);
        }
        Ok(())
    }
}
