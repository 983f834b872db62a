//! Channel responses
//!
//! Per-channel servicing for one pending request, plus the best-effort
//! firmware calls for fan duty and clock requests. Every path ends with
//! the touched channel back in its idle shape; nothing here faults, since
//! a stalled secure handler would stall the platform.

use log::{debug, info, warn};
use vc_mbox::FirmwareOps;

use crate::channel::{PccChannel, CMD_READ};
use crate::mmio::Reg32;

const HUNDRED_MHZ: u32 = 100_000_000;
const DELIVERED_DIVISOR: u64 = 15;

/// Derived counter reported alongside the reference counter.
///
/// The clock is reduced to hundred-MHz units first, then scales the
/// reference, then the product is divided by 15. Truncation happens at
/// each division in that order; the reader depends on it.
pub fn delivered_counter(reference: u32, clock_hz: u32) -> u32 {
    let hundred_mhz_units = (clock_hz / HUNDRED_MHZ) as u64;
    (reference as u64 * hundred_mhz_units / DELIVERED_DIVISOR) as u32
}

/// Service a pending request on the counter channel.
///
/// A read command gets fresh counters: the reference counter at payload
/// offset 0 and the derived counter at offset 4, both little-endian. Any
/// other command is a protocol violation; it is logged and the channel is
/// re-armed untouched. If the clock rate is unavailable the reference is
/// still written and the derived field keeps its previous bytes.
pub fn service_counter_channel<F: FirmwareOps>(ch: &PccChannel, counter: &Reg32, fw: &mut F) {
    if ch.command() == CMD_READ {
        let reference = counter.read();
        ch.write_payload_u32(0, reference);
        match fw.get_clock() {
            Ok(hz) => ch.write_payload_u32(1, delivered_counter(reference, hz)),
            Err(e) => warn!("counter channel: clock rate unavailable: {}", e),
        }
    } else {
        ch.log_handshake();
    }
    ch.reset_idle();
}

/// Service a pending request on the fan channel.
///
/// There is no fan read protocol yet. Every visit queries the current
/// duty for the log, dumps the record as a (possibly spurious) handshake
/// and re-arms the channel.
pub fn service_fan_channel<F: FirmwareOps>(ch: &PccChannel, fw: &mut F) {
    match fw.get_pwm() {
        Ok(duty) => debug!("fan channel: current pwm duty {}", duty),
        Err(e) => warn!("fan channel: pwm query failed: {}", e),
    }
    ch.log_handshake();
    ch.reset_idle();
}

/// Apply a requested fan duty (0-255).
pub fn apply_fan_duty<F: FirmwareOps>(fw: &mut F, duty: u8) {
    match fw.set_pwm(duty as u32) {
        Ok(()) => info!("fan speed {}", duty),
        Err(e) => warn!("fan speed {} not applied: {}", duty, e),
    }
}

/// Apply a clamped clock request. MHz on the trigger side, Hz across the
/// firmware call.
pub fn apply_clock_request<F: FirmwareOps>(fw: &mut F, mhz: u32) {
    if let Err(e) = fw.set_clock(mhz * 1_000_000) {
        warn!("clock request {} MHz not applied: {}", mhz, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::{ChannelId, RECORD_SIZE, STATUS_COMPLETE};
    use vc_mbox::MockFirmware;

    #[repr(C, align(4))]
    struct RecordBuf([u8; RECORD_SIZE]);

    fn channel(buf: &mut RecordBuf, id: ChannelId) -> PccChannel {
        unsafe { PccChannel::from_ptr(buf.0.as_mut_ptr(), id) }
    }

    #[test]
    fn derived_counter_arithmetic_order() {
        // 1.5 GHz reduces to 15 hundred-MHz units; 15/15 cancels exactly.
        assert_eq!(delivered_counter(1_500_000_000, 1_500_000_000), 1_500_000_000);
        // The clock is truncated before scaling: 1.999 GHz counts as 19.
        assert_eq!(delivered_counter(7, 1_999_999_999), 7 * 19 / 15);
        // Product wider than 32 bits must not wrap before the division.
        assert_eq!(
            delivered_counter(4_000_000_000, 2_200_000_000),
            (4_000_000_000u64 * 22 / 15) as u32
        );
        // Below 100 MHz the reduced clock is zero.
        assert_eq!(delivered_counter(12345, 99_999_999), 0);
    }

    #[test]
    fn read_command_writes_both_fields_and_resets() {
        let mut buf = RecordBuf([0; RECORD_SIZE]);
        let ch = channel(&mut buf, ChannelId::Counters);
        let mut cell: u32 = 1_500_000_000;
        let counter = unsafe { Reg32::from_ptr(&mut cell) };
        let mut fw = MockFirmware {
            clock_hz: 1_500_000_000,
            ..MockFirmware::new()
        };

        service_counter_channel(&ch, &counter, &mut fw);

        assert_eq!(
            u32::from_le_bytes(buf.0[8..12].try_into().unwrap()),
            1_500_000_000
        );
        assert_eq!(
            u32::from_le_bytes(buf.0[12..16].try_into().unwrap()),
            1_500_000_000
        );
        assert_eq!(ch.status(), STATUS_COMPLETE);
        assert_eq!(ch.signature(), ChannelId::Counters.signature());
    }

    #[test]
    fn unexpected_command_resets_without_touching_payload() {
        let mut buf = RecordBuf([0xAB; RECORD_SIZE]);
        buf.0[4] = 0x01; // write command
        buf.0[5] = 0x00;
        let ch = channel(&mut buf, ChannelId::Counters);
        let mut cell: u32 = 42;
        let counter = unsafe { Reg32::from_ptr(&mut cell) };
        let mut fw = MockFirmware::new();

        service_counter_channel(&ch, &counter, &mut fw);

        assert_eq!(buf.0[8..16], [0xAB; 8]);
        assert_eq!(ch.command(), 0);
        assert_eq!(ch.status(), STATUS_COMPLETE);
    }

    #[test]
    fn clock_failure_leaves_delivered_field_stale() {
        let mut buf = RecordBuf([0xEE; RECORD_SIZE]);
        buf.0[4] = 0x00; // read command
        buf.0[5] = 0x00;
        let ch = channel(&mut buf, ChannelId::Counters);
        let mut cell: u32 = 777;
        let counter = unsafe { Reg32::from_ptr(&mut cell) };
        let mut fw = MockFirmware {
            fail_get_clock: true,
            ..MockFirmware::new()
        };

        service_counter_channel(&ch, &counter, &mut fw);

        // Reference was written, the derived field kept its old bytes.
        assert_eq!(u32::from_le_bytes(buf.0[8..12].try_into().unwrap()), 777);
        assert_eq!(buf.0[12..16], [0xEE; 4]);
        assert_eq!(ch.status(), STATUS_COMPLETE);
    }

    #[test]
    fn fan_channel_always_resets() {
        let mut buf = RecordBuf([0x55; RECORD_SIZE]);
        let ch = channel(&mut buf, ChannelId::Fan);
        let mut fw = MockFirmware {
            fail_get_pwm: true,
            ..MockFirmware::new()
        };

        service_fan_channel(&ch, &mut fw);

        assert_eq!(ch.signature(), ChannelId::Fan.signature());
        assert_eq!(ch.status(), STATUS_COMPLETE);
    }

    #[test]
    fn fan_duty_failure_is_discarded() {
        let mut fw = MockFirmware {
            fail_set_pwm: true,
            ..MockFirmware::new()
        };
        apply_fan_duty(&mut fw, 200);
        // The call was made and discarded; nothing propagates.
        assert_eq!(fw.set_pwm_calls, [200]);
    }

    #[test]
    fn clock_request_crosses_in_hz() {
        let mut fw = MockFirmware::new();
        apply_clock_request(&mut fw, 2200);
        assert_eq!(fw.set_clock_calls, [2_200_000_000]);
    }
}
