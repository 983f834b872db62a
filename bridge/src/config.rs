//! Platform configuration
//!
//! Fixed physical addresses and protocol constants for the BCM2711-class
//! board the bridge runs on. Everything here is compile-time; there is no
//! runtime configuration surface in the secure world.

/// Interrupt id of the secure trigger line (first SPI, the ARM mailbox).
pub const SECURE_TRIGGER_IRQ: u32 = 32;

/// ARM-local peripheral block.
const ARM_LOCAL_BASE: usize = 0xFF80_0000;

/// Core 0 mailbox read/clear register. Reading yields the raised request
/// bits; writing the same value back clears them.
pub const TRIGGER_MBOX_RDCLR: usize = ARM_LOCAL_BASE + 0xC0;

/// Free-running 32-bit counter sampled as the reference counter.
pub const PERF_COUNTER: usize = 0xFE00_3004;

/// Counter channel record, shared with the non-secure world.
pub const PCC_COUNTER_CHANNEL_BASE: usize = 0x1F_0000;

/// Fan channel record, shared with the non-secure world.
pub const PCC_FAN_CHANNEL_BASE: usize = 0x1F_0080;

/// GICv2 distributor.
pub const GICD_BASE: usize = 0xFF84_1000;

/// GICv2 CPU interface.
pub const GICC_BASE: usize = 0xFF84_2000;

/// Lower clamp for clock requests, in MHz.
pub const CLOCK_REQ_MIN_MHZ: u32 = 600;

/// Upper clamp for clock requests, in MHz.
pub const CLOCK_REQ_MAX_MHZ: u32 = 2200;

/// Firmware power domains switched on during bring-up.
pub const STARTUP_POWER_DOMAINS: [u32; 3] = [4, 5, 6];
