//! PCC shared-memory channel records
//!
//! Two 16-byte records at fixed addresses, shared with the non-secure
//! world. The bridge is the sole writer of `signature` and `status`; the
//! non-secure side posts `command` and reads the payload. Every
//! transaction ends with the record back in its idle shape: own
//! signature, command complete.
//!
//! All access goes through [`PccChannel`], which pins the byte layout
//! (little-endian, fixed offsets) instead of casting a struct onto the
//! shared bytes.

use core::ptr::{read_volatile, write_volatile};
use core::sync::atomic::{fence, Ordering};

use log::error;
use static_assertions::const_assert_eq;

use crate::mmio;

/// Size of one channel record in bytes.
pub const RECORD_SIZE: usize = 16;

// Field offsets within a record.
const OFF_SIGNATURE: usize = 0;
const OFF_COMMAND: usize = 4;
const OFF_STATUS: usize = 6;
const OFF_PAYLOAD: usize = 8;

/// Host asks the bridge to supply fresh data.
pub const CMD_READ: u16 = 0;

/// Host write request. Recognized but not implemented; it must not
/// corrupt channel state.
pub const CMD_WRITE: u16 = 1;

/// Status bit 0: last command complete, channel idle.
pub const STATUS_COMPLETE: u16 = 1 << 0;

// The payload ends exactly on the record boundary; the offsets above are
// the layout contract with the non-secure reader.
const_assert_eq!(OFF_COMMAND, OFF_SIGNATURE + 4);
const_assert_eq!(OFF_STATUS, OFF_COMMAND + 2);
const_assert_eq!(OFF_PAYLOAD + 8, RECORD_SIZE);

/// Channel roles, in servicing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelId {
    Counters,
    Fan,
}

impl ChannelId {
    /// 4-byte identity tag: ASCII "PCC" plus the channel index.
    pub const fn signature(self) -> u32 {
        match self {
            ChannelId::Counters => 0x5043_4300,
            ChannelId::Fan => 0x5043_4301,
        }
    }
}

/// Typed accessor over one shared channel record.
pub struct PccChannel {
    base: *mut u8,
    id: ChannelId,
}

// The record is owned by the secure world; the handle carries no state
// beyond the pointer.
unsafe impl Send for PccChannel {}

impl PccChannel {
    /// Create an accessor at a fixed physical address.
    ///
    /// # Safety
    /// `base` must point at [`RECORD_SIZE`] bytes of mapped memory shared
    /// with the non-secure world, and this must be the only secure-side
    /// accessor for that record.
    pub const unsafe fn new(base: usize, id: ChannelId) -> Self {
        Self {
            base: base as *mut u8,
            id,
        }
    }

    /// Create an accessor over caller-provided storage.
    ///
    /// # Safety
    /// `base` must stay valid for [`RECORD_SIZE`] bytes for the lifetime
    /// of the accessor.
    pub const unsafe fn from_ptr(base: *mut u8, id: ChannelId) -> Self {
        Self { base, id }
    }

    pub fn id(&self) -> ChannelId {
        self.id
    }

    #[inline]
    fn read_byte(&self, offset: usize) -> u8 {
        unsafe { read_volatile(self.base.add(offset)) }
    }

    #[inline]
    fn write_byte(&self, offset: usize, value: u8) {
        unsafe { write_volatile(self.base.add(offset), value) }
    }

    fn read_u16(&self, offset: usize) -> u16 {
        u16::from_le_bytes([self.read_byte(offset), self.read_byte(offset + 1)])
    }

    fn read_u32(&self, offset: usize) -> u32 {
        u32::from_le_bytes([
            self.read_byte(offset),
            self.read_byte(offset + 1),
            self.read_byte(offset + 2),
            self.read_byte(offset + 3),
        ])
    }

    fn write_u16(&self, offset: usize, value: u16) {
        for (i, b) in value.to_le_bytes().iter().enumerate() {
            self.write_byte(offset + i, *b);
        }
    }

    fn write_u32(&self, offset: usize, value: u32) {
        for (i, b) in value.to_le_bytes().iter().enumerate() {
            self.write_byte(offset + i, *b);
        }
    }

    pub fn signature(&self) -> u32 {
        self.read_u32(OFF_SIGNATURE)
    }

    pub fn command(&self) -> u16 {
        self.read_u16(OFF_COMMAND)
    }

    pub fn status(&self) -> u16 {
        self.read_u16(OFF_STATUS)
    }

    /// All 8 payload bytes.
    pub fn payload(&self) -> [u8; 8] {
        let mut bytes = [0; 8];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = self.read_byte(OFF_PAYLOAD + i);
        }
        bytes
    }

    /// Store a little-endian 32-bit field in payload slot 0 or 1.
    pub fn write_payload_u32(&self, slot: usize, value: u32) {
        debug_assert!(slot < 2);
        self.write_u32(OFF_PAYLOAD + slot * 4, value);
    }

    /// Restore the idle record: own signature, no command, last command
    /// complete. Status is stored last and the record is then pushed out
    /// to the point of coherency, so a reader that sees the idle bit sees
    /// the whole record settled.
    pub fn reset_idle(&self) {
        self.write_u32(OFF_SIGNATURE, self.id.signature());
        self.write_u16(OFF_COMMAND, 0);
        fence(Ordering::Release);
        self.write_u16(OFF_STATUS, STATUS_COMPLETE);
        mmio::publish(self.base as usize, RECORD_SIZE);
    }

    /// Dump the record as seen right now. Used for unexpected commands
    /// and spurious handshakes.
    pub fn log_handshake(&self) {
        let p = self.payload();
        error!(
            "{:?} channel handshake: sig={:#010x} cmd={:#x} stat={:#x} \
             ({:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x})",
            self.id,
            self.signature(),
            self.command(),
            self.status(),
            p[0],
            p[1],
            p[2],
            p[3],
            p[4],
            p[5],
            p[6],
            p[7],
        );
    }
}
