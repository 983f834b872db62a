//! Secure-world PCC bridge
//!
//! # Purpose
//! Lets the non-secure OS query and steer co-processor performance state
//! (clock rate, fan PWM, power rails) through two fixed shared-memory
//! channel records, serviced from one secure, level-triggered interrupt
//! and backed by synchronous VideoCore firmware calls.
//!
//! # Integration Points
//! - Depends on: `vc-mbox` (firmware call contract and transport)
//! - Consumed by: the secure monitor's platform setup and exception vector
//! - Shared state: two 16-byte PCC records visible to the non-secure world
//!
//! # Architecture
//! [`trigger`] reads and acknowledges the raw mailbox register and
//! classifies it into a `PendingRequest`; [`responder`] answers per
//! channel; [`dispatch::Bridge`] runs one request lifecycle to completion
//! and re-arms both channels; [`service`] wires the GIC and owns the
//! installed singleton behind the exception-vector entry point.
//!
//! # Testing Strategy
//! - Unit tests: trigger decoding, counter arithmetic, record layout
//! - Integration tests: full trigger scenarios over byte-buffer channels
//!   with the mock firmware backend
//! - Hardware sim tests: N/A (EL3 only, driven via the exception vector)

#![no_std]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod channel;
pub mod config;
pub mod dispatch;
pub mod gic;
pub mod mmio;
pub mod responder;
pub mod service;
pub mod trigger;

pub use channel::{ChannelId, PccChannel};
pub use dispatch::Bridge;
pub use gic::Gic;
pub use service::InterruptService;
pub use trigger::{PendingRequest, TriggerFlags, TriggerMailbox};
