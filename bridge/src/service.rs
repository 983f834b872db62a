//! Secure interrupt service
//!
//! The interrupt lifecycle wrapper around the bridge: acknowledge at the
//! GIC, service the trigger, signal end-of-interrupt. Two states only:
//! idle between deliveries, handling inside [`InterruptService::handle`].
//! The handler always runs to completion before returning.
//!
//! [`init_platform`] performs the one-time bring-up on the fixed platform
//! addresses and installs the service behind the C-ABI entry point called
//! from the EL3 exception vector.

use log::debug;
use spin::mutex::SpinMutex;
use spin::Once;
use vc_mbox::{FirmwareOps, PropertyMailbox};

use crate::channel::{ChannelId, PccChannel};
use crate::config::{
    GICC_BASE, GICD_BASE, PCC_COUNTER_CHANNEL_BASE, PCC_FAN_CHANNEL_BASE, PERF_COUNTER,
    SECURE_TRIGGER_IRQ, TRIGGER_MBOX_RDCLR,
};
use crate::dispatch::Bridge;
use crate::gic::Gic;
use crate::mmio::Reg32;
use crate::trigger::TriggerMailbox;

/// One GIC plus one bridge: the complete secure handler.
pub struct InterruptService<F: FirmwareOps> {
    gic: Gic,
    bridge: Bridge<F>,
}

impl<F: FirmwareOps> InterruptService<F> {
    pub fn new(gic: Gic, bridge: Bridge<F>) -> Self {
        Self { gic, bridge }
    }

    /// Full lifecycle for one delivery. Every path reaches
    /// end-of-interrupt; an abandoned secure interrupt would stall the
    /// platform.
    pub fn handle(&mut self) {
        let iar = self.gic.acknowledge();
        if Gic::is_spurious(iar) {
            return;
        }

        let id = Gic::interrupt_id(iar);
        if id == SECURE_TRIGGER_IRQ {
            self.bridge.dispatch_trigger();
        } else {
            debug!("unexpected secure interrupt {}", id);
        }

        self.gic.end_of_interrupt(iar);
    }
}

/// The installed platform service.
static SERVICE: Once<SpinMutex<InterruptService<PropertyMailbox>>> = Once::new();

/// Bring the bridge up on the fixed platform addresses and install the
/// interrupt service. Call once from platform setup, before the
/// non-secure world can observe the channels.
///
/// # Safety
/// The GIC, mailbox, counter and shared channel regions must be mapped
/// at their physical addresses, and nothing else may drive them
/// afterwards.
pub unsafe fn init_platform() {
    let gic = Gic::new(GICD_BASE, GICC_BASE);
    gic.init();
    gic.configure_secure_level_irq(SECURE_TRIGGER_IRQ);

    let bridge = Bridge::new(
        TriggerMailbox::new(Reg32::new(TRIGGER_MBOX_RDCLR)),
        Reg32::new(PERF_COUNTER),
        PccChannel::new(PCC_COUNTER_CHANNEL_BASE, ChannelId::Counters),
        PccChannel::new(PCC_FAN_CHANNEL_BASE, ChannelId::Fan),
        PropertyMailbox::new(),
    );

    // The handler is reachable from here on; bring-up runs behind the
    // same lock the handler takes.
    let service = SERVICE.call_once(|| SpinMutex::new(InterruptService::new(gic, bridge)));
    service.lock().bridge.startup();
}

/// Entry point for the EL3 exception vector. A delivery before
/// [`init_platform`] has nothing to service and is ignored.
#[no_mangle]
pub extern "C" fn pcc_bridge_secure_interrupt() {
    if let Some(service) = SERVICE.get() {
        service.lock().handle();
    }
}
