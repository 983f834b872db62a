//! Request lifecycle and bring-up
//!
//! [`Bridge`] owns everything one trigger needs: the raw mailbox
//! register, the reference counter, both channel records and the
//! firmware client. One call to [`Bridge::dispatch_trigger`] runs a
//! single pending request to completion; [`Bridge::startup`] is the
//! one-time bring-up off the interrupt path.

use log::{info, warn};
use vc_mbox::FirmwareOps;

use crate::channel::PccChannel;
use crate::config::STARTUP_POWER_DOMAINS;
use crate::mmio::Reg32;
use crate::responder;
use crate::trigger::TriggerMailbox;

/// The secure side of the bridge.
pub struct Bridge<F: FirmwareOps> {
    trigger: TriggerMailbox,
    perf_counter: Reg32,
    counters: PccChannel,
    fan: PccChannel,
    fw: F,
}

impl<F: FirmwareOps> Bridge<F> {
    pub fn new(
        trigger: TriggerMailbox,
        perf_counter: Reg32,
        counters: PccChannel,
        fan: PccChannel,
        fw: F,
    ) -> Self {
        Self {
            trigger,
            perf_counter,
            counters,
            fan,
            fw,
        }
    }

    /// The firmware client, for reuse outside the interrupt path.
    pub fn firmware(&self) -> &F {
        &self.fw
    }

    pub fn firmware_mut(&mut self) -> &mut F {
        &mut self.fw
    }

    /// One-time bring-up, off the interrupt path: power rails up,
    /// diagnostics logged, fan off, both channels primed to idle before
    /// any host can observe them.
    pub fn startup(&mut self) {
        for domain in STARTUP_POWER_DOMAINS {
            if let Err(e) = self.fw.set_power(domain, true, true) {
                warn!("power domain {} not enabled: {}", domain, e);
            }
        }

        match self.fw.get_board_revision() {
            Ok(rev) => info!("board rev {:#x}", rev),
            Err(e) => warn!("board revision unavailable: {}", e),
        }
        match self.fw.get_clock() {
            Ok(hz) => info!("clock rate {}", hz),
            Err(e) => warn!("clock rate unavailable: {}", e),
        }
        match self.fw.max_clock() {
            Ok(hz) => info!("max clock rate {}", hz),
            Err(e) => warn!("max clock rate unavailable: {}", e),
        }

        // Fan off is the safe default until the host asks otherwise.
        if let Err(e) = self.fw.set_pwm(0) {
            warn!("fan not disabled: {}", e);
        }

        self.counters.reset_idle();
        self.fan.reset_idle();
    }

    /// Service one trigger: acknowledge and clear the mailbox register,
    /// act on each raised sub-request in fixed order, then leave both
    /// channels idle no matter which of them were touched.
    pub fn dispatch_trigger(&mut self) {
        let request = self.trigger.take();

        if request.counter_channel {
            responder::service_counter_channel(&self.counters, &self.perf_counter, &mut self.fw);
        }
        if request.fan_channel {
            responder::service_fan_channel(&self.fan, &mut self.fw);
        }
        if let Some(duty) = request.fan_duty {
            responder::apply_fan_duty(&mut self.fw, duty);
        }
        if let Some(mhz) = request.clock_mhz {
            responder::apply_clock_request(&mut self.fw, mhz);
        }

        // Both records go back to idle even when nothing above touched
        // them; a reader must never observe a channel mid-transaction
        // after the handler returns.
        self.counters.reset_idle();
        self.fan.reset_idle();
    }
}
