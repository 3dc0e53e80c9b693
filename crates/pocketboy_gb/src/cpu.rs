mod alu;
mod bus;
mod cb;
mod exec;
mod helpers;
mod init;
mod interrupts;
mod regs;
mod step;
pub mod table;

pub use bus::Bus;
pub use regs::{Flag, Registers};

/// Sharp LR35902 core.
///
/// The core is stepped one instruction (or interrupt dispatch) at a time and
/// reports the number of T-cycles consumed. It never advances the rest of
/// the machine itself; the caller ticks the peripherals by the returned
/// count after each step.
#[derive(Clone, Debug)]
pub struct Cpu {
    pub regs: Registers,
    pub ime: bool,
    pub halted: bool,
    /// STOP low-power state. The divider is frozen and the core stays idle
    /// until the bus reports a pressed button.
    stopped: bool,
    halt_bug: bool,
    ime_enable_pending: bool,
    ime_enable_delay: bool,
    /// Opcode and address of the undefined instruction that locked the core.
    fault: Option<(u8, u16)>,
}

impl Cpu {
    #[inline]
    pub fn get_flag(&self, flag: Flag) -> bool {
        let bit = flag as u8;
        (self.regs.f & (1 << bit)) != 0
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        let bit = flag as u8;
        if value {
            self.regs.f |= 1 << bit;
        } else {
            self.regs.f &= !(1 << bit);
        }
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// `true` once an undefined opcode has locked the core.
    #[inline]
    pub fn is_locked(&self) -> bool {
        self.fault.is_some()
    }
}

#[cfg(test)]
mod tests;
