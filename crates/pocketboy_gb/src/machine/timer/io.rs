use super::Timer;

impl Timer {
    /// DIV (FF04).
    #[inline]
    pub(in super::super) fn div_read(&self) -> u8 {
        (self.internal_counter >> 6) as u8
    }

    /// Any write clears the whole system counter. If the selected bit was
    /// high this is a falling edge and TIMA ticks once.
    pub(in super::super) fn div_write(&mut self) {
        self.set_counter(0);
    }

    #[inline]
    pub(in super::super) fn tima_read(&self) -> u8 {
        self.tima
    }

    /// A write during the overflow cycle cancels the pending reload and
    /// its interrupt.
    pub(in super::super) fn tima_write(&mut self, value: u8) {
        self.tima = value;
        self.overflow = false;
    }

    #[inline]
    pub(in super::super) fn tma_read(&self) -> u8 {
        self.tma
    }

    pub(in super::super) fn tma_write(&mut self, value: u8) {
        self.tma = value;
    }

    #[inline]
    pub(in super::super) fn tac_read(&self) -> u8 {
        self.tac | 0xF8
    }

    /// Disabling the timer or switching the source away from a high bit
    /// drops the edge detector input and ticks TIMA once.
    pub(in super::super) fn tac_write(&mut self, value: u8) {
        let old_input = self.timer_input();
        self.tac = value & 0x07;
        if old_input && !self.timer_input() {
            self.increment_tima();
        }
    }
}
