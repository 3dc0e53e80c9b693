use bitflags::bitflags;

bitflags! {
    /// Interrupt bits as laid out in IE ($FFFF) and IF ($FF0F).
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct InterruptFlags: u8 {
        const VBLANK = 0x01;
        const STAT = 0x02;
        const TIMER = 0x04;
        const SERIAL = 0x08;
        const JOYPAD = 0x10;
    }
}

/// The five interrupt sources, in dispatch priority order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Interrupt {
    VBlank,
    Stat,
    Timer,
    Serial,
    Joypad,
}

impl Interrupt {
    /// All sources, highest priority first.
    pub const ALL: [Interrupt; 5] = [
        Interrupt::VBlank,
        Interrupt::Stat,
        Interrupt::Timer,
        Interrupt::Serial,
        Interrupt::Joypad,
    ];

    #[inline]
    pub fn flag(self) -> InterruptFlags {
        match self {
            Interrupt::VBlank => InterruptFlags::VBLANK,
            Interrupt::Stat => InterruptFlags::STAT,
            Interrupt::Timer => InterruptFlags::TIMER,
            Interrupt::Serial => InterruptFlags::SERIAL,
            Interrupt::Joypad => InterruptFlags::JOYPAD,
        }
    }

    /// Handler address the CPU jumps to when dispatching this interrupt.
    #[inline]
    pub fn vector(self) -> u16 {
        0x0040 + 8 * self.flag().bits().trailing_zeros() as u16
    }
}

impl InterruptFlags {
    /// Highest-priority source in the set, if any.
    #[inline]
    pub fn highest(self) -> Option<Interrupt> {
        Interrupt::ALL
            .into_iter()
            .find(|interrupt| self.contains(interrupt.flag()))
    }

    /// Iterate the set in dispatch priority order.
    pub fn by_priority(self) -> impl Iterator<Item = Interrupt> {
        Interrupt::ALL
            .into_iter()
            .filter(move |interrupt| self.contains(interrupt.flag()))
    }
}

/// IE/IF register pair.
///
/// Components that raise interrupts (timer, PPU, serial, joypad) receive a
/// `&mut InterruptController` from the bus rather than holding a reference
/// to the CPU.
#[derive(Clone, Debug, Default)]
pub struct InterruptController {
    /// IF: pending requests. Only the low five bits exist.
    pending: InterruptFlags,
    /// IE: all eight bits are stored and read back, only five are used.
    enable: u8,
}

impl InterruptController {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn request(&mut self, interrupt: Interrupt) {
        self.pending.insert(interrupt.flag());
    }

    /// Requested and enabled sources. Use [`InterruptFlags::highest`] or
    /// [`InterruptFlags::by_priority`] to walk them in priority order.
    #[inline]
    pub fn pending_and_enabled(&self) -> InterruptFlags {
        self.pending & InterruptFlags::from_bits_truncate(self.enable)
    }

    #[inline]
    pub fn acknowledge(&mut self, interrupt: Interrupt) {
        self.pending.remove(interrupt.flag());
    }

    #[inline]
    pub fn pending(&self) -> InterruptFlags {
        self.pending
    }

    /// IF read: the three unused bits read back as 1.
    #[inline]
    pub fn read_if(&self) -> u8 {
        self.pending.bits() | 0xE0
    }

    #[inline]
    pub fn write_if(&mut self, value: u8) {
        self.pending = InterruptFlags::from_bits_truncate(value);
    }

    #[inline]
    pub fn read_ie(&self) -> u8 {
        self.enable
    }

    #[inline]
    pub fn write_ie(&mut self, value: u8) {
        self.enable = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highest_priority_wins_when_several_are_pending() {
        let mut ints = InterruptController::new();
        ints.write_ie(0x1F);
        ints.request(Interrupt::Joypad);
        ints.request(Interrupt::Timer);
        ints.request(Interrupt::Stat);

        let ready = ints.pending_and_enabled();
        assert_eq!(ready.highest(), Some(Interrupt::Stat));
        assert_eq!(
            ready.by_priority().collect::<Vec<_>>(),
            vec![Interrupt::Stat, Interrupt::Timer, Interrupt::Joypad]
        );

        ints.acknowledge(Interrupt::Stat);
        assert_eq!(ints.pending_and_enabled().highest(), Some(Interrupt::Timer));
    }

    #[test]
    fn disabled_requests_stay_pending() {
        let mut ints = InterruptController::new();
        ints.write_ie(InterruptFlags::VBLANK.bits());
        ints.request(Interrupt::Serial);

        assert!(ints.pending_and_enabled().is_empty());
        assert!(ints.pending().contains(InterruptFlags::SERIAL));

        ints.write_ie(0x1F);
        assert_eq!(ints.pending_and_enabled().highest(), Some(Interrupt::Serial));
    }

    #[test]
    fn register_views_mask_unused_bits() {
        let mut ints = InterruptController::new();
        ints.write_if(0xFF);
        assert_eq!(ints.read_if(), 0xFF);
        assert_eq!(ints.pending().bits(), 0x1F);

        ints.write_if(0x00);
        assert_eq!(ints.read_if(), 0xE0);

        ints.write_ie(0xA5);
        assert_eq!(ints.read_ie(), 0xA5);
        assert_eq!(ints.pending_and_enabled(), InterruptFlags::empty());
    }

    #[test]
    fn vectors_follow_bit_index() {
        assert_eq!(Interrupt::VBlank.vector(), 0x40);
        assert_eq!(Interrupt::Stat.vector(), 0x48);
        assert_eq!(Interrupt::Timer.vector(), 0x50);
        assert_eq!(Interrupt::Serial.vector(), 0x58);
        assert_eq!(Interrupt::Joypad.vector(), 0x60);
    }
}
