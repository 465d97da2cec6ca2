/// rate the host should call `tick()` at, whatever the CPU speed
pub const TIMER_HZ: u32 = 60;

/// the delay and sound timers. each counts down to zero at 60Hz and stays
/// there
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TimerBank {
    pub delay: u8,
    pub sound: u8,
}

impl TimerBank {
    pub fn tick(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }

    /// should the buzzer be going
    pub fn sound_active(&self) -> bool {
        self.sound > 0
    }
}
