/// Interpreters disagree on a handful of opcodes. `Quirks` picks a side for
/// each; the default matches what most modern ROMs expect.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Quirks {
    pub shift_source: ShiftSource,
    pub sys_calls: SysCalls,
}

/// which register 8XY6 / 8XYE shift (and take the flag from)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ShiftSource {
    /// Vx := Vx shifted; VF from Vx. Vy is ignored
    #[default]
    Vx,
    /// COSMAC VIP: Vx := Vy shifted; VF from Vy
    Vy,
}

/// what to do with 0NNN, a call into 1802 machine code
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SysCalls {
    /// there's no 1802 here, so it's an unknown opcode
    #[default]
    Fault,
    /// carry on as if it were a no-op
    Ignore,
}
