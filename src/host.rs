use crate::display::Display;
use crate::error::Fault;
use crate::input::Input;
use crate::interpreter::Interpreter;
use crate::sound::Sound;
use crate::timer::TIMER_HZ;
use log::{info, warn};
use std::error::Error;
use std::time::{Duration, Instant};

/// what the host loop should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    Continue,
    Quit,
}

/// Wires a machine to its peripherals and runs it in 60Hz frames: the CPU
/// gets `hz / 60` cycles per frame and the timers tick once.
pub struct Host<'a> {
    interpreter: &'a mut Interpreter,
    display: &'a mut dyn Display,
    input: &'a mut dyn Input,
    sound: &'a mut dyn Sound,
    cycles_per_frame: u32,
}

impl<'a> Host<'a> {
    pub fn new(
        interpreter: &'a mut Interpreter,
        display: &'a mut dyn Display,
        input: &'a mut dyn Input,
        sound: &'a mut dyn Sound,
        hz: u32,
    ) -> Self {
        Host {
            interpreter,
            display,
            input,
            sound,
            cycles_per_frame: (hz / TIMER_HZ).max(1),
        }
    }

    /// One frame's worth of work. Unknown opcodes are logged and stepped
    /// over; any other fault ends the run.
    pub fn frame(&mut self) -> Result<Frame, Box<dyn Error>> {
        let keys = match self.input.scan()? {
            Some(keys) => keys,
            None => return Ok(Frame::Quit),
        };
        self.interpreter.set_keys(keys);

        for _ in 0..self.cycles_per_frame {
            match self.interpreter.cycle() {
                Ok(()) => {}
                Err(Fault::UnknownOpcode(word)) => {
                    warn!("skipping unknown opcode {:#06x}", word);
                    self.interpreter.resume()?;
                }
                Err(fault) => return Err(fault.into()),
            }
        }

        self.interpreter.tick_timers();
        self.display.draw(self.interpreter.framebuffer())?;
        self.sound.sync(self.interpreter.sound_active())?;
        Ok(Frame::Continue)
    }

    /// run frames until the user quits, or until `limit` frames have gone by.
    /// the buzzer is off on the way out, however the run ends
    pub fn run(&mut self, limit: Option<u64>) -> Result<(), Box<dyn Error>> {
        let result = self.frames(limit);
        let quiet = self.sound.sync(false);
        result.and(quiet)
    }

    fn frames(&mut self, limit: Option<u64>) -> Result<(), Box<dyn Error>> {
        let frame_time = Duration::from_secs(1) / TIMER_HZ;
        let mut deadline = Instant::now();
        let mut frames = 0u64;

        while limit.map_or(true, |l| frames < l) {
            if self.frame()? == Frame::Quit {
                info!("quit after {} frames", frames);
                break;
            }
            frames += 1;

            deadline += frame_time;
            let now = Instant::now();
            if deadline > now {
                spin_sleep::sleep(deadline - now);
            } else {
                // running slow; don't try to catch up
                deadline = now;
            }
        }
        Ok(())
    }
}
