use clap::Parser;
use log::info;
use std::error::Error;
use std::fs::File;
use std::path::PathBuf;

use chip8::display::MonoTermDisplay;
use chip8::host::Host;
use chip8::input::TermInput;
use chip8::sound::{Mute, SimpleBeep, Sound};
use chip8::{EntropyRandom, Interpreter, Quirks, RandomSource, SeededRandom, ShiftSource, SysCalls};

#[derive(Parser, Debug)]
#[command(name = "chip8", about = "Run a CHIP-8 program in the terminal. Esc or Ctrl-C quits.")]
struct Args {
    /// program image to load at 0x200
    #[arg(value_name = "ROM")]
    rom: PathBuf,

    /// instructions per second
    #[arg(long, default_value_t = 700)]
    hz: u32,

    /// seed for CXNN, for repeatable runs
    #[arg(long)]
    seed: Option<u64>,

    /// shift Vy into Vx for 8XY6 / 8XYE, like the COSMAC VIP
    #[arg(long)]
    shift_vy: bool,

    /// treat 0NNN machine code calls as no-ops
    #[arg(long)]
    ignore_sys: bool,

    /// keep the PC speaker quiet
    #[arg(long)]
    mute: bool,

    /// stop after this many frames (0 = run until Esc)
    #[arg(long, default_value_t = 0)]
    frames: u64,
}

fn main() -> Result<(), Box<dyn Error>> {
    // NB. the terminal belongs to the display; send logs to a file with
    //     RUST_LOG=debug chip8 rom.ch8 2>chip8.log
    env_logger::init();
    let args = Args::parse();

    let quirks = Quirks {
        shift_source: if args.shift_vy {
            ShiftSource::Vy
        } else {
            ShiftSource::Vx
        },
        sys_calls: if args.ignore_sys {
            SysCalls::Ignore
        } else {
            SysCalls::Fault
        },
    };
    let random: Box<dyn RandomSource> = match args.seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(EntropyRandom::new()),
    };
    let mut interpreter = Interpreter::new(random, quirks);

    // load a program
    let mut f = File::open(&args.rom)?;
    interpreter.load_from(&mut f)?;
    info!("loaded {}", args.rom.display());

    let mut sound: Box<dyn Sound> = if args.mute {
        Box::new(Mute::new())
    } else {
        Box::new(SimpleBeep::new())
    };
    let result = {
        let mut input = TermInput::new()?;
        let mut display = MonoTermDisplay::new()?;
        Host::new(
            &mut interpreter,
            &mut display,
            &mut input,
            sound.as_mut(),
            args.hz,
        )
        .run((args.frames > 0).then_some(args.frames))
    };

    // shove some junk on stdout to stop the cli messing up the last frame
    for _ in 0..12 {
        println!();
    }
    result
}
