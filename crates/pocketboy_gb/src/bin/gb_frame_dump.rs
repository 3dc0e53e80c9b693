use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use pocketboy_gb::{GameBoy, SCREEN_HEIGHT, SCREEN_WIDTH};

const USAGE: &str = "Usage: gb_frame_dump <rom_path> <out_rgb24_path> [frames|--until-ldbb]";

/// T-cycle budget for `--until-ldbb`, about four minutes of emulated time.
const BREAKPOINT_BUDGET: u64 = 1_000_000_000;

enum RunMode {
    Frames(u32),
    UntilBreakpoint,
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let rom_path: PathBuf = args.next().map(PathBuf::from).context(USAGE)?;
    let out_path: PathBuf = args.next().map(PathBuf::from).context(USAGE)?;
    let mode = match args.next().as_deref() {
        None => RunMode::Frames(120),
        Some("--until-ldbb") => RunMode::UntilBreakpoint,
        Some(frames) => RunMode::Frames(
            frames
                .parse()
                .with_context(|| format!("invalid frame count '{frames}'"))?,
        ),
    };

    let rom = std::fs::read(&rom_path)
        .with_context(|| format!("failed to read ROM '{}'", rom_path.display()))?;

    let mut gb = GameBoy::new();
    gb.load_rom(&rom)
        .with_context(|| format!("failed to load ROM '{}'", rom_path.display()))?;

    match mode {
        RunMode::Frames(frames) => {
            for _ in 0..frames {
                gb.run_frame()?;
            }
        }
        RunMode::UntilBreakpoint => {
            if !gb.run_until_software_breakpoint(BREAKPOINT_BUDGET)? {
                bail!("did not hit the LD B,B software breakpoint within {BREAKPOINT_BUDGET} cycles");
            }
        }
    }

    let rgb24: Vec<u8> = gb
        .frame_buffer()
        .chunks_exact(4)
        .flat_map(|pixel| [pixel[0], pixel[1], pixel[2]])
        .collect();
    std::fs::write(&out_path, &rgb24)
        .with_context(|| format!("failed to write '{}'", out_path.display()))?;

    println!(
        "Wrote {} bytes ({}x{} rgb24) after {} frames to '{}'",
        rgb24.len(),
        SCREEN_WIDTH,
        SCREEN_HEIGHT,
        gb.frames_run(),
        out_path.display()
    );

    let serial = gb.take_serial_output();
    if !serial.is_empty() {
        println!("Serial output:\n{}", String::from_utf8_lossy(&serial));
    }
    Ok(())
}
