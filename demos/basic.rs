//! Pitch-shift a WAV file with the SoundTouch library.
//!
//! Run with: cargo run --example basic -- in.wav out.wav [semitones] [tempo%]
//!
//! Set SOUNDTOUCH_LIBRARY to load a library outside the system search path.
//! Set RUST_LOG=soundtouch=debug to see handle create/destroy events.

use std::env;
use std::process::ExitCode;

use soundtouch::{SoundTouch, StretchOptions};
use tracing_subscriber::EnvFilter;

fn run() -> soundtouch::Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() < 2 {
        return Err(soundtouch::Error::InvalidArgument(
            "usage: basic <in.wav> <out.wav> [semitones] [tempo%]".into(),
        ));
    }

    let parse = |idx: usize| -> soundtouch::Result<f32> {
        match args.get(idx) {
            None => Ok(0.0),
            Some(s) => s.parse().map_err(|_| {
                soundtouch::Error::InvalidArgument(format!("not a number: {}", s))
            }),
        }
    };
    let opts = StretchOptions {
        pitch_semitones: parse(2)?,
        tempo_change: parse(3)?,
        ..Default::default()
    };

    // Load the native library
    soundtouch::init()?;
    println!("SoundTouch version: {}", soundtouch::library_version()?);
    println!("Version id: {}", soundtouch::library_version_id()?);

    println!("\n--- Handle lifecycle ---");
    let st = SoundTouch::new()?;
    println!("Created instance, handle = {:#x}", st.handle().as_raw());
    st.dispose();
    println!("Disposed, handle = {:#x}", st.handle().as_raw());
    st.dispose();
    println!("Disposed again (no-op)");

    println!("\n--- Processing {} ---", args[0]);
    let report = soundtouch::process_file(&args[0], &args[1], &opts)?;
    println!(
        "{} Hz, {} channel(s): {} frames in, {} frames out",
        report.format.sample_rate, report.format.channels, report.frames_in, report.frames_out
    );
    println!("Wrote {}", args[1]);

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
