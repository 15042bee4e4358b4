//! File-to-file pitch/tempo processing.

use std::path::Path;
use std::sync::Arc;

use crate::error::Result;
use crate::ffi::{self, NativeApi};
use crate::processor::SoundTouch;
use crate::types::{ProcessReport, StretchOptions};
use crate::wav::{WavReader, WavWriter};

/// Frames handed to the processor per call.
pub const BLOCK_FRAMES: usize = 4096;

/// Process a 16-bit PCM WAV file with the library loaded by [`init`](crate::init).
///
/// The output keeps the input's sample rate and channel count.
///
/// # Example
///
/// ```no_run
/// use soundtouch::StretchOptions;
///
/// soundtouch::init()?;
/// let opts = StretchOptions { tempo_change: 20.0, ..Default::default() };
/// let report = soundtouch::process_file("in.wav", "out.wav", &opts)?;
/// println!("{} -> {} frames", report.frames_in, report.frames_out);
/// # Ok::<(), soundtouch::Error>(())
/// ```
pub fn process_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &StretchOptions,
) -> Result<ProcessReport> {
    let library: Arc<dyn NativeApi> = ffi::global()?;
    process_file_with(library, input, output, options)
}

/// Same as [`process_file`] with an explicit implementation.
pub fn process_file_with(
    api: Arc<dyn NativeApi>,
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &StretchOptions,
) -> Result<ProcessReport> {
    let (input, output) = (input.as_ref(), output.as_ref());
    options.validate()?;

    let mut reader = WavReader::open(input)?;
    let format = reader.format();
    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        sample_rate = format.sample_rate,
        channels = format.channels,
        ?options,
        "processing sound file"
    );

    let st = SoundTouch::with_api(api)?;
    st.set_sample_rate(format.sample_rate)?;
    st.set_channels(format.channels)?;
    st.apply(options)?;
    if options.is_identity() {
        tracing::debug!("no tempo, pitch or rate change; audio passes through unchanged");
    }

    let writer = WavWriter::create(output, format)?;
    let (frames_in, frames_out) = match stream(&st, &mut reader, writer) {
        Ok(counts) => counts,
        Err(e) => {
            // The writer is gone by now; never leave a truncated file behind.
            match std::fs::remove_file(output) {
                Ok(()) => tracing::warn!(
                    output = %output.display(),
                    error = %e,
                    "processing failed, partial output removed"
                ),
                Err(rm) => tracing::warn!(
                    output = %output.display(),
                    error = %rm,
                    "failed to remove partial output"
                ),
            }
            return Err(e);
        }
    };
    st.dispose();

    tracing::info!(frames_in, frames_out, "sound processing completed");
    Ok(ProcessReport {
        format,
        frames_in,
        frames_out,
    })
}

/// Put every block from `reader`, flush, write all output and finalize the
/// file. Returns `(frames_in, frames_out)`.
fn stream(
    st: &SoundTouch,
    reader: &mut WavReader,
    mut writer: WavWriter,
) -> Result<(u64, u64)> {
    let channels = st.channels() as usize;
    let mut block = vec![0.0f32; BLOCK_FRAMES * channels];
    let mut frames_in = 0u64;
    let mut frames_out = 0u64;

    loop {
        let read = reader.read_samples(&mut block)?;
        // A truncated final frame is dropped.
        let whole = read - read % channels;
        if whole == 0 {
            break;
        }
        st.put_samples(&block[..whole])?;
        frames_in += (whole / channels) as u64;
        frames_out += drain(st, &mut writer, &mut block)?;
    }

    st.flush()?;
    frames_out += drain(st, &mut writer, &mut block)?;
    writer.finalize()?;
    Ok((frames_in, frames_out))
}

/// Move every available output frame into `writer`.
fn drain(st: &SoundTouch, writer: &mut WavWriter, scratch: &mut [f32]) -> Result<u64> {
    let channels = st.channels() as usize;
    let mut total = 0u64;
    loop {
        let frames = st.receive_samples(scratch)?;
        if frames == 0 {
            return Ok(total);
        }
        writer.write_samples(&scratch[..frames * channels])?;
        total += frames as u64;
    }
}
