//! File processing pipeline tests against the pass-through backend.

mod common;

use approx::assert_abs_diff_eq;
use common::MockApi;
use soundtouch::process::BLOCK_FRAMES;
use soundtouch::{process_file_with, AudioFormat, StretchOptions, WavReader, WavWriter};

/// 440 Hz sine at 0.8 amplitude, duplicated across channels.
fn write_tone(path: &std::path::Path, format: AudioFormat, frames: usize) -> Vec<f32> {
    let mut samples = Vec::with_capacity(frames * format.channels as usize);
    for n in 0..frames {
        let t = n as f32 / format.sample_rate as f32;
        let v = (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.8;
        for _ in 0..format.channels {
            samples.push(v);
        }
    }
    let mut writer = WavWriter::create(path, format).unwrap();
    writer.write_samples(&samples).unwrap();
    writer.finalize().unwrap();
    samples
}

fn read_all(path: &std::path::Path) -> (AudioFormat, Vec<f32>) {
    let mut reader = WavReader::open(path).unwrap();
    let format = reader.format();
    let mut out = Vec::new();
    let mut buf = vec![0.0f32; 1024];
    loop {
        let n = reader.read_samples(&mut buf).unwrap();
        if n == 0 {
            break;
        }
        out.extend_from_slice(&buf[..n]);
    }
    (format, out)
}

#[test]
fn test_process_mono_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.wav");
    let output = dir.path().join("out.wav");
    let format = AudioFormat {
        sample_rate: 44100,
        channels: 1,
    };
    // More than two blocks so the put/drain loop runs several times
    let frames = BLOCK_FRAMES * 2 + 123;
    let original = write_tone(&input, format, frames);

    let api = MockApi::new();
    let opts = StretchOptions {
        pitch_semitones: 2.0,
        ..Default::default()
    };
    let report = process_file_with(api.clone(), &input, &output, &opts).unwrap();

    assert_eq!(report.format, format);
    assert_eq!(report.frames_in, frames as u64);
    assert_eq!(report.frames_out, frames as u64);

    let (out_format, processed) = read_all(&output);
    assert_eq!(out_format, format);
    assert_eq!(processed.len(), original.len());
    for (got, want) in processed.iter().zip(&original) {
        assert_abs_diff_eq!(*got, *want, epsilon = 1.0e-3);
    }

    // One instance, configured from the file, flushed and released
    assert_eq!(api.creates(), 1);
    let destroyed = api.destroyed();
    assert_eq!(destroyed.len(), 1);
    let (settings, flushed) = api.settings(destroyed[0]).unwrap();
    assert_eq!(settings.sample_rate, 44100);
    assert_eq!(settings.channels, 1);
    assert_eq!(settings.pitch, 2.0);
    assert!(flushed);
}

#[test]
fn test_process_stereo_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("stereo.wav");
    let output = dir.path().join("stereo_out.wav");
    let format = AudioFormat {
        sample_rate: 22050,
        channels: 2,
    };
    write_tone(&input, format, 1000);

    let api = MockApi::new();
    let report = process_file_with(api, &input, &output, &StretchOptions::default()).unwrap();
    assert_eq!(report.frames_in, 1000);
    assert_eq!(report.frames_out, 1000);

    let (out_format, processed) = read_all(&output);
    assert_eq!(out_format.channels, 2);
    assert_eq!(processed.len(), 2000);
}

#[test]
fn test_invalid_options_create_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.wav");
    write_tone(
        &input,
        AudioFormat {
            sample_rate: 8000,
            channels: 1,
        },
        10,
    );

    let api = MockApi::new();
    let opts = StretchOptions {
        rate_change: 500.0,
        ..Default::default()
    };
    let err = process_file_with(api.clone(), &input, dir.path().join("out.wav"), &opts)
        .unwrap_err();

    assert!(err.is_invalid_argument(), "got {}", err);
    assert_eq!(api.creates(), 0);
    assert!(!dir.path().join("out.wav").exists());
}

#[test]
fn test_failure_mid_stream_removes_partial_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("truncated.wav");
    let output = dir.path().join("out.wav");
    write_tone(
        &input,
        AudioFormat {
            sample_rate: 44100,
            channels: 1,
        },
        BLOCK_FRAMES * 3,
    );

    // Cut the data short: the header still promises three blocks, so the
    // first block reads fine and a later read hits end of file.
    let len = std::fs::metadata(&input).unwrap().len();
    let cut = (BLOCK_FRAMES * 2 * 3 / 2) as u64;
    std::fs::OpenOptions::new()
        .write(true)
        .open(&input)
        .unwrap()
        .set_len(len - cut)
        .unwrap();

    let api = MockApi::new();
    let result = process_file_with(api.clone(), &input, &output, &StretchOptions::default());

    assert!(result.is_err(), "truncated input should fail");
    assert!(!output.exists(), "partial output must be removed");
    assert_eq!(api.creates(), 1);
    assert_eq!(api.destroyed().len(), 1, "processor released on the error path");
}

#[test]
fn test_missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let api = MockApi::new();
    let result = process_file_with(
        api.clone(),
        dir.path().join("missing.wav"),
        dir.path().join("out.wav"),
        &StretchOptions::default(),
    );

    assert!(result.is_err());
    assert_eq!(api.creates(), 0);
}

#[test]
fn test_process_without_init_fails() {
    // The integration test binary never loads a real library here
    if soundtouch::is_initialized() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let err = soundtouch::process_file(
        dir.path().join("in.wav"),
        dir.path().join("out.wav"),
        &StretchOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, soundtouch::Error::NotInitialized), "got {}", err);
}
