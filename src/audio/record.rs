//! Offline WAV bounce of a running simulation.

use log::{info, warn};
use std::fs;
use std::io::{Seek, Write};

use super::synth::DroneBank;
use super::AudioError;
use crate::params::{RecordingConfig, SoundConfig};
use crate::simulation::Simulation;

/// 32-bit float stereo at the configured rate
pub fn wav_spec(sound: &SoundConfig) -> hound::WavSpec {
    hound::WavSpec {
        channels: 2,
        sample_rate: sound.sample_rate_hz,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    }
}

/// Step `sim` for the recording duration and write the drones to
/// `recording.output_path`. Returns the number of frames written.
///
/// A bounce that fails part way removes the unfinished file.
pub fn record_wav(
    sim: &mut Simulation,
    sound: &SoundConfig,
    recording: &RecordingConfig,
) -> Result<usize, AudioError> {
    sound.validate().map_err(AudioError::InvalidConfig)?;
    let ticks = recording.total_ticks(sound);
    let writer = hound::WavWriter::create(&recording.output_path, wav_spec(sound))?;
    let frames = match bounce(sim, sound, ticks, writer) {
        Ok(frames) => frames,
        Err(err) => {
            if let Err(e) = fs::remove_file(&recording.output_path) {
                warn!(
                    "Could not remove partial recording {}: {}",
                    recording.output_path.display(),
                    e
                );
            }
            return Err(err);
        }
    };
    info!(
        "Recorded {} ticks ({} frames) to {}",
        ticks,
        frames,
        recording.output_path.display()
    );
    Ok(frames)
}

/// Render `ticks` simulation ticks into `writer` and finalize it
pub fn bounce<W: Write + Seek>(
    sim: &mut Simulation,
    sound: &SoundConfig,
    ticks: usize,
    mut writer: hound::WavWriter<W>,
) -> Result<usize, AudioError> {
    let frames_per_tick = sound.frames_per_tick();
    let mut bank = DroneBank::new(sim.planet_count(), sound.sample_rate_hz, sound.master_gain);
    let mut block = vec![0.0; frames_per_tick * 2];

    for _ in 0..ticks {
        sim.tick();
        bank.render(&sim.voice_controls(), &mut block);
        for sample in &block {
            writer.write_sample(*sample)?;
        }
    }
    writer.finalize()?;
    Ok(ticks * frames_per_tick)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{Config, Viewport};
    use std::io::Cursor;

    fn small_sim() -> Simulation {
        let mut config = Config::default();
        config.particles.use_screen_size_scaling = false;
        config.particles.count = 50;
        Simulation::new(config, Viewport::new(400.0, 300.0), 9)
    }

    #[test]
    fn test_bounce_frame_count() {
        let sound = SoundConfig::default();
        let mut sim = small_sim();
        let mut bytes = Cursor::new(Vec::new());
        let writer = hound::WavWriter::new(&mut bytes, wav_spec(&sound)).unwrap();

        let frames = bounce(&mut sim, &sound, 30, writer).unwrap();
        assert_eq!(frames, 30 * 735);
        assert_eq!(sim.tick_count(), 30);

        bytes.set_position(0);
        let reader = hound::WavReader::new(bytes).unwrap();
        assert_eq!(reader.spec().channels, 2);
        assert_eq!(reader.duration() as usize, frames);
        assert!(reader
            .into_samples::<f32>()
            .all(|s| s.map_or(false, |v| v.abs() <= 0.5)));
    }

    #[test]
    fn test_record_failure_leaves_no_file() {
        let dir = std::env::temp_dir().join("orbitloops-missing-dir-for-record");
        let recording = RecordingConfig {
            output_path: dir.join("out.wav"),
            ..RecordingConfig::new(0.1)
        };
        let result = record_wav(&mut small_sim(), &SoundConfig::default(), &recording);
        assert!(matches!(result, Err(AudioError::Wav(_))));
        assert!(!recording.output_path.exists());
    }

    #[test]
    fn test_record_writes_file() {
        let path = std::env::temp_dir().join(format!("orbitloops-{}.wav", std::process::id()));
        let recording = RecordingConfig {
            output_path: path.clone(),
            ..RecordingConfig::new(0.5)
        };
        let frames = record_wav(&mut small_sim(), &SoundConfig::default(), &recording).unwrap();
        assert_eq!(frames, 30 * 735);
        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.duration() as usize, frames);
        drop(reader);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_record_rejects_invalid_config() {
        let sound = SoundConfig {
            ticks_per_second: 0,
            ..Default::default()
        };
        let recording = RecordingConfig::new(1.0);
        let result = record_wav(&mut small_sim(), &sound, &recording);
        assert!(matches!(result, Err(AudioError::InvalidConfig(_))));
    }
}
