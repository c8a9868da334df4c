//! Audible cue played when a countdown finishes.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::StreamConfig;
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AlertError {
    #[error("alarm sound not found: {0}")]
    Missing(PathBuf),
    #[error("cannot decode alarm sound: {0}")]
    Decode(String),
    #[error("audio output failed: {0}")]
    Device(String),
}

/// Fire-and-forget alert. Implementations must not block the caller.
pub trait Alert: Send + Sync {
    fn play(&self);

    /// True when the UI loop should ring the terminal bell on its behalf
    fn terminal_bell(&self) -> bool {
        false
    }
}

/// Decoded alarm clip played on the default output device
pub struct SoundAlert {
    samples: Arc<Vec<f32>>,
    sample_rate: u32,
}

impl SoundAlert {
    /// Decode the sound file into mono samples. Called once at startup.
    pub fn load(path: &Path) -> Result<Self, AlertError> {
        if !path.is_file() {
            return Err(AlertError::Missing(path.to_path_buf()));
        }
        let (samples, sample_rate) = decode_to_mono(path)?;
        if samples.is_empty() {
            return Err(AlertError::Decode(format!("{} has no audio frames", path.display())));
        }
        let alert = Self {
            samples: Arc::new(samples),
            sample_rate,
        };
        info!(
            "loaded alarm sound {} ({:.1}s @ {} Hz)",
            path.display(),
            alert.duration().as_secs_f64(),
            sample_rate
        );
        Ok(alert)
    }

    /// Clip length
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.samples.len() as f64 / f64::from(self.sample_rate))
    }
}

impl Alert for SoundAlert {
    fn play(&self) {
        let samples = Arc::clone(&self.samples);
        let sample_rate = self.sample_rate;
        // Playback blocks until the clip ends, so keep it off the timer loop
        thread::spawn(move || {
            if let Err(e) = play_samples(&samples, sample_rate) {
                warn!("could not play alarm: {}", e);
            }
        });
    }
}

/// Terminal bell, used with --no-sound. Only the UI thread writes to the
/// terminal, so the timer loop flags the bell in its snapshot instead.
pub struct BellAlert;

impl Alert for BellAlert {
    fn play(&self) {}

    fn terminal_bell(&self) -> bool {
        true
    }
}

struct PlaybackBuffer {
    samples: Arc<Vec<f32>>,
    position: usize,
    finished: bool,
}

fn play_samples(samples: &Arc<Vec<f32>>, sample_rate: u32) -> Result<(), AlertError> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| AlertError::Device("no default output device".into()))?;

    let config = StreamConfig {
        channels: 1,
        sample_rate,
        buffer_size: cpal::BufferSize::Default,
    };

    let buffer = Arc::new(Mutex::new(PlaybackBuffer {
        samples: Arc::clone(samples),
        position: 0,
        finished: false,
    }));
    let callback_buffer = Arc::clone(&buffer);

    let stream = device
        .build_output_stream(
            &config,
            move |data: &mut [f32], _info: &cpal::OutputCallbackInfo| {
                let mut buf = match callback_buffer.lock() {
                    Ok(b) => b,
                    Err(_) => return,
                };
                for sample in data.iter_mut() {
                    if buf.position < buf.samples.len() {
                        *sample = buf.samples[buf.position];
                        buf.position += 1;
                    } else {
                        *sample = 0.0;
                        buf.finished = true;
                    }
                }
            },
            move |err| {
                error!("audio output stream error: {}", err);
            },
            None,
        )
        .map_err(|e| AlertError::Device(format!("failed to build output stream: {}", e)))?;

    stream
        .play()
        .map_err(|e| AlertError::Device(format!("failed to start output stream: {}", e)))?;

    loop {
        thread::sleep(Duration::from_millis(10));
        let buf = buffer
            .lock()
            .map_err(|e| AlertError::Device(format!("playback buffer lock poisoned: {}", e)))?;
        if buf.finished {
            break;
        }
    }

    drop(stream);
    Ok(())
}

fn decode_to_mono(path: &Path) -> Result<(Vec<f32>, u32), AlertError> {
    use symphonia::core::audio::SampleBuffer;
    use symphonia::core::codecs::DecoderOptions;
    use symphonia::core::errors::Error as SymphError;
    use symphonia::core::formats::FormatOptions;
    use symphonia::core::io::MediaSourceStream;
    use symphonia::core::meta::MetadataOptions;
    use symphonia::core::probe::Hint;

    let file = std::fs::File::open(path).map_err(|_| AlertError::Missing(path.to_path_buf()))?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(|e| AlertError::Decode(format!("unrecognised format: {}", e)))?;

    let mut format = probed.format;
    let track = format
        .default_track()
        .ok_or_else(|| AlertError::Decode("no default audio track".into()))?;
    let track_id = track.id;
    let codec_params = track.codec_params.clone();

    let sample_rate = codec_params
        .sample_rate
        .ok_or_else(|| AlertError::Decode("unknown sample rate".into()))?;

    let mut decoder = symphonia::default::get_codecs()
        .make(&codec_params, &DecoderOptions::default())
        .map_err(|e| AlertError::Decode(format!("failed to create decoder: {}", e)))?;

    let mut out: Vec<f32> = Vec::new();
    let mut sample_buf: Option<SampleBuffer<f32>> = None;

    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(SymphError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(AlertError::Decode(format!("read error: {}", e))),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            Err(SymphError::DecodeError(_)) => continue,
            Err(e) => return Err(AlertError::Decode(format!("decode error: {}", e))),
        };

        let spec = *decoded.spec();
        let channels = spec.channels.count();
        let frames = decoded.frames();
        let required = frames.saturating_mul(channels);

        let needs_new = match sample_buf.as_ref() {
            Some(b) => b.capacity() < required,
            None => true,
        };
        if needs_new {
            sample_buf = Some(SampleBuffer::<f32>::new(frames as u64, spec));
        }

        let Some(buf) = sample_buf.as_mut() else {
            continue;
        };
        buf.copy_interleaved_ref(decoded);

        let data = buf.samples();
        if channels <= 1 {
            out.extend_from_slice(data);
        } else {
            for frame in data.chunks_exact(channels) {
                let sum: f32 = frame.iter().sum();
                out.push(sum / channels as f32);
            }
        }
    }

    Ok((out, sample_rate))
}
