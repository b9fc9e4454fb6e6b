//! Live capture from the default input device.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SampleFormat, SizedSample};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::{analyse_into, Analyser};
use crate::error::{Result, VisualizerError};
use crate::params::AnalyserConfig;
use crate::signal::{SampleBuffer, SampleDomain, SampleSource};

/// Most recent mono samples, oldest first
struct CaptureWindow {
    samples: VecDeque<f32>,
    capacity: usize,
}

impl CaptureWindow {
    fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    fn push(&mut self, sample: f32) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    fn is_full(&self) -> bool {
        self.samples.len() == self.capacity
    }
}

/// Microphone capture feeding a spectrum analyser
pub struct AudioSystem {
    /// Shared with the input callback
    capture: Arc<Mutex<CaptureWindow>>,

    analyser: Analyser,

    /// Snapshot of the capture window for analysis off the lock
    scratch: Vec<f32>,

    /// Input stream (kept alive)
    stream: cpal::Stream,
}

impl AudioSystem {
    /// Open the default input device and start capturing
    pub fn new(config: AnalyserConfig) -> Result<Self> {
        let analyser = Analyser::new(config)?;
        let capture = Arc::new(Mutex::new(CaptureWindow::new(analyser.fft_size())));

        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or(VisualizerError::NoInputDevice)?;
        let supported = device.default_input_config()?;

        tracing::info!(
            device = %device.name().unwrap_or_else(|_| "Unknown".to_string()),
            sample_rate = supported.sample_rate().0,
            channels = supported.channels(),
            "audio input"
        );

        let format = supported.sample_format();
        let stream_config: cpal::StreamConfig = supported.into();
        let stream = match format {
            SampleFormat::F32 => build_stream::<f32>(&device, &stream_config, &capture)?,
            SampleFormat::I16 => build_stream::<i16>(&device, &stream_config, &capture)?,
            SampleFormat::U16 => build_stream::<u16>(&device, &stream_config, &capture)?,
            other => return Err(VisualizerError::UnsupportedFormat(format!("{other:?}"))),
        };
        stream.play()?;

        Ok(Self {
            scratch: Vec::with_capacity(analyser.fft_size()),
            capture,
            analyser,
            stream,
        })
    }

    /// Suspend capture (e.g. while the window is hidden)
    pub fn pause(&self) -> Result<()> {
        self.stream.pause()?;
        tracing::debug!("audio input paused");
        Ok(())
    }

    pub fn resume(&self) -> Result<()> {
        self.stream.play()?;
        tracing::debug!("audio input resumed");
        Ok(())
    }
}

impl SampleSource for AudioSystem {
    fn fill(&mut self, domain: SampleDomain, buffer: &mut SampleBuffer) -> bool {
        {
            let Ok(window) = self.capture.lock() else {
                return false;
            };
            if !window.is_full() {
                return false;
            }
            self.scratch.clear();
            self.scratch.extend(window.samples.iter().copied());
        }
        analyse_into(&mut self.analyser, &self.scratch, domain, buffer);
        true
    }
}

/// Build an input stream that downmixes every frame to mono
fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    capture: &Arc<Mutex<CaptureWindow>>,
) -> Result<cpal::Stream>
where
    T: SizedSample,
    f32: FromSample<T>,
{
    let channels = config.channels.max(1) as usize;
    let capture = Arc::clone(capture);

    let stream = device.build_input_stream(
        config,
        move |data: &[T], _: &cpal::InputCallbackInfo| {
            if let Ok(mut window) = capture.lock() {
                for frame in data.chunks(channels) {
                    let sum: f32 = frame.iter().map(|s| s.to_sample::<f32>()).sum();
                    window.push(sum / frame.len() as f32);
                }
            }
        },
        |err| tracing::error!(%err, "audio input stream error"),
        None,
    )?;
    Ok(stream)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_window_keeps_latest() {
        let mut window = CaptureWindow::new(3);
        for s in [1.0, 2.0] {
            window.push(s);
        }
        assert!(!window.is_full());
        for s in [3.0, 4.0] {
            window.push(s);
        }
        assert!(window.is_full());
        assert_eq!(
            window.samples.iter().copied().collect::<Vec<_>>(),
            vec![2.0, 3.0, 4.0]
        );
    }
}
