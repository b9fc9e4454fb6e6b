//! Frame capture to PNG files (recording mode).

use crate::error::{Result, VisualizerError};
use crate::params::RecordingConfig;

/// Writes each presented frame to `<output_dir>/frames/frame_NNNNN.png`
pub struct FrameRecorder {
    config: RecordingConfig,
    frame: usize,
    pixels: Vec<u8>,
}

impl FrameRecorder {
    /// Create output directories and start at frame 0
    pub fn new(config: RecordingConfig) -> Result<Self> {
        std::fs::create_dir_all(config.frames_dir()).map_err(|e| {
            VisualizerError::Recording(format!("cannot create {}: {e}", config.frames_dir()))
        })?;
        tracing::info!(
            frames = config.total_frames(),
            dir = %config.frames_dir(),
            "recording"
        );
        Ok(Self {
            config,
            frame: 0,
            pixels: Vec::new(),
        })
    }

    pub fn fps(&self) -> u32 {
        self.config.fps.max(1)
    }

    /// Frames written so far
    pub fn frames_written(&self) -> usize {
        self.frame
    }

    pub fn is_finished(&self) -> bool {
        self.frame >= self.config.total_frames()
    }

    /// Save one premultiplied RGBA frame faded by `opacity`
    ///
    /// Returns `false` once the configured duration has been captured.
    pub fn capture(&mut self, data: &[u8], width: u32, height: u32, opacity: f32) -> Result<bool> {
        if self.is_finished() {
            return Ok(false);
        }
        fade_to_black(data, opacity, &mut self.pixels);

        let path = self.config.frame_path(self.frame);
        image::save_buffer(&path, &self.pixels, width, height, image::ColorType::Rgba8)
            .map_err(|e| VisualizerError::Recording(format!("failed to save {path}: {e}")))?;
        self.frame += 1;

        if self.is_finished() {
            tracing::info!(frames = self.frame, "recording complete");
        }
        Ok(true)
    }
}

/// Composite premultiplied pixels over black at `opacity`, fully opaque out
fn fade_to_black(data: &[u8], opacity: f32, out: &mut Vec<u8>) {
    let opacity = opacity.clamp(0.0, 1.0);
    out.clear();
    out.reserve(data.len());
    for px in data.chunks_exact(4) {
        for &channel in &px[..3] {
            out.push((channel as f32 * opacity).round() as u8);
        }
        out.push(255);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_to_black() {
        let mut out = Vec::new();
        fade_to_black(&[200, 100, 0, 255, 10, 20, 30, 128], 0.5, &mut out);
        assert_eq!(out, vec![100, 50, 0, 255, 5, 10, 15, 255]);

        fade_to_black(&[200, 100, 0, 255], 1.0, &mut out);
        assert_eq!(out, vec![200, 100, 0, 255]);
    }

    #[test]
    fn test_stops_after_duration() {
        let dir = std::env::temp_dir().join(format!("vibescope_rec_{}", std::process::id()));
        let config = RecordingConfig {
            duration_secs: 0.5,
            output_dir: dir.to_string_lossy().into_owned(),
            fps: 4,
        };
        let mut recorder = FrameRecorder::new(config).unwrap();
        let pixels = [0u8, 0, 0, 255].repeat(4);

        assert!(recorder.capture(&pixels, 2, 2, 1.0).unwrap());
        assert!(recorder.capture(&pixels, 2, 2, 1.0).unwrap());
        assert!(!recorder.capture(&pixels, 2, 2, 1.0).unwrap());
        assert_eq!(recorder.frames_written(), 2);
        assert!(dir.join("frames/frame_00001.png").exists());

        std::fs::remove_dir_all(&dir).ok();
    }
}
