//! vibescope - audio-reactive visualizer
//!
//! Listens to the default input device (or a WAV file) and draws one of
//! eleven styles driven by the live spectrum or waveform.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use glam::Vec2;
use tracing_subscriber::EnvFilter;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use vibescope::audio::{AudioSystem, WavSource};
use vibescope::cli::Args;
use vibescope::params::{AnalyserConfig, RenderConfig};
use vibescope::raster::PixmapCanvas;
use vibescope::recording::FrameRecorder;
use vibescope::rendering::RenderSystem;
use vibescope::signal::SampleSource;
use vibescope::styles::Style;
use vibescope::visualizer::Visualizer;

/// Where samples come from
enum Input {
    Live(AudioSystem),
    File(WavSource),
}

impl Input {
    fn open(path: Option<&std::path::Path>, config: AnalyserConfig) -> anyhow::Result<Self> {
        Ok(match path {
            Some(path) => Self::File(
                WavSource::open(path, config)
                    .with_context(|| format!("failed to open {}", path.display()))?,
            ),
            None => Self::Live(AudioSystem::new(config).context("failed to open audio input")?),
        })
    }

    fn source(&mut self) -> &mut dyn SampleSource {
        match self {
            Self::Live(audio) => audio,
            Self::File(wav) => wav,
        }
    }

    fn set_paused(&self, paused: bool) {
        let Self::Live(audio) = self else {
            return;
        };
        let result = if paused { audio.pause() } else { audio.resume() };
        if let Err(err) = result {
            tracing::warn!(%err, paused, "failed to toggle audio input");
        }
    }
}

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,
    canvas: PixmapCanvas,

    // Visualization
    visualizer: Visualizer,
    input: Input,
    recorder: Option<FrameRecorder>,

    // Configuration
    render_config: RenderConfig,

    // Time tracking
    last_frame: Instant,

    /// Fatal error raised inside the event loop
    error: Option<anyhow::Error>,
}

impl App {
    fn new(args: &Args) -> anyhow::Result<Self> {
        let config = args.visualizer_config();
        let input = Input::open(args.input.as_deref(), config.analyser.clone())?;
        let recorder = args
            .recording_config()
            .map(FrameRecorder::new)
            .transpose()
            .context("failed to set up recording")?;

        Ok(Self {
            window: None,
            render_system: None,
            canvas: PixmapCanvas::new(0, 0),
            visualizer: Visualizer::new(config),
            input,
            recorder,
            render_config: args.render_config(),
            last_frame: Instant::now(),
            error: None,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        tracing::error!("{error:#}");
        self.error = Some(error);
        event_loop.exit();
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window_attributes = Window::default_attributes()
            .with_title("vibescope")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));
        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("failed to create window")?,
        );

        let render_system = pollster::block_on(RenderSystem::new(Arc::clone(&window)))
            .context("failed to initialize GPU")?;

        let size = window.inner_size();
        self.canvas.resize(size.width, size.height);
        self.window = Some(window);
        self.render_system = Some(render_system);

        self.visualizer.start();
        self.last_frame = Instant::now();
        tracing::info!(
            style = %self.visualizer.active_style(),
            "running: Left/Right or 1-9/0/- to switch, S shuffle, Space pause, Esc quit"
        );
        Ok(())
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, key: KeyCode) {
        let active = self.visualizer.active_style();
        let target = match key {
            KeyCode::Escape => {
                event_loop.exit();
                return;
            }
            KeyCode::Space => {
                if self.visualizer.is_running() {
                    self.visualizer.stop();
                } else {
                    self.visualizer.start();
                }
                return;
            }
            KeyCode::KeyS => {
                self.visualizer.toggle_shuffle();
                return;
            }
            KeyCode::ArrowRight => Some(active.next()),
            KeyCode::ArrowLeft => Some(active.prev()),
            code => style_hotkey(code),
        };

        if let Some(style) = target.filter(|&s| s != active) {
            if !self.visualizer.request_style_switch(style) {
                tracing::debug!(requested = %style, "switch ignored during transition");
            }
        }
    }

    /// Render a single frame
    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let elapsed = match &self.recorder {
            // Fixed timestep so recordings play back at the configured rate
            Some(recorder) => Duration::from_secs_f32(1.0 / recorder.fps() as f32),
            None => now - self.last_frame,
        };
        self.last_frame = now;
        self.visualizer.advance_timers(elapsed);

        self.visualizer
            .render_frame(self.input.source(), &mut self.canvas);

        let (width, height) = self.canvas.size();
        let Some(pixels) = self.canvas.data() else {
            return;
        };
        let opacity = self.visualizer.opacity();
        let mut fatal = None;

        if let Some(render_system) = &mut self.render_system {
            render_system.upload(pixels, width, height);
            match render_system.render(opacity) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    render_system.resize(width, height);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    fatal = Some(anyhow::anyhow!("GPU out of memory"));
                }
                Err(err) => tracing::warn!(?err, "frame dropped"),
            }
        }

        if let Some(recorder) = &mut self.recorder {
            match recorder.capture(pixels, width, height, opacity) {
                Ok(true) => {}
                Ok(false) => event_loop.exit(),
                Err(err) => fatal = Some(err.into()),
            }
        }

        if let Some(err) = fatal {
            self.fail(event_loop, err);
        }
    }
}

/// Number row picks a style directly: 1-9, then 0 and -
fn style_hotkey(code: KeyCode) -> Option<Style> {
    let index = match code {
        KeyCode::Digit1 => 0,
        KeyCode::Digit2 => 1,
        KeyCode::Digit3 => 2,
        KeyCode::Digit4 => 3,
        KeyCode::Digit5 => 4,
        KeyCode::Digit6 => 5,
        KeyCode::Digit7 => 6,
        KeyCode::Digit8 => 7,
        KeyCode::Digit9 => 8,
        KeyCode::Digit0 => 9,
        KeyCode::Minus => 10,
        _ => return None,
    };
    Style::ALL.get(index).copied()
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }
        if let Err(err) = self.init_window(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(code),
                        repeat: false,
                        ..
                    },
                ..
            } => self.handle_key(event_loop, code),
            WindowEvent::CursorMoved { position, .. } => {
                self.visualizer
                    .set_pointer(Some(Vec2::new(position.x as f32, position.y as f32)));
            }
            WindowEvent::CursorLeft { .. } => self.visualizer.set_pointer(None),
            WindowEvent::Resized(size) => {
                if let Some(render_system) = &mut self.render_system {
                    render_system.resize(size.width, size.height);
                }
                self.canvas.resize(size.width, size.height);
            }
            WindowEvent::Occluded(occluded) => {
                self.input.set_paused(occluded);
                self.visualizer.set_audio_ready(!occluded);
            }
            WindowEvent::RedrawRequested => self.render_frame(event_loop),
            _ => {}
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut app = App::new(&args)?;
    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.run_app(&mut app).context("event loop failed")?;

    match app.error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
