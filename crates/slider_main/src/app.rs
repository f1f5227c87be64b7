//! Application main loop
//!
//! Stdin lines are read on a separate thread and fed to the controller
//! together with real elapsed time.

use anyhow::Result;
use crossbeam_channel::{Receiver, RecvTimeoutError};
use slider_core::{Command, SliderConfig, SliderError};
use slider_ui::{
    InputHandler, PointerEvent, RenderOp, Renderer, SlideEffectController, Surface, SwipeTracker,
};
use std::io::BufRead;
use std::time::{Duration, Instant};

/// How often timers are serviced while no input arrives
const TICK: Duration = Duration::from_millis(50);

/// Renderer for the headless host: logs every instruction and tracks which
/// optional elements currently exist
#[derive(Debug, Default)]
struct TracingRenderer {
    slides: usize,
    overlay: bool,
    fullscreen_surface: bool,
}

impl TracingRenderer {
    fn require(present: bool, target: &str) -> Result<(), SliderError> {
        if present {
            Ok(())
        } else {
            Err(SliderError::ElementMissing(target.to_string()))
        }
    }
}

impl Renderer for TracingRenderer {
    fn apply(&mut self, op: &RenderOp) -> Result<(), SliderError> {
        match op {
            RenderOp::BuildSlides(items) => self.slides = items.len(),
            RenderOp::Clear => self.slides = 0,
            RenderOp::CreateOverlay => self.overlay = true,
            RenderOp::FadeOutOverlay => Self::require(self.overlay, "overlay")?,
            RenderOp::RemoveOverlay => {
                Self::require(self.overlay, "overlay")?;
                self.overlay = false;
            }
            RenderOp::CreateFullscreenSurface => self.fullscreen_surface = true,
            RenderOp::RemoveFullscreenSurface => {
                Self::require(self.fullscreen_surface, "fullscreen")?;
                self.fullscreen_surface = false;
            }
            RenderOp::TranslateTo { surface: Surface::Fullscreen, .. } => {
                Self::require(self.fullscreen_surface, "fullscreen")?
            }
            _ => {}
        }

        tracing::debug!(target_element = op.target(), slides = self.slides, "{:?}", op);
        Ok(())
    }
}

/// One line of user input
#[derive(Debug, Clone, PartialEq)]
enum Input {
    Quit,
    Status,
    Key(String),
    Command(String),
    Pointer(PointerEvent),
    Swipe { from: f32, to: f32 },
    MediaLoaded(usize),
    MediaFailed { index: usize, reason: String },
}

fn parse_line(line: &str) -> Option<Input> {
    let line = line.trim_end_matches(&['\r', '\n'][..]);
    if line.trim().is_empty() {
        // A bare space is the play/pause key
        return (line == " ").then(|| Input::Key(" ".to_string()));
    }
    let line = line.trim();

    if let Some(spec) = line.strip_prefix("cmd:") {
        return Some(Input::Command(spec.trim().to_string()));
    }

    let mut words = line.split_whitespace();
    let head = words.next()?;
    let input = match head {
        "quit" | "exit" => Input::Quit,
        "status" => Input::Status,
        "hover" => Input::Pointer(PointerEvent::Enter),
        "leave" => Input::Pointer(PointerEvent::Leave),
        "click" => Input::Pointer(PointerEvent::SlideClick),
        "swipe" => {
            let from = words.next()?.parse().ok()?;
            let to = words.next()?.parse().ok()?;
            Input::Swipe { from, to }
        }
        "loaded" => Input::MediaLoaded(words.next()?.parse().ok()?),
        "failed" => {
            let index = words.next()?.parse().ok()?;
            let reason = words.collect::<Vec<_>>().join(" ");
            Input::MediaFailed { index, reason }
        }
        _ => Input::Key(line.to_string()),
    };
    Some(input)
}

struct App {
    controller: SlideEffectController<TracingRenderer>,
    input_handler: InputHandler,
    swipe: SwipeTracker,
    last_status: String,
}

impl App {
    fn new(config: &SliderConfig) -> Self {
        let controller = SlideEffectController::from_config(config, TracingRenderer::default());
        let last_status = controller.status_text();

        Self {
            controller,
            input_handler: InputHandler::new(&config.keybindings),
            swipe: SwipeTracker::new(config.slider.swipe_threshold_px),
            last_status,
        }
    }

    /// Handle one input. Returns `false` when the user asked to quit.
    fn handle_input(&mut self, input: Input) -> bool {
        let command = match input {
            Input::Quit => return false,
            Input::Status => {
                println!("{}", self.controller.status_text());
                return true;
            }
            Input::Key(key) => self.input_handler.handle_key(&key),
            Input::Command(spec) => match Command::parse(&spec) {
                Ok(cmd) => Some(cmd),
                Err(e) => {
                    tracing::warn!("Invalid command '{}': {}", spec, e);
                    None
                }
            },
            Input::Pointer(event) => self.input_handler.handle_pointer(event),
            Input::Swipe { from, to } => {
                self.swipe.touch_start(from);
                self.swipe.touch_end(to)
            }
            Input::MediaLoaded(index) => {
                self.controller.report_media_loaded(index);
                None
            }
            Input::MediaFailed { index, reason } => {
                self.controller.report_media_failed(index, &reason);
                None
            }
        };

        if let Some(cmd) = command {
            tracing::debug!("Executing command: {}", cmd.id.as_str());
            self.controller.execute(&cmd);
        }
        true
    }

    fn tick(&mut self, elapsed: Duration) {
        self.controller.advance(elapsed);
    }

    /// Print the status line when it changed
    fn report(&mut self) {
        let status = self.controller.status_text();
        if status != self.last_status {
            println!("{}", status);
            self.last_status = status;
        }
    }
}

fn spawn_stdin_reader() -> Result<Receiver<String>> {
    let (tx, rx) = crossbeam_channel::unbounded();

    std::thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Failed to read input: {}", e);
                        break;
                    }
                }
            }
        })?;

    Ok(rx)
}

pub fn run(config: SliderConfig) -> Result<()> {
    let mut app = App::new(&config);
    let input = spawn_stdin_reader()?;

    println!("{}", app.last_status);

    let mut last_tick = Instant::now();
    loop {
        match input.recv_timeout(TICK) {
            Ok(line) => {
                if let Some(parsed) = parse_line(&line) {
                    if !app.handle_input(parsed) {
                        tracing::info!("Quit requested");
                        break;
                    }
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                tracing::info!("Input closed");
                break;
            }
        }

        let now = Instant::now();
        app.tick(now.duration_since(last_tick));
        last_tick = now;
        app.report();
    }

    app.controller.destroy();
    tracing::info!("Effect Slider exiting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use slider_core::EffectMode;

    fn app() -> App {
        App::new(&SliderConfig::default())
    }

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("quit"), Some(Input::Quit));
        assert_eq!(parse_line("  Right "), Some(Input::Key("Right".to_string())));
        assert_eq!(parse_line(" "), Some(Input::Key(" ".to_string())));
        assert_eq!(parse_line(""), None);
        assert_eq!(
            parse_line("cmd:slide.goto:3"),
            Some(Input::Command("slide.goto:3".to_string()))
        );
        assert_eq!(parse_line("swipe 300 100"), Some(Input::Swipe { from: 300.0, to: 100.0 }));
        assert_eq!(parse_line("swipe left"), None);
        assert_eq!(
            parse_line("failed 2 not found"),
            Some(Input::MediaFailed { index: 2, reason: "not found".to_string() })
        );
        assert_eq!(parse_line("hover"), Some(Input::Pointer(PointerEvent::Enter)));
    }

    #[test]
    fn test_tracing_renderer_reports_missing_elements() {
        let mut r = TracingRenderer::default();
        assert!(matches!(
            r.apply(&RenderOp::RemoveOverlay),
            Err(SliderError::ElementMissing(_))
        ));
        r.apply(&RenderOp::CreateOverlay).unwrap();
        r.apply(&RenderOp::FadeOutOverlay).unwrap();
        r.apply(&RenderOp::RemoveOverlay).unwrap();
        assert!(!r.overlay);
    }

    #[test]
    fn test_keys_and_commands_drive_controller() {
        let mut app = app();
        assert!(app.handle_input(Input::Key("ArrowRight".to_string())));
        assert_eq!(app.controller.current_index(), 1);

        app.handle_input(Input::Key("3".to_string()));
        assert_eq!(app.controller.mode(), EffectMode::Coverflow);

        app.handle_input(Input::Command("slide.goto:-1".to_string()));
        assert_eq!(app.controller.current_index(), 5);

        app.handle_input(Input::Command("bogus".to_string()));
        assert!(!app.handle_input(Input::Quit));
    }

    #[test]
    fn test_fullscreen_round_trip() {
        let mut app = app();
        app.handle_input(Input::Key("f".to_string()));
        assert!(app.controller.is_fullscreen());
        app.handle_input(Input::Key("Esc".to_string()));
        assert!(!app.controller.is_fullscreen());
        app.tick(Duration::from_millis(300));
        assert!(!app.controller.renderer().overlay);
        assert!(!app.controller.renderer().fullscreen_surface);
    }

    #[test]
    fn test_swipe_and_timer() {
        let mut app = app();
        app.handle_input(Input::Swipe { from: 300.0, to: 100.0 });
        assert_eq!(app.controller.current_index(), 1);

        app.tick(Duration::from_secs(3));
        assert_eq!(app.controller.current_index(), 2);
    }
}
