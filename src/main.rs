//! Cyber Runner entry point
//!
//! Sets up the terminal, runs the fixed-rate game loop and always restores
//! the terminal on the way out.

use std::io::{BufWriter, Stdout, stdout};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crossterm::{
    ExecutableCommand, cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal,
};

use cyber_runner::platform::InputTracker;
use cyber_runner::renderer::{TerminalSurface, render_frame};
use cyber_runner::sim::{GameState, tick};
use cyber_runner::{Settings, StringTable};

/// Frames averaged by the FPS counter
const FPS_WINDOW: usize = 60;

/// Seed from the settings file, or the clock when none is configured
fn pick_seed(settings: &Settings) -> u64 {
    settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    })
}

/// Rolling frame rate over the last `FPS_WINDOW` frames
struct FpsCounter {
    frame_times: [Option<Instant>; FPS_WINDOW],
    index: usize,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            frame_times: [None; FPS_WINDOW],
            index: 0,
        }
    }

    fn record(&mut self, now: Instant) -> Option<u32> {
        let oldest = self.frame_times[self.index];
        self.frame_times[self.index] = Some(now);
        self.index = (self.index + 1) % FPS_WINDOW;

        let elapsed = now.duration_since(oldest?).as_secs_f64();
        (elapsed > 0.0).then(|| (FPS_WINDOW as f64 / elapsed).round() as u32)
    }
}

fn main() -> std::io::Result<()> {
    env_logger::init();
    log::info!("Cyber Runner starting...");

    let settings = Settings::load(&Settings::default_path());
    let seed = pick_seed(&settings);
    log::info!("Game initialized with seed: {}", seed);

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Key release events where the terminal supports them; others fall back
    // to the hold window
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    log::info!("Key release events: {}", keyboard_enhanced);

    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let (cols, rows) = terminal::size()?;
    let mut surface = TerminalSurface::new(out, cols, rows);
    let result = run(&mut surface, &rx, &settings, seed, keyboard_enhanced);

    let mut out = surface.into_inner();
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run(
    surface: &mut TerminalSurface<BufWriter<Stdout>>,
    rx: &mpsc::Receiver<Event>,
    settings: &Settings,
    seed: u64,
    release_events: bool,
) -> std::io::Result<()> {
    let mut state = GameState::from_settings(settings, seed);
    let strings = StringTable;
    let mut input = if release_events {
        InputTracker::with_release_events()
    } else {
        InputTracker::new()
    };
    let mut fps = FpsCounter::new();
    let frame = Duration::from_secs_f64(1.0 / settings.fps as f64);

    loop {
        let frame_start = Instant::now();

        while let Ok(event) = rx.try_recv() {
            if let Event::Resize(cols, rows) = event {
                surface.resize(cols, rows);
                continue;
            }
            input.handle_event(&event, |col, row| surface.to_world(col, row));
        }

        let tick_input = input.next_input();
        if tick_input.quit {
            log::info!("Quit requested (score {})", state.score as u64);
            break;
        }
        tick(&mut state, &tick_input);

        let shown_fps = fps.record(frame_start).filter(|_| settings.show_fps);
        render_frame(&state, surface, &strings, shown_fps)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }

    Ok(())
}
