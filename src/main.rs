mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand, QueueableCommand,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use space_invader::app::{App, Control};
use space_invader::assets::AssetCache;
use space_invader::canvas::Canvas;
use space_invader::clock::FrameClock;
use space_invader::config::GameConfig;
use space_invader::error::GameError;
use space_invader::input::KeyTracker;

/// Space Invader - defend against descending waves of enemy ships
#[derive(Parser)]
#[command(name = "space_invader")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Logical window width
    #[arg(long, default_value_t = 600)]
    width: u32,

    /// Logical window height
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Ticks per second
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Directory with the PNG sprite set (built-in sprites when omitted)
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Write logs to this file; the terminal itself is the game screen
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
}

fn init_logging(path: Option<&Path>, verbose: bool) -> Result<(), GameError> {
    let Some(path) = path else {
        return Ok(());
    };
    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_ansi(false)
        .with_writer(Mutex::new(File::create(path)?))
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| GameError::Logging(e.to_string()))
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), GameError> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref(), cli.verbose)?;

    let config = GameConfig {
        width: cli.width,
        height: cli.height,
        fps: cli.fps,
        ..GameConfig::default()
    };
    config.validate()?;

    // Resolve every sprite before the terminal is touched so failures print cleanly.
    let assets = match &cli.assets {
        Some(dir) => AssetCache::load(dir, config.width, config.height)?,
        None => AssetCache::builtin(config.width, config.height),
    };
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Ask for release events; terminals without the kitty protocol ignore it
    // and KeyTracker expires keys after its hold window instead.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread to blocking event reads so the game loop never waits on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let result = run(&mut out, &rx, config, &assets, &mut rng);

    // Restore the terminal even when the loop failed
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

// ── Game loop ─────────────────────────────────────────────────────────────────

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: GameConfig,
    assets: &AssetCache,
    rng: &mut impl Rng,
) -> Result<(), GameError> {
    let mut app = App::new(config);
    let mut tracker = KeyTracker::new();
    let mut clock = FrameClock::new(config.fps);
    let (cols, rows) = terminal::size()?;
    let mut canvas = Canvas::new(cols, rows, config.screen_width(), config.screen_height());
    let mut frame: u64 = 0;

    info!(fps = clock.target_fps(), "entering menu");
    loop {
        frame += 1;

        // Drain all pending input events (non-blocking)
        while let Ok(event) = rx.try_recv() {
            if let Event::Resize(..) = event {
                out.queue(terminal::Clear(terminal::ClearType::All))?;
            }
            tracker.handle_event(&event, frame);
        }

        let input = tracker.take_input(frame);
        if app.step(&input, assets, rng) == Control::Quit {
            break;
        }

        let (cols, rows) = terminal::size()?;
        canvas.resize(cols, rows);
        canvas.clear();
        app.draw(&mut canvas, assets);
        display::present(out, &canvas)?;

        clock.wait();
        if frame % (u64::from(config.fps) * 10) == 0 {
            debug!(fps = clock.measured_fps(), "frame rate");
        }
    }
    Ok(())
}
