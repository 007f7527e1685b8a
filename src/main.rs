//! Terminal Bingo runner (default binary).
//!
//! Renders the session snapshot every frame and turns key presses into
//! commands. Draws and false-claim expiry run on a background tokio runtime;
//! this loop never waits on them.

use std::fs::OpenOptions;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use env_logger::{Env, Target};
use log::info;
use pico_args::Arguments;

use tui_bingo::core::GameSnapshot;
use tui_bingo::engine::{EngineConfig, Session};
use tui_bingo::input::{handle_key_event, should_quit, CardCursor, KeyCommand};
use tui_bingo::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_bingo::types::FRAME_MS;

const HELP: &str = "\
Play Bingo against the computer in the terminal

USAGE:
  tui-bingo [OPTIONS]

OPTIONS:
  --seed N                 Fixed RNG seed            [env: BINGO_SEED]
  --draw-interval-ms MS    Time between draws        [env: BINGO_DRAW_INTERVAL_MS, default: 3000]
  --false-claim-ms MS      False-claim notice length [env: BINGO_FALSE_CLAIM_MS, default: 3000]

FLAGS:
  -h, --help               Print help information

Logs go to the file named by BINGO_LOG_PATH (filter with RUST_LOG).
";

struct Args {
    seed: Option<u64>,
    draw_interval_ms: Option<u64>,
    false_claim_ms: Option<u64>,
}

impl Args {
    /// Flags win over the environment.
    fn apply(&self, mut config: EngineConfig) -> EngineConfig {
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(ms) = self.draw_interval_ms {
            config = config.with_draw_interval(Duration::from_millis(ms));
        }
        if let Some(ms) = self.false_claim_ms {
            config = config.with_false_claim_duration(Duration::from_millis(ms));
        }
        config
    }
}

fn main() -> Result<()> {
    let mut pargs = Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let args = Args {
        seed: pargs.opt_value_from_str("--seed")?,
        draw_interval_ms: pargs.opt_value_from_str("--draw-interval-ms")?,
        false_claim_ms: pargs.opt_value_from_str("--false-claim-ms")?,
    };
    let rest = pargs.finish();
    if !rest.is_empty() {
        bail!("unexpected arguments: {rest:?}\n\n{HELP}");
    }

    init_logging()?;

    let config = args.apply(EngineConfig::from_env());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("bingo-timer")
        .enable_time()
        .build()
        .context("failed to build timer runtime")?;
    let mut session = Session::with_handle(config, runtime.handle().clone())?;
    info!("starting with {:?}", session.config());

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session);

    // A failed frame must not leave the tty in raw mode.
    let _ = term.exit();
    result
}

/// Route logs to `BINGO_LOG_PATH`; without it only warnings reach stderr.
fn init_logging() -> Result<()> {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));

    if let Ok(path) = std::env::var("BINGO_LOG_PATH") {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("failed to open log file {path}"))?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    builder.try_init()?;
    Ok(())
}

fn run(term: &mut TerminalRenderer, session: &mut Session) -> Result<()> {
    let view = GameView::default();
    let frame = Duration::from_millis(FRAME_MS);

    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut cursor = CardCursor::new();
    let mut generation = snap.generation;

    loop {
        session.snapshot_into(&mut snap);
        if snap.generation != generation {
            generation = snap.generation;
            cursor.reset();
        }

        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        // Marking only works mid-game, so the cursor is hidden otherwise.
        let shown_cursor = snap.playable().then_some(cursor.position());
        view.render_into_with_cursor(&snap, shown_cursor, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input, waiting at most one frame.
        if !event::poll(frame)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    return Ok(());
                }
                match handle_key_event(key) {
                    Some(KeyCommand::Action(action)) => {
                        session.apply_action(action);
                    }
                    Some(KeyCommand::Move(step)) => {
                        cursor.apply(step);
                    }
                    Some(KeyCommand::MarkUnderCursor) => {
                        let action = snap.human.as_ref().and_then(|card| cursor.mark_action(card));
                        if let Some(action) = action {
                            session.apply_action(action);
                        }
                    }
                    None => {}
                }
            }
            Event::Resize(..) => term.invalidate(),
            _ => {}
        }
    }
}
