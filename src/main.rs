//! Terminal Memory Match runner (default binary).
//!
//! Fixed-timestep loop: render, poll input until the next tick, feed finished
//! reveals back into the session, then tick the session.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use memory_match::core::{GameStats, Session};
use memory_match::input::{handle_key_event, should_quit, GridCursor};
use memory_match::term::{FlipTimeline, FrameBuffer, GameView, TerminalRenderer, Viewport};
use memory_match::types::{GameAction, TICK_MS};
use memory_match::{logging, GameConfig};

fn main() -> Result<()> {
    let config = GameConfig::load()?;
    logging::init(config.log_path.as_deref(), config.log_level)?;

    let session_config = config.session_config();
    log::info!(
        "Starting {} game: {}x{} grid, {} moves",
        config.difficulty.name(),
        session_config.rows,
        session_config.columns,
        session_config.moves
    );

    let stats = Rc::new(RefCell::new(GameStats::new()));
    let timeline = Rc::new(RefCell::new(FlipTimeline::new()));
    let mut session = Session::new(
        session_config,
        Rc::clone(&stats),
        Rc::clone(&timeline),
    );
    session
        .events()
        .subscribe_all(|event| log::debug!("event: {:?}", event));
    session
        .start()
        .context("cannot deal the configured grid")?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session, &timeline);

    // Always try to restore terminal state.
    let _ = term.exit();
    result?;

    println!("{}", stats.borrow().to_json()?);
    Ok(())
}

fn run(
    term: &mut TerminalRenderer,
    session: &mut Session,
    timeline: &RefCell<FlipTimeline>,
) -> Result<()> {
    let view = GameView::new();
    let mut fb = FrameBuffer::new(0, 0);
    let mut cursor = GridCursor::new(session.board().rows(), session.board().columns());

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let snap = session.snapshot();
        cursor.resize(snap.rows, snap.columns);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Some(cursor.position()), Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    match handle_key_event(key) {
                        Some(GameAction::Flip) => {
                            if let Some(card) = cursor.index() {
                                session.select(card);
                            }
                        }
                        Some(GameAction::Restart) => {
                            timeline.borrow_mut().reset();
                            session.restart()?;
                        }
                        Some(action) => {
                            cursor.apply(action);
                        }
                        None => {}
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            let settled = timeline.borrow_mut().advance(TICK_MS);
            for card in settled {
                session.reveal_settled(card);
            }
            session.tick(TICK_MS);
        }
    }
}
