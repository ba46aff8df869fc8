//! Terminal front-end: paints `ViewTree` and forwards terminal events.
//!
//! # Responsibility
//! - Hold a `TerminalGuard` while the UI runs and report restore failures.
//! - Run the draw -> read event -> mutate loop.
//! - Translate terminal cells into core layout units.
//!
//! # Invariants
//! - The terminal is restored on every exit path, including errors.
//! - Dialog bounds are reported to the core after every frame.

use chrono::Local;
use crossterm::event;
use log::{info, warn};
use pocketnotes_core::{Clock, GroupStore, NotesApp, Point, Rect, ViewTree};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};

pub mod input;
pub mod render;
pub mod terminal_guard;

use input::{handle_event, Flow};
use render::HitMap;
use terminal_guard::TerminalGuard;

/// Conversion between terminal cells and core layout units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scale {
    units_per_cell: u32,
}

impl Scale {
    pub fn new(units_per_cell: u32) -> Self {
        Self {
            units_per_cell: units_per_cell.max(1),
        }
    }

    pub fn width_units(&self, columns: u16) -> u32 {
        u32::from(columns) * self.units_per_cell
    }

    pub fn point(&self, column: u16, row: u16) -> Point {
        Point::new(
            u32::from(column) * self.units_per_cell,
            u32::from(row) * self.units_per_cell,
        )
    }

    pub fn rect(&self, area: ratatui::layout::Rect) -> Rect {
        Rect::new(
            u32::from(area.x) * self.units_per_cell,
            u32::from(area.y) * self.units_per_cell,
            u32::from(area.width) * self.units_per_cell,
            u32::from(area.height) * self.units_per_cell,
        )
    }
}

/// Which pane receives typed characters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Sidebar,
    Composer,
}

/// Front-end-only state: never reaches the core.
#[derive(Debug, Clone, Default)]
pub struct TuiState {
    pub focus: Focus,
    /// Sidebar row under the keyboard cursor; `groups.len()` is the `+` row.
    pub cursor: usize,
}

/// Runs the UI until the user quits.
pub fn run<S: GroupStore, C: Clock>(app: &mut NotesApp<S, C>, scale: Scale) -> io::Result<()> {
    let mut guard = TerminalGuard::new()?;
    let outcome = Terminal::new(CrosstermBackend::new(io::stdout()))
        .and_then(|mut terminal| event_loop(&mut terminal, app, scale));
    let restored = guard.restore();
    if let Err(err) = &restored {
        warn!("event=tui_restore module=cli status=error error={err}");
    }
    outcome.and(restored)
}

fn event_loop<S: GroupStore, C: Clock>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut NotesApp<S, C>,
    scale: Scale,
) -> io::Result<()> {
    let mut ui = TuiState::default();
    info!("event=tui_start module=cli status=ok");

    loop {
        let view = ViewTree::derive(app, &Local);
        let mut hits = HitMap::default();
        terminal.draw(|frame| {
            hits = render::draw(frame, &view, &ui);
        })?;
        if let Some(bounds) = hits.dialog {
            app.set_dialog_bounds(scale.rect(bounds));
        }

        let event = event::read()?;
        if handle_event(app, &mut ui, &hits, scale, event) == Flow::Quit {
            break;
        }
    }

    info!("event=tui_stop module=cli status=ok");
    Ok(())
}
