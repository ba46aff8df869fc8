//! Paints a `ViewTree` with ratatui and records clickable regions.

use crate::tui::{Focus, TuiState};
use pocketnotes_core::format::STAMP_SEPARATOR;
use pocketnotes_core::view::{
    DialogView, GroupItemView, LandingView, MainView, SidebarView, ThreadView, ViewTree,
};
use pocketnotes_core::{GroupColor, GroupId};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

const SIDEBAR_WIDTH: u16 = 32;
const DIALOG_WIDTH: u16 = 48;
const DIALOG_HEIGHT: u16 = 9;
const COMPOSER_HEIGHT: u16 = 4;
const SEND_WIDTH: u16 = 8;
const SWATCH_WIDTH: u16 = 4;
const MUTED: Color = Color::DarkGray;

/// Clickable regions of the last frame, in terminal cells.
#[derive(Debug, Clone, Default)]
pub struct HitMap {
    pub dialog: Option<Rect>,
    pub swatches: Vec<(Rect, GroupColor)>,
    pub create_button: Option<Rect>,
    /// `(row area, index into the group list, group id)` of drawn rows.
    pub group_rows: Vec<(Rect, usize, GroupId)>,
    pub add_button: Option<Rect>,
    pub back_button: Option<Rect>,
    pub send_button: Option<Rect>,
}

impl HitMap {
    pub fn swatch_at(&self, column: u16, row: u16) -> Option<GroupColor> {
        self.swatches
            .iter()
            .find(|(area, _)| cell_in(*area, column, row))
            .map(|(_, color)| *color)
    }

    /// Returns `(row index, group id)` of the sidebar row at the cell.
    pub fn group_at(&self, column: u16, row: u16) -> Option<(usize, GroupId)> {
        self.group_rows
            .iter()
            .find(|(area, _, _)| cell_in(*area, column, row))
            .map(|(_, index, id)| (*index, *id))
    }
}

pub fn cell_in(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && row >= area.y
        && column - area.x < area.width
        && row - area.y < area.height
}

/// Draws one frame and returns its hit regions.
pub fn draw(frame: &mut Frame, view: &ViewTree, ui: &TuiState) -> HitMap {
    let area = frame.area();
    let mut hits = HitMap::default();

    match &view.sidebar {
        Some(sidebar) if view.is_narrow => {
            draw_sidebar(frame, area, sidebar, ui, &mut hits);
        }
        Some(sidebar) => {
            let width = SIDEBAR_WIDTH.min(area.width / 2);
            let chunks =
                Layout::horizontal([Constraint::Length(width), Constraint::Min(0)]).split(area);
            draw_sidebar(frame, chunks[0], sidebar, ui, &mut hits);
            draw_main(frame, chunks[1], &view.main, ui, &mut hits);
        }
        None => draw_main(frame, area, &view.main, ui, &mut hits),
    }

    if let Some(dialog) = &view.dialog {
        draw_dialog(frame, area, dialog, &mut hits);
    }
    hits
}

fn badge(initials: &str, color: GroupColor) -> Span<'static> {
    let (r, g, b) = color.rgb();
    Span::styled(
        format!(" {initials:<2} "),
        Style::default()
            .fg(Color::White)
            .bg(Color::Rgb(r, g, b))
            .add_modifier(Modifier::BOLD),
    )
}

fn draw_sidebar(
    frame: &mut Frame,
    area: Rect,
    sidebar: &SidebarView,
    ui: &TuiState,
    hits: &mut HitMap,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            sidebar.title,
            Style::default().add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let focused = ui.focus == Focus::Sidebar;
    let mut lines: Vec<Line> = sidebar
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| group_line(item, focused && ui.cursor == index))
        .collect();
    let add_style = if focused && ui.cursor == sidebar.items.len() {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default().fg(Color::Cyan)
    };
    lines.push(Line::from(Span::styled(" + new group", add_style)));

    let first = first_visible_row(ui.cursor, inner.height);
    for (index, item) in sidebar.items.iter().enumerate().skip(first) {
        if let Some(row) = row_rect(inner, index - first) {
            hits.group_rows.push((row, index, item.id));
        }
    }
    hits.add_button = sidebar
        .items
        .len()
        .checked_sub(first)
        .and_then(|offset| row_rect(inner, offset));

    let scroll = u16::try_from(first).unwrap_or(u16::MAX);
    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), inner);
}

/// First list row to draw so that `cursor` stays inside `height` rows.
fn first_visible_row(cursor: usize, height: u16) -> usize {
    (cursor + 1).saturating_sub(usize::from(height.max(1)))
}

fn group_line(item: &GroupItemView, under_cursor: bool) -> Line<'static> {
    let mut name_style = Style::default();
    if item.active {
        name_style = name_style.add_modifier(Modifier::BOLD).fg(Color::Yellow);
    }
    if under_cursor {
        name_style = name_style.add_modifier(Modifier::REVERSED);
    }
    Line::from(vec![
        badge(&item.initials, item.color),
        Span::raw(" "),
        Span::styled(item.name.clone(), name_style),
    ])
}

fn row_rect(inner: Rect, offset: usize) -> Option<Rect> {
    let offset = u16::try_from(offset).ok()?;
    (offset < inner.height).then(|| Rect::new(inner.x, inner.y + offset, inner.width, 1))
}

fn draw_main(frame: &mut Frame, area: Rect, main: &MainView, ui: &TuiState, hits: &mut HitMap) {
    match main {
        MainView::Landing(landing) => draw_landing(frame, area, landing),
        MainView::Thread(thread) => draw_thread(frame, area, thread, ui, hits),
    }
}

fn draw_landing(frame: &mut Frame, area: Rect, landing: &LandingView) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let top = inner.height.saturating_sub(3) / 2;
    let mut lines = vec![Line::raw(""); usize::from(top)];
    lines.push(Line::from(Span::styled(
        landing.title,
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        landing.message,
        Style::default().fg(MUTED),
    )));
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

fn draw_thread(
    frame: &mut Frame,
    area: Rect,
    thread: &ThreadView,
    ui: &TuiState,
    hits: &mut HitMap,
) {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(COMPOSER_HEIGHT),
    ])
    .split(area);

    let header_block = Block::default().borders(Borders::ALL);
    let header_inner = header_block.inner(chunks[0]);
    frame.render_widget(header_block, chunks[0]);
    let mut header = Vec::new();
    if thread.show_back {
        header.push(Span::styled("< ", Style::default().fg(Color::Cyan)));
        hits.back_button = Some(Rect::new(header_inner.x, header_inner.y, 2, 1));
    }
    header.push(badge(&thread.initials, thread.color));
    header.push(Span::raw(" "));
    header.push(Span::styled(
        thread.name.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(Line::from(header)), header_inner);

    let notes_block = Block::default().borders(Borders::LEFT | Borders::RIGHT);
    let notes_inner = notes_block.inner(chunks[1]);
    frame.render_widget(notes_block, chunks[1]);
    let mut lines = Vec::new();
    for note in &thread.notes {
        lines.extend(note.content.lines().map(|text| Line::raw(text.to_string())));
        lines.push(Line::from(Span::styled(
            format!("{}{}{}", note.date, STAMP_SEPARATOR, note.time),
            Style::default().fg(MUTED),
        )));
        lines.push(Line::raw(""));
    }
    let overflow = lines.len().saturating_sub(usize::from(notes_inner.height));
    let scroll = u16::try_from(overflow).unwrap_or(u16::MAX);
    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), notes_inner);

    let composer_chunks =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(SEND_WIDTH)]).split(chunks[2]);
    let composer_style = if ui.focus == Focus::Composer {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let composer_block = Block::default()
        .borders(Borders::ALL)
        .border_style(composer_style);
    let draft = if thread.composer.draft.is_empty() {
        Paragraph::new(Span::styled(
            thread.composer.placeholder,
            Style::default().fg(MUTED),
        ))
    } else {
        let lines: Vec<Line> = thread
            .composer
            .draft
            .split('\n')
            .map(|text| Line::raw(text.to_string()))
            .collect();
        let overflow = lines
            .len()
            .saturating_sub(usize::from(COMPOSER_HEIGHT.saturating_sub(2)));
        Paragraph::new(lines).scroll((u16::try_from(overflow).unwrap_or(u16::MAX), 0))
    };
    frame.render_widget(draft.block(composer_block), composer_chunks[0]);

    let send_style = if thread.composer.send_enabled {
        Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(MUTED)
    };
    frame.render_widget(
        Paragraph::new(Span::styled("send", send_style))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        composer_chunks[1],
    );
    hits.send_button = Some(composer_chunks[1]);
}

fn draw_dialog(frame: &mut Frame, area: Rect, dialog: &DialogView, hits: &mut HitMap) {
    let bounds = centered(area, DIALOG_WIDTH, DIALOG_HEIGHT);
    frame.render_widget(Clear, bounds);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            dialog.title,
            Style::default().add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(bounds);
    frame.render_widget(block, bounds);
    hits.dialog = Some(bounds);

    let rows = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .split(inner);

    let name = if dialog.name.is_empty() {
        Span::styled(dialog.placeholder, Style::default().fg(MUTED))
    } else {
        Span::raw(dialog.name.clone())
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![Span::raw("Group Name   "), name])),
        rows[0],
    );

    let label = "Choose color ";
    frame.render_widget(Paragraph::new(label), rows[2]);
    let mut x = rows[2].x + label.len() as u16;
    for swatch in &dialog.swatches {
        if x + SWATCH_WIDTH > rows[2].right() {
            break;
        }
        let cell = Rect::new(x, rows[2].y, SWATCH_WIDTH - 1, 1);
        let (r, g, b) = swatch.color.rgb();
        let marker = if swatch.selected { " ● " } else { "   " };
        frame.render_widget(
            Paragraph::new(Span::styled(
                marker,
                Style::default().fg(Color::White).bg(Color::Rgb(r, g, b)),
            )),
            cell,
        );
        hits.swatches.push((cell, swatch.color));
        x += SWATCH_WIDTH;
    }

    let button = "[ Create ]";
    let button_style = if dialog.create_enabled {
        Style::default().fg(Color::White).bg(Color::Blue)
    } else {
        Style::default().fg(MUTED)
    };
    let button_width = (button.len() as u16).min(rows[4].width);
    let button_area = Rect::new(
        rows[4].right().saturating_sub(button_width),
        rows[4].y,
        button_width,
        1,
    );
    frame.render_widget(
        Paragraph::new(Span::styled(button, button_style)),
        button_area,
    );
    hits.create_button = Some(button_area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
