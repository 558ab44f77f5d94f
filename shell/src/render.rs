//! Plain-text frames for the terminal.

use std::io::{self, Write};

use tracker_core::view::route::{landing_links, APP_TITLE};
use tracker_core::{ListState, ListView, Phase, Revision, RedrawTracker, Route, Table};

/// Writes frames to `out`, skipping any whose view revision was already
/// drawn or whose text matches the previous frame.
pub struct Screen<W> {
    out: W,
    redraw: RedrawTracker,
    last: Option<String>,
}

impl<W: Write> Screen<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            redraw: RedrawTracker::default(),
            last: None,
        }
    }

    /// Start tracking a new view.
    pub fn navigate(&mut self) {
        self.redraw = RedrawTracker::default();
        self.last = None;
    }

    pub fn present(&mut self, revision: Revision, frame: impl FnOnce() -> String) -> io::Result<()> {
        if !self.redraw.needs_redraw(revision) {
            return Ok(());
        }
        let frame = frame();
        if self.last.as_deref() == Some(frame.as_str()) {
            return Ok(());
        }
        writeln!(self.out, "{frame}")?;
        self.last = Some(frame);
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

pub fn home() -> String {
    let mut out = format!("{APP_TITLE}\n\n");
    for route in landing_links() {
        out.push_str(&format!("  {:<12} {}\n", route.label(), route.path()));
    }
    out
}

pub fn list_page(view: &ListView) -> String {
    let route = Route::List(view.primary());
    let link = view.new_link();
    let mut out = format!("{}  [{}: {}]\n\n", route.label(), link.label(), link.path());
    match view.state() {
        ListState::Loading => out.push_str("Loading..."),
        ListState::Empty(message) => out.push_str(&message),
        ListState::Rows(table) => out.push_str(&table_text(&table)),
    }
    out
}

pub fn form_status(phase: &Phase) -> &str {
    match phase {
        Phase::Idle => "Save",
        Phase::Submitting => "Saving...",
        Phase::Succeeded => "Saved",
        Phase::Failed(message) => message.as_str(),
    }
}

/// Left-aligned columns separated by two spaces, header underlined.
pub fn table_text(table: &Table) -> String {
    let mut widths: Vec<usize> = table.headers.iter().map(|h| h.chars().count()).collect();
    for row in &table.rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let rule = widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("  ");
    let mut lines = vec![line(table.headers.clone()), rule];
    for row in &table.rows {
        lines.push(line(row.iter().map(String::as_str).collect()));
    }
    lines.join("\n")
}
