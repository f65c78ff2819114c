//! Terminal front end for the preview dialog: a spinner, a surface that
//! prints each pushed configuration, and a view that replays recorded form
//! snapshots.

use std::io::{self, Write};

use crossterm::{cursor, queue, style, terminal};
use tracing::warn;

use crate::error::SurfaceError;
use crate::preview::{BusyIndicator, DialogView, RenderingSurface};
use crate::types::{EmbedTarget, FormInput, ViewerConfig};

/// Print a line, bolding any text inside `[...]` brackets.
/// Text outside brackets is printed dim.
pub fn print_bracketed<W: Write>(out: &mut W, item: &str) -> io::Result<()> {
    let mut rest = item;
    while !rest.is_empty() {
        if let Some(open) = rest.find('[') {
            if open > 0 {
                queue!(
                    out,
                    style::SetAttribute(style::Attribute::Dim),
                    style::Print(&rest[..open]),
                    style::SetAttribute(style::Attribute::Reset),
                )?;
            }
            rest = &rest[open..];
            if let Some(close) = rest.find(']') {
                queue!(
                    out,
                    style::SetAttribute(style::Attribute::Bold),
                    style::Print(&rest[..=close]),
                    style::SetAttribute(style::Attribute::Reset),
                )?;
                rest = &rest[close + 1..];
            } else {
                queue!(out, style::Print(rest))?;
                break;
            }
        } else {
            queue!(
                out,
                style::SetAttribute(style::Attribute::Dim),
                style::Print(rest),
                style::SetAttribute(style::Attribute::Reset),
            )?;
            break;
        }
    }
    queue!(out, style::Print("\n"))
}

// ---------------------------------------------------------------------------
// Spinner
// ---------------------------------------------------------------------------

pub struct TerminalSpinner<W: Write> {
    out: W,
    visible: bool,
}

impl<W: Write> TerminalSpinner<W> {
    pub fn new(out: W) -> Self {
        TerminalSpinner { out, visible: false }
    }

    fn draw(&mut self, show: bool) -> io::Result<()> {
        queue!(
            self.out,
            cursor::MoveToColumn(0),
            terminal::Clear(terminal::ClearType::CurrentLine),
        )?;
        if show {
            queue!(
                self.out,
                style::SetAttribute(style::Attribute::Dim),
                style::Print("\u{280b} rendering preview\u{2026}"),
                style::SetAttribute(style::Attribute::Reset),
            )?;
        }
        self.out.flush()
    }
}

impl<W: Write> BusyIndicator for TerminalSpinner<W> {
    fn show(&mut self) {
        if self.visible {
            return;
        }
        self.visible = true;
        if let Err(e) = self.draw(true) {
            warn!("spinner could not be drawn: {e}");
        }
    }

    fn hide(&mut self) {
        if !self.visible {
            return;
        }
        self.visible = false;
        if let Err(e) = self.draw(false) {
            warn!("spinner could not be cleared: {e}");
        }
    }
}

// ---------------------------------------------------------------------------
// Surface
// ---------------------------------------------------------------------------

/// A surface that renders each configuration it receives as a block of
/// `[option] value` lines.
pub struct TerminalSurface<W: Write> {
    out: W,
    started: bool,
    renders: usize,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        TerminalSurface {
            out,
            started: false,
            renders: 0,
        }
    }

    pub fn renders(&self) -> usize {
        self.renders
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn render(&mut self, document_url: &str, config: &ViewerConfig) -> io::Result<()> {
        print_bracketed(
            &mut self.out,
            &format!("[preview #{}] {document_url}", self.renders),
        )?;
        for (name, value) in config.iter() {
            print_bracketed(&mut self.out, &format!("  [{}] {value}", name.key()))?;
        }
        self.out.flush()
    }
}

impl<W: Write> RenderingSurface for TerminalSurface<W> {
    fn begin_load(&mut self) -> Result<(), SurfaceError> {
        self.started = true;
        Ok(())
    }

    fn load(&mut self, document_url: &str, config: ViewerConfig) {
        if !self.started {
            warn!(document_url, "configuration pushed before the surface loaded");
        }
        self.renders += 1;
        if let Err(e) = self.render(document_url, &config) {
            warn!("preview could not be written: {e}");
        }
    }
}

// ---------------------------------------------------------------------------
// View
// ---------------------------------------------------------------------------

/// A dialog view whose form walks through recorded snapshots. The first
/// snapshot is the form as rendered; each `advance` is one edit.
pub struct ScriptedView<W: Write> {
    out: W,
    snapshots: Vec<FormInput>,
    current: usize,
    closed: bool,
}

impl<W: Write> ScriptedView<W> {
    pub fn new(out: W, snapshots: Vec<FormInput>) -> Self {
        ScriptedView {
            out,
            snapshots,
            current: 0,
            closed: false,
        }
    }

    /// Move to the next snapshot. Returns `false` once the script is exhausted.
    pub fn advance(&mut self) -> bool {
        if self.current + 1 >= self.snapshots.len() {
            return false;
        }
        self.current += 1;
        true
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn write_line(&mut self, line: &str) {
        if let Err(e) = print_bracketed(&mut self.out, line).and_then(|()| self.out.flush()) {
            warn!("dialog output failed: {e}");
        }
    }
}

impl<W: Write> DialogView for ScriptedView<W> {
    fn render(&mut self, title: &str, width: &str) {
        self.write_line(&format!("[{title}] width {width}"));
    }

    fn render_embed_code(&mut self, target: &EmbedTarget) {
        self.write_line(&format!("[embed] {}", target.document_viewer_js));
    }

    fn serialize_form(&self) -> FormInput {
        self.snapshots.get(self.current).cloned().unwrap_or_default()
    }

    fn close(&mut self) {
        self.closed = true;
        self.write_line("[closed]");
    }
}
