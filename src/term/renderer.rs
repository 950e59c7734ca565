//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Draws go through a per-cell diff against the previously flushed frame,
//! so a steady board costs almost nothing per tick.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor,
        SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use super::fb::{CellStyle, FrameBuffer};
use crate::sim::Rgb;

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.queue(terminal::DisableLineWrap)?;
        self.stdout.flush()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(terminal::EnableLineWrap)?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full redraw.
    ///
    /// Useful on terminal resize events.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Flush a frame, diffing against the previous one.
    pub fn draw(&mut self, fb: FrameBuffer) -> Result<()> {
        let full = match &self.last {
            Some(prev) => prev.width() != fb.width() || prev.height() != fb.height(),
            None => true,
        };
        if full {
            self.stdout.queue(terminal::Clear(terminal::ClearType::All))?;
        }

        let mut current_style: Option<CellStyle> = None;
        for y in 0..fb.height() {
            for x in 0..fb.width() {
                let cell = fb.get(x, y).unwrap_or_default();
                if !full {
                    if let Some(prev) = &self.last {
                        if prev.get(x, y) == Some(cell) {
                            continue;
                        }
                    }
                }
                self.stdout.queue(cursor::MoveTo(x, y))?;
                if current_style != Some(cell.style) {
                    apply_style(&mut self.stdout, cell.style)?;
                    current_style = Some(cell.style);
                }
                self.stdout.queue(Print(cell.ch))?;
            }
        }

        self.stdout.queue(ResetColor)?;
        self.stdout.flush()?;
        self.last = Some(fb);
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn apply_style(stdout: &mut io::Stdout, style: CellStyle) -> Result<()> {
    match style.fg {
        Some(rgb) => stdout.queue(SetForegroundColor(color_for(rgb)))?,
        None => stdout.queue(SetForegroundColor(Color::Reset))?,
    };
    match style.bg {
        Some(rgb) => stdout.queue(SetBackgroundColor(color_for(rgb)))?,
        None => stdout.queue(SetBackgroundColor(Color::Reset))?,
    };
    Ok(())
}

fn color_for(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_conversion() {
        let color = color_for(Rgb::new(10, 20, 30));
        assert_eq!(color, Color::Rgb { r: 10, g: 20, b: 30 });
    }
}
