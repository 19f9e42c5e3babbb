use std::{io::{Stdout, Write, stdout}, time::Duration};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, read, poll};

use crate::config::GRID_SIZE;
use crate::render::{CellKind, Frame, Rgb};
use crate::{Error, Result};

// Each grid cell takes two columns so the board comes out roughly square
const CELL_WIDTH: u16 = 2;
const BOARD_WIDTH: u16 = GRID_SIZE as u16 * CELL_WIDTH + 2;
// Score line plus the bordered board
const BOARD_HEIGHT: u16 = GRID_SIZE as u16 + 3;

const BORDER_COLOR: Color = Color::Rgb { r: 120, g: 120, b: 140 };

pub struct TermManager {
    width: u16,
    height: u16,
    stdout: Stdout,
    origin: (u16, u16),
}

impl TermManager {
    pub fn new() -> Result<Self> {
        let (width, height) = terminal::size()?;
        if width < BOARD_WIDTH || height < BOARD_HEIGHT {
            return Err(Error::TerminalTooSmall {
                need_w: BOARD_WIDTH,
                need_h: BOARD_HEIGHT,
                have_w: width,
                have_h: height,
            });
        }

        let origin = ((width - BOARD_WIDTH) / 2, (height - BOARD_HEIGHT) / 2);
        Ok(TermManager { width, height, stdout: stdout(), origin })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        execute!(self.stdout, style::ResetColor, cursor::Show, cursor::EnableBlinking)?;
        terminal::disable_raw_mode()?;
        execute!(self.stdout, LeaveAlternateScreen)?;
        Ok(())
    }

    /// Drains every pending key press without blocking.
    pub fn read_key_events_queue(&self) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(0))? {
            if let Event::Key(ev) = read()? {
                events.push(ev);
            }
        }

        Ok(events)
    }

    pub fn clear(&mut self) -> Result<()> {
        execute!(self.stdout, style::ResetColor, terminal::Clear(ClearType::All))?;
        Ok(())
    }

    /// Score line, border and every cell of the frame.
    pub fn draw(&mut self, frame: &Frame, score_line: &str) -> Result<()> {
        let (left, top) = self.origin;

        queue!(
            self.stdout,
            style::ResetColor,
            cursor::MoveTo(left, top),
            terminal::Clear(ClearType::CurrentLine),
            style::Print(score_line)
        )?;

        let horizontal = format!("+{}+", "-".repeat((BOARD_WIDTH - 2) as usize));
        queue!(
            self.stdout,
            style::SetForegroundColor(BORDER_COLOR),
            cursor::MoveTo(left, top + 1),
            style::Print(&horizontal),
            cursor::MoveTo(left, top + BOARD_HEIGHT - 1),
            style::Print(&horizontal)
        )?;

        for (y, row) in frame.rows().enumerate() {
            let line_y = top + 2 + y as u16;
            queue!(
                self.stdout,
                style::SetForegroundColor(BORDER_COLOR),
                cursor::MoveTo(left, line_y),
                style::Print('|')
            )?;

            for cell in row {
                let filler = if cell.kind == CellKind::Body { cell.glyph } else { ' ' };
                queue!(
                    self.stdout,
                    style::SetForegroundColor(to_color(cell.color)),
                    style::Print(cell.glyph),
                    style::Print(filler)
                )?;
            }

            queue!(self.stdout, style::SetForegroundColor(BORDER_COLOR), style::Print('|'))?;
        }

        queue!(self.stdout, style::ResetColor)?;
        self.flush()
    }

    pub fn show_message(&mut self, lines: &[String]) -> Result<()> {
        let msg_height = (lines.len() + 2) as u16;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 4) as u16;
        let center = (self.width / 2, self.height / 2);
        let top_left = (
            center.0.saturating_sub(msg_width / 2),
            center.1.saturating_sub(msg_height / 2),
        );

        queue!(self.stdout, style::ResetColor)?;

        let blank = " ".repeat(msg_width as usize);
        for y in [top_left.1, top_left.1 + msg_height - 1].iter() {
            queue!(self.stdout, cursor::MoveTo(top_left.0, *y), style::Print(&blank))?;
        }

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as u16 + 1;
            queue!(self.stdout, cursor::MoveTo(top_left.0, y), style::Print(padded_line))?;
        }

        self.flush()
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stdout.flush()?;
        Ok(())
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb { r: rgb.0, g: rgb.1, b: rgb.2 }
}
