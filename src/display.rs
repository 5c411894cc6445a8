use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor},
    terminal::{Clear, ClearType},
};

use crate::puzzle::{Puzzle, Unit};

pub fn terminal_color(unit: Unit) -> Color {
    match unit {
        Unit::Red => Color::Red,
        Unit::DarkRed => Color::DarkRed,
        Unit::Green => Color::Green,
        Unit::DarkGreen => Color::DarkGreen,
        Unit::Blue => Color::Blue,
        Unit::DarkBlue => Color::DarkBlue,
        Unit::Yellow => Color::Yellow,
        Unit::DarkYellow => Color::DarkYellow,
        Unit::Cyan => Color::Cyan,
        Unit::DarkCyan => Color::DarkCyan,
        Unit::Magenta => Color::Magenta,
        Unit::DarkMagenta => Color::DarkMagenta,
        Unit::Grey => Color::Grey,
        Unit::DarkGrey => Color::DarkGrey,
        Unit::White => Color::White,
    }
}

/// Draws the tubes side by side, top slot first, with 1-based tube numbers
/// under the base line.
pub fn render<W: Write>(puzzle: &Puzzle, out: &mut W) -> io::Result<()> {
    for level in (0..puzzle.capacity()).rev() {
        for tube in puzzle.tubes() {
            queue!(out, Print("|"))?;
            if let Some(&unit) = tube.get(level) {
                queue!(out, SetBackgroundColor(terminal_color(unit)))?;
            }
            queue!(out, Print("  "), ResetColor, Print("| "))?;
        }
        queue!(out, Print("\n"))?;
    }

    queue!(out, Print(" "))?;
    for _ in puzzle.tubes() {
        queue!(out, Print("--   "))?;
    }
    queue!(out, Print("\n"))?;

    for index in 1..=puzzle.tubes().len() {
        queue!(out, Print(format!("{:^4} ", index)))?;
    }
    queue!(out, Print("\n"))?;

    out.flush()
}

pub fn clear<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    out.flush()
}
