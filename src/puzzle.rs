use std::fmt;

use crate::error::PuzzleError;

/// One colored unit of liquid. Only equality matters to the solver; the
/// variants follow the terminal palette so the binary can draw them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Red,
    DarkRed,
    Green,
    DarkGreen,
    Blue,
    DarkBlue,
    Yellow,
    DarkYellow,
    Cyan,
    DarkCyan,
    Magenta,
    DarkMagenta,
    Grey,
    DarkGrey,
    White,
}

impl Unit {
    pub const PALETTE: [Unit; 15] = [
        Unit::Red,
        Unit::DarkRed,
        Unit::Green,
        Unit::DarkGreen,
        Unit::Blue,
        Unit::DarkBlue,
        Unit::Yellow,
        Unit::DarkYellow,
        Unit::Cyan,
        Unit::DarkCyan,
        Unit::Magenta,
        Unit::DarkMagenta,
        Unit::Grey,
        Unit::DarkGrey,
        Unit::White,
    ];

    /// Single character used by the text format and by canonical keys.
    /// Bright colors are uppercase, their dark variants lowercase.
    pub fn code(&self) -> char {
        match self {
            Unit::Red => 'R',
            Unit::DarkRed => 'r',
            Unit::Green => 'G',
            Unit::DarkGreen => 'g',
            Unit::Blue => 'B',
            Unit::DarkBlue => 'b',
            Unit::Yellow => 'Y',
            Unit::DarkYellow => 'y',
            Unit::Cyan => 'C',
            Unit::DarkCyan => 'c',
            Unit::Magenta => 'M',
            Unit::DarkMagenta => 'm',
            Unit::Grey => 'S',
            Unit::DarkGrey => 's',
            Unit::White => 'W',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        Self::PALETTE.into_iter().find(|unit| unit.code() == code)
    }
}

/// A pour from tube `from` into tube `to`, both zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: usize,
    pub to: usize,
}

impl Move {
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.from + 1, self.to + 1)
    }
}

/// A full tube configuration. Tubes are stored bottom to top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    capacity: usize,
    tubes: Vec<Vec<Unit>>,
}

impl Puzzle {
    pub const DEFAULT_CAPACITY: usize = 4;

    /// Builds a puzzle, checking that no tube is overfull and that every
    /// color present appears exactly `capacity` times.
    pub fn new(capacity: usize, tubes: Vec<Vec<Unit>>) -> Result<Self, PuzzleError> {
        if capacity == 0 {
            return Err(PuzzleError::ZeroCapacity);
        }
        if tubes.is_empty() {
            return Err(PuzzleError::EmptyPuzzle);
        }
        if let Some((tube, units)) = tubes
            .iter()
            .enumerate()
            .find(|(_, units)| units.len() > capacity)
        {
            return Err(PuzzleError::Overfull {
                tube,
                len: units.len(),
                capacity,
            });
        }

        let puzzle = Self { capacity, tubes };
        for unit in Unit::PALETTE {
            let count = puzzle.count_of(unit);
            if count != 0 && count != capacity {
                return Err(PuzzleError::UnbalancedColor {
                    unit,
                    count,
                    capacity,
                });
            }
        }

        Ok(puzzle)
    }

    /// Reads one tube per line, bottom unit first. A line holding only `-`
    /// is an empty tube; blank lines and `#` comments are skipped.
    pub fn parse(text: &str, capacity: usize) -> Result<Self, PuzzleError> {
        let mut tubes = Vec::new();

        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if line == "-" {
                tubes.push(Vec::new());
                continue;
            }

            let tube = line
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(|code| {
                    Unit::from_code(code).ok_or(PuzzleError::UnknownUnit {
                        line: index + 1,
                        code,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            tubes.push(tube);
        }

        Self::new(capacity, tubes)
    }

    /// The 14 tube, 12 color puzzle the binary solves by default.
    pub fn sample() -> Self {
        use Unit::*;

        let tubes = vec![
            vec![Magenta, Blue, DarkBlue, Green],
            vec![Magenta, Grey, DarkGreen, Red],
            vec![DarkYellow, Grey, Cyan, DarkCyan],
            vec![DarkRed, DarkGreen, DarkCyan, Blue],
            vec![DarkRed, Cyan, DarkBlue, DarkBlue],
            vec![Red, Grey, Yellow, DarkYellow],
            vec![Magenta, Green, Blue, DarkCyan],
            vec![Red, DarkRed, Grey, DarkGreen],
            vec![Cyan, Yellow, DarkBlue, Red],
            vec![DarkRed, DarkYellow, DarkGreen, Green],
            vec![Green, Cyan, Blue, Yellow],
            vec![DarkCyan, DarkYellow, Magenta, Yellow],
            vec![],
            vec![],
        ];

        Self {
            capacity: Self::DEFAULT_CAPACITY,
            tubes,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn tubes(&self) -> &[Vec<Unit>] {
        &self.tubes
    }

    pub fn count_of(&self, unit: Unit) -> usize {
        self.tubes.iter().flatten().filter(|&&u| u == unit).count()
    }

    pub fn is_complete(&self) -> bool {
        self.tubes
            .iter()
            .all(|tube| tube.is_empty() || (tube.len() == self.capacity && is_uniform(tube)))
    }

    pub fn is_legal(&self, movement: Move) -> bool {
        if movement.from == movement.to {
            return false;
        }
        let (Some(source), Some(dest)) =
            (self.tubes.get(movement.from), self.tubes.get(movement.to))
        else {
            return false;
        };
        let Some(&top) = source.last() else {
            return false;
        };
        if dest.len() >= self.capacity {
            return false;
        }

        match dest.last() {
            // Pouring a single-color tube into an empty one goes nowhere
            None => !is_uniform(source),
            Some(&dest_top) => dest_top == top,
        }
    }

    /// Every legal move, source-major then destination ascending.
    pub fn legal_moves(&self) -> Vec<Move> {
        let count = self.tubes.len();
        (0..count)
            .flat_map(|from| (0..count).map(move |to| Move::new(from, to)))
            .filter(|&movement| self.is_legal(movement))
            .collect()
    }

    /// Pours the top run of the source tube into the destination, as much as
    /// fits. Illegal moves are rejected and leave the puzzle unchanged.
    pub fn apply_move(&mut self, movement: Move) -> Result<(), PuzzleError> {
        if !self.is_legal(movement) {
            return Err(PuzzleError::InvalidMove(movement));
        }

        let free = self.capacity - self.tubes[movement.to].len();
        let source = &mut self.tubes[movement.from];
        let count = top_run(source).min(free);
        let poured = source.split_off(source.len() - count);
        self.tubes[movement.to].extend(poured);

        Ok(())
    }

    pub fn try_move(&self, movement: Move) -> Result<Self, PuzzleError> {
        let mut new_puzzle = self.clone();
        new_puzzle.apply_move(movement)?;
        Ok(new_puzzle)
    }

    /// Key identifying this exact configuration: unit codes per tube, each
    /// tube terminated by a newline.
    pub fn canonical_key(&self) -> String {
        let mut key = String::with_capacity(self.tubes.len() * (self.capacity + 1));
        for tube in &self.tubes {
            key.extend(tube.iter().map(Unit::code));
            key.push('\n');
        }
        key
    }

    /// Applies `moves` in order and returns the configuration after each one.
    pub fn replay(&self, moves: &[Move]) -> Result<Vec<Self>, PuzzleError> {
        let mut states = Vec::with_capacity(moves.len());
        let mut current = self.clone();
        for &movement in moves {
            current.apply_move(movement)?;
            states.push(current.clone());
        }
        Ok(states)
    }
}

fn is_uniform(tube: &[Unit]) -> bool {
    match tube.first() {
        Some(&first) => tube.iter().all(|&unit| unit == first),
        None => false,
    }
}

/// Length of the single-color run at the top of the tube.
fn top_run(tube: &[Unit]) -> usize {
    match tube.last() {
        Some(&top) => tube.iter().rev().take_while(|&&unit| unit == top).count(),
        None => 0,
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for tube in &self.tubes {
            if tube.is_empty() {
                write!(f, "-")?;
            }
            for unit in tube {
                write!(f, "{}", unit.code())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
