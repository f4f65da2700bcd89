//! This module defines the `Tape`, a growable sequence of symbols that behaves as if it were
//! filled with blanks everywhere nothing has been written yet.
//!
//! Positions are signed. Cells are stored in a single vector together with an origin offset,
//! so the tape can grow to the left as well as to the right without renumbering positions.

use crate::types::Symbol;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: Vec<Symbol>,
    /// Number of cells stored to the left of position 0.
    origin: usize,
    blank: Symbol,
}

impl Tape {
    /// Creates an empty tape.
    pub fn new(blank: Symbol) -> Self {
        Self {
            cells: Vec::new(),
            origin: 0,
            blank,
        }
    }

    /// Creates a tape whose cells, starting at position 0, are the given symbols.
    pub fn from_symbols<I>(symbols: I, blank: Symbol) -> Self
    where
        I: IntoIterator<Item = Symbol>,
    {
        Self {
            cells: symbols.into_iter().collect(),
            origin: 0,
            blank,
        }
    }

    /// Creates a tape from an input string, one symbol per character.
    pub fn from_input(input: &str, blank: Symbol) -> Self {
        Self::from_symbols(input.chars(), blank)
    }

    /// Maps a tape position to an index into `cells`, if that cell exists.
    fn index(&self, position: i64) -> Option<usize> {
        let index = position.checked_add(self.origin as i64)?;
        usize::try_from(index)
            .ok()
            .filter(|&index| index < self.cells.len())
    }

    /// Returns the symbol at `position`, or the blank symbol if nothing was ever stored there.
    pub fn read(&self, position: i64) -> Symbol {
        self.index(position)
            .map_or(self.blank, |index| self.cells[index])
    }

    /// Writes `symbol` at `position`, growing the tape with blanks as needed.
    pub fn write(&mut self, position: i64, symbol: Symbol) {
        if position < self.leftmost() {
            let missing = (self.leftmost() - position) as usize;
            self.cells
                .splice(0..0, std::iter::repeat(self.blank).take(missing));
            self.origin += missing;
        } else if position > self.rightmost() {
            let len = (position + self.origin as i64 + 1) as usize;
            self.cells.resize(len, self.blank);
        }

        let index = (position + self.origin as i64) as usize;
        self.cells[index] = symbol;
    }

    /// Returns the stored cells, leftmost first.
    pub fn render(&self) -> &[Symbol] {
        &self.cells
    }

    /// Number of stored cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Position of the first stored cell. Zero unless the tape grew to the left.
    pub fn leftmost(&self) -> i64 {
        -(self.origin as i64)
    }

    /// Position of the last stored cell (`leftmost() - 1` for an empty tape).
    pub fn rightmost(&self) -> i64 {
        self.leftmost() + self.cells.len() as i64 - 1
    }

    /// Returns the blank symbol of this tape.
    pub fn blank(&self) -> Symbol {
        self.blank
    }
}

impl fmt::Display for Tape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.cells.iter().try_for_each(|c| write!(f, "{}", c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_within_and_beyond_bounds() {
        let tape = Tape::from_input("101", '_');

        assert_eq!(tape.read(0), '1');
        assert_eq!(tape.read(1), '0');
        assert_eq!(tape.read(2), '1');
        assert_eq!(tape.read(3), '_');
        assert_eq!(tape.read(1000), '_');
        assert_eq!(tape.read(-1), '_');
        assert_eq!(tape.len(), 3);
    }

    #[test]
    fn test_write_in_place() {
        let mut tape = Tape::from_input("101", '_');
        tape.write(1, '1');

        assert_eq!(tape.to_string(), "111");
        assert_eq!(tape.len(), 3);
    }

    #[test]
    fn test_write_past_end_fills_with_blanks() {
        let mut tape = Tape::from_input("ab", '_');
        tape.write(5, 'z');

        assert_eq!(tape.len(), 6);
        assert_eq!(tape.render(), &['a', 'b', '_', '_', '_', 'z']);
        assert_eq!(tape.rightmost(), 5);
    }

    #[test]
    fn test_write_on_empty_tape() {
        let mut tape = Tape::new('#');
        assert!(tape.is_empty());
        assert_eq!(tape.rightmost(), -1);

        tape.write(0, 'x');
        assert_eq!(tape.to_string(), "x");
        assert_eq!(tape.leftmost(), 0);
    }

    #[test]
    fn test_write_left_of_origin_grows_left() {
        let mut tape = Tape::from_input("ab", '_');
        tape.write(-3, 'z');

        assert_eq!(tape.to_string(), "z__ab");
        assert_eq!(tape.leftmost(), -3);
        assert_eq!(tape.read(-3), 'z');
        assert_eq!(tape.read(-2), '_');
        assert_eq!(tape.read(0), 'a');
        assert_eq!(tape.read(1), 'b');
        assert_eq!(tape.read(-4), '_');
    }

    #[test]
    fn test_render_does_not_mutate() {
        let tape = Tape::from_input("01", '_');
        let before = tape.clone();
        let _ = tape.render();
        let _ = tape.read(10);

        assert_eq!(tape, before);
    }
}
