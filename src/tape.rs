use std::num::NonZeroUsize;

use crate::error::BrainfuckError;

/// A fixed-length ring of byte cells with a single data pointer.
///
/// Moving off either end wraps to the other; cell arithmetic wraps modulo 256.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: Vec<u8>,
    pointer: usize,
}

impl Tape {
    /// Allocate `len` zeroed cells, reporting allocation failure instead of aborting.
    pub fn new(len: NonZeroUsize) -> Result<Self, BrainfuckError> {
        let len = len.get();
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|source| BrainfuckError::AllocationFailure {
                what: "cells",
                len,
                source,
            })?;
        cells.resize(len, 0);
        Ok(Self { cells, pointer: 0 })
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn pointer(&self) -> usize {
        self.pointer
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub fn get(&self) -> u8 {
        self.cells[self.pointer]
    }

    pub fn set(&mut self, value: u8) {
        self.cells[self.pointer] = value;
    }

    pub fn move_right(&mut self) {
        self.pointer += 1;
        if self.pointer == self.cells.len() {
            self.pointer = 0;
        }
    }

    pub fn move_left(&mut self) {
        self.pointer = match self.pointer {
            0 => self.cells.len() - 1,
            p => p - 1,
        };
    }

    pub fn increment(&mut self) {
        let cell = &mut self.cells[self.pointer];
        *cell = cell.wrapping_add(1);
    }

    pub fn decrement(&mut self) {
        let cell = &mut self.cells[self.pointer];
        *cell = cell.wrapping_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tape(len: usize) -> Tape {
        Tape::new(NonZeroUsize::new(len).unwrap()).unwrap()
    }

    #[test]
    fn starts_zeroed_at_cell_zero() {
        let t = tape(5);
        assert_eq!(t.len(), 5);
        assert_eq!(t.pointer(), 0);
        assert!(t.cells().iter().all(|&c| c == 0));
    }

    #[test]
    fn right_past_last_cell_wraps_to_first() {
        for len in 1..=8 {
            let mut t = tape(len);
            for _ in 0..len - 1 {
                t.move_right();
            }
            assert_eq!(t.pointer(), len - 1);
            t.move_right();
            assert_eq!(t.pointer(), 0, "tape of length {len}");
        }
    }

    #[test]
    fn left_past_first_cell_wraps_to_last() {
        for len in 1..=8 {
            let mut t = tape(len);
            t.move_left();
            assert_eq!(t.pointer(), len - 1, "tape of length {len}");
        }
    }

    #[test]
    fn increment_wraps_to_zero() {
        let mut t = tape(1);
        t.set(255);
        t.increment();
        assert_eq!(t.get(), 0);
    }

    #[test]
    fn decrement_wraps_to_max() {
        let mut t = tape(1);
        t.decrement();
        assert_eq!(t.get(), 255);
    }

    #[test]
    fn huge_tape_reports_allocation_failure() {
        let err = Tape::new(NonZeroUsize::new(usize::MAX).unwrap()).unwrap_err();
        assert!(matches!(
            err,
            BrainfuckError::AllocationFailure { what: "cells", len: usize::MAX, .. }
        ));
    }
}
