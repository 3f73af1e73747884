//! The growable memory tape.

/// Number of cells a fresh tape starts with.
pub const INITIAL_CELLS: usize = 30_000;

/// The tape never grows beyond this many cells.
pub const MAX_CELLS: usize = 1_000_000;

/// Raised when moving right would need more than [`MAX_CELLS`] cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("memory limit exceeded ({limit} cells)")]
pub struct TapeError {
    pub limit: usize,
}

/// Byte cells plus a data pointer.
///
/// The tape starts at [`INITIAL_CELLS`] zeroed cells and doubles whenever the
/// pointer runs off the right end, up to [`MAX_CELLS`]. The left end is a
/// hard stop: moving left from cell 0 leaves the pointer where it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: Vec<u8>,
    pointer: usize,
}

impl Default for Tape {
    fn default() -> Self {
        Self::new()
    }
}

impl Tape {
    pub fn new() -> Self {
        Self {
            cells: vec![0; INITIAL_CELLS],
            pointer: 0,
        }
    }

    /// Back to [`INITIAL_CELLS`] zeroed cells with the pointer at 0.
    /// Any growth is discarded.
    pub fn reset(&mut self) {
        self.cells.clear();
        self.cells.resize(INITIAL_CELLS, 0);
        self.cells.shrink_to(INITIAL_CELLS);
        self.pointer = 0;
    }

    /// Advance the pointer, doubling the tape when it runs off the end.
    ///
    /// On failure the pointer stays on the last cell.
    pub fn move_right(&mut self) -> Result<(), TapeError> {
        let next = self.pointer + 1;
        if next >= self.cells.len() {
            if self.cells.len() >= MAX_CELLS {
                return Err(TapeError { limit: MAX_CELLS });
            }
            let grown = (self.cells.len() * 2).min(MAX_CELLS);
            self.cells.resize(grown, 0);
        }
        self.pointer = next;
        Ok(())
    }

    pub fn move_left(&mut self) {
        self.pointer = self.pointer.saturating_sub(1);
    }

    pub fn increment(&mut self) {
        let cell = &mut self.cells[self.pointer];
        *cell = cell.wrapping_add(1);
    }

    pub fn decrement(&mut self) {
        let cell = &mut self.cells[self.pointer];
        *cell = cell.wrapping_sub(1);
    }

    /// Value of the cell under the pointer.
    pub fn current(&self) -> u8 {
        self.cells[self.pointer]
    }

    pub fn set_current(&mut self, value: u8) {
        self.cells[self.pointer] = value;
    }

    pub fn pointer(&self) -> usize {
        self.pointer
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<u8> {
        self.cells.get(index).copied()
    }

    /// Up to `count` cells starting at `start`, clipped to the tape end.
    /// Returns `None` when `start` is past the end.
    pub fn window(&self, start: usize, count: usize) -> Option<&[u8]> {
        if start >= self.cells.len() {
            return None;
        }
        let end = start.saturating_add(count).min(self.cells.len());
        Some(&self.cells[start..end])
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_zeroed_at_initial_size() {
        let tape = Tape::new();
        assert_eq!(tape.len(), INITIAL_CELLS);
        assert_eq!(tape.pointer(), 0);
        assert!(tape.cells().iter().all(|&c| c == 0));
    }

    #[test]
    fn move_left_at_origin_is_a_no_op() {
        let mut tape = Tape::new();
        tape.move_left();
        tape.move_left();
        assert_eq!(tape.pointer(), 0);
    }

    #[test]
    fn cells_wrap_around() {
        let mut tape = Tape::new();
        tape.decrement();
        assert_eq!(tape.current(), 255);
        tape.increment();
        assert_eq!(tape.current(), 0);
    }

    #[test]
    fn running_off_the_end_doubles_and_keeps_contents() {
        let mut tape = Tape::new();
        tape.increment();
        for _ in 0..INITIAL_CELLS - 1 {
            tape.move_right().unwrap();
        }
        tape.set_current(7);
        assert_eq!(tape.len(), INITIAL_CELLS);

        tape.move_right().unwrap();
        assert_eq!(tape.len(), INITIAL_CELLS * 2);
        assert_eq!(tape.pointer(), INITIAL_CELLS);
        assert_eq!(tape.get(0), Some(1));
        assert_eq!(tape.get(INITIAL_CELLS - 1), Some(7));
        assert!(tape.cells()[INITIAL_CELLS..].iter().all(|&c| c == 0));
    }

    #[test]
    fn growth_stops_at_the_cap() {
        let mut tape = Tape::new();
        let mut sizes = vec![tape.len()];
        while tape.move_right().is_ok() {
            if *sizes.last().unwrap() != tape.len() {
                sizes.push(tape.len());
            }
        }
        assert_eq!(
            sizes,
            vec![30_000, 60_000, 120_000, 240_000, 480_000, 960_000, 1_000_000]
        );
        assert_eq!(tape.pointer(), MAX_CELLS - 1);
        assert_eq!(tape.move_right(), Err(TapeError { limit: MAX_CELLS }));
        assert_eq!(tape.pointer(), MAX_CELLS - 1);
    }

    #[test]
    fn reset_discards_growth() {
        let mut tape = Tape::new();
        for _ in 0..INITIAL_CELLS {
            tape.move_right().unwrap();
        }
        tape.increment();
        tape.reset();
        assert_eq!(tape, Tape::new());
    }

    #[test]
    fn window_clips_to_the_tape() {
        let mut tape = Tape::new();
        tape.increment();
        assert_eq!(tape.window(0, 3), Some(&[1, 0, 0][..]));
        assert_eq!(tape.window(INITIAL_CELLS - 2, 16).map(<[u8]>::len), Some(2));
        assert_eq!(tape.window(INITIAL_CELLS, 1), None);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn pointer_stays_in_bounds(moves in prop::collection::vec(any::<bool>(), 0..2048)) {
            let mut tape = Tape::new();
            for right in moves {
                if right {
                    tape.move_right().unwrap();
                } else {
                    tape.move_left();
                }
                prop_assert!(tape.pointer() < tape.len());
            }
        }

        #[test]
        fn increments_are_modulo_256(n in 0usize..1024) {
            let mut tape = Tape::new();
            for _ in 0..n {
                tape.increment();
            }
            prop_assert_eq!(tape.current() as usize, n % 256);
        }
    }
}
