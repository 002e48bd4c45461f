//! Cells in the grid.

use crate::rule;
use std::{
    fmt::{Debug, Error, Formatter},
    sync::atomic::{AtomicBool, Ordering},
};

/// The coordinates of a cell.
///
/// `(x-coordinate, y-coordinate)`, both 0-indexed.
pub type Coord = (usize, usize);

/// A cell in the grid.
///
/// The name `LifeCell` is chosen to avoid ambiguity with
/// [`std::cell::Cell`].
///
/// Both states are atomics so that a shared reference to the grid can be
/// handed to several workers at once. Each worker only stores into the
/// [`next_alive`](#structfield.next_alive) of cells in its own partition,
/// and only loads [`alive`](#structfield.alive), which no worker stores into.
pub(crate) struct LifeCell {
    /// The coordinates of the cell.
    pub(crate) coord: Coord,

    /// The state of the cell in the current generation.
    pub(crate) alive: AtomicBool,

    /// The state of the cell in the pending generation.
    pub(crate) next_alive: AtomicBool,

    /// Indices of the cells in the Moore neighborhood.
    ///
    /// Cells on the edges of the grid have fewer than eight neighbors.
    /// Never changes after the grid is built.
    pub(crate) nbhd: Vec<usize>,
}

impl LifeCell {
    /// Creates a cell with the given state and no neighbors.
    ///
    /// The neighbors are linked by the grid once all cells exist.
    #[inline]
    pub(crate) fn new(coord: Coord, alive: bool) -> Self {
        Self {
            coord,
            alive: AtomicBool::new(alive),
            next_alive: AtomicBool::new(alive),
            nbhd: Vec::with_capacity(8),
        }
    }

    /// Whether the cell is alive in the current generation.
    #[inline]
    pub(crate) fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Relaxed)
    }

    /// Computes the pending state of the cell from the current states of
    /// its neighbors.
    ///
    /// Only [`next_alive`](#structfield.next_alive) of this cell is written.
    #[inline]
    pub(crate) fn calculate(&self, cells: &[LifeCell]) {
        let live_neighbors = self
            .nbhd
            .iter()
            .filter(|&&i| cells[i].is_alive())
            .count();
        let next = rule::successor(self.is_alive(), live_neighbors);
        self.next_alive.store(next, Ordering::Relaxed);
    }

    /// Copies the pending state into the current state.
    #[inline]
    pub(crate) fn commit(&mut self) {
        *self.alive.get_mut() = *self.next_alive.get_mut();
    }

    /// Sets both the current and the pending state.
    #[inline]
    pub(crate) fn set(&mut self, alive: bool) {
        *self.alive.get_mut() = alive;
        *self.next_alive.get_mut() = alive;
    }
}

impl Debug for LifeCell {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        f.debug_struct("LifeCell")
            .field("coord", &self.coord)
            .field("alive", &self.alive.load(Ordering::Relaxed))
            .field("next_alive", &self.next_alive.load(Ordering::Relaxed))
            .finish()
    }
}
