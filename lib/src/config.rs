//! Grid configuration.

use crate::{error::Error, grid::Grid};
use educe::Educe;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How to choose the initial state of the cells.
#[derive(Clone, Copy, Debug, Educe, PartialEq, Eq)]
#[educe(Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InitState {
    /// Random.
    ///
    /// Each cell is independently alive with probability `1/2`.
    #[educe(Default)]
    Random,

    /// All cells are dead.
    Dead,
}

/// Grid configuration.
///
/// The grid will be generated from this configuration.
#[derive(Clone, Debug, Educe, PartialEq, Eq)]
#[educe(Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Width, in cells.
    #[educe(Default = 150)]
    pub width: usize,

    /// Height, in cells.
    #[educe(Default = 150)]
    pub height: usize,

    /// Side length of a cell on the screen, in pixels.
    ///
    /// Only used to translate between screen and grid coordinates.
    #[educe(Default = 6)]
    pub cell_size: usize,

    /// Horizontal offset of the grid on the screen, in cells.
    ///
    /// Reserves room for things drawn to the left of the grid.
    pub x_offset: usize,

    /// Vertical offset of the grid on the screen, in cells.
    ///
    /// Reserves room for things drawn above the grid, e.g. a menu bar.
    pub y_offset: usize,

    /// Number of workers evaluating a generation in parallel.
    #[educe(Default = 2)]
    pub workers: usize,

    /// How to choose the initial state of the cells.
    pub init: InitState,

    /// Seed for the random initial state.
    ///
    /// `None` means that the seed is taken from the thread-local generator.
    pub seed: Option<u64>,
}

impl Config {
    /// Sets up a new configuration with given size.
    pub fn new(width: usize, height: usize) -> Self {
        Config {
            width,
            height,
            ..Config::default()
        }
    }

    /// Sets the side length of a cell on the screen.
    pub fn set_cell_size(mut self, cell_size: usize) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Sets the offsets `(x_offset, y_offset)` of the grid on the screen.
    pub fn set_offset(mut self, x_offset: usize, y_offset: usize) -> Self {
        self.x_offset = x_offset;
        self.y_offset = y_offset;
        self
    }

    /// Sets the number of workers.
    pub fn set_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Sets how to choose the initial state of the cells.
    pub fn set_init(mut self, init: InitState) -> Self {
        self.init = init;
        self
    }

    /// Sets the seed for the random initial state.
    pub fn set_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of cells in the grid.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// Whether the grid would have no cells.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks that all sizes are positive.
    pub fn validate(&self) -> Result<(), Error> {
        if self.width == 0 || self.height == 0 || self.cell_size == 0 || self.workers == 0 {
            Err(Error::NonPositiveError)
        } else {
            Ok(())
        }
    }

    /// Creates a new grid from the configuration.
    /// Returns an error if some size is zero.
    pub fn grid(&self) -> Result<Grid, Error> {
        Grid::new(self)
    }
}
