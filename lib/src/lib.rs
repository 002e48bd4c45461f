//! __Conway's Game of Life__ on a bounded grid, with a codec for patterns in
//! the [RLE](https://conwaylife.com/wiki/Rle) format.
//!
//! Each generation is evaluated in parallel by a fixed number of workers,
//! each computing the next state of a contiguous slice of the cells, and is
//! committed only after all of them are done.
//!
//! # Example
//!
//! ```rust
//! use lifegrid_lib::{rle, Config, InitState};
//!
//! let glider = rle::decode("#N Glider\nx = 3, y = 3\nbob$2bo$3o!").unwrap();
//!
//! let config = Config::new(8, 8).set_init(InitState::Dead).set_workers(2);
//! let mut grid = config.grid().unwrap();
//! grid.insert_pattern(&glider, 0, 0).unwrap();
//! grid.step(4);
//!
//! assert_eq!(grid.population(), 5);
//! assert_eq!(grid.is_alive(2, 3), Some(true));
//! ```

mod cells;
mod config;
mod error;
mod grid;
mod pattern;
pub mod rle;
pub mod rule;

pub use cells::Coord;
pub use config::{Config, InitState};
pub use error::{Error, FormatError};
pub use grid::{partition, Grid};
pub use pattern::Pattern;
