//! The grid.

use crate::{
    cells::{Coord, LifeCell},
    config::{Config, InitState},
    error::Error,
    pattern::Pattern,
};
use log::{debug, trace};
use rand::{rngs::StdRng, thread_rng, Rng, SeedableRng};
use rayon::{prelude::*, ThreadPool, ThreadPoolBuilder};
use std::ops::Range;

/// The index range of the cells evaluated by one worker.
///
/// The `len` cells are split into `worker_count` contiguous slices of
/// `len / worker_count` cells each, in index order. The remaining
/// `len % worker_count` cells go to the last worker, so the slices of all
/// workers cover `0..len` exactly once.
///
/// # Panics
///
/// Panics if `worker_count` is zero or `worker_index >= worker_count`.
pub fn partition(len: usize, worker_index: usize, worker_count: usize) -> Range<usize> {
    assert!(worker_count > 0, "there must be at least one worker");
    assert!(
        worker_index < worker_count,
        "worker {} does not exist among {} workers",
        worker_index,
        worker_count
    );
    let chunk = len / worker_count;
    let start = worker_index * chunk;
    let end = if worker_index == worker_count - 1 {
        len
    } else {
        start + chunk
    };
    start..end
}

/// The grid.
///
/// A bounded `width × height` grid of cells. There is no wraparound:
/// cells on the edges have fewer neighbors.
pub struct Grid {
    /// Grid configuration.
    config: Config,

    /// All the cells, the cell at `(x, y)` being at index `x * height + y`.
    ///
    /// The length never changes after the grid is built.
    cells: Box<[LifeCell]>,

    /// The workers that evaluate a generation.
    pool: ThreadPool,

    /// Number of generations committed since the grid was built.
    generation: u64,
}

impl Grid {
    /// Creates a new grid from the configuration.
    ///
    /// If the configuration asks for a random initial state,
    /// the cells are seeded from [`Config::seed`], or from the thread-local
    /// generator if there is no seed.
    pub fn new(config: &Config) -> Result<Self, Error> {
        match config.seed {
            Some(seed) => Grid::with_rng(config, &mut StdRng::seed_from_u64(seed)),
            None => Grid::with_rng(config, &mut thread_rng()),
        }
    }

    /// Creates a new grid from the configuration,
    /// using the given generator for the random initial state.
    pub fn with_rng<R: Rng>(config: &Config, rng: &mut R) -> Result<Self, Error> {
        config.validate()?;

        let pool = ThreadPoolBuilder::new()
            .num_threads(config.workers)
            .thread_name(|i| format!("lifegrid-worker-{}", i))
            .build()?;

        let mut cells = Vec::with_capacity(config.len());
        for x in 0..config.width {
            for y in 0..config.height {
                let alive = match config.init {
                    InitState::Random => rng.gen(),
                    InitState::Dead => false,
                };
                cells.push(LifeCell::new((x, y), alive));
            }
        }

        debug!(
            "Building a {}x{} grid with {} workers",
            config.width, config.height, config.workers
        );

        Ok(Grid {
            config: config.clone(),
            cells: cells.into_boxed_slice(),
            pool,
            generation: 0,
        }
        .init_nbhd())
    }

    /// Links the cells to their neighbors.
    ///
    /// Neighbors outside the grid are simply left out.
    fn init_nbhd(mut self) -> Self {
        const NBHD: [(isize, isize); 8] = [
            (-1, -1),
            (-1, 0),
            (-1, 1),
            (0, -1),
            (0, 1),
            (1, -1),
            (1, 0),
            (1, 1),
        ];
        for index in 0..self.cells.len() {
            let (x, y) = self.cells[index].coord;
            let nbhd = NBHD
                .iter()
                .filter_map(|&(dx, dy)| {
                    let coord = (x.checked_add_signed(dx)?, y.checked_add_signed(dy)?);
                    self.find_index(coord)
                })
                .collect();
            self.cells[index].nbhd = nbhd;
        }
        self
    }

    /// Finds the index of a cell by its coordinates.
    fn find_index(&self, coord: Coord) -> Option<usize> {
        let (x, y) = coord;
        if x < self.config.width && y < self.config.height {
            Some(x * self.config.height + y)
        } else {
            None
        }
    }

    /// Finds the index of a cell by its coordinates,
    /// or returns an [`Error::OutOfBounds`].
    fn index_or_err(&self, coord: Coord) -> Result<usize, Error> {
        self.find_index(coord).ok_or(Error::OutOfBounds {
            coord,
            width: self.config.width,
            height: self.config.height,
        })
    }

    /// Computes the next state of the cells in the partition of one worker.
    ///
    /// Only reads the current states, and only writes the next states of
    /// the cells in [`partition`]`(width * height, worker_index, worker_count)`.
    /// Several workers with the same `worker_count` can run this
    /// at the same time.
    ///
    /// # Panics
    ///
    /// Panics if `worker_count` is zero or `worker_index >= worker_count`.
    pub fn calculate_neighbors(&self, worker_index: usize, worker_count: usize) {
        let range = partition(self.cells.len(), worker_index, worker_count);
        for cell in &self.cells[range] {
            cell.calculate(&self.cells);
        }
    }

    /// Runs [`calculate_neighbors`](Self::calculate_neighbors) on all workers
    /// and waits for all of them to finish.
    ///
    /// A panic in a worker is resumed here once the other workers are done.
    fn calculate_all(&self) {
        let workers = self.config.workers;
        self.pool.scope(|s| {
            for worker_index in 0..workers {
                s.spawn(move |_| self.calculate_neighbors(worker_index, workers));
            }
        });
    }

    /// Copies the next state of every cell into its current state.
    fn commit(&mut self) {
        let cells: &mut [LifeCell] = &mut self.cells;
        self.pool
            .install(|| cells.par_iter_mut().for_each(LifeCell::commit));
        self.generation += 1;
        trace!("Generation {}", self.generation);
    }

    /// Commits the next state computed by
    /// [`calculate_neighbors`](Self::calculate_neighbors),
    /// and returns the new states of all cells as `(x, y, alive)`.
    pub fn evolve(&mut self) -> impl Iterator<Item = (usize, usize, bool)> + '_ {
        self.commit();
        self.cells()
    }

    /// Advances the grid by one generation.
    ///
    /// The next states are computed by all workers in parallel,
    /// and committed after every worker has finished.
    pub fn advance_generation(&mut self) {
        self.calculate_all();
        self.commit();
    }

    /// Advances the grid by `n` generations.
    pub fn step(&mut self, n: u64) {
        for _ in 0..n {
            self.advance_generation();
        }
    }

    /// Copies a pattern into the grid, with its top-left corner at `(x, y)`.
    ///
    /// The row `i` and column `j` of the pattern go to the cell
    /// at `(x + j, y + i)`. Returns an error and leaves the grid untouched
    /// if the pattern does not fit.
    pub fn insert_pattern(&mut self, pattern: &Pattern, x: usize, y: usize) -> Result<(), Error> {
        let (rows, cols) = (pattern.rows(), pattern.cols());
        let fits = |start: usize, len: usize, bound: usize| {
            start.checked_add(len).map_or(false, |end| end <= bound)
        };
        if !fits(x, cols, self.config.width) || !fits(y, rows, self.config.height) {
            return Err(Error::PatternOutOfBounds {
                coord: (x, y),
                cols,
                rows,
                width: self.config.width,
                height: self.config.height,
            });
        }
        for i in 0..rows {
            for j in 0..cols {
                let index = (x + j) * self.config.height + y + i;
                self.cells[index].set(pattern.at(i, j));
            }
        }
        debug!("Inserted {:?} at {:?}", pattern.name(), (x, y));
        Ok(())
    }

    /// Sets the state of a cell.
    pub fn set_cell(&mut self, x: usize, y: usize, alive: bool) -> Result<(), Error> {
        let index = self.index_or_err((x, y))?;
        self.cells[index].set(alive);
        Ok(())
    }

    /// Makes a cell alive.
    pub fn revive_cell(&mut self, x: usize, y: usize) -> Result<(), Error> {
        self.set_cell(x, y, true)
    }

    /// Kills all cells.
    pub fn clear(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.set(false);
        }
    }

    /// Gives every cell a random state.
    pub fn randomize<R: Rng>(&mut self, rng: &mut R) {
        for cell in self.cells.iter_mut() {
            cell.set(rng.gen());
        }
    }

    /// Replaces the grid by a new one built from the same configuration.
    pub fn reload(&mut self) -> Result<(), Error> {
        *self = Grid::new(&self.config)?;
        Ok(())
    }

    /// Grid configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Width, in cells.
    pub fn width(&self) -> usize {
        self.config.width
    }

    /// Height, in cells.
    pub fn height(&self) -> usize {
        self.config.height
    }

    /// Number of generations committed since the grid was built.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the cell at `(x, y)` is alive.
    /// Returns `None` if there is no such cell.
    pub fn is_alive(&self, x: usize, y: usize) -> Option<bool> {
        self.find_index((x, y)).map(|i| self.cells[i].is_alive())
    }

    /// The coordinates of the neighbors of the cell at `(x, y)`.
    /// Returns `None` if there is no such cell.
    pub fn neighbors(&self, x: usize, y: usize) -> Option<Vec<Coord>> {
        self.find_index((x, y))
            .map(|i| self.cells[i].nbhd.iter().map(|&n| self.cells[n].coord).collect())
    }

    /// The states of all cells as `(x, y, alive)`, column by column.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, bool)> + '_ {
        self.cells.iter().map(|c| (c.coord.0, c.coord.1, c.is_alive()))
    }

    /// Number of living cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// The cell under a point on the screen, in pixels.
    ///
    /// Returns `None` if the point is not on the grid.
    pub fn screen_to_cell(&self, px: usize, py: usize) -> Option<Coord> {
        let x = (px / self.config.cell_size).checked_sub(self.config.x_offset)?;
        let y = (py / self.config.cell_size).checked_sub(self.config.y_offset)?;
        self.find_index((x, y)).map(|_| (x, y))
    }

    /// The top-left corner of a cell on the screen, in pixels.
    pub fn cell_to_screen(&self, x: usize, y: usize) -> (usize, usize) {
        (
            (x + self.config.x_offset) * self.config.cell_size,
            (y + self.config.y_offset) * self.config.cell_size,
        )
    }

    /// Displays the grid in
    /// [Plaintext](https://conwaylife.com/wiki/Plaintext) format.
    ///
    /// * **Dead** cells are represented by `.`;
    /// * **Living** cells are represented by `o`.
    pub fn plaintext(&self) -> String {
        let mut str = String::with_capacity((self.config.width + 1) * self.config.height);
        for y in 0..self.config.height {
            for x in 0..self.config.width {
                let cell = &self.cells[x * self.config.height + y];
                str.push(if cell.is_alive() { 'o' } else { '.' });
            }
            str.push('\n');
        }
        str
    }

    /// Copies the whole grid into a pattern, one row per `y`.
    pub fn to_pattern<S: ToString>(&self, name: S) -> Pattern {
        let layout = (0..self.config.height)
            .map(|y| {
                (0..self.config.width)
                    .map(|x| self.cells[x * self.config.height + y].is_alive())
                    .collect()
            })
            .collect();
        Pattern::from_rows(name, layout)
    }
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grid")
            .field("config", &self.config)
            .field("generation", &self.generation)
            .field("population", &self.population())
            .finish()
    }
}
