use lifegrid_lib::{partition, rule, Config, Error as GridError, Grid, InitState, Pattern};
use std::error::Error;

/// The states of a grid as `states[x][y]`.
fn snapshot(grid: &Grid) -> Vec<Vec<bool>> {
    let mut states = vec![vec![false; grid.height()]; grid.width()];
    for (x, y, alive) in grid.cells() {
        states[x][y] = alive;
    }
    states
}

/// The next generation of `states`, computed cell by cell on one thread.
fn next_generation(states: &[Vec<bool>]) -> Vec<Vec<bool>> {
    let width = states.len() as isize;
    let height = states[0].len() as isize;
    let mut next = states.to_vec();
    for x in 0..width {
        for y in 0..height {
            let mut count = 0;
            for dx in -1..=1 {
                for dy in -1..=1 {
                    let (nx, ny) = (x + dx, y + dy);
                    if (dx, dy) != (0, 0)
                        && (0..width).contains(&nx)
                        && (0..height).contains(&ny)
                        && states[nx as usize][ny as usize]
                    {
                        count += 1;
                    }
                }
            }
            next[x as usize][y as usize] = rule::successor(states[x as usize][y as usize], count);
        }
    }
    next
}

/// The rows of a grid, `1` for living cells.
fn rows(grid: &Grid) -> Vec<Vec<u8>> {
    (0..grid.height())
        .map(|y| {
            (0..grid.width())
                .map(|x| grid.is_alive(x, y).unwrap() as u8)
                .collect()
        })
        .collect()
}

#[test]
fn rule_table() {
    for k in 0..=8 {
        assert_eq!(rule::successor(true, k), k == 2 || k == 3, "alive, {}", k);
        assert_eq!(rule::successor(false, k), k == 3, "dead, {}", k);
    }
}

#[test]
fn classic_rule_string() {
    assert!(rule::is_classic("B3/S23"));
    assert!(!rule::is_classic("B36/S23"));
    assert!(!rule::is_classic("not a rule"));
}

#[test]
fn neighbors() -> Result<(), Box<dyn Error>> {
    let grid = Config::new(5, 4).set_seed(1).grid()?;
    for x in 0..5 {
        for y in 0..4 {
            let nbhd = grid.neighbors(x, y).unwrap();
            let on_x_edge = x == 0 || x == 4;
            let on_y_edge = y == 0 || y == 3;
            let expected = match (on_x_edge, on_y_edge) {
                (true, true) => 3,
                (true, false) | (false, true) => 5,
                (false, false) => 8,
            };
            assert_eq!(nbhd.len(), expected, "{:?}", (x, y));
            for &(nx, ny) in &nbhd {
                assert_ne!((nx, ny), (x, y));
                assert!(nx < 5 && ny < 4);
                assert!(nx.abs_diff(x) <= 1 && ny.abs_diff(y) <= 1);
                assert!(grid.neighbors(nx, ny).unwrap().contains(&(x, y)));
            }
        }
    }
    assert_eq!(grid.neighbors(5, 0), None);
    Ok(())
}

#[test]
fn partition_covers_everything() {
    for len in [0, 1, 7, 9, 100, 22_500] {
        for count in 1..=6 {
            let ranges: Vec<_> = (0..count).map(|i| partition(len, i, count)).collect();
            let chunk = len / count;
            assert_eq!(ranges[0].start, 0);
            for (i, range) in ranges.iter().enumerate() {
                assert_eq!(range.start, i * chunk);
                if i + 1 < count {
                    assert_eq!(range.end, (i + 1) * chunk);
                    assert_eq!(range.end, ranges[i + 1].start);
                }
            }
            // The remainder goes to the last worker instead of being skipped.
            let last = ranges.last().unwrap();
            assert_eq!(last.end, len);
            assert_eq!(last.len(), chunk + len % count);
        }
    }
}

#[test]
#[should_panic]
fn partition_out_of_range() {
    partition(10, 3, 3);
}

#[test]
#[should_panic]
fn partition_no_workers() {
    partition(10, 0, 0);
}

#[test]
fn glider_3x3() -> Result<(), Box<dyn Error>> {
    let mut grid = Config::new(3, 3).set_init(InitState::Dead).grid()?;
    grid.insert_pattern(&Pattern::glider(), 0, 0)?;
    assert_eq!(rows(&grid), vec![vec![0, 1, 0], vec![0, 0, 1], vec![1, 1, 1]]);

    let workers = grid.config().workers;
    for i in 0..workers {
        grid.calculate_neighbors(i, workers);
    }
    let states: Vec<_> = grid.evolve().collect();
    assert_eq!(states.len(), 9);
    assert_eq!(rows(&grid), vec![vec![0, 0, 0], vec![1, 0, 1], vec![0, 1, 1]]);
    assert_eq!(grid.generation(), 1);
    Ok(())
}

#[test]
fn glider_translates() -> Result<(), Box<dyn Error>> {
    let mut grid = Config::new(10, 10)
        .set_init(InitState::Dead)
        .set_workers(3)
        .grid()?;
    grid.insert_pattern(&Pattern::glider(), 2, 1)?;
    let before = grid.to_pattern("before");
    grid.step(4);
    assert_eq!(grid.population(), 5);
    for y in 0..9 {
        for x in 0..9 {
            assert_eq!(
                grid.is_alive(x + 1, y + 1),
                Some(before.at(y, x)),
                "{:?}",
                (x, y)
            );
        }
    }
    assert_eq!(grid.generation(), 4);
    Ok(())
}

#[test]
fn commit_uses_previous_generation() -> Result<(), Box<dyn Error>> {
    for workers in 1..=4 {
        let mut grid = Config::new(23, 17)
            .set_workers(workers)
            .set_seed(2024)
            .grid()?;
        for _ in 0..10 {
            let expected = next_generation(&snapshot(&grid));
            grid.advance_generation();
            assert_eq!(snapshot(&grid), expected, "{} workers", workers);
        }
    }
    Ok(())
}

#[test]
fn more_workers_than_cells() -> Result<(), Box<dyn Error>> {
    let mut grid = Config::new(1, 3)
        .set_init(InitState::Dead)
        .set_workers(5)
        .grid()?;
    let column = Pattern::from_bits("column", &[b"1", b"1", b"1"])?;
    grid.insert_pattern(&column, 0, 0)?;
    grid.advance_generation();
    assert_eq!(rows(&grid), vec![vec![0], vec![1], vec![0]]);
    Ok(())
}

#[test]
fn blinker() -> Result<(), Box<dyn Error>> {
    let mut grid = Config::new(5, 5)
        .set_init(InitState::Dead)
        .set_workers(4)
        .grid()?;
    for x in 1..4 {
        grid.revive_cell(x, 2)?;
    }
    let horizontal = grid.plaintext();
    assert_eq!(horizontal, ".....\n.....\n.ooo.\n.....\n.....\n");
    grid.advance_generation();
    assert_eq!(grid.plaintext(), ".....\n..o..\n..o..\n..o..\n.....\n");
    grid.advance_generation();
    assert_eq!(grid.plaintext(), horizontal);
    Ok(())
}

#[test]
fn out_of_bounds() -> Result<(), Box<dyn Error>> {
    let mut grid = Config::new(4, 3).set_init(InitState::Dead).grid()?;
    let glider = Pattern::glider();

    let result = grid.insert_pattern(&glider, 2, 0);
    assert!(matches!(
        result,
        Err(GridError::PatternOutOfBounds {
            coord: (2, 0),
            cols: 3,
            rows: 3,
            ..
        })
    ));
    assert!(grid.insert_pattern(&glider, 0, 1).is_err());
    assert!(grid.insert_pattern(&glider, usize::MAX, 0).is_err());
    assert_eq!(grid.population(), 0);

    grid.insert_pattern(&glider, 1, 0)?;
    assert_eq!(grid.population(), 5);

    assert!(matches!(
        grid.revive_cell(4, 0),
        Err(GridError::OutOfBounds {
            coord: (4, 0),
            width: 4,
            height: 3
        })
    ));
    assert!(grid.revive_cell(0, 3).is_err());
    assert_eq!(grid.is_alive(4, 0), None);
    Ok(())
}

#[test]
fn insert_overwrites_dead_cells() -> Result<(), Box<dyn Error>> {
    let mut grid = Config::new(3, 3).set_init(InitState::Dead).grid()?;
    for x in 0..3 {
        for y in 0..3 {
            grid.revive_cell(x, y)?;
        }
    }
    grid.insert_pattern(&Pattern::glider(), 0, 0)?;
    assert_eq!(rows(&grid), vec![vec![0, 1, 0], vec![0, 0, 1], vec![1, 1, 1]]);
    Ok(())
}

#[test]
fn clear() -> Result<(), Box<dyn Error>> {
    let mut grid = Config::new(20, 20).set_seed(7).grid()?;
    assert!(grid.population() > 0);
    grid.clear();
    assert_eq!(grid.population(), 0);
    grid.advance_generation();
    assert_eq!(grid.population(), 0);
    Ok(())
}

#[test]
fn seeded_grids_agree() -> Result<(), Box<dyn Error>> {
    let config = Config::new(30, 12).set_seed(42);
    let mut a = config.grid()?;
    let mut b = config.grid()?;
    assert_eq!(a.plaintext(), b.plaintext());
    a.step(5);
    b.reload()?;
    b.step(5);
    assert_eq!(a.plaintext(), b.plaintext());
    Ok(())
}

#[test]
fn non_positive() {
    for config in [
        Config::new(0, 5),
        Config::new(5, 0),
        Config::new(5, 5).set_workers(0),
        Config::new(5, 5).set_cell_size(0),
    ] {
        assert!(matches!(config.grid(), Err(GridError::NonPositiveError)));
    }
}

#[test]
fn screen_coordinates() -> Result<(), Box<dyn Error>> {
    let grid = Config::new(10, 8)
        .set_cell_size(6)
        .set_offset(0, 2)
        .grid()?;
    assert_eq!(grid.screen_to_cell(0, 12), Some((0, 0)));
    assert_eq!(grid.screen_to_cell(17, 25), Some((2, 2)));
    assert_eq!(grid.screen_to_cell(5, 11), None);
    assert_eq!(grid.screen_to_cell(60, 12), None);
    assert_eq!(grid.screen_to_cell(59, 59), Some((9, 7)));
    assert_eq!(grid.cell_to_screen(2, 2), (12, 24));
    Ok(())
}

#[test]
fn to_pattern() -> Result<(), Box<dyn Error>> {
    let mut grid = Config::new(4, 2).set_init(InitState::Dead).grid()?;
    grid.revive_cell(3, 0)?;
    grid.revive_cell(1, 1)?;
    let pattern = grid.to_pattern("snapshot");
    assert_eq!(pattern.name(), "snapshot");
    assert_eq!((pattern.cols(), pattern.rows()), (4, 2));
    assert!(pattern.at(0, 3));
    assert!(pattern.at(1, 1));
    assert_eq!(pattern.population(), 2);
    Ok(())
}

#[test]
fn jagged_layout() {
    let result = Pattern::new("jagged", vec![vec![true, false], vec![true]]);
    assert!(matches!(
        result,
        Err(GridError::JaggedLayout {
            row: 1,
            expected: 2,
            found: 1
        })
    ));
}

#[test]
#[cfg(feature = "serde")]
fn config_ser() -> Result<(), Box<dyn Error>> {
    let config = Config::new(64, 48)
        .set_offset(1, 3)
        .set_workers(4)
        .set_seed(9);
    let json = serde_json::to_string(&config)?;
    assert_eq!(serde_json::from_str::<Config>(&json)?, config);

    let partial: Config = serde_json::from_str(r#"{"width": 12, "init": "Dead"}"#)?;
    assert_eq!(partial, Config::new(12, 150).set_init(InitState::Dead));
    Ok(())
}
