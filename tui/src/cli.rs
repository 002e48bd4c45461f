//! Running the grid without user interaction.

use crate::args::Args;
use lifegrid_lib::{rle, Grid, Pattern};
use log::{debug, info};
use std::error::Error;

/// Looks a pattern up by name, first in the loaded patterns,
/// then among the built-in ones.
fn find_pattern(patterns: &[Pattern], name: &str) -> Option<Pattern> {
    patterns
        .iter()
        .find(|pattern| pattern.name() == name)
        .cloned()
        .or_else(|| match name.to_lowercase().as_str() {
            "glider" => Some(Pattern::glider()),
            "lwss" => Some(Pattern::lwss()),
            _ => None,
        })
}

/// Builds the grid and places the patterns.
pub(crate) fn setup(args: &Args) -> Result<Grid, Box<dyn Error>> {
    let patterns = match &args.patterns {
        Some(dir) => rle::load_dir(dir)?,
        None => Vec::new(),
    };
    let mut grid = args.config.grid()?;
    for place in &args.places {
        let pattern = find_pattern(&patterns, &place.name)
            .ok_or_else(|| format!("Pattern {:?} not found.", place.name))?;
        grid.insert_pattern(&pattern, place.x, place.y)?;
        debug!("Placed {:?} at {:?}", pattern.name(), (place.x, place.y));
    }
    Ok(grid)
}

/// Runs the grid and prints the last generation.
pub(crate) fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mut grid = setup(&args)?;
    info!(
        "Running {} generations on a {}x{} grid with {} workers",
        args.generations,
        grid.width(),
        grid.height(),
        grid.config().workers
    );
    grid.step(args.generations);
    info!(
        "Population at generation {}: {}",
        grid.generation(),
        grid.population()
    );

    let pattern = grid.to_pattern(format!("Generation {}", grid.generation()));
    if args.rle {
        print!("{}", rle::encode(&pattern));
    } else {
        print!("{}", grid.plaintext());
    }
    if let Some(path) = &args.output {
        rle::encode_file(&pattern, path)?;
        info!("Saved to {:?}", path);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn place_patterns() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("block.rle"), "#N Block\nx = 2, y = 2\n2o$2o!")?;
        let dir_arg = dir.path().to_string_lossy().into_owned();
        let args = Args::parse_from([
            "lifegrid",
            "20",
            "10",
            "--dead",
            "-p",
            dir_arg.as_str(),
            "--place",
            "Block@0,0",
            "--place",
            "Glider@10,3",
        ])?;
        let mut grid = setup(&args)?;
        assert_eq!(grid.population(), 9);
        assert_eq!(grid.is_alive(1, 1), Some(true));
        grid.step(4);
        assert_eq!(grid.population(), 9);
        assert_eq!(grid.is_alive(13, 6), Some(true));
        Ok(())
    }

    #[test]
    fn unknown_pattern() -> Result<(), Box<dyn Error>> {
        let args = Args::parse_from(["lifegrid", "8", "8", "--place", "pulsar@0,0"])?;
        assert!(setup(&args).is_err());
        let args = Args::parse_from(["lifegrid", "8", "8", "--place", "lwss@6,6"])?;
        assert!(setup(&args).is_err());
        Ok(())
    }

    #[test]
    fn save_output() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("out.rle");
        let path_arg = path.to_string_lossy().into_owned();
        let args = Args::parse_from([
            "lifegrid",
            "6",
            "6",
            "--dead",
            "--place",
            "glider@0,0",
            "-g",
            "0",
            "-o",
            path_arg.as_str(),
        ])?;
        run(args)?;
        let saved = rle::decode_file(&path)?;
        assert_eq!(saved.name(), "Generation 0");
        assert_eq!(saved.population(), 5);
        assert!(saved.at(2, 0));
        Ok(())
    }
}
