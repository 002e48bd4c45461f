//! Parsing command-line arguments.

use clap::{
    crate_description, crate_version, error::ErrorKind, value_parser, Arg, ArgAction, ArgMatches,
    Command, Error,
};
use lifegrid_lib::{Config, InitState};
use std::{fs, path::Path, path::PathBuf};

fn positive(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) | Err(_) => Err(String::from("must be a positive integer")),
        Ok(n) => Ok(n),
    }
}

/// A pattern to place in the grid, given as `NAME@X,Y`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Placement {
    pub(crate) name: String,
    pub(crate) x: usize,
    pub(crate) y: usize,
}

fn placement(s: &str) -> Result<Placement, String> {
    let invalid = || format!("expected NAME@X,Y, found {:?}", s);
    let (name, coord) = s.rsplit_once('@').ok_or_else(invalid)?;
    let (x, y) = coord.split_once(',').ok_or_else(invalid)?;
    if name.is_empty() {
        return Err(invalid());
    }
    Ok(Placement {
        name: name.to_string(),
        x: x.trim().parse().map_err(|_| invalid())?,
        y: y.trim().parse().map_err(|_| invalid())?,
    })
}

/// A struct to store the parse results.
#[derive(Debug)]
pub(crate) struct Args {
    pub(crate) config: Config,
    pub(crate) generations: u64,
    pub(crate) patterns: Option<PathBuf>,
    pub(crate) places: Vec<Placement>,
    pub(crate) rle: bool,
    pub(crate) output: Option<PathBuf>,
}

impl Args {
    fn command() -> Command {
        Command::new("lifegrid")
            .version(crate_version!())
            .about(crate_description!())
            .long_about(
                "Runs Conway's Game of Life on a bounded grid from the command line.\n\
                 \n\
                 Cells outside the grid are always dead. Each generation is computed \
                 in parallel by a number of workers.\n\
                 \n\
                 The final generation is printed in Plaintext format by default:\n\
                 * Dead cells are represented by `.`;\n\
                 * Living cells are represented by `o`.\n\
                 \n\
                 Set the environment variable RUST_LOG (e.g. `RUST_LOG=debug`) to see logs.\n",
            )
            .arg(
                Arg::new("WIDTH")
                    .help("Width of the grid")
                    .long_help(
                        "Width of the grid\n\
                         Defaults to the width in the config file, or 150.\n",
                    )
                    .index(1)
                    .value_parser(positive),
            )
            .arg(
                Arg::new("HEIGHT")
                    .help("Height of the grid")
                    .long_help(
                        "Height of the grid\n\
                         Defaults to the height in the config file, or 150.\n",
                    )
                    .index(2)
                    .value_parser(positive),
            )
            .arg(
                Arg::new("GENERATIONS")
                    .help("Number of generations to run")
                    .short('g')
                    .long("generations")
                    .default_value("1")
                    .value_parser(value_parser!(u64)),
            )
            .arg(
                Arg::new("WORKERS")
                    .help("Number of workers computing each generation")
                    .short('w')
                    .long("workers")
                    .value_parser(positive),
            )
            .arg(
                Arg::new("SEED")
                    .help("Seed for the random initial state")
                    .long("seed")
                    .value_parser(value_parser!(u64)),
            )
            .arg(
                Arg::new("DEAD")
                    .help("Starts with all cells dead instead of random")
                    .long("dead")
                    .action(ArgAction::SetTrue),
            )
            .arg(
                Arg::new("PATTERNS")
                    .help("Directory of RLE pattern files")
                    .long_help(
                        "Directory of RLE pattern files\n\
                         Files that cannot be decoded are skipped.\n",
                    )
                    .short('p')
                    .long("patterns")
                    .value_name("DIR")
                    .value_parser(value_parser!(PathBuf)),
            )
            .arg(
                Arg::new("PLACE")
                    .help("Places a pattern with its top left corner at (X, Y)")
                    .long_help(
                        "Places a pattern with its top left corner at (X, Y)\n\
                         NAME is the name of a pattern in the pattern directory, \
                         or one of the built-in patterns `glider` and `lwss`.\n\
                         May be given more than once.\n",
                    )
                    .long("place")
                    .value_name("NAME@X,Y")
                    .action(ArgAction::Append)
                    .value_parser(placement),
            )
            .arg(
                Arg::new("RLE")
                    .help("Prints the final generation in RLE format")
                    .long("rle")
                    .action(ArgAction::SetTrue),
            )
            .arg(
                Arg::new("OUTPUT")
                    .help("Saves the final generation to an RLE file")
                    .short('o')
                    .long("output")
                    .value_name("FILE")
                    .value_parser(value_parser!(PathBuf)),
            )
            .arg(
                Arg::new("CONFIG")
                    .help("Reads the grid configuration from a file")
                    .long_help(
                        "Reads the grid configuration from a file\n\
                         The format is chosen by the extension: `.toml`, `.json`, \
                         `.yaml` or `.yml`.\n\
                         Values given on the command line override the file.\n",
                    )
                    .long("config")
                    .value_name("FILE")
                    .value_parser(value_parser!(PathBuf)),
            )
    }

    /// Parses the command-line arguments.
    pub(crate) fn parse() -> Result<Self, Error> {
        Args::parse_from(std::env::args_os())
    }

    /// Parses the given arguments. The first one is the program name.
    pub(crate) fn parse_from<I, T>(args: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let mut command = Args::command();
        let matches = command.try_get_matches_from_mut(args)?;

        let config = match matches.get_one::<PathBuf>("CONFIG") {
            Some(path) => {
                read_config(path).map_err(|e| command.error(ErrorKind::InvalidValue, e))?
            }
            None => Config::default(),
        };

        Ok(Args {
            config: override_config(config, &matches),
            generations: matches.get_one::<u64>("GENERATIONS").copied().unwrap_or(1),
            patterns: matches.get_one::<PathBuf>("PATTERNS").cloned(),
            places: matches
                .get_many::<Placement>("PLACE")
                .map(|places| places.cloned().collect())
                .unwrap_or_default(),
            rle: matches.get_flag("RLE"),
            output: matches.get_one::<PathBuf>("OUTPUT").cloned(),
        })
    }
}

/// Values given on the command line replace those in the config.
fn override_config(mut config: Config, matches: &ArgMatches) -> Config {
    if let Some(&width) = matches.get_one::<usize>("WIDTH") {
        config.width = width;
    }
    if let Some(&height) = matches.get_one::<usize>("HEIGHT") {
        config.height = height;
    }
    if let Some(&workers) = matches.get_one::<usize>("WORKERS") {
        config.workers = workers;
    }
    if let Some(&seed) = matches.get_one::<u64>("SEED") {
        config.seed = Some(seed);
    }
    if matches.get_flag("DEAD") {
        config.init = InitState::Dead;
    }
    config
}

/// Reads a config file in TOML, JSON or YAML.
fn read_config(path: &Path) -> Result<Config, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("unable to read config file {:?}: {}", path, e))?;
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase());
    let parsed = match extension.as_deref() {
        Some("toml") => toml::from_str(&text).map_err(|e| e.to_string()),
        Some("json") => serde_json::from_str(&text).map_err(|e| e.to_string()),
        Some("yaml") | Some("yml") => serde_yaml::from_str(&text).map_err(|e| e.to_string()),
        _ => {
            return Err(format!(
                "unknown config format {:?}, expected toml, json or yaml",
                path
            ))
        }
    };
    parsed.map_err(|e| format!("invalid config file {:?}: {}", path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn defaults() -> Result<(), Box<dyn Error>> {
        let args = Args::parse_from(["lifegrid"])?;
        assert_eq!(args.config, Config::default());
        assert_eq!(args.generations, 1);
        assert!(args.places.is_empty());
        assert!(!args.rle);
        Ok(())
    }

    #[test]
    fn options() -> Result<(), Box<dyn Error>> {
        let args = Args::parse_from([
            "lifegrid", "40", "30", "-g", "12", "-w", "4", "--seed", "5", "--dead", "--place",
            "glider@1,2", "--place", "Pulsar@10,0", "--rle", "-o", "out.rle",
        ])?;
        assert_eq!(
            args.config,
            Config::new(40, 30)
                .set_workers(4)
                .set_seed(5)
                .set_init(InitState::Dead)
        );
        assert_eq!(args.generations, 12);
        assert_eq!(
            args.places,
            vec![
                Placement {
                    name: String::from("glider"),
                    x: 1,
                    y: 2
                },
                Placement {
                    name: String::from("Pulsar"),
                    x: 10,
                    y: 0
                },
            ]
        );
        assert!(args.rle);
        assert_eq!(args.output, Some(PathBuf::from("out.rle")));
        Ok(())
    }

    #[test]
    fn invalid() {
        let cases: [&[&str]; 7] = [
            &["lifegrid", "0", "5"],
            &["lifegrid", "5", "-5"],
            &["lifegrid", "-w", "0"],
            &["lifegrid", "--place", "glider"],
            &["lifegrid", "--place", "@1,2"],
            &["lifegrid", "--place", "glider@1"],
            &["lifegrid", "--place", "glider@x,2"],
        ];
        for args in cases {
            assert!(Args::parse_from(args).is_err(), "{:?}", args);
        }
    }

    #[test]
    fn config_files() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let files = [
            ("grid.toml", "width = 20\nheight = 10\nworkers = 3\ninit = \"Dead\"\n"),
            (
                "grid.json",
                r#"{"width": 20, "height": 10, "workers": 3, "init": "Dead"}"#,
            ),
            ("grid.yaml", "width: 20\nheight: 10\nworkers: 3\ninit: Dead\n"),
        ];
        let expected = Config::new(20, 10).set_workers(3).set_init(InitState::Dead);
        for (name, text) in files {
            let path = dir.path().join(name);
            fs::write(&path, text)?;
            let path = path.to_string_lossy().into_owned();

            let args = Args::parse_from(["lifegrid", "--config", path.as_str()])?;
            assert_eq!(args.config, expected, "{}", name);

            let args = Args::parse_from([
                "lifegrid",
                "30",
                "15",
                "--config",
                path.as_str(),
                "-w",
                "1",
            ])?;
            let expected = Config::new(30, 15).set_workers(1).set_init(InitState::Dead);
            assert_eq!(args.config, expected, "{}", name);
        }

        let path = dir.path().join("grid.ini");
        fs::write(&path, "width = 20")?;
        let path = path.to_string_lossy().into_owned();
        assert!(Args::parse_from(["lifegrid", "--config", path.as_str()]).is_err());
        Ok(())
    }
}
