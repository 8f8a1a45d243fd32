//! Parsing command-line arguments.

use crate::{error::AppError, presets, save};
use clap::{
    builder::PossibleValuesParser, crate_authors, crate_description, crate_name, crate_version,
    value_parser, Arg, ArgAction, ArgMatches, Command,
};
use rlifesim_lib::{Config, Neighborhood, Rule, Seeding};
use std::path::PathBuf;

fn positive(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err(String::from("must be a positive integer")),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

fn rule_string(s: &str) -> Result<String, String> {
    s.parse::<Rule>()
        .map(|_| s.trim().to_owned())
        .map_err(|e| e.to_string())
}

fn offsets(s: &str) -> Result<Vec<(i32, i32)>, String> {
    s.parse::<Neighborhood>()
        .map(|nbhd| nbhd.offsets().collect())
        .map_err(|e| e.to_string())
}

fn block_offset(s: &str) -> Result<(i64, i64), String> {
    let (row, column) = s
        .split_once(',')
        .ok_or_else(|| String::from("expected ROW,COLUMN"))?;
    let row = row.trim().parse().map_err(|e| format!("{}", e))?;
    let column = column.trim().parse().map_err(|e| format!("{}", e))?;
    Ok((row, column))
}

/// A struct to store the parse results.
#[derive(Clone, Debug)]
pub(crate) struct Args {
    pub(crate) config: Config,
    /// Replays a saved session instead of simulating.
    pub(crate) load: Option<PathBuf>,
    pub(crate) save: Option<PathBuf>,
    pub(crate) describe: bool,
    pub(crate) all: bool,
    #[cfg(feature = "tui")]
    pub(crate) no_tui: bool,
}

fn command() -> Command {
    let command = Command::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .long_about(
            "A simulator and replayer for Generations cellular automata\n\
             \n\
             The grid is a torus: the top edge is glued to the bottom edge,\n\
             and the left edge to the right edge.\n\
             \n\
             The result is displayed in a mix of Plaintext and RLE format.\n\
             * Dead cells are represented by `.`;\n\
             * Living cells are represented by `o` for rules with 2 states, \
             `A` for rules with more states;\n\
             * Dying cells are represented by uppercase letters starting from `B`;\n\
             * Each line is ended with `$`;\n\
             * The whole pattern is ended with `!`\n",
        )
        .allow_negative_numbers(true)
        .arg(
            Arg::new("ROWS")
                .help("Number of rows")
                .index(1)
                .value_parser(positive),
        )
        .arg(
            Arg::new("COLUMNS")
                .help("Number of columns")
                .index(2)
                .value_parser(positive),
        )
        .arg(
            Arg::new("RULE")
                .help("Rule of the cellular automaton")
                .long_help(
                    "Rule of the cellular automaton\n\
                     In the form <survival>/<birth>/<states>, e.g. 23/3/2 for Conway's \
                     Game of Life,\nor 345/2/4 for Star Wars.",
                )
                .short('r')
                .long("rule")
                .value_parser(rule_string),
        )
        .arg(
            Arg::new("PRESET")
                .help("Uses a named rule")
                .long_help(format!(
                    "Uses a named rule\nAvailable rules:\n{}",
                    presets::help()
                ))
                .short('R')
                .long("preset")
                .conflicts_with("RULE")
                .value_parser(PossibleValuesParser::new(presets::names())),
        )
        .arg(
            Arg::new("NBHD")
                .help("Extra neighborhood offsets")
                .long_help(
                    "Extra neighborhood offsets\n\
                     Semicolon-separated pairs, e.g. \"0,2;2,0;0,-2;-2,0\".\n\
                     The first number moves along the rows, the second along the columns.\n\
                     They are added to the Moore neighborhood unless --nbhd-only is set.",
                )
                .long("nbhd")
                .allow_hyphen_values(true)
                .value_parser(offsets),
        )
        .arg(
            Arg::new("NBHDONLY")
                .help("Uses only the offsets given by --nbhd as the neighborhood")
                .long("nbhd-only")
                .requires("NBHD")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("SEEDING")
                .help("How to fill the grid")
                .long_help(
                    "How to fill the grid\n\
                     \"random\" fills the grid, or a centered region if --fraction is set.\n\
                     \"block\" puts a block of living cells in the middle.",
                )
                .short('s')
                .long("seeding")
                .value_parser(["random", "block", "empty"]),
        )
        .arg(
            Arg::new("DENSITY")
                .help("Density of living cells when seeding randomly")
                .short('d')
                .long("density")
                .value_parser(value_parser!(f64)),
        )
        .arg(
            Arg::new("FRACTION")
                .help("Size of the seeded region, as 1/N of each side")
                .short('f')
                .long("fraction")
                .value_parser(positive),
        )
        .arg(
            Arg::new("OFFSET")
                .help("Moves the seeded block, as ROW,COLUMN")
                .long("offset")
                .allow_hyphen_values(true)
                .value_parser(block_offset),
        )
        .arg(
            Arg::new("SEED")
                .help("Seed of the random number generator")
                .long("seed")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("STEPS")
                .help("Number of generations to simulate")
                .long_help(
                    "Number of generations to simulate\n\
                     If this value is not positive, the simulation runs until stopped.",
                )
                .short('t')
                .long("steps")
                .value_parser(value_parser!(i64)),
        )
        .arg(
            Arg::new("NORECORD")
                .help("Does not record the history")
                .long("no-record")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("TICK")
                .help("Delay between two frames of the replay, in milliseconds")
                .long("tick")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("NOLOOP")
                .help("Stops at the last frame instead of starting over")
                .long("no-loop")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("CONFIG")
                .help("Reads the configuration from a file")
                .long_help(
                    "Reads the configuration from a file\n\
                     JSON, YAML and TOML are supported. Other arguments override the file.",
                )
                .short('c')
                .long("config")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("LOAD")
                .help("Replays a saved session instead of simulating")
                .short('l')
                .long("load")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("SAVE")
                .help("Saves the recorded history to a file")
                .short('o')
                .long("save")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("DESCRIBE")
                .help("Prints a summary of the session when it ends")
                .long("describe")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("ALL")
                .help("Prints every recorded frame")
                .long_help(
                    "Prints every recorded frame\n\
                     Only useful when --no-tui is set.",
                )
                .short('a')
                .long("all")
                .action(ArgAction::SetTrue),
        );

    #[cfg(feature = "tui")]
    let command = command.arg(
        Arg::new("NOTUI")
            .help("Simulates and prints the result, without entering the TUI")
            .short('n')
            .long("no-tui")
            .action(ArgAction::SetTrue),
    );

    command
}

impl Args {
    /// Parses the command-line arguments.
    ///
    /// Exits on invalid arguments.
    pub(crate) fn parse() -> Result<Self, AppError> {
        Self::from_matches(&command().get_matches())
    }

    fn from_matches(matches: &ArgMatches) -> Result<Self, AppError> {
        let mut config = match matches.get_one::<PathBuf>("CONFIG") {
            Some(path) => save::load_config(path)?,
            None => Config::default(),
        };

        if let Some(&rows) = matches.get_one::<usize>("ROWS") {
            config.rows = rows;
        }
        if let Some(&columns) = matches.get_one::<usize>("COLUMNS") {
            config.columns = columns;
        }
        if let Some(rule) = matches.get_one::<String>("RULE") {
            config.rule_string = rule.clone();
        }
        if let Some(rule) = matches
            .get_one::<String>("PRESET")
            .and_then(|name| presets::lookup(name))
        {
            config.rule_string = rule.to_owned();
        }
        if let Some(offsets) = matches.get_one::<Vec<(i32, i32)>>("NBHD") {
            config.offsets = offsets.clone();
            config.offsets_only = matches.get_flag("NBHDONLY");
        }
        if let Some(seeding) = matches.get_one::<String>("SEEDING") {
            config.seeding = match seeding.as_str() {
                "block" => Seeding::Block,
                "empty" => Seeding::Empty,
                _ => Seeding::Random,
            };
        }
        if let Some(&density) = matches.get_one::<f64>("DENSITY") {
            config.density = density;
        }
        if let Some(&fraction) = matches.get_one::<usize>("FRACTION") {
            config.fraction = Some(fraction);
        }
        if let Some(&offset) = matches.get_one::<(i64, i64)>("OFFSET") {
            config.offset = offset;
        }
        if let Some(&seed) = matches.get_one::<u64>("SEED") {
            config.rng_seed = Some(seed);
        }
        if let Some(&steps) = matches.get_one::<i64>("STEPS") {
            config.steps = steps;
        }
        if matches.get_flag("NORECORD") {
            config.record = false;
        }
        if let Some(&tick_ms) = matches.get_one::<u64>("TICK") {
            config.tick_ms = tick_ms;
        }
        if matches.get_flag("NOLOOP") {
            config.looping = false;
        }

        Ok(Args {
            config,
            load: matches.get_one::<PathBuf>("LOAD").cloned(),
            save: matches.get_one::<PathBuf>("SAVE").cloned(),
            describe: matches.get_flag("DESCRIBE"),
            all: matches.get_flag("ALL"),
            #[cfg(feature = "tui")]
            no_tui: matches.get_flag("NOTUI"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        let matches = command().try_get_matches_from(args)?;
        Ok(Args::from_matches(&matches).unwrap())
    }

    #[test]
    fn verify_command() {
        command().debug_assert();
    }

    #[test]
    fn defaults() {
        let args = parse(&["rlifesim"]).unwrap();
        assert_eq!(args.config, Config::default());
        assert!(args.load.is_none());
        assert!(!args.all);
    }

    #[test]
    fn overrides() {
        let args = parse(&[
            "rlifesim",
            "20",
            "30",
            "-r",
            "345/2/4",
            "--nbhd",
            "0,2;2,0",
            "--nbhd-only",
            "-s",
            "block",
            "--offset",
            "-3,4",
            "-t",
            "-1",
            "--no-record",
            "--no-loop",
            "-o",
            "out.json",
        ])
        .unwrap();
        let config = args.config;
        assert_eq!((config.rows, config.columns), (20, 30));
        assert_eq!(config.rule_string, "345/2/4");
        assert_eq!(config.offsets, vec![(0, 2), (2, 0)]);
        assert!(config.offsets_only);
        assert_eq!(config.seeding, Seeding::Block);
        assert_eq!(config.offset, (-3, 4));
        assert_eq!(config.steps, -1);
        assert!(!config.record);
        assert!(!config.looping);
        assert_eq!(args.save, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn preset() {
        let args = parse(&["rlifesim", "--preset", "brians-brain"]).unwrap();
        assert_eq!(args.config.rule_string, "/2/3");
        assert!(parse(&["rlifesim", "--preset", "nothing"]).is_err());
        assert!(parse(&["rlifesim", "-R", "life", "-r", "23/3/2"]).is_err());
    }

    #[test]
    fn invalid_values() {
        assert!(parse(&["rlifesim", "0", "10"]).is_err());
        assert!(parse(&["rlifesim", "-r", "B3/S23"]).is_err());
        assert!(parse(&["rlifesim", "--nbhd", "1;2"]).is_err());
        assert!(parse(&["rlifesim", "--nbhd-only"]).is_err());
        assert!(parse(&["rlifesim", "--offset", "3"]).is_err());
    }
}
