//! Running a session and printing the result.

use crate::{args::Args, error::AppError, save};
use log::{info, warn};
use rlifesim_lib::{Cancel, Config, Error, Grid, History, Simulator};

/// Fills in a random seed, so that a random session can be reproduced
/// from the log.
fn with_seed(mut config: Config) -> Config {
    if config.rng_seed.is_none() {
        let seed = rand::random::<u64>();
        info!("Random seed: {}.", seed);
        config.rng_seed = Some(seed);
    }
    config
}

/// A summary of a loaded history.
fn describe(rule_string: &str, history: &History) -> Result<String, AppError> {
    let (rows, columns) = history.dims();
    let last = history.last().ok_or(Error::EmptyHistory)?;
    Ok(format!(
        "Rows: {}\nColumns: {}\nRule: {}\nLiving cells: {}\nRecorded frames: {}",
        rows,
        columns,
        rule_string,
        last.live_count(),
        history.len()
    ))
}

/// Runs the simulation without any user interface.
fn simulate(config: &Config) -> Result<Simulator, AppError> {
    if config.steps <= 0 {
        return Err(AppError::Unbounded);
    }
    let mut simulator = config.simulator()?;
    simulator.run(config.steps, config.record, &Cancel::new())?;
    Ok(simulator)
}

/// Replays the history in the TUI, and prints the frame shown at the end.
///
/// Without a history, there is only the last grid to show.
#[cfg(feature = "tui")]
fn replay(config: &Config, history: Option<History>, last: &Grid) -> Result<(), AppError> {
    let rule = config.rule()?;
    let history = match history {
        Some(history) => history,
        None => {
            let mut history = History::for_grid(last);
            history.push(last)?;
            history
        }
    };
    let mut playback = config.playback(history)?;
    crate::tui::replay(&mut playback, &rule)?;
    println!("{}", playback.frame().rle(&rule));
    Ok(())
}

/// Runs or loads a session, then shows or prints it.
pub(crate) fn run(args: Args) -> Result<(), AppError> {
    let mut config = with_seed(args.config);

    let (history, last): (Option<History>, Grid) = match &args.load {
        Some(path) => {
            let (rule_string, history) = save::load_history(path)?;
            info!("Loaded {} frames from {:?}.", history.len(), path);
            if args.describe {
                println!("{}\n", describe(&rule_string, &history)?);
            }
            config.rule_string = rule_string;
            let last = history.last().cloned().ok_or(Error::EmptyHistory)?;
            (Some(history), last)
        }
        None => {
            #[cfg(feature = "tui")]
            let mut simulator = if args.no_tui {
                simulate(&config)?
            } else {
                crate::tui::simulate(config.simulator()?, config.steps, config.record)?
            };
            #[cfg(not(feature = "tui"))]
            let mut simulator = simulate(&config)?;

            if args.describe {
                println!("{}\n", simulator);
            }
            (simulator.take_history(), simulator.grid().clone())
        }
    };
    if let Some(path) = &args.save {
        match &history {
            Some(history) => {
                save::save_history(path, &config.rule_string, history)?;
                info!("Saved {} frames to {:?}.", history.len(), path);
            }
            None => warn!("Nothing was recorded. Not saving to {:?}.", path),
        }
    }

    #[cfg(feature = "tui")]
    if !args.no_tui {
        return replay(&config, history, &last);
    }

    let rule = config.rule()?;
    if args.all {
        for frame in history.iter().flatten() {
            println!("{}", frame.rle(&rule));
        }
    }
    println!("{}", last.rle(&rule));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rlifesim_lib::ALIVE;

    #[test]
    fn describe_loaded() -> Result<(), Box<dyn std::error::Error>> {
        let mut grid = Grid::new(4, 6)?;
        let mut history = History::for_grid(&grid);
        history.push(&grid)?;
        grid.set(1, 2, ALIVE)?;
        grid.set(3, 5, ALIVE)?;
        history.push(&grid)?;
        assert_eq!(
            describe("23/3/2", &history)?,
            "Rows: 4\nColumns: 6\nRule: 23/3/2\nLiving cells: 2\nRecorded frames: 2"
        );
        assert!(matches!(
            describe("23/3/2", &History::new(4, 6)),
            Err(AppError::Sim(Error::EmptyHistory))
        ));
        Ok(())
    }
}
