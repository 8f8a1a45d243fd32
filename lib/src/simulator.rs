//! Running the simulation.

use crate::{error::Error, grid::Grid, history::History, nbhd::Neighborhood, rules::Rule};
use log::{debug, info};
use std::{
    fmt::{self, Display, Formatter},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How often the progress is logged, in generations.
#[cfg(debug_assertions)]
const LOG_FREQ: u64 = 100;
#[cfg(not(debug_assertions))]
const LOG_FREQ: u64 = 10000;

/// A flag to stop a running simulation.
///
/// Clones share the same flag, so one clone can be handed to whoever
/// decides when to stop. The simulation checks the flag between two
/// generations, never in the middle of one.
#[derive(Clone, Debug, Default)]
pub struct Cancel(Arc<AtomicBool>);

impl Cancel {
    /// A new flag which is not set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Asks the simulation to stop after the current generation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether the simulation has been asked to stop.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Simulation status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Status {
    /// Initial status. Nothing has been run yet.
    Initial,
    /// The last run has taken all the steps it was asked for.
    Finished,
    /// The last run was stopped by a [`Cancel`].
    Cancelled,
}

/// Steps the grid until `steps` generations are done, or until cancelled.
///
/// A non-positive `steps` means running until cancelled.
/// `before_step` sees the grid before each step.
///
/// Returns the number of steps taken and the reason to stop.
fn drive<F>(
    grid: &mut Grid,
    rule: &Rule,
    nbhd: &Neighborhood,
    steps: i64,
    cancel: &Cancel,
    mut before_step: F,
) -> Result<(u64, Status), Error>
where
    F: FnMut(&Grid) -> Result<(), Error>,
{
    let mut taken = 0;
    loop {
        if steps > 0 && taken >= steps as u64 {
            return Ok((taken, Status::Finished));
        }
        if cancel.is_cancelled() {
            info!("Cancelled after {} steps.", taken);
            return Ok((taken, Status::Cancelled));
        }
        before_step(grid)?;
        *grid = grid.step(rule, nbhd)?;
        taken += 1;
        if taken % LOG_FREQ == 0 {
            debug!("Step {}: {} living cells.", taken, grid.live_count());
        }
    }
}

/// Runs the simulation on a grid.
///
/// The grid is replaced by each next generation in turn. When `record` is
/// `true`, a copy of the grid is recorded before each step, and the recorded
/// history is returned.
///
/// A non-positive `steps` means running until `cancel` is set.
pub fn run(
    grid: &mut Grid,
    rule: &Rule,
    nbhd: &Neighborhood,
    steps: i64,
    record: bool,
    cancel: &Cancel,
) -> Result<Option<History>, Error> {
    rule.check_nbhd(nbhd)?;
    let mut history = if record {
        Some(History::for_grid(grid))
    } else {
        None
    };
    drive(grid, rule, nbhd, steps, cancel, |grid| match &mut history {
        Some(history) => history.push(grid),
        None => Ok(()),
    })?;
    Ok(history)
}

/// A simulation session.
///
/// It owns the grid, the rule, the neighborhood,
/// and everything recorded so far.
#[derive(Clone, Debug)]
pub struct Simulator {
    grid: Grid,
    rule: Rule,
    nbhd: Neighborhood,

    /// Number of generations since the session starts.
    generation: u64,

    /// Recorded frames, if anything has been recorded.
    history: Option<History>,

    status: Status,
}

impl Simulator {
    /// Creates a new session.
    ///
    /// Returns an error if the rule asks for neighbor counts larger than the
    /// neighborhood, or if the grid has states that the rule does not have.
    pub fn new(grid: Grid, rule: Rule, nbhd: Neighborhood) -> Result<Self, Error> {
        rule.check_nbhd(&nbhd)?;
        grid.check_states(rule.gen())?;
        Ok(Simulator {
            grid,
            rule,
            nbhd,
            generation: 0,
            history: None,
            status: Status::Initial,
        })
    }

    /// The current grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The current grid, for seeding or editing between runs.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// The rule.
    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    /// Changes the rule.
    ///
    /// The grid is not checked here. If it has states that the new rule
    /// does not have, the next step will fail.
    pub fn set_rule(&mut self, rule: Rule) -> Result<(), Error> {
        rule.check_nbhd(&self.nbhd)?;
        self.rule = rule;
        Ok(())
    }

    /// The neighborhood.
    pub fn nbhd(&self) -> &Neighborhood {
        &self.nbhd
    }

    /// Number of generations since the session starts.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Status of the last run.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Everything recorded so far.
    pub fn history(&self) -> Option<&History> {
        self.history.as_ref()
    }

    /// Takes the recorded history out of the session.
    pub fn take_history(&mut self) -> Option<History> {
        self.history.take()
    }

    /// Advances one generation.
    pub fn step(&mut self) -> Result<(), Error> {
        self.grid = self.grid.step(&self.rule, &self.nbhd)?;
        self.generation += 1;
        Ok(())
    }

    /// Runs `steps` generations, or until cancelled if `steps` is not positive.
    ///
    /// When `record` is `true`, the grid before each step is appended to the
    /// history of the session, which is then returned.
    /// Recording continues the same history across runs.
    pub fn run(
        &mut self,
        steps: i64,
        record: bool,
        cancel: &Cancel,
    ) -> Result<Option<&History>, Error> {
        if record && self.history.is_none() {
            self.history = Some(History::for_grid(&self.grid));
        }
        let history = &mut self.history;
        let (taken, status) = drive(
            &mut self.grid,
            &self.rule,
            &self.nbhd,
            steps,
            cancel,
            |grid| match history.as_mut() {
                Some(history) if record => history.push(grid),
                _ => Ok(()),
            },
        )?;
        self.generation += taken;
        self.status = status;
        debug!(
            "Ran {} steps, now at generation {}.",
            taken, self.generation
        );
        Ok(if record { self.history.as_ref() } else { None })
    }
}

/// Describes the session.
impl Display for Simulator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Rows: {}", self.grid.rows())?;
        writeln!(f, "Columns: {}", self.grid.columns())?;
        writeln!(f, "Rule: {}", self.rule)?;
        writeln!(f, "Generation: {}", self.generation)?;
        writeln!(f, "Living cells: {}", self.grid.live_count())?;
        writeln!(
            f,
            "Dying cells: {}",
            self.grid.occupied_count() - self.grid.live_count()
        )?;
        writeln!(f, "Neighborhood size: {}", self.nbhd.size())?;
        write!(
            f,
            "Recorded frames: {}",
            self.history.as_ref().map_or(0, History::len)
        )
    }
}
