//! Session configuration.

use crate::{
    error::Error,
    grid::{Grid, Region},
    history::History,
    nbhd::Neighborhood,
    playback::Playback,
    rules::Rule,
    simulator::Simulator,
};
use educe::Educe;
use log::debug;
use rand::{rngs::StdRng, SeedableRng};
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How to fill the grid before the first generation.
#[derive(Clone, Copy, Debug, Educe, PartialEq, Eq, Hash)]
#[educe(Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Seeding {
    /// Random living cells with probability [`density`](Config#structfield.density),
    /// in the whole grid, or in a centered region when
    /// [`fraction`](Config#structfield.fraction) is set.
    #[educe(Default)]
    Random,

    /// A block of living cells in the middle, about
    /// `1 / fraction` of each side, moved by [`offset`](Config#structfield.offset).
    Block,

    /// Nothing alive.
    Empty,
}

/// Session configuration.
///
/// The simulator and the playback controller will be generated from
/// this configuration.
#[derive(Clone, Debug, Educe, PartialEq)]
#[educe(Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Number of rows.
    #[educe(Default = 100)]
    pub rows: usize,

    /// Number of columns.
    #[educe(Default = 100)]
    pub columns: usize,

    /// The rule string, `<survival>/<birth>/<states>`.
    #[educe(Default(expression = "String::from(\"23/3/2\")"))]
    pub rule_string: String,

    /// Offsets added to the neighborhood.
    pub offsets: Vec<(i32, i32)>,

    /// Whether the neighborhood only consists of [`offsets`](#structfield.offsets).
    ///
    /// Otherwise the offsets are added to the Moore neighborhood.
    pub offsets_only: bool,

    /// How to fill the grid.
    pub seeding: Seeding,

    /// Probability of a living cell when seeding randomly.
    #[educe(Default = 0.5)]
    pub density: f64,

    /// Size of the seeded region or block, as a fraction of the grid.
    ///
    /// `None` means the whole grid for [`Seeding::Random`],
    /// and `3` for [`Seeding::Block`].
    pub fraction: Option<usize>,

    /// Offset `(rows, columns)` of the block from the center.
    pub offset: (i64, i64),

    /// Seed of the random number generator.
    ///
    /// `None` means a seed from the operating system.
    pub rng_seed: Option<u64>,

    /// Number of steps. A non-positive number means running until cancelled.
    #[educe(Default = 500)]
    pub steps: i64,

    /// Whether to record the history.
    #[educe(Default = true)]
    pub record: bool,

    /// Delay between two frames of the playback, in milliseconds.
    #[educe(Default = 50)]
    pub tick_ms: u64,

    /// Whether the playback loops.
    #[educe(Default = true)]
    pub looping: bool,
}

impl Config {
    /// Sets up a new configuration with given size.
    pub fn new(rows: usize, columns: usize) -> Self {
        Config {
            rows,
            columns,
            ..Config::default()
        }
    }

    /// Sets the rule string.
    pub fn set_rule_string<S: ToString>(mut self, rule_string: S) -> Self {
        self.rule_string = rule_string.to_string();
        self
    }

    /// Sets the extra offsets of the neighborhood,
    /// and whether they replace the Moore neighborhood.
    pub fn set_offsets(mut self, offsets: Vec<(i32, i32)>, offsets_only: bool) -> Self {
        self.offsets = offsets;
        self.offsets_only = offsets_only;
        self
    }

    /// Sets how to fill the grid.
    pub fn set_seeding(mut self, seeding: Seeding) -> Self {
        self.seeding = seeding;
        self
    }

    /// Sets the density of random seeding.
    pub fn set_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    /// Sets the size of the seeded region or block.
    pub fn set_fraction<T: Into<Option<usize>>>(mut self, fraction: T) -> Self {
        self.fraction = fraction.into();
        self
    }

    /// Sets the offset of the block.
    pub fn set_offset(mut self, offset: (i64, i64)) -> Self {
        self.offset = offset;
        self
    }

    /// Sets the seed of the random number generator.
    pub fn set_rng_seed<T: Into<Option<u64>>>(mut self, rng_seed: T) -> Self {
        self.rng_seed = rng_seed.into();
        self
    }

    /// Sets the number of steps.
    pub fn set_steps(mut self, steps: i64) -> Self {
        self.steps = steps;
        self
    }

    /// Sets whether to record the history.
    pub fn set_record(mut self, record: bool) -> Self {
        self.record = record;
        self
    }

    /// Sets the delay between two frames of the playback, in milliseconds.
    pub fn set_tick_ms(mut self, tick_ms: u64) -> Self {
        self.tick_ms = tick_ms;
        self
    }

    /// Sets whether the playback loops.
    pub fn set_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Parses the rule.
    pub fn rule(&self) -> Result<Rule, Error> {
        Ok(self.rule_string.parse()?)
    }

    /// Builds the neighborhood.
    pub fn nbhd(&self) -> Neighborhood {
        let mut nbhd = if self.offsets_only {
            Neighborhood::empty()
        } else {
            Neighborhood::moore()
        };
        nbhd.extend(self.offsets.iter().copied());
        nbhd
    }

    /// Creates and fills the grid.
    pub fn grid(&self) -> Result<Grid, Error> {
        let mut grid = Grid::new(self.rows, self.columns)?;
        match self.seeding {
            Seeding::Random => {
                let mut rng = match self.rng_seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_entropy(),
                };
                let region = self
                    .fraction
                    .map(|fraction| Region::centered(self.rows, self.columns, fraction))
                    .transpose()?;
                grid.randomize(self.density, region, &mut rng)?;
            }
            Seeding::Block => grid.seed_block(self.fraction.unwrap_or(3), self.offset)?,
            Seeding::Empty => (),
        }
        Ok(grid)
    }

    /// Creates a new simulation session from the configuration.
    pub fn simulator(&self) -> Result<Simulator, Error> {
        let rule = self.rule()?;
        let nbhd = self.nbhd();
        let grid = self.grid()?;
        debug!(
            "New {}x{} session with rule {} and {} neighbors.",
            self.rows,
            self.columns,
            rule,
            nbhd.size()
        );
        Simulator::new(grid, rule, nbhd)
    }

    /// Creates a playback controller for a history,
    /// with the speed and looping of the configuration.
    pub fn playback(&self, history: History) -> Result<Playback, Error> {
        let mut playback = Playback::new(history)?;
        playback.set_speed(Duration::from_millis(self.tick_ms));
        playback.set_looping(self.looping);
        Ok(playback)
    }
}
