//! __Rlifesim__ simulates and replays
//! [Generations](https://conwaylife.com/wiki/Generations) cellular automata
//! on a toroidal grid, with an arbitrary neighborhood.
//!
//! # Example
//!
//! ```rust
//! use rlifesim_lib::{Cancel, Config, Seeding};
//!
//! // Star Wars, from a random soup in the middle third of a 64x64 torus.
//! let config = Config::new(64, 64)
//!     .set_rule_string("345/2/4")
//!     .set_seeding(Seeding::Random)
//!     .set_fraction(3)
//!     .set_rng_seed(42);
//! let mut simulator = config.simulator().unwrap();
//!
//! let history = simulator.run(100, true, &Cancel::new()).unwrap().unwrap();
//! assert_eq!(history.len(), 100);
//! assert_eq!(simulator.generation(), 100);
//! ```

#![cfg_attr(docs_rs, feature(doc_cfg))]

mod cells;
mod config;
mod error;
mod grid;
mod history;
mod nbhd;
mod playback;
pub mod rules;
#[cfg(feature = "serde")]
mod save;
mod simulator;

pub use cells::{Coord, State, ALIVE, DEAD};
pub use config::{Config, Seeding};
pub use error::Error;
pub use grid::{Grid, Region};
pub use history::History;
pub use nbhd::Neighborhood;
pub use playback::{Command, Playback, PlaybackState};
pub use rules::{ParseRuleError, Rule};
#[cfg(feature = "serde")]
#[cfg_attr(docs_rs, doc(cfg(feature = "serde")))]
pub use save::HistorySer;
pub use simulator::{run, Cancel, Simulator, Status};
