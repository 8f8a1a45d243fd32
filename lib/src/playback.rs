//! Replaying a recorded history.

use crate::{error::Error, grid::Grid, history::History};
use log::debug;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The delay used when slowing down from no delay at all.
const MIN_DELAY: Duration = Duration::from_millis(10);

/// Playback status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PlaybackState {
    /// Initial status. The cursor only moves on explicit steps and jumps.
    Paused,
    /// The cursor moves by the direction on every tick.
    Running,
    /// Reached the end without looping. Nothing happens any more.
    Stopped,
}

/// A command to the playback controller.
///
/// A user interface maps its input events to these commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Pauses when running, runs when paused.
    ToggleRun,
    /// Moves the cursor by some frames. Only works when paused.
    Step(isize),
    /// Runs forward if the sign is non-negative, backward otherwise.
    SetDirection(isize),
    /// Flips the direction.
    Reverse,
    /// Sets the delay between two ticks.
    SetSpeed(Duration),
    /// Halves the delay.
    Faster,
    /// Doubles the delay, up to [`Duration::MAX`].
    Slower,
    /// Jumps to `n / 10` of the history, for a digit `n`.
    JumpToFraction(u8),
}

/// The playback controller.
///
/// It owns a non-empty history and decides which frame is shown.
/// The cursor always points to a frame, wrapping around at both ends.
#[derive(Clone, Debug)]
pub struct Playback {
    history: History,
    cursor: usize,
    state: PlaybackState,
    /// `1` or `-1`.
    direction: isize,
    speed: Duration,
    /// Whether to go back to the first frame after the last one,
    /// or to stop there.
    looping: bool,
}

impl Playback {
    /// Creates a paused, looping controller at the first frame.
    pub fn new(history: History) -> Result<Self, Error> {
        if history.is_empty() {
            return Err(Error::EmptyHistory);
        }
        Ok(Playback {
            history,
            cursor: 0,
            state: PlaybackState::Paused,
            direction: 1,
            speed: Duration::ZERO,
            looping: true,
        })
    }

    /// The index of the current frame.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The current frame.
    pub fn frame(&self) -> &Grid {
        &self.history.frames()[self.cursor]
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Always `false`. An empty history cannot be replayed.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The history being replayed.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Gives the history back.
    pub fn into_history(self) -> History {
        self.history
    }

    /// Playback status.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// `1` when running forward, `-1` when running backward.
    pub fn direction(&self) -> isize {
        self.direction
    }

    /// The delay between two ticks.
    ///
    /// Waiting is left to whoever calls [`tick`](Self::tick).
    pub fn speed(&self) -> Duration {
        self.speed
    }

    /// Sets the delay between two ticks.
    pub fn set_speed(&mut self, speed: Duration) {
        self.speed = speed;
    }

    /// Whether the playback goes back to the first frame after the last one.
    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Sets whether to loop.
    ///
    /// When not looping, the playback stops for good the first time
    /// it runs forward past the last frame.
    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    #[inline]
    fn advance(&mut self, delta: isize) {
        let len = self.history.len() as isize;
        self.cursor = (self.cursor as isize + delta).rem_euclid(len) as usize;
    }

    /// Pauses when running, runs when paused.
    pub fn toggle_run(&mut self) {
        self.state = match self.state {
            PlaybackState::Paused => PlaybackState::Running,
            PlaybackState::Running => PlaybackState::Paused,
            PlaybackState::Stopped => PlaybackState::Stopped,
        };
    }

    /// Moves the cursor by `delta` frames, wrapping around.
    ///
    /// Does nothing unless paused.
    pub fn step(&mut self, delta: isize) {
        if self.state == PlaybackState::Paused {
            self.advance(delta);
        }
    }

    /// Runs forward if `sign` is non-negative, backward otherwise.
    pub fn set_direction(&mut self, sign: isize) {
        if self.state != PlaybackState::Stopped {
            self.direction = if sign < 0 { -1 } else { 1 };
        }
    }

    /// Flips the direction.
    pub fn reverse(&mut self) {
        self.set_direction(-self.direction);
    }

    /// Jumps to `fraction / 10` of the history.
    ///
    /// Works both when paused and when running.
    pub fn jump_to_fraction(&mut self, fraction: u8) -> Result<(), Error> {
        if fraction > 9 {
            return Err(Error::InvalidFraction(fraction));
        }
        if self.state != PlaybackState::Stopped {
            self.cursor = fraction as usize * self.history.len() / 10;
        }
        Ok(())
    }

    /// Moves the cursor by the direction, if running.
    ///
    /// Returns whether the cursor has moved.
    pub fn tick(&mut self) -> bool {
        if self.state != PlaybackState::Running {
            return false;
        }
        if !self.looping && self.direction > 0 && self.cursor + 1 == self.history.len() {
            debug!("Playback stopped at frame {}.", self.cursor);
            self.state = PlaybackState::Stopped;
            return false;
        }
        self.advance(self.direction);
        true
    }

    /// Applies a command.
    pub fn apply(&mut self, command: Command) -> Result<(), Error> {
        if self.state == PlaybackState::Stopped {
            return Ok(());
        }
        match command {
            Command::ToggleRun => self.toggle_run(),
            Command::Step(delta) => self.step(delta),
            Command::SetDirection(sign) => self.set_direction(sign),
            Command::Reverse => self.reverse(),
            Command::SetSpeed(speed) => self.set_speed(speed),
            Command::Faster => self.speed /= 2,
            Command::Slower => self.speed = self.speed.saturating_mul(2).max(MIN_DELAY),
            Command::JumpToFraction(fraction) => self.jump_to_fraction(fraction)?,
        }
        Ok(())
    }
}
