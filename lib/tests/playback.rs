use rlifesim_lib::{
    Cancel, Command, Config, Error, Grid, History, Playback, PlaybackState,
};
use std::{error::Error as StdError, time::Duration};

fn history(frames: i64) -> Result<History, Error> {
    let mut simulator = Config::new(12, 12).set_rng_seed(5).simulator()?;
    simulator.run(frames, true, &Cancel::new())?;
    Ok(simulator.take_history().unwrap_or_else(|| History::new(12, 12)))
}

#[test]
fn empty_history() {
    assert_eq!(
        Playback::new(History::new(4, 4)).err(),
        Some(Error::EmptyHistory)
    );
}

#[test]
fn jump_and_wrap() -> Result<(), Box<dyn StdError>> {
    let mut playback = Playback::new(history(10)?)?;
    assert_eq!(playback.state(), PlaybackState::Paused);
    assert_eq!(playback.cursor(), 0);
    playback.jump_to_fraction(9)?;
    assert_eq!(playback.cursor(), 9);
    playback.step(1);
    assert_eq!(playback.cursor(), 0);
    playback.step(-1);
    assert_eq!(playback.cursor(), 9);
    playback.step(-23);
    assert_eq!(playback.cursor(), 6);
    playback.jump_to_fraction(5)?;
    assert_eq!(playback.frame(), playback.history().get(5).unwrap());
    assert_eq!(
        playback.jump_to_fraction(10),
        Err(Error::InvalidFraction(10))
    );
    Ok(())
}

#[test]
fn jump_in_short_history() -> Result<(), Box<dyn StdError>> {
    let mut playback = Playback::new(history(3)?)?;
    playback.jump_to_fraction(9)?;
    assert_eq!(playback.cursor(), 2);
    playback.jump_to_fraction(3)?;
    assert_eq!(playback.cursor(), 0);
    Ok(())
}

#[test]
fn running() -> Result<(), Box<dyn StdError>> {
    let mut playback = Playback::new(history(4)?)?;
    assert!(!playback.tick());
    playback.toggle_run();
    assert_eq!(playback.state(), PlaybackState::Running);

    assert!(playback.tick());
    assert_eq!(playback.cursor(), 1);
    playback.step(1);
    assert_eq!(playback.cursor(), 1);

    playback.reverse();
    assert_eq!(playback.direction(), -1);
    playback.tick();
    playback.tick();
    assert_eq!(playback.cursor(), 3);

    playback.jump_to_fraction(5)?;
    assert_eq!(playback.cursor(), 2);

    playback.toggle_run();
    assert_eq!(playback.state(), PlaybackState::Paused);
    assert_eq!(playback.direction(), -1);
    assert!(!playback.tick());
    Ok(())
}

#[test]
fn stops_without_looping() -> Result<(), Box<dyn StdError>> {
    let mut playback = Config::default()
        .set_looping(false)
        .playback(history(5)?)?;
    playback.toggle_run();
    for _ in 0..4 {
        assert!(playback.tick());
    }
    assert_eq!(playback.cursor(), 4);
    assert!(!playback.tick());
    assert_eq!(playback.state(), PlaybackState::Stopped);
    assert_eq!(playback.cursor(), 4);

    playback.apply(Command::ToggleRun)?;
    playback.apply(Command::JumpToFraction(0))?;
    assert_eq!(playback.state(), PlaybackState::Stopped);
    assert_eq!(playback.cursor(), 4);
    Ok(())
}

#[test]
fn backward_still_loops() -> Result<(), Box<dyn StdError>> {
    let mut playback = Playback::new(history(5)?)?;
    playback.set_looping(false);
    playback.set_direction(-1);
    playback.toggle_run();
    assert!(playback.tick());
    assert_eq!(playback.cursor(), 4);
    assert_eq!(playback.state(), PlaybackState::Running);
    Ok(())
}

#[test]
fn slower_saturates() -> Result<(), Box<dyn StdError>> {
    let mut playback = Playback::new(history(2)?)?;
    for _ in 0..100 {
        playback.apply(Command::Slower)?;
    }
    assert_eq!(playback.speed(), Duration::MAX);
    playback.apply(Command::SetSpeed(Duration::MAX))?;
    playback.apply(Command::Slower)?;
    assert_eq!(playback.speed(), Duration::MAX);
    playback.apply(Command::Faster)?;
    assert!(playback.speed() < Duration::MAX);
    Ok(())
}

#[test]
fn commands() -> Result<(), Box<dyn StdError>> {
    let mut playback = Config::default()
        .set_tick_ms(100)
        .playback(history(10)?)?;
    assert_eq!(playback.speed(), Duration::from_millis(100));
    playback.apply(Command::Faster)?;
    assert_eq!(playback.speed(), Duration::from_millis(50));
    playback.apply(Command::SetSpeed(Duration::ZERO))?;
    playback.apply(Command::Slower)?;
    assert_eq!(playback.speed(), Duration::from_millis(10));

    playback.apply(Command::Step(3))?;
    assert_eq!(playback.cursor(), 3);
    playback.apply(Command::SetDirection(-7))?;
    assert_eq!(playback.direction(), -1);
    playback.apply(Command::Reverse)?;
    assert_eq!(playback.direction(), 1);
    playback.apply(Command::ToggleRun)?;
    assert!(playback.tick());
    assert_eq!(playback.cursor(), 4);
    playback.apply(Command::JumpToFraction(2))?;
    assert_eq!(playback.cursor(), 2);
    assert_eq!(
        playback.apply(Command::JumpToFraction(12)),
        Err(Error::InvalidFraction(12))
    );
    Ok(())
}

#[test]
fn frames_match_history() -> Result<(), Box<dyn StdError>> {
    let history = history(6)?;
    let expected: Vec<Grid> = history.iter().cloned().collect();
    let mut playback = Playback::new(history)?;
    playback.toggle_run();
    for frame in expected.iter().skip(1) {
        playback.tick();
        assert_eq!(playback.frame(), frame);
    }
    assert_eq!(playback.into_history().len(), 6);
    Ok(())
}
