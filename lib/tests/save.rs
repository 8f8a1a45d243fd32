#![cfg(feature = "serde")]

use rlifesim_lib::{Cancel, Config, Error, Grid, History, HistorySer, State};
use std::error::Error as StdError;

#[test]
fn json_round_trip() -> Result<(), Box<dyn StdError>> {
    let config = Config::new(10, 7).set_rule_string("345/2/4").set_rng_seed(9);
    let mut simulator = config.simulator()?;
    let history = simulator.run(20, true, &Cancel::new())?.unwrap().clone();

    let json = serde_json::to_string(&history.ser())?;
    let ser: HistorySer = serde_json::from_str(&json)?;
    let restored = ser.history()?;
    assert_eq!(restored, history);
    assert_eq!(restored.dims(), (10, 7));
    Ok(())
}

#[test]
fn wrong_frame_size() {
    let ser = HistorySer {
        rows: 2,
        columns: 2,
        frames: vec![vec![State(0); 4], vec![State(1); 6]],
    };
    assert_eq!(
        ser.history(),
        Err(Error::DimensionMismatch {
            expected: (2, 2),
            found: (3, 2),
        })
    );
}

#[test]
#[cfg(target_pointer_width = "64")]
fn too_large_frames() {
    let ser = HistorySer {
        rows: 1 << 32,
        columns: 1 << 32,
        frames: vec![Vec::new()],
    };
    assert_eq!(ser.history(), Err(Error::TooLarge(1 << 32, 1 << 32)));
}

#[test]
fn wrong_grid_size() -> Result<(), Box<dyn StdError>> {
    let mut history = History::new(4, 4);
    history.push(&Grid::new(4, 4)?)?;
    assert_eq!(
        history.push(&Grid::new(3, 4)?),
        Err(Error::DimensionMismatch {
            expected: (4, 4),
            found: (3, 4),
        })
    );
    assert_eq!(history.len(), 1);
    Ok(())
}
