//! Cell states and coordinates.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The state of a cell.
///
/// `0` is dead, `1` is alive, and every larger value is a dying cell
/// which ages by one each generation until it wraps back to `0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct State(pub usize);

/// The Dead state.
pub const DEAD: State = State(0);
/// The Alive state.
pub const ALIVE: State = State(1);

impl State {
    /// Whether the cell is dying, i.e., neither [`DEAD`] nor [`ALIVE`].
    #[inline]
    pub fn is_dying(self) -> bool {
        self.0 >= 2
    }

    /// The character for the state in RLE.
    ///
    /// * **Dead** cells are represented by `.`;
    /// * **Living** cells are represented by `o` for rules with 2 states,
    ///   `A` for rules with more states;
    /// * **Dying** cells are represented by uppercase letters starting from `B`.
    ///
    /// States beyond what `char` can hold are represented by `?`.
    pub fn symbol(self, is_gen: bool) -> char {
        match self {
            DEAD => '.',
            ALIVE if is_gen => 'A',
            ALIVE => 'o',
            State(i) => u32::try_from(i - 1)
                .ok()
                .and_then(|i| ('A' as u32).checked_add(i))
                .and_then(char::from_u32)
                .unwrap_or('?'),
        }
    }

    /// The state after one more generation of aging, with `gen` states in total.
    #[inline]
    pub(crate) fn age(self, gen: usize) -> Self {
        State((self.0 + 1) % gen)
    }
}

/// The coordinates of a cell.
///
/// `(row, column)`, both 0-indexed.
pub type Coord = (usize, usize);
