//! Neighborhoods.

use crate::error::Error;
use std::{collections::BTreeSet, iter::FromIterator, str::FromStr};

/// The offsets of the Moore neighborhood.
const MOORE: [(i32, i32); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (1, -1),
];

/// The offsets of the von Neumann neighborhood.
const VON_NEUMANN: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// A neighborhood, i.e., a set of `(dx, dy)` offsets relative to a cell.
///
/// `dx` is added to the row, `dy` to the column.
///
/// The origin `(0, 0)` is never part of a neighborhood.
/// Offsets can be added but never removed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Neighborhood {
    offsets: BTreeSet<(i32, i32)>,
}

impl Neighborhood {
    /// An empty neighborhood.
    pub fn empty() -> Self {
        Neighborhood {
            offsets: BTreeSet::new(),
        }
    }

    /// The eight cells around a cell.
    pub fn moore() -> Self {
        MOORE.iter().copied().collect()
    }

    /// The four cells orthogonally adjacent to a cell.
    pub fn von_neumann() -> Self {
        VON_NEUMANN.iter().copied().collect()
    }

    /// Adds an offset to the neighborhood.
    ///
    /// Returns `true` if the offset is new. Adding an existing offset
    /// or the origin does nothing and returns `false`.
    pub fn add_offset(&mut self, dx: i32, dy: i32) -> bool {
        if (dx, dy) == (0, 0) {
            return false;
        }
        self.offsets.insert((dx, dy))
    }

    /// Number of offsets, i.e., the maximal possible neighbor count.
    pub fn size(&self) -> usize {
        self.offsets.len()
    }

    /// Whether the neighborhood contains the offset.
    pub fn contains(&self, dx: i32, dy: i32) -> bool {
        self.offsets.contains(&(dx, dy))
    }

    /// Iterates over the offsets.
    pub fn offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.offsets.iter().copied()
    }
}

/// The Moore neighborhood.
impl Default for Neighborhood {
    fn default() -> Self {
        Self::moore()
    }
}

impl FromIterator<(i32, i32)> for Neighborhood {
    fn from_iter<I: IntoIterator<Item = (i32, i32)>>(iter: I) -> Self {
        let mut nbhd = Self::empty();
        nbhd.extend(iter);
        nbhd
    }
}

impl Extend<(i32, i32)> for Neighborhood {
    fn extend<I: IntoIterator<Item = (i32, i32)>>(&mut self, iter: I) {
        for (dx, dy) in iter {
            self.add_offset(dx, dy);
        }
    }
}

/// Parses a list of offsets like `"0,2;2,0;0,-2;-2,0"`.
impl FromStr for Neighborhood {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        input
            .split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|offset| -> Result<(i32, i32), Error> {
                let malformed = || Error::MalformedOffset(offset.to_owned());
                let (dx, dy) = offset.split_once(',').ok_or_else(malformed)?;
                let dx = dx.trim().parse().map_err(|_| malformed())?;
                let dy = dy.trim().parse().map_err(|_| malformed())?;
                Ok((dx, dy))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_offsets() {
        let nbhd: Neighborhood = "0,2; 2,0;0,-2;-2,0;".parse().unwrap();
        assert_eq!(nbhd.size(), 4);
        assert!(nbhd.contains(-2, 0));
        assert_eq!(
            "1;2".parse::<Neighborhood>(),
            Err(Error::MalformedOffset(String::from("1")))
        );
        assert_eq!(
            "1,x".parse::<Neighborhood>(),
            Err(Error::MalformedOffset(String::from("1,x")))
        );
    }
}
