//! The grid.

use crate::{
    cells::{Coord, State, ALIVE, DEAD},
    error::Error,
    nbhd::Neighborhood,
    rules::Rule,
};
use auto_enums::auto_enum;
use rand::Rng;
use std::fmt::Write;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A rectangular region of a grid.
///
/// The region wraps around the edges of the grid,
/// so `row + rows` may exceed the number of rows of the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Region {
    /// The first row.
    pub row: usize,
    /// The first column.
    pub column: usize,
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub columns: usize,
}

impl Region {
    /// Creates a new region.
    pub fn new(row: usize, column: usize, rows: usize, columns: usize) -> Self {
        Region {
            row,
            column,
            rows,
            columns,
        }
    }

    /// A region in the middle of a `rows × columns` grid,
    /// whose sides are about `1 / fraction` of the sides of the grid.
    pub fn centered(rows: usize, columns: usize, fraction: usize) -> Result<Self, Error> {
        if fraction == 0 {
            return Err(Error::NonPositive);
        }
        let half_rows = rows / fraction.saturating_mul(2);
        let half_columns = columns / fraction.saturating_mul(2);
        Ok(Region {
            row: rows / 2 - half_rows,
            column: columns / 2 - half_columns,
            rows: 2 * half_rows,
            columns: 2 * half_columns,
        })
    }
}

/// Number of cells in a `rows × columns` grid.
fn area(rows: usize, columns: usize) -> Result<usize, Error> {
    if rows == 0 || columns == 0 {
        return Err(Error::NonPositive);
    }
    rows.checked_mul(columns).ok_or(Error::TooLarge(rows, columns))
}

/// Adds a signed offset to an index, modulo `len`.
#[inline]
fn wrap(index: usize, offset: i64, len: usize) -> usize {
    (index as i64 + offset).rem_euclid(len as i64) as usize
}

/// A toroidal grid of cells.
///
/// Row `rows` is row `0` again, and so are the columns.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    columns: usize,
    /// Row-major states of all cells.
    cells: Vec<State>,
}

impl Grid {
    /// Creates a grid where every cell is dead.
    pub fn new(rows: usize, columns: usize) -> Result<Self, Error> {
        let len = area(rows, columns)?;
        Ok(Grid {
            rows,
            columns,
            cells: vec![DEAD; len],
        })
    }

    /// Creates a grid from row-major states.
    pub fn from_states(rows: usize, columns: usize, cells: Vec<State>) -> Result<Self, Error> {
        if cells.len() != area(rows, columns)? {
            return Err(Error::DimensionMismatch {
                expected: (rows, columns),
                found: (cells.len() / columns, columns),
            });
        }
        Ok(Grid {
            rows,
            columns,
            cells,
        })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// `(rows, columns)`.
    pub fn dims(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    /// Checks that the other grid has the same dimensions.
    pub fn check_dims(&self, other: &Grid) -> Result<(), Error> {
        if self.dims() == other.dims() {
            Ok(())
        } else {
            Err(Error::DimensionMismatch {
                expected: self.dims(),
                found: other.dims(),
            })
        }
    }

    /// Row-major states of all cells.
    pub fn states(&self) -> &[State] {
        &self.cells
    }

    #[inline]
    fn index(&self, (row, column): Coord) -> usize {
        row * self.columns + column
    }

    /// Gets the state of a cell. Returns `None` if there is no such cell.
    pub fn get(&self, row: usize, column: usize) -> Option<State> {
        if row < self.rows && column < self.columns {
            Some(self.cells[self.index((row, column))])
        } else {
            None
        }
    }

    /// Sets the state of a cell.
    pub fn set(&mut self, row: usize, column: usize, state: State) -> Result<(), Error> {
        if row < self.rows && column < self.columns {
            let index = self.index((row, column));
            self.cells[index] = state;
            Ok(())
        } else {
            Err(Error::SetCell((row, column)))
        }
    }

    /// Kills every cell.
    pub fn clear(&mut self) {
        self.cells.fill(DEAD);
    }

    /// Coordinates of all cells in the region, or in the whole grid.
    #[auto_enum(Iterator)]
    fn coords(&self, region: Option<Region>) -> impl Iterator<Item = Coord> {
        let (rows, columns) = self.dims();
        match region {
            Some(region) => (0..region.rows).flat_map(move |i| {
                (0..region.columns)
                    .map(move |j| ((region.row + i) % rows, (region.column + j) % columns))
            }),
            None => (0..rows).flat_map(move |i| (0..columns).map(move |j| (i, j))),
        }
    }

    /// Fills a region of the grid (or the whole grid) with random cells.
    ///
    /// Every cell in the region becomes [`ALIVE`] with probability `density`,
    /// and [`DEAD`] otherwise. When a region is given, all cells outside of it
    /// are killed.
    pub fn randomize<R: Rng + ?Sized>(
        &mut self,
        density: f64,
        region: Option<Region>,
        rng: &mut R,
    ) -> Result<(), Error> {
        if !(0.0..=1.0).contains(&density) {
            return Err(Error::InvalidDensity(density));
        }
        if region.is_some() {
            self.clear();
        }
        for coord in self.coords(region).collect::<Vec<_>>() {
            let index = self.index(coord);
            self.cells[index] = if rng.gen_bool(density) { ALIVE } else { DEAD };
        }
        Ok(())
    }

    /// Sets a block in the middle of the grid to [`ALIVE`].
    ///
    /// The block is the [`Region::centered`] region for `size_fraction`,
    /// moved by `offset` and wrapped around the edges.
    pub fn seed_block(&mut self, size_fraction: usize, offset: (i64, i64)) -> Result<(), Error> {
        let mut region = Region::centered(self.rows, self.columns, size_fraction)?;
        region.row = wrap(region.row, offset.0, self.rows);
        region.column = wrap(region.column, offset.1, self.columns);
        for coord in self.coords(Some(region)).collect::<Vec<_>>() {
            let index = self.index(coord);
            self.cells[index] = ALIVE;
        }
        Ok(())
    }

    /// Checks that every cell has a valid state for a rule with `gen` states.
    pub fn check_states(&self, gen: usize) -> Result<(), Error> {
        match self.cells.iter().position(|state| state.0 >= gen) {
            Some(index) => Err(Error::InvalidState(
                (index / self.columns, index % self.columns),
                self.cells[index],
            )),
            None => Ok(()),
        }
    }

    /// Number of living neighbors of a cell.
    ///
    /// Dying cells are not counted.
    #[inline]
    fn live_neighbors(&self, (row, column): Coord, offsets: &[(i32, i32)]) -> usize {
        offsets
            .iter()
            .filter(|&&(dx, dy)| {
                let coord = (
                    wrap(row, dx as i64, self.rows),
                    wrap(column, dy as i64, self.columns),
                );
                self.cells[self.index(coord)] == ALIVE
            })
            .count()
    }

    /// Computes one row of the next generation.
    fn next_row(&self, rule: &Rule, offsets: &[(i32, i32)], row: usize, next: &mut [State]) {
        for (column, next_state) in next.iter_mut().enumerate() {
            let state = self.cells[self.index((row, column))];
            let count = self.live_neighbors((row, column), offsets);
            *next_state = rule.next_state(state, count);
        }
    }

    /// Computes the next generation.
    ///
    /// The result depends only on the current grid; `self` is left untouched.
    ///
    /// Returns an error if some cell has a state that is invalid for the rule.
    pub fn step(&self, rule: &Rule, nbhd: &Neighborhood) -> Result<Grid, Error> {
        self.check_states(rule.gen())?;
        let offsets = nbhd.offsets().collect::<Vec<_>>();
        let mut cells = vec![DEAD; self.cells.len()];

        #[cfg(feature = "parallel")]
        cells
            .par_chunks_mut(self.columns)
            .enumerate()
            .for_each(|(row, next)| self.next_row(rule, &offsets, row, next));

        #[cfg(not(feature = "parallel"))]
        cells
            .chunks_mut(self.columns)
            .enumerate()
            .for_each(|(row, next)| self.next_row(rule, &offsets, row, next));

        Ok(Grid {
            rows: self.rows,
            columns: self.columns,
            cells,
        })
    }

    /// Iterates over all cells, as `(row, column, state)`.
    ///
    /// This is all a renderer needs to know about a grid.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, State)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &state)| (i / self.columns, i % self.columns, state))
    }

    /// Number of living cells. Dying cells are not counted.
    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&state| state == ALIVE).count()
    }

    /// Number of cells that are not dead.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&state| state != DEAD).count()
    }

    /// Displays the grid in a mix of
    /// [Plaintext](https://conwaylife.com/wiki/Plaintext) and
    /// [RLE](https://conwaylife.com/wiki/Rle) format.
    ///
    /// * **Dead** cells are represented by `.`;
    /// * **Living** cells are represented by `o` for rules with 2 states,
    ///   `A` for rules with more states;
    /// * **Dying** cells are represented by uppercase letters starting from `B`;
    /// * Each row ends with `$`, and the last one with `!`.
    pub fn rle(&self, rule: &Rule) -> String {
        let mut str = String::new();
        writeln!(
            str,
            "x = {}, y = {}, rule = {}",
            self.columns, self.rows, rule
        )
        .unwrap();
        for row in 0..self.rows {
            for column in 0..self.columns {
                str.push(self.cells[self.index((row, column))].symbol(rule.is_gen()));
            }
            str.push(if row == self.rows - 1 { '!' } else { '$' });
            str.push('\n');
        }
        str
    }

    /// Displays the grid in [Plaintext](https://conwaylife.com/wiki/Plaintext) format.
    ///
    /// * **Dead** cells are represented by `.`;
    /// * **Living** and **Dying** cells are represented by `o`.
    pub fn plaintext(&self) -> String {
        let mut str = String::with_capacity((self.columns + 1) * self.rows);
        for row in self.cells.chunks(self.columns) {
            str.extend(row.iter().map(|&state| if state == DEAD { '.' } else { 'o' }));
            str.push('\n');
        }
        str
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_region() -> Result<(), Error> {
        assert_eq!(Region::centered(100, 50, 5)?, Region::new(40, 20, 20, 10));
        assert_eq!(Region::centered(10, 10, 0), Err(Error::NonPositive));
        assert_eq!(
            Region::centered(10, 10, usize::MAX)?,
            Region::new(5, 5, 0, 0)
        );
        Ok(())
    }

    #[test]
    fn region_coords_wrap() -> Result<(), Error> {
        let grid = Grid::new(4, 4)?;
        let coords = grid.coords(Some(Region::new(3, 3, 2, 2))).collect::<Vec<_>>();
        assert_eq!(coords, vec![(3, 3), (3, 0), (0, 3), (0, 0)]);
        Ok(())
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn too_large() {
        assert_eq!(
            Grid::new(1 << 32, 1 << 32),
            Err(Error::TooLarge(1 << 32, 1 << 32))
        );
        assert_eq!(
            Grid::from_states(1 << 32, 1 << 32, Vec::new()),
            Err(Error::TooLarge(1 << 32, 1 << 32))
        );
        assert_eq!(
            Grid::new(usize::MAX, 2),
            Err(Error::TooLarge(usize::MAX, 2))
        );
    }

    #[test]
    fn huge_fraction_seeds_nothing() -> Result<(), Error> {
        let mut grid = Grid::new(10, 10)?;
        grid.seed_block(usize::MAX, (3, 3))?;
        assert_eq!(grid.occupied_count(), 0);
        Ok(())
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_matches_rows() -> Result<(), Error> {
        use rand::{rngs::StdRng, SeedableRng};

        let rule: Rule = "345/2/4".parse()?;
        let nbhd = Neighborhood::moore();
        let offsets = nbhd.offsets().collect::<Vec<_>>();
        let mut grid = Grid::new(17, 13)?;
        grid.randomize(0.4, None, &mut StdRng::seed_from_u64(21))?;
        for _ in 0..8 {
            let next = grid.step(&rule, &nbhd)?;
            let mut cells = vec![DEAD; 17 * 13];
            for (row, chunk) in cells.chunks_mut(13).enumerate() {
                grid.next_row(&rule, &offsets, row, chunk);
            }
            assert_eq!(next.states(), &cells[..]);
            grid = next;
        }

        let blinker = Grid::from_states(
            3,
            5,
            vec![DEAD, ALIVE, ALIVE, ALIVE, DEAD]
                .into_iter()
                .cycle()
                .take(15)
                .enumerate()
                .map(|(i, state)| if i / 5 == 1 { state } else { DEAD })
                .collect(),
        )?;
        let life: Rule = "23/3/2".parse()?;
        let next = blinker.step(&life, &nbhd)?;
        assert_eq!(next.live_count(), 3);
        assert_eq!(
            next.cells()
                .filter(|&(_, _, state)| state == ALIVE)
                .map(|(row, column, _)| (row, column))
                .collect::<Vec<_>>(),
            vec![(0, 2), (1, 2), (2, 2)]
        );
        Ok(())
    }

    #[test]
    fn wrap_negative() {
        assert_eq!(wrap(0, -1, 5), 4);
        assert_eq!(wrap(4, 1, 5), 0);
        assert_eq!(wrap(2, -12, 5), 0);
    }
}
