//! Generations rules.
//!
//! A rule string has the form `<survival>/<birth>/<states>`, e.g.:
//!
//! * `23/3/2` is Conway's Game of Life;
//! * `/2/3` is Brian's Brain;
//! * `345/2/4` is Star Wars.
//!
//! For the notation, please see
//! [this article on LifeWiki](https://conwaylife.com/wiki/Generations).

use crate::{
    cells::{State, ALIVE, DEAD},
    error::Error,
    nbhd::Neighborhood,
};
use displaydoc::Display;
use std::{
    collections::BTreeSet,
    fmt::{self, Formatter},
    str::FromStr,
};
use thiserror::Error;

/// Errors when parsing a rule string.
#[derive(Clone, Debug, PartialEq, Eq, Display, Error)]
pub enum ParseRuleError {
    /// Expected 3 fields separated by `/`, found {0}.
    FieldCount(usize),
    /// Invalid character {0:?} in the neighbor counts.
    InvalidDigit(char),
    /// Invalid number of states: {0:?}.
    InvalidGen(String),
    /// A Generations rule needs at least 2 states, found {0}.
    TooFewStates(usize),
}

/// A Generations rule.
///
/// When the number of states is 2, it is just a Life-like rule.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rule {
    /// Neighbor counts under which a living cell stays alive.
    survival: BTreeSet<usize>,
    /// Neighbor counts under which a dead cell becomes alive.
    birth: BTreeSet<usize>,
    /// Number of states.
    gen: usize,
}

impl Rule {
    /// Constructs a new rule from the survival and birth counts
    /// and the number of states.
    ///
    /// Unlike the rule string, the counts here are not limited to one digit,
    /// so that rules for large neighborhoods can be built.
    pub fn new<S, B>(survival: S, birth: B, gen: usize) -> Result<Self, ParseRuleError>
    where
        S: IntoIterator<Item = usize>,
        B: IntoIterator<Item = usize>,
    {
        if gen < 2 {
            return Err(ParseRuleError::TooFewStates(gen));
        }
        Ok(Self {
            survival: survival.into_iter().collect(),
            birth: birth.into_iter().collect(),
            gen,
        })
    }

    /// Parses a rule string.
    ///
    /// The same as `input.parse::<Rule>()`.
    pub fn parse_rule(input: &str) -> Result<Self, ParseRuleError> {
        input.parse()
    }

    /// Neighbor counts under which a living cell stays alive.
    pub fn survival(&self) -> &BTreeSet<usize> {
        &self.survival
    }

    /// Neighbor counts under which a dead cell becomes alive.
    pub fn birth(&self) -> &BTreeSet<usize> {
        &self.birth
    }

    /// The number of states.
    pub fn gen(&self) -> usize {
        self.gen
    }

    /// Whether the rule is a Generations rule with visible dying states.
    pub fn is_gen(&self) -> bool {
        self.gen > 2
    }

    /// Checks that every neighbor count in the rule can actually happen
    /// in the given neighborhood.
    pub fn check_nbhd(&self, nbhd: &Neighborhood) -> Result<(), Error> {
        let size = nbhd.size();
        match self.survival.iter().chain(&self.birth).max() {
            Some(&count) if count > size => Err(Error::CountOutOfRange(count, size)),
            _ => Ok(()),
        }
    }

    /// The state of a cell in the next generation, given its current state
    /// and the number of living cells in its neighborhood.
    ///
    /// Dying cells always keep aging, whatever their neighbors are.
    #[inline]
    pub fn next_state(&self, state: State, live_count: usize) -> State {
        match state {
            ALIVE if !self.survival.contains(&live_count) => ALIVE.age(self.gen),
            DEAD if self.birth.contains(&live_count) => ALIVE,
            state if state.is_dying() => state.age(self.gen),
            state => state,
        }
    }
}

/// Parses a field of neighbor counts, one digit per count.
fn parse_counts(field: &str) -> Result<Vec<usize>, ParseRuleError> {
    field
        .chars()
        .map(|c| {
            c.to_digit(10)
                .map(|d| d as usize)
                .ok_or(ParseRuleError::InvalidDigit(c))
        })
        .collect()
}

impl FromStr for Rule {
    type Err = ParseRuleError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let fields = input.trim().split('/').collect::<Vec<_>>();
        if let [survival, birth, gen] = fields[..] {
            let survival = parse_counts(survival)?;
            let birth = parse_counts(birth)?;
            let gen = gen
                .parse()
                .map_err(|_| ParseRuleError::InvalidGen(gen.to_owned()))?;
            Rule::new(survival, birth, gen)
        } else {
            Err(ParseRuleError::FieldCount(fields.len()))
        }
    }
}

/// Writes the rule string, with digits in increasing order.
///
/// Only rules whose counts are all below 10 can be parsed back.
impl fmt::Display for Rule {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for count in &self.survival {
            write!(f, "{}", count)?;
        }
        f.write_str("/")?;
        for count in &self.birth {
            write!(f, "{}", count)?;
        }
        write!(f, "/{}", self.gen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions() {
        let rule: Rule = "345/2/4".parse().unwrap();
        assert_eq!(rule.next_state(ALIVE, 4), ALIVE);
        assert_eq!(rule.next_state(ALIVE, 2), State(2));
        assert_eq!(rule.next_state(DEAD, 2), ALIVE);
        assert_eq!(rule.next_state(DEAD, 3), DEAD);
        assert_eq!(rule.next_state(State(2), 2), State(3));
        assert_eq!(rule.next_state(State(3), 4), DEAD);
    }

    #[test]
    fn life_dies_at_once() {
        let rule: Rule = "23/3/2".parse().unwrap();
        assert_eq!(rule.next_state(ALIVE, 1), DEAD);
        assert_eq!(rule.next_state(ALIVE, 3), ALIVE);
    }

    #[test]
    fn bad_fields() {
        assert_eq!(
            "23/3/2/1".parse::<Rule>(),
            Err(ParseRuleError::FieldCount(4))
        );
        assert_eq!(
            "2a/3/2".parse::<Rule>(),
            Err(ParseRuleError::InvalidDigit('a'))
        );
        assert_eq!(
            "23/3/x".parse::<Rule>(),
            Err(ParseRuleError::InvalidGen(String::from("x")))
        );
        assert_eq!(
            "23/3/1".parse::<Rule>(),
            Err(ParseRuleError::TooFewStates(1))
        );
    }
}
