//! The three choices and their dominance relation.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// A hand shape.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Choice {
    /// Beats scissors.
    Rock,
    /// Beats rock.
    Paper,
    /// Beats paper.
    Scissors,
}

impl Choice {
    /// All choices in a stable order.
    pub fn all() -> Vec<Choice> {
        Choice::iter().collect()
    }

    /// The choice this one defeats.
    pub fn beats(self) -> Choice {
        match self {
            Choice::Rock => Choice::Scissors,
            Choice::Scissors => Choice::Paper,
            Choice::Paper => Choice::Rock,
        }
    }

    /// Parses user input: a name (`rock`), its initial (`r`) or a 1-based number.
    pub fn parse(input: &str) -> Option<Choice> {
        match input.trim().to_lowercase().as_str() {
            "rock" | "r" | "1" => Some(Choice::Rock),
            "paper" | "p" | "2" => Some(Choice::Paper),
            "scissors" | "s" | "3" => Some(Choice::Scissors),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dominance_is_a_three_cycle() {
        for choice in Choice::iter() {
            assert_ne!(choice.beats(), choice);
            assert_eq!(choice.beats().beats().beats(), choice);
        }
    }

    #[test]
    fn test_parse_accepts_names_initials_and_numbers() {
        assert_eq!(Choice::parse("Rock"), Some(Choice::Rock));
        assert_eq!(Choice::parse(" p "), Some(Choice::Paper));
        assert_eq!(Choice::parse("3"), Some(Choice::Scissors));
        assert_eq!(Choice::parse("lizard"), None);
    }
}
