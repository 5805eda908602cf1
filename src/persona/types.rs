//! Persona input types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of supported age brackets, in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeBracket {
    #[serde(rename = "18-24")]
    Age18To24,
    #[serde(rename = "25-34")]
    Age25To34,
    #[serde(rename = "35-44")]
    Age35To44,
    #[serde(rename = "45-54")]
    Age45To54,
    #[serde(rename = "55+")]
    Age55Plus,
}

impl AgeBracket {
    pub const ALL: [AgeBracket; 5] = [
        AgeBracket::Age18To24,
        AgeBracket::Age25To34,
        AgeBracket::Age35To44,
        AgeBracket::Age45To54,
        AgeBracket::Age55Plus,
    ];

    /// Bracket used whenever a label is not recognised.
    pub const DEFAULT: AgeBracket = AgeBracket::Age25To34;

    pub fn label(&self) -> &'static str {
        match self {
            AgeBracket::Age18To24 => "18-24",
            AgeBracket::Age25To34 => "25-34",
            AgeBracket::Age35To44 => "35-44",
            AgeBracket::Age45To54 => "45-54",
            AgeBracket::Age55Plus => "55+",
        }
    }

    pub fn generation(&self) -> &'static str {
        match self {
            AgeBracket::Age18To24 => "Gen Z",
            AgeBracket::Age25To34 => "Millennials",
            AgeBracket::Age35To44 => "Gen X Early",
            AgeBracket::Age45To54 => "Gen X Late",
            AgeBracket::Age55Plus => "Boomers+",
        }
    }

    /// Position in `ALL`.
    pub fn index(&self) -> usize {
        match self {
            AgeBracket::Age18To24 => 0,
            AgeBracket::Age25To34 => 1,
            AgeBracket::Age35To44 => 2,
            AgeBracket::Age45To54 => 3,
            AgeBracket::Age55Plus => 4,
        }
    }

    /// Brackets directly before and after this one, in ascending order.
    pub fn adjacent(&self) -> Vec<AgeBracket> {
        let idx = self.index();
        let mut adjacent = Vec::with_capacity(2);
        if idx > 0 {
            adjacent.push(AgeBracket::ALL[idx - 1]);
        }
        if idx + 1 < AgeBracket::ALL.len() {
            adjacent.push(AgeBracket::ALL[idx + 1]);
        }
        adjacent
    }

    pub fn from_label_or_default(label: &str) -> AgeBracket {
        label.parse().unwrap_or(AgeBracket::DEFAULT)
    }
}

impl fmt::Display for AgeBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for AgeBracket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        AgeBracket::ALL
            .iter()
            .find(|bracket| bracket.label() == trimmed)
            .copied()
            .ok_or_else(|| format!("unknown age bracket: {}", s))
    }
}

/// The (age bracket, location, interests) tuple describing a target audience.
///
/// The age bracket is kept as received so it can be echoed back; analysis
/// code resolves it with [`AgeBracket::from_label_or_default`]. Interest
/// order is priority order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaProfile {
    pub age_bracket: String,
    pub location: String,
    pub interests: Vec<String>,
}

impl PersonaProfile {
    pub fn new(age_bracket: &str, location: &str, interests: &[&str]) -> Self {
        Self {
            age_bracket: age_bracket.to_string(),
            location: location.to_string(),
            interests: interests.iter().map(|i| i.to_string()).collect(),
        }
    }

    pub fn bracket(&self) -> AgeBracket {
        AgeBracket::from_label_or_default(&self.age_bracket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labels() {
        for bracket in AgeBracket::ALL {
            assert_eq!(bracket.label().parse::<AgeBracket>(), Ok(bracket));
        }
        assert!("17-19".parse::<AgeBracket>().is_err());
        assert_eq!(AgeBracket::from_label_or_default("60-70"), AgeBracket::Age25To34);
    }

    #[test]
    fn test_adjacent_brackets() {
        assert_eq!(AgeBracket::Age18To24.adjacent(), vec![AgeBracket::Age25To34]);
        assert_eq!(
            AgeBracket::Age35To44.adjacent(),
            vec![AgeBracket::Age25To34, AgeBracket::Age45To54]
        );
        assert_eq!(AgeBracket::Age55Plus.adjacent(), vec![AgeBracket::Age45To54]);
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&AgeBracket::Age55Plus).unwrap();
        assert_eq!(json, "\"55+\"");
    }
}
