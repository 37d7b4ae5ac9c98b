use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// The restaurants of the group. Declaration order is the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "BRIQUE")]
    Brique,
    #[serde(rename = "QUINTANA")]
    Quintana,
    #[serde(rename = "VERÍSSIMO", alias = "VERISSIMO")]
    Verissimo,
    #[serde(rename = "VISTTA")]
    Vistta,
    #[serde(rename = "HAMPEL")]
    Hampel,
    #[serde(rename = "NAPOLI")]
    Napoli,
}

pub const UNITS: [Unit; 6] = [
    Unit::Brique,
    Unit::Quintana,
    Unit::Verissimo,
    Unit::Vistta,
    Unit::Hampel,
    Unit::Napoli,
];

impl Unit {
    pub fn name(&self) -> &'static str {
        match self {
            Unit::Brique => "BRIQUE",
            Unit::Quintana => "QUINTANA",
            Unit::Verissimo => "VERÍSSIMO",
            Unit::Vistta => "VISTTA",
            Unit::Hampel => "HAMPEL",
            Unit::Napoli => "NAPOLI",
        }
    }

    /// Chart color as a `#rrggbb` hex string.
    pub fn color(&self) -> &'static str {
        match self {
            Unit::Brique => "#ef4444",
            Unit::Quintana => "#bef264",
            Unit::Verissimo => "#f97316",
            Unit::Vistta => "#1e40af",
            Unit::Hampel => "#7c3aed",
            Unit::Napoli => "#db2777",
        }
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        let hex = &self.color()[1..];
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
        (channel(0), channel(2), channel(4))
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Unit {
    type Err = anyhow::Error;

    fn from_str(input: &str) -> Result<Self> {
        let upper = input.trim().to_uppercase();
        if upper == "VERISSIMO" {
            return Ok(Unit::Verissimo);
        }
        UNITS
            .iter()
            .find(|u| u.name() == upper)
            .copied()
            .ok_or_else(|| anyhow!("Unknown unit: '{}'", input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unit() {
        assert_eq!("brique".parse::<Unit>().unwrap(), Unit::Brique);
        assert_eq!("VERÍSSIMO".parse::<Unit>().unwrap(), Unit::Verissimo);
        assert_eq!("verissimo".parse::<Unit>().unwrap(), Unit::Verissimo);
        assert!("PIZZARIA".parse::<Unit>().is_err());
    }

    #[test]
    fn test_serde_uses_display_name() {
        assert_eq!(serde_json::to_string(&Unit::Verissimo).unwrap(), "\"VERÍSSIMO\"");
        let u: Unit = serde_json::from_str("\"VERISSIMO\"").unwrap();
        assert_eq!(u, Unit::Verissimo);
    }

    #[test]
    fn test_registry_order_and_colors() {
        let mut sorted = UNITS;
        sorted.sort();
        assert_eq!(sorted, UNITS);
        assert_eq!(Unit::Brique.rgb(), (0xef, 0x44, 0x44));
        assert_eq!(Unit::Vistta.color(), "#1e40af");
    }
}
