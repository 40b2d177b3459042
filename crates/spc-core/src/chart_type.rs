// File: crates/spc-core/src/chart_type.rs
// Summary: SPC chart catalog (run, XmR, attribute and rare-event charts).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::SpcError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChartType {
    Run,
    I,
    Mr,
    C,
    P,
    /// Laney-adjusted proportion chart.
    PPrime,
    U,
    /// Laney-adjusted rate chart.
    UPrime,
    XBar,
    S,
    G,
    T,
}

impl ChartType {
    pub const ALL: [ChartType; 12] = [
        ChartType::Run,
        ChartType::I,
        ChartType::Mr,
        ChartType::C,
        ChartType::P,
        ChartType::PPrime,
        ChartType::U,
        ChartType::UPrime,
        ChartType::XBar,
        ChartType::S,
        ChartType::G,
        ChartType::T,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ChartType::Run => "run",
            ChartType::I => "i",
            ChartType::Mr => "mr",
            ChartType::C => "c",
            ChartType::P => "p",
            ChartType::PPrime => "pp",
            ChartType::U => "u",
            ChartType::UPrime => "up",
            ChartType::XBar => "xbar",
            ChartType::S => "s",
            ChartType::G => "g",
            ChartType::T => "t",
        }
    }

    /// Charts whose values are proportions and get percent labels at multiplier 1.
    pub const fn is_percentage(self) -> bool {
        matches!(self, ChartType::P | ChartType::PPrime)
    }

    /// Charts that read the denominator column.
    pub const fn uses_denominator(self) -> bool {
        matches!(
            self,
            ChartType::P | ChartType::PPrime | ChartType::U | ChartType::UPrime | ChartType::XBar | ChartType::S
        )
    }

    /// Count, rate and rare-event charts cannot take negative numerators.
    pub const fn needs_non_negative(self) -> bool {
        matches!(self, ChartType::C | ChartType::U | ChartType::UPrime | ChartType::G | ChartType::T)
    }
}

impl Default for ChartType {
    fn default() -> Self { ChartType::I }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for ChartType {
    type Err = SpcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        ChartType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(tag))
            .ok_or_else(|| SpcError::UnknownChartType(tag.to_string()))
    }
}

impl Serialize for ChartType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ChartType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
