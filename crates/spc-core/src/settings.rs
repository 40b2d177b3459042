// File: crates/spc-core/src/settings.rs
// Summary: User-configurable display settings (chart defaults, point and outlier colours, axis overrides).

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::chart_type::ChartType;
use crate::error::{Result, SpcError};

/// `#rrggbb` colour string as stored in the host's formatting pane.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Colour(String);

impl Colour {
    pub fn parse(raw: &str) -> Result<Self> {
        let s = raw.trim();
        let hex = s.strip_prefix('#').unwrap_or("");
        if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            Ok(Self(s.to_ascii_lowercase()))
        } else {
            Err(SpcError::InvalidColour(raw.to_string()))
        }
    }

    /// Built from a literal known to be well formed.
    fn lit(hex: &'static str) -> Self { Self(hex.to_string()) }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl<'de> Deserialize<'de> for Colour {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Colour::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpcSettings {
    pub chart_type: ChartType,
    pub multiplier: f64,
}

impl Default for SpcSettings {
    fn default() -> Self { Self { chart_type: ChartType::I, multiplier: 1.0 } }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterSettings {
    pub colour: Colour,
    pub size: f64,
}

impl Default for ScatterSettings {
    fn default() -> Self { Self { colour: Colour::lit("#a6a6a6"), size: 2.5 } }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlierSettings {
    /// Astronomical point (beyond the 99% limits).
    pub ast_colour: Colour,
    pub shift_colour: Colour,
    pub trend_colour: Colour,
    /// Two out of three points beyond the 95% limits.
    pub twointhree_colour: Colour,
}

impl Default for OutlierSettings {
    fn default() -> Self {
        Self {
            ast_colour: Colour::lit("#e1c233"),
            shift_colour: Colour::lit("#ed8b00"),
            trend_colour: Colour::lit("#361475"),
            twointhree_colour: Colour::lit("#0072c6"),
        }
    }
}

/// Explicit axis limits; `None` lets the data decide.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisSettings {
    pub xlimit_l: Option<f64>,
    pub xlimit_u: Option<f64>,
    pub ylimit_l: Option<f64>,
    pub ylimit_u: Option<f64>,
    pub xlimit_ticks: bool,
    pub ylimit_ticks: bool,
}

impl Default for AxisSettings {
    fn default() -> Self {
        Self { xlimit_l: None, xlimit_u: None, ylimit_l: None, ylimit_u: None, xlimit_ticks: true, ylimit_ticks: true }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub spc: SpcSettings,
    pub scatter: ScatterSettings,
    pub outliers: OutlierSettings,
    pub axis: AxisSettings,
}

impl Settings {
    /// Parse a (possibly partial) JSON settings document over the defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        tracing::debug!(chart_type = %settings.spc.chart_type, multiplier = settings.spc.multiplier, "settings loaded");
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> { Ok(serde_json::to_string_pretty(self)?) }
}
