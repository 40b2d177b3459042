// File: crates/spc-core/src/axis.rs
// Summary: Axis bounds derived from the series, settings overrides and computed limits.

use crate::limits::{LimitResult, LimitSeries};
use crate::series::Series;
use crate::settings::Settings;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AxisRange {
    pub lower: f64,
    pub upper: f64,
}

impl AxisRange {
    pub const fn new(lower: f64, upper: f64) -> Self { Self { lower, upper } }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AxisLimits {
    pub x: AxisRange,
    pub y: AxisRange,
    pub x_ticks: bool,
    pub y_ticks: bool,
}

impl AxisLimits {
    /// Bounds of the empty view: zero ranges, no ticks.
    pub fn empty() -> Self { Self::default() }

    pub fn new(series: &Series, settings: &Settings, limits: &LimitResult) -> Self {
        let axis = &settings.axis;
        let n = series.len();
        let x_auto = AxisRange::new(-1.0, n as f64);

        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        for which in [LimitSeries::Values, LimitSeries::Ll99, LimitSeries::Ul99, LimitSeries::Targets] {
            for v in limits.series(which).unwrap_or_default().iter().flatten().filter(|v| v.is_finite()) {
                y_min = y_min.min(*v);
                y_max = y_max.max(*v);
            }
        }
        let y_auto = if y_min.is_finite() && y_max.is_finite() {
            if (y_max - y_min).abs() < 1e-9 { y_max = y_min + 1.0; }
            let m = (y_max - y_min) * 0.1;
            let mut r = AxisRange::new(y_min - m, y_max + m);
            if series.chart_type.is_percentage() {
                r.lower = r.lower.max(0.0);
                r.upper = r.upper.min(series.multiplier);
            }
            r
        } else {
            AxisRange::new(0.0, 1.0)
        };

        Self {
            x: AxisRange::new(axis.xlimit_l.unwrap_or(x_auto.lower), axis.xlimit_u.unwrap_or(x_auto.upper)),
            y: AxisRange::new(axis.ylimit_l.unwrap_or(y_auto.lower), axis.ylimit_u.unwrap_or(y_auto.upper)),
            x_ticks: axis.xlimit_ticks,
            y_ticks: axis.ylimit_ticks,
        }
    }
}
