// File: crates/spc-core/src/tooltip.rs
// Summary: Tooltip input bundle per plotted point and the default text formatter.

use crate::chart_type::ChartType;
use crate::limits::RowFlags;

/// Everything a tooltip may show for one point. Missing statistics are `None`.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipInput {
    pub date: String,
    pub value: Option<f64>,
    pub numerator: Option<f64>,
    pub denominator: Option<f64>,
    pub target: Option<f64>,
    /// 99% lower and upper limits; both `None` when the engine omits either.
    pub ll99: Option<f64>,
    pub ul99: Option<f64>,
    pub chart_type: ChartType,
    pub multiplier: f64,
    pub prop_labels: bool,
    pub flags: RowFlags,
}

pub trait TooltipFormatter {
    fn format(&self, input: &TooltipInput) -> String;
}

/// One `Label: value` line per available field.
#[derive(Clone, Copy, Debug, Default)]
pub struct TextTooltip;

impl TextTooltip {
    fn number(v: f64, pct: bool) -> String {
        if pct {
            return format!("{:.2}%", v * 100.0);
        }
        let s = format!("{v:.4}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

impl TooltipFormatter for TextTooltip {
    fn format(&self, input: &TooltipInput) -> String {
        let pct = input.prop_labels;
        let mut lines = vec![format!("Date: {}", input.date)];
        if let Some(v) = input.value {
            lines.push(format!("Value: {}", Self::number(v, pct)));
        }
        if let Some(n) = input.numerator {
            lines.push(format!("Numerator: {}", Self::number(n, false)));
        }
        if let Some(d) = input.denominator {
            lines.push(format!("Denominator: {}", Self::number(d, false)));
        }
        if let Some(u) = input.ul99 {
            lines.push(format!("Upper 99% Limit: {}", Self::number(u, pct)));
        }
        if let Some(t) = input.target {
            lines.push(format!("Centerline: {}", Self::number(t, pct)));
        }
        if let Some(l) = input.ll99 {
            lines.push(format!("Lower 99% Limit: {}", Self::number(l, pct)));
        }
        let f = input.flags;
        if !f.any() {
            return lines.join("\n");
        }
        let patterns: Vec<&str> = [
            (f.astpoint, "Astronomical Point"),
            (f.shift, "Shift"),
            (f.trend, "Trend"),
            (f.two_in_three, "Two-in-Three"),
        ]
        .into_iter()
        .filter_map(|(set, name)| set.then_some(name))
        .collect();
        lines.push(format!("Pattern: {}", patterns.join(", ")));
        lines.join("\n")
    }
}
