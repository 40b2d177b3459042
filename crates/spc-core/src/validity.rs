// File: crates/spc-core/src/validity.rs
// Summary: Per-row validity predicate deciding which input rows enter the series.

use crate::chart_type::ChartType;

/// Decides whether one input row can be charted under `chart_type`.
/// Called exactly once per candidate row.
pub trait RowValidator {
    fn is_valid(&self, numerator: Option<f64>, denominator: Option<f64>, chart_type: ChartType) -> bool;
}

/// Domain rules of the built-in chart catalog.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChartTypeRules;

impl RowValidator for ChartTypeRules {
    fn is_valid(&self, numerator: Option<f64>, denominator: Option<f64>, chart_type: ChartType) -> bool {
        let Some(num) = numerator.filter(|v| v.is_finite()) else {
            return false;
        };
        if chart_type.needs_non_negative() && num < 0.0 {
            return false;
        }
        if !chart_type.uses_denominator() {
            return true;
        }
        let Some(den) = denominator.filter(|v| v.is_finite() && *v > 0.0) else {
            return false;
        };
        if chart_type.is_percentage() {
            return (0.0..=den).contains(&num);
        }
        true
    }
}

impl<F> RowValidator for F
where
    F: Fn(Option<f64>, Option<f64>, ChartType) -> bool,
{
    fn is_valid(&self, numerator: Option<f64>, denominator: Option<f64>, chart_type: ChartType) -> bool {
        self(numerator, denominator, chart_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proportions_need_positive_denominator() {
        let rules = ChartTypeRules;
        assert!(rules.is_valid(Some(2.0), Some(10.0), ChartType::P));
        assert!(!rules.is_valid(Some(1.0), Some(0.0), ChartType::P));
        assert!(!rules.is_valid(Some(1.0), None, ChartType::PPrime));
        assert!(!rules.is_valid(Some(11.0), Some(10.0), ChartType::P));
    }

    #[test]
    fn rates_need_non_negative_numerator() {
        let rules = ChartTypeRules;
        assert!(!rules.is_valid(Some(-1.0), Some(5.0), ChartType::U));
        assert!(rules.is_valid(Some(0.0), Some(5.0), ChartType::U));
        assert!(!rules.is_valid(Some(-3.0), None, ChartType::C));
    }

    #[test]
    fn individuals_ignore_denominator() {
        let rules = ChartTypeRules;
        assert!(rules.is_valid(Some(-4.5), None, ChartType::I));
        assert!(rules.is_valid(Some(4.5), Some(0.0), ChartType::Run));
        assert!(!rules.is_valid(None, Some(1.0), ChartType::I));
        assert!(!rules.is_valid(Some(f64::NAN), None, ChartType::I));
    }

    #[test]
    fn closures_are_validators() {
        let accept_all = |_: Option<f64>, _: Option<f64>, _: ChartType| true;
        assert!(accept_all.is_valid(None, None, ChartType::P));
    }
}
