// File: crates/spc-core/src/series.rs
// Summary: Series builder; validates input rows and re-indexes them into a dense, filtered series.
// Notes:
// - `keys[x].id` maps every filtered position back to its original row. Highlights
//   and the category handle stay in original-row order and must be read via `id`.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::chart_type::ChartType;
use crate::dates::category_label;
use crate::error::Result;
use crate::input::{CategoricalView, CategoryColumn, PrimitiveValue, RoleColumns, ValueColumn};
use crate::settings::Settings;
use crate::types::RowKey;
use crate::validity::RowValidator;

#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub keys: Vec<RowKey>,
    pub numerators: Vec<Option<f64>>,
    pub denominators: Vec<Option<f64>>,
    /// Empty when no groups column is bound.
    pub groups: Vec<String>,
    pub chart_type: ChartType,
    pub multiplier: f64,
    /// Indexed by original row id, not by `x`.
    pub highlights: Option<Vec<PrimitiveValue>>,
    pub categories: Option<Arc<CategoryColumn>>,
}

impl Series {
    /// Series with no rows, used by the empty view state.
    pub fn empty(settings: &Settings) -> Self {
        Self {
            keys: Vec::new(),
            numerators: Vec::new(),
            denominators: Vec::new(),
            groups: Vec::new(),
            chart_type: settings.spc.chart_type,
            multiplier: settings.spc.multiplier,
            highlights: None,
            categories: None,
        }
    }

    /// Bind roles, drop rows rejected by `validator`, and project every
    /// per-row column through the same list of kept rows.
    pub fn build(view: &CategoricalView, settings: &Settings, validator: &dyn RowValidator) -> Result<Self> {
        let cols = RoleColumns::bind(view)?;

        let numerators = numbers(cols.numerators);
        let denominators = numbers(cols.denominators);
        let groups: Option<Vec<String>> =
            cols.groups.map(|c| c.values.iter().map(PrimitiveValue::to_label).collect());
        let chart_type = match cols.chart_type.and_then(|c| c.values.first()).filter(|v| !v.is_null()) {
            Some(tag) => tag.to_label().parse::<ChartType>()?,
            None => settings.spc.chart_type,
        };
        let multiplier = cols
            .chart_multiplier
            .and_then(|c| c.values.first())
            .and_then(PrimitiveValue::as_number)
            .unwrap_or(settings.spc.multiplier);

        let mut kept = Vec::with_capacity(denominators.len());
        let mut keys = Vec::with_capacity(denominators.len());
        for (i, &den) in denominators.iter().enumerate() {
            let num = numerators.get(i).copied().flatten();
            if !validator.is_valid(num, den, chart_type) {
                trace!(row = i, "row rejected");
                continue;
            }
            let label = view
                .categories
                .iter()
                .map(|c| c.values.get(i).map(category_label).unwrap_or_default())
                .collect::<Vec<_>>()
                .join(" ");
            keys.push(RowKey::new(kept.len(), i, label));
            kept.push(i);
        }
        debug!(
            rows = denominators.len(),
            kept = kept.len(),
            chart_type = %chart_type,
            multiplier,
            "series built"
        );

        Ok(Self {
            keys,
            numerators: extract_values(&numerators, &kept),
            denominators: extract_values(&denominators, &kept),
            groups: groups.map(|g| extract_values(&g, &kept)).unwrap_or_default(),
            chart_type,
            multiplier,
            highlights: cols.numerators.highlights.clone(),
            categories: view.categories.first().cloned(),
        })
    }

    pub fn len(&self) -> usize { self.keys.len() }

    pub fn is_empty(&self) -> bool { self.keys.is_empty() }

    pub fn any_highlights(&self) -> bool { self.highlights.is_some() }

    /// Whether the row with original index `id` is highlighted by the host.
    pub fn is_highlighted(&self, id: usize) -> bool {
        self.highlights
            .as_ref()
            .and_then(|h| h.get(id))
            .is_some_and(PrimitiveValue::is_truthy)
    }
}

/// Values at the `kept` original indices, in `kept` order. Indices past the end
/// of a short column read as `T::default()`, so the output always has one entry per kept row.
pub fn extract_values<T: Clone + Default>(values: &[T], kept: &[usize]) -> Vec<T> {
    kept.iter().map(|&i| values.get(i).cloned().unwrap_or_default()).collect()
}

fn numbers(column: &ValueColumn) -> Vec<Option<f64>> {
    column.values.iter().map(PrimitiveValue::as_number).collect()
}
