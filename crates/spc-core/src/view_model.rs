// File: crates/spc-core/src/view_model.rs
// Summary: View-model assembly; runs series -> limits -> points -> lines -> axes for one host update.

use indexmap::IndexMap;
use tracing::{debug, debug_span};

use crate::axis::AxisLimits;
use crate::error::Result;
use crate::input::{is_invalid_data_view, DataView};
use crate::limits::{LimitEngine, LimitResult, LimitSeries, RowFlags};
use crate::selection::SelectionIdBuilder;
use crate::series::Series;
use crate::settings::{Colour, Settings};
use crate::tooltip::{TextTooltip, TooltipFormatter, TooltipInput};
use crate::types::TickLabel;
use crate::validity::{ChartTypeRules, RowValidator};

/// One plotted dot.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotPoint<Id> {
    pub x: usize,
    pub value: Option<f64>,
    pub colour: Colour,
    /// Assigned once the host's selection builder has run.
    pub identity: Option<Id>,
    pub highlighted: bool,
    pub tooltip: String,
}

impl<Id> PlotPoint<Id> {
    /// Stand-in point of the empty view.
    pub fn placeholder(settings: &Settings) -> Self {
        Self {
            x: 0,
            value: None,
            colour: settings.scatter.colour.clone(),
            identity: None,
            highlighted: false,
            tooltip: String::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinePoint {
    pub x: usize,
    pub line_value: Option<f64>,
    pub group: LimitSeries,
}

/// Line points grouped by series label, in first-seen order.
pub type GroupedLines = Vec<(LimitSeries, Vec<LinePoint>)>;

/// External collaborators the pipeline calls into.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub validator: &'a dyn RowValidator,
    pub engine: &'a dyn LimitEngine,
    pub tooltips: &'a dyn TooltipFormatter,
}

impl<'a> Collaborators<'a> {
    /// Built-in validity rules and text tooltips around `engine`.
    pub fn new(engine: &'a dyn LimitEngine) -> Self {
        Self { validator: &ChartTypeRules, engine, tooltips: &TextTooltip }
    }

    pub fn with_validator(mut self, validator: &'a dyn RowValidator) -> Self {
        self.validator = validator;
        self
    }

    pub fn with_tooltips(mut self, tooltips: &'a dyn TooltipFormatter) -> Self {
        self.tooltips = tooltips;
        self
    }
}

/// Everything the renderer needs for one update. Built once, never mutated;
/// the next update replaces it.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewModel<Id> {
    pub input_data: Series,
    pub input_settings: Settings,
    pub calculated_limits: Option<LimitResult>,
    pub plot_points: Vec<PlotPoint<Id>>,
    pub grouped_lines: GroupedLines,
    pub any_highlights: bool,
    pub axis_limits: AxisLimits,
    pub display_plot: bool,
    pub percent_labels: bool,
    pub tick_labels: Vec<TickLabel>,
}

impl<Id> ViewModel<Id> {
    /// Inert view for updates without usable data.
    pub fn empty(settings: &Settings) -> Self {
        Self {
            input_data: Series::empty(settings),
            input_settings: settings.clone(),
            calculated_limits: None,
            plot_points: vec![PlotPoint::placeholder(settings)],
            grouped_lines: Vec::new(),
            any_highlights: false,
            axis_limits: AxisLimits::empty(),
            display_plot: false,
            percent_labels: false,
            tick_labels: Vec::new(),
        }
    }

    /// Build the view model for one host update.
    ///
    /// An invalid data view short-circuits to [`ViewModel::empty`] before the
    /// limit engine is touched. A view missing its denominators column, or an
    /// engine result that does not line up with the series, is an error.
    pub fn from_update<B>(
        data_views: &[DataView],
        settings: &Settings,
        collaborators: Collaborators<'_>,
        host: &B,
    ) -> Result<Self>
    where
        B: SelectionIdBuilder<Id = Id>,
    {
        let _span = debug_span!("view_model").entered();
        let categorical = match data_views.first().and_then(|dv| dv.categorical.as_ref()) {
            Some(c) if !is_invalid_data_view(data_views) => c,
            _ => {
                debug!("invalid data view, rendering empty state");
                return Ok(Self::empty(settings));
            }
        };

        let input_data = Series::build(categorical, settings, collaborators.validator)?;
        let any_highlights = input_data.any_highlights();
        let percent_labels = input_data.chart_type.is_percentage() && input_data.multiplier == 1.0;

        let calculated_limits = {
            let _span = debug_span!("limits", rows = input_data.len()).entered();
            collaborators.engine.compute_limits(&input_data, settings)
        };
        calculated_limits.check_alignment(input_data.len())?;

        let (mut plot_points, tick_labels) =
            plot_data(&input_data, settings, &calculated_limits, percent_labels, collaborators.tooltips);
        if let Some(categories) = input_data.categories.as_deref() {
            for (point, key) in plot_points.iter_mut().zip(&input_data.keys) {
                point.identity = Some(host.build_selection_id(categories, key.id));
            }
        }

        let grouped_lines = grouped_lines(&calculated_limits);
        let axis_limits = AxisLimits::new(&input_data, settings, &calculated_limits);
        let display_plot = plot_points.len() > 1;
        debug!(points = plot_points.len(), groups = grouped_lines.len(), display_plot, "view model assembled");

        Ok(Self {
            input_data,
            input_settings: settings.clone(),
            calculated_limits: Some(calculated_limits),
            plot_points,
            grouped_lines,
            any_highlights,
            axis_limits,
            display_plot,
            percent_labels,
            tick_labels,
        })
    }
}

/// Dot colour for a row. Later signals override earlier ones:
/// shift, then trend, then two-in-three, then astronomical point.
pub fn outlier_colour<'s>(settings: &'s Settings, flags: RowFlags) -> &'s Colour {
    let o = &settings.outliers;
    let mut colour = &settings.scatter.colour;
    if flags.shift { colour = &o.shift_colour; }
    if flags.trend { colour = &o.trend_colour; }
    if flags.two_in_three { colour = &o.twointhree_colour; }
    if flags.astpoint { colour = &o.ast_colour; }
    colour
}

/// Plot points and tick labels, one of each per limit row. Identities are left unset.
pub fn plot_data<Id>(
    series: &Series,
    settings: &Settings,
    limits: &LimitResult,
    percent_labels: bool,
    tooltips: &dyn TooltipFormatter,
) -> (Vec<PlotPoint<Id>>, Vec<TickLabel>) {
    let mut points = Vec::with_capacity(limits.len());
    let mut ticks = Vec::with_capacity(limits.len());
    let (ll99, ul99) = match (limits.ll99.as_deref(), limits.ul99.as_deref()) {
        (Some(l), Some(u)) => (Some(l), Some(u)),
        _ => (None, None),
    };
    let cell = |seq: Option<&[Option<f64>]>, i: usize| seq.and_then(|s| s.get(i).copied().flatten());

    for (i, key) in limits.keys.iter().enumerate() {
        let flags = limits.flags.row(i);
        let value = limits.values.get(i).copied().flatten();
        let tooltip = tooltips.format(&TooltipInput {
            date: key.label.clone(),
            value,
            numerator: cell(limits.numerators.as_deref(), i),
            denominator: cell(limits.denominators.as_deref(), i),
            target: cell(limits.targets.as_deref(), i),
            ll99: cell(ll99, i),
            ul99: cell(ul99, i),
            chart_type: series.chart_type,
            multiplier: series.multiplier,
            prop_labels: percent_labels,
            flags,
        });
        points.push(PlotPoint {
            x: key.x,
            value,
            colour: outlier_colour(settings, flags).clone(),
            identity: None,
            highlighted: series.is_highlighted(key.id),
            tooltip,
        });
        ticks.push(TickLabel { x: key.x, label: key.label.clone() });
    }
    (points, ticks)
}

/// One line point per (row, limit series), grouped by series.
pub fn grouped_lines(limits: &LimitResult) -> GroupedLines {
    let mut groups: IndexMap<LimitSeries, Vec<LinePoint>> = IndexMap::with_capacity(LimitSeries::ALL.len());
    for (i, key) in limits.keys.iter().enumerate() {
        for which in LimitSeries::ALL {
            groups
                .entry(which)
                .or_insert_with(|| Vec::with_capacity(limits.len()))
                .push(LinePoint { x: key.x, line_value: limits.at(which, i), group: which });
        }
    }
    groups.into_iter().collect()
}
