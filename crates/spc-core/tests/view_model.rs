// File: crates/spc-core/tests/view_model.rs
// Purpose: End-to-end view-model assembly against a scripted limit engine.

use std::cell::{Cell, RefCell};

use spc_core::{
    CategoricalView, CategorySelection, CategoryColumn, ChartType, Collaborators, DataView, LimitResult,
    LimitSeries, OutlierFlags, PrimitiveValue, Role, SelectionId, Series, Settings, SpcError, TickLabel,
    TooltipFormatter, TooltipInput, ValueColumn, ViewModel,
};

/// Keeps every bundle it is asked to format.
#[derive(Default)]
struct RecordingTooltips(RefCell<Vec<TooltipInput>>);

impl TooltipFormatter for RecordingTooltips {
    fn format(&self, input: &TooltipInput) -> String {
        self.0.borrow_mut().push(input.clone());
        String::new()
    }
}

/// Ratio values with a mean centre line and fixed-width bands.
fn banded(series: &Series, _settings: &Settings) -> LimitResult {
    let values: Vec<Option<f64>> = series
        .numerators
        .iter()
        .zip(&series.denominators)
        .map(|(n, d)| Some(n.unwrap_or(0.0) / d.unwrap_or(1.0)))
        .collect();
    let n = values.len();
    let mean = values.iter().flatten().sum::<f64>() / n.max(1) as f64;
    let band = |k: f64| Some(vec![Some(mean + k); n]);
    LimitResult {
        keys: series.keys.clone(),
        values,
        numerators: Some(series.numerators.clone()),
        denominators: Some(series.denominators.clone()),
        targets: Some(vec![Some(mean); n]),
        ll99: band(-3.0),
        ll95: band(-2.0),
        ul95: band(2.0),
        ul99: band(3.0),
        flags: OutlierFlags::none(n),
    }
}

fn data_view() -> DataView {
    DataView::new(
        CategoricalView::new()
            .with_category(CategoryColumn::new("date", vec!["2024-01-01".into(), "2024-01-02".into(), "2024-01-03".into(), "2024-01-04".into()]))
            .with_values(
                ValueColumn::numbers("n", Role::Numerators, &[2.0, 1.0, 3.0, 4.0]).with_highlights(vec![
                    PrimitiveValue::Null,
                    PrimitiveValue::Null,
                    PrimitiveValue::Number(3.0),
                    PrimitiveValue::Null,
                ]),
            )
            .with_values(ValueColumn::numbers("d", Role::Denominators, &[10.0, 0.0, 5.0, 8.0])),
    )
}

fn p_settings() -> Settings {
    let mut s = Settings::default();
    s.spc.chart_type = ChartType::P;
    s
}

fn build(views: &[DataView], settings: &Settings) -> Result<ViewModel<SelectionId>, SpcError> {
    ViewModel::from_update(views, settings, Collaborators::new(&banded), &CategorySelection)
}

#[test]
fn invalid_view_renders_empty_state_without_calling_engine() {
    let calls = Cell::new(0);
    let engine = |s: &Series, _: &Settings| -> LimitResult {
        calls.set(calls.get() + 1);
        LimitResult::values_only(s.keys.clone(), vec![None; s.len()])
    };
    let settings = p_settings();
    let vm: ViewModel<SelectionId> =
        ViewModel::from_update(&[DataView::default()], &settings, Collaborators::new(&engine), &CategorySelection)
            .expect("empty state is not an error");

    assert_eq!(calls.get(), 0);
    assert!(vm.input_data.is_empty());
    assert!(vm.calculated_limits.is_none());
    assert_eq!(vm.plot_points.len(), 1);
    assert!(vm.plot_points[0].value.is_none());
    assert!(vm.grouped_lines.is_empty());
    assert!(!vm.display_plot);
    assert_eq!(vm.axis_limits, spc_core::AxisLimits::empty());
}

#[test]
fn populated_state_assembles_every_part() {
    let vm = build(&[data_view()], &p_settings()).expect("view model");

    let xs: Vec<usize> = vm.plot_points.iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![0, 1, 2]);
    assert_eq!(vm.plot_points[1].value, Some(0.6));
    assert!(vm.display_plot);
    assert!(vm.percent_labels);
    assert!(vm.any_highlights);
    assert_eq!(
        vm.tick_labels,
        vec![
            TickLabel { x: 0, label: "01/01/2024".into() },
            TickLabel { x: 1, label: "03/01/2024".into() },
            TickLabel { x: 2, label: "04/01/2024".into() },
        ]
    );
    assert!(vm.plot_points[1].tooltip.contains("Value: 60.00%"));
}

#[test]
fn identities_and_highlights_use_original_row_ids() {
    let vm = build(&[data_view()], &p_settings()).expect("view model");

    let rows: Vec<usize> = vm.plot_points.iter().map(|p| p.identity.as_ref().expect("identity").row).collect();
    assert_eq!(rows, vec![0, 2, 3]);
    assert_eq!(vm.plot_points[0].identity.as_ref().map(|id| id.column.as_str()), Some("date"));

    let highlighted: Vec<bool> = vm.plot_points.iter().map(|p| p.highlighted).collect();
    assert_eq!(highlighted, vec![false, true, false]);
}

#[test]
fn grouped_lines_have_six_groups_of_series_length() {
    let vm = build(&[data_view()], &p_settings()).expect("view model");

    let order: Vec<LimitSeries> = vm.grouped_lines.iter().map(|(g, _)| *g).collect();
    assert_eq!(order, LimitSeries::ALL.to_vec());
    for (group, points) in &vm.grouped_lines {
        assert_eq!(points.len(), 3, "group {group}");
        assert!(points.iter().all(|p| p.group == *group));
        assert_eq!(points.iter().map(|p| p.x).collect::<Vec<_>>(), vec![0, 1, 2]);
    }
}

#[test]
fn omitted_targets_null_out_tooltip_and_line() {
    let no_targets = |s: &Series, st: &Settings| -> LimitResult {
        let mut r = banded(s, st);
        r.targets = None;
        r
    };
    let vm: ViewModel<SelectionId> =
        ViewModel::from_update(&[data_view()], &p_settings(), Collaborators::new(&no_targets), &CategorySelection)
            .expect("view model");

    assert!(vm.plot_points.iter().all(|p| !p.tooltip.contains("Centerline")));
    for (group, points) in &vm.grouped_lines {
        let nulls = points.iter().all(|p| p.line_value.is_none());
        assert_eq!(nulls, *group == LimitSeries::Targets, "group {group}");
    }
}

#[test]
fn one_sided_99_limits_drop_both_from_tooltip() {
    let lower_only = |s: &Series, st: &Settings| -> LimitResult {
        let mut r = banded(s, st);
        r.ul99 = None;
        r
    };
    let vm: ViewModel<SelectionId> =
        ViewModel::from_update(&[data_view()], &p_settings(), Collaborators::new(&lower_only), &CategorySelection)
            .expect("view model");
    assert!(vm.plot_points.iter().all(|p| !p.tooltip.contains("99%")));
}

#[test]
fn outlier_flags_resolve_colours_by_priority() {
    let flagged = |s: &Series, st: &Settings| -> LimitResult {
        let mut r = banded(s, st);
        r.flags.shift = vec![true, true, true];
        r.flags.trend = vec![false, true, true];
        r.flags.astpoint = vec![false, false, true];
        r
    };
    let settings = p_settings();
    let vm: ViewModel<SelectionId> =
        ViewModel::from_update(&[data_view()], &settings, Collaborators::new(&flagged), &CategorySelection)
            .expect("view model");

    let o = &settings.outliers;
    assert_eq!(vm.plot_points[0].colour, o.shift_colour);
    assert_eq!(vm.plot_points[1].colour, o.trend_colour);
    assert_eq!(vm.plot_points[2].colour, o.ast_colour);
    assert!(vm.plot_points[2].tooltip.contains("Pattern: Astronomical Point, Shift, Trend"));
}

#[test]
fn single_retained_point_is_not_displayed() {
    let dv = DataView::new(
        CategoricalView::new()
            .with_category(CategoryColumn::new("date", vec!["a".into(), "b".into()]))
            .with_values(ValueColumn::numbers("n", Role::Numerators, &[1.0, 1.0]))
            .with_values(ValueColumn::numbers("d", Role::Denominators, &[2.0, 0.0])),
    );
    let vm = build(&[dv], &p_settings()).expect("view model");
    assert_eq!(vm.plot_points.len(), 1);
    assert!(!vm.display_plot);
}

#[test]
fn percent_labels_need_unit_multiplier() {
    let mut settings = p_settings();
    settings.spc.multiplier = 100.0;
    let vm = build(&[data_view()], &settings).expect("view model");
    assert!(!vm.percent_labels);

    settings.spc.chart_type = ChartType::U;
    settings.spc.multiplier = 1.0;
    let vm = build(&[data_view()], &settings).expect("view model");
    assert!(!vm.percent_labels);
}

#[test]
fn missing_denominators_propagates() {
    let dv = DataView::new(
        CategoricalView::new()
            .with_category(CategoryColumn::new("date", vec!["a".into()]))
            .with_values(ValueColumn::numbers("n", Role::Numerators, &[1.0])),
    );
    assert!(matches!(build(&[dv], &p_settings()), Err(SpcError::MissingRole(Role::Denominators))));
}

#[test]
fn misaligned_engine_output_is_rejected() {
    let short = |s: &Series, st: &Settings| -> LimitResult {
        let mut r = banded(s, st);
        r.ll95 = Some(vec![None]);
        r
    };
    let res: Result<ViewModel<SelectionId>, _> =
        ViewModel::from_update(&[data_view()], &p_settings(), Collaborators::new(&short), &CategorySelection);
    assert!(matches!(res, Err(SpcError::MisalignedLimits { name: "ll95", expected: 3, actual: 1 })));
}

#[test]
fn rebuilding_from_same_input_is_identical() {
    let settings = p_settings();
    let a = build(&[data_view()], &settings).expect("first");
    let b = build(&[data_view()], &settings).expect("second");
    assert_eq!(a, b);
}

#[test]
fn tooltip_bundle_nulls_statistics_the_engine_omits() {
    let values_only = |s: &Series, st: &Settings| -> LimitResult {
        let full = banded(s, st);
        let mut r = LimitResult::values_only(full.keys, full.values);
        r.ll99 = full.ll99;
        r
    };
    let tooltips = RecordingTooltips::default();
    let collaborators = Collaborators::new(&values_only).with_tooltips(&tooltips);
    let vm: ViewModel<SelectionId> =
        ViewModel::from_update(&[data_view()], &p_settings(), collaborators, &CategorySelection).expect("view model");

    let bundles = tooltips.0.into_inner();
    assert_eq!(bundles.len(), vm.plot_points.len());
    for (bundle, point) in bundles.iter().zip(&vm.plot_points) {
        assert_eq!(bundle.value, point.value);
        assert_eq!(bundle.target, None);
        assert_eq!(bundle.numerator, None);
        assert_eq!(bundle.denominator, None);
        assert_eq!((bundle.ll99, bundle.ul99), (None, None));
        assert_eq!(bundle.chart_type, ChartType::P);
        assert!(bundle.prop_labels);
    }
    assert_eq!(bundles.iter().map(|b| b.date.as_str()).collect::<Vec<_>>(), ["01/01/2024", "03/01/2024", "04/01/2024"]);
}

#[test]
fn tooltip_bundle_carries_statistics_the_engine_provides() {
    let tooltips = RecordingTooltips::default();
    let vm: ViewModel<SelectionId> = ViewModel::from_update(
        &[data_view()],
        &p_settings(),
        Collaborators::new(&banded).with_tooltips(&tooltips),
        &CategorySelection,
    )
    .expect("view model");

    let bundles = tooltips.0.into_inner();
    let limits = vm.calculated_limits.as_ref().expect("limits");
    for (i, bundle) in bundles.iter().enumerate() {
        assert_eq!(bundle.numerator, vm.input_data.numerators[i]);
        assert_eq!(bundle.denominator, vm.input_data.denominators[i]);
        assert_eq!(bundle.target, limits.at(LimitSeries::Targets, i));
        assert_eq!(bundle.ll99, limits.at(LimitSeries::Ll99, i));
        assert_eq!(bundle.ul99, limits.at(LimitSeries::Ul99, i));
    }
}
