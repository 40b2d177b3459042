// File: crates/spc-demo/src/main.rs
// Summary: Demo loads a CSV of numerators/denominators, assembles the SPC view model and prints it.
// Usage: spc-demo <data.csv> [settings.json]   (RUST_LOG=debug shows pipeline stages)

use anyhow::{Context, Result};
use spc_core::{
    CategoricalView, CategorySelection, CategoryColumn, Collaborators, DataView, LimitResult, PrimitiveValue, Role,
    SelectionId, Series, Settings, ValueColumn, ViewModel,
};
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let data_path = args.next().context("usage: spc-demo <data.csv> [settings.json]")?;
    let settings = match args.next() {
        Some(p) => {
            let json = std::fs::read_to_string(&p).with_context(|| format!("reading settings '{p}'"))?;
            Settings::from_json(&json).with_context(|| format!("parsing settings '{p}'"))?
        }
        None => Settings::default(),
    };

    let view = load_csv(Path::new(&data_path)).with_context(|| format!("failed to load CSV '{data_path}'"))?;
    tracing::info!(path = %data_path, "loaded input table");

    let engine = median_engine;
    let vm: ViewModel<SelectionId> =
        ViewModel::from_update(&[DataView::new(view)], &settings, Collaborators::new(&engine), &CategorySelection)?;

    println!(
        "chart={} multiplier={} points={} display={} percent={}",
        vm.input_data.chart_type,
        vm.input_data.multiplier,
        vm.plot_points.len(),
        vm.display_plot,
        vm.percent_labels
    );
    println!("y axis: [{:.4}, {:.4}]", vm.axis_limits.y.lower, vm.axis_limits.y.upper);
    for (p, tick) in vm.plot_points.iter().zip(&vm.tick_labels) {
        let value = p.value.map_or_else(|| "-".to_string(), |v| format!("{v:.4}"));
        let mark = if p.highlighted { "*" } else { " " };
        println!("{mark}{:>4}  {:<24} {:>12}  {}", p.x, tick.label, value, p.colour);
    }
    for (group, points) in &vm.grouped_lines {
        let present = points.iter().filter(|p| p.line_value.is_some()).count();
        println!("line {group:<8} {present}/{} values", points.len());
    }
    Ok(())
}

/// Values (ratio when a denominator is present) with the median as centre line.
/// The demo has no control-limit statistics, so bounds and flags are absent.
fn median_engine(series: &Series, _settings: &Settings) -> LimitResult {
    let values: Vec<Option<f64>> = series
        .numerators
        .iter()
        .zip(&series.denominators)
        .map(|(n, d)| match (*n, *d) {
            (Some(n), Some(d)) if series.chart_type.uses_denominator() => Some(n / d * series.multiplier),
            (Some(n), _) => Some(n * series.multiplier),
            _ => None,
        })
        .collect();
    let mut sorted: Vec<f64> = values.iter().flatten().copied().collect();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let median = match sorted.len() {
        0 => None,
        n if n % 2 == 1 => Some(sorted[n / 2]),
        n => Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0),
    };
    let mut result = LimitResult::values_only(series.keys.clone(), values);
    result.targets = Some(vec![median; series.len()]);
    result.numerators = Some(series.numerators.clone());
    result.denominators = Some(series.denominators.clone());
    result
}

/// Build a categorical view from a CSV with a category column followed by
/// `numerator`, `denominator` and optional `group`, `chart_type`, `multiplier`, `highlight` columns.
fn load_csv(path: &Path) -> Result<CategoricalView> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr.headers()?.iter().map(|h| h.trim().to_lowercase()).collect::<Vec<_>>();
    tracing::debug!(?headers, "csv headers");
    let idx = |names: &[&str]| headers.iter().position(|h| names.contains(&h.as_str()));

    let i_num = idx(&["numerator", "numerators", "n"]).context("no numerator column")?;
    let i_den = idx(&["denominator", "denominators", "d"]);
    let i_group = idx(&["group", "groups"]);
    let i_type = idx(&["chart_type", "type"]);
    let i_mult = idx(&["multiplier", "chart_multiplier"]);
    let i_hl = idx(&["highlight", "highlights"]);
    let role_columns = [Some(i_num), i_den, i_group, i_type, i_mult, i_hl];
    let category_columns: Vec<usize> = (0..headers.len()).filter(|i| !role_columns.contains(&Some(*i))).collect();

    let mut categories: Vec<Vec<PrimitiveValue>> = vec![Vec::new(); category_columns.len()];
    let mut cols: [Vec<PrimitiveValue>; 6] = Default::default();
    for rec in rdr.records() {
        let rec = rec?;
        let cell = |i: Option<usize>| match i.and_then(|ix| rec.get(ix)).map(str::trim) {
            None | Some("") => PrimitiveValue::Null,
            Some(s) => s.parse::<f64>().map(PrimitiveValue::Number).unwrap_or_else(|_| s.into()),
        };
        for (slot, &ix) in categories.iter_mut().zip(&category_columns) {
            slot.push(rec.get(ix).map_or(PrimitiveValue::Null, |s| s.trim().into()));
        }
        for (col, ix) in cols.iter_mut().zip(role_columns) {
            col.push(cell(ix));
        }
    }

    let [num, den, group, chart_type, mult, highlights] = cols;
    let mut numerators = ValueColumn::new(&headers[i_num], Role::Numerators, num);
    if i_hl.is_some() {
        numerators = numerators.with_highlights(highlights);
    }
    let mut view = CategoricalView::new().with_values(numerators);
    for (ix, values) in category_columns.iter().zip(categories) {
        view = view.with_category(CategoryColumn::new(&headers[*ix], values));
    }
    if i_den.is_some() {
        view = view.with_values(ValueColumn::new("denominators", Role::Denominators, den));
    }
    let optional = [(i_group, Role::Groups, group), (i_type, Role::ChartType, chart_type), (i_mult, Role::ChartMultiplier, mult)];
    for (ix, role, values) in optional {
        if ix.is_some() {
            view = view.with_values(ValueColumn::new(role.name(), role, values));
        }
    }
    Ok(view)
}
