// File: crates/spc-core/src/limits.rs
// Summary: Limit engine contract and the per-row control-limit results it returns.

use std::fmt;

use crate::error::{Result, SpcError};
use crate::series::Series;
use crate::settings::Settings;
use crate::types::RowKey;

/// Computes control limits and outlier flags for a series. The statistics
/// live behind this trait; the view model only consumes the result.
pub trait LimitEngine {
    fn compute_limits(&self, series: &Series, settings: &Settings) -> LimitResult;
}

impl<F> LimitEngine for F
where
    F: Fn(&Series, &Settings) -> LimitResult,
{
    fn compute_limits(&self, series: &Series, settings: &Settings) -> LimitResult { self(series, settings) }
}

/// Optional per-row sequence: `None` means the engine does not produce it at all,
/// `Some` entries may still be individually null.
pub type Sequence = Option<Vec<Option<f64>>>;

/// Outlier signals, one boolean per row each.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OutlierFlags {
    pub astpoint: Vec<bool>,
    pub trend: Vec<bool>,
    pub shift: Vec<bool>,
    pub two_in_three: Vec<bool>,
}

impl OutlierFlags {
    pub fn none(n: usize) -> Self {
        Self { astpoint: vec![false; n], trend: vec![false; n], shift: vec![false; n], two_in_three: vec![false; n] }
    }

    /// Flags of row `i`; rows past the end read as unflagged.
    pub fn row(&self, i: usize) -> RowFlags {
        let at = |v: &[bool]| v.get(i).copied().unwrap_or(false);
        RowFlags {
            astpoint: at(&self.astpoint),
            trend: at(&self.trend),
            shift: at(&self.shift),
            two_in_three: at(&self.two_in_three),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RowFlags {
    pub astpoint: bool,
    pub trend: bool,
    pub shift: bool,
    pub two_in_three: bool,
}

impl RowFlags {
    pub fn any(&self) -> bool { self.astpoint || self.trend || self.shift || self.two_in_three }
}

/// Named limit series drawn as reference lines, in drawing order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LimitSeries {
    Ll99,
    Ll95,
    Ul95,
    Ul99,
    Targets,
    Values,
}

impl LimitSeries {
    pub const ALL: [LimitSeries; 6] = [
        LimitSeries::Ll99,
        LimitSeries::Ll95,
        LimitSeries::Ul95,
        LimitSeries::Ul99,
        LimitSeries::Targets,
        LimitSeries::Values,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            LimitSeries::Ll99 => "ll99",
            LimitSeries::Ll95 => "ll95",
            LimitSeries::Ul95 => "ul95",
            LimitSeries::Ul99 => "ul99",
            LimitSeries::Targets => "targets",
            LimitSeries::Values => "values",
        }
    }
}

impl fmt::Display for LimitSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.label()) }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LimitResult {
    pub keys: Vec<RowKey>,
    pub values: Vec<Option<f64>>,
    pub numerators: Sequence,
    pub denominators: Sequence,
    pub targets: Sequence,
    pub ll99: Sequence,
    pub ll95: Sequence,
    pub ul95: Sequence,
    pub ul99: Sequence,
    pub flags: OutlierFlags,
}

impl LimitResult {
    /// Result carrying only values; every optional sequence absent, no flags set.
    pub fn values_only(keys: Vec<RowKey>, values: Vec<Option<f64>>) -> Self {
        let n = keys.len();
        Self { keys, values, flags: OutlierFlags::none(n), ..Self::default() }
    }

    pub fn len(&self) -> usize { self.keys.len() }

    pub fn is_empty(&self) -> bool { self.keys.is_empty() }

    /// The sequence behind a line label, or `None` when the engine omits it.
    pub fn series(&self, which: LimitSeries) -> Option<&[Option<f64>]> {
        match which {
            LimitSeries::Ll99 => self.ll99.as_deref(),
            LimitSeries::Ll95 => self.ll95.as_deref(),
            LimitSeries::Ul95 => self.ul95.as_deref(),
            LimitSeries::Ul99 => self.ul99.as_deref(),
            LimitSeries::Targets => self.targets.as_deref(),
            LimitSeries::Values => Some(self.values.as_slice()),
        }
    }

    /// Value of `which` at row `i`; null when the sequence is absent.
    pub fn at(&self, which: LimitSeries, i: usize) -> Option<f64> {
        self.series(which).and_then(|s| s.get(i).copied().flatten())
    }

    /// Every present sequence must line up with the `n` series rows.
    pub fn check_alignment(&self, n: usize) -> Result<()> {
        let check = |name: &'static str, actual: usize| {
            if actual == n { Ok(()) } else { Err(SpcError::MisalignedLimits { name, expected: n, actual }) }
        };
        check("keys", self.keys.len())?;
        check("values", self.values.len())?;
        let optional = [
            ("numerators", &self.numerators),
            ("denominators", &self.denominators),
            ("targets", &self.targets),
            ("ll99", &self.ll99),
            ("ll95", &self.ll95),
            ("ul95", &self.ul95),
            ("ul99", &self.ul99),
        ];
        for (name, seq) in optional {
            if let Some(seq) = seq {
                check(name, seq.len())?;
            }
        }
        check("astpoint", self.flags.astpoint.len())?;
        check("trend", self.flags.trend.len())?;
        check("shift", self.flags.shift.len())?;
        check("two_in_three", self.flags.two_in_three.len())?;
        Ok(())
    }
}
