// File: crates/spc-core/src/input.rs
// Summary: Categorical data view handed over by the host, plus role binding and the invalid-view check.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::error::{Result, SpcError};

/// One cell of host data.
#[derive(Clone, Debug, PartialEq)]
pub enum PrimitiveValue {
    Null,
    Number(f64),
    Text(String),
    Bool(bool),
    Date(NaiveDateTime),
}

impl PrimitiveValue {
    /// Numeric view of the cell. Text is parsed, booleans map to 0/1.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PrimitiveValue::Number(v) => Some(*v),
            PrimitiveValue::Text(s) => s.trim().parse::<f64>().ok(),
            PrimitiveValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            PrimitiveValue::Null | PrimitiveValue::Date(_) => None,
        }
    }

    /// Plain textual rendering used for category labels (null renders empty).
    pub fn to_label(&self) -> String {
        match self {
            PrimitiveValue::Null => String::new(),
            PrimitiveValue::Number(v) => v.to_string(),
            PrimitiveValue::Text(s) => s.clone(),
            PrimitiveValue::Bool(b) => b.to_string(),
            PrimitiveValue::Date(d) => d.to_string(),
        }
    }

    /// Host truthiness: null, false, zero, NaN and the empty string are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            PrimitiveValue::Null => false,
            PrimitiveValue::Number(v) => *v != 0.0 && !v.is_nan(),
            PrimitiveValue::Text(s) => !s.is_empty(),
            PrimitiveValue::Bool(b) => *b,
            PrimitiveValue::Date(_) => true,
        }
    }

    pub fn is_null(&self) -> bool { matches!(self, PrimitiveValue::Null) }
}

impl From<f64> for PrimitiveValue {
    fn from(v: f64) -> Self { PrimitiveValue::Number(v) }
}

impl From<&str> for PrimitiveValue {
    fn from(v: &str) -> Self { PrimitiveValue::Text(v.to_string()) }
}

impl From<Option<f64>> for PrimitiveValue {
    fn from(v: Option<f64>) -> Self { v.map_or(PrimitiveValue::Null, PrimitiveValue::Number) }
}

/// Data roles a value column can be bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Numerators,
    Denominators,
    Groups,
    ChartType,
    ChartMultiplier,
}

impl Role {
    pub const fn name(self) -> &'static str {
        match self {
            Role::Numerators => "numerators",
            Role::Denominators => "denominators",
            Role::Groups => "groups",
            Role::ChartType => "chart_type",
            Role::ChartMultiplier => "chart_multiplier",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

/// Category (x-axis) column. Shared by reference count so the series can
/// hand it back to the host for selection identities without copying.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryColumn {
    pub name: String,
    pub values: Vec<PrimitiveValue>,
}

impl CategoryColumn {
    pub fn new(name: impl Into<String>, values: Vec<PrimitiveValue>) -> Self {
        Self { name: name.into(), values }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ValueColumn {
    pub name: String,
    pub roles: Vec<Role>,
    pub values: Vec<PrimitiveValue>,
    /// Cross-filter highlights, indexed by original row.
    pub highlights: Option<Vec<PrimitiveValue>>,
}

impl ValueColumn {
    pub fn new(name: impl Into<String>, role: Role, values: Vec<PrimitiveValue>) -> Self {
        Self { name: name.into(), roles: vec![role], values, highlights: None }
    }

    pub fn numbers(name: impl Into<String>, role: Role, values: &[f64]) -> Self {
        Self::new(name, role, values.iter().copied().map(PrimitiveValue::Number).collect())
    }

    pub fn with_highlights(mut self, highlights: Vec<PrimitiveValue>) -> Self {
        self.highlights = Some(highlights);
        self
    }

    pub fn has_role(&self, role: Role) -> bool { self.roles.contains(&role) }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CategoricalView {
    pub categories: Vec<Arc<CategoryColumn>>,
    pub values: Vec<ValueColumn>,
}

impl CategoricalView {
    pub fn new() -> Self { Self::default() }

    pub fn with_category(mut self, column: CategoryColumn) -> Self {
        self.categories.push(Arc::new(column));
        self
    }

    pub fn with_values(mut self, column: ValueColumn) -> Self {
        self.values.push(column);
        self
    }

    /// First value column carrying `role`.
    pub fn column(&self, role: Role) -> Option<&ValueColumn> {
        self.values.iter().find(|c| c.has_role(role))
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DataView {
    pub categorical: Option<CategoricalView>,
}

impl DataView {
    pub fn new(categorical: CategoricalView) -> Self { Self { categorical: Some(categorical) } }
}

/// Value columns resolved to their roles once, at the input boundary.
#[derive(Clone, Copy, Debug)]
pub struct RoleColumns<'a> {
    pub numerators: &'a ValueColumn,
    pub denominators: &'a ValueColumn,
    pub groups: Option<&'a ValueColumn>,
    pub chart_type: Option<&'a ValueColumn>,
    pub chart_multiplier: Option<&'a ValueColumn>,
}

impl<'a> RoleColumns<'a> {
    pub fn bind(view: &'a CategoricalView) -> Result<Self> {
        let numerators = view.column(Role::Numerators).ok_or(SpcError::MissingRole(Role::Numerators))?;
        let denominators = view.column(Role::Denominators).ok_or(SpcError::MissingRole(Role::Denominators))?;
        Ok(Self {
            numerators,
            denominators,
            groups: view.column(Role::Groups),
            chart_type: view.column(Role::ChartType),
            chart_multiplier: view.column(Role::ChartMultiplier),
        })
    }
}

/// True when the update carries nothing the pipeline can work with. Such
/// updates render the empty state rather than failing.
pub fn is_invalid_data_view(data_views: &[DataView]) -> bool {
    let Some(categorical) = data_views.first().and_then(|dv| dv.categorical.as_ref()) else {
        return true;
    };
    if categorical.categories.is_empty() || categorical.values.is_empty() {
        return true;
    }
    let Some(numerators) = categorical.column(Role::Numerators) else {
        return true;
    };
    numerators.values.is_empty() || categorical.categories[0].values.is_empty()
}
