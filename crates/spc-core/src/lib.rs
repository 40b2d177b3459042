// File: crates/spc-core/src/lib.rs
// Summary: Core library entry point; exports the SPC series builder and view-model assembly API.

pub mod axis;
pub mod chart_type;
pub mod dates;
pub mod error;
pub mod input;
pub mod limits;
pub mod selection;
pub mod series;
pub mod settings;
pub mod tooltip;
pub mod types;
pub mod validity;
pub mod view_model;

pub use axis::{AxisLimits, AxisRange};
pub use chart_type::ChartType;
pub use error::SpcError;
pub use input::{is_invalid_data_view, CategoricalView, CategoryColumn, DataView, PrimitiveValue, Role, ValueColumn};
pub use limits::{LimitEngine, LimitResult, LimitSeries, OutlierFlags, RowFlags};
pub use selection::{CategorySelection, SelectionId, SelectionIdBuilder};
pub use series::Series;
pub use settings::{Colour, Settings};
pub use tooltip::{TextTooltip, TooltipFormatter, TooltipInput};
pub use types::{RowKey, TickLabel};
pub use validity::{ChartTypeRules, RowValidator};
pub use view_model::{Collaborators, GroupedLines, LinePoint, PlotPoint, ViewModel};
