pub mod calculations;
pub mod calendar;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod labor;
pub mod logging;
pub mod metadata;
pub mod module;
pub(crate) mod module_validation;
pub mod persistence;
pub mod plan;
pub mod project;
pub mod request;
pub mod table;

pub use calculations::{
    CurveError, ProgressCurve, aggregate, apply_winter_break, bell_series, curve, flat, normal,
    progress_curve, scale,
};
pub use calendar::{CalendarError, MonthKey, MonthSequence, WinterBreak};
pub use labor::LaborCategory;
pub use metadata::{CONVERSION_FACTOR_RANGE, PlanMetadata};
pub use module::{CategorySetting, GenerationMode, ModuleConfig, ProjectConfig, WorkforceConfig};
pub use module_validation::{ValidationErrors, ValidationIssue};
pub use persistence::{
    ExportFormat, PersistenceError, export_plan, load_plan_from_json, load_request_from_json,
    save_plan_to_csv, save_plan_to_json, save_request_to_json,
};
pub use plan::{AggregatedPlan, CategoryPlan, ModulePlan, PlanShapeError, SeriesLengthError};
pub use project::ProjectType;
pub use request::{PlanError, PlanRequest};
pub use table::LaborTable;
