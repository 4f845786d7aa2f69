pub mod aggregate;
pub mod curve;
pub mod flat;
pub mod normal;
pub mod team;

pub use aggregate::aggregate;
pub use curve::{CurveError, ProgressCurve, curve, progress_curve};
pub use flat::flat;
pub use normal::{bell_series, normal};
pub use team::{apply_winter_break, scale};
