use crate::module_validation::{ValidationErrors, ValidationIssue};
use crate::plan::PlanShapeError;
use polars::prelude::PolarsError;
use serde_json::Error as SerdeJsonError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("serialization error: {0}")]
    Serialization(#[from] SerdeJsonError),
    #[error("dataframe conversion error: {0}")]
    DataFrame(#[from] PolarsError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl From<ValidationIssue> for PersistenceError {
    fn from(value: ValidationIssue) -> Self {
        Self::InvalidData(value.to_string())
    }
}

impl From<PlanShapeError> for PersistenceError {
    fn from(value: PlanShapeError) -> Self {
        Self::InvalidData(value.to_string())
    }
}

impl From<ValidationErrors> for PersistenceError {
    fn from(value: ValidationErrors) -> Self {
        Self::InvalidData(value.to_string())
    }
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

pub mod file;

pub use file::{
    ExportFormat, export_plan, load_plan_from_json, load_request_from_json, save_plan_to_csv,
    save_plan_to_json, save_request_to_json,
};
