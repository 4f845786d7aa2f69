use super::{PersistenceError, PersistenceResult};
use crate::{AggregatedPlan, LaborCategory, LaborTable, MonthKey, PlanRequest};
use crate::plan::CategoryPlan;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("unknown export format '{other}'")),
        }
    }
}

pub fn save_request_to_json<P: AsRef<Path>>(request: &PlanRequest, path: P) -> PersistenceResult<()> {
    let file = File::create(path.as_ref())?;
    serde_json::to_writer_pretty(file, request)?;
    info!(path = %path.as_ref().display(), projects = request.projects.len(), "request saved");
    Ok(())
}

pub fn load_request_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<PlanRequest> {
    let file = File::open(path.as_ref())?;
    let request: PlanRequest = serde_json::from_reader(file)?;
    info!(path = %path.as_ref().display(), projects = request.projects.len(), "request loaded");
    Ok(request)
}

#[derive(Serialize, Deserialize)]
struct PlanRow {
    category: LaborCategory,
    values: Vec<u32>,
}

#[derive(Serialize, Deserialize)]
struct PlanSnapshot {
    months: Vec<MonthKey>,
    rows: Vec<PlanRow>,
}

impl PlanSnapshot {
    fn from_table(table: &LaborTable) -> Self {
        let rows = table
            .rows()
            .iter()
            .map(|(category, values)| PlanRow {
                category: *category,
                values: values.clone(),
            })
            .collect();
        Self {
            months: table.months().to_vec(),
            rows,
        }
    }

    fn into_plan(self) -> PersistenceResult<AggregatedPlan> {
        let mut plan = CategoryPlan::new();
        for row in self.rows {
            if plan.insert(row.category, row.values).is_some() {
                return Err(PersistenceError::InvalidData(format!(
                    "row {} appears more than once",
                    row.category
                )));
            }
        }
        Ok(AggregatedPlan::new(self.months, plan)?)
    }
}

/// Write `{ months, rows: [{ category, values }] }` after applying the
/// conversion factor.
pub fn save_plan_to_json<P: AsRef<Path>>(
    plan: &AggregatedPlan,
    conversion_factor: f64,
    path: P,
) -> PersistenceResult<()> {
    let table = LaborTable::new(plan, conversion_factor)?;
    let file = File::create(path.as_ref())?;
    serde_json::to_writer_pretty(file, &PlanSnapshot::from_table(&table))?;
    info!(path = %path.as_ref().display(), months = table.months().len(), "plan exported as json");
    Ok(())
}

pub fn load_plan_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<AggregatedPlan> {
    let file = File::open(path)?;
    let snapshot: PlanSnapshot = serde_json::from_reader(file)?;
    snapshot.into_plan()
}

/// Write the two header rows (year, month) followed by one row per category.
pub fn save_plan_to_csv<P: AsRef<Path>>(
    plan: &AggregatedPlan,
    conversion_factor: f64,
    path: P,
) -> PersistenceResult<()> {
    let table = LaborTable::new(plan, conversion_factor)?;
    let df = table.dataframe()?;
    let file = File::create(path.as_ref())?;
    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(table.header_years())?;
    writer.write_record(table.header_months())?;

    let names = df.column(crate::table::CATEGORY_HEADER)?.str()?;
    for row_idx in 0..df.height() {
        let name = names.get(row_idx).ok_or_else(|| {
            PersistenceError::InvalidData(format!("missing category at row {row_idx}"))
        })?;
        let mut record = Vec::with_capacity(df.width());
        record.push(name.to_string());
        for month in table.months() {
            let value = df.column(&month.to_string())?.u32()?.get(row_idx).unwrap_or(0);
            record.push(value.to_string());
        }
        writer.write_record(&record)?;
    }
    writer.flush()?;
    info!(path = %path.as_ref().display(), months = table.months().len(), "plan exported as csv");
    Ok(())
}

pub fn export_plan<P: AsRef<Path>>(
    plan: &AggregatedPlan,
    conversion_factor: f64,
    format: ExportFormat,
    path: P,
) -> PersistenceResult<()> {
    match format {
        ExportFormat::Csv => save_plan_to_csv(plan, conversion_factor, path),
        ExportFormat::Json => save_plan_to_json(plan, conversion_factor, path),
    }
}
