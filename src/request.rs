use crate::calculations::{CurveError, aggregate};
use crate::calendar::{CalendarError, MonthKey};
use crate::metadata::PlanMetadata;
use crate::module::ProjectConfig;
use crate::module_validation::{ValidationErrors, validate_request};
use crate::plan::{AggregatedPlan, SeriesLengthError};
use crate::project::ProjectType;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, instrument};

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("invalid plan request: {0}")]
    Invalid(ValidationErrors),
    #[error("no enabled module to generate")]
    NothingToGenerate,
    #[error(transparent)]
    Calendar(#[from] CalendarError),
    #[error(transparent)]
    Curve(#[from] CurveError),
    #[error(transparent)]
    Series(#[from] SeriesLengthError),
}

impl From<ValidationErrors> for PlanError {
    fn from(errors: ValidationErrors) -> Self {
        PlanError::Invalid(errors)
    }
}

/// Everything a single "generate" action needs: the plan's metadata and the
/// configured project instances.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    #[serde(default)]
    pub metadata: PlanMetadata,
    #[serde(default)]
    pub projects: Vec<ProjectConfig>,
}

impl PlanRequest {
    pub fn new(metadata: PlanMetadata) -> Self {
        Self {
            metadata,
            projects: Vec::new(),
        }
    }

    /// One disabled instance of every project type with all of its phases
    /// spanning the month of `today`.
    pub fn template(today: NaiveDate) -> Self {
        let month = MonthKey::from_date(today);
        let projects = ProjectType::ALL
            .iter()
            .map(|project_type| ProjectConfig {
                enabled: false,
                ..ProjectConfig::template(*project_type, month)
            })
            .collect();
        Self {
            metadata: PlanMetadata::default(),
            projects,
        }
    }

    pub fn with_project(mut self, project: ProjectConfig) -> Self {
        self.projects.push(project);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        validate_request(self)
    }

    /// Validate, generate every enabled module of every enabled project and merge
    /// the results onto one monthly timeline.
    #[instrument(skip(self), fields(projects = self.projects.len()))]
    pub fn generate(&self) -> Result<AggregatedPlan, PlanError> {
        self.validate()?;

        let mut module_plans = Vec::new();
        for project in self.projects.iter().filter(|p| p.enabled) {
            for module in project.modules.iter().filter(|m| m.enabled) {
                let plan = module.generate(project.project_type, project.winter_break.as_ref())?;
                debug!(
                    project = project.display_name(),
                    module = %module.name,
                    mode = module.mode.as_str(),
                    months = plan.months().len(),
                    team_count = module.effective_team_count(),
                    "module generated"
                );
                module_plans.push(plan);
            }
        }

        if module_plans.is_empty() {
            return Err(PlanError::NothingToGenerate);
        }

        let merged = aggregate(&module_plans);
        info!(
            modules = module_plans.len(),
            months = merged.months().len(),
            first = ?merged.months().first(),
            last = ?merged.months().last(),
            "plan aggregated"
        );
        Ok(merged)
    }
}
