use crate::calendar::MonthKey;
use crate::labor::LaborCategory;
use crate::metadata::CONVERSION_FACTOR_RANGE;
use crate::module::ProjectConfig;
use crate::project::ProjectType;
use crate::request::PlanRequest;
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationIssue {
    #[error("{project}-{module}: start month {start} is after end month {end}")]
    InvalidDateRange {
        project: String,
        module: String,
        start: MonthKey,
        end: MonthKey,
    },
    #[error("{project}: '{module}' is not a phase of {project_type}")]
    UnknownModule {
        project: String,
        module: String,
        project_type: ProjectType,
    },
    #[error("{project}: phase '{module}' is configured more than once")]
    DuplicateModule { project: String, module: String },
    #[error("{project}-{module}: {category} is not used by {project_type}")]
    CategoryNotInSet {
        project: String,
        module: String,
        category: LaborCategory,
        project_type: ProjectType,
    },
    #[error("{project}: {project_type} cannot pause for a winter break")]
    WinterBreakNotSupported {
        project: String,
        project_type: ProjectType,
    },
    #[error("conversion factor {0} must be between 0.1 and 5.0")]
    InvalidConversionFactor(f64),
}

/// Every issue found in a request, in project/module order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    issues: Vec<ValidationIssue>,
}

impl ValidationErrors {
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .issues
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{joined}")
    }
}

impl std::error::Error for ValidationErrors {}

pub fn validate_conversion_factor(factor: f64) -> Result<(), ValidationIssue> {
    if !CONVERSION_FACTOR_RANGE.contains(&factor) {
        return Err(ValidationIssue::InvalidConversionFactor(factor));
    }
    Ok(())
}

fn validate_project(project: &ProjectConfig, errors: &mut ValidationErrors) {
    let project_name = project.display_name().to_string();
    let project_type = project.project_type;

    if project.winter_break.is_some() && !project_type.supports_winter_break() {
        errors.push(ValidationIssue::WinterBreakNotSupported {
            project: project_name.clone(),
            project_type,
        });
    }

    let mut seen = HashSet::with_capacity(project.modules.len());
    for module in &project.modules {
        if !project_type.has_module(&module.name) {
            errors.push(ValidationIssue::UnknownModule {
                project: project_name.clone(),
                module: module.name.clone(),
                project_type,
            });
        }
        if !seen.insert(module.name.as_str()) {
            errors.push(ValidationIssue::DuplicateModule {
                project: project_name.clone(),
                module: module.name.clone(),
            });
        }
        if !module.enabled {
            continue;
        }
        if module.start > module.end {
            errors.push(ValidationIssue::InvalidDateRange {
                project: project_name.clone(),
                module: module.name.clone(),
                start: module.start,
                end: module.end,
            });
        }
        if let Some(workforce) = module.mode.workforce() {
            for category in workforce.keys() {
                if !project_type.uses_category(*category) {
                    errors.push(ValidationIssue::CategoryNotInSet {
                        project: project_name.clone(),
                        module: module.name.clone(),
                        category: *category,
                        project_type,
                    });
                }
            }
        }
    }
}

/// Check every enabled project of the request and report all issues at once.
pub fn validate_request(request: &PlanRequest) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    if let Err(issue) = validate_conversion_factor(request.metadata.conversion_factor) {
        errors.push(issue);
    }
    for project in request.projects.iter().filter(|p| p.enabled) {
        validate_project(project, &mut errors);
    }
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
