use crate::calculations::{apply_winter_break, curve, flat, normal, scale};
use crate::calendar::{CalendarError, MonthKey, MonthSequence, WinterBreak};
use crate::labor::LaborCategory;
use crate::plan::{CategoryPlan, ModulePlan};
use crate::project::ProjectType;
use crate::request::PlanError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Manual setting for one labor category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySetting {
    pub enabled: bool,
    pub count: u32,
}

impl CategorySetting {
    pub fn enabled(count: u32) -> Self {
        Self {
            enabled: true,
            count,
        }
    }

    pub fn disabled(count: u32) -> Self {
        Self {
            enabled: false,
            count,
        }
    }
}

pub type WorkforceConfig = BTreeMap<LaborCategory, CategorySetting>;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GenerationMode {
    /// Smart generation from the fixed progress curves.
    #[default]
    Curve,
    /// Constant headcount per enabled category.
    Constant { workforce: WorkforceConfig },
    /// Bell curve peaking at each enabled category's headcount.
    Normal { workforce: WorkforceConfig },
}

impl GenerationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationMode::Curve => "curve",
            GenerationMode::Constant { .. } => "constant",
            GenerationMode::Normal { .. } => "normal",
        }
    }

    /// Every category of the project disabled, counts pre-filled with defaults.
    pub fn default_workforce(project_type: ProjectType) -> WorkforceConfig {
        project_type
            .categories()
            .iter()
            .map(|c| (*c, CategorySetting::disabled(c.default_headcount())))
            .collect()
    }

    pub fn workforce(&self) -> Option<&WorkforceConfig> {
        match self {
            GenerationMode::Curve => None,
            GenerationMode::Constant { workforce } | GenerationMode::Normal { workforce } => {
                Some(workforce)
            }
        }
    }

    pub fn workforce_mut(&mut self) -> Option<&mut WorkforceConfig> {
        match self {
            GenerationMode::Curve => None,
            GenerationMode::Constant { workforce } | GenerationMode::Normal { workforce } => {
                Some(workforce)
            }
        }
    }

    pub fn is_manual(&self) -> bool {
        !matches!(self, GenerationMode::Curve)
    }
}

/// One construction phase as configured for a "generate" action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleConfig {
    pub name: String,
    pub start: MonthKey,
    pub end: MonthKey,
    #[serde(default = "default_team_count")]
    pub team_count: u32,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub mode: GenerationMode,
}

fn default_team_count() -> u32 {
    1
}

fn default_enabled() -> bool {
    true
}

impl ModuleConfig {
    pub fn new(name: impl Into<String>, start: MonthKey, end: MonthKey) -> Self {
        Self {
            name: name.into(),
            start,
            end,
            team_count: default_team_count(),
            enabled: true,
            mode: GenerationMode::Curve,
        }
    }

    pub fn with_team_count(mut self, team_count: u32) -> Self {
        self.team_count = team_count;
        self
    }

    pub fn with_mode(mut self, mode: GenerationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Team counts below one behave as a single team.
    pub fn effective_team_count(&self) -> u32 {
        self.team_count.max(1)
    }

    pub fn months(&self) -> Result<MonthSequence, CalendarError> {
        MonthSequence::span(self.start, self.end)
    }

    /// Resolve the manual configuration into a headcount for every category the
    /// project uses; disabled or missing categories become zero.
    fn resolved_counts(
        project_type: ProjectType,
        workforce: &WorkforceConfig,
    ) -> BTreeMap<LaborCategory, u32> {
        project_type
            .categories()
            .iter()
            .map(|category| {
                let count = workforce
                    .get(category)
                    .filter(|setting| setting.enabled)
                    .map_or(0, |setting| setting.count);
                (*category, count)
            })
            .collect()
    }

    /// Build this module's plan: generator for the mode, then the project's winter
    /// break (manual modes only), then the team multiplier.
    pub fn generate(
        &self,
        project_type: ProjectType,
        winter_break: Option<&WinterBreak>,
    ) -> Result<ModulePlan, PlanError> {
        let months = self.months()?;
        let base: CategoryPlan = match &self.mode {
            GenerationMode::Curve => curve(&months, project_type.categories().iter().copied())?,
            GenerationMode::Constant { workforce } => {
                flat(&months, &Self::resolved_counts(project_type, workforce))
            }
            GenerationMode::Normal { workforce } => {
                normal(&months, &Self::resolved_counts(project_type, workforce))
            }
        };

        let paused = match winter_break {
            Some(window) if self.mode.is_manual() => apply_winter_break(&months, &base, window),
            _ => base,
        };
        let scaled = scale(&paused, self.effective_team_count());
        Ok(ModulePlan::new(months, scaled)?)
    }
}

/// One project instance (e.g. a single bridge) and its phases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub project_type: ProjectType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winter_break: Option<WinterBreak>,
    #[serde(default)]
    pub modules: Vec<ModuleConfig>,
}

impl ProjectConfig {
    pub fn new(project_type: ProjectType) -> Self {
        Self {
            project_type,
            name: None,
            enabled: true,
            winter_break: None,
            modules: Vec::new(),
        }
    }

    /// Every phase of the project type spanning `month`, curve mode, one team.
    pub fn template(project_type: ProjectType, month: MonthKey) -> Self {
        let modules = project_type
            .modules()
            .iter()
            .map(|name| ModuleConfig::new(*name, month, month))
            .collect();
        Self {
            modules,
            ..Self::new(project_type)
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_module(mut self, module: ModuleConfig) -> Self {
        self.modules.push(module);
        self
    }

    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .unwrap_or_else(|| self.project_type.name_zh())
    }

    pub fn module_mut(&mut self, name: &str) -> Option<&mut ModuleConfig> {
        self.modules.iter_mut().find(|m| m.name == name)
    }
}
