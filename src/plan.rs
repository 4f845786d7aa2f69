use crate::calendar::{MonthKey, MonthSequence};
use crate::labor::LaborCategory;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("series for {category} has {actual} values but the plan covers {expected} months")]
pub struct SeriesLengthError {
    pub category: LaborCategory,
    pub expected: usize,
    pub actual: usize,
}

/// Monthly headcount per labor category. Rows iterate in category order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryPlan {
    series: BTreeMap<LaborCategory, Vec<u32>>,
}

impl CategoryPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: LaborCategory, values: Vec<u32>) -> Option<Vec<u32>> {
        self.series.insert(category, values)
    }

    pub fn get(&self, category: LaborCategory) -> Option<&[u32]> {
        self.series.get(&category).map(Vec::as_slice)
    }

    pub fn contains(&self, category: LaborCategory) -> bool {
        self.series.contains_key(&category)
    }

    pub fn categories(&self) -> impl Iterator<Item = LaborCategory> + '_ {
        self.series.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (LaborCategory, &[u32])> + '_ {
        self.series.iter().map(|(c, v)| (*c, v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Apply `f` to every value, producing a new plan.
    pub fn map_values<F>(&self, mut f: F) -> Self
    where
        F: FnMut(LaborCategory, usize, u32) -> u32,
    {
        let series = self
            .series
            .iter()
            .map(|(category, values)| {
                let mapped = values
                    .iter()
                    .enumerate()
                    .map(|(idx, value)| f(*category, idx, *value))
                    .collect();
                (*category, mapped)
            })
            .collect();
        Self { series }
    }

    fn check_lengths(&self, expected: usize) -> Result<(), SeriesLengthError> {
        for (category, values) in &self.series {
            if values.len() != expected {
                return Err(SeriesLengthError {
                    category: *category,
                    expected,
                    actual: values.len(),
                });
            }
        }
        Ok(())
    }
}

impl FromIterator<(LaborCategory, Vec<u32>)> for CategoryPlan {
    fn from_iter<T: IntoIterator<Item = (LaborCategory, Vec<u32>)>>(iter: T) -> Self {
        Self {
            series: iter.into_iter().collect(),
        }
    }
}

/// One module's generated plan, tied to the months it spans.
#[derive(Debug, Clone, PartialEq)]
pub struct ModulePlan {
    months: MonthSequence,
    plan: CategoryPlan,
}

impl ModulePlan {
    pub fn new(months: MonthSequence, plan: CategoryPlan) -> Result<Self, SeriesLengthError> {
        plan.check_lengths(months.len())?;
        Ok(Self { months, plan })
    }

    pub fn months(&self) -> &MonthSequence {
        &self.months
    }

    pub fn plan(&self) -> &CategoryPlan {
        &self.plan
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanShapeError {
    #[error("months must be strictly increasing")]
    UnorderedMonths,
    #[error(transparent)]
    Series(#[from] SeriesLengthError),
}

/// Merged plan over the union of every module's months.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AggregatedPlanData")]
pub struct AggregatedPlan {
    months: Vec<MonthKey>,
    plan: CategoryPlan,
}

#[derive(Deserialize)]
struct AggregatedPlanData {
    months: Vec<MonthKey>,
    plan: CategoryPlan,
}

impl TryFrom<AggregatedPlanData> for AggregatedPlan {
    type Error = PlanShapeError;

    fn try_from(value: AggregatedPlanData) -> Result<Self, Self::Error> {
        Self::new(value.months, value.plan)
    }
}

impl AggregatedPlan {
    /// Checked constructor: months strictly increasing, one value per month in every row.
    pub fn new(months: Vec<MonthKey>, plan: CategoryPlan) -> Result<Self, PlanShapeError> {
        if months.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(PlanShapeError::UnorderedMonths);
        }
        plan.check_lengths(months.len())?;
        Ok(Self { months, plan })
    }

    pub(crate) fn from_parts(months: Vec<MonthKey>, plan: CategoryPlan) -> Self {
        Self { months, plan }
    }

    pub fn months(&self) -> &[MonthKey] {
        &self.months
    }

    pub fn plan(&self) -> &CategoryPlan {
        &self.plan
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn series(&self, category: LaborCategory) -> Option<&[u32]> {
        self.plan.get(category)
    }

    pub fn value_at(&self, category: LaborCategory, month: &MonthKey) -> Option<u32> {
        let idx = self.months.binary_search(month).ok()?;
        self.plan.get(category).and_then(|values| values.get(idx).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(y: i32, mo: u32) -> MonthKey {
        MonthKey::new(y, mo).unwrap()
    }

    #[test]
    fn module_plan_rejects_mismatched_series() {
        let months = MonthSequence::span(m(2025, 1), m(2025, 3)).unwrap();
        let mut plan = CategoryPlan::new();
        plan.insert(LaborCategory::Laborer, vec![1, 2]);
        let err = ModulePlan::new(months, plan).unwrap_err();
        assert_eq!(err.expected, 3);
        assert_eq!(err.actual, 2);
    }

    #[test]
    fn aggregated_plan_deserialization_checks_shape() {
        let ragged = r#"{"months":["2025-01","2025-02"],"plan":{"电工":[1]}}"#;
        let err = serde_json::from_str::<AggregatedPlan>(ragged).unwrap_err();
        assert!(err.to_string().contains("电工"));

        let unordered = r#"{"months":["2025-02","2025-01"],"plan":{"电工":[1,2]}}"#;
        assert!(serde_json::from_str::<AggregatedPlan>(unordered).is_err());

        let valid = r#"{"months":["2025-01","2025-02"],"plan":{"电工":[1,2]}}"#;
        let plan: AggregatedPlan = serde_json::from_str(valid).unwrap();
        assert_eq!(plan.series(LaborCategory::Electrician), Some(&[1, 2][..]));
        assert_eq!(plan.value_at(LaborCategory::Electrician, &m(2025, 2)), Some(2));
    }
}
