use crate::calendar::MonthKey;
use crate::labor::LaborCategory;
use crate::plan::{AggregatedPlan, CategoryPlan, ModulePlan};
use std::collections::{BTreeSet, HashMap};

/// Merge independently generated module plans onto the sorted union of their months.
///
/// Every category of the superset gets a row. A module contributes to a month only
/// when that month lies inside its own range; everywhere else it counts as zero.
/// The result does not depend on the order of `modules`.
pub fn aggregate(modules: &[ModulePlan]) -> AggregatedPlan {
    let union: BTreeSet<MonthKey> = modules
        .iter()
        .flat_map(|module| module.months().iter().copied())
        .collect();
    let months: Vec<MonthKey> = union.into_iter().collect();
    let position: HashMap<MonthKey, usize> = months
        .iter()
        .enumerate()
        .map(|(idx, month)| (*month, idx))
        .collect();

    let mut plan = CategoryPlan::new();
    for category in LaborCategory::ALL {
        let mut totals = vec![0u32; months.len()];
        for module in modules {
            let Some(values) = module.plan().get(category) else {
                continue;
            };
            for (month, value) in module.months().iter().zip(values) {
                if let Some(idx) = position.get(month) {
                    totals[*idx] = totals[*idx].saturating_add(*value);
                }
            }
        }
        plan.insert(category, totals);
    }

    AggregatedPlan::from_parts(months, plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::MonthSequence;

    fn module(start: (i32, u32), end: (i32, u32), values: Vec<u32>) -> ModulePlan {
        let months = MonthSequence::span(
            MonthKey::new(start.0, start.1).unwrap(),
            MonthKey::new(end.0, end.1).unwrap(),
        )
        .unwrap();
        let plan: CategoryPlan = [(LaborCategory::Rebar, values)].into_iter().collect();
        ModulePlan::new(months, plan).unwrap()
    }

    #[test]
    fn empty_input_yields_empty_plan() {
        let result = aggregate(&[]);
        assert!(result.is_empty());
        assert!(result.plan().iter().all(|(_, v)| v.is_empty()));
    }

    #[test]
    fn gap_between_modules_is_not_filled() {
        let a = module((2025, 1), (2025, 2), vec![1, 1]);
        let b = module((2025, 5), (2025, 5), vec![3]);
        let result = aggregate(&[a, b]);
        assert_eq!(result.months().len(), 3);
        assert_eq!(result.series(LaborCategory::Rebar), Some(&[1, 1, 3][..]));
        assert_eq!(result.series(LaborCategory::Driver), Some(&[0, 0, 0][..]));
    }
}
