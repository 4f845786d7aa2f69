use crate::calendar::MonthSequence;
use crate::labor::LaborCategory;
use crate::plan::CategoryPlan;

/// Manual generation: every configured category keeps its headcount for every month.
/// Disabled categories are expected as explicit zeros.
pub fn flat<'a, I>(months: &MonthSequence, config: I) -> CategoryPlan
where
    I: IntoIterator<Item = (&'a LaborCategory, &'a u32)>,
{
    config
        .into_iter()
        .map(|(category, count)| (*category, vec![*count; months.len()]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::MonthKey;
    use std::collections::BTreeMap;

    #[test]
    fn repeats_value_for_every_month() {
        let months = MonthSequence::span(
            MonthKey::new(2025, 11).unwrap(),
            MonthKey::new(2026, 2).unwrap(),
        )
        .unwrap();
        let config = BTreeMap::from([(LaborCategory::Laborer, 12), (LaborCategory::Mason, 0)]);
        let plan = flat(&months, &config);
        assert_eq!(plan.get(LaborCategory::Laborer), Some(&[12, 12, 12, 12][..]));
        assert_eq!(plan.get(LaborCategory::Mason), Some(&[0, 0, 0, 0][..]));
        assert!(!plan.contains(LaborCategory::Driver));
    }
}
