use crate::calendar::MonthKey;
use crate::labor::LaborCategory;
use crate::module_validation::{ValidationIssue, validate_conversion_factor};
use crate::plan::AggregatedPlan;
use polars::prelude::*;

pub const CATEGORY_HEADER: &str = "工种";
pub const YEAR_HEADER: &str = "年份";
pub const MONTH_HEADER: &str = "月份";

/// The exported form of an aggregated plan: a two-level month header and one
/// row per labor category, with the conversion factor already applied.
#[derive(Debug, Clone, PartialEq)]
pub struct LaborTable {
    months: Vec<MonthKey>,
    rows: Vec<(LaborCategory, Vec<u32>)>,
}

fn convert(value: u32, factor: f64) -> u32 {
    (f64::from(value) * factor).round() as u32
}

impl LaborTable {
    pub fn new(plan: &AggregatedPlan, conversion_factor: f64) -> Result<Self, ValidationIssue> {
        validate_conversion_factor(conversion_factor)?;
        let rows = plan
            .plan()
            .iter()
            .map(|(category, values)| {
                let converted = values
                    .iter()
                    .map(|v| convert(*v, conversion_factor))
                    .collect();
                (category, converted)
            })
            .collect();
        Ok(Self {
            months: plan.months().to_vec(),
            rows,
        })
    }

    pub fn months(&self) -> &[MonthKey] {
        &self.months
    }

    pub fn rows(&self) -> &[(LaborCategory, Vec<u32>)] {
        &self.rows
    }

    pub fn row(&self, category: LaborCategory) -> Option<&[u32]> {
        self.rows
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, values)| values.as_slice())
    }

    /// Runs of consecutive columns sharing a year, for merged header cells.
    pub fn year_groups(&self) -> Vec<(i32, usize)> {
        let mut groups: Vec<(i32, usize)> = Vec::new();
        for month in &self.months {
            match groups.last_mut() {
                Some((year, span)) if *year == month.year() => *span += 1,
                _ => groups.push((month.year(), 1)),
            }
        }
        groups
    }

    pub fn header_years(&self) -> Vec<String> {
        std::iter::once(YEAR_HEADER.to_string())
            .chain(self.months.iter().map(|m| m.year().to_string()))
            .collect()
    }

    pub fn header_months(&self) -> Vec<String> {
        std::iter::once(MONTH_HEADER.to_string())
            .chain(self.months.iter().map(|m| m.month().to_string()))
            .collect()
    }

    pub fn dataframe(&self) -> PolarsResult<DataFrame> {
        let mut columns = Vec::with_capacity(self.months.len() + 1);
        let names: Vec<&str> = self.rows.iter().map(|(c, _)| c.name_zh()).collect();
        columns.push(Series::new(PlSmallStr::from_static(CATEGORY_HEADER), names).into_column());
        for (idx, month) in self.months.iter().enumerate() {
            let values: Vec<u32> = self.rows.iter().map(|(_, v)| v[idx]).collect();
            columns.push(Series::new(PlSmallStr::from(month.to_string()), values).into_column());
        }
        DataFrame::new(columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::aggregate;
    use crate::calendar::MonthSequence;
    use crate::plan::{CategoryPlan, ModulePlan};

    fn plan(values: Vec<u32>) -> AggregatedPlan {
        let months = MonthSequence::span(
            MonthKey::new(2024, 11).unwrap(),
            MonthKey::new(2025, 2).unwrap(),
        )
        .unwrap();
        let series: CategoryPlan = [(LaborCategory::Rebar, values)].into_iter().collect();
        aggregate(&[ModulePlan::new(months, series).unwrap()])
    }

    #[test]
    fn conversion_factor_rounds_to_nearest() {
        let table = LaborTable::new(&plan(vec![3, 5, 10, 1]), 1.5).unwrap();
        assert_eq!(table.row(LaborCategory::Rebar), Some(&[5, 8, 15, 2][..]));
        let unchanged = LaborTable::new(&plan(vec![3, 5, 10, 1]), 1.0).unwrap();
        assert_eq!(unchanged.row(LaborCategory::Rebar), Some(&[3, 5, 10, 1][..]));
    }

    #[test]
    fn factor_must_stay_within_range() {
        let uniform = plan(vec![1, 1, 1, 1]);
        for factor in [0.0, 0.09, 5.01, 1e9, f64::NAN, f64::INFINITY] {
            assert!(LaborTable::new(&uniform, factor).is_err(), "accepted {factor}");
        }
        let low = LaborTable::new(&plan(vec![10, 20, 4, 0]), 0.1).unwrap();
        assert_eq!(low.row(LaborCategory::Rebar), Some(&[1, 2, 0, 0][..]));
        let high = LaborTable::new(&plan(vec![10, 20, 4, 0]), 5.0).unwrap();
        assert_eq!(high.row(LaborCategory::Rebar), Some(&[50, 100, 20, 0][..]));
    }

    #[test]
    fn headers_group_by_year() {
        let table = LaborTable::new(&plan(vec![0, 0, 0, 0]), 1.0).unwrap();
        assert_eq!(table.year_groups(), vec![(2024, 2), (2025, 2)]);
        assert_eq!(table.header_years(), vec!["年份", "2024", "2024", "2025", "2025"]);
        assert_eq!(table.header_months(), vec!["月份", "11", "12", "1", "2"]);
    }

    #[test]
    fn dataframe_has_category_and_month_columns() {
        let table = LaborTable::new(&plan(vec![1, 2, 3, 4]), 1.0).unwrap();
        let df = table.dataframe().unwrap();
        assert_eq!(df.width(), 5);
        assert_eq!(df.height(), LaborCategory::ALL.len());
        let names = df.column(CATEGORY_HEADER).unwrap().str().unwrap();
        assert_eq!(names.get(0), Some("模板工"));
        let jan = df.column("2025-01").unwrap().u32().unwrap();
        assert_eq!(jan.get(2), Some(3));
    }
}
