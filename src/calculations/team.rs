use crate::calendar::{MonthSequence, WinterBreak};
use crate::plan::CategoryPlan;

/// Multiply every value by the module's team count (parallel crews).
pub fn scale(plan: &CategoryPlan, team_count: u32) -> CategoryPlan {
    plan.map_values(|_, _, value| value.saturating_mul(team_count))
}

/// Zero every month that falls inside the shutdown window.
pub fn apply_winter_break(
    months: &MonthSequence,
    plan: &CategoryPlan,
    winter_break: &WinterBreak,
) -> CategoryPlan {
    let idle: Vec<bool> = months.iter().map(|m| winter_break.contains(m)).collect();
    plan.map_values(|_, idx, value| if idle[idx] { 0 } else { value })
}
