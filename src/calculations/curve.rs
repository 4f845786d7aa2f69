use crate::calendar::MonthSequence;
use crate::labor::LaborCategory;
use crate::plan::CategoryPlan;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no progress curve defined for labor category {0}")]
pub struct CurveError(pub LaborCategory);

/// Progress-indexed demand curve for one labor category.
#[derive(Debug, Clone, Copy)]
pub struct ProgressCurve {
    pub amplitude: u32,
    factor: fn(f64) -> f64,
}

impl ProgressCurve {
    pub fn factor(&self, progress: f64) -> f64 {
        (self.factor)(progress)
    }

    /// Headcount at `progress`, truncated toward zero; float noise below zero reads as 0.
    pub fn headcount(&self, progress: f64) -> u32 {
        let raw = f64::from(self.amplitude) * self.factor(progress);
        raw.trunc().max(0.0) as u32
    }
}

fn ramp(p: f64, slope: f64) -> f64 {
    (p * slope).min(1.0)
}

fn formwork(p: f64) -> f64 {
    if p < 0.7 { ramp(p, 2.0) } else { 1.0 - (p - 0.7) * 3.33 }
}

fn concrete(p: f64) -> f64 {
    if p < 0.3 {
        ramp(p, 3.0)
    } else if p < 0.8 {
        (2.0 - p * 2.0).min(1.0)
    } else {
        1.0 - (p - 0.8) * 5.0
    }
}

fn rebar(p: f64) -> f64 {
    if p < 0.6 { ramp(p, 2.5) } else { 1.0 - (p - 0.6) * 2.5 }
}

fn scaffold(p: f64) -> f64 {
    if p < 0.5 { ramp(p, 2.0) } else { 1.0 - (p - 0.5) * 2.0 }
}

fn survey(p: f64) -> f64 {
    0.6 + 0.4 * (1.0 - (p - 0.2).abs() * 2.5) * (1.0 - (p - 0.8).abs() * 2.5)
}

fn welding(p: f64) -> f64 {
    if p < 0.4 { ramp(p, 3.0) } else { (1.5 - p * 1.5).min(1.0) }
}

fn mason(p: f64) -> f64 {
    if p < 0.2 {
        ramp(p, 5.0)
    } else if p < 0.8 {
        1.0
    } else {
        1.0 - (p - 0.8) * 5.0
    }
}

fn electrician(p: f64) -> f64 {
    0.5 + 0.5 * p
}

fn laborer(p: f64) -> f64 {
    0.7 + 0.3 * (1.0 - (p - 0.5).abs() * 2.0)
}

fn mucking(p: f64) -> f64 {
    if p < 0.3 { ramp(p, 3.0) } else { (1.5 - p * 1.5).min(1.0) }
}

fn waterproofing(p: f64) -> f64 {
    if p < 0.4 {
        ramp(p, 2.0)
    } else if p < 0.7 {
        1.0
    } else {
        1.0 - (p - 0.7) * 3.33
    }
}

fn excavation(p: f64) -> f64 {
    if p < 0.2 {
        ramp(p, 4.0)
    } else if p < 0.6 {
        1.0
    } else {
        1.0 - (p - 0.6) * 2.5
    }
}

fn shotcrete(p: f64) -> f64 {
    if p < 0.3 {
        ramp(p, 3.0)
    } else if p < 0.7 {
        1.0
    } else {
        1.0 - (p - 0.7) * 3.33
    }
}

fn general_worker(p: f64) -> f64 {
    0.6 + 0.4 * (1.0 - (p - 0.4).abs() * 2.0)
}

fn driver(p: f64) -> f64 {
    if p < 0.5 { ramp(p, 2.0) } else { 1.0 - (p - 0.5) * 2.0 }
}

fn support(p: f64) -> f64 {
    if p < 0.4 {
        ramp(p, 2.5)
    } else if p < 0.8 {
        1.0
    } else {
        1.0 - (p - 0.8) * 5.0
    }
}

/// Formula table lookup. Returns `None` for a category with no curve.
pub fn progress_curve(category: LaborCategory) -> Option<ProgressCurve> {
    let (amplitude, factor): (u32, fn(f64) -> f64) = match category {
        LaborCategory::Formwork => (80, formwork),
        LaborCategory::Concrete => (90, concrete),
        LaborCategory::Rebar => (100, rebar),
        LaborCategory::Scaffold => (40, scaffold),
        LaborCategory::Survey => (10, survey),
        LaborCategory::Welding => (35, welding),
        LaborCategory::Mason => (25, mason),
        LaborCategory::Electrician => (5, electrician),
        LaborCategory::Laborer => (50, laborer),
        LaborCategory::Mucking => (60, mucking),
        LaborCategory::Waterproofing => (30, waterproofing),
        LaborCategory::Excavation => (100, excavation),
        LaborCategory::Shotcrete => (90, shotcrete),
        LaborCategory::GeneralWorker => (70, general_worker),
        LaborCategory::Driver => (30, driver),
        LaborCategory::Support => (30, support),
    };
    Some(ProgressCurve { amplitude, factor })
}

/// Smart generation: one headcount per month for each requested category,
/// following that category's progress curve.
pub fn curve<I>(months: &MonthSequence, categories: I) -> Result<CategoryPlan, CurveError>
where
    I: IntoIterator<Item = LaborCategory>,
{
    let mut plan = CategoryPlan::new();
    for category in categories {
        let curve = progress_curve(category).ok_or(CurveError(category))?;
        let values = (0..months.len())
            .map(|idx| curve.headcount(months.progress(idx)))
            .collect();
        plan.insert(category, values);
    }
    Ok(plan)
}
