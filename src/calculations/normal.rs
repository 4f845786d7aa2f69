use crate::calendar::MonthSequence;
use crate::labor::LaborCategory;
use crate::plan::CategoryPlan;

/// Share of the peak kept at the far ends of the bell.
pub const MIN_FACTOR: f64 = 0.3;
/// Standard deviation as a fraction of the sequence length.
pub const STD_DEV_FACTOR: f64 = 0.3;

/// Bell-shaped series of `len` values that peaks at `peak` in the middle month.
pub fn bell_series(len: usize, peak: u32) -> Vec<u32> {
    if len == 0 {
        return Vec::new();
    }
    let mean = (len as f64 - 1.0) / 2.0;
    let std_dev = len as f64 * STD_DEV_FACTOR;
    let density: Vec<f64> = (0..len)
        .map(|i| {
            let offset = i as f64 - mean;
            (-(offset * offset) / (2.0 * std_dev * std_dev)).exp()
        })
        .collect();
    let max = density.iter().copied().fold(f64::MIN, f64::max);

    density
        .iter()
        .map(|value| {
            let normalized = value / max;
            let scaled = f64::from(peak) * (MIN_FACTOR + normalized * (1.0 - MIN_FACTOR));
            scaled.floor().max(0.0) as u32
        })
        .collect()
}

/// Normal-distribution generation: each configured headcount becomes the peak of a bell curve.
pub fn normal<'a, I>(months: &MonthSequence, config: I) -> CategoryPlan
where
    I: IntoIterator<Item = (&'a LaborCategory, &'a u32)>,
{
    config
        .into_iter()
        .map(|(category, peak)| (*category, bell_series(months.len(), *peak)))
        .collect()
}
