/// Trailing simple moving average.
///
/// Element `i` is the mean of `values[i + 1 - window..=i]`, or `None` while
/// fewer than `window` observations are available. A zero window yields all
/// `None`; callers validate the window before getting here.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }

    let warmup = (window - 1).min(values.len());
    let mut result = vec![None; warmup];
    result.extend(
        values
            .windows(window)
            .map(|slice| Some(slice.iter().sum::<f64>() / window as f64)),
    );
    result
}

/// Round to one decimal place, half away from zero
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Running cumulative sum
pub fn cumulative_sum(values: impl IntoIterator<Item = f64>) -> Vec<f64> {
    values
        .into_iter()
        .scan(0.0, |acc, v| {
            *acc += v;
            Some(*acc)
        })
        .collect()
}
