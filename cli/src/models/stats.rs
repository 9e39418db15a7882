use serde::{Deserialize, Serialize};

/// Summary of close prices over a date range, in USD.
///
/// `max`, `min` and `mean` are rounded to one decimal place and `spread`
/// is the rounded difference of the rounded extremes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub max: f64,
    pub min: f64,
    pub mean: f64,
    pub spread: f64,
}

impl SummaryStats {
    /// How far the maximum sits above the mean
    pub fn above_average(&self) -> f64 {
        crate::utils::round1(self.max - self.mean)
    }

    /// How far the minimum sits below the mean (negative or zero)
    pub fn below_average(&self) -> f64 {
        crate::utils::round1(self.min - self.mean)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_deltas() {
        let stats = SummaryStats {
            max: 112.4,
            min: 91.2,
            mean: 101.5,
            spread: 21.2,
        };
        assert_eq!(stats.above_average(), 10.9);
        assert_eq!(stats.below_average(), -10.3);
    }
}
