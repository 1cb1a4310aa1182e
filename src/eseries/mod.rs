//! Matching computed values to standard E-series components.
//!
//! Each target is matched twice:
//!
//! 1. **Single** - the nearest value of the series, searching the target's
//!    decade plus the adjacent decade boundaries.
//! 2. **Parallel** - the best pair of series values whose parallel
//!    combination approaches the target. Capacitors add in parallel;
//!    inductors and resistors combine harmonically.
//!
//! The pair is only worth suggesting when it beats the single part, see
//! [`ESeriesMatch::preferred_parallel`].

mod series;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{FilterError, Result};

/// Default maximum ratio between the two parts of a parallel pair.
pub const DEFAULT_RATIO_LIMIT: f64 = 10.0;

/// Targets below this are assumed to be capacitors in [`ParallelMode::Auto`].
const AUTO_ADDITIVE_BELOW: f64 = 1e-6;

/// Standard value series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ESeries {
    /// 10 % tolerance, 12 values per decade
    E12,
    /// 5 % tolerance, 24 values per decade
    E24,
    /// 1 % tolerance, 96 values per decade
    E96,
}

impl ESeries {
    pub const ALL: [ESeries; 3] = [Self::E12, Self::E24, Self::E96];

    /// Normalized values in 1.0..10.0.
    pub fn values(&self) -> &'static [f64] {
        match self {
            Self::E12 => &series::E12,
            Self::E24 => &series::E24,
            Self::E96 => &series::E96,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::E12 => "E12",
            Self::E24 => "E24",
            Self::E96 => "E96",
        }
    }
}

impl fmt::Display for ESeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ESeries {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "E12" => Ok(Self::E12),
            "E24" => Ok(Self::E24),
            "E96" => Ok(Self::E96),
            _ => Err(FilterError::validation(format!(
                "Unknown series '{}'. Use E12, E24, or E96.",
                s.trim()
            ))),
        }
    }
}

/// How two parallel parts combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParallelMode {
    /// Additive below 1 µ (capacitor-sized values), harmonic otherwise
    #[default]
    Auto,
    /// `v1 + v2` (capacitors)
    Additive,
    /// `v1·v2 / (v1 + v2)` (inductors, resistors)
    Harmonic,
}

impl ParallelMode {
    fn resolve(self, target: f64) -> Self {
        match self {
            Self::Auto if target < AUTO_ADDITIVE_BELOW => Self::Additive,
            Self::Auto => Self::Harmonic,
            explicit => explicit,
        }
    }
}

/// Parallel-search options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchOptions {
    pub mode: ParallelMode,
    /// Maximum `max(v1, v2) / min(v1, v2)`
    pub ratio_limit: f64,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            mode: ParallelMode::Auto,
            ratio_limit: DEFAULT_RATIO_LIMIT,
        }
    }
}

impl MatchOptions {
    pub fn with_mode(mut self, mode: ParallelMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_ratio_limit(mut self, ratio_limit: f64) -> Self {
        self.ratio_limit = ratio_limit;
        self
    }
}

/// A pair of standard parts in parallel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParallelMatch {
    /// The two parts, smaller first
    pub values: (f64, f64),
    /// Combined value
    pub value: f64,
    pub error_pct: f64,
}

/// Result of matching one target value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ESeriesMatch {
    pub target: f64,
    pub single_value: f64,
    /// Signed error `(single − target)/target·100`
    pub single_error_pct: f64,
    pub parallel: Option<ParallelMatch>,
}

impl ESeriesMatch {
    /// The parallel pair, only if it is strictly closer than the single part.
    pub fn preferred_parallel(&self) -> Option<&ParallelMatch> {
        self.parallel
            .as_ref()
            .filter(|p| p.error_pct.abs() < self.single_error_pct.abs())
    }
}

fn validate_target(target: f64) -> Result<()> {
    if target.is_finite() && target > 0.0 {
        Ok(())
    } else {
        Err(FilterError::validation(format!(
            "Value must be positive, got {}",
            target
        )))
    }
}

/// Split a positive value into a mantissa in [1, 10) and its decade.
fn normalize(value: f64) -> (f64, i32) {
    let mut decade = value.log10().floor() as i32;
    let mut mantissa = value / denormalize(1.0, decade);
    if mantissa >= 10.0 {
        mantissa /= 10.0;
        decade += 1;
    }
    (mantissa, decade)
}

/// `mantissa·10^decade`, dividing for negative decades to keep pF/nH exact.
fn denormalize(mantissa: f64, decade: i32) -> f64 {
    if decade >= 0 {
        mantissa * 10f64.powi(decade)
    } else {
        mantissa / 10f64.powi(-decade)
    }
}

fn error_pct(actual: f64, target: f64) -> f64 {
    (actual - target) / target * 100.0
}

/// Nearest single series value and its signed percent error.
pub fn find_closest_single(target: f64, series: ESeries) -> Result<(f64, f64)> {
    validate_target(target)?;
    Ok(closest_single(target, series))
}

fn closest_single(target: f64, series: ESeries) -> (f64, f64) {
    let (_, decade) = normalize(target);
    let values = series.values();

    let in_decade = values.iter().map(|&v| denormalize(v, decade));
    let boundaries = [
        denormalize(values[0], decade + 1),
        denormalize(values[values.len() - 1], decade - 1),
    ];

    let mut best = (f64::NAN, f64::INFINITY);
    for candidate in in_decade.chain(boundaries) {
        let err = error_pct(candidate, target).abs();
        if err < best.1 {
            best = (candidate, err);
        }
    }
    (best.0, error_pct(best.0, target))
}

/// Best parallel pair for `target`, or `None` when no pair satisfies the
/// ratio limit.
pub fn find_parallel_combo(
    target: f64,
    series: ESeries,
    options: &MatchOptions,
) -> Result<Option<ParallelMatch>> {
    validate_target(target)?;

    let (_, decade) = normalize(target);
    let pool: Vec<f64> = (decade - 1..=decade + 2)
        .flat_map(|d| series.values().iter().map(move |&v| denormalize(v, d)))
        .collect();

    let within_limit = |a: f64, b: f64| a.max(b) / a.min(b) <= options.ratio_limit;

    let mut best: Option<ParallelMatch> = None;
    let mut consider = |v1: f64, v2: f64, value: f64| {
        let error = error_pct(value, target);
        if best.map_or(true, |b| error.abs() < b.error_pct.abs()) {
            best = Some(ParallelMatch {
                values: (v1.min(v2), v1.max(v2)),
                value,
                error_pct: error,
            });
        }
    };

    match options.mode.resolve(target) {
        ParallelMode::Harmonic => {
            for &v1 in pool.iter().filter(|&&v| v > target) {
                let needed = v1 * target / (v1 - target);
                if needed <= 0.0 || !needed.is_finite() {
                    continue;
                }
                let (v2, _) = closest_single(needed, series);
                if !within_limit(v1, v2) {
                    continue;
                }
                consider(v1, v2, v1 * v2 / (v1 + v2));
            }
        }
        _ => {
            for (i, &v1) in pool.iter().enumerate() {
                for &v2 in &pool[i..] {
                    if within_limit(v1, v2) {
                        consider(v1, v2, v1 + v2);
                    }
                }
            }
        }
    }

    Ok(best)
}

/// Match `target` with the default ratio limit.
pub fn match_component(target: f64, series: ESeries, mode: ParallelMode) -> Result<ESeriesMatch> {
    match_component_with(target, series, &MatchOptions::default().with_mode(mode))
}

/// Match `target` with explicit options.
pub fn match_component_with(
    target: f64,
    series: ESeries,
    options: &MatchOptions,
) -> Result<ESeriesMatch> {
    let (single_value, single_error_pct) = find_closest_single(target, series)?;
    let parallel = find_parallel_combo(target, series, options)?;
    Ok(ESeriesMatch {
        target,
        single_value,
        single_error_pct,
        parallel,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_normalize() {
        let (m, d) = normalize(4.7e-9);
        assert_relative_eq!(m, 4.7, max_relative = 1e-12);
        assert_eq!(d, -9);
        let (m, d) = normalize(1e3);
        assert_relative_eq!(m, 1.0, max_relative = 1e-12);
        assert_eq!(d, 3);
    }

    #[test]
    fn test_exact_match() {
        let m = match_component(100e-12, ESeries::E24, ParallelMode::Auto).unwrap();
        assert_relative_eq!(m.single_value, 100e-12, max_relative = 1e-12);
        assert_abs_diff_eq!(m.single_error_pct, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_decade_boundary() {
        // 9.8 is closer to 10 (next decade) than to 9.1
        let (v, err) = find_closest_single(9.8e-9, ESeries::E24).unwrap();
        assert_relative_eq!(v, 10e-9, max_relative = 1e-12);
        assert!(err > 0.0);
    }

    #[test]
    fn test_additive_pair() {
        let m = match_component(123.4e-12, ESeries::E24, ParallelMode::Auto).unwrap();
        assert_relative_eq!(m.single_value, 120e-12, max_relative = 1e-12);
        let p = m.preferred_parallel().unwrap();
        assert_relative_eq!(p.values.0, 13e-12, max_relative = 1e-12);
        assert_relative_eq!(p.values.1, 110e-12, max_relative = 1e-12);
        assert_relative_eq!(p.value, 123e-12, max_relative = 1e-12);
    }

    #[test]
    fn test_harmonic_pair() {
        let m = match_component(1.234e-6, ESeries::E24, ParallelMode::Auto).unwrap();
        let p = m.preferred_parallel().unwrap();
        assert_relative_eq!(p.values.0, 1.8e-6, max_relative = 1e-12);
        assert_relative_eq!(p.values.1, 3.9e-6, max_relative = 1e-12);
        assert_relative_eq!(p.value, 1.8e-6 * 3.9e-6 / 5.7e-6, max_relative = 1e-12);
    }

    #[test]
    fn test_parallel_suppressed_when_worse() {
        let m = match_component(5.55e-6, ESeries::E12, ParallelMode::Harmonic).unwrap();
        assert!(m.parallel.is_some());
        assert!(m.preferred_parallel().is_none());
    }

    #[test]
    fn test_ratio_limit_respected() {
        let opts = MatchOptions::default()
            .with_mode(ParallelMode::Additive)
            .with_ratio_limit(2.0);
        let p = find_parallel_combo(317e-12, ESeries::E12, &opts).unwrap().unwrap();
        assert!(p.values.1 / p.values.0 <= 2.0);
    }

    #[test]
    fn test_finer_series_never_worse() {
        for target in [1.234e-6, 317e-12, 8.4e3, 42.0, 6.0e-9] {
            let e12 = find_closest_single(target, ESeries::E12).unwrap().1.abs();
            let e24 = find_closest_single(target, ESeries::E24).unwrap().1.abs();
            assert!(e24 <= e12, "E24 worse than E12 for {}", target);
        }
        // E24 is not a subset of E96; compare where E96 brackets the target
        for target in [151e-12, 2.63e-7, 8.4e3] {
            let e24 = find_closest_single(target, ESeries::E24).unwrap().1.abs();
            let e96 = find_closest_single(target, ESeries::E96).unwrap().1.abs();
            assert!(e96 <= e24, "E96 worse than E24 for {}", target);
        }
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(match_component(0.0, ESeries::E24, ParallelMode::Auto).is_err());
        assert!(match_component(-1e-9, ESeries::E24, ParallelMode::Auto).is_err());
        assert!(match_component(f64::NAN, ESeries::E24, ParallelMode::Auto).is_err());
        assert!("E48".parse::<ESeries>().is_err());
        assert_eq!("e96".parse::<ESeries>().unwrap(), ESeries::E96);
    }
}
