//! Ideal transfer-function magnitude for plotting and data export.
//!
//! Responses are evaluated from the closed-form |H|² of each family rather
//! than from the synthesized network:
//!
//! | Family | Low/High-pass | Band-pass |
//! |--------|---------------|-----------|
//! | Butterworth | `1/(1+x^2n)` | `1/(1+δ^2n)` |
//! | Chebyshev | `1/(1+ε²Tn(x)²)` | `1/(1+ε²Tn(δ)²)` |
//! | Bessel | reverse Bessel polynomial | Butterworth shape |
//!
//! where `x = f/fc` (low-pass) or `fc/f` (high-pass), and
//! `δ = (f²−f0²)/(bw·f)` for band-pass.

mod bessel;

use serde::Serialize;

use crate::error::{FilterError, Result};
use crate::prototype::{self, ResponseFamily};
use crate::synthesis::{BandpassResult, LadderResult, LadderShape};

/// Low-pass/high-pass magnitude floor in dB.
pub const LADDER_FLOOR_DB: f64 = -120.0;

/// Band-pass magnitude floor in dB.
pub const BANDPASS_FLOOR_DB: f64 = -100.0;

/// Band-pass magnitudes below this linear value are reported at the floor.
const BANDPASS_FLOOR_MAGNITUDE: f64 = 1e-5;

/// Default number of points in a low-pass/high-pass sweep.
pub const LADDER_POINTS: usize = 51;

/// Default number of points in a band-pass sweep.
pub const BANDPASS_POINTS: usize = 61;

/// Response shape with its shape-specific parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResponseShape {
    LowPass,
    HighPass,
    /// Band-pass around the reference (center) frequency
    BandPass { bandwidth_hz: f64 },
}

impl From<LadderShape> for ResponseShape {
    fn from(shape: LadderShape) -> Self {
        match shape {
            LadderShape::LowPass => Self::LowPass,
            LadderShape::HighPass => Self::HighPass,
        }
    }
}

/// One point of a frequency sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResponsePoint {
    pub frequency_hz: f64,
    pub magnitude_db: f64,
}

/// Chebyshev polynomial of the first kind, `Tn(x)`.
pub fn chebyshev_polynomial(n: usize, x: f64) -> f64 {
    match n {
        0 => 1.0,
        1 => x,
        _ => {
            let (mut t_prev, mut t) = (1.0, x);
            for _ in 2..=n {
                let next = 2.0 * x * t - t_prev;
                t_prev = t;
                t = next;
            }
            t
        }
    }
}

fn chebyshev_epsilon_sq(ripple_db: f64) -> f64 {
    10f64.powf(ripple_db / 10.0) - 1.0
}

fn validate(
    freq_hz: f64,
    reference_hz: f64,
    shape: ResponseShape,
    order: usize,
    family: ResponseFamily,
    ripple_db: f64,
) -> Result<()> {
    if !(freq_hz.is_finite() && freq_hz > 0.0) {
        return Err(FilterError::validation("Frequency must be positive"));
    }
    if !(reference_hz.is_finite() && reference_hz > 0.0) {
        return Err(FilterError::validation("Cutoff frequency must be positive"));
    }
    if let ResponseShape::BandPass { bandwidth_hz } = shape {
        if !(bandwidth_hz.is_finite() && bandwidth_hz > 0.0) {
            return Err(FilterError::validation("Bandwidth must be positive"));
        }
    }
    prototype::validate_order(order)?;
    if family.uses_ripple() {
        prototype::validate_ripple(ripple_db)?;
    }
    Ok(())
}

/// Linear magnitude |H(f)| in 0..=1.
///
/// `reference_hz` is the cutoff for low/high-pass and the center for
/// band-pass. `ripple_db` is only read for Chebyshev.
pub fn magnitude(
    freq_hz: f64,
    reference_hz: f64,
    shape: ResponseShape,
    order: usize,
    family: ResponseFamily,
    ripple_db: f64,
) -> Result<f64> {
    validate(freq_hz, reference_hz, shape, order, family, ripple_db)?;

    let x = match shape {
        ResponseShape::LowPass => freq_hz / reference_hz,
        ResponseShape::HighPass => reference_hz / freq_hz,
        ResponseShape::BandPass { bandwidth_hz } => {
            (freq_hz * freq_hz - reference_hz * reference_hz) / (bandwidth_hz * freq_hz)
        }
    };

    let butterworth = |x: f64| 1.0 / (1.0 + x.powi(2 * order as i32));

    let power = match (family, shape) {
        (ResponseFamily::Butterworth, _) => butterworth(x),
        (ResponseFamily::Chebyshev, _) => {
            let tn = chebyshev_polynomial(order, x);
            1.0 / (1.0 + chebyshev_epsilon_sq(ripple_db) * tn * tn)
        }
        (ResponseFamily::Bessel, ResponseShape::BandPass { .. }) => butterworth(x),
        (ResponseFamily::Bessel, ResponseShape::LowPass) => {
            bessel::power_gain(x, order).unwrap_or(1.0)
        }
        (ResponseFamily::Bessel, ResponseShape::HighPass) => {
            bessel::power_gain(x, order).unwrap_or(0.0)
        }
    };

    Ok(power.sqrt())
}

/// Magnitude in dB, floored at −120 dB (low/high-pass) or −100 dB (band-pass).
pub fn magnitude_db(
    freq_hz: f64,
    reference_hz: f64,
    shape: ResponseShape,
    order: usize,
    family: ResponseFamily,
    ripple_db: f64,
) -> Result<f64> {
    let mag = magnitude(freq_hz, reference_hz, shape, order, family, ripple_db)?;
    Ok(match shape {
        ResponseShape::BandPass { .. } if mag < BANDPASS_FLOOR_MAGNITUDE => BANDPASS_FLOOR_DB,
        ResponseShape::BandPass { .. } => 20.0 * mag.log10(),
        _ if mag <= 0.0 => LADDER_FLOOR_DB,
        _ => (20.0 * mag.log10()).max(LADDER_FLOOR_DB),
    })
}

/// Log-spaced frequencies from 0.1·fc to 10·fc.
pub fn ladder_frequency_points(cutoff_hz: f64, points: usize) -> Result<Vec<f64>> {
    if !(cutoff_hz.is_finite() && cutoff_hz > 0.0) {
        return Err(FilterError::validation("Cutoff frequency must be positive"));
    }
    if points < 2 {
        return Err(FilterError::validation("At least two sweep points are required"));
    }
    let last = (points - 1) as f64;
    Ok((0..points)
        .map(|i| cutoff_hz * 10f64.powf(-1.0 + 2.0 * i as f64 / last))
        .collect())
}

/// Log-spaced frequencies symmetric (in decades) around `center_hz`.
///
/// With `decades = None` the span shows roughly ten bandwidths either side
/// of the center, clamped to 0.1..1.0 decades.
pub fn bandpass_frequency_points(
    center_hz: f64,
    bandwidth_hz: f64,
    decades: Option<f64>,
    points: usize,
) -> Result<Vec<f64>> {
    if !(center_hz.is_finite() && center_hz > 0.0) {
        return Err(FilterError::validation("Center frequency must be positive"));
    }
    if points < 2 {
        return Err(FilterError::validation("At least two sweep points are required"));
    }
    let decades = decades.unwrap_or_else(|| {
        ((center_hz + 10.0 * bandwidth_hz) / center_hz)
            .log10()
            .clamp(0.1, 1.0)
    });
    let log_start = (center_hz / 10f64.powf(decades)).log10();
    let log_end = (center_hz * 10f64.powf(decades)).log10();
    let last = (points - 1) as f64;
    Ok((0..points)
        .map(|i| 10f64.powf(log_start + (log_end - log_start) * i as f64 / last))
        .collect())
}

/// A family/shape pair bound to its reference frequency and order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterResponse {
    pub family: ResponseFamily,
    pub shape: ResponseShape,
    /// Cutoff (low/high-pass) or center (band-pass) frequency
    pub reference_hz: f64,
    pub order: usize,
    pub ripple_db: f64,
}

impl FilterResponse {
    pub fn from_ladder(result: &LadderResult) -> Self {
        let spec = &result.spec;
        Self {
            family: spec.family,
            shape: spec.shape.into(),
            reference_hz: spec.cutoff_hz,
            order: spec.order,
            ripple_db: spec.ripple_db,
        }
    }

    pub fn from_bandpass(result: &BandpassResult) -> Self {
        let spec = &result.spec;
        Self {
            family: spec.family,
            shape: ResponseShape::BandPass {
                bandwidth_hz: spec.bandwidth_hz,
            },
            reference_hz: spec.center_hz,
            order: spec.resonators,
            ripple_db: spec.ripple_db,
        }
    }

    pub fn magnitude_db(&self, freq_hz: f64) -> Result<f64> {
        magnitude_db(
            freq_hz,
            self.reference_hz,
            self.shape,
            self.order,
            self.family,
            self.ripple_db,
        )
    }

    /// Default sweep frequencies for this shape.
    pub fn default_frequencies(&self) -> Result<Vec<f64>> {
        match self.shape {
            ResponseShape::BandPass { bandwidth_hz } => {
                bandpass_frequency_points(self.reference_hz, bandwidth_hz, None, BANDPASS_POINTS)
            }
            _ => ladder_frequency_points(self.reference_hz, LADDER_POINTS),
        }
    }

    /// Evaluate at each frequency, preserving order.
    pub fn sweep(&self, frequencies: &[f64]) -> Result<Vec<ResponsePoint>> {
        frequencies
            .iter()
            .map(|&frequency_hz| {
                Ok(ResponsePoint {
                    frequency_hz,
                    magnitude_db: self.magnitude_db(frequency_hz)?,
                })
            })
            .collect()
    }

    /// Sweep over [`FilterResponse::default_frequencies`].
    pub fn default_sweep(&self) -> Result<Vec<ResponsePoint>> {
        self.sweep(&self.default_frequencies()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    const HALF_POWER_DB: f64 = -3.0103;

    #[test]
    fn test_chebyshev_polynomial() {
        assert_eq!(chebyshev_polynomial(0, 0.3), 1.0);
        assert_eq!(chebyshev_polynomial(1, 0.3), 0.3);
        assert_abs_diff_eq!(chebyshev_polynomial(2, 0.5), -0.5, epsilon = 1e-15);
        // T3(x) = 4x³ − 3x
        assert_abs_diff_eq!(chebyshev_polynomial(3, 2.0), 26.0, epsilon = 1e-12);
        // Tn(1) = 1
        assert_abs_diff_eq!(chebyshev_polynomial(7, 1.0), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_butterworth_half_power_at_cutoff() {
        for shape in [ResponseShape::LowPass, ResponseShape::HighPass] {
            for order in [2, 5, 9] {
                let db = magnitude_db(1e6, 1e6, shape, order, ResponseFamily::Butterworth, 0.5).unwrap();
                assert_abs_diff_eq!(db, HALF_POWER_DB, epsilon = 1e-3);
            }
        }
    }

    #[test]
    fn test_chebyshev_ripple_at_cutoff() {
        let db = magnitude_db(5e6, 5e6, ResponseShape::LowPass, 5, ResponseFamily::Chebyshev, 0.5).unwrap();
        assert_abs_diff_eq!(db, -0.5, epsilon = 1e-9);
    }

    #[test]
    fn test_bessel_lowpass_and_highpass() {
        let lp = magnitude_db(1e6, 1e6, ResponseShape::LowPass, 4, ResponseFamily::Bessel, 0.0).unwrap();
        assert_abs_diff_eq!(lp, HALF_POWER_DB, epsilon = 1e-3);
        let passband = magnitude_db(1e4, 1e6, ResponseShape::LowPass, 4, ResponseFamily::Bessel, 0.0).unwrap();
        assert!(passband > -0.01 && passband <= 0.0);
        let hp_stop = magnitude_db(1e5, 1e6, ResponseShape::HighPass, 4, ResponseFamily::Bessel, 0.0).unwrap();
        assert!(hp_stop < -60.0);
    }

    #[test]
    fn test_bandpass_center_is_flat() {
        let bp = ResponseShape::BandPass { bandwidth_hz: 350e3 };
        for family in ResponseFamily::ALL {
            let db = magnitude_db(14.175e6, 14.175e6, bp, 3, family, 0.5).unwrap();
            assert_abs_diff_eq!(db, 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_bandpass_off_center() {
        let (f0, bw) = (14.175e6, 350e3);
        let bp = ResponseShape::BandPass { bandwidth_hz: bw };
        for f in [f0 - 0.7 * bw, f0 + 0.7 * bw, f0 + 2.0 * bw] {
            let delta = (f * f - f0 * f0) / (bw * f);

            // Bessel band-pass keeps the Butterworth shape
            let butterworth = magnitude(f, f0, bp, 3, ResponseFamily::Butterworth, 0.5).unwrap();
            let bessel = magnitude(f, f0, bp, 3, ResponseFamily::Bessel, 0.5).unwrap();
            assert_relative_eq!(bessel, butterworth, max_relative = 1e-12);
            assert_relative_eq!(
                butterworth,
                (1.0 / (1.0 + delta.powi(6))).sqrt(),
                max_relative = 1e-12
            );

            let eps_sq = 10f64.powf(0.05) - 1.0;
            let tn = chebyshev_polynomial(3, delta);
            let chebyshev = magnitude(f, f0, bp, 3, ResponseFamily::Chebyshev, 0.5).unwrap();
            assert_relative_eq!(
                chebyshev,
                (1.0 / (1.0 + eps_sq * tn * tn)).sqrt(),
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn test_floors() {
        let lp = magnitude_db(1e9, 1e6, ResponseShape::LowPass, 9, ResponseFamily::Butterworth, 0.5).unwrap();
        assert_eq!(lp, LADDER_FLOOR_DB);
        let bessel = magnitude_db(1e7, 1e6, ResponseShape::LowPass, 9, ResponseFamily::Bessel, 0.5).unwrap();
        assert_eq!(bessel, LADDER_FLOOR_DB);
        let bp = ResponseShape::BandPass { bandwidth_hz: 100e3 };
        let far = magnitude_db(1e6, 14e6, bp, 5, ResponseFamily::Butterworth, 0.5).unwrap();
        assert_eq!(far, BANDPASS_FLOOR_DB);
    }

    #[test]
    fn test_bessel_extreme_ratios_hit_floor() {
        let lp = magnitude_db(1e300, 1e6, ResponseShape::LowPass, 9, ResponseFamily::Bessel, 0.5).unwrap();
        assert_eq!(lp, LADDER_FLOOR_DB);
        let hp = magnitude_db(1e-294, 1e6, ResponseShape::HighPass, 9, ResponseFamily::Bessel, 0.5).unwrap();
        assert_eq!(hp, LADDER_FLOOR_DB);
    }

    #[test]
    fn test_invalid_inputs() {
        let lp = ResponseShape::LowPass;
        assert!(magnitude_db(0.0, 1e6, lp, 3, ResponseFamily::Butterworth, 0.5).is_err());
        assert!(magnitude_db(-1.0, 1e6, lp, 3, ResponseFamily::Butterworth, 0.5).is_err());
        assert!(magnitude_db(1e6, 1e6, lp, 10, ResponseFamily::Bessel, 0.5).is_err());
        let bp = ResponseShape::BandPass { bandwidth_hz: 0.0 };
        assert!(magnitude_db(1e6, 1e6, bp, 3, ResponseFamily::Butterworth, 0.5).is_err());
    }

    #[test]
    fn test_ladder_frequency_points() {
        let f = ladder_frequency_points(1e6, LADDER_POINTS).unwrap();
        assert_eq!(f.len(), 51);
        assert_relative_eq!(f[0], 1e5, max_relative = 1e-12);
        assert_relative_eq!(f[25], 1e6, max_relative = 1e-12);
        assert_relative_eq!(f[50], 1e7, max_relative = 1e-12);
        assert!(f.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_bandpass_frequency_points() {
        // Narrow band: span clamps to 0.1 decade
        let f = bandpass_frequency_points(14.175e6, 350e3, None, BANDPASS_POINTS).unwrap();
        assert_eq!(f.len(), 61);
        assert_relative_eq!(f[0], 14.175e6 / 10f64.powf(0.1), max_relative = 1e-9);
        assert_relative_eq!(f[30], 14.175e6, max_relative = 1e-9);

        let f = bandpass_frequency_points(1e6, 1e6, Some(0.5), 11).unwrap();
        assert_relative_eq!(f[10], 1e6 * 10f64.powf(0.5), max_relative = 1e-9);
    }

    #[test]
    fn test_sweep_keeps_order() {
        let response = FilterResponse {
            family: ResponseFamily::Butterworth,
            shape: ResponseShape::HighPass,
            reference_hz: 7e6,
            order: 5,
            ripple_db: 0.5,
        };
        let points = response.default_sweep().unwrap();
        assert_eq!(points.len(), LADDER_POINTS);
        assert!(points.windows(2).all(|w| w[0].frequency_hz < w[1].frequency_hz));
        // High-pass rises with frequency
        assert!(points.windows(2).all(|w| w[0].magnitude_db <= w[1].magnitude_db));
    }
}
