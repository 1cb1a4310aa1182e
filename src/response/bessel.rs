//! Bessel (Thomson) magnitude response from the reverse Bessel polynomials.

/// Reverse Bessel polynomial coefficients c0..cn, indexed by `order - 2`.
const COEFFICIENTS: [&[f64]; 8] = [
    &[3.0, 3.0, 1.0],
    &[15.0, 15.0, 6.0, 1.0],
    &[105.0, 105.0, 45.0, 10.0, 1.0],
    &[945.0, 945.0, 420.0, 105.0, 15.0, 1.0],
    &[10395.0, 10395.0, 4725.0, 1260.0, 210.0, 21.0, 1.0],
    &[135135.0, 135135.0, 62370.0, 17325.0, 3150.0, 378.0, 28.0, 1.0],
    &[2027025.0, 2027025.0, 945945.0, 270270.0, 51975.0, 6930.0, 630.0, 36.0, 1.0],
    &[
        34459425.0, 34459425.0, 16216200.0, 4729725.0, 945945.0, 135135.0, 13860.0, 990.0, 45.0,
        1.0,
    ],
];

/// Frequency scale placing the −3 dB point at the cutoff, indexed by `order - 2`.
const SCALE: [f64; 8] = [1.3617, 1.7557, 2.1139, 2.4274, 2.7034, 2.9517, 3.1796, 3.3917];

/// |H|² at normalized frequency `ratio` (f/fc for low-pass, fc/f for
/// high-pass). `None` when the polynomial vanishes; zero once it overflows.
///
/// `order` must be in 2..9.
pub(super) fn power_gain(ratio: f64, order: usize) -> Option<f64> {
    let coeffs = COEFFICIENTS[order - 2];
    let w = ratio * SCALE[order - 2];

    let mut re = 0.0;
    let mut im = 0.0;
    let mut w_power = 1.0;
    for (k, &c) in coeffs.iter().enumerate() {
        let sign = if (k / 2) % 2 == 0 { 1.0 } else { -1.0 };
        if k % 2 == 0 {
            re += sign * c * w_power;
        } else {
            im += sign * c * w_power;
        }
        w_power *= w;
    }

    let denom = re * re + im * im;
    if !denom.is_finite() {
        return Some(0.0);
    }
    if denom == 0.0 {
        return None;
    }
    Some((coeffs[0] * coeffs[0] / denom).min(1.0))
}
