//! Chebyshev g-values for arbitrary passband ripple.

use std::f64::consts::PI;

use super::GValues;

/// dB-to-neper scaling used by the ripple conversion, `2·20·log10(e)`
/// rounded to 17.37 as in the classic filter tables.
pub const RIPPLE_DB_SCALE: f64 = 17.37;

/// Compute Chebyshev prototype g-values for order `n` and `ripple_db`.
///
/// ```text
/// β = ln(coth(ripple / 17.37))            γ = sinh(β / 2n)
/// a[i] = sin((2i−1)π / 2n)                 b[i] = γ² + sin²(iπ / n)
/// g[1] = 2·a[1] / γ
/// g[i] = 4·a[i−1]·a[i] / (b[i−1]·g[i−1])
/// ```
///
/// `n` must be at least 1; callers validate the 2..9 range.
pub fn chebyshev_g_values(n: usize, ripple_db: f64) -> GValues {
    let rr = ripple_db / RIPPLE_DB_SCALE;
    let e2x = (2.0 * rr).exp();
    let coth = (e2x + 1.0) / (e2x - 1.0);
    let beta = coth.ln();
    let gamma = (beta / (2 * n) as f64).sinh();

    let nf = n as f64;
    let a: Vec<f64> = (1..=n)
        .map(|i| ((2 * i - 1) as f64 * PI / (2.0 * nf)).sin())
        .collect();
    let b: Vec<f64> = (1..=n)
        .map(|i| gamma * gamma + (PI * i as f64 / nf).sin().powi(2))
        .collect();

    let mut g = Vec::with_capacity(n);
    g.push(2.0 * a[0] / gamma);
    for i in 1..n {
        let prev = g[i - 1];
        g.push(4.0 * a[i - 1] * a[i] / (b[i - 1] * prev));
    }

    GValues::new(g)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prototype::tables::{CHEBYSHEV_RIPPLES_DB, CHEBYSHEV_TABLE};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_reproduces_table() {
        for (r_idx, &ripple) in CHEBYSHEV_RIPPLES_DB.iter().enumerate() {
            for row in CHEBYSHEV_TABLE[r_idx].iter() {
                let g = chebyshev_g_values(row.len(), ripple);
                for (computed, tabulated) in g.as_slice().iter().zip(row.iter()) {
                    assert_abs_diff_eq!(*computed, *tabulated, epsilon = 1e-4);
                }
            }
        }
    }

    #[test]
    fn test_odd_orders_symmetric() {
        for n in [3, 5, 7, 9] {
            let g = chebyshev_g_values(n, 0.5);
            assert!(g.is_symmetric(1e-9), "order {} not symmetric", n);
        }
    }

    #[test]
    fn test_even_orders_available() {
        let g = chebyshev_g_values(4, 1.0);
        assert_eq!(g.order(), 4);
        assert!(g.as_slice().iter().all(|v| v.is_finite() && *v > 0.0));
    }

    #[test]
    fn test_first_element_closed_form() {
        // g1 = 2·sin(π/2n)/γ
        let n = 5;
        let ripple = 0.25;
        let rr = ripple / RIPPLE_DB_SCALE;
        let e2x = (2.0 * rr).exp();
        let beta = ((e2x + 1.0) / (e2x - 1.0)).ln();
        let gamma = (beta / 10.0).sinh();
        let expected = 2.0 * (PI / 10.0).sin() / gamma;
        let g = chebyshev_g_values(n, ripple);
        assert!((g.g(1) - expected).abs() <= expected * 1e-12);
    }
}
