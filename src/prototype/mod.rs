//! Normalized low-pass prototype element values ("g-values").
//!
//! A prototype is a doubly-terminated ladder normalized to 1 rad/s and 1 Ω.
//! Its element values g[1]..g[n] are scaled by the synthesizers into real
//! inductors and capacitors.
//!
//! Three response families are supported:
//!
//! | Family | Source |
//! |--------|--------|
//! | Butterworth | closed form `g[i] = 2·sin((2i−1)π/2n)` |
//! | Chebyshev | ripple recurrence ([`chebyshev_g_values`]) or the equal-termination table |
//! | Bessel | fixed table for orders 2..9 |
//!
//! References: Zverev, "Handbook of Filter Synthesis" (1967); Matthaei,
//! Young, Jones, "Microwave Filters, Impedance-Matching Networks, and
//! Coupling Structures".

mod chebyshev;
mod tables;

pub use chebyshev::chebyshev_g_values;
pub use tables::{BESSEL_G_VALUES, CHEBYSHEV_RIPPLES_DB, CHEBYSHEV_TABLE};

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{FilterError, Result};
use crate::{MAX_ORDER, MIN_ORDER};

/// Filter response family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFamily {
    /// Maximally flat magnitude
    Butterworth,
    /// Equiripple passband
    Chebyshev,
    /// Maximally flat group delay (Thomson)
    Bessel,
}

impl ResponseFamily {
    /// All families, in menu order.
    pub const ALL: [ResponseFamily; 3] = [Self::Butterworth, Self::Chebyshev, Self::Bessel];

    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Butterworth => "butterworth",
            Self::Chebyshev => "chebyshev",
            Self::Bessel => "bessel",
        }
    }

    /// Title-case name for headers ("Butterworth").
    pub fn title(&self) -> &'static str {
        match self {
            Self::Butterworth => "Butterworth",
            Self::Chebyshev => "Chebyshev",
            Self::Bessel => "Bessel",
        }
    }

    /// Whether the ripple parameter applies to this family.
    pub fn uses_ripple(&self) -> bool {
        matches!(self, Self::Chebyshev)
    }
}

impl fmt::Display for ResponseFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResponseFamily {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "butterworth" | "bw" | "b" => Ok(Self::Butterworth),
            "chebyshev" | "ch" | "c" => Ok(Self::Chebyshev),
            "bessel" | "bs" => Ok(Self::Bessel),
            other => Err(FilterError::validation(format!(
                "Unknown filter type '{}': use butterworth, chebyshev or bessel",
                other
            ))),
        }
    }
}

/// Prototype g-values g[1]..g[n].
///
/// Indexing through [`GValues::g`] is 1-based to match filter-synthesis
/// notation; `as_slice()` exposes the 0-based storage.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GValues(Vec<f64>);

impl GValues {
    /// Wrap an already computed sequence.
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    /// The i-th element value, 1-indexed.
    ///
    /// # Panics
    /// Panics if `i` is 0 or greater than the order.
    pub fn g(&self, i: usize) -> f64 {
        assert!(i >= 1 && i <= self.0.len(), "g-value index {} out of range", i);
        self.0[i - 1]
    }

    /// Filter order (number of elements).
    pub fn order(&self) -> usize {
        self.0.len()
    }

    /// First element value g[1].
    pub fn first(&self) -> f64 {
        self.0[0]
    }

    /// Last element value g[n].
    pub fn last(&self) -> f64 {
        self.0[self.0.len() - 1]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Iterate `(position, g)` pairs with 1-based positions.
    pub fn positions(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.0.iter().enumerate().map(|(i, &g)| (i + 1, g))
    }

    /// True when g[i] == g[n+1−i] within a relative tolerance.
    pub fn is_symmetric(&self, rel_tol: f64) -> bool {
        let n = self.0.len();
        (0..n / 2).all(|i| {
            let (a, b) = (self.0[i], self.0[n - 1 - i]);
            (a - b).abs() <= rel_tol * a.abs().max(b.abs())
        })
    }
}

/// Check that an order lies in the supported 2..9 range.
pub fn validate_order(n: usize) -> Result<()> {
    if (MIN_ORDER..=MAX_ORDER).contains(&n) {
        Ok(())
    } else {
        Err(FilterError::validation(format!(
            "Order must be between {} and {}, got {}",
            MIN_ORDER, MAX_ORDER, n
        )))
    }
}

/// Check a Chebyshev ripple value.
pub fn validate_ripple(ripple_db: f64) -> Result<()> {
    if ripple_db.is_finite() && ripple_db > 0.0 {
        Ok(())
    } else {
        Err(FilterError::validation(format!(
            "Ripple must be positive, got {} dB",
            ripple_db
        )))
    }
}

/// Butterworth prototype: `g[i] = 2·sin((2i−1)π/(2n))`.
pub fn butterworth_g_values(n: usize) -> GValues {
    GValues(
        (1..=n)
            .map(|i| 2.0 * ((2 * i - 1) as f64 * PI / (2 * n) as f64).sin())
            .collect(),
    )
}

/// Bessel (Thomson) prototype from the fixed table.
pub fn bessel_g_values(n: usize) -> Result<GValues> {
    tables::bessel_row(n)
        .map(|row| GValues(row.to_vec()))
        .ok_or_else(|| {
            FilterError::validation(format!(
                "Bessel g-values only available for orders 2-9, got {}",
                n
            ))
        })
}

/// Chebyshev prototype from the equal-termination table.
///
/// Only ripple 0.1/0.5/1.0 dB and odd orders 3..9 are tabulated.
pub fn chebyshev_table_g_values(n: usize, ripple_db: f64) -> Result<GValues> {
    let Some(ripple_idx) = tables::ripple_index(ripple_db) else {
        return Err(FilterError::validation(format!(
            "Ripple {} dB not tabulated. Use 0.1, 0.5, or 1.0",
            ripple_db
        )));
    };
    tables::chebyshev_row(ripple_idx, n)
        .map(|row| GValues(row.to_vec()))
        .ok_or_else(|| {
            FilterError::validation(format!(
                "Chebyshev requires odd resonator count (3, 5, 7, 9) for equal terminations. \
                 Got {}. Use Butterworth for even counts.",
                n
            ))
        })
}

/// g-values for a ladder (low-pass/high-pass) design.
///
/// Chebyshev always goes through the continuous recurrence so that even
/// orders and arbitrary ripple values are available.
pub fn g_values(family: ResponseFamily, n: usize, ripple_db: f64) -> Result<GValues> {
    validate_order(n)?;
    let g = match family {
        ResponseFamily::Butterworth => butterworth_g_values(n),
        ResponseFamily::Chebyshev => {
            validate_ripple(ripple_db)?;
            chebyshev_g_values(n, ripple_db)
        }
        ResponseFamily::Bessel => bessel_g_values(n)?,
    };
    log::debug!("{} prototype n={}: {:?}", family, n, g.as_slice());
    Ok(g)
}

/// g-values for a coupled-resonator band-pass design.
///
/// Tabulated Chebyshev entries are used verbatim; other ripple values fall
/// back to the recurrence. Odd `n` for Chebyshev is the caller's check.
pub fn bandpass_g_values(family: ResponseFamily, n: usize, ripple_db: f64) -> Result<GValues> {
    if family != ResponseFamily::Chebyshev {
        return g_values(family, n, ripple_db);
    }
    validate_order(n)?;
    validate_ripple(ripple_db)?;
    let g = match tables::ripple_index(ripple_db) {
        Some(idx) => match tables::chebyshev_row(idx, n) {
            Some(row) => GValues(row.to_vec()),
            None => chebyshev_g_values(n, ripple_db),
        },
        None => chebyshev_g_values(n, ripple_db),
    };
    log::debug!("chebyshev band-pass prototype n={}: {:?}", n, g.as_slice());
    Ok(g)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_butterworth_shape() {
        for n in 2..=9 {
            let g = butterworth_g_values(n);
            assert_eq!(g.order(), n);
            assert!(g.as_slice().iter().all(|&v| v > 0.0));
            assert!(g.is_symmetric(1e-12), "order {} not palindromic", n);
        }
    }

    #[test]
    fn test_butterworth_known_values() {
        let g = butterworth_g_values(3);
        assert_relative_eq!(g.g(1), 1.0, epsilon = 1e-12);
        assert_relative_eq!(g.g(2), 2.0, epsilon = 1e-12);
        assert_relative_eq!(g.g(3), 1.0, epsilon = 1e-12);

        let g = butterworth_g_values(2);
        assert_relative_eq!(g.g(1), std::f64::consts::SQRT_2, max_relative = 1e-12);
    }

    #[test]
    fn test_bessel_table_lookup() {
        let g = bessel_g_values(3).unwrap();
        assert_eq!(g.as_slice(), &[0.3374, 0.9705, 2.2034]);
        assert!(!g.is_symmetric(1e-3));
        assert!(bessel_g_values(1).is_err());
        assert!(bessel_g_values(10).is_err());
    }

    #[test]
    fn test_chebyshev_table_restrictions() {
        let g = chebyshev_table_g_values(3, 0.5).unwrap();
        assert_eq!(g.as_slice(), &[1.59633, 1.09668, 1.59633]);
        assert!(chebyshev_table_g_values(4, 0.5).is_err());
        assert!(chebyshev_table_g_values(3, 0.25).is_err());
    }

    #[test]
    fn test_ladder_chebyshev_uses_recurrence() {
        let g = g_values(ResponseFamily::Chebyshev, 4, 0.5).unwrap();
        assert_eq!(g.order(), 4);
        let direct = chebyshev_g_values(4, 0.5);
        assert_eq!(g, direct);
    }

    #[test]
    fn test_bandpass_prefers_table() {
        let g = bandpass_g_values(ResponseFamily::Chebyshev, 5, 0.1).unwrap();
        assert_eq!(g.g(3), 1.97503);

        // 0.25 dB is not tabulated
        let g = bandpass_g_values(ResponseFamily::Chebyshev, 5, 0.25).unwrap();
        assert_eq!(g, chebyshev_g_values(5, 0.25));
    }

    #[test]
    fn test_order_validation() {
        assert!(g_values(ResponseFamily::Butterworth, 1, 0.5).is_err());
        assert!(g_values(ResponseFamily::Butterworth, 10, 0.5).is_err());
        assert!(g_values(ResponseFamily::Chebyshev, 3, 0.0).is_err());
        assert!(g_values(ResponseFamily::Chebyshev, 3, f64::NAN).is_err());
    }

    #[test]
    fn test_family_aliases() {
        assert_eq!("bw".parse::<ResponseFamily>().unwrap(), ResponseFamily::Butterworth);
        assert_eq!("CH".parse::<ResponseFamily>().unwrap(), ResponseFamily::Chebyshev);
        assert_eq!("bs".parse::<ResponseFamily>().unwrap(), ResponseFamily::Bessel);
        let err = "elliptic".parse::<ResponseFamily>().unwrap_err();
        assert!(matches!(err, FilterError::Validation { .. }));
    }
}
