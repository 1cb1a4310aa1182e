//! Coupled-resonator band-pass synthesis (top-C and shunt-C).

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{FilterError, Result};
use crate::prototype::{self, GValues, ResponseFamily};
use crate::{DEFAULT_IMPEDANCE_OHMS, DEFAULT_Q_SAFETY, DEFAULT_RESONATORS, DEFAULT_RIPPLE_DB};

use super::require_positive;

/// Shunt-C coupling stops being practical above this fractional bandwidth.
const SHUNT_FBW_LIMIT: f64 = 0.10;

/// Lumped coupled resonators stop being practical above this fractional bandwidth.
const LUMPED_FBW_LIMIT: f64 = 0.40;

/// How adjacent resonators are coupled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Coupling {
    /// Series capacitors between the hot ends of the tanks
    Top,
    /// Capacitors to ground at the junctions
    Shunt,
}

impl Coupling {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Shunt => "shunt",
        }
    }

    /// Display name ("Top-C", "Shunt-C").
    pub fn title(&self) -> &'static str {
        match self {
            Self::Top => "Top-C",
            Self::Shunt => "Shunt-C",
        }
    }
}

impl fmt::Display for Coupling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Coupling {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" | "t" => Ok(Self::Top),
            "shunt" | "s" => Ok(Self::Shunt),
            other => Err(FilterError::validation(format!(
                "Coupling must be 'top' or 'shunt', got '{}'",
                other
            ))),
        }
    }
}

/// Advisory note attached to a feasible band-pass design.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DesignWarning {
    /// Shunt-C coupling with a fractional bandwidth above 10 %
    ShuntBandwidth { fbw: f64 },
    /// Fractional bandwidth above 40 %
    WideBandwidth { fbw: f64 },
}

impl fmt::Display for DesignWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShuntBandwidth { fbw } => write!(
                f,
                "FBW {:.1}% exceeds 10% limit for Shunt-C; consider Top-C topology",
                fbw * 100.0
            ),
            Self::WideBandwidth { fbw } => write!(
                f,
                "FBW {:.1}% exceeds 40%; consider transmission-line design",
                fbw * 100.0
            ),
        }
    }
}

/// Parameters of a coupled-resonator band-pass design.
#[derive(Debug, Clone, PartialEq)]
pub struct BandpassSpec {
    pub family: ResponseFamily,
    pub coupling: Coupling,
    pub center_hz: f64,
    pub bandwidth_hz: f64,
    pub impedance_ohms: f64,
    pub resonators: usize,
    /// Passband ripple in dB, Chebyshev only
    pub ripple_db: f64,
    /// Multiplier on the loaded Q for the minimum component Q
    pub q_safety: f64,
    /// Band edges given by the user, if the design was specified that way
    edges: Option<(f64, f64)>,
}

impl BandpassSpec {
    /// Create a spec from center frequency and bandwidth.
    pub fn new(family: ResponseFamily, coupling: Coupling, center_hz: f64, bandwidth_hz: f64) -> Self {
        Self {
            family,
            coupling,
            center_hz,
            bandwidth_hz,
            impedance_ohms: DEFAULT_IMPEDANCE_OHMS,
            resonators: DEFAULT_RESONATORS,
            ripple_db: DEFAULT_RIPPLE_DB,
            q_safety: DEFAULT_Q_SAFETY,
            edges: None,
        }
    }

    /// Create a spec from lower and upper band edges.
    ///
    /// The center is the geometric mean `sqrt(fl·fh)`; the reported edges
    /// are the ones given here.
    pub fn from_edges(family: ResponseFamily, coupling: Coupling, f_low_hz: f64, f_high_hz: f64) -> Result<Self> {
        require_positive(f_low_hz, "Lower frequency")?;
        require_positive(f_high_hz, "Upper frequency")?;
        if f_low_hz >= f_high_hz {
            return Err(FilterError::validation(
                "Lower frequency must be less than upper frequency",
            ));
        }
        let mut spec = Self::new(
            family,
            coupling,
            (f_low_hz * f_high_hz).sqrt(),
            f_high_hz - f_low_hz,
        );
        spec.edges = Some((f_low_hz, f_high_hz));
        Ok(spec)
    }

    pub fn with_impedance(mut self, impedance_ohms: f64) -> Self {
        self.impedance_ohms = impedance_ohms;
        self
    }

    pub fn with_resonators(mut self, resonators: usize) -> Self {
        self.resonators = resonators;
        self
    }

    pub fn with_ripple(mut self, ripple_db: f64) -> Self {
        self.ripple_db = ripple_db;
        self
    }

    pub fn with_q_safety(mut self, q_safety: f64) -> Self {
        self.q_safety = q_safety;
        self
    }

    /// Lower and upper band edges in Hz.
    pub fn band_edges(&self) -> (f64, f64) {
        self.edges.unwrap_or((
            self.center_hz - self.bandwidth_hz / 2.0,
            self.center_hz + self.bandwidth_hz / 2.0,
        ))
    }

    /// Ripple to report, `None` unless the family uses it.
    pub fn effective_ripple(&self) -> Option<f64> {
        self.family.uses_ripple().then_some(self.ripple_db)
    }

    /// Fractional bandwidth `bw / f0`.
    pub fn fractional_bandwidth(&self) -> f64 {
        self.bandwidth_hz / self.center_hz
    }

    fn validate(&self) -> Result<()> {
        if !(self.center_hz.is_finite() && self.center_hz > 0.0) {
            return Err(FilterError::validation("Center frequency must be positive"));
        }
        if !(self.bandwidth_hz.is_finite() && self.bandwidth_hz > 0.0) {
            return Err(FilterError::validation("Bandwidth must be positive"));
        }
        if self.bandwidth_hz >= self.center_hz {
            return Err(FilterError::validation(
                "Bandwidth must be less than center frequency",
            ));
        }
        require_positive(self.impedance_ohms, "Impedance")?;
        if !(crate::MIN_ORDER..=crate::MAX_ORDER).contains(&self.resonators) {
            return Err(FilterError::validation(format!(
                "Number of resonators must be between {} and {}",
                crate::MIN_ORDER,
                crate::MAX_ORDER
            )));
        }
        require_positive(self.q_safety, "Q safety factor")?;
        if self.family == ResponseFamily::Chebyshev {
            if self.resonators % 2 == 0 {
                return Err(FilterError::validation(format!(
                    "Chebyshev requires odd resonator count (3, 5, 7, 9) for equal terminations. \
                     Got {}. Use Butterworth for even counts.",
                    self.resonators
                )));
            }
            prototype::validate_ripple(self.ripple_db)?;
        }
        Ok(())
    }
}

/// Result of a band-pass synthesis.
#[derive(Debug, Clone, PartialEq)]
pub struct BandpassResult {
    pub spec: BandpassSpec,
    pub g_values: GValues,
    /// Fractional bandwidth `bw / f0`
    pub fbw: f64,
    pub f_low_hz: f64,
    pub f_high_hz: f64,
    /// Coupling coefficients k12..k(n−1)n
    pub coupling_coefficients: Vec<f64>,
    pub qe_in: f64,
    pub qe_out: f64,
    /// Resonator inductance shared by every tank
    pub l_resonant: f64,
    /// Uncompensated resonator capacitance
    pub c_resonant: f64,
    /// Compensated tank capacitors Cp1..Cpn
    pub tank_capacitors: Vec<f64>,
    /// Coupling capacitors Cs12..Cs(n−1)n
    pub coupling_capacitors: Vec<f64>,
    /// Minimum unloaded component Q
    pub q_min: f64,
    pub warnings: Vec<DesignWarning>,
}

impl BandpassResult {
    pub fn resonators(&self) -> usize {
        self.spec.resonators
    }

    /// Names and values of the tank capacitors ("Cp1", ...).
    pub fn named_tank_capacitors(&self) -> impl Iterator<Item = (String, f64)> + '_ {
        self.tank_capacitors
            .iter()
            .enumerate()
            .map(|(i, &c)| (format!("Cp{}", i + 1), c))
    }

    /// Names and values of the tank inductors ("L1", ...).
    pub fn named_inductors(&self) -> impl Iterator<Item = (String, f64)> + '_ {
        (1..=self.spec.resonators).map(move |i| (format!("L{}", i), self.l_resonant))
    }

    /// Names and values of the coupling capacitors ("Cs12", ...).
    pub fn named_coupling_capacitors(&self) -> impl Iterator<Item = (String, f64)> + '_ {
        self.coupling_capacitors
            .iter()
            .enumerate()
            .map(|(i, &c)| (format!("Cs{}{}", i + 1, i + 2), c))
    }
}

fn fbw_warnings(fbw: f64, coupling: Coupling) -> Vec<DesignWarning> {
    let mut warnings = Vec::new();
    if coupling == Coupling::Shunt && fbw > SHUNT_FBW_LIMIT {
        warnings.push(DesignWarning::ShuntBandwidth { fbw });
    }
    if fbw > LUMPED_FBW_LIMIT {
        warnings.push(DesignWarning::WideBandwidth { fbw });
    }
    warnings
}

/// Synthesize a coupled-resonator band-pass filter.
///
/// Fails with [`FilterError::DesignRange`] when the requested bandwidth
/// would drive any compensated tank capacitor to zero or below.
pub fn synthesize_bandpass(spec: &BandpassSpec) -> Result<BandpassResult> {
    spec.validate()?;

    let n = spec.resonators;
    let fbw = spec.fractional_bandwidth();
    let g_values = prototype::bandpass_g_values(spec.family, n, spec.ripple_db)?;
    let g = g_values.as_slice();

    let coupling_coefficients: Vec<f64> = g
        .windows(2)
        .map(|pair| fbw / (pair[0] * pair[1]).sqrt())
        .collect();
    let qe_in = g_values.first() / fbw;
    let qe_out = g_values.last() / fbw;

    let omega0 = 2.0 * PI * spec.center_hz;
    let l_resonant = spec.impedance_ohms / omega0;
    let c_resonant = 1.0 / (omega0 * spec.impedance_ohms);

    let coupling_capacitors: Vec<f64> = coupling_coefficients
        .iter()
        .map(|k| k * c_resonant)
        .collect();

    let tank_capacitors: Vec<f64> = (0..n)
        .map(|j| {
            let left = if j > 0 { coupling_capacitors[j - 1] } else { 0.0 };
            let right = if j + 1 < n { coupling_capacitors[j] } else { 0.0 };
            c_resonant - left - right
        })
        .collect();

    let negative: Vec<String> = tank_capacitors
        .iter()
        .enumerate()
        .filter(|(_, &c)| c <= 0.0)
        .map(|(j, _)| format!("Cp{}", j + 1))
        .collect();
    if !negative.is_empty() {
        return Err(FilterError::design_range(format!(
            "Bandwidth too wide: tank capacitors {} would be negative. \
             Reduce bandwidth or use fewer resonators.",
            negative.join(", ")
        )));
    }

    let (f_low_hz, f_high_hz) = spec.band_edges();
    let q_min = (spec.center_hz / spec.bandwidth_hz) * spec.q_safety;
    let warnings = fbw_warnings(fbw, spec.coupling);

    log::debug!(
        "{} {} band-pass n={}: fbw={:.4}, k={:?}, Qe={:.3}/{:.3}",
        spec.family,
        spec.coupling.title(),
        n,
        fbw,
        coupling_coefficients,
        qe_in,
        qe_out
    );

    Ok(BandpassResult {
        spec: spec.clone(),
        g_values,
        fbw,
        f_low_hz,
        f_high_hz,
        coupling_coefficients,
        qe_in,
        qe_out,
        l_resonant,
        c_resonant,
        tank_capacitors,
        coupling_capacitors,
        q_min,
        warnings,
    })
}
