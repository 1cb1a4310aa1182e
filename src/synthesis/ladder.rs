//! Pi/T ladder synthesis for low-pass and high-pass filters.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{FilterError, Result};
use crate::prototype::{self, GValues, ResponseFamily};
use crate::{DEFAULT_IMPEDANCE_OHMS, DEFAULT_ORDER, DEFAULT_RIPPLE_DB};

use super::require_positive;

/// Ladder filter shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LadderShape {
    LowPass,
    HighPass,
}

impl LadderShape {
    /// Human-readable category ("Low Pass").
    pub fn title(&self) -> &'static str {
        match self {
            Self::LowPass => "Low Pass",
            Self::HighPass => "High Pass",
        }
    }

    /// Conventional topology: Pi for low-pass, T for high-pass.
    pub fn default_topology(&self) -> Topology {
        match self {
            Self::LowPass => Topology::Pi,
            Self::HighPass => Topology::T,
        }
    }
}

/// Ladder topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Topology {
    /// Shunt element first
    Pi,
    /// Series element first
    T,
}

impl Topology {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pi => "pi",
            Self::T => "t",
        }
    }

    /// Display name ("Pi", "T").
    pub fn title(&self) -> &'static str {
        match self {
            Self::Pi => "Pi",
            Self::T => "T",
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Topology {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pi" => Ok(Self::Pi),
            "t" => Ok(Self::T),
            other => Err(FilterError::validation(format!(
                "Topology must be 'pi' or 't', got '{}'",
                other
            ))),
        }
    }
}

/// Physical component kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Inductor,
    Capacitor,
}

impl ComponentKind {
    /// Reference-designator prefix.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Inductor => "L",
            Self::Capacitor => "C",
        }
    }

    /// SI unit symbol.
    pub fn unit(&self) -> &'static str {
        match self {
            Self::Inductor => "H",
            Self::Capacitor => "F",
        }
    }

    /// Plural name for table headings.
    pub fn plural(&self) -> &'static str {
        match self {
            Self::Inductor => "Inductors",
            Self::Capacitor => "Capacitors",
        }
    }

    /// The other kind.
    pub fn dual(&self) -> Self {
        match self {
            Self::Inductor => Self::Capacitor,
            Self::Capacitor => Self::Inductor,
        }
    }
}

/// Electrical placement of a ladder element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementRole {
    /// In the signal path
    Series,
    /// From the signal path to ground
    Shunt,
}

/// Kind and role of the element at a 1-indexed ladder position.
pub fn element_at(shape: LadderShape, topology: Topology, position: usize) -> (ComponentKind, ElementRole) {
    use ComponentKind::{Capacitor, Inductor};
    use ElementRole::{Series, Shunt};

    let odd = position % 2 == 1;
    match (shape, topology, odd) {
        (LadderShape::LowPass, Topology::Pi, true) => (Capacitor, Shunt),
        (LadderShape::LowPass, Topology::Pi, false) => (Inductor, Series),
        (LadderShape::LowPass, Topology::T, true) => (Inductor, Series),
        (LadderShape::LowPass, Topology::T, false) => (Capacitor, Shunt),
        (LadderShape::HighPass, Topology::T, true) => (Capacitor, Series),
        (LadderShape::HighPass, Topology::T, false) => (Inductor, Shunt),
        (LadderShape::HighPass, Topology::Pi, true) => (Inductor, Shunt),
        (LadderShape::HighPass, Topology::Pi, false) => (Capacitor, Series),
    }
}

/// Parameters of a ladder filter design.
#[derive(Debug, Clone, PartialEq)]
pub struct LadderSpec {
    pub shape: LadderShape,
    pub family: ResponseFamily,
    pub topology: Topology,
    /// Cutoff (−3 dB for Butterworth, ripple edge for Chebyshev) in Hz
    pub cutoff_hz: f64,
    pub impedance_ohms: f64,
    /// Number of reactive elements (2..9)
    pub order: usize,
    /// Passband ripple in dB, Chebyshev only
    pub ripple_db: f64,
}

impl LadderSpec {
    /// Create a spec with default impedance, order and ripple, in the
    /// shape's conventional topology (Pi for low-pass, T for high-pass).
    pub fn new(shape: LadderShape, family: ResponseFamily, cutoff_hz: f64) -> Self {
        Self {
            shape,
            family,
            topology: shape.default_topology(),
            cutoff_hz,
            impedance_ohms: DEFAULT_IMPEDANCE_OHMS,
            order: DEFAULT_ORDER,
            ripple_db: DEFAULT_RIPPLE_DB,
        }
    }

    pub fn with_topology(mut self, topology: Topology) -> Self {
        self.topology = topology;
        self
    }

    pub fn with_impedance(mut self, impedance_ohms: f64) -> Self {
        self.impedance_ohms = impedance_ohms;
        self
    }

    pub fn with_order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    /// Set the passband ripple (ignored by non-Chebyshev families).
    pub fn with_ripple(mut self, ripple_db: f64) -> Self {
        self.ripple_db = ripple_db;
        self
    }

    /// Ripple to report, `None` unless the family uses it.
    pub fn effective_ripple(&self) -> Option<f64> {
        self.family.uses_ripple().then_some(self.ripple_db)
    }

    fn validate(&self) -> Result<()> {
        require_positive(self.cutoff_hz, "Frequency")?;
        require_positive(self.impedance_ohms, "Impedance")?;
        prototype::validate_order(self.order)
    }
}

/// One synthesized ladder element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LadderComponent {
    pub kind: ComponentKind,
    pub role: ElementRole,
    /// Physical position in the ladder, 1-indexed from the input
    pub position: usize,
    /// 1-indexed ordinal among components of the same kind
    pub ordinal: usize,
    /// Value in Henries or Farads
    pub value: f64,
}

impl LadderComponent {
    /// Reference designator, e.g. "C2".
    pub fn name(&self) -> String {
        format!("{}{}", self.kind.prefix(), self.ordinal)
    }
}

/// Result of a ladder synthesis.
#[derive(Debug, Clone, PartialEq)]
pub struct LadderResult {
    pub spec: LadderSpec,
    pub g_values: GValues,
    /// Inductors in ascending position order
    pub inductors: Vec<LadderComponent>,
    /// Capacitors in ascending position order
    pub capacitors: Vec<LadderComponent>,
}

impl LadderResult {
    pub fn inductor_values(&self) -> Vec<f64> {
        self.inductors.iter().map(|c| c.value).collect()
    }

    pub fn capacitor_values(&self) -> Vec<f64> {
        self.capacitors.iter().map(|c| c.value).collect()
    }

    /// All components in physical (input-to-output) order.
    pub fn components(&self) -> Vec<LadderComponent> {
        let mut all: Vec<LadderComponent> =
            self.inductors.iter().chain(self.capacitors.iter()).copied().collect();
        all.sort_by_key(|c| c.position);
        all
    }

    /// Component kind listed first in reports: capacitors for low-pass,
    /// inductors for high-pass.
    pub fn primary_kind(&self) -> ComponentKind {
        match self.spec.shape {
            LadderShape::LowPass => ComponentKind::Capacitor,
            LadderShape::HighPass => ComponentKind::Inductor,
        }
    }

    /// Components of one kind.
    pub fn of_kind(&self, kind: ComponentKind) -> &[LadderComponent] {
        match kind {
            ComponentKind::Inductor => &self.inductors,
            ComponentKind::Capacitor => &self.capacitors,
        }
    }
}

/// Synthesize a Pi or T ladder from its spec.
pub fn synthesize_ladder(spec: &LadderSpec) -> Result<LadderResult> {
    spec.validate()?;
    let g_values = prototype::g_values(spec.family, spec.order, spec.ripple_db)?;

    let omega = 2.0 * PI * spec.cutoff_hz;
    let z = spec.impedance_ohms;

    let mut inductors = Vec::new();
    let mut capacitors = Vec::new();

    for (position, g) in g_values.positions() {
        let (kind, role) = element_at(spec.shape, spec.topology, position);
        let value = match (spec.shape, kind) {
            (LadderShape::LowPass, ComponentKind::Capacitor) => g / (z * omega),
            (LadderShape::LowPass, ComponentKind::Inductor) => g * z / omega,
            (LadderShape::HighPass, ComponentKind::Inductor) => z / (omega * g),
            (LadderShape::HighPass, ComponentKind::Capacitor) => 1.0 / (g * omega * z),
        };
        let bucket = match kind {
            ComponentKind::Inductor => &mut inductors,
            ComponentKind::Capacitor => &mut capacitors,
        };
        bucket.push(LadderComponent {
            kind,
            role,
            position,
            ordinal: bucket.len() + 1,
            value,
        });
    }

    log::debug!(
        "{} {} {} n={}: {} inductors, {} capacitors",
        spec.family,
        spec.topology.title(),
        spec.shape.title(),
        spec.order,
        inductors.len(),
        capacitors.len()
    );

    Ok(LadderResult {
        spec: spec.clone(),
        g_values,
        inductors,
        capacitors,
    })
}
