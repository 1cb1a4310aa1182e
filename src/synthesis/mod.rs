//! Component synthesis from prototype g-values.
//!
//! ## Ladder filters
//!
//! Low-pass and high-pass filters are doubly-terminated LC ladders. Each
//! prototype element becomes one physical component whose kind (L or C) and
//! placement (series or shunt) depend on the filter shape, the topology and
//! whether its position is odd or even:
//!
//! ```text
//! Pi:  IN ──┬──┤L├──┬── OUT        T:  IN ──┤L├──┬──┤L├── OUT
//!           C       C                            C
//!          GND     GND                          GND
//! ```
//!
//! ## Coupled-resonator band-pass
//!
//! `n` identical parallel LC tanks tuned to f0 are coupled by `n−1`
//! capacitors. Each tank capacitor is reduced by the coupling capacitance
//! hanging off it so that every node still resonates at f0.

mod bandpass;
mod ladder;

pub use bandpass::{synthesize_bandpass, BandpassResult, BandpassSpec, Coupling, DesignWarning};
pub use ladder::{
    element_at, synthesize_ladder, ComponentKind, ElementRole, LadderComponent, LadderResult,
    LadderShape, LadderSpec, Topology,
};

use std::fmt;

use crate::error::{FilterError, Result};
use crate::prototype::ResponseFamily;

/// Filter category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    LowPass,
    HighPass,
    BandPass,
}

impl FilterKind {
    pub const ALL: [FilterKind; 3] = [Self::LowPass, Self::HighPass, Self::BandPass];

    /// Human-readable category ("Low Pass").
    pub fn title(&self) -> &'static str {
        match self {
            Self::LowPass => "Low Pass",
            Self::HighPass => "High Pass",
            Self::BandPass => "Band Pass",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl From<LadderShape> for FilterKind {
    fn from(shape: LadderShape) -> Self {
        match shape {
            LadderShape::LowPass => Self::LowPass,
            LadderShape::HighPass => Self::HighPass,
        }
    }
}

/// A finished design of either kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Design {
    Ladder(LadderResult),
    Bandpass(BandpassResult),
}

impl Design {
    pub fn kind(&self) -> FilterKind {
        match self {
            Self::Ladder(result) => result.spec.shape.into(),
            Self::Bandpass(_) => FilterKind::BandPass,
        }
    }

    pub fn family(&self) -> ResponseFamily {
        match self {
            Self::Ladder(result) => result.spec.family,
            Self::Bandpass(result) => result.spec.family,
        }
    }
}

/// Require a finite, strictly positive quantity.
pub(crate) fn require_positive(value: f64, what: &str) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(FilterError::validation(format!("{} must be positive", what)))
    }
}
