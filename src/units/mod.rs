//! Engineering-unit strings.
//!
//! Input strings such as `"14.2MHz"`, `"500k"` or `"50Ω"` are parsed to SI
//! base units; computed values are formatted back with the unit prefix a
//! bench engineer would read off a part:
//!
//! | Quantity | Prefixes | Precision |
//! |----------|----------|-----------|
//! | Frequency | GHz, MHz, kHz, Hz | 4 significant digits |
//! | Capacitance | mF, µF, nF, pF | 2 decimals |
//! | Inductance | H, mH, µH, nH | 2 decimals |
//! | Impedance | MΩ, kΩ, Ω | 4 significant digits |

mod format;
mod parse;

pub use format::{
    format_capacitance, format_frequency, format_general, format_impedance, format_inductance,
    format_scientific,
};
pub use parse::{parse_frequency, parse_impedance, parse_si_value};
