//! Parsing of engineering value strings ("14.2MHz", "50Ω", "4.7u").

use crate::error::{FilterError, Result};

/// Frequency suffixes, longest first so "mhz" wins over "hz".
const FREQUENCY_SUFFIXES: [(&str, f64); 4] = [("ghz", 1e9), ("mhz", 1e6), ("khz", 1e3), ("hz", 1.0)];

/// Impedance suffixes after normalization to lowercase "ohm".
const IMPEDANCE_SUFFIXES: [(&str, f64); 3] = [("mohm", 1e6), ("kohm", 1e3), ("ohm", 1.0)];

/// Parse a number with an optional single-letter SI multiplier
/// (`p n u µ m k K M G`).
///
/// Returns `None` if the text is not a number.
pub fn parse_si_value(text: &str) -> Option<f64> {
    let text = text.trim();
    let last = text.chars().last()?;

    let multiplier = match last {
        'p' => 1e-12,
        'n' => 1e-9,
        'u' | 'µ' => 1e-6,
        'm' => 1e-3,
        'k' | 'K' => 1e3,
        'M' => 1e6,
        'G' => 1e9,
        _ => 1.0,
    };
    let number = if multiplier != 1.0 {
        &text[..text.len() - last.len_utf8()]
    } else {
        text
    };

    number.trim().parse::<f64>().ok().map(|v| v * multiplier)
}

fn finite(value: f64, quantity: &str, input: &str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FilterError::invalid_quantity(quantity, input))
    }
}

/// Parse a frequency in Hz.
///
/// Accepts `GHz`/`MHz`/`kHz`/`Hz` suffixes in any case, bare numbers and
/// SI multipliers ("14.2M").
pub fn parse_frequency(input: &str) -> Result<f64> {
    let text = input.trim();
    let lower = text.to_lowercase();

    for (suffix, multiplier) in FREQUENCY_SUFFIXES {
        if let Some(number) = lower.strip_suffix(suffix) {
            let value = number
                .trim()
                .parse::<f64>()
                .map_err(|_| FilterError::invalid_quantity("frequency", input))?;
            return finite(value * multiplier, "frequency", input);
        }
    }

    let value = parse_si_value(text)
        .ok_or_else(|| FilterError::invalid_quantity("frequency", input))?;
    finite(value, "frequency", input)
}

/// Parse an impedance in Ohms.
///
/// Accepts `ohm`, `kohm`, `Mohm` (mega), `Ω`, `ω` and `omega` suffixes, or a
/// bare number.
pub fn parse_impedance(input: &str) -> Result<f64> {
    let text = input
        .trim()
        .replace(['Ω', 'ω'], "ohm")
        .to_lowercase()
        .replace("omega", "ohm");

    let (number, multiplier) = IMPEDANCE_SUFFIXES
        .iter()
        .find_map(|&(suffix, multiplier)| text.strip_suffix(suffix).map(|n| (n, multiplier)))
        .unwrap_or((text.as_str(), 1.0));

    let value = number
        .trim()
        .parse::<f64>()
        .map_err(|_| FilterError::invalid_quantity("impedance", input))?;
    finite(value * multiplier, "impedance", input)
}
