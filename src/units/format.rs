//! Engineering-unit formatting for reports.

/// Unit ladder: `(threshold, suffix)` pairs, largest first.
type UnitScale = [(f64, &'static str)];

const FREQUENCY_UNITS: &UnitScale = &[(1e9, "GHz"), (1e6, "MHz"), (1e3, "kHz"), (1.0, "Hz")];
const CAPACITANCE_UNITS: &UnitScale = &[(1e-3, "mF"), (1e-6, "µF"), (1e-9, "nF"), (1e-12, "pF")];
const INDUCTANCE_UNITS: &UnitScale = &[(1.0, "H"), (1e-3, "mH"), (1e-6, "µH"), (1e-9, "nH")];
const IMPEDANCE_UNITS: &UnitScale = &[(1e6, "MΩ"), (1e3, "kΩ"), (1.0, "Ω")];

enum Precision {
    Significant(usize),
    Decimals(usize),
}

fn format_scaled(value: f64, units: &UnitScale, precision: Precision) -> String {
    let (threshold, suffix) = units
        .iter()
        .copied()
        .find(|(threshold, _)| value.abs() >= *threshold)
        .unwrap_or(units[units.len() - 1]);
    let scaled = value / threshold;
    let number = match precision {
        Precision::Significant(sig) => format_general(scaled, sig),
        Precision::Decimals(places) => format!("{:.*}", places, scaled),
    };
    format!("{} {}", number, suffix)
}

/// Format with `sig` significant digits, dropping trailing zeros.
///
/// Switches to scientific notation (`1.235e+05`) when the exponent is below
/// −4 or at least `sig`.
pub fn format_general(value: f64, sig: usize) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{}", value);
    }
    let sig = sig.max(1);
    let (mantissa, exponent) = split_scientific(value, sig - 1);

    if exponent < -4 || exponent >= sig as i32 {
        join_scientific(trim_fraction(&mantissa), exponent)
    } else {
        let decimals = (sig as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

/// Scientific notation with a signed two-digit exponent ("1.500000e-10").
pub fn format_scientific(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return format!("{}", value);
    }
    let (mantissa, exponent) = split_scientific(value, decimals);
    join_scientific(&mantissa, exponent)
}

fn split_scientific(value: f64, decimals: usize) -> (String, i32) {
    let sci = format!("{:.*e}", decimals, value);
    match sci.split_once('e') {
        Some((m, e)) => (m.to_string(), e.parse::<i32>().unwrap_or(0)),
        None => (sci, 0),
    }
}

fn join_scientific(mantissa: &str, exponent: i32) -> String {
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{}e{}{:02}", mantissa, sign, exponent.abs())
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

/// Frequency with 4 significant digits ("14.2 MHz").
pub fn format_frequency(hz: f64) -> String {
    format_scaled(hz, FREQUENCY_UNITS, Precision::Significant(4))
}

/// Capacitance with 2 decimals ("100.00 pF").
pub fn format_capacitance(farads: f64) -> String {
    format_scaled(farads, CAPACITANCE_UNITS, Precision::Decimals(2))
}

/// Inductance with 2 decimals ("1.59 µH").
pub fn format_inductance(henries: f64) -> String {
    format_scaled(henries, INDUCTANCE_UNITS, Precision::Decimals(2))
}

/// Impedance with 4 significant digits ("50 Ω").
pub fn format_impedance(ohms: f64) -> String {
    format_scaled(ohms, IMPEDANCE_UNITS, Precision::Significant(4))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_general() {
        assert_eq!(format_general(14.2, 4), "14.2");
        assert_eq!(format_general(14.175, 4), "14.18");
        assert_eq!(format_general(1.0, 4), "1");
        assert_eq!(format_general(500.0, 4), "500");
        assert_eq!(format_general(1000.0, 4), "1000");
        assert_eq!(format_general(123456.0, 4), "1.235e+05");
        assert_eq!(format_general(99999.0, 4), "1e+05");
        assert_eq!(format_general(0.0001234, 4), "0.0001234");
        assert_eq!(format_general(1e-5, 4), "1e-05");
        assert_eq!(format_general(-2.5, 4), "-2.5");
    }

    #[test]
    fn test_format_scientific() {
        assert_eq!(format_scientific(1.5e-10, 6), "1.500000e-10");
        assert_eq!(format_scientific(2.0, 6), "2.000000e+00");
        assert_eq!(format_scientific(-3.25e5, 2), "-3.25e+05");
    }

    #[test]
    fn test_frequency() {
        assert_eq!(format_frequency(14.2e6), "14.2 MHz");
        assert_eq!(format_frequency(1e9), "1 GHz");
        assert_eq!(format_frequency(350e3), "350 kHz");
        assert_eq!(format_frequency(60.0), "60 Hz");
        assert_eq!(format_frequency(0.5), "0.5 Hz");
    }

    #[test]
    fn test_components() {
        assert_eq!(format_capacitance(100e-12), "100.00 pF");
        assert_eq!(format_capacitance(4.7e-9), "4.70 nF");
        assert_eq!(format_capacitance(2.2e-6), "2.20 µF");
        assert_eq!(format_capacitance(1e-15), "0.00 pF");
        assert_eq!(format_inductance(1.5e-6), "1.50 µH");
        assert_eq!(format_inductance(2.0), "2.00 H");
        assert_eq!(format_inductance(330e-9), "330.00 nH");
    }

    #[test]
    fn test_impedance() {
        assert_eq!(format_impedance(50.0), "50 Ω");
        assert_eq!(format_impedance(1e3), "1 kΩ");
        assert_eq!(format_impedance(2.2e6), "2.2 MΩ");
    }
}
