//! Human-readable table reports and quiet listings.

use super::diagram::{coupled_resonator_diagram, ladder_diagram};
use super::plot::{
    bandpass_plot, ladder_plot, BANDPASS_PLOT_HEIGHT, LADDER_PLOT_HEIGHT, LADDER_PLOT_TITLE,
    PLOT_WIDTH,
};
use super::{format_component, RenderOptions};
use crate::eseries::{match_component, ESeries, ParallelMode};
use crate::error::Result;
use crate::response::FilterResponse;
use crate::synthesis::{BandpassResult, ComponentKind, Coupling, LadderComponent, LadderResult};
use crate::units::{format_frequency, format_general, format_scientific};

const COLUMN: usize = 24;
const CELL: usize = COLUMN - 2;
const REPORT_WIDTH: usize = 50;
const SECTION_WIDTH: usize = 45;

fn double_rule() -> String {
    "=".repeat(REPORT_WIDTH)
}

/// `C1: 100.00 pF`, or `C1: 1.000000e-10 F` in raw mode.
fn component_text(name: &str, kind: ComponentKind, value: f64, raw: bool) -> String {
    if raw {
        format!("{}: {} {}", name, format_scientific(value, 6), kind.unit())
    } else {
        format!("{}: {}", name, format_component(kind, value))
    }
}

/// Boxed table with one column per heading.
fn boxed_table(headings: &[&str], rows: &[Vec<String>]) -> Vec<String> {
    let bar = "─".repeat(COLUMN);
    let rule = |left: &str, mid: &str, right: &str| {
        format!("{}{}{}", left, vec![bar.as_str(); headings.len()].join(mid), right)
    };

    let mut lines = vec![rule("┌", "┬", "┐")];
    let titles: Vec<String> = headings.iter().map(|h| format!("{:^COLUMN$}", h)).collect();
    lines.push(format!("│{}│", titles.join("│")));
    lines.push(rule("├", "┼", "┤"));
    for row in rows {
        let cells: Vec<String> = row.iter().map(|cell| format!(" {:<CELL$} ", cell)).collect();
        lines.push(format!("│{}│", cells.join("│")));
    }
    lines.push(rule("└", "┴", "┘"));
    lines
}

fn signed_pct(pct: f64) -> String {
    let sign = if pct > 0.0 { "+" } else { "" };
    format!("{}{:.1}%", sign, pct)
}

/// Calculated value followed by its nearest standard part and, when strictly
/// closer, a parallel pair.
fn recommendation(name: &str, kind: ComponentKind, value: f64, series: ESeries) -> Result<Vec<String>> {
    let mode = match kind {
        ComponentKind::Capacitor => ParallelMode::Additive,
        ComponentKind::Inductor => ParallelMode::Harmonic,
    };
    let matched = match_component(value, series, mode)?;

    let mut lines = vec![
        format!("{} Calculated: {}", name, format_component(kind, value)),
        format!(
            "  Nearest Std:  {} ({})",
            format_component(kind, matched.single_value),
            signed_pct(matched.single_error_pct)
        ),
    ];
    if let Some(pair) = matched.preferred_parallel() {
        let first = format_component(kind, pair.values.0);
        let first_number = first.split(' ').next().unwrap_or(&first);
        lines.push(format!(
            "  Parallel Std: {} || {} ({})",
            first_number,
            format_component(kind, pair.values.1),
            signed_pct(pair.error_pct)
        ));
    }
    Ok(lines)
}

fn recommendation_section(
    series: ESeries,
    kind: ComponentKind,
    parts: impl IntoIterator<Item = (String, f64)>,
) -> Result<Vec<String>> {
    let noun = match kind {
        ComponentKind::Capacitor => "Capacitor",
        ComponentKind::Inductor => "Inductor",
    };
    let mut lines = vec![
        String::new(),
        format!("{} Standard {} Recommendations", series, noun),
        "-".repeat(SECTION_WIDTH),
        "(Calculated values with nearest standard matches)".to_string(),
        String::new(),
    ];
    for (name, value) in parts {
        lines.extend(recommendation(&name, kind, value, series)?);
    }
    Ok(lines)
}

/// Full low-pass/high-pass report.
pub fn ladder_table(result: &LadderResult, options: &RenderOptions) -> Result<String> {
    let spec = &result.spec;
    let mut lines = vec![
        String::new(),
        format!(
            "{} {} {} Filter",
            spec.family.title(),
            spec.topology.title(),
            spec.shape.title()
        ),
        double_rule(),
        format!("Cutoff Frequency:    {}", format_frequency(spec.cutoff_hz)),
        format!("Impedance Z0:        {} Ohm", format_general(spec.impedance_ohms, 4)),
    ];
    if let Some(ripple) = spec.effective_ripple() {
        lines.push(format!("Ripple:              {} dB", ripple));
    }
    lines.push(format!("Order:               {}", spec.order));
    lines.push(double_rule());

    lines.push(String::new());
    lines.push("Topology:".to_string());
    lines.push(ladder_diagram(result));

    let primary = result.primary_kind();
    let left = result.of_kind(primary);
    let right = result.of_kind(primary.dual());
    let cell = |components: &[LadderComponent], i: usize| {
        components
            .get(i)
            .map(|c| component_text(&c.name(), c.kind, c.value, options.raw))
            .unwrap_or_default()
    };
    let rows: Vec<Vec<String>> = (0..left.len().max(right.len()))
        .map(|i| vec![cell(left, i), cell(right, i)])
        .collect();
    lines.push(String::new());
    lines.push(format!("{:^REPORT_WIDTH$}", "Component Values"));
    lines.extend(boxed_table(&[primary.plural(), primary.dual().plural()], &rows));

    if let Some(series) = options.e_series.filter(|_| !options.raw) {
        let parts = left.iter().map(|c| (c.name(), c.value));
        lines.extend(recommendation_section(series, primary, parts)?);
    }

    if options.plot {
        let points = FilterResponse::from_ladder(result).default_sweep()?;
        lines.push(String::new());
        lines.push(ladder_plot(
            &points,
            spec.cutoff_hz,
            spec.shape,
            LADDER_PLOT_TITLE,
            PLOT_WIDTH,
            LADDER_PLOT_HEIGHT,
        ));
    }

    lines.push(String::new());
    Ok(lines.join("\n"))
}

/// Full coupled-resonator band-pass report.
pub fn bandpass_table(result: &BandpassResult, options: &RenderOptions) -> Result<String> {
    let spec = &result.spec;
    let coupling = match spec.coupling {
        Coupling::Top => "Top-C (Series)",
        Coupling::Shunt => "Shunt-C (Parallel)",
    };

    let mut lines = vec![
        String::new(),
        format!("{} Coupled Resonator Bandpass Filter", spec.family.title()),
        double_rule(),
        format!("Center Frequency f₀: {}", format_frequency(spec.center_hz)),
        format!("Lower Cutoff fₗ:     {}", format_frequency(result.f_low_hz)),
        format!("Upper Cutoff fₕ:     {}", format_frequency(result.f_high_hz)),
        format!("Bandwidth BW:        {}", format_frequency(spec.bandwidth_hz)),
        format!("Fractional BW:       {:.2}%", result.fbw * 100.0),
        format!("Impedance Z₀:        {} Ω", format_general(spec.impedance_ohms, 4)),
    ];
    if let Some(ripple) = spec.effective_ripple() {
        lines.push(format!("Ripple:              {} dB", ripple));
    }
    lines.push(format!("Resonators:          {}", result.resonators()));
    lines.push(format!("Coupling:            {}", coupling));
    lines.push(double_rule());

    if !result.warnings.is_empty() {
        lines.push(String::new());
        lines.push("Warnings:".to_string());
        lines.extend(result.warnings.iter().map(|w| format!("  ⚠ {}", w)));
    }

    lines.push(String::new());
    lines.push(format!("Minimum Component Q: {:.0}", result.q_min));
    lines.push(format!("  (Q safety factor: {})", spec.q_safety));

    lines.push(String::new());
    lines.push("Topology:".to_string());
    lines.push(coupled_resonator_diagram(spec.coupling, result.resonators()));

    let raw = options.raw;
    let tank_rows: Vec<Vec<String>> = result
        .named_tank_capacitors()
        .zip(result.named_inductors())
        .map(|((cp, c), (l, ind))| {
            vec![
                component_text(&cp, ComponentKind::Capacitor, c, raw),
                component_text(&l, ComponentKind::Inductor, ind, raw),
            ]
        })
        .collect();
    lines.push(String::new());
    lines.push(format!("{:^REPORT_WIDTH$}", "Component Values"));
    lines.extend(boxed_table(&["Tank Capacitors", "Inductors"], &tank_rows));

    let coupling_rows: Vec<Vec<String>> = result
        .named_coupling_capacitors()
        .map(|(name, c)| vec![component_text(&name, ComponentKind::Capacitor, c, raw)])
        .collect();
    lines.push(String::new());
    lines.extend(boxed_table(&["Coupling Capacitors"], &coupling_rows));

    lines.push(String::new());
    lines.push(format!("External Q (input):  {:.2}", result.qe_in));
    lines.push(format!("External Q (output): {:.2}", result.qe_out));

    if let Some(series) = options.e_series.filter(|_| !raw) {
        let parts = result
            .named_tank_capacitors()
            .chain(result.named_coupling_capacitors());
        lines.extend(recommendation_section(series, ComponentKind::Capacitor, parts)?);
    }

    if options.plot {
        let points = FilterResponse::from_bandpass(result).default_sweep()?;
        let title = format!(
            "{} {}-pole Response",
            spec.family.title(),
            result.resonators()
        );
        lines.push(String::new());
        lines.push(bandpass_plot(
            &points,
            spec.center_hz,
            (result.f_low_hz, result.f_high_hz),
            &title,
            PLOT_WIDTH,
            BANDPASS_PLOT_HEIGHT,
        ));
    }

    lines.push(String::new());
    Ok(lines.join("\n"))
}

/// `name: value` lines, primary kind first.
pub fn ladder_quiet(result: &LadderResult, raw: bool) -> String {
    let primary = result.primary_kind();
    result
        .of_kind(primary)
        .iter()
        .chain(result.of_kind(primary.dual()))
        .map(|c| component_text(&c.name(), c.kind, c.value, raw))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `name: value` lines: tank capacitors, inductors, coupling capacitors.
pub fn bandpass_quiet(result: &BandpassResult, raw: bool) -> String {
    let capacitor = |(name, value): (String, f64)| component_text(&name, ComponentKind::Capacitor, value, raw);
    let inductor = |(name, value): (String, f64)| component_text(&name, ComponentKind::Inductor, value, raw);

    result
        .named_tank_capacitors()
        .map(capacitor)
        .chain(result.named_inductors().map(inductor))
        .chain(result.named_coupling_capacitors().map(capacitor))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prototype::ResponseFamily;
    use crate::synthesis::{
        synthesize_bandpass, synthesize_ladder, BandpassSpec, LadderShape, LadderSpec, Topology,
    };

    fn lowpass(order: usize) -> LadderResult {
        let spec = LadderSpec::new(LadderShape::LowPass, ResponseFamily::Butterworth, 10e6)
            .with_order(order);
        synthesize_ladder(&spec).unwrap()
    }

    fn twenty_meters() -> BandpassResult {
        let spec = BandpassSpec::new(ResponseFamily::Butterworth, Coupling::Top, 14.175e6, 350e3)
            .with_resonators(3);
        synthesize_bandpass(&spec).unwrap()
    }

    #[test]
    fn test_boxed_table_layout() {
        let rows = vec![vec!["C1: 1.00 pF".to_string(), String::new()]];
        let lines = boxed_table(&["Capacitors", "Inductors"], &rows);
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], format!("┌{}┬{}┐", "─".repeat(24), "─".repeat(24)));
        assert_eq!(lines[1], format!("│{:^24}│{:^24}│", "Capacitors", "Inductors"));
        assert_eq!(lines[3], format!("│ {:<22} │ {:<22} │", "C1: 1.00 pF", ""));
        assert_eq!(lines[3].chars().count(), 51);
    }

    #[test]
    fn test_ladder_header() {
        let report = ladder_table(&lowpass(5), &RenderOptions::default()).unwrap();
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "Butterworth Pi Low Pass Filter");
        assert_eq!(lines[2], "=".repeat(50));
        assert_eq!(lines[3], "Cutoff Frequency:    10 MHz");
        assert_eq!(lines[4], "Impedance Z0:        50 Ohm");
        assert_eq!(lines[5], "Order:               5");
        assert!(report.contains("E24 Standard Capacitor Recommendations"));
        assert!(report.contains("C3 Calculated:"));
        assert!(report.contains("  Nearest Std:  "));
        assert!(!report.contains("Frequency Response (dB)"));
    }

    #[test]
    fn test_ladder_table_columns() {
        let report = ladder_table(&lowpass(5), &RenderOptions::default()).unwrap();
        assert!(report.contains(&format!("│{:^24}│{:^24}│", "Capacitors", "Inductors")));
        assert!(report.contains("│ C3: "));

        let highpass = LadderSpec::new(LadderShape::HighPass, ResponseFamily::Chebyshev, 1e6)
            .with_topology(Topology::T);
        let result = synthesize_ladder(&highpass).unwrap();
        let report = ladder_table(&result, &RenderOptions::default()).unwrap();
        assert!(report.contains("Chebyshev T High Pass Filter"));
        assert!(report.contains("Ripple:              0.5 dB"));
        assert!(report.contains(&format!("│{:^24}│{:^24}│", "Inductors", "Capacitors")));
        assert!(report.contains("E24 Standard Inductor Recommendations"));
    }

    #[test]
    fn test_raw_mode_skips_recommendations() {
        let options = RenderOptions::default().with_raw(true).with_plot(true);
        let report = ladder_table(&lowpass(3), &options).unwrap();
        assert!(!report.contains("Recommendations"));
        assert!(report.contains("e-11 F") || report.contains("e-10 F"));
        assert!(report.contains("Frequency Response (dB)"));
    }

    #[test]
    fn test_recommendation_lines() {
        let lines = recommendation("C1", ComponentKind::Capacitor, 123.4e-12, ESeries::E24).unwrap();
        assert_eq!(lines[0], "C1 Calculated: 123.40 pF");
        assert_eq!(lines[1], "  Nearest Std:  120.00 pF (-2.8%)");
        assert_eq!(lines[2], "  Parallel Std: 13.00 || 110.00 pF (-0.3%)");
    }

    #[test]
    fn test_bandpass_table() {
        let report = bandpass_table(&twenty_meters(), &RenderOptions::default().with_plot(true)).unwrap();
        assert!(report.contains("Butterworth Coupled Resonator Bandpass Filter"));
        assert!(report.contains("Center Frequency f₀: 14.18 MHz"));
        assert!(report.contains("Coupling:            Top-C (Series)"));
        assert!(report.contains("Fractional BW:       2.47%"));
        assert!(report.contains("Minimum Component Q: 81"));
        assert!(report.contains("  (Q safety factor: 2)"));
        assert!(report.contains(&format!("│{:^24}│", "Coupling Capacitors")));
        assert!(report.contains("│ Cs23: "));
        assert!(report.contains("External Q (input):  "));
        assert!(report.contains("Cs12 Calculated:"));
        assert!(report.contains("Butterworth 3-pole Response"));
        assert!(!report.contains("Warnings:"));
    }

    #[test]
    fn test_bandpass_warnings_listed() {
        let spec = BandpassSpec::new(ResponseFamily::Butterworth, Coupling::Shunt, 10e6, 1.5e6)
            .with_resonators(2);
        let result = synthesize_bandpass(&spec).unwrap();
        let report = bandpass_table(&result, &RenderOptions::default().with_e_series(None)).unwrap();
        assert!(report.contains("Warnings:"));
        assert!(report.contains("  ⚠ FBW 15.0% exceeds 10% limit for Shunt-C"));
        assert!(!report.contains("Recommendations"));
    }

    #[test]
    fn test_quiet_listings() {
        let quiet = ladder_quiet(&lowpass(3), false);
        let names: Vec<&str> = quiet.lines().map(|l| l.split(':').next().unwrap()).collect();
        assert_eq!(names, vec!["C1", "C2", "L1"]);

        let quiet = bandpass_quiet(&twenty_meters(), true);
        let lines: Vec<&str> = quiet.lines().collect();
        assert_eq!(lines.len(), 3 + 3 + 2);
        assert!(lines[0].starts_with("Cp1: ") && lines[0].ends_with(" F"));
        assert!(lines[3].starts_with("L1: ") && lines[3].ends_with(" H"));
        assert!(lines[7].starts_with("Cs23: "));
    }
}
