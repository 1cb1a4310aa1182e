//! Interactive design wizard.
//!
//! Walks the user through a single design, one question per [`Step`].
//! Answers are validated as they are entered and a bad answer repeats the
//! question. Declining the summary starts over from the response family,
//! keeping the filter kind.

use std::io::{BufRead, Write};

use crate::error::{FilterError, Result};
use crate::prototype::{validate_order, ResponseFamily};
use crate::synthesis::{
    synthesize_bandpass, synthesize_ladder, BandpassSpec, Coupling, Design, FilterKind,
    LadderShape, LadderSpec, Topology,
};
use crate::units::{format_general, parse_frequency, parse_impedance};
use crate::{DEFAULT_IMPEDANCE_OHMS, DEFAULT_ORDER, DEFAULT_RIPPLE_DB};

const RULE_WIDTH: usize = 50;

const DEFAULT_IMPEDANCE: &str = "50";
const DEFAULT_LADDER_ORDER: &str = "3";
const DEFAULT_BANDPASS_RESONATORS: &str = "5";
const DEFAULT_RIPPLE: &str = "0.5";

/// Ripple values offered for Chebyshev designs, in dB.
const RIPPLE_CHOICES: [f64; 3] = [0.1, 0.5, 1.0];

/// One question of the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    SelectKind,
    SelectFamily,
    SelectTopology,
    SelectCoupling,
    EnterFrequency,
    EnterBandwidth,
    EnterImpedance,
    EnterOrder,
    EnterRipple,
    ConfirmSummary,
    Calculate,
}

impl Step {
    /// Step that follows `self` once its answer is recorded.
    fn next(self, answers: &Answers) -> Step {
        use Step::*;

        let bandpass = answers.kind == FilterKind::BandPass;
        match self {
            SelectKind => SelectFamily,
            SelectFamily if bandpass => SelectCoupling,
            SelectFamily => SelectTopology,
            SelectTopology | SelectCoupling => EnterFrequency,
            EnterFrequency if bandpass => EnterBandwidth,
            EnterFrequency | EnterBandwidth => EnterImpedance,
            EnterImpedance => EnterOrder,
            EnterOrder if answers.family.uses_ripple() => EnterRipple,
            EnterOrder | EnterRipple => ConfirmSummary,
            ConfirmSummary | Calculate => Calculate,
        }
    }
}

/// Answers collected so far.
#[derive(Debug, Clone, PartialEq)]
struct Answers {
    kind: FilterKind,
    family: ResponseFamily,
    topology: Topology,
    coupling: Coupling,
    /// Cutoff for ladders, center for band-pass
    frequency_hz: f64,
    bandwidth_hz: f64,
    impedance_ohms: f64,
    /// Ladder order or resonator count
    order: usize,
    ripple_db: f64,
}

impl Default for Answers {
    fn default() -> Self {
        Self {
            kind: FilterKind::LowPass,
            family: ResponseFamily::Butterworth,
            topology: Topology::Pi,
            coupling: Coupling::Top,
            frequency_hz: 0.0,
            bandwidth_hz: 0.0,
            impedance_ohms: DEFAULT_IMPEDANCE_OHMS,
            order: DEFAULT_ORDER,
            ripple_db: DEFAULT_RIPPLE_DB,
        }
    }
}

impl Answers {
    fn shape(&self) -> Option<LadderShape> {
        match self.kind {
            FilterKind::LowPass => Some(LadderShape::LowPass),
            FilterKind::HighPass => Some(LadderShape::HighPass),
            FilterKind::BandPass => None,
        }
    }

    fn category(&self) -> &'static str {
        match self.kind {
            FilterKind::LowPass => "Lowpass",
            FilterKind::HighPass => "Highpass",
            FilterKind::BandPass => "Bandpass",
        }
    }

    fn summary(&self) -> Vec<(&'static str, String)> {
        let mhz = |hz: f64| format!("{} MHz", format_general(hz / 1e6, 4));
        let mut lines = vec![("Response", self.family.title().to_string())];

        if self.kind == FilterKind::BandPass {
            lines.push(("Topology", coupling_description(self.coupling).to_string()));
            lines.push(("Center freq", mhz(self.frequency_hz)));
            lines.push((
                "Bandwidth",
                format!("{} kHz", format_general(self.bandwidth_hz / 1e3, 4)),
            ));
            lines.push((
                "FBW",
                format!("{:.2}%", self.bandwidth_hz / self.frequency_hz * 100.0),
            ));
        } else {
            lines.push(("Topology", self.topology.title().to_string()));
            lines.push(("Cutoff", mhz(self.frequency_hz)));
        }

        lines.push((
            "Impedance",
            format!("{} Ohm", format_general(self.impedance_ohms, 6)),
        ));
        let order_label = if self.kind == FilterKind::BandPass {
            "Resonators"
        } else {
            "Order"
        };
        lines.push((order_label, self.order.to_string()));
        if self.family.uses_ripple() {
            lines.push(("Ripple", format!("{} dB", self.ripple_db)));
        }
        lines
    }

    fn design(&self) -> Result<Design> {
        match self.shape() {
            Some(shape) => {
                let spec = LadderSpec::new(shape, self.family, self.frequency_hz)
                    .with_topology(self.topology)
                    .with_impedance(self.impedance_ohms)
                    .with_order(self.order)
                    .with_ripple(self.ripple_db);
                Ok(Design::Ladder(synthesize_ladder(&spec)?))
            }
            None => {
                let spec = BandpassSpec::new(
                    self.family,
                    self.coupling,
                    self.frequency_hz,
                    self.bandwidth_hz,
                )
                .with_impedance(self.impedance_ohms)
                .with_resonators(self.order)
                .with_ripple(self.ripple_db);
                Ok(Design::Bandpass(synthesize_bandpass(&spec)?))
            }
        }
    }
}

fn coupling_description(coupling: Coupling) -> &'static str {
    match coupling {
        Coupling::Top => "Top-C (Series)",
        Coupling::Shunt => "Shunt-C (Parallel)",
    }
}

fn parse_positive_frequency(text: &str) -> Result<f64> {
    let hz = parse_frequency(text)?;
    if hz > 0.0 {
        Ok(hz)
    } else {
        Err(FilterError::validation("Frequency must be positive"))
    }
}

fn parse_order(text: &str) -> Result<usize> {
    let n = text
        .parse::<usize>()
        .map_err(|_| FilterError::invalid_quantity("order", text))?;
    validate_order(n)?;
    Ok(n)
}

fn parse_ripple(text: &str) -> Result<f64> {
    let ripple = text
        .parse::<f64>()
        .map_err(|_| FilterError::invalid_quantity("ripple", text))?;
    if RIPPLE_CHOICES.iter().any(|r| (r - ripple).abs() < 1e-9) {
        Ok(ripple)
    } else {
        Err(FilterError::validation("Ripple must be 0.1, 0.5, or 1.0 dB"))
    }
}

/// Run the wizard, reading answers from `input` and writing prompts to `out`.
///
/// Returns the finished design. End of input aborts with a validation error.
pub fn run<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Design> {
    Wizard {
        input,
        out,
        answers: Answers::default(),
    }
    .run()
}

struct Wizard<'a, R, W> {
    input: &'a mut R,
    out: &'a mut W,
    answers: Answers,
}

impl<R: BufRead, W: Write> Wizard<'_, R, W> {
    fn run(mut self) -> Result<Design> {
        self.banner()?;

        let mut step = Step::SelectKind;
        loop {
            step = match step {
                Step::SelectKind => {
                    self.select_kind()?;
                    step.next(&self.answers)
                }
                Step::SelectFamily => {
                    self.select_family()?;
                    step.next(&self.answers)
                }
                Step::SelectTopology => {
                    self.select_topology()?;
                    step.next(&self.answers)
                }
                Step::SelectCoupling => {
                    self.select_coupling()?;
                    step.next(&self.answers)
                }
                Step::EnterFrequency => {
                    self.enter_frequency()?;
                    step.next(&self.answers)
                }
                Step::EnterBandwidth => {
                    self.enter_bandwidth()?;
                    step.next(&self.answers)
                }
                Step::EnterImpedance => {
                    writeln!(self.out, "\nEnter the system impedance (typically 50 ohms).")?;
                    self.answers.impedance_ohms =
                        self.ask("Impedance", Some(DEFAULT_IMPEDANCE), parse_impedance)?;
                    step.next(&self.answers)
                }
                Step::EnterOrder => {
                    self.enter_order()?;
                    step.next(&self.answers)
                }
                Step::EnterRipple => {
                    writeln!(self.out, "\nEnter passband ripple in dB (0.1, 0.5, or 1.0)")?;
                    writeln!(self.out, "Lower = flatter passband, Higher = sharper cutoff")?;
                    self.answers.ripple_db =
                        self.ask("Ripple dB", Some(DEFAULT_RIPPLE), parse_ripple)?;
                    step.next(&self.answers)
                }
                Step::ConfirmSummary => {
                    if self.confirm_summary()? {
                        step.next(&self.answers)
                    } else {
                        Step::SelectFamily
                    }
                }
                Step::Calculate => match self.calculate()? {
                    Some(design) => return Ok(design),
                    None => Step::SelectFamily,
                },
            };
        }
    }

    fn banner(&mut self) -> Result<()> {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(self.out, "\n{}", rule)?;
        writeln!(self.out, "  Filter Calculator Wizard")?;
        writeln!(self.out, "{}", rule)?;
        writeln!(
            self.out,
            "\nThis wizard guides you through designing an LC filter."
        )?;
        writeln!(self.out, "Press Ctrl+D at any time to cancel.")?;
        Ok(())
    }

    fn select_kind(&mut self) -> Result<()> {
        self.answers.kind = self.choose(
            "What type of filter do you need?",
            &[
                ("1", "Low-pass filter (blocks high frequencies)", FilterKind::LowPass),
                ("2", "High-pass filter (blocks low frequencies)", FilterKind::HighPass),
                ("3", "Band-pass filter (passes a frequency range)", FilterKind::BandPass),
            ],
            "1",
        )?;
        writeln!(
            self.out,
            "\n--- {} Filter Design ---",
            self.answers.category()
        )?;
        Ok(())
    }

    fn select_family(&mut self) -> Result<()> {
        self.answers.family = self.choose(
            "Select filter response type:",
            &[
                ("1", "Butterworth - Maximally flat passband", ResponseFamily::Butterworth),
                ("2", "Chebyshev - Sharper cutoff, passband ripple", ResponseFamily::Chebyshev),
                ("3", "Bessel - Best transient response", ResponseFamily::Bessel),
            ],
            "1",
        )?;
        Ok(())
    }

    fn select_topology(&mut self) -> Result<()> {
        let default = match self.answers.shape().map(|s| s.default_topology()) {
            Some(Topology::T) => "2",
            _ => "1",
        };
        self.answers.topology = self.choose(
            "Select ladder topology:",
            &[
                ("1", "Pi - Shunt element at each end", Topology::Pi),
                ("2", "T - Series element at each end", Topology::T),
            ],
            default,
        )?;
        Ok(())
    }

    fn select_coupling(&mut self) -> Result<()> {
        self.answers.coupling = self.choose(
            "Select coupling topology:",
            &[
                ("1", "Top-C (Series) - Better for wider bandwidth", Coupling::Top),
                ("2", "Shunt-C (Parallel) - Better for narrow bandwidth < 10%", Coupling::Shunt),
            ],
            "1",
        )?;
        Ok(())
    }

    fn enter_frequency(&mut self) -> Result<()> {
        if self.answers.kind == FilterKind::BandPass {
            writeln!(self.out, "\nEnter the center frequency of the passband.")?;
            writeln!(self.out, "Examples: 14.2MHz, 7.1MHz, 455kHz")?;
            self.answers.frequency_hz =
                self.ask("Center frequency", None, parse_positive_frequency)?;
        } else {
            writeln!(self.out, "\nEnter the cutoff frequency (-3dB point).")?;
            writeln!(self.out, "Examples: 10MHz, 1.5GHz, 500kHz")?;
            self.answers.frequency_hz =
                self.ask("Cutoff frequency", None, parse_positive_frequency)?;
        }
        Ok(())
    }

    fn enter_bandwidth(&mut self) -> Result<()> {
        writeln!(self.out, "\nEnter the 3dB bandwidth.")?;
        writeln!(self.out, "Examples: 500kHz, 100kHz, 30kHz")?;
        let center_hz = self.answers.frequency_hz;
        self.answers.bandwidth_hz = self.ask("Bandwidth", None, |text| {
            let bandwidth_hz = parse_positive_frequency(text)?;
            if bandwidth_hz < center_hz {
                Ok(bandwidth_hz)
            } else {
                Err(FilterError::validation(
                    "Bandwidth must be less than center frequency",
                ))
            }
        })?;
        Ok(())
    }

    fn enter_order(&mut self) -> Result<()> {
        if self.answers.kind != FilterKind::BandPass {
            writeln!(self.out, "\nEnter filter order (number of components).")?;
            writeln!(
                self.out,
                "Higher order = sharper cutoff, more components (2-9)"
            )?;
            self.answers.order = self.ask("Order", Some(DEFAULT_LADDER_ORDER), parse_order)?;
            return Ok(());
        }

        writeln!(self.out, "\nEnter number of resonators (LC tanks).")?;
        writeln!(self.out, "More = sharper skirts, more complex (2-9)")?;
        let mut n = self.ask("Resonators", Some(DEFAULT_BANDPASS_RESONATORS), parse_order)?;
        if self.answers.family == ResponseFamily::Chebyshev && n % 2 == 0 {
            writeln!(
                self.out,
                "\n  Chebyshev requires ODD resonator count for equal terminations."
            )?;
            writeln!(self.out, "  Changing to {}", n + 1)?;
            n += 1;
        }
        self.answers.order = n;
        Ok(())
    }

    fn confirm_summary(&mut self) -> Result<bool> {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(self.out, "\n{}", rule)?;
        writeln!(self.out, "  Design Summary")?;
        writeln!(self.out, "{}", rule)?;
        writeln!(self.out, "  Filter type: {}", self.answers.category())?;
        for (name, value) in self.answers.summary() {
            writeln!(self.out, "  {}: {}", name, value)?;
        }
        writeln!(self.out, "{}", rule)?;

        self.choose(
            "Proceed with calculation?",
            &[("y", "Yes, calculate", true), ("n", "No, start over", false)],
            "y",
        )
    }

    /// Synthesize the design, or report why it failed and return `None`.
    fn calculate(&mut self) -> Result<Option<Design>> {
        writeln!(self.out, "\n  Calculating...")?;
        match self.answers.design() {
            Ok(design) => {
                if let Design::Bandpass(result) = &design {
                    for warning in &result.warnings {
                        writeln!(self.out, "  Warning: {}", warning)?;
                    }
                }
                Ok(Some(design))
            }
            Err(e) if e.is_input_error() => {
                writeln!(self.out, "\n  Error: {}", e)?;
                if self.answers.kind == FilterKind::BandPass {
                    writeln!(
                        self.out,
                        "  Try reducing bandwidth or number of resonators."
                    )?;
                }
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn read_line(&mut self, prompt: &str) -> Result<String> {
        write!(self.out, "{}", prompt)?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(FilterError::validation("Wizard cancelled"));
        }
        Ok(line.trim().to_string())
    }

    /// Ask for a value until `parse` accepts it. An empty answer takes
    /// `default` when one is given.
    fn ask<T>(
        &mut self,
        message: &str,
        default: Option<&str>,
        parse: impl Fn(&str) -> Result<T>,
    ) -> Result<T> {
        let prompt = match default {
            Some(value) => format!("{} [{}]: ", message, value),
            None => format!("{}: ", message),
        };
        loop {
            let answer = self.read_line(&prompt)?;
            let text = match default {
                Some(value) if answer.is_empty() => value,
                _ => answer.as_str(),
            };
            match parse(text) {
                Ok(value) => return Ok(value),
                Err(e) if e.is_input_error() => {
                    writeln!(self.out, "  Invalid: {}. Try again.", e)?
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Numbered menu; the default is marked with `*`.
    fn choose<T: Copy>(
        &mut self,
        message: &str,
        choices: &[(&str, &str, T)],
        default: &str,
    ) -> Result<T> {
        writeln!(self.out, "\n{}", message)?;
        for (key, description, _) in choices {
            let marker = if *key == default { " *" } else { "" };
            writeln!(self.out, "  {}) {}{}", key, description, marker)?;
        }

        let prompt = format!("Enter choice [{}]: ", default);
        loop {
            let answer = self.read_line(&prompt)?.to_ascii_lowercase();
            let key = if answer.is_empty() {
                default
            } else {
                answer.as_str()
            };
            if let Some((_, _, value)) = choices.iter().find(|(k, _, _)| *k == key) {
                return Ok(*value);
            }
            let keys: Vec<&str> = choices.iter().map(|(k, _, _)| *k).collect();
            writeln!(
                self.out,
                "  Invalid choice. Enter one of: {}",
                keys.join(", ")
            )?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Cursor;

    fn run_script(script: &str) -> (Result<Design>, String) {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        let design = run(&mut input, &mut out);
        (design, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_step_transitions() {
        let mut answers = Answers::default();
        assert_eq!(Step::SelectFamily.next(&answers), Step::SelectTopology);
        assert_eq!(Step::EnterFrequency.next(&answers), Step::EnterImpedance);
        assert_eq!(Step::EnterOrder.next(&answers), Step::ConfirmSummary);

        answers.family = ResponseFamily::Chebyshev;
        assert_eq!(Step::EnterOrder.next(&answers), Step::EnterRipple);
        assert_eq!(Step::EnterRipple.next(&answers), Step::ConfirmSummary);

        answers.kind = FilterKind::BandPass;
        assert_eq!(Step::SelectFamily.next(&answers), Step::SelectCoupling);
        assert_eq!(Step::SelectCoupling.next(&answers), Step::EnterFrequency);
        assert_eq!(Step::EnterFrequency.next(&answers), Step::EnterBandwidth);
        assert_eq!(Step::EnterBandwidth.next(&answers), Step::EnterImpedance);
        assert_eq!(Step::ConfirmSummary.next(&answers), Step::Calculate);
    }

    #[test]
    fn test_answer_parsers() {
        assert_eq!(parse_order("5").unwrap(), 5);
        assert!(parse_order("1").is_err());
        assert!(parse_order("ten").is_err());
        assert_relative_eq!(parse_ripple("0.1").unwrap(), 0.1);
        assert!(parse_ripple("0.25").is_err());
        assert!(parse_positive_frequency("0").is_err());
        assert_relative_eq!(parse_positive_frequency("7.1MHz").unwrap(), 7.1e6);
    }

    #[test]
    fn test_lowpass_defaults() {
        let (design, out) = run_script("1\n1\n\n10MHz\n\n\ny\n");
        let Design::Ladder(result) = design.unwrap() else {
            panic!("expected ladder design");
        };
        assert_eq!(result.spec.shape, LadderShape::LowPass);
        assert_eq!(result.spec.topology, Topology::Pi);
        assert_relative_eq!(result.spec.cutoff_hz, 10e6);
        assert_relative_eq!(result.spec.impedance_ohms, 50.0);
        assert_eq!(result.capacitors.len(), 2);
        assert_eq!(result.inductors.len(), 1);

        assert!(out.contains("--- Lowpass Filter Design ---"));
        assert!(out.contains("  Cutoff: 10 MHz"));
        assert!(out.contains("  Impedance: 50 Ohm"));
        assert!(!out.contains("Ripple"));
    }

    #[test]
    fn test_rejected_summary_starts_over() {
        let (design, out) = run_script("2\n1\n\n1MHz\n\n\nn\n2\n\n2MHz\n75\n5\n\ny\n");
        let Design::Ladder(result) = design.unwrap() else {
            panic!("expected ladder design");
        };
        assert_eq!(result.spec.shape, LadderShape::HighPass);
        assert_eq!(result.spec.family, ResponseFamily::Chebyshev);
        assert_eq!(result.spec.topology, Topology::T);
        assert_eq!(result.spec.order, 5);
        assert_relative_eq!(result.spec.cutoff_hz, 2e6);
        assert_relative_eq!(result.spec.impedance_ohms, 75.0);
        assert_relative_eq!(result.spec.ripple_db, 0.5);
        assert_eq!(out.matches("Design Summary").count(), 2);
        assert_eq!(out.matches("--- Highpass Filter Design ---").count(), 1);
    }

    #[test]
    fn test_invalid_answers_reprompt() {
        let (design, out) = run_script("4\n1\n1\n2\nabc\n10MHz\n\n12\n4\n\n");
        let Design::Ladder(result) = design.unwrap() else {
            panic!("expected ladder design");
        };
        assert_eq!(result.spec.topology, Topology::T);
        assert_eq!(result.spec.order, 4);
        assert!(out.contains("  Invalid choice. Enter one of: 1, 2, 3"));
        assert!(out.contains("  Invalid: Invalid frequency: 'abc'. Try again."));
        assert!(out.contains("  Invalid: Order must be between 2 and 9, got 12. Try again."));
    }

    #[test]
    fn test_bandpass_chebyshev_even_resonators_bumped() {
        let (design, out) = run_script("3\n2\n1\n14.175MHz\n350kHz\n\n4\n\ny\n");
        let Design::Bandpass(result) = design.unwrap() else {
            panic!("expected band-pass design");
        };
        assert_eq!(result.resonators(), 5);
        assert_eq!(result.spec.coupling, Coupling::Top);
        assert_eq!(result.spec.family, ResponseFamily::Chebyshev);
        assert!(out.contains("  Changing to 5"));
        assert!(out.contains("  Resonators: 5"));
        assert!(out.contains("  FBW: 2.47%"));
        assert!(out.contains("  Ripple: 0.5 dB"));
    }

    #[test]
    fn test_bandpass_bandwidth_must_be_below_center() {
        let (design, out) = run_script("3\n1\n2\n10MHz\n20MHz\n500kHz\n\n3\ny\n");
        let Design::Bandpass(result) = design.unwrap() else {
            panic!("expected band-pass design");
        };
        assert_eq!(result.spec.coupling, Coupling::Shunt);
        assert_relative_eq!(result.spec.bandwidth_hz, 500e3);
        assert!(out.contains("Bandwidth must be less than center frequency"));
        assert!(out.contains("  Topology: Shunt-C (Parallel)"));
    }

    #[test]
    fn test_end_of_input_cancels() {
        let (design, _) = run_script("1\n");
        let err = design.unwrap_err();
        assert!(err.is_input_error());
        assert_eq!(err.to_string(), "Wizard cancelled");
    }
}
