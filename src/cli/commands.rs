//! Subcommand execution.

use std::io::{BufRead, Write};

use super::args::{BandpassArgs, Command, LadderArgs};
use crate::error::{FilterError, Result};
use crate::prototype::ResponseFamily;
use crate::report::{explain, render_bandpass, render_design, render_ladder, RenderOptions};
use crate::synthesis::{
    synthesize_bandpass, synthesize_ladder, BandpassSpec, FilterKind, LadderShape, LadderSpec,
    Topology,
};
use crate::units::parse_frequency;
use crate::wizard;

/// Run one subcommand, reading wizard answers from `input` and writing every
/// report to `out`.
pub fn execute<R: BufRead, W: Write>(command: Command, input: &mut R, out: &mut W) -> Result<()> {
    match command {
        Command::Lowpass(args) => run_ladder(LadderShape::LowPass, &args, out),
        Command::Highpass(args) => run_ladder(LadderShape::HighPass, &args, out),
        Command::Bandpass(args) => run_bandpass(&args, out),
        Command::Wizard => {
            let design = wizard::run(input, out)?;
            emit(out, &render_design(&design, &RenderOptions::default())?)
        }
    }
}

/// Run one subcommand, reporting any failure on `err` as `Error: <message>`.
///
/// Returns the process exit code: 0 on success, 1 on failure.
pub fn run<R: BufRead, W: Write, E: Write>(
    command: Command,
    input: &mut R,
    out: &mut W,
    err: &mut E,
) -> i32 {
    match execute(command, input, out) {
        Ok(()) => 0,
        Err(e) => {
            let _ = writeln!(err, "Error: {}", e);
            1
        }
    }
}

fn emit<W: Write>(out: &mut W, text: &str) -> Result<()> {
    if text.ends_with('\n') {
        write!(out, "{}", text)?;
    } else {
        writeln!(out, "{}", text)?;
    }
    Ok(())
}

fn require_family(
    positional: Option<ResponseFamily>,
    flag: Option<ResponseFamily>,
    context: &str,
) -> Result<ResponseFamily> {
    positional
        .or(flag)
        .ok_or_else(|| FilterError::validation(format!("Filter type required {}", context)))
}

fn explain_family<W: Write>(
    kind: FilterKind,
    positional: Option<ResponseFamily>,
    flag: Option<ResponseFamily>,
    out: &mut W,
) -> Result<()> {
    let family = require_family(positional, flag, "for --explain")?;
    emit(out, explain(kind, family))
}

/// Split the trailing positionals into an optional topology and an optional
/// frequency string, in that order.
fn split_positionals(positional: &[String]) -> Result<(Option<Topology>, Option<&str>)> {
    let mut topology = None;
    let mut frequency = None;
    for item in positional {
        match item.parse::<Topology>() {
            Ok(parsed) if topology.is_none() && frequency.is_none() => topology = Some(parsed),
            _ if frequency.is_none() => frequency = Some(item.as_str()),
            _ => {
                return Err(FilterError::validation(format!(
                    "Unexpected argument '{}'",
                    item
                )))
            }
        }
    }
    Ok((topology, frequency))
}

fn run_ladder<W: Write>(shape: LadderShape, args: &LadderArgs, out: &mut W) -> Result<()> {
    if args.output.explain {
        return explain_family(shape.into(), args.filter_type, args.type_flag, out);
    }
    let family = require_family(
        args.filter_type,
        args.type_flag,
        "(butterworth/chebyshev/bessel)",
    )?;

    let (topology, frequency) = split_positionals(&args.positional)?;
    let cutoff_hz = match (frequency, args.freq) {
        (Some(text), _) => parse_frequency(text)?,
        (None, Some(freq)) => freq,
        (None, None) => return Err(FilterError::validation("Frequency required")),
    };
    let topology = topology
        .or(args.topology)
        .unwrap_or_else(|| shape.default_topology());

    let spec = LadderSpec::new(shape, family, cutoff_hz)
        .with_topology(topology)
        .with_impedance(args.impedance)
        .with_order(args.components)
        .with_ripple(args.ripple);
    let result = synthesize_ladder(&spec)?;

    emit(out, &render_ladder(&result, &args.output.render_options())?)
}

fn bandpass_spec(args: &BandpassArgs, family: ResponseFamily) -> Result<BandpassSpec> {
    let coupling = args
        .coupling
        .or(args.coupling_flag)
        .ok_or_else(|| FilterError::validation("Coupling topology required (top/shunt)"))?;

    let spec = match (args.frequency, args.bandwidth, args.f_low, args.f_high) {
        (Some(center), Some(bandwidth), None, None) => {
            BandpassSpec::new(family, coupling, center, bandwidth)
        }
        (None, None, Some(f_low), Some(f_high)) => {
            BandpassSpec::from_edges(family, coupling, f_low, f_high)?
        }
        (Some(_), Some(_), Some(_), Some(_)) => {
            return Err(FilterError::validation(
                "Use (-f + -b) OR (--fl + --fh), not both",
            ))
        }
        _ => {
            return Err(FilterError::validation(
                "Specify frequency as (-f + -b) or (--fl + --fh)",
            ))
        }
    };

    Ok(spec
        .with_impedance(args.impedance)
        .with_resonators(args.resonators)
        .with_ripple(args.ripple)
        .with_q_safety(args.q_safety))
}

fn run_bandpass<W: Write>(args: &BandpassArgs, out: &mut W) -> Result<()> {
    if args.output.explain {
        return explain_family(FilterKind::BandPass, args.filter_type, args.type_flag, out);
    }
    let family = require_family(
        args.filter_type,
        args.type_flag,
        "(butterworth/chebyshev/bessel)",
    )?;
    let result = synthesize_bandpass(&bandpass_spec(args, family)?)?;

    for warning in &result.warnings {
        log::warn!("{}", warning);
    }

    emit(out, &render_bandpass(&result, &args.output.render_options())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;
    use std::io::Cursor;

    fn run(argv: &[&str]) -> Result<String> {
        let cli = Cli::try_parse_from(argv).unwrap();
        let mut input = Cursor::new(Vec::new());
        let mut out = Vec::new();
        execute(cli.command, &mut input, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    fn run_with_stderr(argv: &[&str]) -> (i32, String, String) {
        let cli = Cli::try_parse_from(argv).unwrap();
        let mut input = Cursor::new(Vec::new());
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let code = super::run(cli.command, &mut input, &mut out, &mut err);
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_errors_reported_as_messages() {
        let (code, out, err) = run_with_stderr(&["filtercalc", "lp", "bw", "10MHz", "-n", "12"]);
        assert_eq!(code, 1);
        assert!(out.is_empty());
        assert_eq!(err, "Error: Order must be between 2 and 9, got 12\n");

        let (code, _, err) = run_with_stderr(&[
            "filtercalc", "bp", "bw", "top", "-f", "14MHz", "-b", "10MHz", "-n", "5",
        ]);
        assert_eq!(code, 1);
        assert!(err.starts_with("Error: Bandwidth too wide: tank capacitors Cp2, Cp4"));
        assert!(!err.contains("DesignRange"));
    }

    #[test]
    fn test_success_exit_code() {
        let (code, out, err) = run_with_stderr(&["filtercalc", "lp", "bw", "10MHz", "-q"]);
        assert_eq!(code, 0);
        assert_eq!(out.lines().count(), 3);
        assert!(err.is_empty());
    }

    #[test]
    fn test_split_positionals() {
        let items = vec!["t".to_string(), "10MHz".to_string()];
        let (topology, freq) = split_positionals(&items).unwrap();
        assert_eq!(topology, Some(Topology::T));
        assert_eq!(freq, Some("10MHz"));

        let items = vec!["10MHz".to_string()];
        assert_eq!(split_positionals(&items).unwrap(), (None, Some("10MHz")));

        let items = vec!["10MHz".to_string(), "pi".to_string()];
        assert!(split_positionals(&items).is_err());
    }

    #[test]
    fn test_lowpass_quiet() {
        let out = run(&["filtercalc", "lp", "bw", "10MHz", "-q"]).unwrap();
        let names: Vec<&str> = out.lines().map(|l| l.split(':').next().unwrap()).collect();
        assert_eq!(names, vec!["C1", "C2", "L1"]);
    }

    #[test]
    fn test_highpass_defaults_to_t() {
        let out = run(&["filtercalc", "hp", "bw", "1MHz"]).unwrap();
        assert!(out.contains("Butterworth T High Pass Filter"));
        let out = run(&["filtercalc", "hp", "bw", "pi", "1MHz"]).unwrap();
        assert!(out.contains("Butterworth Pi High Pass Filter"));
    }

    #[test]
    fn test_ladder_json_output() {
        let out = run(&["filtercalc", "lp", "-t", "ch", "-f", "7MHz", "--format", "json"]).unwrap();
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["filter_type"], "chebyshev");
        assert_eq!(v["ripple_db"], 0.5);
    }

    #[test]
    fn test_explain() {
        let out = run(&["filtercalc", "bp", "ch", "--explain"]).unwrap();
        assert!(out.starts_with("Chebyshev Bandpass Filter"));
        let err = run(&["filtercalc", "lp", "--explain"]).unwrap_err();
        assert_eq!(err.to_string(), "Filter type required for --explain");
    }

    #[test]
    fn test_missing_inputs() {
        let err = run(&["filtercalc", "lp", "bw"]).unwrap_err();
        assert_eq!(err.to_string(), "Frequency required");
        let err = run(&["filtercalc", "bp", "bw", "-f", "14MHz", "-b", "350k"]).unwrap_err();
        assert_eq!(err.to_string(), "Coupling topology required (top/shunt)");
        let err = run(&["filtercalc", "bp", "bw", "top", "-f", "14MHz"]).unwrap_err();
        assert_eq!(err.to_string(), "Specify frequency as (-f + -b) or (--fl + --fh)");
    }

    #[test]
    fn test_bandpass_from_edges() {
        let out = run(&[
            "filtercalc", "bp", "bw", "shunt", "--fl", "7.0MHz", "--fh", "7.2MHz", "--format",
            "json",
        ])
        .unwrap();
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["f_low_hz"], 7.0e6);
        assert_eq!(v["f_high_hz"], 7.2e6);
        assert_eq!(v["coupling"], "shunt");
    }

    #[test]
    fn test_bandpass_plot_data() {
        let out = run(&[
            "filtercalc", "bp", "bw", "top", "-f", "14.175MHz", "-b", "350kHz", "--plot-data",
            "csv",
        ])
        .unwrap();
        assert_eq!(out.lines().next(), Some("frequency_hz,magnitude_db"));
        assert_eq!(out.lines().count(), 1 + 61);
    }

    #[test]
    fn test_chebyshev_even_resonators_rejected() {
        let err = run(&["filtercalc", "bp", "ch", "top", "-f", "14MHz", "-b", "350k", "-n", "4"])
            .unwrap_err();
        assert!(err.is_input_error());
        assert!(err.to_string().contains("odd resonator count"));
    }
}
