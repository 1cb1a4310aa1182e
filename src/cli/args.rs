//! Command-line arguments.

use clap::{Args, Parser, Subcommand};

use crate::eseries::ESeries;
use crate::prototype::ResponseFamily;
use crate::report::{OutputFormat, PlotDataFormat, RenderOptions};
use crate::synthesis::{Coupling, Topology};
use crate::units::{parse_frequency, parse_impedance};
use crate::{DEFAULT_ORDER, DEFAULT_Q_SAFETY, DEFAULT_RESONATORS, DEFAULT_RIPPLE_DB};

/// LC filter component calculator
#[derive(Parser, Debug)]
#[command(name = "filtercalc", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Low-pass Pi/T ladder
    #[command(visible_alias = "lp")]
    Lowpass(LadderArgs),

    /// High-pass Pi/T ladder
    #[command(visible_alias = "hp")]
    Highpass(LadderArgs),

    /// Coupled-resonator band-pass
    #[command(visible_alias = "bp")]
    Bandpass(BandpassArgs),

    /// Interactive design wizard
    Wizard,
}

/// Output options shared by every design command.
#[derive(Args, Debug)]
pub struct OutputArgs {
    /// Output raw values in Farads/Henries
    #[arg(long)]
    pub raw: bool,

    /// Explain the filter type and exit
    #[arg(long)]
    pub explain: bool,

    /// Minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format: table, json or csv
    #[arg(long, default_value = "table")]
    pub format: OutputFormat,

    /// E-series for standard value matching: E12, E24 or E96
    #[arg(short = 'e', long = "eseries", default_value = "E24")]
    pub eseries: ESeries,

    /// Disable E-series matching
    #[arg(long)]
    pub no_match: bool,

    /// Show ASCII frequency response
    #[arg(long)]
    pub plot: bool,

    /// Export frequency response data: json or csv
    #[arg(long, value_name = "FORMAT")]
    pub plot_data: Option<PlotDataFormat>,
}

impl OutputArgs {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions::default()
            .with_format(self.format)
            .with_raw(self.raw)
            .with_quiet(self.quiet)
            .with_e_series((!self.no_match).then_some(self.eseries))
            .with_plot(self.plot)
            .with_plot_data(self.plot_data)
    }
}

/// Low-pass/high-pass design arguments.
#[derive(Args, Debug)]
pub struct LadderArgs {
    /// Filter type: butterworth (bw, b), chebyshev (ch, c) or bessel (bs)
    #[arg(value_name = "TYPE")]
    pub filter_type: Option<ResponseFamily>,

    /// Topology (pi or t) and/or cutoff frequency (e.g. 10MHz)
    #[arg(value_name = "TOPOLOGY|FREQ")]
    pub positional: Vec<String>,

    /// Filter type (alternative)
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub type_flag: Option<ResponseFamily>,

    /// Cutoff frequency (alternative)
    #[arg(short = 'f', long = "freq", value_parser = parse_frequency)]
    pub freq: Option<f64>,

    /// Filter topology: pi or t
    #[arg(long)]
    pub topology: Option<Topology>,

    /// Characteristic impedance
    #[arg(short = 'z', long, default_value = "50", value_parser = parse_impedance)]
    pub impedance: f64,

    /// Chebyshev ripple in dB
    #[arg(short, long, default_value_t = DEFAULT_RIPPLE_DB)]
    pub ripple: f64,

    /// Number of components: 2-9
    #[arg(short = 'n', long, default_value_t = DEFAULT_ORDER)]
    pub components: usize,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Band-pass design arguments.
#[derive(Args, Debug)]
pub struct BandpassArgs {
    /// Filter type: butterworth (bw, b), chebyshev (ch, c) or bessel (bs)
    #[arg(value_name = "TYPE")]
    pub filter_type: Option<ResponseFamily>,

    /// Coupling topology: top (t) or shunt (s)
    #[arg(value_name = "COUPLING")]
    pub coupling: Option<Coupling>,

    /// Filter type (alternative)
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub type_flag: Option<ResponseFamily>,

    /// Coupling topology (alternative)
    #[arg(short = 'c', long = "coupling", value_name = "COUPLING")]
    pub coupling_flag: Option<Coupling>,

    /// Center frequency
    #[arg(short = 'f', long, value_parser = parse_frequency, conflicts_with_all = ["f_low", "f_high"])]
    pub frequency: Option<f64>,

    /// 3 dB bandwidth
    #[arg(short = 'b', long, value_parser = parse_frequency, conflicts_with_all = ["f_low", "f_high"])]
    pub bandwidth: Option<f64>,

    /// Lower cutoff frequency
    #[arg(long = "fl", value_parser = parse_frequency)]
    pub f_low: Option<f64>,

    /// Upper cutoff frequency
    #[arg(long = "fh", value_parser = parse_frequency)]
    pub f_high: Option<f64>,

    /// System impedance
    #[arg(short = 'z', long, default_value = "50", value_parser = parse_impedance)]
    pub impedance: f64,

    /// Number of resonators: 2-9
    #[arg(short = 'n', long, default_value_t = DEFAULT_RESONATORS)]
    pub resonators: usize,

    /// Chebyshev ripple in dB
    #[arg(short, long, default_value_t = DEFAULT_RIPPLE_DB)]
    pub ripple: f64,

    /// Q safety factor
    #[arg(long, default_value_t = DEFAULT_Q_SAFETY)]
    pub q_safety: f64,

    #[command(flatten)]
    pub output: OutputArgs,
}
