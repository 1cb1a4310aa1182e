//! Presentation of finished designs.
//!
//! Designs render as a boxed table (the default), JSON, CSV or a quiet
//! `name: value` listing. Response sweeps can be exported as JSON or CSV
//! for external plotting.

mod csv;
pub mod diagram;
mod json;
pub mod plot;
mod table;

use std::fmt;
use std::str::FromStr;

use crate::eseries::ESeries;
use crate::error::{FilterError, Result};
use crate::prototype::ResponseFamily;
use crate::response::FilterResponse;
use crate::synthesis::{BandpassResult, ComponentKind, Design, FilterKind, LadderResult};
use crate::units::{format_capacitance, format_inductance};
use crate::DEFAULT_E_SERIES;

pub use self::csv::{bandpass_csv, ladder_csv, response_csv};
pub use self::json::{bandpass_json, ladder_json, response_json};
pub use self::table::{bandpass_quiet, bandpass_table, ladder_quiet, ladder_table};

/// Component report format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(FilterError::validation(format!(
                "Unknown format '{}': use table, json or csv",
                other
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Table => "table",
            Self::Json => "json",
            Self::Csv => "csv",
        })
    }
}

/// Response sweep export format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotDataFormat {
    Json,
    Csv,
}

impl FromStr for PlotDataFormat {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(FilterError::validation(format!(
                "Unknown plot data format '{}': use json or csv",
                other
            ))),
        }
    }
}

/// How to render a design.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub format: OutputFormat,
    /// Scientific notation in SI base units instead of engineering units
    pub raw: bool,
    /// Bare `name: value` lines
    pub quiet: bool,
    /// Series for standard-value recommendations, `None` to skip them
    pub e_series: Option<ESeries>,
    /// Append an ASCII response plot to the table
    pub plot: bool,
    /// Export the response sweep instead of the components
    pub plot_data: Option<PlotDataFormat>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            raw: false,
            quiet: false,
            e_series: Some(DEFAULT_E_SERIES),
            plot: false,
            plot_data: None,
        }
    }
}

impl RenderOptions {
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_raw(mut self, raw: bool) -> Self {
        self.raw = raw;
        self
    }

    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn with_e_series(mut self, e_series: Option<ESeries>) -> Self {
        self.e_series = e_series;
        self
    }

    pub fn with_plot(mut self, plot: bool) -> Self {
        self.plot = plot;
        self
    }

    pub fn with_plot_data(mut self, plot_data: Option<PlotDataFormat>) -> Self {
        self.plot_data = plot_data;
        self
    }
}

/// Engineering-unit string for a component value.
pub(crate) fn format_component(kind: ComponentKind, value: f64) -> String {
    match kind {
        ComponentKind::Capacitor => format_capacitance(value),
        ComponentKind::Inductor => format_inductance(value),
    }
}

/// Render a low-pass/high-pass design.
///
/// Precedence: response data export, JSON, CSV, quiet, table.
pub fn render_ladder(result: &LadderResult, options: &RenderOptions) -> Result<String> {
    if let Some(format) = options.plot_data {
        return render_response_data(&FilterResponse::from_ladder(result), format);
    }
    match options.format {
        OutputFormat::Json => ladder_json(result),
        OutputFormat::Csv => ladder_csv(result),
        OutputFormat::Table if options.quiet => Ok(ladder_quiet(result, options.raw)),
        OutputFormat::Table => ladder_table(result, options),
    }
}

/// Render a band-pass design, with the same precedence as [`render_ladder`].
pub fn render_bandpass(result: &BandpassResult, options: &RenderOptions) -> Result<String> {
    if let Some(format) = options.plot_data {
        return render_response_data(&FilterResponse::from_bandpass(result), format);
    }
    match options.format {
        OutputFormat::Json => bandpass_json(result),
        OutputFormat::Csv => bandpass_csv(result),
        OutputFormat::Table if options.quiet => Ok(bandpass_quiet(result, options.raw)),
        OutputFormat::Table => bandpass_table(result, options),
    }
}

pub fn render_design(design: &Design, options: &RenderOptions) -> Result<String> {
    match design {
        Design::Ladder(result) => render_ladder(result, options),
        Design::Bandpass(result) => render_bandpass(result, options),
    }
}

/// Default sweep of `response` in the requested export format.
pub fn render_response_data(response: &FilterResponse, format: PlotDataFormat) -> Result<String> {
    let points = response.default_sweep()?;
    match format {
        PlotDataFormat::Json => response_json(response, &points),
        PlotDataFormat::Csv => response_csv(&points),
    }
}

/// Short description of a response family for the given filter kind.
pub fn explain(kind: FilterKind, family: ResponseFamily) -> &'static str {
    use FilterKind::*;
    use ResponseFamily::*;

    match (kind, family) {
        (LowPass, Butterworth) => {
            "Butterworth Filter (Maximally Flat Magnitude)\n\
             - Flattest possible passband response\n\
             - No ripple in passband\n\
             - Moderate rolloff steepness\n\
             - Good for audio applications"
        }
        (LowPass, Chebyshev) => {
            "Chebyshev Filter (Equiripple)\n\
             - Steeper rolloff than Butterworth for same order\n\
             - Ripple in passband (specified in dB)\n\
             - Better stopband attenuation\n\
             - Good for RF applications requiring sharp cutoff"
        }
        (LowPass, Bessel) => {
            "Bessel Filter (Maximally Flat Delay)\n\
             - Best pulse response (minimal overshoot)\n\
             - Linear phase response\n\
             - Gentlest rolloff\n\
             - Good for data/pulse applications"
        }
        (HighPass, Butterworth) => {
            "Butterworth High-Pass Filter (Maximally Flat Magnitude)\n\
             - Flattest possible passband response\n\
             - No ripple in passband\n\
             - Moderate rolloff steepness\n\
             - Series capacitors, shunt inductors"
        }
        (HighPass, Chebyshev) => {
            "Chebyshev High-Pass Filter (Equiripple)\n\
             - Steeper rolloff than Butterworth for same order\n\
             - Ripple in passband (specified in dB)\n\
             - Better stopband attenuation\n\
             - Series capacitors, shunt inductors"
        }
        (HighPass, Bessel) => {
            "Bessel High-Pass Filter (Maximally Flat Delay)\n\
             - Best pulse response (minimal overshoot)\n\
             - Linear phase response\n\
             - Gentlest rolloff\n\
             - Series capacitors, shunt inductors"
        }
        (BandPass, Butterworth) => {
            "Butterworth Bandpass Filter (Maximally Flat)\n\
             - Flattest possible passband response\n\
             - No ripple in passband\n\
             - Good for general RF applications"
        }
        (BandPass, Chebyshev) => {
            "Chebyshev Bandpass Filter (Equiripple)\n\
             - Steeper skirts than Butterworth\n\
             - Ripple in passband (specified in dB)\n\
             - Requires odd number of resonators\n\
             - Better selectivity for same order"
        }
        (BandPass, Bessel) => {
            "Bessel Bandpass Filter (Maximally Flat Delay)\n\
             - Best pulse response\n\
             - Linear phase in passband\n\
             - Gentlest rolloff"
        }
    }
}
