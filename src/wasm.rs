//! WASM bindings for LC Filter Core.
//!
//! Every design call returns the same JSON document the CLI prints with
//! `--format json`; errors surface as JavaScript exceptions carrying the
//! error message.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmFilterCalc } from 'lc_filter_core';
//!
//! await init();
//!
//! const calc = new WasmFilterCalc(50, 'E24');
//! const lp = JSON.parse(calc.lowpass('butterworth', 'pi', '10MHz', 5, 0.5));
//! const bp = JSON.parse(calc.bandpass('chebyshev', 'top', '14.175MHz', '350kHz', 3, 0.5));
//! const part = JSON.parse(calc.match_value(123.4e-12, 'capacitor'));
//! ```

use wasm_bindgen::prelude::*;

use crate::eseries::{match_component, ESeries, ParallelMode};
use crate::error::FilterError;
use crate::prototype::ResponseFamily;
use crate::report::{bandpass_json, ladder_json, render_response_data, PlotDataFormat};
use crate::response::FilterResponse;
use crate::synthesis::{
    synthesize_bandpass, synthesize_ladder, BandpassSpec, Coupling, LadderShape, LadderSpec,
    Topology,
};
use crate::units::parse_frequency;

fn to_js(error: FilterError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Filter calculator bound to one system impedance and E-series.
#[wasm_bindgen]
pub struct WasmFilterCalc {
    impedance_ohms: f64,
    e_series: ESeries,
}

#[wasm_bindgen]
impl WasmFilterCalc {
    /// Create a calculator.
    ///
    /// # Arguments
    /// * `impedance_ohms` - System impedance (typically 50)
    /// * `e_series` - "E12", "E24" or "E96"
    #[wasm_bindgen(constructor)]
    pub fn new(impedance_ohms: f64, e_series: &str) -> Result<WasmFilterCalc, JsValue> {
        let e_series = e_series.parse::<ESeries>().map_err(to_js)?;
        Ok(WasmFilterCalc {
            impedance_ohms,
            e_series,
        })
    }

    #[wasm_bindgen(getter)]
    pub fn impedance_ohms(&self) -> f64 {
        self.impedance_ohms
    }

    /// Low-pass ladder design as JSON.
    ///
    /// `cutoff` accepts engineering strings such as "10MHz".
    #[wasm_bindgen]
    pub fn lowpass(
        &self,
        filter_type: &str,
        topology: &str,
        cutoff: &str,
        order: usize,
        ripple_db: f64,
    ) -> Result<String, JsValue> {
        self.ladder(LadderShape::LowPass, filter_type, topology, cutoff, order, ripple_db)
            .map_err(to_js)
    }

    /// High-pass ladder design as JSON.
    #[wasm_bindgen]
    pub fn highpass(
        &self,
        filter_type: &str,
        topology: &str,
        cutoff: &str,
        order: usize,
        ripple_db: f64,
    ) -> Result<String, JsValue> {
        self.ladder(LadderShape::HighPass, filter_type, topology, cutoff, order, ripple_db)
            .map_err(to_js)
    }

    /// Coupled-resonator band-pass design as JSON.
    #[wasm_bindgen]
    pub fn bandpass(
        &self,
        filter_type: &str,
        coupling: &str,
        center: &str,
        bandwidth: &str,
        resonators: usize,
        ripple_db: f64,
    ) -> Result<String, JsValue> {
        self.bandpass_spec(filter_type, coupling, center, bandwidth, resonators, ripple_db)
            .and_then(|spec| synthesize_bandpass(&spec))
            .and_then(|result| bandpass_json(&result))
            .map_err(to_js)
    }

    /// Band-pass magnitude sweep as JSON, for charting.
    #[wasm_bindgen]
    pub fn bandpass_response(
        &self,
        filter_type: &str,
        coupling: &str,
        center: &str,
        bandwidth: &str,
        resonators: usize,
        ripple_db: f64,
    ) -> Result<String, JsValue> {
        self.bandpass_spec(filter_type, coupling, center, bandwidth, resonators, ripple_db)
            .and_then(|spec| synthesize_bandpass(&spec))
            .and_then(|result| {
                render_response_data(&FilterResponse::from_bandpass(&result), PlotDataFormat::Json)
            })
            .map_err(to_js)
    }

    /// Nearest standard part and best parallel pair for `value` as JSON.
    ///
    /// `kind` is "capacitor" or "inductor"; anything else picks the pairing
    /// rule from the magnitude of `value`.
    #[wasm_bindgen]
    pub fn match_value(&self, value: f64, kind: &str) -> Result<String, JsValue> {
        let mode = match kind.trim().to_ascii_lowercase().as_str() {
            "capacitor" | "c" => ParallelMode::Additive,
            "inductor" | "l" => ParallelMode::Harmonic,
            _ => ParallelMode::Auto,
        };
        let matched = match_component(value, self.e_series, mode).map_err(to_js)?;
        serde_json::to_string(&matched).map_err(|e| to_js(e.into()))
    }
}

impl WasmFilterCalc {
    fn ladder(
        &self,
        shape: LadderShape,
        filter_type: &str,
        topology: &str,
        cutoff: &str,
        order: usize,
        ripple_db: f64,
    ) -> crate::Result<String> {
        let family = filter_type.parse::<ResponseFamily>()?;
        let topology = if topology.trim().is_empty() {
            shape.default_topology()
        } else {
            topology.parse::<Topology>()?
        };
        let spec = LadderSpec::new(shape, family, parse_frequency(cutoff)?)
            .with_topology(topology)
            .with_impedance(self.impedance_ohms)
            .with_order(order)
            .with_ripple(ripple_db);
        ladder_json(&synthesize_ladder(&spec)?)
    }

    fn bandpass_spec(
        &self,
        filter_type: &str,
        coupling: &str,
        center: &str,
        bandwidth: &str,
        resonators: usize,
        ripple_db: f64,
    ) -> crate::Result<BandpassSpec> {
        let family = filter_type.parse::<ResponseFamily>()?;
        let coupling = coupling.parse::<Coupling>()?;
        Ok(BandpassSpec::new(
            family,
            coupling,
            parse_frequency(center)?,
            parse_frequency(bandwidth)?,
        )
        .with_impedance(self.impedance_ohms)
        .with_resonators(resonators)
        .with_ripple(ripple_db))
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
