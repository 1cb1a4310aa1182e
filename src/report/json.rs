//! JSON documents for designs and response sweeps.

use serde::Serialize;

use crate::error::Result;
use crate::response::{FilterResponse, ResponsePoint, ResponseShape};
use crate::synthesis::{BandpassResult, ComponentKind, LadderComponent, LadderResult};

#[derive(Debug, Serialize)]
struct NamedCapacitor {
    name: String,
    value_farads: f64,
}

#[derive(Debug, Serialize)]
struct NamedInductor {
    name: String,
    value_henries: f64,
}

fn capacitors(components: &[LadderComponent]) -> Vec<NamedCapacitor> {
    components
        .iter()
        .map(|c| NamedCapacitor {
            name: c.name(),
            value_farads: c.value,
        })
        .collect()
}

fn inductors(components: &[LadderComponent]) -> Vec<NamedInductor> {
    components
        .iter()
        .map(|c| NamedInductor {
            name: c.name(),
            value_henries: c.value,
        })
        .collect()
}

/// Ladder component lists, primary kind first.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum LadderComponents {
    CapacitorsFirst {
        capacitors: Vec<NamedCapacitor>,
        inductors: Vec<NamedInductor>,
    },
    InductorsFirst {
        inductors: Vec<NamedInductor>,
        capacitors: Vec<NamedCapacitor>,
    },
}

#[derive(Debug, Serialize)]
struct LadderDocument {
    filter_type: &'static str,
    cutoff_frequency_hz: f64,
    impedance_ohms: f64,
    order: usize,
    components: LadderComponents,
    topology: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    ripple_db: Option<f64>,
}

impl From<&LadderResult> for LadderDocument {
    fn from(result: &LadderResult) -> Self {
        let spec = &result.spec;
        let caps = capacitors(&result.capacitors);
        let inds = inductors(&result.inductors);
        let components = match result.primary_kind() {
            ComponentKind::Capacitor => LadderComponents::CapacitorsFirst {
                capacitors: caps,
                inductors: inds,
            },
            ComponentKind::Inductor => LadderComponents::InductorsFirst {
                inductors: inds,
                capacitors: caps,
            },
        };
        Self {
            filter_type: spec.family.as_str(),
            cutoff_frequency_hz: spec.cutoff_hz,
            impedance_ohms: spec.impedance_ohms,
            order: spec.order,
            components,
            topology: spec.topology.as_str(),
            ripple_db: spec.effective_ripple(),
        }
    }
}

#[derive(Debug, Serialize)]
struct BandpassComponents {
    tank_capacitors: Vec<NamedCapacitor>,
    inductors: Vec<NamedInductor>,
    coupling_capacitors: Vec<NamedCapacitor>,
}

#[derive(Debug, Serialize)]
struct ExternalQ {
    input: f64,
    output: f64,
}

#[derive(Debug, Serialize)]
struct BandpassDocument {
    filter_type: &'static str,
    coupling: &'static str,
    center_frequency_hz: f64,
    bandwidth_hz: f64,
    f_low_hz: f64,
    f_high_hz: f64,
    fractional_bw: f64,
    impedance_ohms: f64,
    n_resonators: usize,
    q_min: f64,
    components: BandpassComponents,
    external_q: ExternalQ,
    #[serde(skip_serializing_if = "Option::is_none")]
    ripple_db: Option<f64>,
}

impl From<&BandpassResult> for BandpassDocument {
    fn from(result: &BandpassResult) -> Self {
        let spec = &result.spec;
        let named_caps = |items: Vec<(String, f64)>| -> Vec<NamedCapacitor> {
            items
                .into_iter()
                .map(|(name, value_farads)| NamedCapacitor { name, value_farads })
                .collect()
        };
        Self {
            filter_type: spec.family.as_str(),
            coupling: spec.coupling.as_str(),
            center_frequency_hz: spec.center_hz,
            bandwidth_hz: spec.bandwidth_hz,
            f_low_hz: result.f_low_hz,
            f_high_hz: result.f_high_hz,
            fractional_bw: result.fbw,
            impedance_ohms: spec.impedance_ohms,
            n_resonators: result.resonators(),
            q_min: result.q_min,
            components: BandpassComponents {
                tank_capacitors: named_caps(result.named_tank_capacitors().collect()),
                inductors: result
                    .named_inductors()
                    .map(|(name, value_henries)| NamedInductor { name, value_henries })
                    .collect(),
                coupling_capacitors: named_caps(result.named_coupling_capacitors().collect()),
            },
            external_q: ExternalQ {
                input: result.qe_in,
                output: result.qe_out,
            },
            ripple_db: spec.effective_ripple(),
        }
    }
}

/// Response sweep export.
#[derive(Debug, Serialize)]
struct ResponseDocument {
    filter_type: &'static str,
    /// Low-pass/high-pass cutoff
    #[serde(skip_serializing_if = "Option::is_none")]
    cutoff_hz: Option<f64>,
    /// Band-pass center
    #[serde(skip_serializing_if = "Option::is_none")]
    f0_hz: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bandwidth_hz: Option<f64>,
    order: usize,
    data: Vec<ResponsePoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ripple_db: Option<f64>,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn ladder_json(result: &LadderResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(&LadderDocument::from(result))?)
}

pub fn bandpass_json(result: &BandpassResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(&BandpassDocument::from(result))?)
}

/// Sweep data with magnitudes rounded to 0.01 dB.
pub fn response_json(response: &FilterResponse, points: &[ResponsePoint]) -> Result<String> {
    let (cutoff_hz, f0_hz, bandwidth_hz) = match response.shape {
        ResponseShape::BandPass { bandwidth_hz } => {
            (None, Some(response.reference_hz), Some(bandwidth_hz))
        }
        _ => (Some(response.reference_hz), None, None),
    };
    let document = ResponseDocument {
        filter_type: response.family.as_str(),
        cutoff_hz,
        f0_hz,
        bandwidth_hz,
        order: response.order,
        data: points
            .iter()
            .map(|p| ResponsePoint {
                frequency_hz: p.frequency_hz,
                magnitude_db: round2(p.magnitude_db),
            })
            .collect(),
        ripple_db: response
            .family
            .uses_ripple()
            .then_some(response.ripple_db),
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prototype::ResponseFamily;
    use crate::synthesis::{
        synthesize_bandpass, synthesize_ladder, BandpassSpec, Coupling, LadderShape, LadderSpec,
        Topology,
    };
    use serde_json::Value;

    #[test]
    fn test_lowpass_document() {
        let spec = LadderSpec::new(LadderShape::LowPass, ResponseFamily::Butterworth, 10e6)
            .with_order(3);
        let result = synthesize_ladder(&spec).unwrap();
        let json = ladder_json(&result).unwrap();

        // capacitors are listed before inductors for low-pass
        assert!(json.find("\"capacitors\"").unwrap() < json.find("\"inductors\"").unwrap());

        let v: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["filter_type"], "butterworth");
        assert_eq!(v["cutoff_frequency_hz"], 10e6);
        assert_eq!(v["order"], 3);
        assert_eq!(v["topology"], "pi");
        assert_eq!(v["components"]["capacitors"].as_array().unwrap().len(), 2);
        assert_eq!(v["components"]["capacitors"][1]["name"], "C2");
        assert!(v["components"]["inductors"][0]["value_henries"].is_f64());
        assert!(v.get("ripple_db").is_none());
    }

    #[test]
    fn test_highpass_chebyshev_document() {
        let spec = LadderSpec::new(LadderShape::HighPass, ResponseFamily::Chebyshev, 1e6)
            .with_topology(Topology::T)
            .with_ripple(0.5);
        let result = synthesize_ladder(&spec).unwrap();
        let json = ladder_json(&result).unwrap();

        assert!(json.find("\"inductors\"").unwrap() < json.find("\"capacitors\"").unwrap());
        let v: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["topology"], "t");
        assert_eq!(v["ripple_db"], 0.5);
    }

    #[test]
    fn test_bandpass_document() {
        let spec = BandpassSpec::new(ResponseFamily::Butterworth, Coupling::Top, 14.175e6, 350e3)
            .with_resonators(3);
        let result = synthesize_bandpass(&spec).unwrap();
        let v: Value = serde_json::from_str(&bandpass_json(&result).unwrap()).unwrap();

        assert_eq!(v["coupling"], "top");
        assert_eq!(v["n_resonators"], 3);
        assert_eq!(v["components"]["tank_capacitors"].as_array().unwrap().len(), 3);
        assert_eq!(v["components"]["inductors"][2]["name"], "L3");
        assert_eq!(v["components"]["coupling_capacitors"][1]["name"], "Cs23");
        assert!(v["external_q"]["input"].as_f64().unwrap() > 0.0);
        assert!(v.get("ripple_db").is_none());
    }

    #[test]
    fn test_response_document_rounds_db() {
        let response = FilterResponse {
            family: ResponseFamily::Chebyshev,
            shape: ResponseShape::LowPass,
            reference_hz: 1e6,
            order: 3,
            ripple_db: 0.5,
        };
        let points = response.default_sweep().unwrap();
        let v: Value = serde_json::from_str(&response_json(&response, &points).unwrap()).unwrap();

        assert_eq!(v["data"].as_array().unwrap().len(), points.len());
        assert_eq!(v["ripple_db"], 0.5);
        assert_eq!(v["cutoff_hz"], 1e6);
        assert!(v.get("f0_hz").is_none());
        assert!(v.get("bandwidth_hz").is_none());
        for point in v["data"].as_array().unwrap() {
            let db = point["magnitude_db"].as_f64().unwrap();
            assert!((db * 100.0 - (db * 100.0).round()).abs() < 1e-6);
        }
    }
}
