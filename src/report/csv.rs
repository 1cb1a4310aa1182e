//! CSV export of component values and response sweeps.

use std::io;

use super::format_component;
use crate::error::{FilterError, Result};
use crate::response::ResponsePoint;
use crate::synthesis::{BandpassResult, LadderResult};
use crate::units::{format_capacitance, format_general, format_inductance};

const COMPONENT_HEADER: [&str; 3] = ["Component", "Value", "Unit"];
const RESPONSE_HEADER: [&str; 2] = ["frequency_hz", "magnitude_db"];

fn writer() -> csv::Writer<Vec<u8>> {
    csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new())
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer.into_inner().map_err(|e| FilterError::from(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| FilterError::from(io::Error::new(io::ErrorKind::InvalidData, e)))
}

/// Write `name,value,unit`, splitting the engineering string on its last space.
fn write_component(wtr: &mut csv::Writer<Vec<u8>>, name: &str, formatted: &str) -> Result<()> {
    let (value, unit) = formatted.rsplit_once(' ').unwrap_or((formatted, ""));
    wtr.write_record([name, value, unit])?;
    Ok(())
}

/// Ladder components, primary kind first.
pub fn ladder_csv(result: &LadderResult) -> Result<String> {
    let primary = result.primary_kind();
    let mut wtr = writer();
    wtr.write_record(COMPONENT_HEADER)?;
    for kind in [primary, primary.dual()] {
        for component in result.of_kind(kind) {
            write_component(&mut wtr, &component.name(), &format_component(kind, component.value))?;
        }
    }
    finish(wtr)
}

/// Band-pass components: tank capacitors, inductors, coupling capacitors.
pub fn bandpass_csv(result: &BandpassResult) -> Result<String> {
    let mut wtr = writer();
    wtr.write_record(COMPONENT_HEADER)?;
    for (name, value) in result.named_tank_capacitors() {
        write_component(&mut wtr, &name, &format_capacitance(value))?;
    }
    for (name, value) in result.named_inductors() {
        write_component(&mut wtr, &name, &format_inductance(value))?;
    }
    for (name, value) in result.named_coupling_capacitors() {
        write_component(&mut wtr, &name, &format_capacitance(value))?;
    }
    finish(wtr)
}

/// Sweep data, magnitude to 0.01 dB.
pub fn response_csv(points: &[ResponsePoint]) -> Result<String> {
    let mut wtr = writer();
    wtr.write_record(RESPONSE_HEADER)?;
    for p in points {
        wtr.write_record([
            format_general(p.frequency_hz, 6),
            format!("{:.2}", p.magnitude_db),
        ])?;
    }
    finish(wtr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prototype::ResponseFamily;
    use crate::synthesis::{
        synthesize_bandpass, synthesize_ladder, BandpassSpec, Coupling, LadderShape, LadderSpec,
        Topology,
    };

    #[test]
    fn test_lowpass_csv() {
        let spec = LadderSpec::new(LadderShape::LowPass, ResponseFamily::Butterworth, 10e6)
            .with_order(3);
        let csv = ladder_csv(&synthesize_ladder(&spec).unwrap()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "Component,Value,Unit");
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("C1,") && lines[1].ends_with(",pF"));
        assert!(lines[2].starts_with("C2,"));
        assert_eq!(lines[3], "L1,1.59,µH");
    }

    #[test]
    fn test_highpass_lists_inductors_first() {
        let spec = LadderSpec::new(LadderShape::HighPass, ResponseFamily::Butterworth, 1e6)
            .with_topology(Topology::Pi)
            .with_order(3);
        let csv = ladder_csv(&synthesize_ladder(&spec).unwrap()).unwrap();
        let names: Vec<&str> = csv
            .lines()
            .skip(1)
            .filter_map(|l| l.split(',').next())
            .collect();
        assert_eq!(names, vec!["L1", "L2", "C1"]);
    }

    #[test]
    fn test_bandpass_csv_order() {
        let spec = BandpassSpec::new(ResponseFamily::Butterworth, Coupling::Shunt, 7.1e6, 200e3)
            .with_resonators(2);
        let csv = bandpass_csv(&synthesize_bandpass(&spec).unwrap()).unwrap();
        let names: Vec<&str> = csv
            .lines()
            .skip(1)
            .filter_map(|l| l.split(',').next())
            .collect();
        assert_eq!(names, vec!["Cp1", "Cp2", "L1", "L2", "Cs12"]);
    }

    #[test]
    fn test_response_csv() {
        let points = [
            ResponsePoint {
                frequency_hz: 1e6,
                magnitude_db: -3.0103,
            },
            ResponsePoint {
                frequency_hz: 2.5e6,
                magnitude_db: -24.0,
            },
        ];
        let csv = response_csv(&points).unwrap();
        assert_eq!(csv, "frequency_hz,magnitude_db\n1e+06,-3.01\n2.5e+06,-24.00\n");
    }
}
