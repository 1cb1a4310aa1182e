//! ASCII schematic diagrams.
//!
//! Ladder diagrams take the series and shunt label prefixes from the caller,
//! so the same drawing serves low-pass (series L) and high-pass (series C).

use crate::synthesis::{Coupling, ElementRole, LadderResult, Topology};

/// Fixed-width character canvas row.
struct Row(Vec<char>);

impl Row {
    fn blank(width: usize) -> Self {
        Self(vec![' '; width])
    }

    /// Write `text` centered on column `center`, clipping at the edges.
    fn place_centered(&mut self, center: usize, text: &str) {
        let len = text.chars().count() as isize;
        let start = center as isize - len / 2;
        for (j, ch) in text.chars().enumerate() {
            let col = start + j as isize;
            if col >= 0 && (col as usize) < self.0.len() {
                self.0[col as usize] = ch;
            }
        }
    }

    fn set(&mut self, col: usize, ch: char) {
        if let Some(slot) = self.0.get_mut(col) {
            *slot = ch;
        }
    }

    fn into_string(self) -> String {
        self.0.into_iter().collect()
    }
}

fn row_with(width: usize, positions: &[usize], items: impl IntoIterator<Item = String>) -> String {
    let mut row = Row::blank(width);
    for (&pos, item) in positions.iter().zip(items) {
        row.place_centered(pos, &item);
    }
    row.into_string()
}

fn junctions(line: &str) -> Vec<usize> {
    line.chars()
        .enumerate()
        .filter(|&(_, c)| c == '┬')
        .map(|(i, _)| i)
        .collect()
}

/// Shunt branches hanging below the junctions of `main_line`.
fn shunt_branches(main_line: String, shunt_count: usize, shunt_label: &str) -> String {
    let width = main_line.chars().count();
    let positions: Vec<usize> = junctions(&main_line).into_iter().take(shunt_count).collect();
    let repeat = |s: &str| vec![s.to_string(); positions.len()];

    [
        main_line,
        row_with(width, &positions, repeat("│")),
        row_with(width, &positions, repeat("===")),
        row_with(
            width,
            &positions,
            (1..=positions.len()).map(|i| format!("{}{}", shunt_label, i)),
        ),
        row_with(width, &positions, repeat("│")),
        row_with(width, &positions, repeat("GND")),
    ]
    .join("\n")
}

/// Pi ladder: shunt, series, shunt, ...
pub fn pi_diagram(
    shunt_count: usize,
    series_count: usize,
    series_label: &str,
    shunt_label: &str,
) -> String {
    let mut parts = vec!["  IN ───┬".to_string()];
    for i in 1..=series_count {
        parts.push(format!("───┤ {}{} ├───┬", series_label, i));
    }
    if shunt_count > series_count {
        parts.push("─── OUT".to_string());
    } else if let Some(last) = parts.last_mut() {
        last.pop();
        last.push_str("─── OUT");
    }
    shunt_branches(parts.concat(), shunt_count, shunt_label)
}

/// T ladder: series, shunt, series, ...
pub fn t_diagram(
    series_count: usize,
    shunt_count: usize,
    series_label: &str,
    shunt_label: &str,
) -> String {
    let mut parts = vec!["  IN ───".to_string()];
    for i in 0..series_count {
        if i > 0 {
            parts.push("───".to_string());
        }
        parts.push(format!("┤{}{}├", series_label, i + 1));
        if i < shunt_count {
            parts.push("───┬".to_string());
        }
    }
    if series_count > shunt_count {
        parts.push("─── OUT".to_string());
    } else if let Some(last) = parts.last_mut() {
        *last = "───┬─── OUT".to_string();
    }
    shunt_branches(parts.concat(), shunt_count, shunt_label)
}

/// Diagram of a synthesized ladder with labels taken from its components.
pub fn ladder_diagram(result: &LadderResult) -> String {
    let components = result.components();
    let count = |role: ElementRole| components.iter().filter(|c| c.role == role).count();
    let prefix = |role: ElementRole| {
        components
            .iter()
            .find(|c| c.role == role)
            .map(|c| c.kind.prefix())
            .unwrap_or("")
    };
    let (series, shunt) = (ElementRole::Series, ElementRole::Shunt);

    match result.spec.topology {
        Topology::Pi => pi_diagram(count(shunt), count(series), prefix(series), prefix(shunt)),
        Topology::T => t_diagram(count(series), count(shunt), prefix(series), prefix(shunt)),
    }
}

/// Parallel LC tanks hanging from the signal line.
fn tank_rows(width: usize, positions: &[usize]) -> Vec<String> {
    let n = positions.len();
    let same = |cell: &str| row_with(width, positions, vec![cell.to_string(); n]);
    vec![
        same("   │   "),
        same("┌──┴──┐"),
        same("│     │"),
        row_with(width, positions, (1..=n).map(|i| format!("Cp{:<2} L{}", i, i))),
        same("│     │"),
        same("└──┬──┘"),
    ]
}

/// Top-C coupled resonators: series coupling capacitors on the signal line.
pub fn top_c_diagram(resonators: usize) -> String {
    const SEGMENT: usize = 15;
    let couplings = resonators.saturating_sub(1);
    let main_line = format!(
        "  IN ──────┬{}────── OUT",
        "──────┤├──────┬".repeat(couplings)
    );
    let width = main_line.chars().count();
    let positions: Vec<usize> = (0..resonators).map(|i| 11 + i * SEGMENT).collect();

    let mut labels = Row::blank(width);
    for i in 0..couplings {
        let mid = (positions[i] + positions[i + 1]) / 2;
        labels.place_centered(mid, &format!("Cs{}{}", i + 1, i + 2));
    }

    let mut lines = vec![labels.into_string(), main_line];
    lines.extend(tank_rows(width, &positions));
    lines.push(row_with(width, &positions, vec!["   │   ".to_string(); resonators]));
    lines.push(row_with(width, &positions, vec!["  GND  ".to_string(); resonators]));
    lines.join("\n")
}

/// Shunt-C coupled resonators: coupling capacitors along a common bottom rail.
pub fn shunt_c_diagram(resonators: usize) -> String {
    const SEGMENT: usize = 13;
    let main_line = format!(
        "  IN ──────┬{}────── OUT",
        "────────────┬".repeat(resonators.saturating_sub(1))
    );
    let width = main_line.chars().count();
    let positions: Vec<usize> = (0..resonators).map(|i| 11 + i * SEGMENT).collect();

    let mut lines = vec![main_line];
    lines.extend(tank_rows(width, &positions));
    lines.push(row_with(width, &positions, vec!["   │   ".to_string(); resonators]));

    let mut rail = Row::blank(width);
    for (i, &pos) in positions.iter().enumerate() {
        let junction = match i {
            0 => '├',
            i if i + 1 == resonators => '┤',
            _ => '┼',
        };
        rail.set(pos, junction);
        if let Some(&next) = positions.get(i + 1) {
            for col in pos + 1..next {
                rail.set(col, '─');
            }
            rail.place_centered((pos + next) / 2, &format!("Cs{}{}", i + 1, i + 2));
        }
    }
    lines.push(rail.into_string());

    let ground = positions.get(resonators / 2).copied().unwrap_or(11);
    let mut wire = Row::blank(width);
    wire.set(ground, '│');
    lines.push(wire.into_string());
    let mut gnd = Row::blank(width);
    gnd.place_centered(ground, "GND");
    lines.push(gnd.into_string());

    lines.join("\n")
}

/// Coupled-resonator diagram for the given coupling style.
pub fn coupled_resonator_diagram(coupling: Coupling, resonators: usize) -> String {
    match coupling {
        Coupling::Top => top_c_diagram(resonators),
        Coupling::Shunt => shunt_c_diagram(resonators),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prototype::ResponseFamily;
    use crate::synthesis::{synthesize_ladder, LadderShape, LadderSpec};

    #[test]
    fn test_pi_lowpass_diagram() {
        let d = pi_diagram(2, 1, "L", "C");
        let lines: Vec<&str> = d.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "  IN ───┬───┤ L1 ├───┬─── OUT");
        assert!(lines[3].contains("C1") && lines[3].contains("C2"));
        assert_eq!(lines[5].matches("GND").count(), 2);
    }

    #[test]
    fn test_pi_with_trailing_series() {
        let d = pi_diagram(2, 2, "L", "C");
        let first = d.lines().next().unwrap();
        assert!(first.ends_with("L2 ├────── OUT"));
        assert_eq!(first.matches('┬').count(), 2);
    }

    #[test]
    fn test_t_diagram() {
        let d = t_diagram(2, 1, "C", "L");
        let first = d.lines().next().unwrap();
        assert_eq!(first, "  IN ───┤C1├───┬───┤C2├─── OUT");
        assert!(d.contains("L1"));
    }

    #[test]
    fn test_ladder_diagram_uses_roles() {
        let spec = LadderSpec::new(LadderShape::HighPass, ResponseFamily::Butterworth, 1e6)
            .with_topology(Topology::T)
            .with_order(3);
        let result = synthesize_ladder(&spec).unwrap();
        let d = ladder_diagram(&result);
        assert!(d.contains("┤C1├") && d.contains("┤C2├"));
        assert!(d.lines().nth(3).unwrap().contains("L1"));
    }

    #[test]
    fn test_coupled_resonator_diagrams() {
        let top = top_c_diagram(3);
        assert!(top.lines().next().unwrap().contains("Cs12"));
        assert!(top.contains("Cs23"));
        assert_eq!(top.matches("GND").count(), 3);
        assert!(top.contains("Cp3"));

        let shunt = shunt_c_diagram(3);
        assert_eq!(shunt.matches("GND").count(), 1);
        assert!(shunt.contains('├') && shunt.contains('┤') && shunt.contains('┼'));
        assert!(shunt.contains("Cs12") && shunt.contains("Cs23"));
    }
}
