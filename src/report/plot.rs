//! ASCII frequency-response plots.
//!
//! Both plots use a logarithmic frequency axis and an adaptive dB axis running
//! from 0 dB down to 5 dB below the deepest point of the sweep (never lower
//! than −60 dB). The response is drawn as filled bars from the curve to the
//! bottom of the plot.

use crate::response::ResponsePoint;
use crate::synthesis::LadderShape;
use crate::units::format_general;

/// Default plot width in characters.
pub const PLOT_WIDTH: usize = 60;

/// Default low-pass/high-pass plot height in lines.
pub const LADDER_PLOT_HEIGHT: usize = 12;

/// Default band-pass plot height in lines.
pub const BANDPASS_PLOT_HEIGHT: usize = 10;

/// Default low-pass/high-pass plot title.
pub const LADDER_PLOT_TITLE: &str = "Frequency Response (dB)";

const MIN_WIDTH: usize = 40;
const MIN_HEIGHT: usize = 6;
const HALF_POWER_DB: f64 = -3.0;
const DB_FLOOR: f64 = -60.0;
const DB_HEADROOM: f64 = 5.0;

/// Crossing marker is shown only when it is this far from the cutoff.
const MARKER_TOLERANCE: f64 = 0.01;

const EMPTY_PLOT: &str = "No data to plot";

/// Frequency label for axes ("14.2M", "500k", "60").
fn compact_frequency(hz: f64) -> String {
    let (scale, suffix) = [(1e9, "G"), (1e6, "M"), (1e3, "k")]
        .into_iter()
        .find(|&(threshold, _)| hz >= threshold)
        .unwrap_or((1.0, ""));
    format!("{}{}", format_general(hz / scale, 3), suffix)
}

fn clamp_index(value: f64, len: usize) -> usize {
    (value as isize).clamp(0, len as isize - 1) as usize
}

fn nonzero(range: f64) -> f64 {
    if range == 0.0 {
        1.0
    } else {
        range
    }
}

/// Mapping from (frequency, dB) to grid cells.
struct Axes {
    freq_min: f64,
    freq_max: f64,
    log_min: f64,
    log_range: f64,
    db_min: f64,
    db_range: f64,
    columns: usize,
    rows: usize,
}

impl Axes {
    const DB_MAX: f64 = 0.0;

    fn new(points: &[ResponsePoint], columns: usize, rows: usize) -> Self {
        let lowest = points
            .iter()
            .map(|p| p.magnitude_db)
            .fold(f64::INFINITY, f64::min);
        let db_min = (lowest - DB_HEADROOM).max(DB_FLOOR);

        let freq_min = points
            .iter()
            .map(|p| p.frequency_hz)
            .fold(f64::INFINITY, f64::min);
        let freq_max = points
            .iter()
            .map(|p| p.frequency_hz)
            .fold(f64::NEG_INFINITY, f64::max);
        let log_min = if freq_min > 0.0 { freq_min.log10() } else { 0.0 };
        let log_max = if freq_max > 0.0 { freq_max.log10() } else { 1.0 };

        Self {
            freq_min,
            freq_max,
            log_min,
            log_range: nonzero(log_max - log_min),
            db_min,
            db_range: nonzero(Self::DB_MAX - db_min),
            columns,
            rows,
        }
    }

    /// Unclamped fractional position of `hz` across `span` columns.
    fn position(&self, hz: f64, span: usize) -> f64 {
        (hz.log10() - self.log_min) / self.log_range * span as f64
    }

    fn column(&self, hz: f64) -> usize {
        clamp_index(self.position(hz, self.columns - 1), self.columns)
    }

    fn row(&self, db: f64) -> usize {
        clamp_index(
            (Self::DB_MAX - db) / self.db_range * (self.rows - 1) as f64,
            self.rows,
        )
    }

    fn contains(&self, hz: f64) -> bool {
        (self.freq_min..=self.freq_max).contains(&hz)
    }
}

struct Grid(Vec<Vec<char>>);

impl Grid {
    fn new(axes: &Axes) -> Self {
        Self(vec![vec![' '; axes.columns]; axes.rows])
    }

    /// Fill each sample's column from the curve down to the bottom row.
    fn fill_curve(&mut self, axes: &Axes, points: &[ResponsePoint]) {
        for p in points.iter().filter(|p| p.frequency_hz > 0.0) {
            let col = axes.column(p.frequency_hz);
            for row in axes.row(p.magnitude_db)..axes.rows {
                self.0[row][col] = '█';
            }
        }
    }

    fn line(&self, row: usize) -> String {
        self.0[row].iter().collect()
    }
}

/// Interpolated −3 dB crossing, searched falling (low-pass) or rising
/// (high-pass).
fn half_power_crossing(points: &[ResponsePoint], rising: bool) -> Option<f64> {
    points.windows(2).find_map(|pair| {
        let (a, b) = (pair[0], pair[1]);
        let crosses = if rising {
            a.magnitude_db < HALF_POWER_DB && b.magnitude_db >= HALF_POWER_DB
        } else {
            a.magnitude_db >= HALF_POWER_DB && b.magnitude_db < HALF_POWER_DB
        };
        if !crosses {
            return None;
        }
        if a.magnitude_db == b.magnitude_db {
            return Some(if rising { b.frequency_hz } else { a.frequency_hz });
        }
        let ratio = (HALF_POWER_DB - a.magnitude_db) / (b.magnitude_db - a.magnitude_db);
        let (log_a, log_b) = (a.frequency_hz.log10(), b.frequency_hz.log10());
        Some(10f64.powf(log_a + ratio * (log_b - log_a)))
    })
}

fn spaces(count: isize) -> String {
    " ".repeat(count.max(0) as usize)
}

/// Low-pass/high-pass response plot with a dotted −3 dB reference.
///
/// When the interpolated −3 dB crossing lies more than 1% from
/// `cutoff_hz` (Chebyshev), it is marked with `●` on the curve and `▲` on
/// the frequency axis.
pub fn ladder_plot(
    points: &[ResponsePoint],
    cutoff_hz: f64,
    shape: LadderShape,
    title: &str,
    width: usize,
    height: usize,
) -> String {
    if points.is_empty() {
        return EMPTY_PLOT.to_string();
    }
    let width = width.max(MIN_WIDTH);
    let height = height.max(MIN_HEIGHT);
    let axes = Axes::new(points, width - 8, height - 2);
    let mut grid = Grid::new(&axes);

    let row_3db = axes.row(HALF_POWER_DB);
    let marker = half_power_crossing(points, shape == LadderShape::HighPass)
        .filter(|&f| f > 0.0 && ((f - cutoff_hz) / cutoff_hz).abs() > MARKER_TOLERANCE)
        .map(|f| (f, axes.column(f)));

    for (col, cell) in grid.0[row_3db].iter_mut().enumerate() {
        if *cell == ' ' && col % 2 == 0 {
            *cell = '·';
        }
    }
    grid.fill_curve(&axes, points);
    if let Some((_, col)) = marker {
        grid.0[row_3db][col] = '●';
    }

    let mut lines = vec![title.to_string(), String::new()];
    let last_row = axes.rows - 1;
    for row in 0..axes.rows {
        let db = Axes::DB_MAX - (row as f64 / last_row as f64) * (Axes::DB_MAX - axes.db_min);
        let label = if row == row_3db {
            "   -3 │".to_string()
        } else if row == 0 {
            format!("{:5.0} │", db)
        } else if row == last_row {
            format!("{:5.0} │", axes.db_min)
        } else if row == axes.rows / 2 && row.abs_diff(row_3db) > 1 {
            format!("{:5.0} │", (Axes::DB_MAX + axes.db_min) / 2.0)
        } else {
            "      │".to_string()
        };
        lines.push(label + &grid.line(row));
    }

    let mut x_axis = vec!['─'; axes.columns];
    for decade in -1..=1 {
        for multiplier in [1.0, 2.0, 5.0] {
            let tick = cutoff_hz * multiplier * 10f64.powi(decade);
            if axes.contains(tick) {
                let col = axes.position(tick, axes.columns - 1) as isize;
                if (0..axes.columns as isize).contains(&col) {
                    x_axis[col as usize] = '┼';
                }
            }
        }
    }
    if let Some((_, col)) = marker {
        x_axis[col] = '▲';
    }
    lines.push(format!("      +{}", x_axis.into_iter().collect::<String>()));

    let low_label = compact_frequency(axes.freq_min);
    let high_label = compact_frequency(axes.freq_max);
    let fc_label = format!("{}(fc)", compact_frequency(cutoff_hz));
    let fc_col = axes.position(cutoff_hz, axes.columns) as isize;
    let len = |s: &str| s.chars().count() as isize;
    lines.push(format!(
        "       {}{}{}{}{}",
        low_label,
        spaces(fc_col - len(&low_label) - len(&fc_label) / 2),
        fc_label,
        spaces(axes.columns as isize - fc_col - len(&fc_label) / 2 - len(&high_label)),
        high_label,
    ));

    if let Some((f_3db, col)) = marker {
        let col = if col == 0 { axes.columns / 2 } else { col };
        lines.push(format!(
            "       {}▲{}(-3dB)",
            " ".repeat(col),
            compact_frequency(f_3db)
        ));
    }

    lines.join("\n")
}

/// Band-pass response plot with a center-frequency marker and band-edge
/// labels.
pub fn bandpass_plot(
    points: &[ResponsePoint],
    center_hz: f64,
    band_edges: (f64, f64),
    title: &str,
    width: usize,
    height: usize,
) -> String {
    if points.is_empty() {
        return EMPTY_PLOT.to_string();
    }
    let width = width.max(MIN_WIDTH);
    let height = height.max(MIN_HEIGHT);
    let axes = Axes::new(points, width, height);
    let mut grid = Grid::new(&axes);

    grid.fill_curve(&axes, points);

    let row_3db = axes.row(HALF_POWER_DB);
    for cell in grid.0[row_3db].iter_mut() {
        if *cell == ' ' {
            *cell = '·';
        }
    }

    if center_hz > 0.0 {
        let col = axes.column(center_hz);
        for row in grid.0.iter_mut() {
            if matches!(row[col], ' ' | '·') {
                row[col] = '│';
            }
        }
        grid.0[row_3db][col] = '┼';
    }

    let mut lines = vec![title.to_string(), String::new()];
    for row in 0..height {
        let label = if row == 0 {
            Some(0)
        } else if row == height - 1 {
            Some(axes.db_min.trunc() as i64)
        } else if row == row_3db {
            Some(HALF_POWER_DB as i64)
        } else {
            None
        };
        let prefix = match label {
            Some(db) => format!("{:4} │", db),
            None => "     │".to_string(),
        };
        lines.push(prefix + &grid.line(row));
    }
    lines.push(format!("     +{}", "─".repeat(width)));

    let (f_low, f_high) = band_edges;
    let labels = [
        format!("     {:>8}", compact_frequency(axes.freq_min)),
        format!("{:>10}", compact_frequency(f_low)),
        format!("{:>8}(f₀)", compact_frequency(center_hz)),
        format!("{:>10}", compact_frequency(f_high)),
        format!("{:>8}", compact_frequency(axes.freq_max)),
    ];
    lines.push(labels.join("  ").chars().take(6 + width).collect());

    lines.join("\n")
}
