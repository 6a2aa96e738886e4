//! ASCII log-log plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Both axes are logarithmic, matching the classic presentation of P(k) and
//! xi(r); points with non-positive coordinates cannot be drawn on log axes
//! and are skipped.

use crate::error::AppError;

/// Render one series as a log-log ASCII chart.
///
/// The header line carries the axis labels, the drawable ranges and the
/// series legend, so the raster itself needs no annotations.
pub fn render_loglog_ascii(
    series: &[(f64, f64)],
    x_label: &str,
    y_label: &str,
    legend: &str,
    width: usize,
    height: usize,
) -> Result<String, AppError> {
    let width = width.max(10);
    let height = height.max(5);

    let drawable: Vec<(f64, f64)> = series
        .iter()
        .copied()
        .filter(|&(x, y)| x > 0.0 && y > 0.0 && x.is_finite() && y.is_finite())
        .collect();
    if drawable.len() < 2 {
        return Err(AppError::numeric(format!(
            "not enough positive points to draw a log-log plot of {y_label}"
        )));
    }

    let (x_min, x_max) = axis_range(drawable.iter().map(|p| p.0));
    let (y_min, y_max) = axis_range(drawable.iter().map(|p| p.1));

    let mut grid = vec![vec![' '; width]; height];
    let mut prev: Option<(usize, usize)> = None;
    for &(x, y) in &drawable {
        let cx = map_log(x, x_min, x_max, width);
        let cy = height - 1 - map_log(y, y_min, y_max, height);
        if let Some((px, py)) = prev {
            draw_line(&mut grid, px, py, cx, cy, '*');
        } else {
            grid[cy][cx] = '*';
        }
        prev = Some((cx, cy));
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{legend}: {x_label}=[{x_min:.3e}, {x_max:.3e}] | {y_label}=[{y_min:.3e}, {y_max:.3e}] (log-log)\n"
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    Ok(out)
}

fn axis_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        min = min.min(v);
        max = max.max(v);
    }
    if min == max {
        // Degenerate flat series: open up one decade around it.
        (min / 3.0, max * 3.0)
    } else {
        (min, max)
    }
}

fn map_log(v: f64, min: f64, max: f64, cells: usize) -> usize {
    let u = ((v.ln() - min.ln()) / (max.ln() - min.ln())).clamp(0.0, 1.0);
    (u * (cells as f64 - 1.0)).round() as usize
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_expected_dimensions_and_header() {
        let series: Vec<(f64, f64)> = (1..=20)
            .map(|i| {
                let x = i as f64 * 0.05;
                (x, x.powi(-2))
            })
            .collect();
        let txt = render_loglog_ascii(&series, "k", "P(k)", "EisensteinHu linear", 40, 10).unwrap();
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines.len(), 11);
        assert!(lines[0].starts_with("EisensteinHu linear: k="));
        assert!(lines[0].contains("(log-log)"));
        for row in &lines[1..] {
            assert_eq!(row.chars().count(), 40);
        }
    }

    #[test]
    fn power_law_draws_a_straight_diagonal() {
        // y = x^-1 in log-log is a straight line corner-to-corner.
        let series: Vec<(f64, f64)> = (1..=64).map(|i| (i as f64, 1.0 / i as f64)).collect();
        let txt = render_loglog_ascii(&series, "x", "y", "test", 20, 20).unwrap();
        let rows: Vec<&str> = txt.lines().skip(1).collect();
        // Top-left is the largest y (smallest x); bottom-right the smallest.
        assert_eq!(rows[0].chars().next().unwrap(), '*');
        assert_eq!(rows[19].chars().last().unwrap(), '*');
    }

    #[test]
    fn rejects_series_without_positive_points() {
        let series = [(0.0, 1.0), (-1.0, 2.0)];
        assert!(render_loglog_ascii(&series, "x", "y", "test", 20, 10).is_err());
    }
}
