//! SVG figures rendered with Plotters.
//!
//! One figure per sweep, written into `work_dir`. Axes are logarithmic on
//! both sides, matching the terminal plots; points with non-positive values
//! are dropped since they have no log-log representation.

use std::path::{Path, PathBuf};

use plotters::prelude::*;

use crate::error::AppError;

const FIGURE_SIZE: (u32, u32) = (900, 600);
const MARGIN: i32 = 24;
const LABEL_AREA: i32 = 60;

/// Write a single-series log-log SVG chart to `path`.
pub fn write_loglog_svg(
    path: &Path,
    series: &[(f64, f64)],
    title: &str,
    x_label: &str,
    y_label: &str,
    legend: &str,
) -> Result<(), AppError> {
    let drawable: Vec<(f64, f64)> = series
        .iter()
        .copied()
        .filter(|&(x, y)| x > 0.0 && y > 0.0 && x.is_finite() && y.is_finite())
        .collect();
    if drawable.len() < 2 {
        return Err(AppError::numeric(format!(
            "not enough positive points to draw a log-log figure of {y_label}"
        )));
    }

    let (x_min, x_max) = range_of(drawable.iter().map(|p| p.0));
    let (y_min, y_max) = range_of(drawable.iter().map(|p| p.1));

    let root = SVGBackend::new(path, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| AppError::config(format!("failed to draw '{}': {e}", path.display())))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(MARGIN)
        .x_label_area_size(LABEL_AREA)
        .y_label_area_size(LABEL_AREA + 20)
        .build_cartesian_2d((x_min..x_max).log_scale(), (y_min..y_max).log_scale())
        .map_err(|e| AppError::config(format!("failed to build chart '{}': {e}", path.display())))?;

    chart
        .configure_mesh()
        .x_desc(x_label)
        .y_desc(y_label)
        .draw()
        .map_err(|e| AppError::config(format!("failed to draw axes '{}': {e}", path.display())))?;

    chart
        .draw_series(LineSeries::new(drawable, &BLUE))
        .map_err(|e| AppError::config(format!("failed to draw series '{}': {e}", path.display())))?
        .label(legend)
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .draw()
        .map_err(|e| AppError::config(format!("failed to draw legend '{}': {e}", path.display())))?;

    root.present()
        .map_err(|e| AppError::config(format!("failed to write '{}': {e}", path.display())))?;
    Ok(())
}

/// File name for a figure, slugged from the run label.
pub fn figure_path(work_dir: &Path, label: &str, quantity: &str) -> PathBuf {
    let slug: String = label
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    work_dir.join(format!("{slug}_{quantity}.svg"))
}

fn range_of(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        min = min.min(v);
        max = max.max(v);
    }
    if min == max {
        (min / 3.0, max * 3.0)
    } else {
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn figure_path_slugs_the_label() {
        let path = figure_path(Path::new("/tmp/out"), "EH98 z=0.2", "pk");
        assert_eq!(path, PathBuf::from("/tmp/out/eh98-z-0-2_pk.svg"));
    }

    #[test]
    fn writes_a_figure_with_both_axes() {
        let dir = std::env::temp_dir().join("cosmo-svg-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("pk.svg");
        let series: Vec<(f64, f64)> = (1..=50)
            .map(|i| {
                let k = i as f64 * 0.01;
                (k, 1e4 * k.powf(-1.5))
            })
            .collect();
        write_loglog_svg(&path, &series, "P(k)", "k [h/Mpc]", "P(k)", "test").unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("k [h/Mpc]"));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn rejects_degenerate_series() {
        let path = std::env::temp_dir().join("cosmo-svg-reject.svg");
        let err = write_loglog_svg(&path, &[(1.0, 2.0)], "t", "x", "y", "l").unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
