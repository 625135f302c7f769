//! Histogram and rotary spectrum figures

use crate::analysis::histogram::Histogram;
use crate::analysis::statistics::Metric;
use crate::io::canvas::{Canvas, Scale};
use crate::io::configuration::{
    ANTICYCLONE_COLOR, AXIS_COLOR, BACKGROUND_COLOR, CLOCKWISE_COLOR, COUNTERCLOCKWISE_COLOR,
    CYCLONE_COLOR, FIGURE_HEIGHT, FIGURE_MARGIN, FIGURE_WIDTH, MARKER_COLOR,
};
use crate::io::error::{Result, invalid_parameter};
use crate::math::spectrum::RotarySpectrum;

// Densities this far below the peak are clipped from the spectrum axis
const SPECTRUM_DYNAMIC_RANGE: f64 = 1e8;
// Density axis of a spectrum without energy
const SILENT_SPECTRUM_AXIS: (f64, f64) = (1e-8, 1.0);

fn metric_title(metric: Metric) -> String {
    match metric.units() {
        "-" => metric.label().to_owned(),
        units => format!("{} ({units})", metric.label()),
    }
}

/// Side-by-side cyclone and anticyclone bars of `metric` on shared bins
///
/// Each bin is split in two: the left half holds the cyclone count, the right
/// half the anticyclone count. The x axis is titled with the metric and its units.
///
/// # Errors
///
/// Returns an error if the histograms don't share the same edges
pub fn histogram_figure(
    metric: Metric,
    cyclones: &Histogram,
    anticyclones: &Histogram,
) -> Result<Canvas> {
    if cyclones.edges != anticyclones.edges {
        return Err(invalid_parameter(
            "histograms",
            &format!("{} and {} bins", cyclones.bins(), anticyclones.bins()),
            &"cyclone and anticyclone histograms must share bin edges",
        ));
    }

    let top = cyclones.max_count().max(anticyclones.max_count()).max(1) as f64 * 1.1;
    let mut canvas = Canvas::new(
        FIGURE_WIDTH,
        FIGURE_HEIGHT,
        FIGURE_MARGIN,
        BACKGROUND_COLOR,
        Scale::linear(cyclones.min(), cyclones.max()),
        Scale::linear(0.0, top),
    );

    for (pair, (&cyclonic, &anticyclonic)) in cyclones
        .edges
        .windows(2)
        .zip(cyclones.counts.iter().zip(&anticyclones.counts))
    {
        if let [low, high] = pair {
            let middle = f64::midpoint(*low, *high);
            canvas.bar(*low, middle, cyclonic as f64, CYCLONE_COLOR);
            canvas.bar(middle, *high, anticyclonic as f64, ANTICYCLONE_COLOR);
        }
    }

    canvas.draw_axes(AXIS_COLOR);
    canvas.draw_titles(&metric_title(metric), "tracks", AXIS_COLOR);
    canvas.draw_legend(
        &[("cyclonic", CYCLONE_COLOR), ("anticyclonic", ANTICYCLONE_COLOR)],
        AXIS_COLOR,
    );
    Ok(canvas)
}

/// Log-log plot of both rotary branches with dashed markers at `markers` (cpd)
///
/// A spectrum without positive density, such as that of a constant record, is
/// drawn flat along the bottom of a nominal density axis.
///
/// # Errors
///
/// Returns an error if the spectrum has no frequencies
pub fn spectrum_figure(spectrum: &RotarySpectrum, markers: &[f64]) -> Result<Canvas> {
    let peak = spectrum
        .clockwise
        .iter()
        .chain(&spectrum.counterclockwise)
        .copied()
        .filter(|value| value.is_finite())
        .fold(0.0, f64::max);
    let (floor, peak) = if peak > 0.0 {
        let lowest = spectrum
            .clockwise
            .iter()
            .chain(&spectrum.counterclockwise)
            .copied()
            .filter(|value| *value > 0.0)
            .fold(peak, f64::min)
            .max(peak / SPECTRUM_DYNAMIC_RANGE);
        (lowest, peak)
    } else {
        SILENT_SPECTRUM_AXIS
    };

    let (Some(&f_min), Some(&f_max)) = (spectrum.frequencies.first(), spectrum.frequencies.last())
    else {
        return Err(invalid_parameter("spectrum", &0, &"no frequencies"));
    };
    let f_max = if f_max > f_min { f_max } else { f_min * 10.0 };
    let y_max = if peak > floor { peak } else { floor * 10.0 };

    let mut canvas = Canvas::new(
        FIGURE_WIDTH,
        FIGURE_HEIGHT,
        FIGURE_MARGIN,
        BACKGROUND_COLOR,
        Scale::log(f_min, f_max),
        Scale::log(floor, y_max),
    );

    for &marker in markers {
        canvas.vertical_marker(marker, MARKER_COLOR);
    }

    let clip = |value: f64| value.max(floor);
    let counterclockwise: Vec<(f64, f64)> = spectrum
        .frequencies
        .iter()
        .zip(&spectrum.counterclockwise)
        .map(|(&f, &density)| (f, clip(density)))
        .collect();
    let clockwise: Vec<(f64, f64)> = spectrum
        .frequencies
        .iter()
        .zip(&spectrum.clockwise)
        .map(|(&f, &density)| (f, clip(density)))
        .collect();

    canvas.plot_line(&counterclockwise, COUNTERCLOCKWISE_COLOR);
    canvas.plot_line(&clockwise, CLOCKWISE_COLOR);
    canvas.draw_axes(AXIS_COLOR);
    canvas.draw_titles("frequency (cpd)", "PSD ((m/s)\u{b2}/cpd)", AXIS_COLOR);
    canvas.draw_legend(
        &[
            ("clockwise", CLOCKWISE_COLOR),
            ("counter-clockwise", COUNTERCLOCKWISE_COLOR),
        ],
        AXIS_COLOR,
    );
    Ok(canvas)
}
