//! SVG charts of sampled series
//!
//! Draws the exact function and the truncated series of a [`SampleSet`] as two line
//! series, using the SVG backend of [`plotters`].
//! - Missing values leave a gap in the line
//! - The y-axis follows the exact function; the approximation is clipped to it
//!
//! Everything is coerced to `f64` for plotting purposes.
//!
//! ```
//! # use taylorscope::{plotting::{render_svg, PlotOptions}, sample, SeriesParameters};
//! let samples = sample(&SeriesParameters::<f64>::default());
//! let svg = render_svg(&samples, &PlotOptions::default()).unwrap();
//! assert!(svg.contains("Taylor approx. (3 terms)"));
//! ```
use std::{ops::Range, path::Path};

use plotters::{coord::Shift, prelude::*};

use crate::{sampler::SampleSet, value::Value};

pub use plotters;

const EXACT_COLOR: RGBColor = RGBColor(0x88, 0x84, 0xd8);
const APPROX_COLOR: RGBColor = RGBColor(0x82, 0xca, 0x9d);

/// Legend label of the exact series
pub const EXACT_LABEL: &str = "Exact function";

/// Fraction of the y span added above and below the exact values
const Y_MARGIN: f64 = 0.1;

/// Options for plotting
#[derive(Debug, Clone, PartialEq)]
pub struct PlotOptions {
    /// Caption for the plot. The function's label is used if empty
    pub title: String,

    /// Size of the output image in pixels
    pub size: (u32, u32),

    /// X-axis range. Defaults to the sampled domain
    pub x_range: Option<Range<f64>>,

    /// Y-axis range. Defaults to the range of the exact values, with a margin
    pub y_range: Option<Range<f64>>,

    /// Whether to hide the legend
    pub hide_legend: bool,
}
impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            title: String::new(),
            size: (640, 480),
            x_range: None,
            y_range: None,
            hide_legend: false,
        }
    }
}

/// Renders the samples as an SVG document
///
/// # Errors
/// Returns an error if a value cannot be represented as `f64`, or if drawing fails.
pub fn render_svg<T: Value>(samples: &SampleSet<T>, options: &PlotOptions) -> Result<String, Error> {
    let mut buffer = String::new();
    {
        let root = SVGBackend::with_string(&mut buffer, options.size).into_drawing_area();
        draw(&root, samples, options)?;
        root.present()?;
    }

    log::debug!("rendered {} byte chart", buffer.len());
    Ok(buffer)
}

/// Renders the samples as an SVG file at `path`
///
/// # Errors
/// Returns an error if rendering fails or the file cannot be written.
pub fn write_svg<T: Value>(
    samples: &SampleSet<T>,
    options: &PlotOptions,
    path: impl AsRef<Path>,
) -> Result<(), Error> {
    let svg = render_svg(samples, options)?;
    std::fs::write(path, svg)?;
    Ok(())
}

fn draw<T: Value>(
    root: &DrawingArea<SVGBackend<'_>, Shift>,
    samples: &SampleSet<T>,
    options: &PlotOptions,
) -> Result<(), Error> {
    let exact = samples
        .exact_series()
        .into_iter()
        .map(as_f64)
        .collect::<Result<Vec<_>, _>>()?;
    let approx = samples
        .approx_series()
        .into_iter()
        .map(as_f64)
        .collect::<Result<Vec<_>, _>>()?;

    //
    // Ranges, unless overridden
    let x_range = match (&options.x_range, samples.x_range()) {
        (Some(range), _) => range.clone(),
        (None, Some(range)) => cast(range.start)?..cast(range.end)?,
        (None, None) => 0.0..1.0,
    };
    let y_range = match (&options.y_range, samples.exact_range()) {
        (Some(range), _) => range.clone(),
        (None, Some(range)) => padded(cast(range.start)?..cast(range.end)?),
        (None, None) => -1.0..1.0,
    };

    for range in [&x_range, &y_range] {
        if !range.start.is_finite() || !range.end.is_finite() {
            return Err(Error::InvalidRange(format!("{}..{}", range.start, range.end)));
        }
    }

    // A reversed override flips the axis; clipping still needs ordered bounds
    let (y_min, y_max) = (y_range.start.min(y_range.end), y_range.start.max(y_range.end));

    let title = if options.title.is_empty() {
        samples.params().descriptor().label.to_string()
    } else {
        options.title.clone()
    };

    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(root);
    chart
        .margin(5)
        .x_label_area_size(30)
        .y_label_area_size(60)
        .caption(title, (FontFamily::SansSerif, 16).into_font());
    let mut chart = chart.build_cartesian_2d(x_range, y_range.clone())?;

    chart
        .configure_mesh()
        .label_style((FontFamily::SansSerif, 12))
        .draw()?;

    let approx_label = samples.params().approximation_label();
    let lines = [
        (exact, EXACT_COLOR, EXACT_LABEL),
        (approx, APPROX_COLOR, approx_label.as_str()),
    ];
    for (runs, color, label) in lines {
        let style = ShapeStyle::from(&color).stroke_width(2);
        for (i, run) in runs.into_iter().enumerate() {
            let run = run
                .into_iter()
                .map(|(x, y)| (x, y.clamp(y_min, y_max)));
            let annotation = chart.draw_series(LineSeries::new(run, style))?;

            // One legend entry per series, not per segment
            if i == 0 {
                annotation
                    .label(label)
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
            }
        }
    }

    if !options.hide_legend {
        chart
            .configure_series_labels()
            .label_font((FontFamily::SansSerif, 10))
            .background_style(WHITE.mix(0.5))
            .border_style(BLACK)
            .position(SeriesLabelPosition::UpperRight)
            .draw()?;
    }

    Ok(())
}

fn padded(range: Range<f64>) -> Range<f64> {
    let span = range.end - range.start;
    let margin = if span > 0.0 { span * Y_MARGIN } else { 1.0 };
    (range.start - margin)..(range.end + margin)
}

fn as_f64<T: Value>(run: Vec<(T, T)>) -> Result<Vec<(f64, f64)>, Error> {
    run.into_iter()
        .map(|(x, y)| Ok((cast(x)?, cast(y)?)))
        .collect()
}

fn cast<T: Value>(value: T) -> Result<f64, Error> {
    num_traits::cast(value).ok_or(Error::Cast)
}

/// Error occurring during plotting
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error drawing the plot
    #[error("Error drawing plot: {0}")]
    Draw(#[from] DrawingAreaErrorKind<std::io::Error>),

    /// Error casting a value
    #[error("A value could not be represented as f64")]
    Cast,

    /// An axis range has a non-finite bound
    #[error("Axis range must be finite, got {0}")]
    InvalidRange(String),

    /// Error writing the plot to disk
    #[error("Error writing plot: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{sample, FunctionKind, SeriesParameters};

    #[test]
    fn test_render_contains_both_series() {
        let samples = sample(&SeriesParameters::new(FunctionKind::Cosine, 4, 0.0_f64));
        let svg = render_svg(&samples, &PlotOptions::default()).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains(EXACT_LABEL));
        assert!(svg.contains("Taylor approx. (4 terms)"));
        assert!(svg.contains("cos(x)"));
    }

    #[test]
    fn test_render_with_gaps() {
        let samples = sample(&SeriesParameters::new(FunctionKind::NaturalLogShifted, 5, 2.0_f64));
        assert_eq!(samples.approx_series().len(), 1);

        let options = PlotOptions {
            title: "log".into(),
            hide_legend: true,
            ..Default::default()
        };
        let svg = render_svg(&samples, &options).unwrap();
        assert!(svg.contains("log"));
        assert!(!svg.contains(EXACT_LABEL));
    }

    #[test]
    fn test_reversed_y_range_is_clipped() {
        let samples = sample(&SeriesParameters::new(FunctionKind::Sine, 3, 0.0_f64));
        let options = PlotOptions {
            y_range: Some(2.0..-2.0),
            ..Default::default()
        };
        let svg = render_svg(&samples, &options).unwrap();
        assert!(svg.contains(EXACT_LABEL));
    }

    #[test]
    fn test_non_finite_range_is_rejected() {
        let samples = sample(&SeriesParameters::new(FunctionKind::Sine, 3, 0.0_f64));
        let options = PlotOptions {
            y_range: Some(f64::NAN..1.0),
            ..Default::default()
        };
        let err = render_svg(&samples, &options).unwrap_err();
        assert!(matches!(err, Error::InvalidRange(_)));

        let options = PlotOptions {
            x_range: Some(0.0..f64::INFINITY),
            ..Default::default()
        };
        assert!(matches!(render_svg(&samples, &options), Err(Error::InvalidRange(_))));
    }

    #[test]
    fn test_padded() {
        assert_eq!(padded(0.0..10.0), -1.0..11.0);
        assert_eq!(padded(2.0..2.0), 1.0..3.0);
    }

    #[test]
    fn test_write_svg() {
        let path = std::env::temp_dir().join("taylorscope_write_svg.svg");
        let samples = sample(&SeriesParameters::<f64>::default());
        write_svg(&samples, &PlotOptions::default(), &path).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("sin(x)"));
        std::fs::remove_file(path).ok();
    }
}
