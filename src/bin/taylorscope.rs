use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use taylorscope::{
    render, Controls, FormulaStyle, FunctionKind, LogGuard, SampleSet, Sampler, SeriesParameters,
};

/// Compare a function with its truncated Taylor series
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Function to expand: sin, cos, exp or ln
    #[arg(short, long, default_value = "sin")]
    function: FunctionKind,

    /// Term count; the series sums indices up to this value
    #[arg(short, long, default_value_t = 3)]
    terms: usize,

    /// Expansion point
    #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
    center: f64,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Table)]
    format: Format,

    /// Write exponents as unicode superscripts
    #[arg(long)]
    unicode: bool,

    /// Treat ln(1+x) as undefined only at x = 0
    #[arg(long)]
    legacy_log: bool,

    /// Clamp terms and center to the slider bounds of the interactive view
    #[arg(long)]
    ui_bounds: bool,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Formula followed by a table of samples
    Table,
    /// Parameters, formula and samples as JSON
    Json,
    /// Formula only
    Formula,
    /// SVG chart
    Svg,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let log_guard = if args.legacy_log {
        LogGuard::LegacyOrigin
    } else {
        LogGuard::Strict
    };
    let sampler = Sampler::default().with_log_guard(log_guard);

    let params = if args.ui_bounds {
        let mut controls = Controls::new(sampler);
        controls.set_function(args.function);
        controls.set_term_count(args.terms);
        controls.set_center(args.center);
        controls.params()
    } else {
        SeriesParameters::new(args.function, args.terms, args.center)
    };

    let style = if args.unicode {
        FormulaStyle::Unicode
    } else {
        FormulaStyle::Plain
    };

    let output = match args.format {
        Format::Formula => render(&params).to_styled_string(style),
        Format::Table => {
            let formula = render(&params).to_styled_string(style);
            format!("{formula}\n\n{}", table(&sampler.sample(&params)))
        }
        Format::Json => {
            let frame = serde_json::json!({
                "params": params,
                "formula": render(&params).to_styled_string(style),
                "approximation_label": params.approximation_label(),
                "samples": sampler.sample(&params).points(),
            });
            match serde_json::to_string_pretty(&frame) {
                Ok(json) => json,
                Err(e) => fail(&format!("Failed to serialize samples: {e}")),
            }
        }
        Format::Svg => svg(&sampler.sample(&params)),
    };

    match &args.output {
        Some(path) => {
            if let Err(e) = std::fs::write(path, output) {
                fail(&format!("Failed to write {}: {e}", path.display()));
            }
        }
        None => println!("{output}"),
    }
}

fn table(samples: &SampleSet) -> String {
    let cell = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| format!("{v:.6}"));

    let mut out = format!("{:>6} {:>14} {:>14}", "x", "exact", "approx");
    for point in samples {
        out.push_str(&format!(
            "\n{:>6} {:>14} {:>14}",
            point.key(),
            cell(point.exact),
            cell(point.approx)
        ));
    }
    out
}

#[cfg(feature = "plotting")]
fn svg(samples: &SampleSet) -> String {
    use taylorscope::plotting::{render_svg, PlotOptions};
    match render_svg(samples, &PlotOptions::default()) {
        Ok(svg) => svg,
        Err(e) => fail(&format!("Failed to render chart: {e}")),
    }
}

#[cfg(not(feature = "plotting"))]
fn svg(_: &SampleSet) -> String {
    fail("SVG output requires the `plotting` feature")
}

fn fail(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}
