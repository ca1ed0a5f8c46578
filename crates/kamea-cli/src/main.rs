mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kamea_core::{
    Coordinate, Polygon, TernaryString, Transform, TransitionEngine, TransitionReport,
    classify_region, decimal_to_ternary, max_value, nuclear_mutation, quadset_values, transition,
};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::config::Config;

#[derive(Parser)]
#[command(name = "kamea", about = "Ternary ditrune algebra and polygon transitions")]
struct Cli {
    /// TOML config file (defaults to $KAMEA_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of plain text
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an integer to ternary digits
    Ternary {
        #[arg(allow_negative_numbers = true)]
        value: i64,

        /// Digit width (defaults to the configured width)
        #[arg(long)]
        width: Option<usize>,
    },

    /// Convert ternary digits to an integer
    Decimal { digits: String },

    /// Digit-wise transition of two ternary strings
    Transition { a: String, b: String },

    /// Reversal, conrune and complex transform of a ternary string
    Transforms { digits: String },

    /// Lattice region containing a coordinate
    Region {
        #[arg(allow_negative_numbers = true)]
        x: i32,
        #[arg(allow_negative_numbers = true)]
        y: i32,
    },

    /// The quadset generated by a value at a coordinate
    Quadset {
        #[arg(allow_negative_numbers = true)]
        x: i32,
        #[arg(allow_negative_numbers = true)]
        y: i32,
        digits: String,
    },

    /// Reduce a six-digit ditrune to its core
    Nuclear {
        digits: String,

        #[arg(long)]
        max_iterations: Option<usize>,
    },

    /// Transitions along a skip group or named pattern of a polygon
    Polygon {
        sides: usize,

        /// Connect every vertex to the one `skip` steps ahead
        #[arg(long, conflicts_with = "pattern", required_unless_present = "pattern")]
        skip: Option<usize>,

        /// Named pattern (see `kamea patterns <sides>`)
        #[arg(long)]
        pattern: Option<String>,

        /// Comma-separated vertex values (defaults to the vertex indices)
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        values: Option<Vec<i64>>,

        /// Draw vertex values uniformly from the ditrune range
        #[arg(long, conflicts_with = "values")]
        random_values: bool,

        /// Seed for --random-values
        #[arg(long, requires = "random_values")]
        seed: Option<u64>,
    },

    /// List named patterns registered for a polygon size
    Patterns { sides: usize },
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::load(cli.config.as_deref())?;
    if cli.json {
        config.json = true;
    }

    match &cli.command {
        Commands::Ternary { value, width } => cmd_ternary(&config, *value, *width),
        Commands::Decimal { digits } => cmd_decimal(&config, digits),
        Commands::Transition { a, b } => cmd_transition(&config, a, b),
        Commands::Transforms { digits } => cmd_transforms(&config, digits),
        Commands::Region { x, y } => cmd_region(&config, *x, *y),
        Commands::Quadset { x, y, digits } => cmd_quadset(&config, *x, *y, digits),
        Commands::Nuclear {
            digits,
            max_iterations,
        } => cmd_nuclear(&config, digits, *max_iterations),
        Commands::Polygon {
            sides,
            skip,
            pattern,
            values,
            random_values,
            seed,
        } => {
            let values = match (values, *random_values) {
                (Some(values), _) => Some(values.clone()),
                (None, true) => Some(random_vertex_values(*sides, config.width, *seed)?),
                (None, false) => None,
            };
            cmd_polygon(&config, *sides, *skip, pattern.as_deref(), values.as_deref())
        }
        Commands::Patterns { sides } => cmd_patterns(&config, *sides),
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Print `value` as pretty JSON, or the plain-text rendering.
fn emit<T: Serialize>(config: &Config, value: &T, text: impl FnOnce() -> String) -> Result<()> {
    if config.json {
        let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
        println!("{json}");
    } else {
        println!("{}", text());
    }
    Ok(())
}

fn parse_digits(digits: &str) -> Result<TernaryString> {
    digits
        .parse()
        .with_context(|| format!("invalid ternary string '{digits}'"))
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct Conversion {
    value: u64,
    ternary: TernaryString,
}

fn cmd_ternary(config: &Config, value: i64, width: Option<usize>) -> Result<()> {
    let width = width.unwrap_or(config.width);
    tracing::info!("converting {value} at width {width}");
    let ternary = decimal_to_ternary(value, width)?;
    let out = Conversion {
        value: ternary.to_decimal(),
        ternary,
    };
    emit(config, &out, || out.ternary.to_string())
}

fn cmd_decimal(config: &Config, digits: &str) -> Result<()> {
    let ternary = parse_digits(digits)?;
    let out = Conversion {
        value: ternary.to_decimal(),
        ternary,
    };
    emit(config, &out, || out.value.to_string())
}

#[derive(Serialize)]
struct TransitionOutput {
    a: TernaryString,
    b: TernaryString,
    result: TernaryString,
    decimal: u64,
}

fn cmd_transition(config: &Config, a: &str, b: &str) -> Result<()> {
    let a = parse_digits(a)?;
    let b = parse_digits(b)?;
    let result = transition(&a, &b);
    tracing::debug!("transition {a} x {b} = {result}");
    let out = TransitionOutput {
        decimal: result.to_decimal(),
        a,
        b,
        result,
    };
    emit(config, &out, || {
        format!("result:     {}\ndecimal:    {}", out.result, out.decimal)
    })
}

#[derive(Serialize)]
struct TransformOutput {
    transform: Transform,
    ternary: TernaryString,
    decimal: u64,
}

fn cmd_transforms(config: &Config, digits: &str) -> Result<()> {
    let value = parse_digits(digits)?;
    let out: Vec<TransformOutput> = Transform::ALL
        .iter()
        .map(|&transform| {
            let ternary = transform.apply(&value);
            TransformOutput {
                transform,
                decimal: ternary.to_decimal(),
                ternary,
            }
        })
        .collect();
    emit(config, &out, || {
        out.iter()
            .map(|o| format!("{:<18} {} ({})", o.transform.as_str(), o.ternary, o.decimal))
            .collect::<Vec<_>>()
            .join("\n")
    })
}

fn cmd_region(config: &Config, x: i32, y: i32) -> Result<()> {
    let region = classify_region(x, y)?;
    emit(config, region, || {
        format!(
            "region:     {}\nbigram:     {}\nx range:    [{}, {}]\ny range:    [{}, {}]",
            region.name,
            region.bigram,
            region.x_range.0,
            region.x_range.1,
            region.y_range.0,
            region.y_range.1,
        )
    })
}

#[derive(Serialize)]
struct QuadsetCell {
    coordinate: Coordinate,
    value: TernaryString,
    decimal: u64,
}

fn cmd_quadset(config: &Config, x: i32, y: i32, digits: &str) -> Result<()> {
    let value = parse_digits(digits)?;
    let cells: Vec<QuadsetCell> = quadset_values(x, y, &value)?
        .into_iter()
        .map(|(coordinate, value)| QuadsetCell {
            coordinate,
            decimal: value.to_decimal(),
            value,
        })
        .collect();
    tracing::debug!("quadset at ({x}, {y}) has {} distinct cells", cells.len());
    emit(config, &cells, || {
        cells
            .iter()
            .map(|c| format!("{:<10} {} ({})", c.coordinate.to_string(), c.value, c.decimal))
            .collect::<Vec<_>>()
            .join("\n")
    })
}

fn cmd_nuclear(config: &Config, digits: &str, max_iterations: Option<usize>) -> Result<()> {
    let value = parse_digits(digits)?;
    let limit = max_iterations.unwrap_or(config.max_iterations);
    let result = nuclear_mutation(&value, limit)?;
    emit(config, &result, || {
        format!(
            "core:       {} ({})\nclass:      {}\niterations: {}\nreason:     {}",
            result.core_value,
            result.core_value.to_decimal(),
            result.hierarchy_class.as_str(),
            result.iterations,
            result.terminal_reason.as_str(),
        )
    })
}

fn random_vertex_values(sides: usize, width: usize, seed: Option<u64>) -> Result<Vec<i64>> {
    let engine = TransitionEngine::new(width)?;
    let max = i64::try_from(max_value(engine.width())).unwrap_or(i64::MAX);
    let mut rng = match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };
    Ok((0..sides).map(|_| rng.random_range(0..=max)).collect())
}

fn cmd_polygon(
    config: &Config,
    sides: usize,
    skip: Option<usize>,
    pattern: Option<&str>,
    values: Option<&[i64]>,
) -> Result<()> {
    let engine = TransitionEngine::new(config.width)?;
    let polygon = Polygon::new(sides, values)?;
    tracing::info!("polygon with {sides} sides at width {}", engine.width());

    let report = match (skip, pattern) {
        (Some(skip), _) => engine.skip_report(&polygon, skip)?,
        (None, Some(name)) => engine
            .pattern_report(&polygon, name)?
            .with_context(|| format!("no pattern named '{name}' for {sides} sides"))?,
        (None, None) => anyhow::bail!("either --skip or --pattern is required"),
    };
    tracing::debug!("{} transitions generated", report.transitions.len());

    emit(config, &report, || render_report(&report))
}

fn render_report(report: &TransitionReport) -> String {
    let mut lines = vec![format!("{} ({} sides)", report.label, report.sides)];
    for t in &report.transitions {
        lines.push(format!(
            "{:>3} -> {:<3} {} x {} = {} ({})",
            t.from_index,
            t.to_index,
            t.from_ternary,
            t.to_ternary,
            t.result_ternary,
            t.result_decimal
        ));
    }
    let s = &report.summary;
    lines.push(format!(
        "count={}, sum={}, mean={:.2}, min={}, max={}, unique={}",
        s.count, s.sum, s.mean, s.min, s.max, s.unique_count
    ));
    lines.join("\n")
}

fn cmd_patterns(config: &Config, sides: usize) -> Result<()> {
    let engine = TransitionEngine::new(config.width)?;
    let patterns = engine.special_patterns(sides);
    emit(config, &patterns, || {
        if patterns.is_empty() {
            return format!("(no patterns for {sides} sides)");
        }
        patterns
            .iter()
            .map(|p| format!("{:<20} {} edges  {}", p.name, p.edges.len(), p.description))
            .collect::<Vec<_>>()
            .join("\n")
    })
}
