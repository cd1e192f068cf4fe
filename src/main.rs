//! logit-mle: fit a logistic regression to a CSV file and report on it.
//!
//! Pipeline: read the label and feature columns, fit by maximum likelihood,
//! optionally cross-check against an IRLS GLM fit, then optionally score a
//! prediction grid and write its summary table and grouped bar chart.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use logit_mle::{
    data::read_labeled_csv,
    logistic::fit,
    optimization::optimizer::{LineSearcher, OptimizerOptions, SolverKind, Tolerances},
    reference::{compare_coefficients, fit_glm, GlmOptions},
    report::{render_grouped_bar_chart, GridAxis, GridSummary, PredictionGrid},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "logit-mle")]
#[command(about = "Logistic regression by maximum likelihood, with a GLM cross-check")]
#[command(version)]
struct Cli {
    /// CSV file with a header row
    #[arg(short, long)]
    data: PathBuf,

    /// Binary outcome column (0/1 or true/false)
    #[arg(short, long)]
    label: String,

    /// Predictor columns, in model order
    #[arg(short, long, value_delimiter = ',', required = true)]
    features: Vec<String>,

    /// Solver: lbfgs or steepest_descent
    #[arg(long, default_value = "lbfgs")]
    solver: String,

    /// Line search: MoreThuente or HagerZhang
    #[arg(long, default_value = "MoreThuente")]
    line_search: String,

    /// Gradient-norm tolerance
    #[arg(long, default_value_t = 1e-6)]
    tol_grad: f64,

    /// Cost-change tolerance
    #[arg(long)]
    tol_cost: Option<f64>,

    /// Iteration cap
    #[arg(long, default_value_t = 500)]
    max_iter: usize,

    /// L-BFGS history length
    #[arg(long)]
    lbfgs_mem: Option<usize>,

    /// Attach the per-iteration observer (needs the obs_slog feature)
    #[arg(short, long)]
    verbose: bool,

    /// Also fit by IRLS and compare coefficients
    #[arg(long)]
    compare_glm: bool,

    /// Decimal places the GLM comparison must agree to
    #[arg(long, default_value_t = 3)]
    decimals: u32,

    /// Grid x axis, `NAME=v1,v2,...` or `NAME=start:stop:step`
    #[arg(long, requires = "group")]
    x_axis: Option<String>,

    /// Grid grouping axis, same syntax as --x-axis
    #[arg(long, requires = "x_axis")]
    group: Option<String>,

    /// Other grid axes, each held at a single value (`NAME=value`)
    #[arg(long)]
    hold: Vec<String>,

    /// Write the grouped bar chart here (SVG)
    #[arg(long, requires = "x_axis")]
    chart: Option<PathBuf>,

    /// Write the grid summary here (CSV)
    #[arg(long, requires = "x_axis")]
    summary_csv: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let table = read_labeled_csv(&cli.data, &cli.label, &cli.features)
        .with_context(|| format!("reading {}", cli.data.display()))?;

    let opts = optimizer_options(cli)?;
    let model = fit(&table.features, &table.labels, &opts).context("fitting logistic regression")?;
    println!("{model}");

    match model.standard_errors() {
        Ok(se) => {
            println!("\nstandard errors:");
            for ((term, _), s) in model.coefficients().iter().zip(se.iter()) {
                println!("  {term:<16} {s:>12.6}");
            }
        }
        Err(e) => tracing::warn!(error = %e, "standard errors unavailable"),
    }

    if cli.compare_glm {
        let glm = fit_glm(&table.features, &table.labels, &GlmOptions::default())
            .context("fitting IRLS reference")?;
        println!("\n{glm}");
        let cmp = compare_coefficients(
            model.coefficients().values().view(),
            glm.coefficients.view(),
            cli.decimals,
        )?
        .with_terms(&glm.terms)?;
        println!("\n{cmp}");
        info!(matches = cmp.matches(), max_abs_diff = cmp.max_abs_diff(), "GLM comparison");
    }

    if let (Some(x_axis), Some(group)) = (&cli.x_axis, &cli.group) {
        let x: GridAxis = x_axis.parse()?;
        let g: GridAxis = group.parse()?;
        let (x_name, g_name) = (x.name().to_string(), g.name().to_string());
        let mut axes = vec![x, g];
        for text in &cli.hold {
            let axis: GridAxis = text.parse()?;
            if axis.len() != 1 {
                bail!("--hold {text} must give exactly one value");
            }
            axes.push(axis);
        }
        let grid = PredictionGrid::new(axes)?;
        let summary = GridSummary::from_grid(&grid, model.coefficients(), &x_name, &g_name)?;
        println!("\npredicted probability by {x_name} and {g_name}:\n{summary}");

        if let Some(path) = &cli.summary_csv {
            summary
                .write_csv_file(path)
                .with_context(|| format!("writing {}", path.display()))?;
        }
        if let Some(path) = &cli.chart {
            let title = format!("P({} = 1) by {x_name} and {g_name}", cli.label);
            render_grouped_bar_chart(&summary, path, &title)?;
        }
    }
    Ok(())
}

fn optimizer_options(cli: &Cli) -> Result<OptimizerOptions> {
    let solver: SolverKind = cli.solver.parse()?;
    let line_searcher: LineSearcher = cli.line_search.parse()?;
    let tols = Tolerances::new(Some(cli.tol_grad), cli.tol_cost, Some(cli.max_iter))?;
    Ok(OptimizerOptions::new(tols, solver, line_searcher, cli.verbose, cli.lbfgs_mem)?)
}
