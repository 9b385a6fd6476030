use clap::Parser;
use std::path::PathBuf;

/// ELB Consolidation Recommender
///
/// Examines a snapshot of classic load balancers and recommends ways of
/// consolidating them into ALBs and NLBs, one set per network tier.
#[derive(Parser, Debug)]
#[command(name = "elb-consolidator", author, version, about, styles=get_styles())]
pub struct Cli {
    /// Inventory file holding the load balancers and security groups to
    /// analyze (JSON, or YAML for .yaml/.yml files)
    #[arg(long, value_name = "FILE")]
    pub inventory: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress log output to stdout/stderr (logs still written to file)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format: report (default), json or table
    #[arg(long, value_name = "FORMAT", default_value = "report")]
    pub output: OutputFormat,

    /// Cost of one ALB/NLB relative to one classic load balancer, used in
    /// the savings estimate (default: 0.9)
    #[arg(long, default_value = "0.9")]
    pub elbv2_cost_ratio: f64,
}

/// Output format for the consolidation results
#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OutputFormat {
    /// Print a human-readable consolidation report
    Report,
    /// Output results as JSON
    Json,
    /// Display results in an interactive table (TUI)
    Table,
}

/// Set color and variants for help description
///
/// Thanks to [Praveen Perera](https://stackoverflow.com/a/76916424)
fn get_styles() -> clap::builder::Styles {
    clap::builder::Styles::styled()
        .usage(
            anstyle::Style::new()
                .bold()
                .underline()
                .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
        )
        .header(
            anstyle::Style::new()
                .bold()
                .underline()
                .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
        )
        .literal(
            anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
        )
        .invalid(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
        )
        .error(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
        )
        .valid(
            anstyle::Style::new()
                .bold()
                .underline()
                .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
        )
        .placeholder(
            anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))),
        )
}
