//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use pagemend_core::pipeline::{
    ConversionDiagnostics, ConvertRequest, DiagnosticsSink, ProgressReporter,
};
use pagemend_report::{ConversionStats, RecordedConversion, ReportInput, analyze_blocks};
use pagemend_rewrite::RewriteClient;
use pagemend_shared::{
    AppConfig, init_config, load_config, rewrite_api_key, stats_file_path,
};
use pagemend_writer::MarkdownWriter;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// pagemend — rebuild readable documents from lossy PDF text extraction.
#[derive(Parser)]
#[command(
    name = "pagemend",
    version,
    about = "Reconstruct structured documents from poorly-segmented PDF text.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Convert a source document into a structured output document.
    Convert {
        /// Path to the source document.
        input: PathBuf,

        /// Output path (defaults to `<stem>_converted.md` in the configured
        /// output directory).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip the generative rewrite pass entirely.
        #[arg(long)]
        no_rewrite: bool,

        /// Use a single rewrite model instead of the configured fallback list.
        #[arg(long)]
        model: Option<String>,

        /// Override the extraction backend order (comma-separated).
        #[arg(long)]
        backends: Option<String>,

        /// Write a Markdown conversion report next to the output.
        #[arg(long)]
        report: bool,
    },

    /// Show running conversion statistics.
    Stats,

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "pagemend=info",
        1 => "pagemend=debug",
        _ => "pagemend=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt().with_env_filter(env_filter).with_target(false).init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Convert {
            input,
            output,
            no_rewrite,
            model,
            backends,
            report,
        } => {
            cmd_convert(
                &input,
                output,
                no_rewrite,
                model.as_deref(),
                backends.as_deref(),
                report,
            )
            .await
        }
        Command::Stats => cmd_stats(),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

// ---------------------------------------------------------------------------
// convert
// ---------------------------------------------------------------------------

async fn cmd_convert(
    input: &Path,
    output: Option<PathBuf>,
    no_rewrite: bool,
    model: Option<&str>,
    backends_flag: Option<&str>,
    write_report: bool,
) -> Result<()> {
    let config = load_config()?;

    let output = output.unwrap_or_else(|| default_output_path(input, &config));

    // Resolve backend order: CLI flag overrides config.
    let order: Vec<String> = match backends_flag {
        Some(flag) => flag.split(',').map(|s| s.trim().to_string()).collect(),
        None => config.defaults.backend_order.clone(),
    };
    let backends = pagemend_extract::backends_for(&order)?;

    // Rewrite client: optional, and absent without an API key.
    let rewrite_client = if no_rewrite {
        info!("rewrite disabled by flag");
        None
    } else {
        match rewrite_api_key(&config) {
            Some(key) => {
                let mut rewrite_config = config.rewrite.clone();
                if let Some(model) = model {
                    rewrite_config.models = vec![model.to_string()];
                }
                Some(RewriteClient::new(&rewrite_config, key)?)
            }
            None => {
                warn!(
                    env = %config.rewrite.api_key_env,
                    "no rewrite API key set, continuing without rewrite"
                );
                None
            }
        }
    };

    let request = ConvertRequest {
        input: input.to_path_buf(),
        output: output.clone(),
    };

    let stats_path = stats_file_path()?;
    let stats_sink = StatsSink {
        path: stats_path.clone(),
    };
    let progress = CliProgress::new();

    let result = pagemend_core::convert(
        &request,
        &backends,
        rewrite_client.as_ref(),
        &MarkdownWriter,
        &progress,
        Some(&stats_sink),
    )
    .await;

    progress.finish();

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => {
            // Failed conversions count too.
            let mut stats = ConversionStats::load_or_default(&stats_path);
            stats.record(&RecordedConversion {
                success: false,
                blocks: 0,
                duration_secs: 0.0,
                backend: None,
                model: None,
            });
            if let Err(save_err) = stats.save(&stats_path) {
                warn!(error = %save_err, "could not persist stats");
            }
            return Err(eyre!(e));
        }
    };

    println!();
    println!("  Conversion complete!");
    println!("  Input:      {}", input.display());
    println!("  Output:     {}", outcome.output_path.display());
    println!("  Backend:    {}", outcome.backend);
    println!(
        "  Rewrite:    {}",
        match (&outcome.rewrite_model, outcome.rewrite_degraded) {
            (Some(model), _) => model.clone(),
            (None, true) => "degraded (all models failed)".into(),
            (None, false) => "skipped".into(),
        }
    );
    println!(
        "  Blocks:     {} headings, {} paragraphs",
        outcome.counts.headings, outcome.counts.paragraphs
    );
    if outcome.residual_issues > 0 {
        println!("  Residual:   {} spacing issues remain", outcome.residual_issues);
    }
    println!("  Time:       {:.1}s", outcome.elapsed.as_secs_f64());
    println!();

    if write_report {
        let analysis = analyze_blocks(&outcome.blocks);
        let stats = ConversionStats::load_or_default(&stats_path);
        let report = pagemend_report::render_report(
            &ReportInput {
                source: input,
                output: &outcome.output_path,
                backend: &outcome.backend,
                model: outcome.rewrite_model.as_deref(),
                issues: &outcome.final_issues,
                analysis: &analysis,
                elapsed_secs: outcome.elapsed.as_secs_f64(),
            },
            &stats,
        );

        let report_path = outcome.output_path.with_extension("report.md");
        std::fs::write(&report_path, report)
            .map_err(|e| eyre!("could not write report {}: {e}", report_path.display()))?;
        println!("  Report:     {}", report_path.display());
        println!();
    }

    Ok(())
}

/// Default output path: `<stem>_converted.md` under the configured output dir.
fn default_output_path(input: &Path, config: &AppConfig) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "document".into());

    PathBuf::from(&config.defaults.output_dir).join(format!("{stem}_converted.md"))
}

// ---------------------------------------------------------------------------
// stats / config
// ---------------------------------------------------------------------------

fn cmd_stats() -> Result<()> {
    let stats = ConversionStats::load_or_default(&stats_file_path()?);
    println!("{}", stats.render_summary());
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("wrote default config to {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config = load_config()?;
    let rendered = toml::to_string_pretty(&config)?;
    println!("{rendered}");
    Ok(())
}

// ---------------------------------------------------------------------------
// Diagnostics sink: running stats
// ---------------------------------------------------------------------------

/// Records successful conversions into the persisted stats file.
struct StatsSink {
    path: PathBuf,
}

impl DiagnosticsSink for StatsSink {
    fn conversion_finished(&self, diagnostics: &ConversionDiagnostics<'_>) {
        let mut stats = ConversionStats::load_or_default(&self.path);
        stats.record(&RecordedConversion {
            success: true,
            blocks: (diagnostics.counts.content() + diagnostics.counts.blanks) as u64,
            duration_secs: diagnostics.elapsed.as_secs_f64(),
            backend: Some(diagnostics.backend.to_string()),
            model: diagnostics.rewrite_model.map(str::to_string),
        });
        if let Err(e) = stats.save(&self.path) {
            warn!(error = %e, "could not persist stats");
        }
    }
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }

    fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }
}
