//! VOLCANS: volcano analogue search
//! Entry point for the `volcans` binary.

mod config;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use volcans_common::{Criterion, VolcanoIdentity};
use volcans_ranker::report::{
    gvp_url, write_analogue_csv, write_analogue_table, write_better_analogues_summary,
};
use volcans_ranker::weights::parse_weight;
use volcans_ranker::{AnalogyContext, AnalogyReport, AnalogyRequest, VolcansDataAdapter};

/// Rank the volcanoes of the catalogue by analogy with a target volcano.
#[derive(Parser, Debug)]
#[command(name = "volcans", version)]
#[command(about = "Find analogue volcanoes using weighted multi-criteria analogy")]
struct Cli {
    /// Target volcano: a name, or a six-digit Smithsonian id.
    volcano: Option<String>,

    /// Number of analogues to report.
    #[arg(short = 'n', long)]
    count: Option<usize>,

    /// Weight of tectonic setting (decimal or fraction, e.g. 0.25 or 1/4).
    #[arg(long, value_name = "WEIGHT")]
    tectonic_setting: Option<String>,

    /// Weight of geochemistry.
    #[arg(long, value_name = "WEIGHT")]
    geochemistry: Option<String>,

    /// Weight of morphology.
    #[arg(long, value_name = "WEIGHT")]
    morphology: Option<String>,

    /// Weight of eruption size.
    #[arg(long, value_name = "WEIGHT")]
    eruption_size: Option<String>,

    /// Weight of eruption style.
    #[arg(long, value_name = "WEIGHT")]
    eruption_style: Option<String>,

    /// A priori analogues to compare against (names or ids).
    #[arg(long, num_args = 1..)]
    apriori: Vec<String>,

    /// Write the analogue table to `<name>_top<N>_analogues.csv`.
    #[arg(short = 'w', long)]
    write_csv_file: bool,

    /// Open the Global Volcanism Program page of the top analogue.
    #[arg(long)]
    open_browser: bool,

    /// Debug-level logging.
    #[arg(short, long)]
    verbose: bool,

    /// Directory holding volc_names.csv and the criterion matrices.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Config file (default: volcans.toml or $VOLCANS_CONFIG).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Read the analysis request from a JSON file instead of the arguments.
    #[arg(long, conflicts_with = "volcano")]
    request: Option<PathBuf>,
}

impl Cli {
    fn weight_args(&self) -> [(Criterion, Option<&String>); 5] {
        [
            (Criterion::TectonicSetting, self.tectonic_setting.as_ref()),
            (Criterion::Geochemistry, self.geochemistry.as_ref()),
            (Criterion::Morphology, self.morphology.as_ref()),
            (Criterion::EruptionSize, self.eruption_size.as_ref()),
            (Criterion::EruptionStyle, self.eruption_style.as_ref()),
        ]
    }
}

/// Merge command line, request file and config into one request.
/// Flags given on the command line win.
fn build_request(cli: &Cli, config: &config::Config) -> anyhow::Result<AnalogyRequest> {
    let mut request = match (&cli.request, &cli.volcano) {
        (Some(path), _) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read request file {:?}", path))?;
            let value: serde_json::Value = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse request file {:?}", path))?;
            AnalogyRequest::from_json_with_count(&value, config.analysis.count)?
        }
        (None, Some(volcano)) => {
            let mut request = AnalogyRequest::new(VolcanoIdentity::parse(volcano));
            request.count = config.analysis.count;
            request
        }
        (None, None) => anyhow::bail!("No target volcano given (pass a name, an id, or --request)"),
    };

    if let Some(count) = cli.count {
        request.count = count;
    }
    for (criterion, literal) in cli.weight_args() {
        if let Some(literal) = literal {
            request.weights.set(criterion, Some(parse_weight(literal)?));
        }
    }
    if !cli.apriori.is_empty() {
        request.apriori = cli.apriori.iter().map(|v| VolcanoIdentity::parse(v)).collect();
    }
    Ok(request)
}

/// Everything meant for stdout: the analogue table, then the a priori summary if any.
fn write_report<W: std::io::Write>(mut out: W, report: &AnalogyReport) -> anyhow::Result<()> {
    write_analogue_table(&mut out, &report.analogues)?;
    if !report.apriori.is_empty() {
        write_better_analogues_summary(&mut out, &report.analogues.target.name, &report.apriori)?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "volcans=debug,info" } else { "volcans=info,warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("VOLCANS {}", env!("CARGO_PKG_VERSION"));

    let config = config::Config::load(cli.config.as_deref())?;
    let request = build_request(&cli, &config)?;

    let data_dir = cli.data_dir.clone().unwrap_or_else(|| config.data.dir.clone());
    info!("Loading volcano data from {:?}", data_dir);
    let adapter = VolcansDataAdapter::load(data_dir).await?;
    let ctx = AnalogyContext::from_provider_with_limit(&adapter, config.analysis.suggestion_limit)?;

    let report = request.run(&ctx)?;

    info!(
        "Top {} analogue volcanoes for {}",
        report.analogues.count, report.analogues.target.name
    );
    write_report(std::io::stdout().lock(), &report)?;

    if cli.write_csv_file || config.output.write_csv {
        let path = write_analogue_csv(&config.output.dir, &report.analogues)?;
        info!("Table written to {}", path.display());
    }

    if cli.open_browser || config.output.open_browser {
        match report.analogues.top_analogue() {
            Some(top) => {
                let url = gvp_url(top.smithsonian_id);
                info!("Opening {}", url);
                if let Err(e) = open::that(&url) {
                    warn!("Could not open browser for {url}: {e}");
                }
            }
            None => warn!("No analogue to open: the catalogue only holds the target volcano"),
        }
    }

    Ok(())
}
