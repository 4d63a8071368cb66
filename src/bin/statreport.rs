use std::path::{Path, PathBuf};
use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use statreport::{compile_request, parser, CompilerConfig, EntityKind, ProjectionMode, ReportRequest, StatRegistry};

#[derive(Parser)]
#[command(name = "statreport")]
#[command(about = "Compile sports-statistics report requests into parameterized SQL")]
#[command(version)]
struct Args {
    /// Compiler configuration (YAML); defaults apply when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a JSON report request and print the report and count queries
    Compile {
        /// Request file (JSON); `-` reads stdin
        #[arg(long)]
        request: PathBuf,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },
    /// List the stats an entity kind can report
    Stats {
        /// individual or team
        #[arg(long, default_value = "individual")]
        entity: EntityKind,

        /// Only stats visible in this projection mode
        #[arg(long)]
        mode: Option<ProjectionMode>,
    },
}

#[derive(Serialize)]
struct StatRow {
    abbreviation: &'static str,
    name: &'static str,
    alias: &'static str,
    filterable: bool,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the JSON output
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => parser::parse_file(path)?,
        None => CompilerConfig::default(),
    };

    match args.command {
        Commands::Compile { request, pretty } => run_compile(&request, &config, pretty),
        Commands::Stats { entity, mode } => run_stats(entity, mode),
    }
}

fn run_compile(path: &Path, config: &CompilerConfig, pretty: bool) -> anyhow::Result<()> {
    let text = if path == Path::new("-") {
        std::io::read_to_string(std::io::stdin()).context("failed to read request from stdin")?
    } else {
        std::fs::read_to_string(path).with_context(|| format!("failed to read '{}'", path.display()))?
    };
    let request: ReportRequest = serde_json::from_str(&text).context("request is not valid JSON")?;

    let report = compile_request(&request, config)?;
    let output = if pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", output);
    Ok(())
}

fn run_stats(entity: EntityKind, mode: Option<ProjectionMode>) -> anyhow::Result<()> {
    let registry = StatRegistry::for_kind(entity);
    let rows: Vec<StatRow> = registry
        .iter()
        .filter(|def| mode.map_or(true, |m| m.includes(def.source)))
        .map(|def| StatRow {
            abbreviation: def.abbreviation,
            name: def.name,
            alias: def.sort_key,
            filterable: def.filterable,
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}
