use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use wavyte_registry::{
    CompositionHost, CompositionSummary, Declaration, DispatchReport, FolderNode, HostConfig,
    Manifest, OperatingMode, ViewCatalog, props_from_str,
};

#[derive(Parser, Debug)]
#[command(name = "wavyte-registry", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Register a manifest's compositions and print them as JSON.
    List(ListArgs),
    /// Decide which composition mounts, and how, for the current environment.
    Resolve(ResolveArgs),
}

#[derive(Parser, Debug)]
struct ListArgs {
    /// Manifest JSON describing folders and compositions.
    #[arg(long)]
    manifest: PathBuf,
}

#[derive(Parser, Debug)]
struct ResolveArgs {
    /// Manifest JSON describing folders and compositions.
    #[arg(long)]
    manifest: PathBuf,

    /// Operating mode (`interactive`, `headless-render`, `other`). Overrides WAVYTE_ENVIRONMENT.
    #[arg(long)]
    mode: Option<String>,

    /// Selected composition id. Overrides WAVYTE_COMPOSITION.
    #[arg(long)]
    composition: Option<String>,

    /// Input props as a JSON object. Overrides WAVYTE_INPUT_PROPS.
    #[arg(long)]
    props: Option<String>,
}

#[derive(serde::Serialize)]
struct ListOutput<'a> {
    compositions: Vec<CompositionSummary>,
    folders: &'a [FolderNode],
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct Phase {
    report: DispatchReport,
    mounted: Option<String>,
    outstanding_tokens: usize,
}

#[derive(serde::Serialize)]
struct ResolveOutput {
    initial: Phase,
    settled: Phase,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::List(args) => cmd_list(args),
        Command::Resolve(args) => cmd_resolve(args),
    }
}

fn load(manifest: &Path, catalog: &mut ViewCatalog) -> anyhow::Result<Vec<Declaration>> {
    let m = Manifest::from_path(manifest)
        .with_context(|| format!("load manifest '{}'", manifest.display()))?;
    Ok(m.to_declarations(catalog)?)
}

fn cmd_list(args: ListArgs) -> anyhow::Result<()> {
    let mut catalog = ViewCatalog::new();
    let tree = load(&args.manifest, &mut catalog)?;

    // Metadata only: nothing is mounted.
    let config = HostConfig {
        mode: OperatingMode::Other,
        ..HostConfig::default()
    };
    let mut host = CompositionHost::from_config(&config);
    host.render(&tree).context("register compositions")?;

    let out = ListOutput {
        compositions: host.registry().list().iter().map(|r| r.summary()).collect(),
        folders: host.registry().folders(),
    };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_resolve(args: ResolveArgs) -> anyhow::Result<()> {
    let mut config = HostConfig::from_env().context("read host environment")?;
    if let Some(mode) = &args.mode {
        config.mode = mode.parse()?;
    }
    if let Some(id) = args.composition {
        config.selected_composition = Some(id);
    }
    if let Some(raw) = &args.props {
        config.input_props = props_from_str(raw).context("parse --props")?;
    }

    let mut catalog = ViewCatalog::new();
    let tree = load(&args.manifest, &mut catalog)?;

    let mut host = CompositionHost::from_config(&config);
    host.render(&tree).context("register compositions")?;

    if let Some(id) = &config.selected_composition
        && host.registry().get(id).is_none()
    {
        tracing::warn!(id = %id, "selected composition is not registered");
    }

    let initial = phase(&host);
    catalog.resolve_all();
    host.tick();
    let settled = phase(&host);
    host.unmount();

    println!(
        "{}",
        serde_json::to_string_pretty(&ResolveOutput { initial, settled })?
    );
    Ok(())
}

fn phase(host: &CompositionHost) -> Phase {
    let report = host.report();
    Phase {
        mounted: report.mounted_id().map(str::to_string),
        outstanding_tokens: host.ledger().outstanding(),
        report,
    }
}
