use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use serde::Serialize;

use gridedit::cli::{output_or_input, CliArgs, CliCommand, RemoteArgs};
use gridedit::commands::parse_script;
use gridedit::sync::{basename, DirectoryTransport, SyncStatus, Transport};
use gridedit::table::column_letter;
use gridedit::{EditorSession, GridConfig, SessionContext};

fn main() -> Result<()> {
    gridedit::tracing::init();

    let args = CliArgs::parse();
    let config = args.load_config();
    tracing::debug!(?config, "loaded config");

    match args.command {
        CliCommand::Check { file, json } => check(&file, json, config),
        CliCommand::Normalize { file, output } => {
            let output = output_or_input(output.as_deref(), &file);
            normalize(&file, &output, config)
        }
        CliCommand::Apply {
            file,
            script,
            output,
        } => {
            let output = output_or_input(output.as_deref(), &file);
            apply(&file, &script, &output, config)
        }
        CliCommand::Push { file, path, remote } => push(&file, path, &remote, config),
        CliCommand::Pull {
            raw,
            output,
            normalize,
            remote,
        } => pull(&raw, output, normalize, &remote, config),
    }
}

fn open(file: &Path, session: &mut EditorSession) -> Result<()> {
    session
        .open_local(file)
        .with_context(|| format!("Failed to open {}", file.display()))
}

/// Summary printed by `check --json`
#[derive(Serialize)]
struct CheckSummary<'a> {
    file: String,
    rows: usize,
    columns: Vec<ColumnSummary<'a>>,
}

#[derive(Serialize)]
struct ColumnSummary<'a> {
    letter: String,
    name: &'a str,
}

fn check(file: &Path, json: bool, config: GridConfig) -> Result<()> {
    let mut session = EditorSession::new(SessionContext::new(config.supplier.clone()), config);
    open(file, &mut session)?;
    let table = session.table().ok_or_else(|| anyhow!("no table loaded"))?;

    if json {
        let summary = CheckSummary {
            file: file.display().to_string(),
            rows: table.row_count(),
            columns: table
                .column_names()
                .iter()
                .enumerate()
                .map(|(idx, name)| ColumnSummary {
                    letter: column_letter(idx),
                    name,
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!(
        "{}: {} rows x {} columns",
        file.display(),
        table.row_count(),
        table.column_count()
    );
    for (idx, name) in table.column_names().iter().enumerate() {
        println!("  {:>3}  {}", column_letter(idx), name);
    }
    Ok(())
}

fn normalize(file: &Path, output: &Path, config: GridConfig) -> Result<()> {
    let mut session = EditorSession::new(SessionContext::default(), config);
    open(file, &mut session)?;
    let bytes = session
        .save_local(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Wrote {} ({} bytes)", output.display(), bytes);
    Ok(())
}

fn apply(file: &Path, script: &Path, output: &Path, config: GridConfig) -> Result<()> {
    let text = std::fs::read_to_string(script)
        .with_context(|| format!("Failed to read script {}", script.display()))?;
    let steps = parse_script(&text).with_context(|| format!("In {}", script.display()))?;

    let mut session = EditorSession::new(SessionContext::new(config.supplier.clone()), config);
    open(file, &mut session)?;
    let report = session.run_script(&steps)?;

    tracing::info!(?report, "script finished");
    println!(
        "{} transaction(s), {} undone, {} redone, {} no-op step(s)",
        report.transactions, report.undone, report.redone, report.unchanged
    );

    let bytes = session
        .save_local(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Wrote {} ({} bytes)", output.display(), bytes);
    Ok(())
}

fn transport(remote: &RemoteArgs, config: &GridConfig) -> Result<DirectoryTransport> {
    let root = remote.remote_root(config).map_err(|e| anyhow!(e))?;
    Ok(DirectoryTransport::new(root))
}

fn push(file: &Path, path: Option<String>, remote: &RemoteArgs, config: GridConfig) -> Result<()> {
    let transport: Arc<dyn Transport> = Arc::new(transport(remote, &config)?);
    let context = SessionContext::new(remote.supplier(&config));
    let mut session = EditorSession::new(context, config);
    open(file, &mut session)?;

    let raw = path.unwrap_or_else(|| file.to_string_lossy().into_owned());
    let handle = session.upload_in_background(transport, &raw)?;
    match handle.wait() {
        SyncStatus::Completed(ack) => {
            println!("Uploaded {} ({} bytes)", ack.path, ack.bytes);
            Ok(())
        }
        SyncStatus::Failed(e) => Err(e).context("Upload failed"),
        SyncStatus::Cancelled => bail!("Upload cancelled"),
    }
}

fn pull(
    raw: &str,
    output: Option<PathBuf>,
    normalize: bool,
    remote: &RemoteArgs,
    config: GridConfig,
) -> Result<()> {
    let transport = transport(remote, &config)?;
    let context = SessionContext::new(remote.supplier(&config));
    let mut session = EditorSession::new(context, config);

    let (canonical, downloaded) = session
        .fetch_remote(&transport, raw)
        .with_context(|| format!("Failed to download {}", raw))?;

    let output = match output {
        Some(path) => path,
        None => PathBuf::from(
            basename(&canonical).ok_or_else(|| anyhow!("cannot name output for {}", canonical))?,
        ),
    };
    let bytes = if normalize {
        session.save_local(&output)
    } else {
        std::fs::write(&output, &downloaded)
            .map(|_| downloaded.len())
            .map_err(Into::into)
    }
    .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Downloaded {} to {} ({} bytes)", canonical, output.display(), bytes);
    Ok(())
}
