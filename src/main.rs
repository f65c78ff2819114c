use std::{fs, io, process};

use anyhow::{Context, Result, bail};
use serde::de::DeserializeOwned;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use embed_preview::{
    config::PublishConfig,
    options::resolve_form,
    organization::Dataset,
    preview::{BusyIndicator, DialogEvent, DialogOptions, NoBusyIndicator, PreviewDialog},
    terminal::{ScriptedView, TerminalSpinner, TerminalSurface},
    types::{EmbedTarget, FormInput},
};

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

const RESOLVE_USAGE: &str = "embed-preview resolve <form.json>";
const PREVIEW_USAGE: &str = "embed-preview preview <document.json> <session.json>";
const ORGS_USAGE: &str = "embed-preview orgs <dataset.json>";
const SLUGS_USAGE: &str = "embed-preview slugs <dataset.json>";

fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);

    match args.next().as_deref() {
        Some("resolve") => {
            let form_path = args.next().context(RESOLVE_USAGE)?;
            resolve(&form_path)
        }
        Some("preview") => {
            let document_path = args.next().context(PREVIEW_USAGE)?;
            let session_path = args.next().context(PREVIEW_USAGE)?;
            preview(&document_path, &session_path)
        }
        Some("orgs") => {
            let path = args.next().context(ORGS_USAGE)?;
            orgs(&path)
        }
        Some("slugs") => {
            let path = args.next().context(SLUGS_USAGE)?;
            slugs(&path)
        }
        _ => bail!(
            "Embed Preview — viewer embed configuration and live preview\n\nUsage:\n  {RESOLVE_USAGE}\n  {PREVIEW_USAGE}\n  {ORGS_USAGE}\n  {SLUGS_USAGE}"
        ),
    }
}

fn read_json<T: DeserializeOwned>(path: &str) -> Result<T> {
    let json = fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?;
    serde_json::from_str(&json).with_context(|| format!("Failed to parse {path}"))
}

fn resolve(form_path: &str) -> Result<()> {
    let form: FormInput = read_json(form_path)?;
    let config = resolve_form(&form);
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn preview(document_path: &str, session_path: &str) -> Result<()> {
    let target: EmbedTarget = read_json(document_path)?;
    let snapshots: Vec<FormInput> = read_json(session_path)?;
    let edits = snapshots.len().saturating_sub(1);

    let config = PublishConfig::load();
    let busy: Box<dyn BusyIndicator> = if config.spinner {
        Box::new(TerminalSpinner::new(io::stderr()))
    } else {
        Box::new(NoBusyIndicator)
    };

    let mut dialog = PreviewDialog::open(
        target,
        TerminalSurface::new(io::stdout()),
        busy,
        ScriptedView::new(io::stdout(), snapshots),
        &DialogOptions::from(&config),
    );

    // The terminal surface is ready as soon as its load has been started.
    dialog.pump();
    dialog.dispatch(DialogEvent::SurfaceLoaded);
    while dialog.view_mut().advance() {
        dialog.dispatch(DialogEvent::FormChanged);
    }

    let pushes = dialog.pushes();
    let state = dialog.state();
    dialog.close();

    info!(pushes, edits, "preview session finished");
    if pushes != edits + 1 {
        bail!("Preview stalled in state {state}: {pushes} of {} renders completed", edits + 1);
    }
    Ok(())
}

fn orgs(path: &str) -> Result<()> {
    let dataset: Dataset = read_json(path)?;
    dataset
        .directory()
        .with_context(|| format!("Invalid organizations in {path}"))?;
    let listed = dataset.listed();
    info!(organizations = listed.len(), "listed organizations");
    println!("{}", serde_json::to_string_pretty(&listed)?);
    Ok(())
}

fn slugs(path: &str) -> Result<()> {
    let dataset: Dataset = read_json(path)?;
    println!("{}", serde_json::to_string_pretty(&dataset.all_slugs())?);
    Ok(())
}
