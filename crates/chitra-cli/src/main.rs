//! Chitra CLI - author, inspect, export, and play activities from the
//! command line against the local store.

mod logger;

use anyhow::{anyhow, bail, Context, Result};
use api::{execute_command, Command};
use canvas::{export, EditorCanvas};
use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use logger::ChitraLogger;
use model::{Activity, ActivityId, Language};
use player::{DropOutcome, EffectSink, PlayerSession};
use std::path::PathBuf;
use store::{AppState, LocalStore};

/// Chitra - therapy activity authoring and playback
#[derive(Parser)]
#[command(name = "chitra")]
#[command(about = "Author, export, and play therapy activities")]
struct Cli {
    /// Store directory (default: ~/.chitra)
    #[arg(long)]
    store: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in activity templates
    Templates,

    /// List stored activities
    List,

    /// Show one activity as JSON
    Show {
        /// Activity id (full uuid or unique prefix)
        id: String,
    },

    /// Create an activity from a template
    New {
        #[arg(long)]
        title: String,

        /// Template id (see `templates`)
        #[arg(long, default_value = "matching-1")]
        template: String,

        /// Authoring language
        #[arg(long, default_value = "english")]
        language: Language,
    },

    /// Run a JSON editor command against a stored activity
    Exec {
        id: String,

        /// Command JSON, e.g. '{"type": "add_element", "kind": "text"}'
        json: String,
    },

    /// Export an activity snapshot to a file
    Export {
        id: String,

        #[arg(long, value_enum, default_value_t = ExportFormat::Png)]
        format: ExportFormat,

        #[arg(long)]
        out: PathBuf,
    },

    /// Play an activity non-interactively, dropping each item in turn
    Play { id: String },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ExportFormat {
    Png,
    Pdf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    ChitraLogger::init(level)?;

    let root = match cli.store {
        Some(root) => root,
        None => LocalStore::default_root()?,
    };
    let mut state = AppState::load(LocalStore::open(root)?)?;

    match cli.command {
        Commands::Templates => list_templates(),
        Commands::List => list_activities(&state),
        Commands::Show { id } => show_activity(&state, &id),
        Commands::New {
            title,
            template,
            language,
        } => new_activity(&mut state, &title, &template, language),
        Commands::Exec { id, json } => exec_command(&mut state, &id, &json),
        Commands::Export { id, format, out } => export_activity(&state, &id, format, &out),
        Commands::Play { id } => play_activity(&state, &id),
    }
}

fn list_templates() -> Result<()> {
    for template in assets::starter_templates() {
        println!(
            "{} {:12} {:20} {}",
            template.thumbnail, template.id, template.name, template.description
        );
    }
    Ok(())
}

fn list_activities(state: &AppState) -> Result<()> {
    if state.activities().is_empty() {
        println!("No stored activities. Create one with `chitra new --title ...`");
        return Ok(());
    }
    for activity in state.activities() {
        println!(
            "{} {:24} {:16} {} element(s){}",
            activity.id.to_uuid_string(),
            activity.title,
            activity.kind,
            activity.elements.len(),
            if activity.is_published {
                " [published]"
            } else {
                ""
            }
        );
    }
    Ok(())
}

fn show_activity(state: &AppState, id: &str) -> Result<()> {
    let activity = resolve_activity(state, id)?;
    println!("{}", serde_json::to_string_pretty(activity)?);
    Ok(())
}

fn new_activity(
    state: &mut AppState,
    title: &str,
    template_id: &str,
    language: Language,
) -> Result<()> {
    let template = assets::template_by_id(template_id)
        .ok_or_else(|| anyhow!("unknown template '{template_id}'"))?;
    let author = state
        .session()
        .map(|s| s.user_id.clone())
        .unwrap_or_else(|| "local".to_string());

    let canvas = EditorCanvas::from_elements(template.seed_elements());
    let activity = canvas.save_as_activity(title, template.kind, language, &author)?;
    let id = activity.id;
    state.save_activity(activity)?;
    println!("{}", id.to_uuid_string());
    Ok(())
}

fn exec_command(state: &mut AppState, id: &str, json: &str) -> Result<()> {
    let command: Command = serde_json::from_str(json).context("invalid command JSON")?;
    let mut activity = resolve_activity(state, id)?.clone();

    let mut canvas = EditorCanvas::from_elements(activity.elements);
    let result = execute_command(&mut canvas, command);
    println!("{}", serde_json::to_string_pretty(&result)?);

    if result.is_error() {
        bail!("command failed");
    }
    activity.elements = canvas.elements;
    activity.touch();
    state.save_activity(activity)?;
    Ok(())
}

fn export_activity(
    state: &AppState,
    id: &str,
    format: ExportFormat,
    out: &PathBuf,
) -> Result<()> {
    let activity = resolve_activity(state, id)?;
    let mut canvas = EditorCanvas::from_elements(activity.elements.clone());
    match format {
        ExportFormat::Png => export::export_png(&mut canvas, out)?,
        ExportFormat::Pdf => export::export_pdf(&mut canvas, out)?,
    }
    println!("{}", out.display());
    Ok(())
}

/// Effects reported through the log so a headless run is visible.
struct LoggingEffects;

impl EffectSink for LoggingEffects {
    fn drop_succeeded(&mut self) {
        log::info!("nice! item placed");
    }

    fn activity_completed(&mut self) {
        log::info!("activity complete, celebration time");
    }
}

fn play_activity(state: &AppState, id: &str) -> Result<()> {
    let activity = resolve_activity(state, id)?;
    let mut session = PlayerSession::new(activity).with_effects(Box::new(LoggingEffects));

    let zones = session.zone_ids().to_vec();
    let items = session.item_ids();
    if zones.is_empty() {
        println!("'{}' has no drop zones; nothing to play.", session.title());
        return Ok(());
    }

    for (zone, item) in zones.iter().zip(items.iter()) {
        session.begin_drag_item(*item);
        let outcome = session.drop_on_zone(*zone, *item);
        let (done, total) = session.progress();
        println!("placed {item} in {zone} ({done}/{total})");
        if outcome == DropOutcome::Completed {
            println!("completed '{}' with score {}", session.title(), session.score());
            return Ok(());
        }
    }

    let (done, total) = session.progress();
    println!(
        "run ended at {done}/{total}: not enough items to satisfy every zone"
    );
    Ok(())
}

/// Find an activity by full uuid or unique prefix.
fn resolve_activity<'a>(state: &'a AppState, id: &str) -> Result<&'a Activity> {
    if let Some(parsed) = ActivityId::parse(id) {
        return state
            .activity(parsed)
            .ok_or_else(|| anyhow!("no activity with id {id}"));
    }

    let matches: Vec<&Activity> = state
        .activities()
        .iter()
        .filter(|a| a.id.to_uuid_string().starts_with(id))
        .collect();
    match matches.as_slice() {
        [single] => Ok(single),
        [] => bail!("no activity with id {id}"),
        _ => bail!("id prefix '{id}' is ambiguous"),
    }
}
