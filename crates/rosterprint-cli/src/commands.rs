//! Subcommand handlers.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use rosterprint_core::catalog::{find_sport, sports_for};
use rosterprint_core::layout::{categories, group_and_paginate};
use rosterprint_core::models::{Athlete, AthleteUpdate, Level};
use rosterprint_core::registration::{with_new_photo, Registration};
use rosterprint_core::render::{render_document, PrintOptions};
use rosterprint_core::roster::{filter_and_sort, unique_sports, RosterFilter};
use rosterprint_core::utils::truncate_string;
use rosterprint_core::{Config, ConfigKey, StoreClient, StoreError, StoreErrorKind};
use tracing::{info, warn};

use crate::cli::{Cli, Command, ConfigAction, ListArgs, PrintArgs, RegisterArgs, SelectionArgs, UpdateArgs};

// ============================================================================
// Constants
// ============================================================================

/// Column widths for the athlete table
const NAME_WIDTH: usize = 28;
const SPORT_WIDTH: usize = 24;
const SCHOOL_WIDTH: usize = 30;

pub async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load()?;
    if let Some(url) = cli.script_url {
        config.script_url = Some(url);
    }

    match cli.command {
        Command::List(args) => list(&config, args).await,
        Command::Categories => show_categories(&config).await,
        Command::Print(args) => print(&config, args).await,
        Command::Register(args) => register(&config, args).await,
        Command::Update(args) => update(&config, args).await,
        Command::Delete { id, yes } => delete(&config, &id, yes).await,
        Command::Sports { level } => {
            show_sports(level);
            Ok(())
        }
        Command::Config { action } => configure(&config, action),
    }
}

/// Wrap a store failure with what was being done and the error kind, plus a
/// hint for the kinds the user can fix.
fn store_failure(action: &str, err: StoreError) -> anyhow::Error {
    let kind = err.kind();
    let hint = match kind {
        StoreErrorKind::Config => "; set one with `rosterprint config set script_url URL`",
        StoreErrorKind::RateLimited => "; wait a minute and try again",
        _ => "",
    };
    anyhow::Error::new(err).context(format!("{} ({} error{})", action, kind, hint))
}

fn store(config: &Config) -> Result<StoreClient> {
    let url = config.script_url()?;
    StoreClient::new(url).map_err(|e| store_failure("Failed to create store client", e))
}

async fn fetch_athletes(config: &Config) -> Result<Vec<Athlete>> {
    let client = store(config)?;
    client
        .get_athletes()
        .await
        .map_err(|e| store_failure("Failed to load athletes from the store", e))
}

fn selection_filter(selection: SelectionArgs) -> RosterFilter {
    RosterFilter {
        sport: selection.sport,
        age: selection.age,
        gender: selection.gender,
        ..Default::default()
    }
}

async fn list(config: &Config, args: ListArgs) -> Result<()> {
    let athletes = fetch_athletes(config).await?;
    let filter = RosterFilter {
        search: args.search,
        level: args.level.map(|l| l.label().to_string()),
        ..selection_filter(args.selection)
    };
    let rows = filter_and_sort(&athletes, &filter, args.sort, !args.desc);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!(
        "{:>4}  {:<name$}  {:<sport$}  {:<8}  {:<school$}  {:<10}  {}",
        "#", "Name", "Sport / age", "Gender", "School", "Born", "ID",
        name = NAME_WIDTH,
        sport = SPORT_WIDTH,
        school = SCHOOL_WIDTH,
    );
    for (i, athlete) in rows.iter().enumerate() {
        let photo_marker = if athlete.has_photo() { "" } else { " (no photo)" };
        println!(
            "{:>4}  {:<name$}  {:<sport$}  {:<8}  {:<school$}  {:<10}  {}{}",
            i + 1,
            truncate_string(&athlete.name, NAME_WIDTH),
            truncate_string(&athlete.category_display(), SPORT_WIDTH),
            athlete.gender,
            truncate_string(&athlete.school, SCHOOL_WIDTH),
            athlete.birth_date_display(),
            athlete.id,
            photo_marker,
            name = NAME_WIDTH,
            sport = SPORT_WIDTH,
            school = SCHOOL_WIDTH,
        );
    }
    println!("{} of {} athletes", rows.len(), athletes.len());
    let sports = unique_sports(&athletes);
    if !sports.is_empty() {
        println!("Sports: {}", sports.join(", "));
    }
    Ok(())
}

async fn show_categories(config: &Config) -> Result<()> {
    let athletes = fetch_athletes(config).await?;
    let cats = categories(&athletes);
    if cats.is_empty() {
        println!("No athletes registered yet.");
        return Ok(());
    }
    for cat in &cats {
        println!(
            "{}  | รุ่น {} ปี | {} | {} คน",
            cat.key.sport, cat.key.age, cat.key.gender, cat.count
        );
    }
    Ok(())
}

async fn print(config: &Config, args: PrintArgs) -> Result<()> {
    let athletes = fetch_athletes(config).await?;
    let filter = selection_filter(args.selection);
    let selected: Vec<Athlete> = athletes
        .iter()
        .filter(|a| filter.matches(a))
        .cloned()
        .collect();

    let groups = group_and_paginate(&selected, args.mode.capacity());
    if groups.is_empty() {
        bail!("No athletes match the selection; nothing to print");
    }

    let mut options = PrintOptions::from(config);
    if args.no_signature {
        options.show_signature = false;
    }
    let html = render_document(&groups, args.mode, &options).into_string();
    let pages: usize = groups.iter().map(|g| g.pages.len()).sum();
    info!(mode = %args.mode, groups = groups.len(), pages = pages, athletes = selected.len(), "Rendered print sheets");

    match args.out {
        Some(path) => {
            std::fs::write(&path, html)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Wrote {} sheet(s) for {} group(s) to {}", pages, groups.len(), path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(html.as_bytes())?;
        }
    }
    Ok(())
}

async fn register(config: &Config, args: RegisterArgs) -> Result<()> {
    if find_sport(args.level, &args.sport).is_none() {
        warn!(level = %args.level, sport = %args.sport, "Sport is not in the catalog for this level");
    }

    let registration = Registration {
        level: args.level,
        sport: args.sport,
        age: args.age,
        gender: args.gender,
        coach: args.coach,
        school: config.school_name.clone(),
        entries: args.entries,
    };
    let payload = registration.build_payload()?;

    let client = store(config)?;
    let saved = client
        .save_athletes(&payload)
        .await
        .map_err(|e| store_failure("Failed to save athletes", e))?;
    println!("Saved {} athlete(s)", saved);
    Ok(())
}

async fn update(config: &Config, args: UpdateArgs) -> Result<()> {
    let client = store(config)?;
    let athletes = client
        .get_athletes()
        .await
        .map_err(|e| store_failure("Failed to load athletes from the store", e))?;
    let current = athletes
        .iter()
        .find(|a| a.id == args.id)
        .with_context(|| format!("No athlete with id {}", args.id))?;

    let mut changes = AthleteUpdate::from(current);
    if let Some(name) = args.name {
        changes.name = name;
    }
    if let Some(level) = args.level {
        changes.level = level.label().to_string();
    }
    if let Some(sport) = args.sport {
        changes.sport_type = sport;
    }
    if let Some(age) = args.age {
        changes.age = age;
    }
    if let Some(gender) = args.gender {
        changes.gender = gender;
    }
    if let Some(birth_date) = args.birth_date {
        changes.birth_date = birth_date;
    }
    if let Some(coach) = args.coach {
        changes.coach = coach;
    }
    if let Some(note) = args.note {
        changes.note = note;
    }
    if let Some(photo) = &args.photo {
        changes = with_new_photo(changes, photo)?;
    }

    if changes.name.trim().is_empty() {
        bail!("Name is required");
    }

    client
        .update_athlete(&args.id, &changes)
        .await
        .map_err(|e| store_failure("Failed to update athlete", e))?;
    println!("Updated {} ({})", changes.name, args.id);
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    eprint!("{} [y/N] ", prompt);
    io::stderr().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

async fn delete(config: &Config, id: &str, yes: bool) -> Result<()> {
    if !yes && !confirm(&format!("Delete athlete {} from the store?", id))? {
        println!("Cancelled");
        return Ok(());
    }

    let client = store(config)?;
    client
        .delete_athlete(id)
        .await
        .map_err(|e| store_failure(&format!("Failed to delete athlete {}", id), e))?;
    println!("Deleted {}", id);
    Ok(())
}

fn show_sports(level: Option<Level>) {
    let levels: Vec<Level> = match level {
        Some(level) => vec![level],
        None => Level::ALL.to_vec(),
    };
    for level in levels {
        println!("{} ({})", level.label(), level.slug());
        for sport in sports_for(level) {
            println!(
                "  {:<20} ages: {:<10} genders: {}",
                sport.name,
                sport.ages.join(", "),
                sport.genders.join(", ")
            );
        }
    }
}

fn configure(config: &Config, action: Option<ConfigAction>) -> Result<()> {
    match action.unwrap_or(ConfigAction::Show) {
        ConfigAction::Show => {
            for key in ConfigKey::ALL {
                let value = config.get(key).unwrap_or_else(|| "(not set)".to_string());
                println!("{:<15} {}", key.name(), value);
            }
        }
        ConfigAction::Path => println!("{}", Config::config_path()?.display()),
        ConfigAction::Set { key, value } => {
            // Environment and flag overrides must not leak into the saved file.
            let mut stored = Config::load_file()?;
            stored.set(key, &value)?;
            stored.save()?;
            info!(key = %key, "Saved config");
            println!("Set {} in {}", key, Config::config_path()?.display());
        }
    }
    Ok(())
}
