use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};

use anyhow::{Context, Result, anyhow, bail};

use pl_dashboard::config::AppConfig;
use pl_dashboard::logging;
use pl_dashboard::player::{Player, PlayerFilters, summarize};
use pl_dashboard::player_api::{PlayerClient, parse_players_json};
use pl_dashboard::player_store::{Notification, PlayerStore};
use pl_dashboard::validation::validate_player;

const USAGE: &str = "usage: pl_players list [--team T] [--name N] [--position P] [--nation C]\n       pl_players delete <name>\n       pl_players import <players.json>";

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    logging::init_stderr_logging()?;

    let config = AppConfig::from_env();
    let client = PlayerClient::new(&config.api_base_url)?;
    let (note_tx, note_rx) = mpsc::channel();
    let store = PlayerStore::new(Arc::new(client))
        .with_stale_after(config.stale_after)
        .with_notifier(note_tx);

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let Some((command, rest)) = args.split_first() else {
        bail!("{USAGE}");
    };

    let result = match command.as_str() {
        "list" => list(&store, rest),
        "delete" => {
            let name = rest.join(" ");
            if name.trim().is_empty() {
                bail!("{USAGE}");
            }
            store.delete_player(name.trim()).map(|()| println!("Deleted {}", name.trim()))
        }
        "import" => {
            let Some(path) = rest.first() else {
                bail!("{USAGE}");
            };
            import(&store, PathBuf::from(path))
        }
        other => Err(anyhow!("unknown command {other:?}\n{USAGE}")),
    };
    print_notifications(&note_rx);
    result
}

fn print_notifications(rx: &Receiver<Notification>) {
    while let Ok(note) = rx.try_recv() {
        let level = if note.is_failure() { "[WARN]" } else { "[INFO]" };
        eprintln!("{level} {}: {}", note.title, note.message);
    }
}

fn list(store: &PlayerStore, args: &[String]) -> Result<()> {
    let filters = PlayerFilters {
        team: parse_flag(args, "team"),
        name: parse_flag(args, "name"),
        position: parse_flag(args, "position"),
        nation: parse_flag(args, "nation"),
    };
    let players = store.players(&filters)?;

    println!("{}", filters.normalized().describe());
    for p in players.iter() {
        println!(
            "{:<28} {:<24} {:<3} G {:>3}  A {:>3}  xG {:>5.2}",
            p.player, p.team, p.position, p.goals, p.assists, p.xg
        );
    }
    let summary = summarize(&players);
    println!(
        "Players: {} | Goals: {} | Assists: {} | Avg xG: {:.2}",
        summary.total_players, summary.total_goals, summary.total_assists, summary.avg_xg
    );
    Ok(())
}

fn import(store: &PlayerStore, path: PathBuf) -> Result<()> {
    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let records: Vec<Player> = parse_players_json(&raw)?;

    let mut created = 0usize;
    let mut rejected = Vec::new();
    for (idx, record) in records.iter().enumerate() {
        let label = if record.player.trim().is_empty() {
            format!("record {}", idx + 1)
        } else {
            record.player.clone()
        };
        if let Err(errors) = validate_player(record) {
            rejected.push(format!("{label}: {errors}"));
            continue;
        }
        match store.create_player(record) {
            Ok(_) => created += 1,
            Err(err) => rejected.push(format!("{label}: {err:#}")),
        }
    }

    println!("Import complete");
    println!("File: {}", path.display());
    println!("Created: {created}/{}", records.len());
    if !rejected.is_empty() {
        println!("Rejected: {}", rejected.len());
        for line in rejected.iter().take(20) {
            println!(" - {line}");
        }
    }
    Ok(())
}

fn parse_flag(args: &[String], name: &str) -> Option<String> {
    let long = format!("--{name}");
    let prefixed = format!("--{name}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(value) = arg.strip_prefix(&prefixed) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        if *arg == long {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(next.trim().to_string());
            }
        }
    }
    None
}
