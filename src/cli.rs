//! Command line surface: argument parsing and plain-text rendering.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use cs_app::App;
use cs_core::clipboard::ClipboardEntry;
use cs_core::ids::EntryId;
use tracing::info;

pub const MANIFEST_FILE_NAME: &str = "manifest.json";

#[derive(Parser)]
#[command(name = "clipshelf")]
#[command(about = "Local clipboard history", version, long_about = None)]
pub struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record clipboard changes until interrupted
    Watch {
        /// Override the configured poll interval
        #[arg(long)]
        interval_ms: Option<u64>,
    },
    /// Show the most recent entries
    List {
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
        /// Group entries under a heading per local day
        #[arg(long)]
        by_day: bool,
    },
    /// Case-insensitive search over content, file names and source apps
    Search { query: String },
    /// Show the entries captured on a local calendar day
    Day { date: NaiveDate },
    /// Print entry counts and storage usage as JSON
    Stats,
    /// Put an entry back on the clipboard
    Copy { id: String },
    /// Delete one entry
    Delete { id: String },
    /// Delete the whole history
    Clear,
    /// Remove entries older than the retention period
    Purge,
    /// Export a day's entries and their images into a directory
    Export { date: NaiveDate, dest: PathBuf },
    /// Inspect or change capture settings
    Settings {
        #[command(subcommand)]
        action: SettingsCommand,
    },
}

#[derive(Subcommand)]
pub enum SettingsCommand {
    Show,
    /// Stop capturing copies made in an application
    Ignore { bundle_id: String },
    /// Resume capturing copies made in an application
    Unignore { bundle_id: String },
}

pub async fn run(app: &App, command: Commands, poll_interval: Duration) -> Result<()> {
    match command {
        Commands::Watch { interval_ms } => {
            let interval = interval_ms
                .map(|ms| Duration::from_millis(ms.max(1)))
                .unwrap_or(poll_interval);
            run_watch(app, interval).await
        }
        Commands::List {
            limit,
            by_day: false,
        } => {
            print_entries(&app.history.recent_entries(limit).await);
            Ok(())
        }
        Commands::List {
            limit,
            by_day: true,
        } => {
            let groups = app.history.entries_grouped_by_day().await;
            print!("{}", format_day_groups(&groups, limit));
            Ok(())
        }
        Commands::Search { query } => {
            print_entries(&app.history.search(&query).await);
            Ok(())
        }
        Commands::Day { date } => {
            print_entries(&app.history.entries_for_date(date).await);
            Ok(())
        }
        Commands::Stats => {
            let stats = app.storage_stats().execute().await;
            println!("{}", serde_json::to_string_pretty(&stats)?);
            Ok(())
        }
        Commands::Copy { id } => {
            let entry = app.recopy_entry().execute(&EntryId::from(id)).await?;
            println!("Copied {}", entry.preview);
            Ok(())
        }
        Commands::Delete { id } => {
            let id = EntryId::from(id);
            if app.delete_entry().execute(&id).await? {
                println!("Deleted {}", id);
            } else {
                println!("No entry {}", id);
            }
            Ok(())
        }
        Commands::Clear => {
            let cleared = app.clear_history().execute().await?;
            println!("Cleared {} entries", cleared);
            Ok(())
        }
        // The startup purge already ran; report what is left.
        Commands::Purge => {
            let purged = app.purge_expired_entries().execute().await;
            println!(
                "Purged {} entries, {} remain",
                purged.len(),
                app.history.entries().await.len()
            );
            Ok(())
        }
        Commands::Export { date, dest } => run_export(app, date, &dest).await,
        Commands::Settings { action } => run_settings(app, action).await,
    }
}

async fn run_watch(app: &App, interval: Duration) -> Result<()> {
    let monitor = app.monitor(interval);
    monitor.start();
    println!("Watching the clipboard every {} ms. Press Ctrl+C to stop.", interval.as_millis());

    let signal = tokio::signal::ctrl_c().await;
    monitor.stop().await;
    signal.context("failed to listen for Ctrl+C")?;

    info!(entries = app.history.entries().await.len(), "Watch finished");
    Ok(())
}

async fn run_export(app: &App, date: NaiveDate, dest: &Path) -> Result<()> {
    let entries = app.history.entries_for_date(date).await;
    tokio::fs::create_dir_all(dest)
        .await
        .with_context(|| format!("create export destination {}", dest.display()))?;

    let label = date.format("%Y-%m-%d").to_string();
    let bundle = app.export_entries().execute(&label, entries, dest).await?;

    let manifest_path = dest.join(MANIFEST_FILE_NAME);
    let manifest = serde_json::to_vec_pretty(&bundle)?;
    tokio::fs::write(&manifest_path, manifest)
        .await
        .with_context(|| format!("write {}", manifest_path.display()))?;

    println!(
        "Exported {} entries to {}",
        bundle.entries.len(),
        manifest_path.display()
    );
    Ok(())
}

async fn run_settings(app: &App, action: SettingsCommand) -> Result<()> {
    let settings = match action {
        SettingsCommand::Show => app.settings.current(),
        SettingsCommand::Ignore { bundle_id } => {
            app.settings
                .update(|s| {
                    s.capture.set_app_ignored(&bundle_id, true);
                })
                .await?
        }
        SettingsCommand::Unignore { bundle_id } => {
            app.settings
                .update(|s| {
                    s.capture.set_app_ignored(&bundle_id, false);
                })
                .await?
        }
    };
    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}

fn print_entries(entries: &[ClipboardEntry]) {
    if entries.is_empty() {
        println!("No entries");
        return;
    }
    for entry in entries {
        println!("{}", format_entry(entry));
    }
}

/// Day headings, each followed by its entries, stopping after `limit` entries.
fn format_day_groups(groups: &[(NaiveDate, Vec<ClipboardEntry>)], limit: usize) -> String {
    if groups.is_empty() || limit == 0 {
        return "No entries\n".to_string();
    }

    let mut out = String::new();
    let mut remaining = limit;
    for (date, entries) in groups {
        if remaining == 0 {
            break;
        }
        out.push_str(&format!("{} ({})\n", date.format("%A, %Y-%m-%d"), entries.len()));
        for entry in entries.iter().take(remaining) {
            out.push_str("  ");
            out.push_str(&format_entry(entry));
            out.push('\n');
        }
        remaining = remaining.saturating_sub(entries.len());
    }
    out
}

/// One line per entry: id, local time, type, preview and the source app.
fn format_entry(entry: &ClipboardEntry) -> String {
    let captured_at = entry
        .captured_at()
        .map(|at| at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());
    let preview: String = entry
        .preview
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();

    let mut line = format!(
        "{}  {}  {:<5}  {}",
        entry.id,
        captured_at,
        entry.content_type().as_str(),
        preview
    );
    if let Some(name) = entry.source_app.name.as_deref() {
        line.push_str(&format!("  [{}]", name));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use cs_core::clipboard::SourceApp;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_export_arguments() {
        let cli = Cli::try_parse_from(["clipshelf", "export", "2024-06-15", "/tmp/out"]).unwrap();
        match cli.command {
            Commands::Export { date, dest } => {
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
                assert_eq!(dest, PathBuf::from("/tmp/out"));
            }
            _ => panic!("expected export"),
        }
    }

    #[test]
    fn test_parse_rejects_bad_date() {
        assert!(Cli::try_parse_from(["clipshelf", "day", "15/06/2024"]).is_err());
    }

    #[test]
    fn test_global_config_flag() {
        let cli =
            Cli::try_parse_from(["clipshelf", "list", "--config", "/etc/clipshelf.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/etc/clipshelf.toml")));
        assert!(matches!(
            cli.command,
            Commands::List {
                limit: 20,
                by_day: false
            }
        ));
    }

    #[test]
    fn test_parse_list_by_day() {
        let cli = Cli::try_parse_from(["clipshelf", "list", "--by-day", "-l", "5"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::List {
                limit: 5,
                by_day: true
            }
        ));
    }

    #[test]
    fn test_format_day_groups_respects_limit() {
        let day = |d| NaiveDate::from_ymd_opt(2024, 6, d).unwrap();
        let entry = |text: &str| {
            ClipboardEntry::text(
                1_718_452_800_000,
                text.to_string(),
                text.to_string(),
                SourceApp::unknown(),
            )
        };
        let groups = vec![
            (day(15), vec![entry("newest"), entry("second")]),
            (day(14), vec![entry("third")]),
            (day(13), vec![entry("oldest")]),
        ];

        let out = format_day_groups(&groups, 3);

        assert!(out.starts_with("Saturday, 2024-06-15 (2)\n"));
        assert!(out.contains("Friday, 2024-06-14 (1)\n"));
        assert!(out.contains("third"));
        assert!(!out.contains("2024-06-13"));
        assert!(!out.contains("oldest"));
        assert_eq!(format_day_groups(&[], 10), "No entries\n");
    }

    #[test]
    fn test_format_entry_flattens_newlines_and_shows_source() {
        let entry = ClipboardEntry::text(
            1_718_452_800_000,
            "line one\nline two".to_string(),
            "line one\nline two".to_string(),
            SourceApp::new("com.apple.Terminal", "Terminal"),
        );

        let line = format_entry(&entry);
        assert!(line.starts_with(entry.id.as_str()));
        assert!(line.contains("line one line two"));
        assert!(line.ends_with("[Terminal]"));
        assert!(!line.contains('\n'));
    }
}
