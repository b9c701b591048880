//! # gallery-sync CLI
//!
//! Keeps the portfolio's metadata store in step with its image tree.
//!
//! ## Usage
//!
//! ```bash
//! gallery-sync --config ./config/gallery.toml [command]
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `gallery-sync` | Same as `sync` |
//! | `gallery-sync sync` | Reconcile the store with the media tree |
//! | `gallery-sync resolve <file>...` | Show what the resolver infers for filenames |
//! | `gallery-sync video add <file> <url>` | Attach a companion video link |
//! | `gallery-sync video remove <file>` | Clear a video link |
//! | `gallery-sync video move <from> <to>` | Move a video link between records |
//! | `gallery-sync inventory` | Summarize the store against the tree |
//! | `gallery-sync timestamps` | Write file modification times for the site |

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use gallery_sync::progress::ProgressMode;
use gallery_sync::video::VideoEdit;
use gallery_sync::{config, inventory, reconcile, resolve, timestamps, video};

/// gallery-sync: filename-driven metadata for an astrophotography portfolio.
///
/// All commands except `resolve` read a TOML configuration file. See
/// `config/gallery.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "gallery-sync",
    about = "Infer image metadata from filenames and keep the gallery store in sync",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/gallery.toml")]
    config: PathBuf,

    /// Per-record progress on stderr: auto, human, json or off.
    ///
    /// `auto` prints human lines when stderr is a terminal.
    #[arg(long, global = true, default_value = "auto", value_parser = ProgressMode::parse)]
    progress: ProgressMode,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Reconcile the metadata store with the media tree.
    ///
    /// Creates records for new files, refreshes auto-generated fields on
    /// unprotected records, leaves protected records alone and deletes
    /// records whose file is gone. The store is only written when something
    /// changed.
    Sync {
        /// Report what would change without writing the store.
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the designation and object name inferred for each filename.
    Resolve {
        #[arg(required = true)]
        filenames: Vec<String>,
    },

    /// Edit companion video links.
    Video {
        #[command(subcommand)]
        action: VideoAction,
    },

    /// Summarize the store against the media tree.
    Inventory,

    /// Capture image modification times into a JSON file.
    Timestamps {
        /// Output path; defaults to `[timestamps].output`.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

/// Video link subcommands.
#[derive(Subcommand)]
enum VideoAction {
    /// Link a video to a record.
    Add {
        filename: String,
        /// Full http(s) URL.
        url: String,
        /// Title shown next to the link; keeps the current one if omitted.
        #[arg(long)]
        title: Option<String>,
    },
    /// Clear a record's video link and title.
    Remove { filename: String },
    /// Move a video link and title from one record to another.
    Move {
        from: String,
        to: String,
        /// Replace a link the target already has.
        #[arg(long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Commands that don't require config
    if let Some(Commands::Resolve { filenames }) = &cli.command {
        for filename in filenames {
            let r = resolve::resolve(filename);
            let designation = if r.catalog_designation.is_empty() {
                "-"
            } else {
                r.catalog_designation.as_str()
            };
            let kind = r.kind.map(|k| k.label()).unwrap_or("-");
            println!("{}\t{}\t{}\t{}", filename, designation, r.object_name, kind);
        }
        return Ok(());
    }

    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        None => {
            let reporter = cli.progress.reporter();
            let outcome = reconcile::run_sync(&cfg, false, reporter.as_ref())?;
            reconcile::print_summary(&outcome, false);
        }
        Some(Commands::Sync { dry_run }) => {
            let reporter = cli.progress.reporter();
            let outcome = reconcile::run_sync(&cfg, dry_run, reporter.as_ref())?;
            reconcile::print_summary(&outcome, dry_run);
        }
        Some(Commands::Video { action }) => {
            let edit = match action {
                VideoAction::Add {
                    filename,
                    url,
                    title,
                } => VideoEdit::Add {
                    filename,
                    url,
                    title,
                },
                VideoAction::Remove { filename } => VideoEdit::Remove { filename },
                VideoAction::Move { from, to, force } => VideoEdit::Move { from, to, force },
            };
            video::run_video(&cfg, &edit)?;
        }
        Some(Commands::Inventory) => {
            inventory::run_inventory(&cfg)?;
        }
        Some(Commands::Timestamps { output }) => {
            timestamps::run_timestamps(&cfg, output.as_deref())?;
        }
        Some(Commands::Resolve { .. }) => {
            // Handled above (before config loading)
            unreachable!()
        }
    }

    Ok(())
}
