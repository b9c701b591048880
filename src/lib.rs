//! # gallery-sync
//!
//! Offline metadata tooling for a static astrophotography and travel
//! photography portfolio.
//!
//! The site renders from an image tree and a filename-keyed JSON metadata
//! store. This crate infers catalog designations, object names and locations
//! from filenames and keeps the store in step with the tree, without ever
//! touching records a human has marked as protected.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────┐   ┌──────────┐   ┌─────────────┐   ┌──────────┐
//! │   scan   │──▶│  store   │──▶│  reconcile  │──▶│  store   │
//! │ media fs │   │  (load)  │   │ diff+merge  │   │  (save)  │
//! └──────────┘   └──────────┘   └──────┬──────┘   └──────────┘
//!                                      │
//!                                      ▼
//!                                ┌──────────┐
//!                                │ resolve  │
//!                                │ catalog  │
//!                                └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! gallery-sync                         # reconcile the store with the tree
//! gallery-sync sync --dry-run          # show what would change
//! gallery-sync resolve NGC6888_final.jpg
//! gallery-sync video add M42.jpg https://youtu.be/abc --title "Orion"
//! gallery-sync inventory
//! gallery-sync timestamps
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`catalog`] | Static reference table of deep-sky objects |
//! | [`resolve`] | Filename to catalog designation and object name |
//! | [`names`] | Name cleaning and location inference |
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Record and media file types |
//! | [`scan`] | Media tree enumeration and classification |
//! | [`store`] | JSON metadata store load/save |
//! | [`reconcile`] | Diff and merge of tree against store |
//! | [`progress`] | Per-record sync event reporting |
//! | [`video`] | Companion video link edits |
//! | [`inventory`] | Store health report |
//! | [`timestamps`] | File time capture for the site |

pub mod catalog;
pub mod config;
pub mod inventory;
pub mod models;
pub mod names;
pub mod progress;
pub mod reconcile;
pub mod resolve;
pub mod scan;
pub mod store;
pub mod timestamps;
pub mod video;
