//! Fantasy football draft pool.
//!
//! Imports a season's overall rankings CSV into per-position lists and lets a
//! draft tracker find and claim players by partial name.
//!
//! ```no_run
//! use ffdraft_core::{config, paths, PlayerDatabase};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = config::load_config()?;
//! let mut db = PlayerDatabase::with_options(config.rankings.import_options());
//! db.import_player_data(&paths::rankings_path(&config.rankings)?)?;
//!
//! if db.num_matching_players("jefferson") == 1 {
//!     let player = db.pick_player_from_database("jefferson");
//!     println!("{} ({}, bye {})", player.name, player.team, player.bye_week);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod database;
pub mod import;
pub mod model;
pub mod paths;

pub use database::{PickOutcome, PlayerDatabase, SearchResults};
pub use import::{ImportError, ImportOptions, ImportSummary};
pub use model::{NflTeam, PlayerRecord, Position, UNKNOWN_BYE_WEEK, UNRANKED};
