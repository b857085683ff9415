// In-memory player pool, grouped by position.
//
// Import appends in file order, search scans positions in a fixed order, and
// a pick removes a player only when the query names exactly one of them.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::import::{self, ImportError, ImportOptions, ImportSummary, READER_SOURCE};
use crate::model::{PlayerRecord, Position};

// ---------------------------------------------------------------------------
// Search results
// ---------------------------------------------------------------------------

/// Players matching a search, in scan order (QB through DEF, file order
/// within each position). Borrows the database, so it cannot outlive a pick.
#[derive(Debug, Clone, Default)]
pub struct SearchResults<'a> {
    matches: Vec<&'a PlayerRecord>,
}

impl<'a> SearchResults<'a> {
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// The matched player when there is exactly one.
    pub fn unique(&self) -> Option<&'a PlayerRecord> {
        match self.matches.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// Name of the single match, or an empty string for zero or several
    /// matches. Use [`len`](Self::len) to tell those two apart.
    pub fn search_result(&self) -> &'a str {
        self.unique().map(|p| p.name.as_str()).unwrap_or("")
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a PlayerRecord> + '_ {
        self.matches.iter().copied()
    }
}

// ---------------------------------------------------------------------------
// Pick outcome
// ---------------------------------------------------------------------------

/// Result of trying to claim a player by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    /// Exactly one player matched; it has been removed from the pool.
    Picked(PlayerRecord),
    /// Nobody matched the query.
    NotFound { query: String },
    /// Several players matched; nothing was removed.
    Ambiguous { query: String, matches: usize },
}

impl PickOutcome {
    pub fn is_picked(&self) -> bool {
        matches!(self, PickOutcome::Picked(_))
    }

    /// The picked record, or a placeholder named after the query when the
    /// pick did not resolve to a single player.
    pub fn into_record(self) -> PlayerRecord {
        match self {
            PickOutcome::Picked(record) => record,
            PickOutcome::NotFound { query } | PickOutcome::Ambiguous { query, .. } => {
                PlayerRecord::placeholder(query)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// PlayerDatabase
// ---------------------------------------------------------------------------

/// The undrafted player pool.
#[derive(Debug, Clone)]
pub struct PlayerDatabase {
    by_position: BTreeMap<Position, Vec<PlayerRecord>>,
    options: ImportOptions,
}

impl Default for PlayerDatabase {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerDatabase {
    pub fn new() -> Self {
        Self::with_options(ImportOptions::default())
    }

    pub fn with_options(options: ImportOptions) -> Self {
        let by_position = Position::ALL.iter().map(|&p| (p, Vec::new())).collect();
        PlayerDatabase {
            by_position,
            options,
        }
    }

    // -- Import --

    /// Import a rankings CSV. A missing file is logged and skipped; any other
    /// read or parse failure aborts the import. Rows read before a failure
    /// stay in the pool.
    pub fn import_player_data(&mut self, path: &Path) -> Result<ImportSummary, ImportError> {
        info!("Importing player rankings from {}", path.display());

        if !path.exists() {
            warn!("{} does not exist, skipping import", path.display());
            return Ok(ImportSummary::default());
        }

        let file = std::fs::File::open(path).map_err(|e| ImportError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        self.import_from_source(file, &path.display().to_string())
    }

    /// Import rankings rows from any reader (same rules as a file import).
    pub fn import_from_reader<R: Read>(&mut self, rdr: R) -> Result<ImportSummary, ImportError> {
        self.import_from_source(rdr, READER_SOURCE)
    }

    fn import_from_source<R: Read>(
        &mut self,
        rdr: R,
        source: &str,
    ) -> Result<ImportSummary, ImportError> {
        let by_position = &mut self.by_position;
        let summary = import::read_rankings(rdr, source, self.options, |player| {
            by_position.entry(player.position).or_default().push(player);
        })?;

        info!(
            "Imported {} players ({} dropped) from {}; pool now holds {}",
            summary.imported,
            summary.dropped,
            source,
            self.len()
        );
        Ok(summary)
    }

    // -- Search --

    /// Case-insensitive substring search over every player name.
    /// An empty query matches nothing.
    pub fn search(&self, query: &str) -> SearchResults<'_> {
        let matches = self
            .match_locations(query)
            .into_iter()
            .map(|(position, idx)| &self.by_position[&position][idx])
            .collect();
        SearchResults { matches }
    }

    /// Number of players whose name contains `query`, ignoring case.
    pub fn num_matching_players(&self, query: &str) -> usize {
        self.search(query).len()
    }

    // -- Pick --

    /// Claim the single player whose name contains `name`, removing it from
    /// the pool. Zero or multiple matches leave the pool untouched.
    pub fn pick(&mut self, name: &str) -> PickOutcome {
        let hits = self.match_locations(name);
        let (position, idx) = match hits.as_slice() {
            [] => {
                debug!("pick '{}' matched no players", name);
                return PickOutcome::NotFound {
                    query: name.to_string(),
                };
            }
            [only] => *only,
            _ => {
                debug!("pick '{}' is ambiguous ({} matches)", name, hits.len());
                return PickOutcome::Ambiguous {
                    query: name.to_string(),
                    matches: hits.len(),
                };
            }
        };

        let record = self.by_position.entry(position).or_default().remove(idx);
        info!(
            "Picked {} ({} {}, rank {})",
            record.name, record.position, record.team, record.overall_rank
        );
        PickOutcome::Picked(record)
    }

    /// Like [`pick`](Self::pick), but always yields a record: unresolved
    /// names come back as an unranked free-agent placeholder.
    pub fn pick_player_from_database(&mut self, name: &str) -> PlayerRecord {
        self.pick(name).into_record()
    }

    /// Position and index of every player whose name contains `query`,
    /// ignoring case, in scan order. Shared by `search` and `pick`.
    fn match_locations(&self, query: &str) -> Vec<(Position, usize)> {
        if query.is_empty() {
            return Vec::new();
        }
        let needle = query.to_lowercase();
        self.by_position
            .iter()
            .flat_map(|(&position, players)| {
                players
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.name_contains_lower(&needle))
                    .map(move |(idx, _)| (position, idx))
            })
            .collect()
    }

    // -- Accessors --

    /// Remaining players at `position`, in import order.
    pub fn players(&self, position: Position) -> &[PlayerRecord] {
        self.by_position
            .get(&position)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every remaining player in scan order.
    pub fn iter(&self) -> impl Iterator<Item = &PlayerRecord> + '_ {
        self.by_position.values().flatten()
    }

    /// Remaining player count per position, in scan order.
    pub fn counts(&self) -> Vec<(Position, usize)> {
        Position::ALL
            .iter()
            .map(|&p| (p, self.players(p).len()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.by_position.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every player (e.g. before re-importing a fresh file).
    pub fn clear(&mut self) {
        for players in self.by_position.values_mut() {
            players.clear();
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
