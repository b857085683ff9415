// Player records and the fixed code tables (positions, NFL teams) that
// rankings CSVs are classified against.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall rank given to placeholder records that never came from a rankings file.
pub const UNRANKED: u32 = 500;

/// Bye week value meaning "not known".
pub const UNKNOWN_BYE_WEEK: u32 = 0;

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// Fantasy roster position. Declaration order is the database scan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    QB,
    RB,
    WR,
    TE,
    K,
    DEF,
}

impl Position {
    /// Every position, in scan order.
    pub const ALL: [Position; 6] = [
        Position::QB,
        Position::RB,
        Position::WR,
        Position::TE,
        Position::K,
        Position::DEF,
    ];

    /// Classify a rankings-file position code.
    ///
    /// Digits are stripped first (feeds write things like "RB12" or "WR3").
    /// Matching is exact and case-sensitive. Defenses are listed as "DST" in
    /// rankings files; "DEF" itself is not accepted there.
    pub fn from_rankings_code(code: &str) -> Option<Self> {
        let sanitized: String = code.chars().filter(|c| !c.is_ascii_digit()).collect();
        match sanitized.as_str() {
            "QB" => Some(Position::QB),
            "RB" => Some(Position::RB),
            "WR" => Some(Position::WR),
            "TE" => Some(Position::TE),
            "K" => Some(Position::K),
            "DST" => Some(Position::DEF),
            _ => None,
        }
    }

    /// Parse a user-typed position name, case-insensitively. Accepts both the
    /// internal "DEF" and the rankings-file "DST" for defenses.
    pub fn from_str_pos(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "QB" => Some(Position::QB),
            "RB" => Some(Position::RB),
            "WR" => Some(Position::WR),
            "TE" => Some(Position::TE),
            "K" => Some(Position::K),
            "DEF" | "DST" | "D/ST" => Some(Position::DEF),
            _ => None,
        }
    }

    pub fn display_str(&self) -> &'static str {
        match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
            Position::K => "K",
            Position::DEF => "DEF",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

// ---------------------------------------------------------------------------
// NFL teams
// ---------------------------------------------------------------------------

/// NFL team codes as they appear in rankings files, plus the free-agent code
/// and a terminal sentinel for anything unrecognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NflTeam {
    // NFC North
    MIN,
    GB,
    DET,
    CHI,
    // NFC West
    SF,
    SEA,
    ARI,
    LAR,
    // NFC East
    DAL,
    PHI,
    WAS,
    NYG,
    // NFC South
    NO,
    ATL,
    CAR,
    TB,
    // AFC West
    DEN,
    OAK,
    KC,
    LAC,
    // AFC North
    CLE,
    CIN,
    PIT,
    BAL,
    // AFC South
    IND,
    JAC,
    TEN,
    HOU,
    // AFC East
    NE,
    BUF,
    MIA,
    NYJ,
    /// Free agent.
    FA,
    #[serde(rename = "UNK")]
    Unknown,
}

impl NflTeam {
    /// Resolve a team code. Exact and case-sensitive: "sf" is not "SF".
    /// Unrecognised codes resolve to [`NflTeam::Unknown`].
    pub fn from_code(code: &str) -> Self {
        match code {
            "MIN" => NflTeam::MIN,
            "GB" => NflTeam::GB,
            "DET" => NflTeam::DET,
            "CHI" => NflTeam::CHI,
            "SF" => NflTeam::SF,
            "SEA" => NflTeam::SEA,
            "ARI" => NflTeam::ARI,
            "LAR" => NflTeam::LAR,
            "DAL" => NflTeam::DAL,
            "PHI" => NflTeam::PHI,
            "WAS" => NflTeam::WAS,
            "NYG" => NflTeam::NYG,
            "NO" => NflTeam::NO,
            "ATL" => NflTeam::ATL,
            "CAR" => NflTeam::CAR,
            "TB" => NflTeam::TB,
            "DEN" => NflTeam::DEN,
            "OAK" => NflTeam::OAK,
            "KC" => NflTeam::KC,
            "LAC" => NflTeam::LAC,
            "CLE" => NflTeam::CLE,
            "CIN" => NflTeam::CIN,
            "PIT" => NflTeam::PIT,
            "BAL" => NflTeam::BAL,
            "IND" => NflTeam::IND,
            "JAC" => NflTeam::JAC,
            "TEN" => NflTeam::TEN,
            "HOU" => NflTeam::HOU,
            "NE" => NflTeam::NE,
            "BUF" => NflTeam::BUF,
            "MIA" => NflTeam::MIA,
            "NYJ" => NflTeam::NYJ,
            "FA" => NflTeam::FA,
            _ => NflTeam::Unknown,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            NflTeam::MIN => "MIN",
            NflTeam::GB => "GB",
            NflTeam::DET => "DET",
            NflTeam::CHI => "CHI",
            NflTeam::SF => "SF",
            NflTeam::SEA => "SEA",
            NflTeam::ARI => "ARI",
            NflTeam::LAR => "LAR",
            NflTeam::DAL => "DAL",
            NflTeam::PHI => "PHI",
            NflTeam::WAS => "WAS",
            NflTeam::NYG => "NYG",
            NflTeam::NO => "NO",
            NflTeam::ATL => "ATL",
            NflTeam::CAR => "CAR",
            NflTeam::TB => "TB",
            NflTeam::DEN => "DEN",
            NflTeam::OAK => "OAK",
            NflTeam::KC => "KC",
            NflTeam::LAC => "LAC",
            NflTeam::CLE => "CLE",
            NflTeam::CIN => "CIN",
            NflTeam::PIT => "PIT",
            NflTeam::BAL => "BAL",
            NflTeam::IND => "IND",
            NflTeam::JAC => "JAC",
            NflTeam::TEN => "TEN",
            NflTeam::HOU => "HOU",
            NflTeam::NE => "NE",
            NflTeam::BUF => "BUF",
            NflTeam::MIA => "MIA",
            NflTeam::NYJ => "NYJ",
            NflTeam::FA => "FA",
            NflTeam::Unknown => "UNK",
        }
    }

    /// Whether this is one of the 32 franchises (not FA, not the sentinel).
    pub fn is_franchise(&self) -> bool {
        !matches!(self, NflTeam::FA | NflTeam::Unknown)
    }
}

impl fmt::Display for NflTeam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ---------------------------------------------------------------------------
// Player record
// ---------------------------------------------------------------------------

/// One ranked player, as read from a rankings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Display name, exactly as it appeared in the file.
    pub name: String,
    /// Overall rank (1 = best).
    pub overall_rank: u32,
    pub team: NflTeam,
    pub position: Position,
    pub bye_week: u32,
}

impl PlayerRecord {
    /// Stand-in record for a name the database could not resolve to a single
    /// player: unranked, free agent, listed as a defense, bye week unknown.
    pub fn placeholder(name: impl Into<String>) -> Self {
        PlayerRecord {
            name: name.into(),
            overall_rank: UNRANKED,
            team: NflTeam::FA,
            position: Position::DEF,
            bye_week: UNKNOWN_BYE_WEEK,
        }
    }

    /// Case-insensitive substring test. `needle_lower` must already be lowercase.
    pub(crate) fn name_contains_lower(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
    }
}
