// Rankings CSV parsing.
//
// Row layout (no header by default): rank,name,team,position,bye_week.
// Classification mirrors how the rankings feed is written: position codes may
// carry stray digits, defenses are "DST", and unknown team codes are kept
// rather than rejected.

use crate::model::{NflTeam, PlayerRecord, Position};
use std::io::Read;
use tracing::debug;

/// Source label used in errors when importing from an arbitrary reader.
pub const READER_SOURCE: &str = "<reader>";

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("{path}, line {line}: missing `{field}` column")]
    MissingField {
        path: String,
        line: u64,
        field: &'static str,
    },

    #[error("{path}, line {line}: `{field}` is not an unsigned integer: {value:?}")]
    InvalidNumber {
        path: String,
        line: u64,
        field: &'static str,
        value: String,
        source: std::num::ParseIntError,
    },
}

// ---------------------------------------------------------------------------
// Options and summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportOptions {
    /// Treat the first row as a header and skip it.
    pub has_headers: bool,
}

/// What an import call did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// False when the rankings file did not exist and nothing was read.
    pub file_found: bool,
    /// Records added to the database.
    pub imported: usize,
    /// Rows skipped because their position code was not recognised.
    pub dropped: usize,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

const RANK: usize = 0;
const NAME: usize = 1;
const TEAM: usize = 2;
const POSITION: usize = 3;
const BYE_WEEK: usize = 4;

/// Read every row from `rdr`, handing each classified record to `on_record`
/// in file order. Stops at the first malformed row; records already handed
/// over are not recalled.
pub(crate) fn read_rankings<R: Read>(
    rdr: R,
    source: &str,
    options: ImportOptions,
    mut on_record: impl FnMut(PlayerRecord),
) -> Result<ImportSummary, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(options.has_headers)
        .flexible(true)
        .trim(csv::Trim::None)
        .quoting(false)
        .from_reader(rdr);

    let mut summary = ImportSummary {
        file_found: true,
        ..ImportSummary::default()
    };

    for result in reader.byte_records() {
        let record = result.map_err(|e| ImportError::Csv {
            path: source.to_string(),
            source: e,
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        match parse_row(&record, source, line)? {
            Some(player) => {
                on_record(player);
                summary.imported += 1;
            }
            None => summary.dropped += 1,
        }
    }

    Ok(summary)
}

/// Parse one row. `Ok(None)` means the row was well-formed but its position
/// code is not one we track.
fn parse_row(
    record: &csv::ByteRecord,
    source: &str,
    line: u64,
) -> Result<Option<PlayerRecord>, ImportError> {
    // Invalid UTF-8 is replaced with U+FFFD rather than failing the row.
    let field = |idx: usize, name: &'static str| {
        record
            .get(idx)
            .map(String::from_utf8_lossy)
            .ok_or_else(|| ImportError::MissingField {
                path: source.to_string(),
                line,
                field: name,
            })
    };

    let overall_rank = parse_u32(&field(RANK, "rank")?, "rank", source, line)?;
    let name = field(NAME, "name")?;
    let team = NflTeam::from_code(&field(TEAM, "team")?);
    let position_code = field(POSITION, "position")?;
    let bye_week = parse_u32(&field(BYE_WEEK, "bye_week")?, "bye_week", source, line)?;

    debug!("line {}: rank {} : {}", line, overall_rank, position_code);

    let Some(position) = Position::from_rankings_code(&position_code) else {
        debug!(
            "line {}: dropping '{}', unrecognised position '{}'",
            line, name, position_code
        );
        return Ok(None);
    };

    Ok(Some(PlayerRecord {
        name: name.into_owned(),
        overall_rank,
        team,
        position,
        bye_week,
    }))
}

fn parse_u32(
    raw: &str,
    field: &'static str,
    source: &str,
    line: u64,
) -> Result<u32, ImportError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|e| ImportError::InvalidNumber {
            path: source.to_string(),
            line,
            field,
            value: raw.to_string(),
            source: e,
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(csv_data: &str, options: ImportOptions) -> (Vec<PlayerRecord>, ImportSummary) {
        let mut players = Vec::new();
        let summary = read_rankings(csv_data.as_bytes(), READER_SOURCE, options, |p| {
            players.push(p)
        })
        .unwrap();
        (players, summary)
    }

    #[test]
    fn parses_basic_rows() {
        let csv_data = "\
1,Christian McCaffrey,SF,RB,9
2,Justin Jefferson,MIN,WR,13";

        let (players, summary) = collect(csv_data, ImportOptions::default());
        assert_eq!(summary.imported, 2);
        assert_eq!(summary.dropped, 0);
        assert!(summary.file_found);

        assert_eq!(players[0].name, "Christian McCaffrey");
        assert_eq!(players[0].overall_rank, 1);
        assert_eq!(players[0].team, NflTeam::SF);
        assert_eq!(players[0].position, Position::RB);
        assert_eq!(players[0].bye_week, 9);

        assert_eq!(players[1].name, "Justin Jefferson");
        assert_eq!(players[1].team, NflTeam::MIN);
        assert_eq!(players[1].position, Position::WR);
        assert_eq!(players[1].bye_week, 13);
    }

    #[test]
    fn unknown_position_is_dropped() {
        let csv_data = "\
1,Somebody,SF,XX,9
2,Justin Jefferson,MIN,WR,13";

        let (players, summary) = collect(csv_data, ImportOptions::default());
        assert_eq!(players.len(), 1);
        assert_eq!(summary.dropped, 1);
        assert_eq!(players[0].name, "Justin Jefferson");
    }

    #[test]
    fn unknown_team_is_kept_with_sentinel() {
        let (players, _) = collect("7,Mystery Man,ZZZ,QB,5", ImportOptions::default());
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].team, NflTeam::Unknown);
    }

    #[test]
    fn dst_rows_become_defenses() {
        let (players, _) = collect("150,49ers D/ST,SF,DST1,9", ImportOptions::default());
        assert_eq!(players[0].position, Position::DEF);
        assert_eq!(players[0].name, "49ers D/ST");
    }

    #[test]
    fn digits_in_position_code_are_ignored() {
        let (players, _) = collect("3,Tyreek Hill,MIA,WR2,6", ImportOptions::default());
        assert_eq!(players[0].position, Position::WR);
    }

    #[test]
    fn name_is_not_normalized() {
        let (players, _) = collect("4, Spaced Name ,KC,TE,10", ImportOptions::default());
        assert_eq!(players[0].name, " Spaced Name ");
    }

    #[test]
    fn numbers_tolerate_surrounding_whitespace() {
        let (players, _) = collect(" 12 ,Josh Allen,BUF,QB, 7 ", ImportOptions::default());
        assert_eq!(players[0].overall_rank, 12);
        assert_eq!(players[0].bye_week, 7);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let csv_data = "1,A Player,SF,RB,9\n\n2,B Player,MIN,WR,13\n";
        let (players, _) = collect(csv_data, ImportOptions::default());
        assert_eq!(players.len(), 2);
    }

    #[test]
    fn crlf_line_endings() {
        let csv_data = "1,A Player,SF,RB,9\r\n2,B Player,MIN,WR,13\r\n";
        let (players, _) = collect(csv_data, ImportOptions::default());
        assert_eq!(players.len(), 2);
        assert_eq!(players[1].bye_week, 13);
    }

    #[test]
    fn extra_columns_ignored() {
        let (players, _) = collect("1,A Player,SF,RB,9,ECR,99.5", ImportOptions::default());
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].bye_week, 9);
    }

    #[test]
    fn header_row_skipped_when_configured() {
        let csv_data = "\
Rank,Name,Team,Pos,Bye
1,A Player,SF,RB,9";
        let (players, _) = collect(csv_data, ImportOptions { has_headers: true });
        assert_eq!(players.len(), 1);
    }

    #[test]
    fn header_row_without_option_is_an_error() {
        let csv_data = "\
Rank,Name,Team,Pos,Bye
1,A Player,SF,RB,9";
        let err = read_rankings(
            csv_data.as_bytes(),
            READER_SOURCE,
            ImportOptions::default(),
            |_| {},
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ImportError::InvalidNumber {
                field: "rank",
                line: 1,
                ..
            }
        ));
    }

    #[test]
    fn bad_rank_is_fatal_and_keeps_earlier_rows() {
        let csv_data = "\
1,A Player,SF,RB,9
two,B Player,MIN,WR,13
3,C Player,KC,TE,10";

        let mut players = Vec::new();
        let err = read_rankings(
            csv_data.as_bytes(),
            READER_SOURCE,
            ImportOptions::default(),
            |p| players.push(p),
        )
        .unwrap_err();

        assert_eq!(players.len(), 1);
        match err {
            ImportError::InvalidNumber {
                line, field, value, ..
            } => {
                assert_eq!(line, 2);
                assert_eq!(field, "rank");
                assert_eq!(value, "two");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn bad_bye_week_is_fatal_even_for_dropped_positions() {
        let err = read_rankings(
            "1,A Player,SF,XX,bye".as_bytes(),
            READER_SOURCE,
            ImportOptions::default(),
            |_| {},
        )
        .unwrap_err();
        assert!(matches!(err, ImportError::InvalidNumber { field: "bye_week", .. }));
    }

    #[test]
    fn negative_rank_is_rejected() {
        let err = read_rankings(
            "-1,A Player,SF,RB,9".as_bytes(),
            READER_SOURCE,
            ImportOptions::default(),
            |_| {},
        )
        .unwrap_err();
        assert!(matches!(err, ImportError::InvalidNumber { field: "rank", .. }));
    }

    #[test]
    fn short_row_is_fatal() {
        let err = read_rankings(
            "1,A Player,SF,RB".as_bytes(),
            READER_SOURCE,
            ImportOptions::default(),
            |_| {},
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ImportError::MissingField {
                field: "bye_week",
                line: 1,
                ..
            }
        ));
    }

    #[test]
    fn quotes_in_names_are_kept_verbatim() {
        let (players, _) = collect("5,\"Hollywood\" Brown,BAL,WR,14", ImportOptions::default());
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].name, "\"Hollywood\" Brown");
        assert_eq!(players[0].team, NflTeam::BAL);
    }

    #[test]
    fn unbalanced_quote_does_not_swallow_later_rows() {
        let csv_data = "\
5,\"Hollywood Brown,BAL,WR,14
6,Next Guy,SF,RB,9
7,Third Guy,MIN,TE,13";

        let (players, summary) = collect(csv_data, ImportOptions::default());
        assert_eq!(summary.imported, 3);
        assert_eq!(players[0].name, "\"Hollywood Brown");
        assert_eq!(players[1].name, "Next Guy");
        assert_eq!(players[2].overall_rank, 7);
    }

    #[test]
    fn invalid_utf8_is_replaced_not_fatal() {
        let csv_data: &[u8] = b"1,Jos\xe9 Player,SF,RB,9\n2,Justin Jefferson,MIN,WR,13\n";

        let mut players = Vec::new();
        let summary = read_rankings(csv_data, READER_SOURCE, ImportOptions::default(), |p| {
            players.push(p)
        })
        .unwrap();

        assert_eq!(summary.imported, 2);
        assert!(players[0].name.contains('\u{FFFD}'));
        assert!(players[0].name.starts_with("Jos"));
        assert_eq!(players[1].name, "Justin Jefferson");
    }

    #[test]
    fn empty_input_imports_nothing() {
        let (players, summary) = collect("", ImportOptions::default());
        assert!(players.is_empty());
        assert_eq!(summary.imported, 0);
        assert!(summary.file_found);
    }
}
