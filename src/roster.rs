//! Roster import/export: two-column CSV participant lists.
//!
//! The only wire format touching the core: a `Name,Score` header followed by
//! one row per participant. Any other header is a format error.

use crate::models::TournamentError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Exact header a roster file must carry.
pub const ROSTER_HEADER: [&str; 2] = ["Name", "Score"];

/// One roster row: display name and starting score.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Score")]
    pub score: f64,
}

/// Read a roster file, validating the fixed two-column header.
pub fn read_roster(path: impl AsRef<Path>) -> Result<Vec<RosterEntry>, TournamentError> {
    let file = File::open(path).map_err(|e| TournamentError::RosterIo(e.to_string()))?;
    read_roster_from(file)
}

/// Read roster rows from any reader (file contents, request body).
pub fn read_roster_from(reader: impl Read) -> Result<Vec<RosterEntry>, TournamentError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader
        .headers()
        .map_err(|e| TournamentError::RosterIo(e.to_string()))?;
    if headers.len() != 2 || &headers[0] != ROSTER_HEADER[0] || &headers[1] != ROSTER_HEADER[1] {
        return Err(TournamentError::MalformedRosterFile);
    }
    let mut entries = Vec::new();
    for record in csv_reader.deserialize() {
        let entry: RosterEntry = record.map_err(|_| TournamentError::MalformedRosterFile)?;
        entries.push(entry);
    }
    Ok(entries)
}

/// Write the empty roster template: header row only, no participants.
pub fn write_template(path: impl AsRef<Path>) -> Result<(), TournamentError> {
    let file = File::create(path).map_err(|e| TournamentError::RosterIo(e.to_string()))?;
    write_template_to(file)
}

/// Write the template to any writer.
pub fn write_template_to(writer: impl Write) -> Result<(), TournamentError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(ROSTER_HEADER)
        .map_err(|e| TournamentError::RosterIo(e.to_string()))?;
    csv_writer
        .flush()
        .map_err(|e| TournamentError::RosterIo(e.to_string()))?;
    Ok(())
}
