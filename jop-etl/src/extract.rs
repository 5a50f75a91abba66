//! Extract stage: read the three raw sources into typed records
//!
//! A row that fails to parse is skipped with a warning. An unreadable file
//! is logged and yields an empty list; the load stage decides whether that
//! invalidates the run.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use jop_common::config::DataFiles;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{error, info, warn};

use crate::records::{
    episode_number, ExtractedData, RawColorEntry, RawEpisodeDate, RawSubjectEntry,
};
use crate::transform::title_case;

/// `"<title>" (<date string>)`
static EPISODE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^"(.+)"\s*\((.+)\)"#).expect("Invalid episode line regex"));

/// `S<season>E<episode>`
static EPISODE_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^S(\d+)E(\d+)").expect("Invalid episode code regex"));

const SUBJECT_CODE_COLUMN: &str = "EPISODE";
const SUBJECT_TITLE_COLUMN: &str = "TITLE";

// ============================================================================
// Title/date source
// ============================================================================

/// Parse the title/date text
///
/// Numbering follows line position (1-based), so blank or unmatched lines
/// still consume a number.
pub fn parse_episode_dates(content: &str) -> Vec<RawEpisodeDate> {
    content
        .lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let line = line.trim();
            if line.is_empty() {
                return None;
            }
            let Some(caps) = EPISODE_LINE.captures(line) else {
                warn!(line = i + 1, "Skipping line that does not match \"Title\" (Date)");
                return None;
            };
            Some(RawEpisodeDate::new(i as i64 + 1, &caps[1], &caps[2]))
        })
        .collect()
}

pub fn extract_episode_dates(path: &Path) -> Vec<RawEpisodeDate> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let episodes = parse_episode_dates(&content);
            info!("Extracted {} episodes from dates file", episodes.len());
            episodes
        }
        Err(e) => {
            error!("Error extracting episode dates from {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

// ============================================================================
// Color table
// ============================================================================

/// Header positions of a CSV table
struct Columns {
    headers: StringRecord,
}

impl Columns {
    fn position(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim() == name)
    }

    fn get<'r>(&self, record: &'r StringRecord, name: &str) -> Option<&'r str> {
        self.position(name).and_then(|i| record.get(i))
    }
}

/// Decode a `['a', 'b']` list cell
fn parse_list_cell(cell: &str) -> Result<Vec<String>, serde_json::Error> {
    let cleaned = cell.replace("\r\n", "").replace(['\r', '\n'], "").replace('\'', "\"");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() || cleaned == "[]" {
        return Ok(Vec::new());
    }
    serde_json::from_str(cleaned)
}

/// Integer cell; accepts "12" and "12.0"
fn parse_int_cell(cell: &str) -> Option<i64> {
    let cell = cell.trim();
    cell.parse::<i64>().ok().or_else(|| {
        cell.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && v.fract() == 0.0)
            .map(|v| v as i64)
    })
}

fn color_row(columns: &Columns, record: &StringRecord, row: usize) -> Option<RawColorEntry> {
    let text = |name: &str| columns.get(record, name).unwrap_or("").to_string();

    let Some(painting_index) = columns
        .get(record, "painting_index")
        .and_then(parse_int_cell)
    else {
        warn!(row, "Skipping color row without a numeric painting_index");
        return None;
    };

    let names = parse_list_cell(columns.get(record, "colors").unwrap_or("[]"));
    let hex_values = parse_list_cell(columns.get(record, "color_hex").unwrap_or("[]"));
    let (names, hex_values) = match (names, hex_values) {
        (Ok(names), Ok(hex_values)) => (names, hex_values),
        (Err(e), _) | (_, Err(e)) => {
            warn!("Error parsing colors for row {}: {}", painting_index, e);
            return None;
        }
    };

    let colors = RawColorEntry::pair_colors(names, hex_values);
    let int_or_one = |name: &str| columns.get(record, name).and_then(parse_int_cell).unwrap_or(1);

    Some(RawColorEntry {
        painting_index,
        episode_num: painting_index,
        title: text("painting_title"),
        season: int_or_one("season"),
        episode: int_or_one("episode"),
        img_src: text("img_src"),
        youtube_src: text("youtube_src"),
        num_colors: colors.len(),
        colors,
    })
}

pub fn parse_colors<R: Read>(reader: R) -> csv::Result<Vec<RawColorEntry>> {
    let mut csv_reader = ReaderBuilder::new().flexible(true).from_reader(reader);
    let columns = Columns {
        headers: csv_reader.headers()?.clone(),
    };

    let mut entries = Vec::new();
    for (i, result) in csv_reader.records().enumerate() {
        match result {
            Ok(record) => entries.extend(color_row(&columns, &record, i + 1)),
            Err(e) => warn!(row = i + 1, "Skipping unreadable color row: {}", e),
        }
    }
    Ok(entries)
}

pub fn extract_colors(path: &Path) -> Vec<RawColorEntry> {
    let result = std::fs::File::open(path)
        .map_err(csv::Error::from)
        .and_then(parse_colors);

    match result {
        Ok(entries) => {
            info!("Extracted {} episodes with color data", entries.len());
            entries
        }
        Err(e) => {
            error!("Error extracting colors data from {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

// ============================================================================
// Subject table
// ============================================================================

fn is_truthy(cell: &str) -> bool {
    let cell = cell.trim();
    cell == "1" || cell == "1.0" || cell.eq_ignore_ascii_case("true")
}

/// "MOUNTAIN_WATERFALL" → "Mountain Waterfall"
fn subject_from_column(column: &str) -> String {
    title_case(&column.replace('_', " "))
}

pub fn parse_subjects<R: Read>(reader: R) -> csv::Result<Vec<RawSubjectEntry>> {
    let mut csv_reader = ReaderBuilder::new().flexible(true).from_reader(reader);
    let columns = Columns {
        headers: csv_reader.headers()?.clone(),
    };

    let subject_columns: Vec<(usize, String)> = columns
        .headers
        .iter()
        .enumerate()
        .filter(|(_, h)| {
            let h = h.trim();
            h != SUBJECT_CODE_COLUMN && h != SUBJECT_TITLE_COLUMN
        })
        .map(|(i, h)| (i, subject_from_column(h.trim())))
        .collect();

    let mut entries = Vec::new();
    for (i, result) in csv_reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!(row = i + 1, "Skipping unreadable subject row: {}", e);
                continue;
            }
        };

        let code = columns.get(&record, SUBJECT_CODE_COLUMN).unwrap_or("").trim();
        let parsed = EPISODE_CODE.captures(code).and_then(|caps| {
            Some((caps[1].parse::<i64>().ok()?, caps[2].parse::<i64>().ok()?))
        });
        let Some((season, episode)) = parsed else {
            warn!(row = i + 1, code, "Skipping subject row with unrecognized episode code");
            continue;
        };

        let subjects = subject_columns
            .iter()
            .filter(|(index, _)| record.get(*index).map(is_truthy).unwrap_or(false))
            .map(|(_, name)| name.clone())
            .collect();

        entries.push(RawSubjectEntry {
            episode_num: episode_number(season, episode),
            episode_code: code.to_string(),
            title: columns
                .get(&record, SUBJECT_TITLE_COLUMN)
                .unwrap_or("")
                .trim_matches('"')
                .to_string(),
            season,
            episode,
            subjects,
        });
    }
    Ok(entries)
}

pub fn extract_subjects(path: &Path) -> Vec<RawSubjectEntry> {
    let result = std::fs::File::open(path)
        .map_err(csv::Error::from)
        .and_then(parse_subjects);

    match result {
        Ok(entries) => {
            info!("Extracted {} episodes with subject data", entries.len());
            entries
        }
        Err(e) => {
            error!("Error extracting subject data from {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

/// Read all three sources
pub fn extract_all(files: &DataFiles) -> ExtractedData {
    info!("Starting data extraction...");

    ExtractedData {
        episode_dates: extract_episode_dates(&files.episode_dates),
        colors: extract_colors(&files.colors),
        subjects: extract_subjects(&files.subjects),
    }
}
