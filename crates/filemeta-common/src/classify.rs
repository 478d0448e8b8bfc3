//! Path classification
//!
//! Derives sample metadata from a sequencing file path using the naming
//! conventions of the sequencing facility. Every function here is total: a
//! path that matches no convention still yields a best-effort value.
//!
//! Paths are split on `/` only. The basename is the final segment and the
//! parent is the segment before it (empty for single-segment paths).
//!
//! # Example
//!
//! ```
//! use filemeta_common::classify::{parse_sample_id, parse_sample_name};
//!
//! let path = "/data/run1/GEX_S1_L001_R1_001.fastq.gz";
//! assert_eq!(parse_sample_name(path), "GEX_S1_L001");
//! assert_eq!(parse_sample_id(path), "GEX_S1_L001");
//! ```

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{SampleFileRecord, SampleType};

/// Markers that terminate a sample id (lane, read, file extension)
pub const SAMPLE_ID_MARKERS: &[&str] = &["_L00", "_R", ".fastq"];

/// Parent folder name that is known to hold nanopore reads
const NANOPORE_DROP_FOLDER: &str = "2025-09-23_fq";

#[allow(clippy::expect_used)]
static DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]{4}-[0-9]{2}-[0-9]{2}").expect("date pattern is valid"));

/// Token window of a basename used as the sample name
#[derive(Debug, Clone, Copy)]
struct NameRule {
    prefixes: &'static [&'static str],
    skip: usize,
    take: usize,
}

/// Sample name rules, first matching prefix wins
const NAME_RULES: &[NameRule] = &[
    NameRule {
        prefixes: &["GEX", "MUX"],
        skip: 0,
        take: 3,
    },
    NameRule {
        prefixes: &["ic"],
        skip: 1,
        take: 3,
    },
];

/// Applied when no prefix in [`NAME_RULES`] matches
const DEFAULT_NAME_RULE: NameRule = NameRule {
    prefixes: &[],
    skip: 0,
    take: 1,
};

/// The two path segments the type rules look at
#[derive(Debug, Clone, Copy)]
struct PathParts<'a> {
    basename: &'a str,
    parent: &'a str,
}

impl<'a> PathParts<'a> {
    fn new(path: &'a str) -> Self {
        let mut segments = path.rsplit('/');
        let basename = segments.next().unwrap_or(path);
        let parent = segments.next().unwrap_or("");
        Self { basename, parent }
    }
}

type TypeRule = (fn(&PathParts<'_>) -> bool, SampleType);

/// Sample type rules in priority order, first match wins. Matching is
/// case-sensitive and by substring, so order is what breaks ties.
const SAMPLE_TYPE_RULES: &[TypeRule] = &[
    (|p| p.parent.contains("amplicons"), SampleType::Amplicon),
    (
        |p| p.basename.contains("alpha") || p.basename.contains("beta"),
        SampleType::BulkTcr,
    ),
    (
        |p| p.parent.contains("nanopore") || p.parent == NANOPORE_DROP_FOLDER,
        SampleType::NanoporeWgs,
    ),
    (
        |p| p.parent.contains("IAR_TCR") || p.parent.contains("scTCR"),
        SampleType::ScRnaVdj,
    ),
    (
        |p| p.parent.contains("scrna") || p.parent.contains("scRNA") || p.parent.contains("sc"),
        SampleType::ScRna,
    ),
    (|p| p.parent.contains("atac"), SampleType::Atac),
];

const DEFAULT_SAMPLE_TYPE: SampleType = SampleType::Wgs;

/// Final `/` segment of a path
pub fn basename(path: &str) -> &str {
    PathParts::new(path).basename
}

/// Sample name from the basename's underscore-delimited tokens
///
/// `GEX*`/`MUX*` keep the first three tokens, `ic*` keeps tokens two to four,
/// everything else keeps the first token. Short basenames yield whatever
/// tokens exist.
pub fn parse_sample_name(path: &str) -> String {
    let name = basename(path);
    let rule = NAME_RULES
        .iter()
        .find(|rule| rule.prefixes.iter().any(|prefix| name.starts_with(prefix)))
        .unwrap_or(&DEFAULT_NAME_RULE);

    name.split('_')
        .skip(rule.skip)
        .take(rule.take)
        .collect::<Vec<_>>()
        .join("_")
}

/// Sample id: the sample name plus any lane/replicate text up to the first
/// lane, read or extension marker after the name
///
/// Without a marker the remainder of the basename is kept, extension included.
pub fn parse_sample_id(path: &str) -> String {
    let name = basename(path);
    let sample_name = parse_sample_name(name);
    let start = name.find(&sample_name).unwrap_or(0);
    let search_from = start + sample_name.len();

    let end = SAMPLE_ID_MARKERS
        .iter()
        .filter_map(|marker| name[search_from..].find(marker))
        .min()
        .map_or(name.len(), |offset| search_from + offset);

    name[start..end].to_string()
}

/// Assay type from the basename and its parent folder
pub fn parse_sample_type(path: &str) -> SampleType {
    let parts = PathParts::new(path);
    SAMPLE_TYPE_RULES
        .iter()
        .find(|(matches, _)| matches(&parts))
        .map_or(DEFAULT_SAMPLE_TYPE, |(_, sample_type)| *sample_type)
}

/// First `YYYY-MM-DD` substring anywhere in the path
///
/// Only the first candidate is considered; if it is not a real calendar date
/// the result is `None` rather than a later match.
pub fn parse_date(path: &str) -> Option<NaiveDate> {
    let candidate = DATE_PATTERN.find(path)?;
    NaiveDate::parse_from_str(candidate.as_str(), "%Y-%m-%d").ok()
}

/// Build the full record for one path
pub fn classify(path: &str) -> SampleFileRecord {
    SampleFileRecord {
        sample_name: parse_sample_name(path),
        sample_id: parse_sample_id(path),
        sample_type: parse_sample_type(path),
        received: parse_date(path),
        fpath: path.to_string(),
    }
}
