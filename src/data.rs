//! Data Loading and Record Types
//!
//! Handles the two tabular inputs of the pipeline with Polars:
//! the semicolon-delimited vertex attribute table and the semicolon-delimited,
//! header-carrying edge table consumed by the graph builder. The raw
//! (headerless) alignment table used by the filter is parsed line-by-line
//! into `AlignmentRecord` values instead, since that stage streams.

use anyhow::{Context, Result};
use polars::prelude::*;
use rustc_hash::FxHashMap;
use std::path::Path;
use thiserror::Error;

/// Structural failures of the pipeline.
///
/// Per-record anomalies (missing identity/coverage fields) are skip-and-log
/// and never surface here; everything below aborts the run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("identity and coverage thresholds must be supplied together")]
    ThresholdsIncomplete,

    #[error("edge {edge} references unknown vertex '{name}'")]
    UnknownVertex { edge: usize, name: String },

    #[error("self-loop on vertex '{name}' in graph builder input")]
    SelfLoop { name: String },

    #[error("malformed alignment record at line {line_no}: {reason}")]
    MalformedRecord { line_no: usize, reason: String },
}

/// One pairwise alignment, in diamond/BLAST tabular column order.
///
/// `pident`/`ppos` are optional: an empty field is a per-record anomaly that
/// the filter skips, not a structural error. The raw input line is retained
/// so kept records can be written through unmodified.
#[derive(Debug, Clone)]
pub struct AlignmentRecord {
    pub qseqid: String,
    pub qlen: u64,
    pub qstart: u64,
    pub qend: u64,
    pub sseqid: String,
    pub slen: u64,
    pub sstart: u64,
    pub send: u64,
    pub length: u64,
    pub pident: Option<f64>,
    pub ppos: Option<f64>,
    pub score: i64,
    pub evalue: f64,
    pub bitscore: f64,
    pub raw: String,
}

/// Expected field count of the alignment table
pub const ALIGNMENT_FIELDS: usize = 14;

impl AlignmentRecord {
    /// Parse one line of the headerless alignment table.
    ///
    /// A wrong field count or a garbled numeric field means the file itself is
    /// not an alignment table and is fatal. Empty `pident`/`ppos` fields parse
    /// to `None`.
    pub fn parse(line: &str, delimiter: char, line_no: usize) -> Result<Self, PipelineError> {
        let fields: Vec<&str> = line.split(delimiter).collect();
        if fields.len() != ALIGNMENT_FIELDS {
            return Err(PipelineError::MalformedRecord {
                line_no,
                reason: format!("expected {} fields, found {}", ALIGNMENT_FIELDS, fields.len()),
            });
        }

        let int = |idx: usize| -> Result<u64, PipelineError> {
            fields[idx].trim().parse().map_err(|_| PipelineError::MalformedRecord {
                line_no,
                reason: format!("field {} is not an integer: '{}'", idx + 1, fields[idx]),
            })
        };
        let float = |idx: usize| -> Result<f64, PipelineError> {
            fields[idx].trim().parse().map_err(|_| PipelineError::MalformedRecord {
                line_no,
                reason: format!("field {} is not a number: '{}'", idx + 1, fields[idx]),
            })
        };
        // Missing identity/coverage values are tolerated here; the filter
        // decides whether to skip the record.
        let optional_float = |idx: usize| -> Option<f64> {
            let value = fields[idx].trim();
            if value.is_empty() || value.eq_ignore_ascii_case("nan") {
                None
            } else {
                value.parse().ok()
            }
        };

        Ok(AlignmentRecord {
            qseqid: fields[0].to_string(),
            qlen: int(1)?,
            qstart: int(2)?,
            qend: int(3)?,
            sseqid: fields[4].to_string(),
            slen: int(5)?,
            sstart: int(6)?,
            send: int(7)?,
            length: int(8)?,
            pident: optional_float(9),
            ppos: optional_float(10),
            score: fields[11].trim().parse().map_err(|_| PipelineError::MalformedRecord {
                line_no,
                reason: format!("field 12 is not an integer: '{}'", fields[11]),
            })?,
            evalue: float(12)?,
            bitscore: float(13)?,
            raw: line.to_string(),
        })
    }

    /// Unordered (query, target) pair key for deduplication
    pub fn pair_key(&self) -> (String, String) {
        if self.qseqid <= self.sseqid {
            (self.qseqid.clone(), self.sseqid.clone())
        } else {
            (self.sseqid.clone(), self.qseqid.clone())
        }
    }

    /// True when query and target are the same sequence
    pub fn is_self_loop(&self) -> bool {
        self.qseqid == self.sseqid
    }
}

/// Per-vertex annotation attributes.
///
/// Values never loaded or loaded empty are the literal "NA".
#[derive(Debug, Clone)]
pub struct VertexAttributes {
    /// Pipe-delimited raw database identifiers ("PF00069|IPR000719", "nan", ...)
    pub identifiant: String,
    pub phylum: String,
    pub genus: String,
    pub trophy: String,
}

impl VertexAttributes {
    pub fn na() -> Self {
        VertexAttributes {
            identifiant: "NA".to_string(),
            phylum: "NA".to_string(),
            genus: "NA".to_string(),
            trophy: "NA".to_string(),
        }
    }
}

/// Vertex attribute table, keyed by vertex name.
///
/// `names` preserves file order; the graph builder uses it so component
/// discovery order is stable across runs.
#[derive(Debug, Clone)]
pub struct VertexTable {
    pub names: Vec<String>,
    pub attrs: FxHashMap<String, VertexAttributes>,
}

impl VertexTable {
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&VertexAttributes> {
        self.attrs.get(name)
    }
}

fn field_or_na(column: &StringChunked, idx: usize) -> String {
    match column.get(idx) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => "NA".to_string(),
    }
}

/// Load the semicolon-delimited vertex attribute table (header row required).
///
/// Minimum columns: name, identifiant, Phylum_Metdb, Genus_Metdb, Trophy.
pub fn load_vertex_table(path: &Path) -> Result<VertexTable> {
    let df = read_semicolon_table(path)?;

    let name_col = df
        .column("name")
        .with_context(|| format!("Column 'name' not found in {:?}", path))?
        .str()
        .with_context(|| "Column 'name' is not string type")?;
    let identifiant_col = df
        .column("identifiant")
        .with_context(|| format!("Column 'identifiant' not found in {:?}", path))?
        .str()?;
    let phylum_col = df
        .column("Phylum_Metdb")
        .with_context(|| format!("Column 'Phylum_Metdb' not found in {:?}", path))?
        .str()?;
    let genus_col = df
        .column("Genus_Metdb")
        .with_context(|| format!("Column 'Genus_Metdb' not found in {:?}", path))?
        .str()?;
    let trophy_col = df
        .column("Trophy")
        .with_context(|| format!("Column 'Trophy' not found in {:?}", path))?
        .str()?;

    let mut names = Vec::with_capacity(df.height());
    let mut attrs = FxHashMap::default();

    for idx in 0..df.height() {
        let Some(name) = name_col.get(idx) else {
            continue;
        };
        names.push(name.to_string());
        attrs.insert(
            name.to_string(),
            VertexAttributes {
                identifiant: field_or_na(identifiant_col, idx),
                phylum: field_or_na(phylum_col, idx),
                genus: field_or_na(genus_col, idx),
                trophy: field_or_na(trophy_col, idx),
            },
        );
    }

    Ok(VertexTable { names, attrs })
}

/// Load the semicolon-delimited edge table (header row required).
///
/// The graph builder only consumes `qseqid` and `sseqid`; the remaining
/// alignment columns ride along untouched.
pub fn load_edge_table(path: &Path) -> Result<DataFrame> {
    read_semicolon_table(path)
}

fn read_semicolon_table(path: &Path) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .map_parse_options(|opts| opts.with_separator(b';'))
        .try_into_reader_with_file_path(Some(path.into()))
        .with_context(|| format!("Failed to create CSV reader: {:?}", path))?
        .finish()
        .with_context(|| format!("Failed to load table: {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const LINE: &str = "A\t100\t1\t100\tB\t120\t5\t104\t100\t98.5\t99.1\t450\t1e-50\t204.5";

    #[test]
    fn test_parse_alignment_record() {
        let record = AlignmentRecord::parse(LINE, '\t', 1).unwrap();
        assert_eq!(record.qseqid, "A");
        assert_eq!(record.sseqid, "B");
        assert_eq!(record.qlen, 100);
        assert_eq!(record.pident, Some(98.5));
        assert_eq!(record.ppos, Some(99.1));
        assert_eq!(record.score, 450);
        assert_eq!(record.raw, LINE);
        assert!(!record.is_self_loop());
    }

    #[test]
    fn test_parse_missing_identity_is_none() {
        let line = LINE.replace("98.5", "");
        let record = AlignmentRecord::parse(&line, '\t', 1).unwrap();
        assert_eq!(record.pident, None);
        assert_eq!(record.ppos, Some(99.1));
    }

    #[test]
    fn test_parse_wrong_field_count_is_fatal() {
        let err = AlignmentRecord::parse("A\tB\tC", '\t', 7).unwrap_err();
        match err {
            PipelineError::MalformedRecord { line_no, .. } => assert_eq!(line_no, 7),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_pair_key_is_unordered() {
        let forward = AlignmentRecord::parse(LINE, '\t', 1).unwrap();
        let line = "B\t120\t5\t104\tA\t100\t1\t100\t100\t98.5\t99.1\t450\t1e-50\t204.5";
        let reverse = AlignmentRecord::parse(line, '\t', 2).unwrap();
        assert_eq!(forward.pair_key(), reverse.pair_key());
    }

    #[test]
    fn test_load_vertex_table_empty_becomes_na() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name;identifiant;Phylum_Metdb;Genus_Metdb;Trophy").unwrap();
        writeln!(file, "S1-01-x;PF00069|SM00220;Bacillariophyta;Thalassiosira;photo").unwrap();
        writeln!(file, "S2-01-y;;;Navicula;").unwrap();

        let table = load_vertex_table(file.path()).unwrap();
        assert_eq!(table.len(), 2);

        let first = table.get("S1-01-x").unwrap();
        assert_eq!(first.identifiant, "PF00069|SM00220");
        assert_eq!(first.trophy, "photo");

        let second = table.get("S2-01-y").unwrap();
        assert_eq!(second.identifiant, "NA");
        assert_eq!(second.phylum, "NA");
        assert_eq!(second.genus, "Navicula");
        assert_eq!(second.trophy, "NA");
    }
}
