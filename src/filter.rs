//! Alignment Filter
//!
//! Two filtering modes over the raw pairwise-alignment table, mirroring the
//! upstream diamond post-processing step:
//!
//! - **Deduplication-only**: no thresholds configured. The first occurrence of
//!   each unordered (query, target) pair is kept, later occurrences (exact
//!   repeats or the mirrored pair) are dropped. Records pass through
//!   otherwise unmodified, self-loops included unless configured away.
//! - **Threshold filtering**: every (identity, coverage) pair of the config's
//!   cross product gets its own independent scan. A record is kept when
//!   pident >= identity AND ppos >= coverage AND it is not a self-loop.
//!
//! Both modes stream: a record is read, judged, and written or dropped
//! immediately. Threshold combinations are independent and run in parallel.

use crate::config::PipelineConfig;
use crate::data::{AlignmentRecord, PipelineError};
use ahash::AHashSet;
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Counters reported for one filtering run.
///
/// Removed counts are derived by subtraction from the seen/kept pairs.
/// Records skipped for missing identity/coverage values appear in no counter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterStats {
    /// Alignments in the base SSN
    pub alignments_seen: usize,
    /// Alignments surviving the filter
    pub alignments_kept: usize,
    /// Distinct query vertices in the base SSN
    pub nodes_seen: usize,
    /// Distinct query vertices surviving the filter
    pub nodes_kept: usize,
}

impl FilterStats {
    pub fn alignments_removed(&self) -> usize {
        self.alignments_seen - self.alignments_kept
    }

    pub fn nodes_removed(&self) -> usize {
        self.nodes_seen - self.nodes_kept
    }

    /// Companion statistics report, one counter per line
    pub fn report(&self) -> String {
        format!(
            "nb of alignments in base SSN : {}\n\
             nb of alignments in filtered SSN : {}\n\
             nb of alignments removed : {}\n\
             nb of nodes in base SSN : {}\n\
             nb of nodes in filtered SSN : {}\n\
             nb of nodes removed : {}",
            self.alignments_seen,
            self.alignments_kept,
            self.alignments_removed(),
            self.nodes_seen,
            self.nodes_kept,
            self.nodes_removed(),
        )
    }
}

/// One completed threshold run
#[derive(Debug)]
pub struct ThresholdRun {
    pub identity: f64,
    pub coverage: f64,
    pub output: PathBuf,
    pub stats: FilterStats,
}

/// Outcome of `run_filter`, depending on the configured mode
#[derive(Debug)]
pub enum FilterOutcome {
    Dedup { output: PathBuf, stats: FilterStats },
    Thresholds(Vec<ThresholdRun>),
}

/// Dispatch on the configured mode.
///
/// Supplying exactly one of identity/coverage is a parameter error and
/// produces no output files.
pub fn run_filter(input: &Path, config: &PipelineConfig) -> Result<FilterOutcome> {
    match (config.identity.is_empty(), config.coverage.is_empty()) {
        (true, true) => {
            println!("No filtering thresholds provided, removing repeating pairs ...");
            let output = suffixed_path(input, "_filtered");
            let stats = dedup_alignments(input, &output, config)?;
            Ok(FilterOutcome::Dedup { output, stats })
        }
        (false, false) => {
            println!("*** FILTERING FILE ***");
            let runs = filter_by_thresholds(input, config)?;
            Ok(FilterOutcome::Thresholds(runs))
        }
        _ => Err(PipelineError::ThresholdsIncomplete.into()),
    }
}

/// Deduplication-only pass: first unordered pair occurrence wins.
pub fn dedup_alignments(
    input: &Path,
    output: &Path,
    config: &PipelineConfig,
) -> Result<FilterStats> {
    let reader = open_input(input)?;
    let mut writer = BufWriter::new(
        File::create(output).with_context(|| format!("Failed to create {:?}", output))?,
    );

    let mut seen_pairs: AHashSet<(String, String)> = AHashSet::new();
    let mut queries_seen: AHashSet<String> = AHashSet::new();
    let mut queries_kept: AHashSet<String> = AHashSet::new();
    let mut stats = FilterStats::default();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read {:?}", input))?;
        if line.is_empty() {
            continue;
        }
        let record = AlignmentRecord::parse(&line, config.edge_delimiter, line_no + 1)?;

        stats.alignments_seen += 1;
        queries_seen.insert(record.qseqid.clone());

        if config.drop_self_loops_in_dedup && record.is_self_loop() {
            continue;
        }
        if !seen_pairs.insert(record.pair_key()) {
            continue;
        }

        stats.alignments_kept += 1;
        queries_kept.insert(record.qseqid.clone());
        writeln!(writer, "{}", record.raw)?;
    }

    stats.nodes_seen = queries_seen.len();
    stats.nodes_kept = queries_kept.len();
    writer.flush()?;
    Ok(stats)
}

/// Threshold filtering: one independent scan per (identity, coverage) pair.
///
/// Scans are embarrassingly parallel, each writing its own deterministically
/// named output and `_stats` report.
pub fn filter_by_thresholds(input: &Path, config: &PipelineConfig) -> Result<Vec<ThresholdRun>> {
    let pairs = config.threshold_pairs();

    pairs
        .par_iter()
        .map(|&(identity, coverage)| {
            println!("filtering ||| coverage : {coverage}%, identity : {identity}%");
            let output = suffixed_path(
                input,
                &format!("_pcov{}_pident{}", coverage as i64, identity as i64),
            );
            let stats = threshold_scan(input, &output, identity, coverage, config)?;

            let stats_path = suffixed_path(&output, "_stats");
            std::fs::write(&stats_path, stats.report())
                .with_context(|| format!("Failed to write stats report {:?}", stats_path))?;

            Ok(ThresholdRun { identity, coverage, output, stats })
        })
        .collect()
}

fn threshold_scan(
    input: &Path,
    output: &Path,
    identity: f64,
    coverage: f64,
    config: &PipelineConfig,
) -> Result<FilterStats> {
    let reader = open_input(input)?;
    let mut writer = BufWriter::new(
        File::create(output).with_context(|| format!("Failed to create {:?}", output))?,
    );

    let mut queries_seen: AHashSet<String> = AHashSet::new();
    let mut queries_kept: AHashSet<String> = AHashSet::new();
    let mut stats = FilterStats::default();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read {:?}", input))?;
        if line.is_empty() {
            continue;
        }
        let record = AlignmentRecord::parse(&line, config.edge_delimiter, line_no + 1)?;

        // Missing identity or coverage values: skip and log, outside the
        // counters so the subtraction-derived removed count stays honest.
        let (Some(pident), Some(ppos)) = (record.pident, record.ppos) else {
            eprintln!(
                "skipping record at line {} ({} - {}): missing identity/coverage value",
                line_no + 1,
                record.qseqid,
                record.sseqid
            );
            continue;
        };

        stats.alignments_seen += 1;
        queries_seen.insert(record.qseqid.clone());

        if record.is_self_loop() || pident < identity || ppos < coverage {
            continue;
        }

        stats.alignments_kept += 1;
        queries_kept.insert(record.qseqid.clone());
        writeln!(writer, "{}", record.raw)?;
    }

    stats.nodes_seen = queries_seen.len();
    stats.nodes_kept = queries_kept.len();
    writer.flush()?;
    Ok(stats)
}

fn open_input(input: &Path) -> Result<BufReader<File>> {
    Ok(BufReader::new(
        File::open(input).with_context(|| format!("Failed to open {:?}", input))?,
    ))
}

/// Append a suffix to a path's final component ("edges.tsv" -> "edges.tsv_pcov80_pident90")
fn suffixed_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}
