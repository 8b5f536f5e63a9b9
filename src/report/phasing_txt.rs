use crate::core::model::{Haplotype, ReadLength, Sweep};
use anyhow::Result;
use std::io::Write;

pub const HEADER: &str =
    "min_read_length\tmat\tmat_count\tpat\tpat_count\tunknown\tunknown_count\tGbp";

#[derive(Clone, Copy, Debug)]
pub struct Row {
    pub min_len: u64,
    pub counts: [u64; 3],
    pub total: u64,
    pub gbp: f64,
}

impl Row {
    pub fn percent(&self, tag: Haplotype) -> f64 {
        100.0 * self.counts[tag.index()] as f64 / self.total as f64
    }
}

/// One row per threshold; thresholds that no record survives are skipped.
pub fn build_rows(reads: &[ReadLength], sweep: Sweep) -> Vec<Row> {
    sweep
        .thresholds()
        .filter_map(|min_len| build_row(reads, min_len))
        .collect()
}

fn build_row(reads: &[ReadLength], min_len: u64) -> Option<Row> {
    // Fixed per-tag slots so every tag is reported even with zero matches.
    let mut counts = [0u64; 3];
    let mut bases = 0u64;
    for read in reads.iter().filter(|r| r.length >= min_len) {
        counts[read.tag.index()] += 1;
        bases += read.length;
    }
    let total: u64 = counts.iter().sum();
    if total == 0 {
        return None;
    }
    Some(Row {
        min_len,
        counts,
        total,
        gbp: bases as f64 / 1e9,
    })
}

pub fn write(w: &mut dyn Write, reads: &[ReadLength], sweep: Sweep) -> Result<()> {
    writeln!(w, "{}", HEADER)?;
    for row in build_rows(reads, sweep) {
        write!(w, "{}", row.min_len)?;
        for tag in Haplotype::ALL {
            write!(w, "\t{:.1}\t{}", row.percent(tag), row.counts[tag.index()])?;
        }
        writeln!(w, "\t{:.4}", row.gbp)?;
    }
    Ok(())
}
