use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "phaselen",
    version,
    about = "Read-length phasing report for haplotype-tagged reads"
)]
pub struct Cli {
    /// Reads tagged as maternal (FASTA/FASTQ, optionally gzipped)
    pub mat: PathBuf,

    /// Reads tagged as paternal
    pub pat: PathBuf,

    /// Reads with unknown haplotype
    pub unk: PathBuf,

    /// First minimum-length threshold of the sweep
    #[arg(long, default_value_t = 0)]
    pub sweep_start: u64,

    /// End of the sweep, exclusive
    #[arg(long, default_value_t = 150_000)]
    pub sweep_stop: u64,

    /// Threshold increment
    #[arg(long, default_value_t = 2_000)]
    pub sweep_step: u64,
}
