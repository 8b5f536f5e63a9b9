use crate::cli::args::Cli;
use crate::core::fastx::LengthReader;
use crate::core::model::{Haplotype, ReadLength, Sweep};
use crate::report::phasing_txt;
use anyhow::{Result, bail};
use clap::Parser;
use std::env;
use std::io::{self, Write};
use std::path::Path;
use std::time::{Duration, Instant};

pub fn entry() -> Result<()> {
    run(Cli::parse())
}

fn run(args: Cli) -> Result<()> {
    let stats = stats_enabled();
    let t0 = Instant::now();

    for path in [&args.mat, &args.pat, &args.unk] {
        if !path.is_file() {
            bail!("input file not found: {}", path.display());
        }
    }
    if args.sweep_step == 0 {
        bail!("--sweep-step must be >= 1");
    }

    let sweep = Sweep {
        start: args.sweep_start,
        stop: args.sweep_stop,
        step: args.sweep_step,
    };

    let inputs = [
        (args.mat.as_path(), Haplotype::Mat),
        (args.pat.as_path(), Haplotype::Pat),
        (args.unk.as_path(), Haplotype::Unk),
    ];
    let reads = collect_reads(&inputs, stats)?;

    let t_report = Instant::now();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    phasing_txt::write(&mut out, &reads, sweep)?;
    out.flush()?;
    stage_done(stats, "report", t_report);

    if stats {
        eprintln!(
            "PHASELEN_STATS reads={} total={}",
            reads.len(),
            fmt_dur(t0.elapsed())
        );
    }

    Ok(())
}

fn collect_reads(inputs: &[(&Path, Haplotype)], stats: bool) -> Result<Vec<ReadLength>> {
    let mut reads = Vec::new();
    for &(path, tag) in inputs {
        let t = Instant::now();
        let before = reads.len();
        for record in LengthReader::open(path, tag)? {
            reads.push(record?);
        }
        if stats {
            eprintln!(
                "PHASELEN_STATS file={} tag={} reads={} time={}",
                path.display(),
                tag.as_str(),
                reads.len() - before,
                fmt_dur(t.elapsed())
            );
        }
    }
    Ok(reads)
}

fn stats_enabled() -> bool {
    matches!(env::var("PHASELEN_STATS").as_deref(), Ok("1"))
}

fn stage_done(stats: bool, name: &str, t: Instant) {
    if stats {
        eprintln!("PHASELEN_STATS stage={} time={}", name, fmt_dur(t.elapsed()));
    }
}

fn fmt_dur(d: Duration) -> String {
    if d.as_secs_f64() < 1.0 {
        format!("{}ms", d.as_millis())
    } else {
        format!("{:.3}s", d.as_secs_f64())
    }
}
