use crate::core::io::open_reader;
use crate::core::model::{Haplotype, ReadLength};
use anyhow::{Context, Result, bail};
use std::io::BufRead;
use std::path::{Path, PathBuf};

const PROGRESS_EVERY: u64 = 100_000;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Format {
    Fasta,
    Fastq,
}

/// Streams one `ReadLength` per record of a FASTA/FASTQ(.gz) file, in file
/// order. The format is decided by the first byte: `>` FASTA, `@` FASTQ.
/// An overwritable progress counter goes to stderr while iterating.
pub struct LengthReader {
    reader: Box<dyn BufRead>,
    path: PathBuf,
    tag: Haplotype,
    format: Option<Format>,
    line: Vec<u8>,
    // `line` holds the next record's header, already read.
    carry: bool,
    count: u64,
    done: bool,
}

impl LengthReader {
    pub fn open(path: &Path, tag: Haplotype) -> Result<Self> {
        let reader = open_reader(path)?;
        Ok(Self {
            reader,
            path: path.to_path_buf(),
            tag,
            format: None,
            line: Vec::new(),
            carry: false,
            count: 0,
            done: false,
        })
    }

    fn read_line(&mut self) -> Result<bool> {
        self.line.clear();
        let n = self
            .reader
            .read_until(b'\n', &mut self.line)
            .with_context(|| format!("read error in {}", self.path.display()))?;
        if n == 0 {
            return Ok(false);
        }
        while matches!(self.line.last(), Some(b'\n' | b'\r')) {
            self.line.pop();
        }
        Ok(true)
    }

    fn next_record(&mut self) -> Result<Option<u64>> {
        let format = match self.format {
            Some(f) => f,
            None => {
                // The first line of the file decides the format; an empty
                // file is valid and holds zero records.
                if !self.read_line()? {
                    return Ok(None);
                }
                let f = match self.line.first() {
                    Some(b'>') => Format::Fasta,
                    Some(b'@') => Format::Fastq,
                    _ => bail!("{}: not a FASTA or FASTQ file", self.path.display()),
                };
                self.format = Some(f);
                self.carry = true;
                f
            }
        };
        match format {
            Format::Fasta => self.next_fasta(),
            Format::Fastq => self.next_fastq(),
        }
    }

    fn next_fasta(&mut self) -> Result<Option<u64>> {
        if !self.carry {
            return Ok(None);
        }
        self.carry = false;
        let mut length = 0u64;
        while self.read_line()? {
            if self.line.first() == Some(&b'>') {
                self.carry = true;
                break;
            }
            length += self.line.len() as u64;
        }
        Ok(Some(length))
    }

    fn next_fastq(&mut self) -> Result<Option<u64>> {
        if !self.carry && !self.read_line()? {
            return Ok(None);
        }
        self.carry = false;
        let record = self.count + 1;
        if self.line.first() != Some(&b'@') {
            bail!(
                "{}: malformed FASTQ header at record {}",
                self.path.display(),
                record
            );
        }
        if !self.read_line()? {
            bail!("{}: truncated FASTQ record {}", self.path.display(), record);
        }
        let length = self.line.len() as u64;
        if !self.read_line()? || self.line.first() != Some(&b'+') {
            bail!(
                "{}: missing '+' separator in FASTQ record {}",
                self.path.display(),
                record
            );
        }
        if !self.read_line()? {
            bail!("{}: truncated FASTQ record {}", self.path.display(), record);
        }
        Ok(Some(length))
    }
}

impl Iterator for LengthReader {
    type Item = Result<ReadLength>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_record() {
            Ok(Some(length)) => {
                self.count += 1;
                if self.count % PROGRESS_EVERY == 0 {
                    eprint!("\r{} {}", self.tag.as_str(), fmt_thousands(self.count));
                }
                Some(Ok(ReadLength {
                    length,
                    tag: self.tag,
                }))
            }
            Ok(None) => {
                self.done = true;
                eprintln!("\r{} {}", self.tag.as_str(), fmt_thousands(self.count));
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

fn fmt_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn lengths_of(file: &NamedTempFile) -> Vec<u64> {
        LengthReader::open(file.path(), Haplotype::Mat)
            .unwrap()
            .map(|r| r.unwrap().length)
            .collect()
    }

    #[test]
    fn fasta_lengths_span_wrapped_lines() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, ">r1").unwrap();
        writeln!(file, "ACGTACGTAC").unwrap();
        writeln!(file, "ACGT").unwrap();
        writeln!(file, ">r2 with a description").unwrap();
        writeln!(file, "ACG").unwrap();
        assert_eq!(lengths_of(&file), vec![14, 3]);
    }

    #[test]
    fn fasta_header_only_record_has_length_zero() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, ">empty").unwrap();
        writeln!(file, ">r2").unwrap();
        writeln!(file, "ACGT").unwrap();
        assert_eq!(lengths_of(&file), vec![0, 4]);
    }

    #[test]
    fn fastq_length_is_sequence_line_only() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "@r1").unwrap();
        writeln!(file, "ACGTACGT").unwrap();
        writeln!(file, "+").unwrap();
        writeln!(file, "IIIIIIII").unwrap();
        writeln!(file, "@r2").unwrap();
        writeln!(file, "AC").unwrap();
        writeln!(file, "+r2").unwrap();
        writeln!(file, "II").unwrap();
        assert_eq!(lengths_of(&file), vec![8, 2]);
    }

    #[test]
    fn gzipped_fastq_is_transparent() {
        let mut file = tempfile::Builder::new().suffix(".gz").tempfile().unwrap();
        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(b"@r1\nACGTAC\n+\nIIIIII\n").unwrap();
        file.write_all(&enc.finish().unwrap()).unwrap();

        let lengths: Vec<u64> = LengthReader::open(file.path(), Haplotype::Pat)
            .unwrap()
            .map(|r| r.unwrap().length)
            .collect();
        assert_eq!(lengths, vec![6]);
    }

    #[test]
    fn records_carry_the_given_tag() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, ">r1").unwrap();
        writeln!(file, "ACGT").unwrap();
        let records: Vec<ReadLength> = LengthReader::open(file.path(), Haplotype::Unk)
            .unwrap()
            .map(|r| r.unwrap())
            .collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].tag, Haplotype::Unk);
    }

    #[test]
    fn empty_file_yields_no_records() {
        let file = NamedTempFile::new().unwrap();
        assert!(lengths_of(&file).is_empty());
    }

    #[test]
    fn junk_leading_byte_is_a_format_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not a sequence file").unwrap();
        let mut reader = LengthReader::open(file.path(), Haplotype::Mat).unwrap();
        assert!(reader.next().unwrap().is_err());
        assert!(reader.next().is_none());
    }

    #[test]
    fn truncated_fastq_is_a_format_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "@r1").unwrap();
        writeln!(file, "ACGT").unwrap();
        let mut reader = LengthReader::open(file.path(), Haplotype::Mat).unwrap();
        assert!(reader.next().unwrap().is_err());
    }

    #[test]
    fn bad_fastq_separator_is_a_format_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "@r1").unwrap();
        writeln!(file, "ACGT").unwrap();
        writeln!(file, "oops").unwrap();
        writeln!(file, "IIII").unwrap();
        let mut reader = LengthReader::open(file.path(), Haplotype::Mat).unwrap();
        assert!(reader.next().unwrap().is_err());
    }

    #[test]
    fn thousands_separator() {
        assert_eq!(fmt_thousands(0), "0");
        assert_eq!(fmt_thousands(999), "999");
        assert_eq!(fmt_thousands(1_000), "1,000");
        assert_eq!(fmt_thousands(12_345_678), "12,345,678");
    }
}
