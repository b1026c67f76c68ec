use crate::bio::sequence::Sequence;
use crate::utils::open_reader;
use crate::{Result, TaxMergeError};
use nom::{
    branch::alt,
    bytes::complete::{tag, take_till},
    combinator::{opt, rest},
    sequence::preceded,
    IResult,
};
use std::io::{BufRead, Write};
use std::path::Path;

/// Parse a FASTA header line into identifier and optional description.
/// The identifier runs to the first space or tab; everything after the
/// separator is kept verbatim.
fn parse_header(input: &str) -> IResult<&str, (&str, Option<&str>)> {
    let (input, _) = tag(">")(input)?;
    let (input, id) = take_till(|c: char| c == ' ' || c == '\t')(input)?;
    let (input, description) = opt(preceded(alt((tag(" "), tag("\t"))), rest))(input)?;
    Ok((input, (id, description)))
}

/// Streaming FASTA record reader.
///
/// Records are yielded one at a time so arbitrarily large files are never
/// held in memory. Residue case is preserved as read; blank lines and
/// whitespace inside records are discarded.
pub struct FastaReader<R: BufRead> {
    reader: R,
    pending_header: Option<String>,
    line: u64,
    done: bool,
}

impl<R: BufRead> FastaReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending_header: None,
            line: 0,
            done: false,
        }
    }

    fn next_line(&mut self) -> Result<Option<String>> {
        let mut buf = String::new();
        if self.reader.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        self.line += 1;
        while buf.ends_with('\n') || buf.ends_with('\r') {
            buf.pop();
        }
        Ok(Some(buf))
    }

    /// Advance to the first header line, skipping leading blank lines.
    /// Any other content before the first `>` is malformed input.
    fn scan_to_header(&mut self) -> Result<Option<String>> {
        while let Some(line) = self.next_line()? {
            if line.trim().is_empty() {
                continue;
            }
            if line.starts_with('>') {
                return Ok(Some(line));
            }
            return Err(TaxMergeError::Parse(format!(
                "line {}: expected a FASTA header, found sequence data",
                self.line
            )));
        }
        Ok(None)
    }

    fn read_record(&mut self, header: String) -> Result<Sequence> {
        let (_, (id, description)) = parse_header(&header).map_err(|_| {
            TaxMergeError::Parse(format!("line {}: malformed FASTA header", self.line))
        })?;
        let id = id.to_string();
        let description = description.map(|d| d.to_string());

        let mut residues = Vec::new();
        loop {
            match self.next_line()? {
                Some(line) if line.starts_with('>') => {
                    self.pending_header = Some(line);
                    break;
                }
                Some(line) => {
                    residues.extend(line.bytes().filter(|b| !b.is_ascii_whitespace()));
                }
                None => {
                    self.done = true;
                    break;
                }
            }
        }

        let mut seq = Sequence::new(id, residues);
        if let Some(desc) = description {
            seq = seq.with_description(desc);
        }
        Ok(seq)
    }
}

impl FastaReader<Box<dyn BufRead>> {
    /// Open a FASTA file for streaming, decompressing `.gz` paths on the fly.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(open_reader(path)?))
    }
}

impl<R: BufRead> Iterator for FastaReader<R> {
    type Item = Result<Sequence>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done && self.pending_header.is_none() {
            return None;
        }

        let header = match self.pending_header.take() {
            Some(header) => header,
            None => match self.scan_to_header() {
                Ok(Some(header)) => header,
                Ok(None) => {
                    self.done = true;
                    return None;
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            },
        };

        match self.read_record(header) {
            Ok(seq) => Some(Ok(seq)),
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// FASTA record writer wrapping residues at 80 columns.
pub struct FastaWriter<W: Write> {
    writer: W,
}

impl<W: Write> FastaWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_record(&mut self, seq: &Sequence) -> Result<()> {
        writeln!(self.writer, "{}", seq.header())?;
        for chunk in seq.residues.chunks(80) {
            writeln!(self.writer, "{}", String::from_utf8_lossy(chunk))?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
