use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::core::otu::OtuSet;

/// Sequence line width in OTU FASTA output
pub const LINE_WIDTH: usize = 80;

/// Write OTU representatives as FASTA, numbered from 1 in acceptance order.
///
/// Each record is a `>OTU_<n> occurrence:<count>` header followed by the
/// sequence wrapped at [`LINE_WIDTH`] columns. An empty set writes nothing.
///
/// # Errors
///
/// Returns any IO error from the writer.
pub fn write_otus<W: Write>(otus: &OtuSet, mut writer: W) -> io::Result<()> {
    for (i, otu) in otus.iter().enumerate() {
        writeln!(writer, ">OTU_{} occurrence:{}", i + 1, otu.count)?;
        for line in otu.sequence.as_bytes().chunks(LINE_WIDTH) {
            writer.write_all(line)?;
            writer.write_all(b"\n")?;
        }
    }
    writer.flush()
}

/// Write OTU representatives to a file, replacing any existing content
///
/// # Errors
///
/// Returns an IO error if the file cannot be created or written.
pub fn write_otu_file(otus: &OtuSet, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_otus(otus, BufWriter::new(file))?;
    info!(otus = otus.len(), path = %path.display(), "Wrote OTU FASTA");
    Ok(())
}
