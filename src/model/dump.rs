// lzp - streaming LZP compression codec
//
// Dual-licensed under MIT and Apache-2.0.

//! Model dump support
//!
//! Reads and writes a predictor table as a line-oriented decimal text dump:
//! one integer in `0..=255` per table slot, in index order. The loader also
//! accepts comma-separated entries, so dumps can be reflowed or embedded in
//! other tooling without conversion.
//!
//! A dump carries no predictor identifier; loading requires naming the
//! predictor the table was trained with, and a table loaded under the wrong
//! predictor silently mispredicts.

use super::{Model, Predictor};
use crate::error::{ModelError, Result};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

/// Write `model`'s table as a decimal text dump, one entry per line
pub fn write_model<W: Write>(model: &Model, writer: W) -> Result<()> {
    let mut writer = BufWriter::new(writer);
    for &slot in model.table() {
        writeln!(writer, "{}", slot).map_err(ModelError::from)?;
    }
    writer.flush().map_err(ModelError::from)?;
    Ok(())
}

/// Read a decimal text dump into a fresh model for `predictor`.
///
/// Entries past the table length are ignored; a dump with fewer entries
/// than table slots is an error.
pub fn read_model<R: Read>(predictor: Predictor, mut reader: R) -> Result<Model> {
    let mut text = String::new();
    reader.read_to_string(&mut text).map_err(ModelError::from)?;

    let expected = predictor.table_len();
    let mut table = Vec::with_capacity(expected);

    for (index, entry) in text
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .enumerate()
    {
        if table.len() == expected {
            break;
        }
        let value: i64 = entry.parse().map_err(|_| ModelError::Malformed {
            index,
            reason: format!("'{}' is not a decimal integer", entry),
        })?;
        let byte = u8::try_from(value)
            .map_err(|_| ModelError::ValueOutOfRange { index, value })?;
        table.push(byte);
    }

    if table.len() < expected {
        return Err(ModelError::Truncated {
            expected,
            got: table.len(),
        }
        .into());
    }

    Ok(Model::from_table(predictor, table))
}

/// Write a model dump to a file
pub fn save_to_file<P: AsRef<Path>>(model: &Model, path: P) -> Result<()> {
    let file = File::create(path).map_err(ModelError::from)?;
    write_model(model, file)
}

/// Load a model dump from a file
pub fn load_from_file<P: AsRef<Path>>(predictor: Predictor, path: P) -> Result<Model> {
    let file = File::open(path).map_err(ModelError::from)?;
    read_model(predictor, file)
}
