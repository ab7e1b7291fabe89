//! Whitespace-separated text format.
//!
//! One matrix row per line, entries separated by spaces, every row ends in
//! `" \n"`. Numbers are written in their shortest round-trip form, so
//! `save` followed by `load` gives back the same matrix bit for bit.
//!
//! ```
//! use echelon::{io, Matrix};
//!
//! let a = Matrix::from([[1.0, 0.5], [-1.25, 3.0]]);
//! let mut buf = Vec::new();
//! io::save(&a, &mut buf).unwrap();
//! assert_eq!(String::from_utf8(buf.clone()).unwrap(), "1 0.5 \n-1.25 3 \n");
//! assert_eq!(io::load(buf.as_slice()).unwrap(), a);
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::debug;

use crate::error::{LinalgError, Result};
use crate::matrix::Matrix;

/// Parse a matrix from `reader`. Blank lines are skipped; an input with no
/// rows gives the empty matrix.
pub fn load(reader: impl Read) -> Result<Matrix> {
    let mut rows = Vec::new();
    for (idx, line) in BufReader::new(reader).lines().enumerate() {
        let line = line?;
        let row = line
            .split_whitespace()
            .map(|token| {
                token.parse::<f64>().map_err(|_| LinalgError::Parse {
                    line: idx + 1,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        if !row.is_empty() {
            rows.push(row);
        }
    }
    Matrix::from_rows(rows)
}

/// Write `m` to `writer` in the text format.
pub fn save(m: &Matrix, mut writer: impl Write) -> Result<()> {
    write!(writer, "{m}")?;
    writer.flush()?;
    Ok(())
}

/// [`load`] from a file.
pub fn load_path(path: impl AsRef<Path>) -> Result<Matrix> {
    let path = path.as_ref();
    let m = load(File::open(path)?)?;
    debug!("loaded {}x{} matrix from {}", m.nrows(), m.ncols(), path.display());
    Ok(m)
}

/// [`save`] to a file, replacing it if it exists.
pub fn save_path(m: &Matrix, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    save(m, BufWriter::new(File::create(path)?))?;
    debug!("saved {}x{} matrix to {}", m.nrows(), m.ncols(), path.display());
    Ok(())
}
