//! Reader for Level 5 MAT-file archives.
//!
//! A MAT-file is a 128-byte header followed by a sequence of tagged data
//! elements. Each variable is stored as a miMATRIX element whose subelements
//! carry the array flags, dimensions, name, and column-major data. Archives
//! produced by recent writers usually wrap every variable in a
//! zlib-compressed miCOMPRESSED envelope, which is inflated and re-parsed
//! transparently here.
//!
//! Only flat real numeric arrays surface as [`NumericArray`] values. Other
//! classes (cell, struct, char, sparse) and complex data are skipped while
//! reading; the rest of the archive is still decoded.

use std::fs;
use std::io::Read;

use camino::Utf8Path;
use flate2::read::ZlibDecoder;
use itertools::Itertools;
use thiserror::Error;

use crate::constants::Table;
use crate::satmerge_errors::SatmergeError;

mod element;
mod header;
mod matrix;
pub mod writer;

use element::{parse_element, MI_COMPRESSED, MI_MATRIX};
use header::MatHeader;

/// Errors raised while decoding the MAT-file container.
#[derive(Error, Debug, PartialEq)]
pub enum MatParseError {
    #[error("file is shorter than the 128-byte header")]
    TruncatedHeader,

    #[error("unsupported MAT-file version 0x{0:04X}")]
    UnsupportedVersion(u16),

    #[error("unsupported endian indicator '{0}' (only little-endian files are read)")]
    UnsupportedEndianness(String),

    #[error("malformed data element: {0}")]
    MalformedElement(String),

    #[error("compressed element could not be inflated: {0}")]
    CompressedElement(String),
}

/// A named numeric array with its dimensions and column-major data.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericArray {
    name: String,
    dims: Vec<usize>,
    data: Vec<f64>,
}

impl NumericArray {
    pub fn new(name: String, dims: Vec<usize>, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), dims.iter().product::<usize>());
        NumericArray { name, dims, data }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Number of dimensions.
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Shape rendered for operator output, e.g. `(3, 1200, 2)`.
    pub fn shape_string(&self) -> String {
        format!("({})", self.dims.iter().join(", "))
    }

    /// View the array as a 2-D matrix.
    ///
    /// Rank-1 data stands as a single column. Ranks above two flatten
    /// column-major into one column; exporters take those apart one slice at
    /// a time through [`slice_matrix`](Self::slice_matrix) instead.
    pub fn as_matrix(&self) -> Table {
        let (nrows, ncols) = match *self.dims.as_slice() {
            [n] => (n, 1),
            [r, c] => (r, c),
            _ => (self.data.len(), 1),
        };
        Table::from_column_slice(nrows, ncols, &self.data)
    }

    /// Extract slice `index` along the leading dimension as a 2-D matrix.
    ///
    /// Fixing the leading index of a rank-3-or-higher array leaves `dims[1]`
    /// rows and `dims[2..]` trailing dimensions, which are flattened into
    /// `dims[2..].product()` columns in storage order. Element `(j, m)` of
    /// the result therefore sits at offset
    /// `index + j * dims[0] + m * dims[0] * dims[1]` in the column-major
    /// data.
    ///
    /// Arguments
    /// ---------
    /// * `index`: position along the leading dimension, `< dims[0]`.
    ///
    /// Return
    /// ------
    /// * A `dims[1] x dims[2..].product()` matrix.
    pub fn slice_matrix(&self, index: usize) -> Table {
        let d0 = self.dims[0];
        let nrows = self.dims[1];
        let ncols: usize = self.dims[2..].iter().product();
        let mut values = Vec::with_capacity(nrows * ncols);
        for m in 0..ncols {
            for j in 0..nrows {
                values.push(self.data[index + j * d0 + m * d0 * nrows]);
            }
        }
        Table::from_column_slice(nrows, ncols, &values)
    }
}

/// A decoded archive holding every numeric array found in the file.
#[derive(Debug)]
pub struct MatFile {
    description: String,
    arrays: Vec<NumericArray>,
}

impl MatFile {
    /// Read and decode the archive at `path`.
    pub fn read(path: &Utf8Path) -> Result<Self, SatmergeError> {
        let bytes = fs::read(path)?;
        Ok(Self::from_bytes(&bytes)?)
    }

    /// Decode an in-memory MAT-file image.
    ///
    /// The header is validated first, then top-level elements are walked in
    /// order. miCOMPRESSED envelopes are inflated and their inner element
    /// parsed in place; unknown top-level element types are stepped over.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MatParseError> {
        if bytes.len() < header::HEADER_LEN {
            return Err(MatParseError::TruncatedHeader);
        }
        let (mut rest, mat_header) =
            MatHeader::parse(bytes).map_err(|_| MatParseError::TruncatedHeader)?;
        mat_header.validate()?;

        let mut arrays = Vec::new();
        while !rest.is_empty() {
            // Some writers pad the file with zeros past the last element.
            if rest.iter().all(|&b| b == 0) {
                break;
            }
            let (next, top) = parse_element(rest).map_err(|_| {
                MatParseError::MalformedElement("truncated top-level element".to_string())
            })?;
            match top.mi_type {
                MI_COMPRESSED => {
                    let inflated = inflate(top.data)?;
                    let (_, inner) = parse_element(&inflated).map_err(|_| {
                        MatParseError::CompressedElement(
                            "envelope holds a truncated element".to_string(),
                        )
                    })?;
                    if inner.mi_type == MI_MATRIX {
                        if let Some(array) = matrix::parse_matrix(inner.data)? {
                            arrays.push(array);
                        }
                    }
                }
                MI_MATRIX => {
                    if let Some(array) = matrix::parse_matrix(top.data)? {
                        arrays.push(array);
                    }
                }
                _ => {}
            }
            rest = next;
        }
        Ok(MatFile {
            description: mat_header.description,
            arrays,
        })
    }

    /// The header's descriptive text, recording the producing tool.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Arrays in the order they appear in the file.
    pub fn arrays(&self) -> &[NumericArray] {
        &self.arrays
    }

    pub fn len(&self) -> usize {
        self.arrays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrays.is_empty()
    }
}

fn inflate(data: &[u8]) -> Result<Vec<u8>, MatParseError> {
    let mut decoder = ZlibDecoder::new(data);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| MatParseError::CompressedElement(e.to_string()))?;
    Ok(out)
}
