//! Minimal MAT-file writer.
//!
//! Emits uncompressed Level 5 files with every array stored as
//! double-precision data under a normal tag. This is enough to produce
//! archives for the reader's own tests and small command-line experiments;
//! it makes no attempt at small tags, compression, or non-numeric classes.

use std::fs;

use camino::Utf8Path;

use super::element::{MI_DOUBLE, MI_INT32, MI_INT8, MI_MATRIX, MI_UINT32};
use super::header::HEADER_LEN;
use super::NumericArray;
use crate::satmerge_errors::SatmergeError;

/// mxDOUBLE_CLASS, the only class this writer emits.
const DOUBLE_CLASS: u32 = 6;

/// Write `arrays` to `path` as a Level 5 MAT-file.
pub fn write_mat(path: &Utf8Path, arrays: &[NumericArray]) -> Result<(), SatmergeError> {
    fs::write(path, mat_bytes(arrays))?;
    Ok(())
}

/// Serialize `arrays` into an in-memory MAT-file image.
pub fn mat_bytes(arrays: &[NumericArray]) -> Vec<u8> {
    let mut buf = header_bytes();
    for array in arrays {
        buf.extend_from_slice(&matrix_element_bytes(array));
    }
    buf
}

fn header_bytes() -> Vec<u8> {
    let mut buf = Vec::with_capacity(HEADER_LEN);
    buf.extend_from_slice(b"MATLAB 5.0 MAT-file, created by satmerge");
    buf.resize(116, b' '); // descriptive text is space-padded
    buf.extend_from_slice(&[0u8; 8]); // no subsystem data
    buf.extend_from_slice(&0x0100u16.to_le_bytes());
    buf.extend_from_slice(b"IM");
    buf
}

/// Serialize one array as a complete miMATRIX element, tag included.
pub(crate) fn matrix_element_bytes(array: &NumericArray) -> Vec<u8> {
    let mut payload = Vec::new();

    let mut flag_words = DOUBLE_CLASS.to_le_bytes().to_vec();
    flag_words.extend_from_slice(&[0u8; 4]);
    push_element(&mut payload, MI_UINT32, &flag_words);

    let dim_bytes: Vec<u8> = array
        .dims()
        .iter()
        .flat_map(|&d| (d as i32).to_le_bytes())
        .collect();
    push_element(&mut payload, MI_INT32, &dim_bytes);
    push_element(&mut payload, MI_INT8, array.name().as_bytes());

    let value_bytes: Vec<u8> = array.data().iter().flat_map(|v| v.to_le_bytes()).collect();
    push_element(&mut payload, MI_DOUBLE, &value_bytes);

    let mut element = Vec::with_capacity(8 + payload.len());
    push_element(&mut element, MI_MATRIX, &payload);
    element
}

/// Append a normal tag followed by `data`, zero-padded to an 8-byte boundary.
fn push_element(buf: &mut Vec<u8>, mi_type: u32, data: &[u8]) {
    buf.extend_from_slice(&mi_type.to_le_bytes());
    buf.extend_from_slice(&(data.len() as u32).to_le_bytes());
    buf.extend_from_slice(data);
    buf.resize(buf.len() + (8 - data.len() % 8) % 8, 0);
}
