use super::element::{numeric_values, parse_element, MI_UINT32};
use super::{MatParseError, NumericArray};

/// Class codes for numeric arrays (mxDOUBLE_CLASS through mxUINT64_CLASS).
const NUMERIC_CLASS_RANGE: std::ops::RangeInclusive<u32> = 6..=15;

/// Complex bit of the array flags byte.
const FLAG_COMPLEX: u32 = 0x08;

/// Decode the payload of a miMATRIX element.
///
/// Returns `Ok(None)` when the array is not flat real numeric data (cell,
/// struct, char, sparse, or complex): those entries are skipped, not
/// rejected.
pub fn parse_matrix(payload: &[u8]) -> Result<Option<NumericArray>, MatParseError> {
    let (rest, flags) = subelement(payload, "array flags")?;
    if flags.mi_type != MI_UINT32 || flags.data.len() < 8 {
        return Err(MatParseError::MalformedElement(
            "array flags are not two miUINT32 words".to_string(),
        ));
    }
    let word = u32::from_le_bytes([flags.data[0], flags.data[1], flags.data[2], flags.data[3]]);
    let class = word & 0xFF;
    let array_flags = (word >> 8) & 0xFF;
    if !NUMERIC_CLASS_RANGE.contains(&class) || array_flags & FLAG_COMPLEX != 0 {
        return Ok(None);
    }

    let (rest, dims_element) = subelement(rest, "dimensions")?;
    let raw_dims = numeric_values(dims_element.mi_type, dims_element.data).ok_or_else(|| {
        MatParseError::MalformedElement("dimensions are not numeric".to_string())
    })?;
    if raw_dims.iter().any(|&d| d < 0.0) {
        return Err(MatParseError::MalformedElement(
            "negative dimension".to_string(),
        ));
    }
    let dims: Vec<usize> = raw_dims.iter().map(|&d| d as usize).collect();

    let (rest, name_element) = subelement(rest, "array name")?;
    let name = String::from_utf8_lossy(name_element.data).trim().to_string();

    let (_, pr) = subelement(rest, "real part")?;
    let data = numeric_values(pr.mi_type, pr.data).ok_or_else(|| {
        MatParseError::MalformedElement(format!(
            "real part of '{name}' has non-numeric type {}",
            pr.mi_type
        ))
    })?;

    let expected: usize = dims.iter().product();
    if data.len() != expected {
        return Err(MatParseError::MalformedElement(format!(
            "'{name}' holds {} values but its dimensions require {expected}",
            data.len()
        )));
    }

    Ok(Some(NumericArray::new(name, dims, data)))
}

fn subelement<'a>(
    input: &'a [u8],
    what: &str,
) -> Result<(&'a [u8], super::element::RawElement<'a>), MatParseError> {
    parse_element(input)
        .map_err(|_| MatParseError::MalformedElement(format!("truncated {what} subelement")))
}
