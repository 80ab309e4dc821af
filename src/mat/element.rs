use nom::{bytes::complete::take, number::complete::le_u32, IResult};

/// MAT-file data type codes for tagged elements.
pub const MI_INT8: u32 = 1;
pub const MI_UINT8: u32 = 2;
pub const MI_INT16: u32 = 3;
pub const MI_UINT16: u32 = 4;
pub const MI_INT32: u32 = 5;
pub const MI_UINT32: u32 = 6;
pub const MI_SINGLE: u32 = 7;
pub const MI_DOUBLE: u32 = 9;
pub const MI_INT64: u32 = 12;
pub const MI_UINT64: u32 = 13;
pub const MI_MATRIX: u32 = 14;
pub const MI_COMPRESSED: u32 = 15;

/// One tagged element, with its payload still unparsed.
#[derive(Debug, PartialEq)]
pub struct RawElement<'a> {
    pub mi_type: u32,
    pub data: &'a [u8],
}

/// Parse one tagged element and consume its trailing alignment padding.
///
/// Two tag layouts exist. The normal layout is two `u32` words (type, byte
/// count) followed by the payload padded to an 8-byte boundary
/// (miCOMPRESSED payloads are exempt and run back-to-back). The small
/// layout packs payloads of at most four bytes into a single 8-byte unit:
/// the upper half of the first word holds the byte count, the lower half the
/// type, and the payload sits in the second word.
pub fn parse_element(input: &[u8]) -> IResult<&[u8], RawElement> {
    let (rest, first) = le_u32(input)?;
    let small_size = (first >> 16) as usize;
    if small_size != 0 {
        let (rest, payload) = take(4usize)(rest)?;
        return Ok((
            rest,
            RawElement {
                mi_type: first & 0xFFFF,
                data: &payload[..small_size.min(4)],
            },
        ));
    }

    let (rest, nbytes) = le_u32(rest)?;
    let (rest, data) = take(nbytes as usize)(rest)?;
    // Payloads are padded to an 8-byte boundary, with two exceptions:
    // compressed elements carry no padding at all, and a final element may
    // end flush with the file.
    let pad = if first == MI_COMPRESSED {
        0
    } else {
        ((8 - (nbytes as usize % 8)) % 8).min(rest.len())
    };
    let (rest, _) = take(pad)(rest)?;
    Ok((rest, RawElement { mi_type: first, data }))
}

/// Decode a numeric payload into `f64` values, widening from the stored type.
///
/// Returns `None` for type codes that do not denote flat numeric data.
pub fn numeric_values(mi_type: u32, data: &[u8]) -> Option<Vec<f64>> {
    let values = match mi_type {
        MI_INT8 => data.iter().map(|&b| f64::from(b as i8)).collect(),
        MI_UINT8 => data.iter().map(|&b| f64::from(b)).collect(),
        MI_INT16 => data
            .chunks_exact(2)
            .map(|c| f64::from(i16::from_le_bytes([c[0], c[1]])))
            .collect(),
        MI_UINT16 => data
            .chunks_exact(2)
            .map(|c| f64::from(u16::from_le_bytes([c[0], c[1]])))
            .collect(),
        MI_INT32 => data
            .chunks_exact(4)
            .map(|c| f64::from(i32::from_le_bytes([c[0], c[1], c[2], c[3]])))
            .collect(),
        MI_UINT32 => data
            .chunks_exact(4)
            .map(|c| f64::from(u32::from_le_bytes([c[0], c[1], c[2], c[3]])))
            .collect(),
        MI_SINGLE => data
            .chunks_exact(4)
            .map(|c| f64::from(f32::from_le_bytes([c[0], c[1], c[2], c[3]])))
            .collect(),
        MI_DOUBLE => data
            .chunks_exact(8)
            .map(|c| {
                f64::from_le_bytes([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]])
            })
            .collect(),
        MI_INT64 => data
            .chunks_exact(8)
            .map(|c| {
                i64::from_le_bytes([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]]) as f64
            })
            .collect(),
        MI_UINT64 => data
            .chunks_exact(8)
            .map(|c| {
                u64::from_le_bytes([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]]) as f64
            })
            .collect(),
        _ => return None,
    };
    Some(values)
}
