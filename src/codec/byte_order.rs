use crate::error::CodecError;

/// Widest integer the codec handles, in bytes.
const MAX_WIDTH: usize = 8;

fn check_width(width: usize) -> Result<(), CodecError> {
    if width == 0 || width > MAX_WIDTH {
        return Err(CodecError::UnsupportedWidth(width));
    }
    Ok(())
}

/// Inclusive bounds of a `width`-byte integer.
fn bounds(width: usize, signed: bool) -> (i128, i128) {
    let bits = (width * 8) as u32;
    if signed {
        (-(1i128 << (bits - 1)), (1i128 << (bits - 1)) - 1)
    } else {
        (0, (1i128 << bits) - 1)
    }
}

/// Encode `value` as `width` little-endian bytes, two's-complement when `signed`.
///
/// Fails with [`CodecError::OutOfRange`] when the value does not fit.
pub fn to_little_endian(value: i128, width: usize, signed: bool) -> Result<Vec<u8>, CodecError> {
    check_width(width)?;
    let (min, max) = bounds(width, signed);
    if value < min || value > max {
        return Err(CodecError::OutOfRange {
            value,
            width,
            signed,
        });
    }
    // Truncating the i128 two's-complement form yields both encodings.
    Ok(value.to_le_bytes()[..width].to_vec())
}

/// Decode little-endian bytes, sign-extending when `signed`.
pub fn from_little_endian(bytes: &[u8], signed: bool) -> Result<i128, CodecError> {
    check_width(bytes.len())?;
    let fill = if signed && bytes[bytes.len() - 1] & 0x80 != 0 {
        0xff
    } else {
        0x00
    };
    let mut wide = [fill; 16];
    wide[..bytes.len()].copy_from_slice(bytes);
    Ok(i128::from_le_bytes(wide))
}
