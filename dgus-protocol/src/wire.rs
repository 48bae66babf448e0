//! Big-endian and fixed-point conversions
//!
//! The display stores every multi-byte number big-endian while the controller
//! is little-endian. These helpers are the only place the byte order is
//! swapped, on both the outbound and the inbound path.

/// Encode a word for the wire
pub const fn u16_to_wire(value: u16) -> [u8; 2] {
    value.to_be_bytes()
}

/// Encode a signed word for the wire
pub const fn i16_to_wire(value: i16) -> [u8; 2] {
    value.to_be_bytes()
}

/// Encode a double word for the wire
pub const fn i32_to_wire(value: i32) -> [u8; 4] {
    value.to_be_bytes()
}

/// Decode the leading word of a data block
pub fn read_u16(data: &[u8]) -> Option<u16> {
    match data {
        [hi, lo, ..] => Some(u16::from_be_bytes([*hi, *lo])),
        _ => None,
    }
}

/// Decode the leading signed word of a data block
pub fn read_i16(data: &[u8]) -> Option<i16> {
    read_u16(data).map(|word| word as i16)
}

/// Decode the leading signed double word of a data block
pub fn read_i32(data: &[u8]) -> Option<i32> {
    match data {
        [a, b, c, d, ..] => Some(i32::from_be_bytes([*a, *b, *c, *d])),
        _ => None,
    }
}

/// `10^decimals` as an integer
pub const fn pow10(decimals: u8) -> i32 {
    let mut scale = 1i32;
    let mut i = 0;
    while i < decimals {
        scale *= 10;
        i += 1;
    }
    scale
}

/// Scale a float to the display's fixed-point representation
///
/// The product is rounded half away from zero, so decoding the result is
/// within half a display unit of `value`. Out-of-range values saturate.
pub fn scale_fixed(value: f32, decimals: u8) -> i32 {
    let scaled = value * pow10(decimals) as f32;
    let rounded = if scaled >= 0.0 {
        scaled + 0.5
    } else {
        scaled - 0.5
    };
    rounded as i32
}

/// Convert a fixed-point value received from the display back to a float
pub fn unscale_fixed(raw: i32, decimals: u8) -> f32 {
    raw as f32 / pow10(decimals) as f32
}

/// Fixed-point encoding of `value`, truncated to `width` bytes (2 or 4)
///
/// Returns the bytes and how many of them are meaningful.
pub fn fixed_to_wire(value: f32, decimals: u8, width: u8) -> ([u8; 4], usize) {
    let raw = scale_fixed(value, decimals);
    if width >= 4 {
        (i32_to_wire(raw), 4)
    } else {
        let [hi, lo] = i16_to_wire(raw as i16);
        ([hi, lo, 0, 0], 2)
    }
}

/// Decode a fixed-point value of `width` bytes (2 or 4)
pub fn fixed_from_wire(data: &[u8], decimals: u8, width: u8) -> Option<f32> {
    let raw = if width >= 4 {
        read_i32(data)?
    } else {
        i32::from(read_i16(data)?)
    };
    Some(unscale_fixed(raw, decimals))
}
