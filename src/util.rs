/// Seconds between 1904-01-01 (the ISO/QuickTime epoch) and 1970-01-01.
pub const MAC_EPOCH_OFFSET: i64 = 2_082_844_800;

/// Convert a box timestamp (seconds since 1904) to Unix seconds.
pub fn mac_time_to_unix(secs: u64) -> i64 {
    (secs as i64).saturating_sub(MAC_EPOCH_OFFSET)
}

/// Unpack a packed ISO-639-2/T language code (three 5-bit letters).
///
/// Codes below 0x400 are Macintosh language codes rather than packed letters.
pub fn iso639_language(code: u16) -> Option<String> {
    if code < 0x400 || code > 0x7fff {
        return None;
    }
    let c1 = ((code >> 10) & 0x1F) as u8 + 0x60;
    let c2 = ((code >> 5) & 0x1F) as u8 + 0x60;
    let c3 = (code & 0x1F) as u8 + 0x60;
    Some(format!("{}{}{}", c1 as char, c2 as char, c3 as char,))
}

/// Rotation in degrees described by the first two entries of a transformation matrix.
pub fn matrix_rotation(a: f64, b: f64) -> f64 {
    let degrees = b.atan2(a).to_degrees().round();
    if degrees < 0.0 { degrees + 360.0 } else { degrees }
}
