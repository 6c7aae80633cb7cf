//! Uncompressed APRS position encoding.
//!
//! Latitude is `DDMM.mmH` (8 chars), longitude `DDDMM.mmH` (9 chars).
//! Ambiguity blanks minute digits from the right, leaving the dot and the
//! hemisphere letter in place:
//!
//! ```text
//! level 0   4740.50N
//! level 1   4740.5 N
//! level 2   4740.  N
//! level 3   474 .  N
//! level 4   47  .  N
//! ```

/// Highest ambiguity level: every minute digit blanked.
pub const MAX_AMBIGUITY: u8 = 4;

/// Encode a latitude as `DDMM.mmN` / `DDMM.mmS`.
///
/// Zero is reported in the northern hemisphere.
pub fn encode_lat(lat: f64) -> String {
    let hemisphere = if lat >= 0.0 { 'N' } else { 'S' };
    let (deg, minutes) = split_degrees(lat);
    format!("{deg:02}{minutes}{hemisphere}")
}

/// Encode a longitude as `DDDMM.mmE` / `DDDMM.mmW`.
///
/// Zero is reported in the eastern hemisphere.
pub fn encode_lng(lng: f64) -> String {
    let hemisphere = if lng >= 0.0 { 'E' } else { 'W' };
    let (deg, minutes) = split_degrees(lng);
    format!("{deg:03}{minutes}{hemisphere}")
}

/// Split an absolute coordinate into whole degrees and a `MM.mm` minutes field.
///
/// Minutes are rounded to hundredths; a value that rounds up to 60.00 carries
/// into the degree count.
fn split_degrees(value: f64) -> (u32, String) {
    let abs = value.abs();
    let mut deg = abs.trunc() as u32;
    let mut hundredths = (abs.fract() * 60.0 * 100.0).round() as u32;
    if hundredths >= 6000 {
        deg += 1;
        hundredths -= 6000;
    }
    (deg, format!("{:02}.{:02}", hundredths / 100, hundredths % 100))
}

/// Blank the `level` least-significant minute digits of an encoded coordinate.
///
/// Purely positional: works on both latitude and longitude strings because
/// only the trailing `MM.mmH` part is touched. Levels above
/// [`MAX_AMBIGUITY`] are clamped.
pub fn apply_ambiguity(pos: &str, level: u8) -> String {
    let mut bytes = pos.as_bytes().to_vec();
    for i in 0..usize::from(level.min(MAX_AMBIGUITY)) {
        // hemisphere letter, then the dot once past the hundredths
        let offset = if i > 1 { i + 3 } else { i + 2 };
        if offset > bytes.len() {
            break;
        }
        let idx = bytes.len() - offset;
        bytes[idx] = b' ';
    }
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Build the uncompressed position block: `LAT` `TABLE` `LNG` `SYMBOL`.
pub fn encode_position(lat: f64, lng: f64, table: char, symbol: char, ambiguity: u8) -> String {
    let enc_lat = apply_ambiguity(&encode_lat(lat), ambiguity);
    let enc_lng = apply_ambiguity(&encode_lng(lng), ambiguity);
    format!("{enc_lat}{table}{enc_lng}{symbol}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
