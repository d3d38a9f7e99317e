//! Polynomial string hash over UTF-16 code units.

/// Signed 32-bit polynomial hash of `text`.
///
/// Walks the UTF-16 code units from last to first, adding `unit * multiplier`
/// and multiplying the multiplier by 31 (`(m << 5) - m`) after every step.
/// All arithmetic wraps at 32 bits; the overflow is part of the value.
#[must_use]
pub fn string_hash(text: &str) -> i32 {
    let units: Vec<u16> = text.encode_utf16().collect();
    let mut hash: i32 = 0;
    let mut multiplier: i32 = 1;
    for &unit in units.iter().rev() {
        hash = hash.wrapping_add(i32::from(unit).wrapping_mul(multiplier));
        multiplier = (multiplier << 5).wrapping_sub(multiplier);
    }
    hash
}
