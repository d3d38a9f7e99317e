//! Deterministic ordering of signature entries.
//!
//! The order in which signature blocks are folded into the fingerprint is
//! fixed by a case-insensitive comparison of their names, so the physical
//! layout of the archive never influences the result.

use std::cmp::Ordering;

/// Case-insensitive lexical comparison over UTF-16 code units.
///
/// Units that differ are compared after upper-casing and then lower-casing
/// each one with single-unit simple case mapping; when one name is a prefix
/// of the other the shorter sorts first.
#[must_use]
pub fn compare_ignore_case(lhs: &str, rhs: &str) -> Ordering {
    let mut left = lhs.encode_utf16();
    let mut right = rhs.encode_utf16();
    loop {
        match (left.next(), right.next()) {
            (Some(a), Some(b)) => {
                if a == b {
                    continue;
                }
                let (upper_a, upper_b) = (to_upper_unit(a), to_upper_unit(b));
                if upper_a == upper_b {
                    continue;
                }
                let (lower_a, lower_b) = (to_lower_unit(upper_a), to_lower_unit(upper_b));
                if lower_a != lower_b {
                    return lower_a.cmp(&lower_b);
                }
            }
            (Some(_), None) => return Ordering::Greater,
            (None, Some(_)) => return Ordering::Less,
            (None, None) => return Ordering::Equal,
        }
    }
}

/// Stable sort of arbitrary items by a name they carry.
pub fn order_by_name<T, F>(items: &mut [T], name_of: F)
where
    F: Fn(&T) -> &str,
{
    items.sort_by(|lhs, rhs| compare_ignore_case(name_of(lhs), name_of(rhs)));
}

fn to_upper_unit(unit: u16) -> u16 {
    map_unit(unit, char::to_uppercase)
}

fn to_lower_unit(unit: u16) -> u16 {
    map_unit(unit, char::to_lowercase)
}

// Surrogates and multi-char expansions map to themselves.
fn map_unit<I, F>(unit: u16, mapping: F) -> u16
where
    F: Fn(char) -> I,
    I: Iterator<Item = char>,
{
    let Some(c) = char::from_u32(u32::from(unit)) else {
        return unit;
    };
    let mut mapped = mapping(c);
    match (mapped.next(), mapped.next()) {
        (Some(single), None) => u16::try_from(u32::from(single)).unwrap_or(unit),
        _ => unit,
    }
}
