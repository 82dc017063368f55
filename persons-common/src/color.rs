//! Color code mapping
//!
//! The CSV source stores colors as small integer codes. The mapping is a
//! fixed 7-entry table; unmapped codes resolve to the "unknown" sentinel
//! so downstream display and filtering never deal with an absent color.

/// Returns the color name for a numeric color code.
///
/// Total over all of `i64`: codes 1-7 map to their fixed names, everything
/// else maps to `"unknown"`.
pub fn color_name(code: i64) -> &'static str {
    match code {
        1 => "blau",
        2 => "grün",
        3 => "violett",
        4 => "rot",
        5 => "gelb",
        6 => "türkis",
        7 => "weiß",
        _ => "unknown",
    }
}
