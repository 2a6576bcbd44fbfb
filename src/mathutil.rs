//! Integer alignment helpers for the pixel grid.

/// Largest value less than or equal to `number` that is an exact multiple
/// of `multiple`.
///
/// Returns 0 when `number` is 0 or when no positive multiple fits below it.
/// `multiple` must be greater than zero; callers coerce their configuration
/// before reaching this point.
pub fn find_closest_multiple_of(number: u32, multiple: u32) -> u32 {
    debug_assert!(multiple > 0, "alignment unit must be positive");
    number - number % multiple
}
