//! Deterministic artifact filenames derived from record identity.

/// `{ordinal:03}_{firstName}_{lastName}_QR.{extension}`
///
/// The ordinal is the position assigned at CSV parse time; it never changes
/// afterwards, so filenames stay stable across edits and deletes.
pub fn file_name(ordinal: u32, first_name: &str, last_name: &str, extension: &str) -> String {
    format!("{ordinal:03}_{first_name}_{last_name}_QR.{extension}")
}
