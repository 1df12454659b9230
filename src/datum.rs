//! The dynamic value of one decoded column.

/// A decoded column value.
///
/// VCF-derived columns hold one of a closed set of wire kinds: absent, a
/// 32-bit signed integer, a 32-bit float, or a variable-length byte-string.
/// The nullable union wrapping every column is unwrapped before a [`Datum`]
/// is constructed, so `Null` here means "no value in this row".
#[derive(Debug, Clone, PartialEq)]
pub enum Datum {
    /// No value in this row
    Null,
    /// A 32-bit signed integer
    Int(i32),
    /// A 32-bit IEEE float
    Float(f32),
    /// A byte-string
    Bytes(Vec<u8>),
}
