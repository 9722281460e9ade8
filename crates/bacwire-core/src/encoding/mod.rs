//! Wire-level building blocks shared by every service codec.

/// Primitive payload codecs plus their application- and context-tagged forms.
pub mod primitives;
pub mod reader;
/// Tag headers: application, context, opening and closing.
pub mod tag;
pub mod writer;
