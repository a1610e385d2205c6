//! The sectioned container format: 256-byte ASCII headers followed by a
//! checksummed body, repeated until EOF (SPEC_FULL.md §4.3).

mod header;
mod section;
mod split;

pub use header::{ParsedHeader, RawHeader, SectionReader};
pub use section::SubSection;
pub use split::split_section_zero;
