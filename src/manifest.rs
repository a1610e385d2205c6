//! The on-disk manifest document emitted by `unpack` and consumed by
//! `repack` (SPEC_FULL.md §3, §6).

use serde::{Deserialize, Serialize};

use crate::container::ParsedHeader;

/// Current manifest format version. Bumped if the on-disk shape ever changes
/// incompatibly; `repack` rejects manifests with an unrecognized version.
pub const MANIFEST_VERSION: u32 = 0;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub version: u32,
    pub filename: String,
    /// Number of `0x20` bytes that preceded the first header in the
    /// original file (X-A10 images begin with two). Not part of the
    /// distilled format; kept so `repack` can reproduce the exact prefix.
    pub leading_padding: usize,
    pub sections: Vec<SectionEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionEntry {
    pub filename: String,
    pub raw_header: String,
    pub parsed_header: ParsedHeader,
    pub subsections: Vec<SubSectionEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubSectionEntry {
    pub filename: String,
    pub compressed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename_decompressed: Option<String>,
}

impl Manifest {
    pub fn to_writer_pretty<W: std::io::Write>(&self, writer: W) -> crate::error::Result<()> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn from_reader<R: std::io::Read>(reader: R) -> crate::error::Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }
}
