//! Section header parsing and re-emission (SPEC_FULL.md §4.3).

use crate::config::HEADER_SIZE;
use crate::error::{Error, Result};

/// The verbatim 256-byte ASCII header, kept both as originally read and as an
/// ordered token list that repack/region-flip mutate in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawHeader {
    /// The header text as read, with the CR-LF terminator and space padding
    /// stripped. This is what the manifest stores verbatim.
    pub original_text: String,
    tokens: Vec<String>,
}

impl RawHeader {
    pub fn new(original_text: String) -> Self {
        let tokens = original_text
            .split(' ')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        Self {
            original_text,
            tokens,
        }
    }

    /// Replace the value of a `KEY=value` token, or append `KEY=value` if the
    /// key was not present (region-flip on a header lacking `VER=` would be
    /// a catalog bug, not something repack needs to handle, but this keeps
    /// the function total).
    pub fn set_kv(&mut self, key: &str, value: &str) {
        let prefix = format!("{key}=");
        for tok in &mut self.tokens {
            if let Some(rest) = tok.strip_prefix(prefix.as_str()) {
                let _ = rest;
                *tok = format!("{prefix}{value}");
                return;
            }
        }
        self.tokens.push(format!("{prefix}{value}"));
    }

    /// Swap the region token, whichever of `M1INT`/`M1CN` is present, whether
    /// it appears bare or as the value of a `VER=` token. Returns the token
    /// that was swapped away from, or `None` if neither form is present.
    pub fn swap_region(&mut self) -> Option<&'static str> {
        for tok in &mut self.tokens {
            if *tok == "M1INT" {
                *tok = "M1CN".to_string();
                return Some("M1INT");
            }
            if *tok == "M1CN" {
                *tok = "M1INT".to_string();
                return Some("M1CN");
            }
            if let Some(value) = tok.strip_prefix("VER=") {
                if value == "M1INT" {
                    *tok = "VER=M1CN".to_string();
                    return Some("M1INT");
                }
                if value == "M1CN" {
                    *tok = "VER=M1INT".to_string();
                    return Some("M1CN");
                }
            }
        }
        None
    }

    /// Re-emit as an exactly-256-byte blob: tokens joined by a single space,
    /// a CR-LF terminator, then right-padded with spaces.
    pub fn render(&self) -> Result<[u8; HEADER_SIZE]> {
        let joined = self.tokens.join(" ");
        let mut bytes = Vec::with_capacity(HEADER_SIZE);
        bytes.extend_from_slice(joined.as_bytes());
        bytes.extend_from_slice(crate::config::HEADER_TERMINATOR);
        if bytes.len() > HEADER_SIZE {
            return Err(Error::EncoderInvariant {
                detail: format!(
                    "rewritten header is {} bytes, exceeds {HEADER_SIZE}",
                    bytes.len()
                ),
            });
        }
        bytes.resize(HEADER_SIZE, b' ');
        let mut out = [0u8; HEADER_SIZE];
        out.copy_from_slice(&bytes);
        Ok(out)
    }
}

/// A header parsed into its recognized fields (SPEC_FULL.md §3).
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedHeader {
    pub section_id: Option<String>,
    pub section_length: usize,
    pub device_id: Option<String>,
    pub device_version: Option<String>,
    pub dvr: Option<String>,
    pub section_sum: u64,
    pub section_offset: Option<u64>,
    pub following_section_ids: Vec<String>,
}

fn parse_fragments(tokens: &[String], is_first: bool) -> ParsedHeader {
    let mut parsed = ParsedHeader::default();
    let mut non_kv_idx = 0usize;

    for tok in tokens {
        if let Some((key, value)) = tok.split_once('=') {
            match key {
                "LENGTH" => parsed.section_length = value.parse().unwrap_or(0),
                "VER" => parsed.device_version = Some(value.to_string()),
                "DVR" => parsed.dvr = Some(value.to_string()),
                "SUM" => parsed.section_sum = value.parse().unwrap_or(0),
                "OFFSET" => parsed.section_offset = value.parse().ok(),
                _ => {}
            }
            continue;
        }

        if is_first {
            // Section 0's header has no section_id slot at all; its leading
            // bare token is the device id, and everything after it is the
            // table of contents for the sections that follow.
            if non_kv_idx == 0 {
                parsed.device_id = Some(tok.clone());
            } else {
                parsed.following_section_ids.push(tok.clone());
            }
        } else if non_kv_idx == 0 {
            parsed.section_id = Some(tok.clone());
        } else if non_kv_idx == 1 || non_kv_idx == 2 {
            parsed.device_id = Some(tok.clone());
        } else {
            parsed.following_section_ids.push(tok.clone());
        }
        non_kv_idx += 1;
    }

    parsed
}

/// Reads one section (header + checksummed body) at a time from a byte
/// source, tracking the cursor and whether the leading header has been seen.
pub struct SectionReader<'a> {
    data: &'a [u8],
    pos: usize,
    seen_first: bool,
    leading_padding: usize,
}

impl<'a> SectionReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            seen_first: false,
            leading_padding: 0,
        }
    }

    /// Number of `0x20` bytes skipped before the first header (0 unless this
    /// is an X-A10-style image).
    pub fn leading_padding(&self) -> usize {
        self.leading_padding
    }

    /// Read the next section, or `None` at a clean end of file.
    pub fn read_section(&mut self) -> Result<Option<(RawHeader, ParsedHeader, &'a [u8])>> {
        if !self.seen_first {
            let start = self.pos;
            while self.pos < self.data.len() && self.data[self.pos] == b' ' {
                self.pos += 1;
            }
            self.leading_padding = self.pos - start;
        }

        if self.pos >= self.data.len() {
            return Ok(None);
        }

        if self.pos + HEADER_SIZE > self.data.len() {
            return Err(Error::TruncatedStream);
        }
        let header_bytes = &self.data[self.pos..self.pos + HEADER_SIZE];
        self.pos += HEADER_SIZE;

        let text = String::from_utf8_lossy(header_bytes)
            .trim_end_matches(['\r', '\n', ' '])
            .to_string();
        let raw = RawHeader::new(text);
        let parsed = parse_fragments(&raw.tokens, !self.seen_first);
        self.seen_first = true;

        let length = parsed.section_length;
        if self.pos + length > self.data.len() {
            return Err(Error::TruncatedSection {
                section_id: parsed.section_id.clone(),
                expected: length,
                actual: self.data.len() - self.pos,
            });
        }
        let body = &self.data[self.pos..self.pos + length];
        self.pos += length;

        let actual_sum: u64 = body.iter().map(|&b| b as u64).sum();
        if actual_sum != parsed.section_sum {
            return Err(Error::ChecksumMismatch {
                expected: parsed.section_sum,
                actual: actual_sum,
            });
        }

        Ok(Some((raw, parsed, body)))
    }
}
