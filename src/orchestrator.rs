//! Archive Orchestrator (SPEC_FULL.md §4.5): drives unpack, repack,
//! region-flip, and the round-trip self-test. The only layer that knows
//! about all of the Section Reader, the Splitter, and the LZSS codec at
//! once; never touches a filesystem path.

use std::collections::HashMap;

use crate::catalog::VersionCatalog;
use crate::config::SUBSECTION_ALIGN;
use crate::container::{split_section_zero, RawHeader, SectionReader};
use crate::error::{Error, Result, Warning};
use crate::lzss;
use crate::manifest::{Manifest, SectionEntry, SubSectionEntry, MANIFEST_VERSION};

/// One file produced by `unpack`, named relative to an output directory the
/// core never sees directly.
#[derive(Debug, Clone)]
pub struct UnpackedFile {
    pub name: String,
    pub data: Vec<u8>,
}

/// Result of [`self_test`]: whether every decompressed sub-section survives
/// a recompress/redecompress cycle unchanged.
#[derive(Debug, Clone, Default)]
pub struct SelfTestReport {
    pub sections_checked: usize,
    pub subsections_checked: usize,
    pub mismatches: Vec<String>,
}

impl SelfTestReport {
    pub fn all_match(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Parse `input` into sections, decompressing section 0's sub-blocks when
/// the firmware is recognized. `manifest.filename` is left empty: the core
/// never sees the original path, so the caller (the CLI's `fileio` layer)
/// fills it in.
pub fn unpack(input: &[u8], catalog: &dyn VersionCatalog) -> Result<(Manifest, Vec<UnpackedFile>, Vec<Warning>)> {
    let mut reader = SectionReader::new(input);
    let mut files = Vec::new();
    let mut warnings = Vec::new();
    let mut entries = Vec::new();
    let mut section_idx = 0usize;
    let mut first = true;

    while let Some((raw, parsed, body)) = reader.read_section()? {
        let section_filename = format!("section_{section_idx:03}.bin");
        let mut subsection_entries = Vec::new();

        if first {
            let triple = match (&parsed.device_id, &parsed.device_version, &parsed.dvr) {
                (Some(d), Some(v), Some(r)) => Some((d.clone(), v.clone(), r.clone())),
                _ => None,
            };
            let recognized = triple
                .as_ref()
                .map(|(d, v, r)| catalog.lookup(d, v, r).is_some())
                .unwrap_or(false);

            if recognized {
                let (subs, split_warnings) = split_section_zero(body);
                warnings.extend(split_warnings);
                for (i, sub) in subs.iter().enumerate() {
                    if sub.compressed {
                        let compressed_name = format!("section_{section_idx:03}_sub_{i:03}.lzss");
                        let decompressed = lzss::decode(&sub.body)?;
                        let decompressed_name = format!("section_{section_idx:03}_sub_{i:03}.bin");
                        files.push(UnpackedFile { name: compressed_name.clone(), data: sub.body.clone() });
                        files.push(UnpackedFile { name: decompressed_name.clone(), data: decompressed });
                        subsection_entries.push(SubSectionEntry {
                            filename: compressed_name,
                            compressed: true,
                            filename_decompressed: Some(decompressed_name),
                        });
                    } else {
                        let name = format!("section_{section_idx:03}_sub_{i:03}.bin");
                        files.push(UnpackedFile { name: name.clone(), data: sub.body.clone() });
                        subsection_entries.push(SubSectionEntry { filename: name, compressed: false, filename_decompressed: None });
                    }
                }
            } else if let Some((d, v, r)) = triple {
                warnings.push(Warning::UnrecognizedFirmware { device_id: d, device_version: v, dvr: r });
            }
        }

        if subsection_entries.is_empty() {
            files.push(UnpackedFile { name: section_filename.clone(), data: body.to_vec() });
        }

        entries.push(SectionEntry {
            filename: section_filename,
            raw_header: raw.original_text,
            parsed_header: parsed,
            subsections: subsection_entries,
        });

        first = false;
        section_idx += 1;
    }

    let manifest = Manifest {
        version: MANIFEST_VERSION,
        filename: String::new(),
        leading_padding: reader.leading_padding(),
        sections: entries,
    };

    Ok((manifest, files, warnings))
}

/// Reassemble a container from a manifest and the files it names.
/// `files` maps manifest filenames to their contents, as read by the
/// caller's `fileio` layer from an output directory.
pub fn repack(manifest: &Manifest, files: &HashMap<String, Vec<u8>>) -> Result<Vec<u8>> {
    let mut out = vec![b' '; manifest.leading_padding];

    for section in &manifest.sections {
        let body = if section.subsections.is_empty() {
            lookup(files, &section.filename)?.clone()
        } else {
            let mut body = Vec::new();
            for sub in &section.subsections {
                let mut chunk = if sub.compressed {
                    let src = sub.filename_decompressed.as_ref().ok_or_else(|| Error::MetadataMissing {
                        what: format!("decompressed source for {}", sub.filename),
                    })?;
                    lzss::encode(lookup(files, src)?)
                } else {
                    lookup(files, &sub.filename)?.clone()
                };
                let pad = (SUBSECTION_ALIGN - chunk.len() % SUBSECTION_ALIGN) % SUBSECTION_ALIGN;
                chunk.extend(std::iter::repeat(0u8).take(pad));
                body.extend(chunk);
            }
            body
        };

        let checksum: u64 = body.iter().map(|&b| b as u64).sum();
        let mut raw = RawHeader::new(section.raw_header.clone());
        raw.set_kv("LENGTH", &body.len().to_string());
        raw.set_kv("SUM", &checksum.to_string());
        out.extend_from_slice(&raw.render()?);
        out.extend_from_slice(&body);
    }

    Ok(out)
}

fn lookup<'a>(files: &'a HashMap<String, Vec<u8>>, name: &str) -> Result<&'a Vec<u8>> {
    files.get(name).ok_or_else(|| Error::MetadataMissing { what: name.to_string() })
}

/// Rewrite every section header's region token (`M1INT` ↔ `M1CN`), whichever
/// the first header contains. Bodies pass through unchanged.
pub fn flip_region(input: &[u8]) -> Result<Vec<u8>> {
    let mut reader = SectionReader::new(input);
    let mut out = Vec::with_capacity(input.len());
    let mut first = true;
    let mut saw_region = false;

    while let Some((mut raw, _parsed, body)) = reader.read_section()? {
        let swapped = raw.swap_region();
        if first {
            if swapped.is_none() {
                return Err(Error::UnknownRegion);
            }
            saw_region = true;
        }
        out.extend_from_slice(&raw.render()?);
        out.extend_from_slice(body);
        first = false;
    }

    if !saw_region {
        return Err(Error::UnknownRegion);
    }
    Ok(out)
}

/// Unpack, then recompress/redecompress each decompressed sub-section and
/// compare to the original decompressed bytes. The primary codec
/// correctness gate (SPEC_FULL.md §8, "round-trips (self-test)").
pub fn self_test(input: &[u8], catalog: &dyn VersionCatalog) -> Result<(SelfTestReport, Vec<Warning>)> {
    let (manifest, files, warnings) = unpack(input, catalog)?;
    let by_name: HashMap<&str, &[u8]> = files.iter().map(|f| (f.name.as_str(), f.data.as_slice())).collect();

    let mut report = SelfTestReport::default();
    for section in &manifest.sections {
        if section.subsections.is_empty() {
            continue;
        }
        report.sections_checked += 1;
        for sub in &section.subsections {
            if !sub.compressed {
                continue;
            }
            report.subsections_checked += 1;
            let decompressed_name = sub.filename_decompressed.as_deref().unwrap_or_default();
            let Some(original) = by_name.get(decompressed_name) else {
                report.mismatches.push(decompressed_name.to_string());
                continue;
            };
            let recompressed = lzss::encode(original);
            let redecompressed = lzss::decode(&recompressed)?;
            if redecompressed != *original {
                report.mismatches.push(decompressed_name.to_string());
            }
        }
    }

    Ok((report, warnings))
}
