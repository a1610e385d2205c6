//! Filesystem adapter: the only module in the crate that touches a
//! [`Path`](std::path::Path). The core (`orchestrator`, `container`, `lzss`)
//! works purely on in-memory byte buffers; this module is what the CLI uses
//! to turn those buffers into (and back out of) a directory tree.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::manifest::Manifest;
use crate::orchestrator::UnpackedFile;

pub const MANIFEST_FILENAME: &str = "manifest.json";

pub fn read_input(path: &Path) -> Result<Vec<u8>> {
    Ok(fs::read(path)?)
}

pub fn write_output(path: &Path, data: &[u8]) -> Result<()> {
    fs::write(path, data)?;
    Ok(())
}

/// Write a completed unpack: the manifest plus every produced file, into
/// `out_dir`, creating it if necessary. `manifest.filename` is set from
/// `input_path`'s file name before it is serialized, since the core leaves
/// it blank.
pub fn write_unpacked(out_dir: &Path, input_path: &Path, mut manifest: Manifest, files: &[UnpackedFile]) -> Result<()> {
    fs::create_dir_all(out_dir)?;
    manifest.filename = input_path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let manifest_path = out_dir.join(MANIFEST_FILENAME);
    let manifest_file = fs::File::create(manifest_path)?;
    manifest.to_writer_pretty(manifest_file)?;

    for file in files {
        fs::write(out_dir.join(&file.name), &file.data)?;
    }
    Ok(())
}

/// Read a manifest previously written by [`write_unpacked`].
pub fn read_manifest(manifest_path: &Path) -> Result<Manifest> {
    let file = fs::File::open(manifest_path)?;
    Manifest::from_reader(file)
}

/// Read every file a manifest references (section bodies and sub-section
/// files), relative to the directory the manifest lives in, keyed by the
/// filename the manifest uses to refer to them.
pub fn read_referenced_files(manifest_dir: &Path, manifest: &Manifest) -> Result<HashMap<String, Vec<u8>>> {
    let mut files = HashMap::new();
    for section in &manifest.sections {
        if section.subsections.is_empty() {
            insert_file(&mut files, manifest_dir, &section.filename)?;
            continue;
        }
        for sub in &section.subsections {
            if sub.compressed {
                if let Some(decompressed) = &sub.filename_decompressed {
                    insert_file(&mut files, manifest_dir, decompressed)?;
                }
            } else {
                insert_file(&mut files, manifest_dir, &sub.filename)?;
            }
        }
    }
    Ok(files)
}

fn insert_file(files: &mut HashMap<String, Vec<u8>>, dir: &Path, name: &str) -> Result<()> {
    let data = fs::read(dir.join(name))?;
    files.insert(name.to_string(), data);
    Ok(())
}
