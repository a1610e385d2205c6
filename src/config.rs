//! Compile-time layout constants for the container and codec.
//!
//! Grouped the way the teacher's own `config.rs` groups compile-time knobs:
//! plain `pub const`s, no builder, no environment-variable overrides (this
//! format has no equivalent of `LZ4_CLEVEL`/`LZ4_NBWORKERS`).

/// Size of the LZSS ring dictionary in bytes.
pub const DICT_SIZE: usize = 4096;

/// Minimum back-reference match length the encoder will emit.
pub const MIN_MATCH: usize = 3;

/// Maximum back-reference match length representable in a token.
pub const MAX_MATCH: usize = 18;

/// Initial dictionary write cursor for both decoder and encoder.
///
/// See the open question in SPEC_FULL.md §9: the origin of this offset is
/// unknown, but round-tripping existing firmwares requires it exactly.
pub const INITIAL_WRITE_INDEX: usize = DICT_SIZE - 18;

/// Number of (flag, token) bits per flag group.
pub const TOKENS_PER_GROUP: usize = 8;

/// Consecutive zero bytes after a `0x00` flag byte that signal end-of-stream.
pub const END_OF_STREAM_ZEROS: usize = 16;

/// Byte length of a raw section header.
pub const HEADER_SIZE: usize = 256;

/// Alignment, in bytes, of sub-section boundaries within section 0.
pub const SUBSECTION_ALIGN: usize = 2048;

/// Minimum length of a zero-run ending on a [`SUBSECTION_ALIGN`] boundary for
/// the splitter heuristic to treat it as a sub-section boundary.
pub const SUBSECTION_MIN_ZERO_RUN: usize = 16;

/// Header CR-LF terminator, written right before the space padding begins.
pub const HEADER_TERMINATOR: &[u8; 2] = b"\r\n";

/// CLI-tunable knobs for `unpack`. The core `unpack` function itself takes
/// none of these — they're consumed entirely by the `fileio`/CLI layer that
/// turns its return value into a directory tree.
#[derive(Debug, Clone)]
pub struct UnpackOptions {
    pub out_dir: std::path::PathBuf,
}

/// CLI-tunable knobs for `repack`.
#[derive(Debug, Clone)]
pub struct RepackOptions {
    pub output: std::path::PathBuf,
    /// If set, re-run the sub-section splitter heuristic on the freshly
    /// repacked output and warn if it disagrees with the manifest's stored
    /// partition, instead of simply trusting the manifest (the default).
    pub recompute_split: bool,
}
