//! Crate-wide error type.
//!
//! One flat enum covers both the codec and the container state machine, in
//! the same register as the LZ4 frame error codes this crate was bootstrapped
//! from: plain data-carrying variants, a manual `Display`, and no dependency
//! on an error-derive crate.

use std::fmt;

/// Result alias used throughout the core.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// Input ended mid flag-group (codec) or mid header (section reader).
    TruncatedStream,
    /// A section's body was shorter than its `LENGTH=` field promised.
    TruncatedSection { section_id: Option<String>, expected: usize, actual: usize },
    /// The unsigned-byte sum of a section body did not match its `SUM=` field.
    ChecksumMismatch { expected: u64, actual: u64 },
    /// `(device_id, device_version, dvr)` did not resolve in the version catalog.
    UnknownDevice { device_id: String },
    UnknownDeviceVersion { device_id: String, device_version: String },
    UnknownDvr { device_id: String, device_version: String, dvr: String },
    /// Region flip found neither `M1INT` nor `M1CN` in the first header.
    UnknownRegion,
    /// Decoder output exceeded the caller-supplied budget.
    OutputOverflow { budget: usize },
    /// Repack was invoked without a manifest, or with a manifest referencing
    /// a file that was not supplied.
    MetadataMissing { what: String },
    /// A match index/length surfaced from the dictionary violated the
    /// encoder's own invariants. Indicates a codec bug, not bad input.
    EncoderInvariant { detail: String },
    /// Failure in the (out-of-core) file-system adapter.
    Io(std::io::Error),
    /// Failure decoding/encoding the manifest document.
    Manifest(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::TruncatedStream => write!(f, "truncated stream"),
            Error::TruncatedSection { section_id, expected, actual } => write!(
                f,
                "truncated section {}: expected {} body bytes, found {}",
                section_id.as_deref().unwrap_or("<section 0>"),
                expected,
                actual
            ),
            Error::ChecksumMismatch { expected, actual } => write!(
                f,
                "checksum mismatch: header claims {}, body sums to {}",
                expected, actual
            ),
            Error::UnknownDevice { device_id } => write!(f, "unknown device {device_id:?}"),
            Error::UnknownDeviceVersion { device_id, device_version } => write!(
                f,
                "unknown device version {device_version:?} for device {device_id:?}"
            ),
            Error::UnknownDvr { device_id, device_version, dvr } => write!(
                f,
                "unknown dvr {dvr:?} for device {device_id:?} version {device_version:?}"
            ),
            Error::UnknownRegion => write!(f, "first header contains neither M1INT nor M1CN"),
            Error::OutputOverflow { budget } => {
                write!(f, "decoder output exceeded the {budget}-byte budget")
            }
            Error::MetadataMissing { what } => write!(f, "repack is missing {what}"),
            Error::EncoderInvariant { detail } => write!(f, "encoder invariant violated: {detail}"),
            Error::Io(e) => write!(f, "io error: {e}"),
            Error::Manifest(e) => write!(f, "manifest error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Manifest(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Manifest(e)
    }
}

/// Non-fatal conditions the orchestrator recovers from by itself.
///
/// Unlike [`Error`], a `Warning` never aborts an operation; callers may log
/// or display it, but `unpack`/`self_test` still complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// The (device_id, device_version, dvr) triple was not in the catalog;
    /// section 0 was emitted without sub-sectioning.
    UnrecognizedFirmware { device_id: String, device_version: String, dvr: String },
    /// The splitter heuristic found a zero-run crossing a 2048-byte boundary
    /// with fewer than 17 trailing zero bytes, which it deliberately ignores
    /// (see the open question in §4.4) — surfaced so callers can double check.
    SplitterAmbiguity { offset: usize },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnrecognizedFirmware { device_id, device_version, dvr } => write!(
                f,
                "unrecognized firmware {device_id}/{device_version}/{dvr}: section 0 left unsplit"
            ),
            Warning::SplitterAmbiguity { offset } => write!(
                f,
                "sub-section boundary heuristic is ambiguous near offset {offset}"
            ),
        }
    }
}
