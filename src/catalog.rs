//! Version catalog (SPEC_FULL.md §4.6): a static table of known
//! `(device_id, device_version, dvr)` triples, consumed by the orchestrator
//! only through the [`VersionCatalog`] trait.

/// Looks up a display name for a `(device_id, device_version, dvr)` triple.
/// Implemented as a trait so the orchestrator never depends on a concrete
/// table — callers may substitute their own catalog (e.g. in tests).
pub trait VersionCatalog {
    fn lookup(&self, device_id: &str, device_version: &str, dvr: &str) -> Option<&str>;
}

struct Entry {
    device_id: &'static str,
    device_version: &'static str,
    dvr: &'static str,
    display_name: &'static str,
}

const KNOWN: &[Entry] = &[
    Entry { device_id: "C59Y1", device_version: "M1INT", dvr: "Ver1.37", display_name: "YI M1 (international)" },
    Entry { device_id: "C59Y1", device_version: "M1INT", dvr: "Ver1.39", display_name: "YI M1 (international)" },
    Entry { device_id: "C59Y1", device_version: "M1CN", dvr: "Ver1.37", display_name: "YI M1 (China)" },
    Entry { device_id: "C59Y1", device_version: "M1CN", dvr: "Ver1.39", display_name: "YI M1 (China)" },
    Entry { device_id: "X-A10", device_version: "XA10", dvr: "Ver1.00", display_name: "Fujifilm X-A10" },
    Entry { device_id: "X-A10", device_version: "XA10", dvr: "Ver1.01", display_name: "Fujifilm X-A10" },
];

/// The built-in catalog of known firmwares, mirroring the shape of the
/// teacher's compile-time tables in `config.rs`: plain `static` data, no
/// registry, no dynamic dispatch beyond the trait object itself.
pub struct StaticCatalog;

impl VersionCatalog for StaticCatalog {
    fn lookup(&self, device_id: &str, device_version: &str, dvr: &str) -> Option<&str> {
        KNOWN
            .iter()
            .find(|e| e.device_id == device_id && e.device_version == device_version && e.dvr == dvr)
            .map(|e| e.display_name)
    }
}
