//! Core library for unpacking, repacking, region-flipping, and self-testing
//! YI M1 / Fujifilm X-A10 firmware images.
//!
//! This crate is strictly single-threaded and synchronous, and the core
//! never touches a filesystem path directly — see [`mod@fileio`] and the
//! `yi-fwtool` binary for the filesystem- and argv-facing layers.

pub mod catalog;
pub mod config;
pub mod container;
pub mod dict;
pub mod error;
pub mod fileio;
pub mod lzss;
pub mod manifest;
pub mod orchestrator;

pub use catalog::{StaticCatalog, VersionCatalog};
pub use error::{Error, Result, Warning};
pub use manifest::Manifest;
pub use orchestrator::{flip_region, repack, self_test, unpack, SelfTestReport, UnpackedFile};
