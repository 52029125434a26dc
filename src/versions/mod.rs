//! Versions list persistence
//!
//! The versions list is a flat text file mapping every package name to the
//! versions published for it. Downstream index generation reads it back as raw
//! text.
//!
//! # Modules
//!
//! - [`entry`]: `PackageVersionsEntry` and the line format (header, body lines)
//! - [`file`]: `VersionsFile` with full rewrite (`create`) and append (`update`)
//! - [`clock`]: Injectable time source for header timestamps and mtimes
//! - [`error`]: Error type shared by all operations

pub mod clock;
pub mod entry;
pub mod error;
pub mod file;

pub use clock::{Clock, SystemClock};
pub use entry::PackageVersionsEntry;
pub use error::VersionsFileError;
pub use file::VersionsFile;
