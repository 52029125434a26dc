use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::versions::clock::{Clock, SystemClock};
use crate::versions::entry::{
    HEADER_PREFIX, PackageVersionsEntry, SEPARATOR, format_entries, format_header,
    parse_timestamp, validate_all,
};
use crate::versions::error::VersionsFileError;

/// Versions list bound to a single path.
///
/// Nothing is cached between calls; every operation goes back to the file.
/// Concurrent writers against the same path must be serialized by the caller.
pub struct VersionsFile<C: Clock = SystemClock> {
    path: PathBuf,
    clock: C,
}

impl VersionsFile<SystemClock> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_clock(path, SystemClock)
    }
}

impl<C: Clock> VersionsFile<C> {
    pub fn with_clock(path: impl Into<PathBuf>, clock: C) -> Self {
        Self {
            path: path.into(),
            clock,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the whole file with a fresh header followed by `entries`
    pub fn create(&self, entries: &[PackageVersionsEntry]) -> Result<(), VersionsFileError> {
        validate_all(entries)?;

        let mut contents = format_header(self.clock.now());
        contents.push_str(&format_entries(entries));

        let mut file = File::create(&self.path).map_err(|e| self.io_error(e))?;
        self.write_and_flush(&mut file, &contents)?;

        info!(
            "Created versions file {:?} with {} entries ({} bytes)",
            self.path,
            entries.len(),
            contents.len()
        );
        Ok(())
    }

    /// Append `entries` to the end of the existing file
    ///
    /// Existing bytes are never rewritten. A name that is already listed gets
    /// a second line.
    pub fn update(&self, entries: &[PackageVersionsEntry]) -> Result<(), VersionsFileError> {
        validate_all(entries)?;

        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;

        if entries.is_empty() {
            debug!("No entries to append to {:?}", self.path);
            return Ok(());
        }

        let lines = format_entries(entries);
        self.write_and_flush(&mut file, &lines)?;

        info!(
            "Appended {} entries to versions file {:?} ({} bytes)",
            entries.len(),
            self.path,
            lines.len()
        );
        Ok(())
    }

    /// Raw file content
    pub fn contents(&self) -> Result<String, VersionsFileError> {
        let contents = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        debug!("Read {} bytes from {:?}", contents.len(), self.path);
        Ok(contents)
    }

    /// File content followed by the lines of `extra`; the file is left untouched
    pub fn contents_with(
        &self,
        extra: &[PackageVersionsEntry],
    ) -> Result<String, VersionsFileError> {
        validate_all(extra)?;

        let mut contents = self.contents()?;
        contents.push_str(&format_entries(extra));
        Ok(contents)
    }

    /// Last modification time of the file as reported by the clock
    pub fn updated_at(&self) -> Result<DateTime<Utc>, VersionsFileError> {
        self.clock
            .modified(&self.path)
            .map_err(|e| self.io_error(e))
    }

    /// Timestamp from the `created_at:` header, if the file has one
    pub fn created_at(&self) -> Result<Option<DateTime<Utc>>, VersionsFileError> {
        let contents = self.contents()?;
        Ok(split_header(&contents).0)
    }

    /// Parse every body line back into entries, in file order
    pub fn entries(&self) -> Result<Vec<PackageVersionsEntry>, VersionsFileError> {
        let contents = self.contents()?;
        let (_, first_line_number, body) = split_header(&contents);

        body.split_terminator('\n')
            .enumerate()
            .map(|(i, line)| PackageVersionsEntry::parse_line(first_line_number + i, line))
            .collect()
    }

    fn write_and_flush(&self, file: &mut File, contents: &str) -> Result<(), VersionsFileError> {
        file.write_all(contents.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|e| self.io_error(e))
    }

    fn io_error(&self, source: std::io::Error) -> VersionsFileError {
        VersionsFileError::from_io(&self.path, source)
    }
}

/// Split off the header block.
///
/// Returns the header timestamp, the 1-based line number where the body
/// starts, and the body itself. A file without a well-formed header is all body.
fn split_header(contents: &str) -> (Option<DateTime<Utc>>, usize, &str) {
    let Some(rest) = contents.strip_prefix(HEADER_PREFIX) else {
        return (None, 1, contents);
    };
    let Some((timestamp, rest)) = rest.split_once('\n') else {
        return (None, 1, contents);
    };
    let Some(body) = rest
        .strip_prefix(SEPARATOR)
        .and_then(|rest| rest.strip_prefix('\n'))
    else {
        return (None, 1, contents);
    };

    (parse_timestamp(timestamp), 3, body)
}
