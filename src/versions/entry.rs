//! Line format of the versions list
//!
//! ```text
//! created_at: 2024-01-02T03:04:05+00:00
//! ---
//! gem1 1.1,1.2
//! gem2 2.1,2.1-jruby
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::versions::error::VersionsFileError;

/// Prefix of the header line written by `create`
pub const HEADER_PREFIX: &str = "created_at: ";

/// Line separating the header from the body
pub const SEPARATOR: &str = "---";

const FIELD_DELIMITER: char = ' ';
const VERSION_DELIMITER: char = ',';
const LINE_DELIMITER: char = '\n';
const CARRIAGE_RETURN: char = '\r';

/// A package name with every version published for it, in insertion order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageVersionsEntry {
    pub name: String,
    pub versions: Vec<String>,
}

impl PackageVersionsEntry {
    pub fn new<I, V>(name: impl Into<String>, versions: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self {
            name: name.into(),
            versions: versions.into_iter().map(Into::into).collect(),
        }
    }

    /// Reject names and versions that would break the line format
    pub fn validate(&self) -> Result<(), VersionsFileError> {
        if self.name.is_empty() {
            return Err(self.invalid("name is empty"));
        }
        if let Some(c) = find_delimiter(&self.name) {
            return Err(self.invalid(format!("name contains delimiter {:?}", c)));
        }

        for version in &self.versions {
            if version.is_empty() {
                return Err(self.invalid("version is empty"));
            }
            if let Some(c) = find_delimiter(version) {
                return Err(self.invalid(format!(
                    "version {:?} contains delimiter {:?}",
                    version, c
                )));
            }
        }

        Ok(())
    }

    /// Render as `"<name> <v1>,<v2>,...\n"`
    pub fn to_line(&self) -> String {
        format!("{}\n", self)
    }

    /// Parse a single body line, with or without its trailing newline.
    ///
    /// Lines holding fields that `validate` would reject are `InvalidLine`.
    pub fn parse_line(line_number: usize, line: &str) -> Result<Self, VersionsFileError> {
        let line = line.strip_suffix(LINE_DELIMITER).unwrap_or(line);

        let invalid_line = || VersionsFileError::InvalidLine {
            line_number,
            line: line.to_string(),
        };

        let (name, versions) = line.split_once(FIELD_DELIMITER).ok_or_else(invalid_line)?;
        if name.is_empty() {
            return Err(invalid_line());
        }

        let versions = if versions.is_empty() {
            Vec::new()
        } else {
            versions
                .split(VERSION_DELIMITER)
                .map(str::to_string)
                .collect()
        };

        let entry = Self {
            name: name.to_string(),
            versions,
        };
        entry.validate().map_err(|_| invalid_line())?;
        Ok(entry)
    }

    fn invalid(&self, reason: impl Into<String>) -> VersionsFileError {
        VersionsFileError::InvalidEntry {
            name: self.name.clone(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for PackageVersionsEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, FIELD_DELIMITER)?;
        for (i, version) in self.versions.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", VERSION_DELIMITER)?;
            }
            f.write_str(version)?;
        }
        Ok(())
    }
}

impl FromStr for PackageVersionsEntry {
    type Err = VersionsFileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_line(1, s)
    }
}

fn find_delimiter(value: &str) -> Option<char> {
    value
        .chars()
        .find(|c| {
            matches!(
                *c,
                FIELD_DELIMITER | VERSION_DELIMITER | LINE_DELIMITER | CARRIAGE_RETURN
            )
        })
}

/// Validate a whole batch before anything is written
pub fn validate_all(entries: &[PackageVersionsEntry]) -> Result<(), VersionsFileError> {
    entries.iter().try_for_each(PackageVersionsEntry::validate)
}

/// Concatenate the lines of `entries` in order
pub fn format_entries(entries: &[PackageVersionsEntry]) -> String {
    entries.iter().map(PackageVersionsEntry::to_line).collect()
}

/// Header block: `created_at` line followed by the separator line
pub fn format_header(created_at: DateTime<Utc>) -> String {
    format!(
        "{}{}\n{}\n",
        HEADER_PREFIX,
        created_at.to_rfc3339_opts(SecondsFormat::Secs, false),
        SEPARATOR
    )
}

/// Parse an RFC 3339 timestamp with any offset, normalized to UTC
pub fn parse_timestamp(timestamp: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(timestamp.trim_end())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
