//! Time source for header timestamps and modification times

use std::io;
use std::path::Path;

use chrono::{DateTime, Utc};

#[cfg(test)]
use mockall::automock;

/// Abstraction over wall-clock time and file modification time
#[cfg_attr(test, automock)]
pub trait Clock: Send + Sync {
    /// Current wall-clock time
    fn now(&self) -> DateTime<Utc>;

    /// Last modification time of the file at `path`
    fn modified(&self, path: &Path) -> io::Result<DateTime<Utc>>;
}

/// Clock backed by the system time and filesystem metadata
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn modified(&self, path: &Path) -> io::Result<DateTime<Utc>> {
        let mtime = std::fs::metadata(path)?.modified()?;
        Ok(DateTime::<Utc>::from(mtime))
    }
}
