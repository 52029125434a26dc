//! Deterministic clock for tests

use std::io;
use std::path::Path;

use chrono::{DateTime, TimeZone, Utc};
use compact_index::versions::Clock;

/// Clock returning the same instant for `now` and every `modified` call
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }

    pub fn at(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Self {
        Self::new(
            Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
                .unwrap(),
        )
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }

    fn modified(&self, path: &Path) -> io::Result<DateTime<Utc>> {
        if path.exists() {
            Ok(self.instant)
        } else {
            Err(io::Error::from(io::ErrorKind::NotFound))
        }
    }
}
