// Copyright (C) 2025-present The NetGauze Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or
// implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::error::EventError;
use chrono::{NaiveDateTime, TimeDelta, Timelike};

/// Timestamp format of the input events, e.g. `2018-12-26 18:11:08.509654`.
/// The fractional part is optional.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Format of a minute bucket in the output, seconds are always `00`
pub const MINUTE_FORMAT: &str = "%Y-%m-%d %H:%M:00";

/// A single record as it appears in the input log. Only the fields needed for
/// the aggregation are kept, everything else in the record is ignored.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RawEvent {
    pub timestamp: String,
    pub duration: f64,
}

/// A parsed translation delivered event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    timestamp: NaiveDateTime,
    duration: f64,
}

impl Event {
    pub fn new(timestamp: NaiveDateTime, duration: f64) -> Result<Self, EventError> {
        if !duration.is_finite() || duration < 0.0 {
            return Err(EventError::InvalidDuration(duration));
        }
        Ok(Self {
            timestamp,
            duration,
        })
    }

    pub const fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub const fn duration(&self) -> f64 {
        self.duration
    }

    /// The minute bucket this event falls into
    pub fn minute(&self) -> NaiveDateTime {
        floor_to_minute(self.timestamp)
    }
}

impl TryFrom<RawEvent> for Event {
    type Error = EventError;

    fn try_from(value: RawEvent) -> Result<Self, Self::Error> {
        let timestamp = parse_timestamp(&value.timestamp)?;
        Event::new(timestamp, value.duration)
    }
}

pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, EventError> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).map_err(|source| {
        EventError::MalformedTimestamp {
            value: value.to_string(),
            source,
        }
    })
}

/// Truncate the timestamp to the start of its minute
pub fn floor_to_minute(timestamp: NaiveDateTime) -> NaiveDateTime {
    timestamp
        - TimeDelta::seconds(i64::from(timestamp.second()))
        - TimeDelta::nanoseconds(i64::from(timestamp.nanosecond()))
}

pub fn format_minute(minute: NaiveDateTime) -> String {
    minute.format(MINUTE_FORMAT).to_string()
}
