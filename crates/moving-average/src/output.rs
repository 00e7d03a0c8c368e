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

use crate::error::CliError;
use delivery_time_analytics::{event::format_minute, OutputPoint};
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

/// One line of the results
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OutputRecord {
    pub date: String,
    pub average_delivery_time: f64,
}

impl From<&OutputPoint> for OutputRecord {
    fn from(point: &OutputPoint) -> Self {
        Self {
            date: format_minute(point.minute),
            average_delivery_time: point.average,
        }
    }
}

/// Create (or truncate) the results file, or fall back to stdout when no path
/// is given
pub fn open_writer(output: Option<&Path>) -> Result<Box<dyn Write>, CliError> {
    let writer: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout())),
    };
    Ok(writer)
}

/// Write the points as JSON Lines
pub fn write_points<W: Write>(writer: &mut W, points: &[OutputPoint]) -> Result<(), CliError> {
    for point in points {
        serde_json::to_writer(&mut *writer, &OutputRecord::from(point))?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_write_points() {
        let minute = NaiveDate::from_ymd_opt(2018, 12, 26)
            .unwrap()
            .and_hms_opt(18, 11, 0)
            .unwrap();
        let points = vec![
            OutputPoint {
                minute,
                average: 20.0,
                samples: 1,
            },
            OutputPoint {
                minute: minute + chrono::TimeDelta::minutes(1),
                average: 25.5,
                samples: 2,
            },
            OutputPoint {
                minute: minute + chrono::TimeDelta::minutes(2),
                average: 0.0,
                samples: 0,
            },
        ];
        let mut buf = Vec::new();
        write_points(&mut buf, &points).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "{\"date\":\"2018-12-26 18:11:00\",\"average_delivery_time\":20.0}\n\
             {\"date\":\"2018-12-26 18:12:00\",\"average_delivery_time\":25.5}\n\
             {\"date\":\"2018-12-26 18:13:00\",\"average_delivery_time\":0.0}\n"
        );
    }
}
