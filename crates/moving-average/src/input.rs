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
use delivery_time_analytics::{Event, RawEvent};
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};
use tracing::debug;

/// Read all events of a JSON Lines file
pub fn read_events(path: &Path) -> Result<Vec<Event>, CliError> {
    let file = File::open(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => CliError::InputNotFound(path.to_path_buf()),
        _ => CliError::Io(err),
    })?;
    let events = parse_events(BufReader::new(file))?;
    debug!(path = %path.display(), events = events.len(), "input events loaded");
    Ok(events)
}

/// Parse one event per line, blank lines are skipped
pub fn parse_events<R: BufRead>(reader: R) -> Result<Vec<Event>, CliError> {
    let mut events = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line.map_err(|source| CliError::Read {
            line: line_number,
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let raw: RawEvent = serde_json::from_str(&line).map_err(|source| CliError::Json {
            line: line_number,
            source,
        })?;
        let event = Event::try_from(raw).map_err(|source| CliError::Event {
            line: line_number,
            source,
        })?;
        events.push(event);
    }
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use delivery_time_analytics::EventError;
    use std::io::Cursor;

    #[test]
    fn test_parse_events() {
        let input = r#"{"timestamp": "2018-12-26 18:11:08.509654","translation_id": "5aa5b2f39f7254a75aa5","source_language": "en","target_language": "fr","client_name": "airliberty","event_name": "translation_delivered","nr_words": 30, "duration": 20}

{"timestamp": "2018-12-26 18:15:19.903159","translation_id": "5aa5b2f39f7254a75aa4","source_language": "en","target_language": "fr","client_name": "airliberty","event_name": "translation_delivered","nr_words": 30, "duration": 31.5}
"#;
        let events = parse_events(Cursor::new(input)).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].duration(), 20.0);
        assert_eq!(events[1].duration(), 31.5);
        assert_eq!(
            events[1].timestamp().to_string(),
            "2018-12-26 18:15:19.903159"
        );
    }

    #[test]
    fn test_parse_events_invalid_json() {
        let input = "{\"timestamp\": \"2018-12-26 18:11:08.509654\", \"duration\": 20}\nnot json\n";
        let err = parse_events(Cursor::new(input)).unwrap_err();
        assert!(matches!(err, CliError::Json { line: 2, .. }), "unexpected error {err:?}");
    }

    #[test]
    fn test_parse_events_missing_duration() {
        let input = "{\"timestamp\": \"2018-12-26 18:11:08.509654\"}\n";
        let err = parse_events(Cursor::new(input)).unwrap_err();
        assert!(matches!(err, CliError::Json { line: 1, .. }), "unexpected error {err:?}");
    }

    #[test]
    fn test_parse_events_malformed_timestamp() {
        let input = "{\"timestamp\": \"26/12/2018 18:11\", \"duration\": 20}\n";
        let err = parse_events(Cursor::new(input)).unwrap_err();
        assert!(
            matches!(
                err,
                CliError::Event {
                    line: 1,
                    source: EventError::MalformedTimestamp { .. }
                }
            ),
            "unexpected error {err:?}"
        );
    }

    #[test]
    fn test_parse_events_invalid_utf8() {
        let mut input =
            b"{\"timestamp\": \"2018-12-26 18:11:08.509654\", \"duration\": 20}\n".to_vec();
        input.extend_from_slice(b"{\"timestamp\": \"\xff\xfe\", \"duration\": 20}\n");
        let err = parse_events(Cursor::new(input)).unwrap_err();
        assert!(
            matches!(
                err,
                CliError::Read { line: 2, ref source } if source.kind() == io::ErrorKind::InvalidData
            ),
            "unexpected error {err:?}"
        );
    }

    #[test]
    fn test_read_events_not_found() {
        let path = Path::new("does/not/exist.json");
        let err = read_events(path).unwrap_err();
        assert!(matches!(err, CliError::InputNotFound(p) if p == path));
    }
}
