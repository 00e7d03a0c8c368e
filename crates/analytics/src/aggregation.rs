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

//! A module that provides per-minute aggregation of time-series data over a
//! trailing window.
//!
//! The main components are:
//! - `TimeSeriesData`: A trait that defines required methods for time-series
//!   data points
//! - `Aggregator`: A trait defining how data is aggregated incrementally as
//!   items enter and leave the window
//! - `TrailingWindowAdaptor`: Iterator adapter that walks every minute between
//!   the first and the last item and emits the aggregated value of the window
//!   ending at that minute
//! - `MovingAverage`: The moving average of event durations built on top of
//!   the adaptor
//!
//! The windowing system features:
//! - Dense minute buckets, minutes without any data still produce a value
//! - A trailing window `(minute - window_size, minute]` measured in whole
//!   minute buckets
//! - Generic aggregation logic via the Aggregator trait
//!
//! Example usage:
//! ```text
//! use delivery_time_analytics::aggregation::MovingAverage;
//!
//! let events = read_events();
//! let points = MovingAverage::new(10)?.aggregate(events)?;
//! ```

use crate::{
    error::AggregationError,
    event::{floor_to_minute, Event},
};
use chrono::{NaiveDateTime, TimeDelta};
use either::Either;
use std::{collections::VecDeque, iter::Peekable, num::NonZeroU32};
use tracing::{debug, trace, warn};

/// A minute bucket and the aggregated value of the window ending at it
pub type MinuteValue<V> = (NaiveDateTime, V);

/// A trait for defining time-series data points
pub trait TimeSeriesData {
    fn get_ts(&self) -> NaiveDateTime;
    fn get_value(&self) -> f64;
}

impl TimeSeriesData for Event {
    fn get_ts(&self) -> NaiveDateTime {
        self.timestamp()
    }

    fn get_value(&self) -> f64 {
        self.duration()
    }
}

/// A trait for defining aggregation logic over a sliding window.
///
/// Items are pushed when they are admitted to the window and evicted, in the
/// same order, once they fall out of it.
pub trait Aggregator<Input, Output> {
    fn push(&mut self, item: &Input);
    fn evict(&mut self, item: &Input);
    fn value(&self) -> Output;
}

/// Running arithmetic mean, yields `(mean, number of samples)`.
///
/// An empty window has a mean of `0`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MeanAggregator {
    sum: f64,
    count: usize,
}

impl MeanAggregator {
    pub const fn count(&self) -> usize {
        self.count
    }
}

impl<Input: TimeSeriesData> Aggregator<Input, (f64, usize)> for MeanAggregator {
    fn push(&mut self, item: &Input) {
        self.sum += item.get_value();
        self.count += 1;
    }

    fn evict(&mut self, item: &Input) {
        self.count = self.count.saturating_sub(1);
        if self.count == 0 {
            // Reset instead of subtracting so rounding errors don't survive an
            // empty window
            self.sum = 0.0;
        } else {
            self.sum -= item.get_value();
        }
    }

    fn value(&self) -> (f64, usize) {
        if self.count == 0 {
            (0.0, 0)
        } else {
            (self.sum / self.count as f64, self.count)
        }
    }
}

/// Size of the trailing window in minutes, always at least one minute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowSize(NonZeroU32);

impl WindowSize {
    pub const fn minutes(&self) -> u32 {
        self.0.get()
    }

    pub fn duration(&self) -> TimeDelta {
        TimeDelta::minutes(i64::from(self.0.get()))
    }
}

impl TryFrom<i64> for WindowSize {
    type Error = AggregationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u32::try_from(value)
            .ok()
            .and_then(NonZeroU32::new)
            .map(WindowSize)
            .ok_or(AggregationError::InvalidWindow(value))
    }
}

/// An iterator adaptor that aggregates time ordered data over a trailing
/// window, one value per minute.
///
/// For every minute `m` from the minute of the first item up to the minute of
/// the last item, the adaptor admits all items whose minute is `<= m`, evicts
/// the items whose minute is `<= m - window_size` and emits the aggregated
/// value as `Either::Left((m, value))`.
///
/// The source must be sorted by timestamp. Items that arrive earlier than an
/// already admitted item can't be placed in the window anymore; they are
/// returned untouched as `Either::Right(item)`.
pub struct TrailingWindowAdaptor<Input, AggValue, AggregatorImpl, I>
where
    I: Iterator<Item = Input>,
{
    source: Peekable<I>,
    aggregator: AggregatorImpl,
    window_size: WindowSize,
    /// Items currently inside the window, oldest first
    window: VecDeque<Input>,
    /// The next minute bucket to compute
    current_minute: Option<NaiveDateTime>,
    /// Timestamp of the most recently admitted item
    last_admitted: Option<NaiveDateTime>,
    buffer: VecDeque<MinuteValue<AggValue>>,
    late_buffer: VecDeque<Input>,
    done: bool,
}

impl<Input, AggValue, AggregatorImpl, I> TrailingWindowAdaptor<Input, AggValue, AggregatorImpl, I>
where
    Input: TimeSeriesData,
    AggregatorImpl: Aggregator<Input, AggValue>,
    I: Iterator<Item = Input>,
{
    pub fn new(source: I, window_size: WindowSize, aggregator: AggregatorImpl) -> Self {
        Self {
            source: source.peekable(),
            aggregator,
            window_size,
            window: VecDeque::new(),
            current_minute: None,
            last_admitted: None,
            buffer: VecDeque::new(),
            late_buffer: VecDeque::new(),
            done: false,
        }
    }

    /// Compute the next minute bucket, or mark the adaptor as done once the
    /// minute of the last item has been emitted
    fn step(&mut self) {
        let current = match self.current_minute {
            Some(current) => current,
            None => match self.source.peek() {
                Some(first) => floor_to_minute(first.get_ts()),
                None => {
                    self.done = true;
                    return;
                }
            },
        };

        // Admission happens before eviction, so an item landing exactly on
        // the current minute counts for it
        while let Some(item) = self
            .source
            .next_if(|item| floor_to_minute(item.get_ts()) <= current)
        {
            let ts = item.get_ts();
            if self.last_admitted.is_some_and(|last| ts < last) {
                warn!(timestamp = %ts, "out of order item is not aggregated");
                self.late_buffer.push_back(item);
            } else {
                self.last_admitted = Some(ts);
                self.aggregator.push(&item);
                self.window.push_back(item);
            }
        }

        // Anything left in the source is in a later minute, so the end is
        // reached only when the source is drained and the last admitted item
        // is behind us
        let past_last_item = self
            .last_admitted
            .is_none_or(|last| floor_to_minute(last) < current);
        if self.source.peek().is_none() && past_last_item {
            self.done = true;
            return;
        }

        // Without a representable cutoff every admitted item is still inside
        // the window
        if let Some(cutoff) = current.checked_sub_signed(self.window_size.duration()) {
            while self
                .window
                .front()
                .is_some_and(|item| floor_to_minute(item.get_ts()) <= cutoff)
            {
                if let Some(expired) = self.window.pop_front() {
                    self.aggregator.evict(&expired);
                }
            }
        }

        trace!(minute = %current, window_len = self.window.len(), "minute aggregated");
        self.buffer.push_back((current, self.aggregator.value()));
        match current.checked_add_signed(TimeDelta::minutes(1)) {
            Some(next) => self.current_minute = Some(next),
            // The last representable minute has been emitted
            None => self.done = true,
        }
    }
}

impl<Input, AggValue, AggregatorImpl, I> Iterator
    for TrailingWindowAdaptor<Input, AggValue, AggregatorImpl, I>
where
    Input: TimeSeriesData,
    AggregatorImpl: Aggregator<Input, AggValue>,
    I: Iterator<Item = Input>,
{
    type Item = Either<MinuteValue<AggValue>, Input>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(late) = self.late_buffer.pop_front() {
                return Some(Either::Right(late));
            }
            if let Some(value) = self.buffer.pop_front() {
                return Some(Either::Left(value));
            }
            if self.done {
                return None;
            }
            self.step();
        }
    }
}

pub trait TrailingWindowExt<Input, AggValue, AggregatorImpl>:
    Iterator<Item = Input> + Sized
where
    Input: TimeSeriesData,
    AggregatorImpl: Aggregator<Input, AggValue>,
{
    fn trailing_window(
        self,
        window_size: WindowSize,
        aggregator: AggregatorImpl,
    ) -> TrailingWindowAdaptor<Input, AggValue, AggregatorImpl, Self> {
        TrailingWindowAdaptor::new(self, window_size, aggregator)
    }
}

impl<Input, AggValue, AggregatorImpl, I> TrailingWindowExt<Input, AggValue, AggregatorImpl> for I
where
    Input: TimeSeriesData,
    AggregatorImpl: Aggregator<Input, AggValue>,
    I: Iterator<Item = Input>,
{
}

/// Average of the durations in the trailing window ending at `minute`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputPoint {
    pub minute: NaiveDateTime,
    pub average: f64,
    /// Number of durations in the window, `0` means there was no data and the
    /// average is reported as `0`
    pub samples: usize,
}

/// Per-minute moving average of event durations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovingAverage {
    window_size: WindowSize,
}

impl MovingAverage {
    pub fn new(window_size: i64) -> Result<Self, AggregationError> {
        Ok(Self {
            window_size: WindowSize::try_from(window_size)?,
        })
    }

    pub const fn window_size(&self) -> WindowSize {
        self.window_size
    }

    /// Compute one [`OutputPoint`] for every minute from the first to the last
    /// event. Events are sorted by timestamp before aggregation, the relative
    /// order of events with equal timestamps is kept.
    pub fn aggregate<T>(&self, events: T) -> Result<Vec<OutputPoint>, AggregationError>
    where
        T: IntoIterator<Item = Event>,
    {
        let mut events: Vec<Event> = events.into_iter().collect();
        if events.is_empty() {
            return Err(AggregationError::EmptyInput);
        }
        events.sort_by_key(Event::timestamp);
        debug!(
            events = events.len(),
            window_minutes = self.window_size.minutes(),
            "aggregating moving average"
        );
        let points: Vec<OutputPoint> = events
            .into_iter()
            .trailing_window(self.window_size, MeanAggregator::default())
            .filter_map(Either::left)
            .map(|(minute, (average, samples)): MinuteValue<(f64, usize)>| OutputPoint {
                minute,
                average,
                samples,
            })
            .collect();
        debug!(minutes = points.len(), "moving average computed");
        Ok(points)
    }
}
