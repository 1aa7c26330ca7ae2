// Copyright (C) 2024 The polygon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use chrono::DateTime;
use chrono::FixedOffset;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::NaiveTime;
use chrono::TimeZone;
use chrono::Utc;

use crate::request::Scalar;

/// The format used for rendering dates.
const DATE_FORMAT: &str = "%Y-%m-%d";
/// The number of nanoseconds in a second.
const NANOS_PER_SEC: i64 = 1_000_000_000;


/// The representation an endpoint expects a time stamp to be in.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TimestampFormat {
  /// Milliseconds since the UNIX epoch.
  EpochMillis,
  /// Nanoseconds since the UNIX epoch.
  EpochNanos,
  /// A calendar date, `YYYY-MM-DD`.
  DateString,
}


/// A logical time stamp as supplied by a user.
///
/// Date-times without an explicit offset are interpreted as UTC.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Timestamp {
  /// A raw epoch value. It is passed through as-is and its unit is
  /// never reinterpreted.
  Epoch(i64),
  /// A calendar date, denoting midnight UTC.
  Date(NaiveDate),
  /// A date-time without time zone information.
  Naive(NaiveDateTime),
  /// A date-time with an explicit offset.
  Zoned(DateTime<FixedOffset>),
  /// A string that is already formatted the way the endpoint expects.
  Formatted(String),
}

impl Timestamp {
  /// Produce the value to send for this time stamp given the format
  /// the endpoint expects.
  ///
  /// Nanosecond values outside of the range of an `i64` saturate.
  pub fn normalize(&self, format: TimestampFormat) -> Scalar {
    let utc = match self {
      Self::Epoch(epoch) => return Scalar::Int(*epoch),
      Self::Formatted(string) => return Scalar::Str(string.clone()),
      Self::Date(date) => Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)),
      Self::Naive(datetime) => Utc.from_utc_datetime(datetime),
      Self::Zoned(datetime) => datetime.with_timezone(&Utc),
    };

    match format {
      TimestampFormat::EpochMillis => Scalar::Int(utc.timestamp_millis()),
      TimestampFormat::EpochNanos => Scalar::Int(
        utc
          .timestamp()
          .saturating_mul(NANOS_PER_SEC)
          .saturating_add(i64::from(utc.timestamp_subsec_nanos())),
      ),
      TimestampFormat::DateString => Scalar::Str(utc.format(DATE_FORMAT).to_string()),
    }
  }
}

impl From<i64> for Timestamp {
  #[inline]
  fn from(epoch: i64) -> Self {
    Self::Epoch(epoch)
  }
}

impl From<NaiveDate> for Timestamp {
  #[inline]
  fn from(date: NaiveDate) -> Self {
    Self::Date(date)
  }
}

impl From<NaiveDateTime> for Timestamp {
  #[inline]
  fn from(datetime: NaiveDateTime) -> Self {
    Self::Naive(datetime)
  }
}

impl<Tz> From<DateTime<Tz>> for Timestamp
where
  Tz: TimeZone,
{
  #[inline]
  fn from(datetime: DateTime<Tz>) -> Self {
    Self::Zoned(datetime.fixed_offset())
  }
}

impl From<&str> for Timestamp {
  #[inline]
  fn from(string: &str) -> Self {
    Self::Formatted(string.to_string())
  }
}

impl From<String> for Timestamp {
  #[inline]
  fn from(string: String) -> Self {
    Self::Formatted(string)
  }
}


/// Convert a millisecond epoch time stamp, as reported in many
/// responses, into a UTC date-time.
#[inline]
pub fn from_epoch_millis(millis: i64) -> Option<DateTime<Utc>> {
  DateTime::from_timestamp_millis(millis)
}


#[cfg(test)]
mod tests {
  use super::*;

  use std::str::FromStr as _;


  fn naive(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").unwrap()
  }

  /// Check that raw epoch values are never touched.
  #[test]
  fn epoch_passthrough() {
    let ts = Timestamp::from(1_600_000_000_i64);
    for format in [
      TimestampFormat::EpochMillis,
      TimestampFormat::EpochNanos,
      TimestampFormat::DateString,
    ] {
      assert_eq!(ts.normalize(format), Scalar::Int(1_600_000_000));
    }
  }

  /// Check that pre-formatted strings are never touched.
  #[test]
  fn formatted_passthrough() {
    let ts = Timestamp::from("2021-07-22");
    assert_eq!(
      ts.normalize(TimestampFormat::EpochMillis),
      Scalar::Str("2021-07-22".to_string())
    );
  }

  /// Make sure that a naive date-time is treated the same as the
  /// equivalent UTC one.
  #[test]
  fn naive_is_utc() {
    let naive = Timestamp::from(naive("2021-03-04T10:11:12.345"));
    let utc = Timestamp::from(DateTime::<Utc>::from_str("2021-03-04T10:11:12.345Z").unwrap());

    for format in [
      TimestampFormat::EpochMillis,
      TimestampFormat::EpochNanos,
      TimestampFormat::DateString,
    ] {
      assert_eq!(naive.normalize(format), utc.normalize(format));
    }
    assert_eq!(
      utc.normalize(TimestampFormat::EpochMillis),
      Scalar::Int(1614852672345)
    );
  }

  /// Check that zoned date-times get converted to UTC first.
  #[test]
  fn zoned_converted_to_utc() {
    let zoned = DateTime::parse_from_rfc3339("2021-03-04T22:30:00-05:00").unwrap();
    let ts = Timestamp::from(zoned);
    assert_eq!(
      ts.normalize(TimestampFormat::DateString),
      Scalar::Str("2021-03-05".to_string())
    );
    assert_eq!(
      ts.normalize(TimestampFormat::EpochNanos),
      Scalar::Int(1614915000_000_000_000)
    );
  }

  /// Check that a calendar date denotes midnight UTC.
  #[test]
  fn date_is_midnight_utc() {
    let ts = Timestamp::from(NaiveDate::from_ymd_opt(2021, 1, 1).unwrap());
    assert_eq!(
      ts.normalize(TimestampFormat::EpochMillis),
      Scalar::Int(1609459200000)
    );
    assert_eq!(
      ts.normalize(TimestampFormat::DateString),
      Scalar::Str("2021-01-01".to_string())
    );
  }

  /// Verify that converting to epoch milliseconds and back yields the
  /// original date-time.
  #[test]
  fn millis_round_trip() {
    let datetime = DateTime::<Utc>::from_str("2022-11-30T23:59:58.123Z").unwrap();
    let millis = match Timestamp::from(datetime).normalize(TimestampFormat::EpochMillis) {
      Scalar::Int(millis) => millis,
      other => panic!("unexpected value: {other:?}"),
    };
    assert_eq!(from_epoch_millis(millis), Some(datetime));
  }

  /// Check that nanosecond values saturate instead of overflowing.
  #[test]
  fn nanos_saturate() {
    let ts = Timestamp::from(naive("9999-12-31T00:00:00.0"));
    assert_eq!(ts.normalize(TimestampFormat::EpochNanos), Scalar::Int(i64::MAX));
  }
}
