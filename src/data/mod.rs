// Copyright (C) 2024 The polygon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

use serde::Serialize;

use crate::ticker::AssetClass;
use crate::time_util::Timestamp;
use crate::time_util::TimestampFormat;

/// Aggregate (OHLC) bars.
pub mod aggs;
/// Crypto currency specific endpoints.
pub mod crypto;
/// Forex specific endpoints.
pub mod forex;
/// Reference data.
pub mod reference;
/// Snapshots of the current market state.
pub mod snapshot;
/// Tick level trades.
pub mod trades;


/// The size of the time window of an aggregate bar.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[non_exhaustive]
pub enum Timespan {
  /// Minute bars.
  #[serde(rename = "minute")]
  Minute,
  /// Hourly bars.
  #[serde(rename = "hour")]
  Hour,
  /// Daily bars.
  #[serde(rename = "day")]
  Day,
  /// Weekly bars.
  #[serde(rename = "week")]
  Week,
  /// Monthly bars.
  #[serde(rename = "month")]
  Month,
  /// Quarterly bars.
  #[serde(rename = "quarter")]
  Quarter,
  /// Yearly bars.
  #[serde(rename = "year")]
  Year,
}


/// The order in which results are sorted by time stamp.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize)]
pub enum SortOrder {
  /// Oldest first.
  #[default]
  #[serde(rename = "asc")]
  Ascending,
  /// Newest first.
  #[serde(rename = "desc")]
  Descending,
}


/// The direction of a price move, as used by the gainers/losers
/// snapshots.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum Direction {
  /// The top gainers.
  #[serde(rename = "gainers")]
  Gainers,
  /// The top losers.
  #[serde(rename = "losers")]
  Losers,
}


/// The locale a market belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum Locale {
  /// United States markets.
  #[serde(rename = "us")]
  Us,
  /// Markets not bound to a country.
  #[serde(rename = "global")]
  Global,
}


/// A market with market wide endpoints (grouped bars, snapshots).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Market {
  /// The US stock market.
  Stocks,
  /// The global forex market.
  Forex,
  /// The global crypto market.
  Crypto,
}

impl Market {
  /// Retrieve the locale this market is located in.
  pub fn locale(self) -> Locale {
    match self {
      Self::Stocks => Locale::Us,
      Self::Forex | Self::Crypto => Locale::Global,
    }
  }

  /// Retrieve the asset class traded on this market.
  pub fn asset_class(self) -> AssetClass {
    match self {
      Self::Stocks => AssetClass::Stocks,
      Self::Forex => AssetClass::Forex,
      Self::Crypto => AssetClass::Crypto,
    }
  }

  /// The name used for this market in snapshot paths.
  fn snapshot_name(self) -> &'static str {
    match self {
      Self::Stocks => "stocks",
      Self::Forex => "forex",
      Self::Crypto => "crypto",
    }
  }
}


/// A pair of currencies, e.g., EUR and USD or BTC and USD.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct CurrencyPair {
  /// The currency converted from.
  pub from: String,
  /// The currency converted to.
  pub to: String,
}

impl CurrencyPair {
  /// Create a new `CurrencyPair`.
  pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
    Self {
      from: from.into(),
      to: to.into(),
    }
  }
}

impl Display for CurrencyPair {
  /// Format the pair as path segments, i.e., `FROM/TO`.
  fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
    write!(
      fmt,
      "{}/{}",
      self.from.trim().to_ascii_uppercase(),
      self.to.trim().to_ascii_uppercase()
    )
  }
}


/// Render a time stamp as a date path segment.
fn date_segment(timestamp: &Timestamp) -> String {
  timestamp.normalize(TimestampFormat::DateString).to_string()
}
