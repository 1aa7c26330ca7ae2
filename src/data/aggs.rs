// Copyright (C) 2024 The polygon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use chrono::DateTime;
use chrono::Utc;

use num_decimal::Num;

use serde::Deserialize;

use crate::data::date_segment;
use crate::data::Market;
use crate::data::SortOrder;
use crate::data::Timespan;
use crate::request::Param;
use crate::ticker::AssetClass;
use crate::time_util::from_epoch_millis;
use crate::time_util::Timestamp;
use crate::util::enum_to_str;
use crate::Str;


/// The default number of base aggregates used for a query.
const DEFAULT_LIMIT: u32 = 5000;


/// A GET request to be issued to the
/// /v2/aggs/ticker/{ticker}/range/{multiplier}/{timespan}/{from}/{to}
/// endpoint.
#[derive(Clone, Debug, PartialEq)]
pub struct BarsReq {
  /// The symbol to retrieve bars for. A prefix is optional.
  pub symbol: String,
  /// The asset class `symbol` belongs to.
  pub asset_class: AssetClass,
  /// The number of `timespan` units a bar spans.
  pub multiplier: u32,
  /// The unit of time a bar spans.
  pub timespan: Timespan,
  /// The start of the time window.
  pub from: Timestamp,
  /// The end of the time window.
  pub to: Timestamp,
  /// Whether results are adjusted for splits.
  pub adjusted: bool,
  /// The order of the results.
  pub sort: SortOrder,
  /// The number of base aggregates used to create the result.
  pub limit: u32,
  /// The type is non-exhaustive and open to extension.
  #[doc(hidden)]
  pub _non_exhaustive: (),
}


/// A helper for initializing [`BarsReq`] objects.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BarsReqInit {
  /// See `BarsReq::asset_class`. Defaults to stocks.
  pub asset_class: Option<AssetClass>,
  /// See `BarsReq::multiplier`. Defaults to one.
  pub multiplier: Option<u32>,
  /// See `BarsReq::adjusted`. Defaults to `true`.
  pub adjusted: Option<bool>,
  /// See `BarsReq::sort`.
  pub sort: SortOrder,
  /// See `BarsReq::limit`.
  pub limit: Option<u32>,
  /// The type is non-exhaustive and open to extension.
  #[doc(hidden)]
  pub _non_exhaustive: (),
}

impl BarsReqInit {
  /// Create a [`BarsReq`] from a `BarsReqInit`.
  #[inline]
  pub fn init<S, F, T>(self, symbol: S, timespan: Timespan, from: F, to: T) -> BarsReq
  where
    S: Into<String>,
    F: Into<Timestamp>,
    T: Into<Timestamp>,
  {
    BarsReq {
      symbol: symbol.into(),
      asset_class: self.asset_class.unwrap_or(AssetClass::Stocks),
      multiplier: self.multiplier.unwrap_or(1),
      timespan,
      from: from.into(),
      to: to.into(),
      adjusted: self.adjusted.unwrap_or(true),
      sort: self.sort,
      limit: self.limit.unwrap_or(DEFAULT_LIMIT),
      _non_exhaustive: (),
    }
  }
}


Endpoint! {
  /// The representation of a GET request to the
  /// /v2/aggs/ticker/{ticker}/range/{multiplier}/{timespan}/{from}/{to}
  /// endpoint.
  pub Bars(BarsReq),

  fn path(input: &Self::Input) -> Str {
    format!(
      "/v2/aggs/ticker/{}/range/{}/{}/{}/{}",
      input.asset_class.normalize(&input.symbol),
      input.multiplier,
      enum_to_str(&input.timespan),
      date_segment(&input.from),
      date_segment(&input.to),
    )
    .into()
  }

  fn query(input: &Self::Input) -> Vec<Param> {
    vec![
      Param::new("adjusted", input.adjusted),
      Param::new("sort", enum_to_str(&input.sort)),
      Param::new("limit", input.limit),
    ]
  }
}


/// A GET request to be issued to the
/// /v2/aggs/grouped/locale/{locale}/market/{market}/{date} endpoint.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupedReq {
  /// The market to retrieve bars for.
  pub market: Market,
  /// The day to retrieve bars for.
  pub date: Timestamp,
  /// Whether results are adjusted for splits.
  pub adjusted: bool,
}

Endpoint! {
  /// The representation of a GET request to the
  /// /v2/aggs/grouped/locale/{locale}/market/{market}/{date} endpoint.
  pub Grouped(GroupedReq),

  fn path(input: &Self::Input) -> Str {
    format!(
      "/v2/aggs/grouped/locale/{}/market/{}/{}",
      enum_to_str(&input.market.locale()),
      enum_to_str(&input.market.asset_class()),
      date_segment(&input.date),
    )
    .into()
  }

  fn query(input: &Self::Input) -> Vec<Param> {
    vec![Param::new("adjusted", input.adjusted)]
  }
}


/// A GET request to be issued to the /v2/aggs/ticker/{ticker}/prev
/// endpoint.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PrevCloseReq {
  /// The symbol to retrieve the previous close for.
  pub symbol: String,
  /// The asset class `symbol` belongs to.
  pub asset_class: AssetClass,
  /// Whether results are adjusted for splits.
  pub adjusted: bool,
}

Endpoint! {
  /// The representation of a GET request to the
  /// /v2/aggs/ticker/{ticker}/prev endpoint.
  pub PrevClose(PrevCloseReq),

  fn path(input: &Self::Input) -> Str {
    format!("/v2/aggs/ticker/{}/prev", input.asset_class.normalize(&input.symbol)).into()
  }

  fn query(input: &Self::Input) -> Vec<Param> {
    vec![Param::new("adjusted", input.adjusted)]
  }
}


/// An aggregate bar as reported in the `results` of the aggregate
/// endpoints.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[non_exhaustive]
pub struct Bar {
  /// The ticker, only reported by grouped and previous close queries.
  #[serde(rename = "T")]
  pub ticker: Option<String>,
  /// The open price.
  #[serde(rename = "o")]
  pub open: Num,
  /// The close price.
  #[serde(rename = "c")]
  pub close: Num,
  /// The highest price.
  #[serde(rename = "h")]
  pub high: Num,
  /// The lowest price.
  #[serde(rename = "l")]
  pub low: Num,
  /// The trading volume.
  #[serde(rename = "v")]
  pub volume: Num,
  /// The volume weighted average price.
  #[serde(rename = "vw")]
  pub weighted_average: Option<Num>,
  /// The number of transactions in the window.
  #[serde(rename = "n")]
  pub transactions: Option<u64>,
  /// The start of the window, in milliseconds since the epoch.
  #[serde(rename = "t")]
  pub timestamp: i64,
}

impl Bar {
  /// Retrieve the start of the window as a date-time.
  #[inline]
  pub fn time(&self) -> Option<DateTime<Utc>> {
    from_epoch_millis(self.timestamp)
  }
}
