// Copyright (C) 2024 The polygon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use num_decimal::Num;

use serde::Deserialize;

use crate::data::date_segment;
use crate::data::CurrencyPair;
use crate::request::Param;
use crate::ticker::AssetClass;
use crate::time_util::Timestamp;
use crate::Str;


/// A GET request to be issued to the
/// /v1/historic/crypto/{from}/{to}/{date} endpoint.
#[derive(Clone, Debug, PartialEq)]
pub struct TradesReq {
  /// The crypto pair to retrieve trades for.
  pub pair: CurrencyPair,
  /// The day to retrieve trades for.
  pub date: Timestamp,
  /// The time stamp to start at.
  pub offset: Option<i64>,
  /// The maximum number of trades, at most 10000.
  pub limit: u32,
}

impl TradesReq {
  /// Create a new `TradesReq` using default paging.
  pub fn new(pair: CurrencyPair, date: impl Into<Timestamp>) -> Self {
    Self {
      pair,
      date: date.into(),
      offset: None,
      limit: 500,
    }
  }
}

Endpoint! {
  /// The representation of a GET request to the
  /// /v1/historic/crypto/{from}/{to}/{date} endpoint.
  pub Trades(TradesReq),

  fn path(input: &Self::Input) -> Str {
    format!("/v1/historic/crypto/{}/{}", input.pair, date_segment(&input.date)).into()
  }

  fn query(input: &Self::Input) -> Vec<Param> {
    input
      .offset
      .map(|offset| Param::new("offset", offset))
      .into_iter()
      .chain([Param::new("limit", input.limit)])
      .collect()
  }
}


Endpoint! {
  /// The representation of a GET request to the
  /// /v1/last/crypto/{from}/{to} endpoint.
  pub LastTrade(CurrencyPair),

  fn path(input: &Self::Input) -> Str {
    format!("/v1/last/crypto/{}", input).into()
  }
}


/// A GET request to be issued to the
/// /v1/open-close/crypto/{from}/{to}/{date} endpoint.
#[derive(Clone, Debug, PartialEq)]
pub struct OpenCloseReq {
  /// The crypto pair to retrieve open and close for.
  pub pair: CurrencyPair,
  /// The day of interest.
  pub date: Timestamp,
  /// Whether results are adjusted for splits.
  pub adjusted: bool,
}

Endpoint! {
  /// The representation of a GET request to the
  /// /v1/open-close/crypto/{from}/{to}/{date} endpoint.
  pub OpenClose(OpenCloseReq),

  fn path(input: &Self::Input) -> Str {
    format!("/v1/open-close/crypto/{}/{}", input.pair, date_segment(&input.date)).into()
  }

  fn query(input: &Self::Input) -> Vec<Param> {
    vec![Param::new("adjusted", input.adjusted)]
  }
}


Endpoint! {
  /// The representation of a GET request to the
  /// /v2/snapshot/locale/global/markets/crypto/tickers/{ticker}/book
  /// endpoint, reporting the level 2 book of a crypto ticker.
  pub Book(String),

  fn path(input: &Self::Input) -> Str {
    format!(
      "/v2/snapshot/locale/global/markets/crypto/tickers/{}/book",
      AssetClass::Crypto.normalize(input),
    )
    .into()
  }
}


/// A crypto trade as reported by the last trade endpoint.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[non_exhaustive]
pub struct Trade {
  /// The trade price.
  #[serde(rename = "price")]
  pub price: Num,
  /// The trade size.
  #[serde(rename = "size")]
  pub size: Num,
  /// The identifier of the exchange.
  #[serde(rename = "exchange")]
  pub exchange: u32,
  /// The trade conditions.
  #[serde(rename = "conditions", default)]
  pub conditions: Vec<u32>,
  /// The time of the trade, in milliseconds since the epoch.
  #[serde(rename = "timestamp")]
  pub timestamp: i64,
}
