// Copyright (C) 2024 The polygon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use num_decimal::Num;

use serde::Deserialize;

use crate::data::date_segment;
use crate::data::CurrencyPair;
use crate::request::Param;
use crate::time_util::Timestamp;
use crate::Str;


/// The default number of ticks per response.
const DEFAULT_LIMIT: u32 = 500;
/// The default number of decimals a conversion is rounded to.
const DEFAULT_PRECISION: u32 = 2;


/// A GET request to be issued to the /v1/historic/forex/{from}/{to}/{date}
/// endpoint.
///
/// This endpoint does not hand out a `next_url` cursor; subsequent
/// ticks are retrieved by passing the time stamp of the last tick as
/// `offset`.
#[derive(Clone, Debug, PartialEq)]
pub struct TicksReq {
  /// The currency pair to retrieve ticks for.
  pub pair: CurrencyPair,
  /// The day to retrieve ticks for.
  pub date: Timestamp,
  /// The time stamp to start at.
  pub offset: Option<i64>,
  /// The maximum number of ticks, at most 10000.
  pub limit: u32,
}

impl TicksReq {
  /// Create a new `TicksReq` using default paging.
  pub fn new(pair: CurrencyPair, date: impl Into<Timestamp>) -> Self {
    Self {
      pair,
      date: date.into(),
      offset: None,
      limit: DEFAULT_LIMIT,
    }
  }
}

Endpoint! {
  /// The representation of a GET request to the
  /// /v1/historic/forex/{from}/{to}/{date} endpoint.
  pub Ticks(TicksReq),

  fn path(input: &Self::Input) -> Str {
    format!("/v1/historic/forex/{}/{}", input.pair, date_segment(&input.date)).into()
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
  /// /v1/last_quote/currencies/{from}/{to} endpoint.
  pub LastQuote(CurrencyPair),

  fn path(input: &Self::Input) -> Str {
    format!("/v1/last_quote/currencies/{}", input).into()
  }
}


/// A GET request to be issued to the /v1/conversion/{from}/{to}
/// endpoint.
#[derive(Clone, Debug, PartialEq)]
pub struct ConversionReq {
  /// The currency pair to convert between.
  pub pair: CurrencyPair,
  /// The amount to convert.
  pub amount: Num,
  /// The number of decimals of the result.
  pub precision: u32,
}

impl ConversionReq {
  /// Create a new `ConversionReq` with the default precision.
  pub fn new(pair: CurrencyPair, amount: impl Into<Num>) -> Self {
    Self {
      pair,
      amount: amount.into(),
      precision: DEFAULT_PRECISION,
    }
  }
}

Endpoint! {
  /// The representation of a GET request to the
  /// /v1/conversion/{from}/{to} endpoint.
  pub Conversion(ConversionReq),

  fn path(input: &Self::Input) -> Str {
    format!("/v1/conversion/{}", input.pair).into()
  }

  fn query(input: &Self::Input) -> Vec<Param> {
    vec![
      Param::new("amount", input.amount.to_string()),
      Param::new("precision", input.precision),
    ]
  }
}


/// A quote as reported by the last quote endpoint.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[non_exhaustive]
pub struct Quote {
  /// The ask price.
  #[serde(rename = "ask")]
  pub ask: Num,
  /// The bid price.
  #[serde(rename = "bid")]
  pub bid: Num,
  /// The identifier of the exchange.
  #[serde(rename = "exchange")]
  pub exchange: u32,
  /// The time of the quote, in milliseconds since the epoch.
  #[serde(rename = "timestamp")]
  pub timestamp: i64,
}


/// The response of the last quote endpoint.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[non_exhaustive]
pub struct LastQuoteResponse {
  /// The symbol of the pair, e.g., `EUR/USD`.
  #[serde(rename = "symbol")]
  pub symbol: String,
  /// The most recent quote.
  #[serde(rename = "last")]
  pub last: Quote,
}
