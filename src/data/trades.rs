// Copyright (C) 2024 The polygon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use num_decimal::Num;

use serde::Deserialize;

use crate::data::SortOrder;
use crate::request::Filter;
use crate::request::Request;
use crate::ticker::AssetClass;
use crate::time_util::Timestamp;
use crate::time_util::TimestampFormat;
use crate::util::enum_to_str;
use crate::Str;


/// A GET request to be issued to the /v3/trades/{ticker} endpoint.
///
/// Time stamps are sent as nanoseconds since the epoch. Results are
/// paginated.
#[derive(Clone, Debug, PartialEq)]
pub struct TradesReq {
  /// The ticker to retrieve trades for. A prefix is optional.
  pub symbol: String,
  /// The asset class `symbol` belongs to.
  pub asset_class: AssetClass,
  /// Restrict the result to trades at exactly this time or on this
  /// day.
  pub timestamp: Option<Timestamp>,
  /// Restrict the result to a time window.
  pub timestamp_range: Vec<(Filter, Timestamp)>,
  /// The order of the results.
  pub order: Option<SortOrder>,
  /// The number of results per page, at most 50000.
  pub limit: Option<u32>,
  /// The type is non-exhaustive and open to extension.
  #[doc(hidden)]
  pub _non_exhaustive: (),
}


/// A helper for initializing [`TradesReq`] objects.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TradesReqInit {
  /// See `TradesReq::asset_class`. Defaults to stocks.
  pub asset_class: Option<AssetClass>,
  /// See `TradesReq::timestamp`.
  pub timestamp: Option<Timestamp>,
  /// See `TradesReq::timestamp_range`.
  pub timestamp_range: Vec<(Filter, Timestamp)>,
  /// See `TradesReq::order`.
  pub order: Option<SortOrder>,
  /// See `TradesReq::limit`.
  pub limit: Option<u32>,
  /// The type is non-exhaustive and open to extension.
  #[doc(hidden)]
  pub _non_exhaustive: (),
}

impl TradesReqInit {
  /// Create a [`TradesReq`] from a `TradesReqInit`.
  #[inline]
  pub fn init<S>(self, symbol: S) -> TradesReq
  where
    S: Into<String>,
  {
    TradesReq {
      symbol: symbol.into(),
      asset_class: self.asset_class.unwrap_or(AssetClass::Stocks),
      timestamp: self.timestamp,
      timestamp_range: self.timestamp_range,
      order: self.order,
      limit: self.limit,
      _non_exhaustive: (),
    }
  }
}


Endpoint! {
  /// The representation of a GET request to the /v3/trades/{ticker}
  /// endpoint.
  pub List(TradesReq),

  fn path(input: &Self::Input) -> Str {
    format!("/v3/trades/{}", input.asset_class.normalize(&input.symbol)).into()
  }

  fn request(input: &Self::Input) -> Request {
    const FORMAT: TimestampFormat = TimestampFormat::EpochNanos;

    let mut request = Request::new(Self::path(input));
    if let Some(timestamp) = &input.timestamp {
      request = request.timestamp("timestamp", None, timestamp, FORMAT);
    }

    input
      .timestamp_range
      .iter()
      .fold(request, |request, (filter, timestamp)| {
        request.timestamp("timestamp", Some(*filter), timestamp, FORMAT)
      })
      .with_opt("order", input.order.as_ref().map(enum_to_str))
      .with_opt("limit", input.limit)
  }
}


/// A trade as reported by the /v3/trades/{ticker} endpoint.
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
  /// The trade identifier.
  #[serde(rename = "id")]
  pub id: Option<String>,
  /// The time the exchange's information processor saw the trade, in
  /// nanoseconds since the epoch.
  #[serde(rename = "sip_timestamp")]
  pub sip_timestamp: i64,
}


#[cfg(test)]
mod tests {
  use super::*;

  use chrono::FixedOffset;
  use chrono::TimeZone as _;
  use chrono::Utc;

  use serde_json::json;

  use test_log::test;

  use crate::endpoint::Endpoint;
  use crate::page::Page;


  /// Check that time stamp filters are normalized to nanoseconds.
  #[test]
  fn timestamp_filters() {
    let from = Utc.with_ymd_and_hms(2021, 9, 3, 0, 0, 0).unwrap();
    let to = FixedOffset::east_opt(2 * 3600)
      .unwrap()
      .with_ymd_and_hms(2021, 9, 3, 2, 0, 1)
      .unwrap();
    let input = TradesReqInit {
      timestamp_range: vec![(Filter::Gte, from.into()), (Filter::Lt, to.into())],
      order: Some(SortOrder::Ascending),
      limit: Some(50000),
      ..Default::default()
    }
    .init("aapl");

    let request = List::request(&input);
    assert_eq!(request.path(), "/v3/trades/AAPL");
    assert_eq!(
      request.query().unwrap().as_deref(),
      Some(
        "timestamp.gte=1630627200000000000&timestamp.lt=1630627201000000000&order=asc&limit=50000"
      )
    );
  }

  /// Check that raw epoch values are passed through unaltered.
  #[test]
  fn raw_epoch() {
    let input = TradesReqInit {
      asset_class: Some(AssetClass::Crypto),
      timestamp: Some(Timestamp::from(42_i64)),
      ..Default::default()
    }
    .init("X:btcusd");

    let request = List::request(&input);
    assert_eq!(request.path(), "/v3/trades/X:BTCUSD");
    assert_eq!(request.query().unwrap().as_deref(), Some("timestamp=42"));
  }

  /// Check that we can parse trades.
  #[test]
  fn parse_trades() {
    let page = Page::new(json!({
      "next_url": "https://api.polygon.io/v3/trades/AAPL?cursor=YWN0aXZlPXRydWUmZGF0ZT0yMDIxLTA0LTI1",
      "request_id": "a47d1beb8c11b6ae897ab76cdbbf35a3",
      "results": [{
        "conditions": [12, 41],
        "exchange": 11,
        "id": "1",
        "participant_timestamp": 1517562000015577000_i64,
        "price": 171,
        "sequence_number": 1063,
        "sip_timestamp": 1517562000016036600_i64,
        "size": 100,
        "tape": 3
      }],
      "status": "OK"
    }));

    let trades = page.results_as::<Trade>().unwrap();
    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].price, Num::from(171));
    assert_eq!(trades[0].conditions, vec![12, 41]);
    assert_eq!(trades[0].sip_timestamp, 1517562000016036600);
  }
}
