// Copyright (C) 2024 The polygon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use serde::Deserialize;

use crate::data::SortOrder;
use crate::request::Filter;
use crate::request::Request;
use crate::ticker::AssetClass;
use crate::util::enum_to_str;
use crate::Str;


/// A GET request to be issued to the /v3/reference/tickers endpoint.
///
/// Results are paginated; the response carries a `next_url` as long
/// as there are more tickers.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TickersReq {
  /// Restrict the result to exactly this ticker.
  pub ticker: Option<String>,
  /// Restrict the result to a range of tickers, e.g., everything
  /// greater than or equal to `A` and less than `B`.
  pub ticker_range: Vec<(Filter, String)>,
  /// The asset class to list tickers of.
  pub market: Option<AssetClass>,
  /// Search for terms within the ticker and company name.
  pub search: Option<String>,
  /// Only report actively traded tickers (or only delisted ones).
  pub active: Option<bool>,
  /// The order of the results.
  pub order: Option<SortOrder>,
  /// The number of results per page, at most 1000.
  pub limit: Option<u32>,
  /// The type is non-exhaustive and open to extension.
  #[doc(hidden)]
  pub _non_exhaustive: (),
}

Endpoint! {
  /// The representation of a GET request to the /v3/reference/tickers
  /// endpoint.
  pub Tickers(TickersReq),

  fn path(_input: &Self::Input) -> Str {
    "/v3/reference/tickers".into()
  }

  fn request(input: &Self::Input) -> Request {
    let request = Request::new(Self::path(input)).with_opt("ticker", input.ticker.as_deref());
    input
      .ticker_range
      .iter()
      .fold(request, |request, (filter, ticker)| {
        request.filter("ticker", *filter, ticker.as_str())
      })
      .with_opt("market", input.market.as_ref().map(enum_to_str))
      .with_opt("search", input.search.as_deref())
      .with_opt("active", input.active)
      .with_opt("order", input.order.as_ref().map(enum_to_str))
      .with_opt("limit", input.limit)
  }
}


/// A ticker as listed by the /v3/reference/tickers endpoint.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[non_exhaustive]
pub struct TickerInfo {
  /// The ticker symbol.
  #[serde(rename = "ticker")]
  pub ticker: String,
  /// The name of the asset.
  #[serde(rename = "name")]
  pub name: String,
  /// The market the ticker is traded on, e.g., `stocks` or `fx`.
  #[serde(rename = "market")]
  pub market: String,
  /// The locale of the market, e.g., `us` or `global`.
  #[serde(rename = "locale")]
  pub locale: String,
  /// Whether the ticker is actively traded.
  #[serde(rename = "active", default)]
  pub active: bool,
  /// The ISO code of the currency the ticker is traded in.
  #[serde(rename = "currency_name")]
  pub currency: Option<String>,
  /// The primary listing exchange.
  #[serde(rename = "primary_exchange")]
  pub primary_exchange: Option<String>,
}
