// Copyright (C) 2024 The polygon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::data::Direction;
use crate::data::Market;
use crate::request::Param;
use crate::util::enum_to_str;
use crate::util::join_with;
use crate::Str;


/// Create the common prefix of all snapshot paths of a market.
fn base_path(market: Market) -> String {
  format!(
    "/v2/snapshot/locale/{}/markets/{}",
    enum_to_str(&market.locale()),
    market.snapshot_name(),
  )
}


/// A GET request for the snapshot of a single ticker.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TickerReq {
  /// The market the ticker is traded on.
  pub market: Market,
  /// The ticker. A prefix is optional.
  pub symbol: String,
}

Endpoint! {
  /// The representation of a GET request to the
  /// /v2/snapshot/locale/{locale}/markets/{market}/tickers/{ticker}
  /// endpoint.
  pub Ticker(TickerReq),

  fn path(input: &Self::Input) -> Str {
    let symbol = input.market.asset_class().normalize(&input.symbol);
    format!("{}/tickers/{}", base_path(input.market), symbol).into()
  }
}


/// A GET request for the snapshots of all (or a selection of) tickers
/// of a market.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AllReq {
  /// The market to retrieve snapshots for.
  pub market: Market,
  /// The tickers to restrict the result to. Empty means all.
  pub tickers: Vec<String>,
}

Endpoint! {
  /// The representation of a GET request to the
  /// /v2/snapshot/locale/{locale}/markets/{market}/tickers endpoint.
  pub All(AllReq),

  fn path(input: &Self::Input) -> Str {
    format!("{}/tickers", base_path(input.market)).into()
  }

  fn query(input: &Self::Input) -> Vec<Param> {
    if input.tickers.is_empty() {
      return Vec::new()
    }

    let class = input.market.asset_class();
    let tickers = join_with(&input.tickers, |ticker| class.normalize(ticker));
    vec![Param::new("tickers", tickers)]
  }
}


/// A GET request for the top movers of a market.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MoversReq {
  /// The market of interest.
  pub market: Market,
  /// Whether to report gainers or losers.
  pub direction: Direction,
}

Endpoint! {
  /// The representation of a GET request to the
  /// /v2/snapshot/locale/{locale}/markets/{market}/{direction}
  /// endpoint.
  pub Movers(MoversReq),

  fn path(input: &Self::Input) -> Str {
    format!("{}/{}", base_path(input.market), enum_to_str(&input.direction)).into()
  }
}
