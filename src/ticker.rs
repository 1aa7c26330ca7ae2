// Copyright (C) 2024 The polygon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use serde::Serialize;


/// An enumeration of the asset classes the API serves data for.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[non_exhaustive]
pub enum AssetClass {
  /// Stocks; tickers carry no prefix.
  #[serde(rename = "stocks")]
  Stocks,
  /// Options contracts, prefixed with `O:`.
  #[serde(rename = "options")]
  Options,
  /// Forex currency pairs, prefixed with `C:`.
  #[serde(rename = "fx")]
  Forex,
  /// Crypto currency pairs, prefixed with `X:`.
  #[serde(rename = "crypto")]
  Crypto,
}

impl AssetClass {
  /// Retrieve the ticker prefix used by this asset class, if any.
  pub fn prefix(self) -> Option<&'static str> {
    match self {
      Self::Stocks => None,
      Self::Options => Some("O:"),
      Self::Forex => Some("C:"),
      Self::Crypto => Some("X:"),
    }
  }

  /// Strip this asset class's prefix from `symbol`, if present.
  ///
  /// The prefix is matched case-insensitively. The remainder is
  /// returned unchanged.
  pub fn strip<'s>(self, symbol: &'s str) -> &'s str {
    match self.prefix() {
      Some(prefix)
        if symbol.len() >= prefix.len()
          && symbol.is_char_boundary(prefix.len())
          && symbol[..prefix.len()].eq_ignore_ascii_case(prefix) =>
      {
        &symbol[prefix.len()..]
      },
      _ => symbol,
    }
  }

  /// Normalize a ticker of this asset class into the form the API
  /// expects: upper case and carrying the class prefix.
  ///
  /// Both prefixed and unprefixed input map to the same output.
  pub fn normalize(self, symbol: &str) -> String {
    let bare = self.strip(symbol.trim()).to_ascii_uppercase();
    match self.prefix() {
      Some(prefix) => format!("{prefix}{bare}"),
      None => bare,
    }
  }
}
