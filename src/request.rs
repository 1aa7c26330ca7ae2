// Copyright (C) 2024 The polygon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

use serde::Serialize;
use serde_urlencoded::to_string as to_query;

use url::Url;

use crate::time_util::Timestamp;
use crate::time_util::TimestampFormat;
use crate::util::enum_to_str;
use crate::Error;
use crate::Str;


/// A scalar query parameter value.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
  /// A boolean, rendered as `true` or `false`.
  Bool(bool),
  /// An integer.
  Int(i64),
  /// A floating point value.
  Float(f64),
  /// A string, sent verbatim.
  Str(String),
}

impl Display for Scalar {
  fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
    match self {
      Self::Bool(b) => write!(fmt, "{b}"),
      Self::Int(i) => write!(fmt, "{i}"),
      Self::Float(f) => write!(fmt, "{f}"),
      Self::Str(s) => fmt.write_str(s),
    }
  }
}

impl From<bool> for Scalar {
  #[inline]
  fn from(b: bool) -> Self {
    Self::Bool(b)
  }
}

impl From<i64> for Scalar {
  #[inline]
  fn from(i: i64) -> Self {
    Self::Int(i)
  }
}

impl From<u32> for Scalar {
  #[inline]
  fn from(i: u32) -> Self {
    Self::Int(i.into())
  }
}

impl From<f64> for Scalar {
  #[inline]
  fn from(f: f64) -> Self {
    Self::Float(f)
  }
}

impl From<&str> for Scalar {
  #[inline]
  fn from(s: &str) -> Self {
    Self::Str(s.to_string())
  }
}

impl From<String> for Scalar {
  #[inline]
  fn from(s: String) -> Self {
    Self::Str(s)
  }
}


/// A comparison operator attached to a query parameter.
///
/// The operator is sent as a suffix of the parameter name, e.g.,
/// `timestamp.gte`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum Filter {
  /// Less than.
  #[serde(rename = "lt")]
  Lt,
  /// Less than or equal to.
  #[serde(rename = "lte")]
  Lte,
  /// Greater than.
  #[serde(rename = "gt")]
  Gt,
  /// Greater than or equal to.
  #[serde(rename = "gte")]
  Gte,
}


/// A named query parameter.
#[derive(Clone, Debug, PartialEq)]
pub struct Param {
  /// The name of the parameter.
  pub name: Str,
  /// An optional comparison operator.
  pub filter: Option<Filter>,
  /// The value.
  pub value: Scalar,
}

impl Param {
  /// Create a plain parameter.
  pub fn new(name: impl Into<Str>, value: impl Into<Scalar>) -> Self {
    Self {
      name: name.into(),
      filter: None,
      value: value.into(),
    }
  }

  /// Create a parameter carrying a comparison operator.
  pub fn filtered(name: impl Into<Str>, filter: Filter, value: impl Into<Scalar>) -> Self {
    Self {
      name: name.into(),
      filter: Some(filter),
      value: value.into(),
    }
  }

  /// Retrieve the key this parameter is sent under.
  pub fn key(&self) -> String {
    match self.filter {
      Some(filter) => format!("{}.{}", self.name, enum_to_str(&filter)),
      None => self.name.to_string(),
    }
  }
}


/// A description of a request to an endpoint.
///
/// A `Request` is a value: builder methods consume and return it and
/// it is never altered once handed to a client.
#[derive(Clone, Debug, PartialEq)]
pub struct Request {
  path: String,
  params: Vec<Param>,
}

impl Request {
  /// Create a request for the given path, e.g., `/v3/reference/tickers`.
  pub fn new(path: impl Into<String>) -> Self {
    Self {
      path: path.into(),
      params: Vec::new(),
    }
  }

  /// Append a parameter.
  #[must_use]
  pub fn param(mut self, param: Param) -> Self {
    self.params.push(param);
    self
  }

  /// Append a plain parameter.
  #[must_use]
  pub fn with(self, name: impl Into<Str>, value: impl Into<Scalar>) -> Self {
    self.param(Param::new(name, value))
  }

  /// Append a plain parameter if a value is present.
  #[must_use]
  pub fn with_opt<V>(self, name: impl Into<Str>, value: Option<V>) -> Self
  where
    V: Into<Scalar>,
  {
    match value {
      Some(value) => self.with(name, value),
      None => self,
    }
  }

  /// Append a filter parameter.
  #[must_use]
  pub fn filter(self, name: impl Into<Str>, filter: Filter, value: impl Into<Scalar>) -> Self {
    self.param(Param::filtered(name, filter, value))
  }

  /// Append a time stamp parameter, normalized to the given format.
  #[must_use]
  pub fn timestamp(
    self,
    name: impl Into<Str>,
    filter: Option<Filter>,
    timestamp: &Timestamp,
    format: TimestampFormat,
  ) -> Self {
    let value = timestamp.normalize(format);
    match filter {
      Some(filter) => self.filter(name, filter, value),
      None => self.with(name, value),
    }
  }

  /// Retrieve the request's path.
  #[inline]
  pub fn path(&self) -> &str {
    &self.path
  }

  /// Retrieve the request's parameters, in insertion order.
  #[inline]
  pub fn params(&self) -> &[Param] {
    &self.params
  }

  /// Render the query string, if there are any parameters.
  pub fn query(&self) -> Result<Option<String>, Error> {
    if self.params.is_empty() {
      return Ok(None)
    }

    let pairs = self
      .params
      .iter()
      .map(|param| (param.key(), param.value.to_string()))
      .collect::<Vec<_>>();
    let query = to_query(pairs).map_err(|err| Error::Str(err.to_string().into()))?;
    Ok(Some(query))
  }

  /// Create the full URL of this request relative to `base`.
  ///
  /// The request's path is appended to the path of `base`, if any.
  pub fn url(&self, base: &Url) -> Result<Url, Error> {
    let mut url = base.clone();
    let prefix = base.path().trim_end_matches('/');
    let path = self.path.trim_start_matches('/');
    url.set_path(&format!("{prefix}/{path}"));
    url.set_query(self.query()?.as_deref());
    Ok(url)
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  use chrono::NaiveDate;


  /// Check that filter operators end up as suffix of the key.
  #[test]
  fn filter_keys() {
    let request = Request::new("/v3/trades/AAPL")
      .filter("timestamp", Filter::Gte, 1_i64)
      .filter("timestamp", Filter::Lt, 2_i64)
      .with("limit", 50_u32)
      .with_opt::<bool>("adjusted", None);

    let query = request.query().unwrap().unwrap();
    assert_eq!(query, "timestamp.gte=1&timestamp.lt=2&limit=50");
  }

  /// Check that a request without parameters has no query.
  #[test]
  fn url_without_query() {
    let base = Url::parse("https://api.polygon.io").unwrap();
    let url = Request::new("/v1/last_quote/currencies/EUR/USD").url(&base).unwrap();
    assert_eq!(
      url.as_str(),
      "https://api.polygon.io/v1/last_quote/currencies/EUR/USD"
    );
  }

  /// Check that values are properly escaped and time stamps are
  /// normalized.
  #[test]
  fn url_with_query() {
    let base = Url::parse("https://api.polygon.io").unwrap();
    let date = Timestamp::from(NaiveDate::from_ymd_opt(2021, 1, 1).unwrap());
    let url = Request::new("/v3/reference/tickers")
      .with("search", "a&b")
      .timestamp("date", None, &date, TimestampFormat::DateString)
      .url(&base)
      .unwrap();
    assert_eq!(
      url.as_str(),
      "https://api.polygon.io/v3/reference/tickers?search=a%26b&date=2021-01-01"
    );
  }

  /// Check that a path prefix of the base URL is retained.
  #[test]
  fn url_with_base_path() {
    let request = Request::new("/v3/reference/tickers");
    for base in ["https://proxy.example.com/polygon/", "https://proxy.example.com/polygon"] {
      let base = Url::parse(base).unwrap();
      assert_eq!(
        request.url(&base).unwrap().as_str(),
        "https://proxy.example.com/polygon/v3/reference/tickers"
      );
    }
  }
}
