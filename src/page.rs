// Copyright (C) 2024 The polygon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

use serde::de::DeserializeOwned;
use serde_json::from_slice;
use serde_json::from_value;
use serde_json::Value;

use crate::Error;

/// The field holding the results of a page.
const RESULTS: &str = "results";
/// The field holding the cursor to the next page.
const NEXT_URL: &str = "next_url";
/// The field holding the cursor to the previous page.
const PREVIOUS_URL: &str = "previous_url";


/// The shape class of a page.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Shape {
  /// A JSON object, possibly with a `results` array and cursors.
  Results,
  /// A bare JSON array.
  List,
  /// Any other JSON value, e.g., a single number.
  Scalar,
}

impl Display for Shape {
  fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
    match self {
      Self::Results => fmt.write_str("results"),
      Self::List => fmt.write_str("list"),
      Self::Scalar => fmt.write_str("scalar"),
    }
  }
}


/// The decoded body of one response.
#[derive(Clone, Debug, PartialEq)]
pub struct Page(Value);

impl Page {
  /// Create a `Page` from a JSON value.
  #[inline]
  pub fn new(value: Value) -> Self {
    Self(value)
  }

  /// Decode a `Page` from a response body.
  pub(crate) fn from_body(body: &[u8]) -> Result<Self, Error> {
    let value = from_slice::<Value>(body)?;
    Ok(Self(value))
  }

  /// Retrieve the page's shape class.
  pub fn shape(&self) -> Shape {
    match &self.0 {
      Value::Object(..) => Shape::Results,
      Value::Array(..) => Shape::List,
      _ => Shape::Scalar,
    }
  }

  /// Retrieve the results held by this page.
  ///
  /// For a bare list that is the list itself. Objects without a
  /// (non-null) `results` array and scalars have no results.
  pub fn results(&self) -> &[Value] {
    match &self.0 {
      Value::Object(map) => match map.get(RESULTS) {
        Some(Value::Array(results)) => results,
        _ => &[],
      },
      Value::Array(list) => list,
      _ => &[],
    }
  }

  /// Deserialize the page's results into typed objects.
  pub fn results_as<T>(&self) -> Result<Vec<T>, Error>
  where
    T: DeserializeOwned,
  {
    self
      .results()
      .iter()
      .map(|value| from_value(value.clone()).map_err(Error::from))
      .collect()
  }

  fn cursor(&self, field: &str) -> Option<&str> {
    match self.0.get(field) {
      Some(Value::String(url)) if !url.is_empty() => Some(url),
      _ => None,
    }
  }

  /// Retrieve the cursor to the next page, if any.
  ///
  /// An absent, `null`, or empty cursor means that there are no
  /// further pages.
  #[inline]
  pub fn next_url(&self) -> Option<&str> {
    self.cursor(NEXT_URL)
  }

  /// Retrieve the cursor to the previous page, if any.
  #[inline]
  pub fn previous_url(&self) -> Option<&str> {
    self.cursor(PREVIOUS_URL)
  }

  /// Retrieve a reference to the underlying JSON value.
  #[inline]
  pub fn as_value(&self) -> &Value {
    &self.0
  }

  /// Convert the page into the underlying JSON value.
  #[inline]
  pub fn into_value(self) -> Value {
    self.0
  }

  /// Deserialize the entire page into a typed object.
  pub fn deserialize<T>(self) -> Result<T, Error>
  where
    T: DeserializeOwned,
  {
    from_value(self.0).map_err(Error::from)
  }
}

impl From<Value> for Page {
  #[inline]
  fn from(value: Value) -> Self {
    Self(value)
  }
}


/// Merge a sequence of pages into one.
///
/// The results of all pages are concatenated in order. Every other
/// field is taken from the first page. All pages need to share the
/// first page's shape; scalar pages can't be merged at all, unless
/// there is only one.
pub fn merge<I>(pages: I) -> Result<Page, Error>
where
  I: IntoIterator<Item = Page>,
{
  let mut pages = pages.into_iter();
  let first = pages
    .next()
    .ok_or_else(|| Error::Str("cannot merge an empty sequence of pages".into()))?;
  let expected = first.shape();

  let malformed = |index: usize| {
    Error::Str(format!("page {index} has a `{RESULTS}` field that is not an array").into())
  };
  let mismatch = |index, found| Error::ShapeMismatch {
    index,
    expected,
    found,
  };

  let Page(mut merged) = first;
  let mut results = match &mut merged {
    Value::Object(map) => match map.remove(RESULTS) {
      None | Some(Value::Null) => Vec::new(),
      Some(Value::Array(results)) => results,
      Some(..) => return Err(malformed(0)),
    },
    Value::Array(list) => std::mem::take(list),
    _ => Vec::new(),
  };

  for (index, Page(page)) in pages.enumerate().map(|(i, page)| (i + 1, page)) {
    match (expected, page) {
      (Shape::Results, Value::Object(mut map)) => match map.remove(RESULTS) {
        None | Some(Value::Null) => (),
        Some(Value::Array(more)) => results.extend(more),
        Some(..) => return Err(malformed(index)),
      },
      (Shape::List, Value::Array(more)) => results.extend(more),
      (_, page) => return Err(mismatch(index, Page(page).shape())),
    }
  }

  match &mut merged {
    Value::Object(map) => {
      let _prev = map.insert(RESULTS.to_string(), Value::Array(results));
    },
    Value::Array(list) => *list = results,
    _ => (),
  }
  Ok(Page(merged))
}
