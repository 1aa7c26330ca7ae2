// Copyright (C) 2024 The polygon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::env::var_os;
use std::ffi::OsString;
use std::fmt::Debug;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

use url::Url;

use crate::Error;

/// The base URL of the API.
pub(crate) const API_BASE_URL: &str = "https://api.polygon.io";

/// The environment variable representing the base URL.
const ENV_API_URL: &str = "POLYGON_API_BASE_URL";
/// The environment variable representing the API key.
const ENV_API_KEY: &str = "POLYGON_API_KEY";


/// An object encapsulating the information used for working with the
/// Polygon API.
#[derive(Clone, PartialEq)]
pub struct ApiInfo {
  /// The base URL for the API.
  pub(crate) base_url: Url,
  /// The key to use for authentication.
  pub(crate) api_key: String,
}

impl ApiInfo {
  /// Create an `ApiInfo` from the required data.
  ///
  /// # Errors
  /// - [`Error::Url`](crate::Error::Url) If `base_url` cannot be parsed
  ///   into a [`url::Url`](url::Url).
  /// - [`Error::Configuration`](crate::Error::Configuration) If
  ///   `api_key` is empty.
  pub fn from_parts(base_url: impl AsRef<str>, api_key: impl ToString) -> Result<Self, Error> {
    let api_key = api_key.to_string();
    if api_key.is_empty() {
      return Err(Error::Configuration("the API key must not be empty".into()))
    }

    Ok(Self {
      base_url: Url::parse(base_url.as_ref())?,
      api_key,
    })
  }

  /// Create an `ApiInfo` for the default base URL using the given key.
  pub fn from_key(api_key: impl ToString) -> Result<Self, Error> {
    Self::from_parts(API_BASE_URL, api_key)
  }

  /// Create an `ApiInfo` object with information from the environment.
  ///
  /// This constructor retrieves API related information from the
  /// environment and performs some preliminary validation on it. The
  /// following information is used:
  /// - the API base URL is retrieved from the POLYGON_API_BASE_URL
  ///   variable, falling back to the public endpoint
  /// - the API key is retrieved from the POLYGON_API_KEY variable
  pub fn from_env() -> Result<Self, Error> {
    let base_url = var_os(ENV_API_URL)
      .unwrap_or_else(|| OsString::from(API_BASE_URL))
      .into_string()
      .map_err(|_| {
        Error::Str(format!("{} environment variable is not a valid string", ENV_API_URL).into())
      })?;

    let api_key = var_os(ENV_API_KEY)
      .ok_or_else(|| Error::Str(format!("{} environment variable not found", ENV_API_KEY).into()))?
      .into_string()
      .map_err(|_| {
        Error::Str(format!("{} environment variable is not a valid string", ENV_API_KEY).into())
      })?;

    Self::from_parts(base_url, api_key)
  }

  /// Retrieve the base URL requests are issued against.
  #[inline]
  pub fn base_url(&self) -> &Url {
    &self.base_url
  }
}

impl Debug for ApiInfo {
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    f.debug_struct("ApiInfo")
      .field("base_url", &self.base_url.as_str())
      .field("api_key", &"<masked>")
      .finish()
  }
}
