// Copyright (C) 2024 The polygon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::time::Duration;

use crate::Error;

/// The default timeout for establishing a connection.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// The default timeout for receiving a response body.
const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(10);
/// The default number of idle connections kept alive per host.
const DEFAULT_MAX_KEEPALIVE: usize = 30;


/// Transport configuration of a client.
///
/// A `Config` is owned by the client it was used to create; there are
/// no process wide defaults beyond the values of [`Config::default`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
  /// The timeout for establishing a TCP connection.
  pub connect_timeout: Option<Duration>,
  /// The timeout for receiving the response body.
  pub read_timeout: Option<Duration>,
  /// The timeout for sending a request and receiving the response
  /// head.
  pub write_timeout: Option<Duration>,
  /// The timeout for waiting for a connection to become available,
  /// when `max_connections` is set.
  pub pool_timeout: Option<Duration>,
  /// The maximum number of requests in flight at the same time. `None`
  /// means unlimited.
  pub max_connections: Option<usize>,
  /// The maximum number of idle connections kept alive per host.
  pub max_keepalive_connections: usize,
  /// The type is non-exhaustive and open to extension.
  #[doc(hidden)]
  pub _non_exhaustive: (),
}

impl Config {
  /// Check the configuration for invalid values.
  pub(crate) fn validate(&self) -> Result<(), Error> {
    let timeouts = [
      ("connect_timeout", self.connect_timeout),
      ("read_timeout", self.read_timeout),
      ("write_timeout", self.write_timeout),
      ("pool_timeout", self.pool_timeout),
    ];

    for (name, timeout) in timeouts {
      if timeout == Some(Duration::ZERO) {
        return Err(Error::Configuration(
          format!("{name} must be greater than zero").into(),
        ))
      }
    }

    if self.max_connections == Some(0) {
      return Err(Error::Configuration(
        "max_connections must be greater than zero".into(),
      ))
    }

    if self.pool_timeout.is_some() && self.max_connections.is_none() {
      return Err(Error::Configuration(
        "pool_timeout requires max_connections to be set".into(),
      ))
    }
    Ok(())
  }
}

impl Default for Config {
  fn default() -> Self {
    Self {
      connect_timeout: Some(DEFAULT_CONNECT_TIMEOUT),
      read_timeout: Some(DEFAULT_READ_TIMEOUT),
      write_timeout: None,
      pool_timeout: None,
      max_connections: None,
      max_keepalive_connections: DEFAULT_MAX_KEEPALIVE,
      _non_exhaustive: (),
    }
  }
}


#[cfg(test)]
mod tests {
  use super::*;


  /// Check that the default configuration is valid.
  #[test]
  fn default_is_valid() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.max_keepalive_connections, 30);
    assert_eq!(config.max_connections, None);
  }

  /// Check that zero timeouts and limits are rejected.
  #[test]
  fn invalid_values() {
    let configs = [
      Config {
        read_timeout: Some(Duration::ZERO),
        ..Default::default()
      },
      Config {
        max_connections: Some(0),
        ..Default::default()
      },
      Config {
        pool_timeout: Some(Duration::from_secs(1)),
        ..Default::default()
      },
    ];

    for config in configs {
      let err = config.validate().unwrap_err();
      assert!(matches!(err, Error::Configuration(..)), "{err:?}");
    }
  }
}
