// Copyright (C) 2024 The polygon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::io::Error as IoError;
use std::str::from_utf8;

use http::Error as HttpError;
use http::StatusCode as HttpStatusCode;
use hyper::Error as HyperError;
use hyper_util::client::legacy::Error as ClientError;
use serde_json::Error as JsonError;
use thiserror::Error;
use url::ParseError;

use crate::page::Shape;
use crate::Str;


/// The body of an HTTP response that indicated a failure.
#[derive(Clone, Debug, Error, PartialEq)]
pub struct HttpBody(pub(crate) Vec<u8>);

impl HttpBody {
  /// Retrieve the raw bytes of the body.
  #[inline]
  pub fn as_bytes(&self) -> &[u8] {
    &self.0
  }
}

impl Display for HttpBody {
  fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
    match from_utf8(&self.0) {
      Ok(s) => fmt.write_str(s)?,
      Err(b) => write!(fmt, "{:?}", b)?,
    }
    Ok(())
  }
}


/// The phase of a round trip that did not complete in time.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Phase {
  /// Sending the request and waiting for the response head.
  Write,
  /// Receiving the response body.
  Read,
}

impl Display for Phase {
  fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
    match self {
      Self::Write => fmt.write_str("write"),
      Self::Read => fmt.write_str("read"),
    }
  }
}


/// An error encountered while performing a single round trip.
///
/// Transport errors are never retried by this crate.
#[derive(Debug, Error)]
pub enum TransportError {
  /// The server answered with a non-success HTTP status.
  #[error("encountered an unexpected HTTP status: {0}")]
  HttpStatus(HttpStatusCode, #[source] HttpBody),
  /// The request could not be sent, e.g., because connecting failed.
  #[error("the HTTP client reported an error")]
  Request(
    #[from]
    #[source]
    ClientError,
  ),
  /// The response body could not be received.
  #[error("failed to receive the response body")]
  Body(
    #[from]
    #[source]
    HyperError,
  ),
  /// A phase of the round trip timed out.
  #[error("the request timed out during the {0} phase")]
  Timeout(Phase),
  /// No connection became available within the pool timeout.
  #[error("timed out waiting for an available connection")]
  PoolTimeout,
  /// An I/O error, e.g., while decompressing the body.
  #[error("encountered an I/O error")]
  Io(
    #[from]
    #[source]
    IoError,
  ),
  /// A transport specific error not covered by other variants.
  #[error("{0}")]
  Other(Str),
}

impl TransportError {
  /// Retrieve the HTTP status code, if this error was caused by one.
  pub fn status(&self) -> Option<HttpStatusCode> {
    match self {
      Self::HttpStatus(status, _) => Some(*status),
      _ => None,
    }
  }
}


/// The error type as used by this crate.
#[derive(Debug, Error)]
pub enum Error {
  /// A round trip to the server failed.
  #[error("failed to fetch a page")]
  Transport(
    #[from]
    #[source]
    TransportError,
  ),
  /// Pages of incompatible shapes were attempted to be merged.
  #[error("page {index} has shape {found} but the first page has shape {expected}")]
  ShapeMismatch {
    /// The index of the offending page.
    index: usize,
    /// The shape of the first page.
    expected: Shape,
    /// The shape of the offending page.
    found: Shape,
  },
  /// The client was configured with invalid values.
  #[error("invalid configuration: {0}")]
  Configuration(Str),
  /// An HTTP related error.
  #[error("encountered an HTTP related error")]
  Http(
    #[from]
    #[source]
    HttpError,
  ),
  /// A JSON conversion error.
  #[error("a JSON conversion failed")]
  Json(
    #[from]
    #[source]
    JsonError,
  ),
  /// An I/O error, e.g., while setting up a runtime.
  #[error("encountered an I/O error")]
  Io(
    #[from]
    #[source]
    IoError,
  ),
  /// An URL parsing error.
  #[error("failed to parse the URL")]
  Url(
    #[from]
    #[source]
    ParseError,
  ),
  /// An error directly originating in this crate.
  #[error("{0}")]
  Str(Str),
}
