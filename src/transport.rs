// Copyright (C) 2024 The polygon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fmt::Debug;
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

use futures::TryFutureExt as _;

use http::HeaderMap;
use http::Request as HttpRequest;
use http::Response;
use http_body_util::BodyExt as _;
use http_body_util::Full;

use hyper::body::Bytes;
use hyper::body::Incoming;
use hyper_tls::HttpsConnector;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client as HttpClient;
use hyper_util::rt::TokioExecutor;

use tokio::sync::Semaphore;
use tokio::sync::SemaphorePermit;
use tokio::time::timeout;

use tracing::debug;

use crate::config::Config;
use crate::error::Phase;
use crate::Error;
use crate::TransportError;


/// A response as received by a [`Transport`], with the body fully
/// collected.
pub type RawResponse = Response<Bytes>;


/// A trait representing the capability of executing a single HTTP
/// round trip.
///
/// Implementations must not retry requests. Any HTTP status is to be
/// reported as a response; only failures to complete the round trip
/// are errors.
#[async_trait]
pub trait Transport: Debug + Send + Sync {
  /// Execute the request and collect the response.
  async fn execute(&self, request: HttpRequest<Bytes>) -> Result<RawResponse, TransportError>;
}


/// Run a fallible future, bounding its run time if a timeout is given.
async fn with_timeout<F, T>(
  duration: Option<Duration>,
  phase: Phase,
  future: F,
) -> Result<T, TransportError>
where
  F: Future<Output = Result<T, TransportError>>,
{
  match duration {
    Some(duration) => timeout(duration, future)
      .await
      .map_err(|_elapsed| TransportError::Timeout(phase))?,
    None => future.await,
  }
}


/// The [`Transport`] used by default, backed by a pooling `hyper`
/// client.
#[derive(Debug)]
pub struct HttpTransport {
  client: HttpClient<HttpsConnector<HttpConnector>, Full<Bytes>>,
  /// Limits the number of requests in flight, if configured.
  limiter: Option<Semaphore>,
  read_timeout: Option<Duration>,
  write_timeout: Option<Duration>,
  pool_timeout: Option<Duration>,
}

impl HttpTransport {
  /// Create a new `HttpTransport` with the given configuration.
  pub fn new(config: &Config) -> Result<Self, Error> {
    let () = config.validate()?;

    let mut http = HttpConnector::new();
    http.set_connect_timeout(config.connect_timeout);
    http.enforce_http(false);
    let https = HttpsConnector::new_with_connector(http);

    let mut builder = HttpClient::builder(TokioExecutor::new());
    let _ = builder.pool_max_idle_per_host(config.max_keepalive_connections);
    let client = builder.build(https);

    Ok(Self {
      client,
      limiter: config.max_connections.map(Semaphore::new),
      read_timeout: config.read_timeout,
      write_timeout: config.write_timeout,
      pool_timeout: config.pool_timeout,
    })
  }

  /// Wait for a permit to issue a request.
  async fn acquire<'s>(
    &self,
    limiter: &'s Semaphore,
  ) -> Result<SemaphorePermit<'s>, TransportError> {
    let acquire = limiter
      .acquire()
      .map_err(|_closed| TransportError::Other("the connection limiter was closed".into()));

    match self.pool_timeout {
      Some(duration) => timeout(duration, acquire)
        .await
        .map_err(|_elapsed| TransportError::PoolTimeout)?,
      None => acquire.await,
    }
  }

  /// Add "gzip" as an accepted encoding to the request.
  #[cfg(feature = "gzip")]
  fn maybe_add_gzip_header(request: &mut HttpRequest<Full<Bytes>>) {
    use http::header::ACCEPT_ENCODING;
    use http::HeaderValue;

    let _ = request
      .headers_mut()
      .insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip"));
  }

  /// An implementation stub not actually doing anything.
  #[cfg(not(feature = "gzip"))]
  fn maybe_add_gzip_header(_request: &mut HttpRequest<Full<Bytes>>) {}

  /// Retrieve the HTTP body, possibly uncompressing it if it was gzip
  /// encoded.
  #[cfg(feature = "gzip")]
  async fn retrieve_body(
    headers: &mut HeaderMap,
    body: Incoming,
  ) -> Result<Bytes, TransportError> {
    use async_compression::futures::bufread::GzipDecoder;
    use futures::AsyncReadExt as _;
    use http::header::CONTENT_ENCODING;

    let bytes = body.collect().await?.to_bytes();
    let gzipped = headers
      .get(CONTENT_ENCODING)
      .map(|value| value == "gzip")
      .unwrap_or(false);

    if gzipped {
      let mut buffer = Vec::new();
      let _count = GzipDecoder::new(&*bytes).read_to_end(&mut buffer).await?;
      // The body we hand out is no longer encoded.
      let _encoding = headers.remove(CONTENT_ENCODING);
      Ok(buffer.into())
    } else {
      Ok(bytes)
    }
  }

  /// Retrieve the HTTP body.
  #[cfg(not(feature = "gzip"))]
  async fn retrieve_body(
    _headers: &mut HeaderMap,
    body: Incoming,
  ) -> Result<Bytes, TransportError> {
    let bytes = body.collect().await?.to_bytes();
    Ok(bytes)
  }
}

#[async_trait]
impl Transport for HttpTransport {
  async fn execute(&self, request: HttpRequest<Bytes>) -> Result<RawResponse, TransportError> {
    let _permit = match &self.limiter {
      Some(limiter) => Some(self.acquire(limiter).await?),
      None => None,
    };

    let mut request = request.map(Full::new);
    Self::maybe_add_gzip_header(&mut request);

    let response = with_timeout(
      self.write_timeout,
      Phase::Write,
      self.client.request(request).map_err(TransportError::from),
    )
    .await?;
    debug!(status = ?response.status());

    let (mut parts, body) = response.into_parts();
    let bytes = with_timeout(
      self.read_timeout,
      Phase::Read,
      Self::retrieve_body(&mut parts.headers, body),
    )
    .await?;

    Ok(Response::from_parts(parts, bytes))
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  use std::future::pending;

  use test_log::test;


  /// Check that an elapsed timeout is reported for the right phase.
  #[test(tokio::test)]
  async fn timeout_reported() {
    let future = pending::<Result<(), TransportError>>();
    let err = with_timeout(Some(Duration::from_millis(10)), Phase::Read, future)
      .await
      .unwrap_err();
    assert!(matches!(err, TransportError::Timeout(Phase::Read)), "{err:?}");
  }

  /// Check that the result of a future is passed through when there
  /// is no timeout.
  #[test(tokio::test)]
  async fn no_timeout() {
    let future = async { Ok::<_, TransportError>(42) };
    let value = with_timeout(None, Phase::Write, future).await.unwrap();
    assert_eq!(value, 42);
  }

  /// Make sure that waiting for a connection permit is bounded by the
  /// pool timeout.
  #[test(tokio::test)]
  async fn pool_timeout() {
    let config = Config {
      max_connections: Some(1),
      pool_timeout: Some(Duration::from_millis(10)),
      ..Default::default()
    };
    let transport = HttpTransport::new(&config).unwrap();
    let limiter = transport.limiter.as_ref().unwrap();
    let _permit = transport.acquire(limiter).await.unwrap();

    let err = transport.acquire(limiter).await.unwrap_err();
    assert!(matches!(err, TransportError::PoolTimeout), "{err:?}");
  }

  /// Check that an invalid configuration is rejected.
  #[test]
  fn invalid_config() {
    let config = Config {
      connect_timeout: Some(Duration::ZERO),
      ..Default::default()
    };
    let err = HttpTransport::new(&config).unwrap_err();
    assert!(matches!(err, Error::Configuration(..)), "{err:?}");
  }

  /// Check that the idle pool size is handed to the HTTP client,
  /// including the case of no idle connections at all.
  #[test]
  fn keepalive_config() {
    for max_idle in [0, 5, 30] {
      let config = Config {
        max_keepalive_connections: max_idle,
        ..Default::default()
      };
      let _transport = HttpTransport::new(&config).unwrap();
    }
  }
}
