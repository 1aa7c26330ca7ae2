// Copyright (C) 2019-2024 The polygon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fmt::Debug;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::str::from_utf8;
use std::time::Duration;

use http::header::AUTHORIZATION;
use http::request::Builder as HttpRequestBuilder;
use http::HeaderMap;
use http::HeaderValue;
use http::Method;
use http::Request as HttpRequest;

use hyper::body::Bytes;

use tracing::debug;
use tracing::field::debug;
use tracing::field::DebugValue;
use tracing::info;
use tracing::span;
use tracing::trace;
use tracing::Level;
use tracing_futures::Instrument;

use url::Url;

use crate::api_info::ApiInfo;
use crate::blocking::BlockingClient;
use crate::config::Config;
use crate::endpoint::Endpoint;
use crate::error::HttpBody;
use crate::page::Page;
use crate::paginate::Fetched;
use crate::paginate::PageOptions;
use crate::paginate::Paginator;
use crate::paginate::Step;
use crate::request::Request;
use crate::transport::HttpTransport;
use crate::transport::RawResponse;
use crate::transport::Transport;
use crate::Error;
use crate::TransportError;


/// A type providing a debug representation of HTTP headers, with
/// sensitive data being masked out.
struct DebugHeaders<'h> {
  headers: &'h HeaderMap<HeaderValue>,
}

impl Debug for DebugHeaders<'_> {
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    static MASKED: HeaderValue = HeaderValue::from_static("<masked>");

    f.debug_map()
      .entries(self.headers.iter().map(|(k, v)| {
        if k == AUTHORIZATION {
          (k, &MASKED)
        } else {
          (k, v)
        }
      }))
      .finish()
  }
}


/// A type providing a debug representation of an HTTP request, with
/// sensitive data being masked out.
struct DebugRequest<'r> {
  request: &'r HttpRequest<Bytes>,
}

impl Debug for DebugRequest<'_> {
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    // Note that we do not print the URL, because we assume it is
    // already included in the span or event at the usage site.
    f.debug_struct("Request")
      .field("method", self.request.method())
      .field("version", &self.request.version())
      .field(
        "headers",
        &DebugHeaders {
          headers: self.request.headers(),
        },
      )
      .finish()
  }
}


/// Emit a debug representation of an HTTP request.
fn debug_request(request: &HttpRequest<Bytes>) -> DebugValue<DebugRequest<'_>> {
  debug(DebugRequest { request })
}


/// A builder for creating customized `Client` objects.
#[derive(Debug, Default)]
pub struct Builder {
  config: Config,
}

impl Builder {
  /// Adjust the timeout for establishing a connection.
  #[inline]
  pub fn connect_timeout(&mut self, timeout: Duration) -> &mut Self {
    self.config.connect_timeout = Some(timeout);
    self
  }

  /// Adjust the timeout for receiving a response body.
  #[inline]
  pub fn read_timeout(&mut self, timeout: Duration) -> &mut Self {
    self.config.read_timeout = Some(timeout);
    self
  }

  /// Adjust the timeout for sending a request and receiving the
  /// response head.
  #[inline]
  pub fn write_timeout(&mut self, timeout: Duration) -> &mut Self {
    self.config.write_timeout = Some(timeout);
    self
  }

  /// Adjust the timeout for waiting on an available connection.
  ///
  /// Only valid together with [`max_connections`][Self::max_connections].
  #[inline]
  pub fn pool_timeout(&mut self, timeout: Duration) -> &mut Self {
    self.config.pool_timeout = Some(timeout);
    self
  }

  /// Limit the number of requests in flight at the same time.
  #[inline]
  pub fn max_connections(&mut self, max: usize) -> &mut Self {
    self.config.max_connections = Some(max);
    self
  }

  /// Adjust the maximum number of idle connections per host.
  #[inline]
  pub fn max_keepalive_connections(&mut self, max_idle: usize) -> &mut Self {
    self.config.max_keepalive_connections = max_idle;
    self
  }

  /// Replace the entire configuration.
  #[inline]
  pub fn config(&mut self, config: Config) -> &mut Self {
    self.config = config;
    self
  }

  /// Build the final asynchronous `Client` object.
  ///
  /// # Errors
  /// - [`Error::Configuration`] if the configuration contains invalid
  ///   values
  pub fn build(&self, api_info: ApiInfo) -> Result<Client, Error> {
    let transport = HttpTransport::new(&self.config)?;
    Ok(Client::with_transport(api_info, transport))
  }

  /// Build a [`BlockingClient`] object.
  ///
  /// # Errors
  /// - [`Error::Configuration`] if the configuration contains invalid
  ///   values
  /// - [`Error::Io`] if the runtime driving requests could not be
  ///   created
  pub fn build_blocking(&self, api_info: ApiInfo) -> Result<BlockingClient, Error> {
    let client = self.build(api_info)?;
    BlockingClient::from_client(client)
  }
}


/// A `Client` is the entity used by clients of this module for
/// interacting with the Polygon API.
///
/// All operations are asynchronous. The connection pool is owned by
/// the client and released once it is closed or dropped.
#[derive(Debug)]
pub struct Client<T = HttpTransport> {
  api_info: ApiInfo,
  transport: T,
}

impl Client {
  /// Instantiate a new `Builder` which allows for creating a customized `Client`.
  #[inline]
  pub fn builder() -> Builder {
    Builder::default()
  }

  /// Create a new `Client` with the default configuration.
  #[inline]
  pub fn new(api_info: ApiInfo) -> Result<Self, Error> {
    Builder::default().build(api_info)
  }
}

impl<T> Client<T>
where
  T: Transport,
{
  /// Create a new `Client` issuing requests through the provided
  /// transport.
  #[inline]
  pub fn with_transport(api_info: ApiInfo, transport: T) -> Self {
    Self {
      api_info,
      transport,
    }
  }

  /// Create an HTTP request for the given URL.
  fn http_request(&self, url: &Url) -> Result<HttpRequest<Bytes>, Error> {
    let request = HttpRequestBuilder::new()
      .method(Method::GET)
      .uri(url.as_str())
      // Add required authentication information.
      .header(AUTHORIZATION, format!("Bearer {}", self.api_info.api_key))
      .body(Bytes::new())?;
    Ok(request)
  }

  /// Resolve a cursor into an absolute URL.
  fn resolve(&self, cursor: &str) -> Result<Url, Error> {
    let url = self.api_info.base_url.join(cursor)?;
    Ok(url)
  }

  /// Fetch a single page, performing exactly one round trip.
  async fn fetch(
    &self,
    url: &Url,
    number: usize,
    verbose: bool,
  ) -> Result<(Page, RawResponse), Error> {
    if verbose {
      info!(page = number, url = display(url), "fetching page");
    } else {
      debug!(page = number, url = display(url), "fetching page");
    }

    let request = self.http_request(url)?;
    trace!(request = debug_request(&request));

    let response = self.transport.execute(request).await?;
    let status = response.status();
    debug!(status = debug(&status));

    let body = response.body().as_ref();
    match from_utf8(body) {
      Ok(s) => trace!(body = display(&s)),
      Err(b) => trace!(body = display(&b)),
    }

    if !status.is_success() {
      let body = HttpBody(body.to_vec());
      return Err(TransportError::HttpStatus(status, body).into())
    }

    let page = Page::from_body(body)?;
    Ok((page, response))
  }

  /// Drive pagination starting at `url`.
  async fn paginate(&self, url: Url, options: &PageOptions) -> Result<Fetched, Error> {
    let mut paginator = Paginator::new(options);
    let mut url = url;

    loop {
      let number = paginator.count() + 1;
      let (page, raw) = self.fetch(&url, number, options.verbose).await?;

      match paginator.push(page, raw) {
        Step::Fetch(cursor) => url = self.resolve(&cursor)?,
        Step::Done => break,
      }
    }

    if options.verbose {
      info!(pages = paginator.count(), "done fetching");
    }
    paginator.finish()
  }

  /// Issue a request to an endpoint, following and combining pages
  /// as the options dictate.
  ///
  /// A failure to fetch any page fails the entire operation; pages
  /// received up to that point are discarded.
  pub async fn issue<E>(&self, input: &E::Input, options: &PageOptions) -> Result<Fetched, Error>
  where
    E: Endpoint,
  {
    let request = E::request(input);
    self.issue_request(&request, options).await
  }

  /// Issue a request as described by a [`Request`] object.
  pub async fn issue_request(
    &self,
    request: &Request,
    options: &PageOptions,
  ) -> Result<Fetched, Error> {
    let url = request.url(&self.api_info.base_url)?;
    let span = span!(Level::INFO, "issue", path = display(request.path()));
    self.paginate(url, options).instrument(span).await
  }

  /// Fetch the page behind a cursor, e.g., the `next_url` reported in
  /// a response.
  ///
  /// The cursor may be an absolute URL or a path relative to the base
  /// URL. Pagination continues from there as `options` dictate.
  pub async fn page_by_url(&self, url: &str, options: &PageOptions) -> Result<Fetched, Error> {
    let url = self.resolve(url)?;
    let span = span!(Level::INFO, "page_by_url", url = display(&url));
    self.paginate(url, options).instrument(span).await
  }

  /// Fetch the page behind an optional cursor.
  async fn follow(&self, cursor: Option<&str>) -> Result<Option<Page>, Error> {
    match cursor {
      Some(cursor) => {
        let fetched = self.page_by_url(cursor, &PageOptions::default()).await?;
        Ok(fetched.into_page())
      },
      None => Ok(None),
    }
  }

  /// Retrieve the page following `page`.
  ///
  /// `None` is returned if `page` does not reference a next page.
  #[inline]
  pub async fn next_page(&self, page: &Page) -> Result<Option<Page>, Error> {
    self.follow(page.next_url()).await
  }

  /// Retrieve the page preceding `page`.
  ///
  /// `None` is returned if `page` does not reference a previous page.
  #[inline]
  pub async fn previous_page(&self, page: &Page) -> Result<Option<Page>, Error> {
    self.follow(page.previous_url()).await
  }

  /// Retrieve the `ApiInfo` object used by this `Client` instance.
  #[inline]
  pub fn api_info(&self) -> &ApiInfo {
    &self.api_info
  }

  /// Retrieve the transport used by this `Client` instance.
  #[inline]
  pub fn transport(&self) -> &T {
    &self.transport
  }

  /// Close the client, releasing its connection pool.
  ///
  /// Dropping the client has the same effect; this method merely makes
  /// the point of release explicit.
  pub fn close(self) {
    debug!(base_url = display(&self.api_info.base_url), "closing client");
  }
}
