// Copyright (C) 2024 The polygon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use tokio::runtime::Builder as RuntimeBuilder;
use tokio::runtime::Runtime;

use tracing::debug;

use crate::api_info::ApiInfo;
use crate::client::Client;
use crate::endpoint::Endpoint;
use crate::page::Page;
use crate::paginate::Fetched;
use crate::paginate::PageOptions;
use crate::request::Request;
use crate::transport::HttpTransport;
use crate::transport::Transport;
use crate::Error;


/// A client blocking the calling thread for the duration of each
/// operation.
///
/// A `BlockingClient` wraps a [`Client`] along with a single threaded
/// runtime driving it, meaning that pagination behaves exactly the same
/// in both. It must not be used from within an asynchronous context.
#[derive(Debug)]
pub struct BlockingClient<T = HttpTransport> {
  client: Client<T>,
  runtime: Runtime,
}

impl BlockingClient {
  /// Create a new `BlockingClient` with the default configuration.
  pub fn new(api_info: ApiInfo) -> Result<Self, Error> {
    Self::from_client(Client::new(api_info)?)
  }
}

impl<T> BlockingClient<T>
where
  T: Transport,
{
  /// Create a new `BlockingClient` issuing requests through the
  /// provided transport.
  pub fn with_transport(api_info: ApiInfo, transport: T) -> Result<Self, Error> {
    Self::from_client(Client::with_transport(api_info, transport))
  }

  /// Wrap an existing asynchronous client.
  pub fn from_client(client: Client<T>) -> Result<Self, Error> {
    let runtime = RuntimeBuilder::new_current_thread().enable_all().build()?;
    Ok(Self { client, runtime })
  }

  /// Issue a request to an endpoint.
  ///
  /// See [`Client::issue`].
  pub fn issue<E>(&self, input: &E::Input, options: &PageOptions) -> Result<Fetched, Error>
  where
    E: Endpoint,
  {
    self.runtime.block_on(self.client.issue::<E>(input, options))
  }

  /// Issue a request as described by a [`Request`] object.
  ///
  /// See [`Client::issue_request`].
  pub fn issue_request(&self, request: &Request, options: &PageOptions) -> Result<Fetched, Error> {
    self
      .runtime
      .block_on(self.client.issue_request(request, options))
  }

  /// Fetch the page behind a cursor.
  ///
  /// See [`Client::page_by_url`].
  pub fn page_by_url(&self, url: &str, options: &PageOptions) -> Result<Fetched, Error> {
    self.runtime.block_on(self.client.page_by_url(url, options))
  }

  /// Retrieve the page following `page`, if any.
  pub fn next_page(&self, page: &Page) -> Result<Option<Page>, Error> {
    self.runtime.block_on(self.client.next_page(page))
  }

  /// Retrieve the page preceding `page`, if any.
  pub fn previous_page(&self, page: &Page) -> Result<Option<Page>, Error> {
    self.runtime.block_on(self.client.previous_page(page))
  }

  /// Retrieve the `ApiInfo` object used by this client.
  #[inline]
  pub fn api_info(&self) -> &ApiInfo {
    self.client.api_info()
  }

  /// Retrieve the transport used by this client.
  #[inline]
  pub fn transport(&self) -> &T {
    self.client.transport()
  }

  /// Close the client, releasing its connection pool and shutting down
  /// the runtime driving it.
  pub fn close(self) {
    let Self { client, runtime } = self;
    // Connections are owned by tasks on the runtime, so the pool has
    // to go first.
    client.close();
    runtime.shutdown_background();
    debug!("blocking client closed");
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  use http::StatusCode;

  use serde_json::json;

  use test_log::test;

  use crate::data::reference::Tickers;
  use crate::data::reference::TickersReq;
  use crate::test_util::chain;
  use crate::test_util::MockTransport;
  use crate::test_util::BASE;
  use crate::TransportError;


  fn blocking(transport: MockTransport) -> BlockingClient<MockTransport> {
    let api_info = ApiInfo::from_parts(BASE, "XXXX").unwrap();
    BlockingClient::with_transport(api_info, transport).unwrap()
  }

  /// Check that the blocking client merges pages just like the
  /// asynchronous one does.
  #[test]
  fn all_pages_merged() {
    let client = blocking(chain("/v3/reference/tickers", &[2, 2, 1]));
    let page = client
      .issue::<Tickers>(&TickersReq::default(), &PageOptions::all())
      .unwrap()
      .into_page()
      .unwrap();
    assert_eq!(page.results().len(), 5);
    assert_eq!(page.as_value()["request_id"], json!("req-0"));
    assert_eq!(client.transport().requests().len(), 3);
    client.close();
  }

  /// Check that unmerged pages are handed out in order.
  #[test]
  fn unmerged_pages() {
    let client = blocking(chain("/v3/reference/tickers", &[2, 2, 1]));
    let options = PageOptions {
      merge_all_pages: false,
      ..PageOptions::all()
    };
    let pages = client
      .issue::<Tickers>(&TickersReq::default(), &options)
      .unwrap()
      .into_pages()
      .unwrap();
    let sizes = pages.iter().map(|page| page.results().len()).collect::<Vec<_>>();
    assert_eq!(sizes, vec![2, 2, 1]);
  }

  /// Check manual pagination on the blocking client.
  #[test]
  fn manual_pagination() {
    let client = blocking(chain("/v3/reference/tickers", &[1, 1]));
    let first = client
      .issue::<Tickers>(&TickersReq::default(), &PageOptions::default())
      .unwrap()
      .into_page()
      .unwrap();
    let second = client.next_page(&first).unwrap().unwrap();
    assert_eq!(second.results()[0]["n"], json!(2));
    assert_eq!(client.next_page(&second).unwrap(), None);
    assert_eq!(client.previous_page(&first).unwrap(), None);
  }

  /// Check that a cursor taken out of a typed response can be
  /// followed, raw or decoded.
  #[test]
  fn page_by_url() {
    let transport = chain("/v3/reference/tickers", &[1, 3]);
    let url = format!("{BASE}/v3/reference/tickers?cursor=2");
    transport.reply(&url, StatusCode::OK, json!({"results": [4, 5, 6]}));

    let client = blocking(transport);
    let cursor = "/v3/reference/tickers?cursor=2";
    let page = client
      .page_by_url(cursor, &PageOptions::default())
      .unwrap()
      .into_page()
      .unwrap();
    assert_eq!(page.results().len(), 3);

    let options = PageOptions {
      raw_page_responses: true,
      ..Default::default()
    };
    let raw = client.page_by_url(cursor, &options).unwrap().into_raw().unwrap();
    assert_eq!(raw.len(), 1);
    assert_eq!(raw[0].status(), StatusCode::OK);
  }

  /// Check that HTTP errors surface as transport errors.
  #[test]
  fn http_error() {
    let transport = MockTransport::default();
    transport.reply(
      &format!("{BASE}/v3/reference/tickers"),
      StatusCode::FORBIDDEN,
      json!({"status": "NOT_AUTHORIZED"}),
    );
    let client = blocking(transport);
    let err = client
      .issue::<Tickers>(&TickersReq::default(), &PageOptions::default())
      .unwrap_err();
    match err {
      Error::Transport(TransportError::HttpStatus(status, body)) => {
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(body.to_string().contains("NOT_AUTHORIZED"));
      },
      _ => panic!("Received unexpected error: {err:?}"),
    }
  }
}
