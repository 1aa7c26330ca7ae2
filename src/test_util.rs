// Copyright (C) 2024 The polygon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::HashMap;
use std::collections::VecDeque;
use std::future::pending;
use std::sync::Mutex;

use async_trait::async_trait;

use http::header::AUTHORIZATION;
use http::Request as HttpRequest;
use http::StatusCode;

use hyper::body::Bytes;

use serde_json::json;
use serde_json::Value;

use crate::api_info::ApiInfo;
use crate::client::Client;
use crate::transport::RawResponse;
use crate::transport::Transport;
use crate::TransportError;


/// The base URL the mock transport is used with.
pub(crate) const BASE: &str = "https://api.polygon.io";


#[derive(Debug)]
enum Reply {
  Json(StatusCode, Value),
  Fail,
  Hang,
}


/// A transport replying with canned responses keyed by URL.
///
/// Replies registered for the same URL are handed out in order. A URL
/// without (remaining) replies is answered with 404.
#[derive(Debug, Default)]
pub(crate) struct MockTransport {
  replies: Mutex<HashMap<String, VecDeque<Reply>>>,
  requests: Mutex<Vec<(String, Option<String>)>>,
}

impl MockTransport {
  fn push(&self, url: &str, reply: Reply) {
    self
      .replies
      .lock()
      .unwrap()
      .entry(url.to_string())
      .or_default()
      .push_back(reply)
  }

  /// Reply to a request for `url` with the given status and body.
  pub(crate) fn reply(&self, url: &str, status: StatusCode, body: Value) {
    self.push(url, Reply::Json(status, body))
  }

  /// Fail a request for `url` at the transport level.
  pub(crate) fn fail(&self, url: &str) {
    self.push(url, Reply::Fail)
  }

  /// Never answer a request for `url`.
  pub(crate) fn hang(&self, url: &str) {
    self.push(url, Reply::Hang)
  }

  /// Retrieve URL and authorization header of all requests seen so
  /// far, in order.
  pub(crate) fn requests(&self) -> Vec<(String, Option<String>)> {
    self.requests.lock().unwrap().clone()
  }
}

#[async_trait]
impl Transport for MockTransport {
  async fn execute(&self, request: HttpRequest<Bytes>) -> Result<RawResponse, TransportError> {
    let url = request.uri().to_string();
    let auth = request
      .headers()
      .get(AUTHORIZATION)
      .and_then(|value| value.to_str().ok())
      .map(str::to_string);
    self.requests.lock().unwrap().push((url.clone(), auth));

    let reply = self
      .replies
      .lock()
      .unwrap()
      .get_mut(&url)
      .and_then(VecDeque::pop_front);

    let (status, body) = match reply {
      Some(Reply::Json(status, body)) => (status, body),
      Some(Reply::Fail) => return Err(TransportError::Other("connection reset".into())),
      Some(Reply::Hang) => pending().await,
      None => (StatusCode::NOT_FOUND, json!({"status": "NOT_FOUND"})),
    };

    let mut response = RawResponse::new(Bytes::from(body.to_string()));
    *response.status_mut() = status;
    Ok(response)
  }
}


/// Create a mock transport serving a chain of pages below `path`, with
/// the given number of results each.
///
/// Results are numbered consecutively, starting at one, in the `n`
/// field of each result object.
pub(crate) fn chain(path: &str, sizes: &[usize]) -> MockTransport {
  let transport = MockTransport::default();
  let url = |idx: usize| {
    if idx == 0 {
      format!("{BASE}{path}")
    } else {
      format!("{BASE}{path}?cursor={}", idx + 1)
    }
  };

  let mut n = 0;
  for (idx, size) in sizes.iter().enumerate() {
    let results = (0..*size)
      .map(|_| {
        n += 1;
        json!({"n": n})
      })
      .collect::<Vec<_>>();
    let next = (idx + 1 < sizes.len()).then(|| url(idx + 1));
    let body = json!({
      "status": "OK",
      "request_id": format!("req-{idx}"),
      "results": results,
      "next_url": next,
    });
    transport.reply(&url(idx), StatusCode::OK, body);
  }
  transport
}


/// Create a client using the given mock transport.
pub(crate) fn client(transport: MockTransport) -> Client<MockTransport> {
  let api_info = ApiInfo::from_parts(BASE, "XXXX").unwrap();
  Client::with_transport(api_info, transport)
}
