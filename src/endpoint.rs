// Copyright (C) 2024 The polygon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::request::Param;
use crate::request::Request;
use crate::Str;


/// A trait describing an HTTP endpoint.
///
/// An endpoint for our intents and purposes is basically a path with
/// positional parameters filled in from the input, along with a set of
/// query parameters. The path will be combined with the base URL of
/// the API into a full URL. All endpoints are queried using GET.
pub trait Endpoint {
  /// The type of data being passed in as part of a request to this
  /// endpoint.
  type Input;

  /// Inquire the path the request should go to.
  fn path(input: &Self::Input) -> Str;

  /// Inquire the query parameters the request should use.
  ///
  /// By default no query is emitted.
  #[allow(unused)]
  fn query(input: &Self::Input) -> Vec<Param> {
    Vec::new()
  }

  /// Create the [`Request`] describing a call to this endpoint.
  ///
  /// Typically the default implementation is just fine.
  fn request(input: &Self::Input) -> Request {
    Self::query(input)
      .into_iter()
      .fold(Request::new(Self::path(input)), Request::param)
  }
}


/// A macro for defining a type representing a particular endpoint.
///
/// ```ignore
/// Endpoint! {
///   /// Docs.
///   pub Get(GetReq),
///
///   fn path(input: &Self::Input) -> Str {
///     format!("/v1/something/{}", input.symbol).into()
///   }
/// }
/// ```
macro_rules! Endpoint {
  ( $(#[$docs:meta])* $pub:vis $name:ident($in:ty),
    $($defs:tt)* ) => {
    $(#[$docs])*
    #[derive(Clone, Copy, Debug)]
    $pub enum $name {}

    impl crate::endpoint::Endpoint for $name {
      type Input = $in;

      $($defs)*
    }
  };
}
