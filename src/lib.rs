// Copyright (C) 2024 The polygon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

#![allow(clippy::unreadable_literal)]
#![warn(
  bad_style,
  dead_code,
  future_incompatible,
  improper_ctypes,
  missing_copy_implementations,
  missing_debug_implementations,
  missing_docs,
  no_mangle_generic_items,
  non_shorthand_field_patterns,
  nonstandard_style,
  overflowing_literals,
  path_statements,
  patterns_in_fns_without_body,
  renamed_and_removed_lints,
  rust_2018_compatibility,
  rust_2018_idioms,
  stable_features,
  trivial_bounds,
  trivial_numeric_casts,
  type_alias_bounds,
  unconditional_recursion,
  unreachable_code,
  unreachable_patterns,
  unstable_features,
  unstable_name_collisions,
  unused,
  unused_comparisons,
  unused_import_braces,
  unused_lifetimes,
  unused_qualifications,
  unused_results,
  while_true,
)]

//! A crate for retrieving market data from the Polygon REST API.
//!
//! Requests can be issued through an asynchronous [`Client`] or its
//! blocking counterpart, [`BlockingClient`]. Both share the same
//! implementation for following `next_url` cursors across pages and
//! for merging the pages of a result into one.

#[macro_use]
mod endpoint;

/// A module comprising typed definitions of a subset of the market
/// data endpoints.
pub mod data;

mod api_info;
mod blocking;
mod client;
mod config;
mod error;
mod page;
mod paginate;
mod request;
mod ticker;
mod time_util;
mod transport;
mod util;

#[cfg(test)]
mod test_util;

use std::borrow::Cow;

pub use crate::api_info::ApiInfo;
pub use crate::blocking::BlockingClient;
pub use crate::client::Builder;
pub use crate::client::Client;
pub use crate::config::Config;
pub use crate::endpoint::Endpoint;
pub use crate::error::Error;
pub use crate::error::HttpBody;
pub use crate::error::Phase;
pub use crate::error::TransportError;
pub use crate::page::merge;
pub use crate::page::Page;
pub use crate::page::Shape;
pub use crate::paginate::Fetched;
pub use crate::paginate::PageOptions;
pub use crate::request::Filter;
pub use crate::request::Param;
pub use crate::request::Request;
pub use crate::request::Scalar;
pub use crate::ticker::AssetClass;
pub use crate::time_util::from_epoch_millis;
pub use crate::time_util::Timestamp;
pub use crate::time_util::TimestampFormat;
pub use crate::transport::HttpTransport;
pub use crate::transport::RawResponse;
pub use crate::transport::Transport;

type Str = Cow<'static, str>;
