// Copyright (C) 2024 The polygon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use serde::Serialize;
use serde_variant::to_variant_name;


/// Retrieve the textual representation of an enum variant, as used on
/// the wire.
///
/// # Notes
/// - this function should only be used for cases where `T` is a unit
///   enum type
pub(crate) fn enum_to_str<T>(variant: &T) -> &'static str
where
  T: Serialize,
{
  // We know that we are dealing with an enum variant and the function
  // will never return an error for those, so it's fine to unwrap.
  to_variant_name(variant).unwrap()
}


/// Join a slice of strings into one, separating each element by
/// comma, after applying a function to each.
pub(crate) fn join_with<T, F>(slice: &[T], f: F) -> String
where
  F: Fn(&T) -> String,
{
  slice.iter().map(f).collect::<Vec<_>>().join(",")
}
