// Copyright (C) 2024 The polygon Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::num::NonZeroUsize;

use crate::page::merge;
use crate::page::Page;
use crate::transport::RawResponse;
use crate::Error;


/// Per-call options controlling pagination.
///
/// ```
/// # use polygon::PageOptions;
/// let options = PageOptions {
///   all_pages: true,
///   ..Default::default()
/// };
/// assert!(options.merge_all_pages);
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PageOptions {
  /// Follow `next_url` cursors until there are no more pages.
  pub all_pages: bool,
  /// The maximum number of pages to fetch, including the first one.
  /// `None` means unlimited.
  pub max_pages: Option<NonZeroUsize>,
  /// Merge all pages into one. Only has an effect together with
  /// `all_pages`.
  pub merge_all_pages: bool,
  /// Return the raw responses instead of decoded pages, unless pages
  /// get merged.
  pub raw_page_responses: bool,
  /// Emit progress diagnostics at `info` level instead of `debug`.
  pub verbose: bool,
  /// The type is non-exhaustive and open to extension.
  #[doc(hidden)]
  pub _non_exhaustive: (),
}

impl PageOptions {
  /// Options for fetching all pages and merging them into one.
  pub fn all() -> Self {
    Self {
      all_pages: true,
      ..Default::default()
    }
  }
}

impl Default for PageOptions {
  fn default() -> Self {
    Self {
      all_pages: false,
      max_pages: None,
      merge_all_pages: true,
      raw_page_responses: false,
      verbose: false,
      _non_exhaustive: (),
    }
  }
}


/// The outcome of a request, shaped by its [`PageOptions`].
#[derive(Debug)]
pub enum Fetched {
  /// A single page; either the only one fetched or the result of
  /// merging all of them.
  Page(Page),
  /// All fetched pages, in the order they were fetched.
  Pages(Vec<Page>),
  /// The raw responses of all fetched pages, in fetch order.
  Raw(Vec<RawResponse>),
}

impl Fetched {
  /// Retrieve the single (or merged) page, if that is what this is.
  pub fn into_page(self) -> Option<Page> {
    match self {
      Self::Page(page) => Some(page),
      _ => None,
    }
  }

  /// Retrieve the list of unmerged pages. A single page is returned as
  /// list of one.
  pub fn into_pages(self) -> Option<Vec<Page>> {
    match self {
      Self::Page(page) => Some(vec![page]),
      Self::Pages(pages) => Some(pages),
      Self::Raw(..) => None,
    }
  }

  /// Retrieve the raw responses, if those were requested.
  pub fn into_raw(self) -> Option<Vec<RawResponse>> {
    match self {
      Self::Raw(raw) => Some(raw),
      _ => None,
    }
  }
}


/// What the driver of a [`Paginator`] is to do next.
#[derive(Debug, PartialEq)]
pub(crate) enum Step {
  /// Fetch the page behind the given cursor.
  Fetch(String),
  /// Stop fetching and call [`Paginator::finish`].
  Done,
}


/// The state machine deciding which pages to fetch and how to combine
/// them.
///
/// A `Paginator` does not perform any I/O; it is fed pages by whoever
/// drives it and tells it what to fetch next. Pages are always fetched
/// one after the other, because the cursor to a page is only known once
/// its predecessor has been received.
#[derive(Debug)]
pub(crate) struct Paginator<'o> {
  options: &'o PageOptions,
  pages: Vec<Page>,
  raw: Vec<RawResponse>,
  done: bool,
}

impl<'o> Paginator<'o> {
  pub(crate) fn new(options: &'o PageOptions) -> Self {
    Self {
      options,
      pages: Vec::new(),
      raw: Vec::new(),
      done: false,
    }
  }

  /// The number of pages received so far.
  #[inline]
  pub(crate) fn count(&self) -> usize {
    self.pages.len()
  }

  /// Check whether the page cap has been reached.
  fn capped(&self) -> bool {
    self
      .options
      .max_pages
      .map(|max| self.pages.len() >= max.get())
      .unwrap_or(false)
  }

  /// Check whether raw responses end up in the result. Merged pages
  /// always win over raw ones.
  fn keeps_raw(&self) -> bool {
    let merged = self.options.all_pages && self.options.merge_all_pages;
    self.options.raw_page_responses && !merged
  }

  /// Record a received page and decide on the next step.
  pub(crate) fn push(&mut self, page: Page, raw: RawResponse) -> Step {
    debug_assert!(!self.done, "page pushed after pagination finished");

    let cursor = page.next_url().map(str::to_owned);
    self.pages.push(page);
    if self.keeps_raw() {
      self.raw.push(raw);
    }

    match cursor {
      Some(cursor) if self.options.all_pages && !self.capped() => Step::Fetch(cursor),
      _ => {
        self.done = true;
        Step::Done
      },
    }
  }

  /// Produce the final result out of all received pages.
  pub(crate) fn finish(self) -> Result<Fetched, Error> {
    let Self {
      options,
      mut pages,
      raw,
      ..
    } = self;

    if !options.all_pages {
      if options.raw_page_responses {
        return Ok(Fetched::Raw(raw))
      }
      return pages
        .pop()
        .map(Fetched::Page)
        .ok_or_else(|| Error::Str("no page was fetched".into()))
    }

    if options.merge_all_pages {
      merge(pages).map(Fetched::Page)
    } else if options.raw_page_responses {
      Ok(Fetched::Raw(raw))
    } else {
      Ok(Fetched::Pages(pages))
    }
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  use hyper::body::Bytes;
  use serde_json::json;


  fn page(n: usize, results: &[i64], next: bool) -> (Page, RawResponse) {
    let next = next.then(|| format!("https://api.polygon.io/page/{}", n + 1));
    let value = json!({"results": results, "next_url": next});
    let raw = RawResponse::new(Bytes::from(value.to_string()));
    (Page::new(value), raw)
  }

  /// Drive a paginator over a chain of pages with the given sizes.
  fn drive(options: &PageOptions, sizes: &[usize]) -> (usize, Fetched) {
    let mut paginator = Paginator::new(options);
    let mut fetches = 0;
    let mut value = 0;

    for (n, size) in sizes.iter().enumerate() {
      let results = (0..*size)
        .map(|_| {
          value += 1;
          value
        })
        .collect::<Vec<_>>();
      let (page, raw) = page(n, &results, n + 1 < sizes.len());
      fetches += 1;

      match paginator.push(page, raw) {
        Step::Fetch(cursor) => assert_eq!(cursor, format!("https://api.polygon.io/page/{}", n + 1)),
        Step::Done => break,
      }
    }
    (fetches, paginator.finish().unwrap())
  }

  /// Check that all pages are visited once and merged in order.
  #[test]
  fn all_pages_merged() {
    let (fetches, fetched) = drive(&PageOptions::all(), &[2, 2, 1]);
    assert_eq!(fetches, 3);
    let page = fetched.into_page().unwrap();
    assert_eq!(page.results(), (1..=5).map(|i| json!(i)).collect::<Vec<_>>());
  }

  /// Check that the page cap is honored.
  #[test]
  fn page_cap() {
    for max in 1..=3 {
      let options = PageOptions {
        max_pages: NonZeroUsize::new(max),
        ..PageOptions::all()
      };
      let (fetches, fetched) = drive(&options, &[2, 2, 1, 4]);
      assert_eq!(fetches, max);
      let expected = [2, 4, 5][max - 1];
      assert_eq!(fetched.into_page().unwrap().results().len(), expected);
    }
  }

  /// Check that only the first page is fetched without `all_pages`.
  #[test]
  fn single_page() {
    let (fetches, fetched) = drive(&PageOptions::default(), &[2, 2]);
    assert_eq!(fetches, 1);
    let page = fetched.into_page().unwrap();
    assert_eq!(page.results().len(), 2);
    assert!(page.next_url().is_some());
  }

  /// Check that unmerged pages are returned in order.
  #[test]
  fn unmerged_pages() {
    let options = PageOptions {
      merge_all_pages: false,
      ..PageOptions::all()
    };
    let (_, fetched) = drive(&options, &[1, 3, 0]);
    let pages = fetched.into_pages().unwrap();
    let sizes = pages.iter().map(|page| page.results().len()).collect::<Vec<_>>();
    assert_eq!(sizes, vec![1, 3, 0]);
  }

  /// Check that raw responses are returned when requested.
  #[test]
  fn raw_responses() {
    let options = PageOptions {
      merge_all_pages: false,
      raw_page_responses: true,
      ..PageOptions::all()
    };
    let (_, fetched) = drive(&options, &[1, 1]);
    let raw = fetched.into_raw().unwrap();
    assert_eq!(raw.len(), 2);

    let options = PageOptions {
      raw_page_responses: true,
      ..Default::default()
    };
    let (_, fetched) = drive(&options, &[1, 1]);
    assert_eq!(fetched.into_raw().unwrap().len(), 1);
  }

  /// Check that merging takes precedence over raw responses.
  #[test]
  fn merge_beats_raw() {
    let options = PageOptions {
      raw_page_responses: true,
      ..PageOptions::all()
    };
    let (_, fetched) = drive(&options, &[1, 1]);
    assert_eq!(fetched.into_page().unwrap().results().len(), 2);

    let mut paginator = Paginator::new(&options);
    let (page, raw) = page(0, &[1], false);
    assert_eq!(paginator.push(page, raw), Step::Done);
    assert!(paginator.raw.is_empty());
  }
}
