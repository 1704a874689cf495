#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![warn(missing_docs, rust_2018_idioms)]
#![allow(clippy::module_name_repetitions)]

//! # bml
//!
//! bml looks up the availability of books in the Lyon municipal library network. Books are found
//! in the catalog by ISBN and the stock of the matching catalog entry gives the status of its
//! copies at each branch.
//!
//! Requests are blocking and made one at a time, a batch of books is resolved in order.

mod api;
mod availability;
mod batch;
mod book;
pub mod branch;
mod error;
mod resolver;
pub mod table;

use std::collections::HashMap;

pub use availability::Availability;
pub use batch::OnError;
pub use book::{BookQuery, BookRecord};
pub use error::{Error, ErrorKind};

use log::trace;

type Client = reqwest::blocking::Client;

/// Status of the copies of one catalog entry, keyed by branch code.
pub type StockMap = HashMap<String, String>;

/// Searches the catalog for the single entry matching `isbn` and returns its `(title, id)`.
///
/// # Errors
///
/// An `Err` with [`ErrorKind::NotFound`] is returned when no entry matches the `isbn`.
/// An `Err` with [`ErrorKind::Ambiguous`] is returned when more than one entry matches.
/// An `Err` is returned when the request fails or its response cannot be read.
#[inline]
pub fn title_id_by_isbn(isbn: &str) -> Result<(String, String), Error> {
    trace!("Search title and id by ISBN of '{isbn}'");
    api::search::get_title_id_by_isbn::<Client>(isbn)
}

/// Fetches the per branch status of the copies of the catalog entry `id`.
///
/// An entry without tracked copies gives an empty map.
///
/// # Errors
///
/// An `Err` with [`ErrorKind::InvalidId`] is returned when the catalog rejects the `id`.
/// An `Err` is returned when the request fails or its response cannot be read.
#[inline]
pub fn stock_by_id(id: &str) -> Result<StockMap, Error> {
    trace!("Fetch stock by id of '{id}'");
    api::stock::get_stock_by_id::<Client>(id)
}

/// Resolves the availability of a book at `branch`.
///
/// The catalog is only searched when `query` lacks a cached id or title. A book the search cannot
/// find is resolved to [`Availability::NotInCatalog`] and a branch without a copy to
/// [`Availability::NotFoundAtBranch`].
///
/// # Errors
///
/// An `Err` with [`ErrorKind::Ambiguous`] is returned when the ISBN matches several entries.
/// An `Err` with [`ErrorKind::InvalidId`] is returned when the cached id is rejected.
/// An `Err` is returned when a request fails or its response cannot be read.
#[inline]
pub fn availability(branch: &str, query: BookQuery) -> Result<BookRecord, Error> {
    trace!("Resolve availability of ISBN '{}' at '{branch}'", query.isbn);
    resolver::resolve::<Client>(branch, query)
}

/// Resolves the availability of every book of `queries` at `branch`, in order.
///
/// `on_row` is called with each record as soon as it is resolved. One record is returned per
/// query in the same order.
///
/// # Errors
///
/// With [`OnError::Abort`], the error of the first book that fails to resolve is returned, see
/// [`availability`]. With [`OnError::Record`] this function does not fail.
#[inline]
pub fn availability_of_all<I, F>(
    queries: I,
    branch: &str,
    on_error: OnError,
    on_row: F,
) -> Result<Vec<BookRecord>, Error>
where
    I: IntoIterator<Item = BookQuery>,
    F: FnMut(&BookRecord),
{
    trace!("Resolve availability of a batch at '{branch}'");
    batch::process_all::<Client, _, _>(queries, branch, on_error, on_row)
}
