use log::{info, trace};
use serde::{Deserialize, Serialize};

use crate::{Error, ErrorKind};

use super::{Client, CATALOG_API_URL};

/// Looks up the single catalog entry whose ISBN field matches `isbn` exactly and returns its
/// `(title, id)`.
///
/// A single hit without a usable title or id counts as no hit at all.
pub(crate) fn get_title_id_by_isbn<C: Client>(isbn: &str) -> Result<(String, String), Error> {
    info!("Searching the catalog for ISBN '{isbn}'");
    let url = format!("{CATALOG_API_URL}/search");

    let client = C::default();
    let SearchModel {
        num_hits,
        mut result_set,
    } = client.post_json(&url, &SearchQuery::isbn(isbn))?;

    trace!("Search returned {num_hits} hit(s)");

    match num_hits {
        0 => Err(Error::new(
            ErrorKind::NotFound,
            format!("No catalog entry found for ISBN '{isbn}'"),
        )),
        1 if !result_set.is_empty() => result_set.swap_remove(0).into_title_id(),
        1 => Err(Error::new(
            ErrorKind::NotFound,
            format!("Search reported one hit for ISBN '{isbn}' but the result set is empty"),
        )),
        n => Err(Error::new(
            ErrorKind::Ambiguous,
            format!("{n} catalog entries found for ISBN '{isbn}'"),
        )),
    }
}

/// Body of a search request: an advanced query holding a single exact phrase term.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchQuery<'a> {
    search_type: &'static str,
    sf: &'static str,
    queryid: &'static str,
    advanced_query: AdvancedQuery<'a>,
    fl: &'static str,
    order: &'static str,
    page_no: u32,
    page_size: u32,
    locale: &'static str,
    include_facets: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AdvancedQuery<'a> {
    search_context: &'static str,
    terms: [Term<'a>; 1],
    limit_clause: Option<()>,
    search_type: &'static str,
    page_size: u32,
    sort: &'static str,
    item_coverage: Option<()>,
    dc_date_range: Option<()>,
    section: &'static str,
}

#[derive(Serialize)]
struct Term<'a> {
    index: &'static str,
    #[serde(rename = "match")]
    match_: &'static str,
    logical: &'static str,
    value: &'a str,
}

impl<'a> SearchQuery<'a> {
    const fn isbn(isbn: &'a str) -> Self {
        Self {
            search_type: "all",
            sf: "*",
            queryid: "NONE",
            advanced_query: AdvancedQuery {
                search_context: "advancedsearch",
                terms: [Term {
                    index: "isbn_t",
                    match_: "PHRASE",
                    logical: "AND",
                    value: isbn,
                }],
                limit_clause: None,
                search_type: "all",
                page_size: 10,
                sort: "score",
                item_coverage: None,
                dc_date_range: None,
                section: "*",
            },
            fl: "id",
            order: "score",
            page_no: 1,
            // only the best match is ever needed
            page_size: 1,
            locale: "fr",
            include_facets: false,
        }
    }
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct SearchModel {
    #[serde(rename = "numHits")]
    num_hits: usize,
    #[serde(rename = "resultSet", default)]
    result_set: Vec<Hit>,
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct Hit {
    #[serde(default)]
    title: Vec<Value>,
    #[serde(default)]
    id: Vec<Value>,
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct Value {
    value: String,
}

impl Hit {
    fn into_title_id(self) -> Result<(String, String), Error> {
        let Self { title, id } = self;

        let first = |values: Vec<Value>, field: &str| {
            values.into_iter().next().map(|v| v.value).ok_or_else(|| {
                Error::new(
                    ErrorKind::NotFound,
                    format!("Search hit has no {field} value"),
                )
            })
        };

        Ok((first(title, "title")?, first(id, "id")?))
    }
}
