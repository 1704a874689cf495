use crate::Availability;

/// A book to resolve, identified by its ISBN with an optional cached catalog id and title.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BookQuery {
    /// ISBN used to search the catalog.
    pub isbn: String,
    /// Catalog id from a previous run.
    pub id: Option<String>,
    /// Title from a previous run.
    pub title: Option<String>,
}

impl BookQuery {
    /// Creates a query with no cached catalog data.
    #[must_use]
    pub fn new<S: Into<String>>(isbn: S) -> Self {
        Self {
            isbn: isbn.into(),
            id: None,
            title: None,
        }
    }

    /// Creates a query with a cached catalog `id` and `title`.
    #[must_use]
    pub fn cached<S, I, T>(isbn: S, id: I, title: T) -> Self
    where
        S: Into<String>,
        I: Into<String>,
        T: Into<String>,
    {
        Self {
            isbn: isbn.into(),
            id: Some(id.into()),
            title: Some(title.into()),
        }
    }

    /// The cached `(id, title)` pair, only when both are present and not empty.
    #[must_use]
    pub fn known(&self) -> Option<(&str, &str)> {
        match (self.id.as_deref(), self.title.as_deref()) {
            (Some(id), Some(title)) if !id.is_empty() && !title.is_empty() => Some((id, title)),
            _ => None,
        }
    }
}

/// A resolved book.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookRecord {
    /// ISBN, unchanged from the query.
    pub isbn: String,
    /// Catalog id, empty when the book is not in the catalog.
    pub id: String,
    /// Title, empty when the book is not in the catalog.
    pub title: String,
    /// Availability at the target branch.
    pub availability: Availability,
}

impl BookRecord {
    /// Record for a book whose resolution failed, keeping what the query already knew.
    #[must_use]
    pub fn failed(query: BookQuery) -> Self {
        let BookQuery { isbn, id, title } = query;
        Self {
            isbn,
            id: id.unwrap_or_default(),
            title: title.unwrap_or_default(),
            availability: Availability::Error,
        }
    }
}
