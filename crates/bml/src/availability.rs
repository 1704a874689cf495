use std::{convert::Infallible, fmt, str::FromStr};

/// Availability of a book at one branch.
///
/// Statuses reported by a branch are kept verbatim, they are never translated or checked against
/// a known list. The other variants are sentinels produced by the resolver itself.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Availability {
    /// Raw status reported by the branch, e.g. "En rayon" or "En prêt".
    Branch(String),
    /// The catalog knows the book but the branch does not track a copy of it.
    NotFoundAtBranch,
    /// The ISBN search found nothing in the catalog.
    NotInCatalog,
    /// Resolution failed for this book.
    Error,
}

impl Availability {
    const NOT_FOUND_AT_BRANCH: &'static str = "NOT_FOUND_AT_BRANCH";
    const NOT_IN_CATALOG: &'static str = "NOT_IN_CATALOG";
    const ERROR: &'static str = "ERROR";

    /// Textual form of the availability, the raw branch status or the sentinel name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Branch(status) => status,
            Self::NotFoundAtBranch => Self::NOT_FOUND_AT_BRANCH,
            Self::NotInCatalog => Self::NOT_IN_CATALOG,
            Self::Error => Self::ERROR,
        }
    }

    /// `true` for any of the sentinel values.
    #[must_use]
    pub const fn is_sentinel(&self) -> bool {
        !matches!(self, Self::Branch(_))
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Availability {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            Self::NOT_FOUND_AT_BRANCH => Self::NotFoundAtBranch,
            Self::NOT_IN_CATALOG => Self::NotInCatalog,
            Self::ERROR => Self::Error,
            status => Self::Branch(status.to_owned()),
        })
    }
}
