use log::{info, trace};

use crate::{
    api::{search, stock, Client},
    Availability, BookQuery, BookRecord, Error, ErrorKind,
};

/// Resolves the availability of `query` at `branch`.
///
/// The catalog is searched by ISBN only when the query does not carry both a cached id and title;
/// a cached pair is trusted as-is. A search without any usable hit is the only error recovered here
/// and gives an empty id and title with [`Availability::NotInCatalog`].
pub(crate) fn resolve<C: Client>(branch: &str, query: BookQuery) -> Result<BookRecord, Error> {
    let cached = query.known().is_some();
    let BookQuery { isbn, id, title } = query;

    let (title, id) = match (id, title) {
        (Some(id), Some(title)) if cached => {
            trace!("Using cached id '{id}' for ISBN '{isbn}'");
            (title, id)
        }
        _ => match search::get_title_id_by_isbn::<C>(&isbn) {
            Ok(found) => found,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("ISBN '{isbn}' is not in the catalog");
                return Ok(BookRecord {
                    isbn,
                    id: String::new(),
                    title: String::new(),
                    availability: Availability::NotInCatalog,
                });
            }
            Err(e) => return Err(e),
        },
    };

    let availability = stock::get_stock_by_id::<C>(&id)?
        .remove(branch)
        .map_or(Availability::NotFoundAtBranch, Availability::Branch);

    Ok(BookRecord {
        isbn,
        id,
        title,
        availability,
    })
}

#[cfg(test)]
mod tests {
    use crate::{
        api::{impl_text_producer, request_count, MockClient, NetworkErrorProducer},
        Availability, BookQuery, ErrorKind,
    };

    use super::resolve;

    impl_text_producer! {
        NoHitProducer => Ok(r#"{ "numHits": 0 }"#.to_owned()),
        OneHitProducer => Ok(include_str!("../tests/data/search_one_hit.json").to_owned()),
        TwoHitsProducer => Ok(r#"{ "numHits": 2 }"#.to_owned()),
        EmptyResultSetProducer => Ok(r#"{ "numHits": 1, "resultSet": [] }"#.to_owned()),
        TwoBranchesProducer => Ok(include_str!("../tests/data/stock_two_branches.json").to_owned()),
        GerlandOnlyProducer => Ok(include_str!("../tests/data/stock_gerland_only.json").to_owned()),
        NoStockProducer => Ok(r#"{ "id": "X123" }"#.to_owned()),
        ErrorResponseProducer => Ok(include_str!("../tests/data/stock_error.json").to_owned()),
    }

    #[test]
    fn no_hit_is_not_in_catalog_without_stock_request() {
        let record = resolve::<MockClient<NoHitProducer, TwoBranchesProducer>>(
            "PARTDI",
            BookQuery::new("9780000000001"),
        )
        .unwrap();

        assert_eq!("9780000000001", record.isbn);
        assert_eq!("", record.id);
        assert_eq!("", record.title);
        assert_eq!(Availability::NotInCatalog, record.availability);
        assert_eq!(1, request_count("POST"));
        assert_eq!(0, request_count("GET"));
    }

    #[test]
    fn single_hit_without_result_is_not_in_catalog() {
        let record = resolve::<MockClient<EmptyResultSetProducer, GerlandOnlyProducer>>(
            "PARTDI",
            BookQuery::new("9780000000003"),
        )
        .unwrap();

        assert_eq!("", record.id);
        assert_eq!("", record.title);
        assert_eq!(Availability::NotInCatalog, record.availability);
        assert_eq!(0, request_count("GET"));
    }

    #[test]
    fn branch_status_is_passed_through_verbatim() {
        let record = resolve::<MockClient<OneHitProducer, TwoBranchesProducer>>(
            "7GERLA",
            BookQuery::new("9782070360024"),
        )
        .unwrap();

        assert_eq!("ark:/75584/pf0000151806", record.id);
        assert_eq!("L'étranger / Albert Camus", record.title);
        assert_eq!(Availability::Branch("En rayon".to_owned()), record.availability);
    }

    #[test]
    fn absent_branch_is_not_found_at_branch() {
        let record = resolve::<MockClient<OneHitProducer, TwoBranchesProducer>>(
            "COLLEC",
            BookQuery::new("9782070360024"),
        )
        .unwrap();

        assert_eq!(Availability::NotFoundAtBranch, record.availability);
    }

    #[test]
    fn cached_id_and_title_skip_the_search() {
        let record = resolve::<MockClient<NetworkErrorProducer, GerlandOnlyProducer>>(
            "PARTDI",
            BookQuery::cached("9782070360024", "X123", "Some Book"),
        )
        .unwrap();

        assert_eq!("X123", record.id);
        assert_eq!("Some Book", record.title);
        assert_eq!(Availability::NotFoundAtBranch, record.availability);
        assert_eq!(0, request_count("POST"));
        assert_eq!(1, request_count("GET"));
    }

    #[test]
    fn empty_cached_title_triggers_a_search() {
        let record = resolve::<MockClient<OneHitProducer, GerlandOnlyProducer>>(
            "7GERLA",
            BookQuery::cached("9782070360024", "X123", ""),
        )
        .unwrap();

        // the searched id replaces the partial cache
        assert_eq!("ark:/75584/pf0000151806", record.id);
        assert_eq!(1, request_count("POST"));
    }

    #[test]
    fn absent_stock_section_is_not_found_at_any_branch() {
        for branch in ["PARTDI", "7GERLA", "NOWHERE"] {
            let record = resolve::<MockClient<OneHitProducer, NoStockProducer>>(
                branch,
                BookQuery::new("9782070360024"),
            )
            .unwrap();

            assert_eq!(Availability::NotFoundAtBranch, record.availability);
        }
    }

    #[test]
    fn resolving_twice_gives_the_same_record() {
        type Client = MockClient<OneHitProducer, TwoBranchesProducer>;
        let query = BookQuery::new("9782070360024");

        let first = resolve::<Client>("PARTDI", query.clone()).unwrap();
        let second = resolve::<Client>("PARTDI", query).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn ambiguous_search_is_not_recovered() {
        let err = resolve::<MockClient<TwoHitsProducer, TwoBranchesProducer>>(
            "PARTDI",
            BookQuery::new("9782070360024"),
        )
        .expect_err("TwoHitsProducer has two hits");

        assert_eq!(ErrorKind::Ambiguous, err.kind());
        assert_eq!(0, request_count("GET"));
    }

    #[test]
    fn stale_cached_id_is_not_recovered() {
        let err = resolve::<MockClient<NoHitProducer, ErrorResponseProducer>>(
            "PARTDI",
            BookQuery::cached("9782070360024", "stale", "Some Book"),
        )
        .expect_err("ErrorResponseProducer always rejects the id");

        assert_eq!(ErrorKind::InvalidId, err.kind());
    }
}
