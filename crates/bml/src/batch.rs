use log::{trace, warn};

use crate::{api::Client, resolver::resolve, BookQuery, BookRecord, Error};

/// What to do when a book of a batch cannot be resolved.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum OnError {
    /// Stop at the first failing book and return its error.
    #[default]
    Abort,
    /// Record the failing book with [`Availability::Error`](crate::Availability::Error) and carry
    /// on with the next one.
    Record,
}

/// Resolves every query in order, calling `on_row` with each record as soon as it is resolved.
///
/// Exactly one record is returned per query, in the same order.
pub(crate) fn process_all<C, I, F>(
    queries: I,
    branch: &str,
    on_error: OnError,
    mut on_row: F,
) -> Result<Vec<BookRecord>, Error>
where
    C: Client,
    I: IntoIterator<Item = BookQuery>,
    F: FnMut(&BookRecord),
{
    let queries = queries.into_iter();
    let mut records = Vec::with_capacity(queries.size_hint().0);

    for (row, query) in queries.enumerate() {
        trace!("Resolving row {} (ISBN '{}')", row + 1, query.isbn);

        let record = match on_error {
            OnError::Abort => resolve::<C>(branch, query)?,
            OnError::Record => {
                let fallback = query.clone();
                resolve::<C>(branch, query).unwrap_or_else(|e| {
                    warn!("Row {} (ISBN '{}') failed: {e}", row + 1, fallback.isbn);
                    BookRecord::failed(fallback)
                })
            }
        };

        on_row(&record);
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use crate::{
        api::{impl_text_producer, request_count, MockClient},
        Availability, BookQuery, ErrorKind,
    };

    use super::{process_all, OnError};

    impl_text_producer! {
        NoHitProducer => Ok(r#"{ "numHits": 0, "resultSet": [] }"#.to_owned()),
        TwoHitsProducer => Ok(r#"{ "numHits": 2 }"#.to_owned()),
        GerlandOnlyProducer => Ok(include_str!("../tests/data/stock_gerland_only.json").to_owned()),
    }

    fn queries() -> Vec<BookQuery> {
        vec![
            BookQuery::new("9780000000001"),
            BookQuery::cached("9782070360024", "X123", "Some Book"),
            BookQuery::new("9780000000002"),
        ]
    }

    #[test]
    fn one_record_per_query_in_order() {
        let mut seen = Vec::new();
        let records = process_all::<MockClient<NoHitProducer, GerlandOnlyProducer>, _, _>(
            queries(),
            "7GERLA",
            OnError::Abort,
            |record| seen.push(record.isbn.clone()),
        )
        .unwrap();

        let isbns: Vec<_> = records.iter().map(|r| r.isbn.clone()).collect();
        assert_eq!(
            vec!["9780000000001", "9782070360024", "9780000000002"],
            isbns
        );
        assert_eq!(isbns, seen);

        assert_eq!(Availability::NotInCatalog, records[0].availability);
        assert_eq!(Availability::Branch("En rayon".to_owned()), records[1].availability);
        assert_eq!("Some Book", records[1].title);
        assert_eq!(Availability::NotInCatalog, records[2].availability);

        // only the cached row skipped the search
        assert_eq!(2, request_count("POST"));
        assert_eq!(1, request_count("GET"));
    }

    #[test]
    fn first_unrecovered_error_aborts_the_batch() {
        let mut resolved = 0;
        let err = process_all::<MockClient<TwoHitsProducer, GerlandOnlyProducer>, _, _>(
            queries(),
            "7GERLA",
            OnError::Abort,
            |_| resolved += 1,
        )
        .expect_err("TwoHitsProducer makes the first row ambiguous");

        assert_eq!(ErrorKind::Ambiguous, err.kind());
        assert_eq!(0, resolved);
        assert_eq!(1, request_count("POST"));
    }

    #[test]
    fn recorded_errors_keep_the_batch_going() {
        let records = process_all::<MockClient<TwoHitsProducer, GerlandOnlyProducer>, _, _>(
            queries(),
            "PARTDI",
            OnError::Record,
            |_| {},
        )
        .unwrap();

        assert_eq!(3, records.len());
        assert_eq!(Availability::Error, records[0].availability);
        assert_eq!("", records[0].id);
        assert_eq!(Availability::NotFoundAtBranch, records[1].availability);
        assert_eq!("X123", records[1].id);
        assert_eq!(Availability::Error, records[2].availability);
        assert_eq!("9780000000002", records[2].isbn);
    }

    #[test]
    fn empty_batch_makes_no_request() {
        let records =
            process_all::<MockClient, _, _>(Vec::new(), "PARTDI", OnError::Abort, |_| {}).unwrap();

        assert!(records.is_empty());
        assert_eq!(0, request_count("POST") + request_count("GET"));
    }
}
