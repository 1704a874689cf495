use log::{info, trace};
use serde::{de::IgnoredAny, Deserialize, Deserializer};

use crate::{Error, ErrorKind, StockMap};

use super::Client;

macro_rules! stock_url {
    ($id: ident) => {
        format!(
            "{}/notice?id={}&locale=fr&aspect=Stock&opac=true",
            $crate::api::CATALOG_API_URL,
            $id
        )
    };
}

/// Fetches the stock of the catalog entry `id` and flattens it into a branch code to status map.
///
/// A response without any stock section is valid and gives an empty map.
pub(crate) fn get_stock_by_id<C: Client>(id: &str) -> Result<StockMap, Error> {
    info!("Fetching stock for catalog id '{id}'");

    let client = C::default();
    let model: StockModel = client.get_json(&stock_url!(id))?;

    if model.error_reponse {
        return Err(Error::new(
            ErrorKind::InvalidId,
            format!("The catalog rejected the id '{id}'"),
        ));
    }

    let stock = model.into_stock_map();
    trace!("Stock found for {} branch(es)", stock.len());
    Ok(stock)
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct StockModel {
    // sic, the API spells it this way; only the presence of the key matters, even when null
    #[serde(rename = "errorReponse", default, deserialize_with = "present")]
    error_reponse: bool,
    #[serde(rename = "monographicCopies")]
    monographic_copies: Option<Vec<CopyGroup>>,
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct CopyGroup {
    #[serde(default)]
    children: Vec<CopyEntry>,
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct CopyEntry {
    data: CopyData,
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct CopyData {
    branch: String,
    stat_desc: String,
}

fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    IgnoredAny::deserialize(deserializer).map(|_| true)
}

impl StockModel {
    // Later copies overwrite earlier ones for the same branch.
    fn into_stock_map(self) -> StockMap {
        self.monographic_copies
            .unwrap_or_default()
            .into_iter()
            .flat_map(|group| group.children)
            .map(|CopyEntry { data }| (data.branch, data.stat_desc))
            .collect()
    }
}
