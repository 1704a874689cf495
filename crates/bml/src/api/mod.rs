use serde::{de::DeserializeOwned, Serialize};

pub(crate) mod search;
pub(crate) mod stock;

const CATALOG_API_URL: &str = "https://catalogue.bm-lyon.fr/in/rest/api";

/// Transport used to talk to the catalog.
///
/// Every call is a single blocking request/response; implementors hold no state between calls.
pub trait Client
where
    Self: Default,
{
    /// Sends a `GET` request and deserializes the JSON response body.
    ///
    /// # Errors
    ///
    /// An [`Err`] with [`ErrorKind::IO`] is returned when the request cannot be sent and an
    /// [`Err`] with [`ErrorKind::Deserialize`] when the body is not the expected JSON.
    fn get_json<T>(&self, url: &str) -> Result<T, Error>
    where
        T: DeserializeOwned;

    /// Sends a `POST` request with a JSON `body` and deserializes the JSON response body.
    ///
    /// # Errors
    ///
    /// Same as [`Client::get_json`].
    fn post_json<B, T>(&self, url: &str, body: &B) -> Result<T, Error>
    where
        B: Serialize,
        T: DeserializeOwned;
}

impl Client for reqwest::blocking::Client {
    fn get_json<T>(&self, url: &str) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        self.get(url)
            .send()
            .map_err(|e| Error::wrap(ErrorKind::IO, e))
            .and_then(|r| r.json().map_err(|e| Error::wrap(ErrorKind::Deserialize, e)))
    }

    fn post_json<B, T>(&self, url: &str, body: &B) -> Result<T, Error>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        self.post(url)
            .json(body)
            .send()
            .map_err(|e| Error::wrap(ErrorKind::IO, e))
            .and_then(|r| r.json().map_err(|e| Error::wrap(ErrorKind::Deserialize, e)))
    }
}

#[cfg(test)]
pub(crate) use test::{
    assert_url, impl_text_producer, request_count, MockClient, NetworkErrorProducer, Producer,
    REQUEST_SINK,
};

use crate::{Error, ErrorKind};
