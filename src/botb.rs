use crate::error::{Result, TagError};
use log::debug;
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://battleofthebits.org/api/v1";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Battle {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotBr {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Format {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
}

/// Tag-relevant data on one BotB entry. Missing fields decode as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Entry {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub battle: Battle,
    #[serde(deserialize_with = "null_as_default")]
    pub botbr: BotBr,
    #[serde(deserialize_with = "null_as_default")]
    pub datetime: String,
    #[serde(deserialize_with = "null_as_default")]
    pub format: Format,
}

impl Entry {
    /// First four characters of the timestamp, unchecked.
    pub fn year(&self) -> String {
        self.datetime.chars().take(4).collect()
    }
}

/// `null` decodes like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
        Null(()),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(text) => text,
        Id::Number(number) => number.to_string(),
        Id::Null(()) => String::new(),
    })
}

/// Somewhere entries can be fetched from.
pub trait EntrySource {
    /// Exact lookup of one entry by id.
    fn load(&self, id: &str) -> Result<Entry>;
    /// Fuzzy search, zero or more candidates.
    fn search(&self, phrase: &str) -> Result<Vec<Entry>>;
}

/// BotB's HTTP API.
pub struct BotbClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl BotbClient {
    pub fn new(base_url: &str) -> Self {
        BotbClient {
            client: reqwest::blocking::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    pub fn load_url(&self, id: &str) -> String {
        format!("{}/entry/load/{}", self.base_url, urlencoding::encode(id))
    }

    pub fn search_url(&self, phrase: &str) -> String {
        format!(
            "{}/entry/search/{}?page_length=1",
            self.base_url,
            urlencoding::encode(phrase)
        )
    }

    fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T> {
        debug!("GET {url}");
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|source| TagError::FetchTransport {
                url: url.clone(),
                source,
            })?;
        let status = response.status();
        let bytes = response
            .bytes()
            .map_err(|source| TagError::FetchTransport {
                url: url.clone(),
                source,
            })?;
        debug!("{url} answered {status} with {} bytes", bytes.len());

        match serde_json::from_slice(bytes.as_ref()) {
            Ok(value) => Ok(value),
            Err(_) if !status.is_success() => Err(TagError::FetchStatus { url, status }),
            Err(source) => Err(TagError::FetchDecode { url, source }),
        }
    }
}

impl Default for BotbClient {
    fn default() -> Self {
        BotbClient::new(DEFAULT_BASE_URL)
    }
}

impl EntrySource for BotbClient {
    fn load(&self, id: &str) -> Result<Entry> {
        self.get_json(self.load_url(id))
    }

    fn search(&self, phrase: &str) -> Result<Vec<Entry>> {
        self.get_json(self.search_url(phrase))
    }
}

/// Accepts a search result only when exactly one entry matched.
pub fn pick_single(phrase: &str, mut candidates: Vec<Entry>) -> Result<Entry> {
    match candidates.len() {
        0 => Err(TagError::NoMetadata(phrase.to_owned())),
        1 => Ok(candidates.remove(0)),
        count => Err(TagError::Ambiguous {
            phrase: phrase.to_owned(),
            count,
        }),
    }
}
