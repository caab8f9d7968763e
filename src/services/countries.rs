use serde::Deserialize;
use url::Url;

use crate::{error::AppError, models::country::CountryOption};

/// Public country directory, fetched once on startup to populate the
/// destination selector. No pagination, no caching, no retry.
#[derive(Clone)]
pub struct CountryDirectory {
    client: reqwest::Client,
    endpoint: Url,
}

#[derive(Deserialize)]
struct DirectoryEntry {
    name: DirectoryName,
}

#[derive(Deserialize)]
struct DirectoryName {
    common: String,
}

impl CountryDirectory {
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    pub async fn fetch_all(&self) -> Result<Vec<CountryOption>, AppError> {
        let entries: Vec<DirectoryEntry> = self
            .client
            .get(self.endpoint.clone())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let mut options: Vec<CountryOption> = entries
            .into_iter()
            .map(|entry| CountryOption::new(entry.name.common))
            .collect();
        options.sort_by(|a, b| a.label.cmp(&b.label));
        Ok(options)
    }
}
