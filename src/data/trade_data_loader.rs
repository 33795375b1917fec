use std::path::Path;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::Result;
use crate::models::{LeagueList, ModCatalog};

pub const STATS_API_URL: &str = "https://www.pathofexile.com/api/trade/data/stats";
pub const LEAGUES_API_URL: &str = "https://www.pathofexile.com/api/trade/data/leagues";

const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0";

/// Loads the trade site's reference data (stat catalog, league list) from a
/// local cache file or from the public data API.
pub struct TradeDataLoader {
    client: Client,
}

impl Default for TradeDataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl TradeDataLoader {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    pub async fn load_from_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
        let content = tokio::fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&content)?)
    }

    pub async fn save_to_file<T: Serialize>(data: &T, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(data)?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    async fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        tracing::info!(url, "downloading trade data");
        let response = self
            .client
            .get(url)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/json")
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<T>().await?)
    }

    pub async fn fetch_catalog(&self) -> Result<ModCatalog> {
        self.fetch(STATS_API_URL).await
    }

    pub async fn fetch_leagues(&self) -> Result<LeagueList> {
        self.fetch(LEAGUES_API_URL).await
    }

    /// Cached catalog if readable, otherwise the API copy (which is then cached).
    pub async fn initialize_catalog(&self, path: &Path, refresh: bool) -> Result<ModCatalog> {
        if !refresh {
            match Self::load_from_file::<ModCatalog>(path).await {
                Ok(catalog) => {
                    tracing::info!(
                        path = %path.display(),
                        groups = catalog.result.len(),
                        entries = catalog.entry_count(),
                        "loaded stat catalog"
                    );
                    return Ok(catalog);
                }
                Err(e) => tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "stat catalog cache unusable"
                ),
            }
        }

        let catalog = self.fetch_catalog().await?;
        Self::save_to_file(&catalog, path).await?;
        Ok(catalog)
    }

    pub async fn initialize_leagues(&self, path: &Path, refresh: bool) -> Result<LeagueList> {
        if !refresh {
            match Self::load_from_file::<LeagueList>(path).await {
                Ok(leagues) => return Ok(leagues),
                Err(e) => tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "league list cache unusable"
                ),
            }
        }

        let leagues = self.fetch_leagues().await?;
        Self::save_to_file(&leagues, path).await?;
        Ok(leagues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ConverterError;
    use crate::models::{League, Realm};

    #[tokio::test]
    async fn test_catalog_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache").join("mods.json");

        let catalog =
            ModCatalog::from_json(include_str!("../../tests/fixtures/stats.json")).unwrap();
        TradeDataLoader::save_to_file(&catalog, &path).await.unwrap();

        let loaded: ModCatalog = TradeDataLoader::load_from_file(&path).await.unwrap();
        assert_eq!(loaded, catalog);
    }

    #[tokio::test]
    async fn test_cached_leagues_skip_the_network() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leagues.json");
        let leagues = LeagueList {
            result: vec![League {
                id: "Settlers".to_string(),
                realm: Realm::Pc,
                text: "Settlers".to_string(),
            }],
        };
        TradeDataLoader::save_to_file(&leagues, &path).await.unwrap();

        let loaded = TradeDataLoader::new().initialize_leagues(&path, false).await.unwrap();
        assert!(loaded.contains(Realm::Pc, "Settlers"));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = TradeDataLoader::load_from_file::<ModCatalog>(dir.path().join("nope.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, ConverterError::IoError(_)));
    }

    #[tokio::test]
    async fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mods.json");
        tokio::fs::write(&path, "{\"result\": 3}").await.unwrap();
        let err = TradeDataLoader::load_from_file::<ModCatalog>(&path).await.unwrap_err();
        assert!(matches!(err, ConverterError::ParseError(_)));
    }
}
