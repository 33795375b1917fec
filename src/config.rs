use std::path::PathBuf;

use crate::models::Realm;
use crate::trade::DEFAULT_LEAGUE;

pub const DEFAULT_CATALOG_PATH: &str = "data/mods.json";
pub const DEFAULT_LEAGUES_PATH: &str = "data/leagues.json";

pub const CATALOG_PATH_VAR: &str = "POE_CATALOG_PATH";
pub const LEAGUES_PATH_VAR: &str = "POE_LEAGUES_PATH";
pub const LEAGUE_VAR: &str = "POE_LEAGUE";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub catalog_path: PathBuf,
    pub leagues_path: PathBuf,
    pub league: String,
    pub realm: Realm,
    pub refresh: bool,
}

impl AppConfig {
    /// Settings from the environment, falling back to the bundled defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            catalog_path: lookup(CATALOG_PATH_VAR)
                .unwrap_or_else(|| DEFAULT_CATALOG_PATH.to_string())
                .into(),
            leagues_path: lookup(LEAGUES_PATH_VAR)
                .unwrap_or_else(|| DEFAULT_LEAGUES_PATH.to_string())
                .into(),
            league: lookup(LEAGUE_VAR).unwrap_or_else(|| DEFAULT_LEAGUE.to_string()),
            realm: Realm::Pc,
            refresh: false,
        }
    }

    pub fn with_catalog_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.catalog_path = path;
        }
        self
    }

    pub fn with_leagues_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.leagues_path = path;
        }
        self
    }

    pub fn with_league(mut self, league: Option<String>) -> Self {
        if let Some(league) = league {
            self.league = league;
        }
        self
    }

    pub fn with_realm(mut self, realm: Realm) -> Self {
        self.realm = realm;
        self
    }

    pub fn with_refresh(mut self, refresh: bool) -> Self {
        self.refresh = refresh;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_env_is_empty() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config.catalog_path, PathBuf::from(DEFAULT_CATALOG_PATH));
        assert_eq!(config.leagues_path, PathBuf::from(DEFAULT_LEAGUES_PATH));
        assert_eq!(config.league, "Settlers");
        assert_eq!(config.realm, Realm::Pc);
    }

    #[test]
    fn test_env_then_flags() {
        let config = AppConfig::from_lookup(|key| match key {
            LEAGUE_VAR => Some("Standard".to_string()),
            CATALOG_PATH_VAR => Some("/tmp/stats.json".to_string()),
            _ => None,
        });
        assert_eq!(config.league, "Standard");
        assert_eq!(config.catalog_path, PathBuf::from("/tmp/stats.json"));

        let config = config
            .with_league(Some("Hardcore".to_string()))
            .with_catalog_path(None)
            .with_realm(Realm::Sony);
        assert_eq!(config.league, "Hardcore");
        assert_eq!(config.catalog_path, PathBuf::from("/tmp/stats.json"));
        assert_eq!(config.realm, Realm::Sony);
    }
}
