use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Realm {
    Pc,
    Xbox,
    Sony,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct League {
    pub id: String,
    pub realm: Realm,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeagueList {
    pub result: Vec<League>,
}

impl LeagueList {
    pub fn for_realm(&self, realm: Realm) -> impl Iterator<Item = &League> {
        self.result.iter().filter(move |l| l.realm == realm)
    }

    pub fn contains(&self, realm: Realm, id: &str) -> bool {
        self.for_realm(realm).any(|l| l.id == id)
    }
}
