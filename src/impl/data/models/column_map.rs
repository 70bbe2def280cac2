use std::collections::HashMap;

use serde_derive::Deserialize;

use crate::errors::Error;

/// Header→field mapping for one sheet. Matching happens on a normalized
/// header (lowercased, ASCII alphanumerics only), so `"Fecha Alta"`,
/// `"fecha_alta"` and `"FechaAlta"` all hit the same alias. Lookups are
/// exact after normalization; there is no fuzzy matching.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "HashMap<String, String>")]
pub struct ColumnMap {
    aliases: HashMap<String, String>,
}

impl ColumnMap {
    pub fn new(pairs: &[(&str, &str)]) -> Self {
        Self {
            aliases: pairs
                .iter()
                .map(|(alias, field)| (normalize(alias), (*field).to_string()))
                .collect(),
        }
    }

    /// Parse a mapping from RON text, e.g. `{"Nombre": "name", "Nivel": "tier"}`.
    pub fn from_ron(text: &str) -> Result<Self, Error> {
        let aliases: HashMap<String, String> = ron::from_str(text)?;
        Ok(aliases.into())
    }

    pub(crate) fn resolve(&self, header: &str) -> Option<&str> {
        self.aliases.get(&normalize(header)).map(String::as_str)
    }
}

impl From<HashMap<String, String>> for ColumnMap {
    fn from(aliases: HashMap<String, String>) -> Self {
        Self {
            aliases: aliases
                .into_iter()
                .map(|(alias, field)| (normalize(&alias), field))
                .collect(),
        }
    }
}

fn normalize(header: &str) -> String {
    header
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Optional per-sheet mapping overrides, loadable from a single RON document.
/// Sheets left out keep their built-in mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColumnOverrides {
    pub partners: Option<ColumnMap>,
    pub companies: Option<ColumnMap>,
    pub subscriptions: Option<ColumnMap>,
    pub liquidations: Option<ColumnMap>,
    pub plans: Option<ColumnMap>,
    pub goals: Option<ColumnMap>,
}

impl ColumnOverrides {
    pub fn from_ron(text: &str) -> Result<Self, Error> {
        Ok(ron::from_str(text)?)
    }
}
