use std::collections::BTreeMap;

use marea_core::InvalidParameter;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use super::{HydrocarbonProfile, HydrocarbonRecord};

const BUNDLED_CATALOG: &str = include_str!("../../data/hydrocarbons.toml");

/// Errors raised while building or querying a [`Catalog`].
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No profile is registered under the requested name.
    #[error("unknown hydrocarbon `{name}`")]
    UnknownHydrocarbon { name: String },

    /// Two records share a name (compared case-insensitively).
    #[error("hydrocarbon `{name}` is listed more than once")]
    DuplicateHydrocarbon { name: String },

    /// A record holds values outside their valid range.
    #[error("invalid record for `{name}`")]
    InvalidRecord {
        name: String,
        #[source]
        source: InvalidParameter,
    },

    #[error("could not parse catalog: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Read-only reference table of hydrocarbon profiles, keyed by name.
///
/// Lookups ignore case and surrounding whitespace, so `"Diesel"`,
/// `"diesel"` and `" DIESEL "` resolve to the same profile.
/// A catalog is immutable once built and can be shared across threads.
///
/// # Example
///
/// ```
/// use marea_components::hydrocarbon::{Catalog, CatalogError};
///
/// let catalog = Catalog::bundled().unwrap();
/// let diesel = catalog.lookup("diesel").unwrap();
/// assert_eq!(diesel.name(), "Diesel");
///
/// assert!(matches!(
///     catalog.lookup("Unobtainium"),
///     Err(CatalogError::UnknownHydrocarbon { .. })
/// ));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    profiles: BTreeMap<String, HydrocarbonProfile>,
}

/// Layout of a TOML catalog document: an array of `[[hydrocarbon]]` tables.
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(default, rename = "hydrocarbon")]
    hydrocarbons: Vec<HydrocarbonRecord>,
}

impl Catalog {
    /// Builds a catalog from reference records.
    ///
    /// The records may come from any source (a file, a database, an embedded
    /// table), as long as they can be turned into [`HydrocarbonRecord`]s.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::InvalidRecord`] if a record fails validation.
    /// - [`CatalogError::DuplicateHydrocarbon`] if two records share a name.
    pub fn from_records<I>(records: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = HydrocarbonRecord>,
    {
        let mut profiles = BTreeMap::new();

        for record in records {
            let key = normalize(&record.name);
            if profiles.contains_key(&key) {
                return Err(CatalogError::DuplicateHydrocarbon { name: record.name });
            }

            let name = record.name.clone();
            let profile = HydrocarbonProfile::new(record)
                .map_err(|source| CatalogError::InvalidRecord { name, source })?;
            profiles.insert(key, profile);
        }

        debug!(count = profiles.len(), "loaded hydrocarbon catalog");
        Ok(Self { profiles })
    }

    /// Parses a catalog from a TOML document of `[[hydrocarbon]]` tables.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] for malformed documents, otherwise the
    /// same errors as [`Catalog::from_records`].
    pub fn from_toml_str(document: &str) -> Result<Self, CatalogError> {
        let CatalogDocument { hydrocarbons } = toml::from_str(document)?;
        Self::from_records(hydrocarbons)
    }

    /// Loads the reference catalog shipped with this crate.
    ///
    /// # Errors
    ///
    /// Fails only if the bundled data is corrupt.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_toml_str(BUNDLED_CATALOG)
    }

    /// Resolves a hydrocarbon by name.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownHydrocarbon`] if no profile matches.
    /// No fallback profile is ever substituted.
    pub fn lookup(&self, name: &str) -> Result<&HydrocarbonProfile, CatalogError> {
        self.profiles
            .get(&normalize(name))
            .ok_or_else(|| CatalogError::UnknownHydrocarbon {
                name: name.to_owned(),
            })
    }

    /// Iterates over the profiles in case-insensitive name order.
    pub fn iter(&self) -> impl Iterator<Item = &HydrocarbonProfile> {
        self.profiles.values()
    }

    /// Display names of every profile, in case-insensitive order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.iter().map(HydrocarbonProfile::name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
