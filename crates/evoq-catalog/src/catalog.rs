//! The molecule table and its lookups.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::{CatalogError, CatalogResult};
use crate::molecule::{Molecule, MoleculeSummary};

/// Embedded reference table.
const BUILTIN_MOLECULES: &str = include_str!("../data/molecules.json");

/// Immutable, ordered molecule table with keyed lookup.
#[derive(Debug, Clone)]
pub struct MoleculeCatalog {
    molecules: Vec<Molecule>,
    index: FxHashMap<String, usize>,
}

impl MoleculeCatalog {
    /// The table shipped with the crate.
    pub fn builtin() -> CatalogResult<Self> {
        Self::from_json(BUILTIN_MOLECULES)
    }

    /// Parse a JSON array of molecules.
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        let molecules: Vec<Molecule> = serde_json::from_str(json)?;
        Self::from_molecules(molecules)
    }

    /// Build from records, keeping their order. Keys must be unique.
    pub fn from_molecules(molecules: Vec<Molecule>) -> CatalogResult<Self> {
        let mut index = FxHashMap::default();
        for (i, m) in molecules.iter().enumerate() {
            if index.insert(m.key.clone(), i).is_some() {
                return Err(CatalogError::DuplicateKey(m.key.clone()));
            }
        }
        debug!(count = molecules.len(), "loaded molecule catalogue");
        Ok(Self { molecules, index })
    }

    /// Look up by exact (case-sensitive) key.
    pub fn get(&self, key: &str) -> CatalogResult<&Molecule> {
        self.index
            .get(key)
            .map(|&i| &self.molecules[i])
            .ok_or_else(|| CatalogError::UnknownMolecule(key.to_string()))
    }

    /// True if `key` names an entry.
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Keys in table order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.molecules.iter().map(|m| m.key.as_str())
    }

    /// All entries in table order.
    pub fn iter(&self) -> impl Iterator<Item = &Molecule> {
        self.molecules.iter()
    }

    /// Summaries of all entries in table order.
    pub fn summaries(&self) -> Vec<MoleculeSummary> {
        self.molecules.iter().map(Molecule::summary).collect()
    }

    /// Entries whose key or name starts with `query`, ignoring case.
    pub fn search(&self, query: &str) -> Vec<MoleculeSummary> {
        self.molecules
            .iter()
            .filter(|m| m.matches_prefix(query))
            .map(Molecule::summary)
            .collect()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.molecules.len()
    }

    /// True if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.molecules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_parses() {
        let catalog = MoleculeCatalog::builtin().unwrap();
        assert_eq!(catalog.len(), 6);
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let json = r#"[
            {"key":"X","formula":"X","name":"A","structure":"Linear","properties":[],"drug_relevance":[],"expected_energy":"0 eV"},
            {"key":"X","formula":"X","name":"B","structure":"Linear","properties":[],"drug_relevance":[],"expected_energy":"0 eV"}
        ]"#;
        assert!(matches!(
            MoleculeCatalog::from_json(json),
            Err(CatalogError::DuplicateKey(k)) if k == "X"
        ));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(
            MoleculeCatalog::from_json("{not json"),
            Err(CatalogError::Parse(_))
        ));
    }
}
