//! Molecule records.

use serde::{Deserialize, Serialize};

/// A named physical property, e.g. `bond_angle = 104.5°`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoleculeProperty {
    pub name: String,
    pub value: String,
}

/// One reference entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Molecule {
    /// Lookup identifier, e.g. `"H2O"`.
    pub key: String,
    /// Display formula with subscripts, e.g. `"H₂O"`.
    pub formula: String,
    /// Common name.
    pub name: String,
    /// Molecular geometry ("Bent", "Linear", ...).
    pub structure: String,
    /// Named properties in display order.
    pub properties: Vec<MoleculeProperty>,
    /// Notes on pharmaceutical relevance.
    pub drug_relevance: Vec<String>,
    /// Precomputed energy shown on result pages.
    pub expected_energy: String,
}

impl Molecule {
    /// Value of the named property, if present.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }

    /// Short form for listings and search results.
    pub fn summary(&self) -> MoleculeSummary {
        MoleculeSummary {
            key: self.key.clone(),
            name: self.name.clone(),
            formula: self.formula.clone(),
        }
    }

    /// Case-insensitive prefix match on key or name. An empty query matches.
    pub fn matches_prefix(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.key.to_lowercase().starts_with(&query) || self.name.to_lowercase().starts_with(&query)
    }
}

/// Key, name and formula of a molecule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoleculeSummary {
    pub key: String,
    pub name: String,
    pub formula: String,
}
