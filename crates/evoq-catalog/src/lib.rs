//! Evoqution molecule catalogue.
//!
//! A fixed reference table of small molecules: formula, geometry, a handful
//! of named physical properties, notes on pharmaceutical relevance and a
//! precomputed display energy. The table is embedded at compile time.
//!
//! # Example
//!
//! ```rust
//! use evoq_catalog::MoleculeCatalog;
//!
//! let catalog = MoleculeCatalog::builtin().unwrap();
//! let water = catalog.get("H2O").unwrap();
//! assert_eq!(water.name, "Water");
//! assert_eq!(catalog.search("carb").len(), 2);
//! ```

pub mod catalog;
pub mod error;
pub mod molecule;

pub use catalog::MoleculeCatalog;
pub use error::{CatalogError, CatalogResult};
pub use molecule::{Molecule, MoleculeProperty, MoleculeSummary};
