//! Disease catalog storage.
//!
//! The catalog holds symptoms, diseases and the probability-weighted links between
//! them. The prediction engine only talks to it through [`CatalogProvider`], so any
//! store (a database, a remote service, a test fake) can stand in for the bundled
//! in-memory [`DiseaseCatalog`].
//!
//! ## Embedded Catalog
//!
//! A small sample catalog (10 symptoms, 5 diseases) is compiled into the binary.
//! Custom catalogs are loaded from JSON files in the same format:
//!
//! ```rust,no_run
//! use symptom_solver::DiseaseCatalog;
//! use std::path::Path;
//!
//! let catalog = DiseaseCatalog::load_embedded().unwrap();
//! let json = catalog.to_json().unwrap();
//!
//! let custom = DiseaseCatalog::load_from_file(Path::new("my_catalog.json")).unwrap();
//! ```
//!
//! [`CatalogProvider`]: provider::CatalogProvider
//! [`DiseaseCatalog`]: store::DiseaseCatalog

pub mod provider;
pub mod store;
