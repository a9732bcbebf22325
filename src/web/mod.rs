//! JSON web API for symptom-based disease ranking.
//!
//! ## Starting the Server
//!
//! ```text
//! # Start on default port 8080
//! symptom-solver serve
//!
//! # Custom port and catalog
//! symptom-solver serve --port 3000 --catalog my_catalog.json
//! ```
//!
//! ## API Endpoints
//!
//! - `POST /api/predict` - Rank diseases for `{"symptom_ids": [..]}`
//! - `GET /api/symptoms` - List symptoms (`skip`, `limit`)
//! - `GET /api/symptoms/{id}` - One symptom
//! - `GET /api/diseases` - List diseases (`category`, `skip`, `limit`)
//! - `GET /api/diseases/categories` - Distinct categories
//! - `GET /api/diseases/{id}` - One disease
//! - `GET /api/diseases/{id}/symptoms` - A disease's symptom profile

pub mod server;
