//! Command-line interface for symptom-solver.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **predict**: Rank diseases for a set of symptoms
//! - **catalog**: List symptoms, diseases and categories, show or export the catalog
//! - **serve**: Start the JSON web API
//!
//! ## Usage
//!
//! ```text
//! # Rank diseases for symptom IDs 1 and 2
//! symptom-solver predict 1,2
//!
//! # Same, by name
//! symptom-solver predict --symptoms fever,cough
//!
//! # JSON output for scripting
//! symptom-solver predict 1 2 --format json
//!
//! # Browse the catalog
//! symptom-solver catalog diseases --category Respiratory
//!
//! # Start the API
//! symptom-solver serve --port 8080
//! ```

use std::path::Path;

use clap::{Parser, Subcommand};

use crate::catalog::store::DiseaseCatalog;

pub mod catalog;
pub mod predict;

#[derive(Parser)]
#[command(name = "symptom-solver")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Rank likely diseases from a set of observed symptoms")]
#[command(
    long_about = "symptom-solver scores every disease in a catalog by how well its expected symptoms overlap the symptoms you report.\n\nEach disease gets coverage x mean probability x match bonus; the top three are shown.\nThe score is a ranking signal, not a diagnosis or a calibrated probability."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank diseases for a set of symptoms
    Predict(predict::PredictArgs),

    /// Browse or export the disease catalog
    Catalog(catalog::CatalogArgs),

    /// Start the web server
    Serve(ServeArgs),
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    /// Path to custom catalog file
    #[arg(long)]
    pub catalog: Option<std::path::PathBuf>,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Load a custom catalog if a path was given, otherwise the embedded one
///
/// # Errors
///
/// Returns an error if the catalog cannot be read or is inconsistent.
pub fn load_catalog(path: Option<&Path>) -> anyhow::Result<DiseaseCatalog> {
    Ok(match path {
        Some(path) => DiseaseCatalog::load_from_file(path)?,
        None => DiseaseCatalog::load_embedded()?,
    })
}
