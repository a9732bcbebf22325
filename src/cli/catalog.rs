use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};

use crate::catalog::store::DiseaseCatalog;
use crate::cli::{load_catalog, OutputFormat};
use crate::core::types::DiseaseId;

#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommands,
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List all symptoms in the catalog
    Symptoms {
        /// Path to custom catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// List diseases in the catalog
    Diseases {
        /// Path to custom catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Only show diseases in this category (e.g., "Respiratory")
        #[arg(long)]
        category: Option<String>,
    },

    /// List the distinct disease categories
    Categories {
        /// Path to custom catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Show a disease and its symptom profile
    Show {
        /// Disease ID
        #[arg(required = true)]
        id: u32,

        /// Path to custom catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Export the catalog to a file
    Export {
        /// Output file path
        #[arg(required = true)]
        output: PathBuf,

        /// Path to custom catalog file to export (defaults to embedded)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

/// Execute catalog subcommand
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, the disease is not found, or
/// the export cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: CatalogArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    match args.command {
        CatalogCommands::Symptoms { catalog } => {
            let catalog = load_catalog(catalog.as_deref())?;
            run_symptoms(&catalog, format)
        }
        CatalogCommands::Diseases { catalog, category } => {
            let catalog = load_catalog(catalog.as_deref())?;
            run_diseases(&catalog, category.as_deref(), format, verbose)
        }
        CatalogCommands::Categories { catalog } => {
            let catalog = load_catalog(catalog.as_deref())?;
            run_categories(&catalog, format)
        }
        CatalogCommands::Show { id, catalog } => {
            let catalog = load_catalog(catalog.as_deref())?;
            run_show(&catalog, DiseaseId::new(id), format)
        }
        CatalogCommands::Export { output, catalog } => run_export(&output, catalog.as_deref()),
    }
}

fn run_symptoms(catalog: &DiseaseCatalog, format: OutputFormat) -> anyhow::Result<()> {
    let symptoms = catalog.symptoms();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&symptoms)?),
        OutputFormat::Tsv => {
            println!("id\tname\tdescription");
            for s in symptoms {
                println!(
                    "{}\t{}\t{}",
                    s.id,
                    s.name,
                    s.description.as_deref().unwrap_or("")
                );
            }
        }
        OutputFormat::Text => {
            println!("{:<6} {:<20} Description", "ID", "Name");
            println!("{}", "-".repeat(60));
            for s in &symptoms {
                println!(
                    "{:<6} {:<20} {}",
                    s.id.to_string(),
                    truncate(&s.name, 20),
                    s.description.as_deref().unwrap_or("")
                );
            }
            println!("\nTotal: {} symptoms", symptoms.len());
        }
    }

    Ok(())
}

fn run_diseases(
    catalog: &DiseaseCatalog,
    category: Option<&str>,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let diseases = catalog.diseases(category);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&diseases)?),
        OutputFormat::Tsv => {
            println!("id\tname\tcategory\tsymptoms");
            for d in diseases {
                let links = catalog.disease(d.id).map_or(0, |r| r.links.len());
                println!("{}\t{}\t{}\t{links}", d.id, d.name, d.category);
            }
        }
        OutputFormat::Text => {
            println!("{:<6} {:<24} {:<22} Symptoms", "ID", "Name", "Category");
            println!("{}", "-".repeat(64));
            for d in &diseases {
                let links = catalog.disease(d.id).map_or(0, |r| r.links.len());
                println!(
                    "{:<6} {:<24} {:<22} {links}",
                    d.id.to_string(),
                    truncate(&d.name, 24),
                    truncate(&d.category, 22)
                );
                if verbose {
                    println!("       {}", d.description);
                }
            }
            println!("\nTotal: {} diseases", diseases.len());
        }
    }

    Ok(())
}

fn run_categories(catalog: &DiseaseCatalog, format: OutputFormat) -> anyhow::Result<()> {
    let categories = catalog.categories();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&categories)?),
        OutputFormat::Text | OutputFormat::Tsv => {
            for category in categories {
                println!("{category}");
            }
        }
    }

    Ok(())
}

fn run_show(catalog: &DiseaseCatalog, id: DiseaseId, format: OutputFormat) -> anyhow::Result<()> {
    let record = catalog
        .disease(id)
        .ok_or_else(|| anyhow::anyhow!("Disease '{id}' not found in catalog"))?;
    let linked = catalog.disease_symptoms(id).unwrap_or_default();
    let disease = &record.disease;

    match format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "id": disease.id,
                "name": disease.name,
                "description": disease.description,
                "category": disease.category,
                "symptoms": linked.iter().map(|(symptom, link)| {
                    serde_json::json!({
                        "symptom_id": symptom.id,
                        "symptom_name": symptom.name,
                        "probability": link.probability,
                        "is_primary": link.is_primary,
                    })
                }).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Tsv => {
            println!("symptom_id\tsymptom_name\tprobability\tis_primary");
            for (symptom, link) in &linked {
                println!(
                    "{}\t{}\t{:.2}\t{}",
                    symptom.id, symptom.name, link.probability, link.is_primary
                );
            }
        }
        OutputFormat::Text => {
            println!("{}", disease.name);
            println!("  ID: {}", disease.id);
            println!("  Category: {}", disease.category);
            println!("  Description: {}", disease.description);
            println!("\n  Symptoms ({}):", linked.len());
            for (symptom, link) in &linked {
                let marker = if link.is_primary { "  primary" } else { "" };
                println!(
                    "    {:<20} {:.2}{marker}",
                    truncate(&symptom.name, 20),
                    link.probability
                );
            }
            if linked.is_empty() {
                println!("    (none; this disease is never a prediction candidate)");
            }
        }
    }

    Ok(())
}

fn run_export(output: &Path, catalog_path: Option<&Path>) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path)?;
    let json = catalog.to_json()?;
    std::fs::write(output, json)?;
    println!(
        "Exported {} symptoms and {} diseases to {}",
        catalog.symptom_count(),
        catalog.disease_count(),
        output.display()
    );
    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Fever", 20), "Fever");
        assert_eq!(truncate("Ear, nose and throat", 10), "Ear, no...");
    }
}
