use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::Args;

use crate::catalog::store::DiseaseCatalog;
use crate::cli::{load_catalog, OutputFormat};
use crate::core::types::SymptomId;
use crate::matching::engine::{PredictionConfig, PredictionEngine, PredictionReport};
use crate::utils::validation::{check_symptom_limit, parse_symptom_ids};

#[derive(Args)]
pub struct PredictArgs {
    /// Symptom IDs, comma- or space-separated
    pub symptom_ids: Vec<String>,

    /// Symptom names, comma-separated (case-insensitive)
    #[arg(short, long, value_delimiter = ',')]
    pub symptoms: Vec<String>,

    /// Path to custom catalog file
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Number of diseases to show (1-3)
    #[arg(
        short = 'n',
        long,
        default_value = "3",
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..=3)
    )]
    pub max_results: usize,
}

/// Execute predict subcommand
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, a symptom name is unknown, or
/// the prediction is rejected (no symptoms, unknown symptom IDs).
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: PredictArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let catalog = load_catalog(args.catalog.as_deref())?;

    let requested = resolve_symptoms(&args, &catalog)?;
    check_symptom_limit(requested.len())?;

    if verbose {
        eprintln!(
            "Loaded catalog with {} symptoms and {} diseases",
            catalog.symptom_count(),
            catalog.disease_count()
        );
    }

    let config = PredictionConfig {
        result_limit: args.max_results,
    };
    let engine = PredictionEngine::with_config(&catalog, config);
    let report = engine.predict(&requested)?;

    if report.predictions.is_empty() && !matches!(format, OutputFormat::Json) {
        eprintln!(
            "No matching diseases found ({} diseases checked).",
            report.total_diseases_checked
        );
        return Ok(());
    }

    match format {
        OutputFormat::Text => {
            let distinct: BTreeSet<SymptomId> = requested.iter().copied().collect();
            print_text_results(&report, distinct.len(), verbose);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Tsv => print_tsv_results(&report),
    }

    Ok(())
}

/// Combine positional IDs with IDs looked up by name
fn resolve_symptoms(
    args: &PredictArgs,
    catalog: &DiseaseCatalog,
) -> anyhow::Result<Vec<SymptomId>> {
    let mut requested = parse_symptom_ids(&args.symptom_ids.join(","))?;

    for name in args.symptoms.iter().filter(|n| !n.trim().is_empty()) {
        let symptom = catalog
            .find_symptom_by_name(name)
            .ok_or_else(|| anyhow::anyhow!("Symptom '{}' not found in catalog", name.trim()))?;
        requested.push(symptom.id);
    }

    Ok(requested)
}

fn print_text_results(report: &PredictionReport, requested: usize, verbose: bool) {
    for (i, prediction) in report.predictions.iter().enumerate() {
        if i > 0 {
            println!("\n{}", "─".repeat(60));
        }

        println!(
            "\n#{} {} ({})",
            prediction.rank, prediction.disease_name, prediction.category
        );
        println!("   ID: {}", prediction.disease_id);
        println!("   {}", prediction.description);
        println!("\n   Score: {:.4}", prediction.score);

        if verbose {
            let b = &prediction.breakdown;
            println!(
                "          = {:.1}% coverage × {:.3} mean probability × {:.2} match bonus",
                b.coverage * 100.0,
                b.mean_probability,
                b.match_bonus
            );
        }

        println!(
            "\n   Matched symptoms: {} of {requested}",
            prediction.matched_symptoms.len()
        );
        for symptom in &prediction.matched_symptoms {
            println!(
                "     - {} (ID {}): {:.2}",
                symptom.name, symptom.id, symptom.probability
            );
        }
    }

    println!(
        "\n{} diseases checked. Scores rank candidates; they are not probabilities.",
        report.total_diseases_checked
    );
}

fn print_tsv_results(report: &PredictionReport) {
    println!("rank\tdisease_id\tdisease_name\tcategory\tscore\tmatched_symptoms");
    for p in &report.predictions {
        let matched: Vec<&str> = p.matched_symptoms.iter().map(|s| s.name.as_str()).collect();
        println!(
            "{}\t{}\t{}\t{}\t{:.4}\t{}",
            p.rank,
            p.disease_id,
            p.disease_name,
            p.category,
            p.score,
            matched.join(",")
        );
    }
}
