use std::collections::HashSet;
use std::path::Path;

fn main() {
    let catalog_path = Path::new("catalogs/disease_catalog.json");
    validate_catalog_file(catalog_path);
    set_build_dependencies();
}

fn validate_catalog_file(catalog_path: &Path) {
    // Ensure catalog exists at build time
    assert!(
        catalog_path.exists(),
        "\n\nCATALOG BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the catalog file before building.\n",
        catalog_path.display()
    );

    let catalog_contents = std::fs::read_to_string(catalog_path).unwrap_or_else(|e| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            catalog_path.display()
        );
    });

    let catalog: serde_json::Value = serde_json::from_str(&catalog_contents).unwrap_or_else(|e| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Invalid JSON\n\
             Path: {}\n\
             Error: {e}\n\
             Hint: Check for missing commas, brackets, or invalid syntax.\n",
            catalog_path.display()
        );
    });

    validate_catalog_structure(&catalog);
}

fn validate_catalog_structure(catalog: &serde_json::Value) {
    assert!(
        catalog.is_object(),
        "\n\nCATALOG BUILD ERROR: Root must be a JSON object\n\
         Got: {catalog}\n"
    );

    let symptoms = required_array(catalog, "symptoms");
    let diseases = required_array(catalog, "diseases");

    let symptom_ids = validate_symptoms(symptoms);
    let total_links = validate_diseases(diseases, &symptom_ids);

    println!(
        "cargo:warning=Validated catalog: {} symptoms, {} diseases, {total_links} links",
        symptoms.len(),
        diseases.len()
    );
}

fn required_array<'a>(catalog: &'a serde_json::Value, field: &str) -> &'a Vec<serde_json::Value> {
    let value = catalog.get(field).unwrap_or_else(|| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Missing '{field}' field\n\
             The catalog must have a top-level '{field}' array.\n"
        );
    });

    value.as_array().unwrap_or_else(|| {
        panic!(
            "\n\nCATALOG BUILD ERROR: '{field}' must be an array\n\
             Got: {value}\n"
        );
    })
}

fn validate_symptoms(symptoms: &[serde_json::Value]) -> HashSet<u64> {
    let mut ids = HashSet::new();

    for (i, symptom) in symptoms.iter().enumerate() {
        let id = symptom
            .get("id")
            .and_then(serde_json::Value::as_u64)
            .unwrap_or_else(|| {
                panic!("\n\nCATALOG BUILD ERROR: Symptom at index {i} missing numeric 'id' field\n")
            });

        let name = symptom
            .get("name")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default();
        assert!(
            !name.trim().is_empty(),
            "\n\nCATALOG BUILD ERROR: Symptom {id} (index {i}) has an empty or missing 'name'\n"
        );

        assert!(
            ids.insert(id),
            "\n\nCATALOG BUILD ERROR: Duplicate symptom id {id}\n"
        );
    }

    ids
}

fn validate_diseases(diseases: &[serde_json::Value], symptom_ids: &HashSet<u64>) -> usize {
    let mut total_links = 0;

    for (i, disease) in diseases.iter().enumerate() {
        let name = disease
            .get("name")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("<unknown>");

        for field in ["id", "name", "description", "category"] {
            assert!(
                disease.get(field).is_some(),
                "\n\nCATALOG BUILD ERROR: Disease '{name}' (index {i}) missing '{field}' field\n"
            );
        }

        if let Some(links) = disease.get("symptoms").and_then(|s| s.as_array()) {
            for link in links {
                validate_link(link, name, symptom_ids);
            }
            total_links += links.len();
        }
    }

    total_links
}

fn validate_link(link: &serde_json::Value, disease_name: &str, symptom_ids: &HashSet<u64>) {
    let symptom_id = link
        .get("symptom_id")
        .and_then(serde_json::Value::as_u64)
        .unwrap_or_else(|| {
            panic!(
                "\n\nCATALOG BUILD ERROR: Disease '{disease_name}' has a link without 'symptom_id'\n"
            )
        });

    assert!(
        symptom_ids.contains(&symptom_id),
        "\n\nCATALOG BUILD ERROR: Disease '{disease_name}' links unknown symptom {symptom_id}\n"
    );

    let probability = link
        .get("probability")
        .and_then(serde_json::Value::as_f64)
        .unwrap_or(-1.0);
    assert!(
        (0.0..=1.0).contains(&probability),
        "\n\nCATALOG BUILD ERROR: Disease '{disease_name}' symptom {symptom_id} has probability \
         outside [0, 1]\n"
    );
}

fn set_build_dependencies() {
    // Tell cargo to rerun if catalog changes
    println!("cargo:rerun-if-changed=catalogs/disease_catalog.json");

    // Tell cargo to rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}
