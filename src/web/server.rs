use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, Path, Query, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;

use crate::catalog::store::DiseaseCatalog;
use crate::cli::{load_catalog, ServeArgs};
use crate::core::types::{DiseaseId, SymptomId};
use crate::matching::engine::{PredictionConfig, PredictionEngine};
use crate::matching::PredictionError;
use crate::utils::validation::check_symptom_limit;

/// Security configuration constants to prevent `DoS` attacks
pub const MAX_REQUEST_BODY_SIZE: usize = 64 * 1024; // 64KB
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const MAX_CONCURRENT_REQUESTS: usize = 100;

/// Largest page the list endpoints will return
pub const MAX_PAGE_SIZE: usize = 500;

/// Shared application state
///
/// The catalog is read-only once loaded, so handlers share it without locking.
pub struct AppState {
    pub catalog: DiseaseCatalog,
    pub config: PredictionConfig,
}

impl AppState {
    pub fn new(catalog: DiseaseCatalog) -> Self {
        Self {
            catalog,
            config: PredictionConfig::default(),
        }
    }
}

/// Body of `POST /api/predict`
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub symptom_ids: Vec<SymptomId>,
}

/// Error body returned by every endpoint
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
    pub details: Option<String>,

    /// Requested IDs missing from the catalog, for `unknown_symptoms` errors
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unknown_symptom_ids: Vec<SymptomId>,
}

/// Query parameters for paged list endpoints
#[derive(Deserialize)]
struct PageParams {
    skip: Option<usize>,
    limit: Option<usize>,
}

impl PageParams {
    fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        let limit = self.limit.unwrap_or(100).min(MAX_PAGE_SIZE);
        items
            .into_iter()
            .skip(self.skip.unwrap_or(0))
            .take(limit)
            .collect()
    }
}

/// Query parameters for `GET /api/diseases`
#[derive(Deserialize)]
struct DiseaseFilter {
    category: Option<String>,
    skip: Option<usize>,
    limit: Option<usize>,
}

/// Create a safe error response that prevents information disclosure
/// while logging detailed errors server-side for debugging
pub fn create_safe_error_response(
    error_type: &str,
    user_message: &str,
    internal_error: Option<&str>,
) -> ErrorResponse {
    // Log detailed error server-side for debugging (not exposed to client)
    if let Some(internal_msg) = internal_error {
        tracing::error!("Internal error ({}): {}", error_type, internal_msg);
    }

    ErrorResponse {
        error: user_message.to_string(),
        error_type: error_type.to_string(),
        details: None,
        unknown_symptom_ids: Vec::new(),
    }
}

fn error_response(status: StatusCode, body: ErrorResponse) -> Response {
    (status, Json(body)).into_response()
}

fn not_found(what: &str) -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        create_safe_error_response("not_found", &format!("{what} not found"), None),
    )
}

/// Map a rejected prediction onto an HTTP response.
///
/// Caller mistakes keep their detail; catalog failures are logged and reported
/// generically.
fn prediction_error_response(err: &PredictionError) -> Response {
    match err {
        PredictionError::EmptyInput => error_response(
            StatusCode::BAD_REQUEST,
            create_safe_error_response("empty_input", &err.to_string(), None),
        ),
        PredictionError::UnknownSymptoms(ids) => error_response(
            StatusCode::NOT_FOUND,
            ErrorResponse {
                error: err.to_string(),
                error_type: "unknown_symptoms".to_string(),
                details: Some(crate::core::types::join_ids(ids)),
                unknown_symptom_ids: ids.clone(),
            },
        ),
        PredictionError::Catalog(e) => error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            create_safe_error_response(
                "catalog_unavailable",
                "The disease catalog is currently unavailable",
                Some(&e.to_string()),
            ),
        ),
    }
}

/// Run the web server
///
/// # Errors
///
/// Returns an error if the tokio runtime cannot be created or the server fails to start.
pub fn run(args: ServeArgs) -> anyhow::Result<()> {
    // Build tokio runtime
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(args).await })
}

/// Routes plus the security layers that don't depend on the client's address.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/predict", post(predict_handler))
        .route("/api/symptoms", get(list_symptoms_handler))
        .route("/api/symptoms/{id}", get(get_symptom_handler))
        .route("/api/diseases", get(list_diseases_handler))
        .route("/api/diseases/categories", get(categories_handler))
        .route("/api/diseases/{id}", get(get_disease_handler))
        .route("/api/diseases/{id}/symptoms", get(disease_symptoms_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                // Security headers for browser protection
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-frame-options"),
                    HeaderValue::from_static("DENY"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("referrer-policy"),
                    HeaderValue::from_static("strict-origin-when-cross-origin"),
                ))
                // Request timeout to prevent slow client attacks
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    REQUEST_TIMEOUT,
                ))
                // Limit concurrent requests to prevent DOS
                .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_REQUESTS))
                .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_SIZE)),
        )
}

/// Create the full application router, including per-IP rate limiting.
///
/// The returned router must be served with connect info so the rate limiter can
/// see peer addresses.
///
/// # Errors
///
/// Returns an error if the rate limiter configuration is rejected.
pub fn create_router(catalog: DiseaseCatalog) -> anyhow::Result<Router> {
    let state = Arc::new(AppState::new(catalog));

    // Configure IP-based rate limiting
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(10) // 10 requests per second per IP
        .burst_size(50) // Allow bursts of 50 requests
        .finish()
        .ok_or_else(|| anyhow::anyhow!("Invalid rate limiter configuration"))?;

    Ok(build_router(state).layer(GovernorLayer {
        config: Arc::new(governor_conf),
    }))
}

async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    let catalog = load_catalog(args.catalog.as_deref())?;
    tracing::info!(
        "Serving catalog with {} symptoms and {} diseases",
        catalog.symptom_count(),
        catalog.disease_count()
    );
    let app = create_router(catalog)?;

    let addr = format!("{}:{}", args.address, args.port);
    println!("Starting symptom-solver web server at http://{addr}");

    if args.open {
        let _ = open::that(format!("http://{addr}/api/symptoms"));
    }

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// API endpoint for ranking diseases
async fn predict_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Response {
    let start_time = std::time::Instant::now();

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!("Malformed prediction request: {}", rejection.body_text());
            return error_response(
                rejection.status(),
                ErrorResponse {
                    error: "Request body must be JSON of the form {\"symptom_ids\": [..]}"
                        .to_string(),
                    error_type: "invalid_request".to_string(),
                    details: Some(rejection.body_text()),
                    unknown_symptom_ids: Vec::new(),
                },
            );
        }
    };

    if let Err(e) = check_symptom_limit(request.symptom_ids.len()) {
        return error_response(
            StatusCode::BAD_REQUEST,
            create_safe_error_response("too_many_symptoms", &e.to_string(), None),
        );
    }

    let engine = PredictionEngine::with_config(&state.catalog, state.config.clone());
    match engine.predict(&request.symptom_ids) {
        Ok(report) => {
            tracing::info!(
                "Predicted {} diseases for {} symptoms in {}ms",
                report.predictions.len(),
                request.symptom_ids.len(),
                start_time.elapsed().as_millis()
            );
            Json(report).into_response()
        }
        Err(e) => {
            tracing::debug!("Rejected prediction request: {e}");
            prediction_error_response(&e)
        }
    }
}

async fn list_symptoms_handler(
    State(state): State<Arc<AppState>>,
    Query(page): Query<PageParams>,
) -> Response {
    Json(page.apply(state.catalog.symptoms())).into_response()
}

async fn get_symptom_handler(State(state): State<Arc<AppState>>, Path(id): Path<u32>) -> Response {
    match state.catalog.symptom(SymptomId::new(id)) {
        Some(symptom) => Json(symptom).into_response(),
        None => not_found("Symptom"),
    }
}

async fn list_diseases_handler(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<DiseaseFilter>,
) -> Response {
    let page = PageParams {
        skip: filter.skip,
        limit: filter.limit,
    };
    let diseases = state.catalog.diseases(filter.category.as_deref());
    Json(page.apply(diseases)).into_response()
}

async fn categories_handler(State(state): State<Arc<AppState>>) -> Response {
    Json(serde_json::json!({ "categories": state.catalog.categories() })).into_response()
}

async fn get_disease_handler(State(state): State<Arc<AppState>>, Path(id): Path<u32>) -> Response {
    match state.catalog.disease(DiseaseId::new(id)) {
        Some(record) => Json(&record.disease).into_response(),
        None => not_found("Disease"),
    }
}

async fn disease_symptoms_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
) -> Response {
    let id = DiseaseId::new(id);
    let (Some(record), Some(linked)) = (
        state.catalog.disease(id),
        state.catalog.disease_symptoms(id),
    ) else {
        return not_found("Disease");
    };

    Json(serde_json::json!({
        "disease_id": record.disease.id,
        "disease_name": record.disease.name,
        "symptoms": linked.iter().map(|(symptom, link)| {
            serde_json::json!({
                "symptom_id": symptom.id,
                "symptom_name": symptom.name,
                "probability": link.probability,
                "is_primary": link.is_primary,
            })
        }).collect::<Vec<_>>(),
    }))
    .into_response()
}
