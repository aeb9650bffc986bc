use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Query parameters shared by every admin operation.
///
/// The dispatcher is verb-driven: which parameters are required depends on
/// the operation, so everything is optional here and validated per handler.
///
/// # Model selection
/// `modelName` selects the registered model to operate on. A GET without it
/// lists the table names of the primary schema instead.
///
/// # Record selection
/// `id` is the numeric primary key, passed as a string and parsed
/// explicitly; non-numeric values are rejected with a 400.
///
/// # Pagination
/// `page` and `limit` apply to GET listings only, 1-based, defaulting to
/// page 1 with 10 records.
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct AdminParams {
    /// Registered model name to dispatch to.
    #[serde(rename = "modelName")]
    #[param(example = "user")]
    pub model_name: Option<String>,
    /// Numeric primary key of the record to read, update, or delete.
    #[param(example = "42")]
    pub id: Option<String>,
    /// Page number for listings (1-based).
    #[param(example = 1)]
    pub page: Option<u64>,
    /// Number of records per page for listings.
    #[param(example = 10)]
    pub limit: Option<u64>,
}

/// Envelope returned by paginated listings.
#[derive(Debug, Serialize, ToSchema)]
pub struct ListResponse {
    /// One JSON object per record, ordered by primary key.
    pub data: Vec<serde_json::Value>,
    /// The page that was served (1-based).
    pub page: u64,
    /// The page size that was applied.
    pub limit: u64,
    /// Total number of records in the model, across all pages.
    #[serde(rename = "totalCount")]
    pub total_count: u64,
}
