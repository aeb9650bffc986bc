//! # Model Registry and Handler State
//!
//! Hosts register every admin-manageable model at startup; handlers resolve
//! the `modelName` query parameter against the registry before doing any
//! work, so an unknown name is a 400 rather than a failed dispatch deep in
//! the query layer.

use sea_orm::DatabaseConnection;
use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::ApiError;
use crate::ops::ModelOps;

/// Startup-populated map from model name to its operation set.
#[derive(Default)]
pub struct ModelRegistry {
    models: HashMap<String, Arc<dyn ModelOps>>,
}

impl ModelRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model under the name its [`ModelOps::model_name`] reports.
    /// Registering the same name twice replaces the earlier entry.
    pub fn register(&mut self, ops: impl ModelOps + 'static) {
        self.models.insert(ops.model_name().to_owned(), Arc::new(ops));
    }

    /// Resolve a model name, failing fast with a 400 for unknown names.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::BadRequest`] if no model was registered under
    /// `name`.
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn ModelOps>, ApiError> {
        self.models
            .get(name)
            .cloned()
            .ok_or_else(|| ApiError::bad_request(format!("unknown model '{name}'")))
    }

    /// The registered model names, sorted.
    #[must_use]
    pub fn model_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.models.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

/// Everything a handler needs, constructed once at startup and cloned into
/// each request by Axum. A router cannot be built without a state, and a
/// state cannot be built without a connection and a registry.
#[derive(Clone)]
pub struct AdminState {
    db: DatabaseConnection,
    registry: Arc<ModelRegistry>,
}

impl AdminState {
    #[must_use]
    pub fn new(db: DatabaseConnection, registry: ModelRegistry) -> Self {
        Self {
            db,
            registry: Arc::new(registry),
        }
    }

    #[must_use]
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    #[must_use]
    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }
}
