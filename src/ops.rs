//! # Per-Model Operations
//!
//! [`ModelOps`] is the object-safe capability set the dispatcher routes to:
//! one implementation per registered model, keyed by name in the
//! [`crate::ModelRegistry`]. Records cross this boundary as
//! `serde_json::Value` so the registry can hold models of different entity
//! types behind one trait object.
//!
//! [`EntityOps`] is the blanket implementation for any Sea-ORM entity whose
//! model round-trips through JSON and whose primary key is a single numeric
//! column. Hosts with special needs (soft deletes, views, computed records)
//! can register their own `ModelOps` implementation instead.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    Iterable, Order, PaginatorTrait, PrimaryKeyToColumn, PrimaryKeyTrait, QueryOrder, QuerySelect,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::marker::PhantomData;

use crate::errors::ApiError;

type EntityFor<A> = <A as ActiveModelTrait>::Entity;
type ModelFor<A> = <EntityFor<A> as EntityTrait>::Model;
type PrimaryKeyFor<A> = <EntityFor<A> as EntityTrait>::PrimaryKey;
type PrimaryKeyValue<A> = <PrimaryKeyFor<A> as PrimaryKeyTrait>::ValueType;

/// The operation set a registered model exposes to the dispatcher.
///
/// All record payloads are JSON values; implementations own the mapping to
/// their storage representation and return [`ApiError`] with the sanitised,
/// operation-level messages the wire contract requires.
#[async_trait]
pub trait ModelOps: Send + Sync {
    /// The name this model was registered under (e.g. `"user"`).
    fn model_name(&self) -> &str;

    /// Fetch one record by numeric primary key.
    async fn find_by_id(&self, db: &DatabaseConnection, id: i64) -> Result<Value, ApiError>;

    /// Fetch a window of records ordered by primary key.
    async fn find_page(
        &self,
        db: &DatabaseConnection,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Value>, ApiError>;

    /// Total number of records in the model.
    async fn count(&self, db: &DatabaseConnection) -> Result<u64, ApiError>;

    /// Insert a record from a JSON object. Unique-constraint violations
    /// surface as [`ApiError::Conflict`].
    async fn create(&self, db: &DatabaseConnection, data: Value) -> Result<Value, ApiError>;

    /// Merge a JSON object into the record with the given id and persist it.
    /// The existence check and the write run in one transaction.
    async fn update(&self, db: &DatabaseConnection, id: i64, data: Value)
    -> Result<Value, ApiError>;

    /// Delete the record with the given id and return its prior content.
    /// The existence check and the delete run in one transaction.
    async fn delete(&self, db: &DatabaseConnection, id: i64) -> Result<Value, ApiError>;
}

/// Generic [`ModelOps`] over a Sea-ORM active model.
///
/// ```rust,ignore
/// let mut registry = ModelRegistry::new();
/// registry.register(EntityOps::<users::ActiveModel>::new("user"));
/// ```
pub struct EntityOps<A> {
    name: String,
    active_model: PhantomData<A>,
}

impl<A> EntityOps<A> {
    /// Create the operation set for one entity, registered under `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            active_model: PhantomData,
        }
    }
}

impl<A> EntityOps<A>
where
    A: ActiveModelTrait,
    PrimaryKeyValue<A>: TryFrom<i64>,
{
    fn primary_key(&self, id: i64) -> Result<PrimaryKeyValue<A>, ApiError> {
        PrimaryKeyValue::<A>::try_from(id).map_err(|_| {
            ApiError::bad_request(format!("id {id} is out of range for {}", self.name))
        })
    }
}

#[async_trait]
impl<A> ModelOps for EntityOps<A>
where
    A: ActiveModelTrait + ActiveModelBehavior + Default + Send + Sync + 'static,
    ModelFor<A>: IntoActiveModel<A> + Serialize + Sync,
    for<'de> ModelFor<A>: Deserialize<'de>,
    PrimaryKeyValue<A>: TryFrom<i64> + Clone,
{
    fn model_name(&self) -> &str {
        &self.name
    }

    async fn find_by_id(&self, db: &DatabaseConnection, id: i64) -> Result<Value, ApiError> {
        let key = self.primary_key(id)?;
        let model = EntityFor::<A>::find_by_id(key)
            .one(db)
            .await
            .map_err(|err| ApiError::database("Failed to fetch data", err))?
            .ok_or_else(|| ApiError::not_found(&self.name, id))?;
        to_json(&self.name, &model)
    }

    async fn find_page(
        &self,
        db: &DatabaseConnection,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Value>, ApiError> {
        let mut query = EntityFor::<A>::find();
        if let Some(key) = PrimaryKeyFor::<A>::iter().next() {
            query = query.order_by(key.into_column(), Order::Asc);
        }
        let models = query
            .offset(offset)
            .limit(limit)
            .all(db)
            .await
            .map_err(|err| ApiError::database("Failed to fetch data", err))?;
        models.iter().map(|model| to_json(&self.name, model)).collect()
    }

    async fn count(&self, db: &DatabaseConnection) -> Result<u64, ApiError> {
        EntityFor::<A>::find()
            .count(db)
            .await
            .map_err(|err| ApiError::database("Failed to fetch data", err))
    }

    async fn create(&self, db: &DatabaseConnection, data: Value) -> Result<Value, ApiError> {
        let fail = |err| ApiError::from_db(format!("Failed to create {}", self.name), err);

        let active = A::from_json(data).map_err(fail)?;
        let model = active.insert(db).await.map_err(fail)?;
        to_json(&self.name, &model)
    }

    async fn update(
        &self,
        db: &DatabaseConnection,
        id: i64,
        data: Value,
    ) -> Result<Value, ApiError> {
        let fail = |err| ApiError::from_db(format!("Failed to update {}", self.name), err);

        let key = self.primary_key(id)?;
        let txn = db.begin().await.map_err(fail)?;
        let model = EntityFor::<A>::find_by_id(key)
            .one(&txn)
            .await
            .map_err(fail)?
            .ok_or_else(|| ApiError::not_found(&self.name, id))?;
        let snapshot = to_json(&self.name, &model)?;

        let mut active: A = model.into_active_model();
        active.set_from_json(data).map_err(fail)?;
        if !active.is_changed() {
            // Nothing to write; the payload was empty or only echoed the
            // primary key. The fetched row is already the answer.
            txn.commit().await.map_err(fail)?;
            return Ok(snapshot);
        }

        let updated = active.update(&txn).await.map_err(fail)?;
        txn.commit().await.map_err(fail)?;
        to_json(&self.name, &updated)
    }

    async fn delete(&self, db: &DatabaseConnection, id: i64) -> Result<Value, ApiError> {
        let fail = |err| ApiError::database(format!("Failed to delete {}", self.name), err);

        let key = self.primary_key(id)?;
        let txn = db.begin().await.map_err(fail)?;
        let model = EntityFor::<A>::find_by_id(key.clone())
            .one(&txn)
            .await
            .map_err(fail)?
            .ok_or_else(|| ApiError::not_found(&self.name, id))?;
        let snapshot = to_json(&self.name, &model)?;

        let result = EntityFor::<A>::delete_by_id(key).exec(&txn).await.map_err(fail)?;
        if result.rows_affected == 0 {
            return Err(ApiError::not_found(&self.name, id));
        }
        txn.commit().await.map_err(fail)?;
        Ok(snapshot)
    }
}

fn to_json(name: &str, model: &impl Serialize) -> Result<Value, ApiError> {
    serde_json::to_value(model).map_err(|err| {
        ApiError::internal(format!("Failed to serialise {name} record"), err.to_string())
    })
}
