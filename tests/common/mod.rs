use axum::Router;
use crudadmin::{AdminState, ModelRegistry};
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, DbErr, Set};
use sea_orm_migration::prelude::*;

pub mod posts_entity;
pub mod users_entity;

/// In-memory SQLite with the admin schema applied.
#[allow(dead_code)]
pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let db = Database::connect("sqlite::memory:").await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

/// Admin router mounted at `/admin`, with `user` and `post` registered.
#[allow(dead_code)]
pub fn setup_admin_app(db: DatabaseConnection) -> Router {
    let mut registry = ModelRegistry::new();
    crudadmin::register_models!(
        registry,
        "user" => users_entity::ActiveModel,
        "post" => posts_entity::ActiveModel,
    );

    Router::new().nest("/admin", crudadmin::router(AdminState::new(db, registry)))
}

/// Insert `count` users with predictable names and unique emails.
#[allow(dead_code)]
pub async fn seed_users(db: &DatabaseConnection, count: u32) -> Result<(), DbErr> {
    for i in 1..=count {
        users_entity::ActiveModel {
            name: Set(format!("user-{i:02}")),
            email: Set(format!("user-{i:02}@example.com")),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }
    Ok(())
}

/// Read a response body to its JSON value.
#[allow(dead_code)]
pub async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    serde_json::from_slice(&bytes).expect("response body is JSON")
}

pub struct Migrator;

impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(CreateUserTable), Box::new(CreatePostTable)]
    }
}

pub struct CreateUserTable;

impl MigrationName for CreateUserTable {
    fn name(&self) -> &'static str {
        "m20250101_000001_create_user_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreateUserTable {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(UserTable)
            .if_not_exists()
            .col(
                ColumnDef::new(UserColumn::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(ColumnDef::new(UserColumn::Name).text().not_null())
            .col(ColumnDef::new(UserColumn::Email).text().not_null().unique_key())
            .to_owned();

        manager.create_table(table).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserTable).to_owned())
            .await
    }
}

pub struct CreatePostTable;

impl MigrationName for CreatePostTable {
    fn name(&self) -> &'static str {
        "m20250101_000002_create_post_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreatePostTable {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(PostTable)
            .if_not_exists()
            .col(
                ColumnDef::new(PostColumn::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(ColumnDef::new(PostColumn::Title).text().not_null())
            .col(ColumnDef::new(PostColumn::Body).text().null())
            .col(
                ColumnDef::new(PostColumn::Published)
                    .boolean()
                    .not_null()
                    .default(false),
            )
            .to_owned();

        manager.create_table(table).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PostTable).to_owned())
            .await
    }
}

#[derive(Debug)]
pub struct UserTable;

impl Iden for UserTable {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(s, "users").unwrap();
    }
}

#[derive(Debug)]
pub enum UserColumn {
    Id,
    Name,
    Email,
}

impl Iden for UserColumn {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(
            s,
            "{}",
            match self {
                Self::Id => "id",
                Self::Name => "name",
                Self::Email => "email",
            }
        )
        .unwrap();
    }
}

#[derive(Debug)]
pub struct PostTable;

impl Iden for PostTable {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(s, "posts").unwrap();
    }
}

#[derive(Debug)]
pub enum PostColumn {
    Id,
    Title,
    Body,
    Published,
}

impl Iden for PostColumn {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(
            s,
            "{}",
            match self {
                Self::Id => "id",
                Self::Title => "title",
                Self::Body => "body",
                Self::Published => "published",
            }
        )
        .unwrap();
    }
}
