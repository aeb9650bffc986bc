pub mod catalog;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod ops;
pub mod pagination;
pub mod registry;
pub mod routes;

pub use errors::ApiError;
pub use models::{AdminParams, ListResponse};
pub use ops::{EntityOps, ModelOps};
pub use pagination::PageWindow;
pub use registry::{AdminState, ModelRegistry};
pub use routes::{AdminApiDoc, router};

/// Macro to register several entities in one go.
/// Usage: `register_models!(registry, "user" => users::ActiveModel, "post" => posts::ActiveModel);`
#[macro_export]
macro_rules! register_models {
    ($registry:expr, $( $name:literal => $active_model:ty ),+ $(,)?) => {
        $(
            $registry.register($crate::EntityOps::<$active_model>::new($name));
        )+
    };
}
