pub mod error;
pub mod executor;
pub mod plan;
pub mod registry;

pub use error::EngineError;
pub use executor::QueryExecutor;
pub use plan::{FetchAllReason, QueryPlan, Strategy, plan};
pub use registry::ProviderRegistry;
