pub mod resource;
pub mod resource_type;
