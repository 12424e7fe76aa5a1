//! Tool schema serialization

mod schema;

pub use schema::JsonSchemaToolConverter;
