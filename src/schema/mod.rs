//! JSON Schema descriptions of the payloads exchanged with a remote predictor.
//!
//! The schema is embedded in the prompt so the model knows exactly which
//! JSON shape to answer with.

mod builder;
pub use builder::SchemaBuilder;

use serde_json::Value;

/// A JSON Schema document.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub schema: Value,
}

impl Schema {
    pub fn new(schema: Value) -> Self {
        Self { schema }
    }

    pub fn to_json(&self) -> &Value {
        &self.schema
    }

    /// Pretty-printed form, as embedded in prompts.
    pub fn to_pretty_string(&self) -> String {
        serde_json::to_string_pretty(&self.schema).unwrap_or_else(|_| self.schema.to_string())
    }

    /// Create a schema builder for an object type
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::object()
    }
}

/// A type that can describe itself as a JSON Schema.
pub trait SchemaType {
    fn schema() -> Schema;

    fn schema_name() -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests;
