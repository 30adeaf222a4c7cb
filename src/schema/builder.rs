use serde_json::{Map, Value, json};

use super::Schema;

/// SchemaBuilder helps construct JSON Schema incrementally.
///
/// Properties render sorted by name and `required` in insertion order, so the
/// rendered schema, and every prompt built from it, is stable.
#[derive(Default)]
pub struct SchemaBuilder {
    schema_type: String,
    title: Option<String>,
    description: Option<String>,
    properties: Map<String, Value>,
    required: Vec<String>,
    items: Option<Value>,
    examples: Vec<Value>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self {
            schema_type: "object".to_string(),
            ..Default::default()
        }
    }

    pub fn object() -> Self {
        Self::new()
    }

    pub fn array(items: Value) -> Self {
        Self {
            schema_type: "array".to_string(),
            items: Some(items),
            ..Default::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn property(
        mut self,
        name: impl Into<String>,
        property_schema: Value,
        required: bool,
    ) -> Self {
        let name = name.into();
        if required && !self.required.contains(&name) {
            self.required.push(name.clone());
        }
        self.properties.insert(name, property_schema);
        self
    }

    pub fn example(mut self, example: Value) -> Self {
        self.examples.push(example);
        self
    }

    pub fn build(self) -> Schema {
        let mut schema = json!({
            "type": self.schema_type
        });

        if let Some(title) = self.title {
            schema["title"] = json!(title);
        }

        if let Some(description) = self.description {
            schema["description"] = json!(description);
        }

        if let Some(items) = self.items {
            schema["items"] = items;
        }

        if !self.properties.is_empty() {
            schema["properties"] = Value::Object(self.properties);
            if !self.required.is_empty() {
                schema["required"] = json!(self.required);
            }
        }

        match self.examples.len() {
            0 => {}
            1 => schema["example"] = self.examples[0].clone(),
            _ => schema["examples"] = json!(self.examples),
        }

        Schema::new(schema)
    }
}
