use super::{Schema, SchemaBuilder};
use serde_json::json;

#[test]
fn test_schema_creation() {
    let schema_json = json!({
        "type": "object",
        "properties": {
            "summary": { "type": "string" }
        },
        "required": ["summary"]
    });

    let schema = Schema::new(schema_json.clone());
    assert_eq!(schema.to_json(), &schema_json);
    assert!(schema.to_pretty_string().contains("\"summary\""));
}

#[test]
fn test_schema_builder() {
    let schema = SchemaBuilder::object()
        .title("Prediction")
        .description("One predicted condition")
        .property(
            "diseaseName",
            json!({ "type": "string", "description": "Condition name" }),
            true,
        )
        .property(
            "probability",
            json!({ "type": "integer", "minimum": 0, "maximum": 100 }),
            true,
        )
        .property("description", json!({ "type": "string" }), false)
        .build();

    let schema_json = schema.to_json();
    assert_eq!(schema_json["type"], "object");
    assert_eq!(schema_json["title"], "Prediction");
    assert_eq!(schema_json["description"], "One predicted condition");
    assert_eq!(schema_json["properties"]["diseaseName"]["type"], "string");
    assert_eq!(schema_json["properties"]["probability"]["maximum"], 100);
    assert_eq!(schema_json["properties"]["description"]["type"], "string");
    assert_eq!(schema_json["required"], json!(["diseaseName", "probability"]));
}

#[test]
fn test_array_schema_and_examples() {
    let schema = SchemaBuilder::array(json!({ "type": "string" }))
        .example(json!(["rest", "fluids"]))
        .build();
    let schema_json = schema.to_json();
    assert_eq!(schema_json["type"], "array");
    assert_eq!(schema_json["items"]["type"], "string");
    assert_eq!(schema_json["example"], json!(["rest", "fluids"]));
    assert!(schema_json.get("properties").is_none());
}

#[test]
fn test_required_not_duplicated() {
    let schema = Schema::builder()
        .property("a", json!({ "type": "string" }), true)
        .property("a", json!({ "type": "integer" }), true)
        .build();
    assert_eq!(schema.to_json()["required"], json!(["a"]));
    assert_eq!(schema.to_json()["properties"]["a"]["type"], "integer");
}
