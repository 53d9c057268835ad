//! Operation input and output schemas.
//!
//! Every operation declares its arguments and result shape as a [`Schema`]
//! built from typed [`Field`]s. Schemas do two jobs: they render as
//! JSON Schema objects when operations are announced to the host, and they
//! validate incoming arguments before dispatch. Validation is deliberately
//! lightweight: required fields must be present and every present field must
//! match its declared type. Unknown fields pass through untouched and `null`
//! counts as absent.

use serde_json::{Map, Value};
use thiserror::Error;

/// Errors produced by argument validation.
#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    /// The arguments value was not a JSON object.
    #[error("arguments must be a JSON object")]
    NotAnObject,

    /// A required field was missing or null.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// A present field had the wrong JSON type.
    #[error("field {field} must be a {expected}")]
    TypeMismatch {
        /// Path of the offending field (`limit`, `emails[].subject`).
        field: String,
        /// Name of the expected JSON type.
        expected: &'static str,
    },
}

/// JSON type of a schema field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    /// A JSON string.
    String,
    /// A JSON number.
    Number,
    /// A JSON boolean.
    Boolean,
    /// A JSON array with uniformly typed elements.
    Array(Box<FieldType>),
    /// A JSON object with its own fields.
    Object(Vec<Field>),
}

impl FieldType {
    /// JSON Schema name of this type.
    pub fn name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Array(_) => "array",
            FieldType::Object(_) => "object",
        }
    }

    /// Renders this type as a JSON Schema fragment.
    fn schema_json(&self) -> Map<String, Value> {
        let mut spec = Map::new();
        spec.insert("type".to_string(), Value::String(self.name().to_string()));

        match self {
            FieldType::Array(inner) => {
                spec.insert("items".to_string(), Value::Object(inner.schema_json()));
            }
            FieldType::Object(fields) => {
                spec.extend(object_schema(fields));
            }
            _ => {}
        }

        spec
    }
}

/// One named field of a schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Field name as it appears in the JSON object.
    pub name: &'static str,
    /// Expected JSON type.
    pub field_type: FieldType,
    /// Whether the field may be absent.
    pub optional: bool,
    /// Default the host should assume for an absent field. Documentation
    /// only: validation never injects it.
    pub default: Option<Value>,
    /// Human-readable description for the announcement.
    pub description: &'static str,
}

impl Field {
    /// A field that must be present.
    pub fn required(name: &'static str, field_type: FieldType, description: &'static str) -> Self {
        Self {
            name,
            field_type,
            optional: false,
            default: None,
            description,
        }
    }

    /// A field that may be absent.
    pub fn optional(name: &'static str, field_type: FieldType, description: &'static str) -> Self {
        Self {
            name,
            field_type,
            optional: true,
            default: None,
            description,
        }
    }

    /// An optional field with an advertised default.
    pub fn with_default(
        name: &'static str,
        field_type: FieldType,
        default: Value,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            field_type,
            optional: true,
            default: Some(default),
            description,
        }
    }

    fn to_json(&self) -> Value {
        let mut spec = self.field_type.schema_json();
        if !self.description.is_empty() {
            spec.insert(
                "description".to_string(),
                Value::String(self.description.to_string()),
            );
        }
        if let Some(default) = &self.default {
            spec.insert("default".to_string(), default.clone());
        }
        Value::Object(spec)
    }
}

/// An object schema: the shape of operation arguments or results.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    /// Creates a schema over the given fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Validates an arguments value against this schema.
    pub fn validate(&self, value: &Value) -> Result<(), SchemaError> {
        let object = value.as_object().ok_or(SchemaError::NotAnObject)?;
        check_fields(&self.fields, object, "")
    }

    /// Renders this schema as a JSON Schema object.
    pub fn to_json(&self) -> Value {
        Value::Object(object_schema(&self.fields))
    }
}

/// Renders fields as JSON Schema `properties`/`required` entries.
fn object_schema(fields: &[Field]) -> Map<String, Value> {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for field in fields {
        properties.insert(field.name.to_string(), field.to_json());
        if !field.optional {
            required.push(Value::String(field.name.to_string()));
        }
    }

    let mut spec = Map::new();
    spec.insert("type".to_string(), Value::String("object".to_string()));
    spec.insert("properties".to_string(), Value::Object(properties));
    spec.insert("required".to_string(), Value::Array(required));
    spec
}

fn check_fields(
    fields: &[Field],
    object: &Map<String, Value>,
    prefix: &str,
) -> Result<(), SchemaError> {
    for field in fields {
        let path = if prefix.is_empty() {
            field.name.to_string()
        } else {
            format!("{}.{}", prefix, field.name)
        };

        match object.get(field.name) {
            None | Some(Value::Null) => {
                if !field.optional {
                    return Err(SchemaError::MissingField(path));
                }
            }
            Some(value) => check_value(&field.field_type, value, &path)?,
        }
    }

    Ok(())
}

fn check_value(field_type: &FieldType, value: &Value, path: &str) -> Result<(), SchemaError> {
    let matches = match field_type {
        FieldType::String => value.is_string(),
        FieldType::Number => value.is_number(),
        FieldType::Boolean => value.is_boolean(),
        FieldType::Array(inner) => {
            let items = value.as_array().ok_or_else(|| mismatch(path, field_type))?;
            let item_path = format!("{}[]", path);
            for item in items {
                check_value(inner, item, &item_path)?;
            }
            return Ok(());
        }
        FieldType::Object(fields) => {
            let object = value.as_object().ok_or_else(|| mismatch(path, field_type))?;
            return check_fields(fields, object, path);
        }
    };

    if matches {
        Ok(())
    } else {
        Err(mismatch(path, field_type))
    }
}

fn mismatch(path: &str, field_type: &FieldType) -> SchemaError {
    SchemaError::TypeMismatch {
        field: path.to_string(),
        expected: field_type.name(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn reply_schema() -> Schema {
        Schema::new(vec![
            Field::required("threadId", FieldType::String, "Thread to reply on"),
            Field::optional("messageId", FieldType::String, "Message being replied to"),
            Field::with_default("limit", FieldType::Number, json!(10), "Listing size"),
        ])
    }

    #[test]
    fn accepts_matching_arguments() {
        let schema = reply_schema();

        let result = schema.validate(&json!({
            "threadId": "t1",
            "messageId": "<m1@example.com>",
            "limit": 5
        }));

        assert_eq!(result, Ok(()));
    }

    #[test]
    fn optional_fields_may_be_absent() {
        let schema = reply_schema();
        assert_eq!(schema.validate(&json!({"threadId": "t1"})), Ok(()));
    }

    #[test]
    fn null_counts_as_absent() {
        let schema = reply_schema();

        assert_eq!(
            schema.validate(&json!({"threadId": "t1", "messageId": null})),
            Ok(())
        );
        assert_eq!(
            schema.validate(&json!({"threadId": null})),
            Err(SchemaError::MissingField("threadId".to_string()))
        );
    }

    #[test]
    fn missing_required_field_is_reported_by_name() {
        let schema = reply_schema();

        assert_eq!(
            schema.validate(&json!({"limit": 5})),
            Err(SchemaError::MissingField("threadId".to_string()))
        );
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let schema = reply_schema();

        let result = schema.validate(&json!({"threadId": "t1", "color": "green"}));
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn wrong_types_are_rejected_with_paths() {
        let schema = reply_schema();

        assert_eq!(
            schema.validate(&json!({"threadId": "t1", "limit": "five"})),
            Err(SchemaError::TypeMismatch {
                field: "limit".to_string(),
                expected: "number",
            })
        );
    }

    #[test]
    fn non_object_arguments_are_rejected() {
        let schema = reply_schema();

        assert_eq!(schema.validate(&json!("t1")), Err(SchemaError::NotAnObject));
        assert_eq!(schema.validate(&json!([1, 2])), Err(SchemaError::NotAnObject));
    }

    #[test]
    fn array_elements_are_checked() {
        let schema = Schema::new(vec![Field::required(
            "emails",
            FieldType::Array(Box::new(FieldType::Object(vec![Field::required(
                "subject",
                FieldType::String,
                "",
            )]))),
            "",
        )]);

        assert_eq!(
            schema.validate(&json!({"emails": [{"subject": "hi"}]})),
            Ok(())
        );
        assert_eq!(
            schema.validate(&json!({"emails": [{"subject": 7}]})),
            Err(SchemaError::TypeMismatch {
                field: "emails[].subject".to_string(),
                expected: "string",
            })
        );
        assert_eq!(
            schema.validate(&json!({"emails": "none"})),
            Err(SchemaError::TypeMismatch {
                field: "emails".to_string(),
                expected: "array",
            })
        );
    }

    #[test]
    fn renders_json_schema_shape() {
        let schema = reply_schema();

        assert_eq!(
            schema.to_json(),
            json!({
                "type": "object",
                "properties": {
                    "threadId": {"type": "string", "description": "Thread to reply on"},
                    "messageId": {"type": "string", "description": "Message being replied to"},
                    "limit": {"type": "number", "description": "Listing size", "default": 10}
                },
                "required": ["threadId"]
            })
        );
    }

    #[test]
    fn renders_nested_array_items() {
        let schema = Schema::new(vec![Field::required(
            "messages",
            FieldType::Array(Box::new(FieldType::Object(vec![Field::required(
                "body",
                FieldType::String,
                "Message text",
            )]))),
            "Thread messages",
        )]);

        assert_eq!(
            schema.to_json(),
            json!({
                "type": "object",
                "properties": {
                    "messages": {
                        "type": "array",
                        "description": "Thread messages",
                        "items": {
                            "type": "object",
                            "properties": {
                                "body": {"type": "string", "description": "Message text"}
                            },
                            "required": ["body"]
                        }
                    }
                },
                "required": ["messages"]
            })
        );
    }
}
