//! JSON Schema tool converter.
//!
//! Default implementation of [`ToolSchemaPort`] that produces MCP tool
//! descriptors (`name`, `description`, `inputSchema`) for `tools/list`.

use arclang_mcp_application::ports::tool_schema::ToolSchemaPort;
use arclang_mcp_domain::tool::entities::{ParamType, ToolDefinition, ToolSpec};
use serde_json::{Map, Value, json};

/// Default implementation producing JSON Schema input schemas.
///
/// Handles param_type → JSON Schema type mapping:
/// - `String` → `"string"` (plus `enum` when values are restricted)
/// - `Boolean` → `"boolean"`
/// - `Integer` → `"integer"`
/// - `StringArray` → `"array"` of `"string"` items
pub struct JsonSchemaToolConverter;

fn type_schema(param_type: ParamType) -> Map<String, Value> {
    let mut prop = Map::new();
    match param_type {
        ParamType::String => {
            prop.insert("type".to_string(), json!("string"));
        }
        ParamType::Boolean => {
            prop.insert("type".to_string(), json!("boolean"));
        }
        ParamType::Integer => {
            prop.insert("type".to_string(), json!("integer"));
        }
        ParamType::StringArray => {
            prop.insert("type".to_string(), json!("array"));
            prop.insert("items".to_string(), json!({ "type": "string" }));
        }
    }
    prop
}

impl ToolSchemaPort for JsonSchemaToolConverter {
    fn tool_to_schema(&self, tool: &ToolDefinition) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for param in &tool.parameters {
            let mut prop = type_schema(param.param_type);
            prop.insert("description".to_string(), json!(param.description));
            if let Some(allowed) = param.allowed {
                prop.insert("enum".to_string(), json!(allowed));
            }
            if let Some(default) = &param.default {
                prop.insert("default".to_string(), default.clone());
            }
            properties.insert(param.name.clone(), Value::Object(prop));

            if param.required {
                required.push(json!(param.name));
            }
        }

        json!({
            "name": tool.name.as_str(),
            "description": tool.description,
            "inputSchema": {
                "type": "object",
                "properties": properties,
                "required": required,
            }
        })
    }

    fn all_tools_schema(&self, spec: &ToolSpec) -> Vec<Value> {
        spec.all()
            .into_iter()
            .map(|t| self.tool_to_schema(t))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arclang_mcp_domain::tool::entities::{ToolName, ToolParameter};
    use arclang_mcp_domain::default_tool_spec;

    #[test]
    fn test_tool_to_schema() {
        let converter = JsonSchemaToolConverter;
        let tool = ToolDefinition::new(ToolName::ExportDiagram, "Export a diagram")
            .with_parameter(ToolParameter::new("model_path", "Model file", true))
            .with_parameter(
                ToolParameter::new("format", "Output format", false)
                    .with_allowed(&["html", "json"])
                    .with_default("html"),
            )
            .with_parameter(
                ToolParameter::new("detailed", "More output", false)
                    .with_type(ParamType::Boolean)
                    .with_default(false),
            );

        let schema = converter.tool_to_schema(&tool);

        assert_eq!(schema["name"], "arclang_export_diagram");
        assert_eq!(schema["description"], "Export a diagram");
        assert_eq!(schema["inputSchema"]["type"], "object");

        let format = &schema["inputSchema"]["properties"]["format"];
        assert_eq!(format["type"], "string");
        assert_eq!(format["enum"], json!(["html", "json"]));
        assert_eq!(format["default"], "html");

        let detailed = &schema["inputSchema"]["properties"]["detailed"];
        assert_eq!(detailed["type"], "boolean");
        assert_eq!(detailed["default"], false);

        // Check required
        let required = schema["inputSchema"]["required"].as_array().unwrap();
        assert_eq!(required, &vec![json!("model_path")]);
    }

    #[test]
    fn test_string_array_items() {
        let converter = JsonSchemaToolConverter;
        let spec = default_tool_spec();
        let tool = spec.get(ToolName::SuggestArchitecture).unwrap();

        let schema = converter.tool_to_schema(tool);
        let requirements = &schema["inputSchema"]["properties"]["requirements"];
        assert_eq!(requirements["type"], "array");
        assert_eq!(requirements["items"]["type"], "string");
    }

    #[test]
    fn test_all_tools_schema_sorted() {
        let converter = JsonSchemaToolConverter;
        let tools = converter.all_tools_schema(&default_tool_spec());
        assert_eq!(tools.len(), ToolName::ALL.len());

        let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);

        for tool in &tools {
            assert!(tool["description"].is_string());
            assert_eq!(tool["inputSchema"]["type"], "object");
        }
    }
}
