//! Tool domain entities

use super::value_objects::UnknownToolError;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// The closed catalogue of tools exposed to agents.
///
/// Routing is an exhaustive `match` over this enum, so adding a tool is a
/// compile-checked change in every layer that handles it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ToolName {
    Compile,
    Validate,
    TraceAnalysis,
    ExportDiagram,
    Info,
    GenerateRequirement,
    GenerateComponent,
    SuggestArchitecture,
    SafetyCheck,
    HazardAnalysis,
    GitMerge,
    PlmSync,
}

/// Tool families share a report layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolFamily {
    /// compile / validate / trace / export / info
    Compiler,
    /// safety check / hazard analysis
    Safety,
    /// requirement / component / architecture generation
    Generation,
    /// merge / PLM sync
    Integration,
}

impl ToolName {
    pub const ALL: [ToolName; 12] = [
        ToolName::Compile,
        ToolName::Validate,
        ToolName::TraceAnalysis,
        ToolName::ExportDiagram,
        ToolName::Info,
        ToolName::GenerateRequirement,
        ToolName::GenerateComponent,
        ToolName::SuggestArchitecture,
        ToolName::SafetyCheck,
        ToolName::HazardAnalysis,
        ToolName::GitMerge,
        ToolName::PlmSync,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::Compile => "arclang_compile",
            ToolName::Validate => "arclang_validate",
            ToolName::TraceAnalysis => "arclang_trace_analysis",
            ToolName::ExportDiagram => "arclang_export_diagram",
            ToolName::Info => "arclang_info",
            ToolName::GenerateRequirement => "arclang_generate_requirement",
            ToolName::GenerateComponent => "arclang_generate_component",
            ToolName::SuggestArchitecture => "arclang_suggest_architecture",
            ToolName::SafetyCheck => "arclang_safety_check",
            ToolName::HazardAnalysis => "arclang_hazard_analysis",
            ToolName::GitMerge => "arclang_git_merge",
            ToolName::PlmSync => "arclang_plm_sync",
        }
    }

    pub fn family(&self) -> ToolFamily {
        match self {
            ToolName::Compile
            | ToolName::Validate
            | ToolName::TraceAnalysis
            | ToolName::ExportDiagram
            | ToolName::Info => ToolFamily::Compiler,
            ToolName::SafetyCheck | ToolName::HazardAnalysis => ToolFamily::Safety,
            ToolName::GenerateRequirement
            | ToolName::GenerateComponent
            | ToolName::SuggestArchitecture => ToolFamily::Generation,
            ToolName::GitMerge | ToolName::PlmSync => ToolFamily::Integration,
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolName {
    type Err = UnknownToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolName::ALL
            .into_iter()
            .find(|tool| tool.as_str() == s)
            .ok_or_else(|| UnknownToolError(s.to_string()))
    }
}

/// Declared type of a tool argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    String,
    Boolean,
    Integer,
    StringArray,
}

impl ParamType {
    /// Human-readable name used in validation errors
    pub fn describe(&self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Boolean => "boolean",
            ParamType::Integer => "integer",
            ParamType::StringArray => "array of strings",
        }
    }

    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            ParamType::String => value.is_string(),
            ParamType::Boolean => value.is_boolean(),
            ParamType::Integer => value.is_i64() || value.is_u64(),
            ParamType::StringArray => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
        }
    }
}

/// Parameter specification for a tool
#[derive(Debug, Clone)]
pub struct ToolParameter {
    /// Parameter name
    pub name: String,
    /// Parameter description
    pub description: String,
    /// Whether this parameter is required
    pub required: bool,
    /// Declared type
    pub param_type: ParamType,
    /// Value applied when the caller omits the argument
    pub default: Option<Value>,
    /// Legal values for enumerated string parameters
    pub allowed: Option<&'static [&'static str]>,
}

impl ToolParameter {
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required,
            param_type: ParamType::String,
            default: None,
            allowed: None,
        }
    }

    pub fn with_type(mut self, param_type: ParamType) -> Self {
        self.param_type = param_type;
        self
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_allowed(mut self, allowed: &'static [&'static str]) -> Self {
        self.allowed = Some(allowed);
        self
    }
}

/// Definition of a tool exposed to the agent
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    pub name: ToolName,
    /// Human-readable description
    pub description: String,
    /// Parameter specifications, in declaration order
    pub parameters: Vec<ToolParameter>,
}

impl ToolDefinition {
    pub fn new(name: ToolName, description: impl Into<String>) -> Self {
        Self {
            name,
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, param: ToolParameter) -> Self {
        self.parameters.push(param);
        self
    }

    pub fn parameter(&self, name: &str) -> Option<&ToolParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn required_parameters(&self) -> impl Iterator<Item = &ToolParameter> {
        self.parameters.iter().filter(|p| p.required)
    }
}

/// Registry of tool definitions
#[derive(Debug, Clone, Default)]
pub struct ToolSpec {
    tools: HashMap<ToolName, ToolDefinition>,
}

impl ToolSpec {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    pub fn register(mut self, tool: ToolDefinition) -> Self {
        self.tools.insert(tool.name, tool);
        self
    }

    pub fn get(&self, name: ToolName) -> Option<&ToolDefinition> {
        self.tools.get(&name)
    }

    /// All definitions, sorted by wire name
    pub fn all(&self) -> Vec<&ToolDefinition> {
        let mut tools: Vec<&ToolDefinition> = self.tools.values().collect();
        tools.sort_by_key(|t| t.name.as_str());
        tools
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// A call to a tool as received from the client.
///
/// The name is kept as the raw string until the dispatcher resolves it
/// against the catalogue.
#[derive(Debug, Clone)]
pub struct ToolCall {
    /// Name of the tool to call
    pub tool_name: String,
    /// Arguments passed to the tool
    pub arguments: HashMap<String, Value>,
}

impl ToolCall {
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments: HashMap::new(),
        }
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    /// Build a call from a JSON object. Non-object payloads yield no arguments.
    pub fn from_json(tool_name: impl Into<String>, arguments: Option<Value>) -> Self {
        let arguments = match arguments {
            Some(Value::Object(map)) => map.into_iter().collect(),
            _ => HashMap::new(),
        };
        Self {
            tool_name: tool_name.into(),
            arguments,
        }
    }
}
