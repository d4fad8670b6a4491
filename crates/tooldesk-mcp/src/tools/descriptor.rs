//! Typed tool descriptors and their JSON Schema rendering.

use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};

use crate::types::{ToolDefinition, ToolError};

/// Arguments of one invocation, keyed by parameter name.
pub type Arguments = Map<String, Value>;

/// JSON type of a flat tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    String,
    Integer,
    Boolean,
    Object,
}

impl ParamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Integer => "integer",
            ParamType::Boolean => "boolean",
            ParamType::Object => "object",
        }
    }
}

/// One declared parameter of a tool.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub name: String,
    pub kind: ParamType,
    pub required: bool,
    pub description: String,
    /// Closed set of accepted string values, advertised as `enum`.
    pub choices: Vec<String>,
}

impl ParamSpec {
    fn new(name: &str, kind: ParamType, required: bool, description: &str) -> Self {
        Self {
            name: name.to_string(),
            kind,
            required,
            description: description.to_string(),
            choices: Vec::new(),
        }
    }

    pub fn required(name: &str, kind: ParamType, description: &str) -> Self {
        Self::new(name, kind, true, description)
    }

    pub fn optional(name: &str, kind: ParamType, description: &str) -> Self {
        Self::new(name, kind, false, description)
    }

    pub fn with_choices(mut self, choices: &[&str]) -> Self {
        self.choices = choices.iter().map(|c| c.to_string()).collect();
        self
    }

    fn schema(&self) -> Value {
        let mut prop = json!({
            "type": self.kind.as_str(),
            "description": self.description,
        });
        if !self.choices.is_empty() {
            prop["enum"] = json!(self.choices);
        }
        prop
    }
}

/// Name, description, and parameters of a tool. Immutable once registered.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub params: Vec<ParamSpec>,
}

impl ToolDescriptor {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            params: Vec::new(),
        }
    }

    pub fn param(mut self, spec: ParamSpec) -> Self {
        self.params.push(spec);
        self
    }

    /// Required parameter names in declaration order.
    pub fn required_params(&self) -> impl Iterator<Item = &str> {
        self.params
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
    }

    /// First required parameter absent (or null) in `args`.
    pub fn first_missing(&self, args: &Arguments) -> Option<&str> {
        self.required_params()
            .find(|name| args.get(*name).map_or(true, Value::is_null))
    }

    pub fn input_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .params
            .iter()
            .map(|p| (p.name.clone(), p.schema()))
            .collect();
        let required: Vec<&str> = self.required_params().collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    pub fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name.clone(),
            description: Some(self.description.clone()),
            input_schema: self.input_schema(),
        }
    }
}

/// Deserialize invocation arguments into a handler's params struct.
pub fn parse_args<T: DeserializeOwned>(args: &Arguments) -> Result<T, ToolError> {
    serde_json::from_value(Value::Object(args.clone()))
        .map_err(|e| ToolError::InvalidArguments(e.to_string()))
}

/// Trimmed string that must not be blank; a blank value counts as missing.
pub fn non_blank<'a>(value: &'a str, name: &str) -> Result<&'a str, ToolError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ToolError::MissingArgument(name.to_string()));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket_update() -> ToolDescriptor {
        ToolDescriptor::new("update_ticket_status", "Update a ticket")
            .param(ParamSpec::required("ticket_id", ParamType::String, "Ticket ID"))
            .param(
                ParamSpec::required("status", ParamType::String, "New status")
                    .with_choices(&["open", "in_progress", "resolved"]),
            )
            .param(ParamSpec::optional("note", ParamType::String, "Optional note"))
    }

    #[test]
    fn test_input_schema_shape() {
        let schema = ticket_update().input_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], json!(["ticket_id", "status"]));
        assert_eq!(schema["properties"]["status"]["enum"][1], "in_progress");
        assert_eq!(schema["properties"]["note"]["type"], "string");
        assert!(schema["properties"]["ticket_id"].get("enum").is_none());
    }

    #[test]
    fn test_first_missing_follows_declaration_order() {
        let desc = ticket_update();
        let mut args = Arguments::new();
        assert_eq!(desc.first_missing(&args), Some("ticket_id"));

        args.insert("ticket_id".to_string(), json!("T-1"));
        assert_eq!(desc.first_missing(&args), Some("status"));

        args.insert("status".to_string(), Value::Null);
        assert_eq!(desc.first_missing(&args), Some("status"));

        args.insert("status".to_string(), json!("open"));
        assert_eq!(desc.first_missing(&args), None);
    }

    #[test]
    fn test_definition_carries_description() {
        let def = ticket_update().definition();
        assert_eq!(def.name, "update_ticket_status");
        assert_eq!(def.description.as_deref(), Some("Update a ticket"));
    }

    #[test]
    fn test_parse_args_type_mismatch_is_invalid_arguments() {
        #[derive(Debug, serde::Deserialize)]
        struct Params {
            customer_id: i64,
        }

        let mut args = Arguments::new();
        args.insert("customer_id".to_string(), json!("one-oh-one"));
        let err = parse_args::<Params>(&args).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
        assert!(err.to_string().starts_with("Invalid arguments: invalid type"));

        args.insert("customer_id".to_string(), json!(101));
        assert_eq!(parse_args::<Params>(&args).unwrap().customer_id, 101);
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank("  vpn ", "keyword").unwrap(), "vpn");
        assert_eq!(
            non_blank("   ", "keyword").unwrap_err(),
            ToolError::MissingArgument("keyword".to_string())
        );
    }
}
