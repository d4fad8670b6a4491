//! Tool registration and lookup.

use std::collections::HashMap;
use std::sync::Arc;

use crate::types::{McpError, McpResult, ToolDefinition, ToolError, ToolOutcome};

use super::descriptor::{Arguments, ToolDescriptor};

/// A tool body. Receives the raw arguments and exclusive access to the store.
pub type ToolHandler<S> = Arc<dyn Fn(&Arguments, &mut S) -> ToolOutcome + Send + Sync>;

/// A descriptor paired with its handler.
pub struct RegisteredTool<S> {
    pub descriptor: ToolDescriptor,
    pub handler: ToolHandler<S>,
}

impl<S> Clone for RegisteredTool<S> {
    fn clone(&self) -> Self {
        Self {
            descriptor: self.descriptor.clone(),
            handler: Arc::clone(&self.handler),
        }
    }
}

/// Name → tool mapping over a store type `S`.
///
/// Built once at startup and then handed to a [`Dispatcher`](super::Dispatcher),
/// after which it is only read. Listing order is registration order.
pub struct ToolRegistry<S> {
    tools: Vec<RegisteredTool<S>>,
    index: HashMap<String, usize>,
}

impl<S> Default for ToolRegistry<S> {
    fn default() -> Self {
        Self {
            tools: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<S> ToolRegistry<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tool. A name that is already taken leaves the registry untouched.
    pub fn register<F>(&mut self, descriptor: ToolDescriptor, handler: F) -> McpResult<()>
    where
        F: Fn(&Arguments, &mut S) -> ToolOutcome + Send + Sync + 'static,
    {
        self.register_handler(descriptor, Arc::new(handler))
    }

    /// Add a tool with an already shared handler.
    pub fn register_handler(
        &mut self,
        descriptor: ToolDescriptor,
        handler: ToolHandler<S>,
    ) -> McpResult<()> {
        if self.index.contains_key(&descriptor.name) {
            return Err(McpError::DuplicateTool(descriptor.name));
        }

        tracing::debug!("Registered tool {}", descriptor.name);
        self.index.insert(descriptor.name.clone(), self.tools.len());
        self.tools.push(RegisteredTool {
            descriptor,
            handler,
        });
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Result<&RegisteredTool<S>, ToolError> {
        self.index
            .get(name)
            .map(|&i| &self.tools[i])
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))
    }

    pub fn list(&self) -> Vec<&ToolDescriptor> {
        self.tools.iter().map(|t| &t.descriptor).collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.descriptor.name.as_str()).collect()
    }

    /// Wire descriptors for `tools/list`.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.descriptor.definition()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::descriptor::{ParamSpec, ParamType};
    use serde_json::json;

    fn echo_descriptor() -> ToolDescriptor {
        ToolDescriptor::new("echo", "Echo a message")
            .param(ParamSpec::required("message", ParamType::String, "Text to echo"))
    }

    #[test]
    fn test_lookup_returns_registered_entry() {
        let mut registry: ToolRegistry<()> = ToolRegistry::new();
        let handler: ToolHandler<()> =
            Arc::new(|_args: &Arguments, _store: &mut ()| -> ToolOutcome { Ok(json!("pong")) });
        registry
            .register_handler(echo_descriptor(), Arc::clone(&handler))
            .unwrap();

        let entry = registry.lookup("echo").unwrap();
        assert_eq!(entry.descriptor, echo_descriptor());
        assert!(Arc::ptr_eq(&entry.handler, &handler));
    }

    #[test]
    fn test_duplicate_registration_leaves_registry_unchanged() {
        let mut registry: ToolRegistry<()> = ToolRegistry::new();
        registry
            .register(echo_descriptor(), |_args, _store| Ok(json!("first")))
            .unwrap();

        let replacement = ToolDescriptor::new("echo", "Different description");
        let err = registry
            .register(replacement, |_args, _store| Ok(json!("second")))
            .unwrap_err();
        assert!(matches!(err, McpError::DuplicateTool(ref name) if name == "echo"));

        assert_eq!(registry.len(), 1);
        let entry = registry.lookup("echo").unwrap();
        assert_eq!(entry.descriptor.description, "Echo a message");
        let out = (entry.handler)(&Arguments::new(), &mut ()).unwrap();
        assert_eq!(out, json!("first"));
    }

    #[test]
    fn test_unknown_lookup() {
        let registry: ToolRegistry<()> = ToolRegistry::new();
        let err = registry.lookup("missing").err().unwrap();
        assert_eq!(err, ToolError::UnknownTool("missing".to_string()));
    }

    #[test]
    fn test_list_preserves_registration_order() {
        let mut registry: ToolRegistry<()> = ToolRegistry::new();
        for name in ["zeta", "alpha", "mid"] {
            registry
                .register(ToolDescriptor::new(name, name), |_a, _s| Ok(json!(null)))
                .unwrap();
        }
        assert_eq!(registry.names(), vec!["zeta", "alpha", "mid"]);
        let defs = registry.definitions();
        assert_eq!(defs[0].name, "zeta");
        assert_eq!(defs[2].name, "mid");
    }
}
