//! Tool invocation: lookup, required-argument check, handler call, result folding.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::Mutex;

use serde_json::Value;

use crate::types::{ToolCallResult, ToolDefinition, ToolError, ToolOutcome};

use super::descriptor::Arguments;
use super::registry::ToolRegistry;

/// Runs tools from a fixed registry against one shared store.
///
/// The store lock is held for the whole handler call, so handlers run to
/// completion one at a time. Every outcome comes back as a [`ToolCallResult`];
/// nothing a caller sends can make `invoke` return an error.
pub struct Dispatcher<S> {
    registry: Arc<ToolRegistry<S>>,
    store: Arc<Mutex<S>>,
}

impl<S> Clone for Dispatcher<S> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: Send + 'static> Dispatcher<S> {
    pub fn new(registry: ToolRegistry<S>, store: S) -> Self {
        Self::from_shared(Arc::new(registry), Arc::new(Mutex::new(store)))
    }

    pub fn from_shared(registry: Arc<ToolRegistry<S>>, store: Arc<Mutex<S>>) -> Self {
        Self { registry, store }
    }

    pub fn registry(&self) -> &ToolRegistry<S> {
        &self.registry
    }

    pub fn store(&self) -> &Arc<Mutex<S>> {
        &self.store
    }

    /// Invoke `name` with an already-decoded argument map.
    pub async fn invoke(&self, name: &str, args: Arguments) -> ToolCallResult {
        tracing::debug!("Invoking tool {name} with {} argument(s)", args.len());

        match self.run(name, &args).await {
            Ok(value) => ToolCallResult::from_value(value),
            Err(e) => {
                tracing::warn!("Tool {name} failed: {e}");
                ToolCallResult::error(e.to_string())
            }
        }
    }

    /// Invoke `name` with arguments straight off the wire.
    ///
    /// Missing or `null` arguments count as an empty map.
    pub async fn invoke_value(&self, name: &str, arguments: Option<Value>) -> ToolCallResult {
        match arguments {
            None | Some(Value::Null) => self.invoke(name, Arguments::new()).await,
            Some(Value::Object(map)) => self.invoke(name, map).await,
            Some(other) => {
                let err = ToolError::InvalidArguments(format!(
                    "arguments must be a JSON object, got {}",
                    json_kind(&other)
                ));
                tracing::warn!("Tool {name} failed: {err}");
                ToolCallResult::error(err.to_string())
            }
        }
    }

    async fn run(&self, name: &str, args: &Arguments) -> ToolOutcome {
        let tool = self.registry.lookup(name)?;

        if let Some(missing) = tool.descriptor.first_missing(args) {
            return Err(ToolError::MissingArgument(missing.to_string()));
        }

        let mut store = self.store.lock().await;
        (tool.handler)(args, &mut *store)
    }
}

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Object-safe view of a dispatcher, independent of its store type.
///
/// The protocol handler, transports, and REPL talk to tools through this.
pub trait ToolService: Send + Sync {
    fn definitions(&self) -> Vec<ToolDefinition>;

    fn call<'a>(&'a self, name: &'a str, arguments: Option<Value>) -> BoxFuture<'a, ToolCallResult>;
}

impl<S: Send + 'static> ToolService for Dispatcher<S> {
    fn definitions(&self) -> Vec<ToolDefinition> {
        self.registry.definitions()
    }

    fn call<'a>(
        &'a self,
        name: &'a str,
        arguments: Option<Value>,
    ) -> BoxFuture<'a, ToolCallResult> {
        Box::pin(self.invoke_value(name, arguments))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::descriptor::{ParamSpec, ParamType, ToolDescriptor};
    use serde_json::json;
    use tooldesk::DeskError;

    /// Store that counts handler runs.
    #[derive(Default)]
    struct Counter {
        calls: u32,
    }

    fn dispatcher() -> Dispatcher<Counter> {
        let mut registry = ToolRegistry::new();
        registry
            .register(
                ToolDescriptor::new("echo", "Echo a message")
                    .param(ParamSpec::required("message", ParamType::String, "Text")),
                |args, store: &mut Counter| {
                    store.calls += 1;
                    Ok(args["message"].clone())
                },
            )
            .unwrap();
        registry
            .register(
                ToolDescriptor::new("pair", "Needs two things")
                    .param(ParamSpec::required("left", ParamType::Integer, "Left"))
                    .param(ParamSpec::required("right", ParamType::Integer, "Right")),
                |args, _store: &mut Counter| Ok(json!([args["left"], args["right"]])),
            )
            .unwrap();
        registry
            .register(
                ToolDescriptor::new("fail", "Always fails"),
                |_args, _store: &mut Counter| Err(DeskError::TicketNotFound("T-X".into()).into()),
            )
            .unwrap();
        Dispatcher::new(registry, Counter::default())
    }

    fn args(value: Value) -> Arguments {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[tokio::test]
    async fn test_success_wraps_string_as_text() {
        let d = dispatcher();
        let result = d.invoke("echo", args(json!({"message": "hi"}))).await;
        assert_eq!(result, ToolCallResult::text("hi"));
        assert_eq!(d.store().lock().await.calls, 1);
    }

    #[tokio::test]
    async fn test_structured_result_is_compact_json() {
        let d = dispatcher();
        let result = d.invoke("pair", args(json!({"left": 1, "right": 2}))).await;
        assert_eq!(result.joined_text(), "[1,2]");
    }

    #[tokio::test]
    async fn test_unknown_tool_is_failure() {
        let d = dispatcher();
        let result = d.invoke("missing", Arguments::new()).await;
        assert_eq!(result, ToolCallResult::error("Unknown tool: missing"));
    }

    #[tokio::test]
    async fn test_each_required_argument_is_checked() {
        let d = dispatcher();
        let result = d.invoke("pair", args(json!({"right": 2}))).await;
        assert_eq!(result, ToolCallResult::error("left is required"));
        let result = d.invoke("pair", args(json!({"left": 1}))).await;
        assert_eq!(result, ToolCallResult::error("right is required"));
    }

    #[tokio::test]
    async fn test_missing_argument_does_not_run_handler() {
        let d = dispatcher();
        let result = d.invoke("echo", Arguments::new()).await;
        assert_eq!(result, ToolCallResult::error("message is required"));
        assert_eq!(d.store().lock().await.calls, 0);
    }

    #[tokio::test]
    async fn test_domain_error_becomes_failure() {
        let d = dispatcher();
        let result = d.invoke("fail", Arguments::new()).await;
        assert_eq!(
            result,
            ToolCallResult::error("No ticket found with ID: T-X")
        );
    }

    #[tokio::test]
    async fn test_invoke_value_argument_shapes() {
        let d = dispatcher();
        let result = d.invoke_value("echo", None).await;
        assert_eq!(result, ToolCallResult::error("message is required"));

        let result = d.invoke_value("echo", Some(Value::Null)).await;
        assert!(result.is_error());

        let result = d.invoke_value("echo", Some(json!(["hi"]))).await;
        assert_eq!(
            result,
            ToolCallResult::error("Invalid arguments: arguments must be a JSON object, got array")
        );

        let result = d.invoke_value("echo", Some(json!({"message": "ok"}))).await;
        assert_eq!(result, ToolCallResult::text("ok"));
    }

    #[tokio::test]
    async fn test_tool_service_object() {
        let service: Arc<dyn ToolService> = Arc::new(dispatcher());
        let names: Vec<String> = service.definitions().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["echo", "pair", "fail"]);

        let result = service.call("echo", Some(json!({"message": "via trait"}))).await;
        assert_eq!(result, ToolCallResult::text("via trait"));
    }
}
