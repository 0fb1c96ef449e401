//! Request and response types for the chat completions API.

use serde::{Deserialize, Serialize};

/// Chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Role: "system", "user", "assistant"
    pub role: String,

    /// Message content
    pub content: String,
}

impl Message {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// A function tool the model may call.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    /// Tool name (the function name in tool calls)
    pub name: String,

    /// Human-readable description shown to the model
    pub description: String,

    /// JSON schema for the tool arguments
    pub parameters: serde_json::Value,
}

impl ToolDefinition {
    /// Create a new tool definition.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: serde_json::Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }
}

/// Wire format for a tool entry: `{"type": "function", "function": {...}}`.
#[derive(Debug, Clone, Serialize)]
struct ToolSpec<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    function: &'a ToolDefinition,
}

/// Tool choice strategy.
#[derive(Debug, Clone)]
pub enum ToolChoice {
    /// Let the model decide whether to call a tool
    Auto,

    /// Force a call to the named tool
    Tool(String),
}

impl Serialize for ToolChoice {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            ToolChoice::Auto => serializer.serialize_str("auto"),
            ToolChoice::Tool(name) => serde_json::json!({
                "type": "function",
                "function": { "name": name },
            })
            .serialize(serializer),
        }
    }
}

/// Function calling (tool use) request.
#[derive(Debug, Clone)]
pub struct FunctionRequest {
    /// Model to use
    pub model: String,

    /// Conversation messages
    pub messages: Vec<Message>,

    /// Tool definitions
    pub tools: Vec<ToolDefinition>,

    /// Tool choice strategy
    pub tool_choice: ToolChoice,

    /// Sampling temperature (0.0 to 2.0)
    pub temperature: Option<f32>,
}

impl FunctionRequest {
    /// Create a new function request with auto tool choice.
    pub fn new(model: impl Into<String>, messages: Vec<Message>, tools: Vec<ToolDefinition>) -> Self {
        Self {
            model: model.into(),
            messages,
            tools,
            tool_choice: ToolChoice::Auto,
            temperature: None,
        }
    }

    /// Force a call to the named tool.
    pub fn force_tool(mut self, name: impl Into<String>) -> Self {
        self.tool_choice = ToolChoice::Tool(name.into());
        self
    }

    /// Set temperature.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

impl Serialize for FunctionRequest {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let tools: Vec<ToolSpec<'_>> = self
            .tools
            .iter()
            .map(|t| ToolSpec {
                kind: "function",
                function: t,
            })
            .collect();

        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("model", &self.model)?;
        map.serialize_entry("messages", &self.messages)?;
        map.serialize_entry("tools", &tools)?;
        map.serialize_entry("tool_choice", &self.tool_choice)?;
        if let Some(temperature) = self.temperature {
            map.serialize_entry("temperature", &temperature)?;
        }
        map.end()
    }
}

/// A tool call returned by the model.
#[derive(Debug, Clone)]
pub struct ToolInvocation {
    /// Name of the called function
    pub name: String,

    /// Raw JSON arguments string
    pub arguments: String,
}

/// Function calling response.
#[derive(Debug, Clone)]
pub struct FunctionResponse {
    /// Plain assistant content, if any
    pub content: Option<String>,

    /// Tool calls made by the model
    pub tool_calls: Vec<ToolInvocation>,
}

// Raw wire types for internal parsing.

#[derive(Debug, Deserialize)]
pub(crate) struct FunctionResponseRaw {
    pub choices: Vec<FunctionChoiceRaw>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FunctionChoiceRaw {
    pub message: FunctionMessageRaw,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FunctionMessageRaw {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tool_calls: Vec<ToolCallRaw>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ToolCallRaw {
    pub function: ToolCallFunctionRaw,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ToolCallFunctionRaw {
    pub name: String,
    pub arguments: String,
}

impl From<FunctionResponseRaw> for FunctionResponse {
    fn from(raw: FunctionResponseRaw) -> Self {
        let message = raw.choices.into_iter().next().map(|c| c.message);
        match message {
            Some(message) => Self {
                content: message.content,
                tool_calls: message
                    .tool_calls
                    .into_iter()
                    .map(|t| ToolInvocation {
                        name: t.function.name,
                        arguments: t.function.arguments,
                    })
                    .collect(),
            },
            None => Self {
                content: None,
                tool_calls: Vec::new(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors() {
        assert_eq!(Message::system("a").role, "system");
        assert_eq!(Message::user("b").role, "user");
        assert_eq!(Message::assistant("c").role, "assistant");
    }

    #[test]
    fn test_function_request_serialization() {
        let request = FunctionRequest::new(
            "gpt-4o-mini",
            vec![Message::user("hello")],
            vec![ToolDefinition::new(
                "extract_insights",
                "Extract insights",
                serde_json::json!({"type": "object"}),
            )],
        )
        .force_tool("extract_insights");

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "gpt-4o-mini");
        assert_eq!(value["tools"][0]["type"], "function");
        assert_eq!(value["tools"][0]["function"]["name"], "extract_insights");
        assert_eq!(value["tool_choice"]["function"]["name"], "extract_insights");
        assert!(value.get("temperature").is_none());
    }

    #[test]
    fn test_auto_tool_choice_serializes_as_string() {
        let request = FunctionRequest::new("gpt-4o-mini", vec![], vec![]);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["tool_choice"], "auto");
    }

    #[test]
    fn test_function_response_from_raw() {
        let raw: FunctionResponseRaw = serde_json::from_str(
            r#"{
                "choices": [{
                    "message": {
                        "content": null,
                        "tool_calls": [{
                            "id": "call_1",
                            "type": "function",
                            "function": {"name": "extract_insights", "arguments": "{\"insights\":[]}"}
                        }]
                    }
                }]
            }"#,
        )
        .unwrap();

        let response = FunctionResponse::from(raw);
        assert_eq!(response.tool_calls.len(), 1);
        assert_eq!(response.tool_calls[0].name, "extract_insights");
        assert!(response.content.is_none());
    }

    #[test]
    fn test_function_response_without_tool_calls() {
        let raw: FunctionResponseRaw =
            serde_json::from_str(r#"{"choices": [{"message": {"content": "hi"}}]}"#).unwrap();
        let response = FunctionResponse::from(raw);
        assert!(response.tool_calls.is_empty());
        assert_eq!(response.content.as_deref(), Some("hi"));
    }
}
