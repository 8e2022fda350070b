//! crates/edustream_core/src/ports.rs
//!
//! Defines the service contract for the remote generative-language API.
//! The trait forms the boundary of the hexagonal architecture, so the assistant
//! logic can be exercised against an in-memory double instead of the network.

use async_trait::async_trait;
use serde_json::{json, Map, Value};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    /// No credential or client is configured for the remote service.
    #[error("Service unavailable: {0}")]
    Unavailable(String),
    #[error("Transport failure: {0}")]
    Transport(String),
    #[error("Request timed out after {0} ms")]
    Timeout(u128),
    /// The response did not match the requested shape.
    #[error("Schema violation: {0}")]
    Schema(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Response Shape Constraints
//=========================================================================================

/// A subset of JSON schema, enough to describe the shapes the assistant asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaType {
    String,
    Array(Box<SchemaType>),
    Object {
        properties: Vec<(String, SchemaType)>,
        required: Vec<String>,
    },
}

impl SchemaType {
    pub fn array_of(items: SchemaType) -> Self {
        SchemaType::Array(Box::new(items))
    }

    /// Renders the shape as a JSON schema document.
    pub fn to_json_schema(&self) -> Value {
        match self {
            SchemaType::String => json!({ "type": "string" }),
            SchemaType::Array(items) => json!({
                "type": "array",
                "items": items.to_json_schema(),
            }),
            SchemaType::Object { properties, required } => {
                let mut props = Map::new();
                for (name, ty) in properties {
                    props.insert(name.clone(), ty.to_json_schema());
                }
                json!({
                    "type": "object",
                    "properties": Value::Object(props),
                    "required": required,
                })
            }
        }
    }
}

/// A named response shape the remote service must honour.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseSchema {
    pub name: String,
    pub root: SchemaType,
}

impl ResponseSchema {
    pub fn new(name: impl Into<String>, root: SchemaType) -> Self {
        Self { name: name.into(), root }
    }
}

/// A single request/response completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    /// When set, the response text must be JSON matching this shape.
    pub response_schema: Option<ResponseSchema>,
}

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Sends one prompt and returns the raw response text.
    async fn complete(&self, request: CompletionRequest) -> PortResult<String>;
}
