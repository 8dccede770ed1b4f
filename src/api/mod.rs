//! Backend gateway: the automation webhooks behind stages 2 through 5.
//!
//! [`Gateway::call`] is the only required method. It POSTs a JSON payload to a
//! stage's endpoint and hands back the parsed JSON body, or a [`GatewayError`].
//! The typed stage operations are layered on top of it, so a test double only
//! has to implement `call`.

pub mod dto;
pub mod error;
mod webhook;

pub use dto::{
    CreateScriptRequest, CreateScriptResponse, GenerateImagesRequest, GenerateImagesResponse,
    InitializeProjectRequest, InitializeProjectResponse, PrepareMediaRequest,
    PrepareMediaResponse,
};
pub use error::GatewayError;
pub use webhook::WebhookGateway;

use std::fmt;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// The four fixed webhook endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    InitializeProject,
    CreateScript,
    PrepareMedia,
    GenerateImages,
}

impl Endpoint {
    pub fn all() -> &'static [Endpoint] {
        &[
            Endpoint::InitializeProject,
            Endpoint::CreateScript,
            Endpoint::PrepareMedia,
            Endpoint::GenerateImages,
        ]
    }

    /// Config key for this endpoint
    pub fn key(self) -> &'static str {
        match self {
            Endpoint::InitializeProject => "initialize_project",
            Endpoint::CreateScript => "create_script",
            Endpoint::PrepareMedia => "prepare_media",
            Endpoint::GenerateImages => "generate_images",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Endpoint::InitializeProject => "initialize project",
            Endpoint::CreateScript => "create script",
            Endpoint::PrepareMedia => "prepare media",
            Endpoint::GenerateImages => "generate images",
        };
        f.write_str(name)
    }
}

/// Calls into the automation backend.
///
/// Delivery is at most once: no retries, no timeout. Implementations must turn
/// every transport problem into a `GatewayError` rather than panicking.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// POST `payload` to `endpoint` and return the JSON response body
    async fn call(&self, endpoint: Endpoint, payload: Value) -> Result<Value, GatewayError>;

    async fn initialize_project(
        &self,
        request: &InitializeProjectRequest,
    ) -> Result<InitializeProjectResponse, GatewayError> {
        call_typed(self, Endpoint::InitializeProject, request).await
    }

    async fn create_script(
        &self,
        request: &CreateScriptRequest,
    ) -> Result<CreateScriptResponse, GatewayError> {
        call_typed(self, Endpoint::CreateScript, request).await
    }

    async fn prepare_media(
        &self,
        request: &PrepareMediaRequest,
    ) -> Result<PrepareMediaResponse, GatewayError> {
        call_typed(self, Endpoint::PrepareMedia, request).await
    }

    async fn generate_images(
        &self,
        request: &GenerateImagesRequest,
    ) -> Result<GenerateImagesResponse, GatewayError> {
        call_typed(self, Endpoint::GenerateImages, request).await
    }
}

/// Encode the request, call, and decode the response body as `Resp`.
///
/// Responses must be JSON objects; anything else counts as malformed.
async fn call_typed<G, Req, Resp>(
    gateway: &G,
    endpoint: Endpoint,
    request: &Req,
) -> Result<Resp, GatewayError>
where
    G: Gateway + ?Sized,
    Req: Serialize + Sync,
    Resp: DeserializeOwned,
{
    let payload =
        serde_json::to_value(request).map_err(|e| GatewayError::encode(endpoint, e.to_string()))?;

    let data = gateway.call(endpoint, payload).await?;
    if !data.is_object() {
        return Err(GatewayError::malformed(
            endpoint,
            "expected a JSON object body",
        ));
    }

    serde_json::from_value(data).map_err(|e| GatewayError::malformed(endpoint, e.to_string()))
}
