//! Generation facade
//!
//! Produces requirement blocks, component blocks and architecture
//! suggestions. When a text backend is configured the request is sent there;
//! when it is not, or the backend fails, a deterministic template is used
//! instead. Generation therefore never fails.

use crate::config::GenerationSettings;
use crate::ports::text_backend::{BackendError, CompletionRequest, TextBackend};
use arclang_mcp_domain::generation::fallback;
use arclang_mcp_domain::{GeneratedArtifact, GenerationRequest, PromptTemplate};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Whether a text backend is available. Chosen once at construction.
#[derive(Clone)]
pub enum GenerationCapability {
    Backend(Arc<dyn TextBackend>),
    Fallback,
}

impl GenerationCapability {
    pub fn name(&self) -> &str {
        match self {
            GenerationCapability::Backend(backend) => backend.name(),
            GenerationCapability::Fallback => "fallback-template",
        }
    }
}

impl std::fmt::Debug for GenerationCapability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationCapability::Backend(backend) => {
                f.debug_tuple("Backend").field(&backend.name()).finish()
            }
            GenerationCapability::Fallback => f.write_str("Fallback"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenerationFacade {
    capability: GenerationCapability,
    settings: GenerationSettings,
}

impl GenerationFacade {
    pub fn new(capability: GenerationCapability, settings: GenerationSettings) -> Self {
        info!(capability = capability.name(), "Generation facade ready");
        Self {
            capability,
            settings,
        }
    }

    /// Facade that always uses templates.
    pub fn fallback_only() -> Self {
        Self::new(GenerationCapability::Fallback, GenerationSettings::default())
    }

    pub fn capability(&self) -> &GenerationCapability {
        &self.capability
    }

    pub async fn generate(&self, request: &GenerationRequest) -> GeneratedArtifact {
        let backend = match &self.capability {
            GenerationCapability::Backend(backend) => backend,
            GenerationCapability::Fallback => {
                debug!(kind = ?request.kind(), "No text backend, using template");
                return fallback::generate(request);
            }
        };

        match self.complete(backend.as_ref(), request).await {
            Ok(text) => GeneratedArtifact::backend(request.kind(), text),
            Err(e) => {
                warn!(
                    backend = backend.name(),
                    kind = ?request.kind(),
                    error = %e,
                    "Text backend failed, using template"
                );
                fallback::generate(request)
            }
        }
    }

    async fn complete(
        &self,
        backend: &dyn TextBackend,
        request: &GenerationRequest,
    ) -> Result<String, BackendError> {
        let completion = CompletionRequest {
            model: self.settings.model.clone(),
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
            prompt: PromptTemplate::for_request(request),
        };

        let text = backend.complete(&completion).await?;
        if text.trim().is_empty() {
            return Err(BackendError::EmptyResponse);
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arclang_mcp_domain::{
        ArchitectureRequest, ArtifactKind, ComponentRequest, GenerationMode, RequirementRequest,
    };
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Backend returning a fixed response and recording requests
    struct ScriptedBackend {
        response: Result<String, String>,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl ScriptedBackend {
        fn new(response: Result<&str, &str>) -> Arc<Self> {
            Arc::new(Self {
                response: response.map(str::to_string).map_err(str::to_string),
                requests: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl TextBackend for ScriptedBackend {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn complete(&self, request: &CompletionRequest) -> Result<String, BackendError> {
            self.requests.lock().unwrap().push(request.clone());
            self.response
                .clone()
                .map_err(BackendError::RequestFailed)
        }
    }

    fn requirement(description: &str) -> GenerationRequest {
        GenerationRequest::Requirement(RequirementRequest::new(description))
    }

    #[tokio::test]
    async fn test_fallback_requirement_identifier() {
        let facade = GenerationFacade::fallback_only();
        let artifact = facade
            .generate(&requirement("brake pressure must not exceed limit"))
            .await;

        assert_eq!(artifact.mode, GenerationMode::FallbackTemplate);
        assert_eq!(artifact.identifier.as_deref(), Some("REQ-BP-001"));
        assert_eq!(artifact.content.matches("REQ-BP-001").count(), 1);
    }

    #[tokio::test]
    async fn test_fallback_empty_description() {
        let facade = GenerationFacade::fallback_only();
        for request in [
            requirement(""),
            GenerationRequest::Component(ComponentRequest::new("")),
        ] {
            let artifact = facade.generate(&request).await;
            assert!(artifact.is_fallback());
            assert!(!artifact.content.is_empty());
            let id = artifact.identifier.unwrap();
            assert!(id.contains("GEN"));
            assert_eq!(artifact.content.matches(id.as_str()).count(), 1);
        }
    }

    #[tokio::test]
    async fn test_backend_text_returned_verbatim() {
        let backend = ScriptedBackend::new(Ok("req REQ-BRAKE-001 \"Brake\" {}"));
        let settings = GenerationSettings {
            model: "test-model".to_string(),
            temperature: 0.1,
            max_tokens: 512,
        };
        let facade = GenerationFacade::new(GenerationCapability::Backend(backend.clone()), settings);

        let artifact = facade.generate(&requirement("brake")).await;

        assert_eq!(artifact.mode, GenerationMode::BackendGenerated);
        assert_eq!(artifact.content, "req REQ-BRAKE-001 \"Brake\" {}");
        assert_eq!(artifact.kind, ArtifactKind::Requirement);

        let requests = backend.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].model, "test-model");
        assert_eq!(requests[0].max_tokens, 512);
        assert!(requests[0].prompt.contains("Description: brake"));
    }

    #[tokio::test]
    async fn test_backend_failure_falls_back() {
        let backend = ScriptedBackend::new(Err("connection refused"));
        let facade = GenerationFacade::new(
            GenerationCapability::Backend(backend),
            GenerationSettings::default(),
        );

        let request = GenerationRequest::Architecture(ArchitectureRequest::new(vec![
            "Detect obstacles".to_string(),
        ]));
        let artifact = facade.generate(&request).await;

        assert!(artifact.is_fallback());
        assert_eq!(artifact.kind, ArtifactKind::ArchitectureSuggestion);
        assert!(artifact.content.contains("Sensor Interface"));
    }

    #[tokio::test]
    async fn test_blank_backend_response_falls_back() {
        let backend = ScriptedBackend::new(Ok("   \n"));
        let facade = GenerationFacade::new(
            GenerationCapability::Backend(backend),
            GenerationSettings::default(),
        );

        let artifact = facade.generate(&requirement("coolant flow")).await;
        assert!(artifact.is_fallback());
        assert_eq!(artifact.identifier.as_deref(), Some("REQ-CF-001"));
    }
}
