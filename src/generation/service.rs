//! End-to-end generation: validate, enhance, build, call the provider.

use super::builder::{build_call, extract_media_url, OutputKind, ProviderOutput};
use super::error::GenerationError;
use super::prompt::enhance_prompt;
use super::request::{GenerateRequestBody, GenerationRequest};
use crate::fal::FalClient;

/// Runs generation requests against fal.ai.
///
/// Holds no mutable state; one instance is shared by every request the
/// server handles. `client` is `None` when no credential was configured, in
/// which case every valid request fails with `MissingCredential`.
#[derive(Debug, Clone)]
pub struct GenerationService {
    client: Option<FalClient>,
}

impl GenerationService {
    pub fn new(client: Option<FalClient>) -> Self {
        Self { client }
    }

    /// Whether a provider credential is available.
    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    /// Validate a request body, run the matching model and return the media URL.
    ///
    /// Validation errors are returned before the provider is contacted.
    pub async fn generate(&self, body: GenerateRequestBody) -> Result<String, GenerationError> {
        let request = GenerationRequest::try_from(body)?;
        self.generate_validated(&request).await
    }

    /// Run an already-validated request.
    pub async fn generate_validated(
        &self,
        request: &GenerationRequest,
    ) -> Result<String, GenerationError> {
        let client = self.client.as_ref().ok_or_else(|| {
            log::error!("Generation requested but no fal.ai credential is configured");
            GenerationError::MissingCredential
        })?;

        let prompt = enhance_prompt(request);
        let call = build_call(request, &prompt)?;

        log::info!(
            "Generating {} with model {} ({})",
            request.media_type(),
            call.model,
            request.aspect_ratio().as_str()
        );
        log::debug!("Enhanced prompt: {}", prompt);

        let output = match call.output_kind() {
            OutputKind::Images => ProviderOutput::Images(client.run(call.model, &call.input).await?),
            OutputKind::Video => ProviderOutput::Video(client.run(call.model, &call.input).await?),
        };

        let url = extract_media_url(output)?;
        log::info!("Generation complete: {}", url);
        Ok(url)
    }
}
