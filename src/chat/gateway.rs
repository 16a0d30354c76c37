use log::{debug, error, info};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::chat::prompts;
use crate::chat::service::{CompletionRequest, CompletionService, ServiceError};
use crate::form::edit::Edit;
use crate::models::resume::{EntryId, ResumeRecord};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("API key not configured. Set llm.api_key in the config file or the API_KEY environment variable.")]
    NotConfigured,

    #[error("generation failed: {0}")]
    GenerationFailed(String),

    #[error("invalid response shape: {0}")]
    InvalidResponseShape(String),

    #[error("no job description provided")]
    EmptyJobDescription,
}

impl GatewayError {
    /// The notice shown to the user at the point of action.
    pub fn user_message(&self) -> String {
        match self {
            GatewayError::NotConfigured => self.to_string(),
            GatewayError::GenerationFailed(_) | GatewayError::InvalidResponseShape(_) => {
                "Failed to generate content from the AI service. Please try again.".to_string()
            }
            GatewayError::EmptyJobDescription => "Please paste a job description first.".to_string(),
        }
    }
}

impl From<ServiceError> for GatewayError {
    fn from(err: ServiceError) -> Self {
        error!("completion service error: {}", err);
        if err.is_credentials() {
            GatewayError::NotConfigured
        } else {
            GatewayError::GenerationFailed(err.to_string())
        }
    }
}

#[derive(Debug, Deserialize)]
struct EnhancedSection {
    #[serde(rename = "enhancedText")]
    enhanced_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EnhancedDescription {
    pub description: String,
}

/// Result of a whole-resume enhancement. `entry_ids` is the experience order
/// the request was built from; descriptions line up with it by position.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedResume {
    pub professional_summary: String,
    pub work_experience: Vec<EnhancedDescription>,
    #[serde(skip)]
    pub entry_ids: Vec<EntryId>,
}

impl EnhancedResume {
    /// The form edit that folds this enhancement into a record. Entries
    /// without a counterpart in the response keep their original description.
    pub fn to_edit(&self) -> Edit {
        let descriptions = self
            .entry_ids
            .iter()
            .zip(&self.work_experience)
            .map(|(id, enhanced)| (id.clone(), enhanced.description.clone()))
            .collect();

        Edit::ApplyResumeEnhancement {
            summary: self.professional_summary.clone(),
            descriptions,
        }
    }

    pub fn unmatched(&self) -> usize {
        self.entry_ids.len().saturating_sub(self.work_experience.len())
    }
}

/// Front door for every AI call. Failed calls are never retried here; the
/// user re-runs the command.
pub struct EnhancementGateway<S: CompletionService> {
    service: S,
}

impl<S: CompletionService> EnhancementGateway<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    pub async fn enhance_section(
        &self,
        original_text: &str,
        guidance: &str,
        section_label: &str,
    ) -> Result<String, GatewayError> {
        info!("enhancing section: {}", section_label);

        let request = CompletionRequest::structured(
            prompts::enhance_section(original_text, guidance, section_label),
            prompts::enhanced_text_schema(),
        );
        let text = self.service.complete(&request).await?;
        let parsed: EnhancedSection = parse_structured(&text)?;

        Ok(parsed.enhanced_text)
    }

    pub async fn enhance_whole_resume(&self, record: &ResumeRecord) -> Result<EnhancedResume, GatewayError> {
        info!(
            "enhancing summary and {} work experience entries",
            record.work_experience.len()
        );

        let request = CompletionRequest::structured(
            prompts::enhance_resume(record),
            prompts::enhanced_resume_schema(),
        );
        let text = self.service.complete(&request).await?;
        let mut enhanced: EnhancedResume = parse_structured(&text)?;
        enhanced.entry_ids = record.work_experience.iter().map(|exp| exp.id.clone()).collect();

        if enhanced.unmatched() > 0 {
            info!(
                "response covered {} of {} entries, keeping originals for the rest",
                enhanced.work_experience.len(),
                enhanced.entry_ids.len()
            );
        }

        Ok(enhanced)
    }

    pub async fn generate_cover_letter(
        &self,
        record: &ResumeRecord,
        job_description: &str,
    ) -> Result<String, GatewayError> {
        if job_description.trim().is_empty() {
            return Err(GatewayError::EmptyJobDescription);
        }

        info!("generating cover letter for {}", record.full_name);
        let request = CompletionRequest::text(prompts::cover_letter(record, job_description));

        Ok(self.service.complete(&request).await?)
    }
}

fn parse_structured<T: DeserializeOwned>(text: &str) -> Result<T, GatewayError> {
    let json = strip_json_fences(text);
    debug!("parsing structured response ({} chars)", json.len());

    serde_json::from_str(json).map_err(|e| GatewayError::InvalidResponseShape(e.to_string()))
}

/// Strips ```json ... ``` or ``` ... ``` fences some models wrap JSON in.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let inner = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"));

    match inner {
        Some(inner) => {
            let inner = inner.trim_start();
            inner.strip_suffix("```").map(str::trim).unwrap_or(inner)
        }
        None => text,
    }
}
