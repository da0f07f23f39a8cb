use std::time::Duration;

use chargen_model_interface::{GenerativeModel, ModelError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct ModelManifest {
  pub name: String,
  pub vocab_size: usize,
}

#[derive(Serialize)]
struct SampleRequestBody<'a> {
  seed: &'a str,
  temperature: f32,
  length: u32,
}

#[derive(Deserialize)]
struct SampleResponseBody {
  sample: String,
}

/// Client for a char-rnn model served over HTTP: the manifest lives at the
/// model URL, sampling at `{url}/generate`.
pub struct CharRnnModel {
  http: reqwest::Client,
  base_url: String,
  manifest: ModelManifest,
}

impl CharRnnModel {
  pub fn name(&self) -> &str {
    &self.manifest.name
  }

  pub fn vocab_size(&self) -> usize {
    self.manifest.vocab_size
  }
}

#[async_trait::async_trait]
impl GenerativeModel for CharRnnModel {
  async fn load(source: &str) -> Result<CharRnnModel, ModelError> {
    let http = reqwest::Client::builder()
      .timeout(Duration::from_secs(300))
      .build()
      .map_err(|e| ModelError::SourceUnavailable { source: Box::new(e) })?;

    let base_url = source.trim_end_matches('/').to_string();

    log::info!("Fetching model manifest from '{}'", base_url);

    let response = http
      .get(&base_url)
      .send()
      .await
      .map_err(|e| ModelError::SourceUnavailable { source: Box::new(e) })?;

    let status = response.status();
    if !status.is_success() {
      return Err(ModelError::Rejected {
        status: status.as_u16(),
        reason: response.text().await.unwrap_or_default(),
      });
    }

    let manifest: ModelManifest = response
      .json()
      .await
      .map_err(|e| ModelError::BadManifest { source: Box::new(e) })?;

    log::debug!(
      "Model '{}' is up with a vocabulary of {} characters",
      manifest.name,
      manifest.vocab_size
    );

    Ok(CharRnnModel {
      http,
      base_url,
      manifest,
    })
  }

  async fn sample(
    &self,
    seed: &str,
    temperature: f32,
    length: u32,
  ) -> Result<String, ModelError> {
    let body = SampleRequestBody {
      seed,
      temperature,
      length,
    };

    let response = self
      .http
      .post(format!("{}/generate", self.base_url))
      .json(&body)
      .send()
      .await
      .map_err(|e| ModelError::SampleFailure { source: Box::new(e) })?;

    let status = response.status();
    if !status.is_success() {
      return Err(ModelError::Rejected {
        status: status.as_u16(),
        reason: response.text().await.unwrap_or_default(),
      });
    }

    let body: SampleResponseBody = response
      .json()
      .await
      .map_err(|e| ModelError::BadSampleResponse { source: Box::new(e) })?;

    Ok(body.sample)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn manifest_decodes() {
    let manifest: ModelManifest =
      serde_json::from_str(r#"{"name":"poblaciones","vocab_size":58}"#).unwrap();

    assert_eq!(manifest.name, "poblaciones");
    assert_eq!(manifest.vocab_size, 58);
  }

  #[test]
  fn manifest_tolerates_extra_fields() {
    let manifest: ModelManifest =
      serde_json::from_str(r#"{"name":"poblaciones","vocab_size":58,"layers":2}"#).unwrap();

    assert_eq!(manifest.name, "poblaciones");
  }

  #[test]
  fn sample_request_encodes_all_fields() {
    let body = SampleRequestBody {
      seed: "B",
      temperature: 0.5,
      length: 250,
    };

    let encoded = serde_json::to_value(&body).unwrap();
    assert_eq!(
      encoded,
      serde_json::json!({"seed": "B", "temperature": 0.5, "length": 250})
    );
  }

  #[test]
  fn sample_response_decodes() {
    let body: SampleResponseBody = serde_json::from_str(r#"{"sample":"Ba\nBb\n"}"#).unwrap();
    assert_eq!(body.sample, "Ba\nBb\n");
  }

  #[test]
  fn exposes_manifest_metadata() {
    let model = CharRnnModel {
      http: reqwest::Client::new(),
      base_url: "http://localhost:8090/models/poblaciones".to_string(),
      manifest: ModelManifest {
        name: "poblaciones".to_string(),
        vocab_size: 58,
      },
    };

    assert_eq!(model.name(), "poblaciones");
    assert_eq!(model.vocab_size(), 58);
  }
}
