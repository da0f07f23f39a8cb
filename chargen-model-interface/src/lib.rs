use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
  #[error("model source unavailable")]
  SourceUnavailable {
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },

  #[error("model manifest could not be decoded")]
  BadManifest {
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },

  #[error("sampling request failed")]
  SampleFailure {
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },

  #[error("sample response could not be decoded")]
  BadSampleResponse {
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },

  #[error("model service rejected the request: {status} {reason}")]
  Rejected { status: u16, reason: String },
}

/// A pretrained generative model living outside the process.
///
/// A source identifier is whatever locates one pretrained model for the
/// backend, for instance the URL a model is served under.
#[async_trait::async_trait]
pub trait GenerativeModel: Send + Sync + Sized {
  /// Resolves a source identifier to a ready model handle.
  async fn load(source: &str) -> Result<Self, ModelError>;

  /// Samples `length` characters of raw text, continuing from `seed`.
  async fn sample(
    &self,
    seed: &str,
    temperature: f32,
    length: u32,
  ) -> Result<String, ModelError>;
}
