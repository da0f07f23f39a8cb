use thiserror::Error;

#[derive(Error, Debug)]
pub enum RequestError {
  #[error("seed must not be empty")]
  EmptySeed,

  #[error("temperature {0} is outside the accepted range 0.0..=2.0")]
  TemperatureOutOfRange(f32),

  #[error("length must be at least 1")]
  ZeroLength,
}

/// A single sampling request. Validated on construction and immutable
/// afterwards.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
  seed: String,
  temperature: f32,
  length: u32,
}

impl GenerationRequest {
  pub fn new(seed: &str, temperature: f32, length: u32) -> Result<GenerationRequest, RequestError> {
    if seed.is_empty() {
      return Err(RequestError::EmptySeed);
    }
    // NaN fails the range check as well.
    if !(0.0..=2.0).contains(&temperature) {
      return Err(RequestError::TemperatureOutOfRange(temperature));
    }
    if length == 0 {
      return Err(RequestError::ZeroLength);
    }

    Ok(GenerationRequest {
      seed: seed.to_string(),
      temperature,
      length,
    })
  }

  pub fn seed(&self) -> &str {
    &self.seed
  }

  pub fn temperature(&self) -> f32 {
    self.temperature
  }

  pub fn length(&self) -> u32 {
    self.length
  }
}
