use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

mod lines;
mod request;

use chargen_model_interface::{GenerativeModel, ModelError};
use thiserror::Error;

pub use crate::request::{GenerationRequest, RequestError};

#[derive(Error, Debug)]
pub enum SessionError {
  #[error("model failed to load")]
  ModelLoad {
    #[source]
    source: ModelError,
  },

  #[error("text generation failed")]
  Generation {
    #[source]
    source: ModelError,
  },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
  Idle,
  Busy,
}

/// Lines kept from one sample, in generation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
  lines: Vec<String>,
}

impl GenerationResult {
  fn from_raw(raw: &str) -> GenerationResult {
    GenerationResult {
      lines: lines::trim_sample(raw),
    }
  }

  pub fn lines(&self) -> &[String] {
    &self.lines
  }

  pub fn into_lines(self) -> Vec<String> {
    self.lines
  }
}

/// Gates access to one external generative model: holds the model handle
/// once it is loaded, lets at most one sampling request run at a time, and
/// normalizes raw samples into result lines.
pub struct GenerationSession<Model: GenerativeModel> {
  model: OnceLock<Model>,
  busy: AtomicBool,
}

impl<Model: GenerativeModel> GenerationSession<Model> {
  /// Creates a session with no model yet; requests are ignored until
  /// [`GenerationSession::initialize`] resolves.
  pub fn new() -> GenerationSession<Model> {
    GenerationSession {
      model: OnceLock::new(),
      busy: AtomicBool::new(false),
    }
  }

  /// Wraps an already-loaded model handle in a session that is ready from
  /// the start.
  pub fn from_model(model: Model) -> GenerationSession<Model> {
    let session = GenerationSession::new();
    let _ = session.model.set(model);
    session
  }

  /// Loads the model handle from `source`. On failure the session stays
  /// unready and the call may be retried; once a handle is held it is kept
  /// for the life of the session and later calls are no-ops.
  pub async fn initialize(&self, source: &str) -> Result<(), SessionError> {
    if self.model.get().is_some() {
      log::debug!("Model already loaded, keeping the existing handle");
      return Ok(());
    }

    log::info!("Loading model from '{}'...", source);

    let model = Model::load(source)
      .await
      .map_err(|e| SessionError::ModelLoad { source: e })?;

    // Two initialize calls may race to this point; the first stored handle
    // wins and the other one is dropped.
    if self.model.set(model).is_err() {
      log::debug!("Model was loaded concurrently, dropping the duplicate");
    }

    Ok(())
  }

  /// Runs one sampling request against the model and trims the raw sample
  /// into result lines.
  ///
  /// Returns `Ok(None)` without touching the model when the session is
  /// unready or another request is in flight. Duplicate requests are
  /// ignored rather than queued; at most one sampling call is outstanding
  /// at any time.
  pub async fn generate(
    &self,
    request: &GenerationRequest,
  ) -> Result<Option<GenerationResult>, SessionError> {
    let model = match self.model.get() {
      Some(model) => model,
      None => {
        log::debug!("Ignoring generation request, the model is not loaded yet");
        return Ok(None);
      }
    };

    // The busy flag must be set before the first await point.
    if self
      .busy
      .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
      .is_err()
    {
      log::debug!("Ignoring generation request, another one is in flight");
      return Ok(None);
    }
    let _busy = BusyGuard(&self.busy);

    log::debug!(
      "Sampling {} chars from seed {:?} at temperature {}",
      request.length(),
      request.seed(),
      request.temperature()
    );

    let raw = model
      .sample(request.seed(), request.temperature(), request.length())
      .await
      .map_err(|e| SessionError::Generation { source: e })?;

    let result = GenerationResult::from_raw(&raw);
    log::debug!("Sample trimmed to {} lines", result.lines().len());

    Ok(Some(result))
  }

  /// The loaded model handle, if any. The handle is shared read-only and is
  /// never replaced once set.
  pub fn model(&self) -> Option<&Model> {
    self.model.get()
  }

  pub fn is_ready(&self) -> bool {
    self.model.get().is_some()
  }

  pub fn is_busy(&self) -> bool {
    self.busy.load(Ordering::SeqCst)
  }

  pub fn state(&self) -> SessionState {
    if self.is_busy() {
      SessionState::Busy
    } else {
      SessionState::Idle
    }
  }
}

impl<Model: GenerativeModel> Default for GenerationSession<Model> {
  fn default() -> GenerationSession<Model> {
    GenerationSession::new()
  }
}

// Releases the busy flag when the request resolves, fails, or is dropped
// mid-flight.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
  fn drop(&mut self) {
    self.0.store(false, Ordering::SeqCst);
  }
}
