//! Per-session conversion state
//!
//! A session holds at most one selected input and at most one finished
//! package. Selecting a new input or resetting releases the previous package.

use crate::config::PackagerConfig;
use crate::error::{Result, ScormError};
use crate::input::InputArtifact;
use crate::repackager::{OutputPackage, Repackager};

/// Explicit replacement for the "current file / current download" globals of a UI
#[derive(Debug, Default)]
pub struct ConversionSession {
    repackager: Repackager,
    input: Option<InputArtifact>,
    output: Option<OutputPackage>,
}

impl ConversionSession {
    /// Start an empty session; fails if `config` does not validate
    pub fn new(config: PackagerConfig) -> Result<Self> {
        Ok(Self {
            repackager: Repackager::new(config)?,
            input: None,
            output: None,
        })
    }

    /// Select a new input, discarding any previous package
    pub fn select(&mut self, input: InputArtifact) {
        self.release_output();
        tracing::debug!(name = %input.name(), kind = %input.kind(), "input selected");
        self.input = Some(input);
    }

    /// Convert the selected input
    ///
    /// On failure the session holds no package; the error is logged with full
    /// detail and returned for the caller to show via `user_message`.
    pub fn convert(&mut self) -> Result<&OutputPackage> {
        self.release_output();
        let input = self.input.as_ref().ok_or(ScormError::NoInputSelected)?;

        match self.repackager.repackage(input) {
            Ok(package) => Ok(self.output.insert(package)),
            Err(err) => {
                tracing::error!(name = %input.name(), error = %err, "conversion failed");
                Err(err)
            }
        }
    }

    pub fn input(&self) -> Option<&InputArtifact> {
        self.input.as_ref()
    }

    pub fn output(&self) -> Option<&OutputPackage> {
        self.output.as_ref()
    }

    /// Take the finished package out of the session
    pub fn take_output(&mut self) -> Option<OutputPackage> {
        self.output.take()
    }

    /// Forget both input and output
    pub fn reset(&mut self) {
        self.release_output();
        self.input = None;
    }

    fn release_output(&mut self) {
        if let Some(previous) = self.output.take() {
            tracing::debug!(file = %previous.file_name, "released previous package");
        }
    }
}
