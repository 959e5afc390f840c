//! CountingPipeline for combining pose inference with the sitting engine.

use crate::config::EngineConfig;
use crate::tracker::{FrameReport, SittingEngine};

use super::KeypointSource;

/// Bundles a `KeypointSource` with a `SittingEngine`.
///
/// One pipeline corresponds to one run: frames must be fed in capture order.
pub struct CountingPipeline<S: KeypointSource> {
    source: S,
    engine: SittingEngine,
}

impl<S: KeypointSource> CountingPipeline<S> {
    /// Create a new counting pipeline with the given source and engine config.
    pub fn new(source: S, config: EngineConfig) -> Self {
        Self {
            source,
            engine: SittingEngine::new(config),
        }
    }

    /// Create a new counting pipeline with default engine configuration.
    pub fn with_default_config(source: S) -> Self {
        Self::new(source, EngineConfig::default())
    }

    /// Run pose inference on one frame and push the detections through the engine.
    ///
    /// # Arguments
    /// * `input` - Raw image bytes
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    pub fn process_frame(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<FrameReport, S::Error> {
        let detections = self.source.detect(input, width, height)?;
        Ok(self.engine.process_frame(&detections))
    }

    /// Distinct people confirmed sitting so far.
    pub fn unique_count(&self) -> usize {
        self.engine.unique_count()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn engine(&self) -> &SittingEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut SittingEngine {
        &mut self.engine
    }
}
