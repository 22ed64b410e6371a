//! Raw video frame input.

use crate::error::AnalysisError;

/// A single decoded video frame in packed RGB order, 8 bits per channel.
#[derive(Debug, Clone)]
pub struct Frame {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl Frame {
    /// Build a frame, rejecting payloads that cannot be RGB at the declared
    /// dimensions.
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Result<Self, AnalysisError> {
        let frame = Self {
            data,
            width,
            height,
        };
        frame.validate()?;
        Ok(frame)
    }

    /// Re-check the payload against the declared dimensions. Fields are
    /// public, so the engine validates again at its entry points.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.data.is_empty() {
            return Err(AnalysisError::EmptyFrame);
        }
        // Saturate on overflow: no payload can reach such a byte count, so
        // the mismatch branch below still rejects.
        let expected = (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|pixels| pixels.checked_mul(3))
            .unwrap_or(usize::MAX);
        if self.data.len() != expected {
            return Err(AnalysisError::FrameGeometry {
                len: self.data.len(),
                expected,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}
