//! Renderer output.
//!
//! The simulation core only produces angles; whatever draws them sits
//! behind [`HandRenderer`]. Angles are unbounded degrees, clockwise
//! positive. A renderer may reduce them modulo 360 itself.

use std::io::Write;

use serde::Serialize;
use tracing::info;

use crate::error::DriverError;

/// Real angles of all hands after one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HandFrame {
    /// Tick counter, starting at 1.
    pub tick: u64,
    /// Second hand [deg].
    pub second: f64,
    /// Minute hand [deg].
    pub minute: f64,
    /// Hour hand [deg].
    pub hour: f64,
}

/// Consumes one frame per tick.
pub trait HandRenderer {
    /// Draw one frame.
    ///
    /// # Errors
    /// [`DriverError::Render`] when the sink cannot accept the frame.
    fn render(&mut self, frame: &HandFrame) -> Result<(), DriverError>;

    /// Flush buffered output. Called once when the driver stops.
    fn finish(&mut self) -> Result<(), DriverError> {
        Ok(())
    }
}

impl<R: HandRenderer + ?Sized> HandRenderer for Box<R> {
    fn render(&mut self, frame: &HandFrame) -> Result<(), DriverError> {
        (**self).render(frame)
    }

    fn finish(&mut self) -> Result<(), DriverError> {
        (**self).finish()
    }
}

/// Writes one JSON object per frame and line.
#[derive(Debug)]
pub struct JsonLinesRenderer<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesRenderer<W> {
    /// Wrap a writer.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> HandRenderer for JsonLinesRenderer<W> {
    fn render(&mut self, frame: &HandFrame) -> Result<(), DriverError> {
        serde_json::to_writer(&mut self.out, frame)
            .map_err(|e| DriverError::Render(e.to_string()))?;
        self.out
            .write_all(b"\n")
            .map_err(|e| DriverError::Render(e.to_string()))
    }

    fn finish(&mut self) -> Result<(), DriverError> {
        self.out
            .flush()
            .map_err(|e| DriverError::Render(e.to_string()))
    }
}

/// Emits frames through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogRenderer;

impl HandRenderer for LogRenderer {
    fn render(&mut self, frame: &HandFrame) -> Result<(), DriverError> {
        info!(
            tick = frame.tick,
            "sec={:8.3} min={:8.3} hour={:8.3}",
            frame.second,
            frame.minute,
            frame.hour
        );
        Ok(())
    }
}

/// Discards frames.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl HandRenderer for NullRenderer {
    fn render(&mut self, _frame: &HandFrame) -> Result<(), DriverError> {
        Ok(())
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
