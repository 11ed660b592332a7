//! Plain-text sink: indentation and text only, colors ignored

use super::{RenderEvent, RenderSink};
use crate::core::types::ScanResult;
use std::io::Write;

/// Writes uncolored lines to any `io::Write`
pub struct PlainSink<W: Write> {
    writer: W,
    at_line_start: bool,
    finished: bool,
}

impl<W: Write> PlainSink<W> {
    pub fn new(writer: W) -> Self {
        PlainSink {
            writer,
            at_line_start: true,
            finished: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RenderSink for PlainSink<W> {
    fn emit(&mut self, event: &RenderEvent) -> ScanResult<()> {
        if event.line_end {
            writeln!(self.writer)?;
            self.at_line_start = true;
            return Ok(());
        }
        if self.at_line_start {
            write!(self.writer, "{}", "  ".repeat(event.indent))?;
            self.at_line_start = false;
        }
        for segment in &event.segments {
            write!(self.writer, "{}", segment)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> ScanResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.writer.flush()?;
        Ok(())
    }
}
