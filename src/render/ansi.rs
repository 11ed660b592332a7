//! ANSI terminal sink: colored spans via SGR escape sequences

use super::{RenderEvent, RenderSink};
use crate::core::types::ScanResult;
use std::io::Write;

const RESET: &str = "\x1b[39m";

/// Writes colored lines to a terminal-like `io::Write`
pub struct AnsiSink<W: Write> {
    writer: W,
    at_line_start: bool,
    finished: bool,
}

impl<W: Write> AnsiSink<W> {
    pub fn new(writer: W) -> Self {
        AnsiSink {
            writer,
            at_line_start: true,
            finished: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RenderSink for AnsiSink<W> {
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
        if let Some(color) = event.color {
            write!(self.writer, "\x1b[{}m", color.ansi_code())?;
        }
        for segment in &event.segments {
            write!(self.writer, "{}", segment)?;
        }
        if event.color.is_some() {
            write!(self.writer, "{}", RESET)?;
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
