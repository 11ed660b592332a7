//! Markup sink: colored spans inside a wrapping `<pre>` container
//!
//! The container is opened lazily on the first event and closed by
//! `finish`, which the renderer guarantees to call on every exit path.
//! A second `finish` is a no-op, so the container closes exactly once
//! even when a render terminates early.

use super::{RenderEvent, RenderSink};
use crate::core::types::ScanResult;
use std::io::Write;

/// Writes an HTML fragment to any `io::Write`
pub struct HtmlSink<W: Write> {
    writer: W,
    opened: bool,
    at_line_start: bool,
    finished: bool,
}

impl<W: Write> HtmlSink<W> {
    pub fn new(writer: W) -> Self {
        HtmlSink {
            writer,
            opened: false,
            at_line_start: true,
            finished: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn ensure_open(&mut self) -> ScanResult<()> {
        if !self.opened {
            writeln!(self.writer, "<pre class=\"memgraph\">")?;
            self.opened = true;
        }
        Ok(())
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

impl<W: Write> RenderSink for HtmlSink<W> {
    fn emit(&mut self, event: &RenderEvent) -> ScanResult<()> {
        self.ensure_open()?;
        if event.line_end {
            writeln!(self.writer)?;
            self.at_line_start = true;
            return Ok(());
        }
        if self.at_line_start {
            write!(self.writer, "{}", "  ".repeat(event.indent))?;
            self.at_line_start = false;
        }
        match event.color {
            Some(color) => {
                write!(
                    self.writer,
                    "<span style=\"color:{}\">{}</span>",
                    color.css_name(),
                    escape(&event.text())
                )?;
            }
            None => write!(self.writer, "{}", escape(&event.text()))?,
        }
        Ok(())
    }

    fn finish(&mut self) -> ScanResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        if self.opened {
            writeln!(self.writer, "</pre>")?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
