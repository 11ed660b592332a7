//! Rendering boundary
//!
//! The renderer walks a finished `ResultTree` in pre-order depth-first
//! display order and emits a stream of colored text-span events to a
//! `RenderSink`. Sinks own the actual formatting (plain, ANSI, markup);
//! the renderer owns line content, indentation, and color assignment.

pub mod ansi;
pub mod html;
pub mod plain;

pub use ansi::AnsiSink;
pub use html::HtmlSink;
pub use plain::PlainSink;

use crate::config::ScanConfig;
use crate::core::types::ScanResult;
use crate::graph::tree::{NodeId, ResultTree};
use std::collections::HashMap;

/// One color from the fixed rotating palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
}

/// The palette, in rotation order
pub const PALETTE: [Color; 6] = [
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
];

impl Color {
    /// ANSI SGR foreground code
    pub fn ansi_code(&self) -> &'static str {
        match self {
            Color::Red => "31",
            Color::Green => "32",
            Color::Yellow => "33",
            Color::Blue => "34",
            Color::Magenta => "35",
            Color::Cyan => "36",
        }
    }

    /// CSS color name for the markup sink
    pub fn css_name(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Yellow => "olive",
            Color::Blue => "blue",
            Color::Magenta => "magenta",
            Color::Cyan => "darkcyan",
        }
    }
}

/// One colored span of text on one output line.
///
/// A line is a sequence of events at the same indent; the event carrying
/// `line_end` closes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderEvent {
    pub indent: usize,
    pub color: Option<Color>,
    pub segments: Vec<String>,
    pub line_end: bool,
}

impl RenderEvent {
    pub fn span(indent: usize, color: Option<Color>, text: impl Into<String>) -> Self {
        RenderEvent {
            indent,
            color,
            segments: vec![text.into()],
            line_end: false,
        }
    }

    pub fn line_end(indent: usize) -> Self {
        RenderEvent {
            indent,
            color: None,
            segments: Vec::new(),
            line_end: true,
        }
    }

    /// Concatenated text of all segments
    pub fn text(&self) -> String {
        self.segments.concat()
    }
}

/// Consumes the renderer's event stream.
///
/// `finish` must be idempotent: the renderer guarantees it is invoked on
/// every exit path, and exactly one invocation takes effect per render.
pub trait RenderSink {
    fn emit(&mut self, event: &RenderEvent) -> ScanResult<()>;
    fn finish(&mut self) -> ScanResult<()>;
}

/// Walks a result tree and produces display events.
pub struct Renderer {
    hex_preview_len: usize,
}

impl Renderer {
    pub fn new(config: &ScanConfig) -> Self {
        Renderer {
            hex_preview_len: config.hex_preview_len,
        }
    }

    /// Renders the tree into `sink`. The sink's `finish` runs exactly once,
    /// even when emission stops early on an error.
    pub fn render<K: RenderSink>(&self, tree: &ResultTree, sink: &mut K) -> ScanResult<()> {
        let emitted = self.emit_tree(tree, sink);
        let finished = sink.finish();
        emitted.and(finished)
    }

    fn emit_tree<K: RenderSink>(&self, tree: &ResultTree, sink: &mut K) -> ScanResult<()> {
        let colors = assign_colors(tree);

        for id in tree.pre_order() {
            let node = tree.node(id);
            let indent = depth_of(tree, id);
            let own_color = colors.get(&id).copied();

            // Back-reference pairing the child line with the parent line
            // that produced it, in the parent's color.
            if let Some(pid) = node.parent {
                let parent = tree.node(pid);
                sink.emit(&RenderEvent::span(indent, None, "("))?;
                sink.emit(&RenderEvent::span(
                    indent,
                    colors.get(&pid).copied(),
                    format!(
                        "{:>3}, {}@{:<3}",
                        parent.discovery_index, parent.address, node.parent_offset
                    ),
                ))?;
                sink.emit(&RenderEvent::span(indent, None, ") <- "))?;
            }

            sink.emit(&RenderEvent::span(
                indent,
                own_color,
                format!("{:>3} {}", node.discovery_index, node.address),
            ))?;

            let mut detail = format!(
                ": {:>5} bytes {} {}",
                node.block.len(),
                node.block.provenance(),
                node.block.hex_preview(self.hex_preview_len)
            );
            if let Some(symbol) = &node.symbol {
                detail.push_str(&format!(" sym {}", symbol));
            }
            if let Some(type_name) = &node.type_name {
                detail.push_str(&format!(" type {}", type_name));
            }
            if !node.strings.is_empty() {
                detail.push_str(&format!(" -- strings: ({})", node.strings.join(", ")));
            }
            sink.emit(&RenderEvent::span(indent, None, detail))?;
            sink.emit(&RenderEvent::line_end(indent))?;
        }
        Ok(())
    }
}

/// Assigns each node that has children the next palette color, in display
/// (pre-order) order. Leaves keep no color of their own.
fn assign_colors(tree: &ResultTree) -> HashMap<NodeId, Color> {
    let mut colors = HashMap::new();
    let mut next = 0usize;
    for id in tree.pre_order() {
        if !tree.node(id).children.is_empty() {
            colors.insert(id, PALETTE[next % PALETTE.len()]);
            next += 1;
        }
    }
    colors
}

/// Indent level: number of ancestors
fn depth_of(tree: &ResultTree, id: NodeId) -> usize {
    let mut depth = 0;
    let mut current = id;
    while let Some(parent) = tree.node(current).parent {
        depth += 1;
        current = parent;
    }
    depth
}
