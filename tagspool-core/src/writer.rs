//! Deferred-flush markup writer.
//!
//! An opening tag cannot be written the moment its `StartElement` arrives:
//! how the element is laid out depends on what comes next. The writer keeps
//! a stack of open elements and writes each opening tag lazily, exactly
//! once, at the point something has to be written inside it.
//!
//! # Frame lifecycle
//!
//! ```text
//! StartElement ──push──▶ Pending ──child or text──▶ Open ──EndElement──▶ popped
//!                           │                                             ▲
//!                           └────────────EndElement (empty)───────────────┘
//! ```
//!
//! - Pending → Open writes `<name attrs>` and raises the indent level.
//! - Closing an Open frame lowers the indent level, then writes `</name>`.
//! - Closing a Pending frame writes `<name attrs></name>` in one burst;
//!   empty elements are never collapsed to `<name/>`.
//!
//! # Indentation
//!
//! A newline plus one tab per level is written before a `CompleteElement`,
//! before an empty element, and before the closing tag of an element that
//! had element children, whenever the indent level is non-zero. It is
//! suppressed when the current innermost open element is a flow element
//! (see [`WriterConfig::flow_elements`]). Character data is never indented.

use std::borrow::Borrow;
use std::io::Write;

use tracing::{debug, trace, warn};

use crate::config::WriterConfig;
use crate::error::{Result, WriteError};
use crate::escape::escape;
use crate::event::{Event, Tag};

const INDENT_UNIT: u8 = b'\t';

/// Whether a frame's opening tag has reached the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameState {
    Pending,
    Open,
}

/// One open element awaiting its end event.
#[derive(Debug)]
struct Frame {
    tag: Tag<'static>,
    state: FrameState,
    has_element_child: bool,
    has_text_child: bool,
}

impl Frame {
    fn new(tag: Tag<'static>) -> Self {
        Self {
            tag,
            state: FrameState::Pending,
            has_element_child: false,
            has_text_child: false,
        }
    }
}

/// Streaming writer turning [`Event`]s into markup text on any
/// [`std::io::Write`] sink.
///
/// # Examples
///
/// ```
/// use tagspool_core::{Event, MarkupWriter, Tag};
///
/// let mut writer = MarkupWriter::new(Vec::new());
/// writer.write_event(&Event::start(Tag::new("root")))?;
/// writer.write_event(&Event::text("Hello"))?;
/// writer.write_event(&Event::end("root"))?;
/// writer.flush()?;
///
/// assert_eq!(writer.into_inner(), b"<root>Hello</root>");
/// # Ok::<(), tagspool_core::WriteError>(())
/// ```
#[derive(Debug)]
pub struct MarkupWriter<W: Write> {
    sink: W,
    config: WriterConfig,
    stack: Vec<Frame>,
    indent_level: usize,
    /// Scratch buffer so each event reaches the sink as one write.
    buf: Vec<u8>,
}

impl<W: Write> MarkupWriter<W> {
    /// Create a writer with the default configuration.
    pub fn new(sink: W) -> Self {
        Self::with_config(sink, WriterConfig::default())
    }

    pub fn with_config(sink: W, config: WriterConfig) -> Self {
        Self {
            sink,
            config,
            stack: Vec::with_capacity(16),
            indent_level: 0,
            buf: Vec::with_capacity(256),
        }
    }

    /// Write one event.
    ///
    /// On error nothing is rolled back: bytes already accepted by the sink
    /// stay written and the frame stack keeps whatever state it reached.
    pub fn write_event(&mut self, event: &Event<'_>) -> Result<()> {
        match event {
            Event::StartElement(tag) => self.start_element(tag),
            Event::EndElement { name } => self.end_element(Some(&**name)),
            Event::CharData { text } => self.char_data(text),
            Event::CompleteElement(tag) => self.complete_element(tag),
        }
    }

    /// Write events in order, stopping at the first failure.
    pub fn write_events<'e, I>(&mut self, events: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Borrow<Event<'e>>,
    {
        for event in events {
            self.write_event(event.borrow())?;
        }
        Ok(())
    }

    /// Close every element still open, then flush the sink.
    ///
    /// Synthesized ends are never name-checked, even in strict mode.
    pub fn flush(&mut self) -> Result<()> {
        let open = self.stack.len();
        while !self.stack.is_empty() {
            self.end_element(None)?;
        }
        self.sink.flush()?;
        debug!(closed = open, "writer flushed");
        Ok(())
    }

    /// Number of elements currently open.
    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Current indentation depth (number of opening tags written but not
    /// yet closed).
    #[inline]
    pub fn indent_level(&self) -> usize {
        self.indent_level
    }

    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    /// Mutable access to the sink. Writing to it directly bypasses the
    /// writer's bookkeeping.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    /// Unwrap the sink. Open elements are not closed; call
    /// [`flush`](Self::flush) first.
    pub fn into_inner(self) -> W {
        self.sink
    }

    fn start_element(&mut self, tag: &Tag<'_>) -> Result<()> {
        self.flush_pending()?;
        if let Some(parent) = self.stack.last_mut() {
            parent.has_element_child = true;
        }
        self.stack.push(Frame::new(tag.clone().into_owned()));
        Ok(())
    }

    fn char_data(&mut self, text: &str) -> Result<()> {
        self.flush_pending()?;
        if let Some(parent) = self.stack.last_mut() {
            parent.has_text_child = true;
        }
        self.sink.write_all(escape(text).as_bytes())?;
        Ok(())
    }

    fn complete_element(&mut self, tag: &Tag<'_>) -> Result<()> {
        self.flush_pending()?;
        if let Some(parent) = self.stack.last_mut() {
            parent.has_element_child = true;
        }

        self.buf.clear();
        if self.should_indent() {
            push_indent(&mut self.buf, self.indent_level);
        }
        render_tag(&mut self.buf, tag, true);
        self.sink.write_all(&self.buf)?;
        Ok(())
    }

    /// Close the innermost frame. `name` is None for ends synthesized by
    /// [`flush`](Self::flush).
    fn end_element(&mut self, name: Option<&str>) -> Result<()> {
        if self.config.strict_end_names {
            if let (Some(found), Some(top)) = (name, self.stack.last()) {
                if top.tag.name != found {
                    warn!(expected = %top.tag.name, found, "mismatched end element");
                    return Err(WriteError::MismatchedEnd {
                        expected: top.tag.name.to_string(),
                        found: found.to_string(),
                    });
                }
            }
        }

        let Some(frame) = self.stack.pop() else {
            warn!(found = ?name, "end element with no open element");
            return Err(WriteError::Unbalanced);
        };

        self.buf.clear();
        match frame.state {
            FrameState::Pending => {
                // Empty element: opening and closing tag go out together and
                // the indent level is left untouched.
                if self.should_indent() {
                    push_indent(&mut self.buf, self.indent_level);
                }
                render_tag(&mut self.buf, &frame.tag, false);
            }
            FrameState::Open => self.indent_level -= 1,
        }

        if frame.has_element_child && self.should_indent() {
            push_indent(&mut self.buf, self.indent_level);
        }
        self.buf.extend_from_slice(b"</");
        self.buf.extend_from_slice(frame.tag.name.as_bytes());
        self.buf.push(b'>');
        self.sink.write_all(&self.buf)?;

        trace!(
            element = %frame.tag.name,
            element_children = frame.has_element_child,
            text_children = frame.has_text_child,
            "element closed"
        );
        Ok(())
    }

    /// Write the innermost frame's opening tag if it is still pending.
    fn flush_pending(&mut self) -> Result<()> {
        let depth = self.stack.len();
        let Some(frame) = self.stack.last_mut() else {
            return Ok(());
        };
        if frame.state == FrameState::Open {
            return Ok(());
        }

        self.buf.clear();
        render_tag(&mut self.buf, &frame.tag, false);
        self.sink.write_all(&self.buf)?;
        frame.state = FrameState::Open;
        self.indent_level += 1;

        trace!(element = %frame.tag.name, depth, "opening tag flushed");
        Ok(())
    }

    /// Indentation is off under a flow element and at level zero.
    fn should_indent(&self) -> bool {
        match self.stack.last() {
            Some(parent) if self.config.is_flow(&parent.tag.name) => false,
            _ => self.indent_level > 0,
        }
    }
}

fn push_indent(buf: &mut Vec<u8>, level: usize) {
    buf.push(b'\n');
    buf.resize(buf.len() + level, INDENT_UNIT);
}

/// Render `<name a="v" ...>` or, when `self_closing`, `<name a="v" .../>`.
fn render_tag(buf: &mut Vec<u8>, tag: &Tag<'_>, self_closing: bool) {
    buf.push(b'<');
    buf.extend_from_slice(tag.name.as_bytes());
    for attr in &tag.attributes {
        buf.push(b' ');
        buf.extend_from_slice(attr.name.as_bytes());
        buf.extend_from_slice(b"=\"");
        buf.extend_from_slice(escape(&attr.value).as_bytes());
        buf.push(b'"');
    }
    if self_closing {
        buf.push(b'/');
    }
    buf.push(b'>');
}
