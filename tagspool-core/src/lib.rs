//! Tagspool Core Writer
//!
//! Streaming, event-based markup writer. Consumes element/text events one
//! at a time and emits escaped, indented text to any `std::io::Write` sink,
//! deferring each opening tag until its content is known.
//!
//! # Architecture
//!
//! - **event.rs** - Event enum, Tag and Attribute types
//! - **writer.rs** - Deferred-flush writer state machine
//! - **escape.rs** - Character data / attribute value escaping
//! - **config.rs** - Flow element set, strict end-name checking
//! - **error.rs** - WriteError
//!
//! # Example
//!
//! ```
//! use tagspool_core::{Event, MarkupWriter, Tag};
//!
//! let mut writer = MarkupWriter::new(Vec::new());
//! writer.write_events([
//!     Event::start(Tag::new("osm").with_attribute("version", "0.6")),
//!     Event::complete(Tag::new("node").with_attribute("id", "1")),
//!     Event::end("osm"),
//! ])?;
//! writer.flush()?;
//!
//! assert_eq!(
//!     String::from_utf8(writer.into_inner()).unwrap(),
//!     r#"<osm version="0.6"><node id="1"/></osm>"#
//! );
//! # Ok::<(), tagspool_core::WriteError>(())
//! ```

pub mod config;
pub mod error;
pub mod escape;
pub mod event;
pub mod writer;

pub use config::WriterConfig;
pub use error::{Result, WriteError};
pub use escape::{escape, unescape, EscapeError};
pub use event::{Attribute, Event, Tag};
pub use writer::MarkupWriter;
