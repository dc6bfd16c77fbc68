//! Writer events - the input of the tagspool writer.
//!
//! This is a SAX-style event model: one event per structural step, with
//! start/end pairs bracketing element content. The writer consumes them
//! in order and never looks further ahead than the next event.
//!
//! An element `<node id="1">text</node>` is fed as:
//! ```text
//! StartElement(Tag { name: "node", attributes: [id="1"] })
//! CharData { text: "text" }
//! EndElement { name: "node" }
//! ```
//!
//! A childless element may instead be fed as one `CompleteElement`, which
//! renders as `<node id="1"/>`.

use std::borrow::Cow;

/// A single `name="value"` pair on a tag.
///
/// The value is unescaped text; the writer escapes it on output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute<'a> {
    pub name: Cow<'a, str>,
    pub value: Cow<'a, str>,
}

impl<'a> Attribute<'a> {
    pub fn new(name: impl Into<Cow<'a, str>>, value: impl Into<Cow<'a, str>>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn into_owned(self) -> Attribute<'static> {
        Attribute {
            name: Cow::Owned(self.name.into_owned()),
            value: Cow::Owned(self.value.into_owned()),
        }
    }
}

impl<'a> From<(&'a str, &'a str)> for Attribute<'a> {
    fn from((name, value): (&'a str, &'a str)) -> Self {
        Self::new(name, value)
    }
}

/// Element name plus its ordered attributes.
///
/// Attributes are unique by name: setting an existing name replaces the
/// value in place, keeping the original position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag<'a> {
    pub name: Cow<'a, str>,
    pub attributes: Vec<Attribute<'a>>,
}

impl<'a> Tag<'a> {
    /// Create a tag with no attributes.
    pub fn new(name: impl Into<Cow<'a, str>>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    /// Builder form of [`set_attribute`](Self::set_attribute).
    #[must_use]
    pub fn with_attribute(
        mut self,
        name: impl Into<Cow<'a, str>>,
        value: impl Into<Cow<'a, str>>,
    ) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Set an attribute, replacing the value if the name is already present.
    pub fn set_attribute(&mut self, name: impl Into<Cow<'a, str>>, value: impl Into<Cow<'a, str>>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|attr| attr.name == name) {
            Some(existing) => existing.value = value,
            None => self.attributes.push(Attribute { name, value }),
        }
    }

    /// Look up an attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| &*attr.value)
    }

    pub fn into_owned(self) -> Tag<'static> {
        Tag {
            name: Cow::Owned(self.name.into_owned()),
            attributes: self.attributes.into_iter().map(Attribute::into_owned).collect(),
        }
    }
}

/// Writer input events.
///
/// The lifetime `'a` lets callers hand over borrowed names and text;
/// the writer copies only what it must keep across events (open tags).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<'a> {
    // ========== Structure Events ==========

    /// Element start: `<name attr="v">`
    ///
    /// Opens a frame. The opening tag is not written until the element's
    /// first child arrives or the element ends.
    StartElement(Tag<'a>),

    /// Element end: `</name>`
    ///
    /// Always closes the innermost open element. The name is only checked
    /// when the writer runs with strict end names.
    EndElement {
        name: Cow<'a, str>,
    },

    /// Self-closing element: `<name attr="v"/>`
    ///
    /// Never opens a frame.
    CompleteElement(Tag<'a>),

    // ========== Content Events ==========

    /// Character data, unescaped.
    CharData {
        text: Cow<'a, str>,
    },
}

impl<'a> Event<'a> {
    pub fn start(tag: Tag<'a>) -> Self {
        Event::StartElement(tag)
    }

    pub fn end(name: impl Into<Cow<'a, str>>) -> Self {
        Event::EndElement { name: name.into() }
    }

    pub fn complete(tag: Tag<'a>) -> Self {
        Event::CompleteElement(tag)
    }

    pub fn text(text: impl Into<Cow<'a, str>>) -> Self {
        Event::CharData { text: text.into() }
    }

    /// Element name carried by this event (None for character data).
    pub fn name(&self) -> Option<&str> {
        match self {
            Event::StartElement(tag) | Event::CompleteElement(tag) => Some(&*tag.name),
            Event::EndElement { name } => Some(&**name),
            Event::CharData { .. } => None,
        }
    }

    /// Check if this is a structure start event (has matching end).
    pub fn is_structure_start(&self) -> bool {
        matches!(self, Event::StartElement(_))
    }

    pub fn into_owned(self) -> Event<'static> {
        match self {
            Event::StartElement(tag) => Event::StartElement(tag.into_owned()),
            Event::EndElement { name } => Event::EndElement {
                name: Cow::Owned(name.into_owned()),
            },
            Event::CompleteElement(tag) => Event::CompleteElement(tag.into_owned()),
            Event::CharData { text } => Event::CharData {
                text: Cow::Owned(text.into_owned()),
            },
        }
    }
}
