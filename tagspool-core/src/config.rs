//! Writer configuration.

use std::collections::BTreeSet;

/// Root element name whose children are written one after another with no
/// newline or indent between them.
pub const DEFAULT_FLOW_ELEMENT: &str = "osm";

/// Options controlling [`MarkupWriter`](crate::MarkupWriter) output.
///
/// # Examples
///
/// ```
/// use tagspool_core::WriterConfig;
///
/// let config = WriterConfig::default()
///     .flow_element("feed")
///     .strict_end_names(true);
/// assert!(config.is_flow("osm"));
/// assert!(config.is_flow("feed"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WriterConfig {
    /// Elements whose direct children are never preceded by a newline and
    /// indent, and whose closing tags are not either.
    ///
    /// Only the immediate parent is consulted: grandchildren of a flow
    /// element are indented normally. Defaults to `{"osm"}`.
    pub flow_elements: BTreeSet<String>,
    /// Reject an `EndElement` whose name differs from the innermost open
    /// element. Defaults to `false`, in which case the name is ignored.
    pub strict_end_names: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            flow_elements: BTreeSet::from([DEFAULT_FLOW_ELEMENT.to_string()]),
            strict_end_names: false,
        }
    }
}

impl WriterConfig {
    /// Adds `name` to the flow element set.
    #[must_use]
    pub fn flow_element(mut self, name: &str) -> Self {
        self.flow_elements.insert(name.to_string());
        self
    }

    /// Clears the flow element set, including the default `osm` entry, so
    /// every nested element is indented.
    #[must_use]
    pub fn no_flow_elements(mut self) -> Self {
        self.flow_elements.clear();
        self
    }

    /// Enables or disables end-name checking.
    #[must_use]
    pub fn strict_end_names(mut self, strict: bool) -> Self {
        self.strict_end_names = strict;
        self
    }

    /// Whether children of `name` skip indentation.
    #[inline]
    pub fn is_flow(&self, name: &str) -> bool {
        self.flow_elements.contains(name)
    }
}
