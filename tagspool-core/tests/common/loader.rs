//! Fixture loading from YAML files

use serde::Deserialize;
use std::path::Path;

use tagspool_core::{Event, Tag, WriterConfig};

/// A single test case from a fixture file
#[derive(Debug, Clone, Deserialize)]
pub struct TestCase {
    pub id: String,
    pub desc: String,
    /// Replaces the default flow element set when present
    #[serde(default)]
    pub flow: Option<Vec<String>>,
    #[serde(default)]
    pub strict: bool,
    pub events: Vec<FixtureEvent>,
    /// Exact sink contents after the run (up to the failure, if any)
    pub output: String,
    /// Expected failure: "unbalanced" or "mismatched"
    #[serde(default)]
    pub error: Option<String>,
}

/// Fixture event - `[kind, name-or-text]` or `[kind, name, [[attr, value], ...]]`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FixtureEvent {
    Bare(String, String),
    WithAttrs(String, String, Vec<(String, String)>),
}

impl FixtureEvent {
    pub fn kind(&self) -> &str {
        match self {
            FixtureEvent::Bare(kind, _) => kind,
            FixtureEvent::WithAttrs(kind, _, _) => kind,
        }
    }

    pub fn to_event(&self) -> Event<'static> {
        let (kind, value, attrs) = match self {
            FixtureEvent::Bare(kind, value) => (kind, value, &[][..]),
            FixtureEvent::WithAttrs(kind, value, attrs) => (kind, value, attrs.as_slice()),
        };
        let tag = || {
            attrs.iter().fold(Tag::new(value.clone()), |tag, (name, val)| {
                tag.with_attribute(name.clone(), val.clone())
            })
        };
        match kind.as_str() {
            "start" => Event::start(tag()),
            "end" => Event::end(value.clone()),
            "complete" => Event::complete(tag()),
            "text" => Event::text(value.clone()),
            other => panic!("Unknown fixture event kind {:?}", other),
        }
    }
}

impl TestCase {
    pub fn config(&self) -> WriterConfig {
        let mut config = WriterConfig::default().strict_end_names(self.strict);
        if let Some(flow) = &self.flow {
            config = flow
                .iter()
                .fold(config.no_flow_elements(), |config, name| config.flow_element(name));
        }
        config
    }

    pub fn events(&self) -> Vec<Event<'static>> {
        self.events.iter().map(FixtureEvent::to_event).collect()
    }
}

/// Load all test cases from a YAML fixture file
pub fn load_fixtures(path: &Path) -> Vec<TestCase> {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read fixture file {:?}: {}", path, e));
    serde_yaml::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture file {:?}: {}", path, e))
}

/// Load fixtures from the standard fixtures directory
pub fn load_fixtures_by_name(name: &str) -> Vec<TestCase> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(format!("{}.yaml", name));
    load_fixtures(&path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_basics() {
        let cases = load_fixtures_by_name("basics");
        assert!(!cases.is_empty());
        assert!(cases.iter().any(|c| c.id == "text_only"));
    }
}
