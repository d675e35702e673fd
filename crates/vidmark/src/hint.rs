//! Render hints: instructions for the downstream renderer.
//!
//! A [`RenderHint`] attached to a directive replaces that directive's default
//! rendering with an explicit element: tag name, ordered properties and child
//! content.

/// Rendering override attached to a directive node.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RenderHint {
    /// Tag to render the node as.
    pub tag_name: String,
    /// Properties of the rendered element.
    pub properties: Properties,
    /// Replacement content.
    pub children: Vec<HintNode>,
}

/// Content inside a render hint.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", content = "value", rename_all = "camelCase"))]
pub enum HintNode {
    /// Nested element.
    Element(Element),
    /// Text, escaped by the renderer.
    Text(String),
    /// Markup emitted verbatim by the renderer.
    Raw(String),
}

/// Element inside a render hint.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Element {
    /// Tag name.
    pub tag_name: String,
    /// Element properties.
    pub properties: Properties,
    /// Child content.
    pub children: Vec<HintNode>,
}

impl Element {
    /// Create an element with no properties or children.
    #[must_use]
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            properties: Properties::new(),
            children: Vec::new(),
        }
    }

    /// Set a property.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.properties.set(name, value);
        self
    }

    /// Replace the children.
    #[must_use]
    pub fn with_children(mut self, children: Vec<HintNode>) -> Self {
        self.children = children;
        self
    }
}

impl From<Element> for HintNode {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

/// Property value.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum PropValue {
    /// String value: `name="value"`.
    Str(String),
    /// Boolean value: bare `name` when true, omitted when false.
    Bool(bool),
}

impl PropValue {
    /// String payload, if this is a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            Self::Bool(_) => None,
        }
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Insertion-ordered property map.
///
/// Setting an existing name replaces its value in place, so the rendered
/// attribute order follows first insertion.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Properties(Vec<(String, PropValue)>);

impl Properties {
    /// Create an empty property map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property, keeping its position if already present.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<PropValue>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == name) {
            Some((_, slot)) => *slot = value,
            None => self.0.push((name, value)),
        }
    }

    /// Remove a property, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<PropValue> {
        let idx = self.0.iter().position(|(k, _)| k == name)?;
        Some(self.0.remove(idx).1)
    }

    /// Get a property value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PropValue> {
        self.0.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    /// Get a string property value.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(PropValue::as_str)
    }

    /// Iterate over properties in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
