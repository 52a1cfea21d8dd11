//! Document tree model consumed by the translator.
//!
//! The tree mirrors the shape of a docutils doctree: text leaves and typed
//! elements carrying an attribute mapping and ordered children. It
//! deserializes from a JSON form where a text leaf is a plain string and an
//! element is `{"tagname": ..., "attributes": {...}, "children": [...]}`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Type tag of a doctree element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    /// Document root.
    Document,
    /// Section container.
    Section,
    /// Section, document, or table title.
    Title,
    /// Document subtitle.
    Subtitle,
    /// Paragraph.
    Paragraph,
    /// Emphasized inline text.
    Emphasis,
    /// Strongly emphasized inline text.
    Strong,
    /// Inline literal.
    Literal,
    /// Bullet list.
    BulletList,
    /// Enumerated list.
    EnumeratedList,
    /// Item of a bullet or enumerated list.
    ListItem,
    /// Hyperlink reference.
    Reference,
    /// Literal (code) block.
    LiteralBlock,
    /// Table.
    Table,
    /// Table row.
    Row,
    /// Table entry (cell).
    Entry,
    /// Transition (thematic break).
    Transition,
    /// Image.
    Image,
    /// Block quote.
    BlockQuote,
    /// Definition list.
    DefinitionList,
    /// Item of a definition list.
    DefinitionListItem,
    /// Term of a definition list item.
    Term,
    /// Definition of a definition list item.
    Definition,
    /// Hyperlink target.
    Target,
    /// Substitution definition.
    SubstitutionDefinition,
    /// Comment.
    Comment,
    /// Parser diagnostic.
    SystemMessage,
    /// Any tag outside the recognized vocabulary.
    Other(String),
}

impl NodeKind {
    /// Maps a doctree tag name to its kind.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "document" => NodeKind::Document,
            "section" => NodeKind::Section,
            "title" => NodeKind::Title,
            "subtitle" => NodeKind::Subtitle,
            "paragraph" => NodeKind::Paragraph,
            "emphasis" => NodeKind::Emphasis,
            "strong" => NodeKind::Strong,
            "literal" => NodeKind::Literal,
            "bullet_list" => NodeKind::BulletList,
            "enumerated_list" => NodeKind::EnumeratedList,
            "list_item" => NodeKind::ListItem,
            "reference" => NodeKind::Reference,
            "literal_block" => NodeKind::LiteralBlock,
            "table" => NodeKind::Table,
            "row" => NodeKind::Row,
            "entry" => NodeKind::Entry,
            "transition" => NodeKind::Transition,
            "image" => NodeKind::Image,
            "block_quote" => NodeKind::BlockQuote,
            "definition_list" => NodeKind::DefinitionList,
            "definition_list_item" => NodeKind::DefinitionListItem,
            "term" => NodeKind::Term,
            "definition" => NodeKind::Definition,
            "target" => NodeKind::Target,
            "substitution_definition" => NodeKind::SubstitutionDefinition,
            "comment" => NodeKind::Comment,
            "system_message" => NodeKind::SystemMessage,
            other => NodeKind::Other(other.to_string()),
        }
    }

    /// Returns the doctree tag name.
    pub fn as_str(&self) -> &str {
        match self {
            NodeKind::Document => "document",
            NodeKind::Section => "section",
            NodeKind::Title => "title",
            NodeKind::Subtitle => "subtitle",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Emphasis => "emphasis",
            NodeKind::Strong => "strong",
            NodeKind::Literal => "literal",
            NodeKind::BulletList => "bullet_list",
            NodeKind::EnumeratedList => "enumerated_list",
            NodeKind::ListItem => "list_item",
            NodeKind::Reference => "reference",
            NodeKind::LiteralBlock => "literal_block",
            NodeKind::Table => "table",
            NodeKind::Row => "row",
            NodeKind::Entry => "entry",
            NodeKind::Transition => "transition",
            NodeKind::Image => "image",
            NodeKind::BlockQuote => "block_quote",
            NodeKind::DefinitionList => "definition_list",
            NodeKind::DefinitionListItem => "definition_list_item",
            NodeKind::Term => "term",
            NodeKind::Definition => "definition",
            NodeKind::Target => "target",
            NodeKind::SubstitutionDefinition => "substitution_definition",
            NodeKind::Comment => "comment",
            NodeKind::SystemMessage => "system_message",
            NodeKind::Other(tag) => tag,
        }
    }
}

impl From<String> for NodeKind {
    fn from(tag: String) -> Self {
        NodeKind::from_tag(&tag)
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An attribute value attached to an element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// Boolean-like presence flag.
    Bool(bool),
    /// Integer value (e.g. `morecols`).
    Int(i64),
    /// Plain string value.
    Str(String),
    /// List of strings (e.g. `classes`, `names`).
    List(Vec<String>),
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Str(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Str(value)
    }
}

impl From<Vec<String>> for AttrValue {
    fn from(value: Vec<String>) -> Self {
        AttrValue::List(value)
    }
}

impl<const N: usize> From<[&str; N]> for AttrValue {
    fn from(value: [&str; N]) -> Self {
        AttrValue::List(value.iter().map(|s| s.to_string()).collect())
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

/// Attribute mapping of an element, keyed by attribute name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(BTreeMap<String, AttrValue>);

impl Attributes {
    /// Creates an empty attribute mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) {
        self.0.insert(name.into(), value.into());
    }

    /// Returns true if the attribute is present.
    ///
    /// Empty lists count as absent, matching how docutils treats its
    /// list-valued defaults (`classes`, `names`, ...).
    pub fn has(&self, name: &str) -> bool {
        match self.0.get(name) {
            Some(AttrValue::List(items)) => !items.is_empty(),
            Some(_) => true,
            None => false,
        }
    }

    /// Returns the raw attribute value.
    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.0.get(name)
    }

    /// Returns a string attribute.
    ///
    /// A single-item list is accepted as well, since some serializers emit
    /// scalar attributes as one-element lists.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self.0.get(name)? {
            AttrValue::Str(value) => Some(value),
            AttrValue::List(items) if items.len() == 1 => Some(&items[0]),
            _ => None,
        }
    }

    /// Returns a list attribute. A plain string is treated as a single item.
    pub fn get_list(&self, name: &str) -> Vec<&str> {
        match self.0.get(name) {
            Some(AttrValue::List(items)) => items.iter().map(String::as_str).collect(),
            Some(AttrValue::Str(value)) => vec![value.as_str()],
            _ => Vec::new(),
        }
    }

    /// Returns a non-negative integer attribute, parsing strings if needed.
    pub fn get_usize(&self, name: &str) -> Option<usize> {
        match self.0.get(name)? {
            AttrValue::Int(value) => usize::try_from(*value).ok(),
            AttrValue::Str(value) => value.trim().parse().ok(),
            _ => None,
        }
    }

    /// Returns true if `class` is listed in the `classes` attribute.
    pub fn contains_class(&self, class: &str) -> bool {
        self.get_list("classes").contains(&class)
    }

    /// Iterates over all attributes in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &AttrValue)> {
        self.0.iter()
    }
}

/// A typed doctree element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// Type tag.
    #[serde(rename = "tagname")]
    pub kind: NodeKind,
    /// Attribute mapping.
    #[serde(default, skip_serializing_if = "attributes_are_empty")]
    pub attributes: Attributes,
    /// Ordered children.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

fn attributes_are_empty(attributes: &Attributes) -> bool {
    attributes.0.is_empty()
}

impl Element {
    /// Creates an element without attributes or children.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            attributes: Attributes::new(),
            children: Vec::new(),
        }
    }

    /// Adds an attribute (builder style).
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(name, value);
        self
    }

    /// Appends a child (builder style).
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Appends several children (builder style).
    pub fn with_children<I, N>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Plain-text content of this element's subtree.
    pub fn astext(&self) -> String {
        let mut text = String::new();
        for child in &self.children {
            child.collect_text(&mut text);
        }
        text
    }
}

/// A doctree node: either a text leaf or an element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    /// Literal text leaf.
    Text(String),
    /// Typed element.
    Element(Element),
}

impl Node {
    /// Creates a text leaf.
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text(value.into())
    }

    /// Creates an element node from a kind and its children.
    pub fn element<I, N>(kind: NodeKind, children: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        Node::Element(Element::new(kind).with_children(children))
    }

    /// Returns the element, if this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    /// Returns the node's children (always empty for text leaves).
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element(element) => &element.children,
            Node::Text(_) => &[],
        }
    }

    /// Plain-text rendering of the subtree, ignoring all markup.
    pub fn astext(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, buffer: &mut String) {
        match self {
            Node::Text(value) => buffer.push_str(value),
            Node::Element(element) => {
                for child in &element.children {
                    child.collect_text(buffer);
                }
            }
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::Text(value.to_string())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::Text(value)
    }
}
