use serde::Serialize;

/// Label shown for nodes whose own label is empty.
pub const EMPTY_LABEL_PLACEHOLDER: &str = "<treeview empty>";

/// Opaque URI-like reference to the content a node represents.
///
/// The model never interprets it. Producers commonly append an index as a
/// `#<index>` fragment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Locator(String);

impl Locator {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw locator text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Text after the last `#`, if any.
    pub fn fragment(&self) -> Option<&str> {
        self.0.rsplit_once('#').map(|(_, fragment)| fragment)
    }
}

impl From<&str> for Locator {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Locator {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Symbolic icon resolved by the renderer's theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Icon {
    pub id: String,
}

impl Icon {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Action the renderer invokes when the node is selected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Command {
    pub command: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<serde_json::Value>,
}

impl Command {
    /// Command with no tooltip and no arguments.
    pub fn new(command: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            title: title.into(),
            tooltip: None,
            arguments: Vec::new(),
        }
    }

    /// Hover text shown by the renderer.
    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    pub fn with_argument(mut self, argument: serde_json::Value) -> Self {
        self.arguments.push(argument);
        self
    }
}

/// Expand affordance derived from a node's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CollapsibleState {
    /// Leaf row, no expand affordance.
    #[default]
    None,
    /// Has children, initially collapsed.
    Collapsed,
}

impl CollapsibleState {
    /// `Collapsed` when the node has children, `None` otherwise.
    pub fn from_child_count(count: usize) -> Self {
        if count > 0 {
            Self::Collapsed
        } else {
            Self::None
        }
    }

    /// Whether the renderer shows an expand affordance.
    pub fn is_expandable(self) -> bool {
        matches!(self, Self::Collapsed)
    }
}

/// Presentation descriptor returned by
/// [`TreeDataProvider::tree_item`](crate::TreeDataProvider::tree_item).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeItem {
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<Command>,
    pub collapsible_state: CollapsibleState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
}
