#![forbid(unsafe_code)]

//! Tab descriptors and tab strip props.

use serde::{Deserialize, Serialize};

/// One navigable tab.
///
/// Decorations are stateless slots: the strip reports them but never
/// renders or animates them. A loading tab stays navigable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TabDescriptor {
    label: String,
    #[serde(rename = "to", alias = "destination")]
    destination: String,
    icon: Option<String>,
    is_beta: bool,
    is_loading: bool,
    right_content: Option<String>,
}

impl TabDescriptor {
    /// Create a tab linking to `destination`.
    #[must_use]
    pub fn new(label: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            destination: destination.into(),
            ..Self::default()
        }
    }

    /// Set an icon identifier.
    #[must_use]
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Mark the tab with a beta badge.
    #[must_use]
    pub fn beta(mut self, is_beta: bool) -> Self {
        self.is_beta = is_beta;
        self
    }

    /// Show a loading indicator next to the label.
    #[must_use]
    pub fn loading(mut self, is_loading: bool) -> Self {
        self.is_loading = is_loading;
        self
    }

    /// Trailing content after the label (a count, for example).
    #[must_use]
    pub fn right_content(mut self, content: impl Into<String>) -> Self {
        self.right_content = Some(content.into());
        self
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn destination(&self) -> &str {
        &self.destination
    }

    #[must_use]
    pub fn icon_name(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    #[must_use]
    pub const fn is_beta(&self) -> bool {
        self.is_beta
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    #[must_use]
    pub fn trailing(&self) -> Option<&str> {
        self.right_content.as_deref()
    }
}

/// Mount-time properties of a tab strip.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TabStripProps {
    pub tabs: Vec<TabDescriptor>,
    pub class_name: Option<String>,
    /// Single label shown in place of the strip when there are no tabs.
    pub heading: Option<String>,
}

impl TabStripProps {
    #[must_use]
    pub fn new(tabs: impl IntoIterator<Item = TabDescriptor>) -> Self {
        Self {
            tabs: tabs.into_iter().collect(),
            class_name: None,
            heading: None,
        }
    }

    /// A strip with no tabs that shows one label.
    #[must_use]
    pub fn single_label(label: impl Into<String>) -> Self {
        Self::new([]).heading(label)
    }

    #[must_use]
    pub fn heading(mut self, label: impl Into<String>) -> Self {
        self.heading = Some(label.into());
        self
    }

    #[must_use]
    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_decorations() {
        let tab = TabDescriptor::new("Builds", "/builds")
            .icon("hammer")
            .beta(true)
            .loading(true)
            .right_content("12");
        assert_eq!(tab.label(), "Builds");
        assert_eq!(tab.destination(), "/builds");
        assert_eq!(tab.icon_name(), Some("hammer"));
        assert!(tab.is_beta());
        assert!(tab.is_loading());
        assert_eq!(tab.trailing(), Some("12"));
    }

    #[test]
    fn props_deserialize_with_link_field() {
        let props: TabStripProps = serde_json::from_str(
            r#"{"tabs":[{"label":"Overview","to":"/"},{"label":"Logs","to":"/logs","is_loading":true}],"class_name":"nav"}"#,
        )
        .expect("props parse");
        assert_eq!(props.tabs.len(), 2);
        assert_eq!(props.tabs[1].destination(), "/logs");
        assert!(props.tabs[1].is_loading());
        assert!(!props.tabs[0].is_beta());
        assert_eq!(props.class_name.as_deref(), Some("nav"));
        assert_eq!(props.heading, None);
    }

    #[test]
    fn single_label_has_no_tabs() {
        let props = TabStripProps::single_label("Conversations");
        assert!(props.tabs.is_empty());
        assert_eq!(props.heading.as_deref(), Some("Conversations"));
    }
}
