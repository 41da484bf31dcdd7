#![forbid(unsafe_code)]

//! Keep-mounted tab content.
//!
//! [`TabPanels`] loads the content of every tab once, when it is mounted, and
//! never unmounts it afterwards. Switching tabs only changes which panel is
//! visible, so panel-local state (scroll position, form input) survives.
//!
//! # Invariants
//!
//! 1. Each distinct destination is loaded exactly once.
//! 2. Loaded content is never dropped while the panels live.
//! 3. When at least one panel exists, exactly one is visible.

use crate::route::RouteMatcher;
use crate::tab::TabDescriptor;

/// Produces the content for a tab key.
pub trait ContentLoader<C> {
    fn load(&mut self, key: &str) -> C;
}

impl<C, F> ContentLoader<C> for F
where
    F: FnMut(&str) -> C,
{
    fn load(&mut self, key: &str) -> C {
        self(key)
    }
}

/// One mounted panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panel<'a, C> {
    pub key: &'a str,
    pub content: &'a C,
    pub visible: bool,
}

/// Mounted panels keyed by tab destination, in tab order.
#[derive(Debug)]
pub struct TabPanels<C, L> {
    loader: L,
    mounted: Vec<(String, C)>,
    active: usize,
}

impl<C, L: ContentLoader<C>> TabPanels<C, L> {
    /// Load the content of every tab. The first tab starts visible.
    ///
    /// Tabs sharing a destination share one panel.
    #[must_use]
    pub fn mount(tabs: &[TabDescriptor], loader: L) -> Self {
        let mut panels = Self {
            loader,
            mounted: Vec::with_capacity(tabs.len()),
            active: 0,
        };
        panels.extend(tabs);
        panels
    }

    /// Mount tabs that are not mounted yet. Returns how many were loaded.
    ///
    /// Already mounted panels keep their content and the active panel is
    /// unchanged.
    pub fn extend(&mut self, tabs: &[TabDescriptor]) -> usize {
        let before = self.mounted.len();
        for tab in tabs {
            let key = tab.destination();
            if self.position(key).is_none() {
                let content = self.loader.load(key);
                self.mounted.push((key.to_owned(), content));
            }
        }
        let loaded = self.mounted.len() - before;
        tracing::debug!(
            message = "tab_panels.mount",
            loaded,
            total = self.mounted.len()
        );
        loaded
    }

    /// Show the panel for `key`. Unknown keys leave the visible panel as is.
    pub fn activate(&mut self, key: &str) -> Option<&C> {
        let index = self.position(key)?;
        if index != self.active {
            tracing::debug!(
                message = "tab_panels.activate",
                key,
                previous = self.mounted[self.active].0.as_str()
            );
            self.active = index;
        }
        Some(&self.mounted[index].1)
    }

    /// Show the panel whose destination the matcher accepts.
    ///
    /// When several destinations match (a prefix matcher accepts both
    /// `/runs` and `/runs/logs` on `/runs/logs/7`), the longest wins. With no
    /// match the visible panel is unchanged and `None` is returned.
    pub fn sync_with_route(&mut self, matcher: &dyn RouteMatcher) -> Option<&C> {
        let index = self
            .mounted
            .iter()
            .enumerate()
            .filter(|(_, (key, _))| matcher.is_active(key))
            .max_by_key(|(_, (key, _))| key.len())
            .map(|(index, _)| index)?;
        let key = self.mounted[index].0.clone();
        self.activate(&key)
    }

    #[must_use]
    pub fn active_key(&self) -> Option<&str> {
        self.mounted.get(self.active).map(|(key, _)| key.as_str())
    }

    #[must_use]
    pub fn active(&self) -> Option<&C> {
        self.mounted.get(self.active).map(|(_, content)| content)
    }

    pub fn active_mut(&mut self) -> Option<&mut C> {
        self.mounted.get_mut(self.active).map(|(_, content)| content)
    }

    /// Content of the panel for `key`, visible or not.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&C> {
        self.position(key).map(|index| &self.mounted[index].1)
    }

    #[must_use]
    pub fn is_mounted(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.mounted.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mounted.is_empty()
    }

    /// Every mounted panel in tab order.
    pub fn panels(&self) -> impl Iterator<Item = Panel<'_, C>> {
        self.mounted
            .iter()
            .enumerate()
            .map(move |(index, (key, content))| Panel {
                key,
                content,
                visible: index == self.active,
            })
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.mounted.iter().position(|(mounted, _)| mounted == key)
    }
}
