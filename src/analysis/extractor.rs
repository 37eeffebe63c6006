use crate::manifest::{Element, ManifestTree};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Value used when an element omits `android:name`
pub const NOT_AVAILABLE: &str = "N/A";

/// Kind of a declared application component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ComponentKind {
    Activity,
    Service,
    Receiver,
}

impl ComponentKind {
    /// Manifest tag declaring this kind of component
    pub fn tag(&self) -> &'static str {
        match self {
            ComponentKind::Activity => "activity",
            ComponentKind::Service => "service",
            ComponentKind::Receiver => "receiver",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ComponentKind::Activity => "Activity",
            ComponentKind::Service => "Service",
            ComponentKind::Receiver => "Receiver",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// An `<intent-filter>` declared directly on a component
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntentFilter {
    pub actions: Vec<String>,
    pub categories: Vec<String>,
}

/// An activity, service or receiver declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Component {
    pub kind: ComponentKind,
    pub name: String,
    pub exported: bool,
    /// Only collected for activities
    pub intents: Vec<IntentFilter>,
}

impl Component {
    pub fn has_intent_filters(&self) -> bool {
        !self.intents.is_empty()
    }
}

/// Everything the classifier needs from a manifest, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestData {
    pub permissions: Vec<String>,
    pub activities: Vec<Component>,
    pub services: Vec<Component>,
    pub receivers: Vec<Component>,
}

/// Look up an `android:` attribute, falling back to `default` when absent
pub fn android_attr<'a>(element: &'a Element, name: &str, default: &'a str) -> &'a str {
    element.android_attribute(name).unwrap_or(default)
}

/// Walks a manifest tree and collects permissions and components
pub struct Extractor;

impl Extractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract all declarations. Never fails: missing attributes take their defaults.
    pub fn extract(&self, tree: &ManifestTree) -> ManifestData {
        let root = tree.root();

        let permissions = root
            .descendants("uses-permission")
            .map(|perm| android_attr(perm, "name", NOT_AVAILABLE).to_string())
            .collect();

        let data = ManifestData {
            permissions,
            activities: self.components(root, ComponentKind::Activity),
            services: self.components(root, ComponentKind::Service),
            receivers: self.components(root, ComponentKind::Receiver),
        };

        debug!(
            "Extracted {} permissions, {} activities, {} services, {} receivers",
            data.permissions.len(),
            data.activities.len(),
            data.services.len(),
            data.receivers.len()
        );

        data
    }

    fn components(&self, root: &Element, kind: ComponentKind) -> Vec<Component> {
        root.descendants(kind.tag())
            .map(|element| {
                let intents = match kind {
                    ComponentKind::Activity => self.intent_filters(element),
                    ComponentKind::Service | ComponentKind::Receiver => Vec::new(),
                };

                Component {
                    kind,
                    name: android_attr(element, "name", NOT_AVAILABLE).to_string(),
                    exported: is_exported(element),
                    intents,
                }
            })
            .collect()
    }

    fn intent_filters(&self, component: &Element) -> Vec<IntentFilter> {
        component
            .children_named("intent-filter")
            .map(|filter| IntentFilter {
                actions: child_names(filter, "action"),
                categories: child_names(filter, "category"),
            })
            .collect()
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

fn child_names(parent: &Element, tag: &str) -> Vec<String> {
    parent
        .children_named(tag)
        .map(|child| android_attr(child, "name", NOT_AVAILABLE).to_string())
        .collect()
}

/// Only the literal `"true"` marks a component as exported
fn is_exported(element: &Element) -> bool {
    let value = android_attr(element, "exported", "false");
    if value != "true" && value != "false" {
        debug!(
            "Treating android:exported=\"{}\" on <{}> as false",
            value, element.name
        );
    }
    value == "true"
}
