use super::extractor::{Component, ComponentKind, IntentFilter, ManifestData};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Permissions that grant access to user data, device control or messaging
pub const SENSITIVE_PERMISSIONS: [&str; 13] = [
    "android.permission.INTERNET",
    "android.permission.READ_EXTERNAL_STORAGE",
    "android.permission.WRITE_EXTERNAL_STORAGE",
    "android.permission.ACCESS_FINE_LOCATION",
    "android.permission.ACCESS_COARSE_LOCATION",
    "android.permission.SEND_SMS",
    "android.permission.READ_SMS",
    "android.permission.CALL_PHONE",
    "android.permission.READ_CALL_LOG",
    "android.permission.RECORD_AUDIO",
    "android.permission.CAMERA",
    "android.permission.READ_CONTACTS",
    "android.permission.WRITE_CONTACTS",
];

pub fn is_sensitive(permission: &str) -> bool {
    SENSITIVE_PERMISSIONS.contains(&permission)
}

/// A permission with its position in the final listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumberedPermission {
    pub number: usize,
    pub name: String,
    pub critical: bool,
}

impl fmt::Display for NumberedPermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number, self.name)
    }
}

/// Declared permissions, critical ones first.
///
/// Numbering starts at 1 and runs continuously from the critical block into
/// the non-critical block. Duplicates keep one entry per occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PermissionReport {
    entries: Vec<NumberedPermission>,
}

impl PermissionReport {
    pub fn classify(permissions: &[String]) -> Self {
        let (critical, non_critical): (Vec<&String>, Vec<&String>) =
            permissions.iter().partition(|perm| is_sensitive(perm));

        let entries = critical
            .into_iter()
            .map(|name| (name, true))
            .chain(non_critical.into_iter().map(|name| (name, false)))
            .enumerate()
            .map(|(i, (name, critical))| NumberedPermission {
                number: i + 1,
                name: name.clone(),
                critical,
            })
            .collect();

        Self { entries }
    }

    /// Full listing in display order
    pub fn entries(&self) -> &[NumberedPermission] {
        &self.entries
    }

    pub fn critical(&self) -> impl Iterator<Item = &NumberedPermission> {
        self.entries.iter().filter(|p| p.critical)
    }

    pub fn non_critical(&self) -> impl Iterator<Item = &NumberedPermission> {
        self.entries.iter().filter(|p| !p.critical)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Display emphasis of a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Explicitly exported, reachable by any app
    Exported,
    /// Not exported but declares intent filters
    HasEntryPoints,
    Neutral,
}

impl Priority {
    pub fn of(component: &Component) -> Self {
        Self::from_flags(component.exported, component.has_intent_filters())
    }

    pub fn from_flags(exported: bool, has_intents: bool) -> Self {
        match (exported, has_intents) {
            (true, _) => Priority::Exported,
            (false, true) => Priority::HasEntryPoints,
            (false, false) => Priority::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Exported => "exported",
            Priority::HasEntryPoints => "has_entry_points",
            Priority::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A component paired with its priority. List order is never changed by priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedComponent {
    pub kind: ComponentKind,
    pub name: String,
    pub exported: bool,
    pub intents: Vec<IntentFilter>,
    pub priority: Priority,
}

impl From<Component> for ClassifiedComponent {
    fn from(component: Component) -> Self {
        let priority = Priority::of(&component);
        Self {
            kind: component.kind,
            name: component.name,
            exported: component.exported,
            intents: component.intents,
            priority,
        }
    }
}

/// Classified view of a manifest, ready for rendering
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ManifestReport {
    pub permissions: PermissionReport,
    pub activities: Vec<ClassifiedComponent>,
    pub services: Vec<ClassifiedComponent>,
    pub receivers: Vec<ClassifiedComponent>,
}

impl ManifestReport {
    /// Component lists paired with their section title, in report order
    pub fn component_sections(&self) -> [(&'static str, &[ClassifiedComponent]); 3] {
        [
            ("Activities", self.activities.as_slice()),
            ("Services", self.services.as_slice()),
            ("Broadcast Receivers", self.receivers.as_slice()),
        ]
    }
}

/// Applies the permission and component rules to extracted data
pub struct Classifier;

impl Classifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, data: ManifestData) -> ManifestReport {
        let permissions = PermissionReport::classify(&data.permissions);
        debug!(
            "Classified {} permissions ({} critical)",
            permissions.len(),
            permissions.critical().count()
        );

        ManifestReport {
            permissions,
            activities: data.activities.into_iter().map(Into::into).collect(),
            services: data.services.into_iter().map(Into::into).collect(),
            receivers: data.receivers.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}
