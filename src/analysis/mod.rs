mod classifier;
mod extractor;

pub use classifier::{
    is_sensitive, ClassifiedComponent, Classifier, ManifestReport, NumberedPermission,
    PermissionReport, Priority, SENSITIVE_PERMISSIONS,
};
pub use extractor::{
    android_attr, Component, ComponentKind, Extractor, IntentFilter, ManifestData, NOT_AVAILABLE,
};
