//! Integration tests for the load -> extract -> classify pipeline
//!
//! These tests run the library API against manifest fixtures.

use manifest_triage::analysis::{ComponentKind, Extractor, IntentFilter, Priority};
use manifest_triage::manifest::{ManifestError, ManifestLoader};
use manifest_triage::{analyze, ReportFormat, Reporter};
use std::path::PathBuf;

/// Get the path to the test fixtures directory
fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

#[test]
fn test_fixture_permissions() {
    let report = analyze(&fixtures_path().join("AndroidManifest.xml")).expect("Failed to analyze");

    let critical: Vec<_> = report.permissions.critical().map(|p| p.to_string()).collect();
    let non_critical: Vec<_> = report.permissions.non_critical().map(|p| p.to_string()).collect();

    assert_eq!(
        critical,
        vec![
            "1. android.permission.INTERNET",
            "2. android.permission.CAMERA",
            "3. android.permission.READ_CONTACTS",
        ]
    );
    assert_eq!(
        non_critical,
        vec![
            "4. android.permission.VIBRATE",
            "5. com.example.triage.permission.C2D_MESSAGE",
        ]
    );
}

#[test]
fn test_fixture_components() {
    let report = analyze(&fixtures_path().join("AndroidManifest.xml")).expect("Failed to analyze");

    let activities: Vec<_> = report
        .activities
        .iter()
        .map(|a| (a.name.as_str(), a.priority))
        .collect();
    assert_eq!(
        activities,
        vec![
            (".MainActivity", Priority::Exported),
            (".DeepLinkActivity", Priority::HasEntryPoints),
            (".SettingsActivity", Priority::Neutral),
        ]
    );

    assert_eq!(
        report.activities[1].intents,
        vec![IntentFilter {
            actions: vec!["android.intent.action.VIEW".to_string()],
            categories: vec![
                "android.intent.category.DEFAULT".to_string(),
                "android.intent.category.BROWSABLE".to_string(),
            ],
        }]
    );

    let services: Vec<_> = report.services.iter().map(|s| (s.name.as_str(), s.exported)).collect();
    assert_eq!(services, vec![(".sync.SyncService", false), (".push.PushService", true)]);

    // Receivers never collect intent filters
    assert_eq!(report.receivers.len(), 1);
    assert_eq!(report.receivers[0].kind, ComponentKind::Receiver);
    assert_eq!(report.receivers[0].priority, Priority::Neutral);
}

#[test]
fn test_fixture_is_repeatable() {
    let path = fixtures_path().join("AndroidManifest.xml");
    assert_eq!(analyze(&path).unwrap(), analyze(&path).unwrap());
}

#[test]
fn test_empty_manifest_reports_empty_states() {
    let report = analyze(&fixtures_path().join("empty_manifest.xml")).expect("Failed to analyze");
    assert!(report.permissions.is_empty());

    let output = Reporter::new(ReportFormat::Terminal, None)
        .with_color(false)
        .render(&report)
        .unwrap();

    assert!(output.contains("== Permissões ==\nNenhuma permissão declarada.\n"));
    assert_eq!(output.matches("Nenhum componente encontrado.").count(), 3);
    assert!(!output.contains('╒'));
}

#[test]
fn test_not_xml_is_malformed() {
    let err = analyze(&fixtures_path().join("not_xml.txt")).unwrap_err();
    assert!(matches!(err, ManifestError::MalformedDocument { .. }));
}

#[test]
fn test_missing_file_is_not_found() {
    let err = analyze(&fixtures_path().join("does_not_exist.xml")).unwrap_err();
    assert!(matches!(err, ManifestError::NotFound { .. }));
}

#[test]
fn test_activity_without_exported_but_with_filter() {
    let manifest = r#"<manifest xmlns:android="http://schemas.android.com/apk/res/android">
        <activity android:name=".Share">
            <intent-filter>
                <action android:name="android.intent.action.SEND"/>
            </intent-filter>
        </activity>
    </manifest>"#;

    let tree = ManifestLoader::new()
        .parse(&PathBuf::from("inline.xml"), manifest)
        .unwrap();
    let data = Extractor::new().extract(&tree);

    let activity = &data.activities[0];
    assert!(!activity.exported);
    assert_eq!(activity.intents[0].actions, vec!["android.intent.action.SEND"]);
    assert!(activity.intents[0].categories.is_empty());
    assert_eq!(Priority::of(activity), Priority::HasEntryPoints);
}

#[test]
fn test_exported_activity_without_filter() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("AndroidManifest.xml");
    std::fs::write(
        &path,
        r#"<manifest xmlns:android="http://schemas.android.com/apk/res/android">
            <activity android:name=".Open" android:exported="true"/>
        </manifest>"#,
    )
    .unwrap();

    let report = analyze(&path).unwrap();
    assert_eq!(report.activities[0].priority, Priority::Exported);
    assert!(report.activities[0].intents.is_empty());
}
