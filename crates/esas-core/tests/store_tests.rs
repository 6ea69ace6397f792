//! Assessment store integration tests.

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use esas_core::models::{NewAssessment, Severity, Symptom, SymptomScores};
use esas_core::storage::{KeyValueSlot, MemorySlot, SqliteSlot, StorageError};
use esas_core::store::{AssessmentStore, Clock, ManualClock, StoreConfig, StoreError};

fn make_fields(patient: &str, date_time: &str) -> NewAssessment {
    NewAssessment {
        date_time: date_time.to_string(),
        patient: patient.to_string(),
        professional: "Dr. Cito".to_string(),
        symptoms: SymptomScores::default()
            .with(Symptom::Pain, Severity::new(3).unwrap())
            .with(Symptom::Fatigue, Severity::new(5).unwrap()),
        notes: String::new(),
    }
}

fn make_store<S: KeyValueSlot>(slot: S) -> (AssessmentStore<S>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap(),
    ));
    (AssessmentStore::new(slot).with_clock(clock.clone()), clock)
}

#[test]
fn test_add_then_delete_single_assessment() -> anyhow::Result<()> {
    let (mut store, _) = make_store(MemorySlot::new());

    let created = store.add(make_fields("Juan Perez", "2024-01-10T09:00"))?;
    assert!(!created.id.is_empty());

    let loaded = store.load();
    assert_eq!(loaded.len(), 1);
    let record = &loaded[0];
    assert_eq!(record.id, created.id);
    assert_eq!(record.patient, "Juan Perez");
    assert_eq!(record.professional, "Dr. Cito");
    assert_eq!(record.date_time, "2024-01-10T09:00");
    assert_eq!(record.symptoms.get(Symptom::Pain).value(), 3);
    assert_eq!(record.symptoms.get(Symptom::Fatigue).value(), 5);
    for symptom in &Symptom::ALL[2..] {
        assert_eq!(record.symptoms.get(*symptom), Severity::MIN);
    }
    assert_eq!(record.notes, "");

    store.remove_one(&created.id)?;
    assert!(store.load().is_empty());
    Ok(())
}

#[test]
fn test_two_adds_then_remove_first() -> anyhow::Result<()> {
    let (mut store, _) = make_store(MemorySlot::new());

    let first = store.add(make_fields("Juan Perez", "2024-01-10T09:00"))?;
    let second = store.add(make_fields("Ana Gonzalez", "2024-01-10T10:00"))?;
    assert_ne!(first.id, second.id);

    store.remove_one(&first.id)?;
    assert_eq!(store.load(), vec![second]);
    Ok(())
}

#[test]
fn test_remove_all() -> anyhow::Result<()> {
    let (mut store, _) = make_store(MemorySlot::new());
    for i in 0..5 {
        store.add(make_fields("Juan Perez", &format!("2024-01-0{}T09:00", i + 1)))?;
    }

    store.remove_all()?;
    assert!(store.load().is_empty());

    // The slot holds a valid, empty envelope rather than nothing
    assert!(store.read_envelope().is_ok());
    Ok(())
}

#[test]
fn test_save_load_round_trip() -> anyhow::Result<()> {
    let (mut store, _) = make_store(MemorySlot::new());
    let list: Vec<_> = ["b", "a", "c"]
        .iter()
        .map(|id| {
            let mut fields = make_fields("Ana Gonzalez", "2024-01-09T08:15");
            fields.notes = format!("Nota {}", id);
            esas_core::Assessment::new(id.to_string(), fields)
        })
        .collect();

    store.save(&list)?;
    assert_eq!(store.load(), list);
    Ok(())
}

#[test]
fn test_repeated_loads_are_identical() -> anyhow::Result<()> {
    let (mut store, _) = make_store(MemorySlot::new());
    store.add(make_fields("Juan Perez", "2024-01-10T09:00"))?;
    store.add(make_fields("Ana Gonzalez", "2024-01-10T09:05"))?;

    assert_eq!(store.load(), store.load());
    Ok(())
}

#[test]
fn test_remove_one_is_idempotent() -> anyhow::Result<()> {
    let (mut store, _) = make_store(MemorySlot::new());
    let first = store.add(make_fields("Juan Perez", "2024-01-10T09:00"))?;
    let second = store.add(make_fields("Ana Gonzalez", "2024-01-10T09:05"))?;

    assert!(store.remove_one(&first.id)?);
    assert!(!store.remove_one(&first.id)?);
    assert!(!store.remove_one("never-stored")?);
    assert_eq!(store.load(), vec![second]);
    Ok(())
}

#[test]
fn test_expired_envelope_loads_empty() -> anyhow::Result<()> {
    let (mut store, clock) = make_store(MemorySlot::new());
    store.add(make_fields("Juan Perez", "2024-01-10T09:00"))?;

    clock.advance(Duration::days(30));
    assert_eq!(store.load().len(), 1);

    clock.advance(Duration::milliseconds(1));
    assert!(store.load().is_empty());

    // Next save starts a fresh list
    let fresh = store.add(make_fields("Ana Gonzalez", "2024-02-09T09:00"))?;
    assert_eq!(store.load(), vec![fresh]);
    Ok(())
}

#[test]
fn test_version_mismatch_treated_as_absent() -> anyhow::Result<()> {
    let (mut store, _) = make_store(MemorySlot::new());
    store.add(make_fields("Juan Perez", "2024-01-10T09:00"))?;

    let raw = store.slot().get("esas_v1")?.unwrap();
    let mut json: serde_json::Value = serde_json::from_str(&raw)?;
    json["version"] = serde_json::json!("2.0");
    store.slot_mut().set("esas_v1", &json.to_string())?;

    assert!(store.load().is_empty());
    Ok(())
}

#[test]
fn test_corrupt_data_loads_empty() -> anyhow::Result<()> {
    let (mut store, clock) = make_store(MemorySlot::new());
    let now = clock.now_millis();

    let symptoms = r#"{"dolor":0,"fatiga":0,"náusea":0,"depresión":0,"ansiedad":0,"somnolencia":0,"apetito":0,"bienestar":0,"disnea":0,"otros":0}"#;
    let record = |id: &str, symptoms: &str| {
        format!(
            r#"{{"id":"{}","dateTime":"2024-01-10T09:00","patient":"Juan Perez","professional":"Dr. Cito","symptoms":{},"notes":""}}"#,
            id, symptoms
        )
    };
    let envelope = |assessments: String| {
        format!(
            r#"{{"version":"1.0","savedAt":{},"assessments":[{}]}}"#,
            now, assessments
        )
    };

    // Sanity check: the well-formed variant loads
    store.slot_mut().set("esas_v1", &envelope(record("ok", symptoms)))?;
    assert_eq!(store.load().len(), 1);

    let corrupt_cases = vec![
        ("not json", "esas".to_string()),
        ("truncated", envelope(record("a", symptoms))[..40].to_string()),
        ("json array", "[]".to_string()),
        ("missing savedAt", r#"{"version":"1.0","assessments":[]}"#.to_string()),
        ("assessments not a list", format!(r#"{{"version":"1.0","savedAt":{},"assessments":{{}}}}"#, now)),
        ("missing symptom", envelope(record("a", &symptoms.replace(r#","otros":0"#, "")))),
        ("severity above 10", envelope(record("a", &symptoms.replace(r#""dolor":0"#, r#""dolor":11"#)))),
        ("negative severity", envelope(record("a", &symptoms.replace(r#""dolor":0"#, r#""dolor":-1"#)))),
        ("fractional severity", envelope(record("a", &symptoms.replace(r#""dolor":0"#, r#""dolor":2.5"#)))),
        ("unknown symptom", envelope(record("a", &symptoms.replace(r#""otros":0"#, r#""otros":0,"tos":1"#)))),
        ("id not a string", envelope(record("a", symptoms).replace(r#""id":"a""#, r#""id":7"#))),
        ("duplicate ids", envelope(format!("{},{}", record("a", symptoms), record("a", symptoms)))),
    ];

    for (case, raw) in corrupt_cases {
        store.slot_mut().set("esas_v1", &raw)?;
        assert!(store.load().is_empty(), "Case {}: expected empty load", case);
    }
    Ok(())
}

#[test]
fn test_quota_failure_keeps_previous_envelope() -> anyhow::Result<()> {
    let (mut store, _) = make_store(MemorySlot::with_quota(900));
    let first = store.add(make_fields("Juan Perez", "2024-01-10T09:00"))?;

    let mut long = make_fields("Ana Gonzalez", "2024-01-10T09:30");
    long.notes = "x".repeat(500);
    let err = store.add(long).unwrap_err();

    assert!(matches!(
        err,
        StoreError::Storage(StorageError::QuotaExceeded { quota: 900, .. })
    ));
    assert_eq!(store.load(), vec![first]);
    Ok(())
}

#[test]
fn test_unavailable_storage() {
    let (mut store, _) = make_store(MemorySlot::unavailable());

    assert!(store.load().is_empty());
    let err = store
        .add(make_fields("Juan Perez", "2024-01-10T09:00"))
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Storage(StorageError::Unavailable(_))
    ));
    assert!(store.remove_all().is_err());
}

#[test]
fn test_configured_keys_are_independent() -> anyhow::Result<()> {
    let (mut store, _) = make_store(MemorySlot::new());
    store.add(make_fields("Juan Perez", "2024-01-10T09:00"))?;

    let config = StoreConfig {
        storage_key: "esas_training".into(),
        ..StoreConfig::default()
    };
    let mut other = AssessmentStore::new(store.into_slot()).with_config(config);
    assert!(other.load().is_empty());

    other.add(make_fields("Ana Gonzalez", "2024-01-10T09:00"))?;
    assert_eq!(other.load().len(), 1);
    assert!(other.slot().get("esas_v1")?.is_some());
    Ok(())
}

#[test]
fn test_sqlite_slot_survives_reopen() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("esas.db");

    let created = {
        let (mut store, _) = make_store(SqliteSlot::open(&path)?);
        store.add(make_fields("Juan Perez", "2024-01-10T09:00"))?
    };

    let (store, _) = make_store(SqliteSlot::open(&path)?);
    assert_eq!(store.load(), vec![created]);
    Ok(())
}
