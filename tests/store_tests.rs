use casebook::model::{Patient, Registration, RegistrationStatus, Session, UserRole, User};
use casebook::{EntityMeta, FindOptions, Patch, Repository, Store, StoreConfig, StoreError};
use serde_json::json;
use std::collections::HashSet;

fn store() -> Store {
    Store::new(StoreConfig::new().actor("user-1")).unwrap()
}

fn patient(first: &str, last: &str) -> Patient {
    Patient {
        first_name: first.to_string(),
        last_name: last.to_string(),
        ..Patient::default()
    }
}

#[test]
fn test_create_assigns_id_and_audit() {
    let mut store = store();
    let created = store.create(patient("Ada", "Lovelace")).unwrap();

    assert_eq!(created.meta.id.len(), 8);
    assert!(created.meta.created_at.is_some());
    assert_eq!(created.meta.created_by_uid.as_deref(), Some("user-1"));
    assert!(created.meta.updated_at.is_none());
    assert!(created.meta.archived_at.is_none());
}

#[test]
fn test_created_ids_are_unique() {
    let mut store = Store::new(StoreConfig::new().id_length(6)).unwrap();
    let mut ids = HashSet::new();
    for i in 0..500 {
        let created = store.create(patient(&format!("P{}", i), "Test")).unwrap();
        assert!(ids.insert(created.meta.id));
    }
    assert_eq!(store.len("patients"), 500);
}

#[test]
fn test_create_round_trip() {
    let mut store = store();
    let draft = Patient {
        nhsn: Some("9991234567".to_string()),
        year_group: Some(9),
        school_id: Some("school-1".to_string()),
        ..patient("Grace", "Hopper")
    };
    let created = store.create(draft.clone()).unwrap();
    let found: Patient = store.find_one(&created.meta.id).unwrap();

    assert_eq!(found, created);
    assert_eq!(found.nhsn, draft.nhsn);
    assert_eq!(found.year_group, Some(9));
    assert_eq!(found.school_id.as_deref(), Some("school-1"));
}

#[test]
fn test_create_with_explicit_id() {
    let mut store = store();
    let draft = Patient {
        meta: EntityMeta::with_id("p-1"),
        ..patient("Alan", "Turing")
    };
    store.create(draft.clone()).unwrap();

    let err = store.create(draft).unwrap_err();
    assert_eq!(
        err,
        StoreError::IdCollision {
            collection: "patients".to_string(),
            id: "p-1".to_string()
        }
    );
}

#[test]
fn test_find_one_missing_is_none() {
    let store = store();
    assert!(store.find_one::<Patient>("nope").is_none());
    assert!(store.find_document("patients", "nope").is_none());
}

#[test]
fn test_find_all_keeps_insertion_order() {
    let mut store = store();
    for name in ["Zed", "Amy", "Moe"] {
        store.create(patient(name, "Smith")).unwrap();
    }
    let names: Vec<String> = store
        .find_all::<Patient>(FindOptions::default())
        .into_iter()
        .map(|p| p.first_name)
        .collect();
    assert_eq!(names, vec!["Zed", "Amy", "Moe"]);

    let filtered =
        store.find_all_where(FindOptions::default(), |p: &Patient| p.first_name != "Amy");
    assert_eq!(filtered.len(), 2);
}

#[test]
fn test_update_merges_shallowly() {
    let mut store = store();
    let created = store
        .create(Patient {
            year_group: Some(8),
            address_postcode: Some("SW1A 1AA".to_string()),
            ..patient("Ada", "Lovelace")
        })
        .unwrap();

    let patch = Patch::new()
        .set("first_name", "Augusta")
        .unwrap()
        .clear("address_postcode");
    let updated: Patient = store.update(&created.meta.id, patch).unwrap();

    assert_eq!(updated.first_name, "Augusta");
    assert_eq!(updated.last_name, "Lovelace");
    assert_eq!(updated.year_group, Some(8));
    assert!(updated.address_postcode.is_none());
    assert_eq!(updated.meta.created_at, created.meta.created_at);
    assert!(updated.meta.updated_at.is_some());
    assert_eq!(updated.meta.updated_by_uid.as_deref(), Some("user-1"));
}

#[test]
fn test_update_rejects_protected_fields() {
    let mut store = store();
    let created = store.create(patient("Ada", "Lovelace")).unwrap();

    for field in ["id", "created_at", "created_by_uid"] {
        let patch = Patch::new().set_value(field, json!("x"));
        let err = store.update::<Patient>(&created.meta.id, patch).unwrap_err();
        assert!(matches!(err, StoreError::ProtectedField { .. }));
    }
    assert!(store.find_one::<Patient>(&created.meta.id).is_some());
}

#[test]
fn test_update_with_bad_value_leaves_record_untouched() {
    let mut store = store();
    let created = store.create(patient("Ada", "Lovelace")).unwrap();

    let patch = Patch::new().set_value("year_group", json!("nine"));
    let err = store.update::<Patient>(&created.meta.id, patch).unwrap_err();
    assert!(matches!(err, StoreError::Serialization(_)));

    let found: Patient = store.find_one(&created.meta.id).unwrap();
    assert_eq!(found, created);
}

#[test]
fn test_update_missing_entity() {
    let mut store = store();
    let err = store.update::<Patient>("ghost", Patch::new()).unwrap_err();
    assert_eq!(err, StoreError::not_found("patients", "ghost"));
}

#[test]
fn test_rekey_relocates_record() {
    let mut store = store();
    let first = store.create(patient("A", "One")).unwrap();
    let second = store.create(patient("B", "Two")).unwrap();

    let moved: Patient = store.rekey(&first.meta.id, "renamed").unwrap();
    assert_eq!(moved.meta.id, "renamed");
    assert!(store.find_one::<Patient>(&first.meta.id).is_none());

    let ids: Vec<String> = store
        .find_all::<Patient>(FindOptions::default())
        .into_iter()
        .map(|p| p.meta.id)
        .collect();
    assert_eq!(ids, vec!["renamed".to_string(), second.meta.id.clone()]);

    let err = store.rekey::<Patient>("renamed", &second.meta.id).unwrap_err();
    assert!(matches!(err, StoreError::IdCollision { .. }));
}

#[test]
fn test_rekey_onto_own_id_is_noop() {
    let mut store = store();
    let created = store.create(patient("Same", "Id")).unwrap();

    let same: Patient = store.rekey(&created.meta.id, &created.meta.id).unwrap();
    assert_eq!(same, created);
    assert!(same.meta.updated_at.is_none());
    assert_eq!(store.count::<Patient>(FindOptions::default()), 1);
    assert_eq!(store.find_one::<Patient>(&created.meta.id), Some(created));
}

#[test]
fn test_archive_excludes_from_listing() {
    let mut store = store();
    let kept = store.create(patient("Kept", "Child")).unwrap();
    let gone = store.create(patient("Gone", "Child")).unwrap();

    let archived: Patient = store.archive(&gone.meta.id).unwrap();
    assert!(archived.meta.archived_at.is_some());

    let listed = store.find_all::<Patient>(FindOptions::default());
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].meta.id, kept.meta.id);

    assert!(store.find_one::<Patient>(&gone.meta.id).is_some());
    assert_eq!(store.count::<Patient>(FindOptions::with_archived()), 2);
}

#[test]
fn test_archive_is_idempotent() {
    let mut store = store();
    let created = store.create(patient("Ada", "Lovelace")).unwrap();
    let first: Patient = store.archive(&created.meta.id).unwrap();
    let second: Patient = store.archive(&created.meta.id).unwrap();
    assert_eq!(first.meta.archived_at, second.meta.archived_at);
}

#[test]
fn test_delete_policy_per_type() {
    let mut store = store();
    let registration = store
        .create(Registration {
            patient_id: "p".to_string(),
            session_id: "s".to_string(),
            status: RegistrationStatus::Present,
            ..Registration::default()
        })
        .unwrap();
    let child = store.create(patient("Ada", "Lovelace")).unwrap();

    let err = store.archive::<Registration>(&registration.meta.id).unwrap_err();
    assert!(matches!(err, StoreError::DeletePolicy { .. }));
    let err = store.delete::<Patient>(&child.meta.id).unwrap_err();
    assert!(matches!(err, StoreError::DeletePolicy { .. }));

    store.delete::<Registration>(&registration.meta.id).unwrap();
    assert!(store.find_one::<Registration>(&registration.meta.id).is_none());
    assert_eq!(
        store.delete::<Registration>(&registration.meta.id).unwrap_err(),
        StoreError::not_found("registrations", &registration.meta.id)
    );
}

#[test]
fn test_side_effects_stay_in_one_collection() {
    let mut store = store();
    let session = store.create(Session::default()).unwrap();
    let registration = store
        .create(Registration {
            session_id: session.meta.id.clone(),
            ..Registration::default()
        })
        .unwrap();

    store.archive::<Session>(&session.meta.id).unwrap();
    let still_there: Registration = store.find_one(&registration.meta.id).unwrap();
    assert_eq!(still_there.session_id, session.meta.id);
}

#[test]
fn test_from_json_and_back() {
    let data = json!({
        "users": {
            "u1": { "first_name": "Jo", "last_name": "Bloggs", "role": "pharmacist" }
        },
        "patients": [
            { "id": "p1", "first_name": "Ada", "last_name": "Lovelace" },
            { "first_name": "Anon", "last_name": "Ymous" }
        ]
    });
    let store = Store::from_json(data, StoreConfig::default()).unwrap();

    let user: User = store.find_one("u1").unwrap();
    assert_eq!(user.role, UserRole::Pharmacist);
    assert_eq!(store.len("patients"), 2);
    assert!(store.find_one::<Patient>("p1").is_some());

    let dumped = store.to_json();
    assert_eq!(dumped["users"]["u1"]["id"], "u1");
    assert_eq!(dumped["patients"].as_object().unwrap().len(), 2);

    let again = Store::from_json(dumped.clone(), StoreConfig::default()).unwrap();
    assert_eq!(again.to_json(), dumped);
}

#[test]
fn test_from_json_rejects_bad_shapes() {
    assert!(Store::from_json(json!([]), StoreConfig::default()).is_err());
    assert!(Store::from_json(json!({ "patients": 3 }), StoreConfig::default()).is_err());
    assert!(Store::from_json(json!({ "patients": [1] }), StoreConfig::default()).is_err());
}

#[test]
fn test_undecodable_record_is_treated_as_missing() {
    let data = json!({
        "patients": { "p1": { "first_name": 42 } }
    });
    let store = Store::from_json(data, StoreConfig::default()).unwrap();
    assert!(store.find_one::<Patient>("p1").is_none());
    assert!(store.find_document("patients", "p1").is_some());
    assert!(store.find_all::<Patient>(FindOptions::default()).is_empty());
}

#[test]
fn test_seed_leaves_audit_untouched() {
    let mut store = store();
    let inserted = store
        .seed(vec![patient("A", "One"), patient("B", "Two")])
        .unwrap();
    assert_eq!(inserted, 2);
    let all = store.find_all::<Patient>(FindOptions::default());
    assert!(all.iter().all(|p| p.meta.created_at.is_none()));
}

#[test]
fn test_invalid_config_rejected() {
    let err = Store::new(StoreConfig::new().page_size(0)).unwrap_err();
    assert!(err.is_configuration());
}
