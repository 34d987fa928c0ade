//! Tests for the inventory service.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use mockable::MockClock;
use rstest::rstest;

use super::*;
use crate::domain::error::ErrorCode;
use crate::domain::ports::MockBoxRepository;

fn fixed_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 14).expect("valid date")
}

fn fixed_clock() -> Arc<dyn Clock> {
    let mut clock = MockClock::new();
    let instant = DateTime::<Utc>::from_naive_utc_and_offset(
        fixed_date().and_hms_opt(12, 0, 0).expect("valid time"),
        Utc,
    );
    clock.expect_utc().return_const(instant);
    Arc::new(clock)
}

fn base_url() -> QrBaseUrl {
    QrBaseUrl::parse("http://boxes.example.test").expect("valid base URL")
}

fn service(repo: MockBoxRepository) -> InventoryService {
    InventoryService::new(Arc::new(repo), fixed_clock(), base_url())
}

fn stored_record(suffix: u64) -> BoxRecord {
    BoxRecord {
        box_id: BoxId::from_suffix(suffix),
        short_description: "Mugs".to_owned(),
        from_room: "Kitchen".to_owned(),
        to_room: "Garage".to_owned(),
        photo_path: "data:image/jpeg;base64,AAAA".to_owned(),
        date_created: fixed_date(),
        date_deleted: None,
        deleted: false,
        packed_by: "Sam".to_owned(),
        qr_url: format!("http://boxes.example.test/box/BOX-{suffix:06}"),
    }
}

fn valid_new_box() -> NewBox {
    NewBox {
        box_id: None,
        photo_path: "data:image/jpeg;base64,AAAA".to_owned(),
        short_description: Some("Winter coats".to_owned()),
        from_room: "Bedroom".to_owned(),
        to_room: "Attic".to_owned(),
        date_created: None,
        packed_by: Some("Sam".to_owned()),
    }
}

#[rstest]
#[tokio::test]
async fn create_on_empty_store_allocates_the_first_id() {
    let mut repo = MockBoxRepository::new();
    repo.expect_list().times(1).return_once(|| Ok(Vec::new()));
    repo.expect_insert().times(1).return_once(|_| Ok(()));

    let created = service(repo)
        .create(valid_new_box())
        .await
        .expect("create succeeds");

    assert_eq!(created.box_id.as_str(), "BOX-000001");
    assert_eq!(
        created.qr_url,
        "http://boxes.example.test/box/BOX-000001"
    );
    assert_eq!(created.date_created, fixed_date());
    assert!(!created.deleted);
    assert_eq!(created.date_deleted, None);
}

#[rstest]
#[tokio::test]
async fn create_allocates_past_the_numeric_maximum() {
    let mut repo = MockBoxRepository::new();
    repo.expect_list()
        .times(1)
        .return_once(|| Ok(vec![stored_record(3), stored_record(9), stored_record(4)]));
    repo.expect_insert().times(1).return_once(|_| Ok(()));

    let created = service(repo)
        .create(valid_new_box())
        .await
        .expect("create succeeds");

    assert_eq!(created.box_id.as_str(), "BOX-000010");
}

#[rstest]
#[tokio::test]
async fn create_defaults_description_and_packer() {
    let mut repo = MockBoxRepository::new();
    repo.expect_list().times(1).return_once(|| Ok(Vec::new()));
    repo.expect_insert().times(1).return_once(|_| Ok(()));

    let fields = NewBox {
        short_description: Some("   ".to_owned()),
        packed_by: None,
        ..valid_new_box()
    };
    let created = service(repo).create(fields).await.expect("create succeeds");

    assert_eq!(created.short_description, "No description");
    assert_eq!(created.packed_by, "Unknown");
}

#[rstest]
#[case(NewBox { photo_path: String::new(), ..valid_new_box() })]
#[case(NewBox { from_room: String::new(), ..valid_new_box() })]
#[case(NewBox { to_room: "  ".to_owned(), ..valid_new_box() })]
#[tokio::test]
async fn create_rejects_missing_required_fields(#[case] fields: NewBox) {
    let mut repo = MockBoxRepository::new();
    repo.expect_list().times(0);
    repo.expect_insert().times(0);

    let error = service(repo)
        .create(fields)
        .await
        .expect_err("validation must fail");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn create_honours_a_wellformed_unused_client_id() {
    let mut repo = MockBoxRepository::new();
    repo.expect_list()
        .times(1)
        .return_once(|| Ok(vec![stored_record(1)]));
    repo.expect_insert().times(1).return_once(|_| Ok(()));

    let fields = NewBox {
        box_id: Some("BOX-000005".to_owned()),
        ..valid_new_box()
    };
    let created = service(repo).create(fields).await.expect("create succeeds");

    assert_eq!(created.box_id.as_str(), "BOX-000005");
    assert!(created.qr_url.ends_with("/box/BOX-000005"));
}

#[rstest]
#[tokio::test]
async fn create_rejects_a_duplicate_client_id() {
    let mut repo = MockBoxRepository::new();
    repo.expect_list()
        .times(1)
        .return_once(|| Ok(vec![stored_record(5)]));
    repo.expect_insert().times(0);

    let fields = NewBox {
        box_id: Some("BOX-000005".to_owned()),
        ..valid_new_box()
    };
    let error = service(repo)
        .create(fields)
        .await
        .expect_err("duplicate must fail");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn create_reallocates_when_a_concurrent_create_takes_the_id() {
    let mut repo = MockBoxRepository::new();
    repo.expect_list().times(1).return_once(|| Ok(Vec::new()));
    repo.expect_insert()
        .times(1)
        .withf(|record| record.box_id.as_str() == "BOX-000001")
        .return_once(|_| Err(BoxRepositoryError::duplicate("BOX-000001")));
    repo.expect_list()
        .times(1)
        .return_once(|| Ok(vec![stored_record(1)]));
    repo.expect_insert()
        .times(1)
        .withf(|record| record.box_id.as_str() == "BOX-000002")
        .return_once(|_| Ok(()));

    let created = service(repo)
        .create(valid_new_box())
        .await
        .expect("create succeeds after reallocating");

    assert_eq!(created.box_id.as_str(), "BOX-000002");
}

#[rstest]
#[tokio::test]
async fn create_rejects_a_client_id_that_loses_the_race_at_insert() {
    let mut repo = MockBoxRepository::new();
    repo.expect_list().times(1).return_once(|| Ok(Vec::new()));
    repo.expect_insert()
        .times(1)
        .return_once(|_| Err(BoxRepositoryError::duplicate("BOX-000005")));

    let fields = NewBox {
        box_id: Some("BOX-000005".to_owned()),
        ..valid_new_box()
    };
    let error = service(repo)
        .create(fields)
        .await
        .expect_err("duplicate must fail");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn get_resolves_legacy_renderings_of_the_same_number() {
    let mut repo = MockBoxRepository::new();
    repo.expect_find()
        .times(1)
        .withf(|box_id| box_id.as_str() == "BOX-000007")
        .return_once(|_| Ok(Some(stored_record(7))));

    let found = service(repo).get("BOX-0007").await.expect("lookup succeeds");
    assert_eq!(found.box_id.as_str(), "BOX-000007");
}

#[rstest]
#[case("BOX-000099")]
#[case("not-a-box-id")]
#[tokio::test]
async fn get_failure_carries_the_requested_id(#[case] requested: &str) {
    let mut repo = MockBoxRepository::new();
    repo.expect_find().returning(|_| Ok(None));

    let error = service(repo).get(requested).await.expect_err("not found");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.requested_id(), Some(requested));
}

#[rstest]
#[tokio::test]
async fn soft_delete_sets_flag_and_date() {
    let mut repo = MockBoxRepository::new();
    repo.expect_find()
        .times(1)
        .return_once(|_| Ok(Some(stored_record(2))));
    repo.expect_replace()
        .times(1)
        .withf(|record| record.deleted && record.date_deleted == Some(fixed_date()))
        .return_once(|_| Ok(true));

    let deleted = service(repo)
        .soft_delete("BOX-000002")
        .await
        .expect("delete succeeds");

    assert!(deleted.deleted);
    assert_eq!(deleted.date_deleted, Some(fixed_date()));
}

#[rstest]
#[tokio::test]
async fn soft_delete_is_idempotent() {
    let mut already_deleted = stored_record(2);
    already_deleted.soft_delete(fixed_date());
    let snapshot = already_deleted.clone();

    let mut repo = MockBoxRepository::new();
    repo.expect_find()
        .times(1)
        .return_once(move |_| Ok(Some(already_deleted)));
    repo.expect_replace().times(1).return_once(|_| Ok(true));

    let deleted = service(repo)
        .soft_delete("BOX-000002")
        .await
        .expect("repeat delete succeeds");

    assert_eq!(deleted, snapshot);
}

#[rstest]
#[tokio::test]
async fn restore_clears_flag_and_date_and_is_idempotent() {
    let mut record = stored_record(3);
    record.soft_delete(fixed_date());

    let mut repo = MockBoxRepository::new();
    repo.expect_find()
        .times(2)
        .returning(move |_| Ok(Some(record.clone())));
    repo.expect_replace()
        .times(2)
        .withf(|candidate| !candidate.deleted && candidate.date_deleted.is_none())
        .returning(|_| Ok(true));

    let svc = service(repo);
    let restored = svc.restore("BOX-000003").await.expect("restore succeeds");
    assert!(!restored.deleted);

    let again = svc
        .restore("BOX-000003")
        .await
        .expect("repeat restore succeeds");
    assert!(!again.deleted);
    assert_eq!(again.date_deleted, None);
}

#[rstest]
#[tokio::test]
async fn update_touches_only_supplied_fields() {
    let mut repo = MockBoxRepository::new();
    repo.expect_find()
        .times(1)
        .return_once(|_| Ok(Some(stored_record(4))));
    repo.expect_replace().times(1).return_once(|_| Ok(true));

    let updated = service(repo)
        .update(
            "BOX-000004",
            BoxUpdate {
                to_room: Some("Loft".to_owned()),
                ..BoxUpdate::default()
            },
        )
        .await
        .expect("update succeeds");

    assert_eq!(updated.to_room, "Loft");
    assert_eq!(updated.from_room, "Kitchen");
    assert_eq!(updated.short_description, "Mugs");
    assert_eq!(updated.date_created, fixed_date());
}

#[rstest]
#[tokio::test]
async fn update_of_a_vanished_record_is_not_found() {
    let mut repo = MockBoxRepository::new();
    repo.expect_find()
        .times(1)
        .return_once(|_| Ok(Some(stored_record(4))));
    repo.expect_replace().times(1).return_once(|_| Ok(false));

    let error = service(repo)
        .update("BOX-000004", BoxUpdate::default())
        .await
        .expect_err("must fail");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn repository_failures_surface_as_storage_errors() {
    let mut repo = MockBoxRepository::new();
    repo.expect_list()
        .times(1)
        .return_once(|| Err(BoxRepositoryError::read("disk detached")));

    let error = service(repo).list().await.expect_err("storage failure");
    assert_eq!(error.code(), ErrorCode::Storage);
}

#[rstest]
#[tokio::test]
async fn list_active_filters_out_soft_deleted_records() {
    let mut second = stored_record(2);
    second.soft_delete(fixed_date());

    let mut repo = MockBoxRepository::new();
    let records = vec![stored_record(1), second, stored_record(3)];
    repo.expect_list()
        .times(1)
        .return_once(move || Ok(records));

    let active = service(repo).list_active().await.expect("list succeeds");
    let ids: Vec<&str> = active.iter().map(|r| r.box_id.as_str()).collect();
    assert_eq!(ids, ["BOX-000001", "BOX-000003"]);
}

#[rstest]
#[tokio::test]
async fn label_payload_matches_the_stored_qr_url() {
    let mut repo = MockBoxRepository::new();
    repo.expect_find()
        .times(1)
        .return_once(|_| Ok(Some(stored_record(7))));

    let label = service(repo)
        .label("BOX-000007")
        .await
        .expect("label builds");

    assert_eq!(label.qr_payload(), stored_record(7).qr_url);
    assert_eq!(label.display().box_number_short, "007");
}
