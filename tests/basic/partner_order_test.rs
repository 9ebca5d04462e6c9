use crate::common::{self, names_and_orders, new_partner, orders_of, seed_partners};
use seniorbydesign::db::models::partner::PartnerChanges;
use seniorbydesign::partners::{self, ordering::LAST_ORDER, PartnerError};

const SIX: [&str; 6] = ["A", "B", "C", "D", "E", "F"];

fn move_to(order: i64) -> PartnerChanges {
    PartnerChanges {
        order: Some(order),
        ..PartnerChanges::default()
    }
}

fn sorted(mut orders: Vec<i64>) -> Vec<i64> {
    orders.sort_unstable();
    orders
}

#[actix_web::test]
async fn test_insert_when_no_order_expect_appended() {
    let test_db = common::initialize_db().await;
    seed_partners(&test_db.db, &["A", "B", "C"], 1).await;
    let actual = names_and_orders(&test_db.db).await;
    let expected = vec![
        ("A".to_owned(), 1),
        ("B".to_owned(), 2),
        ("C".to_owned(), 3),
    ];
    assert_eq!(expected, actual);
}

#[actix_web::test]
async fn test_insert_when_list_empty_and_no_order_expect_first_order() {
    let test_db = common::initialize_db().await;

    let created = partners::insert(&test_db.db, &new_partner("A"), None, 1)
        .await
        .unwrap();

    assert_eq!(1, created.order);
    assert_eq!(vec![("A".to_owned(), 1)], names_and_orders(&test_db.db).await);
}

#[actix_web::test]
async fn test_insert_when_order_taken_expect_tail_shifted_back() {
    let test_db = common::initialize_db().await;
    seed_partners(&test_db.db, &["A", "B", "C", "D"], 1).await;

    let created = partners::insert(&test_db.db, &new_partner("New"), Some(2), 1)
        .await
        .unwrap();

    assert_eq!(2, created.order);
    assert_eq!(
        vec![1, 2, 3, 4, 5],
        orders_of(&test_db.db, &["A", "New", "B", "C", "D"]).await
    );
}

#[actix_web::test]
async fn test_insert_when_order_past_end_expect_nothing_shifted() {
    let test_db = common::initialize_db().await;
    seed_partners(&test_db.db, &["A", "B"], 1).await;
    partners::insert(&test_db.db, &new_partner("C"), Some(3), 1)
        .await
        .unwrap();
    assert_eq!(vec![1, 2, 3], orders_of(&test_db.db, &["A", "B", "C"]).await);
}

#[actix_web::test]
async fn test_insert_when_order_below_first_expect_out_of_range() {
    let test_db = common::initialize_db().await;
    let err = partners::insert(&test_db.db, &new_partner("A"), Some(0), 1)
        .await
        .unwrap_err();
    assert_eq!(
        Some(&PartnerError::OrderOutOfRange {
            order: 0,
            first_order: 1,
            last_order: LAST_ORDER,
        }),
        err.downcast_ref::<PartnerError>()
    );
    assert!(names_and_orders(&test_db.db).await.is_empty());
}

#[actix_web::test]
async fn test_insert_when_zero_based_expect_orders_from_zero() {
    let test_db = common::initialize_db().await;
    seed_partners(&test_db.db, &["A", "B"], 0).await;
    partners::insert(&test_db.db, &new_partner("C"), Some(0), 0)
        .await
        .unwrap();
    assert_eq!(vec![0, 1, 2], orders_of(&test_db.db, &["C", "A", "B"]).await);
}

#[actix_web::test]
async fn test_reposition_when_five_to_two_expect_middle_shifted_later() {
    let test_db = common::initialize_db().await;
    let created = seed_partners(&test_db.db, &SIX, 1).await;

    partners::reposition(&test_db.db, created[4].id, move_to(2), 1)
        .await
        .unwrap();

    assert_eq!(
        vec![1, 3, 4, 5, 2, 6],
        orders_of(&test_db.db, &SIX).await
    );
}

#[actix_web::test]
async fn test_reposition_when_two_to_five_expect_middle_shifted_earlier() {
    let test_db = common::initialize_db().await;
    let created = seed_partners(&test_db.db, &SIX, 1).await;

    partners::reposition(&test_db.db, created[1].id, move_to(5), 1)
        .await
        .unwrap();

    assert_eq!(
        vec![1, 5, 2, 3, 4, 6],
        orders_of(&test_db.db, &SIX).await
    );
}

#[actix_web::test]
async fn test_reposition_when_same_order_expect_others_untouched() {
    let test_db = common::initialize_db().await;
    let created = seed_partners(&test_db.db, &SIX, 1).await;
    let before = partners::list(&test_db.db).await.unwrap();

    let changes = PartnerChanges {
        name: Some("C renamed".to_owned()),
        order: Some(3),
        ..PartnerChanges::default()
    };
    let updated = partners::reposition(&test_db.db, created[2].id, changes, 1)
        .await
        .unwrap();

    assert_eq!("C renamed", updated.name);
    assert_eq!(3, updated.order);
    let after = partners::list(&test_db.db).await.unwrap();
    for (old, new) in before.iter().zip(after.iter()) {
        assert_eq!(old.id, new.id);
        assert_eq!(old.order, new.order);
        if old.id != created[2].id {
            assert_eq!(old, new);
        }
    }
}

#[actix_web::test]
async fn test_reposition_when_no_order_given_expect_fields_only() {
    let test_db = common::initialize_db().await;
    let created = seed_partners(&test_db.db, &["A", "B"], 1).await;
    let changes = PartnerChanges {
        url: Some("https://b.example".to_owned()),
        ..PartnerChanges::default()
    };
    partners::reposition(&test_db.db, created[1].id, changes, 1)
        .await
        .unwrap();
    let actual = partners::get(&test_db.db, created[1].id).await.unwrap();
    assert_eq!("https://b.example", actual.url);
    assert_eq!(2, actual.order);
    assert_eq!("B", actual.name);
}

#[actix_web::test]
async fn test_reposition_when_sequence_of_moves_expect_dense_orders() {
    let test_db = common::initialize_db().await;
    let created = seed_partners(&test_db.db, &SIX, 1).await;
    let moves = [(0, 6), (5, 1), (3, 3), (2, 5), (4, 2), (1, 4), (0, 1)];
    for (idx, new_order) in moves {
        partners::reposition(&test_db.db, created[idx].id, move_to(new_order), 1)
            .await
            .unwrap();
        let orders = orders_of(&test_db.db, &SIX).await;
        assert_eq!(vec![1, 2, 3, 4, 5, 6], sorted(orders));
        assert_eq!(new_order, partners::get(&test_db.db, created[idx].id).await.unwrap().order);
    }
}

#[actix_web::test]
async fn test_reposition_when_missing_id_expect_not_found() {
    let test_db = common::initialize_db().await;
    seed_partners(&test_db.db, &["A"], 1).await;
    let err = partners::reposition(&test_db.db, 999, move_to(1), 1)
        .await
        .unwrap_err();
    assert_eq!(
        Some(&PartnerError::NotFound(999)),
        err.downcast_ref::<PartnerError>()
    );
}

#[actix_web::test]
async fn test_delete_when_partner_removed_expect_others_keep_orders() {
    let test_db = common::initialize_db().await;
    let created = seed_partners(&test_db.db, &["A", "B", "C", "D"], 1).await;

    partners::delete(&test_db.db, created[1].id).await.unwrap();

    let expected = vec![
        ("A".to_owned(), 1),
        ("C".to_owned(), 3),
        ("D".to_owned(), 4),
    ];
    assert_eq!(expected, names_and_orders(&test_db.db).await);
}

#[actix_web::test]
async fn test_insert_when_gap_after_delete_expect_append_after_max() {
    let test_db = common::initialize_db().await;
    let created = seed_partners(&test_db.db, &["A", "B", "C"], 1).await;
    partners::delete(&test_db.db, created[0].id).await.unwrap();

    let appended = partners::insert(&test_db.db, &new_partner("D"), None, 1)
        .await
        .unwrap();

    assert_eq!(4, appended.order);
}

#[actix_web::test]
async fn test_delete_when_missing_id_expect_not_found() {
    let test_db = common::initialize_db().await;
    let err = partners::delete(&test_db.db, 42).await.unwrap_err();
    assert_eq!(
        Some(&PartnerError::NotFound(42)),
        err.downcast_ref::<PartnerError>()
    );
}

#[actix_web::test]
async fn test_reposition_when_b_moved_first_expect_b_a_c() {
    let test_db = common::initialize_db().await;
    partners::insert(&test_db.db, &new_partner("A"), Some(1), 1)
        .await
        .unwrap();
    let partner_b = partners::insert(&test_db.db, &new_partner("B"), Some(2), 1)
        .await
        .unwrap();
    partners::insert(&test_db.db, &new_partner("C"), Some(3), 1)
        .await
        .unwrap();

    partners::reposition(&test_db.db, partner_b.id, move_to(1), 1)
        .await
        .unwrap();

    let expected = vec![
        ("B".to_owned(), 1),
        ("A".to_owned(), 2),
        ("C".to_owned(), 3),
    ];
    assert_eq!(expected, names_and_orders(&test_db.db).await);
}

#[actix_web::test]
async fn test_reposition_when_concurrent_overlapping_moves_expect_dense_orders() {
    let test_db = common::initialize_db().await;
    let created = seed_partners(&test_db.db, &SIX, 1).await;
    let moves = [
        (0, 6),
        (5, 1),
        (2, 4),
        (3, 2),
        (1, 5),
        (4, 3),
        (0, 2),
        (5, 6),
    ];

    let handles: Vec<_> = moves
        .iter()
        .map(|&(idx, new_order)| {
            let db = test_db.db.clone();
            let id = created[idx].id;
            actix_web::rt::spawn(async move {
                partners::reposition(&db, id, move_to(new_order), 1).await
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let orders = orders_of(&test_db.db, &SIX).await;
    assert_eq!(vec![1, 2, 3, 4, 5, 6], sorted(orders));
}

#[actix_web::test]
async fn test_insert_when_order_past_last_order_expect_out_of_range() {
    let test_db = common::initialize_db().await;
    seed_partners(&test_db.db, &["A"], 1).await;
    for order in [LAST_ORDER + 1, 1 << 40, i64::MAX] {
        let err = partners::insert(&test_db.db, &new_partner("Big"), Some(order), 1)
            .await
            .unwrap_err();
        assert_eq!(
            Some(&PartnerError::OrderOutOfRange {
                order,
                first_order: 1,
                last_order: LAST_ORDER,
            }),
            err.downcast_ref::<PartnerError>()
        );
    }
    assert_eq!(vec![("A".to_owned(), 1)], names_and_orders(&test_db.db).await);
}

#[actix_web::test]
async fn test_insert_when_order_is_last_order_expect_stored_exactly() {
    let test_db = common::initialize_db().await;
    seed_partners(&test_db.db, &["A"], 1).await;

    partners::insert(&test_db.db, &new_partner("Last"), Some(LAST_ORDER), 1)
        .await
        .unwrap();

    let expected = vec![("A".to_owned(), 1), ("Last".to_owned(), LAST_ORDER)];
    assert_eq!(expected, names_and_orders(&test_db.db).await);
}

#[actix_web::test]
async fn test_insert_when_append_after_last_order_expect_no_room() {
    let test_db = common::initialize_db().await;
    seed_partners(&test_db.db, &["A"], 1).await;
    partners::insert(&test_db.db, &new_partner("Last"), Some(LAST_ORDER), 1)
        .await
        .unwrap();

    let err = partners::insert(&test_db.db, &new_partner("Next"), None, 1)
        .await
        .unwrap_err();

    assert_eq!(
        Some(&PartnerError::NoRoom(LAST_ORDER)),
        err.downcast_ref::<PartnerError>()
    );
    let expected = vec![("A".to_owned(), 1), ("Last".to_owned(), LAST_ORDER)];
    assert_eq!(expected, names_and_orders(&test_db.db).await);
}

#[actix_web::test]
async fn test_insert_when_shift_would_pass_last_order_expect_no_room_and_untouched() {
    let test_db = common::initialize_db().await;
    seed_partners(&test_db.db, &["A", "B"], 1).await;
    partners::insert(&test_db.db, &new_partner("Last"), Some(LAST_ORDER), 1)
        .await
        .unwrap();

    let err = partners::insert(&test_db.db, &new_partner("New"), Some(2), 1)
        .await
        .unwrap_err();

    assert_eq!(
        Some(&PartnerError::NoRoom(LAST_ORDER)),
        err.downcast_ref::<PartnerError>()
    );
    assert_eq!(
        vec![1, 2, LAST_ORDER],
        orders_of(&test_db.db, &["A", "B", "Last"]).await
    );
}

#[actix_web::test]
async fn test_reposition_when_order_past_last_order_expect_out_of_range() {
    let test_db = common::initialize_db().await;
    let created = seed_partners(&test_db.db, &["A", "B"], 1).await;

    let err = partners::reposition(&test_db.db, created[0].id, move_to(LAST_ORDER + 1), 1)
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<PartnerError>(),
        Some(&PartnerError::OrderOutOfRange { .. })
    ));
    assert_eq!(vec![1, 2], orders_of(&test_db.db, &["A", "B"]).await);
}
