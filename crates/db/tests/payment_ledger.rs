//! Payment ledger transactions: every payment insert/delete keeps the
//! project's denormalized totals in step.

use buildbooks_db::models::payment::CreatePayment;
use buildbooks_db::models::project::CreateProject;
use buildbooks_db::repositories::{PaymentRepo, ProjectRepo};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn payment(amount: &str, paid: &str) -> CreatePayment {
    CreatePayment {
        amount: dec(amount),
        date_paid: date(paid),
        reference: None,
    }
}

async fn project_with_contract(pool: &PgPool, contract: &str) -> i64 {
    ProjectRepo::create(
        pool,
        &CreateProject {
            name: "Ledger".to_string(),
            client_name: None,
            location: None,
            phase: None,
            status: None,
            contract_amount: Some(dec(contract)),
            design_fee: None,
            construction_cost: None,
        },
    )
    .await
    .unwrap()
    .id
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_insert_delete_scenario(pool: PgPool) {
    let project_id = project_with_contract(&pool, "1000").await;

    let first = PaymentRepo::create_with_ledger(&pool, project_id, &payment("300", "2026-01-10"), None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first.project.total_client_payment, dec("300"));
    assert_eq!(first.project.remaining_balance, dec("700"));
    assert_eq!(first.project.last_paid_date, Some(date("2026-01-10")));

    let second =
        PaymentRepo::create_with_ledger(&pool, project_id, &payment("200", "2026-02-10"), None)
            .await
            .unwrap()
            .unwrap();
    assert_eq!(second.project.total_client_payment, dec("500"));
    assert_eq!(second.project.remaining_balance, dec("500"));
    assert_eq!(second.project.last_paid_date, Some(date("2026-02-10")));

    let removed = PaymentRepo::delete_with_ledger(&pool, second.payment.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(removed.project.total_client_payment, dec("300"));
    assert_eq!(removed.project.remaining_balance, dec("700"));
    assert_eq!(removed.project.last_paid_date, Some(date("2026-01-10")));

    let listed = PaymentRepo::list_by_project(&pool, project_id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, first.payment.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_backdated_payment_keeps_latest_date(pool: PgPool) {
    let project_id = project_with_contract(&pool, "1000").await;

    PaymentRepo::create_with_ledger(&pool, project_id, &payment("100", "2026-03-01"), None)
        .await
        .unwrap();
    let change =
        PaymentRepo::create_with_ledger(&pool, project_id, &payment("100", "2026-01-01"), None)
            .await
            .unwrap()
            .unwrap();
    assert_eq!(change.project.last_paid_date, Some(date("2026-03-01")));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_only_payment_clears_date(pool: PgPool) {
    let project_id = project_with_contract(&pool, "1000").await;
    let change =
        PaymentRepo::create_with_ledger(&pool, project_id, &payment("1000", "2026-01-01"), None)
            .await
            .unwrap()
            .unwrap();
    assert_eq!(change.project.remaining_balance, Decimal::ZERO);

    let removed = PaymentRepo::delete_with_ledger(&pool, change.payment.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(removed.project.total_client_payment, Decimal::ZERO);
    assert_eq!(removed.project.remaining_balance, dec("1000"));
    assert_eq!(removed.project.last_paid_date, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_targets_write_nothing(pool: PgPool) {
    assert!(
        PaymentRepo::create_with_ledger(&pool, 424_242, &payment("10", "2026-01-01"), None)
            .await
            .unwrap()
            .is_none()
    );
    assert!(PaymentRepo::delete_with_ledger(&pool, 424_242)
        .await
        .unwrap()
        .is_none());

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM payments")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rejected_payment_rolls_back(pool: PgPool) {
    let project_id = project_with_contract(&pool, "1000").await;

    // The CHECK on `amount` fails inside the transaction.
    let err = PaymentRepo::create_with_ledger(&pool, project_id, &payment("-5", "2026-01-01"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, sqlx::Error::Database(_)));

    let project = ProjectRepo::find_by_id(&pool, project_id).await.unwrap().unwrap();
    assert_eq!(project.total_client_payment, Decimal::ZERO);
    assert_eq!(project.remaining_balance, dec("1000"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_payments_are_serialized(pool: PgPool) {
    let project_id = project_with_contract(&pool, "1000").await;

    let mut handles = Vec::new();
    for i in 0..5 {
        let pool = pool.clone();
        handles.push(tokio::spawn(async move {
            let paid = format!("2026-01-{:02}", i + 1);
            PaymentRepo::create_with_ledger(&pool, project_id, &payment("50", &paid), None)
                .await
                .unwrap()
                .unwrap()
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let project = ProjectRepo::find_by_id(&pool, project_id).await.unwrap().unwrap();
    assert_eq!(project.total_client_payment, dec("250"));
    assert_eq!(project.remaining_balance, dec("750"));
    assert_eq!(project.last_paid_date, Some(date("2026-01-05")));
}
