use sqlx::PgPool;

/// Bootstrap: connect, migrate, and answer the health check.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bootstrap(pool: PgPool) {
    buildbooks_db::health_check(&pool).await.unwrap();

    let tables = [
        "users",
        "projects",
        "project_scopes",
        "design_projects",
        "build_projects",
        "payments",
        "weekly_accomplishments",
        "progress_submit_tokens",
        "notifications",
    ];
    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// All `id` columns must be bigint.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_pks_are_bigint(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, data_type
         FROM information_schema.columns
         WHERE column_name = 'id'
           AND table_schema = 'public'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!rows.is_empty());
    for (table, data_type) in &rows {
        assert_eq!(data_type, "bigint", "Table {table}.id should be bigint");
    }
}

/// Every table must carry timestamptz `created_at` / `updated_at` and the
/// `set_updated_at` trigger.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_tables_have_timestamps_and_trigger(pool: PgPool) {
    let tables: Vec<(String,)> = sqlx::query_as(
        "SELECT table_name
         FROM information_schema.tables
         WHERE table_schema = 'public'
           AND table_type = 'BASE TABLE'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    for (table,) in &tables {
        for col in ["created_at", "updated_at"] {
            let data_type: Option<String> = sqlx::query_scalar(
                "SELECT data_type
                 FROM information_schema.columns
                 WHERE table_schema = 'public' AND table_name = $1 AND column_name = $2",
            )
            .bind(table)
            .bind(col)
            .fetch_optional(&pool)
            .await
            .unwrap();

            let data_type =
                data_type.unwrap_or_else(|| panic!("Table {table} is missing column {col}"));
            assert_eq!(
                data_type, "timestamp with time zone",
                "Table {table}.{col} should be timestamptz"
            );
        }

        let triggers: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM information_schema.triggers
             WHERE event_object_table = $1 AND trigger_name = 'set_updated_at'",
        )
        .bind(table)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert!(triggers > 0, "Table {table} is missing the set_updated_at trigger");
    }
}

/// Money columns are exact decimals.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_money_columns_are_numeric(pool: PgPool) {
    let columns = [
        ("projects", "contract_amount"),
        ("projects", "total_client_payment"),
        ("projects", "remaining_balance"),
        ("payments", "amount"),
        ("design_projects", "total_received"),
        ("build_projects", "materials_cost"),
    ];
    for (table, col) in columns {
        let data_type: String = sqlx::query_scalar(
            "SELECT data_type FROM information_schema.columns
             WHERE table_schema = 'public' AND table_name = $1 AND column_name = $2",
        )
        .bind(table)
        .bind(col)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(data_type, "numeric", "{table}.{col} should be numeric");
    }
}
