//! Rule engine entry points exercised without the HTTP layer.

mod common;

use assert_matches::assert_matches;
use buildbooks_api::engine::submission::ScopeProgressUpdate;
use buildbooks_api::engine::RuleEngine;
use buildbooks_api::error::AppError;
use buildbooks_core::error::CoreError;
use buildbooks_core::lifecycle::{ProjectPhase, RulesConfig};
use buildbooks_db::models::payment::CreatePayment;
use buildbooks_db::models::project::{CreateProject, Project, UpdateProject};
use buildbooks_db::models::scope::CreateScope;
use buildbooks_db::repositories::{BuildProjectRepo, ProjectRepo, ScopeRepo};
use common::{d, RecordingNotifier};
use sqlx::PgPool;

fn new_project(name: &str, phase: Option<&str>) -> CreateProject {
    CreateProject {
        name: name.to_string(),
        client_name: None,
        location: None,
        phase: phase.map(str::to_string),
        status: None,
        contract_amount: Some(d("1000")),
        design_fee: None,
        construction_cost: None,
    }
}

fn scope(name: &str, progress: i32) -> CreateScope {
    CreateScope {
        name: name.to_string(),
        progress_percent: Some(progress),
        weight_percent: None,
        contract_amount: None,
        status: None,
    }
}

async fn create(engine: &RuleEngine<'_>, pool: &PgPool, input: CreateProject) -> Project {
    let project = ProjectRepo::create(pool, &input).await.unwrap();
    engine.after_project_created(&project).await.unwrap();
    project
}

async fn set_phase(pool: &PgPool, id: i64, phase: &str) -> Project {
    let input = UpdateProject {
        phase: Some(phase.to_string()),
        ..UpdateProject::default()
    };
    ProjectRepo::update(pool, id, &input).await.unwrap().unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_targets_are_not_found(pool: PgPool) {
    let notifier = RecordingNotifier::default();
    let engine = RuleEngine::new(&pool, RulesConfig::default(), &notifier);

    let payment = CreatePayment {
        amount: d("10"),
        date_paid: "2026-01-10".parse().unwrap(),
        reference: None,
    };
    assert_matches!(
        engine.record_payment(4242, &payment, 1).await,
        Err(AppError::Core(CoreError::NotFound { entity: "Project", id: 4242 }))
    );
    assert_matches!(
        engine.remove_payment(4242).await,
        Err(AppError::Core(CoreError::NotFound { entity: "Payment", .. }))
    );
    assert_matches!(engine.recompute_overall_progress(4242).await, Ok(None));
    assert_matches!(
        engine.submit_progress("missing", &[]).await,
        Err(AppError::Core(CoreError::NotFoundKey { .. }))
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unchanged_progress_is_not_rewritten(pool: PgPool) {
    let notifier = RecordingNotifier::default();
    let engine = RuleEngine::new(&pool, RulesConfig::default(), &notifier);
    let project = create(&engine, &pool, new_project("Stable", None)).await;
    ScopeRepo::create(&pool, project.id, &scope("Walls", 30)).await.unwrap();

    let first = engine
        .recompute_overall_progress(project.id)
        .await
        .unwrap()
        .unwrap();
    let second = engine
        .recompute_overall_progress(project.id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(first.overall_progress, 30);
    assert_eq!(second.updated_at, first.updated_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn configured_build_marker_drives_provisioning(pool: PgPool) {
    let notifier = RecordingNotifier::default();
    let rules = RulesConfig {
        build_phase: ProjectPhase::Build,
        ..RulesConfig::default()
    };
    let engine = RuleEngine::new(&pool, rules, &notifier);
    let project = create(&engine, &pool, new_project("Custom", None)).await;

    let before = ProjectRepo::find_by_id(&pool, project.id).await.unwrap().unwrap();
    let after = set_phase(&pool, project.id, "FOR_BUILD").await;
    engine.after_project_saved(&before, &after).await.unwrap();
    assert!(BuildProjectRepo::find_by_project(&pool, project.id)
        .await
        .unwrap()
        .is_none());

    let after_build = set_phase(&pool, project.id, "BUILD").await;
    engine.after_project_saved(&after, &after_build).await.unwrap();
    assert!(BuildProjectRepo::find_by_project(&pool, project.id)
        .await
        .unwrap()
        .is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn configured_completed_marker_is_written(pool: PgPool) {
    let notifier = RecordingNotifier::default();
    let rules = RulesConfig::from_markers("FOR_BUILD", "CANCELLED").unwrap();
    let engine = RuleEngine::new(&pool, rules, &notifier);
    let project = create(&engine, &pool, new_project("Odd Config", None)).await;
    ScopeRepo::create(&pool, project.id, &scope("All", 100)).await.unwrap();

    let stored = engine
        .recompute_overall_progress(project.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, "CANCELLED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn submission_with_foreign_scope_is_a_validation_error(pool: PgPool) {
    let notifier = RecordingNotifier::default();
    let engine = RuleEngine::new(&pool, RulesConfig::default(), &notifier);
    let mine = create(&engine, &pool, new_project("Mine", None)).await;
    let theirs = create(&engine, &pool, new_project("Theirs", None)).await;
    let foreign = ScopeRepo::create(&pool, theirs.id, &scope("Theirs", 0))
        .await
        .unwrap();

    let foreman = common::seed_user(&pool, &common::test_config(), "fern", "foreman").await;
    let token = buildbooks_db::repositories::SubmitTokenRepo::create(
        &pool,
        mine.id,
        foreman.id,
        "engine-test-token",
        None,
        None,
    )
    .await
    .unwrap();

    let updates = [ScopeProgressUpdate {
        scope_id: foreign.id,
        progress_percent: 50,
    }];
    assert_matches!(
        engine.submit_progress(&token.token, &updates).await,
        Err(AppError::Core(CoreError::Validation(_)))
    );
}
