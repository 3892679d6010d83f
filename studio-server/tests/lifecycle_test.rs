//! Appointment lifecycle integration tests
//!
//! Covers the ordered status chain, the guarded edges, the approval gate's
//! atomic flag+status write, and the client-access consequences of
//! cancellation.

mod common;

use shared::models::{AppointmentStatus, SelectionToggle};
use studio_server::db::repository::{appointment as appointment_repo, photo as photo_repo};
use studio_server::{AppError, galleries, lifecycle};

async fn favorite(
    env: &common::TestEnv,
    photo_id: i64,
    email: &str,
) {
    galleries::toggle_selection(
        &env.state,
        &env.ctx,
        SelectionToggle {
            photo_id,
            client_email: email.into(),
            is_selected: true,
        },
    )
    .await
    .expect("toggle favorite");
}

#[tokio::test]
async fn full_delivery_flow() {
    let env = common::setup().await;
    let email = "casey@client.test";
    let (appointment, _gallery, photos) =
        common::seed_session_awaiting_selection(&env.state, &env.ctx, email, 3).await;

    // Client favorites photo A and B, not C
    favorite(&env, photos[0].id, email).await;
    favorite(&env, photos[1].id, email).await;

    // Approval advances to FINAL_EDITING and locks the selection
    let approved = lifecycle::approve_selection(&env.state, &env.ctx, appointment.id, email)
        .await
        .expect("approve selection");
    assert_eq!(approved.status, AppointmentStatus::FinalEditing);
    assert!(approved.selection_approved);
    assert!(approved.selection_approved_at.is_some());

    // Delivery before finished assets exist is rejected without mutation
    let err = lifecycle::update_status(
        &env.state,
        &env.ctx,
        appointment.id,
        AppointmentStatus::Delivered,
        "admin@test",
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::IncompleteDelivery(_)));

    let unchanged = appointment_repo::find_by_id(&env.state.pool, env.ctx.tenant_id, appointment.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.status, AppointmentStatus::FinalEditing);

    // Finished assets for both favorites unlock delivery
    for photo in &photos[..2] {
        photo_repo::set_edited_url(
            &env.state.pool,
            env.ctx.tenant_id,
            photo.id,
            "https://cdn.test/final.jpg",
        )
        .await
        .expect("attach edited asset");
    }

    let delivered = lifecycle::update_status(
        &env.state,
        &env.ctx,
        appointment.id,
        AppointmentStatus::Delivered,
        "admin@test",
    )
    .await
    .expect("deliver");
    assert_eq!(delivered.status, AppointmentStatus::Delivered);
}

#[tokio::test]
async fn approval_with_zero_favorites_fails_and_mutates_nothing() {
    let env = common::setup().await;
    let email = "casey@client.test";
    let (appointment, _, _) =
        common::seed_session_awaiting_selection(&env.state, &env.ctx, email, 3).await;

    let err = lifecycle::approve_selection(&env.state, &env.ctx, appointment.id, email)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NoSelection(_)));

    let after = appointment_repo::find_by_id(&env.state.pool, env.ctx.tenant_id, appointment.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(after.status, AppointmentStatus::AwaitingSelection);
    assert!(!after.selection_approved);
    assert!(after.selection_approved_at.is_none());
}

#[tokio::test]
async fn approval_is_idempotent_for_retries() {
    let env = common::setup().await;
    let email = "casey@client.test";
    let (appointment, _, photos) =
        common::seed_session_awaiting_selection(&env.state, &env.ctx, email, 2).await;
    favorite(&env, photos[0].id, email).await;

    let first = lifecycle::approve_selection(&env.state, &env.ctx, appointment.id, email)
        .await
        .expect("first approval");
    let second = lifecycle::approve_selection(&env.state, &env.ctx, appointment.id, email)
        .await
        .expect("retry is a no-op, not an error");

    assert_eq!(first.selection_approved_at, second.selection_approved_at);
    assert_eq!(second.status, AppointmentStatus::FinalEditing);
}

#[tokio::test]
async fn approval_is_atomic_under_concurrent_calls() {
    let env = common::setup().await;
    let email = "casey@client.test";
    let (appointment, _, photos) =
        common::seed_session_awaiting_selection(&env.state, &env.ctx, email, 2).await;
    favorite(&env, photos[0].id, email).await;

    let mut handles = Vec::new();
    for _ in 0..8 {
        let state = env.state.clone();
        let ctx = env.ctx.clone();
        let appointment_id = appointment.id;
        let email = email.to_string();
        handles.push(tokio::spawn(async move {
            lifecycle::approve_selection(&state, &ctx, appointment_id, &email).await
        }));
    }

    for handle in handles {
        let result = handle.await.expect("task join");
        // Losers of the race resolve idempotently; every caller sees the
        // approved appointment, never a half-written state.
        let appointment = result.expect("approval or idempotent retry");
        assert_eq!(appointment.status, AppointmentStatus::FinalEditing);
        assert!(appointment.selection_approved);
    }

    let after = appointment_repo::find_by_id(&env.state.pool, env.ctx.tenant_id, appointment.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(after.status, AppointmentStatus::FinalEditing);
    assert!(after.selection_approved);
    assert!(after.selection_approved_at.is_some());
}

#[tokio::test]
async fn wrong_email_cannot_approve() {
    let env = common::setup().await;
    let (appointment, _, photos) =
        common::seed_session_awaiting_selection(&env.state, &env.ctx, "casey@client.test", 2).await;
    favorite(&env, photos[0].id, "casey@client.test").await;

    let err =
        lifecycle::approve_selection(&env.state, &env.ctx, appointment.id, "mallory@evil.test")
            .await
            .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn chain_rejects_skips_and_reversals() {
    let env = common::setup().await;
    let appointment = common::seed_appointment(&env.state, &env.ctx, "casey@client.test").await;

    // Skip: PENDING → SESSION_DONE
    let err = lifecycle::update_status(
        &env.state,
        &env.ctx,
        appointment.id,
        AppointmentStatus::SessionDone,
        "admin@test",
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));

    lifecycle::update_status(
        &env.state,
        &env.ctx,
        appointment.id,
        AppointmentStatus::Confirmed,
        "admin@test",
    )
    .await
    .expect("confirm");

    // Reversal: CONFIRMED → PENDING
    let err = lifecycle::update_status(
        &env.state,
        &env.ctx,
        appointment.id,
        AppointmentStatus::Pending,
        "admin@test",
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));
}

#[tokio::test]
async fn admin_cannot_take_the_approval_edge() {
    let env = common::setup().await;
    let (appointment, _, _) =
        common::seed_session_awaiting_selection(&env.state, &env.ctx, "casey@client.test", 1).await;

    let err = lifecycle::update_status(
        &env.state,
        &env.ctx,
        appointment.id,
        AppointmentStatus::FinalEditing,
        "admin@test",
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));
}

#[tokio::test]
async fn editing_requires_uploaded_photos() {
    let env = common::setup().await;
    let appointment = common::seed_appointment(&env.state, &env.ctx, "casey@client.test").await;
    // Linked gallery exists but holds no photos
    common::seed_gallery_with_photos(&env.state, &env.ctx, appointment.id, 0).await;

    for status in [
        AppointmentStatus::Confirmed,
        AppointmentStatus::SessionDone,
        AppointmentStatus::Editing,
    ] {
        lifecycle::update_status(&env.state, &env.ctx, appointment.id, status, "admin@test")
            .await
            .expect("advance");
    }

    let err = lifecycle::update_status(
        &env.state,
        &env.ctx,
        appointment.id,
        AppointmentStatus::AwaitingSelection,
        "admin@test",
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::PreconditionFailed(_)));
}

#[tokio::test]
async fn cancellation_is_terminal_and_revokes_client_access() {
    let env = common::setup().await;
    let email = "casey@client.test";
    let (appointment, _, _) =
        common::seed_session_awaiting_selection(&env.state, &env.ctx, email, 2).await;

    lifecycle::update_status(
        &env.state,
        &env.ctx,
        appointment.id,
        AppointmentStatus::Cancelled,
        "admin@test",
    )
    .await
    .expect("cancel");

    // No way back
    let err = lifecycle::update_status(
        &env.state,
        &env.ctx,
        appointment.id,
        AppointmentStatus::Confirmed,
        "admin@test",
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));

    // Client-facing access is revoked; admin can still read the row
    let err = galleries::get_for_client(&env.state, &env.ctx, appointment.id, email)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert!(
        appointment_repo::find_by_id(&env.state.pool, env.ctx.tenant_id, appointment.id)
            .await
            .unwrap()
            .is_some()
    );
}

#[tokio::test]
async fn delivered_cannot_be_cancelled() {
    let env = common::setup().await;
    let email = "casey@client.test";
    let (appointment, _, photos) =
        common::seed_session_awaiting_selection(&env.state, &env.ctx, email, 1).await;
    favorite(&env, photos[0].id, email).await;
    lifecycle::approve_selection(&env.state, &env.ctx, appointment.id, email)
        .await
        .expect("approve");
    photo_repo::set_edited_url(
        &env.state.pool,
        env.ctx.tenant_id,
        photos[0].id,
        "https://cdn.test/final.jpg",
    )
    .await
    .expect("edited");
    lifecycle::update_status(
        &env.state,
        &env.ctx,
        appointment.id,
        AppointmentStatus::Delivered,
        "admin@test",
    )
    .await
    .expect("deliver");

    let err = lifecycle::update_status(
        &env.state,
        &env.ctx,
        appointment.id,
        AppointmentStatus::Cancelled,
        "admin@test",
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));
}
