//! Gallery store, selection idempotence, download gate and guest wall tests

mod common;

use shared::models::{CommentCreate, GalleryUpdate, GuestRegister, SelectionToggle};
use studio_server::db::repository::{
    appointment as appointment_repo, gallery as gallery_repo, guest_lead as guest_lead_repo,
    selection as selection_repo,
};
use studio_server::{AppError, downloads, galleries, guests};

#[tokio::test]
async fn toggle_is_idempotent() {
    let env = common::setup().await;
    let email = "casey@client.test";
    let (_, _, photos) =
        common::seed_session_awaiting_selection(&env.state, &env.ctx, email, 2).await;

    let toggle = SelectionToggle {
        photo_id: photos[0].id,
        client_email: email.into(),
        is_selected: true,
    };

    let first = galleries::toggle_selection(&env.state, &env.ctx, toggle.clone())
        .await
        .expect("first toggle");
    let second = galleries::toggle_selection(&env.state, &env.ctx, toggle)
        .await
        .expect("repeat toggle");

    // Same row re-used, nothing rewritten on the no-op repeat
    assert_eq!(first.id, second.id);
    assert_eq!(first.updated_at, second.updated_at);
    assert!(second.is_favorite);

    let appointment_id = appointment_id_of(&env, photos[0].id).await;
    let favorites = selection_repo::count_favorites_for_appointment(
        &env.state.pool,
        env.ctx.tenant_id,
        appointment_id,
        email,
    )
    .await
    .expect("count");
    assert_eq!(favorites, 1);
}

#[tokio::test]
async fn toggle_flips_state_in_place() {
    let env = common::setup().await;
    let email = "casey@client.test";
    let (appointment, _, photos) =
        common::seed_session_awaiting_selection(&env.state, &env.ctx, email, 1).await;

    for is_selected in [true, false, true] {
        galleries::toggle_selection(
            &env.state,
            &env.ctx,
            SelectionToggle {
                photo_id: photos[0].id,
                client_email: email.into(),
                is_selected,
            },
        )
        .await
        .expect("toggle");
    }

    let favorites = selection_repo::count_favorites_for_appointment(
        &env.state.pool,
        env.ctx.tenant_id,
        appointment.id,
        email,
    )
    .await
    .expect("count");
    assert_eq!(favorites, 1);
}

#[tokio::test]
async fn comments_append_and_reject_empty() {
    let env = common::setup().await;
    let email = "casey@client.test";
    let (appointment, _, photos) =
        common::seed_session_awaiting_selection(&env.state, &env.ctx, email, 1).await;

    let err = galleries::add_comment(
        &env.state,
        &env.ctx,
        photos[0].id,
        CommentCreate {
            client_email: email.into(),
            body: "   ".into(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    for body in ["love this one", "crop a little tighter?"] {
        galleries::add_comment(
            &env.state,
            &env.ctx,
            photos[0].id,
            CommentCreate {
                client_email: email.into(),
                body: body.into(),
            },
        )
        .await
        .expect("comment");
    }

    let view = galleries::get_for_client(&env.state, &env.ctx, appointment.id, email)
        .await
        .expect("client view");
    assert_eq!(view.photos[0].comment_count, 2);
}

#[tokio::test]
async fn client_view_requires_matching_email() {
    let env = common::setup().await;
    let (appointment, _, _) =
        common::seed_session_awaiting_selection(&env.state, &env.ctx, "casey@client.test", 1).await;

    let err = galleries::get_for_client(&env.state, &env.ctx, appointment.id, "other@person.test")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    // Email matching is case-insensitive - same client, different casing
    let view =
        galleries::get_for_client(&env.state, &env.ctx, appointment.id, "Casey@Client.TEST")
            .await
            .expect("case-insensitive match");
    assert_eq!(view.appointment.id, appointment.id);
}

#[tokio::test]
async fn download_gate_is_pure_and_honors_admin_unlock() {
    let env = common::setup().await;
    let appointment = common::seed_appointment(&env.state, &env.ctx, "casey@client.test").await;
    let (gallery, _) =
        common::seed_gallery_with_photos(&env.state, &env.ctx, appointment.id, 1).await;

    // Default deny, and stable across repeated calls
    let first = downloads::check_permission(&env.state, &env.ctx, gallery.id)
        .await
        .expect("gate");
    let second = downloads::check_permission(&env.state, &env.ctx, gallery.id)
        .await
        .expect("gate");
    assert!(!first.allowed);
    assert_eq!(first.allowed, second.allowed);
    assert_eq!(first.granted_by, second.granted_by);

    // Admin override outranks payment state
    gallery_repo::update(
        &env.state.pool,
        env.ctx.tenant_id,
        gallery.id,
        GalleryUpdate {
            name: None,
            access_password: None,
            price_per_photo: None,
            downloads_unlocked: Some(true),
        },
    )
    .await
    .expect("unlock");

    let unlocked = downloads::check_permission(&env.state, &env.ctx, gallery.id)
        .await
        .expect("gate");
    assert!(unlocked.allowed);
    assert_eq!(unlocked.granted_by, "admin_unlock");
}

#[tokio::test]
async fn client_view_strips_originals_until_allowed() {
    let env = common::setup().await;
    let email = "casey@client.test";
    let (appointment, gallery, _) =
        common::seed_session_awaiting_selection(&env.state, &env.ctx, email, 1).await;

    let mut view = galleries::get_for_client(&env.state, &env.ctx, appointment.id, email)
        .await
        .expect("view");
    let permission = downloads::check_permission(&env.state, &env.ctx, gallery.id)
        .await
        .expect("gate");
    downloads::apply_policy(&mut view.photos, &permission);

    assert!(view.photos[0].original_url.is_none());
    assert!(!view.photos[0].preview_url.is_empty());
}

#[tokio::test]
async fn guest_wall_records_every_unlock() {
    let env = common::setup().await;
    let email = "casey@client.test";
    let (appointment, gallery, _) =
        common::seed_session_awaiting_selection(&env.state, &env.ctx, email, 2).await;

    let slug = shared::util::public_slug();
    appointment_repo::set_share_slug(&env.state.pool, env.ctx.tenant_id, appointment.id, &slug)
        .await
        .expect("issue slug");

    let register = GuestRegister {
        email: "granny@family.test".into(),
        name: Some("Granny".into()),
        relationship: Some("grandmother".into()),
    };

    let granted = guests::register_guest(&env.state, &env.ctx, &slug, register.clone())
        .await
        .expect("unlock");
    assert_eq!(granted.gallery_id, gallery.id);
    assert_eq!(granted.photos.len(), 2);
    // Unpaid album: watermarked previews only
    assert!(granted.photos.iter().all(|p| p.original_url.is_none()));

    // Repeat email writes another row - dedup is a reporting concern
    guests::register_guest(&env.state, &env.ctx, &slug, register)
        .await
        .expect("repeat unlock");
    let leads = guest_lead_repo::list_by_gallery(&env.state.pool, env.ctx.tenant_id, gallery.id)
        .await
        .expect("leads");
    assert_eq!(leads.len(), 2);
}

#[tokio::test]
async fn guest_wall_rejects_unknown_slug_and_bad_email() {
    let env = common::setup().await;

    let err = guests::register_guest(
        &env.state,
        &env.ctx,
        "nonexistent-slug",
        GuestRegister {
            email: "granny@family.test".into(),
            name: None,
            relationship: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let email = "casey@client.test";
    let (appointment, _, _) =
        common::seed_session_awaiting_selection(&env.state, &env.ctx, email, 1).await;
    let slug = shared::util::public_slug();
    appointment_repo::set_share_slug(&env.state.pool, env.ctx.tenant_id, appointment.id, &slug)
        .await
        .expect("issue slug");

    let err = guests::register_guest(
        &env.state,
        &env.ctx,
        &slug,
        GuestRegister {
            email: "not-an-email".into(),
            name: None,
            relationship: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

async fn appointment_id_of(env: &common::TestEnv, photo_id: i64) -> i64 {
    let photo = studio_server::db::repository::photo::find_by_id(
        &env.state.pool,
        env.ctx.tenant_id,
        photo_id,
    )
    .await
    .unwrap()
    .unwrap();
    let gallery = gallery_repo::find_by_id(&env.state.pool, env.ctx.tenant_id, photo.gallery_id)
        .await
        .unwrap()
        .unwrap();
    gallery.appointment_id.unwrap()
}
