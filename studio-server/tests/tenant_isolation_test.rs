//! Tenant resolution and isolation tests
//!
//! Every lookup is scoped by the resolved tenant; an id that exists under
//! another tenant behaves exactly like one that does not exist at all.

mod common;

use shared::models::{SelectionToggle, SubscriptionStatus};
use studio_server::db::repository::appointment as appointment_repo;
use studio_server::{AppError, galleries, lifecycle, orders, tenant};

#[tokio::test]
async fn host_resolution_maps_subdomains() {
    let env = common::setup().await;

    let ctx = tenant::resolve(&env.state, "aperture.lumen.photos")
        .await
        .expect("resolve subdomain");
    assert_eq!(ctx.tenant_id, env.ctx.tenant_id);

    // Port is ignored, case is normalized
    let ctx = tenant::resolve(&env.state, "Aperture.Lumen.Photos:3000")
        .await
        .expect("resolve with port");
    assert_eq!(ctx.tenant_id, env.ctx.tenant_id);

    // Unknown hosts fail closed
    let err = tenant::resolve(&env.state, "nobody.lumen.photos")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    // Nested labels do not resolve
    let err = tenant::resolve(&env.state, "x.aperture.lumen.photos")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn cancelled_tenants_are_hard_denied() {
    let env = common::setup().await;
    common::insert_tenant(&env.state, "ghost", "CANCELLED").await;

    let err = tenant::resolve(&env.state, "ghost.lumen.photos")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn paused_tenants_resolve_read_only() {
    let env = common::setup().await;
    common::insert_tenant(&env.state, "resting", "PAUSED").await;

    let ctx = tenant::resolve(&env.state, "resting.lumen.photos")
        .await
        .expect("paused tenants still resolve");
    assert_eq!(ctx.subscription_status, SubscriptionStatus::Paused);
    assert!(ctx.is_read_only());
}

#[tokio::test]
async fn appointment_ids_do_not_cross_tenants() {
    let env = common::setup().await;
    let ctx_b = common::insert_tenant(&env.state, "rival", "ACTIVE").await;

    // Tenant A owns the appointment
    let (appointment, _, photos) =
        common::seed_session_awaiting_selection(&env.state, &env.ctx, "casey@client.test", 1).await;

    // Tenant B's scope sees nothing, reads or writes
    assert!(
        appointment_repo::find_by_id(&env.state.pool, ctx_b.tenant_id, appointment.id)
            .await
            .expect("query")
            .is_none()
    );

    let err = lifecycle::update_status(
        &env.state,
        &ctx_b,
        appointment.id,
        shared::models::AppointmentStatus::Confirmed,
        "admin@rival",
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = galleries::get_for_client(&env.state, &ctx_b, appointment.id, "casey@client.test")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = galleries::toggle_selection(
        &env.state,
        &ctx_b,
        SelectionToggle {
            photo_id: photos[0].id,
            client_email: "casey@client.test".into(),
            is_selected: true,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn orders_do_not_cross_tenants() {
    let env = common::setup().await;
    let ctx_b = common::insert_tenant(&env.state, "rival", "ACTIVE").await;

    let appointment = common::seed_appointment(&env.state, &env.ctx, "casey@client.test").await;
    let (_, photos) =
        common::seed_gallery_with_photos(&env.state, &env.ctx, appointment.id, 1).await;

    let detail = orders::create_order(
        &env.state,
        &env.ctx,
        shared::models::OrderCreate {
            customer_name: "Robin".into(),
            customer_email: "robin@buyer.test".into(),
            gallery_id: None,
            items: vec![shared::models::OrderItemInput {
                photo_id: photos[0].id,
                title: "Frame".into(),
                price: 25.0,
            }],
            discount_amount: None,
            payment_method: None,
        },
        "admin@test",
    )
    .await
    .expect("create order");

    // Tenant B cannot confirm tenant A's order - and the failed attempt
    // leaves it untouched
    let err = orders::confirm_payment(&env.state, &ctx_b, detail.order.id, "admin@rival")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let order = studio_server::db::repository::order::find_by_id(
        &env.state.pool,
        env.ctx.tenant_id,
        detail.order.id,
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(order.status, shared::models::OrderStatus::Pending);
    assert!(order.paid_at.is_none());

    // Tenant B also cannot reference tenant A's photos in a new order
    let err = orders::create_order(
        &env.state,
        &ctx_b,
        shared::models::OrderCreate {
            customer_name: "Mallory".into(),
            customer_email: "mallory@rival.test".into(),
            gallery_id: None,
            items: vec![shared::models::OrderItemInput {
                photo_id: photos[0].id,
                title: "Stolen frame".into(),
                price: 1.0,
            }],
            discount_amount: None,
            payment_method: None,
        },
        "admin@rival",
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
