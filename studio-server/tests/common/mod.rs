//! Shared test fixtures
//!
//! Each test gets a fresh SQLite database in a temp directory, one seeded
//! tenant, and a resolved `TenantContext` - the same shape every service
//! call receives in production.

use shared::models::{
    AppointmentCreate, AppointmentStatus, GalleryCreate, PhotoCreate, ServiceCreate,
};
use shared::models::{Appointment, Gallery, Photo, Service};
use studio_server::db::repository::{
    appointment as appointment_repo, gallery as gallery_repo, photo as photo_repo,
    service as service_repo,
};
use studio_server::{Config, ServerState, TenantContext, lifecycle};

pub struct TestEnv {
    pub state: ServerState,
    pub ctx: TenantContext,
    // Dropping the TempDir deletes the database; hold it for the test's life.
    _work_dir: tempfile::TempDir,
}

pub async fn setup() -> TestEnv {
    let work_dir = tempfile::tempdir().expect("create temp work dir");
    let config = Config::with_overrides(work_dir.path().to_string_lossy().to_string(), 0);
    let state = ServerState::initialize(&config)
        .await
        .expect("initialize server state");

    let ctx = insert_tenant(&state, "aperture", "ACTIVE").await;

    TestEnv {
        state,
        ctx,
        _work_dir: work_dir,
    }
}

/// Insert a tenant row directly (provisioning is upstream of the server)
/// and return its resolved context.
pub async fn insert_tenant(
    state: &ServerState,
    subdomain: &str,
    subscription_status: &str,
) -> TenantContext {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO tenant (id, name, subdomain, custom_domain, plan_tier, subscription_status, created_at, updated_at) VALUES (?, ?, ?, NULL, 'PRO', ?, ?, ?)",
    )
    .bind(id)
    .bind(format!("{subdomain} studio"))
    .bind(subdomain)
    .bind(subscription_status)
    .bind(now)
    .bind(now)
    .execute(&state.pool)
    .await
    .expect("insert tenant");

    let tenant = studio_server::db::repository::tenant::find_by_id(&state.pool, id)
        .await
        .expect("query tenant")
        .expect("tenant row");
    TenantContext::from_tenant(&tenant)
}

pub async fn seed_service(state: &ServerState, ctx: &TenantContext) -> Service {
    service_repo::create(
        &state.pool,
        ctx.tenant_id,
        ServiceCreate {
            name: "Portrait session".into(),
            description: None,
            base_price: 180.0,
            duration_minutes: 90,
        },
    )
    .await
    .expect("create service")
}

pub async fn seed_appointment(
    state: &ServerState,
    ctx: &TenantContext,
    client_email: &str,
) -> Appointment {
    let service = seed_service(state, ctx).await;
    appointment_repo::create(
        &state.pool,
        ctx.tenant_id,
        AppointmentCreate {
            service_id: service.id,
            client_name: "Casey Client".into(),
            client_email: client_email.into(),
            client_phone: None,
            scheduled_at: shared::util::now_millis(),
            notes: None,
        },
        service.base_price,
    )
    .await
    .expect("create appointment")
}

pub async fn seed_gallery_with_photos(
    state: &ServerState,
    ctx: &TenantContext,
    appointment_id: i64,
    photo_count: usize,
) -> (Gallery, Vec<Photo>) {
    let gallery = gallery_repo::create(
        &state.pool,
        ctx.tenant_id,
        GalleryCreate {
            appointment_id: Some(appointment_id),
            name: "Session gallery".into(),
            access_password: None,
            price_per_photo: Some(25.0),
        },
    )
    .await
    .expect("create gallery");

    let mut photos = Vec::with_capacity(photo_count);
    for i in 0..photo_count {
        let photo = photo_repo::create(
            &state.pool,
            ctx.tenant_id,
            gallery.id,
            PhotoCreate {
                title: format!("Frame {i}"),
                thumbnail_url: format!("https://cdn.test/{i}/thumb.jpg"),
                preview_url: format!("https://cdn.test/{i}/preview.jpg"),
                original_url: format!("https://cdn.test/{i}/original.jpg"),
                is_for_sale: Some(true),
                price: Some(25.0),
            },
        )
        .await
        .expect("create photo");
        photos.push(photo);
    }

    (gallery, photos)
}

/// Walk an appointment through the admin chain up to `AWAITING_SELECTION`,
/// exercising the state machine rather than poking the database.
pub async fn advance_to_awaiting_selection(
    state: &ServerState,
    ctx: &TenantContext,
    appointment_id: i64,
) {
    for status in [
        AppointmentStatus::Confirmed,
        AppointmentStatus::SessionDone,
        AppointmentStatus::Editing,
        AppointmentStatus::AwaitingSelection,
    ] {
        lifecycle::update_status(state, ctx, appointment_id, status, "admin@test")
            .await
            .unwrap_or_else(|e| panic!("advance to {status:?}: {e}"));
    }
}

/// A session in `AWAITING_SELECTION` with a linked gallery of `photo_count`
/// photos - the starting point for selection and approval tests.
pub async fn seed_session_awaiting_selection(
    state: &ServerState,
    ctx: &TenantContext,
    client_email: &str,
    photo_count: usize,
) -> (Appointment, Gallery, Vec<Photo>) {
    let appointment = seed_appointment(state, ctx, client_email).await;
    let (gallery, photos) =
        seed_gallery_with_photos(state, ctx, appointment.id, photo_count).await;
    advance_to_awaiting_selection(state, ctx, appointment.id).await;
    let appointment = appointment_repo::find_by_id(&state.pool, ctx.tenant_id, appointment.id)
        .await
        .expect("query appointment")
        .expect("appointment row");
    (appointment, gallery, photos)
}
