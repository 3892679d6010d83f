//! Gallery API handlers

use axum::{
    Json,
    extract::{Extension, Path, State},
};
use serde::Serialize;
use shared::models::{
    Gallery, GalleryCreate, GalleryUpdate, GuestLead, Photo, PhotoCreate, PhotoForClient,
};

use crate::core::ServerState;
use crate::db::repository::{
    appointment as appointment_repo, gallery as gallery_repo, guest_lead as guest_lead_repo,
    photo as photo_repo,
};
use crate::downloads;
use crate::tenant::{TenantContext, ensure_tenant};
use crate::utils::{AppError, AppResponse, AppResult, ok};

/// POST /api/galleries - admin create (optionally linked to an appointment)
pub async fn create(
    State(state): State<ServerState>,
    Extension(ctx): Extension<TenantContext>,
    Json(payload): Json<GalleryCreate>,
) -> AppResult<Json<AppResponse<Gallery>>> {
    if payload.name.trim().is_empty() {
        return Err(AppError::validation("Gallery name must not be empty"));
    }
    if let Some(appointment_id) = payload.appointment_id {
        let appointment = appointment_repo::find_by_id(&state.pool, ctx.tenant_id, appointment_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Appointment {appointment_id}")))?;
        ensure_tenant(&ctx, appointment.tenant_id)?;
        if gallery_repo::find_by_appointment(&state.pool, ctx.tenant_id, appointment_id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "Appointment {appointment_id} already has a session gallery"
            )));
        }
    }

    let gallery = gallery_repo::create(&state.pool, ctx.tenant_id, payload).await?;
    Ok(ok(gallery))
}

/// GET /api/galleries - admin list
pub async fn list(
    State(state): State<ServerState>,
    Extension(ctx): Extension<TenantContext>,
) -> AppResult<Json<AppResponse<Vec<Gallery>>>> {
    let galleries = gallery_repo::find_all(&state.pool, ctx.tenant_id).await?;
    Ok(ok(galleries))
}

/// GET /api/galleries/{id} - admin detail
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(ctx): Extension<TenantContext>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<Gallery>>> {
    let gallery = gallery_repo::find_by_id(&state.pool, ctx.tenant_id, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Gallery {id}")))?;
    Ok(ok(gallery))
}

/// PUT /api/galleries/{id} - admin update (includes the download unlock
/// override consulted by the permission gate)
pub async fn update(
    State(state): State<ServerState>,
    Extension(ctx): Extension<TenantContext>,
    Path(id): Path<i64>,
    Json(payload): Json<GalleryUpdate>,
) -> AppResult<Json<AppResponse<Gallery>>> {
    let gallery = gallery_repo::update(&state.pool, ctx.tenant_id, id, payload).await?;
    Ok(ok(gallery))
}

/// POST /api/galleries/{id}/photos - admin: register an uploaded photo
pub async fn add_photo(
    State(state): State<ServerState>,
    Extension(ctx): Extension<TenantContext>,
    Path(id): Path<i64>,
    Json(payload): Json<PhotoCreate>,
) -> AppResult<Json<AppResponse<Photo>>> {
    let gallery = gallery_repo::find_by_id(&state.pool, ctx.tenant_id, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Gallery {id}")))?;
    ensure_tenant(&ctx, gallery.tenant_id)?;

    if payload.title.trim().is_empty() {
        return Err(AppError::validation("Photo title must not be empty"));
    }

    let photo = photo_repo::create(&state.pool, ctx.tenant_id, gallery.id, payload).await?;
    Ok(ok(photo))
}

/// GET /api/galleries/{id}/photos - admin photo list
pub async fn list_photos(
    State(state): State<ServerState>,
    Extension(ctx): Extension<TenantContext>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<Vec<Photo>>>> {
    let photos = photo_repo::list_by_gallery(&state.pool, ctx.tenant_id, id).await?;
    Ok(ok(photos))
}

/// GET /api/galleries/{id}/leads - admin: guest leads captured for this
/// gallery (marketing export)
pub async fn list_leads(
    State(state): State<ServerState>,
    Extension(ctx): Extension<TenantContext>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<Vec<GuestLead>>>> {
    let leads = guest_lead_repo::list_by_gallery(&state.pool, ctx.tenant_id, id).await?;
    Ok(ok(leads))
}

/// Public stock-gallery view: no client identity, favorites absent.
#[derive(Serialize)]
pub struct PublicGalleryView {
    pub gallery_id: i64,
    pub name: String,
    pub price_per_photo: f64,
    pub photos: Vec<PhotoForClient>,
}

/// GET /api/public-galleries/{slug} - public sellable gallery
pub async fn public_view(
    State(state): State<ServerState>,
    Extension(ctx): Extension<TenantContext>,
    Path(slug): Path<String>,
) -> AppResult<Json<AppResponse<PublicGalleryView>>> {
    let gallery = gallery_repo::find_by_public_slug(&state.pool, ctx.tenant_id, &slug)
        .await?
        .ok_or_else(|| AppError::not_found("This gallery is not available"))?;

    // Standalone galleries only - session galleries stay behind the
    // client email scope.
    if gallery.appointment_id.is_some() {
        return Err(AppError::not_found("This gallery is not available"));
    }

    let mut photos =
        photo_repo::list_for_client(&state.pool, ctx.tenant_id, gallery.id, "").await?;
    let permission = downloads::check_permission(&state, &ctx, gallery.id).await?;
    downloads::apply_policy(&mut photos, &permission);

    Ok(ok(PublicGalleryView {
        gallery_id: gallery.id,
        name: gallery.name,
        price_per_photo: gallery.price_per_photo,
        photos,
    }))
}
