//! Download Permission Gate
//!
//! Pure decision: may original-resolution assets be served for a gallery?
//! Consulted on every photo-serving request; denial is the default state of
//! an unpaid gallery, not an error.

use serde::Serialize;
use shared::models::PhotoForClient;

use crate::core::ServerState;
use crate::db::repository::{gallery as gallery_repo, order as order_repo};
use crate::tenant::{TenantContext, ensure_tenant};
use crate::utils::{AppError, AppResult};

/// Gate verdict, with the input that decided it.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DownloadPermission {
    pub allowed: bool,
    /// What granted access: "admin_unlock", "paid_order", or "none".
    pub granted_by: &'static str,
}

/// Decide download permission for a gallery.
///
/// Priority order:
/// 1. admin `downloads_unlocked` override on the gallery;
/// 2. an order linked to the gallery with status `PAID` or `COMPLETED`;
/// 3. otherwise denied.
///
/// Side-effect-free: two calls with no intervening order/override mutation
/// return identical results.
pub async fn check_permission(
    state: &ServerState,
    ctx: &TenantContext,
    gallery_id: i64,
) -> AppResult<DownloadPermission> {
    let gallery = gallery_repo::find_by_id(&state.pool, ctx.tenant_id, gallery_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Gallery {gallery_id}")))?;
    ensure_tenant(ctx, gallery.tenant_id)?;

    if gallery.downloads_unlocked {
        return Ok(DownloadPermission {
            allowed: true,
            granted_by: "admin_unlock",
        });
    }

    if order_repo::gallery_has_settled_order(&state.pool, ctx.tenant_id, gallery_id).await? {
        return Ok(DownloadPermission {
            allowed: true,
            granted_by: "paid_order",
        });
    }

    Ok(DownloadPermission {
        allowed: false,
        granted_by: "none",
    })
}

/// Apply a gate verdict to an outgoing photo set: when downloads are not
/// allowed, only the watermarked preview and thumbnail survive.
pub fn apply_policy(photos: &mut [PhotoForClient], permission: &DownloadPermission) {
    if permission.allowed {
        return;
    }
    for photo in photos {
        photo.original_url = None;
        photo.edited_url = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo() -> PhotoForClient {
        PhotoForClient {
            id: 1,
            gallery_id: 2,
            title: "Frame".into(),
            thumbnail_url: "https://cdn.test/t.jpg".into(),
            preview_url: "https://cdn.test/w.jpg".into(),
            original_url: Some("https://cdn.test/o.jpg".into()),
            edited_url: Some("https://cdn.test/e.jpg".into()),
            is_for_sale: true,
            price: Some(25.0),
            is_favorite: false,
            comment_count: 0,
        }
    }

    #[test]
    fn denial_strips_full_resolution() {
        let mut photos = vec![photo()];
        apply_policy(
            &mut photos,
            &DownloadPermission {
                allowed: false,
                granted_by: "none",
            },
        );
        assert!(photos[0].original_url.is_none());
        assert!(photos[0].edited_url.is_none());
        assert!(!photos[0].preview_url.is_empty());
    }

    #[test]
    fn grant_leaves_urls_intact() {
        let mut photos = vec![photo()];
        apply_policy(
            &mut photos,
            &DownloadPermission {
                allowed: true,
                granted_by: "paid_order",
            },
        );
        assert!(photos[0].original_url.is_some());
    }
}
