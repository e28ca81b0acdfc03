//! Handlers for the `/apartments` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use rentora_core::error::CoreError;
use rentora_core::listing::{CreateListing, UpdateListing};
use rentora_core::page::{PageEnvelope, PageMeta};
use rentora_core::types::DbId;
use rentora_db::models::listing::Listing;
use rentora_db::repositories::ListingRepo;

use crate::error::{AppError, AppResult};
use crate::query::ListingQuery;
use crate::state::AppState;

/// POST /api/v1/apartments
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateListing>,
) -> AppResult<(StatusCode, Json<Listing>)> {
    let input = input.validated()?.normalize();
    tracing::info!(unit_name = %input.unit_name, "Creating listing");

    let listing = ListingRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(listing)))
}

/// GET /api/v1/apartments
///
/// Filtered, paginated, sorted listing query. Fetch and count run on one
/// snapshot, so `meta` is always consistent with `data`.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> AppResult<Json<PageEnvelope<Listing>>> {
    let query = query.validated()?;
    let filter = query.filter();
    let page = query.page_request();

    let (data, total) = ListingRepo::list(&state.pool, &filter, &page).await?;

    Ok(Json(PageEnvelope {
        data,
        meta: PageMeta::compute(&page, total),
    }))
}

/// GET /api/v1/apartments/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Listing>> {
    let listing = ListingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Listing",
            id,
        }))?;
    Ok(Json(listing))
}

/// PATCH /api/v1/apartments/{id}
///
/// Sparse merge: absent fields stay untouched, `updated_at` is refreshed.
/// Existence is checked first so a missing row is a 404, distinct from a
/// write that fails mid-flight.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateListing>,
) -> AppResult<Json<Listing>> {
    let input = input.validated()?;

    if !ListingRepo::exists(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Listing",
            id,
        }));
    }

    tracing::info!(id, "Updating listing");
    let listing = ListingRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Listing",
            id,
        }))?;
    Ok(Json(listing))
}

/// DELETE /api/v1/apartments/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if !ListingRepo::exists(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Listing",
            id,
        }));
    }

    tracing::info!(id, "Deleting listing");
    let deleted = ListingRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Listing",
            id,
        }))
    }
}
