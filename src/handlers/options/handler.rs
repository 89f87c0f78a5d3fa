//! Booking option handler implementations

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE},
    error::{AppError, AppResult},
    lang::get_string,
    middleware::auth::{AuthenticatedUser, CurrentSession},
    models::{capabilities_for_role, Capability},
    services::{AvailabilityService, BookOutcome, BookingService, OptionService},
    session::SessionStore,
    state::AppState,
};

use super::{
    request::{AvailabilityQuery, CreateOptionRequest, ListOptionsQuery, UpdateOptionRequest},
    response::{AvailabilityResponse, BookResponse, OptionResponse, OptionsListResponse},
};

fn require_manage(user: &AuthenticatedUser) -> AppResult<()> {
    if capabilities_for_role(&user.role).contains(&Capability::ManageOptions) {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Managing booking options requires the manage capability".to_string(),
        ))
    }
}

/// List options of a booking instance
pub async fn list_options(
    State(state): State<AppState>,
    Query(query): Query<ListOptionsQuery>,
) -> AppResult<Json<OptionsListResponse>> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);

    let options = OptionService::list_options(
        state.db(),
        &query.booking_id,
        per_page as i64,
        ((page - 1) * per_page) as i64,
    )
    .await?;

    Ok(Json(OptionsListResponse {
        options: options.into_iter().map(Into::into).collect(),
        page,
        per_page,
    }))
}

/// Create a new booking option
pub async fn create_option(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<CreateOptionRequest>,
) -> AppResult<(StatusCode, Json<OptionResponse>)> {
    payload.validate()?;
    require_manage(&auth_user)?;

    let option = OptionService::create_option(state.db(), payload).await?;
    Ok((StatusCode::CREATED, Json(option.into())))
}

/// Get a specific option
pub async fn get_option(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<OptionResponse>> {
    let option = OptionService::get_option(state.db(), &id).await?;
    Ok(Json(option.into()))
}

/// Update an option
pub async fn update_option(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOptionRequest>,
) -> AppResult<Json<OptionResponse>> {
    payload.validate()?;
    require_manage(&auth_user)?;

    let option = OptionService::update_option(state.db(), &id, payload).await?;
    Ok(Json(option.into()))
}

/// Delete an option
pub async fn delete_option(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    require_manage(&auth_user)?;
    OptionService::delete_option(state.db(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Evaluate the availability chain for the current session.
pub async fn availability(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<Uuid>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<AvailabilityResponse>> {
    let full = query.full.unwrap_or(false);
    let settings = OptionService::get_settings(state.db(), &id).await?;

    let (ctx, status) =
        AvailabilityService::evaluate(state.db(), state.chain(), &settings, session).await?;

    let button = state.chain().render_button(&settings, &ctx, full, true);
    let pre_pages = state.chain().render_pre_pages(id, &ctx);
    let verdicts = full.then(|| state.chain().full_status(&settings, &ctx, true));

    // Rendering the login button may have stashed a return URL; persist it
    // for the post-login redirect if the client told us its session key.
    if let Some(url) = ctx.stash.take_wants_url() {
        if let Some(session_key) = query.session_key.as_deref() {
            state.session_store().set_wants_url(session_key, &url).await?;
        }
    }

    Ok(Json(AvailabilityResponse {
        bookable: status.bookable,
        blocking: status.blocking,
        verdicts,
        button,
        pre_pages,
    }))
}

/// Attempt to book the option for the current user.
pub async fn book(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<Uuid>,
) -> AppResult<(StatusCode, Json<BookResponse>)> {
    let settings = OptionService::get_settings(state.db(), &id).await?;
    let ctx = AvailabilityService::build_context(state.db(), &settings, session).await?;

    let outcome = BookingService::book(state.db(), state.chain(), &settings, &ctx).await?;
    let response = match outcome {
        BookOutcome::Booked(answer) => BookResponse {
            status: "booked".to_string(),
            message: get_string("booking_confirmed"),
            answer_id: answer.id,
        },
        BookOutcome::Waitlisted(answer) => BookResponse {
            status: "waitlisted".to_string(),
            message: get_string("booking_waitlisted"),
            answer_id: answer.id,
        },
    };

    Ok((StatusCode::CREATED, Json(response)))
}
