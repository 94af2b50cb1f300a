//! API route handlers for the gateway.
//!
//! Authorization model: any authenticated caller may read; manager-only for
//! every write except a volunteer proposing their own dates or withdrawing
//! their own still-proposed shift.

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use chrono::{Local, NaiveDate};
use libroster_core::{RosterError, Volunteer};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

use super::identity::Identity;
use super::server::AppState;

type ApiResponse = (StatusCode, Json<Value>);

fn ok(body: Value) -> ApiResponse {
    (StatusCode::OK, Json(body))
}

fn forbidden(message: &str) -> ApiResponse {
    (
        StatusCode::FORBIDDEN,
        Json(json!({"error": message})),
    )
}

fn bad_request(message: &str) -> ApiResponse {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"error": message})),
    )
}

/// Rule violations carry their message to the user; anything else is a
/// generic retryable failure.
fn error_response(e: RosterError) -> ApiResponse {
    match e {
        RosterError::InvariantViolation | RosterError::PastDate(_) => (
            StatusCode::BAD_REQUEST,
            Json(json!({"success": false, "error": e.to_string()})),
        ),
        other => {
            tracing::error!("❌ Request failed: {other}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"success": false, "error": "internal error"})),
            )
        }
    }
}

fn success(success: bool) -> ApiResponse {
    let status = if success {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(json!({"success": success})))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Health check endpoint.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "libroster-gateway",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": state.start_time.elapsed().as_secs(),
    }))
}

/// The caller's own profile. The first user ever seen bootstraps as a
/// manager so an empty deployment can be set up.
pub async fn profile(State(state): State<Arc<AppState>>, identity: Identity) -> Json<Value> {
    let is_first = state.service.is_first_user().await;
    let is_manager = state.service.is_manager(&identity.email).await;
    Json(json!({
        "email": identity.email,
        "name": identity.name,
        "isManager": is_manager || is_first,
        "isFirst": is_first,
    }))
}

pub async fn list_volunteers(State(state): State<Arc<AppState>>, _identity: Identity) -> Json<Value> {
    let volunteers = state.service.list_volunteers().await;
    Json(json!(volunteers))
}

pub async fn add_volunteer(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    Json(volunteer): Json<Volunteer>,
) -> ApiResponse {
    if !state.service.is_manager(&identity.email).await {
        return forbidden("Only managers can add volunteers");
    }
    success(state.service.add_volunteer(volunteer).await)
}

#[derive(Deserialize)]
pub struct UpdateVolunteerRequest {
    /// Current email — the lookup key. The record may carry a new one.
    pub email: String,
    pub volunteer: Volunteer,
}

pub async fn update_volunteer(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    Json(req): Json<UpdateVolunteerRequest>,
) -> ApiResponse {
    if !state.service.is_manager(&identity.email).await {
        return forbidden("Only managers can update volunteers");
    }
    match state.service.update_volunteer(&req.email, req.volunteer).await {
        Ok(updated) => success(updated),
        Err(e) => error_response(e),
    }
}

#[derive(Deserialize)]
pub struct DeleteVolunteerRequest {
    pub email: String,
}

pub async fn delete_volunteer(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    Json(req): Json<DeleteVolunteerRequest>,
) -> ApiResponse {
    if !state.service.is_manager(&identity.email).await {
        return forbidden("Only managers can delete volunteers");
    }
    if req.email.is_empty() {
        return bad_request("Email is required");
    }
    success(state.service.delete_volunteer(&req.email).await)
}

/// Managers see the whole roster; volunteers see their own shifts.
pub async fn list_shifts(State(state): State<Arc<AppState>>, identity: Identity) -> Json<Value> {
    let shifts = if state.service.is_manager(&identity.email).await {
        state.service.list_shifts(None).await
    } else {
        state.service.list_shifts(Some(&identity.email)).await
    };
    Json(json!(shifts))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftActionRequest {
    pub action: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub dates: Option<Vec<NaiveDate>>,
    #[serde(default)]
    pub volunteer_email: Option<String>,
}

pub async fn shift_action(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    Json(req): Json<ShiftActionRequest>,
) -> ApiResponse {
    match req.action.as_str() {
        "propose" => propose(state, identity, req).await,
        "approve" | "assign" => approve_or_assign(state, identity, req).await,
        "reject" => reject(state, identity, req).await,
        _ => bad_request("Unknown action"),
    }
}

/// Volunteers propose for themselves; single `date` is the legacy shape,
/// `dates` the multi-select one.
async fn propose(state: Arc<AppState>, identity: Identity, req: ShiftActionRequest) -> ApiResponse {
    let dates = match (req.dates, req.date) {
        (Some(dates), _) if !dates.is_empty() => dates,
        (_, Some(date)) => vec![date],
        _ => return bad_request("Date is required"),
    };

    let mut all_ok = true;
    for date in dates {
        match state.service.propose_shift(&identity.email, date).await {
            Ok(created) => all_ok &= created,
            Err(e) => return error_response(e),
        }
    }
    success(all_ok)
}

async fn approve_or_assign(
    state: Arc<AppState>,
    identity: Identity,
    req: ShiftActionRequest,
) -> ApiResponse {
    if !state.service.is_manager(&identity.email).await {
        return forbidden("Only managers can approve shifts");
    }
    let Some(date) = req.date else {
        return bad_request("Date is required");
    };
    let Some(volunteer_email) = req.volunteer_email else {
        return bad_request("Volunteer email is required");
    };

    let result = if req.action == "assign" {
        state.service.assign_shift(date, &volunteer_email).await
    } else {
        state.service.approve_shift(date, &volunteer_email).await
    };
    match result {
        Ok(done) => success(done),
        Err(e) => error_response(e),
    }
}

/// Managers reject anything; a volunteer may withdraw their own shift while
/// it is still only proposed.
async fn reject(state: Arc<AppState>, identity: Identity, req: ShiftActionRequest) -> ApiResponse {
    let Some(date) = req.date else {
        return bad_request("Date is required");
    };
    let target_email = req.volunteer_email.unwrap_or_else(|| identity.email.clone());

    if !state.service.is_manager(&identity.email).await {
        let own_proposal = target_email == identity.email
            && state.service.is_withdrawable_by(date, &target_email).await;
        if !own_proposal {
            return forbidden("Only managers can reject shifts");
        }
    }

    match state.service.reject_shift(date, &target_email).await {
        Ok(done) => success(done),
        Err(e) => error_response(e),
    }
}

/// Weekly digest trigger — fired by an external cron with a shared bearer
/// secret, not by a signed-in user.
pub async fn notifications_weekly(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResponse {
    let authorized = match (&state.cron_secret, headers.get("authorization")) {
        (Some(secret), Some(value)) => {
            value.to_str().ok() == Some(format!("Bearer {secret}").as_str())
        }
        _ => false,
    };
    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Unauthorized"})),
        );
    }

    let report = libroster_notify::send_weekly_reminders(
        state.service.store().as_ref(),
        state.notifier.as_ref(),
        today(),
    )
    .await;
    ok(json!({"success": true, "sent": report.sent, "failed": report.failed}))
}

pub async fn notifications_monthly(
    State(state): State<Arc<AppState>>,
    identity: Identity,
) -> ApiResponse {
    if !state.service.is_manager(&identity.email).await {
        return forbidden("Only managers can send notifications");
    }
    let report = libroster_notify::send_monthly_schedule(
        state.service.store().as_ref(),
        state.notifier.as_ref(),
        today(),
    )
    .await;
    ok(json!({"success": true, "sent": report.sent, "failed": report.failed}))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteRequest {
    pub email: String,
    #[serde(default)]
    pub volunteer_name: Option<String>,
}

pub async fn notifications_invite(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    Json(req): Json<InviteRequest>,
) -> ApiResponse {
    if !state.service.is_manager(&identity.email).await {
        return forbidden("Only managers can send invites");
    }
    if req.email.is_empty() {
        return bad_request("Email is required");
    }
    match libroster_notify::send_invite(
        state.notifier.as_ref(),
        &req.email,
        req.volunteer_name.as_deref(),
    )
    .await
    {
        Ok(()) => ok(json!({"success": true})),
        Err(e) => error_response(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::AUTH_EMAIL_HEADER;
    use crate::server::{AppState, build_router};
    use axum::Router;
    use axum::body::Body;
    use axum::http::Request;
    use chrono::Duration;
    use libroster_notify::NullNotifier;
    use libroster_store::{MemoryStore, RosterService};
    use tower::ServiceExt;

    fn volunteer(email: &str, manager: bool) -> Volunteer {
        Volunteer {
            name: email.split('@').next().unwrap_or("").to_string(),
            phone: String::new(),
            email: email.to_string(),
            monday: false,
            tuesday: false,
            wednesday: false,
            thursday: false,
            friday: false,
            is_manager: manager,
        }
    }

    fn app() -> (Router, Arc<AppState>) {
        let state = Arc::new(AppState {
            service: Arc::new(RosterService::new(Arc::new(MemoryStore::new()))),
            notifier: Arc::new(NullNotifier),
            cron_secret: Some("s3cret".into()),
            start_time: std::time::Instant::now(),
        });
        (build_router(state.clone()), state)
    }

    fn get(uri: &str, email: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(email) = email {
            builder = builder.header(AUTH_EMAIL_HEADER, email);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, email: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(email) = email {
            builder = builder.header(AUTH_EMAIL_HEADER, email);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn tomorrow() -> String {
        (Local::now().date_naive() + Duration::days(1)).to_string()
    }

    fn yesterday() -> String {
        (Local::now().date_naive() - Duration::days(1)).to_string()
    }

    #[tokio::test]
    async fn test_missing_identity_is_unauthorized() {
        let (app, _) = app();
        let response = app.oneshot(get("/api/v1/profile", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_health_is_public_and_reports_uptime() {
        let (app, _) = app();
        let response = app.oneshot(get("/health", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert!(body["uptime_secs"].is_u64());
    }

    #[tokio::test]
    async fn test_first_user_profile_is_manager() {
        let (app, _) = app();
        let response = app
            .oneshot(get("/api/v1/profile", Some("first@x")))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["isManager"], true);
        assert_eq!(body["isFirst"], true);
    }

    #[tokio::test]
    async fn test_non_manager_cannot_add_volunteers() {
        let (app, state) = app();
        state.service.add_volunteer(volunteer("boss@x", true)).await;

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/v1/volunteers",
                Some("helper@x"),
                json!(volunteer("new@x", false)),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = app
            .oneshot(post_json(
                "/api/v1/volunteers",
                Some("boss@x"),
                json!(volunteer("new@x", false)),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(state.service.list_volunteers().await.len(), 2);
    }

    #[tokio::test]
    async fn test_demoting_last_manager_maps_to_bad_request() {
        let (app, state) = app();
        state.service.add_volunteer(volunteer("boss@x", true)).await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/api/v1/volunteers")
                    .header("content-type", "application/json")
                    .header(AUTH_EMAIL_HEADER, "boss@x")
                    .body(Body::from(
                        json!({"email": "boss@x", "volunteer": volunteer("boss@x", false)})
                            .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("last manager"));
    }

    #[tokio::test]
    async fn test_propose_past_date_is_bad_request() {
        let (app, _) = app();
        let response = app
            .oneshot(post_json(
                "/api/v1/shifts",
                Some("a@x"),
                json!({"action": "propose", "date": yesterday()}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_propose_multiple_dates() {
        let (app, state) = app();
        let d1 = tomorrow();
        let d2 = (Local::now().date_naive() + Duration::days(2)).to_string();
        let response = app
            .oneshot(post_json(
                "/api/v1/shifts",
                Some("a@x"),
                json!({"action": "propose", "dates": [d1, d2]}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(state.service.list_shifts(None).await.len(), 2);
    }

    #[tokio::test]
    async fn test_repeated_proposal_is_not_an_error() {
        let (app, state) = app();
        let d = tomorrow();
        let request = || {
            post_json(
                "/api/v1/shifts",
                Some("a@x"),
                json!({"action": "propose", "date": &d}),
            )
        };

        let response = app.clone().oneshot(request()).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // A double-click retries the identical proposal; still 200, one row.
        let response = app.oneshot(request()).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(state.service.list_shifts(None).await.len(), 1);
    }

    #[tokio::test]
    async fn test_volunteers_see_only_their_own_shifts() {
        let (app, state) = app();
        state.service.add_volunteer(volunteer("boss@x", true)).await;
        state.service.add_volunteer(volunteer("a@x", false)).await;
        let d = Local::now().date_naive() + Duration::days(1);
        state.service.propose_shift("a@x", d).await.unwrap();
        state.service.propose_shift("boss@x", d).await.unwrap();

        let response = app
            .clone()
            .oneshot(get("/api/v1/shifts", Some("a@x")))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body.as_array().unwrap().len(), 1);

        let response = app
            .oneshot(get("/api/v1/shifts", Some("boss@x")))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_volunteer_can_withdraw_own_proposal_only() {
        let (app, state) = app();
        state.service.add_volunteer(volunteer("boss@x", true)).await;
        state.service.add_volunteer(volunteer("a@x", false)).await;
        let d = Local::now().date_naive() + Duration::days(1);
        state.service.propose_shift("a@x", d).await.unwrap();

        // Own proposal — allowed.
        let response = app
            .clone()
            .oneshot(post_json(
                "/api/v1/shifts",
                Some("a@x"),
                json!({"action": "reject", "date": d.to_string()}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // Approved shift — manager only.
        state.service.assign_shift(d, "a@x").await.unwrap();
        let response = app
            .oneshot(post_json(
                "/api/v1/shifts",
                Some("a@x"),
                json!({"action": "reject", "date": d.to_string()}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_approve_requires_manager() {
        let (app, state) = app();
        state.service.add_volunteer(volunteer("boss@x", true)).await;
        let d = tomorrow();
        let response = app
            .oneshot(post_json(
                "/api/v1/shifts",
                Some("a@x"),
                json!({"action": "approve", "date": d, "volunteerEmail": "a@x"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_weekly_digest_requires_cron_secret() {
        let (app, _) = app();
        let response = app
            .clone()
            .oneshot(post_json("/api/v1/notifications/weekly", None, json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/notifications/weekly")
                    .header("content-type", "application/json")
                    .header("authorization", "Bearer s3cret")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_monthly_digest_requires_manager() {
        let (app, state) = app();
        state.service.add_volunteer(volunteer("boss@x", true)).await;
        state.service.add_volunteer(volunteer("a@x", false)).await;

        let response = app
            .clone()
            .oneshot(post_json("/api/v1/notifications/monthly", Some("a@x"), json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = app
            .oneshot(post_json("/api/v1/notifications/monthly", Some("boss@x"), json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
