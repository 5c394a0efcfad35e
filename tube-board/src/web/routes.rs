//! HTTP route handlers.

use askama::Template;
use axum::{
    Form, Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tracing::{error, warn};

use crate::domain::Stop;
use crate::selection::{Selection, SelectionQuery, page_title};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/select", post(select_station))
        .route("/board", get(current_board))
        .route("/api/stations", get(list_stations))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Board page.
///
/// A `station` query parameter naming a known stop selects it, as if the
/// user had picked it, unless it is already selected.
async fn index_page(
    State(state): State<AppState>,
    Query(query): Query<SelectionQuery>,
) -> Result<Response, AppError> {
    let requested = match Selection::try_from(&query) {
        Ok(selection) => selection,
        Err(e) => {
            warn!(station = ?query.station, error = %e, "ignoring invalid station parameter");
            Selection::none()
        }
    };

    let mut poller = state.poller.lock().await;

    if let Some(id) = requested.stop_id() {
        match state.directory.get(id) {
            Some(stop) if poller.selected().map(|s| &s.id) != Some(id) => {
                poller.select(stop.clone());
            }
            Some(_) => {}
            None => warn!(station = %id, "ignoring unknown station parameter"),
        }
    }

    let location = match poller.selected() {
        Some(stop) => Selection::of(stop.id.clone()).location(),
        None => Selection::none().location(),
    };
    let frame = poller.frame();
    drop(poller);

    let template = IndexTemplate::new(&state.directory, &frame, location);
    let html = template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })?;

    Ok(Html(html).into_response())
}

/// Change the selection. An empty `station` clears it.
async fn select_station(
    State(state): State<AppState>,
    Form(form): Form<SelectionQuery>,
) -> Result<Json<SelectResponse>, AppError> {
    let selection = Selection::try_from(&form).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;

    let stop = resolve(&state, &selection)?;

    let title = page_title(stop.as_ref());
    state.poller.lock().await.apply(stop);

    Ok(Json(SelectResponse {
        title,
        location: selection.location(),
    }))
}

/// Look up the selected stop in the directory.
fn resolve(state: &AppState, selection: &Selection) -> Result<Option<Stop>, AppError> {
    let Some(id) = selection.stop_id() else {
        return Ok(None);
    };

    state
        .directory
        .get(id)
        .cloned()
        .map(Some)
        .ok_or_else(|| AppError::NotFound {
            message: format!("Unknown station: {}", id),
        })
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// The most recently published board frame.
async fn current_board(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let frame = state.poller.lock().await.frame();

    if accepts_html(&headers) {
        let template = BoardTemplate {
            board: BoardPanel::from_frame(&frame),
        };
        let html = template.render().map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;

        Ok(Html(html).into_response())
    } else {
        Ok(Json(frame).into_response())
    }
}

/// All selectable stations, in display order.
async fn list_stations(State(state): State<AppState>) -> Json<StationsResponse> {
    let stations = state
        .directory
        .stops()
        .iter()
        .map(StationResult::from_stop)
        .collect();

    Json(StationsResponse { stations })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, "{message}");
        } else {
            warn!(%status, "{message}");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use crate::config::BoardConfig;
    use crate::directory::StationDirectory;
    use crate::domain::StopId;
    use crate::poller::{PollState, Poller};
    use crate::tfl::{MockTflClient, TransitSource};

    fn app_state() -> (AppState, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("stops.json"),
            r#"{"stopPoints":[
                {"id":"940GZZLUBNK","commonName":"Bank Underground Station","modes":["tube"],"stopType":"NaptanMetroStation"}
            ]}"#,
        )
        .unwrap();

        let source: Arc<dyn TransitSource> = Arc::new(MockTflClient::new(dir.path()).unwrap());
        let directory = StationDirectory::from_stops(vec![Stop::new(
            StopId::parse("940GZZLUBNK").unwrap(),
            "Bank Underground Station",
            vec!["tube".into()],
        )]);
        let poller = Poller::new(source, &BoardConfig::default());

        (AppState::new(directory, poller), dir)
    }

    fn form(station: &str) -> Form<SelectionQuery> {
        Form(SelectionQuery {
            station: Some(station.to_string()),
        })
    }

    #[test]
    fn accepts_html_header() {
        let mut headers = HeaderMap::new();
        assert!(!accepts_html(&headers));

        headers.insert(header::ACCEPT, "text/html,application/xhtml+xml".parse().unwrap());
        assert!(accepts_html(&headers));

        headers.insert(header::ACCEPT, "application/json".parse().unwrap());
        assert!(!accepts_html(&headers));
    }

    #[test]
    fn error_status_codes() {
        let response = AppError::NotFound {
            message: "Unknown station: X".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = AppError::BadRequest {
            message: "bad".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn select_known_station() {
        let (state, _dir) = app_state();

        let Json(response) = select_station(State(state.clone()), form("940GZZLUBNK"))
            .await
            .unwrap();

        assert_eq!(response.location, "/?station=940GZZLUBNK");
        assert_eq!(response.title, "Tube Departures – Bank Underground Station");
        assert!(matches!(
            state.poller.lock().await.state(),
            PollState::Polling(_)
        ));
    }

    #[tokio::test]
    async fn select_empty_clears() {
        let (state, _dir) = app_state();
        select_station(State(state.clone()), form("940GZZLUBNK"))
            .await
            .unwrap();

        let Json(response) = select_station(State(state.clone()), form(""))
            .await
            .unwrap();

        assert_eq!(response.location, "/");
        assert_eq!(response.title, "Tube Departures");
        assert_eq!(state.poller.lock().await.state(), &PollState::Idle);
    }

    #[tokio::test]
    async fn select_unknown_station_is_not_found() {
        let (state, _dir) = app_state();

        let result = select_station(State(state.clone()), form("940GZZLUOXC")).await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
        assert_eq!(state.poller.lock().await.state(), &PollState::Idle);
    }

    #[tokio::test]
    async fn select_invalid_id_is_bad_request() {
        let (state, _dir) = app_state();

        let result = select_station(State(state), form("../etc")).await;
        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }

    #[tokio::test]
    async fn index_restores_station_from_query() {
        let (state, _dir) = app_state();
        let query = Query(SelectionQuery {
            station: Some("940GZZLUBNK".into()),
        });

        let response = index_page(State(state.clone()), query).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let poller = state.poller.lock().await;
        assert_eq!(
            poller.selected().map(|s| s.id.as_str()),
            Some("940GZZLUBNK")
        );
    }

    #[tokio::test]
    async fn index_ignores_unknown_station() {
        let (state, _dir) = app_state();
        let query = Query(SelectionQuery {
            station: Some("940GZZLUXXX".into()),
        });

        let response = index_page(State(state.clone()), query).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(state.poller.lock().await.state(), &PollState::Idle);
    }

    #[tokio::test]
    async fn station_list() {
        let (state, _dir) = app_state();

        let Json(response) = list_stations(State(state)).await;
        assert_eq!(response.stations.len(), 1);
        assert_eq!(response.stations[0].id, "940GZZLUBNK");
    }

    #[tokio::test]
    async fn board_as_json_when_not_html() {
        let (state, _dir) = app_state();

        let response = current_board(State(state), HeaderMap::new()).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }
}
