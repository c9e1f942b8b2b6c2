//! Request/response boundary
//!
//! Transport-agnostic handling of the board endpoints:
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | `POST` | `/api/boards` | upload (body: JSON array of arrays) |
//! | `GET` | `/api/boards/{id}` | fetch |
//! | `GET` | `/api/boards/{id}/next` | advance one generation |
//! | `GET` | `/api/boards/{id}/states/{count}` | advance up to `count` generations |
//! | `GET` | `/api/boards/{id}/final` | run to a fixed point |
//!
//! Errors become `{"message": ...}` bodies. Internal failures are logged and
//! replaced by a generic message unless running in development.

use crate::core::config::Environment;
use crate::models::board::Board;
use crate::service::{BoardService, ServiceError};
use crate::store::BoardStore;
use serde_json::{json, Value};
use uuid::Uuid;

/// Message returned for internal failures outside development
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal server error occurred.";

const BOARDS_PATH: &str = "/api/boards";

/// Response status, mirroring the HTTP codes a web binding would use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    Ok,
    Created,
    BadRequest,
    NotFound,
    InternalServerError,
}

impl StatusCode {
    pub fn as_u16(self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::Created => 201,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::InternalServerError => 500,
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, StatusCode::Ok | StatusCode::Created)
    }
}

/// A parsed request for one of the board operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    UploadBoard(Vec<Vec<bool>>),
    GetBoard(Uuid),
    NextState(Uuid),
    StatesAhead(Uuid, i64),
    FinalState(Uuid),
}

/// Request that matched no operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// No route for this method/path (including malformed ids and counts)
    NotFound(String),
    /// Route matched but the body is unusable
    BadRequest(String),
}

impl RouteError {
    pub fn into_response(self) -> ApiResponse {
        match self {
            RouteError::NotFound(msg) => ApiResponse::message(StatusCode::NotFound, msg),
            RouteError::BadRequest(msg) => ApiResponse::message(StatusCode::BadRequest, msg),
        }
    }
}

impl ApiRequest {
    /// Match a method, path and optional JSON body against the board routes
    ///
    /// # Example
    /// ```
    /// use game_of_life_core_rs::api::ApiRequest;
    ///
    /// let id = "6f1c8a52-3c35-4d8c-9a55-2f1b1f7f3b10";
    /// let request = ApiRequest::route("GET", &format!("/api/boards/{}/states/5", id), None).unwrap();
    /// assert!(matches!(request, ApiRequest::StatesAhead(_, 5)));
    /// ```
    pub fn route(method: &str, path: &str, body: Option<&str>) -> Result<Self, RouteError> {
        let not_found = || RouteError::NotFound(format!("No route for {} {}", method, path));

        let rest = path
            .trim_end_matches('/')
            .strip_prefix(BOARDS_PATH)
            .ok_or_else(not_found)?;
        let segments: Vec<&str> = rest.split('/').filter(|s| !s.is_empty()).collect();

        match (method.to_ascii_uppercase().as_str(), segments.as_slice()) {
            ("POST", []) => {
                let body = body.ok_or_else(|| {
                    RouteError::BadRequest("Initial state cannot be empty.".to_string())
                })?;
                let rows: Vec<Vec<bool>> = serde_json::from_str(body).map_err(|e| {
                    RouteError::BadRequest(format!("Initial state is not a boolean matrix: {}", e))
                })?;
                Ok(ApiRequest::UploadBoard(rows))
            }
            ("GET", [id]) => Ok(ApiRequest::GetBoard(parse_id(id).ok_or_else(not_found)?)),
            ("GET", [id, "next"]) => Ok(ApiRequest::NextState(parse_id(id).ok_or_else(not_found)?)),
            ("GET", [id, "final"]) => {
                Ok(ApiRequest::FinalState(parse_id(id).ok_or_else(not_found)?))
            }
            ("GET", [id, "states", count]) => {
                let id = parse_id(id).ok_or_else(not_found)?;
                let count = count.parse::<i64>().map_err(|_| not_found())?;
                Ok(ApiRequest::StatesAhead(id, count))
            }
            _ => Err(not_found()),
        }
    }
}

fn parse_id(segment: &str) -> Option<Uuid> {
    Uuid::parse_str(segment).ok()
}

/// Outcome of handling a request
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    /// Where a newly created resource lives (set on upload)
    pub location: Option<String>,
    pub body: Value,
}

impl ApiResponse {
    fn message(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            location: None,
            body: json!({ "message": message.into() }),
        }
    }

    fn board(status: StatusCode, board: &Board, environment: Environment) -> Self {
        match serde_json::to_value(board) {
            Ok(body) => Self {
                status,
                location: None,
                body,
            },
            Err(e) => internal_error(&e, environment),
        }
    }

    /// Body as compact JSON text
    pub fn body_text(&self) -> String {
        self.body.to_string()
    }
}

/// Run a request against the service and shape the response
pub fn handle<S: BoardStore>(
    service: &mut BoardService<S>,
    request: ApiRequest,
    environment: Environment,
) -> ApiResponse {
    let result = match request {
        ApiRequest::UploadBoard(rows) => {
            return match service.upload(rows) {
                Ok(board) => {
                    let mut response = ApiResponse::board(StatusCode::Created, &board, environment);
                    if response.status == StatusCode::Created {
                        response.location = Some(format!("{}/{}", BOARDS_PATH, board.id()));
                    }
                    response
                }
                Err(err) => error_response(err, environment),
            };
        }
        ApiRequest::GetBoard(id) => service.get(id),
        ApiRequest::NextState(id) => service.next_state(id),
        ApiRequest::StatesAhead(id, count) => service.states_ahead(id, count),
        ApiRequest::FinalState(id) => service.final_state(id),
    };

    match result {
        Ok(board) => ApiResponse::board(StatusCode::Ok, &board, environment),
        Err(err) => error_response(err, environment),
    }
}

/// Map a service error onto a status and message
pub fn error_response(err: ServiceError, environment: Environment) -> ApiResponse {
    if err.is_internal() {
        return internal_error(&err, environment);
    }

    let status = match &err {
        ServiceError::BoardNotFound(_) => StatusCode::NotFound,
        _ => StatusCode::BadRequest,
    };
    ApiResponse::message(status, err.to_string())
}

fn internal_error(err: &dyn std::error::Error, environment: Environment) -> ApiResponse {
    tracing::error!(error = %err, "unhandled error while processing request");

    let message = if environment.is_development() {
        err.to_string()
    } else {
        INTERNAL_ERROR_MESSAGE.to_string()
    };
    ApiResponse::message(StatusCode::InternalServerError, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;

    #[test]
    fn test_status_codes() {
        assert_eq!(StatusCode::Created.as_u16(), 201);
        assert_eq!(StatusCode::InternalServerError.as_u16(), 500);
        assert!(StatusCode::Ok.is_success());
        assert!(!StatusCode::NotFound.is_success());
    }

    #[test]
    fn test_internal_detail_hidden_in_production() {
        let err = ServiceError::Store(StoreError::CorruptRecord("hash mismatch".to_string()));
        let response = error_response(err, Environment::Production);

        assert_eq!(response.status, StatusCode::InternalServerError);
        assert_eq!(response.body["message"], INTERNAL_ERROR_MESSAGE);
    }

    #[test]
    fn test_internal_detail_shown_in_development() {
        let err = ServiceError::Store(StoreError::CorruptRecord("hash mismatch".to_string()));
        let response = error_response(err, Environment::Development);

        assert_eq!(response.status, StatusCode::InternalServerError);
        assert!(response.body["message"]
            .as_str()
            .unwrap()
            .contains("hash mismatch"));
    }

    #[test]
    fn test_caller_errors_keep_their_message() {
        let id = Uuid::nil();
        let response = error_response(ServiceError::BoardNotFound(id), Environment::Production);
        assert_eq!(response.status, StatusCode::NotFound);
        assert_eq!(
            response.body["message"],
            format!("Board with ID {} not found.", id)
        );

        let response = error_response(ServiceError::InvalidStepCount(0), Environment::Production);
        assert_eq!(response.status, StatusCode::BadRequest);
        assert_ne!(response.body["message"], INTERNAL_ERROR_MESSAGE);
    }

    #[test]
    fn test_trailing_slash_accepted() {
        let request = ApiRequest::route("post", "/api/boards/", Some("[[true]]")).unwrap();
        assert_eq!(request, ApiRequest::UploadBoard(vec![vec![true]]));
    }
}
