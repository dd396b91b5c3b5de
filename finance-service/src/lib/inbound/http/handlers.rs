use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::access::errors::AccessError;
use crate::domain::activity::errors::ActivityError;
use crate::domain::typology::errors::TypologyError;
use crate::user::errors::UserError;

pub mod activities;
pub mod auth;
pub mod typologies;
pub mod users;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, message.into(), data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Error response carrying a stable machine-readable code and a user-facing
/// message.
///
/// `InternalServerError` holds the internal detail only for logging; the
/// client always receives a generic message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(&'static str, String),
    NotFound(&'static str, String),
    Conflict(&'static str, String),
    Unauthorized(&'static str, String),
    Forbidden(&'static str, String),
}

impl ApiError {
    fn internal(detail: impl ToString) -> Self {
        ApiError::InternalServerError(detail.to_string())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::InternalServerError(detail) => {
                tracing::error!(error = %detail, "Request failed with internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Errore interno del server".to_string(),
                )
            }
            ApiError::BadRequest(code, msg) => (StatusCode::BAD_REQUEST, code, msg),
            ApiError::NotFound(code, msg) => (StatusCode::NOT_FOUND, code, msg),
            ApiError::Conflict(code, msg) => (StatusCode::CONFLICT, code, msg),
            ApiError::Unauthorized(code, msg) => (StatusCode::UNAUTHORIZED, code, msg),
            ApiError::Forbidden(code, msg) => (StatusCode::FORBIDDEN, code, msg),
        };

        (status, Json(ApiErrorBody::new(status, code, message))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest("invalid_body", rejection.body_text())
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::MissingFields(_) => ApiError::BadRequest(
                "missing_fields",
                "Campi obbligatori mancanti".to_string(),
            ),
            UserError::InvalidUserId(_)
            | UserError::InvalidName(_)
            | UserError::InvalidEmail(_)
            | UserError::InvalidRole(_) => {
                ApiError::BadRequest("validation_error", err.to_string())
            }
            UserError::NotFound(_) => {
                ApiError::NotFound("user_not_found", "Utente non trovato".to_string())
            }
            UserError::EmailAlreadyExists(_) => {
                ApiError::Conflict("email_already_exists", "Email già esistente".to_string())
            }
            UserError::InvalidCredentials => ApiError::Unauthorized(
                "invalid_credentials",
                "Credenziali non valide".to_string(),
            ),
            UserError::Credential(access) => ApiError::from(access),
            UserError::Password(_) | UserError::DatabaseError(_) | UserError::Unknown(_) => {
                ApiError::internal(err)
            }
        }
    }
}

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::MissingToken => ApiError::Unauthorized(
                "missing_token",
                "Token di accesso mancante".to_string(),
            ),
            AccessError::TokenExpired => {
                ApiError::Unauthorized("token_expired", "Token scaduto".to_string())
            }
            AccessError::TokenMalformed(_) => {
                ApiError::Unauthorized("token_malformed", "Token non valido".to_string())
            }
            AccessError::TokenRevoked => {
                ApiError::Unauthorized("token_revoked", "Token revocato".to_string())
            }
            AccessError::UnknownUser(_) => ApiError::Unauthorized(
                "unknown_user",
                "Utente non più esistente".to_string(),
            ),
            AccessError::MissingSession => {
                ApiError::Forbidden("missing_session", "Sessione mancante".to_string())
            }
            AccessError::SessionNotFound => {
                ApiError::Forbidden("session_not_found", "Sessione non valida".to_string())
            }
            AccessError::Unauthenticated => {
                ApiError::Forbidden("unauthenticated", "Utente non autenticato".to_string())
            }
            AccessError::NotOwner { .. } => ApiError::Forbidden(
                "not_owner",
                "Non puoi accedere alle risorse di altri utenti".to_string(),
            ),
            AccessError::MissingRole { .. } => {
                ApiError::Forbidden("missing_role", "Permessi insufficienti".to_string())
            }
            AccessError::Internal(_) => ApiError::internal(err),
        }
    }
}

impl From<ActivityError> for ApiError {
    fn from(err: ActivityError) -> Self {
        match err {
            ActivityError::MissingFields(_) => ApiError::BadRequest(
                "missing_fields",
                "Campi obbligatori mancanti: name, amount, date, type".to_string(),
            ),
            ActivityError::InvalidActivityId(_)
            | ActivityError::InvalidName(_)
            | ActivityError::InvalidAmount(_)
            | ActivityError::InvalidDate(_)
            | ActivityError::InvalidKind(_)
            | ActivityError::InvalidTypologyId(_) => {
                ApiError::BadRequest("validation_error", err.to_string())
            }
            ActivityError::UnknownTypology(_) => {
                ApiError::BadRequest("unknown_typology", "Tipologia inesistente".to_string())
            }
            ActivityError::NotFound(_) => {
                ApiError::NotFound("activity_not_found", "Attività non trovata".to_string())
            }
            ActivityError::NotOwner { .. } => ApiError::Forbidden(
                "not_owner",
                "Non puoi gestire attività di altri utenti".to_string(),
            ),
            ActivityError::DatabaseError(_) | ActivityError::Unknown(_) => {
                ApiError::internal(err)
            }
        }
    }
}

impl From<TypologyError> for ApiError {
    fn from(err: TypologyError) -> Self {
        match err {
            TypologyError::InvalidTypologyId(_) | TypologyError::InvalidKind(_) => {
                ApiError::BadRequest("validation_error", err.to_string())
            }
            TypologyError::NotFound(_) => {
                ApiError::NotFound("typology_not_found", "Tipologia non trovata".to_string())
            }
            TypologyError::DatabaseError(_) | TypologyError::Unknown(_) => {
                ApiError::internal(err)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    message: String,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, message: String, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            message,
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    status_code: u16,
    code: &'static str,
    message: String,
}

impl ApiErrorBody {
    pub fn new(status_code: StatusCode, code: &'static str, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            code,
            message,
        }
    }
}
