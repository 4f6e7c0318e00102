use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::env;
use std::fmt::{self, Debug, Display};

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl Error {
    /// Errors with a code of 100 or above are meant to be shown to the user.
    pub fn is_user_facing(&self) -> bool {
        self.code >= 100
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

impl std::error::Error for Error {}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        reqwest_error(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        decode_error(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match self.code {
            1..=99 => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
            _ => (StatusCode::BAD_REQUEST, self.message.as_str()),
        };

        let body = Json(json!({
            "code": self.code,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub fn invalid_input_error() -> Error {
    Error {
        code: 101,
        message: "invalid input".into(),
    }
}

pub fn invalid_coordinates_error() -> Error {
    Error {
        code: 102,
        message: "invalid coordinates".into(),
    }
}

pub fn missing_keyword_error() -> Error {
    Error {
        code: 110,
        message: "enter a search keyword".into(),
    }
}

pub fn map_not_initialized_error() -> Error {
    Error {
        code: 111,
        message: "map is not initialized".into(),
    }
}

pub fn missing_endpoints_error() -> Error {
    Error {
        code: 112,
        message: "set both a start and an end point".into(),
    }
}

pub fn search_error() -> Error {
    Error {
        code: 120,
        message: "an error occurred while searching".into(),
    }
}

pub fn location_error() -> Error {
    Error {
        code: 130,
        message: "failed to get the current location".into(),
    }
}

pub fn location_unsupported_error() -> Error {
    Error {
        code: 131,
        message: "location is not supported on this device".into(),
    }
}

pub fn env_var_error(_: env::VarError) -> Error {
    Error {
        code: 1,
        message: "environment variable error".into(),
    }
}

pub fn reqwest_error(err: reqwest::Error) -> Error {
    tracing::debug!(%err, "http request failed");

    Error {
        code: 3,
        message: "reqwest error".into(),
    }
}

pub fn upstream_error() -> Error {
    Error {
        code: 4,
        message: "upstream error".into(),
    }
}

pub fn unexpected_error() -> Error {
    Error {
        code: 5,
        message: "unexpected error".into(),
    }
}

pub fn decode_error<T: Debug>(err: T) -> Error {
    tracing::debug!(?err, "failed to decode payload");

    Error {
        code: 6,
        message: "decode error".into(),
    }
}

#[test]
fn user_facing_codes() {
    assert!(missing_endpoints_error().is_user_facing());
    assert!(location_unsupported_error().is_user_facing());
    assert!(!upstream_error().is_user_facing());
    assert!(!decode_error("bad").is_user_facing());
}

#[test]
fn internal_errors_hide_their_message() {
    let response = upstream_error().into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = invalid_coordinates_error().into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
