use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use mgb_core::errors::Error;

/// Generic body for failures that must not leak details to the client.
pub const UPSTREAM_UNAVAILABLE: &str = "upstream unavailable";

/// HTTP view of a core error.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            Error::Token(_) => StatusCode::FORBIDDEN.into_response(),
            Error::InvalidScore => StatusCode::BAD_REQUEST.into_response(),
            Error::Upstream {
                status,
                description,
            } => {
                let status =
                    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (status, description).into_response()
            }
            Error::Transport(e) => {
                tracing::error!("score relay failed: {e}");
                (StatusCode::BAD_GATEWAY, UPSTREAM_UNAVAILABLE).into_response()
            }
            other => {
                tracing::error!("score request failed: {other}");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses() {
        let cases = [
            (Error::Token("invalid_signature".into()), StatusCode::FORBIDDEN),
            (Error::InvalidScore, StatusCode::BAD_REQUEST),
            (
                Error::Upstream {
                    status: 429,
                    description: "Too Many Requests".into(),
                },
                StatusCode::TOO_MANY_REQUESTS,
            ),
            (Error::Transport("timeout".into()), StatusCode::BAD_GATEWAY),
            (
                Error::External("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError(err).into_response().status(), expected);
        }
    }
}
