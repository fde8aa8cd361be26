use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use mgb_core::errors::Error;

use crate::{error::ApiError, ScoreState};

/// Header carrying the score token.
pub const TOKEN_HEADER: &str = "token";

/// Middleware: verifies the `token` header and stores the claims in the
/// request extensions. Any failure is a bare 403 and stops the request.
pub async fn require_token(
    State(state): State<ScoreState>,
    mut req: Request,
    next: Next,
) -> Response {
    let raw = req
        .headers()
        .get(TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|t| !t.is_empty());

    let verified = match raw {
        Some(token) => state.codec.verify(token),
        None => Err(Error::Token("missing".to_string())),
    };

    match verified {
        Ok(claims) => {
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        Err(e) => {
            tracing::warn!(path = %req.uri().path(), "score token rejected: {e}");
            ApiError(e).into_response()
        }
    }
}
