use axum::{
    extract::{FromRequest, Request, State},
    http::header::CONTENT_TYPE,
    Extension, Form, Json,
};
use serde::{Deserialize, Serialize};

use mgb_core::{errors::Error, score::SubmittedScore, token::ScoreClaims};

use crate::{error::ApiError, ScoreState};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreResponse {
    pub score: i64,
}

/// `POST /score` body, accepted as JSON or as an urlencoded form.
#[derive(Debug, Default, Deserialize)]
pub struct ScoreBody {
    #[serde(default)]
    pub score: Option<SubmittedScore>,
}

impl<S> FromRequest<S> for ScoreBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.trim_start().starts_with("application/json"))
            .unwrap_or(false);

        // An unreadable body cannot carry a valid score.
        let body = if is_json {
            Json::<ScoreBody>::from_request(req, state)
                .await
                .map(|Json(b)| b)
                .map_err(|_| Error::InvalidScore)?
        } else {
            Form::<ScoreBody>::from_request(req, state)
                .await
                .map(|Form(b)| b)
                .map_err(|_| Error::InvalidScore)?
        };

        Ok(body)
    }
}

/// `GET /score`: current high score for the game message bound to the token.
pub async fn get_score(
    State(state): State<ScoreState>,
    Extension(claims): Extension<ScoreClaims>,
) -> Result<Json<ScoreResponse>, ApiError> {
    let score = state.api.high_score(&claims.target).await?;
    Ok(Json(ScoreResponse { score }))
}

/// `POST /score`: overwrite the score for the game message bound to the token.
pub async fn post_score(
    State(state): State<ScoreState>,
    Extension(claims): Extension<ScoreClaims>,
    body: ScoreBody,
) -> Result<(), ApiError> {
    let score = body.score.ok_or(Error::InvalidScore)?.positive()?;

    state.api.set_score(&claims.target, score).await?;
    tracing::info!(user = claims.target.user_id.0, score, "score submitted");
    Ok(())
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
