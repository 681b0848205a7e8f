use axum::Json;
use contextor::CONVERSATION_STARTERS;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct StartersResponse {
    pub starters: Vec<&'static str>,
}

pub async fn starters() -> Json<StartersResponse> {
    Json(StartersResponse {
        starters: CONVERSATION_STARTERS.to_vec(),
    })
}
