// GET /chatbot/health handler

use std::convert::Infallible;

use crate::models::HealthResponse;

pub async fn health_handler() -> Result<impl warp::Reply, Infallible> {
    Ok(warp::reply::json(&HealthResponse {
        status: "ok".to_string(),
        message: "Chatbot service is running".to_string(),
    }))
}
