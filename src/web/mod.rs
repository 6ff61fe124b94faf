// src/web/mod.rs
pub mod handlers;
pub mod openai;
pub mod types;

pub use types::*;

use crate::config::AppConfig;
use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, routes, Request, Response, State};
use tracing::{info, warn};

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

#[get("/status")]
pub async fn status(config: &State<AppConfig>) -> Json<StatusResponse> {
    handlers::status_handler(config).await
}

#[post("/analyze", data = "<request>")]
pub async fn analyze(
    request: Json<AnalyzeApiRequest>,
    config: &State<AppConfig>,
) -> Result<Json<AnalyzeSuccessResponse>, rocket::response::status::Custom<Json<ApiErrorResponse>>>
{
    handlers::analyze_handler(request, config).await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<ApiErrorResponse> {
    Json(ApiErrorResponse::new(
        "Missing required fields",
        "Both cvText and jobDescription are required",
    ))
}

#[rocket::catch(422)]
pub fn unprocessable() -> Json<ApiErrorResponse> {
    Json(ApiErrorResponse::new(
        "Missing required fields",
        "Request body must be a JSON object with cvText and jobDescription",
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<ApiErrorResponse> {
    Json(ApiErrorResponse::new(
        "Analysis failed",
        "An unexpected error occurred",
    ))
}

// Main server start function
pub async fn start_web_server(config: AppConfig) -> Result<()> {
    info!("Starting CoreHire analysis service on port {}", config.port);
    if config.api_key_configured() {
        info!("API key configured, using model: {}", config.openai_model);
    } else {
        warn!("OpenAI API key not configured - edit the .env file; analysis requests will fail");
    }

    let figment = rocket::Config::figment()
        .merge(("port", config.port))
        .merge(("address", "0.0.0.0"));

    let _rocket = rocket::custom(figment)
        .attach(Cors)
        .manage(config)
        .register("/api", catchers![bad_request, unprocessable, internal_error])
        .mount("/api", routes![status, analyze, options])
        .launch()
        .await?;

    Ok(())
}
