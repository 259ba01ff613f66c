use actix_web::{get, post, web, App, HttpResponse, HttpServer, Responder};
use actix_cors::Cors;
use serde::Deserialize;
use serde_json::json;
use std::env;
use tokio::sync::Mutex;
use tracing::info;

mod aggregator;
mod client;
mod metadata;
mod models;
mod registry;
mod upload;
mod utils;
mod wallets;

use aggregator::ProfileAggregator;
use client::{LedgerClient, LedgerReader};
use metadata::{extract_metadata_info, fetch_metadata, MetadataResolution};
use upload::UploadClient;
use wallets::WalletRegistryClient;

struct AppState {
    ledger: LedgerClient,
    wallet_registry: WalletRegistryClient,
    uploads: UploadClient,
    http: reqwest::Client,
    aggregator: Mutex<ProfileAggregator>,
}

#[derive(Deserialize)]
struct AddWalletParams {
    address: String,
}

#[derive(Deserialize)]
struct UploadParams {
    filename: String,
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

#[get("/profiles")]
async fn minted_profiles(state: web::Data<AppState>) -> impl Responder {
    let mut aggregator = state.aggregator.lock().await;
    aggregator.refresh(&state.ledger).await;

    HttpResponse::Ok().json(json!({
        "state": aggregator.state(),
        "count": aggregator.profiles().len(),
        "profiles": aggregator.profiles(),
    }))
}

#[get("/profiles/{token_id}")]
async fn token_profile(state: web::Data<AppState>, token_id: web::Path<u64>) -> impl Responder {
    let token_id = token_id.into_inner();

    let token = match state.ledger.get_token_info(token_id).await {
        Ok(token) => token,
        Err(e) => {
            return HttpResponse::NotFound().json(json!({ "error": e }));
        }
    };

    let metadata = match fetch_metadata(&state.http, &token.metadata_uri).await {
        Ok(MetadataResolution::Document(document)) => Some(extract_metadata_info(&document)),
        _ => None,
    };

    HttpResponse::Ok().json(json!({ "token": token, "metadata": metadata }))
}

#[get("/airdrop/recipients")]
async fn airdrop_recipients(state: web::Data<AppState>) -> impl Responder {
    let response = match state.wallet_registry.list_wallets().await {
        Ok(response) => response,
        Err(e) => {
            return HttpResponse::BadGateway().json(json!({ "error": e }));
        }
    };

    let recipients: Vec<String> = wallets::extract_addresses(&response)
        .into_iter()
        .filter(|address| utils::is_valid_address(address))
        .collect();

    HttpResponse::Ok().json(json!({
        "count": recipients.len(),
        "recipients": recipients,
    }))
}

#[post("/wallets")]
async fn add_wallet(
    state: web::Data<AppState>,
    params: web::Json<AddWalletParams>,
) -> impl Responder {
    let address = params.address.trim();
    if !utils::is_valid_address(address) {
        return HttpResponse::BadRequest().json(json!({ "error": "Invalid wallet address format" }));
    }

    match state.wallet_registry.add_wallet(address).await {
        Ok(created) => HttpResponse::Created().json(created),
        Err(e) => HttpResponse::BadGateway().json(json!({ "error": e })),
    }
}

#[post("/upload")]
async fn upload_file(
    state: web::Data<AppState>,
    params: web::Query<UploadParams>,
    body: web::Bytes,
) -> impl Responder {
    if body.is_empty() {
        return HttpResponse::BadRequest().json(json!({ "error": "No file content" }));
    }

    match state
        .uploads
        .upload_file(&params.filename, body.to_vec())
        .await
    {
        Ok(url) => HttpResponse::Ok().json(json!({ "url": url })),
        Err(e) => HttpResponse::BadGateway().json(json!({ "error": e })),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt::init();

    let ledger_url =
        env::var("LEDGER_URL").unwrap_or_else(|_| "http://127.0.0.1:10902".to_string());
    let backend_url =
        env::var("BACKEND_URL").unwrap_or_else(|_| "https://monad.newjeans.cloud".to_string());
    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let http = reqwest::Client::new();
    let state = web::Data::new(AppState {
        ledger: LedgerClient::new(ledger_url, http.clone()),
        wallet_registry: WalletRegistryClient::new(backend_url.clone(), http.clone()),
        uploads: UploadClient::new(backend_url, http.clone()),
        aggregator: Mutex::new(ProfileAggregator::new(http.clone())),
        http,
    });

    info!("starting profile card api on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive().allow_any_origin())
            .app_data(state.clone())
            .app_data(web::PayloadConfig::new(20 * 1024 * 1024))
            .service(health)
            .service(minted_profiles)
            .service(token_profile)
            .service(airdrop_recipients)
            .service(add_wallet)
            .service(upload_file)
    })
    .bind(bind_addr)?
    .run()
    .await
}
