//! 路由配置模块

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Uri},
    middleware,
    routing::{get, post},
};
use binny_shared::config::ServerConfig;
use binny_shared::observability::middleware as obs_middleware;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::{error::ApiError, handlers, state::AppState};

/// AI 服务代理路由
fn ai_routes() -> Router<AppState> {
    Router::new()
        .route("/detect", post(handlers::ai::detect))
        .route("/generate", post(handlers::ai::generate))
}

/// 用户、奖励、图鉴、宠物、文件路由
fn binny_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(handlers::home::me))
        .route("/home", get(handlers::home::home))
        // 奖励
        .route(
            "/rewards",
            post(handlers::reward::create_reward).get(handlers::reward::list_rewards),
        )
        .route("/rewards/{id}", get(handlers::reward::get_reward))
        // 文件
        .route("/files/{uuid}", get(handlers::file::get_file))
        // 图鉴
        .route("/collection", get(handlers::collection::get_my_collection))
        .route("/collections/{id}", get(handlers::collection::get_collection))
        // 宠物
        .route(
            "/binnies/{id}",
            get(handlers::binny::get_binny).patch(handlers::binny::rename_binny),
        )
}

/// 挂载在 /api 下的全部路由
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(ai_routes()).merge(binny_routes())
}

/// 构建完整应用：路由、探针与中间件
pub fn app(state: AppState, server: &ServerConfig) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(server.max_upload_bytes))
        .layer(cors_layer(&server.cors_origins))
        // 可观测性中间件：请求追踪和指标收集
        .layer(middleware::from_fn(obs_middleware::http_tracing))
        .layer(middleware::from_fn(obs_middleware::request_id))
        .with_state(state)
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}

/// CORS 配置，`*` 表示允许所有来源
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        warn!("CORS 允许所有来源，生产环境请配置具体域名");
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    info!(?origins, "CORS allowed origins");
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|s| s.trim().parse::<HeaderValue>().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
