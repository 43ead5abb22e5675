/// API route modules
pub mod boxes;
pub mod health;
pub mod queue;
pub mod videos;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health::health))
        // Boxes
        .route("/boxes", post(boxes::create_box))
        .route("/boxes/:id", get(boxes::get_box))
        .route("/boxes/:id/close", put(boxes::close_box))
        .route("/boxes/:id/options", put(boxes::update_options))
        // Queue
        .route("/boxes/:id/queue", get(queue::get_queue))
        .route("/boxes/:id/queue/current", get(queue::get_current))
        .route("/boxes/:id/queue/video", post(queue::submit_video))
        .route("/boxes/:id/queue/playlist", post(queue::submit_playlist))
        .route("/boxes/:id/queue/skip", put(queue::skip_video))
        .route("/boxes/:id/queue/:item/next", put(queue::play_next))
        .route("/boxes/:id/queue/:item/now", put(queue::play_now))
        .route("/boxes/:id/queue/:item/replay", put(queue::replay))
        .route("/boxes/:id/queue/:item", delete(queue::remove_video))
        // Videos
        .route("/videos", get(videos::list_videos))
        .route("/videos", post(videos::create_video))
        .route("/videos/:id", get(videos::get_video));

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
