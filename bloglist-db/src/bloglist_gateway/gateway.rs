use std::future::Future;
use std::sync::Arc;

use axum::response::IntoResponse;
use axum::routing::get;
use tokio::net::TcpListener;
use tracing::{error, info, trace};

use crate::bloglist_engine::{config::Config, storage_core::BlogListStorage};
use crate::bloglist_gateway::handlers::{blogs, stats, users};
use crate::bloglist_gateway::worker_pool::WorkerPool;
use crate::protocol::{BlogListError, Response};

pub struct AppState {
    pub worker_pool: WorkerPool,
    pub config: Config,
}

impl AppState {
    pub fn new(storage: Arc<BlogListStorage>, config: Config) -> AppState {
        AppState {
            worker_pool: WorkerPool::new(config.workers, storage),
            config,
        }
    }
}

/// Builds the HTTP routes of the service.
pub fn router(state: Arc<AppState>) -> axum::Router {
    axum::Router::new()
        .route(
            "/api/blogs",
            get(blogs::list_blogs_handler).post(blogs::create_blog_handler),
        )
        .route("/api/blogs/stats", get(stats::blog_stats_handler))
        .route(
            "/api/blogs/{id}",
            get(blogs::get_blog_handler)
                .put(blogs::update_blog_handler)
                .delete(blogs::delete_blog_handler),
        )
        .route(
            "/api/users",
            get(users::list_users_handler).post(users::create_user_handler),
        )
        .with_state(state)
}

/// Serves the router on an already bound listener until `shutdown` resolves.
pub async fn serve_with_listener<F>(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}

pub struct BlogListGateway {
    address: String,
    storage: Arc<BlogListStorage>,
    config: Config,
}

impl BlogListGateway {
    pub fn new(address: &str, storage: Arc<BlogListStorage>, config: Config) -> BlogListGateway {
        BlogListGateway {
            address: address.to_string(),
            storage,
            config,
        }
    }

    pub fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        trace!("Starting BlogList Gateway");

        let rt = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;

        let address = self.address;
        let state = Arc::new(AppState::new(self.storage, self.config));
        info!(
            workers = state.worker_pool.num_workers(),
            "Worker pool started"
        );

        rt.block_on(async move {
            let listener = TcpListener::bind(&address).await?;
            info!(address = %address, "Listener has been bound, starting server");
            serve_with_listener(listener, state, shutdown_signal()).await
        })?;

        info!("Server stopped");
        Ok(())
    }
}

pub(crate) async fn shutdown_signal() {
    // Respond to either Ctrl-C (SIGINT) or SIGTERM (e.g. `kill` or systemd stop)
    #[cfg(unix)]
    {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl-C, starting graceful shutdown…");
            }
            _ = sigterm() => {
                info!("Received SIGTERM, starting graceful shutdown…");
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
        info!("Received Ctrl-C, starting graceful shutdown…");
    }
}

#[cfg(unix)]
async fn sigterm() {
    use tokio::signal::unix::{SignalKind, signal};
    match signal(SignalKind::terminate()) {
        Ok(mut term) => {
            term.recv().await;
        }
        Err(e) => {
            error!(?e, "Failed to install SIGTERM handler");
            std::future::pending::<()>().await;
        }
    }
}

/// Turns a worker result into an HTTP response, logging failures.
pub(crate) fn respond(res: Result<Response, BlogListError>) -> axum::response::Response {
    match res {
        Ok(r) => r.into_response(),
        Err(e) => {
            if e.status().is_server_error() {
                error!(?e, "Request failed");
            } else {
                info!(?e, "Got error");
            }
            e.into_response()
        }
    }
}
