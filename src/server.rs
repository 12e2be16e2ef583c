//! Reusable server runtime.
//!
//! Provides [`ServerHandle`] that encapsulates the full server lifecycle:
//! database init, schema bootstrap, REST API, and graceful shutdown.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tokio::time::Instant;
use tracing::{error, info, warn};

use crate::application::users::UserService;
use crate::config::{AppConfig, LoggingSettings};
use crate::domain::UserRepositoryInterface;
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::{init_database, UserRepository};
use crate::interfaces::http::{create_api_router, RouterOptions};
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

/// Pool close gets at least this long, even when draining used up the grace period.
const MIN_POOL_CLOSE_WINDOW: Duration = Duration::from_millis(500);

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the server.
pub struct ServerOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Create the `users` table on startup when missing (default: true).
    pub auto_migrate: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running server.
///
/// # Examples
///
/// ```rust,no_run
/// use user_api::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.install_signal_handler();
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// The configuration the server was started with.
    pub config: AppConfig,

    local_addr: SocketAddr,
    db: DatabaseConnection,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Start the server with the given options.
    ///
    /// This will:
    /// 1. Connect to the database (failure is returned to the caller)
    /// 2. Create the `users` table if enabled
    /// 3. Wire repository → service → router
    /// 4. Bind the listener and start serving
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;

        info!("Starting user API...");

        // ── Database ───────────────────────────────────────────
        let db = init_database(&app_cfg.database_config()).await?;

        if opts.auto_migrate {
            info!("Ensuring database schema...");
            Migrator::up(&db, None).await?;
            info!("Schema ready");
        }

        // ── Repositories & Services ────────────────────────────
        let repo: Arc<dyn UserRepositoryInterface> = Arc::new(UserRepository::new(db.clone()));
        let user_service = Arc::new(UserService::new(repo));

        // ── REST API server ────────────────────────────────────
        let api_router = create_api_router(
            user_service,
            RouterOptions {
                request_timeout: Duration::from_secs(app_cfg.server.request_timeout),
            },
        );

        Ok(Self::serve(app_cfg, db, api_router).await?)
    }

    /// Bind the configured address and serve `api_router` in the background.
    async fn serve(
        app_cfg: AppConfig,
        db: DatabaseConnection,
        api_router: Router,
    ) -> std::io::Result<Self> {
        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);

        let listener = tokio::net::TcpListener::bind(app_cfg.server.address()).await?;
        let local_addr = listener.local_addr()?;
        info!("Server starting on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let api_shutdown = shutdown.signal();
        let api_server = axum::serve(listener, api_router.into_make_service())
            .with_graceful_shutdown(async move {
                api_shutdown.wait().await;
                info!("Shutting down server...");
            });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            config: app_cfg,
            local_addr,
            db,
            shutdown,
            api_task,
        })
    }

    /// Address the listener is bound to (useful with port 0).
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown (non-blocking).
    ///
    /// The listener stops accepting connections; call [`wait`](Self::wait)
    /// to block until in-flight requests have drained.
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Block until the server has stopped, then close the database pool.
    ///
    /// Once shutdown is triggered the whole teardown is bounded by the
    /// configured grace period. Requests still running when it expires are
    /// abandoned: the listener is stopped and the pool close is not awaited
    /// past the deadline.
    pub async fn wait(self) {
        let Self {
            db,
            shutdown,
            mut api_task,
            ..
        } = self;
        let signal = shutdown.signal();
        let grace = shutdown.grace_period();

        let stopped_early = tokio::select! {
            _ = signal.wait() => false,
            result = &mut api_task => {
                if let Err(e) = result {
                    error!("REST API server task panicked: {}", e);
                }
                true
            }
        };

        let deadline = Instant::now() + grace;
        if !stopped_early {
            let drained = shutdown
                .drain_within(async {
                    if let Err(e) = (&mut api_task).await {
                        error!("REST API server task panicked: {}", e);
                    }
                })
                .await;
            if !drained {
                warn!("Grace period expired with requests still in flight; abandoning them");
                api_task.abort();
            }
        }

        let close_window = deadline
            .saturating_duration_since(Instant::now())
            .max(MIN_POOL_CLOSE_WINDOW);
        match tokio::time::timeout(close_window, db.close()).await {
            Ok(Ok(())) => info!("Database connection closed"),
            Ok(Err(e)) => warn!("Error closing database connection: {}", e),
            Err(_) => warn!(
                "Database pool still had connections in use after {:?}; not waiting for them",
                close_window
            ),
        }

        info!("Server stopped");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        self.trigger_shutdown();
        self.wait().await;
    }

    /// Check if the server is still running.
    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// Initialize tracing (logging) from the logging settings.
///
/// Call this once at process startup (before [`ServerHandle::start`]).
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_tracing(config: &LoggingSettings) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.level));

    match config.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    fn test_options() -> ServerOptions {
        let mut config = AppConfig::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 0;
        config.server.shutdown_timeout = 5;
        config.database.url = "sqlite::memory:".to_string();
        ServerOptions {
            config,
            auto_migrate: true,
        }
    }

    async fn raw_get(addr: SocketAddr, path: &str) -> String {
        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        let request = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    #[tokio::test]
    async fn serves_requests_then_shuts_down() {
        let handle = ServerHandle::start(test_options()).await.unwrap();
        let addr = handle.local_addr();
        assert_ne!(addr.port(), 0);
        assert!(handle.is_running());

        let health = raw_get(addr, "/health").await;
        assert!(health.starts_with("HTTP/1.1 200"), "{health}");

        let users = raw_get(addr, "/users").await;
        assert!(users.starts_with("HTTP/1.1 200"), "{users}");
        assert!(users.ends_with("[]"), "{users}");

        tokio::time::timeout(Duration::from_secs(10), handle.shutdown())
            .await
            .expect("shutdown did not complete");

        assert!(tokio::net::TcpStream::connect(addr).await.is_err());
    }

    #[tokio::test]
    async fn shutdown_signal_stops_a_waiting_server() {
        let handle = ServerHandle::start(test_options()).await.unwrap();
        let signal = handle.shutdown_signal();

        let waiter = tokio::spawn(handle.wait());
        signal.trigger();

        tokio::time::timeout(Duration::from_secs(10), waiter)
            .await
            .expect("wait did not return")
            .unwrap();
    }

    #[tokio::test]
    async fn wait_is_bounded_by_grace_period_when_a_request_holds_the_pool() {
        use axum::routing::get;
        use sea_orm::TransactionTrait;
        use tokio::sync::Notify;

        let mut opts = test_options();
        opts.config.server.shutdown_timeout = 1;
        opts.config.server.request_timeout = 60;

        // In-memory SQLite pools hold a single connection; the open
        // transaction keeps it checked out.
        let db = init_database(&opts.config.database_config()).await.unwrap();
        let held_db = db.clone();
        let entered = Arc::new(Notify::new());
        let entered_in_handler = entered.clone();
        let router = Router::new().route(
            "/hold",
            get(move || {
                let db = held_db.clone();
                let entered = entered_in_handler.clone();
                async move {
                    let _txn = db.begin().await.unwrap();
                    entered.notify_one();
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    "released"
                }
            }),
        );

        let handle = ServerHandle::serve(opts.config, db, router).await.unwrap();
        let addr = handle.local_addr();
        tokio::spawn(async move {
            if let Ok(mut stream) = tokio::net::TcpStream::connect(addr).await {
                let _ = stream
                    .write_all(b"GET /hold HTTP/1.1\r\nHost: localhost\r\n\r\n")
                    .await;
                let mut sink = Vec::new();
                let _ = stream.read_to_end(&mut sink).await;
            }
        });
        entered.notified().await;

        let started = Instant::now();
        tokio::time::timeout(Duration::from_secs(10), handle.shutdown())
            .await
            .expect("shutdown outlived the grace period");
        assert!(
            started.elapsed() < Duration::from_secs(3),
            "took {:?}",
            started.elapsed()
        );
    }

    #[tokio::test]
    async fn unreachable_database_fails_start() {
        let mut opts = test_options();
        opts.config.database.url = "sqlite:///definitely/missing/dir/users.db".to_string();

        assert!(ServerHandle::start(opts).await.is_err());
    }
}
