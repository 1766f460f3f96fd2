//! Reusable server runtime.
//!
//! Provides [`ServerHandle`] that encapsulates the full server lifecycle:
//! metrics recorder, database init, migrations, optional demo data, REST
//! API, and graceful shutdown.
//!
//! The CLI binary and the integration tests both start the service through
//! this module.

use std::net::SocketAddr;
use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tracing::{error, info, warn};

use crate::application::{EmployeeService, HotelService, RequestService};
use crate::config::AppConfig;
use crate::domain::employee::{EmployeeRole, NewEmployee};
use crate::domain::hotel::NewHotel;
use crate::domain::request::{NewGuestRequest, Priority, RequestType};
use crate::domain::{DomainResult, RepositoryProvider};
use crate::infrastructure::{init_database, run_migrations, SeaOrmRepositoryProvider};
use crate::interfaces::http::create_api_router;
use crate::interfaces::http::modules::metrics::install_recorder;
use crate::support::shutdown::{ShutdownCoordinator, ShutdownSignal};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the service.
pub struct ServerOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
    /// Seed a demo hotel when the database has none. Defaults to
    /// `config.demo.seed`.
    pub seed_demo: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self::from(AppConfig::default())
    }
}

impl From<AppConfig> for ServerOptions {
    fn from(config: AppConfig) -> Self {
        Self {
            seed_demo: config.demo.seed,
            config,
            auto_migrate: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running service.
///
/// # Examples
///
/// ```rust,no_run
/// use hotel_desk::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     // ... wait for shutdown signal ...
///     handle.shutdown().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// Repository provider for data access.
    pub repos: Arc<dyn RepositoryProvider>,
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Address the REST API is bound to. With `api_port = 0` this carries
    /// the port the OS picked.
    pub local_addr: SocketAddr,

    db: DatabaseConnection,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Start the service with the given options.
    ///
    /// This will:
    /// 1. Install the Prometheus metrics recorder
    /// 2. Connect to the database and run migrations
    /// 3. Seed demo data (if enabled and the database is empty)
    /// 4. Start the REST API server (with Swagger UI)
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;

        info!("Starting Hotel Desk...");

        // ── Prometheus metrics recorder ────────────────────────
        let prometheus_handle = match install_recorder() {
            Ok(handle) => {
                info!("📊 Prometheus metrics recorder ready");
                Some(handle)
            }
            Err(e) => {
                warn!("Metrics disabled, recorder could not be installed: {}", e);
                None
            }
        };

        // ── Database ───────────────────────────────────────────
        let db = init_database(&app_cfg.database_config()).await?;

        if opts.auto_migrate {
            run_migrations(&db).await?;
        }

        // ── Repositories ───────────────────────────────────────
        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

        if opts.seed_demo {
            match seed_demo_data(repos.clone()).await {
                Ok(true) => info!("Demo hotel created"),
                Ok(false) => info!("Hotels already present, demo seed skipped"),
                Err(e) => error!("Failed to seed demo data: {}", e),
            }
        }

        // ── Shutdown coordinator ───────────────────────────────
        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let shutdown_signal = shutdown.signal();

        // ── REST API server ────────────────────────────────────
        let api_router = create_api_router(repos.clone(), app_cfg.pagination, prometheus_handle);

        let api_addr = app_cfg.server.address();
        let listener = tokio::net::TcpListener::bind(&api_addr).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API server listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let api_shutdown = shutdown_signal.clone();
        let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("🛑 REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        info!("🚀 Server started.");

        Ok(Self {
            repos,
            config: app_cfg,
            local_addr,
            db,
            shutdown,
            api_task,
        })
    }

    /// `http://host:port` for clients. Wildcard binds are reported as loopback.
    pub fn base_url(&self) -> String {
        let mut addr = self.local_addr;
        if addr.ip().is_unspecified() {
            addr.set_ip(std::net::Ipv4Addr::LOCALHOST.into());
        }
        format!("http://{}", addr)
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
    /// Call [`wait`](Self::wait) to block until everything has stopped.
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the server to fully stop after shutdown has been triggered.
    pub async fn wait(self) {
        info!("⏳ Waiting for in-flight requests...");

        let api_task = self.api_task;
        let drained = self
            .shutdown
            .drain(async move {
                match api_task.await {
                    Ok(()) => info!("REST API server stopped"),
                    Err(e) => error!("REST API server task panicked: {}", e),
                }
            })
            .await;
        if !drained {
            warn!("Some requests were still running at shutdown");
        }

        // Close database connection
        if let Err(e) = self.db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("✅ Database connection closed");
        }

        info!("👋 Hotel Desk shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("🛑 Shutting down Hotel Desk...");
        self.trigger_shutdown();
        self.wait().await;
    }

    /// Check if the server is still running.
    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// Creates a demo hotel with a small staff and a few open requests, unless
/// any hotel exists. Returns whether anything was written.
pub async fn seed_demo_data(repos: Arc<dyn RepositoryProvider>) -> DomainResult<bool> {
    if repos.hotels().count().await? > 0 {
        return Ok(false);
    }

    let hotel = HotelService::new(repos.clone())
        .create(NewHotel {
            name: "Grand Budapest".to_string(),
            address: Some("1 Alpine Way, Nebelsbad".to_string()),
        })
        .await?;

    let employees = EmployeeService::new(repos.clone());
    let staff = [
        ("Agatha", EmployeeRole::Housekeeping, true),
        ("Zero", EmployeeRole::FrontDesk, true),
        ("Ludwig", EmployeeRole::Maintenance, true),
        ("Gustave", EmployeeRole::Manager, false),
    ];
    for (name, role, is_active) in staff {
        employees
            .register(NewEmployee {
                hotel_id: hotel.id.clone(),
                name: name.to_string(),
                role,
                email: Some(format!("{}@grandbudapest.example", name.to_lowercase())),
                phone: None,
                is_active,
            })
            .await?;
    }

    let requests = RequestService::new(repos);
    let samples = [
        ("Madame D.", "101", RequestType::Towels, Priority::Low),
        ("Mr. Moustafa", "204", RequestType::RoomService, Priority::Medium),
        ("M. Ivan", "310", RequestType::Maintenance, Priority::High),
    ];
    for (guest, room, request_type, priority) in samples {
        requests
            .create(NewGuestRequest {
                hotel_id: hotel.id.clone(),
                guest_name: guest.to_string(),
                room_number: Some(room.to_string()),
                request_type,
                description: None,
                priority: Some(priority),
            })
            .await?;
    }

    Ok(true)
}

/// Initialize tracing (logging) from the application config.
///
/// Call this once at process startup (before [`ServerHandle::start`]).
/// `RUST_LOG` takes precedence over `logging.level`.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    let result = match config.logging.format.to_lowercase().as_str() {
        "json" => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        _ => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init(),
    };

    if let Err(e) = result {
        eprintln!("Tracing already initialized: {}", e);
    }
}
