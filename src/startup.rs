//! Application Startup
//!
//! Wiring of storage, services, listeners and the HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;

use crate::application::listeners::NotificationListener;
use crate::application::services::{
    GroupService, GroupServiceImpl, MatchService, MatchServiceImpl, MessageService,
    MessageServiceImpl, UserService, UserServiceImpl,
};
use crate::config::{Settings, StorageBackend};
use crate::domain::events::EventRepository;
use crate::domain::{GroupRepository, MatchRepository, MessageRepository, UserRepository};
use crate::infrastructure::database;
use crate::infrastructure::events::{EventBus, EventPublisher};
use crate::infrastructure::repositories::{
    InMemoryEventRepository, InMemoryGroupRepository, InMemoryMatchRepository,
    InMemoryMessageRepository, InMemoryUserRepository, PgEventRepository, PgGroupRepository,
    PgMatchRepository, PgMessageRepository, PgUserRepository,
};
use crate::presentation::http::handlers::health;
use crate::presentation::http::routes;
use crate::presentation::middleware::{cors, create_trace_layer, TokenVerifier};
use crate::shared::error::AppError;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserService>,
    pub groups: Arc<dyn GroupService>,
    pub matches: Arc<dyn MatchService>,
    pub messages: Arc<dyn MessageService>,
    pub tokens: Arc<TokenVerifier>,
    pub bus: Arc<EventBus>,
    /// Present only with the postgres backend
    pub db: Option<PgPool>,
    pub settings: Arc<Settings>,
}

/// One implementation of every persistence port.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub groups: Arc<dyn GroupRepository>,
    pub matches: Arc<dyn MatchRepository>,
    pub messages: Arc<dyn MessageRepository>,
    pub events: Arc<dyn EventRepository>,
}

impl Repositories {
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            groups: Arc::new(InMemoryGroupRepository::new()),
            matches: Arc::new(InMemoryMatchRepository::new()),
            messages: Arc::new(InMemoryMessageRepository::new()),
            events: Arc::new(InMemoryEventRepository::new()),
        }
    }

    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            groups: Arc::new(PgGroupRepository::new(pool.clone())),
            matches: Arc::new(PgMatchRepository::new(pool.clone())),
            messages: Arc::new(PgMessageRepository::new(pool.clone())),
            events: Arc::new(PgEventRepository::new(pool)),
        }
    }
}

impl AppState {
    /// Build services over `repos` and start the notification listener.
    ///
    /// Must be called inside a tokio runtime.
    pub fn build(settings: Settings, repos: Repositories, db: Option<PgPool>) -> Result<Self, AppError> {
        let tokens = Arc::new(TokenVerifier::from_settings(&settings.auth)?);
        let bus = Arc::new(EventBus::new(settings.events.bus_capacity));
        let publisher = EventPublisher::new(repos.events.clone(), bus.clone());

        let users: Arc<dyn UserService> =
            Arc::new(UserServiceImpl::new(repos.users.clone(), publisher.clone()));
        let groups: Arc<dyn GroupService> = Arc::new(GroupServiceImpl::new(
            repos.groups.clone(),
            repos.users.clone(),
            repos.matches.clone(),
            repos.events.clone(),
            publisher.clone(),
        ));
        let matches: Arc<dyn MatchService> = Arc::new(MatchServiceImpl::new(
            repos.matches.clone(),
            repos.groups.clone(),
            publisher.clone(),
        ));
        let messages: Arc<dyn MessageService> =
            Arc::new(MessageServiceImpl::new(repos.messages.clone(), publisher));

        NotificationListener::new(messages.clone(), repos.groups.clone()).spawn(bus.subscribe());
        tracing::debug!("Notification listener subscribed");

        Ok(Self {
            users,
            groups,
            matches,
            messages,
            tokens,
            bus,
            db,
            settings: Arc::new(settings),
        })
    }
}

/// Router with tracing and CORS layers applied
pub fn build_router(state: AppState) -> Router {
    let cors = cors::create_cors_layer(&state.settings.cors);

    routes::create_router(state)
        .layer(create_trace_layer())
        .layer(cors)
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        health::init_server_start();

        let (repos, db) = match settings.storage.backend {
            StorageBackend::Postgres => {
                let pool = database::create_pool(&settings.database).await?;
                tracing::info!("Database connection pool created");

                if settings.database.run_migrations {
                    database::run_migrations(&pool).await?;
                    tracing::info!("Database migrations applied");
                }
                (Repositories::postgres(pool.clone()), Some(pool))
            }
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage; data is lost on shutdown");
                (Repositories::in_memory(), None)
            }
        };

        let addr = settings.server_addr();
        let state = AppState::build(settings, repos, db)?;
        let router = build_router(state);

        let listener = TcpListener::bind(&addr).await?;
        tracing::info!("Listening on {}", listener.local_addr()?);

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
