//! Bootstrap shared by every API built on the kit.
//!
//! An application implements [`Startup`] to declare its mapping profiles,
//! mediator handlers and controllers. [`Host`] turns that declaration into
//! a router with authentication, Swagger UI and the error, tracing and
//! CORS middleware already in place.

use std::sync::Arc;

use axum::{middleware, Router};
use sea_orm::DatabaseConnection;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::error_handling::{catch_panic_layer, log_server_errors};
use crate::api::health::health_routes;
use crate::api::openapi::{build_document, ApiInfo, ControllerDocs};
use crate::api::Controller;
use crate::auth::{require_bearer, Authenticator, TokenService};
use crate::config::{
    Config, ENV_TOKEN_AUDIENCE, ENV_TOKEN_ISSUER, ENV_TOKEN_SECONDS, ENV_TOKEN_SECRET_KEY,
    OPENAPI_JSON_PATH, SWAGGER_UI_PATH,
};
use crate::errors::{AppError, AppResult};
use crate::infra::{Persistence, UnitOfWork};
use crate::mapping::{Mapper, Profile};
use crate::mediator::{Mediator, MediatorBuilder};

/// Feature switches a startup chooses for itself.
///
/// `SWAGGER_ENABLED` and `AUTH_ENABLED` override them at deploy time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartupOptions {
    pub swagger_enabled: bool,
    pub authentication_enabled: bool,
}

impl Default for StartupOptions {
    fn default() -> Self {
        Self {
            swagger_enabled: true,
            authentication_enabled: false,
        }
    }
}

/// Application hooks called while the host is built.
pub trait Startup: Send + Sync + 'static {
    fn options(&self) -> StartupOptions {
        StartupOptions::default()
    }

    fn api_info(&self) -> ApiInfo {
        ApiInfo::default()
    }

    /// Mapping profiles, scanned once into the shared [`Mapper`].
    fn profiles(&self) -> Vec<Box<dyn Profile>> {
        Vec::new()
    }

    /// Register request handlers.
    fn configure_mediator(&self, _mediator: &mut MediatorBuilder, _uow: &Arc<Persistence>) {}

    /// Controllers to mount, built from the shared services.
    fn controllers(&self, services: &Services) -> Vec<Controller>;
}

/// Services shared by every controller.
#[derive(Clone)]
pub struct Services {
    config: Arc<Config>,
    unit_of_work: Arc<Persistence>,
    mapper: Arc<Mapper>,
    mediator: Arc<Mediator>,
    tokens: Option<Arc<dyn TokenService>>,
}

impl Services {
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn connection(&self) -> Arc<DatabaseConnection> {
        Arc::clone(self.unit_of_work.connection())
    }

    pub fn unit_of_work(&self) -> Arc<Persistence> {
        Arc::clone(&self.unit_of_work)
    }

    pub fn mapper(&self) -> Arc<Mapper> {
        Arc::clone(&self.mapper)
    }

    pub fn mediator(&self) -> Arc<Mediator> {
        Arc::clone(&self.mediator)
    }

    /// Token service, present when authentication is active.
    pub fn tokens(&self) -> Option<Arc<dyn TokenService>> {
        self.tokens.clone()
    }
}

/// Builds and serves the application declared by a [`Startup`].
pub struct Host<S> {
    startup: S,
    config: Config,
}

impl<S: Startup> Host<S> {
    pub fn new(startup: S, config: Config) -> Self {
        Self { startup, config }
    }

    /// Startup options with the configuration overrides applied.
    pub fn options(&self) -> StartupOptions {
        let defaults = self.startup.options();
        StartupOptions {
            swagger_enabled: self.config.swagger_enabled.unwrap_or(defaults.swagger_enabled),
            authentication_enabled: self
                .config
                .authentication_enabled
                .unwrap_or(defaults.authentication_enabled),
        }
    }

    /// Assemble the shared services.
    pub fn services(&self, db: impl Into<Arc<DatabaseConnection>>) -> Services {
        let options = self.options();

        let tokens = if options.authentication_enabled {
            self.authentication()
        } else {
            tracing::info!(
                "Authentication disabled; set AUTH_ENABLED=true and {} to protect the API",
                ENV_TOKEN_SECRET_KEY
            );
            None
        };

        let unit_of_work = Arc::new(Persistence::new(db));

        let profiles = self.startup.profiles();
        if profiles.is_empty() {
            tracing::info!("No mapping profiles registered; mapping is not configured");
        }
        let mapper = Arc::new(Mapper::from_profiles(&profiles));

        let mut builder = Mediator::builder();
        self.startup.configure_mediator(&mut builder, &unit_of_work);
        if builder.is_empty() {
            tracing::warn!("No mediator handlers registered; write commands will fail");
        }
        let mediator = Arc::new(builder.build());

        Services {
            config: Arc::new(self.config.clone()),
            unit_of_work,
            mapper,
            mediator,
            tokens,
        }
    }

    fn authentication(&self) -> Option<Arc<dyn TokenService>> {
        match &self.config.token {
            Some(token) => {
                tracing::info!(
                    "JWT bearer authentication enabled (issuer {}, audience {})",
                    token.issuer,
                    token.audience
                );
                Some(Arc::new(Authenticator::new(token.clone())))
            }
            None => {
                tracing::warn!(
                    "Authentication requested but no token configuration found; \
                     set {}, {}, {} and {}. Running without authentication",
                    ENV_TOKEN_SECRET_KEY,
                    ENV_TOKEN_AUDIENCE,
                    ENV_TOKEN_ISSUER,
                    ENV_TOKEN_SECONDS
                );
                None
            }
        }
    }

    /// Build the complete router.
    pub fn build(&self, db: impl Into<Arc<DatabaseConnection>>) -> Router {
        let db = db.into();
        let options = self.options();
        let services = self.services(Arc::clone(&db));
        let tokens = services.tokens();

        let mut router = Router::new();
        let mut documented: Vec<(String, ControllerDocs)> = Vec::new();

        for controller in self.startup.controllers(&services) {
            let Controller {
                path,
                router: routes,
                anonymous,
                docs,
            } = controller;

            let routes = match (&tokens, anonymous) {
                (Some(tokens), false) => routes.route_layer(middleware::from_fn_with_state(
                    Arc::clone(tokens),
                    require_bearer,
                )),
                _ => routes,
            };

            match docs {
                Some(mut docs) => {
                    if tokens.is_some() && !anonymous {
                        docs.secure();
                    }
                    documented.push((path.clone(), docs));
                }
                None => tracing::warn!("Controller mounted at {} has no API documentation", path),
            }

            tracing::debug!("Mounting controller at {}", path);
            router = router.nest(&path, routes);
        }

        if options.swagger_enabled {
            let document = build_document(
                &self.startup.api_info(),
                documented.iter().map(|(path, docs)| (path.as_str(), docs)),
                tokens.is_some(),
            );
            router = router.merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, document));
            tracing::info!("Swagger UI available at {}", SWAGGER_UI_PATH);
        }

        router
            .merge(health_routes(db))
            .layer(middleware::from_fn(log_server_errors))
            .layer(catch_panic_layer())
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
    }

    /// Bind to the configured address and serve until the process stops.
    pub async fn serve(&self, db: impl Into<Arc<DatabaseConnection>>) -> AppResult<()> {
        let app = self.build(db);

        let addr = self.config.server_addr();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

        tracing::info!("Server running on http://{}", addr);

        axum::serve(listener, app)
            .await
            .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

        Ok(())
    }
}
