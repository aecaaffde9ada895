//! Mediator - routes requests to the handler registered for their type.
//!
//! Controllers never call command logic directly: they build a request
//! value and `send` it. Each request type has exactly one handler,
//! registered while the startup configures its services.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::Instrument;

use crate::errors::{AppError, AppResult};

/// A message with a typed response.
pub trait Request: Send + 'static {
    type Response: Send + 'static;
}

/// Handles one request type.
#[async_trait]
pub trait RequestHandler<R: Request>: Send + Sync + 'static {
    async fn handle(&self, request: R) -> AppResult<R::Response>;
}

type HandlerRef<R> = Arc<dyn RequestHandler<R>>;

/// Collects handlers before the mediator is frozen.
#[derive(Default)]
pub struct MediatorBuilder {
    handlers: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
    names: Vec<&'static str>,
}

impl MediatorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handler for request type `R`, replacing any previous one.
    pub fn register<R, H>(&mut self, handler: H) -> &mut Self
    where
        R: Request,
        H: RequestHandler<R>,
    {
        let handler: HandlerRef<R> = Arc::new(handler);
        if self
            .handlers
            .insert(TypeId::of::<R>(), Arc::new(handler))
            .is_some()
        {
            tracing::warn!(
                "Handler for {} registered twice; keeping the last one",
                type_name::<R>()
            );
        } else {
            self.names.push(type_name::<R>());
        }
        self
    }

    /// Whether a handler for `R` has been registered.
    pub fn contains<R: Request>(&self) -> bool {
        self.handlers.contains_key(&TypeId::of::<R>())
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn build(self) -> Mediator {
        for name in &self.names {
            tracing::debug!("Mediator handler registered for {}", name);
        }
        Mediator {
            handlers: self.handlers,
        }
    }
}

/// Dispatches requests to their handlers.
#[derive(Default)]
pub struct Mediator {
    handlers: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl Mediator {
    pub fn builder() -> MediatorBuilder {
        MediatorBuilder::new()
    }

    /// Send a request to its handler.
    pub async fn send<R: Request>(&self, request: R) -> AppResult<R::Response> {
        let handler = self
            .handlers
            .get(&TypeId::of::<R>())
            .and_then(|entry| entry.downcast_ref::<HandlerRef<R>>())
            .cloned()
            .ok_or_else(|| {
                AppError::internal(format!(
                    "No handler registered for request {}",
                    type_name::<R>()
                ))
            })?;

        let span = tracing::debug_span!("mediator.send", request = type_name::<R>());
        handler.handle(request).instrument(span).await
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ping(u32);

    impl Request for Ping {
        type Response = u32;
    }

    struct Unhandled;

    impl Request for Unhandled {
        type Response = ();
    }

    struct Doubler;

    #[async_trait]
    impl RequestHandler<Ping> for Doubler {
        async fn handle(&self, request: Ping) -> AppResult<u32> {
            Ok(request.0 * 2)
        }
    }

    struct Failing;

    #[async_trait]
    impl RequestHandler<Ping> for Failing {
        async fn handle(&self, _request: Ping) -> AppResult<u32> {
            Err(AppError::validation("nope"))
        }
    }

    #[tokio::test]
    async fn test_send_dispatches_to_handler() {
        let mut builder = Mediator::builder();
        builder.register::<Ping, _>(Doubler);
        assert!(builder.contains::<Ping>());

        let mediator = builder.build();
        assert_eq!(mediator.send(Ping(21)).await.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_unregistered_request_fails() {
        let mediator = Mediator::builder().build();
        let result = mediator.send(Unhandled).await;
        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[tokio::test]
    async fn test_reregistration_replaces_handler() {
        let mut builder = Mediator::builder();
        builder
            .register::<Ping, _>(Doubler)
            .register::<Ping, _>(Failing);
        assert_eq!(builder.len(), 1);

        let mediator = builder.build();
        assert!(matches!(
            mediator.send(Ping(1)).await,
            Err(AppError::Validation(_))
        ));
    }
}
