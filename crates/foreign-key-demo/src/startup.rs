//! Startup for the foreign-key demo.

use std::sync::Arc;

use api_kit::api::{register_record_handlers, Create};
use api_kit::infra::Persistence;
use api_kit::{ApiInfo, Controller, MediatorBuilder, Profile, Services, Startup, StartupOptions};

use crate::api::{controllers, CategoryResource, CreateManyHandler, ManyResource, OneResource};
use crate::domain::MappingProfile;

pub struct ForeignKeyStartup;

impl Startup for ForeignKeyStartup {
    fn options(&self) -> StartupOptions {
        StartupOptions {
            swagger_enabled: true,
            authentication_enabled: false,
        }
    }

    fn api_info(&self) -> ApiInfo {
        ApiInfo {
            title: "Foreign Key Demo".to_string(),
            version: "v1".to_string(),
            description: "One, Many, ToOne and Category records related by foreign keys"
                .to_string(),
            contact_name: "API Kit".to_string(),
            contact_url: None,
        }
    }

    fn profiles(&self) -> Vec<Box<dyn Profile>> {
        vec![Box::new(MappingProfile)]
    }

    fn configure_mediator(&self, mediator: &mut MediatorBuilder, uow: &Arc<Persistence>) {
        // custom handlers before the defaults
        mediator.register::<Create<ManyResource>, _>(CreateManyHandler::new(Arc::clone(uow)));

        register_record_handlers::<OneResource, _>(mediator, Arc::clone(uow));
        register_record_handlers::<ManyResource, _>(mediator, Arc::clone(uow));
        register_record_handlers::<CategoryResource, _>(mediator, Arc::clone(uow));
    }

    fn controllers(&self, services: &Services) -> Vec<Controller> {
        controllers(services)
    }
}
