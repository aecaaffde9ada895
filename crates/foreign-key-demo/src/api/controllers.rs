//! Controllers mounted by the startup.

use std::sync::Arc;

use api_kit::{Controller, QueryController, RecordController, Services};

use super::resources::{CategoryResource, ManyResource, OneResource};
use crate::domain::ToOneViewModel;
use crate::infra::{CategoryRepository, ManyRepository, OneRepository, ToOneRepository};

pub fn controllers(services: &Services) -> Vec<Controller> {
    let db = services.connection();

    vec![
        RecordController::<OneResource>::new(
            Arc::new(OneRepository::new(db.clone())),
            services.mapper(),
            services.mediator(),
        )
        .into_controller("/api/one", "One"),
        RecordController::<ManyResource>::new(
            Arc::new(ManyRepository::new(db.clone())),
            services.mapper(),
            services.mediator(),
        )
        .into_controller("/api/many", "Many"),
        RecordController::<CategoryResource>::new(
            Arc::new(CategoryRepository::new(db.clone())),
            services.mapper(),
            services.mediator(),
        )
        .into_controller("/api/category", "Category"),
        QueryController::<_, ToOneViewModel>::new(
            Arc::new(ToOneRepository::new(db)),
            services.mapper(),
        )
        .into_controller("/api/to-one", "ToOne")
        .allow_anonymous(),
    ]
}
