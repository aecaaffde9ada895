//! Mapping profile for the demo tables.

use api_kit::{MapperConfiguration, Profile};

use super::view_models::{CategoryViewModel, ManyQueryViewModel, OneViewModel, ToOneViewModel};
use crate::infra::repositories::entities::{category, one, to_one};
use crate::infra::ManyWithOne;

pub struct MappingProfile;

impl Profile for MappingProfile {
    fn name(&self) -> &str {
        "MappingProfile"
    }

    fn configure(&self, config: &mut MapperConfiguration) {
        config
            .create_map_from::<one::Model, OneViewModel>()
            .create_map_from::<to_one::Model, ToOneViewModel>()
            .create_map_from::<category::Model, CategoryViewModel>()
            .create_map(many_query_view_model);
    }
}

fn many_query_view_model(row: &ManyWithOne) -> ManyQueryViewModel {
    let one_property01 = row
        .one
        .as_ref()
        .map(|one| one.one_property01.as_str())
        .unwrap_or_default();

    ManyQueryViewModel {
        many_id: row.many.id,
        one_id: row.many.one_id,
        many_property01: row.many.many_property01.clone(),
        custom_property: format!(
            "ManyID: {}/OneID: {}/ManyProperty01: {}/OneProperty01: {}",
            row.many.id, row.many.one_id, row.many.many_property01, one_property01
        ),
        one: row.one.clone().map(OneViewModel::from),
    }
}
