//! Object-to-object mapping.
//!
//! Profiles register typed map functions into a [`MapperConfiguration`];
//! the finished [`Mapper`] is shared by every controller to turn stored
//! rows into the view models returned to clients.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::{AppError, AppResult};

type MapFn<S, D> = Arc<dyn Fn(&S) -> D + Send + Sync>;

/// A named group of maps, registered once at startup.
pub trait Profile: Send + Sync {
    /// Profile name used in logs
    fn name(&self) -> &str;

    /// Register this profile's maps
    fn configure(&self, config: &mut MapperConfiguration);
}

/// Collects maps while profiles are being applied.
#[derive(Default)]
pub struct MapperConfiguration {
    maps: HashMap<(TypeId, TypeId), Arc<dyn Any + Send + Sync>>,
}

impl MapperConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an explicit map from `S` to `D`.
    pub fn create_map<S, D, F>(&mut self, map: F) -> &mut Self
    where
        S: 'static,
        D: 'static,
        F: Fn(&S) -> D + Send + Sync + 'static,
    {
        let map: MapFn<S, D> = Arc::new(map);
        let key = (TypeId::of::<S>(), TypeId::of::<D>());
        if self.maps.insert(key, Arc::new(map)).is_some() {
            tracing::warn!(
                "Map {} -> {} registered twice; keeping the last one",
                type_name::<S>(),
                type_name::<D>()
            );
        }
        self
    }

    /// Register the conventional map from `S` to `D` through `D: From<S>`.
    pub fn create_map_from<S, D>(&mut self) -> &mut Self
    where
        S: Clone + 'static,
        D: From<S> + 'static,
    {
        self.create_map(|source: &S| D::from(source.clone()))
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }

    pub fn build(self) -> Mapper {
        Mapper { maps: self.maps }
    }
}

/// Immutable registry of maps.
#[derive(Default)]
pub struct Mapper {
    maps: HashMap<(TypeId, TypeId), Arc<dyn Any + Send + Sync>>,
}

impl Mapper {
    /// Apply every profile in order and freeze the result.
    pub fn from_profiles(profiles: &[Box<dyn Profile>]) -> Self {
        let mut config = MapperConfiguration::new();
        for profile in profiles {
            let before = config.len();
            profile.configure(&mut config);
            tracing::debug!(
                "Mapping profile '{}' registered {} map(s)",
                profile.name(),
                config.len().saturating_sub(before)
            );
        }
        config.build()
    }

    /// Whether a map from `S` to `D` exists.
    pub fn has_map<S: 'static, D: 'static>(&self) -> bool {
        self.maps
            .contains_key(&(TypeId::of::<S>(), TypeId::of::<D>()))
    }

    /// Map a single value.
    pub fn map<S: 'static, D: 'static>(&self, source: &S) -> AppResult<D> {
        let map = self.lookup::<S, D>()?;
        Ok(map(source))
    }

    /// Map a slice, preserving order.
    pub fn map_all<S: 'static, D: 'static>(&self, sources: &[S]) -> AppResult<Vec<D>> {
        let map = self.lookup::<S, D>()?;
        Ok(sources.iter().map(|s| map(s)).collect())
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }

    fn lookup<S: 'static, D: 'static>(&self) -> AppResult<&MapFn<S, D>> {
        self.maps
            .get(&(TypeId::of::<S>(), TypeId::of::<D>()))
            .and_then(|entry| entry.downcast_ref::<MapFn<S, D>>())
            .ok_or_else(|| {
                AppError::internal(format!(
                    "No map registered from {} to {}",
                    type_name::<S>(),
                    type_name::<D>()
                ))
            })
    }
}
