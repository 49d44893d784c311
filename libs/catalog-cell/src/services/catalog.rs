use std::collections::HashSet;
use std::fs;

use tracing::{debug, info};

use shared_config::AppConfig;

use crate::models::{Barber, CatalogError, CatalogService, Service, ServiceCategory};

const DEFAULT_BARBERS: &str = include_str!("../../resources/barbers.json");
const DEFAULT_SERVICES: &str = include_str!("../../resources/services.json");

/// Read-only view over the barber and service catalogs.
///
/// Built once at startup and shared by every request; nothing mutates it
/// afterwards.
pub trait CatalogRepository: Send + Sync {
    fn barbers(&self) -> &[Barber];

    fn barber(&self, id: u32) -> Option<&Barber>;

    /// All services flattened out of their categories, ordered by id.
    fn services(&self) -> Vec<CatalogService>;

    fn service(&self, id: u32) -> Option<&Service>;

    fn service_duration(&self, id: u32) -> Option<u32> {
        self.service(id).map(|service| service.duration)
    }
}

#[derive(Debug, Clone)]
pub struct Catalog {
    barbers: Vec<Barber>,
    categories: Vec<ServiceCategory>,
}

impl Catalog {
    pub fn new(barbers: Vec<Barber>, categories: Vec<ServiceCategory>) -> Result<Self, CatalogError> {
        let mut barber_ids = HashSet::new();
        for barber in &barbers {
            if !barber_ids.insert(barber.id) {
                return Err(CatalogError::DuplicateId { kind: "barber", id: barber.id });
            }
        }

        let mut service_ids = HashSet::new();
        for service in categories.iter().flat_map(|c| c.services.iter()) {
            if service.duration == 0 {
                return Err(CatalogError::InvalidDuration {
                    id: service.id,
                    duration: service.duration,
                });
            }
            if !service_ids.insert(service.id) {
                return Err(CatalogError::DuplicateId { kind: "service", id: service.id });
            }
        }

        Ok(Self { barbers, categories })
    }

    pub fn from_json(barbers_json: &str, services_json: &str) -> Result<Self, CatalogError> {
        let barbers: Vec<Barber> = serde_json::from_str(barbers_json)
            .map_err(|source| CatalogError::Parse { kind: "barber", source })?;
        let categories: Vec<ServiceCategory> = serde_json::from_str(services_json)
            .map_err(|source| CatalogError::Parse { kind: "service", source })?;

        Self::new(barbers, categories)
    }

    /// Loads the catalogs from the configured paths, falling back to the
    /// bundled defaults for any path that is not set.
    pub fn load(config: &AppConfig) -> Result<Self, CatalogError> {
        let barbers_json = read_or_default(config.barbers_catalog_path.as_deref(), DEFAULT_BARBERS)?;
        let services_json = read_or_default(config.services_catalog_path.as_deref(), DEFAULT_SERVICES)?;

        let catalog = Self::from_json(&barbers_json, &services_json)?;

        info!(
            barbers = catalog.barbers.len(),
            categories = catalog.categories.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }
}

fn read_or_default(path: Option<&str>, default: &str) -> Result<String, CatalogError> {
    match path {
        Some(path) => {
            debug!("Reading catalog file {}", path);
            fs::read_to_string(path).map_err(|source| CatalogError::Io {
                path: path.to_string(),
                source,
            })
        }
        None => Ok(default.to_string()),
    }
}

impl CatalogRepository for Catalog {
    fn barbers(&self) -> &[Barber] {
        &self.barbers
    }

    fn barber(&self, id: u32) -> Option<&Barber> {
        self.barbers.iter().find(|barber| barber.id == id)
    }

    fn services(&self) -> Vec<CatalogService> {
        let mut services: Vec<CatalogService> = self
            .categories
            .iter()
            .flat_map(|category| {
                category.services.iter().map(move |service| CatalogService {
                    service: service.clone(),
                    category: category.category_name.clone(),
                })
            })
            .collect();

        services.sort_by_key(|entry| entry.service.id);
        services
    }

    fn service(&self, id: u32) -> Option<&Service> {
        self.categories
            .iter()
            .flat_map(|category| category.services.iter())
            .find(|service| service.id == id)
    }
}
