// libs/catalog-cell/src/models.rs
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ==============================================================================
// CATALOG MODELS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Barber {
    pub id: u32,
    pub name: String,
    pub specialty: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: u32,
    pub name: String,
    /// Minutes the chair is occupied, buffer excluded.
    pub duration: u32,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCategory {
    pub category_name: String,
    pub services: Vec<Service>,
}

/// A service as listed publicly: flattened out of its category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogService {
    #[serde(flatten)]
    pub service: Service,
    pub category: String,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {kind} catalog: {source}")]
    Parse {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Service {id} has an invalid duration of {duration} minutes")]
    InvalidDuration { id: u32, duration: u32 },

    #[error("Duplicate {kind} id {id} in catalog")]
    DuplicateId { kind: &'static str, id: u32 },
}
