//! Contract tests for the public pet-store HTTP API.
//!
//! The crate holds a typed client for the store, fixtures that create an
//! entity for one test and delete it afterwards, and the configuration and
//! logging the test targets share. The tests themselves live under `tests/`.

pub mod client;
pub mod config;
pub mod error;
pub mod fixture;
pub mod ids;
pub mod model;
pub mod telemetry;

pub use client::{ApiResponse, PetstoreClient};
pub use config::SuiteConfig;
pub use error::ContractError;
pub use fixture::{
    with_resource, EphemeralResource, FixtureState, PetResource, ResourceGuard, Teardown,
    UserResource,
};
pub use model::{ApiMessage, Category, Pet, PetStatus, Tag, User};
