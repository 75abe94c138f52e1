//! Diesel-backed PostgreSQL adapters for the domain repository ports.
//!
//! Each repository translates between its port's domain types and the Diesel
//! row structs in `models.rs`, reaching PostgreSQL through a shared [`DbPool`]
//! of `diesel-async` connections. Business rules stay in the domain layer;
//! what an adapter does own is transactional shape, so compound writes such
//! as a stock adjustment plus its movement record commit or roll back as one.
//!
//! Row structs and the generated table definitions in `schema.rs` stay
//! private to this module. Database failures surface as the typed port
//! errors, with the raw Diesel diagnosis logged rather than forwarded.
//!
//! ```ignore
//! use backend::outbound::persistence::{DbPool, DieselDisasterRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://relief@db/relief")).await?;
//! let disasters = DieselDisasterRepository::new(pool.clone());
//! ```

pub(crate) mod diesel_support;

mod diesel_assignment_repository;
mod diesel_disaster_repository;
mod diesel_donation_repository;
mod diesel_mission_repository;
mod diesel_reporting_repository;
mod diesel_resource_repository;
mod diesel_resource_request_repository;
mod diesel_user_directory;
mod diesel_volunteer_repository;
mod models;
mod pool;
mod schema;

pub use diesel_assignment_repository::DieselAssignmentRepository;
pub use diesel_disaster_repository::DieselDisasterRepository;
pub use diesel_donation_repository::DieselDonationRepository;
pub use diesel_mission_repository::DieselMissionRepository;
pub use diesel_reporting_repository::DieselReportingRepository;
pub use diesel_resource_repository::DieselResourceRepository;
pub use diesel_resource_request_repository::DieselResourceRequestRepository;
pub use diesel_user_directory::DieselUserDirectory;
pub use diesel_volunteer_repository::DieselVolunteerRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
