//! Domain types for credsim.
//!
//! This crate defines the records exchanged between the HTTP layer and the
//! data store:
//! - [`Cpf`], the Brazilian taxpayer ID used as a person's natural key
//! - [`Person`] and its creation payload [`NewPerson`]
//! - [`Simulation`] and its payloads [`NewSimulation`] / [`SimulationUpdate`]
//!
//! Payloads carry only shape validation. Anything that needs the store
//! (existence, uniqueness) is checked by `credsim-storage`.

mod cpf;
mod person;
mod simulation;

pub use cpf::Cpf;
pub use person::{NewPerson, Person, PersonId};
pub use simulation::{NewSimulation, Simulation, SimulationId, SimulationUpdate};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while validating domain payloads.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid CPF: {0}")]
    InvalidCpf(String),

    #[error("validation failed: {0}")]
    Validation(String),
}
