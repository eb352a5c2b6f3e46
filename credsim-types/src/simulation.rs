use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Cpf, NewPerson, Person, Result};

/// Store-assigned identifier of a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimulationId(i64);

impl SimulationId {
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for SimulationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted credit simulation and the person it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Simulation {
    pub id: SimulationId,
    pub people: Person,
}

/// Payload for creating a simulation.
///
/// The person is resolved by `people.cpf`; the rest of the embedded person
/// only has to be well-formed. An `id` sent by the client is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSimulation {
    pub people: NewPerson,
}

impl NewSimulation {
    pub fn validate(&self) -> Result<()> {
        self.people.validate()
    }

    /// CPF of the person this simulation should belong to.
    #[must_use]
    pub fn cpf(&self) -> &Cpf {
        &self.people.cpf
    }
}

/// Payload for replacing the person a simulation belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationUpdate {
    pub people: NewPerson,
}

impl SimulationUpdate {
    pub fn validate(&self) -> Result<()> {
        self.people.validate()
    }

    #[must_use]
    pub fn cpf(&self) -> &Cpf {
        &self.people.cpf
    }
}
