use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Cpf, Error, Result};

/// Store-assigned identifier of a person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(i64);

impl PersonId {
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub cpf: Cpf,
    pub has_restriction: bool,
}

/// Payload for creating a person, also used to reference a person from a
/// simulation payload. An `id` sent by the client is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPerson {
    pub name: String,
    pub cpf: Cpf,
    pub has_restriction: bool,
}

impl NewPerson {
    pub fn new(name: impl Into<String>, cpf: Cpf, has_restriction: bool) -> Self {
        Self {
            name: name.into(),
            cpf,
            has_restriction,
        }
    }

    /// Checks the fields the type system cannot: the name must not be blank.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation("name must not be blank".into()));
        }
        Ok(())
    }

    /// Attaches a store-assigned identifier.
    #[must_use]
    pub fn into_person(self, id: PersonId) -> Person {
        Person {
            id,
            name: self.name,
            cpf: self.cpf,
            has_restriction: self.has_restriction,
        }
    }
}
