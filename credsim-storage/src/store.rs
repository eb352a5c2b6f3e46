use credsim_types::{
    Cpf, NewPerson, NewSimulation, Person, PersonId, Simulation, SimulationId, SimulationUpdate,
};

use crate::StorageResult;

/// Persistence primitives used by the request handlers.
///
/// Lookups return `Ok(None)` for a missing record. Mutations that target a
/// specific record return [`StorageError::NotFound`](crate::StorageError::NotFound)
/// when it does not exist.
pub trait DataStore: Send + Sync {
    /// Persists a person. Fails with `Duplicate` if the CPF is already registered.
    fn create_person(&self, person: NewPerson) -> StorageResult<Person>;
    fn list_people(&self) -> StorageResult<Vec<Person>>;
    fn find_person(&self, id: PersonId) -> StorageResult<Option<Person>>;
    fn find_person_by_cpf(&self, cpf: &Cpf) -> StorageResult<Option<Person>>;
    /// Deletes a person together with the simulations that reference it.
    fn delete_person(&self, id: PersonId) -> StorageResult<()>;

    /// Persists a simulation for the person holding `simulation.people.cpf`.
    fn create_simulation(&self, simulation: NewSimulation) -> StorageResult<Simulation>;
    fn list_simulations(&self) -> StorageResult<Vec<Simulation>>;
    fn find_simulation(&self, id: SimulationId) -> StorageResult<Option<Simulation>>;
    fn simulations_by_cpf(&self, cpf: &Cpf) -> StorageResult<Vec<Simulation>>;
    fn delete_simulation(&self, id: SimulationId) -> StorageResult<()>;
    /// Points an existing simulation at the person holding `update.people.cpf`.
    fn update_simulation(
        &self,
        id: SimulationId,
        update: SimulationUpdate,
    ) -> StorageResult<Simulation>;
}
