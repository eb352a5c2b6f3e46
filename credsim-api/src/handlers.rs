//! Request handlers, one per route.
//!
//! Each handler is a thin mapping from an HTTP request onto a single
//! [`DataStore`] call; failures are turned into responses by [`ApiError`].
//! Store calls are synchronous SQLite I/O and run on the blocking pool.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use credsim_storage::{DataStore, StorageResult};
use credsim_types::{
    Cpf, NewPerson, NewSimulation, Person, PersonId, Simulation, SimulationId, SimulationUpdate,
};
use tracing::{debug, info};

use crate::error::{ApiError, ApiResult};

type Store = State<Arc<dyn DataStore>>;

async fn run_blocking<T, F>(store: Arc<dyn DataStore>, op: F) -> ApiResult<T>
where
    F: FnOnce(&dyn DataStore) -> StorageResult<T> + Send + 'static,
    T: Send + 'static,
{
    let result = tokio::task::spawn_blocking(move || op(store.as_ref()))
        .await
        .map_err(|e| ApiError::Internal(format!("store task failed: {e}")))?;
    Ok(result?)
}

pub async fn health() -> &'static str {
    "OK"
}

// === People ===

pub async fn create_people(
    State(store): Store,
    payload: Result<Json<NewPerson>, JsonRejection>,
) -> ApiResult<Json<Person>> {
    let Json(person) = payload?;
    person.validate()?;
    let saved = run_blocking(store, move |s| s.create_person(person)).await?;
    info!(id = %saved.id, "Person created");
    Ok(Json(saved))
}

pub async fn list_people(State(store): Store) -> ApiResult<Json<Vec<Person>>> {
    Ok(Json(run_blocking(store, |s| s.list_people()).await?))
}

pub async fn delete_people(
    State(store): Store,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    run_blocking(store, move |s| s.delete_person(PersonId::new(id))).await?;
    info!(%id, "Person deleted");
    Ok(StatusCode::NO_CONTENT)
}

// === Simulations ===

pub async fn create_simulation(
    State(store): Store,
    payload: Result<Json<NewSimulation>, JsonRejection>,
) -> ApiResult<Json<Simulation>> {
    let Json(simulation) = payload?;
    simulation.validate()?;
    let saved = run_blocking(store, move |s| s.create_simulation(simulation)).await?;
    info!(id = %saved.id, people_id = %saved.people.id, "Simulation created");
    Ok(Json(saved))
}

pub async fn list_simulations(State(store): Store) -> ApiResult<Json<Vec<Simulation>>> {
    Ok(Json(run_blocking(store, |s| s.list_simulations()).await?))
}

pub async fn get_restrictions(
    State(store): Store,
    cpf: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<bool>> {
    let Path(cpf) = cpf?;
    let not_found = || ApiError::NotFound(format!("person with CPF {cpf} not found"));
    // A CPF that fails validation can never have been stored.
    let parsed = Cpf::parse(&cpf).map_err(|_| not_found())?;
    let person = run_blocking(store, move |s| s.find_person_by_cpf(&parsed))
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(person.has_restriction))
}

pub async fn simulation_by_cpf(
    State(store): Store,
    cpf: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Vec<Simulation>>> {
    let Path(cpf) = cpf?;
    let Ok(parsed) = Cpf::parse(&cpf) else {
        debug!(%cpf, "Unparseable CPF, no simulations can match");
        return Ok(Json(Vec::new()));
    };
    Ok(Json(run_blocking(store, move |s| s.simulations_by_cpf(&parsed)).await?))
}

pub async fn delete_simulation(
    State(store): Store,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    run_blocking(store, move |s| s.delete_simulation(SimulationId::new(id))).await?;
    info!(%id, "Simulation deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn update_simulation(
    State(store): Store,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<SimulationUpdate>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    let Json(update) = payload?;
    update.validate()?;
    let updated =
        run_blocking(store, move |s| s.update_simulation(SimulationId::new(id), update)).await?;
    info!(%id, people_id = %updated.people.id, "Simulation updated");
    Ok(StatusCode::NO_CONTENT)
}
