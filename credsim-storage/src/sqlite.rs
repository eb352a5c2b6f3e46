use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use credsim_types::{
    Cpf, NewPerson, NewSimulation, Person, PersonId, Simulation, SimulationId, SimulationUpdate,
};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::{debug, info};

use crate::{DataStore, StorageError, StorageResult};

const SCHEMA: &str = r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS people (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        cpf TEXT NOT NULL UNIQUE,
        has_restriction INTEGER NOT NULL
    );

    CREATE TABLE IF NOT EXISTS simulations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        people_id INTEGER NOT NULL,
        FOREIGN KEY (people_id) REFERENCES people (id) ON DELETE CASCADE
    );

    CREATE INDEX IF NOT EXISTS idx_simulations_people_id ON simulations(people_id);
"#;

const PERSON_SELECT: &str = "SELECT id, name, cpf, has_restriction FROM people";

const SIMULATION_SELECT: &str = r#"
    SELECT s.id, p.id, p.name, p.cpf, p.has_restriction
    FROM simulations s
    JOIN people p ON p.id = s.people_id
"#;

/// [`DataStore`] backed by a single SQLite connection.
///
/// The connection is guarded by a mutex; each operation holds the lock for
/// its whole duration, so a check and the write that follows it cannot
/// interleave with another request.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens (or creates) a database file and ensures the schema exists.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "Opening database");
        Self::init(Connection::open(path)?)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> StorageResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> StorageResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        // A panic mid-operation leaves SQLite itself consistent.
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn person_from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<Person> {
    let raw_cpf: String = row.get(offset + 2)?;
    let cpf = Cpf::parse(&raw_cpf).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(offset + 2, Type::Text, Box::new(e))
    })?;
    Ok(Person {
        id: PersonId::new(row.get(offset)?),
        name: row.get(offset + 1)?,
        cpf,
        has_restriction: row.get(offset + 3)?,
    })
}

fn simulation_from_row(row: &Row<'_>) -> rusqlite::Result<Simulation> {
    Ok(Simulation {
        id: SimulationId::new(row.get(0)?),
        people: person_from_row(row, 1)?,
    })
}

fn person_by_id(conn: &Connection, id: PersonId) -> rusqlite::Result<Option<Person>> {
    conn.query_row(
        &format!("{PERSON_SELECT} WHERE id = ?1"),
        params![id.get()],
        |row| person_from_row(row, 0),
    )
    .optional()
}

fn person_by_cpf(conn: &Connection, cpf: &Cpf) -> rusqlite::Result<Option<Person>> {
    conn.query_row(
        &format!("{PERSON_SELECT} WHERE cpf = ?1"),
        params![cpf.digits()],
        |row| person_from_row(row, 0),
    )
    .optional()
}

fn simulation_by_id(conn: &Connection, id: SimulationId) -> rusqlite::Result<Option<Simulation>> {
    conn.query_row(
        &format!("{SIMULATION_SELECT} WHERE s.id = ?1"),
        params![id.get()],
        simulation_from_row,
    )
    .optional()
}

fn person_not_found(cpf: &Cpf) -> StorageError {
    StorageError::NotFound(format!("person with CPF {cpf}"))
}

impl DataStore for SqliteStore {
    fn create_person(&self, person: NewPerson) -> StorageResult<Person> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        if person_by_cpf(&tx, &person.cpf)?.is_some() {
            return Err(StorageError::Duplicate(format!(
                "person with CPF {} already exists",
                person.cpf
            )));
        }
        tx.execute(
            "INSERT INTO people (name, cpf, has_restriction) VALUES (?1, ?2, ?3)",
            params![person.name, person.cpf.digits(), person.has_restriction],
        )?;
        let id = PersonId::new(tx.last_insert_rowid());
        tx.commit()?;

        debug!(%id, "Person created");
        Ok(person.into_person(id))
    }

    fn list_people(&self) -> StorageResult<Vec<Person>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!("{PERSON_SELECT} ORDER BY id"))?;
        let people = stmt
            .query_map([], |row| person_from_row(row, 0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(people)
    }

    fn find_person(&self, id: PersonId) -> StorageResult<Option<Person>> {
        Ok(person_by_id(&self.conn(), id)?)
    }

    fn find_person_by_cpf(&self, cpf: &Cpf) -> StorageResult<Option<Person>> {
        Ok(person_by_cpf(&self.conn(), cpf)?)
    }

    fn delete_person(&self, id: PersonId) -> StorageResult<()> {
        let conn = self.conn();
        let deleted = conn.execute("DELETE FROM people WHERE id = ?1", params![id.get()])?;
        if deleted == 0 {
            return Err(StorageError::NotFound(format!("person {id}")));
        }
        debug!(%id, "Person deleted");
        Ok(())
    }

    fn create_simulation(&self, simulation: NewSimulation) -> StorageResult<Simulation> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        let people = person_by_cpf(&tx, simulation.cpf())?
            .ok_or_else(|| person_not_found(simulation.cpf()))?;
        tx.execute(
            "INSERT INTO simulations (people_id) VALUES (?1)",
            params![people.id.get()],
        )?;
        let id = SimulationId::new(tx.last_insert_rowid());
        tx.commit()?;

        debug!(%id, people_id = %people.id, "Simulation created");
        Ok(Simulation { id, people })
    }

    fn list_simulations(&self) -> StorageResult<Vec<Simulation>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!("{SIMULATION_SELECT} ORDER BY s.id"))?;
        let simulations = stmt
            .query_map([], simulation_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(simulations)
    }

    fn find_simulation(&self, id: SimulationId) -> StorageResult<Option<Simulation>> {
        Ok(simulation_by_id(&self.conn(), id)?)
    }

    fn simulations_by_cpf(&self, cpf: &Cpf) -> StorageResult<Vec<Simulation>> {
        let conn = self.conn();
        let mut stmt =
            conn.prepare(&format!("{SIMULATION_SELECT} WHERE p.cpf = ?1 ORDER BY s.id"))?;
        let simulations = stmt
            .query_map(params![cpf.digits()], simulation_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(simulations)
    }

    fn delete_simulation(&self, id: SimulationId) -> StorageResult<()> {
        let conn = self.conn();
        let deleted = conn.execute("DELETE FROM simulations WHERE id = ?1", params![id.get()])?;
        if deleted == 0 {
            return Err(StorageError::NotFound(format!("simulation {id}")));
        }
        debug!(%id, "Simulation deleted");
        Ok(())
    }

    fn update_simulation(
        &self,
        id: SimulationId,
        update: SimulationUpdate,
    ) -> StorageResult<Simulation> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        if simulation_by_id(&tx, id)?.is_none() {
            return Err(StorageError::NotFound(format!("simulation {id}")));
        }
        let people =
            person_by_cpf(&tx, update.cpf())?.ok_or_else(|| person_not_found(update.cpf()))?;
        tx.execute(
            "UPDATE simulations SET people_id = ?1 WHERE id = ?2",
            params![people.id.get(), id.get()],
        )?;
        tx.commit()?;

        debug!(%id, people_id = %people.id, "Simulation updated");
        Ok(Simulation { id, people })
    }
}
