//! In-memory store used by the unit tests. Writes made through a transaction
//! land in a private copy and only replace the shared rows on commit.

use std::sync::{Arc, Mutex, MutexGuard};

use super::store::{EmployeeStore, EmployeeTx};
use crate::errors::AppResult;
use crate::models::employee::{Employee, NewEmployee};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct CallLog {
    pub hash_lookups: usize,
    pub code_counts: usize,
    pub inserts: usize,
    pub updates: usize,
    pub commits: usize,
}

#[derive(Default)]
struct State {
    rows: Vec<Employee>,
    next_id: i32,
    calls: CallLog,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn with_rows(rows: Vec<Employee>) -> Self {
        let next_id = rows.iter().map(|e| e.id).max().unwrap_or(0);
        let store = MemoryStore::default();
        {
            let mut state = store.lock();
            state.rows = rows;
            state.next_id = next_id;
        }
        store
    }

    pub fn calls(&self) -> CallLog {
        self.lock().calls.clone()
    }

    pub fn row(&self, id: i32) -> Option<Employee> {
        self.lock().rows.iter().find(|e| e.id == id).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }
}

impl EmployeeStore for MemoryStore {
    type Tx = MemoryTx;

    async fn page(&self, offset: i64, limit: i64) -> AppResult<Vec<Employee>> {
        let mut rows = self.lock().rows.clone();
        rows.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(rows
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn count_all(&self) -> AppResult<i64> {
        Ok(self.lock().rows.len() as i64)
    }

    async fn count_by_code(&self, code: &str) -> AppResult<i64> {
        let mut state = self.lock();
        state.calls.code_counts += 1;
        Ok(state.rows.iter().filter(|e| e.code == code).count() as i64)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Employee>> {
        Ok(self.row(id))
    }

    async fn get_by_code_and_hash(&self, code: &str, hash: &str) -> AppResult<Option<Employee>> {
        let mut state = self.lock();
        state.calls.hash_lookups += 1;
        Ok(state
            .rows
            .iter()
            .find(|e| !e.deleted && e.code == code && e.password == hash)
            .cloned())
    }

    async fn begin(&self) -> AppResult<MemoryTx> {
        let state = self.lock();
        Ok(MemoryTx {
            rows: state.rows.clone(),
            next_id: state.next_id,
            shared: self.clone(),
        })
    }
}

pub struct MemoryTx {
    rows: Vec<Employee>,
    next_id: i32,
    shared: MemoryStore,
}

impl EmployeeTx for MemoryTx {
    async fn get_by_id(&mut self, id: i32) -> AppResult<Option<Employee>> {
        Ok(self.rows.iter().find(|e| e.id == id).cloned())
    }

    async fn count_by_code(&mut self, code: &str) -> AppResult<i64> {
        self.shared.lock().calls.code_counts += 1;
        Ok(self.rows.iter().filter(|e| e.code == code).count() as i64)
    }

    async fn insert(&mut self, record: &NewEmployee) -> AppResult<i32> {
        self.shared.lock().calls.inserts += 1;
        self.next_id += 1;
        self.rows.push(Employee {
            id: self.next_id,
            code: record.code.clone(),
            name: record.name.clone(),
            password: record.password.clone(),
            role: record.role,
            created_at: record.created_at,
            updated_at: record.updated_at,
            deleted: false,
        });
        Ok(self.next_id)
    }

    async fn update(&mut self, record: &Employee) -> AppResult<()> {
        self.shared.lock().calls.updates += 1;
        match self.rows.iter_mut().find(|e| e.id == record.id) {
            Some(row) => {
                *row = record.clone();
                Ok(())
            }
            None => Err(sqlx::Error::RowNotFound.into()),
        }
    }

    async fn commit(self) -> AppResult<()> {
        let mut state = self.shared.lock();
        state.rows = self.rows;
        state.next_id = self.next_id;
        state.calls.commits += 1;
        Ok(())
    }
}
