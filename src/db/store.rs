use crate::errors::AppResult;
use crate::models::employee::{Employee, NewEmployee};

/// Read access to the `employees` table plus a way to open a transaction.
pub trait EmployeeStore {
    type Tx: EmployeeTx;

    /// Rows ordered by id descending.
    async fn page(&self, offset: i64, limit: i64) -> AppResult<Vec<Employee>>;

    /// Counts every row, soft-deleted ones included.
    async fn count_all(&self) -> AppResult<i64>;

    async fn count_by_code(&self, code: &str) -> AppResult<i64>;

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Employee>>;

    /// Only matches rows that are not soft-deleted.
    async fn get_by_code_and_hash(&self, code: &str, hash: &str) -> AppResult<Option<Employee>>;

    async fn begin(&self) -> AppResult<Self::Tx>;
}

/// A unit of work. Nothing is visible to other callers until `commit`;
/// dropping the value rolls everything back.
pub trait EmployeeTx {
    /// Loads a row and holds it for the rest of the transaction.
    async fn get_by_id(&mut self, id: i32) -> AppResult<Option<Employee>>;

    async fn count_by_code(&mut self, code: &str) -> AppResult<i64>;

    async fn insert(&mut self, record: &NewEmployee) -> AppResult<i32>;

    async fn update(&mut self, record: &Employee) -> AppResult<()>;

    async fn commit(self) -> AppResult<()>;
}
