use sqlx::{PgPool, Postgres, Transaction};

use super::store::{EmployeeStore, EmployeeTx};
use crate::errors::AppResult;
use crate::models::employee::{Employee, NewEmployee};

const SELECT_EMPLOYEE: &str =
    "SELECT id, code, name, password, admin_flag, created_at, updated_at, deleted FROM employees";

#[derive(Clone)]
pub struct PgEmployeeStore {
    pool: PgPool,
}

impl PgEmployeeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl EmployeeStore for PgEmployeeStore {
    type Tx = PgEmployeeTx;

    async fn page(&self, offset: i64, limit: i64) -> AppResult<Vec<Employee>> {
        let sql = format!("{} ORDER BY id DESC LIMIT $1 OFFSET $2", SELECT_EMPLOYEE);
        let employees = sqlx::query_as::<_, Employee>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(employees)
    }

    async fn count_all(&self) -> AppResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn count_by_code(&self, code: &str) -> AppResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees WHERE code = $1")
            .bind(code)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Employee>> {
        let sql = format!("{} WHERE id = $1", SELECT_EMPLOYEE);
        let employee = sqlx::query_as::<_, Employee>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(employee)
    }

    async fn get_by_code_and_hash(&self, code: &str, hash: &str) -> AppResult<Option<Employee>> {
        let sql = format!(
            "{} WHERE deleted = FALSE AND code = $1 AND password = $2",
            SELECT_EMPLOYEE
        );
        let employee = sqlx::query_as::<_, Employee>(&sql)
            .bind(code)
            .bind(hash)
            .fetch_optional(&self.pool)
            .await?;
        Ok(employee)
    }

    async fn begin(&self) -> AppResult<PgEmployeeTx> {
        let tx = self.pool.begin().await?;
        Ok(PgEmployeeTx { tx })
    }
}

pub struct PgEmployeeTx {
    tx: Transaction<'static, Postgres>,
}

impl EmployeeTx for PgEmployeeTx {
    async fn get_by_id(&mut self, id: i32) -> AppResult<Option<Employee>> {
        let sql = format!("{} WHERE id = $1 FOR UPDATE", SELECT_EMPLOYEE);
        let employee = sqlx::query_as::<_, Employee>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(employee)
    }

    async fn count_by_code(&mut self, code: &str) -> AppResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees WHERE code = $1")
            .bind(code)
            .fetch_one(&mut *self.tx)
            .await?;
        Ok(count)
    }

    async fn insert(&mut self, record: &NewEmployee) -> AppResult<i32> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO employees (code, name, password, admin_flag, created_at, updated_at, deleted)
            VALUES ($1, $2, $3, $4, $5, $6, FALSE)
            RETURNING id
            "#,
        )
        .bind(&record.code)
        .bind(&record.name)
        .bind(&record.password)
        .bind(record.role)
        .bind(record.created_at)
        .bind(record.updated_at)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(id)
    }

    async fn update(&mut self, record: &Employee) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE employees SET
                code = $1,
                name = $2,
                password = $3,
                admin_flag = $4,
                updated_at = $5,
                deleted = $6
            WHERE id = $7
            "#,
        )
        .bind(&record.code)
        .bind(&record.name)
        .bind(&record.password)
        .bind(record.role)
        .bind(record.updated_at)
        .bind(record.deleted)
        .bind(record.id)
        .execute(&mut *self.tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound.into());
        }
        Ok(())
    }

    async fn commit(self) -> AppResult<()> {
        self.tx.commit().await?;
        Ok(())
    }
}
