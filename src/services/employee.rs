use chrono::Utc;
use log::{debug, info, warn};

use crate::db::{EmployeeStore, EmployeeTx};
use crate::errors::{AppError, AppResult};
use crate::models::employee::{Employee, EmployeeChanges, EmployeeDraft, NewEmployee};
use crate::utils::hash::hash_password;
use crate::utils::validation::{validate, Candidate};

/// Business rules for the employee table.
///
/// Holds no state between calls apart from the store handle and the default
/// page size; the pepper is passed in by the caller every time.
pub struct EmployeeService<S> {
    store: S,
    rows_per_page: u32,
}

impl<S: EmployeeStore> EmployeeService<S> {
    pub fn new(store: S, rows_per_page: u32) -> Self {
        Self {
            store,
            rows_per_page: rows_per_page.max(1),
        }
    }

    /// Page numbers start at 1; 0 is treated as 1. A page past the end of
    /// the table, however far, is empty.
    pub async fn list_page(&self, page: u32, page_size: u32) -> AppResult<Vec<Employee>> {
        let limit = i64::from(page_size);
        match i64::from(page.max(1) - 1).checked_mul(limit) {
            Some(offset) => self.store.page(offset, limit).await,
            None => Ok(Vec::new()),
        }
    }

    pub async fn list_default_page(&self, page: u32) -> AppResult<Vec<Employee>> {
        self.list_page(page, self.rows_per_page).await
    }

    /// Number of pages needed to show `total` rows at the default page size.
    pub fn page_count(&self, total: i64) -> i64 {
        let size = u64::from(self.rows_per_page);
        (total.max(0) as u64).div_ceil(size) as i64
    }

    pub async fn count_all(&self) -> AppResult<i64> {
        self.store.count_all().await
    }

    pub async fn count_by_code(&self, code: &str) -> AppResult<i64> {
        self.store.count_by_code(code).await
    }

    /// Soft-deleted rows are returned as well.
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<Employee>> {
        self.store.get_by_id(id).await
    }

    /// Looks up a live employee by code and password. A miss is `Ok(None)`
    /// whether the code or the password was wrong.
    pub async fn find_by_credentials(
        &self,
        code: &str,
        plain: &str,
        pepper: &str,
    ) -> AppResult<Option<Employee>> {
        let hash = hash_password(plain, pepper);
        self.store.get_by_code_and_hash(code, &hash).await
    }

    pub async fn authenticate(&self, code: &str, plain: &str, pepper: &str) -> AppResult<bool> {
        if code.is_empty() || plain.is_empty() {
            return Ok(false);
        }

        match self.find_by_credentials(code, plain, pepper).await? {
            Some(employee) => {
                debug!("employee {} authenticated", employee.id);
                Ok(true)
            }
            None => {
                info!("login rejected");
                Ok(false)
            }
        }
    }

    /// Hashes the password, validates and inserts. Returns the validation
    /// messages; nothing is written unless the list is empty.
    pub async fn create(&self, draft: EmployeeDraft, pepper: &str) -> AppResult<Vec<String>> {
        let now = Utc::now();
        let record = NewEmployee {
            password: hash_password(&draft.password, pepper),
            code: draft.code,
            name: draft.name,
            role: draft.role,
            created_at: now,
            updated_at: now,
        };

        let mut tx = self.store.begin().await?;
        let candidate = Candidate {
            code: &record.code,
            name: &record.name,
            password: &draft.password,
        };
        let errors = validate(&mut tx, &candidate, true, true).await?;
        if !errors.is_empty() {
            debug!("create rejected with {} validation error(s)", errors.len());
            return Ok(errors);
        }

        let id = tx.insert(&record).await?;
        tx.commit().await?;
        info!("created employee {}", id);
        Ok(errors)
    }

    /// Overlays the draft on the stored record and writes it back.
    ///
    /// The code is only re-checked for uniqueness when it changed, and the
    /// password is only replaced (and checked) when a new one was given.
    pub async fn update(&self, draft: EmployeeDraft, pepper: &str) -> AppResult<Vec<String>> {
        let id = draft
            .id
            .ok_or_else(|| AppError::NotFound("employee without id".to_string()))?;

        let mut tx = self.store.begin().await?;
        let existing = load(&mut tx, id).await?;

        let code_changed = existing.code != draft.code;
        let password_changed = !draft.password.is_empty();

        let staged = existing.merged(EmployeeChanges {
            code: code_changed.then(|| draft.code.clone()),
            password: password_changed.then(|| hash_password(&draft.password, pepper)),
            name: draft.name.clone(),
            role: draft.role,
            updated_at: Utc::now(),
        });

        let candidate = Candidate {
            code: &staged.code,
            name: &staged.name,
            password: &draft.password,
        };
        let errors = validate(&mut tx, &candidate, code_changed, password_changed).await?;
        if !errors.is_empty() {
            debug!("update of employee {} rejected with {} validation error(s)", id, errors.len());
            return Ok(errors);
        }

        tx.update(&staged).await?;
        tx.commit().await?;
        info!("updated employee {}", id);
        Ok(errors)
    }

    pub async fn soft_delete(&self, id: i32) -> AppResult<()> {
        let mut tx = self.store.begin().await?;
        let existing = load(&mut tx, id).await?;

        tx.update(&existing.soft_deleted(Utc::now())).await?;
        tx.commit().await?;
        info!("soft-deleted employee {}", id);
        Ok(())
    }
}

async fn load<T: EmployeeTx>(tx: &mut T, id: i32) -> AppResult<Employee> {
    tx.get_by_id(id).await?.ok_or_else(|| {
        warn!("employee {} not found", id);
        AppError::NotFound(format!("employee {}", id))
    })
}
