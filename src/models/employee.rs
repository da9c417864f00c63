use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// Access level, persisted in the `admin_flag` column.
#[derive(sqlx::Type, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    General = 0,
    Administrator = 1,
}

impl Role {
    pub fn is_admin(self) -> bool {
        self == Role::Administrator
    }
}

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Employee {
    pub id: i32,
    pub code: String,
    pub name: String,
    /// Hex digest, never plaintext.
    pub password: String,
    #[sqlx(rename = "admin_flag")]
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted: bool,
}

/// What a caller submits for create or update.
///
/// `password` is plaintext. On update an empty password means "keep the
/// current one".
#[derive(Deserialize, Debug, Clone)]
pub struct EmployeeDraft {
    pub id: Option<i32>,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub password: String,
    pub role: Role,
}

/// A row staged for insertion; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    pub code: String,
    pub name: String,
    pub password: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields an update may overlay on a loaded record. `None` keeps the stored value.
#[derive(Debug, Clone)]
pub struct EmployeeChanges {
    pub code: Option<String>,
    pub password: Option<String>,
    pub name: String,
    pub role: Role,
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    pub fn merged(&self, changes: EmployeeChanges) -> Employee {
        Employee {
            id: self.id,
            code: changes.code.unwrap_or_else(|| self.code.clone()),
            name: changes.name,
            password: changes.password.unwrap_or_else(|| self.password.clone()),
            role: changes.role,
            created_at: self.created_at,
            updated_at: changes.updated_at,
            deleted: self.deleted,
        }
    }

    pub fn soft_deleted(&self, now: DateTime<Utc>) -> Employee {
        Employee {
            deleted: true,
            updated_at: now,
            ..self.clone()
        }
    }
}

/// Outward projection of an employee; the password hash is left out.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeView {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted: bool,
}

impl From<&Employee> for EmployeeView {
    fn from(e: &Employee) -> Self {
        EmployeeView {
            id: e.id,
            code: e.code.clone(),
            name: e.name.clone(),
            role: e.role,
            created_at: e.created_at,
            updated_at: e.updated_at,
            deleted: e.deleted,
        }
    }
}

impl EmployeeView {
    pub fn list(employees: &[Employee]) -> Vec<EmployeeView> {
        employees.iter().map(EmployeeView::from).collect()
    }
}
