use validator::{Validate, ValidationErrors};

use crate::db::EmployeeTx;
use crate::errors::AppResult;

pub const CODE_REQUIRED: &str = "Please enter an employee code.";
pub const CODE_TAKEN: &str = "An employee with that code is already registered.";
pub const NAME_REQUIRED: &str = "Please enter a name.";
pub const PASSWORD_REQUIRED: &str = "Please enter a password.";

/// The fields the validator looks at. `password` is the submitted plaintext.
#[derive(Debug, Validate)]
pub struct Candidate<'a> {
    #[validate(length(min = 1, message = "Please enter an employee code."))]
    pub code: &'a str,
    #[validate(length(min = 1, message = "Please enter a name."))]
    pub name: &'a str,
    #[validate(length(min = 1, message = "Please enter a password."))]
    pub password: &'a str,
}

/// Returns messages in display order; an empty list means the candidate is valid.
///
/// The uniqueness lookup runs through `tx` so it sees the same snapshot the
/// following write will.
pub async fn validate<T: EmployeeTx>(
    tx: &mut T,
    candidate: &Candidate<'_>,
    check_code: bool,
    check_password: bool,
) -> AppResult<Vec<String>> {
    let field_errors = candidate.validate().err();
    let mut errors = Vec::new();

    if let Some(msg) = field_message(field_errors.as_ref(), "code") {
        errors.push(msg);
    } else if check_code && tx.count_by_code(candidate.code).await? > 0 {
        errors.push(CODE_TAKEN.to_string());
    }

    errors.extend(field_message(field_errors.as_ref(), "name"));

    if check_password {
        errors.extend(field_message(field_errors.as_ref(), "password"));
    }

    Ok(errors)
}

fn field_message(errors: Option<&ValidationErrors>, field: &str) -> Option<String> {
    let errs = errors?.field_errors();
    let first = errs.get(field)?.first()?;
    Some(
        first
            .message
            .as_ref()
            .map(|m| m.to_string())
            .unwrap_or_else(|| first.code.to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::MemoryStore;
    use crate::db::EmployeeStore;
    use crate::models::employee::{Employee, Role};
    use chrono::Utc;

    fn store_with(code: &str) -> MemoryStore {
        let now = Utc::now();
        MemoryStore::with_rows(vec![Employee {
            id: 1,
            code: code.to_string(),
            name: "Taro".to_string(),
            password: "00".repeat(32),
            role: Role::General,
            created_at: now,
            updated_at: now,
            deleted: false,
        }])
    }

    #[tokio::test]
    async fn reports_every_problem_in_order() {
        let store = MemoryStore::default();
        let mut tx = store.begin().await.unwrap();
        let candidate = Candidate { code: "", name: "", password: "" };

        let errors = validate(&mut tx, &candidate, true, true).await.unwrap();

        assert_eq!(errors, vec![CODE_REQUIRED, NAME_REQUIRED, PASSWORD_REQUIRED]);
    }

    #[tokio::test]
    async fn flags_duplicate_code_only_when_asked() {
        let store = store_with("E001");
        let mut tx = store.begin().await.unwrap();
        let candidate = Candidate { code: "E001", name: "Jiro", password: "pw" };

        let checked = validate(&mut tx, &candidate, true, false).await.unwrap();
        assert_eq!(checked, vec![CODE_TAKEN]);

        let before = store.calls().code_counts;
        let unchecked = validate(&mut tx, &candidate, false, false).await.unwrap();
        assert!(unchecked.is_empty());
        assert_eq!(store.calls().code_counts, before);
    }

    #[tokio::test]
    async fn skips_password_when_unchanged() {
        let store = MemoryStore::default();
        let mut tx = store.begin().await.unwrap();
        let candidate = Candidate { code: "E009", name: "Jiro", password: "" };

        assert!(validate(&mut tx, &candidate, true, false).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn blank_code_skips_uniqueness_lookup() {
        let store = store_with("");
        let mut tx = store.begin().await.unwrap();
        let candidate = Candidate { code: "", name: "Jiro", password: "pw" };

        let errors = validate(&mut tx, &candidate, true, true).await.unwrap();

        assert_eq!(errors, vec![CODE_REQUIRED]);
        assert_eq!(store.calls().code_counts, 0);
    }
}
