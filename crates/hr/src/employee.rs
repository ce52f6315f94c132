use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use visio_core::{DomainError, DomainResult, Entity, EntityId, Money};

/// Employee identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub EntityId);

visio_core::impl_entity_id!(EmployeeId, "EmployeeId");

/// Human-facing employee number, e.g. `EMP-40217`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeNumber(String);

impl EmployeeNumber {
    /// Derive a 5-digit number from the id's random bits.
    pub fn generate(id: EmployeeId) -> Self {
        let digits = id.as_uuid().as_u128() % 100_000;
        Self(format!("EMP-{digits:05}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for EmployeeNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Employment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmployeeStatus {
    Active,
    Inactive,
}

impl core::str::FromStr for EmployeeStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(EmployeeStatus::Active),
            "inactive" => Ok(EmployeeStatus::Inactive),
            other => Err(DomainError::validation(format!(
                "unknown employee status {other:?}"
            ))),
        }
    }
}

/// Fields supplied when creating or updating an employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeDetails {
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    pub position: Option<String>,
    pub salary: Money,
    pub hire_date: Option<NaiveDate>,
    pub status: EmployeeStatus,
}

/// Employee entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Employee {
    id: EmployeeId,
    employee_number: EmployeeNumber,
    name: String,
    email: String,
    department: Option<String>,
    position: Option<String>,
    salary: Money,
    hire_date: Option<NaiveDate>,
    status: EmployeeStatus,
    created_at: DateTime<Utc>,
}

impl Employee {
    pub fn new(
        id: EmployeeId,
        details: EmployeeDetails,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let (name, email) = validate(&details)?;
        Ok(Self {
            id,
            employee_number: EmployeeNumber::generate(id),
            name,
            email,
            department: details.department,
            position: details.position,
            salary: details.salary,
            hire_date: details.hire_date,
            status: details.status,
            created_at,
        })
    }

    pub fn update(&mut self, details: EmployeeDetails) -> DomainResult<()> {
        let (name, email) = validate(&details)?;
        self.name = name;
        self.email = email;
        self.department = details.department;
        self.position = details.position;
        self.salary = details.salary;
        self.hire_date = details.hire_date;
        self.status = details.status;
        Ok(())
    }

    pub fn id_typed(&self) -> EmployeeId {
        self.id
    }

    pub fn employee_number(&self) -> &EmployeeNumber {
        &self.employee_number
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn department(&self) -> Option<&str> {
        self.department.as_deref()
    }

    pub fn position(&self) -> Option<&str> {
        self.position.as_deref()
    }

    pub fn salary(&self) -> Money {
        self.salary
    }

    pub fn hire_date(&self) -> Option<NaiveDate> {
        self.hire_date
    }

    pub fn status(&self) -> EmployeeStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }
}

impl Entity for Employee {
    type Id = EmployeeId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

fn validate(details: &EmployeeDetails) -> DomainResult<(String, String)> {
    let name = details.name.trim().to_string();
    if name.is_empty() {
        return Err(DomainError::validation("name cannot be empty"));
    }
    let email = details.email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(DomainError::validation(format!(
            "invalid email: {:?}",
            details.email
        )));
    }
    Ok((name, email))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn details(name: &str, email: &str) -> EmployeeDetails {
        EmployeeDetails {
            name: name.to_string(),
            email: email.to_string(),
            department: Some("Sales".to_string()),
            position: Some("Manager".to_string()),
            salary: Money::new(dec!(75000)).unwrap(),
            hire_date: None,
            status: EmployeeStatus::Active,
        }
    }

    #[test]
    fn employee_number_is_stable_for_an_id() {
        let id = EmployeeId::new();
        assert_eq!(EmployeeNumber::generate(id), EmployeeNumber::generate(id));
        assert!(EmployeeNumber::generate(id).as_str().starts_with("EMP-"));
        assert_eq!(EmployeeNumber::generate(id).as_str().len(), 9);
    }

    #[test]
    fn new_employee_is_active_by_default_details() {
        let e = Employee::new(EmployeeId::new(), details("John Smith", "john@company.com"), Utc::now())
            .unwrap();
        assert!(e.is_active());
        assert_eq!(e.department(), Some("Sales"));
    }

    #[test]
    fn invalid_email_is_rejected() {
        let err =
            Employee::new(EmployeeId::new(), details("John", "nope"), Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn update_can_deactivate() {
        let mut e =
            Employee::new(EmployeeId::new(), details("John", "john@company.com"), Utc::now())
                .unwrap();
        let mut d = details("John", "john@company.com");
        d.status = EmployeeStatus::Inactive;
        e.update(d).unwrap();
        assert!(!e.is_active());
    }
}
