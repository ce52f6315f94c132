use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use visio_core::{DomainError, DomainResult};

use crate::employee::EmployeeId;

/// Attendance status for one employee on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Leave,
}

impl core::str::FromStr for AttendanceStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(AttendanceStatus::Present),
            "absent" => Ok(AttendanceStatus::Absent),
            "leave" => Ok(AttendanceStatus::Leave),
            other => Err(DomainError::validation(format!(
                "unknown attendance status {other:?}"
            ))),
        }
    }
}

/// One attendance record. There is at most one per (employee, date); marking
/// the same day again replaces the previous record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attendance {
    employee_id: EmployeeId,
    date: NaiveDate,
    status: AttendanceStatus,
    check_in: Option<NaiveTime>,
    check_out: Option<NaiveTime>,
}

impl Attendance {
    pub fn mark(
        employee_id: EmployeeId,
        date: NaiveDate,
        status: AttendanceStatus,
        check_in: Option<NaiveTime>,
        check_out: Option<NaiveTime>,
    ) -> DomainResult<Self> {
        if let (Some(check_in), Some(check_out)) = (check_in, check_out) {
            if check_out < check_in {
                return Err(DomainError::validation(
                    "check_out cannot be before check_in",
                ));
            }
        }
        Ok(Self {
            employee_id,
            date,
            status,
            check_in,
            check_out,
        })
    }

    pub fn employee_id(&self) -> EmployeeId {
        self.employee_id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn status(&self) -> AttendanceStatus {
        self.status
    }

    pub fn check_in(&self) -> Option<NaiveTime> {
        self.check_in
    }

    pub fn check_out(&self) -> Option<NaiveTime> {
        self.check_out
    }

    /// Store key: one record per employee per day.
    pub fn key(&self) -> (EmployeeId, NaiveDate) {
        (self.employee_id, self.date)
    }
}
