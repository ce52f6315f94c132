//! HR domain module: employees and attendance.
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns.

pub mod attendance;
pub mod employee;

pub use attendance::{Attendance, AttendanceStatus};
pub use employee::{Employee, EmployeeDetails, EmployeeId, EmployeeNumber, EmployeeStatus};
