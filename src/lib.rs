//! Counseling dashboard for calligraphy lessons: a student table kept in one
//! CSV file, with filtering, frequency charts, per-student karte lookup and
//! appending of new students.

pub mod config;
pub mod data;
pub mod state;
