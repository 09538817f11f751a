//! Small parsing helpers shared by domain types

pub mod email;
pub mod timezone;
pub mod wall_clock;
