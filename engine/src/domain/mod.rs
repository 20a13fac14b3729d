//! Domain definitions.

pub mod claim;
pub mod customer;
pub mod employee;
pub mod shop;
pub mod vehicle;
pub mod warranty;

pub use self::{customer::Customer, vehicle::Vehicle, warranty::Warranty};
