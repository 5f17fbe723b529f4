//! Properties are named integer values, each with a label type that the view
//! uses to caption the field. They live in the `property_value` table, keyed
//! by name.
//!
//! - `models`: rows, the name-keyed sheet handed to the view, and the
//!   changeset staged by a form submission
//! - `db_ops`: the `PropertyStore` trait and its postgres implementation
//! - `components`: HTML for the property form

pub mod components;
pub mod db_ops;
#[cfg(test)]
pub mod memory;
pub mod models;
