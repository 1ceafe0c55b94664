//! Service layer for the recipe catalog.
//! - Separates business rules from data access.
//! - Reuses validation and entity definitions in `models` crate.
//! - Persistence sits behind repository traits so storage can be swapped.

pub mod recipe;
#[cfg(test)]
pub mod test_support;
