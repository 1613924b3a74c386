//! Application use cases and transactions.

mod cafe;
mod form;

pub use cafe::{
    cafe_create, cafe_delete, cafe_get, cafe_list, cafe_update, CafeDto, CafeFields,
};
pub use form::{CafeForm, FormErrors, INVALID_CHOICE, NAME_TAKEN, REQUIRED};
