pub mod password;

pub(crate) mod repository;
mod root;

pub use repository::{FindType, UserRow};
pub use root::*;
