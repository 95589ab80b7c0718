pub mod collection;
pub mod login;
