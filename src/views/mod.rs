//! Form and screen state
//!
//! Each view collects input, validates it locally, issues one call through
//! the auth or movie wrapper, and turns the result into state the front end
//! renders. Failures never escape a view; they become a message.

pub mod form;
pub mod login;
pub mod movie_list;
pub mod register;

pub use login::LoginForm;
pub use movie_list::{MovieListView, Notice};
pub use register::RegisterForm;
