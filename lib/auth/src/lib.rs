pub mod auth;
pub mod auth_widget;
pub mod user;
