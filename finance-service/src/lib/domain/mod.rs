pub mod access;
pub mod activity;
pub mod session;
pub mod typology;
pub mod user;
