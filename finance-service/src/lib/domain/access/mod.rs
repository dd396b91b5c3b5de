pub mod bearer;
pub mod errors;
pub mod models;
pub mod policy;
pub mod ports;
pub mod session;

pub use bearer::BearerCredentials;
pub use session::SessionCredentials;
