pub mod activity;
pub mod typology;
pub mod user;

pub use activity::PostgresActivityRepository;
pub use typology::PostgresTypologyRepository;
pub use user::PostgresUserRepository;
