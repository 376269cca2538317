pub mod admin;

pub use admin::PostgresAdminRepository;
