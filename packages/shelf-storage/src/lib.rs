pub mod db;
pub mod models;
pub mod queries;

mod error;

pub use db::Db;
pub use error::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;
