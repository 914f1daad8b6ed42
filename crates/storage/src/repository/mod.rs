//! Storage seams for the three record kinds.
//!
//! Each record kind has one trait; [`postgres::PgStore`] implements them on
//! top of the `sqlx` pool and [`memory::MemoryStore`] keeps everything in
//! process. Both report duplicate keys as [`StorageError::UniqueViolation`]
//! and dangling references as [`StorageError::ForeignKeyViolation`], with the
//! failed write leaving no trace.
//!
//! [`StorageError::UniqueViolation`]: crate::error::StorageError::UniqueViolation
//! [`StorageError::ForeignKeyViolation`]: crate::error::StorageError::ForeignKeyViolation

pub mod athlete;
pub mod category;
pub mod memory;
pub mod postgres;
pub mod training_center;

pub use athlete::AthleteRepository;
pub use category::CategoryRepository;
pub use training_center::TrainingCenterRepository;
