pub mod csv_loader;
pub mod date_normalizer;
pub mod error;
