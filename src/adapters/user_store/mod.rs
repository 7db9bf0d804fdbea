//! User store adapters.

mod csv_file;
mod in_memory;

pub use csv_file::CsvUserStore;
pub use in_memory::InMemoryUserStore;
