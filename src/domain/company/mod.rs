pub mod entities;
pub mod ports;

pub use entities::{Company, MAX_COMPANIES_PER_USER};
pub use ports::CompanyRepository;
