mod config;
mod criteria;
mod discovery;
mod enrich;
mod filter;
mod movie;
mod provider;

#[cfg(test)]
mod test_support;

pub use config::*;
pub use criteria::*;
pub use discovery::*;
pub use enrich::*;
pub use filter::*;
pub use movie::*;
pub use provider::*;
