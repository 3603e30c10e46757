//! Command handlers -- one module per subcommand

pub mod filter;
pub mod validate;
pub mod version;
