pub mod migrate;
pub mod server;
