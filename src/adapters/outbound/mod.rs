/// Outbound adapters - Infrastructure implementations of outbound ports
pub mod archive;
pub mod console;
pub mod filesystem;
pub mod formatters;
pub mod network;
pub mod parsers;
