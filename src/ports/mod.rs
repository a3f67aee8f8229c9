/// Ports module defining interfaces for hexagonal architecture
///
/// The CLI drives the use cases directly; every port here is an outbound
/// (driven) port implemented by an adapter.
pub mod outbound;
