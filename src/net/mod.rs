//! Network layer: wire types and the service client.

pub mod api;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
