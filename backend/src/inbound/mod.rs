//! Inbound adapters translating external calls into domain operations.

pub mod http;
