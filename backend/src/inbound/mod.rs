//! Inbound adapters translating external requests into domain calls.
//!
//! HTTP handlers live under [`http`] and depend only on the driving ports.

pub mod http;
