//! Client side of the protocol: drive a server over a line-delimited stream.

pub mod client;

pub use client::ClientSession;
