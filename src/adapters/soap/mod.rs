pub mod client;
pub mod envelope;
pub mod response;
pub mod wire;

pub use client::PowerOnSoapClient;
