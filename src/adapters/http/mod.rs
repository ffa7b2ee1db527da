mod client;

pub use client::ReqwestProbe;
