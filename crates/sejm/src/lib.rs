mod client;
mod inspect;
mod page;
mod time;

pub use client::SejmClient;
pub use inspect::{extract, transmission_id, SejmInspector};
