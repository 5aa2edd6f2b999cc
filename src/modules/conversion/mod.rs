pub mod error;
pub mod events;
pub mod fetcher;
pub mod model;
pub mod prober;
pub mod publisher;
pub mod reporter;
pub mod transcoder;
