mod client;
mod lists;
mod metadata;
mod wire;


pub use client::TmdbClient;
