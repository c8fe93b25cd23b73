//! Middleware stages for the request pipeline

pub mod track;

pub use track::track_requests;
