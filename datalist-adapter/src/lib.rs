//! Async glue for the `datalist` crate.
//!
//! The `datalist` controller is sans-IO: it hands out fetch tickets and expects results back.
//! This crate closes that loop for hosts that fetch asynchronously:
//!
//! - [`NetworkClient`]: the transport seam, plus an in-memory [`MemoryClient`]
//! - [`ListDriver`]: performs fetches for a controller and routes [`InputSignal`]s
//! - [`TableModel`]: a framework-neutral [`datalist::ViewSurface`] holding rendered cells
//!
//! It is executor-agnostic and does not spawn tasks; drive the futures however the host does.
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod client;
mod driver;
mod surface;


pub use client::{MemoryClient, NetworkClient};
pub use driver::{InputSignal, ListDriver, Subscription};
pub use surface::TableModel;
