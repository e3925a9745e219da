//! Delivery lead-time choropleth for US states.
//!
//! Raw shipment rows flow through [`dataset`] validation, are reduced per
//! destination by [`aggregate`], binned by [`classify`] and composed into a
//! renderable [`compose::Scene`] over the region shapes of [`catalog`].

pub mod aggregate;
pub mod api;
pub mod catalog;
pub mod centroids;
pub mod classify;
pub mod compose;
pub mod config;
pub mod dataset;
pub mod error;
pub mod models;
pub mod pipeline;
