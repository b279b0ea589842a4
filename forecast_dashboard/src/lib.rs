//! Client-side shaping and rendering for the forecast dashboard.
//!
//! One fetch yields a forecast and an analysis snapshot. From those,
//! [`series`] builds the tagged drawable sequence, [`display`] derives the
//! card figures (via [`metrics`]), and [`chart`] maps the sequence onto a
//! canvas using [`range`]. [`dashboard`] runs the fetch and publishes the
//! result into the [`view_state`] store.

#![deny(missing_docs)]

pub mod chart;
pub mod dashboard;
pub mod display;
pub mod metrics;
pub mod range;
pub mod report;
pub mod series;
pub mod settings;
pub mod svg;
pub mod view_state;
