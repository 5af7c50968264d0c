//! Reusable canvas widgets.

pub mod id_graph;
