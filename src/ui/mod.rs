//! Terminal presentation surfaces.

pub mod task_viewer;
