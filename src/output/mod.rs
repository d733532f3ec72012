//! Plain-text dumps of solutions and recorded surfaces.

pub mod csv;

pub use csv::{write_solution_1d, write_solution_2d, write_surface_1d};
