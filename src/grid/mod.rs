//! Computational grids, sinh grid transforms and grid-function materialisation.

pub mod config;
pub mod discretization;
pub mod transform;

pub use config::{
    DiscretizationConfig1d, DiscretizationConfig2d, DiscretizationConfig3d, GridConfig1d,
    GridConfig2d, GridConfig3d, GridHints1d, GridHints2d, GridHints3d,
};
pub use discretization::{
    of_function_1d, of_function_2d, of_function_3d, of_space_1d, of_time_function_1d, time_points,
};
pub use transform::{AxisTransform, GridTransform1d, GridTransform2d, GridTransform3d};
