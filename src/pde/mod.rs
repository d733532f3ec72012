//! PDE data, coordinate transforms and solver configuration.

pub mod config;
pub mod data;
pub mod transform;

pub use config::{
    ExplicitScheme, HeatSolverConfig1d, ImplicitScheme, SolverMethod, SplittingMethod,
    SplittingSolverConfig, TridiagonalMethod, WaveScheme, WaveSolverConfig1d,
};
pub use data::{
    CoefficientFn1d, CoefficientFn2d, CoefficientFn3d, HeatData1d, HeatData1dBuilder, HeatData2d,
    HeatData2dBuilder, HeatData3d, HeatData3dBuilder, InitialFn1d, InitialFn2d, InitialFn3d,
    Term3d, WaveData1d, WaveData1dBuilder,
};
pub use transform::{
    HeatCoefficients2d, HeatCoefficients3d, HeatDataTransform1d, HeatDataTransform2d,
    HeatDataTransform3d, WaveDataTransform1d,
};
