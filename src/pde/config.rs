//! Scheme and solver selection, serialisable to JSON.

use serde::{Deserialize, Serialize};

use crate::core::{FdError, TraverseDirection};

/// θ-weighting of an implicit heat step.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum ImplicitScheme {
    /// Fully implicit, `θ = 1`.
    Euler,
    /// `θ = 0.5`.
    #[default]
    CrankNicolson,
    /// Arbitrary `θ` in `[0, 1]`.
    Theta(f64),
}

impl ImplicitScheme {
    pub fn theta(&self) -> f64 {
        match self {
            Self::Euler => 1.0,
            Self::CrankNicolson => 0.5,
            Self::Theta(theta) => *theta,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), FdError> {
        let theta = self.theta();
        if !theta.is_finite() || !(0.0..=1.0).contains(&theta) {
            return Err(FdError::InvalidInput(format!(
                "implicit theta must be finite and in [0, 1], got {theta}"
            )));
        }
        Ok(())
    }
}

/// Explicit heat stepping rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExplicitScheme {
    /// Forward Euler; stable for `λ·max a < 0.5`.
    #[default]
    Euler,
    /// Saulyev alternating-direction sweeps.
    Saulyev,
    /// Barakat-Clark: average of both Saulyev sweeps from the same level.
    BarakatClark,
}

/// Time-stepping family of a 1D solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SolverMethod {
    Implicit(ImplicitScheme),
    Explicit(ExplicitScheme),
}

impl Default for SolverMethod {
    fn default() -> Self {
        Self::Implicit(ImplicitScheme::default())
    }
}

/// Linear solver used for tridiagonal systems.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum TridiagonalMethod {
    /// Direct LU (Thomas) elimination.
    #[default]
    ThomasLu,
    /// Successive over-relaxation.
    Sor {
        omega: f64,
        tolerance: f64,
        max_iterations: usize,
    },
}

impl TridiagonalMethod {
    /// SOR with default tolerance `1e-12` and 10 000 iterations.
    pub fn sor(omega: f64) -> Self {
        Self::Sor {
            omega,
            tolerance: 1.0e-12,
            max_iterations: 10_000,
        }
    }
}

/// ADI splitting scheme for 2D and 3D problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SplittingMethod {
    #[default]
    DouglasRachford,
    CraigSneyd,
    ModifiedCraigSneyd,
    HundsdorferVerwer,
}

/// Configuration of a 1D heat solve.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HeatSolverConfig1d {
    pub method: SolverMethod,
    pub traverse: TraverseDirection,
    pub tridiagonal: TridiagonalMethod,
}

impl HeatSolverConfig1d {
    pub fn implicit(scheme: ImplicitScheme) -> Self {
        Self {
            method: SolverMethod::Implicit(scheme),
            ..Self::default()
        }
    }

    pub fn explicit(scheme: ExplicitScheme) -> Self {
        Self {
            method: SolverMethod::Explicit(scheme),
            ..Self::default()
        }
    }

    pub fn with_traverse(mut self, traverse: TraverseDirection) -> Self {
        self.traverse = traverse;
        self
    }

    pub fn with_tridiagonal(mut self, tridiagonal: TridiagonalMethod) -> Self {
        self.tridiagonal = tridiagonal;
        self
    }

    /// Parses a JSON document such as
    /// `{"method":{"Implicit":"CrankNicolson"},"traverse":"Backward","tridiagonal":"ThomasLu"}`.
    pub fn from_json(json: &str) -> Result<Self, FdError> {
        serde_json::from_str(json)
            .map_err(|e| FdError::InvalidInput(format!("heat solver config: {e}")))
    }
}

/// Three-level wave stepping rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WaveScheme {
    /// Unconditionally stable ¼–½–¼ weighted scheme.
    #[default]
    Implicit,
    /// Three-level leapfrog; needs `k·sqrt(b)/h <= 1`.
    Explicit,
}

/// Configuration of a 1D wave solve.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WaveSolverConfig1d {
    pub scheme: WaveScheme,
    pub traverse: TraverseDirection,
    pub tridiagonal: TridiagonalMethod,
}

impl WaveSolverConfig1d {
    pub fn new(scheme: WaveScheme) -> Self {
        Self {
            scheme,
            ..Self::default()
        }
    }

    pub fn with_traverse(mut self, traverse: TraverseDirection) -> Self {
        self.traverse = traverse;
        self
    }

    pub fn with_tridiagonal(mut self, tridiagonal: TridiagonalMethod) -> Self {
        self.tridiagonal = tridiagonal;
        self
    }

    pub fn from_json(json: &str) -> Result<Self, FdError> {
        serde_json::from_str(json)
            .map_err(|e| FdError::InvalidInput(format!("wave solver config: {e}")))
    }
}

/// Configuration of a 2D or 3D ADI heat solve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplittingSolverConfig {
    pub splitting: SplittingMethod,
    /// Implicitness of the directional corrector stages.
    pub weighting: f64,
    pub traverse: TraverseDirection,
    pub tridiagonal: TridiagonalMethod,
}

impl Default for SplittingSolverConfig {
    fn default() -> Self {
        Self {
            splitting: SplittingMethod::default(),
            weighting: 0.5,
            traverse: TraverseDirection::default(),
            tridiagonal: TridiagonalMethod::default(),
        }
    }
}

impl SplittingSolverConfig {
    pub fn new(splitting: SplittingMethod, weighting: f64) -> Self {
        Self {
            splitting,
            weighting,
            ..Self::default()
        }
    }

    pub fn with_traverse(mut self, traverse: TraverseDirection) -> Self {
        self.traverse = traverse;
        self
    }

    pub fn with_tridiagonal(mut self, tridiagonal: TridiagonalMethod) -> Self {
        self.tridiagonal = tridiagonal;
        self
    }

    pub fn from_json(json: &str) -> Result<Self, FdError> {
        serde_json::from_str(json)
            .map_err(|e| FdError::InvalidInput(format!("splitting solver config: {e}")))
    }

    pub(crate) fn validate(&self) -> Result<(), FdError> {
        if !self.weighting.is_finite() || self.weighting <= 0.0 || self.weighting > 1.0 {
            return Err(FdError::InvalidInput(format!(
                "splitting weighting must be finite and in (0, 1], got {}",
                self.weighting
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_thetas() {
        assert_eq!(ImplicitScheme::Euler.theta(), 1.0);
        assert_eq!(ImplicitScheme::CrankNicolson.theta(), 0.5);
        assert!(ImplicitScheme::Theta(1.5).validate().is_err());
    }

    #[test]
    fn heat_config_parses_from_json() {
        let cfg = HeatSolverConfig1d::from_json(
            r#"{"method":{"Explicit":"Saulyev"},"traverse":"Backward","tridiagonal":"ThomasLu"}"#,
        )
        .expect("config");
        assert_eq!(cfg.method, SolverMethod::Explicit(ExplicitScheme::Saulyev));
        assert_eq!(cfg.traverse, TraverseDirection::Backward);
        assert!(HeatSolverConfig1d::from_json("{").is_err());
    }

    #[test]
    fn splitting_config_round_trips_sor() {
        let cfg = SplittingSolverConfig::new(SplittingMethod::HundsdorferVerwer, 0.5)
            .with_tridiagonal(TridiagonalMethod::sor(1.2));
        let json = serde_json::to_string(&cfg).expect("serialise");
        let back = SplittingSolverConfig::from_json(&json).expect("parse");
        assert_eq!(back, cfg);
        assert!(SplittingSolverConfig::new(SplittingMethod::CraigSneyd, 0.0).validate().is_err());
    }
}
