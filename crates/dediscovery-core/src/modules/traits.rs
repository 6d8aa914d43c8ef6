use crate::common::{DiscoveryParams, SolverParams};
use crate::domain::AnalysisResult;

/// One member of a discovered population: the text the engine prints and
/// the engine-specific form a solver consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveredEquation<F> {
    pub text: String,
    pub solver_form: F,
}

/// Solver output on the training and test grids, index-aligned with them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SolverPrediction {
    pub training: Vec<f64>,
    pub test: Vec<f64>,
}

pub trait DiscoveryEngine {
    type SolverForm;

    fn discover(
        &self,
        grid: &[f64],
        values: &[f64],
        params: &DiscoveryParams,
    ) -> AnalysisResult<Vec<DiscoveredEquation<Self::SolverForm>>>;
}

pub trait PdeSolver<E> {
    fn solve(
        &self,
        equation: &E,
        training_grid: &[f64],
        test_grid: &[f64],
        params: &SolverParams,
    ) -> AnalysisResult<SolverPrediction>;
}

impl<T> DiscoveryEngine for &T
where
    T: DiscoveryEngine + ?Sized,
{
    type SolverForm = T::SolverForm;

    fn discover(
        &self,
        grid: &[f64],
        values: &[f64],
        params: &DiscoveryParams,
    ) -> AnalysisResult<Vec<DiscoveredEquation<Self::SolverForm>>> {
        (**self).discover(grid, values, params)
    }
}

impl<E, T> PdeSolver<E> for &T
where
    T: PdeSolver<E> + ?Sized,
{
    fn solve(
        &self,
        equation: &E,
        training_grid: &[f64],
        test_grid: &[f64],
        params: &SolverParams,
    ) -> AnalysisResult<SolverPrediction> {
        (**self).solve(equation, training_grid, test_grid, params)
    }
}
