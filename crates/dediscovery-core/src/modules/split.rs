use crate::common::SplitConfig;
use crate::domain::{AnalysisError, AnalysisResult, ParamValue};
use crate::modules::layout::{ExperimentPaths, Partition, write_numeric_array};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::info;

/// Training and test partitions of one measurement series, each sorted by
/// coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitData {
    pub training_grid: Vec<f64>,
    pub training_values: Vec<f64>,
    pub test_grid: Vec<f64>,
    pub test_values: Vec<f64>,
}

impl SplitData {
    pub fn grid(&self, partition: Partition) -> &[f64] {
        match partition {
            Partition::Training => &self.training_grid,
            Partition::Test => &self.test_grid,
        }
    }

    pub fn values(&self, partition: Partition) -> &[f64] {
        match partition {
            Partition::Training => &self.training_values,
            Partition::Test => &self.test_values,
        }
    }
}

/// Seeded random split; the same seed always selects the same test points.
pub fn split_measurements(
    grid: &[f64],
    values: &[f64],
    config: &SplitConfig,
) -> AnalysisResult<SplitData> {
    if grid.len() != values.len() {
        return Err(AnalysisError::ShapeMismatch {
            predicted: grid.len(),
            measured: values.len(),
        });
    }
    let n = grid.len();
    if n < 2 {
        return Err(AnalysisError::EmptyArray {
            what: format!("a train/test split of {n} sample(s)"),
        });
    }

    let n_test = ((config.test_size * n as f64).ceil() as usize).clamp(1, n - 1);
    let mut order: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(config.seed);
    order.shuffle(&mut rng);

    let (test, training) = order.split_at(n_test);
    let (training_grid, training_values) = sorted_subset(grid, values, training);
    let (test_grid, test_values) = sorted_subset(grid, values, test);
    Ok(SplitData {
        training_grid,
        training_values,
        test_grid,
        test_values,
    })
}

fn sorted_subset(grid: &[f64], values: &[f64], picked: &[usize]) -> (Vec<f64>, Vec<f64>) {
    let mut picked = picked.to_vec();
    picked.sort_by(|a, b| grid[*a].total_cmp(&grid[*b]));
    picked.iter().map(|&i| (grid[i], values[i])).unzip()
}

/// Writes the four split files for `param` under the split directory.
pub fn save_split(paths: &ExperimentPaths, param: ParamValue, split: &SplitData) -> AnalysisResult<()> {
    for partition in [Partition::Training, Partition::Test] {
        write_numeric_array(&paths.split_grid(param, partition), split.grid(partition))?;
        write_numeric_array(
            &paths.split_measurement(param, partition),
            split.values(partition),
        )?;
    }
    info!(
        %param,
        training = split.training_grid.len(),
        test = split.test_grid.len(),
        "saved split measurements"
    );
    Ok(())
}
