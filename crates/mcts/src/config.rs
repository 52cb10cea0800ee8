//! UCT search configuration.

use std::f64::consts::SQRT_2;

/// Search configuration parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct UctConfig {
    /// Maximum number of iterations (`Tree::execute` calls) per search.
    /// A search stops earlier if the whole tree has been explored.
    pub iterations: usize,

    /// Weight of the exploration term in the UCT formula.
    pub exploration: f64,
}

impl Default for UctConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            exploration: SQRT_2,
        }
    }
}

impl UctConfig {
    /// Create a new config with the specified number of iterations.
    pub fn with_iterations(iterations: usize) -> Self {
        Self {
            iterations,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = UctConfig::default();
        assert_eq!(config.iterations, 1000);
        assert!((config.exploration - 2.0f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_with_iterations() {
        let config = UctConfig::with_iterations(50);
        assert_eq!(config.iterations, 50);
        assert_eq!(config.exploration, SQRT_2);
    }
}
