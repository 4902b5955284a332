use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::limits::LimitTable;

// ---------------------------------------------------------------------------
// Serde default functions
// ---------------------------------------------------------------------------

const fn default_gain() -> f64 {
    0.1
}
const fn default_fd_step() -> f64 {
    0.01
}
const fn default_damping() -> f64 {
    1.0
}
const fn default_max_iterations() -> u32 {
    100
}

// ---------------------------------------------------------------------------
// SolverConfig
// ---------------------------------------------------------------------------

/// Iterative IK solver configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Fraction of the remaining error consumed per iteration (default: 0.1).
    #[serde(default = "default_gain")]
    pub gain: f64,

    /// Forward finite-difference step for Jacobian columns (default: 0.01).
    #[serde(default = "default_fd_step")]
    pub fd_step: f64,

    /// Scale of the identity term in the damped normal equations (default: 1.0).
    /// Must be > 0 so the system matrix stays positive-definite at singular
    /// configurations.
    #[serde(default = "default_damping")]
    pub damping: f64,

    /// Iteration safety cap; the tolerance test exits earlier (default: 100).
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            gain: default_gain(),
            fd_step: default_fd_step(),
            damping: default_damping(),
            max_iterations: default_max_iterations(),
        }
    }
}

impl SolverConfig {
    /// Validate configuration. Returns Err on invalid values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.gain.is_finite() || self.gain <= 0.0 {
            return Err(ConfigError::InvalidGain(self.gain));
        }
        if !self.fd_step.is_finite() || self.fd_step <= 0.0 {
            return Err(ConfigError::InvalidFdStep(self.fd_step));
        }
        if !self.damping.is_finite() || self.damping <= 0.0 {
            return Err(ConfigError::InvalidDamping(self.damping));
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::ZeroMaxIterations);
        }
        Ok(())
    }

    /// Load from TOML file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// RigConfig
// ---------------------------------------------------------------------------

/// Solver settings plus an optional joint-limit table, as loaded from disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RigConfig {
    #[serde(default)]
    pub solver: SolverConfig,

    /// Per-DOF clamp table; empty means the caller supplies a compiled-in
    /// preset instead.
    #[serde(default)]
    pub limits: LimitTable,
}

impl RigConfig {
    /// Validate configuration. Returns Err on invalid values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.solver.validate()?;
        self.limits.validate()?;
        Ok(())
    }

    /// Load from TOML file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limits::DofLimit;

    // ---- SolverConfig defaults ----

    #[test]
    fn solver_config_default_values() {
        let cfg = SolverConfig::default();
        assert!((cfg.gain - 0.1).abs() < f64::EPSILON);
        assert!((cfg.fd_step - 0.01).abs() < f64::EPSILON);
        assert!((cfg.damping - 1.0).abs() < f64::EPSILON);
        assert_eq!(cfg.max_iterations, 100);
    }

    // ---- SolverConfig validate ----

    #[test]
    fn solver_config_validate_ok() {
        let cfg = SolverConfig::default();
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn solver_config_validate_invalid_gain() {
        let cfg = SolverConfig {
            gain: 0.0,
            ..SolverConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidGain(_)));
    }

    #[test]
    fn solver_config_validate_invalid_fd_step() {
        let cfg = SolverConfig {
            fd_step: -0.01,
            ..SolverConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFdStep(_)));
    }

    #[test]
    fn solver_config_validate_invalid_damping() {
        let cfg = SolverConfig {
            damping: f64::NAN,
            ..SolverConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDamping(_)));
    }

    #[test]
    fn solver_config_validate_zero_max_iterations() {
        let cfg = SolverConfig {
            max_iterations: 0,
            ..SolverConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, ConfigError::ZeroMaxIterations));
    }

    // ---- SolverConfig TOML deserialization ----

    #[test]
    fn solver_config_toml_deserialization() {
        let toml_str = r"
            gain = 0.2
            fd_step = 0.001
            damping = 0.5
            max_iterations = 30
        ";
        let cfg: SolverConfig = toml::from_str(toml_str).unwrap();
        assert!((cfg.gain - 0.2).abs() < f64::EPSILON);
        assert!((cfg.fd_step - 0.001).abs() < f64::EPSILON);
        assert!((cfg.damping - 0.5).abs() < f64::EPSILON);
        assert_eq!(cfg.max_iterations, 30);
    }

    #[test]
    fn solver_config_toml_defaults() {
        let toml_str = "";
        let cfg: SolverConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg, SolverConfig::default());
    }

    // ---- RigConfig ----

    #[test]
    fn rig_config_toml_defaults() {
        let cfg: RigConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.solver, SolverConfig::default());
        assert!(cfg.limits.is_empty());
    }

    #[test]
    fn rig_config_toml_full() {
        let toml_str = r#"
            limits = ["free", { pinned = 0.0 }]

            [solver]
            gain = 0.15
        "#;
        let cfg: RigConfig = toml::from_str(toml_str).unwrap();
        assert!((cfg.solver.gain - 0.15).abs() < f64::EPSILON);
        assert_eq!(cfg.solver.max_iterations, 100);
        assert_eq!(cfg.limits.limits()[1], DofLimit::Pinned(0.0));
    }

    #[test]
    fn rig_config_validate_catches_bad_limit() {
        let toml_str = r"
            limits = [{ range = { lower = 1.0, upper = -1.0 } }]
        ";
        let cfg: RigConfig = toml::from_str(toml_str).unwrap();
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Limit(_)));
    }

    // ---- from_file ----

    #[test]
    fn rig_config_from_file() {
        let dir = std::env::temp_dir().join("marionette_test_rig_config");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("test_rig.toml");
        std::fs::write(
            &path,
            r#"
            limits = ["free", "free", { range = { lower = -0.8 } }]

            [solver]
            gain = 0.1
            max_iterations = 50
        "#,
        )
        .unwrap();

        let cfg = RigConfig::from_file(&path).unwrap();
        assert_eq!(cfg.solver.max_iterations, 50);
        assert_eq!(cfg.limits.len(), 3);

        // Cleanup
        let _ = std::fs::remove_file(&path);
        let _ = std::fs::remove_dir(&dir);
    }

    #[test]
    fn solver_config_from_file_invalid() {
        let dir = std::env::temp_dir().join("marionette_test_solver_config_invalid");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("test_invalid.toml");
        std::fs::write(&path, "gain = -1.0").unwrap();

        let result = SolverConfig::from_file(&path);
        assert!(result.is_err());

        // Cleanup
        let _ = std::fs::remove_file(&path);
        let _ = std::fs::remove_dir(&dir);
    }

    #[test]
    fn solver_config_from_file_not_found() {
        let result = SolverConfig::from_file("/nonexistent/path/config.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
