//! Penalty model configuration.
//!
//! [`PenaltyModel`] holds the constants of the route objective. Every
//! planner scores routes with the same model, which is what makes their
//! results comparable.

use crate::error::{Error, Result};

/// Constants of the route objective.
///
/// # Defaults
///
/// ```
/// use u_tourplan::eval::PenaltyModel;
///
/// let model = PenaltyModel::default();
/// assert_eq!(model.minutes_per_unit, 30.0);
/// assert_eq!(model.late_delay, 300.0);
/// assert_eq!(model.infeasible_base, 5000.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PenaltyModel {
    /// Travel minutes per unit of plane distance.
    pub minutes_per_unit: f64,

    /// Minutes added to the clock when arriving after closing time.
    ///
    /// The delay also pushes every later stop back, so a single late
    /// arrival can cascade into further violations.
    pub late_delay: f64,

    /// Flat penalty added once to any infeasible route.
    pub infeasible_base: f64,

    /// Penalty per time-window violation.
    pub per_time_violation: f64,

    /// Penalty per currency unit spent over budget.
    pub per_budget_unit: f64,
}

impl Default for PenaltyModel {
    fn default() -> Self {
        Self {
            minutes_per_unit: 30.0,
            late_delay: 300.0,
            infeasible_base: 5000.0,
            per_time_violation: 1000.0,
            per_budget_unit: 0.01,
        }
    }
}

impl PenaltyModel {
    pub fn with_minutes_per_unit(mut self, minutes: f64) -> Self {
        self.minutes_per_unit = minutes;
        self
    }

    pub fn with_late_delay(mut self, minutes: f64) -> Self {
        self.late_delay = minutes;
        self
    }

    pub fn with_infeasible_base(mut self, penalty: f64) -> Self {
        self.infeasible_base = penalty;
        self
    }

    pub fn with_per_time_violation(mut self, penalty: f64) -> Self {
        self.per_time_violation = penalty;
        self
    }

    pub fn with_per_budget_unit(mut self, penalty: f64) -> Self {
        self.per_budget_unit = penalty;
        self
    }

    /// Validates the model.
    ///
    /// All constants must be finite and non-negative; otherwise penalties
    /// could reward infeasibility.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("minutes_per_unit", self.minutes_per_unit),
            ("late_delay", self.late_delay),
            ("infeasible_base", self.infeasible_base),
            ("per_time_violation", self.per_time_violation),
            ("per_budget_unit", self.per_budget_unit),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model() {
        let m = PenaltyModel::default();
        assert!((m.per_time_violation - 1000.0).abs() < 1e-12);
        assert!((m.per_budget_unit - 0.01).abs() < 1e-12);
        assert!(m.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let m = PenaltyModel::default()
            .with_minutes_per_unit(12.0)
            .with_late_delay(60.0)
            .with_infeasible_base(100.0)
            .with_per_time_violation(10.0)
            .with_per_budget_unit(1.0);
        assert_eq!(m.minutes_per_unit, 12.0);
        assert_eq!(m.late_delay, 60.0);
        assert_eq!(m.infeasible_base, 100.0);
        assert_eq!(m.per_time_violation, 10.0);
        assert_eq!(m.per_budget_unit, 1.0);
    }

    #[test]
    fn test_validate_rejects_negative() {
        let m = PenaltyModel::default().with_per_time_violation(-1.0);
        assert!(matches!(m.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_rejects_nan() {
        let m = PenaltyModel::default().with_minutes_per_unit(f64::NAN);
        assert!(m.validate().is_err());
    }
}
