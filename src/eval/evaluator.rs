//! Route scoring.
//!
//! A single pass over the route simulates the day: travel from the hotel,
//! wait for opening times, visit, pay admission, and travel back.
//!
//! # Objective
//!
//! ```text
//! fitness = distance + elapsed_minutes / 60
//!         + [infeasible] * (base + time_violations * per_violation
//!                                + budget_overrun * per_unit)
//! ```
//!
//! Distance and elapsed hours are deliberately summed with equal weight.
//! Penalties are additive and monotone in severity, so the fitness stays a
//! total order that selection can use directly.

use super::config::PenaltyModel;
use super::types::{EvaluationResult, Stop, Violations};
use crate::error::Result;
use crate::geometry::{euclidean, travel_minutes};
use crate::instance::{AttractionId, Instance};

/// Scores routes against one instance.
///
/// Holds only borrowed, immutable data: evaluating never changes state,
/// and the same route always produces the same result.
#[derive(Debug, Clone, Copy)]
pub struct RouteEvaluator<'a> {
    instance: &'a Instance,
    model: PenaltyModel,
}

/// Running totals of a route walk.
#[derive(Debug, Default)]
struct Totals {
    distance: f64,
    time: f64,
    cost: u64,
    late_stops: u32,
}

impl<'a> RouteEvaluator<'a> {
    /// Evaluator with the default [`PenaltyModel`].
    pub fn new(instance: &'a Instance) -> Self {
        Self::with_model(instance, PenaltyModel::default())
    }

    pub fn with_model(instance: &'a Instance, model: PenaltyModel) -> Self {
        Self { instance, model }
    }

    pub fn instance(&self) -> &'a Instance {
        self.instance
    }

    pub fn model(&self) -> &PenaltyModel {
        &self.model
    }

    /// Evaluates a route given as attraction ids.
    ///
    /// The route may be any repeat-free selection of the instance's
    /// attractions. Unknown or repeated ids are rejected.
    pub fn evaluate(&self, route: &[AttractionId]) -> Result<EvaluationResult> {
        let positions = self.instance.resolve(route)?;
        Ok(self.evaluate_positions(&positions))
    }

    /// Evaluates a route given as table positions, with full timeline.
    ///
    /// Positions must be in range and repeat-free; the planners guarantee
    /// this for the routes they build.
    pub fn evaluate_positions(&self, positions: &[usize]) -> EvaluationResult {
        let mut timeline = Vec::with_capacity(positions.len());
        let totals = self.walk(positions, Some(&mut timeline));
        let (fitness, violations) = self.score(&totals);

        EvaluationResult {
            fitness,
            total_distance: totals.distance,
            total_cost: totals.cost,
            total_time: totals.time,
            feasible: violations.is_empty(),
            violations,
            timeline,
        }
    }

    /// Fitness only, skipping the timeline.
    ///
    /// Always equal to `evaluate_positions(positions).fitness`.
    pub fn fitness(&self, positions: &[usize]) -> f64 {
        let totals = self.walk(positions, None);
        self.score(&totals).0
    }

    fn walk(&self, positions: &[usize], mut timeline: Option<&mut Vec<Stop>>) -> Totals {
        let attractions = self.instance.attractions();
        let hotel = self.instance.hotel();
        let mut totals = Totals::default();
        let mut here = hotel;

        for &p in positions {
            let a = &attractions[p];

            let leg = euclidean(here, a.location);
            totals.distance += leg;
            totals.time += travel_minutes(leg, self.model.minutes_per_unit);

            let arrival = totals.time;
            let open = f64::from(a.open);
            if totals.time < open {
                totals.time = open;
            }

            let late = totals.time > f64::from(a.close);
            if late {
                totals.late_stops += 1;
                totals.time += self.model.late_delay;
            }

            let start = totals.time;
            totals.time += f64::from(a.duration);
            totals.cost = totals.cost.saturating_add(a.cost);

            if let Some(stops) = timeline.as_mut() {
                stops.push(Stop {
                    id: a.id,
                    arrival,
                    start,
                    departure: totals.time,
                    late,
                });
            }
            here = a.location;
        }

        let leg = euclidean(here, hotel);
        totals.distance += leg;
        totals.time += travel_minutes(leg, self.model.minutes_per_unit);

        totals
    }

    fn score(&self, totals: &Totals) -> (f64, Violations) {
        let violations = Violations {
            time: totals.late_stops,
            budget: totals.cost.saturating_sub(self.instance.budget()),
        };

        let mut fitness = totals.distance + totals.time / 60.0;
        if !violations.is_empty() {
            fitness += self.model.infeasible_base;
            fitness += f64::from(violations.time) * self.model.per_time_violation;
            fitness += violations.budget as f64 * self.model.per_budget_unit;
        }

        (fitness, violations)
    }
}

/// Evaluates `route` with the default penalty model.
pub fn evaluate(instance: &Instance, route: &[AttractionId]) -> Result<EvaluationResult> {
    RouteEvaluator::new(instance).evaluate(route)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::geometry::Point;
    use crate::instance::Attraction;
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    fn single(a: Attraction, budget: i64) -> Instance {
        Instance::new(Point::ORIGIN, vec![a], budget).unwrap()
    }

    #[test]
    fn test_empty_route_scores_zero() {
        let inst = Instance::new(Point::ORIGIN, Vec::new(), 0).unwrap();
        let r = evaluate(&inst, &[]).unwrap();
        assert_eq!(r.fitness, 0.0);
        assert_eq!(r.total_distance, 0.0);
        assert_eq!(r.total_time, 0.0);
        assert!(r.feasible);
        assert!(r.timeline.is_empty());
    }

    #[test]
    fn test_single_visit_on_time() {
        // 5 units out, 5 back: 150 min each way plus a 60 min visit.
        let inst = single(Attraction::new(1, (3.0, 4.0), 0, 480, 60, 10), 100);
        let r = evaluate(&inst, &[1]).unwrap();

        assert!((r.total_distance - 10.0).abs() < EPS);
        assert!((r.total_time - 360.0).abs() < EPS);
        assert!((r.fitness - 16.0).abs() < EPS);
        assert_eq!(r.total_cost, 10);
        assert!(r.feasible);

        let stop = r.timeline[0];
        assert!((stop.arrival - 150.0).abs() < EPS);
        assert!((stop.start - 150.0).abs() < EPS);
        assert!((stop.departure - 210.0).abs() < EPS);
        assert!(!stop.late);
    }

    #[test]
    fn test_early_arrival_waits_without_penalty() {
        let inst = single(Attraction::new(1, (1.0, 0.0), 120, 480, 30, 0), 0);
        let r = evaluate(&inst, &[1]).unwrap();

        assert!(r.feasible);
        assert!((r.timeline[0].arrival - 30.0).abs() < EPS);
        assert!((r.timeline[0].start - 120.0).abs() < EPS);
        assert!((r.total_time - 180.0).abs() < EPS);
        assert!((r.fitness - 5.0).abs() < EPS);
        assert!((r.waiting_time() - 90.0).abs() < EPS);
    }

    #[test]
    fn test_late_arrival_is_delayed_and_penalized() {
        let inst = single(Attraction::new(1, (1.0, 0.0), -60, 0, 30, 0), 0);
        let r = evaluate(&inst, &[1]).unwrap();

        assert!(!r.feasible);
        assert_eq!(r.violations.time, 1);
        assert_eq!(r.violations.budget, 0);
        assert!(r.timeline[0].late);
        assert!((r.timeline[0].start - 330.0).abs() < EPS);
        // 2 distance + 390 min / 60 + 5000 base + 1000 per violation
        assert!((r.fitness - 6008.5).abs() < EPS);
        assert_eq!(r.waiting_time(), 0.0);
    }

    #[test]
    fn test_budget_overrun() {
        let inst = single(Attraction::new(1, (1.0, 0.0), 0, 480, 30, 200), 100);
        let r = evaluate(&inst, &[1]).unwrap();

        assert!(!r.feasible);
        assert_eq!(r.violations.time, 0);
        assert_eq!(r.violations.budget, 100);
        assert!((r.fitness - (2.0 + 1.5 + 5000.0 + 1.0)).abs() < EPS);
    }

    #[test]
    fn test_cost_exactly_on_budget_is_feasible() {
        let inst = single(Attraction::new(1, (1.0, 0.0), 0, 480, 30, 100), 100);
        let r = evaluate(&inst, &[1]).unwrap();
        assert!(r.feasible);
        assert_eq!(r.violations.budget, 0);
    }

    #[test]
    fn test_huge_costs_saturate() {
        let price = u64::MAX / 2 + 1;
        let inst = Instance::new(
            Point::ORIGIN,
            vec![
                Attraction::new(1, (1.0, 0.0), 0, 480, 30, price),
                Attraction::new(2, (2.0, 0.0), 0, 480, 30, price),
            ],
            0,
        )
        .unwrap();
        let r = evaluate(&inst, &[1, 2]).unwrap();

        assert_eq!(r.total_cost, u64::MAX);
        assert_eq!(r.violations.budget, u64::MAX);
        assert!(!r.feasible);
        assert!(r.fitness.is_finite());
        assert_eq!(RouteEvaluator::new(&inst).fitness(&[0, 1]), r.fitness);
    }

    #[test]
    fn test_late_delay_cascades() {
        // The second stop is reachable on time only without the first
        // stop's late delay.
        let inst = Instance::new(
            Point::ORIGIN,
            vec![
                Attraction::new(1, (1.0, 0.0), -60, 0, 10, 0),
                Attraction::new(2, (2.0, 0.0), 0, 200, 10, 0),
            ],
            0,
        )
        .unwrap();

        let r = evaluate(&inst, &[1, 2]).unwrap();
        assert_eq!(r.violations.time, 2);
        assert!(r.timeline[1].late);
    }

    #[test]
    fn test_custom_model() {
        let inst = single(Attraction::new(1, (1.0, 0.0), 0, 480, 30, 0), 0);
        let model = PenaltyModel::default().with_minutes_per_unit(60.0);
        let r = RouteEvaluator::with_model(&inst, model).evaluate(&[1]).unwrap();
        assert!((r.total_time - 150.0).abs() < EPS);
    }

    #[test]
    fn test_rejects_malformed_routes() {
        let inst = single(Attraction::new(1, (1.0, 0.0), 0, 480, 30, 0), 0);
        assert_eq!(evaluate(&inst, &[1, 1]), Err(Error::RepeatedStop(1)));
        assert_eq!(evaluate(&inst, &[2]), Err(Error::UnknownAttraction(2)));
    }

    #[test]
    fn test_time_violation_strictly_worse() {
        let open = single(Attraction::new(1, (1.0, 0.0), -60, 600, 30, 0), 0);
        let closed = single(Attraction::new(1, (1.0, 0.0), -60, 0, 30, 0), 0);

        let ok = evaluate(&open, &[1]).unwrap();
        let late = evaluate(&closed, &[1]).unwrap();
        assert!(late.fitness > ok.fitness);
    }

    fn grid_instance(n: u32) -> Instance {
        let attractions = (1..=n)
            .map(|id| {
                let x = f64::from(id % 5) * 0.4 - 0.8;
                let y = f64::from(id / 5) * 0.3 - 0.6;
                let open = -180 + (id as i32 % 3) * 60;
                let close = 480 + (id as i32 % 4) * 30;
                Attraction::new(id, (x, y), open, close, 20 + id % 40, u64::from(id) * 1_000)
            })
            .collect();
        Instance::new(Point::new(0.1, -0.2), attractions, 40_000).unwrap()
    }

    fn shuffled(n: usize) -> impl Strategy<Value = Vec<usize>> {
        Just((0..n).collect::<Vec<_>>()).prop_shuffle()
    }

    proptest! {
        #[test]
        fn prop_timeline_follows_route(perm in shuffled(12)) {
            let inst = grid_instance(12);
            let eval = RouteEvaluator::new(&inst);
            let r = eval.evaluate_positions(&perm);

            prop_assert_eq!(r.timeline.len(), perm.len());
            prop_assert_eq!(r.route(), inst.ids_of(&perm));
            prop_assert!((eval.fitness(&perm) - r.fitness).abs() < 1e-12);
        }

        #[test]
        fn prop_timeline_is_monotone(perm in shuffled(12)) {
            let inst = grid_instance(12);
            let r = RouteEvaluator::new(&inst).evaluate_positions(&perm);

            let mut clock = 0.0;
            for stop in &r.timeline {
                prop_assert!(stop.arrival >= clock);
                prop_assert!(stop.start >= stop.arrival);
                prop_assert!(stop.departure > stop.start);
                clock = stop.departure;
            }
            prop_assert!(r.total_time >= clock);
        }
    }
}
