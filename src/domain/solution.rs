use crate::domain::types::{ProblemInput, Vehicle};

/// One vehicle's assignment within a [`Solution`]: the ordered pickup list
/// plus the route totals the evaluator derives from it.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleAssignment {
    pub vehicle_id: u64,
    pub capacity: usize,
    /// Passenger ids in pickup order.
    pub passengers: Vec<u64>,
    pub total_distance_km: f64,
    pub total_time_minutes: f64,
}

impl VehicleAssignment {
    pub fn empty(vehicle: &Vehicle) -> Self {
        Self {
            vehicle_id: vehicle.id,
            capacity: vehicle.capacity,
            passengers: Vec::new(),
            total_distance_km: 0.0,
            total_time_minutes: 0.0,
        }
    }

    pub fn is_overloaded(&self) -> bool {
        self.passengers.len() > self.capacity
    }

    pub fn spare_capacity(&self) -> usize {
        self.capacity.saturating_sub(self.passengers.len())
    }
}

/// A candidate assignment-and-ordering of every passenger to a vehicle, plus
/// the cached scalar score the evaluator last computed for it.
///
/// Invariant enforced by construction: a passenger id appears in at most one
/// vehicle's `passengers` list. Operators must preserve this — see
/// [`Solution::assert_no_duplicate_assignments`], which callers in debug
/// builds use to fail fast if it is ever violated (§7 "internal
/// inconsistency" in SPEC_FULL.md).
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub vehicles: Vec<VehicleAssignment>,
    pub score: f64,
}

impl Solution {
    /// An empty solution: one assignment slot per vehicle, nobody assigned.
    pub fn blank(problem: &ProblemInput) -> Self {
        Self {
            vehicles: problem.vehicles.iter().map(VehicleAssignment::empty).collect(),
            score: f64::NEG_INFINITY,
        }
    }

    pub fn vehicle_mut(&mut self, vehicle_id: u64) -> Option<&mut VehicleAssignment> {
        self.vehicles.iter_mut().find(|v| v.vehicle_id == vehicle_id)
    }

    pub fn vehicle(&self, vehicle_id: u64) -> Option<&VehicleAssignment> {
        self.vehicles.iter().find(|v| v.vehicle_id == vehicle_id)
    }

    /// Whether `passenger_id` already appears in any vehicle's list.
    pub fn is_assigned(&self, passenger_id: u64) -> bool {
        self.vehicles
            .iter()
            .any(|v| v.passengers.contains(&passenger_id))
    }

    pub fn assigned_count(&self) -> usize {
        self.vehicles.iter().map(|v| v.passengers.len()).sum()
    }

    pub fn used_vehicle_count(&self) -> usize {
        self.vehicles.iter().filter(|v| !v.passengers.is_empty()).count()
    }

    pub fn overloaded_vehicle_count(&self) -> usize {
        self.vehicles.iter().filter(|v| v.is_overloaded()).count()
    }

    pub fn has_capacity_breach(&self) -> bool {
        self.overloaded_vehicle_count() > 0
    }

    /// Debug-only check for the "assigned at most once" invariant. Panics in
    /// debug builds, no-ops in release — operators are programmer-trusted to
    /// maintain this; a violation is a bug in the operator, not caller input.
    pub fn assert_no_duplicate_assignments(&self) {
        let mut seen = std::collections::HashSet::new();
        for vehicle in &self.vehicles {
            for &passenger_id in &vehicle.passengers {
                debug_assert!(
                    seen.insert(passenger_id),
                    "passenger {passenger_id} assigned to more than one vehicle"
                );
            }
        }
    }
}
