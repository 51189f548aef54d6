#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::{EnergyCollector, RayHitData};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CollectionRule {
    Linear,
    // energy * max(0, cos theta) between the reversed incoming direction and the
    // collector's outward normal, modeling a cardioid-microphone-like collector
    NonLinear,
}

impl CollectionRule {
    pub fn deposit(&self, collector: &mut EnergyCollector, hit: &RayHitData) {
        let energy = match self {
            Self::Linear => hit.energy,
            Self::NonLinear => {
                let cos_theta = (-hit.direction).dot(hit.normal).max(0.0);
                hit.energy * cos_theta
            }
        };
        collector.add(hit.accumulated_time, energy);
    }
}

impl Default for CollectionRule {
    fn default() -> Self {
        Self::Linear
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::geometry::Sphere;
    use crate::{Ray, Vec3};

    fn hit_with_direction(direction: Vec3, normal: Vec3) -> RayHitData {
        let incident = Ray::new(direction * -5.0, direction, 4.0, 0.0).unwrap();
        RayHitData::new(&incident, 5.0, normal, 1000.0).unwrap()
    }

    #[test]
    fn linear_deposits_full_energy() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0).unwrap();
        let mut collector = EnergyCollector::new(sphere, None);
        let hit = hit_with_direction(Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.0, 0.0, 1.0));
        CollectionRule::Linear.deposit(&mut collector, &hit);
        assert!((collector.total_energy() - 4.0).abs() < 1e-6);
    }

    #[test]
    fn nonlinear_head_on_keeps_full_energy() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0).unwrap();
        let mut collector = EnergyCollector::new(sphere, None);
        // Ray travels straight into the outward normal: reversed direction
        // is parallel to normal, cos theta = 1.
        let hit = hit_with_direction(Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.0, 0.0, 1.0));
        CollectionRule::NonLinear.deposit(&mut collector, &hit);
        assert!((collector.total_energy() - 4.0).abs() < 1e-4);
    }

    #[test]
    fn nonlinear_grazing_hit_deposits_near_zero() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0).unwrap();
        let mut collector = EnergyCollector::new(sphere, None);
        let hit = hit_with_direction(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0));
        CollectionRule::NonLinear.deposit(&mut collector, &hit);
        assert!(collector.total_energy() < 1e-4);
    }
}
