use std::collections::BTreeMap;

use crate::constants::ACCURACY_EPSILON;
use crate::error::{Error, Result};
use crate::geometry::ray::Ray;
use crate::{Float, Point3, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Point3,
    pub radius: Float,
}

impl Sphere {
    pub fn new(center: Point3, radius: Float) -> Result<Self> {
        if radius <= 0.0 {
            return Err(Error::InvalidGeometry(format!(
                "sphere radius must be > 0, got {}",
                radius
            )));
        }
        Ok(Self { center, radius })
    }

    pub fn intersect(&self, ray: &Ray) -> Option<Float> {
        let v = ray.origin - self.center;
        let beta = 2.0 * v.dot(ray.direction);
        let gamma = v.dot(v) - self.radius * self.radius;
        let discriminant = beta * beta - 4.0 * gamma;
        if discriminant < 0.0 {
            return None;
        }
        let sqrt_disc = discriminant.sqrt();
        let time_low = (-beta - sqrt_disc) / 2.0;
        let time_high = (-beta + sqrt_disc) / 2.0;

        if time_high <= ACCURACY_EPSILON {
            return None;
        }
        // reject a ray originating on the surface so a reflected ray can't re-hit its own collector
        if time_low.abs() < ACCURACY_EPSILON {
            return None;
        }
        Some(if time_low > 0.0 { time_low } else { time_high })
    }

    pub fn outward_normal(&self, point: Point3) -> Vec3 {
        (point - self.center) / self.radius
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnergyCollector {
    pub sphere: Sphere,
    sample_rate: Option<Float>,
    // f32 isn't Ord/Hash, so bins are keyed by the bit pattern of the (quantized) time
    energy: BTreeMap<u32, Float>,
}

impl EnergyCollector {
    pub fn new(sphere: Sphere, sample_rate: Option<Float>) -> Self {
        Self {
            sphere,
            sample_rate,
            energy: BTreeMap::new(),
        }
    }

    pub fn center(&self) -> Point3 {
        self.sphere.center
    }

    pub fn radius(&self) -> Float {
        self.sphere.radius
    }

    fn quantize(&self, time: Float) -> Float {
        match self.sample_rate {
            Some(rate) if rate > 0.0 => (time * rate).round() / rate,
            _ => time,
        }
    }

    pub fn add(&mut self, time: Float, energy: Float) {
        let key = self.quantize(time).to_bits();
        *self.energy.entry(key).or_insert(0.0) += energy;
    }

    pub fn total_energy(&self) -> Float {
        self.energy.values().sum()
    }

    pub fn samples(&self) -> impl Iterator<Item = (Float, Float)> + '_ {
        self.energy
            .iter()
            .map(|(&bits, &energy)| (Float::from_bits(bits), energy))
    }

    pub fn is_empty(&self) -> bool {
        self.energy.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::geometry::Ray;

    #[test]
    fn negative_radius_rejected() {
        assert!(Sphere::new(Vec3::ZERO, 0.0).is_err());
        assert!(Sphere::new(Vec3::ZERO, -1.0).is_err());
    }

    #[test]
    fn straight_on_hit_from_outside() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, 10.0), 1.0).unwrap();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0), 1.0, 0.0).unwrap();
        let t = sphere.intersect(&ray).unwrap();
        assert!((t - 9.0).abs() < 1e-5);
    }

    #[test]
    fn ray_originating_on_surface_is_rejected() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, 10.0), 1.0).unwrap();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 9.0), Vec3::new(0.0, 0.0, -1.0), 1.0, 0.0).unwrap();
        assert!(sphere.intersect(&ray).is_none());
    }

    #[test]
    fn ray_from_inside_hits_far_side() {
        let sphere = Sphere::new(Vec3::ZERO, 5.0).unwrap();
        let ray = Ray::new(Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.0, 0.0, 1.0), 1.0, 0.0).unwrap();
        let t = sphere.intersect(&ray).unwrap();
        assert!((t - 6.0).abs() < 1e-5);
    }

    #[test]
    fn missed_sphere_returns_none() {
        let sphere = Sphere::new(Vec3::new(100.0, 0.0, 0.0), 1.0).unwrap();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0), 1.0, 0.0).unwrap();
        assert!(sphere.intersect(&ray).is_none());
    }

    #[test]
    fn collector_accumulates_additively_and_commutatively() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0).unwrap();
        let mut a = EnergyCollector::new(sphere, None);
        a.add(1.0, 2.0);
        a.add(1.0, 3.0);
        let mut b = EnergyCollector::new(sphere, None);
        b.add(1.0, 3.0);
        b.add(1.0, 2.0);
        assert_eq!(a.total_energy(), b.total_energy());
        assert!((a.total_energy() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn quantization_merges_close_times_into_one_bin() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0).unwrap();
        let mut c = EnergyCollector::new(sphere, Some(1000.0));
        c.add(0.0011, 1.0);
        c.add(0.0012, 1.0);
        assert_eq!(c.samples().count(), 1);
        assert!((c.total_energy() - 2.0).abs() < 1e-6);
    }
}
