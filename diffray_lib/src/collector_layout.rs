use std::f32::consts::PI as PI_F32;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_RADIUS_MULTIPLIER;
use crate::error::{Error, Result};
use crate::geometry::{EnergyCollector, RayHitData, Sphere};
use crate::mesh::Mesh;
use crate::{Float, Point3, Ray};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LayoutKind {
    DoubleAxis,
    GeometricDome,
}

#[derive(Debug, Clone)]
pub struct CollectorLayout {
    collectors: Vec<EnergyCollector>,
    radius: Float,
}

impl CollectorLayout {
    pub fn build(
        kind: LayoutKind,
        mesh: &Mesh,
        num_collectors: usize,
        sample_rate: Option<Float>,
    ) -> Result<Self> {
        validate(mesh, num_collectors)?;
        let radius =
            DEFAULT_RADIUS_MULTIPLIER * mesh.height().max(mesh.side_size()).max(1.0);
        let centers = match kind {
            LayoutKind::DoubleAxis => double_axis_centers(num_collectors, radius),
            LayoutKind::GeometricDome => geometric_dome_centers(num_collectors, radius),
        };
        let collector_radius = match kind {
            LayoutKind::DoubleAxis => double_axis_radius(num_collectors, radius),
            LayoutKind::GeometricDome => geometric_dome_radius(num_collectors, radius),
        };
        let collectors = centers
            .into_iter()
            .map(|center| {
                EnergyCollector::new(
                    Sphere::new(center, collector_radius).expect("collector radius is positive"),
                    sample_rate,
                )
            })
            .collect();
        log::debug!(
            "built {:?} collector layout: {} collectors, R={:.3}, r={:.4}",
            kind,
            num_collectors,
            radius,
            collector_radius
        );
        Ok(Self { collectors, radius })
    }

    pub fn collectors(&self) -> &[EnergyCollector] {
        &self.collectors
    }

    pub fn collectors_mut(&mut self) -> &mut [EnergyCollector] {
        &mut self.collectors
    }

    pub fn len(&self) -> usize {
        self.collectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collectors.is_empty()
    }

    pub fn simulation_radius(&self) -> Float {
        self.radius
    }

    pub fn nearest_hit(&self, ray: &Ray, frequency: Float) -> Option<(usize, RayHitData)> {
        let mut nearest: Option<(usize, Float)> = None;
        for (index, collector) in self.collectors.iter().enumerate() {
            if let Some(time) = collector.sphere.intersect(ray) {
                if nearest.map_or(true, |(_, best)| time < best) {
                    nearest = Some((index, time));
                }
            }
        }
        nearest.and_then(|(index, time)| {
            let collector = &self.collectors[index];
            let point = ray.at(time);
            let normal = collector.sphere.outward_normal(point);
            RayHitData::new(ray, time, normal, frequency)
                .ok()
                .map(|hit| (index, hit))
        })
    }
}

fn validate(mesh: &Mesh, num_collectors: usize) -> Result<()> {
    if mesh.is_empty() {
        return Err(Error::InvalidConfiguration(
            "collector layout requires a non-empty mesh".to_string(),
        ));
    }
    if num_collectors < 4 {
        return Err(Error::InvalidConfiguration(format!(
            "numCollectors {} is less than 4",
            num_collectors
        )));
    }
    if num_collectors % 4 != 0 && (num_collectors - 1) % 4 != 0 {
        return Err(Error::InvalidConfiguration(format!(
            "numCollectors or numCollectors-1 must be divisible by 4, got {}",
            num_collectors
        )));
    }
    Ok(())
}

fn double_axis_radius(num_collectors: usize, radius: Float) -> Float {
    let odd = (num_collectors % 2) as Float;
    let alpha = 2.0 * PI_F32 / (num_collectors as Float + odd - 2.0);
    radius * (2.0 - 2.0 * alpha.cos()).sqrt()
}

fn double_axis_centers(num_collectors: usize, radius: Float) -> Vec<Point3> {
    let odd = num_collectors % 2;
    let alpha = 2.0 * PI_F32 / (num_collectors as Float + odd as Float - 2.0);

    let mut centers = Vec::with_capacity(num_collectors);
    if odd == 1 {
        centers.push(Point3::new(0.0, 0.0, radius));
    }

    let num_to_go = num_collectors - odd;
    let mut k = 0usize;
    while 4 * k < num_to_go {
        let theta = k as Float * alpha;
        let ground = radius * theta.cos();
        let z = radius * theta.sin();
        centers.push(Point3::new(ground, 0.0, z));
        centers.push(Point3::new(-ground, 0.0, z));
        centers.push(Point3::new(0.0, -ground, z));
        centers.push(Point3::new(0.0, ground, z));
        k += 1;
    }
    centers
}

// Fibonacci-sphere lattice restricted to the upper hemisphere (z >= 0), then
// nudged so the four cardinal meridian directions are always covered exactly.
fn geometric_dome_centers(num_collectors: usize, radius: Float) -> Vec<Point3> {
    let golden_angle = PI_F32 * (3.0 - (5.0_f32).sqrt());
    let n = num_collectors;
    let mut centers: Vec<Point3> = (0..n)
        .map(|i| {
            let z = (i as Float + 0.5) / n as Float;
            let r_xy = (1.0 - z * z).max(0.0).sqrt();
            let theta = i as Float * golden_angle;
            Point3::new(r_xy * theta.cos(), r_xy * theta.sin(), z) * radius
        })
        .collect();

    for axis in [
        Point3::new(radius, 0.0, 0.0),
        Point3::new(-radius, 0.0, 0.0),
        Point3::new(0.0, radius, 0.0),
        Point3::new(0.0, -radius, 0.0),
    ] {
        let nearest_index = centers
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                a.distance_squared(axis)
                    .partial_cmp(&b.distance_squared(axis))
                    .unwrap()
            })
            .map(|(index, _)| index)
            .expect("centers is nonempty for num_collectors >= 4");
        centers[nearest_index] = axis;
    }
    centers
}

fn geometric_dome_radius(num_collectors: usize, radius: Float) -> Float {
    // average angular spacing of a Fibonacci lattice of n points over a hemisphere
    // (solid angle 2*pi) is sqrt(2*pi / n); size collectors to that chord, scaled up,
    // so neighboring collectors overlap rather than gap
    let avg_angular_spacing = (2.0 * PI_F32 / num_collectors as Float).sqrt();
    radius * (2.0 - 2.0 * avg_angular_spacing.cos()).sqrt() * 1.25
}
