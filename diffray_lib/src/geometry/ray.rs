use std::f64::consts::PI;

use crate::constants::{ACCURACY_EPSILON, SOUND_SPEED};
use crate::error::{Error, Result};
use crate::{Float, Point3, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point3,
    pub direction: Vec3,
    pub energy: Float,
    pub accumulated_time: Float,
}

impl Ray {
    pub fn new(origin: Point3, direction: Vec3, energy: Float, accumulated_time: Float) -> Result<Self> {
        if direction.length_squared() <= ACCURACY_EPSILON * ACCURACY_EPSILON {
            return Err(Error::InvalidGeometry(
                "ray direction must be nonzero".to_string(),
            ));
        }
        Ok(Self {
            origin,
            direction: direction.normalize(),
            energy,
            accumulated_time,
        })
    }

    #[inline]
    pub fn at(&self, t: Float) -> Point3 {
        self.origin + t * self.direction
    }

    pub fn phase_at(&self, freq: Float, time: Float) -> Result<Float> {
        if freq <= ACCURACY_EPSILON {
            return Err(Error::InvalidGeometry(format!(
                "frequency must be > {}, got {}",
                ACCURACY_EPSILON, freq
            )));
        }
        if time <= ACCURACY_EPSILON {
            return Err(Error::InvalidGeometry(format!(
                "time must be > {}, got {}",
                ACCURACY_EPSILON, time
            )));
        }
        let wavelength_period = SOUND_SPEED / freq;
        Ok((time / wavelength_period) * (2.0 * PI as Float))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHitData {
    pub collision_point: Point3,
    pub direction: Vec3,
    pub normal: Vec3,
    pub time: Float,
    pub accumulated_time: Float,
    pub energy: Float,
    pub phase: Float,
    pub frequency: Float,
}

impl RayHitData {
    pub fn new(ray: &Ray, time: Float, normal: Vec3, frequency: Float) -> Result<Self> {
        let accumulated_time = ray.accumulated_time + time / SOUND_SPEED;
        let phase = ray.phase_at(frequency, accumulated_time)?;
        Ok(Self {
            collision_point: ray.at(time),
            direction: ray.direction,
            normal,
            time,
            accumulated_time,
            energy: ray.energy,
            phase,
            frequency,
        })
    }
}
