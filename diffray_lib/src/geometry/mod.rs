mod ray;
mod sphere;
mod triangle;

pub use ray::{Ray, RayHitData};
pub use sphere::{EnergyCollector, Sphere};
pub use triangle::Triangle;

use crate::constants::ACCURACY_EPSILON;
use crate::{Float, Vec3};

#[inline]
pub fn vec3_close(a: Vec3, b: Vec3) -> bool {
    (a.x - b.x).abs() <= ACCURACY_EPSILON
        && (a.y - b.y).abs() <= ACCURACY_EPSILON
        && (a.z - b.z).abs() <= ACCURACY_EPSILON
}

#[inline]
pub fn is_unit(v: Vec3) -> bool {
    (v.length() - 1.0).abs() <= ACCURACY_EPSILON
}

#[inline]
pub fn float_close(a: Float, b: Float) -> bool {
    (a - b).abs() <= ACCURACY_EPSILON
}
