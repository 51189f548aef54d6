use crate::error::Result;
use crate::geometry::{RayHitData, Triangle};
use crate::{Float, Ray, Vec3};

#[derive(Debug, Clone, Default)]
pub struct Mesh {
    triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn from_triangles(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn height(&self) -> Float {
        self.extent(|v| v.z)
    }

    pub fn side_size(&self) -> Float {
        self.extent(|v| v.x).max(self.extent(|v| v.y))
    }

    fn extent(&self, component: impl Fn(Vec3) -> Float) -> Float {
        let mut min = Float::INFINITY;
        let mut max = Float::NEG_INFINITY;
        for triangle in &self.triangles {
            for vertex in triangle.vertices() {
                let c = component(vertex);
                min = min.min(c);
                max = max.max(c);
            }
        }
        if self.triangles.is_empty() {
            0.0
        } else {
            max - min
        }
    }

    pub fn reference_plate(side: Float) -> Result<Self> {
        let half = side / 2.0;
        let a = Vec3::new(-half, -half, 0.0);
        let b = Vec3::new(half, -half, 0.0);
        let c = Vec3::new(half, half, 0.0);
        let d = Vec3::new(-half, half, 0.0);
        let t1 = Triangle::new(a, b, c)?;
        let t2 = Triangle::new(a, c, d)?;
        Ok(Self::from_triangles(vec![t1, t2]))
    }

    pub fn nearest_hit(&self, ray: &Ray, frequency: Float) -> Option<RayHitData> {
        let mut nearest: Option<(Float, Vec3)> = None;
        for triangle in &self.triangles {
            if let Some((time, normal)) = triangle.intersect(ray) {
                if nearest.map_or(true, |(best, _)| time < best) {
                    nearest = Some((time, normal));
                }
            }
        }
        nearest.and_then(|(time, normal)| RayHitData::new(ray, time, normal, frequency).ok())
    }
}
