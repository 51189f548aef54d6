use crate::constants::{ACCURACY_EPSILON, AREA_EPSILON};
use crate::error::{Error, Result};
use crate::geometry::ray::Ray;
use crate::{Float, Point3, Vec3};

#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    v0: Point3,
    v1: Point3,
    v2: Point3,
    area: Float,
    normal: Vec3,
    centroid: Point3,
}

impl Triangle {
    pub fn new(v0: Point3, v1: Point3, v2: Point3) -> Result<Self> {
        let mut triangle = Self {
            v0,
            v1,
            v2,
            area: 0.0,
            normal: Vec3::ZERO,
            centroid: Vec3::ZERO,
        };
        triangle.refresh_attributes()?;
        Ok(triangle)
    }

    pub fn set_vertices(&mut self, v0: Point3, v1: Point3, v2: Point3) -> Result<()> {
        self.v0 = v0;
        self.v1 = v1;
        self.v2 = v2;
        self.refresh_attributes()
    }

    fn refresh_attributes(&mut self) -> Result<()> {
        let edge_a = self.v1 - self.v0;
        let edge_b = self.v2 - self.v0;
        let cross = edge_a.cross(edge_b);
        let area = cross.length() / 2.0;
        if area < ACCURACY_EPSILON {
            return Err(Error::InvalidGeometry(format!(
                "triangle area {} is below accuracy epsilon, vertices: {:?}, {:?}, {:?}",
                area, self.v0, self.v1, self.v2
            )));
        }
        self.area = area;
        self.normal = cross.normalize();
        self.centroid = (self.v0 + self.v1 + self.v2) / 3.0;
        Ok(())
    }

    pub fn vertices(&self) -> [Point3; 3] {
        [self.v0, self.v1, self.v2]
    }

    pub fn area(&self) -> Float {
        self.area
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn centroid(&self) -> Point3 {
        self.centroid
    }

    fn contains_point(&self, point: Point3) -> bool {
        let a = (self.v1 - point).cross(self.v2 - point).length() / 2.0;
        let b = (self.v2 - point).cross(self.v0 - point).length() / 2.0;
        let c = (self.v0 - point).cross(self.v1 - point).length() / 2.0;
        (a + b + c - self.area).abs() <= AREA_EPSILON
    }

    pub fn intersect(&self, ray: &Ray) -> Option<(Float, Vec3)> {
        let denom = ray.direction.dot(self.normal);
        if denom.abs() <= ACCURACY_EPSILON {
            return None;
        }
        let time = (self.v0 - ray.origin).dot(self.normal) / denom;
        if time < ACCURACY_EPSILON {
            return None;
        }
        let point = ray.at(time);
        if !self.contains_point(point) {
            return None;
        }
        Some((time, self.normal))
    }
}

impl PartialEq for Triangle {
    fn eq(&self, other: &Self) -> bool {
        let mine = self.vertices();
        let theirs = other.vertices();
        mine.iter().all(|v| theirs.contains(v)) && theirs.iter().all(|v| mine.contains(v))
    }
}
