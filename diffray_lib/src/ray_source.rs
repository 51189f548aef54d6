use crate::constants::{DEFAULT_SOURCE_HEIGHT, RAY_SOURCE_MARGIN_FACTOR};
use crate::error::{Error, Result};
use crate::mesh::Mesh;
use crate::{Float, Point3, Ray, Vec3};

#[derive(Debug, Clone)]
pub struct RaySource {
    origin: Point3,
    height: Float,
    side: Float,
    n: usize,
    source_power: Float,
    next_index: usize,
}

impl RaySource {
    pub fn new(mesh: &Mesh, n: usize, source_power: Float) -> Result<Self> {
        if n < 1 {
            return Err(Error::InvalidConfiguration(format!(
                "numRaysSquared must be >= 1, got {}",
                n
            )));
        }
        if mesh.is_empty() {
            return Err(Error::InvalidConfiguration(
                "ray source requires a non-empty mesh to know its height".to_string(),
            ));
        }
        let height = mesh.height().max(DEFAULT_SOURCE_HEIGHT);
        let side = mesh.side_size() * RAY_SOURCE_MARGIN_FACTOR;
        Ok(Self {
            origin: Vec3::new(0.0, 0.0, height),
            height,
            side,
            n,
            source_power,
            next_index: 0,
        })
    }

    pub fn total_rays(&self) -> usize {
        self.n * self.n
    }

    fn ray_at(&self, i: usize, j: usize) -> Ray {
        let (offset_i, offset_j) = if self.n == 1 {
            (0.0, 0.0)
        } else {
            (
                i as Float / (self.n - 1) as Float - 0.5,
                j as Float / (self.n - 1) as Float - 0.5,
            )
        };
        let vertical_down = Vec3::new(0.0, 0.0, -1.0);
        let target: Point3 = self.origin
            + vertical_down * self.height
            + Vec3::new(offset_i * self.side, offset_j * self.side, 0.0);
        let direction = target - self.origin;
        let energy = self.source_power / self.total_rays() as Float;
        Ray::new(self.origin, direction, energy, 0.0)
            .expect("ray source direction is never zero: origin and target always differ in z")
    }
}

impl Iterator for RaySource {
    type Item = Ray;

    fn next(&mut self) -> Option<Ray> {
        if self.next_index >= self.total_rays() {
            return None;
        }
        // Row-major over (j, i): j is the outer (slower-varying) index.
        let i = self.next_index % self.n;
        let j = self.next_index / self.n;
        self.next_index += 1;
        Some(self.ray_at(i, j))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total_rays() - self.next_index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RaySource {}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants::ACCURACY_EPSILON;

    #[test]
    fn rejects_zero_rays() {
        let mesh = Mesh::reference_plate(1.0).unwrap();
        assert!(matches!(
            RaySource::new(&mesh, 0, 1.0),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn rejects_empty_mesh() {
        let mesh = Mesh::default();
        assert!(matches!(
            RaySource::new(&mesh, 4, 1.0),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn yields_exactly_n_squared_rays() {
        let mesh = Mesh::reference_plate(1.0).unwrap();
        let source = RaySource::new(&mesh, 5, 100.0).unwrap();
        assert_eq!(source.total_rays(), 25);
        assert_eq!(source.count(), 25);
    }

    #[test]
    fn single_ray_points_straight_down() {
        let mesh = Mesh::reference_plate(1.0).unwrap();
        let mut source = RaySource::new(&mesh, 1, 10.0).unwrap();
        let ray = source.next().unwrap();
        assert!((ray.direction - Vec3::new(0.0, 0.0, -1.0)).length() < ACCURACY_EPSILON);
        assert!(source.next().is_none());
    }

    #[test]
    fn energy_is_split_evenly() {
        let mesh = Mesh::reference_plate(1.0).unwrap();
        let source = RaySource::new(&mesh, 4, 160.0).unwrap();
        for ray in source {
            assert!((ray.energy - 10.0).abs() < 1e-5);
        }
    }

    #[test]
    fn grid_is_centered_on_the_model() {
        let mesh = Mesh::reference_plate(1.0).unwrap();
        let source = RaySource::new(&mesh, 2, 4.0).unwrap();
        let rays: Vec<Ray> = source.collect();
        assert_eq!(rays.len(), 4);
        let mean_x: Float = rays.iter().map(|r| r.direction.x).sum::<Float>() / 4.0;
        let mean_y: Float = rays.iter().map(|r| r.direction.y).sum::<Float>() / 4.0;
        assert!(mean_x.abs() < 1e-5);
        assert!(mean_y.abs() < 1e-5);
    }
}
