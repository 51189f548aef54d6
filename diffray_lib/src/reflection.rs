use crate::error::Result;
use crate::geometry::RayHitData;
use crate::{Float, Ray, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReflectionEngine {
    Specular { absorption: Float },
    // reflects along four directions straddling the true specular direction instead of one;
    // a visualization aid, not the default
    FourSided { absorption: Float, spread: Float },
}

impl Default for ReflectionEngine {
    fn default() -> Self {
        Self::Specular { absorption: 0.0 }
    }
}

impl ReflectionEngine {
    pub fn reflect(&self, incident: &Ray, hit: &RayHitData) -> Result<Vec<Ray>> {
        match self {
            Self::Specular { absorption } => Ok(vec![specular_ray(incident, hit, *absorption)?]),
            Self::FourSided { absorption, spread } => {
                four_sided_rays(incident, hit, *absorption, *spread)
            }
        }
    }
}

fn reflect_direction(direction: Vec3, normal: Vec3) -> Vec3 {
    direction - 2.0 * direction.dot(normal) * normal
}

fn specular_ray(incident: &Ray, hit: &RayHitData, absorption: Float) -> Result<Ray> {
    let direction = reflect_direction(incident.direction, hit.normal);
    Ray::new(
        hit.collision_point,
        direction,
        incident.energy * (1.0 - absorption),
        hit.accumulated_time,
    )
}

fn tangent_basis(normal: Vec3) -> (Vec3, Vec3) {
    let helper = if normal.x.abs() < 0.9 {
        Vec3::new(1.0, 0.0, 0.0)
    } else {
        Vec3::new(0.0, 1.0, 0.0)
    };
    let u = normal.cross(helper).normalize();
    let v = normal.cross(u).normalize();
    (u, v)
}

fn four_sided_rays(
    incident: &Ray,
    hit: &RayHitData,
    absorption: Float,
    spread: Float,
) -> Result<Vec<Ray>> {
    let (u, v) = tangent_basis(hit.normal);
    let energy = incident.energy * (1.0 - absorption) / 4.0;
    let mut rays = Vec::with_capacity(4);
    for tangent in [u, -u, v, -v] {
        let tilted_normal = (hit.normal + tangent * spread.tan()).normalize();
        let direction = reflect_direction(incident.direction, tilted_normal);
        rays.push(Ray::new(
            hit.collision_point,
            direction,
            energy,
            hit.accumulated_time,
        )?);
    }
    Ok(rays)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants::ACCURACY_EPSILON;

    fn make_hit(normal: Vec3) -> (Ray, RayHitData) {
        let incident = Ray::new(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::new(0.0, 0.0, -1.0),
            10.0,
            0.0,
        )
        .unwrap();
        let hit = RayHitData::new(&incident, 5.0, normal, 1000.0).unwrap();
        (incident, hit)
    }

    #[test]
    fn specular_reflection_off_horizontal_plane_flips_z() {
        let (incident, hit) = make_hit(Vec3::new(0.0, 0.0, 1.0));
        let engine = ReflectionEngine::Specular { absorption: 0.0 };
        let children = engine.reflect(&incident, &hit).unwrap();
        assert_eq!(children.len(), 1);
        assert!((children[0].direction - Vec3::new(0.0, 0.0, 1.0)).length() < ACCURACY_EPSILON);
        assert!((children[0].energy - 10.0).abs() < 1e-6);
    }

    #[test]
    fn absorption_reduces_energy() {
        let (incident, hit) = make_hit(Vec3::new(0.0, 0.0, 1.0));
        let engine = ReflectionEngine::Specular { absorption: 0.25 };
        let children = engine.reflect(&incident, &hit).unwrap();
        assert!((children[0].energy - 7.5).abs() < 1e-6);
    }

    #[test]
    fn double_reflection_off_opposite_normals_restores_direction() {
        let (incident, hit) = make_hit(Vec3::new(0.0, 0.0, 1.0));
        let engine = ReflectionEngine::Specular { absorption: 0.0 };
        let once = engine.reflect(&incident, &hit).unwrap().remove(0);
        let hit_back = RayHitData::new(&once, 5.0, Vec3::new(0.0, 0.0, -1.0), 1000.0).unwrap();
        let twice = engine.reflect(&once, &hit_back).unwrap().remove(0);
        assert!((twice.direction - incident.direction).length() < ACCURACY_EPSILON);
    }

    #[test]
    fn four_sided_engine_conserves_total_energy() {
        let (incident, hit) = make_hit(Vec3::new(0.0, 0.0, 1.0));
        let engine = ReflectionEngine::FourSided {
            absorption: 0.0,
            spread: 0.1,
        };
        let children = engine.reflect(&incident, &hit).unwrap();
        assert_eq!(children.len(), 4);
        let total: Float = children.iter().map(|r| r.energy).sum();
        assert!((total - incident.energy).abs() < 1e-4);
    }
}
