//! Solids (shape + color + material) and the scene's intersection resolver.

use crate::hittable::Hittable;
use crate::material::Material;
use rt_math::{Color, Interval, Mat4, Ray, Vec3, EPSILON};

/// A renderable primitive: a shape with its surface color and material.
#[derive(Debug)]
pub struct Solid {
    shape: Box<dyn Hittable>,
    pub color: Color,
    pub material: Material,
}

impl Solid {
    /// Create a new solid.
    pub fn new(shape: impl Hittable + 'static, color: Color, material: Material) -> Self {
        Self {
            shape: Box::new(shape),
            color,
            material,
        }
    }

    #[inline]
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        self.shape.intersect(ray)
    }

    #[inline]
    pub fn contains(&self, point: Vec3) -> bool {
        self.shape.contains(point)
    }

    #[inline]
    pub fn normal_at(&self, point: Vec3, ray_origin: Vec3) -> Vec3 {
        self.shape.normal_at(point, ray_origin)
    }

    pub fn transform(&mut self, matrix: &Mat4) {
        self.shape.transform(matrix);
    }
}

/// Handle returned when a solid is added to a [`SolidList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SolidId(usize);

/// Nearest intersection of a ray with the scene.
#[derive(Debug, Clone, Copy)]
pub struct Hit<'a> {
    /// Ray parameter of the intersection
    pub t: f32,
    /// Solid that was hit
    pub solid: &'a Solid,
}

/// Insertion-ordered collection of solids.
///
/// Resolves the closest hit of a ray by a linear scan and answers which
/// solid (if any) contains a point.
#[derive(Debug, Default)]
pub struct SolidList {
    solids: Vec<(SolidId, Solid)>,
    next_id: usize,
}

impl SolidList {
    /// Create a new empty solid list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a solid and return its handle.
    pub fn add(&mut self, solid: Solid) -> SolidId {
        let id = SolidId(self.next_id);
        self.next_id += 1;
        self.solids.push((id, solid));
        id
    }

    /// Remove a solid by handle, returning it if it was present.
    pub fn remove(&mut self, id: SolidId) -> Option<Solid> {
        let index = self.solids.iter().position(|(entry, _)| *entry == id)?;
        Some(self.solids.remove(index).1)
    }

    /// Get a solid by handle.
    pub fn get(&self, id: SolidId) -> Option<&Solid> {
        self.solids
            .iter()
            .find(|(entry, _)| *entry == id)
            .map(|(_, solid)| solid)
    }

    /// Iterate over solids in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Solid> {
        self.solids.iter().map(|(_, solid)| solid)
    }

    /// Get the number of solids.
    pub fn len(&self) -> usize {
        self.solids.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.solids.is_empty()
    }

    /// Closest hit strictly beyond [`EPSILON`]; ties keep the earlier solid.
    pub fn closest_intersection(&self, ray: &Ray) -> Option<Hit<'_>> {
        let ahead = Interval::new(EPSILON, f32::INFINITY);
        let mut closest: Option<Hit<'_>> = None;

        for solid in self.iter() {
            let Some(t) = solid.intersect(ray) else {
                continue;
            };
            if !ahead.surrounds(t) {
                continue;
            }
            if closest.map_or(true, |hit| t < hit.t) {
                closest = Some(Hit { t, solid });
            }
        }

        closest
    }

    /// The last solid (in insertion order) whose interior contains `point`.
    pub fn solid_containing(&self, point: Vec3) -> Option<&Solid> {
        self.iter().filter(|solid| solid.contains(point)).last()
    }
}
