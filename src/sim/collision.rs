//! Collision detection between entity shapes
//!
//! All tests are approximate: entities collide by their bounding circle or
//! box, never by their drawn outline. Every test is strict, so shapes that
//! only touch do not overlap.

use glam::Vec2;

use super::entity::{Entities, Entity, EntityId};
use super::shape::Shape;

/// Check whether two shapes overlap. Symmetric in its arguments.
pub fn overlaps(a: &Shape, b: &Shape) -> bool {
    match (*a, *b) {
        (
            Shape::Circle {
                center: ca,
                radius: ra,
            },
            Shape::Circle {
                center: cb,
                radius: rb,
            },
        ) => circle_circle(ca, ra, cb, rb),
        (Shape::Circle { center, radius }, Shape::Rect { min, size })
        | (Shape::Rect { min, size }, Shape::Circle { center, radius }) => {
            circle_rect(center, radius, min, size)
        }
        (Shape::Rect { min: ma, size: sa }, Shape::Rect { min: mb, size: sb }) => {
            rect_rect(ma, sa, mb, sb)
        }
    }
}

/// Circles overlap when the distance between centers is below the sum of radii.
///
/// Compared squared, so coincident centers need no normalization.
#[inline]
pub fn circle_circle(ca: Vec2, ra: f32, cb: Vec2, rb: f32) -> bool {
    let reach = ra + rb;
    ca.distance_squared(cb) < reach * reach
}

/// Circle vs axis-aligned rectangle.
///
/// The rectangle's four sides must strictly straddle the circle's extremes:
/// circle right > rect left, bottom > top, left < right, top < bottom.
#[inline]
pub fn circle_rect(center: Vec2, radius: f32, min: Vec2, size: Vec2) -> bool {
    let max = min + size;
    center.x + radius > min.x
        && center.y + radius > min.y
        && center.x - radius < max.x
        && center.y - radius < max.y
}

/// Strict axis-aligned box overlap
#[inline]
pub fn rect_rect(min_a: Vec2, size_a: Vec2, min_b: Vec2, size_b: Vec2) -> bool {
    let max_a = min_a + size_a;
    let max_b = min_b + size_b;
    min_a.x < max_b.x && max_a.x > min_b.x && min_a.y < max_b.y && max_a.y > min_b.y
}

/// Pair up overlapping entities from two collections.
///
/// Scans `a` in order; each entity of `a` pairs with the first not-yet-taken
/// entity of `b` it overlaps. No entity appears in more than one pair, and
/// nothing is removed while scanning. Entities already marked dead are skipped.
pub fn first_hits<A: Entity, B: Entity>(a: &Entities<A>, b: &Entities<B>) -> Vec<(EntityId, EntityId)> {
    let targets: Vec<(EntityId, Shape)> = b.iter().map(|(id, e)| (id, e.bounds())).collect();
    let mut taken = vec![false; targets.len()];
    let mut hits = Vec::new();

    for (a_id, entity) in a.iter() {
        let shape = entity.bounds();
        let hit = targets
            .iter()
            .enumerate()
            .find(|(i, (_, target))| !taken[*i] && overlaps(&shape, target));
        if let Some((i, (b_id, _))) = hit {
            taken[i] = true;
            hits.push((a_id, *b_id));
        }
    }

    hits
}
