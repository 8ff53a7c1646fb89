//! Enemy path geometry.

use glam::Vec2;

use drift_core::types::Position;

/// Ordered waypoints plus the world size they were authored for.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    reference: Vec<Position>,
    reference_size: (f32, f32),
    waypoints: Vec<Position>,
    size: (f32, f32),
}

impl Path {
    pub fn new(waypoints: Vec<Position>, width: f32, height: f32) -> Self {
        Self {
            reference: waypoints.clone(),
            reference_size: (width, height),
            waypoints,
            size: (width, height),
        }
    }

    pub fn waypoints(&self) -> &[Position] {
        &self.waypoints
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Position> {
        self.waypoints.get(index).copied()
    }

    pub fn width(&self) -> f32 {
        self.size.0
    }

    pub fn height(&self) -> f32 {
        self.size.1
    }

    /// Rescale every waypoint proportionally from the authored geometry.
    /// Non-positive sizes are ignored.
    pub fn rescale(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        let sx = width / self.reference_size.0;
        let sy = height / self.reference_size.1;
        self.waypoints = self
            .reference
            .iter()
            .map(|p| Position::new(p.x * sx, p.y * sy))
            .collect();
        self.size = (width, height);
    }

    /// Minimum distance from `point` to any path segment.
    pub fn distance_to(&self, point: Position) -> f32 {
        match self.waypoints.as_slice() {
            [] => f32::INFINITY,
            [only] => only.distance_to(&point),
            segments => segments
                .windows(2)
                .map(|w| segment_distance(point.to_vec2(), w[0].to_vec2(), w[1].to_vec2()))
                .fold(f32::INFINITY, f32::min),
        }
    }
}

fn segment_distance(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use drift_core::config::default_path;

    fn sample() -> Path {
        Path::new(default_path(), 800.0, 600.0)
    }

    #[test]
    fn distance_to_segment_interior() {
        let path = sample();
        // Directly above the first horizontal segment.
        assert!((path.distance_to(Position::new(75.0, 250.0)) - 50.0).abs() < 1e-4);
    }

    #[test]
    fn distance_to_endpoint() {
        let path = Path::new(
            vec![Position::new(0.0, 0.0), Position::new(10.0, 0.0)],
            100.0,
            100.0,
        );
        assert!((path.distance_to(Position::new(13.0, 4.0)) - 5.0).abs() < 1e-4);
    }

    #[test]
    fn rescale_is_proportional_and_repeatable() {
        let mut path = sample();
        path.rescale(1600.0, 300.0);
        assert_eq!(path.get(1), Some(Position::new(300.0, 150.0)));
        path.rescale(800.0, 600.0);
        assert_eq!(path, sample());
    }

    #[test]
    fn rescale_ignores_degenerate_size() {
        let mut path = sample();
        path.rescale(0.0, 600.0);
        assert_eq!(path, sample());
    }
}
