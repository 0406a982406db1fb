//! Grid snapping for player input.
//!
//! The drawing layer snaps every pointer position to the nearest grid point
//! before creating user vertices, so distinct snapped points sit a full grid
//! pitch apart and never fall under the repair merge threshold.

use nalgebra::Vector2;

use crate::cfg::GridFrame;

/// Round half away from zero, matching pointer snapping on both sides of the origin.
#[inline]
fn round_cell(v: f64) -> i64 {
    v.round() as i64
}

impl GridFrame {
    /// Grid cell nearest to display point `p`.
    #[inline]
    pub fn to_grid(&self, p: Vector2<f64>) -> (i64, i64) {
        let q = (p - self.offset) / self.scale;
        (round_cell(q.x), round_cell(q.y))
    }

    /// Display position of grid point `(gx, gy)`. Fractional coordinates are
    /// allowed for level content placed between grid lines.
    #[inline]
    pub fn to_display(&self, gx: f64, gy: f64) -> Vector2<f64> {
        self.offset + Vector2::new(gx, gy) * self.scale
    }

    /// Snap a display point to the nearest grid point.
    #[inline]
    pub fn snap(&self, p: Vector2<f64>) -> Vector2<f64> {
        let (gx, gy) = self.to_grid(p);
        self.to_display(gx as f64, gy as f64)
    }

    /// Whether `p` already sits on a grid point (within `eps` per axis).
    pub fn is_on_grid(&self, p: Vector2<f64>, eps: f64) -> bool {
        let s = self.snap(p);
        (s.x - p.x).abs() <= eps && (s.y - p.y).abs() <= eps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfg::MERGE_DIST;

    #[test]
    fn snaps_to_nearest_point() {
        let g = GridFrame::default();
        assert_eq!(g.snap(Vector2::new(100.0, 100.0)), Vector2::new(100.0, 100.0));
        assert_eq!(g.snap(Vector2::new(129.0, 71.0)), Vector2::new(100.0, 100.0));
        assert_eq!(g.snap(Vector2::new(131.0, 195.0)), Vector2::new(160.0, 220.0));
        // left of and above the origin
        assert_eq!(g.to_grid(Vector2::new(20.0, 45.0)), (-1, -1));
    }

    #[test]
    fn display_and_grid_agree() {
        let g = GridFrame::default();
        let p = g.to_display(3.0, 2.0);
        assert_eq!(p, Vector2::new(280.0, 220.0));
        assert_eq!(g.to_grid(p), (3, 2));
        assert!(g.is_on_grid(p, 1e-9));
        assert!(!g.is_on_grid(g.to_display(0.5, 3.0), 1e-9));
    }

    #[test]
    fn grid_pitch_exceeds_merge_threshold() {
        let g = GridFrame::default();
        assert!(g.scale > 2.0 * MERGE_DIST);
    }
}
