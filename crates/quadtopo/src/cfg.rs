//! Engine configuration: merge threshold, active shape rule, and the display grid.

use std::fmt;
use std::str::FromStr;

use nalgebra::Vector2;

/// Per-axis merge threshold in display units (a quarter of the grid pitch).
pub const MERGE_DIST: f64 = 15.0;
/// Grid pitch in display units.
pub const GRID_SCALE: f64 = 60.0;
/// Display offset of grid point (0, 0).
pub const GRID_OFFSET: f64 = 100.0;

/// Face-shape rule a level asks for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ShapeRule {
    /// Every internal face has exactly 4 sides.
    #[default]
    QuadOnly,
    /// Every internal face has 3 or 4 sides, and at least one exists.
    TriOrQuad,
}

impl ShapeRule {
    /// Whether a face with `sides` sides satisfies this rule.
    #[inline]
    pub fn accepts(self, sides: usize) -> bool {
        match self {
            ShapeRule::QuadOnly => sides == 4,
            ShapeRule::TriOrQuad => (3..=4).contains(&sides),
        }
    }
}

impl fmt::Display for ShapeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeRule::QuadOnly => f.pad("quad"),
            ShapeRule::TriOrQuad => f.pad("tri-quad"),
        }
    }
}

/// Unknown shape rule name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseShapeRuleError(pub String);

impl fmt::Display for ParseShapeRuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown shape rule `{}` (expected `quad` or `tri-quad`)", self.0)
    }
}

impl std::error::Error for ParseShapeRuleError {}

impl FromStr for ShapeRule {
    type Err = ParseShapeRuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quad" | "quad-only" => Ok(ShapeRule::QuadOnly),
            "tri-quad" | "tri-or-quad" => Ok(ShapeRule::TriOrQuad),
            _ => Err(ParseShapeRuleError(s.to_string())),
        }
    }
}

/// Topology configuration for one check.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TopologyCfg {
    pub merge_dist: f64,
    pub rule: ShapeRule,
}

impl Default for TopologyCfg {
    fn default() -> Self {
        Self {
            merge_dist: MERGE_DIST,
            rule: ShapeRule::QuadOnly,
        }
    }
}

impl TopologyCfg {
    #[inline]
    pub fn with_rule(rule: ShapeRule) -> Self {
        Self {
            rule,
            ..Self::default()
        }
    }
}

/// Display frame of the puzzle grid: point `(gx, gy)` sits at `offset + scale * (gx, gy)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridFrame {
    pub scale: f64,
    pub offset: Vector2<f64>,
}

impl Default for GridFrame {
    fn default() -> Self {
        Self {
            scale: GRID_SCALE,
            offset: Vector2::new(GRID_OFFSET, GRID_OFFSET),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_round_trips_through_names() {
        for rule in [ShapeRule::QuadOnly, ShapeRule::TriOrQuad] {
            assert_eq!(rule.to_string().parse::<ShapeRule>().unwrap(), rule);
        }
        assert_eq!(" Tri-Or-Quad ".parse::<ShapeRule>().unwrap(), ShapeRule::TriOrQuad);
        assert!("hex".parse::<ShapeRule>().is_err());
    }

    #[test]
    fn rule_acceptance() {
        assert!(ShapeRule::QuadOnly.accepts(4));
        assert!(!ShapeRule::QuadOnly.accepts(3));
        assert!(ShapeRule::TriOrQuad.accepts(3));
        assert!(ShapeRule::TriOrQuad.accepts(4));
        assert!(!ShapeRule::TriOrQuad.accepts(5));
        assert!(!ShapeRule::TriOrQuad.accepts(2));
    }
}
