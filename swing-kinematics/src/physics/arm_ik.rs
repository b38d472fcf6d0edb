//! 2-Bone Analytical Inverse Kinematics Solver
//!
//! Law of cosines on the triangle (root, hinge, target). The target
//! distance is clamped into the reachable annulus, never rejected, so the
//! reconstruction stays continuous when the literal target is out of reach.

use std::f32::consts::PI;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::pose::Point;

use super::geometry::distance;

/// Angles of a solved 2-bone chain (radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IkAngles {
    /// Between the root→target line and the first bone
    pub alpha: f32,
    /// Interior angle at the hinge (elbow/knee)
    pub beta: f32,
}

/// Which of the two mirror-image solutions to realize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BendDirection {
    /// First bone rotated clockwise (screen space) from the root→target line
    Positive,
    Negative,
}

impl BendDirection {
    pub fn sign(self) -> f32 {
        match self {
            BendDirection::Positive => 1.0,
            BendDirection::Negative => -1.0,
        }
    }

    /// Pick the solution on the same side of root→target as `hint`
    pub fn towards(root: Point, target: Point, hint: Point) -> Self {
        let to_target = target.to_vector() - root.to_vector();
        let to_hint = hint.to_vector() - root.to_vector();
        let cross = to_target.x * to_hint.y - to_target.y * to_hint.x;

        // hint at bearing (base - alpha) gives a negative cross product
        if cross < 0.0 {
            BendDirection::Positive
        } else {
            BendDirection::Negative
        }
    }
}

/// Positions of a realized chain
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainPose {
    pub joint: Point,
    pub end: Point,
    pub angles: IkAngles,
    /// Absolute bearing of the first bone (radians)
    pub first_bone_angle: f32,
}

/// Solve the chain angles for bone lengths `l1`, `l2` and a target distance
///
/// Returns None for degenerate input (zero-length bones or target on the root).
pub fn solve(l1: f32, l2: f32, target_distance: f32) -> Option<IkAngles> {
    let dist = target_distance.max((l1 - l2).abs()).min(l1 + l2);

    let cos_beta = (l1 * l1 + l2 * l2 - dist * dist) / (2.0 * l1 * l2);
    let cos_alpha = (l1 * l1 + dist * dist - l2 * l2) / (2.0 * l1 * dist);

    if !cos_beta.is_finite() || !cos_alpha.is_finite() {
        return None;
    }

    Some(IkAngles {
        alpha: cos_alpha.clamp(-1.0, 1.0).acos(),
        beta: cos_beta.clamp(-1.0, 1.0).acos(),
    })
}

/// Realize joint and end-effector positions for a chain rooted at `root`
pub fn solve_chain(
    root: Point,
    target: Point,
    l1: f32,
    l2: f32,
    bend: BendDirection,
) -> Option<ChainPose> {
    let angles = solve(l1, l2, distance(root, target))?;
    let s = bend.sign();

    let base = (target.y - root.y).atan2(target.x - root.x);
    let theta1 = base - s * angles.alpha;
    let joint = root.to_vector() + Vector2::new(theta1.cos(), theta1.sin()) * l1;

    // Exterior deflection at the hinge is (PI - beta)
    let theta2 = theta1 + s * (PI - angles.beta);
    let end = joint + Vector2::new(theta2.cos(), theta2.sin()) * l2;

    Some(ChainPose {
        joint: joint.into(),
        end: end.into(),
        angles,
        first_bone_angle: theta1,
    })
}

/// Reconstructed arm posture for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IkResult {
    pub target: Point,
    pub shoulder: Point,
    pub elbow: Point,
    pub wrist: Point,
    pub shoulder_angle_deg: f32,
    pub elbow_angle_deg: f32,
    pub bend_direction: BendDirection,
}

/// 2-Bone IK solver for one arm
pub struct ArmIk {
    /// Upper arm length (shoulder to elbow)
    upper_arm: f32,
    /// Forearm length (elbow to wrist)
    forearm: f32,
}

impl ArmIk {
    pub fn new(upper_arm: f32, forearm: f32) -> Self {
        Self { upper_arm, forearm }
    }

    /// Take bone lengths from the measured landmarks of this frame
    pub fn from_landmarks(shoulder: Point, elbow: Point, wrist: Point) -> Self {
        Self::new(distance(shoulder, elbow), distance(elbow, wrist))
    }

    pub fn is_calibrated(&self) -> bool {
        self.upper_arm > 0.0 && self.forearm > 0.0
    }

    pub fn bend_towards(&self, shoulder: Point, target: Point, elbow_hint: Point) -> BendDirection {
        BendDirection::towards(shoulder, target, elbow_hint)
    }

    /// Solve the arm towards `target`, bending on the side of `elbow_hint`
    pub fn solve(&self, shoulder: Point, target: Point, elbow_hint: Point) -> Option<IkResult> {
        if !self.is_calibrated() {
            return None;
        }

        let bend = self.bend_towards(shoulder, target, elbow_hint);
        let pose = solve_chain(shoulder, target, self.upper_arm, self.forearm, bend)?;

        Some(IkResult {
            target,
            shoulder,
            elbow: pose.joint,
            wrist: pose.end,
            shoulder_angle_deg: pose.first_bone_angle.to_degrees(),
            elbow_angle_deg: pose.angles.beta.to_degrees(),
            bend_direction: bend,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point, b: Point, tol: f32) -> bool {
        distance(a, b) < tol
    }

    #[test]
    fn test_reachable_round_trip() {
        let angles = solve(100.0, 100.0, 150.0).unwrap();
        assert!(angles.alpha.is_finite() && angles.beta.is_finite());

        let root = Point::new(0.0, 0.0);
        let target = Point::new(150.0, 0.0);
        for bend in [BendDirection::Positive, BendDirection::Negative] {
            let pose = solve_chain(root, target, 100.0, 100.0, bend).unwrap();
            assert!(close(pose.end, target, 1e-3), "end {:?}", pose.end);
            assert!((distance(root, pose.joint) - 100.0).abs() < 1e-3);
            assert!((distance(pose.joint, pose.end) - 100.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_bend_direction_mirrors_joint() {
        let root = Point::new(0.0, 0.0);
        let target = Point::new(150.0, 0.0);
        let pos = solve_chain(root, target, 100.0, 100.0, BendDirection::Positive).unwrap();
        let neg = solve_chain(root, target, 100.0, 100.0, BendDirection::Negative).unwrap();
        assert!(pos.joint.y < 0.0);
        assert!(neg.joint.y > 0.0);
        assert!((pos.joint.x - neg.joint.x).abs() < 1e-3);
    }

    #[test]
    fn test_unreachable_target_is_clamped() {
        let root = Point::new(0.0, 0.0);
        let target = Point::new(500.0, 0.0);
        let pose = solve_chain(root, target, 100.0, 100.0, BendDirection::Positive).unwrap();
        // Fully extended along the target bearing
        assert!(close(pose.end, Point::new(200.0, 0.0), 1e-2));
        assert!(pose.angles.beta.to_degrees() > 179.0);
    }

    #[test]
    fn test_too_close_target_is_pushed_out() {
        let angles = solve(100.0, 40.0, 1.0).unwrap();
        // Clamped to |l1 - l2| = 60: the arm folds completely
        assert!(angles.beta.to_degrees() < 1.0);
    }

    #[test]
    fn test_degenerate_lengths() {
        assert!(solve(0.0, 100.0, 50.0).is_none());
        assert!(solve(0.0, 0.0, 0.0).is_none());
        assert!(!ArmIk::new(0.0, 10.0).is_calibrated());
    }

    #[test]
    fn test_arm_ik_reproduces_measured_elbow() {
        let shoulder = Point::new(200.0, 200.0);
        for elbow in [Point::new(260.0, 280.0), Point::new(280.0, 150.0)] {
            let wrist = Point::new(340.0, 220.0);
            let ik = ArmIk::from_landmarks(shoulder, elbow, wrist)
                .solve(shoulder, wrist, elbow)
                .unwrap();
            assert!(close(ik.elbow, elbow, 1e-2), "elbow {:?} vs {:?}", ik.elbow, elbow);
            assert!(close(ik.wrist, wrist, 1e-2), "wrist {:?} vs {:?}", ik.wrist, wrist);
        }
    }
}
