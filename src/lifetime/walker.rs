//! Decay-chain end-point resolution.

use crate::graph::ParticleRef;
use crate::kinematics::Point3;

/// Walks a particle's descendants to find where its decay chain ends.
///
/// The walk is a pre-order traversal carrying a "recording" flag per frame,
/// starting armed:
///
/// - a node of the tracked species records its vertex and re-arms the flag;
/// - an armed node of another species records its vertex and disarms it;
/// - a disarmed node of another species records nothing.
///
/// Every daughter is visited regardless of the flag, and each inherits the
/// flag of its mother's frame. The last vertex recorded in traversal order is
/// the result, so when sibling branches both record, the branch visited last
/// decides.
pub struct DecayChainWalker;

impl DecayChainWalker {
    /// Returns the final vertex of `pdg_id`'s chain below (and including)
    /// `node`. Species are compared signed.
    pub fn final_position(node: ParticleRef<'_>, pdg_id: i32) -> Point3 {
        let mut position = node.vertex();
        let mut stack = vec![(node, true)];

        while let Some((current, inherited)) = stack.pop() {
            let mut armed = inherited;
            if current.pdg_id() == pdg_id {
                position = current.vertex();
                armed = true;
            } else if armed {
                position = current.vertex();
                armed = false;
            }

            // Reverse so the first daughter is popped first.
            stack.extend(current.daughters().rev().map(|d| (d, armed)));
        }

        position
    }
}
