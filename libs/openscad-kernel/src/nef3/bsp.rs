//! # BSP Tree
//!
//! Binary Space Partitioning tree for solid boolean operations.
//! Based on the csg.js algorithm by Evan Wallace.
//!
//! ## Algorithm
//!
//! Each BSP node contains:
//! - A dividing plane
//! - Polygons coplanar with the plane
//! - Front subtree (polygons in front of plane)
//! - Back subtree (polygons behind plane)
//!
//! ## Stack Safety
//!
//! All traversals use explicit work stacks, so deep trees built from
//! finely tessellated solids cannot overflow the call stack.

use super::plane::Plane;
use super::polygon::{Polygon, Split};

/// A node in the BSP tree.
#[derive(Debug, Default)]
pub(crate) struct BspNode {
    /// Dividing plane; `None` only for an empty tree
    plane: Option<Plane>,
    /// Polygons coplanar with this node's plane
    polygons: Vec<Polygon>,
    /// Front subtree (polygons in front of plane)
    front: Option<Box<BspNode>>,
    /// Back subtree (polygons behind plane)
    back: Option<Box<BspNode>>,
}

impl BspNode {
    /// Creates a new BSP tree from polygons.
    ///
    /// The last polygon of each work list becomes the splitter of its node.
    pub fn new(polygons: Vec<Polygon>) -> Self {
        let mut root = Self::default();
        {
            let mut stack: Vec<(&mut BspNode, Vec<Polygon>)> = vec![(&mut root, polygons)];

            while let Some((node, mut polygons)) = stack.pop() {
                let Some(splitter) = polygons.pop() else {
                    continue;
                };
                let plane = *splitter.plane();
                node.plane = Some(plane);
                node.polygons.push(splitter);

                let estimated_size = polygons.len() / 2 + 1;
                let mut front_polys = Vec::with_capacity(estimated_size);
                let mut back_polys = Vec::with_capacity(estimated_size);

                for polygon in polygons {
                    match polygon.split(&plane) {
                        Split::CoplanarFront(p) | Split::CoplanarBack(p) => node.polygons.push(p),
                        Split::Front(p) => front_polys.push(p),
                        Split::Back(p) => back_polys.push(p),
                        Split::Spanning { front, back } => {
                            front_polys.extend(front);
                            back_polys.extend(back);
                        }
                    }
                }

                let BspNode { front, back, .. } = node;
                if !front_polys.is_empty() {
                    stack.push((front.insert(Box::default()).as_mut(), front_polys));
                }
                if !back_polys.is_empty() {
                    stack.push((back.insert(Box::default()).as_mut(), back_polys));
                }
            }
        }
        root
    }

    /// Flips every polygon and plane and swaps the subtrees, turning the
    /// tree into its complement.
    pub fn invert(&mut self) {
        let mut stack: Vec<&mut BspNode> = vec![self];

        while let Some(node) = stack.pop() {
            for polygon in &mut node.polygons {
                polygon.flip();
            }
            node.plane = node.plane.map(|plane| plane.flip());
            std::mem::swap(&mut node.front, &mut node.back);

            let BspNode { front, back, .. } = node;
            if let Some(front) = front {
                stack.push(front.as_mut());
            }
            if let Some(back) = back {
                stack.push(back.as_mut());
            }
        }
    }

    /// Removes the parts of `polygons` that lie inside this tree's solid.
    pub fn clip_polygons(&self, polygons: Vec<Polygon>) -> Vec<Polygon> {
        let mut result = Vec::new();
        let mut stack: Vec<(&BspNode, Vec<Polygon>)> = vec![(self, polygons)];

        while let Some((node, polygons)) = stack.pop() {
            if polygons.is_empty() {
                continue;
            }
            let Some(plane) = node.plane else {
                result.extend(polygons);
                continue;
            };

            let mut front_polys = Vec::new();
            let mut back_polys = Vec::new();
            for polygon in polygons {
                match polygon.split(&plane) {
                    Split::CoplanarFront(p) | Split::Front(p) => front_polys.push(p),
                    Split::CoplanarBack(p) | Split::Back(p) => back_polys.push(p),
                    Split::Spanning { front, back } => {
                        front_polys.extend(front);
                        back_polys.extend(back);
                    }
                }
            }

            match &node.front {
                Some(front) => stack.push((front.as_ref(), front_polys)),
                None => result.extend(front_polys),
            }
            // Without a back subtree the back side is solid
            if let Some(back) = &node.back {
                stack.push((back.as_ref(), back_polys));
            }
        }

        result
    }

    /// Clips this tree's polygons to another tree.
    pub fn clip_to(&mut self, other: &BspNode) {
        let mut stack: Vec<&mut BspNode> = vec![self];

        while let Some(node) = stack.pop() {
            node.polygons = other.clip_polygons(std::mem::take(&mut node.polygons));

            let BspNode { front, back, .. } = node;
            if let Some(front) = front {
                stack.push(front.as_mut());
            }
            if let Some(back) = back {
                stack.push(back.as_mut());
            }
        }
    }

    /// Collects all polygons from this tree.
    pub fn all_polygons(&self) -> Vec<Polygon> {
        let mut result = Vec::new();
        let mut stack: Vec<&BspNode> = vec![self];

        while let Some(node) = stack.pop() {
            result.extend(node.polygons.iter().cloned());

            if let Some(front) = &node.front {
                stack.push(front.as_ref());
            }
            if let Some(back) = &node.back {
                stack.push(back.as_ref());
            }
        }

        result
    }
}

impl Drop for BspNode {
    fn drop(&mut self) {
        // Detach children first so dropping a deep tree does not recurse
        let mut stack = Vec::new();
        stack.extend(self.front.take());
        stack.extend(self.back.take());

        while let Some(mut node) = stack.pop() {
            stack.extend(node.front.take());
            stack.extend(node.back.take());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    fn triangle(z: f64) -> Polygon {
        Polygon::new(vec![
            DVec3::new(0.0, 0.0, z),
            DVec3::new(1.0, 0.0, z),
            DVec3::new(0.0, 1.0, z),
        ])
        .unwrap()
    }

    #[test]
    fn test_new_empty() {
        let tree = BspNode::new(vec![]);
        assert!(tree.plane.is_none());
        assert!(tree.all_polygons().is_empty());
    }

    #[test]
    fn test_new_keeps_all_polygons() {
        let tree = BspNode::new(vec![triangle(0.0), triangle(1.0), triangle(-1.0)]);
        assert_eq!(tree.all_polygons().len(), 3);
    }

    #[test]
    fn test_invert_flips_normals() {
        let mut tree = BspNode::new(vec![triangle(0.0)]);
        tree.invert();
        let polygons = tree.all_polygons();
        assert!(polygons[0].plane().normal().z < 0.0);
        assert!(tree.plane.is_some_and(|p| p.normal().z < 0.0));
    }

    #[test]
    fn test_clip_keeps_front() {
        let tree = BspNode::new(vec![triangle(0.0)]);
        assert_eq!(tree.clip_polygons(vec![triangle(1.0)]).len(), 1);
    }

    #[test]
    fn test_clip_drops_back() {
        let tree = BspNode::new(vec![triangle(0.0)]);
        assert!(tree.clip_polygons(vec![triangle(-1.0)]).is_empty());
    }

    #[test]
    fn test_clip_with_empty_tree_keeps_everything() {
        let tree = BspNode::new(vec![]);
        assert_eq!(tree.clip_polygons(vec![triangle(-1.0), triangle(1.0)]).len(), 2);
    }
}
