//! Spatial index with aggregated barycenters.
//!
//! Flat, index-addressed tree: nodes and their barycenters live in parallel
//! contiguous arrays, children are referenced by `usize` index with a
//! [`NO_CHILDREN`] sentinel. No pointers, no cyclic ownership, and rebuilding
//! from scratch every iteration stays cheap. The tree is a read-only snapshot
//! once built; it is never updated incrementally.

use crate::geom::{BoundingBox, Position, Vector};
use crate::point::Point;

/// Sentinel child index marking an absent quadrant.
pub const NO_CHILDREN: usize = usize::MAX;

/// Subdivision stops at this depth even when coincident points keep a
/// quadrant crowded; such a leaf aggregates its points directly.
const MAX_DEPTH: usize = 20;

#[derive(Debug, Clone, Copy)]
pub struct QuadtreeNode {
    pub children: [usize; 4],
}

/// Mass-weighted aggregate of everything under one tree node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Barycenter {
    pub position: Position,
    pub mass: f64,
}

#[derive(Debug, Clone)]
pub struct Quadtree {
    bounding_box: BoundingBox,
    nodes: Vec<QuadtreeNode>,
    barycenters: Vec<Barycenter>,
}

impl Quadtree {
    /// Builds the tree over a snapshot of points. The bounding box is the
    /// tight axis-aligned box of all positions, so it contains every indexed
    /// point by construction.
    pub fn build(points: &[Point]) -> Self {
        let bounding_box = BoundingBox::from_points(points.iter().map(|p| p.position()));
        let mut tree = Self {
            bounding_box,
            nodes: Vec::new(),
            barycenters: Vec::new(),
        };
        if !points.is_empty() {
            let all: Vec<usize> = (0..points.len()).collect();
            tree.split(points, all, bounding_box, 0);
        }
        tree
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.bounding_box
    }

    /// Index of the root node; only meaningful on a non-empty tree.
    pub fn root(&self) -> usize {
        0
    }

    /// Width handed to the root of a traversal: the larger side of the
    /// bounding box, halved at every descent.
    pub fn root_width(&self) -> f64 {
        self.bounding_box.width().max(self.bounding_box.height())
    }

    pub fn barycenter(&self, node: usize) -> Option<&Barycenter> {
        self.barycenters.get(node)
    }

    pub fn root_barycenter(&self) -> Option<&Barycenter> {
        self.barycenters.first()
    }

    /// Collects the interaction sources a query point sees: whole subtrees
    /// collapsed to their barycenter when far enough away, individual points
    /// otherwise.
    ///
    /// A subtree is used as a single source when `node_width < theta *
    /// distance`, or when its barycenter still carries [`Point::DEFAULT_MASS`]
    /// (an unaggregated single real point, where descending has nothing finer
    /// to offer). `theta == 0` therefore degenerates to a full descent and
    /// still terminates at the leaves.
    pub fn collect_interaction_list(
        &self,
        node: usize,
        query: Position,
        node_width: f64,
        theta: f64,
        out: &mut Vec<Barycenter>,
    ) {
        let Some(&barycenter) = self.barycenters.get(node) else {
            return;
        };

        let distance = (query - barycenter.position).length();
        if node_width < theta * distance || barycenter.mass == Point::DEFAULT_MASS {
            out.push(barycenter);
            return;
        }

        let mut descended = false;
        for &child in &self.nodes[node].children {
            if child == NO_CHILDREN {
                continue;
            }
            descended = true;
            self.collect_interaction_list(child, query, node_width / 2.0, theta, out);
        }

        // Leaves whose point mass was explicitly assigned fail the sentinel
        // test above and land here: the node itself is the source.
        if !descended {
            out.push(barycenter);
        }
    }

    /// Interaction sources for `query` from the root, with the root width.
    pub fn interaction_list(&self, query: Position, theta: f64) -> Vec<Barycenter> {
        let mut out = Vec::new();
        if !self.is_empty() {
            self.collect_interaction_list(self.root(), query, self.root_width(), theta, &mut out);
        }
        out
    }

    fn split(
        &mut self,
        points: &[Point],
        contained: Vec<usize>,
        quad: BoundingBox,
        depth: usize,
    ) -> usize {
        let node_ix = self.nodes.len();
        self.nodes.push(QuadtreeNode {
            children: [NO_CHILDREN; 4],
        });
        self.barycenters.push(Barycenter {
            position: quad.center(),
            mass: Point::DEFAULT_MASS,
        });

        if contained.len() == 1 {
            let point = &points[contained[0]];
            self.barycenters[node_ix] = Barycenter {
                position: point.position(),
                mass: point.mass(),
            };
            return node_ix;
        }

        if depth >= MAX_DEPTH {
            let aggregated = aggregate(contained.iter().map(|&ix| {
                let p = &points[ix];
                (p.position(), p.mass())
            }));
            if let Some(barycenter) = aggregated {
                self.barycenters[node_ix] = barycenter;
            }
            return node_ix;
        }

        let center = quad.center();
        let mut buckets: [Vec<usize>; 4] = [Vec::new(), Vec::new(), Vec::new(), Vec::new()];
        for ix in contained {
            let position = points[ix].position();
            // Bit 0: east of center, bit 1: south of center. Boundary points
            // deterministically take the greater quadrant.
            let quadrant =
                (position.x >= center.x) as usize | (((position.y >= center.y) as usize) << 1);
            buckets[quadrant].push(ix);
        }

        let sub_boxes = subdivide(quad);
        let mut children = [NO_CHILDREN; 4];
        for (quadrant, bucket) in buckets.into_iter().enumerate() {
            if bucket.is_empty() {
                continue;
            }
            children[quadrant] = self.split(points, bucket, sub_boxes[quadrant], depth + 1);
        }
        self.nodes[node_ix].children = children;

        let aggregated = aggregate(children.iter().filter(|&&c| c != NO_CHILDREN).map(|&c| {
            let b = self.barycenters[c];
            (b.position, b.mass)
        }));
        if let Some(barycenter) = aggregated {
            self.barycenters[node_ix] = barycenter;
        }

        node_ix
    }
}

/// Mass-weighted aggregate of `(position, mass)` pairs; `None` on an empty
/// input, and the plain positional average when the masses sum to zero.
fn aggregate(parts: impl Iterator<Item = (Position, f64)>) -> Option<Barycenter> {
    let mut mass = 0.0;
    let mut weighted = Vector::zero();
    let mut unweighted = Vector::zero();
    let mut count: usize = 0;

    for (position, part_mass) in parts {
        mass += part_mass;
        weighted += position.to_vector() * part_mass;
        unweighted += position.to_vector();
        count += 1;
    }

    if count == 0 {
        return None;
    }
    let position = if mass > 0.0 {
        Position::origin() + weighted / mass
    } else {
        Position::origin() + unweighted / count as f64
    };
    Some(Barycenter { position, mass })
}

fn subdivide(quad: BoundingBox) -> [BoundingBox; 4] {
    let center = quad.center();
    [
        BoundingBox::new(quad.min, center),
        BoundingBox::new(
            crate::geom::position(center.x, quad.min.y),
            crate::geom::position(quad.max.x, center.y),
        ),
        BoundingBox::new(
            crate::geom::position(quad.min.x, center.y),
            crate::geom::position(center.x, quad.max.y),
        ),
        BoundingBox::new(center, quad.max),
    ]
}
