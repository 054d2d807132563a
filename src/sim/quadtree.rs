use eframe::egui::{Vec2, vec2};

const LEAF_CAPACITY: usize = 4;
const MAX_DEPTH: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Region {
    pub center: Vec2,
    pub half_extent: f32,
}

impl Region {
    pub fn around(center: Vec2, half_extent: f32) -> Self {
        Self {
            center,
            half_extent,
        }
    }

    fn from_points(points: &[Vec2]) -> Option<Self> {
        let mut min = vec2(f32::INFINITY, f32::INFINITY);
        let mut max = vec2(f32::NEG_INFINITY, f32::NEG_INFINITY);

        for point in points {
            min.x = min.x.min(point.x);
            min.y = min.y.min(point.y);
            max.x = max.x.max(point.x);
            max.y = max.y.max(point.y);
        }

        if !min.x.is_finite() || !min.y.is_finite() || !max.x.is_finite() || !max.y.is_finite() {
            return None;
        }

        let center = (min + max) * 0.5;
        let span = (max.x - min.x).max(max.y - min.y).max(1.0);
        Some(Self::around(center, (span * 0.5) + 1.0))
    }

    pub fn min(self) -> Vec2 {
        self.center - vec2(self.half_extent, self.half_extent)
    }

    pub fn max(self) -> Vec2 {
        self.center + vec2(self.half_extent, self.half_extent)
    }

    pub fn side_length(self) -> f32 {
        self.half_extent * 2.0
    }

    pub fn contains(self, point: Vec2) -> bool {
        let min = self.min();
        let max = self.max();
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }

    pub fn intersects(self, other: Self) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        !(a_min.x > b_max.x || a_max.x < b_min.x || a_min.y > b_max.y || a_max.y < b_min.y)
    }

    fn child(self, quadrant: usize) -> Self {
        let quarter = self.half_extent * 0.5;
        let offset = match quadrant {
            0 => vec2(-quarter, -quarter),
            1 => vec2(quarter, -quarter),
            2 => vec2(-quarter, quarter),
            _ => vec2(quarter, quarter),
        };
        Self::around(self.center + offset, quarter)
    }

    fn quadrant_for(self, point: Vec2) -> usize {
        let right = point.x >= self.center.x;
        let lower = point.y >= self.center.y;
        match (right, lower) {
            (false, false) => 0,
            (true, false) => 1,
            (false, true) => 2,
            (true, true) => 3,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visit {
    Descend,
    Skip,
}

/// Point-region index traversed top-down with caller-controlled pruning.
///
/// The visitor sees every region reached together with the point indices
/// stored directly at it, and decides whether its children are entered.
pub trait SpatialIndex {
    fn visit<F>(&self, visitor: F)
    where
        F: FnMut(Region, &[usize]) -> Visit;
}

pub struct QuadNode {
    pub bounds: Region,
    pub centroid: Vec2,
    pub count: usize,
    pub indices: Vec<usize>,
    pub children: [Option<Box<QuadNode>>; 4],
}

impl QuadNode {
    fn build_node(bounds: Region, indices: Vec<usize>, points: &[Vec2], depth: usize) -> Self {
        let mut centroid = Vec2::ZERO;
        for &index in &indices {
            centroid += points[index];
        }
        let count = indices.len();
        if count > 0 {
            centroid /= count as f32;
        }

        let mut node = Self {
            bounds,
            centroid,
            count,
            indices,
            children: std::array::from_fn(|_| None),
        };

        if depth >= MAX_DEPTH || node.indices.len() <= LEAF_CAPACITY {
            return node;
        }

        // Coincident points can never be split apart.
        let first = points[node.indices[0]];
        if node.indices.iter().all(|&index| points[index] == first) {
            return node;
        }

        let mut buckets = std::array::from_fn::<_, 4, _>(|_| Vec::new());
        for &index in &node.indices {
            buckets[bounds.quadrant_for(points[index])].push(index);
        }

        for (quadrant, bucket) in buckets.into_iter().enumerate() {
            if bucket.is_empty() {
                continue;
            }
            node.children[quadrant] = Some(Box::new(Self::build_node(
                bounds.child(quadrant),
                bucket,
                points,
                depth + 1,
            )));
        }
        node.indices.clear();
        node
    }

    pub fn is_leaf(&self) -> bool {
        self.children.iter().all(|child| child.is_none())
    }

    fn visit_with<F>(&self, visitor: &mut F)
    where
        F: FnMut(Region, &[usize]) -> Visit,
    {
        if visitor(self.bounds, &self.indices) == Visit::Skip {
            return;
        }
        for child in self.children.iter().flatten() {
            child.visit_with(visitor);
        }
    }
}

pub struct Quadtree {
    root: Option<QuadNode>,
}

impl Quadtree {
    pub fn build(points: &[Vec2]) -> Self {
        let root = Region::from_points(points)
            .map(|bounds| QuadNode::build_node(bounds, (0..points.len()).collect(), points, 0));
        Self { root }
    }

    pub fn root(&self) -> Option<&QuadNode> {
        self.root.as_ref()
    }
}

impl SpatialIndex for Quadtree {
    fn visit<F>(&self, mut visitor: F)
    where
        F: FnMut(Region, &[usize]) -> Visit,
    {
        if let Some(root) = &self.root {
            root.visit_with(&mut visitor);
        }
    }
}
