//! Line direction resolution.
//!
//! Walks each line's nodes pairwise and tags every node with the bearing of the line's tangent
//! at that node. Consecutive nodes are either on a straight run (the step is parallel to the
//! incoming bearing) or joined by a single 45-degree corner whose step is the sum of the
//! incoming and outgoing grid vectors.

use crate::bearing::Bearing;
use crate::geom::{Point, Vector, apply, parallel};
use crate::model::{LineDef, NodeDef};
use crate::{Error, Result};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedNode {
    pub bearing: Bearing,
    #[serde(flatten)]
    pub node: NodeDef,
}

impl ResolvedNode {
    pub fn point(&self) -> Point {
        self.node.point()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedLine {
    pub name: String,
    pub label: Option<String>,
    pub color: String,
    pub shift_coords: Vector,
    pub shift_normal: f64,
    pub highlighted: bool,
    pub nodes: Vec<ResolvedNode>,
    /// Station keys in the order the line visits them.
    pub stations: Vec<String>,
}

/// JS-style `Math.round` (ties towards +inf), so `-0.5` snaps to `0` rather than `-1`.
fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

fn grid_step(prev: &NodeDef, curr: &NodeDef) -> Vector {
    apply(|i| round_half_up(curr.coords[i]) - round_half_up(prev.coords[i]))
}

fn is_corner_step(step: Vector) -> bool {
    // `step` is a difference of rounded coordinates, so the casts are exact.
    matches!(
        (step.x.abs() as i64, step.y.abs() as i64),
        (1, 1) | (1, 2) | (2, 1)
    )
}

/// Returns one bearing per node of `line`.
pub fn line_bearings(line: &LineDef) -> Result<Vec<Bearing>> {
    if line.nodes.len() < 2 {
        return Err(Error::TooFewNodes {
            line: line.name.clone(),
            count: line.nodes.len(),
        });
    }

    let mut bearings: Vec<Bearing> = Vec::with_capacity(line.nodes.len());
    for (idx, pair) in line.nodes.windows(2).enumerate() {
        let (prev, curr) = (&pair[0], &pair[1]);
        let step = grid_step(prev, curr);

        if step.x == 0.0 && step.y == 0.0 {
            return Err(Error::RepeatedCoordinates {
                line: line.name.clone(),
                x: curr.coords[0],
                y: curr.coords[1],
            });
        }

        // The first segment is assumed straight unless the node says otherwise.
        if idx == 0 {
            let initial = match prev.dir {
                Some(b) => b,
                None => Bearing::from_vector(step)?,
            };
            bearings.push(initial);
        }

        let prev_bearing = bearings[idx];
        let prev_vector = prev_bearing.vector();

        let next = if parallel(prev_vector, step) {
            Bearing::from_vector(step)?
        } else {
            if !is_corner_step(step) {
                return Err(Error::UnrealizableCorner {
                    line: line.name.clone(),
                    from: (prev.coords[0], prev.coords[1]),
                    to: (curr.coords[0], curr.coords[1]),
                });
            }
            let next = Bearing::from_vector(step - prev_vector)?;
            tracing::trace!(
                line = %line.name,
                node = idx + 1,
                from = %prev_bearing,
                to = %next,
                "corner"
            );
            next
        };

        match curr.dir {
            Some(found) if found != next => {
                return Err(Error::DirectionDiscontinuity {
                    line: line.name.clone(),
                    x: curr.coords[0],
                    y: curr.coords[1],
                    expected: next,
                    found,
                });
            }
            _ => {}
        }

        bearings.push(next);
    }

    Ok(bearings)
}

/// Produces a bearing-tagged copy of `line`; the input is left untouched.
pub fn resolve_line(line: &LineDef) -> Result<ResolvedLine> {
    let bearings = line_bearings(line)?;
    let nodes: Vec<ResolvedNode> = bearings
        .into_iter()
        .zip(&line.nodes)
        .map(|(bearing, node)| ResolvedNode {
            bearing,
            node: node.clone(),
        })
        .collect();
    let stations = line
        .nodes
        .iter()
        .filter_map(|n| n.name.clone())
        .collect::<Vec<_>>();

    tracing::debug!(
        line = %line.name,
        nodes = nodes.len(),
        stations = stations.len(),
        "resolved line directions"
    );

    Ok(ResolvedLine {
        name: line.name.clone(),
        label: line.label.clone(),
        color: line.color.clone(),
        shift_coords: line.shift(),
        shift_normal: line.shift_normal,
        highlighted: line.highlighted,
        nodes,
        stations,
    })
}

impl ResolvedLine {
    pub fn bearings(&self) -> impl Iterator<Item = Bearing> + '_ {
        self.nodes.iter().map(|n| n.bearing)
    }

    /// Unit tangent at node `idx`.
    pub fn tangent(&self, idx: usize) -> Option<Vector> {
        self.nodes.get(idx).map(|n| n.bearing.unit_vector())
    }

    pub fn grid_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.nodes.iter().map(ResolvedNode::point)
    }
}
