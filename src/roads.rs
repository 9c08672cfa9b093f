use crate::{
    graph::longest_path_to_point_in_tree,
    grid::{CellType, Grid, GridPos},
};

use fnv::FnvHashSet;
use petgraph::{
    algo::{astar, dijkstra, min_spanning_tree},
    data::FromElements,
    graph::NodeIndex,
    stable_graph::StableGraph,
    visit::{EdgeRef, IntoEdgeReferences},
    Directed, Undirected,
};
use std::collections::HashMap;

/// Moving along an existing road is cheaper than opening a new one.
const ROAD_STEP_COST: u32 = 1;
const OPEN_STEP_COST: u32 = 2;

/// A neighbor counts as an exit if it is off the grid, open ground or road.
pub fn any_empty_cell_around(grid: &Grid, door: GridPos) -> bool {
    door.neighbors()
        .iter()
        .any(|n| grid.get(*n).map_or(true, CellType::is_none_or_road))
}

/// Drops doors without an exit. Returns how many were removed.
pub fn prune_doors(grid: &Grid, doors: &mut Vec<GridPos>) -> usize {
    let before = doors.len();
    doors.retain(|d| any_empty_cell_around(grid, *d));

    before - doors.len()
}

/// Outcome of [`carve_roads`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RoadNetwork {
    /// Doors linked to another door or to the grid edge.
    pub connected: Vec<GridPos>,
    /// Doors walled in with nowhere to route a road.
    pub disconnected: Vec<GridPos>,
    /// Number of empty cells converted to road.
    pub carved: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum RoadNode {
    Cell(GridPos),
    // Doors are split so a path can start or end at a door but never pass through one.
    DoorOut(usize),
    DoorIn(usize),
    Boundary,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Anchor {
    Door(GridPos),
    Boundary,
}

fn entry_cost(cell_type: CellType) -> u32 {
    if cell_type.is_road() {
        ROAD_STEP_COST
    } else {
        OPEN_STEP_COST
    }
}

struct CellGraph {
    graph: StableGraph<RoadNode, u32, Directed>,
    door_out: Vec<NodeIndex>,
    door_in: Vec<NodeIndex>,
    boundary: NodeIndex,
}

impl CellGraph {
    fn build(grid: &Grid, doors: &[GridPos]) -> Self {
        let mut graph = StableGraph::<RoadNode, u32, Directed>::default();

        let mut cell_nodes = vec![None; grid.width() * grid.height()];
        for cell in grid.cells().filter(|c| c.cell_type.is_none_or_road()) {
            let i = cell.pos.y as usize * grid.width() + cell.pos.x as usize;
            cell_nodes[i] = Some(graph.add_node(RoadNode::Cell(cell.pos)));
        }
        let boundary = graph.add_node(RoadNode::Boundary);

        let node_at = |p: GridPos| -> Option<(NodeIndex, CellType)> {
            let t = grid.get(p)?;
            let n = cell_nodes[p.y as usize * grid.width() + p.x as usize]?;
            Some((n, t))
        };

        for cell in grid.cells() {
            let from = match node_at(cell.pos) {
                Some((n, _)) => n,
                None => continue,
            };
            for neighbor in cell.pos.neighbors().iter() {
                if let Some((to, t)) = node_at(*neighbor) {
                    graph.add_edge(from, to, entry_cost(t));
                }
            }
            if grid.on_edge(cell.pos) {
                graph.add_edge(from, boundary, 0);
            }
        }

        let mut door_out = Vec::with_capacity(doors.len());
        let mut door_in = Vec::with_capacity(doors.len());
        for (i, door) in doors.iter().enumerate() {
            let out = graph.add_node(RoadNode::DoorOut(i));
            let inn = graph.add_node(RoadNode::DoorIn(i));
            for neighbor in door.neighbors().iter() {
                if let Some((cell, t)) = node_at(*neighbor) {
                    graph.add_edge(out, cell, entry_cost(t));
                    graph.add_edge(cell, inn, ROAD_STEP_COST);
                }
            }
            if grid.on_edge(*door) {
                graph.add_edge(out, boundary, 0);
            }
            door_out.push(out);
            door_in.push(inn);
        }

        CellGraph {
            graph,
            door_out,
            door_in,
            boundary,
        }
    }

    /// Cost of the cheapest route from door `from` to every node it can reach.
    fn costs_from(&self, from: usize) -> HashMap<NodeIndex, u32> {
        dijkstra(&self.graph, self.door_out[from], None, |e| *e.weight())
    }

    /// Cheapest path from door `from` to door `to`.
    fn door_path(
        &self,
        doors: &[GridPos],
        from: usize,
        to: usize,
    ) -> Option<(u32, Vec<NodeIndex>)> {
        let goal = self.door_in[to];
        let goal_pos = doors[to];
        astar(
            &self.graph,
            self.door_out[from],
            |n| n == goal,
            |e| *e.weight(),
            |n| match self.graph[n] {
                RoadNode::Cell(p) => p.manhattan(goal_pos),
                RoadNode::DoorOut(i) | RoadNode::DoorIn(i) => doors[i].manhattan(goal_pos),
                RoadNode::Boundary => 0,
            },
        )
    }

    /// Cheapest path from door `from` off the edge of the grid.
    fn boundary_path(&self, from: usize) -> Option<(u32, Vec<NodeIndex>)> {
        let goal = self.boundary;
        astar(
            &self.graph,
            self.door_out[from],
            |n| n == goal,
            |e| *e.weight(),
            |_| 0,
        )
    }
}

/// Carves roads into `grid` so every door in `doors` is linked to another door or to the grid
/// edge. Only `None` cells are ever rewritten. Doors with no possible route are reported as
/// disconnected and left alone.
pub fn carve_roads(grid: &mut Grid, doors: &[GridPos]) -> RoadNetwork {
    if doors.is_empty() {
        return RoadNetwork::default();
    }

    let cells = CellGraph::build(grid, doors);

    // Anchor node `i` is door `i`; the boundary comes last.
    let mut anchors = StableGraph::<Anchor, u32, Undirected>::default();
    let door_anchors: Vec<_> = doors
        .iter()
        .map(|d| anchors.add_node(Anchor::Door(*d)))
        .collect();
    let boundary_anchor = anchors.add_node(Anchor::Boundary);

    // One search per door prices every link; paths are only traced for links the forest keeps.
    for i in 0..doors.len() {
        let costs = cells.costs_from(i);
        for j in i + 1..doors.len() {
            if let Some(cost) = costs.get(&cells.door_in[j]) {
                anchors.add_edge(door_anchors[i], door_anchors[j], *cost);
            }
        }
        if let Some(cost) = costs.get(&cells.boundary) {
            anchors.add_edge(door_anchors[i], boundary_anchor, *cost);
        }
    }

    let forest =
        StableGraph::<Anchor, u32, Undirected>::from_elements(min_spanning_tree(&anchors));

    let trunk = longest_path_to_point_in_tree(&forest, boundary_anchor);
    let trunk_edges: FnvHashSet<(usize, usize)> = trunk
        .windows(2)
        .map(|w| ordered(w[0].index(), w[1].index()))
        .collect();
    log::debug!("Main road runs through {} anchors", trunk.len());

    let mut links: Vec<_> = forest
        .edge_references()
        .map(|e| {
            let key = ordered(e.source().index(), e.target().index());
            (!trunk_edges.contains(&key), key)
        })
        .collect();
    // Main road first, so shared cells end up as main road.
    links.sort();

    let mut carved = 0;
    for (is_branch, (a, b)) in links.into_iter() {
        let road_type = if is_branch {
            CellType::Road
        } else {
            CellType::MainRoad
        };
        // `a < b`, and the boundary anchor has the highest index.
        let path = if b == boundary_anchor.index() {
            cells.boundary_path(a)
        } else {
            cells.door_path(doors, a, b)
        };
        let path = match path {
            Some((_, p)) => p,
            None => continue,
        };
        for n in path.iter() {
            if let RoadNode::Cell(p) = cells.graph[*n] {
                if grid.get(p) == Some(CellType::None) {
                    grid.set(p, road_type);
                    carved += 1;
                }
            }
        }
    }

    let mut network = RoadNetwork {
        carved,
        ..Default::default()
    };
    for n in forest.node_indices() {
        if let Anchor::Door(door) = forest[n] {
            if forest.neighbors(n).next().is_some() {
                network.connected.push(door);
            } else {
                network.disconnected.push(door);
            }
        }
    }

    log::debug!(
        "Carved {} road cells; {} doors connected, {} disconnected",
        network.carved,
        network.connected.len(),
        network.disconnected.len()
    );
    log::debug!("Grid after carving:\n{}", grid);

    network
}

fn ordered(a: usize, b: usize) -> (usize, usize) {
    if a > b {
        (b, a)
    } else {
        (a, b)
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
