use std::collections::HashMap;
use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use geojson::{GeoJson, Geometry, Value};
use ordered_float::OrderedFloat;
use petgraph::algo::astar;
use petgraph::graph::{Graph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Undirected;
use serde::{Deserialize, Serialize};

use crate::common::{DomainError, DomainResult};
use crate::domains::shipment_tracking::geodesy::haversine_km;
use crate::domains::shipment_tracking::ports::RouteGenerator;
use crate::domains::shipment_tracking::types::{Coordinate, GeneratedRoute, LatLon};

const GRAPH_MAGIC: &[u8; 4] = b"SLGR";
const GRAPH_VERSION: u8 = 1;
const KM_PER_NAUTICAL_MILE: f64 = 1.852;

/// Lane network vertex as `(longitude, latitude)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaneNode(pub f64, pub f64);

impl LaneNode {
    fn lat_lon(self) -> LatLon {
        LatLon(self.1, self.0)
    }

    fn coordinate(self) -> Coordinate {
        Coordinate::new(self.0, self.1)
    }
}

/// Undirected sea-lane graph, edges weighted in kilometres.
pub type LaneGraph = Graph<LaneNode, f64, Undirected>;

type NodeKey = (OrderedFloat<f64>, OrderedFloat<f64>);

struct LaneGraphBuilder {
    graph: LaneGraph,
    index: HashMap<NodeKey, NodeIndex>,
}

impl LaneGraphBuilder {
    fn new() -> Self {
        Self { graph: Graph::new_undirected(), index: HashMap::new() }
    }

    fn node(&mut self, pos: &[f64]) -> DomainResult<NodeIndex> {
        if pos.len() < 2 {
            return Err(DomainError::InfrastructureError(format!(
                "position needs at least 2 values, got {}",
                pos.len()
            )));
        }
        let key = (OrderedFloat(pos[0]), OrderedFloat(pos[1]));
        if let Some(&ix) = self.index.get(&key) {
            return Ok(ix);
        }
        let ix = self.graph.add_node(LaneNode(pos[0], pos[1]));
        self.index.insert(key, ix);
        Ok(ix)
    }

    fn line(&mut self, positions: &[Vec<f64>]) -> DomainResult<()> {
        let mut prev: Option<NodeIndex> = None;
        for pos in positions {
            let ix = self.node(pos)?;
            if let Some(p) = prev {
                if p != ix && self.graph.find_edge(p, ix).is_none() {
                    let w = haversine_km(self.graph[p].lat_lon(), self.graph[ix].lat_lon());
                    self.graph.add_edge(p, ix, w);
                }
            }
            prev = Some(ix);
        }
        Ok(())
    }

    fn geometry(&mut self, geometry: &Geometry) -> DomainResult<()> {
        match &geometry.value {
            Value::Point(p) => {
                self.node(p)?;
            }
            Value::MultiPoint(ps) => {
                for p in ps {
                    self.node(p)?;
                }
            }
            Value::LineString(ls) => self.line(ls)?,
            Value::MultiLineString(mls) => {
                for ls in mls {
                    self.line(ls)?;
                }
            }
            Value::GeometryCollection(gs) => {
                for g in gs {
                    self.geometry(g)?;
                }
            }
            // polygons describe land or areas, not lanes
            Value::Polygon(_) | Value::MultiPolygon(_) => {}
        }
        Ok(())
    }
}

/// Build a lane graph from a GeoJSON document of lane geometries.
pub fn build_lane_graph(geojson: &str) -> DomainResult<LaneGraph> {
    let parsed: GeoJson = geojson
        .parse()
        .map_err(|e: geojson::Error| DomainError::InfrastructureError(format!("invalid GeoJSON: {}", e)))?;

    let mut builder = LaneGraphBuilder::new();
    match &parsed {
        GeoJson::FeatureCollection(fc) => {
            for feature in &fc.features {
                if let Some(g) = &feature.geometry {
                    builder.geometry(g)?;
                }
            }
        }
        GeoJson::Feature(f) => {
            if let Some(g) = &f.geometry {
                builder.geometry(g)?;
            }
        }
        GeoJson::Geometry(g) => builder.geometry(g)?,
    }
    Ok(builder.graph)
}

/// Persist a compiled graph: magic, version, header length (u32 LE), JSON header, bincode payload.
pub fn save_graph(path: &Path, graph: &LaneGraph) -> DomainResult<()> {
    let payload = bincode::serialize(graph)
        .map_err(|e| DomainError::InfrastructureError(format!("graph encode: {}", e)))?;
    let header = serde_json::to_vec(&serde_json::json!({
        "format": "petgraph-bincode",
        "version": GRAPH_VERSION,
        "nodes": graph.node_count(),
        "edges": graph.edge_count(),
    }))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| DomainError::InfrastructureError(format!("{}", e)))?;
        }
    }
    let mut f = fs::File::create(path).map_err(|e| DomainError::InfrastructureError(format!("{}", e)))?;
    let io = |e: std::io::Error| DomainError::InfrastructureError(format!("{}", e));
    f.write_all(GRAPH_MAGIC).map_err(io)?;
    f.write_all(&[GRAPH_VERSION]).map_err(io)?;
    f.write_all(&(header.len() as u32).to_le_bytes()).map_err(io)?;
    f.write_all(&header).map_err(io)?;
    f.write_all(&payload).map_err(io)?;
    Ok(())
}

/// Load a graph written by [`save_graph`]. Version 0 files carry an empty header.
pub fn load_graph(path: &Path) -> DomainResult<LaneGraph> {
    let mut buf = Vec::new();
    fs::File::open(path)
        .and_then(|mut f| f.read_to_end(&mut buf))
        .map_err(|e| DomainError::InfrastructureError(format!("{}: {}", path.display(), e)))?;

    if buf.len() < 9 || &buf[0..4] != GRAPH_MAGIC {
        return Err(DomainError::InfrastructureError(format!(
            "{} is not a lane graph file",
            path.display()
        )));
    }
    let version = buf[4];
    if version > GRAPH_VERSION {
        return Err(DomainError::InfrastructureError(format!(
            "unsupported lane graph version {}",
            version
        )));
    }
    let header_len = u32::from_le_bytes([buf[5], buf[6], buf[7], buf[8]]) as usize;
    let start = 9 + header_len;
    if buf.len() < start {
        return Err(DomainError::InfrastructureError("truncated lane graph header".to_string()));
    }
    bincode::deserialize(&buf[start..])
        .map_err(|e| DomainError::InfrastructureError(format!("graph decode: {}", e)))
}

/// Default [`RouteGenerator`]: shortest path over a sea-lane network.
///
/// Origin and destination are snapped to their nearest network nodes and
/// the route is `[origin, ..lane path.., destination]`.
pub struct SeaLaneRouter {
    graph: LaneGraph,
    speed_knots: f64,
}

impl SeaLaneRouter {
    pub fn new(graph: LaneGraph, speed_knots: f64) -> Self {
        Self { graph, speed_knots }
    }

    pub fn from_geojson(geojson: &str, speed_knots: f64) -> DomainResult<Self> {
        Ok(Self::new(build_lane_graph(geojson)?, speed_knots))
    }

    /// Use the compiled cache when present, otherwise build from GeoJSON and
    /// write the cache for the next run.
    pub fn open(network_path: &Path, cache_path: Option<&Path>, speed_knots: f64) -> DomainResult<Self> {
        if let Some(cache) = cache_path {
            if cache.exists() {
                tracing::debug!(path = %cache.display(), "loading compiled lane graph");
                return Ok(Self::new(load_graph(cache)?, speed_knots));
            }
        }

        let src = fs::read_to_string(network_path)
            .map_err(|e| DomainError::InfrastructureError(format!("{}: {}", network_path.display(), e)))?;
        let graph = build_lane_graph(&src)?;
        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built lane graph from {}",
            network_path.display()
        );
        if let Some(cache) = cache_path {
            save_graph(cache, &graph)?;
        }
        Ok(Self::new(graph, speed_knots))
    }

    pub fn graph(&self) -> &LaneGraph {
        &self.graph
    }

    fn nearest_node(&self, c: Coordinate) -> Option<NodeIndex> {
        let target = c.to_lat_lon();
        self.graph
            .node_indices()
            .min_by_key(|&n| OrderedFloat(haversine_km(target, self.graph[n].lat_lon())))
    }
}

impl RouteGenerator for SeaLaneRouter {
    fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        include_ports: bool,
    ) -> DomainResult<GeneratedRoute> {
        if include_ports {
            return Err(DomainError::InvalidCommand {
                reason: "port-aware routing is not supported by the lane network".to_string(),
            });
        }
        let (start, goal) = match (self.nearest_node(origin), self.nearest_node(destination)) {
            (Some(s), Some(g)) => (s, g),
            _ => {
                return Err(DomainError::RouteGeneration {
                    reason: "lane network is empty".to_string(),
                })
            }
        };

        let goal_pos = self.graph[goal].lat_lon();
        let (_, path) = astar(
            &self.graph,
            start,
            |n| n == goal,
            |e| *e.weight(),
            |n| haversine_km(self.graph[n].lat_lon(), goal_pos),
        )
        .ok_or_else(|| DomainError::RouteGeneration {
            reason: format!(
                "no lane path from [{:.4}, {:.4}] to [{:.4}, {:.4}]",
                origin.longitude, origin.latitude, destination.longitude, destination.latitude
            ),
        })?;

        let mut coordinates = Vec::with_capacity(path.len() + 2);
        coordinates.push(origin);
        for n in path {
            push_distinct(&mut coordinates, self.graph[n].coordinate());
        }
        push_distinct(&mut coordinates, destination);

        let length: f64 = coordinates
            .windows(2)
            .map(|w| haversine_km(w[0].to_lat_lon(), w[1].to_lat_lon()))
            .sum();

        Ok(GeneratedRoute {
            coordinates,
            length,
            duration_hours: length / (self.speed_knots * KM_PER_NAUTICAL_MILE),
            units: "km".to_string(),
        })
    }
}

fn push_distinct(coords: &mut Vec<Coordinate>, c: Coordinate) {
    if coords.last() != Some(&c) {
        coords.push(c);
    }
}
