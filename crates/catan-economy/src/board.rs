//! Game board: tiles, vertices, and roads addressed by index.
//!
//! This module contains:
//! - Occupancy states for vertices (settlements, cities) and roads
//! - The `BoardCells` trait, the read/write surface placement actions use
//! - `Board`, an index-based board built from an explicit layout or the
//!   standard 19-hex arrangement
//! - Dice-roll resource distribution
//!
//! Players never own board cells; they only remember indices into the board.

use crate::player::Player;
use crate::resources::{ResourceLedger, ResourceType};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;
use tracing::debug;

/// Player identifier (0-3 for a 4-player game)
pub type PlayerId = u8;

/// Index of a vertex (corner) on the board
pub type VertexId = usize;

/// Index of a road (edge) on the board
pub type RoadId = usize;

/// Index of a tile on the board
pub type TileId = usize;

/// Type of hex tile on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileType {
    /// Produces a resource when its number is rolled
    Resource(ResourceType),
    /// No production
    Desert,
}

/// A single tile and the vertices on its corners
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub tile_type: TileType,
    /// Dice number that triggers production (None for desert)
    pub dice_number: Option<u8>,
    pub vertices: Vec<VertexId>,
}

impl Tile {
    pub fn new_resource(resource: ResourceType, dice_number: u8, vertices: Vec<VertexId>) -> Self {
        Self {
            tile_type: TileType::Resource(resource),
            dice_number: Some(dice_number),
            vertices,
        }
    }

    pub fn desert(vertices: Vec<VertexId>) -> Self {
        Self {
            tile_type: TileType::Desert,
            dice_number: None,
            vertices,
        }
    }

    /// Get the resource this tile produces, if any
    pub fn resource(&self) -> Option<ResourceType> {
        match self.tile_type {
            TileType::Resource(r) => Some(r),
            TileType::Desert => None,
        }
    }
}

/// What's built on a vertex (corner)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum VertexBuilding {
    #[default]
    Empty,
    /// Settlement (1 VP, 1 resource per adjacent tile)
    Settlement(PlayerId),
    /// City (2 VP, 2 resources per adjacent tile)
    City(PlayerId),
}

impl VertexBuilding {
    pub fn owner(&self) -> Option<PlayerId> {
        match self {
            VertexBuilding::Empty => None,
            VertexBuilding::Settlement(p) | VertexBuilding::City(p) => Some(*p),
        }
    }

    /// Victory points provided by this building
    pub fn victory_points(&self) -> u32 {
        match self {
            VertexBuilding::Empty => 0,
            VertexBuilding::Settlement(_) => 1,
            VertexBuilding::City(_) => 2,
        }
    }

    /// How many resources per production
    pub fn resource_multiplier(&self) -> u32 {
        self.victory_points()
    }
}

/// What's built on an edge (side)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EdgeBuilding {
    #[default]
    Empty,
    Road(PlayerId),
}

/// Board cells as seen by placement actions.
///
/// Reads return `None` for indices that do not exist. Writes to an unknown
/// index are ignored; callers check existence first.
pub trait BoardCells {
    fn vertex(&self, vertex: VertexId) -> Option<VertexBuilding>;

    fn road(&self, road: RoadId) -> Option<EdgeBuilding>;

    /// Tiles touching a vertex
    fn tiles_for_vertex(&self, vertex: VertexId) -> Vec<&Tile>;

    fn set_vertex(&mut self, vertex: VertexId, building: VertexBuilding);

    fn set_road(&mut self, road: RoadId, building: EdgeBuilding);
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum LayoutError {
    #[error("tile {tile} references vertex {vertex}, board has {vertex_count}")]
    TileVertexOutOfRange {
        tile: TileId,
        vertex: VertexId,
        vertex_count: usize,
    },

    #[error("road {road} references vertex {vertex}, board has {vertex_count}")]
    RoadVertexOutOfRange {
        road: RoadId,
        vertex: VertexId,
        vertex_count: usize,
    },

    #[error("road {0} connects a vertex to itself")]
    DegenerateRoad(RoadId),
}

/// A road slot: the two vertices it joins and what is built on it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Road {
    pub endpoints: [VertexId; 2],
    pub building: EdgeBuilding,
}

/// The complete game board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    tiles: Vec<Tile>,
    vertices: Vec<VertexBuilding>,
    roads: Vec<Road>,
    /// Tiles touching each vertex
    vertex_tiles: Vec<Vec<TileId>>,
    /// Roads touching each vertex
    vertex_roads: Vec<Vec<RoadId>>,
}

/// Land hexes of the standard board in axial coordinates (centre, ring 1, ring 2)
const STANDARD_LAND: [(i32, i32); 19] = [
    (0, 0),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (2, 0),
    (2, -1),
    (2, -2),
    (1, -2),
    (0, -2),
    (-1, -1),
    (-2, 0),
    (-2, 1),
    (-2, 2),
    (-1, 2),
    (0, 2),
    (1, 1),
];

/// Corner offsets of a hex, clockwise, on a lattice scaled by 3
const CORNER_OFFSETS: [(i32, i32); 6] = [(2, -1), (1, 1), (-1, 2), (-2, 1), (-1, -1), (1, -2)];

const AXIAL_NEIGHBORS: [(i32, i32); 6] = [(1, 0), (1, -1), (0, -1), (-1, 0), (-1, 1), (0, 1)];

impl Board {
    /// Build a board from tiles and road endpoints over `vertex_count` empty vertices
    pub fn from_layout(
        vertex_count: usize,
        tiles: Vec<Tile>,
        road_endpoints: Vec<[VertexId; 2]>,
    ) -> Result<Self, LayoutError> {
        let mut vertex_tiles = vec![Vec::new(); vertex_count];
        for (tile_id, tile) in tiles.iter().enumerate() {
            for &vertex in &tile.vertices {
                let slot = vertex_tiles
                    .get_mut(vertex)
                    .ok_or(LayoutError::TileVertexOutOfRange {
                        tile: tile_id,
                        vertex,
                        vertex_count,
                    })?;
                slot.push(tile_id);
            }
        }

        let mut vertex_roads = vec![Vec::new(); vertex_count];
        let mut roads = Vec::with_capacity(road_endpoints.len());
        for (road_id, endpoints) in road_endpoints.into_iter().enumerate() {
            if endpoints[0] == endpoints[1] {
                return Err(LayoutError::DegenerateRoad(road_id));
            }
            for vertex in endpoints {
                let slot = vertex_roads
                    .get_mut(vertex)
                    .ok_or(LayoutError::RoadVertexOutOfRange {
                        road: road_id,
                        vertex,
                        vertex_count,
                    })?;
                slot.push(road_id);
            }
            roads.push(Road {
                endpoints,
                building: EdgeBuilding::Empty,
            });
        }

        Ok(Self {
            tiles,
            vertices: vec![VertexBuilding::Empty; vertex_count],
            roads,
            vertex_tiles,
            vertex_roads,
        })
    }

    /// Create the standard board layout with a provided RNG.
    ///
    /// 19 land tiles (4 Wood, 4 Wheat, 4 Sheep, 3 Brick, 3 Ore, 1 Desert),
    /// 54 vertices and 72 roads. 6 and 8 are kept off neighbouring tiles.
    pub fn standard_with_rng<R: Rng>(rng: &mut R) -> Self {
        let mut corner_ids: BTreeMap<(i32, i32), VertexId> = BTreeMap::new();
        let mut edge_ids: BTreeMap<(VertexId, VertexId), RoadId> = BTreeMap::new();
        let mut hex_corners: Vec<Vec<VertexId>> = Vec::with_capacity(STANDARD_LAND.len());

        for (q, r) in STANDARD_LAND {
            let corners: Vec<VertexId> = CORNER_OFFSETS
                .iter()
                .map(|(dq, dr)| {
                    let next = corner_ids.len();
                    *corner_ids.entry((3 * q + dq, 3 * r + dr)).or_insert(next)
                })
                .collect();
            for i in 0..corners.len() {
                let (a, b) = (corners[i], corners[(i + 1) % corners.len()]);
                let key = (a.min(b), a.max(b));
                let next = edge_ids.len();
                edge_ids.entry(key).or_insert(next);
            }
            hex_corners.push(corners);
        }

        let mut tile_types: Vec<Option<ResourceType>> = Vec::with_capacity(19);
        for (resource, count) in [
            (ResourceType::Wood, 4),
            (ResourceType::Wheat, 4),
            (ResourceType::Sheep, 4),
            (ResourceType::Brick, 3),
            (ResourceType::Ore, 3),
        ] {
            tile_types.extend(std::iter::repeat(Some(resource)).take(count));
        }
        tile_types.push(None);
        tile_types.shuffle(rng);

        let numbers = assign_numbers(&tile_types, rng);

        let mut next_number = numbers.into_iter();
        let tiles: Vec<Tile> = tile_types
            .into_iter()
            .zip(hex_corners)
            .map(|(tile_type, corners)| match tile_type {
                Some(resource) => {
                    Tile::new_resource(resource, next_number.next().unwrap_or(0), corners)
                }
                None => Tile::desert(corners),
            })
            .collect();

        let mut road_endpoints = vec![[0, 0]; edge_ids.len()];
        for ((a, b), road) in edge_ids {
            road_endpoints[road] = [a, b];
        }

        // The generated layout is consistent by construction.
        match Self::from_layout(corner_ids.len(), tiles, road_endpoints) {
            Ok(board) => board,
            Err(e) => unreachable!("standard layout is malformed: {e}"),
        }
    }

    // ==================== Query Methods ====================

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn road_count(&self) -> usize {
        self.roads.len()
    }

    /// The two vertices a road joins
    pub fn road_endpoints(&self, road: RoadId) -> Option<[VertexId; 2]> {
        self.roads.get(road).map(|r| r.endpoints)
    }

    /// Roads touching a vertex
    pub fn roads_at_vertex(&self, vertex: VertexId) -> &[RoadId] {
        self.vertex_roads.get(vertex).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Vertices one road away from a vertex
    pub fn adjacent_vertices(&self, vertex: VertexId) -> Vec<VertexId> {
        self.roads_at_vertex(vertex)
            .iter()
            .filter_map(|&road| {
                let [a, b] = self.roads[road].endpoints;
                match (a == vertex, b == vertex) {
                    (true, _) => Some(b),
                    (_, true) => Some(a),
                    _ => None,
                }
            })
            .collect()
    }

    /// Road joining two vertices, if any
    pub fn road_between(&self, a: VertexId, b: VertexId) -> Option<RoadId> {
        self.roads_at_vertex(a)
            .iter()
            .copied()
            .find(|&road| self.roads[road].endpoints.contains(&b))
    }

    // ==================== Resource Distribution ====================

    /// Calculate resources produced for a dice roll
    pub fn resources_for_roll(&self, roll: u8) -> BTreeMap<PlayerId, ResourceLedger> {
        let mut distribution: BTreeMap<PlayerId, ResourceLedger> = BTreeMap::new();

        for tile in &self.tiles {
            if tile.dice_number != Some(roll) {
                continue;
            }
            let Some(resource) = tile.resource() else {
                continue;
            };
            for &vertex in &tile.vertices {
                let building = self.vertices[vertex];
                if let Some(owner) = building.owner() {
                    distribution
                        .entry(owner)
                        .or_default()
                        .credit(resource, building.resource_multiplier());
                }
            }
        }

        distribution
    }

    /// Credit every player's ledger with what a dice roll produced
    pub fn distribute(
        &self,
        roll: u8,
        players: &mut [Player],
    ) -> BTreeMap<PlayerId, ResourceLedger> {
        let distribution = self.resources_for_roll(roll);
        for player in players.iter_mut() {
            if let Some(produced) = distribution.get(&player.id()) {
                player.collect(produced);
            }
        }
        debug!(roll, players = distribution.len(), "resources distributed");
        distribution
    }
}

impl BoardCells for Board {
    fn vertex(&self, vertex: VertexId) -> Option<VertexBuilding> {
        self.vertices.get(vertex).copied()
    }

    fn road(&self, road: RoadId) -> Option<EdgeBuilding> {
        self.roads.get(road).map(|r| r.building)
    }

    fn tiles_for_vertex(&self, vertex: VertexId) -> Vec<&Tile> {
        self.vertex_tiles
            .get(vertex)
            .map(|ids| ids.iter().map(|&id| &self.tiles[id]).collect())
            .unwrap_or_default()
    }

    fn set_vertex(&mut self, vertex: VertexId, building: VertexBuilding) {
        if let Some(cell) = self.vertices.get_mut(vertex) {
            *cell = building;
        }
    }

    fn set_road(&mut self, road: RoadId, building: EdgeBuilding) {
        if let Some(cell) = self.roads.get_mut(road) {
            cell.building = building;
        }
    }
}

/// Shuffle the standard number tokens onto the resource tiles, retrying a
/// bounded number of times to keep 6 and 8 apart
fn assign_numbers<R: Rng>(tile_types: &[Option<ResourceType>], rng: &mut R) -> Vec<u8> {
    const MAX_ATTEMPTS: usize = 100;
    let mut numbers: Vec<u8> = vec![2, 3, 3, 4, 4, 5, 5, 6, 6, 8, 8, 9, 9, 10, 10, 11, 11, 12];

    for _ in 0..MAX_ATTEMPTS {
        numbers.shuffle(rng);
        if hot_numbers_apart(tile_types, &numbers) {
            break;
        }
    }
    numbers
}

fn hot_numbers_apart(tile_types: &[Option<ResourceType>], numbers: &[u8]) -> bool {
    let mut by_coord: HashMap<(i32, i32), u8> = HashMap::new();
    let mut next = numbers.iter();
    for (coord, tile_type) in STANDARD_LAND.iter().zip(tile_types) {
        if tile_type.is_some() {
            if let Some(&n) = next.next() {
                by_coord.insert(*coord, n);
            }
        }
    }

    by_coord.iter().all(|(&(q, r), &n)| {
        (n != 6 && n != 8)
            || AXIAL_NEIGHBORS.iter().all(|(dq, dr)| {
                !matches!(by_coord.get(&(q + dq, r + dr)), Some(6) | Some(8))
            })
    })
}
