//! Placement legality.
//!
//! A [`Validator`] is the only gate for settlement, road and city placement.
//! Player actions ask it before touching resources or the board and never
//! repeat its adjacency checks themselves.

use crate::board::{Board, BoardCells, EdgeBuilding, RoadId, VertexBuilding, VertexId};
use crate::player::Player;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A placement a player wants to make
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    Settlement(VertexId),
    Road(RoadId),
    City(VertexId),
}

/// Why a placement was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum Rejection {
    #[error("Not your turn")]
    NotYourTurn,

    #[error("Vertex {0} does not exist")]
    UnknownVertex(VertexId),

    #[error("Road {0} does not exist")]
    UnknownRoad(RoadId),

    #[error("Location is already occupied")]
    Occupied,

    #[error("Too close to another settlement")]
    TooCloseToSettlement,

    #[error("Not connected to your roads or buildings")]
    NotConnected,

    #[error("No settlement of yours to upgrade")]
    NotOwnSettlement,
}

/// Legality gate for placements on a board of type `B`
pub trait Validator<B: ?Sized> {
    fn validate(&self, placement: Placement, actor: &Player, board: &B) -> Result<(), Rejection>;
}

/// Standard placement rules: turn order, distance rule and connectivity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuleValidator;

impl Validator<Board> for RuleValidator {
    fn validate(&self, placement: Placement, actor: &Player, board: &Board) -> Result<(), Rejection> {
        if !actor.turn().is_current_turn {
            return Err(Rejection::NotYourTurn);
        }

        match placement {
            Placement::Settlement(vertex) => {
                let building = board
                    .vertex(vertex)
                    .ok_or(Rejection::UnknownVertex(vertex))?;
                if building != VertexBuilding::Empty {
                    return Err(Rejection::Occupied);
                }
                if !satisfies_distance_rule(board, vertex) {
                    return Err(Rejection::TooCloseToSettlement);
                }
                // Setup settlements may stand alone
                if !actor.is_setup_phase() && !touches_own_road(board, vertex, actor) {
                    return Err(Rejection::NotConnected);
                }
                Ok(())
            }

            Placement::Road(road) => {
                let building = board.road(road).ok_or(Rejection::UnknownRoad(road))?;
                if building != EdgeBuilding::Empty {
                    return Err(Rejection::Occupied);
                }
                if !is_connected_to_network(board, road, actor) {
                    return Err(Rejection::NotConnected);
                }
                Ok(())
            }

            Placement::City(vertex) => {
                let building = board
                    .vertex(vertex)
                    .ok_or(Rejection::UnknownVertex(vertex))?;
                if building != VertexBuilding::Settlement(actor.id()) {
                    return Err(Rejection::NotOwnSettlement);
                }
                Ok(())
            }
        }
    }
}

/// No building on any vertex one road away
fn satisfies_distance_rule(board: &Board, vertex: VertexId) -> bool {
    board
        .adjacent_vertices(vertex)
        .into_iter()
        .all(|adj| board.vertex(adj).and_then(|b| b.owner()).is_none())
}

fn touches_own_road(board: &Board, vertex: VertexId, actor: &Player) -> bool {
    board
        .roads_at_vertex(vertex)
        .iter()
        .any(|&road| board.road(road) == Some(EdgeBuilding::Road(actor.id())))
}

/// A road connects through an own building at either end, or through an own
/// road at an end not occupied by an opponent
fn is_connected_to_network(board: &Board, road: RoadId, actor: &Player) -> bool {
    let Some(endpoints) = board.road_endpoints(road) else {
        return false;
    };

    endpoints.into_iter().any(|endpoint| {
        let owner = board.vertex(endpoint).and_then(|b| b.owner());
        if owner == Some(actor.id()) {
            return true;
        }
        owner.is_none()
            && board.roads_at_vertex(endpoint).iter().any(|&adj| {
                adj != road && board.road(adj) == Some(EdgeBuilding::Road(actor.id()))
            })
    })
}
