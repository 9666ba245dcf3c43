use serde::{Deserialize, Serialize};

use crate::grid::Cell;

/// Client to service: one counting request per scheduler trigger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionRequest {
    /// Selected shape identifiers, in selection order
    pub shapes: Vec<String>,
    /// `[row, col]` pairs confirmed to hold treasure
    pub has_treasure: Vec<[i64; 2]>,
    /// `[row, col]` pairs confirmed empty
    pub no_treasure: Vec<[i64; 2]>,
}

impl PositionRequest {
    pub fn new(shapes: Vec<String>, has_treasure: &[Cell], no_treasure: &[Cell]) -> Self {
        let pairs = |cells: &[Cell]| {
            cells
                .iter()
                .map(|c| [c.row() as i64, c.col() as i64])
                .collect()
        };
        Self {
            shapes,
            has_treasure: pairs(has_treasure),
            no_treasure: pairs(no_treasure),
        }
    }
}

/// Service to client: per-cell coverage counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionResponse {
    /// Counts indexed `[row][col]`
    pub grid_counts: Vec<Vec<u64>>,
    /// Number of valid placements across all requested shapes
    pub all_positions_count: u64,
}

/// Error body returned by the service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_format() {
        let treasure = [Cell::new(0, 0).unwrap()];
        let empty = [Cell::new(2, 3).unwrap(), Cell::new(4, 1).unwrap()];
        let request = PositionRequest::new(vec!["L".to_string()], &treasure, &empty);

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "shapes": ["L"],
                "has_treasure": [[0, 0]],
                "no_treasure": [[2, 3], [4, 1]],
            })
        );
    }

    #[test]
    fn test_response_parses_service_body() {
        let body = concat!(
            r#"{"grid_counts":[[1,0,0,0,0],[0,0,0,0,0],[0,0,0,0,0],[0,0,0,0,0],[0,0,0,0,2]],"#,
            r#""all_positions_count":3}"#
        );
        let response: PositionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.all_positions_count, 3);
        assert_eq!(response.grid_counts[4][4], 2);
    }

    #[test]
    fn test_response_rejects_negative_counts() {
        let body = r#"{"grid_counts":[[-1]],"all_positions_count":0}"#;
        assert!(serde_json::from_str::<PositionResponse>(body).is_err());
    }
}
