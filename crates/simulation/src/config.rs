/// Edge length of one placement sub-tile in world units.
pub const SUB_TILE_SIZE: f32 = 0.2;
/// Sub-tiles along one edge of a purchasable tile.
pub const SUB_TILES_PER_TILE: i32 = 5;
pub const TILE_SIZE: f32 = SUB_TILES_PER_TILE as f32 * SUB_TILE_SIZE;
pub const ROAD_WIDTH: f32 = SUB_TILE_SIZE;

/// Bias added before rounding a coordinate onto the sub-tile lattice so that
/// exact half-pitch inputs always round toward +infinity.
pub const SNAP_BIAS: f32 = SUB_TILE_SIZE * 0.001;

/// Rotation step applied by a single rotate input, in degrees.
pub const ROTATION_STEP_DEGREES: u32 = 90;

/// Footprint corners are sampled this far inside the footprint edge when
/// checking tile ownership.
pub const OWNERSHIP_SAMPLE_INSET: f32 = 0.01;
/// Scale applied to the footprint for building and intersection overlap.
pub const OVERLAP_BOX_SCALE: f32 = 0.9;
/// Scale applied to the footprint when rejecting buildings that sit on a road.
pub const ROAD_OVERLAP_BOX_SCALE: f32 = 0.95;

/// Maximum distance a road scan travels from the building front.
pub const ROAD_SCAN_DISTANCE: f32 = ROAD_WIDTH * 2.0;
/// The facing road must be at most this far from the building front.
pub const ROAD_ADJACENCY_TOLERANCE: f32 = SUB_TILE_SIZE * 1.1;
/// Minimum |forward . direction_to_road| for a road to count as faced.
pub const ROAD_ALIGNMENT_THRESHOLD: f32 = 0.85;

pub const DEFAULT_GRID_WIDTH: u32 = 10;
pub const DEFAULT_GRID_HEIGHT: u32 = 10;

/// Largest footprint side, in sub-tiles, accepted from a catalog or record.
pub const MAX_FOOTPRINT_SUB_TILES: u32 = 64;

/// Economy ticks run per fixed step at most; the rest of a backlog is dropped.
pub const MAX_ECONOMY_TICKS_PER_STEP: u32 = 8;
