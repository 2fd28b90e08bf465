use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PortalConfig {
    /// Ticks an agent must stand in a Letterverse portal before it is moved.
    pub trigger_ticks: u32,
    /// Game ticks between upkeep sweeps of the active frames.
    pub maintenance_interval: u64,
    /// Markers needed around a portal tile for it to count as a Letterverse portal.
    pub special_marker_threshold: u32,
    /// Half-size of the cube counted by the census.
    pub census_radius: i32,
    /// Arrival altitude in either direction.
    pub destination_altitude: i32,
    /// Anchor search box around a placed marker.
    pub search_horizontal: i32,
    pub search_vertical: i32,
    /// Active anchors closer than this to a broken marker are dropped.
    pub extinguish_distance: i64,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            trigger_ticks: 2,
            maintenance_interval: 20,
            special_marker_threshold: 8,
            census_radius: 2,
            destination_altitude: 100,
            search_horizontal: 4,
            search_vertical: 5,
            extinguish_distance: 10,
        }
    }
}
