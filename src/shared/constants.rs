/// Default number of reports returned by the list endpoint
pub const DEFAULT_REPORT_LIMIT: i64 = 500;

/// Smallest accepted `limit`
pub const MIN_REPORT_LIMIT: i64 = 1;

/// Largest accepted `limit`
pub const MAX_REPORT_LIMIT: i64 = 2000;

// =============================================================================
// REPORT DEFAULTS
// =============================================================================

/// Prefix of every server-generated report identifier
pub const REPORT_ID_PREFIX: &str = "rep-";

/// Report type assigned to citizen submissions unless the client overrides it
pub const REPORT_TYPE_CITIZEN: &str = "ciudadano";

/// Initial moderation status of a report
pub const REPORT_STATUS_SUBMITTED: &str = "enviado";

/// Spatial reference of the stored point geometry (WGS84)
pub const WGS84_SRID: i32 = 4326;
