/// The exported artifact and merging of artifacts across runs
pub mod artifacts;
/// Access to decoded game assets
pub mod data;
/// Error definitions
pub mod error;
/// Exporters that turn game assets into artifact entries, and the driver that runs them
pub mod export;
/// Game concept types (rarities, lead survivor jobs) shared across exporters.
pub mod game_types;
/// Generic wrapper for values that may or may not match a known variant.
pub mod recognized;
