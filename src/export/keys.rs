//! Asset names and path fragments the exporters match on.

// Curve tables
pub const BASE_ITEM_RATING: &str = "BaseItemRating";
pub const SURVIVOR_ITEM_RATING: &str = "SurvivorItemRating";
/// Lowercase; compared against lowercased paths.
pub const ITEM_RATING_SUFFIX: &str = "itemrating.uasset";

// Survivors
pub const WORKER_TYPE: &str = "Worker";
pub const WORKERS_PATH: &str = "Workers/Worker";
pub const MANAGERS_PATH: &str = "Managers/Manager";

// Difficulty
pub const DIFFICULTY_GROWTH_BOUNDS: &str = "GameDifficultyGrowthBounds";

// Quests
pub const QUEST_LINES_PATH: &str = "/QuestLines/";
