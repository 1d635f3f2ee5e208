//! Collaborators the wizard consults: challenge catalog, settings and identity

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use arena_protocol::{Challenge, Difficulty, PlayerProfile};

/// Source of round challenges
pub trait ChallengeCatalog: Send + Sync {
    /// Pool size
    fn len(&self) -> usize;

    /// Challenge at `index`; a non-empty catalog answers for every index by
    /// wrapping around its pool
    fn challenge(&self, index: usize) -> Option<Challenge>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub trait SettingsProvider: Send + Sync {
    fn ai_battles_enabled(&self) -> bool;
}

/// Who is creating battles
pub trait IdentityProvider: Send + Sync {
    fn current_player(&self) -> PlayerProfile;
}

/// Everything the wizard needs from the outside
#[derive(Clone)]
pub struct WizardServices {
    pub catalog: Arc<dyn ChallengeCatalog>,
    pub settings: Arc<dyn SettingsProvider>,
    pub identity: Arc<dyn IdentityProvider>,
}

impl WizardServices {
    pub fn new(
        catalog: Arc<dyn ChallengeCatalog>,
        settings: Arc<dyn SettingsProvider>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            catalog,
            settings,
            identity,
        }
    }

    /// Built-in catalog, AI battles enabled, fixed player
    pub fn in_memory(player: PlayerProfile) -> Self {
        Self::new(
            Arc::new(StaticCatalog::builtin()),
            Arc::new(StaticSettings::new(true)),
            Arc::new(StaticIdentity::new(player)),
        )
    }
}

impl std::fmt::Debug for WizardServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WizardServices")
            .field("catalog_len", &self.catalog.len())
            .field("ai_battles_enabled", &self.settings.ai_battles_enabled())
            .finish()
    }
}

/// In-memory challenge pool
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    pool: Vec<Challenge>,
}

impl StaticCatalog {
    pub fn new(pool: Vec<Challenge>) -> Self {
        Self { pool }
    }

    /// The default pool shipped with the arena
    pub fn builtin() -> Self {
        Self::new(vec![
            challenge(
                "Two Sum",
                "Return the indices of the two numbers that add up to the target.",
                &["arrays", "hashing"],
                "nums = [2,7,11,15], target = 9 -> [0,1]",
                300,
                Difficulty::Easy,
            ),
            challenge(
                "Valid Parentheses",
                "Decide whether every bracket in the string is closed in the right order.",
                &["stack", "strings"],
                "s = \"()[]{}\" -> true",
                300,
                Difficulty::Easy,
            ),
            challenge(
                "Merge Intervals",
                "Merge all overlapping intervals and return the non-overlapping result.",
                &["arrays", "sorting"],
                "[[1,3],[2,6],[8,10]] -> [[1,6],[8,10]]",
                500,
                Difficulty::Medium,
            ),
            challenge(
                "LRU Cache",
                "Design a cache with O(1) get and put that evicts the least recently used key.",
                &["design", "hashing", "linked-list"],
                "capacity = 2; put(1,1); put(2,2); get(1) -> 1; put(3,3); get(2) -> -1",
                600,
                Difficulty::Medium,
            ),
            challenge(
                "Median of Two Sorted Arrays",
                "Find the median of two sorted arrays in logarithmic time.",
                &["binary-search", "divide-and-conquer"],
                "nums1 = [1,3], nums2 = [2] -> 2.0",
                800,
                Difficulty::Hard,
            ),
        ])
    }
}

fn challenge(
    title: &str,
    description: &str,
    tags: &[&str],
    example: &str,
    max_points: u32,
    difficulty: Difficulty,
) -> Challenge {
    Challenge {
        title: title.to_string(),
        description: description.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        example: example.to_string(),
        max_points,
        difficulty: Some(difficulty),
    }
}

impl ChallengeCatalog for StaticCatalog {
    fn len(&self) -> usize {
        self.pool.len()
    }

    fn challenge(&self, index: usize) -> Option<Challenge> {
        if self.pool.is_empty() {
            return None;
        }
        self.pool.get(index % self.pool.len()).cloned()
    }
}

/// Settings held in memory, switchable at runtime
#[derive(Debug, Default)]
pub struct StaticSettings {
    ai_battles_enabled: AtomicBool,
}

impl StaticSettings {
    pub fn new(ai_battles_enabled: bool) -> Self {
        Self {
            ai_battles_enabled: AtomicBool::new(ai_battles_enabled),
        }
    }

    pub fn set_ai_battles_enabled(&self, enabled: bool) {
        self.ai_battles_enabled.store(enabled, Ordering::Relaxed);
    }
}

impl SettingsProvider for StaticSettings {
    fn ai_battles_enabled(&self) -> bool {
        self.ai_battles_enabled.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone)]
pub struct StaticIdentity {
    player: PlayerProfile,
}

impl StaticIdentity {
    pub fn new(player: PlayerProfile) -> Self {
        Self { player }
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_player(&self) -> PlayerProfile {
        self.player.clone()
    }
}
