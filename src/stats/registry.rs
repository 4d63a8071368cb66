//! Per-entity stat registries

use super::definition::{normalize_key, StatDefinition};
use super::individual::{IndividualStat, INDIVIDUAL_STATS};
use super::team::{TeamStat, TEAM_STATS};
use super::types::{EntityKind, ProjectionMode, StatCategory};

/// Read-only lookup table of the stats one entity kind can report.
///
/// Both registries are statics; concurrent readers need no synchronization.
#[derive(Debug)]
pub struct StatRegistry {
    kind: EntityKind,
    stats: &'static [StatDefinition],
}

static INDIVIDUAL_REGISTRY: StatRegistry = StatRegistry {
    kind: EntityKind::Individual,
    stats: &INDIVIDUAL_STATS,
};

static TEAM_REGISTRY: StatRegistry = StatRegistry {
    kind: EntityKind::Team,
    stats: &TEAM_STATS,
};

impl StatRegistry {
    pub fn for_kind(kind: EntityKind) -> &'static StatRegistry {
        match kind {
            EntityKind::Individual => &INDIVIDUAL_REGISTRY,
            EntityKind::Team => &TEAM_REGISTRY,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static StatDefinition> {
        self.stats.iter()
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Resolve a user-facing stat name, abbreviation, column or alias
    pub fn lookup(&self, name: &str) -> Option<&'static StatDefinition> {
        let key = normalize_key(name);
        if key.is_empty() {
            return None;
        }
        self.stats.iter().find(|def| def.matches_key(&key))
    }

    /// Stats that can be projected, sorted or filtered in `mode`
    pub fn visible_in(&self, mode: ProjectionMode) -> impl Iterator<Item = &'static StatDefinition> {
        self.stats.iter().filter(move |def| mode.includes(def.source))
    }

    pub fn identity_stats(&self) -> impl Iterator<Item = &'static StatDefinition> {
        self.stats.iter().filter(|def| def.category == StatCategory::Identity)
    }

    /// The entity's primary key, used as the final sort tie-breaker
    pub fn entity_key(&self) -> &'static StatDefinition {
        match self.kind {
            EntityKind::Individual => IndividualStat::PlayerId.definition(),
            EntityKind::Team => TeamStat::TeamId.definition(),
        }
    }

    /// Sort column used when the request names none (or an unusable one)
    pub fn default_sort(&self, mode: ProjectionMode) -> &'static StatDefinition {
        match (self.kind, mode) {
            (EntityKind::Individual, ProjectionMode::Advanced) => IndividualStat::Pie.definition(),
            (EntityKind::Individual, _) => IndividualStat::Points.definition(),
            (EntityKind::Team, ProjectionMode::Advanced) => TeamStat::NetRating.definition(),
            (EntityKind::Team, _) => TeamStat::Wins.definition(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use crate::stats::types::StatSource;

    #[test]
    fn test_lookup_by_any_alias() {
        let registry = StatRegistry::for_kind(EntityKind::Individual);
        for name in ["FG%", "fg_pct", "Field Goal %", "field_goal_percentage", "fg pct"] {
            let def = registry.lookup(name).unwrap_or_else(|| panic!("{} not found", name));
            assert_eq!(def.id, crate::stats::StatId::Individual(IndividualStat::FieldGoalPct));
        }
        assert_eq!(registry.lookup("Usage %").unwrap().sort_key, "usg_pct");
        assert_eq!(registry.lookup("pts").unwrap().sort_key, "pts");
        assert!(registry.lookup("Wins").is_none());
        assert!(registry.lookup("").is_none());
        assert!(registry.lookup("%%").is_none());
    }

    #[test]
    fn test_team_lookup_is_disjoint() {
        let registry = StatRegistry::for_kind(EntityKind::Team);
        assert_eq!(registry.lookup("W").unwrap().sort_key, "w");
        assert_eq!(registry.lookup("win %").unwrap().sort_key, "win_pct");
        assert!(registry.lookup("USG%").is_none());
        assert!(registry.lookup("win").is_none());
    }

    #[test]
    fn test_aliases_are_unambiguous() {
        for kind in [EntityKind::Individual, EntityKind::Team] {
            let registry = StatRegistry::for_kind(kind);
            let mut owners: HashMap<String, &str> = HashMap::new();
            for def in registry.iter() {
                let mut keys = vec![
                    normalize_key(def.name),
                    normalize_key(def.abbreviation),
                    normalize_key(def.sort_key),
                ];
                keys.dedup();
                for key in keys {
                    if let Some(other) = owners.insert(key.clone(), def.name) {
                        assert_eq!(other, def.name, "'{}' names both {} and {}", key, other, def.name);
                    }
                }
            }
        }
    }

    #[test]
    fn test_sort_keys_unique() {
        for kind in [EntityKind::Individual, EntityKind::Team] {
            let registry = StatRegistry::for_kind(kind);
            let mut keys: Vec<&str> = registry.iter().map(|d| d.sort_key).collect();
            keys.sort_unstable();
            keys.dedup();
            assert_eq!(keys.len(), registry.len());
        }
    }

    #[test]
    fn test_visible_in_mode() {
        let registry = StatRegistry::for_kind(EntityKind::Individual);
        assert!(registry.visible_in(ProjectionMode::Traditional).all(|d| d.source != StatSource::Advanced));
        assert!(registry.visible_in(ProjectionMode::Advanced).all(|d| d.source != StatSource::Traditional));
        assert_eq!(registry.visible_in(ProjectionMode::Unified).count(), registry.len());
    }

    #[test]
    fn test_default_sort_visible_in_its_mode() {
        for kind in [EntityKind::Individual, EntityKind::Team] {
            let registry = StatRegistry::for_kind(kind);
            for mode in [ProjectionMode::Traditional, ProjectionMode::Advanced, ProjectionMode::Unified] {
                let def = registry.default_sort(mode);
                assert!(mode.includes(def.source), "{:?} default {} not visible", mode, def.name);
            }
        }
        assert_eq!(StatRegistry::for_kind(EntityKind::Individual).default_sort(ProjectionMode::Traditional).sort_key, "pts");
        assert_eq!(StatRegistry::for_kind(EntityKind::Team).default_sort(ProjectionMode::Traditional).sort_key, "w");
    }
}
