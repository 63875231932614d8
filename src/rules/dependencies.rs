//! Harmonic dependency rules - which zones gate which
//!
//! A rule either watches a source zone's health before work in a target zone
//! (state-dependent) or fires on an external event for every zone at once
//! (event-triggered, target = All).

use serde::{Deserialize, Serialize};

use crate::core::types::FrequencyBand;

/// The zone(s) a rule protects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneTarget {
    Zone(FrequencyBand),
    /// Sentinel: the rule broadcasts to every zone
    All,
}

/// One dependency rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarmonicDependency {
    pub id: String,
    pub name: String,
    /// Human-readable statement of the rule
    pub rule: String,
    pub source_zone: FrequencyBand,
    pub target_zone: ZoneTarget,
    /// Template with `{source}`, `{value}`, `{threshold}` placeholders
    pub alert_template: String,
    /// Event name that fires this rule, for event-triggered rules
    pub trigger_event: Option<String>,
}

impl HarmonicDependency {
    /// Event-triggered rules fire on a signal with no zone-status lookup
    pub fn is_event_triggered(&self) -> bool {
        self.trigger_event.is_some()
    }
}

/// The ordered dependency rule table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DependencyTable {
    rules: Vec<HarmonicDependency>,
}

impl DependencyTable {
    pub fn new(rules: Vec<HarmonicDependency>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[HarmonicDependency] {
        &self.rules
    }

    /// State-dependent rules protecting the given target zone
    pub fn rules_for_target(&self, target: FrequencyBand) -> Vec<&HarmonicDependency> {
        self.rules
            .iter()
            .filter(|r| !r.is_event_triggered() && r.target_zone == ZoneTarget::Zone(target))
            .collect()
    }

    /// Event-triggered rules listening for the given event name
    pub fn rules_for_event(&self, event: &str) -> Vec<&HarmonicDependency> {
        self.rules
            .iter()
            .filter(|r| r.trigger_event.as_deref() == Some(event))
            .collect()
    }
}

/// The built-in dependency rules
pub fn default_dependencies() -> Vec<HarmonicDependency> {
    vec![
        HarmonicDependency {
            id: "root-sustain".into(),
            name: "Root Sustain".into(),
            rule: "Transplanting in the heart band needs a stable root band first".into(),
            source_zone: FrequencyBand(396),
            target_zone: ZoneTarget::Zone(FrequencyBand(528)),
            alert_template: "{source} is off pitch ({value} of {threshold}); steady it before working this zone".into(),
            trigger_event: None,
        },
        HarmonicDependency {
            id: "flow-overtone".into(),
            name: "Flow Overtone".into(),
            rule: "Canopy-band feeding washes out unless the flow band drains well".into(),
            source_zone: FrequencyBand(417),
            target_zone: ZoneTarget::Zone(FrequencyBand(639)),
            alert_template: "{source} is draining poorly ({value} of {threshold}); hold off on feeding here".into(),
            trigger_event: None,
        },
        HarmonicDependency {
            id: "pest-dissonance".into(),
            name: "Pest Dissonance".into(),
            rule: "A pest detection anywhere calls for protective companions everywhere".into(),
            source_zone: FrequencyBand(741),
            target_zone: ZoneTarget::All,
            alert_template: "Pest dissonance detected; deploy protective companion planting in all zones".into(),
            trigger_event: Some("pest_detected".into()),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_for_target_excludes_event_rules() {
        let table = DependencyTable::new(default_dependencies());
        let rules = table.rules_for_target(FrequencyBand(528));
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].id, "root-sustain");
    }

    #[test]
    fn test_unlisted_target_has_no_rules() {
        let table = DependencyTable::new(default_dependencies());
        assert!(table.rules_for_target(FrequencyBand(999)).is_empty());
    }

    #[test]
    fn test_rules_for_event() {
        let table = DependencyTable::new(default_dependencies());
        let rules = table.rules_for_event("pest_detected");
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].target_zone, ZoneTarget::All);
        assert!(table.rules_for_event("frost_warning").is_empty());
    }
}
