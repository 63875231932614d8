//! Cross-zone dependency resolution
//!
//! Two paths: state-dependent rules read the source zone's current health
//! before work in a target zone; event-triggered rules fire on an external
//! signal with no zone lookup at all and broadcast to every zone. Unknown
//! zone ids fail open (no rule, no alert) by policy; the lookup logs so a
//! misconfigured table stays visible.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::types::FrequencyBand;
use crate::harmony::zones::{StatusLevel, ZoneMap, ZoneStatus};
use crate::rules::dependencies::{DependencyTable, HarmonicDependency, ZoneTarget};

/// An alert raised by a dependency rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarmonicAlert {
    pub id: Uuid,
    pub rule_id: String,
    pub message: String,
    pub source_zone: FrequencyBand,
    pub target_zone: ZoneTarget,
    /// Directive alerts come from event-triggered rules and stay active on a
    /// DirectiveBoard until the caller acknowledges them
    pub directive: bool,
}

/// Evaluates dependency rules against zone state and external events
#[derive(Debug, Clone, Default)]
pub struct HarmonicDependencyResolver {
    table: DependencyTable,
}

impl HarmonicDependencyResolver {
    pub fn new(table: DependencyTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &DependencyTable {
        &self.table
    }

    /// Alerts for planning work in `target`, given the current zone snapshot
    ///
    /// Reads only; zone values are externally owned. A source zone missing
    /// from the snapshot fails open.
    pub fn alerts_for_target(&self, target: FrequencyBand, zones: &ZoneMap) -> Vec<HarmonicAlert> {
        let mut alerts = Vec::new();
        for rule in self.table.rules_for_target(target) {
            match zones.get(&rule.source_zone) {
                None => {
                    tracing::debug!(
                        rule = %rule.id,
                        source = rule.source_zone.0,
                        "source zone not in snapshot; failing open"
                    );
                }
                Some(source) => {
                    if source.status() != StatusLevel::Optimal {
                        alerts.push(render_alert(rule, Some(source), false));
                    }
                }
            }
        }
        alerts
    }

    /// Directive alerts for an external event (e.g. "pest_detected")
    ///
    /// Fires every matching All-target rule unconditionally; no zone lookup.
    pub fn alerts_for_event(&self, event: &str) -> Vec<HarmonicAlert> {
        self.table
            .rules_for_event(event)
            .into_iter()
            .map(|rule| render_alert(rule, None, true))
            .collect()
    }
}

fn render_alert(
    rule: &HarmonicDependency,
    source: Option<&ZoneStatus>,
    directive: bool,
) -> HarmonicAlert {
    let message = match source {
        Some(z) => rule
            .alert_template
            .replace("{source}", &z.name)
            .replace("{value}", &format!("{:.0}", z.value()))
            .replace("{threshold}", &format!("{:.0}", z.threshold())),
        None => rule.alert_template.clone(),
    };
    HarmonicAlert {
        id: Uuid::new_v4(),
        rule_id: rule.id.clone(),
        message,
        source_zone: rule.source_zone,
        target_zone: rule.target_zone,
        directive,
    }
}

/// Holds directive alerts until the caller acknowledges them
#[derive(Debug, Clone, Default)]
pub struct DirectiveBoard {
    active: Vec<HarmonicAlert>,
}

impl DirectiveBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post(&mut self, alert: HarmonicAlert) {
        self.active.push(alert);
    }

    pub fn post_all(&mut self, alerts: Vec<HarmonicAlert>) {
        self.active.extend(alerts);
    }

    pub fn active(&self) -> &[HarmonicAlert] {
        &self.active
    }

    /// Dismiss one alert; returns false if the id is not active
    pub fn acknowledge(&mut self, id: Uuid) -> bool {
        let before = self.active.len();
        self.active.retain(|a| a.id != id);
        self.active.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Element;
    use crate::rules::dependencies::default_dependencies;

    fn resolver() -> HarmonicDependencyResolver {
        HarmonicDependencyResolver::new(DependencyTable::new(default_dependencies()))
    }

    fn zones(root_value: f64) -> ZoneMap {
        let mut zones = ZoneMap::default();
        zones.insert(
            FrequencyBand(396),
            ZoneStatus::new(FrequencyBand(396), "Root Chord", Element::Earth, root_value, 70.0),
        );
        zones.insert(
            FrequencyBand(528),
            ZoneStatus::new(FrequencyBand(528), "Heart", Element::Fire, 90.0, 70.0),
        );
        zones
    }

    #[test]
    fn test_deficient_source_raises_alert() {
        let alerts = resolver().alerts_for_target(FrequencyBand(528), &zones(40.0));
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].rule_id, "root-sustain");
        assert!(alerts[0].message.contains("Root Chord"));
        assert!(alerts[0].message.contains("40"));
        assert!(alerts[0].message.contains("70"));
        assert!(!alerts[0].directive);
    }

    #[test]
    fn test_optimal_source_is_quiet() {
        let alerts = resolver().alerts_for_target(FrequencyBand(528), &zones(85.0));
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_warning_source_still_alerts() {
        // Anything short of Optimal undermines the target
        let alerts = resolver().alerts_for_target(FrequencyBand(528), &zones(50.0));
        assert_eq!(alerts.len(), 1);
    }

    #[test]
    fn test_unknown_target_zone_fails_open() {
        let alerts = resolver().alerts_for_target(FrequencyBand(999), &zones(10.0));
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_missing_source_snapshot_fails_open() {
        let empty = ZoneMap::default();
        let alerts = resolver().alerts_for_target(FrequencyBand(528), &empty);
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_event_fires_without_zone_lookup() {
        // Empty snapshot on purpose: the event path never reads zone state
        let alerts = resolver().alerts_for_event("pest_detected");
        assert_eq!(alerts.len(), 1);
        assert!(alerts[0].directive);
        assert_eq!(alerts[0].target_zone, ZoneTarget::All);
        assert!(alerts[0].message.contains("companion"));
    }

    #[test]
    fn test_unmatched_event_is_no_result() {
        assert!(resolver().alerts_for_event("frost_warning").is_empty());
    }

    #[test]
    fn test_directive_board_acknowledge() {
        let mut board = DirectiveBoard::new();
        board.post_all(resolver().alerts_for_event("pest_detected"));
        assert_eq!(board.active().len(), 1);

        let id = board.active()[0].id;
        assert!(board.acknowledge(id));
        assert!(board.active().is_empty());

        // Acknowledging a dismissed alert reports false, not success
        assert!(!board.acknowledge(id));
    }
}
