//! Gate evaluation - pass/fail timing rules per task class
//!
//! The lunar gates compose their clauses with OR (a favorable category OR a
//! favorable sign is enough). The seed-saving gate is the exception: it ANDs
//! a dry element with a waning-or-full category. The seasonal gate applies to
//! every class. A task is blocked iff any applicable gate fails.

use serde::{Deserialize, Serialize};

use crate::astro::lunar::{LunarCategory, LunarPhase, LunarState};
use crate::astro::zodiac::ZodiacSign;
use crate::core::types::{Element, MonthDay};
use crate::rules::movements::{MovementTable, SeasonalMovement};

/// What part of the plant a task works on; selects which gates apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskClass {
    Root,
    Leaf,
    Fruit,
    SeedSaving,
    SeasonBound,
}

/// A task to be gated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDescriptor {
    pub class: TaskClass,
    pub crop: String,
}

/// Outcome of one gate; immutable once constructed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateResult {
    pub passed: bool,
    pub gate: String,
    pub message: String,
    pub resolution: Option<String>,
    pub wait_until: Option<WaitUntil>,
}

/// The movement to wait for when a crop is out of season
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitUntil {
    pub movement: String,
    pub start: MonthDay,
}

/// Simulated sky for a single evaluation
///
/// When supplied, these three fields fully replace the computed state for the
/// call; there is no partial merge. The fine-grained phase is not part of the
/// override, so the fruit gate's waxing-gibbous clause evaluates against the
/// override category alone.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LunarOverride {
    pub category: LunarCategory,
    pub element: Element,
    pub zodiac_sign: ZodiacSign,
}

/// The sky as one gate evaluation sees it
#[derive(Debug, Clone, Copy)]
struct SkyView {
    phase: Option<LunarPhase>,
    category: LunarCategory,
    zodiac_sign: ZodiacSign,
    element: Element,
}

impl SkyView {
    fn from_state(state: &LunarState) -> Self {
        Self {
            phase: Some(state.phase),
            category: state.category,
            zodiac_sign: state.zodiac_sign,
            element: state.element,
        }
    }

    fn from_override(ov: &LunarOverride) -> Self {
        Self {
            phase: None,
            category: ov.category,
            zodiac_sign: ov.zodiac_sign,
            element: ov.element,
        }
    }
}

/// Evaluates all gates applicable to a task
#[derive(Debug, Clone, Default)]
pub struct GateEvaluator {
    movements: MovementTable,
}

impl GateEvaluator {
    pub fn new(movements: MovementTable) -> Self {
        Self { movements }
    }

    pub fn movements(&self) -> &MovementTable {
        &self.movements
    }

    /// Evaluate every gate that applies to the task's class
    ///
    /// `simulated` fully replaces the computed category/element/sign for this
    /// call when present. The seasonal gate always runs against the supplied
    /// active movement.
    pub fn evaluate(
        &self,
        task: &TaskDescriptor,
        lunar: &LunarState,
        movement: &SeasonalMovement,
        simulated: Option<&LunarOverride>,
    ) -> Vec<GateResult> {
        let sky = match simulated {
            Some(ov) => SkyView::from_override(ov),
            None => SkyView::from_state(lunar),
        };

        let mut results = Vec::new();
        match task.class {
            TaskClass::Root => results.push(root_gate(&sky)),
            TaskClass::Leaf => results.push(leaf_gate(&sky)),
            TaskClass::Fruit => results.push(fruit_gate(&sky)),
            TaskClass::SeedSaving => results.push(seed_saving_gate(&sky)),
            TaskClass::SeasonBound => {}
        }
        results.push(self.seasonal_gate(task, movement));
        results
    }
}

/// True iff any applicable gate failed
pub fn is_blocked(results: &[GateResult]) -> bool {
    results.iter().any(|r| !r.passed)
}

const EARTH_TRIAD: [ZodiacSign; 3] = [ZodiacSign::Taurus, ZodiacSign::Virgo, ZodiacSign::Capricorn];
const WATER_TRIAD: [ZodiacSign; 3] = [ZodiacSign::Cancer, ZodiacSign::Scorpio, ZodiacSign::Pisces];
const FIRE_TRIAD: [ZodiacSign; 3] = [ZodiacSign::Aries, ZodiacSign::Leo, ZodiacSign::Sagittarius];

fn root_gate(sky: &SkyView) -> GateResult {
    let passed = sky.category == LunarCategory::Waning || EARTH_TRIAD.contains(&sky.zodiac_sign);
    GateResult {
        passed,
        gate: "lunar".into(),
        message: if passed {
            format!(
                "Moon is {} in {}; root work is favored",
                sky.category.name(),
                sky.zodiac_sign.name()
            )
        } else {
            format!(
                "Moon is {} in {}; root work wants a waning moon or an earth sign",
                sky.category.name(),
                sky.zodiac_sign.name()
            )
        },
        resolution: (!passed)
            .then(|| "Wait for the waning moon, or a Taurus, Virgo, or Capricorn day".into()),
        wait_until: None,
    }
}

fn leaf_gate(sky: &SkyView) -> GateResult {
    let passed = matches!(sky.category, LunarCategory::Waxing | LunarCategory::New)
        || WATER_TRIAD.contains(&sky.zodiac_sign);
    GateResult {
        passed,
        gate: "lunar".into(),
        message: if passed {
            format!(
                "Moon is {} in {}; leaf work is favored",
                sky.category.name(),
                sky.zodiac_sign.name()
            )
        } else {
            format!(
                "Moon is {} in {}; leaf work wants a waxing or new moon, or a water sign",
                sky.category.name(),
                sky.zodiac_sign.name()
            )
        },
        resolution: (!passed)
            .then(|| "Wait for the waxing moon, or a Cancer, Scorpio, or Pisces day".into()),
        wait_until: None,
    }
}

fn fruit_gate(sky: &SkyView) -> GateResult {
    let passed = sky.category == LunarCategory::Full
        || sky.phase == Some(LunarPhase::WaxingGibbous)
        || FIRE_TRIAD.contains(&sky.zodiac_sign);
    GateResult {
        passed,
        gate: "lunar".into(),
        message: if passed {
            format!(
                "Moon is {} in {}; fruit work is favored",
                sky.category.name(),
                sky.zodiac_sign.name()
            )
        } else {
            format!(
                "Moon is {} in {}; fruit work wants a full or waxing gibbous moon, or a fire sign",
                sky.category.name(),
                sky.zodiac_sign.name()
            )
        },
        resolution: (!passed)
            .then(|| "Wait for the full moon, or an Aries, Leo, or Sagittarius day".into()),
        wait_until: None,
    }
}

/// Seed saving needs a dry day AND a settled moon; both clauses must hold.
fn seed_saving_gate(sky: &SkyView) -> GateResult {
    let dry = sky.element.is_dry();
    let settled = matches!(sky.category, LunarCategory::Waning | LunarCategory::Full);
    let passed = dry && settled;
    GateResult {
        passed,
        gate: "seed-saving".into(),
        message: if passed {
            format!(
                "Dry {:?} day under a {} moon; seeds will keep",
                sky.element,
                sky.category.name()
            )
        } else {
            format!(
                "{:?} day under a {} moon; seed saving needs a fire or air day and a waning or full moon",
                sky.element,
                sky.category.name()
            )
        },
        resolution: (!passed)
            .then(|| "Wait for a fire or air sign day during the waning or full moon".into()),
        wait_until: None,
    }
}

impl GateEvaluator {
    fn seasonal_gate(&self, task: &TaskDescriptor, movement: &SeasonalMovement) -> GateResult {
        match movement.blocked_token_for(&task.crop) {
            None => GateResult {
                passed: true,
                gate: "seasonal".into(),
                message: format!("'{}' is in season during {}", task.crop, movement.name),
                resolution: None,
                wait_until: None,
            },
            Some(token) => {
                let wait_until = self.movements.find_allowing(&task.crop).map(|m| WaitUntil {
                    movement: m.name.clone(),
                    start: m.start,
                });
                tracing::debug!(crop = %task.crop, token, movement = %movement.name, "seasonal gate blocked");
                GateResult {
                    passed: false,
                    gate: "seasonal".into(),
                    message: format!(
                        "'{}' is blocked during {}: {}",
                        task.crop, movement.name, movement.block_message
                    ),
                    resolution: wait_until.as_ref().map(|w| {
                        format!("Hold off until {} opens on {}", w.movement, w.start)
                    }),
                    wait_until,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::movements::default_movements;

    fn sky(category: LunarCategory, sign: ZodiacSign) -> LunarOverride {
        LunarOverride {
            category,
            element: sign.element(),
            zodiac_sign: sign,
        }
    }

    fn evaluator() -> GateEvaluator {
        GateEvaluator::new(MovementTable::default())
    }

    fn any_state() -> LunarState {
        use chrono::TimeZone;
        LunarState::at(chrono::Utc.with_ymd_and_hms(2026, 8, 27, 0, 0, 0).unwrap())
    }

    fn current_movement(date: (u32, u32)) -> SeasonalMovement {
        let md = MonthDay::new(date.0, date.1).unwrap();
        MovementTable::default()
            .resolve(md)
            .cloned()
            .expect("default table resolves")
    }

    fn single_gate(
        class: TaskClass,
        crop: &str,
        ov: LunarOverride,
        date: (u32, u32),
    ) -> Vec<GateResult> {
        evaluator().evaluate(
            &TaskDescriptor {
                class,
                crop: crop.into(),
            },
            &any_state(),
            &current_movement(date),
            Some(&ov),
        )
    }

    #[test]
    fn test_root_gate_or_semantics() {
        // Waning + fire sign still passes: OR, not AND
        let results = single_gate(
            TaskClass::Root,
            "Carrot",
            sky(LunarCategory::Waning, ZodiacSign::Leo),
            (2, 1),
        );
        assert!(results[0].passed);

        // Waxing + earth sign passes on the sign clause alone
        let results = single_gate(
            TaskClass::Root,
            "Carrot",
            sky(LunarCategory::Waxing, ZodiacSign::Taurus),
            (2, 1),
        );
        assert!(results[0].passed);

        // Waxing + fire sign fails both clauses
        let results = single_gate(
            TaskClass::Root,
            "Carrot",
            sky(LunarCategory::Waxing, ZodiacSign::Leo),
            (2, 1),
        );
        assert!(!results[0].passed);
        assert!(results[0].message.contains("waxing"));
        assert!(results[0].message.contains("Leo"));
        assert!(results[0].resolution.is_some());
    }

    #[test]
    fn test_leaf_gate() {
        let pass = single_gate(
            TaskClass::Leaf,
            "Kale",
            sky(LunarCategory::New, ZodiacSign::Aries),
            (4, 1),
        );
        assert!(pass[0].passed);

        // Waning but water sign: passes on the sign clause
        let pass = single_gate(
            TaskClass::Leaf,
            "Kale",
            sky(LunarCategory::Waning, ZodiacSign::Scorpio),
            (4, 1),
        );
        assert!(pass[0].passed);

        let fail = single_gate(
            TaskClass::Leaf,
            "Kale",
            sky(LunarCategory::Full, ZodiacSign::Capricorn),
            (4, 1),
        );
        assert!(!fail[0].passed);
    }

    #[test]
    fn test_fruit_gate_phase_clause_with_real_state() {
        use chrono::{Duration, TimeZone};
        // 10 days after the reference new moon: waxing gibbous
        let epoch = chrono::Utc
            .timestamp_opt(crate::astro::lunar::EPOCH_UNIX_SECS, 0)
            .unwrap();
        let state = LunarState::at(epoch + Duration::days(10));
        assert_eq!(state.phase, LunarPhase::WaxingGibbous);

        let results = evaluator().evaluate(
            &TaskDescriptor {
                class: TaskClass::Fruit,
                crop: "Tomato".into(),
            },
            &state,
            &current_movement((6, 1)),
            None,
        );
        // Passes on the waxing-gibbous clause even though category is waxing
        assert!(results[0].passed);
    }

    #[test]
    fn test_seed_saving_truth_table() {
        // AND semantics across all 16 element x category combinations
        let signs = [
            (ZodiacSign::Leo, Element::Fire),
            (ZodiacSign::Taurus, Element::Earth),
            (ZodiacSign::Libra, Element::Air),
            (ZodiacSign::Pisces, Element::Water),
        ];
        let categories = [
            LunarCategory::New,
            LunarCategory::Waxing,
            LunarCategory::Full,
            LunarCategory::Waning,
        ];

        for (sign, element) in signs {
            for category in categories {
                let ov = LunarOverride {
                    category,
                    element,
                    zodiac_sign: sign,
                };
                let results = single_gate(TaskClass::SeedSaving, "Bean", ov, (9, 1));
                let expected = matches!(element, Element::Fire | Element::Air)
                    && matches!(category, LunarCategory::Waning | LunarCategory::Full);
                assert_eq!(
                    results[0].passed, expected,
                    "element {:?} category {:?}",
                    element, category
                );
            }
        }
    }

    #[test]
    fn test_override_fully_replaces_state() {
        use chrono::TimeZone;
        // Real state at the epoch is a new moon; the override says waning
        let epoch = chrono::Utc
            .timestamp_opt(crate::astro::lunar::EPOCH_UNIX_SECS, 0)
            .unwrap();
        let state = LunarState::at(epoch);
        assert_eq!(state.category, LunarCategory::New);

        let results = evaluator().evaluate(
            &TaskDescriptor {
                class: TaskClass::Root,
                crop: "Carrot".into(),
            },
            &state,
            &current_movement((2, 1)),
            Some(&sky(LunarCategory::Waning, ZodiacSign::Leo)),
        );
        assert!(results[0].passed);
        assert!(results[0].message.contains("waning"));
    }

    #[test]
    fn test_seasonal_gate_wait_until() {
        let results = single_gate(
            TaskClass::SeasonBound,
            "Watermelon",
            sky(LunarCategory::Full, ZodiacSign::Leo),
            (2, 1), // Root Whisper
        );
        // Season-bound tasks get exactly the seasonal gate
        assert_eq!(results.len(), 1);
        let seasonal = &results[0];
        assert!(!seasonal.passed);
        let wait = seasonal.wait_until.as_ref().expect("wait_until populated");
        assert_eq!(wait.movement, "Solar Peak");
        assert_eq!(wait.start, MonthDay::new(5, 21).unwrap());
    }

    #[test]
    fn test_seasonal_gate_no_allowing_movement_omits_wait() {
        // Empty every allow list so the wait_until scan finds nothing
        let mut movements = default_movements();
        for m in &mut movements {
            m.allowed_crops.clear();
        }
        let eval = GateEvaluator::new(MovementTable::new(movements));
        let results = eval.evaluate(
            &TaskDescriptor {
                class: TaskClass::SeasonBound,
                crop: "Watermelon".into(),
            },
            &any_state(),
            &current_movement((2, 1)),
            None,
        );
        assert!(!results[0].passed);
        assert!(results[0].wait_until.is_none());
        assert!(results[0].resolution.is_none());
    }

    #[test]
    fn test_gate_result_serializes() {
        let results = single_gate(
            TaskClass::Root,
            "Carrot",
            sky(LunarCategory::Waning, ZodiacSign::Virgo),
            (2, 1),
        );
        let json = serde_json::to_string(&results[0]).unwrap();
        assert!(json.contains("\"passed\":true"));
        assert!(json.contains("\"gate\":\"lunar\""));
    }

    #[test]
    fn test_aggregate_blocked_is_or_of_failures() {
        // Lunar gate passes, seasonal gate fails: task is blocked
        let results = single_gate(
            TaskClass::Fruit,
            "Watermelon",
            sky(LunarCategory::Full, ZodiacSign::Leo),
            (2, 1),
        );
        assert_eq!(results.len(), 2);
        assert!(results[0].passed);
        assert!(!results[1].passed);
        assert!(is_blocked(&results));

        // Both pass in Solar Peak under a full moon
        let results = single_gate(
            TaskClass::Fruit,
            "Watermelon",
            sky(LunarCategory::Full, ZodiacSign::Leo),
            (6, 15),
        );
        assert!(!is_blocked(&results));
    }
}
