//! Default catalog of exercise pools and media references.
//!
//! The catalog is an ordinary value: callers build one with
//! [`build_default_catalog`] and hand it to the generator and to plan decoding.

use std::collections::{HashMap, HashSet};

/// Host used for synthesized placeholder images
const PLACEHOLDER_BASE: &str = "https://placehold.co/600x400/1a1a1a/00d4ff?text=";

/// A muscle-group position within a day's template
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MuscleSlot {
    ChestPrimary,
    ChestIncline,
    ChestFly,
    BackVertical,
    BackRow,
    BackRear,
    LegsSquat,
    LegsUnilateral,
    LegsHinge,
    LegsCalf,
    ShoulderPress,
    ShoulderLateral,
    ShoulderRear,
    BicepsPrimary,
    BicepsSecondary,
    TricepsCompound,
    TricepsIsolation,
    CoreHold,
    CoreLegRaise,
    CoreCrunch,
}

impl MuscleSlot {
    pub const ALL: [MuscleSlot; 20] = [
        MuscleSlot::ChestPrimary,
        MuscleSlot::ChestIncline,
        MuscleSlot::ChestFly,
        MuscleSlot::BackVertical,
        MuscleSlot::BackRow,
        MuscleSlot::BackRear,
        MuscleSlot::LegsSquat,
        MuscleSlot::LegsUnilateral,
        MuscleSlot::LegsHinge,
        MuscleSlot::LegsCalf,
        MuscleSlot::ShoulderPress,
        MuscleSlot::ShoulderLateral,
        MuscleSlot::ShoulderRear,
        MuscleSlot::BicepsPrimary,
        MuscleSlot::BicepsSecondary,
        MuscleSlot::TricepsCompound,
        MuscleSlot::TricepsIsolation,
        MuscleSlot::CoreHold,
        MuscleSlot::CoreLegRaise,
        MuscleSlot::CoreCrunch,
    ];
}

/// Interchangeable exercises for one slot, canonical choice first
#[derive(Clone, Debug)]
pub struct ExercisePool {
    pub slot: MuscleSlot,
    pub candidates: Vec<String>,
}

/// Maps any name containing `keyword` (case-insensitive) to a curated entry
#[derive(Clone, Debug)]
pub struct KeywordRule {
    /// Lowercase keyword
    pub keyword: String,
    /// Name of the curated entry to reuse
    pub target: String,
}

/// Exercise pools plus the media lookup tables
#[derive(Clone, Debug)]
pub struct Catalog {
    curated: HashMap<String, String>,
    keyword_rules: Vec<KeywordRule>,
    pools: HashMap<MuscleSlot, ExercisePool>,
}

/// Builds the default catalog with the built-in pools and media references
pub fn build_default_catalog() -> Catalog {
    let mut curated = HashMap::new();
    for (name, url) in [
        (
            "Barbell Squat",
            "https://upload.wikimedia.org/wikipedia/commons/1/18/Bodyweight_Squats.gif",
        ),
        (
            "Pull-Ups",
            "https://upload.wikimedia.org/wikipedia/commons/e/e0/Chin-up_1.gif",
        ),
        (
            "Push-Ups",
            "https://upload.wikimedia.org/wikipedia/commons/b/b8/Push-up-2.gif",
        ),
        (
            "Bench Press",
            "https://upload.wikimedia.org/wikipedia/commons/2/29/SmithMachineBenchPress.gif",
        ),
        (
            "Barbell Curl",
            "https://upload.wikimedia.org/wikipedia/commons/0/07/Wide-grip-standing-biceps-curl-1.gif",
        ),
        (
            "Incline Press",
            "https://upload.wikimedia.org/wikipedia/commons/2/29/SmithMachineBenchPress.gif",
        ),
        // No animation yet; placeholders pinned
        (
            "Dumbbell Press",
            "https://placehold.co/600x400/1a1a1a/00d4ff?text=Dumbbell+Press",
        ),
        (
            "Cable Fly",
            "https://placehold.co/600x400/1a1a1a/00d4ff?text=Cable+Fly",
        ),
        (
            "Triceps Pushdown",
            "https://placehold.co/600x400/1a1a1a/00d4ff?text=Triceps+Pushdown",
        ),
    ] {
        curated.insert(name.to_string(), url.to_string());
    }

    // Evaluated in order; first hit wins
    let keyword_rules = [
        ("squat", "Barbell Squat"),
        ("push-up", "Push-Ups"),
        ("pull-up", "Pull-Ups"),
        ("bench press", "Bench Press"),
        ("curl", "Barbell Curl"),
    ]
    .into_iter()
    .map(|(keyword, target)| KeywordRule {
        keyword: keyword.into(),
        target: target.into(),
    })
    .collect();

    let mut pools = HashMap::new();
    let mut pool = |slot: MuscleSlot, candidates: [&str; 3]| {
        pools.insert(
            slot,
            ExercisePool {
                slot,
                candidates: candidates.iter().map(|c| c.to_string()).collect(),
            },
        );
    };

    // Chest
    pool(MuscleSlot::ChestPrimary, ["Bench Press", "Dumbbell Press", "Push-Ups"]);
    pool(
        MuscleSlot::ChestIncline,
        ["Incline Press", "Incline Dumbbell Press", "Machine Press"],
    );
    pool(MuscleSlot::ChestFly, ["Cable Fly", "Dumbbell Fly", "Pec Deck"]);

    // Back
    pool(
        MuscleSlot::BackVertical,
        ["Pull-Ups", "Lat Pulldown", "Assisted Pull-Ups"],
    );
    pool(
        MuscleSlot::BackRow,
        ["Barbell Row", "Dumbbell Row", "Seated Cable Row"],
    );
    pool(
        MuscleSlot::BackRear,
        ["Face Pull", "Rear Delt Fly", "Straight Arm Pulldown"],
    );

    // Legs
    pool(
        MuscleSlot::LegsSquat,
        ["Barbell Squat", "Dumbbell Goblet Squat", "Leg Press"],
    );
    pool(
        MuscleSlot::LegsUnilateral,
        ["Lunges", "Bulgarian Split Squat", "Step-Ups"],
    );
    pool(
        MuscleSlot::LegsHinge,
        ["Romanian Deadlift", "Leg Curl", "Hip Thrust"],
    );
    pool(
        MuscleSlot::LegsCalf,
        ["Standing Calf Raise", "Seated Calf Raise", "Jump Rope"],
    );

    // Shoulders
    pool(
        MuscleSlot::ShoulderPress,
        ["Overhead Press", "Dumbbell Shoulder Press", "Machine Press"],
    );
    pool(
        MuscleSlot::ShoulderLateral,
        ["Lateral Raise", "Cable Lateral Raise", "Dumbbell Lateral Raise"],
    );
    pool(
        MuscleSlot::ShoulderRear,
        ["Rear Delt Fly", "Face Pull", "Band Pull-Aparts"],
    );

    // Arms
    pool(
        MuscleSlot::BicepsPrimary,
        ["Barbell Curl", "Dumbbell Curl", "Cable Curl"],
    );
    pool(
        MuscleSlot::BicepsSecondary,
        ["Hammer Curl", "Preacher Curl", "Concentration Curl"],
    );
    pool(
        MuscleSlot::TricepsCompound,
        ["Close-Grip Bench", "Triceps Pushdown", "Dips"],
    );
    pool(
        MuscleSlot::TricepsIsolation,
        ["Overhead Extension", "Skull Crushers", "Cable Extension"],
    );

    // Core
    pool(MuscleSlot::CoreHold, ["Plank", "Dead Bug", "Hollow Hold"]);
    pool(
        MuscleSlot::CoreLegRaise,
        ["Leg Raises", "Hanging Knee Raises", "Floor Leg Raises"],
    );
    pool(
        MuscleSlot::CoreCrunch,
        ["Cable Crunch", "Bicycle Crunch", "Sit-Ups"],
    );

    Catalog {
        curated,
        keyword_rules,
        pools,
    }
}

impl Catalog {
    /// Resolve the media reference for an exercise name
    ///
    /// Total and pure. Resolution order:
    /// 1. Exact, case-sensitive curated entry
    /// 2. First keyword rule whose keyword appears in the lowercased name
    /// 3. A placeholder that embeds the percent-encoded name
    pub fn resolve_media(&self, name: &str) -> String {
        if let Some(url) = self.curated.get(name) {
            return url.clone();
        }

        let lower = name.to_lowercase();
        let keyword_hit = self
            .keyword_rules
            .iter()
            .find(|rule| lower.contains(&rule.keyword))
            .and_then(|rule| self.curated.get(&rule.target));
        if let Some(url) = keyword_hit {
            return url.clone();
        }

        placeholder_media(name)
    }

    /// The pool serving a slot
    pub fn pool(&self, slot: MuscleSlot) -> Option<&ExercisePool> {
        self.pools.get(&slot)
    }

    /// Exercises that may stand in for `name`
    ///
    /// Collects the other members of every pool containing `name`, in slot
    /// and pool order, without duplicates. Unknown names have no substitutes.
    pub fn substitutes(&self, name: &str) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for slot in MuscleSlot::ALL {
            let Some(pool) = self.pools.get(&slot) else {
                continue;
            };
            if !pool.candidates.iter().any(|c| c == name) {
                continue;
            }
            for candidate in &pool.candidates {
                if candidate != name && seen.insert(candidate.as_str()) {
                    out.push(candidate.as_str());
                }
            }
        }
        out
    }

    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for slot in MuscleSlot::ALL {
            let Some(pool) = self.pools.get(&slot) else {
                errors.push(format!("No pool defined for slot {:?}", slot));
                continue;
            };
            if pool.slot != slot {
                errors.push(format!(
                    "Pool key {:?} doesn't match pool.slot {:?}",
                    slot, pool.slot
                ));
            }
            if pool.candidates.len() != 3 {
                errors.push(format!(
                    "Pool {:?} has {} candidates, expected 3",
                    slot,
                    pool.candidates.len()
                ));
            }
            if pool.candidates.iter().any(|c| c.trim().is_empty()) {
                errors.push(format!("Pool {:?} has an empty candidate", slot));
            }
            let distinct: HashSet<_> = pool.candidates.iter().collect();
            if distinct.len() != pool.candidates.len() {
                errors.push(format!("Pool {:?} has duplicate candidates", slot));
            }
        }

        for rule in &self.keyword_rules {
            if rule.keyword.is_empty() || rule.keyword != rule.keyword.to_lowercase() {
                errors.push(format!(
                    "Keyword rule '{}' must be non-empty lowercase",
                    rule.keyword
                ));
            }
            if !self.curated.contains_key(&rule.target) {
                errors.push(format!(
                    "Keyword rule '{}' targets missing curated entry '{}'",
                    rule.keyword, rule.target
                ));
            }
        }

        errors
    }
}

fn placeholder_media(name: &str) -> String {
    format!("{}{}", PLACEHOLDER_BASE, urlencoding::encode(name))
}
