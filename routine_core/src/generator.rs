//! Program generator turning a training profile into a weekly plan.
//!
//! Generation is a pure function of the profile and the catalog:
//! 1. Pick the split for the requested frequency
//! 2. Expand each workout label into its slot template
//! 3. Resolve every slot to one exercise under the equipment rule
//! 4. Attach media references and place the workouts on their weekdays

use crate::catalog::{Catalog, MuscleSlot};
use crate::{
    DayPlan, Equipment, Error, ExercisePrescription, Result, TrainingProfile, WeeklyPlan,
};

/// Keywords that mark an exercise as doable without equipment
pub const BODYWEIGHT_KEYWORDS: [&str; 5] = ["Push-Up", "Lunge", "Squat", "Dip", "Plank"];

/// Keywords that mark an exercise as doable with home dumbbells
pub const HOME_KEYWORDS: [&str; 2] = ["Dumbbell", "Goblet"];

/// One slot in a workout template with its fixed volume
#[derive(Clone, Copy, Debug)]
pub struct SlotTarget {
    pub slot: MuscleSlot,
    pub sets: u32,
    pub rep_range: &'static str,
}

const fn target(slot: MuscleSlot, sets: u32, rep_range: &'static str) -> SlotTarget {
    SlotTarget {
        slot,
        sets,
        rep_range,
    }
}

/// Weekday index and label for each workout of a split
pub fn split_for_frequency(frequency: u8) -> Result<&'static [(usize, &'static str)]> {
    match frequency {
        3 => Ok(&[(0, "Push"), (2, "Pull"), (4, "Legs")]),
        4 => Ok(&[
            (0, "Chest & Triceps"),
            (1, "Back & Biceps"),
            (3, "Legs"),
            (4, "Shoulders & Abs"),
        ]),
        other => Err(Error::Validation(format!(
            "unsupported training frequency {} (expected 3 or 4)",
            other
        ))),
    }
}

/// Ordered slot template for a workout label
pub fn template_for(label: &str) -> Option<&'static [SlotTarget]> {
    use MuscleSlot::*;

    const PUSH: &[SlotTarget] = &[
        target(ChestPrimary, 3, "8-12"),
        target(ChestIncline, 3, "8-12"),
        target(ShoulderPress, 3, "10-15"),
        target(TricepsCompound, 3, "10-15"),
    ];
    const PULL: &[SlotTarget] = &[
        target(BackVertical, 3, "8-12"),
        target(BackRow, 3, "8-12"),
        target(BackRear, 3, "12-15"),
        target(BicepsPrimary, 3, "10-15"),
    ];
    const LEGS: &[SlotTarget] = &[
        target(LegsSquat, 3, "6-10"),
        target(LegsUnilateral, 3, "10-12"),
        target(LegsHinge, 3, "10-12"),
        target(CoreHold, 3, "30-60s"),
    ];
    const CHEST_TRICEPS: &[SlotTarget] = &[
        target(ChestPrimary, 3, "8-12"),
        target(ChestIncline, 3, "10-12"),
        target(ChestFly, 3, "12-15"),
        target(TricepsCompound, 3, "10-15"),
        target(TricepsIsolation, 3, "10-15"),
    ];
    const BACK_BICEPS: &[SlotTarget] = &[
        target(BackVertical, 3, "8-12"),
        target(BackRow, 3, "8-12"),
        target(BackRear, 3, "12-15"),
        target(BicepsPrimary, 3, "10-15"),
        target(BicepsSecondary, 3, "10-15"),
    ];
    const SHOULDERS_ABS: &[SlotTarget] = &[
        target(ShoulderPress, 3, "8-12"),
        target(ShoulderLateral, 3, "12-15"),
        target(ShoulderRear, 3, "15-20"),
        target(CoreHold, 3, "30-60s"),
        target(CoreLegRaise, 3, "15-20"),
    ];

    match label {
        "Push" => Some(PUSH),
        "Pull" => Some(PULL),
        "Legs" => Some(LEGS),
        "Chest & Triceps" => Some(CHEST_TRICEPS),
        "Back & Biceps" => Some(BACK_BICEPS),
        "Shoulders & Abs" => Some(SHOULDERS_ABS),
        _ => None,
    }
}

/// Pick one candidate for a slot under the equipment rule
///
/// Bodyweight and Home take the first candidate containing one of their
/// keywords (case-sensitive); otherwise, and for Gym, the first candidate wins.
pub fn select_candidate<'a>(candidates: &'a [String], equipment: Equipment) -> Option<&'a str> {
    let keywords: &[&str] = match equipment {
        Equipment::Bodyweight => &BODYWEIGHT_KEYWORDS,
        Equipment::Home => &HOME_KEYWORDS,
        Equipment::Gym => &[],
    };

    candidates
        .iter()
        .find(|c| keywords.iter().any(|k| c.contains(k)))
        .or_else(|| candidates.first())
        .map(String::as_str)
}

/// Generate a weekly plan for a profile
///
/// `experience_level` and `goal` are carried on the profile but do not
/// change selection or volume.
pub fn generate(catalog: &Catalog, profile: &TrainingProfile) -> Result<WeeklyPlan> {
    let split = split_for_frequency(profile.frequency)?;

    let mut plan = WeeklyPlan::new();
    for &(day_index, label) in split {
        let template = template_for(label).ok_or_else(|| {
            Error::CatalogValidation(format!("no template for workout '{}'", label))
        })?;

        let mut exercises = Vec::with_capacity(template.len());
        for slot_target in template {
            let pool = catalog.pool(slot_target.slot).ok_or_else(|| {
                Error::CatalogValidation(format!("no pool for slot {:?}", slot_target.slot))
            })?;
            let name = select_candidate(&pool.candidates, profile.equipment).ok_or_else(|| {
                Error::CatalogValidation(format!("pool {:?} is empty", slot_target.slot))
            })?;

            tracing::debug!("{} / {:?}: selected {}", label, slot_target.slot, name);

            exercises.push(ExercisePrescription {
                name: name.to_string(),
                sets: slot_target.sets,
                rep_range: slot_target.rep_range.to_string(),
                media_ref: catalog.resolve_media(name),
            });
        }

        plan.set_day(day_index, DayPlan::new(label, exercises))?;
    }

    tracing::info!(
        "Generated {}-day plan ({} / {} / {})",
        profile.frequency,
        profile.experience_level,
        profile.goal,
        profile.equipment
    );

    Ok(plan)
}
