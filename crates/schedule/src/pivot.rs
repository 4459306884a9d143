use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use mealsub_shared::ScheduledMeal;
use serde::Serialize;

/// All meals delivered on one date, keyed by meal-type name.
///
/// Every meal type known to the pivot has an entry here, empty when nothing
/// of that type is delivered that day, so the preview renders an explicit
/// "no meal" cell instead of silently dropping the column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayBucket {
    pub date: NaiveDate,
    pub day_name: String,
    pub day_ordinal: u32,
    pub meals: BTreeMap<String, Vec<ScheduledMeal>>,
}

impl DayBucket {
    pub fn meals_of(&self, meal_type: &str) -> &[ScheduledMeal] {
        self.meals.get(meal_type).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Date × meal-type pivot of a generated plan, ready for the preview grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePivot {
    pub days: Vec<DayBucket>,
    pub meal_types: Vec<String>,
}

/// Group a flat scheduled-meal list into day buckets.
///
/// Days come back sorted ascending by delivery date, meal types sorted
/// lexicographically across the whole input.
pub fn pivot(meals: &[ScheduledMeal]) -> SchedulePivot {
    if meals.is_empty() {
        return SchedulePivot::default();
    }

    let meal_types: BTreeSet<String> = meals
        .iter()
        .map(|meal| meal.meal_type_name.clone())
        .collect();

    let mut by_date: BTreeMap<NaiveDate, Vec<&ScheduledMeal>> = BTreeMap::new();
    for meal in meals {
        by_date.entry(meal.delivery_date).or_default().push(meal);
    }

    let days = by_date
        .into_iter()
        .map(|(date, entries)| {
            let mut bucket: BTreeMap<String, Vec<ScheduledMeal>> = meal_types
                .iter()
                .map(|meal_type| (meal_type.clone(), Vec::new()))
                .collect();

            for meal in &entries {
                bucket
                    .entry(meal.meal_type_name.clone())
                    .or_default()
                    .push((*meal).clone());
            }

            DayBucket {
                date,
                day_name: entries[0].day_name.clone(),
                day_ordinal: entries[0].day_ordinal,
                meals: bucket,
            }
        })
        .collect();

    SchedulePivot {
        days,
        meal_types: meal_types.into_iter().collect(),
    }
}
