use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Athlete attributes used to bucket ladder entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AthleteProfile {
    pub birth_date: Option<NaiveDate>,
    /// Kilograms.
    pub weight: Option<f64>,
    /// Centimeters.
    pub height: Option<f64>,
    pub city: Option<String>,
    pub district: Option<String>,
}

/// Bucket labels for multi-dimensional ladder filtering. Unknown buckets are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterTags {
    pub age_group: String,
    pub weight_class: String,
    pub height_class: String,
    pub region_city: String,
    pub region_district: String,
}

impl FilterTags {
    pub fn from_profile(profile: &AthleteProfile, today: NaiveDate) -> Self {
        let age_group = profile
            .birth_date
            .and_then(|birth_date| age_on(birth_date, today))
            .map(age_group)
            .unwrap_or_default();

        let weight_class = profile
            .weight
            .filter(|weight| weight.is_finite() && *weight > 0.0)
            .map(weight_class)
            .unwrap_or_default();

        let height_class = profile
            .height
            .filter(|height| height.is_finite() && *height > 0.0)
            .map(height_class)
            .unwrap_or_default();

        Self {
            age_group,
            weight_class,
            height_class,
            region_city: trimmed(profile.city.as_deref()),
            region_district: trimmed(profile.district.as_deref()),
        }
    }
}

/// Whole years between `birth_date` and `today`; `None` for future birth dates.
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> Option<u32> {
    let mut age = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    u32::try_from(age).ok()
}

fn age_group(age: u32) -> String {
    let label = match age {
        0..=19 => "under-20",
        20..=29 => "20-29",
        30..=39 => "30-39",
        40..=49 => "40-49",
        50..=59 => "50-59",
        60..=69 => "60-69",
        _ => "70+",
    };
    label.to_string()
}

fn weight_class(weight: f64) -> String {
    if weight < 50.0 {
        return "under-50kg".to_string();
    }
    if weight >= 110.0 {
        return "110kg+".to_string();
    }
    let lower = (weight / 10.0).floor() as u32 * 10;
    format!("{}-{}kg", lower, lower + 10)
}

fn height_class(height: f64) -> String {
    if height < 150.0 {
        return "under-150cm".to_string();
    }
    if height >= 200.0 {
        return "200cm+".to_string();
    }
    let lower = (height / 10.0).floor() as u32 * 10;
    format!("{}-{}cm", lower, lower + 9)
}

fn trimmed(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or_default().to_string()
}
