pub mod developer;
pub mod project;
pub mod technology;

pub use developer::*;
pub use project::*;
pub use technology::*;

use serde::Deserializer;
use time::Date;

// Calendar dates travel as `YYYY-MM-DD` on the wire.
time::serde::format_description!(pub iso_date, Date, "[year]-[month]-[day]");

/// Distinguishes an absent key (`None`) from an explicit `null` (`Some(None)`).
pub fn nullable_date<'de, D>(deserializer: D) -> Result<Option<Option<Date>>, D::Error>
where
    D: Deserializer<'de>,
{
    iso_date::option::deserialize(deserializer).map(Some)
}
