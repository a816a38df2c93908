use rand::distributions::Alphanumeric;
use rand::Rng;
use std::time::{SystemTime, UNIX_EPOCH};

/// Range fixture pet ids are drawn from. Ids outside of it are never created
/// by this suite, which is what [`MISSING_PET_ID`] relies on.
pub const PET_ID_RANGE: std::ops::Range<i64> = 100_000_000_000..1_000_000_000_000;

/// Pet id that no run of this suite creates.
pub const MISSING_PET_ID: i64 = 9_999_999_999;

pub fn unique_pet_id() -> i64 {
    rand::thread_rng().gen_range(PET_ID_RANGE)
}

/// `<prefix>_<unix millis>_<6 random alphanumerics>`, lowercased.
pub fn unique_username(prefix: &str) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect();
    format!("{prefix}_{millis}_{suffix}").to_lowercase()
}
