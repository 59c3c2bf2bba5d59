use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

/// Suffix appended to a pack's final name while it is being downloaded.
pub const TEMP_SUFFIX: &str = ".temp";

/// File name of a pack in the content store and on mirrors.
///
/// Derived only from the owning entry and the pack's add time, so the same
/// pack always maps to the same name and user input never reaches a path.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use datapack_fetch::pack_file_name;
///
/// let ts = Utc.timestamp_millis_opt(1_600_000_000_123).unwrap();
/// assert_eq!(pack_file_name("abc", ts), "abc-1600000000123.zip");
/// ```
pub fn pack_file_name(entry_id: &str, date_added: DateTime<Utc>) -> String {
    format!("{}-{}.zip", entry_id, date_added.timestamp_millis())
}

/// The `.temp` sibling a download of `dest` streams into.
pub fn temp_path_for(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().unwrap_or_default().to_os_string();
    name.push(TEMP_SUFFIX);
    dest.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_pack_file_name_is_stable() {
        let ts = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(pack_file_name("entry", ts), "entry-1577836800000.zip");
        assert_eq!(pack_file_name("entry", ts), pack_file_name("entry", ts));
    }

    #[test]
    fn test_temp_path_for() {
        let dest = Path::new("/store/entry-1.zip");
        assert_eq!(temp_path_for(dest), PathBuf::from("/store/entry-1.zip.temp"));
    }
}
