use chrono::{Datelike, Local};
use std::path::PathBuf;

/// Default JSON export path: output/climate-dashboard-{YYMMDD}.json
pub fn generate_default_export_filename() -> PathBuf {
    let now = Local::now();
    let year = now.year() % 100;

    let filename = format!(
        "climate-dashboard-{:02}{:02}{:02}.json",
        year,
        now.month(),
        now.day()
    );
    PathBuf::from("output").join(filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_default_export_filename() {
        let filename = generate_default_export_filename();

        assert_eq!(filename.parent(), Some(std::path::Path::new("output")));

        let file_part = filename.file_name().unwrap().to_string_lossy();
        assert!(file_part.starts_with("climate-dashboard-"));
        assert!(file_part.ends_with(".json"));
        // climate-dashboard- + YYMMDD + .json
        assert_eq!(file_part.len(), 18 + 6 + 5);
    }
}
