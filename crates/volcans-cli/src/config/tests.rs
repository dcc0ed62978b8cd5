#[cfg(test)]
mod tests {
    use super::super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.analysis.count, 10);
        assert_eq!(config.analysis.suggestion_limit, 10);
        assert!(!config.output.write_csv);
        assert!(!config.output.open_browser);
        assert_eq!(config.output.dir, PathBuf::from("."));
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config = Config::from_toml(
            "[data]\ndir = \"/srv/volcans\"\n\n[analysis]\ncount = 25\n",
        )
        .unwrap();
        assert_eq!(config.data.dir, PathBuf::from("/srv/volcans"));
        assert_eq!(config.analysis.count, 25);
        assert_eq!(config.analysis.suggestion_limit, default_suggestion_limit());
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let err = Config::from_toml("[analysis]\ncount = \"many\"\n").unwrap_err();
        let err = err.downcast::<volcans_common::VolcansError>().unwrap();
        assert!(matches!(err, volcans_common::VolcansError::Config(_)));
    }

    #[test]
    fn test_missing_explicit_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(&dir.path().join("nope.toml"))).unwrap();
        assert_eq!(config.analysis.count, default_count());
    }

    #[test]
    fn test_load_reads_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("volcans.toml");
        std::fs::write(&path, "[output]\nwrite_csv = true\nopen_browser = true\n").unwrap();
        let config = Config::load(Some(&path)).unwrap();
        assert!(config.output.write_csv);
        assert!(config.output.open_browser);
    }
}
