#[cfg(test)]
mod config_tests {
    use crate::config::GlimpseConfig;
    use crate::host::DisplayPosition;
    use std::io::Write;

    #[test]
    fn defaults_match_documented_values() {
        let config = GlimpseConfig::default();
        assert!(config.enabled);
        assert_eq!(config.image_size, 16);
        assert_eq!(config.svg_color, "#ffffff");
        assert_eq!(config.position, DisplayPosition::Gutter);
        assert_eq!(config.cache_max_age_days, 7);
        assert_eq!(config.cache_max_age().as_secs(), 7 * 86_400);
    }

    #[test]
    fn partial_toml_keeps_remaining_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(file, "position = \"inline\"\nimage_size = 20").expect("write");

        let config = GlimpseConfig::load(Some(file.path()));
        assert_eq!(config.position, DisplayPosition::Inline);
        assert_eq!(config.image_size, 20);
        assert!(config.enabled);
        assert_eq!(config.cache_max_age_days, 7);
    }

    #[test]
    fn malformed_toml_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(file, "image_size = \"not a number\"").expect("write");

        let config = GlimpseConfig::load(Some(file.path()));
        assert_eq!(config.image_size, 16);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = GlimpseConfig::load(Some(std::path::Path::new("/nonexistent/glimpse.toml")));
        assert!(config.enabled);
    }
}
