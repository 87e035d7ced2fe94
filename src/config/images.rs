//! `[images]` section configuration.
//!
//! Bare `<img src>` file names are rewritten to `{prefix}{stem}{suffix}`.

use super::defaults;
use educe::Educe;
use serde::Deserialize;

/// `[images]` section in relink.toml.
///
/// # Example
/// ```toml
/// [images]
/// prefix = "../Assets/"
/// suffix = "@2x.png"
/// ```
#[derive(Debug, Clone, Educe, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ImagesConfig {
    /// Directory prepended to the file stem.
    #[serde(default = "defaults::images::prefix")]
    #[educe(Default = defaults::images::prefix())]
    pub prefix: String,

    /// Scale marker and extension appended to the file stem.
    #[serde(default = "defaults::images::suffix")]
    #[educe(Default = defaults::images::suffix())]
    pub suffix: String,
}

impl ImagesConfig {
    pub fn asset_src(&self, stem: &str) -> String {
        format!("{}{stem}{}", self.prefix, self.suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::super::RelinkConfig;

    #[test]
    fn test_images_config_defaults() {
        let config: RelinkConfig = toml::from_str("").unwrap();
        assert_eq!(config.images.prefix, "../Assets/");
        assert_eq!(config.images.suffix, "@2x.png");
        assert_eq!(config.images.asset_src("Foo"), "../Assets/Foo@2x.png");
    }

    #[test]
    fn test_images_config_custom() {
        let config: RelinkConfig = toml::from_str(
            r#"
            [images]
            prefix = "/static/img/"
            suffix = ".webp"
        "#,
        )
        .unwrap();
        assert_eq!(config.images.asset_src("logo"), "/static/img/logo.webp");
    }

    #[test]
    fn test_images_config_partial_override() {
        let config: RelinkConfig = toml::from_str(
            r#"
            [images]
            suffix = "@3x.png"
        "#,
        )
        .unwrap();
        assert_eq!(config.images.prefix, "../Assets/");
        assert_eq!(config.images.asset_src("Foo"), "../Assets/Foo@3x.png");
    }
}
