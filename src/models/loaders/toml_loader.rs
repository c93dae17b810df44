use crate::models::sort_config::SortOptions;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tokio::fs;

/// 选项文件内容
///
/// ```toml
/// output_name_template = "合集_{folder_name}"
///
/// [sort]
/// mode = "prefix"
/// reverse = false
/// prefix_length = "8"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OptionsFile {
    pub output_name_template: Option<String>,
    pub sort: Option<SortOptions>,
}

/// 从 TOML 文件加载选项
pub async fn load_options_file(toml_file_path: &Path) -> Result<OptionsFile> {
    let content = fs::read_to_string(toml_file_path)
        .await
        .with_context(|| format!("无法读取选项文件: {}", toml_file_path.display()))?;

    parse_options(&content)
        .with_context(|| format!("无法解析选项文件: {}", toml_file_path.display()))
}

/// 解析选项文本
///
/// 长度字段既可以写成字符串也可以写成整数
pub fn parse_options(content: &str) -> Result<OptionsFile> {
    let mut value: toml::Table = toml::from_str(content)?;

    if let Some(toml::Value::Table(sort)) = value.get_mut("sort") {
        for key in ["prefix_length", "suffix_length"] {
            let text = match sort.get(key) {
                Some(toml::Value::Integer(n)) => n.to_string(),
                _ => continue,
            };
            sort.insert(key.to_string(), toml::Value::String(text));
        }
    }

    let options: OptionsFile = toml::Value::Table(value).try_into()?;
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integer_and_string_lengths() {
        let options = parse_options(
            r#"
            output_name_template = "book_{folder_name}"

            [sort]
            mode = "suffix"
            reverse = true
            prefix_length = 4
            suffix_length = "x"
            "#,
        )
        .unwrap();

        let sort = options.sort.unwrap();
        assert_eq!(options.output_name_template.as_deref(), Some("book_{folder_name}"));
        assert_eq!(sort.mode, "suffix");
        assert!(sort.reverse);
        assert_eq!(sort.prefix_length, "4");
        assert_eq!(sort.suffix_length, "x");
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let options = parse_options("").unwrap();
        assert!(options.output_name_template.is_none());
        assert!(options.sort.is_none());

        let options = parse_options("[sort]\nmode = \"time\"\n").unwrap();
        let sort = options.sort.unwrap();
        assert_eq!(sort.prefix_length, SortOptions::default().prefix_length);
    }

    #[test]
    fn test_load_missing_file_fails_with_context() {
        let err = tokio_test::block_on(load_options_file(Path::new("/no/such/options.toml")))
            .unwrap_err();
        assert!(err.to_string().contains("无法读取选项文件"));
    }
}
