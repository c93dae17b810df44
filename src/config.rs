use crate::models::sort_config::SortOptions;
use crate::models::OptionsFile;

/// 默认输出文件名模板
pub const DEFAULT_OUTPUT_TEMPLATE: &str = "{folder_name}";

/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 输出文件名模板（支持 `{folder_name}`）
    pub output_name_template: String,
    /// 排序选项（长度保留原始文本，构造排序配置时再校验）
    pub sort: SortOptions,
    /// 选项文件路径（TOML），其中的值覆盖环境变量
    pub options_file: Option<String>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    /// 运行报告（JSON）
    pub report_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_name_template: DEFAULT_OUTPUT_TEMPLATE.to_string(),
            sort: SortOptions::default(),
            options_file: None,
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
            report_file: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            output_name_template: std::env::var("OUTPUT_NAME_TEMPLATE").unwrap_or(default.output_name_template),
            sort: SortOptions {
                mode: std::env::var("SORT_MODE").unwrap_or(default.sort.mode),
                reverse: std::env::var("SORT_REVERSE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.sort.reverse),
                prefix_length: std::env::var("PREFIX_LENGTH").unwrap_or(default.sort.prefix_length),
                suffix_length: std::env::var("SUFFIX_LENGTH").unwrap_or(default.sort.suffix_length),
            },
            options_file: std::env::var("OPTIONS_FILE").ok().or(default.options_file),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            report_file: std::env::var("REPORT_FILE").ok().or(default.report_file),
        }
    }

    /// 用选项文件中的值覆盖当前配置
    pub fn merge_options(&mut self, options: OptionsFile) {
        if let Some(template) = options.output_name_template {
            self.output_name_template = template;
        }
        if let Some(sort) = options.sort {
            self.sort = sort;
        }
    }
}
