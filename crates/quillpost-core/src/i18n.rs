use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Zh,
}

impl Language {
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "en-gb" => Some(Self::En),
            "zh" | "zh-cn" | "zh-hans" => Some(Self::Zh),
            _ => None,
        }
    }

    #[must_use]
    pub fn texts(self) -> &'static Texts {
        match self {
            Self::En => &EN,
            Self::Zh => &ZH,
        }
    }
}

/// User-facing strings for update notifications and the command-line front
/// end. Placeholders in braces are substituted by the caller.
#[derive(Debug)]
pub struct Texts {
    pub new_version_found: &'static str,
    pub new_version_description: &'static str,
    pub already_latest: &'static str,
    pub already_latest_description: &'static str,
    pub check_update_failed: &'static str,
    pub check_cancelled: &'static str,
    pub check_cancelled_description: &'static str,
    pub network_unreachable: &'static str,
    pub registry_status: &'static str,
    pub malformed_response: &'static str,
    pub invalid_version: &'static str,
    pub check_time_not_saved: &'static str,
    pub release_heading: &'static str,
    pub downloads: &'static str,
    pub auto_check_disabled_skip: &'static str,
    pub auto_check_not_due: &'static str,
    pub auto_check_now: &'static str,
    pub status_version: &'static str,
    pub status_last_checked: &'static str,
    pub status_auto_check: &'static str,
    pub status_open_links: &'static str,
    pub never: &'static str,
    pub on: &'static str,
    pub off: &'static str,
    pub yes: &'static str,
    pub no_headless: &'static str,
    pub opened: &'static str,
}

static EN: Texts = Texts {
    new_version_found: "New version found",
    new_version_description: "Version {version} is available for download.",
    already_latest: "Already up to date",
    already_latest_description: "You are running the latest version {version}.",
    check_update_failed: "Failed to check for updates",
    check_cancelled: "Update check cancelled",
    check_cancelled_description: "The update check was stopped before it finished.",
    network_unreachable: "Could not reach the release server. Check your connection and try again.",
    registry_status: "The release server answered with {status}.",
    malformed_response: "The release server sent a response that could not be read.",
    invalid_version: "The version {version} could not be compared.",
    check_time_not_saved: "The check time could not be saved: {error}",
    release_heading: "{name} ({tag}), published {date}",
    downloads: "Downloads:",
    auto_check_disabled_skip: "Automatic update checks are off, skipping.",
    auto_check_not_due: "Last checked {time}, the next automatic check is not due yet.",
    auto_check_now: "Automatic update checks are now {state}.",
    status_version: "Version",
    status_last_checked: "Last checked",
    status_auto_check: "Auto-check",
    status_open_links: "Open links",
    never: "never",
    on: "on",
    off: "off",
    yes: "yes",
    no_headless: "no (headless session)",
    opened: "Opened {target}",
};

static ZH: Texts = Texts {
    new_version_found: "发现新版本",
    new_version_description: "新版本 {version} 已可下载。",
    already_latest: "已是最新版本",
    already_latest_description: "当前版本 {version} 已是最新版本。",
    check_update_failed: "检查更新失败",
    check_cancelled: "已取消检查更新",
    check_cancelled_description: "检查更新在完成前被停止。",
    network_unreachable: "无法连接到发布服务器，请检查网络后重试。",
    registry_status: "发布服务器返回 {status}。",
    malformed_response: "无法解析发布服务器的响应。",
    invalid_version: "无法比较版本号 {version}。",
    check_time_not_saved: "无法保存检查时间：{error}",
    release_heading: "{name}（{tag}），发布于 {date}",
    downloads: "下载：",
    auto_check_disabled_skip: "自动检查更新已关闭，跳过。",
    auto_check_not_due: "上次检查于 {time}，尚未到下次自动检查时间。",
    auto_check_now: "自动检查更新已{state}。",
    status_version: "版本",
    status_last_checked: "上次检查",
    status_auto_check: "自动检查",
    status_open_links: "打开链接",
    never: "从未",
    on: "开启",
    off: "关闭",
    yes: "是",
    no_headless: "否（无图形会话）",
    opened: "已打开 {target}",
};

#[cfg(test)]
mod tests {
    use super::Language;

    #[test]
    fn language_codes_are_case_insensitive() {
        assert_eq!(Language::from_code("EN"), Some(Language::En));
        assert_eq!(Language::from_code(" zh-CN "), Some(Language::Zh));
        assert_eq!(Language::from_code("fr"), None);
    }

    #[test]
    fn every_language_keeps_version_placeholders() {
        for language in [Language::En, Language::Zh] {
            let texts = language.texts();
            assert!(texts.new_version_description.contains("{version}"));
            assert!(texts.already_latest_description.contains("{version}"));
            assert!(texts.invalid_version.contains("{version}"));
            assert!(texts.registry_status.contains("{status}"));
            assert!(texts.check_time_not_saved.contains("{error}"));
            for placeholder in ["{name}", "{tag}", "{date}"] {
                assert!(texts.release_heading.contains(placeholder));
            }
            assert!(texts.auto_check_not_due.contains("{time}"));
            assert!(texts.auto_check_now.contains("{state}"));
            assert!(texts.opened.contains("{target}"));
        }
    }

    #[test]
    fn language_serializes_as_lowercase_code() {
        assert_eq!(
            serde_json::to_string(&Language::Zh).expect("language should serialize"),
            "\"zh\""
        );
    }
}
