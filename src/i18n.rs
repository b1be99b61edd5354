use std::collections::HashMap;

/// Languages the CLI can talk in. The two Chinese variants mirror the two
/// text fields the tool fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    En,
    ZhHans,
    ZhHant,
}

impl Lang {
    /// Accepts POSIX locales (`zh_TW.UTF-8`), BCP 47 tags (`zh-Hant`) and the
    /// short names used in the config file. Anything unknown is English.
    pub fn from_locale(locale: &str) -> Self {
        let tag = locale
            .split('.')
            .next()
            .unwrap_or("")
            .trim()
            .to_lowercase()
            .replace('-', "_");

        if !(tag.starts_with("zh") || tag == "cn" || tag == "chinese") {
            return Lang::En;
        }
        let traditional = ["hant", "tw", "hk", "mo"]
            .iter()
            .any(|region| tag.split('_').any(|part| part == *region));
        if traditional {
            Lang::ZhHant
        } else {
            Lang::ZhHans
        }
    }
}

const EN: &[(&str, &str)] = &[
    ("report_title", "■ Summary ■"),
    ("report_processed", "Processed items: {0}"),
    ("report_simplified", "Simplified Chinese filled: {0}"),
    ("report_traditional", "Traditional Chinese filled: {0}"),
    ("report_details", "■ Details ■"),
    ("load_success", "File loaded: {0} ({1} items)"),
    ("load_failed", "Failed to process file"),
    ("confirm_save_prompt", "Overwrite {0}? Type 'yes' to confirm: "),
    ("save_success", "File saved: {0}"),
    ("save_failed", "Failed to save file"),
    ("save_aborted", "Save cancelled, file left unchanged"),
    ("nothing_to_save", "Nothing was filled, file left unchanged"),
    ("dry_run_notice", "Dry run, nothing written"),
];

// 简体
const ZH_HANS: &[(&str, &str)] = &[
    ("report_title", "■ 转换统计 ■"),
    ("report_processed", "处理条目：{0} 个"),
    ("report_simplified", "简体中文补全：{0} 处"),
    ("report_traditional", "繁体中文补全：{0} 处"),
    ("report_details", "■ 处理明细 ■"),
    ("load_success", "文件加载成功：{0}（共 {1} 条）"),
    ("load_failed", "文件处理失败"),
    ("confirm_save_prompt", "确定要覆盖 {0} 吗？输入 'yes' 确认："),
    ("save_success", "文件保存成功：{0}"),
    ("save_failed", "保存失败"),
    ("save_aborted", "已取消保存，文件未修改"),
    ("nothing_to_save", "没有需要补全的内容，文件未修改"),
    ("dry_run_notice", "试运行，未写入任何文件"),
];

// 繁體
const ZH_HANT: &[(&str, &str)] = &[
    ("report_title", "■ 轉換統計 ■"),
    ("report_processed", "處理條目：{0} 個"),
    ("report_simplified", "簡體中文補全：{0} 處"),
    ("report_traditional", "繁體中文補全：{0} 處"),
    ("report_details", "■ 處理明細 ■"),
    ("load_success", "檔案載入成功：{0}（共 {1} 條）"),
    ("load_failed", "檔案處理失敗"),
    ("confirm_save_prompt", "確定要覆蓋 {0} 嗎？輸入 'yes' 確認："),
    ("save_success", "檔案儲存成功：{0}"),
    ("save_failed", "儲存失敗"),
    ("save_aborted", "已取消儲存，檔案未修改"),
    ("nothing_to_save", "沒有需要補全的內容，檔案未修改"),
    ("dry_run_notice", "試執行，未寫入任何檔案"),
];

pub struct I18n {
    messages: HashMap<&'static str, &'static str>,
}

impl I18n {
    pub fn new(lang: Lang) -> Self {
        // English underneath so a key missing from a translation still reads
        let mut messages: HashMap<_, _> = EN.iter().copied().collect();
        let overrides = match lang {
            Lang::En => &[][..],
            Lang::ZhHans => ZH_HANS,
            Lang::ZhHant => ZH_HANT,
        };
        messages.extend(overrides.iter().copied());
        Self { messages }
    }

    pub fn t(&self, key: &str) -> String {
        self.messages.get(key).copied().unwrap_or(key).to_string()
    }

    /// Substitutes `{0}`, `{1}`, … in one pass, so an argument that itself
    /// contains `{1}` is left alone.
    pub fn t_format(&self, key: &str, args: &[&str]) -> String {
        let template = self.t(key);
        let mut out = String::with_capacity(template.len());
        let mut rest = template.as_str();

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let arg = after
                .find('}')
                .and_then(|close| after[..close].parse::<usize>().ok().map(|i| (i, close)))
                .and_then(|(i, close)| args.get(i).map(|arg| (*arg, close)));
            match arg {
                Some((value, close)) => {
                    out.push_str(value);
                    rest = &after[close + 1..];
                }
                None => {
                    out.push('{');
                    rest = after;
                }
            }
        }
        out.push_str(rest);
        out
    }
}
