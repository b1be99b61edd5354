use crate::augmenter::AugmentReport;
use crate::i18n::I18n;

const RULE_WIDTH: usize = 40;

/// Summary counters, then (optionally) every touched key in document order.
pub fn render(report: &AugmentReport, i18n: &I18n, show_details: bool) -> String {
    let mut lines = vec![
        i18n.t("report_title"),
        i18n.t_format("report_processed", &[&report.touched_keys.len().to_string()]),
        i18n.t_format("report_simplified", &[&report.simplified_filled.to_string()]),
        i18n.t_format("report_traditional", &[&report.traditional_filled.to_string()]),
    ];

    if show_details {
        lines.push(String::new());
        lines.push(i18n.t("report_details"));
        lines.push("━".repeat(RULE_WIDTH));
        lines.extend(report.touched_keys.iter().cloned());
    }

    lines.join("\n")
}
