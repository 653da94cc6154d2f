// ==========================================
// 课表导入引擎 - 时间规范化
// ==========================================
// 职责: 异构时间文本 → 24 小时制 HH:MM（零填充）
// 红线: 形式按固定优先级尝试, 首个匹配即生效
// ==========================================

use chrono::NaiveTime;
use regex::Regex;
use std::sync::OnceLock;

/// 时间文本形式（按优先级排列）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimeForm {
    /// H:MM
    Colon,
    /// H.MM
    Dot,
    /// H:MM AM|PM
    ColonMeridiem,
    /// H AM|PM
    HourMeridiem,
}

const FORM_PRIORITY: [TimeForm; 4] = [
    TimeForm::Colon,
    TimeForm::Dot,
    TimeForm::ColonMeridiem,
    TimeForm::HourMeridiem,
];

struct TimePatterns {
    strip: Regex,
    colon: Regex,
    dot: Regex,
    colon_meridiem: Regex,
    hour_meridiem: Regex,
    bare_hour: Regex,
}

fn patterns() -> &'static TimePatterns {
    static PATTERNS: OnceLock<TimePatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| TimePatterns {
        strip: Regex::new(r"[^0-9:.\sAPMapm]").expect("硬编码正则"),
        colon: Regex::new(r"^(\d{1,2}):(\d{2})$").expect("硬编码正则"),
        dot: Regex::new(r"^(\d{1,2})\.(\d{2})$").expect("硬编码正则"),
        colon_meridiem: Regex::new(r"(?i)^(\d{1,2}):(\d{2})\s*(am|pm)$").expect("硬编码正则"),
        hour_meridiem: Regex::new(r"(?i)^(\d{1,2})\s*(am|pm)$").expect("硬编码正则"),
        bare_hour: Regex::new(r"^\d{1,2}$").expect("硬编码正则"),
    })
}

// ==========================================
// TimeNormalizer - 时间规范化器（无状态）
// ==========================================
pub struct TimeNormalizer;

impl TimeNormalizer {
    /// 规范化时间文本
    ///
    /// # 返回
    /// - Some("HH:MM"): 规范化结果
    /// - None: 无法识别, 或时/分越界
    pub fn normalize(&self, raw: &str) -> Option<String> {
        let p = patterns();
        let cleaned = p.strip.replace_all(raw, "");
        let cleaned = cleaned.trim();

        for form in FORM_PRIORITY {
            if let Some((hour, minute, meridiem)) = Self::match_form(form, cleaned) {
                let hour = match meridiem {
                    Some(m) => Self::to_24_hour(hour, &m),
                    None => hour,
                };
                return Self::format(hour, minute);
            }
        }

        // 兜底: 1~2 位纯数字小时 [0, 23]
        if p.bare_hour.is_match(cleaned) {
            let hour: u32 = cleaned.parse().ok()?;
            if hour <= 23 {
                return Self::format(hour, 0);
            }
        }

        None
    }

    /// 尝试按指定形式匹配, 返回 (时, 分, 上下午标记)
    fn match_form(form: TimeForm, text: &str) -> Option<(u32, u32, Option<String>)> {
        let p = patterns();
        match form {
            TimeForm::Colon => {
                let caps = p.colon.captures(text)?;
                Some((caps[1].parse().ok()?, caps[2].parse().ok()?, None))
            }
            TimeForm::Dot => {
                let caps = p.dot.captures(text)?;
                Some((caps[1].parse().ok()?, caps[2].parse().ok()?, None))
            }
            TimeForm::ColonMeridiem => {
                let caps = p.colon_meridiem.captures(text)?;
                Some((
                    caps[1].parse().ok()?,
                    caps[2].parse().ok()?,
                    Some(caps[3].to_uppercase()),
                ))
            }
            TimeForm::HourMeridiem => {
                let caps = p.hour_meridiem.captures(text)?;
                Some((caps[1].parse().ok()?, 0, Some(caps[2].to_uppercase())))
            }
        }
    }

    /// 12 小时制 → 24 小时制
    fn to_24_hour(hour: u32, meridiem: &str) -> u32 {
        match meridiem {
            "PM" if hour != 12 => hour + 12,
            "AM" if hour == 12 => 0,
            _ => hour,
        }
    }

    fn format(hour: u32, minute: u32) -> Option<String> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(|t| t.format("%H:%M").to_string())
    }
}
