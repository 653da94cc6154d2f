// ==========================================
// 课表导入引擎 - 单元格文本语法
// ==========================================
// 语法: <科目>[ (<类型>)]: (<教室>) <教师>: (<班组1>,<班组2>,...)
// 顺序: 班组 → 教师 → 教室 → 科目/类型（有序、破坏性提取）
// 红线: 后续步骤假定前序步骤已移除各自子串, 顺序不可调换
// ==========================================

use crate::config::ImportConfig;
use crate::domain::session::ParsedLine;
use crate::importer::confidence::ConfidenceScorer;
use regex::Regex;
use std::sync::OnceLock;

struct GrammarPatterns {
    groups: Regex,
    group_separator: Regex,
    lecturer: Regex,
    honorific: Regex,
    room: Regex,
    room_prefix: Regex,
    subject: Regex,
    whitespace: Regex,
}

fn patterns() -> &'static GrammarPatterns {
    static PATTERNS: OnceLock<GrammarPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| GrammarPatterns {
        // 行尾括号段
        groups: Regex::new(r"\(([^)]*)\)\s*$").expect("硬编码正则"),
        group_separator: Regex::new(r"[,\s]+").expect("硬编码正则"),
        // 冒号引导的行尾段, 中间可夹一个 (教室) 段, 可带结尾冒号
        lecturer: Regex::new(r":\s*(?:\([^()]*\)\s*)?([^:()]+?)\s*:?\s*$").expect("硬编码正则"),
        honorific: Regex::new(r"(?i)^(dr|mr|ms|prof)\b\.?\s*").expect("硬编码正则"),
        // 冒号后紧跟括号段（任意位置, 取第一个）
        room: Regex::new(r":\s*\(([^()]*)\)").expect("硬编码正则"),
        room_prefix: Regex::new(r"(?i)^room\s+").expect("硬编码正则"),
        subject: Regex::new(r"^(.+?)\s*(?:\(([PLTFRplftr]{1,4})\))?\s*:?\s*$")
            .expect("硬编码正则"),
        whitespace: Regex::new(r"\s+").expect("硬编码正则"),
    })
}

/// 拆分单元格文本为非空行（已去首尾空白）
pub fn split_lines(cell_text: &str) -> Vec<&str> {
    cell_text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

// ==========================================
// 提取步骤: 每步返回 (提取字段, 剩余文本)
// ==========================================

/// 步骤 1: 行尾括号段 → 班组列表
fn take_groups(rest: &str) -> (Vec<String>, String) {
    let p = patterns();
    match p.groups.captures(rest) {
        Some(caps) => {
            let groups = p
                .group_separator
                .split(&caps[1])
                .filter(|token| !token.is_empty())
                .map(str::to_string)
                .collect();
            let start = caps.get(0).map(|m| m.start()).unwrap_or(rest.len());
            (groups, rest[..start].trim().to_string())
        }
        None => (Vec::new(), rest.to_string()),
    }
}

/// 步骤 2: 行尾教师段（称谓规范化 + 空白折叠）
fn take_lecturer(rest: &str) -> (String, String) {
    let p = patterns();
    match p.lecturer.captures(rest) {
        Some(caps) => {
            let lecturer = normalize_lecturer(&caps[1]);
            // 保留冒号与教室段, 供教室/类型步骤继续匹配
            let start = caps.get(1).map(|m| m.start()).unwrap_or(rest.len());
            (lecturer, rest[..start].trim().to_string())
        }
        None => (String::new(), rest.to_string()),
    }
}

/// 步骤 3: ": (教室)" 段（去掉前缀 "Room " + 空白折叠）
fn take_room(rest: &str) -> (String, String) {
    let p = patterns();
    match p.room.captures(rest) {
        Some(caps) => {
            let inner = caps[1].trim();
            let inner = p.room_prefix.replace(inner, "");
            let room = collapse_whitespace(&inner);
            let whole = caps.get(0).map(|m| m.range()).unwrap_or(0..0);
            let remaining = format!("{}{}", &rest[..whole.start], &rest[whole.end..]);
            (room, remaining.trim().to_string())
        }
        None => (String::new(), rest.to_string()),
    }
}

/// 步骤 4: 科目 + 可选类型代码; 不匹配时整段作为科目
fn take_subject(rest: &str) -> (String, String) {
    let p = patterns();
    let trimmed = rest.trim();
    match p.subject.captures(trimmed) {
        Some(caps) => {
            let subject = caps
                .get(1)
                .map(|m| m.as_str().trim().to_string())
                .unwrap_or_default();
            let session_type = caps
                .get(2)
                .map(|m| m.as_str().to_uppercase())
                .unwrap_or_default();
            (subject, session_type)
        }
        None => (trimmed.to_string(), String::new()),
    }
}

fn normalize_lecturer(raw: &str) -> String {
    let p = patterns();
    let trimmed = raw.trim();
    let normalized = match p.honorific.captures(trimmed) {
        Some(caps) => {
            let title = match caps[1].to_lowercase().as_str() {
                "dr" => "Dr.",
                "mr" => "Mr.",
                "ms" => "Ms.",
                _ => "Prof.",
            };
            let end = caps.get(0).map(|m| m.end()).unwrap_or(0);
            let name = trimmed[end..].trim();
            if name.is_empty() {
                title.to_string()
            } else {
                format!("{} {}", title, name)
            }
        }
        None => trimmed.to_string(),
    };
    collapse_whitespace(&normalized)
}

fn collapse_whitespace(text: &str) -> String {
    patterns().whitespace.replace_all(text.trim(), " ").into_owned()
}

// ==========================================
// LineParser - 单行解析器（无可变状态）
// ==========================================
pub struct LineParser<'a> {
    scorer: ConfidenceScorer<'a>,
}

impl<'a> LineParser<'a> {
    pub fn new(config: &'a ImportConfig) -> Self {
        Self {
            scorer: ConfidenceScorer::new(config),
        }
    }

    /// 解析单行文本
    ///
    /// # 返回
    /// - Some(ParsedLine): 解析结果（含置信度）
    /// - None: 无法解析（科目为空）, 该行被静默丢弃
    pub fn parse_line(&self, line: &str) -> Option<ParsedLine> {
        let raw_text = line.trim();
        if raw_text.is_empty() {
            return None;
        }

        let (groups, rest) = take_groups(raw_text);
        let (lecturer, rest) = take_lecturer(&rest);
        let (room_or_code, rest) = take_room(&rest);
        let (subject_name, session_type) = take_subject(&rest);

        if subject_name.is_empty() {
            return None;
        }

        let score = ConfidenceScorer::line_score(
            &subject_name,
            &session_type,
            &room_or_code,
            &lecturer,
            &groups,
        );

        Some(ParsedLine {
            subject_name,
            session_type,
            room_or_code,
            lecturer,
            groups,
            raw_text: raw_text.to_string(),
            confidence: self.scorer.line_confidence(score),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Confidence;

    fn parse(line: &str) -> Option<ParsedLine> {
        let config = ImportConfig::default();
        LineParser::new(&config).parse_line(line)
    }

    #[test]
    fn test_full_grammar_line() {
        let parsed = parse("Math (L): (Room3) Dr. Smith: (G1,G2)").unwrap();
        assert_eq!(parsed.subject_name, "Math");
        assert_eq!(parsed.session_type, "L");
        assert_eq!(parsed.room_or_code, "Room3");
        assert_eq!(parsed.lecturer, "Dr. Smith");
        assert_eq!(parsed.groups, vec!["G1", "G2"]);
        assert_eq!(parsed.confidence, Confidence::High);
        assert_eq!(parsed.raw_text, "Math (L): (Room3) Dr. Smith: (G1,G2)");
    }

    #[test]
    fn test_plain_subject_line() {
        let parsed = parse("Lunch Break").unwrap();
        assert_eq!(parsed.subject_name, "Lunch Break");
        assert_eq!(parsed.session_type, "");
        assert_eq!(parsed.room_or_code, "");
        assert_eq!(parsed.lecturer, "");
        assert!(parsed.groups.is_empty());
        assert_eq!(parsed.confidence, Confidence::Low);
    }

    #[test]
    fn test_groups_split_on_commas_and_spaces() {
        let parsed = parse("Chemistry (P): (Lab 2) Ms Jones: (A1, B2  C3)").unwrap();
        assert_eq!(parsed.groups, vec!["A1", "B2", "C3"]);
        assert_eq!(parsed.session_type, "P");
    }

    #[test]
    fn test_room_prefix_and_whitespace() {
        let parsed = parse("Physics (T): (Room   12  B) prof   Brown: (X)").unwrap();
        assert_eq!(parsed.room_or_code, "12 B");
        assert_eq!(parsed.lecturer, "Prof. Brown");
    }

    #[test]
    fn test_honorific_normalization() {
        assert_eq!(normalize_lecturer("dr smith"), "Dr. smith");
        assert_eq!(normalize_lecturer("Mr.Lee"), "Mr. Lee");
        assert_eq!(normalize_lecturer("MS.  Ana   Diaz"), "Ms. Ana Diaz");
        // "Mrs" 不是受支持的称谓, 原样保留
        assert_eq!(normalize_lecturer("Mrs Kay"), "Mrs Kay");
    }

    #[test]
    fn test_type_code_is_uppercased() {
        let parsed = parse("Biology (lt): (R1) Dr. Ng: (G7)").unwrap();
        assert_eq!(parsed.session_type, "LT");
    }

    #[test]
    fn test_unknown_type_code_stays_in_subject() {
        let parsed = parse("History (XZ):").unwrap();
        assert_eq!(parsed.subject_name, "History (XZ)");
        assert_eq!(parsed.session_type, "");
    }

    #[test]
    fn test_subject_with_type_and_trailing_colon() {
        let parsed = parse("Math (L):").unwrap();
        assert_eq!(parsed.subject_name, "Math");
        assert_eq!(parsed.session_type, "L");
    }

    #[test]
    fn test_trailing_parenthesis_is_read_as_groups() {
        // 行尾括号总是先被当作班组提取
        let parsed = parse("Math (L)").unwrap();
        assert_eq!(parsed.subject_name, "Math");
        assert_eq!(parsed.session_type, "");
        assert_eq!(parsed.groups, vec!["L"]);
    }

    #[test]
    fn test_lecturer_without_room() {
        let parsed = parse("Art: Mr Green: (G1)").unwrap();
        assert_eq!(parsed.subject_name, "Art");
        assert_eq!(parsed.lecturer, "Mr. Green");
        assert_eq!(parsed.room_or_code, "");
    }

    #[test]
    fn test_line_without_colon_has_no_lecturer() {
        let parsed = parse("Physics (Adv) Part II").unwrap();
        assert_eq!(parsed.subject_name, "Physics (Adv) Part II");
        assert_eq!(parsed.lecturer, "");
        assert_eq!(parsed.room_or_code, "");
        assert_eq!(parsed.confidence, Confidence::Low);
    }

    #[test]
    fn test_lecturer_directly_after_room() {
        let parsed = parse("Math: (R2) Ms Ana: (G1)").unwrap();
        assert_eq!(parsed.subject_name, "Math");
        assert_eq!(parsed.room_or_code, "R2");
        assert_eq!(parsed.lecturer, "Ms. Ana");
    }

    #[test]
    fn test_empty_subject_returns_none() {
        assert!(parse("(G1, G2)").is_none());
        assert!(parse(": (R1) Dr. Who:").is_none());
        assert!(parse("   ").is_none());
    }

    #[test]
    fn test_split_lines_skips_blanks() {
        let lines = split_lines("Math (L): (R1) Dr. A: (G1)\r\n\n  Lab  \n");
        assert_eq!(lines, vec!["Math (L): (R1) Dr. A: (G1)", "Lab"]);
    }
}
