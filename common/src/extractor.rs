//! 名刺項目の抽出
//!
//! OCRテキストから会社名・氏名・電話番号・メールアドレスを推定し、
//! 注釈用の4行テキストに整形する。
//!
//! - 会社名: 最初の空でない行
//! - 氏名: 2行目
//! - 電話/メール: テキスト全体から正規表現で最初の一致

use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static::lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"(?i)[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap();
    static ref PHONE_RE: Regex = Regex::new(r"\d{2,4}-\d{2,4}-\d{4}").unwrap();
}

/// 抽出結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedFields {
    pub company: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl ExtractedFields {
    pub fn is_empty(&self) -> bool {
        self.company.is_none() && self.name.is_none() && self.phone.is_none() && self.email.is_none()
    }
}

/// 注釈のラベルセット
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationLabels {
    pub company: &'static str,
    pub name: &'static str,
    pub phone: &'static str,
    pub email: &'static str,
    pub placeholder: &'static str,
}

impl AnnotationLabels {
    pub fn japanese() -> Self {
        Self {
            company: "会社（職業）",
            name: "名前",
            phone: "電話",
            email: "メール",
            placeholder: "unknown",
        }
    }

    pub fn english() -> Self {
        Self {
            company: "Company",
            name: "Name",
            phone: "Phone",
            email: "Email",
            placeholder: "unknown",
        }
    }
}

impl Default for AnnotationLabels {
    fn default() -> Self {
        Self::japanese()
    }
}

/// OCRテキストから項目を抽出
///
/// 空や崩れた入力でもエラーにはせず、該当項目を `None` にする。
///
/// # Examples
/// ```
/// use meishi_common::extract;
///
/// let fields = extract("Acme Corp\nJane Doe\nCall 080-1234-5678 or jane@acme.com");
/// assert_eq!(fields.company.as_deref(), Some("Acme Corp"));
/// assert_eq!(fields.phone.as_deref(), Some("080-1234-5678"));
/// ```
pub fn extract(text: &str) -> ExtractedFields {
    let mut lines: Vec<&str> = text.lines().collect();
    // 末尾の空行は無視
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }

    let company = lines
        .iter()
        .map(|l| l.trim())
        .find(|l| !l.is_empty())
        .map(str::to_string);

    let name = lines
        .get(1)
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .map(str::to_string);

    let phone = PHONE_RE.find(text).map(|m| m.as_str().to_string());
    let email = EMAIL_RE.find(text).map(|m| m.as_str().to_string());

    ExtractedFields {
        company,
        name,
        phone,
        email,
    }
}

/// 既定ラベルで4行テキストに整形
pub fn format(fields: &ExtractedFields) -> String {
    format_with(fields, &AnnotationLabels::default())
}

pub fn format_with(fields: &ExtractedFields, labels: &AnnotationLabels) -> String {
    let value = |v: &Option<String>| v.clone().unwrap_or_else(|| labels.placeholder.to_string());
    [
        format!("{}: {}", labels.company, value(&fields.company)),
        format!("{}: {}", labels.name, value(&fields.name)),
        format!("{}: {}", labels.phone, value(&fields.phone)),
        format!("{}: {}", labels.email, value(&fields.email)),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Acme Corp\nJane Doe\nCall 080-1234-5678 or jane@acme.com";

    #[test]
    fn test_extract_sample_card() {
        let fields = extract(SAMPLE);
        assert_eq!(
            fields,
            ExtractedFields {
                company: Some("Acme Corp".into()),
                name: Some("Jane Doe".into()),
                phone: Some("080-1234-5678".into()),
                email: Some("jane@acme.com".into()),
            }
        );
    }

    #[test]
    fn test_format_sample_card() {
        let rendered = format(&extract(SAMPLE));
        assert_eq!(
            rendered,
            "会社（職業）: Acme Corp\n名前: Jane Doe\n電話: 080-1234-5678\nメール: jane@acme.com"
        );
    }

    #[test]
    fn test_extract_empty_text() {
        let fields = extract("");
        assert!(fields.is_empty());
        assert_eq!(
            format(&fields),
            "会社（職業）: unknown\n名前: unknown\n電話: unknown\nメール: unknown"
        );
    }

    #[test]
    fn test_extract_single_line() {
        let fields = extract("  株式会社サンプル  ");
        assert_eq!(fields.company.as_deref(), Some("株式会社サンプル"));
        assert_eq!(fields.name, None);
    }

    #[test]
    fn test_trailing_blank_lines_ignored() {
        let fields = extract("Acme Corp\n\n\n");
        assert_eq!(fields.company.as_deref(), Some("Acme Corp"));
        assert_eq!(fields.name, None);
    }

    #[test]
    fn test_company_skips_leading_blank_lines() {
        let fields = extract("\n  \nAcme Corp\nJane Doe");
        assert_eq!(fields.company.as_deref(), Some("Acme Corp"));
        // 氏名は位置（2行目）のみで決まる
        assert_eq!(fields.name, None);
    }

    #[test]
    fn test_crlf_lines() {
        let fields = extract("Acme Corp\r\nJane Doe\r\n");
        assert_eq!(fields.company.as_deref(), Some("Acme Corp"));
        assert_eq!(fields.name.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_company_line_can_also_be_phone() {
        let fields = extract("03-1234-5678\nTaro");
        assert_eq!(fields.company.as_deref(), Some("03-1234-5678"));
        assert_eq!(fields.phone.as_deref(), Some("03-1234-5678"));
    }

    #[test]
    fn test_email_case_insensitive_and_first_match() {
        let fields = extract("X\nY\nTARO@EXAMPLE.CO.JP / hanako@example.com");
        assert_eq!(fields.email.as_deref(), Some("TARO@EXAMPLE.CO.JP"));
    }

    #[test]
    fn test_phone_requires_four_digit_tail() {
        let fields = extract("tel 03-123-45");
        assert_eq!(fields.phone, None);
    }

    #[test]
    fn test_phone_spanning_whole_text() {
        let fields = extract("会社\n氏名\n住所\nTEL: 0120-33-4444");
        assert_eq!(fields.phone.as_deref(), Some("0120-33-4444"));
    }

    #[test]
    fn test_format_partial_fields_with_english_labels() {
        let fields = ExtractedFields {
            company: Some("Acme".into()),
            email: Some("a@acme.com".into()),
            ..Default::default()
        };
        assert_eq!(
            format_with(&fields, &AnnotationLabels::english()),
            "Company: Acme\nName: unknown\nPhone: unknown\nEmail: a@acme.com"
        );
    }

    #[test]
    fn test_format_extract_is_idempotent() {
        let first = format(&extract(SAMPLE));
        let second = format(&extract(SAMPLE));
        assert_eq!(first, second);
        assert_eq!(format(&extract("")), format(&extract("")));
    }
}
