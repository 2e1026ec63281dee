//! Default labels and format strings for selected fields.
//!
//! Best-effort UX defaults: anything ambiguous falls back to the raw segment
//! name and a bare `{value}`.

use crate::config::Locale;
use crate::ir::{ApiField, FieldMapping, FieldType};
use super::path::last_segment;

const LABELS: &[(&str, &str, &str)] = &[
    ("temp", "気温", "Temperature"),
    ("temperature", "気温", "Temperature"),
    ("humidity", "湿度", "Humidity"),
    ("pressure", "気圧", "Pressure"),
    ("description", "説明", "Description"),
    ("name", "名前", "Name"),
    ("title", "タイトル", "Title"),
    ("value", "値", "Value"),
    ("count", "件数", "Count"),
    ("total", "合計", "Total"),
    ("price", "価格", "Price"),
    ("amount", "金額", "Amount"),
    ("date", "日付", "Date"),
    ("time", "時刻", "Time"),
    ("status", "ステータス", "Status"),
    ("message", "メッセージ", "Message"),
    ("id", "ID", "ID"),
    ("url", "URL", "URL"),
];

/// Label from the lower-cased final path segment, or the segment itself.
pub fn default_label(field: &ApiField, locale: Locale) -> String {
    let segment = last_segment(&field.path);
    let key = segment.to_lowercase();
    LABELS
        .iter()
        .find(|(name, _, _)| *name == key)
        .map(|(_, ja, en)| match locale {
            Locale::Ja => ja.to_string(),
            Locale::En => en.to_string(),
        })
        .unwrap_or_else(|| segment.to_string())
}

/// Format string guessed from the field's type and path.
pub fn default_format(field: &ApiField, locale: Locale) -> String {
    match field.field_type {
        FieldType::Number => {
            let path = field.path.to_lowercase();
            if path.contains("temp") {
                "{value}°C".to_string()
            } else if path.contains("price") || path.contains("cost") {
                match locale {
                    Locale::Ja => "¥{value}".to_string(),
                    Locale::En => "${value}".to_string(),
                }
            } else if path.contains("percent") {
                "{value}%".to_string()
            } else {
                "{value}".to_string()
            }
        }
        FieldType::Boolean => match locale {
            Locale::Ja => r#"{value} ? "はい" : "いいえ""#.to_string(),
            Locale::En => r#"{value} ? "Yes" : "No""#.to_string(),
        },
        _ => "{value}".to_string(),
    }
}

/// One mapping per string, number or boolean field, in catalogue order.
///
/// `null` fields are skipped: they have no useful default format.
pub fn default_mappings(fields: &[ApiField], locale: Locale) -> Vec<FieldMapping> {
    fields
        .iter()
        .filter(|f| f.field_type.is_formattable())
        .map(|f| FieldMapping {
            field_path: f.path.clone(),
            display_label: default_label(f, locale),
            format_string: default_format(f, locale),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::infer;
    use serde_json::json;

    fn field(path: &str, field_type: FieldType) -> ApiField {
        ApiField {
            path: path.to_string(),
            field_type,
            sample_value: None,
        }
    }

    #[test]
    fn labels_from_dictionary() {
        assert_eq!(default_label(&field("main.temp", FieldType::Number), Locale::Ja), "気温");
        assert_eq!(default_label(&field("main.Temp", FieldType::Number), Locale::En), "Temperature");
        assert_eq!(default_label(&field("weather[0].description", FieldType::String), Locale::Ja), "説明");
        assert_eq!(default_label(&field("wind.speed", FieldType::Number), Locale::Ja), "speed");
    }

    #[test]
    fn numeric_formats() {
        assert_eq!(default_format(&field("main.temp_max", FieldType::Number), Locale::Ja), "{value}°C");
        assert_eq!(default_format(&field("item.price", FieldType::Number), Locale::En), "${value}");
        assert_eq!(default_format(&field("shipping_cost", FieldType::Number), Locale::Ja), "¥{value}");
        assert_eq!(default_format(&field("cpu.percent", FieldType::Number), Locale::Ja), "{value}%");
        assert_eq!(default_format(&field("wind.speed", FieldType::Number), Locale::Ja), "{value}");
    }

    #[test]
    fn temp_only_applies_to_numbers() {
        assert_eq!(default_format(&field("template", FieldType::String), Locale::Ja), "{value}");
    }

    #[test]
    fn booleans_get_ternary_labels() {
        assert_eq!(
            default_format(&field("open", FieldType::Boolean), Locale::Ja),
            r#"{value} ? "はい" : "いいえ""#
        );
    }

    #[test]
    fn mappings_skip_null_and_containers() {
        let fields = infer(&json!({"name": "Tokyo", "rain": null, "main": {"temp": 3}, "ok": true}));
        let mappings = default_mappings(&fields, Locale::Ja);
        let paths: Vec<_> = mappings.iter().map(|m| m.field_path.as_str()).collect();
        assert_eq!(paths, vec!["name", "main.temp", "ok"]);
        assert_eq!(mappings[1].display_label, "気温");
        assert_eq!(mappings[1].format_string, "{value}°C");
    }
}
