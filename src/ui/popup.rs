use serde::{Deserialize, Serialize};

/// Number display options for one popup field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NumberFormat {
    #[serde(default)]
    pub digit_separator: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub places: Option<u8>,
}

impl NumberFormat {
    pub fn grouped(places: u8) -> Self {
        Self {
            digit_separator: true,
            places: Some(places),
        }
    }

    /// Formats `value` with a fixed number of decimal places and `,`
    /// grouping when enabled.
    pub fn format(&self, value: f64) -> String {
        let text = match self.places {
            Some(places) => format!("{:.*}", places as usize, value),
            None => value.to_string(),
        };

        if !self.digit_separator || !value.is_finite() {
            return text;
        }

        let (sign, unsigned) = match text.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", text.as_str()),
        };
        let (integer, fraction) = match unsigned.find('.') {
            Some(dot) => unsigned.split_at(dot),
            None => (unsigned, ""),
        };

        let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
        for (i, digit) in integer.chars().enumerate() {
            if i > 0 && (integer.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }

        format!("{}{}{}", sign, grouped, fraction)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FieldInfo {
    pub field_name: String,
    #[serde(default)]
    pub format: NumberFormat,
}

impl FieldInfo {
    pub fn new(field_name: impl Into<String>, format: NumberFormat) -> Self {
        Self {
            field_name: field_name.into(),
            format,
        }
    }
}

/// Popup content for a layer's features.
///
/// `title` and `content` reference attributes as `{FIELD}`; substituting
/// them is left to the host that shows the popup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PopupTemplate {
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub field_infos: Vec<FieldInfo>,
}

impl PopupTemplate {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            field_infos: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: FieldInfo) -> Self {
        self.field_infos.push(field);
        self
    }

    pub fn field_info(&self, field_name: &str) -> Option<&FieldInfo> {
        self.field_infos.iter().find(|f| f.field_name == field_name)
    }

    /// Field names referenced as `{FIELD}` in the title or content, in
    /// order of first appearance.
    pub fn referenced_fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::new();
        for text in [self.title.as_str(), self.content.as_str()] {
            let mut rest = text;
            while let Some(open) = rest.find('{') {
                let after = &rest[open + 1..];
                match after.find('}') {
                    Some(close) => {
                        let name = &after[..close];
                        if !name.is_empty() && !fields.contains(&name) {
                            fields.push(name);
                        }
                        rest = &after[close + 1..];
                    }
                    None => break,
                }
            }
        }
        fields
    }
}
