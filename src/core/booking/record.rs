//! Booking form fields and the submission record

use std::collections::HashMap;

/// Named fields of the consultation booking form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Email,
    CurrentRevenue,
    PreferredDate,
    PreferredTime,
    Phone,
}

impl FormField {
    /// Fields that must be filled in, in validation order
    pub const REQUIRED: [FormField; 5] = [
        FormField::Name,
        FormField::Email,
        FormField::CurrentRevenue,
        FormField::PreferredDate,
        FormField::PreferredTime,
    ];

    pub const ALL: [FormField; 6] = [
        FormField::Name,
        FormField::Email,
        FormField::CurrentRevenue,
        FormField::PreferredDate,
        FormField::PreferredTime,
        FormField::Phone,
    ];

    /// The `name` attribute of the form control
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::CurrentRevenue => "currentRevenue",
            FormField::PreferredDate => "preferredDate",
            FormField::PreferredTime => "preferredTime",
            FormField::Phone => "phone",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == s)
    }

    pub fn is_required(&self) -> bool {
        !matches!(self, FormField::Phone)
    }

    /// Human-readable label used in validation messages
    pub fn label(&self) -> String {
        humanize_field(self.as_str())
    }
}

/// Turn a camelCase field identifier into lower-case words:
/// a space goes before every capital letter, then everything is lower-cased.
pub fn humanize_field(identifier: &str) -> String {
    let mut label = String::with_capacity(identifier.len() + 4);
    for c in identifier.chars() {
        if c.is_ascii_uppercase() {
            label.push(' ');
        }
        label.push(c.to_ascii_lowercase());
    }
    label
}

/// Field values collected from the form at submit time.
///
/// Keyed by the controls' `name` attributes. Unknown names are kept so the
/// record mirrors the form exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionRecord {
    values: HashMap<String, String>,
}

impl SubmissionRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter
    pub fn with(mut self, field: FormField, value: impl Into<String>) -> Self {
        self.insert(field.as_str(), value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.values.get(field.as_str()).map(String::as_str)
    }

    pub fn get_raw(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SubmissionRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (name, value) in iter {
            record.insert(name, value);
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humanize_field() {
        assert_eq!(humanize_field("name"), "name");
        assert_eq!(humanize_field("currentRevenue"), "current revenue");
        assert_eq!(humanize_field("preferredDate"), "preferred date");
        assert_eq!(humanize_field("preferredTime"), "preferred time");
        assert_eq!(humanize_field("someLongFieldName"), "some long field name");
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in FormField::ALL {
            assert_eq!(FormField::from_str(field.as_str()), Some(field));
        }
        assert_eq!(FormField::from_str("company"), None);
    }

    #[test]
    fn test_only_phone_is_optional() {
        let optional: Vec<_> = FormField::ALL
            .into_iter()
            .filter(|field| !field.is_required())
            .collect();
        assert_eq!(optional, vec![FormField::Phone]);
        assert!(FormField::REQUIRED.iter().all(FormField::is_required));
    }

    #[test]
    fn test_record_from_form_pairs() {
        let record: SubmissionRecord = [
            ("name", "Ada"),
            ("email", "ada@example.com"),
            ("notes", "hi"),
        ]
        .into_iter()
        .collect();

        assert_eq!(record.get(FormField::Name), Some("Ada"));
        assert_eq!(record.get(FormField::Phone), None);
        assert_eq!(record.get_raw("notes"), Some("hi"));
        assert_eq!(record.len(), 3);
    }
}
