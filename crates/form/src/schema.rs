//! Structured form definitions as produced by the generator and edited by owners.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Email,
    Number,
    Textarea,
    Select,
    Checkbox,
    Radio,
    File,
    Date,
}

impl FieldType {
    /// Field types that only make sense with a list of choices.
    pub fn needs_options(&self) -> bool {
        matches!(self, Self::Select | Self::Radio)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FormField {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accept: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiple: Option<bool>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FormSchema {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<FormField>,
}

impl FormSchema {
    pub fn check(&self) -> formforge_shared::Result<()> {
        let title = self.title.trim();
        if title.is_empty() || title.chars().count() > 200 {
            formforge_shared::user!("Form title must be between 1 and 200 characters");
        }

        let mut names = HashSet::new();
        for field in &self.fields {
            if field.name.trim().is_empty() {
                formforge_shared::user!("Every field needs a name");
            }

            if !names.insert(field.name.as_str()) {
                formforge_shared::user!("Duplicate field name '{}'", field.name);
            }

            let has_options = field.options.as_ref().is_some_and(|o| !o.is_empty());
            if field.field_type.needs_options() && !has_options {
                formforge_shared::user!("Field '{}' needs at least one option", field.name);
            }
        }

        Ok(())
    }
}

/// Metadata of a file already stored on the media host.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileUrl {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub field_name: String,
    #[serde(default)]
    pub urls: Vec<FileUrl>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, field_type: FieldType) -> FormField {
        FormField {
            name: name.to_owned(),
            label: name.to_owned(),
            field_type,
            required: false,
            options: None,
            placeholder: None,
            accept: None,
            multiple: None,
        }
    }

    #[test]
    fn parses_generated_schema() {
        let schema: FormSchema = serde_json::from_str(
            r#"{
                "title": "Job Application",
                "fields": [
                    { "name": "name", "label": "Full Name", "type": "text", "required": true },
                    { "name": "resume", "label": "Resume", "type": "file", "required": true,
                      "accept": ".pdf,.doc", "multiple": false },
                    { "name": "role", "label": "Role", "type": "select", "options": ["dev", "ops"] }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(schema.fields.len(), 3);
        assert_eq!(schema.fields[1].field_type, FieldType::File);
        assert_eq!(schema.fields[1].accept.as_deref(), Some(".pdf,.doc"));
        assert!(!schema.fields[2].required);
        assert!(schema.check().is_ok());
    }

    #[test]
    fn serializes_type_key() {
        let json = serde_json::to_value(field("email", FieldType::Email)).unwrap();

        assert_eq!(json["type"], "email");
        assert!(json.get("options").is_none());
    }

    #[test]
    fn rejects_duplicate_names() {
        let schema = FormSchema {
            title: "Survey".to_owned(),
            description: None,
            fields: vec![field("a", FieldType::Text), field("a", FieldType::Email)],
        };

        assert_eq!(
            schema.check().unwrap_err().to_string(),
            "Duplicate field name 'a'"
        );
    }

    #[test]
    fn choice_fields_need_options() {
        let schema = FormSchema {
            title: "Survey".to_owned(),
            description: None,
            fields: vec![field("color", FieldType::Radio)],
        };

        assert!(schema.check().is_err());
    }

    #[test]
    fn rejects_blank_title() {
        let schema = FormSchema {
            title: "  ".to_owned(),
            description: None,
            fields: vec![],
        };

        assert!(schema.check().is_err());
    }

    #[test]
    fn title_limit_counts_characters() {
        let mut schema = FormSchema {
            title: "é".repeat(200),
            description: None,
            fields: vec![],
        };
        assert!(schema.check().is_ok());

        schema.title = "é".repeat(201);
        assert_eq!(
            schema.check().unwrap_err().to_string(),
            "Form title must be between 1 and 200 characters"
        );
    }
}
