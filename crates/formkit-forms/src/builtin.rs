//! The built-in employee onboarding schema, served when no schema file is
//! configured.

use crate::schema::{FieldDefinition, FieldType, FieldValidation, FormSchema, Pattern};

/// Email shape accepted by the onboarding form: something, `@`, something,
/// `.`, something.
pub const EMAIL_PATTERN: &str = r"^[^@]+@[^@]+\.[^@]+$";

/// Builds the "Employee Onboarding Form" schema.
pub fn onboarding_schema() -> FormSchema {
    let email = Pattern::new(EMAIL_PATTERN).expect("valid regex");

    FormSchema::new("Employee Onboarding Form")
        .description("Please fill out this form to complete your onboarding process.")
        .field(
            FieldDefinition::new("name", FieldType::Text)
                .label("Full Name")
                .placeholder("Enter your full name")
                .required(true)
                .validation(FieldValidation::new().min_length(2).max_length(50)),
        )
        .field(
            FieldDefinition::new("email", FieldType::Text)
                .label("Email")
                .placeholder("Enter your email")
                .required(true)
                .validation(FieldValidation::new().regex(email)),
        )
        .field(
            FieldDefinition::new("age", FieldType::Number)
                .label("Age")
                .placeholder("Enter your age")
                .validation(FieldValidation::new().min(18).max(100)),
        )
        .field(
            FieldDefinition::new("gender", FieldType::Select)
                .label("Gender")
                .required(true)
                .option("male", "Male")
                .option("female", "Female")
                .option("other", "Other"),
        )
        .field(
            FieldDefinition::new("interests", FieldType::MultiSelect)
                .label("Interests")
                .option("sports", "Sports")
                .option("music", "Music")
                .option("reading", "Reading")
                .option("travel", "Travel")
                .validation(FieldValidation::new().min_selected(1).max_selected(3)),
        )
        .field(
            FieldDefinition::new("birthdate", FieldType::Date)
                .label("Birth Date")
                .validation(FieldValidation::new().min_date("1900-01-01")),
        )
        .field(
            FieldDefinition::new("bio", FieldType::Textarea)
                .label("Bio")
                .placeholder("Tell us about yourself")
                .validation(FieldValidation::new().max_length(500)),
        )
        .field(
            FieldDefinition::new("newsletter", FieldType::Switch).label("Subscribe to newsletter"),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_onboarding_schema_is_well_formed() {
        let schema = onboarding_schema();
        schema.check().unwrap();
        assert_eq!(schema.title, "Employee Onboarding Form");
        assert_eq!(
            schema.field_names(),
            vec!["name", "email", "age", "gender", "interests", "birthdate", "bio", "newsletter"]
        );
    }

    #[test]
    fn test_onboarding_required_fields() {
        let schema = onboarding_schema();
        let required: Vec<_> = schema
            .fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(required, vec!["name", "email", "gender"]);
    }

    #[test]
    fn test_onboarding_schema_json_shape() {
        let json = serde_json::to_value(onboarding_schema()).unwrap();
        assert_eq!(json["fields"][2]["validation"], serde_json::json!({"min": 18, "max": 100}));
        assert_eq!(json["fields"][4]["type"], "multi-select");
        assert_eq!(json["fields"][1]["validation"]["regex"], EMAIL_PATTERN);
        assert!(json["fields"][7].get("validation").is_none());
        assert_eq!(json["fields"][7]["required"], false);
    }
}
