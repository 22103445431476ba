//! Built-in "Contact Us" form, used for demos and seeding a fresh store

use crate::definition::{FormConfig, FormDefinition, FormMode};
use crate::layout::LayoutNode;
use crate::schema::{FieldDefinition, FieldOption, FieldValidation, VisibilityRule};
use serde_json::json;

/// Id of the sample form
pub const CONTACT_FORM_ID: &str = "contact-us-v1";

/// The sample contact form.
///
/// The phone field is only shown when phone is the preferred contact method.
pub fn contact_form() -> FormDefinition {
    let fields = vec![
        FieldDefinition::new("first_name", "text", "First Name")
            .with_placeholder("Enter your first name")
            .with_validation(FieldValidation { required: true, min_length: Some(2), ..Default::default() }),
        FieldDefinition::new("last_name", "text", "Last Name")
            .with_placeholder("Enter your last name")
            .with_validation(FieldValidation { required: true, min_length: Some(2), ..Default::default() }),
        FieldDefinition::new("email", "email", "Email Address")
            .with_placeholder("Enter your email")
            .with_validation(FieldValidation {
                required: true,
                pattern: Some(r"^[^@]+@[^@]+\.[^@]+$".into()),
                ..Default::default()
            }),
        FieldDefinition::new("phone", "tel", "Phone Number")
            .with_placeholder("Enter your phone number")
            .with_validation(FieldValidation::default())
            .with_rule(VisibilityRule::new("contact_method", "equals", "phone")),
        FieldDefinition::new("message", "textarea", "Message")
            .with_placeholder("Enter your message")
            .with_validation(FieldValidation { required: true, min_length: Some(10), ..Default::default() }),
        FieldDefinition::new("contact_method", "select", "Preferred Contact Method")
            .with_options(vec![
                FieldOption::new("Email", "email"),
                FieldOption::new("Phone", "phone"),
                FieldOption::new("Either", "either"),
            ])
            .with_validation(FieldValidation::required()),
    ];

    let layout = LayoutNode::container("root", "div")
        .with_attribute("className", json!("max-w-2xl mx-auto p-6 bg-white rounded-lg shadow-lg"))
        .with_child(
            LayoutNode::container("header", "div")
                .with_attribute("className", json!("mb-6"))
                .with_child(
                    LayoutNode::container("title", "h1")
                        .with_attribute("className", json!("text-3xl font-bold text-gray-900 mb-2")),
                )
                .with_child(LayoutNode::container("subtitle", "p").with_attribute("className", json!("text-gray-600"))),
        )
        .with_child(
            LayoutNode::container("form_body", "div")
                .with_attribute("className", json!("space-y-4"))
                .with_child(
                    LayoutNode::container("name_row", "div")
                        .with_attribute("className", json!("grid grid-cols-1 md:grid-cols-2 gap-4"))
                        .with_child(LayoutNode::field("first_name_field", "first_name"))
                        .with_child(LayoutNode::field("last_name_field", "last_name")),
                )
                .with_child(LayoutNode::field("email_field", "email"))
                .with_child(LayoutNode::field("phone_field", "phone"))
                .with_child(LayoutNode::field("contact_method_field", "contact_method"))
                .with_child(LayoutNode::field("message_field", "message")),
        );

    FormDefinition::build(CONTACT_FORM_ID, "Contact Us Form", FormConfig::new(FormMode::Input), fields, layout)
        .expect("sample contact form is well-formed")
}
