//! Stored email template
//!
//! Templates are admin-editable rows keyed by a string constant. The body
//! carries `{{ field }}` placeholders filled from a context map at send time.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct EmailTemplateId(pub Uuid);

impl EmailTemplateId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for EmailTemplateId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EmailTemplate {
    pub id: EmailTemplateId,
    pub template_key: String,
    pub subject: String,
    pub body: String,
    pub created_by: String,
    pub updated_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EmailTemplate {
    /// First rendering stage: interpolate the context into the stored body.
    /// Unknown placeholders are left in place.
    pub fn render(&self, context: &BTreeMap<String, String>) -> String {
        render_placeholders(&self.body, context)
    }
}

/// Replace `{{ key }}` / `{{key}}` placeholders with context values.
pub fn render_placeholders(template: &str, context: &BTreeMap<String, String>) -> String {
    let mut rendered = template.to_string();
    for (key, value) in context {
        for pattern in [format!("{{{{ {} }}}}", key), format!("{{{{{}}}}}", key)] {
            rendered = rendered.replace(&pattern, value);
        }
    }
    rendered
}
