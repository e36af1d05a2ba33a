//! Skill webhook payloads (chatbot builder format, version 2.0).
//!
//! Only the fields this server reads or writes are modelled; everything else
//! in the inbound request is ignored.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::path::Path;

pub const SKILL_VERSION: &str = "2.0";

/// Context value name that carries the encoded navigation path.
pub const PATH_CONTEXT: &str = "select_path";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillRequest {
    #[serde(default)]
    pub action: SkillAction,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillAction {
    #[serde(default)]
    pub params: SkillParams,
}

/// Action parameters. Every field is optional on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillParams {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_input: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utterance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

impl SkillParams {
    pub fn id_code(&self) -> &str {
        self.id_code.as_deref().unwrap_or("")
    }

    pub fn select_path(&self) -> &str {
        self.select_path.as_deref().unwrap_or("")
    }

    pub fn user_input(&self) -> &str {
        self.user_input.as_deref().unwrap_or("")
    }

    pub fn utterance(&self) -> &str {
        self.utterance.as_deref().unwrap_or("")
    }

    pub fn settle_action(&self) -> &str {
        self.action.as_deref().unwrap_or("")
    }

    pub fn keyword(&self) -> &str {
        self.keyword.as_deref().unwrap_or("")
    }

    /// Settlement value as display text; null and absent are empty.
    pub fn value_text(&self) -> String {
        match &self.value {
            None | Some(serde_json::Value::Null) => String::new(),
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillResponse {
    pub version: String,
    pub template: Template,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Context>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub outputs: Vec<Output>,
    #[serde(rename = "quickReplies", default, skip_serializing_if = "Vec::is_empty")]
    pub quick_replies: Vec<QuickReply>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Output {
    #[serde(rename = "simpleText")]
    pub simple_text: SimpleText,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleText {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickReply {
    pub label: String,
    pub action: String,
    #[serde(rename = "messageText", default, skip_serializing_if = "Option::is_none")]
    pub message_text: Option<String>,
    #[serde(rename = "blockId", default, skip_serializing_if = "Option::is_none")]
    pub block_id: Option<String>,
}

impl QuickReply {
    /// Reply that sends its own label back as the next utterance.
    pub fn message(label: &str) -> Self {
        Self {
            label: label.to_string(),
            action: "message".to_string(),
            message_text: Some(label.to_string()),
            block_id: None,
        }
    }

    /// Reply that jumps to another builder block.
    pub fn block(label: &str, block_id: &str) -> Self {
        Self {
            label: label.to_string(),
            action: "block".to_string(),
            message_text: None,
            block_id: Some(block_id.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Context {
    pub values: Vec<ContextValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextValue {
    pub name: String,
    #[serde(rename = "lifeSpan")]
    pub life_span: u32,
    pub params: BTreeMap<String, String>,
}

/// Builds a [`SkillResponse`] from a message and its selectable options.
#[derive(Debug, Clone)]
pub struct ResponseBuilder {
    response: SkillResponse,
}

impl ResponseBuilder {
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            response: SkillResponse {
                version: SKILL_VERSION.to_string(),
                template: Template {
                    outputs: vec![Output {
                        simple_text: SimpleText {
                            text: message.into(),
                        },
                    }],
                    quick_replies: Vec::new(),
                },
                context: None,
            },
        }
    }

    /// One message reply per choice, in order.
    pub fn choices<S: AsRef<str>>(mut self, choices: &[S]) -> Self {
        self.response
            .template
            .quick_replies
            .extend(choices.iter().map(|c| QuickReply::message(c.as_ref())));
        self
    }

    pub fn block(mut self, label: &str, block_id: &str) -> Self {
        self.response
            .template
            .quick_replies
            .push(QuickReply::block(label, block_id));
        self
    }

    /// Persist the encoded path for `life_span` turns.
    pub fn path_context(mut self, path: &Path, life_span: u32) -> Self {
        let mut params = BTreeMap::new();
        params.insert(PATH_CONTEXT.to_string(), path.encode());
        self.response
            .context
            .get_or_insert_with(Context::default)
            .values
            .push(ContextValue {
                name: PATH_CONTEXT.to_string(),
                life_span,
                params,
            });
        self
    }

    pub fn build(self) -> SkillResponse {
        self.response
    }
}

impl SkillResponse {
    /// Text of the first output, if any.
    pub fn text(&self) -> Option<&str> {
        self.template
            .outputs
            .first()
            .map(|o| o.simple_text.text.as_str())
    }
}
