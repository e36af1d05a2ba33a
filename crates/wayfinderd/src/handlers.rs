//! Skill intent handlers: auth, tree navigation, direct lookup, settlement,
//! random answers.
//!
//! Handlers are synchronous and work on one workbook snapshot. Every outcome
//! is a normal reply; only an unreadable credential, settlement or random
//! sheet surfaces as an error, which the route turns into a "Server error"
//! reply.

use anyhow::Result;
use rand::Rng;
use tracing::{debug, info};
use wayfinder_shared::{
    messages, DirectLookupEngine, NavigationEngine, Path, ResponseBuilder, SkillParams,
    SkillResponse, TableError,
};

use crate::config::{BlocksConfig, Config};
use crate::workbook::Workbook;

/// Value of `action.params.type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Auth,
    InvestigateTree,
    Investigate,
    Settle,
    Random,
    Unknown,
}

impl Intent {
    pub fn parse(kind: Option<&str>) -> Self {
        match kind {
            Some("auth") => Intent::Auth,
            Some("investigate_tree") => Intent::InvestigateTree,
            Some("investigate") => Intent::Investigate,
            Some("settle") => Intent::Settle,
            Some("random") => Intent::Random,
            _ => Intent::Unknown,
        }
    }
}

/// A reply plus the input description recorded in the audit log.
#[derive(Debug, Clone)]
pub struct Reply {
    pub response: SkillResponse,
    pub audit_input: String,
}

impl Reply {
    fn new(response: SkillResponse, audit_input: String) -> Self {
        Self {
            response,
            audit_input,
        }
    }

    fn text(message: impl Into<String>, audit_input: String) -> Self {
        Self::new(ResponseBuilder::text(message).build(), audit_input)
    }

    pub fn message(&self) -> &str {
        self.response.text().unwrap_or("")
    }
}

pub struct SkillHandler {
    engine: NavigationEngine,
    blocks: BlocksConfig,
    context_lifespan: u32,
}

impl SkillHandler {
    pub fn new(config: &Config) -> Self {
        Self {
            engine: NavigationEngine::new(config.navigation.to_options()),
            blocks: config.blocks.clone(),
            context_lifespan: config.session.context_lifespan,
        }
    }

    pub fn handle<R: Rng + ?Sized>(
        &self,
        workbook: &Workbook,
        params: &SkillParams,
        rng: &mut R,
    ) -> Result<Reply> {
        let intent = Intent::parse(params.kind.as_deref());
        debug!("Skill intent {:?} for '{}'", intent, params.id_code());

        match intent {
            Intent::Auth => self.auth(workbook, params),
            Intent::InvestigateTree => Ok(self.investigate_tree(workbook, params)),
            Intent::Investigate => self.investigate(workbook, params),
            Intent::Settle => settle(workbook, params),
            Intent::Random => random(workbook, params, rng),
            Intent::Unknown => {
                let input = serde_json::to_string(params)?;
                Ok(Reply::text(messages::UNKNOWN_REQUEST, input))
            }
        }
    }

    fn auth(&self, workbook: &Workbook, params: &SkillParams) -> Result<Reply> {
        let id_code = params.id_code();
        let input = format!("[auth] {}", id_code);

        if id_code.is_empty() {
            return Ok(Reply::text(messages::AUTH_CODE_REQUIRED, input));
        }

        let credentials = loaded(&workbook.credentials)?;
        let Some(credential) = credentials.find(id_code) else {
            info!("Rejected auth code '{}'", id_code);
            return Ok(Reply::text(messages::AUTH_CODE_INVALID, input));
        };

        let response = ResponseBuilder::text(messages::welcome(&credential.name))
            .block(&self.blocks.investigate_label, &self.blocks.investigate_block_id)
            .block(&self.blocks.settle_label, &self.blocks.settle_block_id)
            .build();
        Ok(Reply::new(response, input))
    }

    fn investigate_tree(&self, workbook: &Workbook, params: &SkillParams) -> Reply {
        let select_path = params.select_path();
        let user_input = params.user_input();

        if select_path.is_empty() && user_input.is_empty() {
            let intro = workbook
                .hierarchy
                .as_ref()
                .ok()
                .and_then(|t| t.intro())
                .unwrap_or(messages::NO_INVESTIGATION_DATA);
            return Reply::text(intro, "[menu]".to_string());
        }

        let path = Path::decode(select_path);
        let result = self
            .engine
            .step_loaded(workbook.hierarchy.as_ref(), &path, Some(user_input));

        let response = ResponseBuilder::text(result.message)
            .choices(result.choices.as_slice())
            .path_context(&result.path, self.context_lifespan)
            .build();
        Reply::new(response, format!("[tree] {} + {}", select_path, user_input))
    }

    fn investigate(&self, workbook: &Workbook, params: &SkillParams) -> Result<Reply> {
        let utterance = params.utterance();
        let input = utterance.to_string();

        let credentials = loaded(&workbook.credentials)?;
        if credentials.find(params.id_code()).is_none() {
            return Ok(Reply::text(messages::DIRECT_LOOKUP_USAGE, input));
        }

        let message = match workbook.hierarchy.as_ref() {
            Ok(table) => DirectLookupEngine::new(table).lookup(utterance),
            Err(_) => messages::DATA_UNAVAILABLE.to_string(),
        };
        Ok(Reply::text(message, input))
    }
}

fn settle(workbook: &Workbook, params: &SkillParams) -> Result<Reply> {
    let action = params.settle_action();
    let input = format!("[settle] {} {}", action, params.value_text());

    let table = loaded(&workbook.settlement)?;
    let message = table
        .output_for(action)
        .filter(|output| !output.is_empty())
        .unwrap_or(messages::SETTLEMENT_DEFAULT);
    Ok(Reply::text(message, input))
}

fn random<R: Rng + ?Sized>(workbook: &Workbook, params: &SkillParams, rng: &mut R) -> Result<Reply> {
    let keyword = params.keyword();
    let input = format!("[random] {}", keyword);

    let table = loaded(&workbook.random)?;
    let message = table.pick(keyword, rng).unwrap_or(messages::RANDOM_NONE);
    Ok(Reply::text(message, input))
}

/// A secondary sheet that failed to load fails the whole request.
fn loaded<T>(sheet: &Result<T, TableError>) -> Result<&T> {
    sheet.as_ref().map_err(|e| anyhow::anyhow!("{}", e))
}
