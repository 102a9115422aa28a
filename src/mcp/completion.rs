//! Argument autocompletion for `completion/complete`.

use serde::{Deserialize, Serialize};

use crate::catalog::{self, Framework};
use crate::error::{Error, Result};
use crate::mcp::prompts::PromptRegistry;
use crate::mcp::resources::ResourceRegistry;

/// Upper bound on returned values.
pub const MAX_COMPLETIONS: usize = 10;

const REVIEW_FOCUS: [&str; 3] = ["accessibility", "performance", "best-practices"];

/// What is being completed.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum CompletionRef {
    #[serde(rename = "ref/prompt")]
    Prompt { name: String },
    #[serde(rename = "ref/resource")]
    Resource { uri: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionArgument {
    pub name: String,
    #[serde(default)]
    pub value: String,
}

/// Params of `completion/complete`.
#[derive(Debug, Clone, Deserialize)]
pub struct CompleteParams {
    #[serde(rename = "ref")]
    pub reference: CompletionRef,
    pub argument: CompletionArgument,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Completion {
    pub values: Vec<String>,
    pub total: usize,
    pub has_more: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompleteResult {
    pub completion: Completion,
}

/// Candidate values for one prompt argument.
fn prompt_candidates(argument: &str) -> Vec<&'static str> {
    match argument {
        "component" => catalog::component_keys(),
        "framework" => Framework::ALL.iter().map(|f| f.as_str()).collect(),
        "focus" => REVIEW_FOCUS.to_vec(),
        _ => Vec::new(),
    }
}

/// Case-insensitive match: prefix hits first, then substring hits, each
/// group in candidate order.
fn rank(candidates: &[&str], partial: &str) -> Vec<String> {
    let needle = partial.to_lowercase();
    let (prefix, rest): (Vec<&str>, Vec<&str>) = candidates
        .iter()
        .copied()
        .filter(|c| c.to_lowercase().contains(&needle))
        .partition(|c| c.to_lowercase().starts_with(&needle));

    prefix.into_iter().chain(rest).map(String::from).collect()
}

/// Resolve a completion request.
pub fn complete(
    params: &CompleteParams,
    prompts: &PromptRegistry,
    resources: &ResourceRegistry,
) -> Result<CompleteResult> {
    let candidates = match &params.reference {
        CompletionRef::Prompt { name } => {
            if prompts.prompt(name).is_none() {
                return Err(Error::PromptNotFound(name.clone()));
            }
            prompt_candidates(&params.argument.name)
        }
        CompletionRef::Resource { .. } => resources.uris(),
    };

    let matches = rank(&candidates, &params.argument.value);
    let total = matches.len();
    let values = matches.into_iter().take(MAX_COMPLETIONS).collect();

    Ok(CompleteResult {
        completion: Completion {
            values,
            total,
            has_more: false,
        },
    })
}
