//! MCP Prompt Templates
//!
//! Pre-defined prompts that help assistants integrate, debug and review
//! design system components.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::catalog::DESIGN_SYSTEM;

/// A prompt argument definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptArgument {
    pub name: String,
    pub description: String,
    pub required: bool,
}

/// A prompt descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prompt {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub arguments: Vec<PromptArgument>,
}

/// A prompt message (the actual content).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: String,
    pub content: PromptContent,
}

/// Prompt content types.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PromptContent {
    Text { text: String },
}

/// Result of prompts/list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPromptsResult {
    pub prompts: Vec<Prompt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

/// Result of prompts/get.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetPromptResult {
    pub description: Option<String>,
    pub messages: Vec<PromptMessage>,
}

/// Template for generating prompt messages.
///
/// `{{name}}` placeholders are replaced by the supplied argument, or by the
/// default when the argument is absent or empty.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    pub description: String,
    pub template: String,
    pub defaults: HashMap<String, String>,
}

impl PromptTemplate {
    fn new(description: &str, template: &str, defaults: &[(&str, &str)]) -> Self {
        Self {
            description: description.to_string(),
            template: template.to_string(),
            defaults: defaults
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

/// Fill `{{name}}` placeholders in a single pass. Substituted values are
/// copied verbatim, so placeholders inside them stay as written. Unknown
/// placeholders are left alone.
fn render(template: &str, values: &HashMap<&str, &str>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        match after.find("}}") {
            Some(close) => match values.get(&after[..close]) {
                Some(value) => {
                    out.push_str(value);
                    rest = &after[close + 2..];
                }
                None => {
                    out.push_str("{{");
                    rest = after;
                }
            },
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

fn argument(name: &str, description: &str, required: bool) -> PromptArgument {
    PromptArgument {
        name: name.to_string(),
        description: description.to_string(),
        required,
    }
}

/// Prompt registry, listed in registration order.
#[derive(Debug, Clone, Default)]
pub struct PromptRegistry {
    prompts: Vec<(Prompt, PromptTemplate)>,
}

impl PromptRegistry {
    /// Create a new registry with built-in prompts.
    pub fn new() -> Self {
        let mut registry = Self::default();
        registry.register_builtin_prompts();
        registry
    }

    /// Register built-in prompts.
    fn register_builtin_prompts(&mut self) {
        let package = DESIGN_SYSTEM.package;

        self.register(
            Prompt {
                name: "component_integration".to_string(),
                description: "Get step-by-step integration instructions for a specific component"
                    .to_string(),
                arguments: vec![
                    argument("component", "The component to integrate", true),
                    argument(
                        "framework",
                        "Target framework (vanilla, react, vue, angular, svelte)",
                        false,
                    ),
                ],
            },
            PromptTemplate::new(
                "Integration guide for {{component}} component",
                &format!(
                    r#"I need help integrating the {{{{component}}}} component from the {package} package into my {{{{framework}}}} project. Please provide step-by-step instructions including:

1. Installation and setup
2. Import statements
3. Basic usage example
4. Common configuration options
5. Best practices and tips

Component: {{{{component}}}}
Framework: {{{{framework}}}}"#
                ),
                &[("component", "[COMPONENT_NAME]"), ("framework", "vanilla")],
            ),
        );

        self.register(
            Prompt {
                name: "troubleshoot_component".to_string(),
                description: "Get help troubleshooting component implementation issues".to_string(),
                arguments: vec![
                    argument("component", "Component having issues", true),
                    argument("issue", "Description of the problem", true),
                    argument("framework", "Framework being used", false),
                ],
            },
            PromptTemplate::new(
                "Troubleshooting guide for {{component}} component",
                &format!(
                    r#"I'm having an issue with the {{{{component}}}} component from the {package} package. Here are the details:

**Issue:** {{{{issue}}}}
**Component:** {{{{component}}}}
**Framework:** {{{{framework}}}}

Please help me:
1. Identify the likely cause of this issue
2. Provide step-by-step troubleshooting steps
3. Suggest possible solutions
4. Share any known workarounds
5. Recommend best practices to avoid this issue in the future

Please be specific and include code examples where helpful."#
                ),
                &[
                    ("component", "[COMPONENT_NAME]"),
                    ("issue", "[DESCRIBE_THE_ISSUE]"),
                    ("framework", "unknown"),
                ],
            ),
        );

        self.register(
            Prompt {
                name: "design_review".to_string(),
                description: "Review code for design system best practices and compliance"
                    .to_string(),
                arguments: vec![
                    argument("code", "Code to review", true),
                    argument(
                        "focus",
                        "What to focus on (accessibility, performance, best-practices)",
                        false,
                    ),
                ],
            },
            PromptTemplate::new(
                "Design system code review focusing on {{focus}}",
                r#"Please review my code for design system compliance and best practices. Focus on: {{focus}}

**Code to review:**
```
{{code}}
```

Please check for:
1. Proper component usage and configuration
2. Accessibility compliance (WCAG 2.1 AA)
3. Performance best practices
4. Code maintainability and readability
5. Design system consistency
6. Framework-specific best practices

Provide specific feedback with examples and suggestions for improvement."#,
                &[("code", "[PASTE_YOUR_CODE_HERE]"), ("focus", "best-practices")],
            ),
        );
    }

    /// Register a prompt, replacing any earlier prompt with the same name.
    pub fn register(&mut self, prompt: Prompt, template: PromptTemplate) {
        match self.prompts.iter_mut().find(|(p, _)| p.name == prompt.name) {
            Some(slot) => *slot = (prompt, template),
            None => self.prompts.push((prompt, template)),
        }
    }

    /// List all prompts.
    pub fn list(&self) -> Vec<Prompt> {
        self.prompts.iter().map(|(p, _)| p.clone()).collect()
    }

    /// Look up a prompt descriptor.
    pub fn prompt(&self, name: &str) -> Option<&Prompt> {
        self.prompts.iter().find(|(p, _)| p.name == name).map(|(p, _)| p)
    }

    /// Get a prompt by name with arguments substituted.
    pub fn get(&self, name: &str, arguments: &HashMap<String, String>) -> Option<GetPromptResult> {
        let (prompt, template) = self.prompts.iter().find(|(p, _)| p.name == name)?;

        let values: HashMap<&str, &str> = prompt
            .arguments
            .iter()
            .map(|arg| {
                let value = arguments
                    .get(&arg.name)
                    .filter(|v| !v.trim().is_empty())
                    .or_else(|| template.defaults.get(&arg.name))
                    .map(String::as_str)
                    .unwrap_or_default();
                (arg.name.as_str(), value)
            })
            .collect();

        let description = render(&template.description, &values);
        let text = render(&template.template, &values);

        Some(GetPromptResult {
            description: Some(description),
            messages: vec![PromptMessage {
                role: "user".to_string(),
                content: PromptContent::Text { text },
            }],
        })
    }
}
