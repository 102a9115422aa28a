//! Heuristic usage validation.
//!
//! Code is checked against a fixed rule table. Each rule belongs to one
//! issue category, and every message it emits costs that category's penalty.

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use crate::catalog::{self, Component, Framework, DESIGN_SYSTEM};
use crate::error::{Error, Result};
use crate::mcp::handler::{parse_arguments, structured_result, ToolHandler};
use crate::mcp::protocol::{Tool, ToolResult};
use crate::tools::components::resolve_component;

pub const MAX_CODE_CHARS: usize = 10_000;

static OPEN_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<(sample-[a-z0-9-]+)\b([^>]*?)(/?)>").expect("open tag pattern")
});
static CLOSE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</(sample-[a-z0-9-]+)\s*>").expect("close tag pattern"));
static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"([:@\[(]?[A-Za-z][A-Za-z0-9:._\-\])]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+)))?"#,
    )
    .expect("attribute pattern")
});
static MARKUP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("markup pattern"));
static IMG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<img\b[^>]*>").expect("img pattern"));
static ALT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\salt\s*=").expect("alt pattern"));
static INLINE_STYLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\sstyle\s*=").expect("style pattern"));
static STANDARD_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<[a-z][a-z0-9]*(?:\s[^>]*)?\sclass\s*=").expect("class pattern")
});
static CLICKABLE_DIV: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<(?:div|span)\b[^>]*\s(?:onclick|on:click|@click|\(click\))\s*=")
        .expect("clickable div pattern")
});
static ROOT_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?:import\s+(?:[^'";]*\s+from\s+)?|require\s*\(\s*)['"]sample-design-system-educkf['"]"#,
    )
    .expect("root import pattern")
});
static UNPINNED_CDN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"unpkg\.com/sample-design-system-educkf(?:[/'"\s]|$)"#).expect("cdn pattern")
});

/// Where a rule's findings are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    Error,
    Warning,
    Accessibility,
    Performance,
    Suggestion,
}

impl IssueCategory {
    /// Score penalty per finding.
    pub fn penalty(self) -> u32 {
        match self {
            Self::Error => 20,
            Self::Warning => 10,
            Self::Accessibility => 15,
            Self::Performance => 5,
            Self::Suggestion => 0,
        }
    }
}

/// A `<sample-*>` element found in the snippet.
#[derive(Debug, Clone)]
struct Element {
    tag: String,
    attrs: Vec<(String, Option<String>)>,
    content: String,
}

impl Element {
    fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|(n, _)| n == name)
    }

    fn text_content(&self) -> String {
        MARKUP.replace_all(&self.content, "").trim().to_string()
    }
}

/// Parsed view of the code under validation.
pub struct Snippet<'a> {
    code: &'a str,
    component: Option<&'static Component>,
    framework: Option<Framework>,
    elements: Vec<Element>,
    closing_tags: Vec<String>,
}

impl<'a> Snippet<'a> {
    pub fn parse(
        code: &'a str,
        component: Option<&'static Component>,
        framework: Option<Framework>,
    ) -> Self {
        let elements = OPEN_TAG
            .captures_iter(code)
            .map(|cap| {
                let tag = cap[1].to_ascii_lowercase();
                let self_closing = &cap[3] == "/";
                let content = if self_closing {
                    String::new()
                } else {
                    let rest = &code[cap.get(0).map_or(0, |m| m.end())..];
                    let closing = format!("</{}", tag);
                    rest.to_ascii_lowercase()
                        .find(&closing)
                        .map(|end| rest[..end].to_string())
                        .unwrap_or_default()
                };
                Element {
                    attrs: parse_attributes(&cap[2]),
                    content,
                    tag,
                }
            })
            .collect();

        let closing_tags = CLOSE_TAG
            .captures_iter(code)
            .map(|cap| cap[1].to_ascii_lowercase())
            .collect();

        Self {
            code,
            component,
            framework,
            elements,
            closing_tags,
        }
    }

    fn elements_with_tag<'s>(&'s self, tag: &'s str) -> impl Iterator<Item = &'s Element> + 's {
        self.elements.iter().filter(move |e| e.tag == tag)
    }

    fn self_closed(&self, tag: &str) -> usize {
        OPEN_TAG
            .captures_iter(self.code)
            .filter(|cap| cap[1].eq_ignore_ascii_case(tag) && &cap[3] == "/")
            .count()
    }
}

fn parse_attributes(raw: &str) -> Vec<(String, Option<String>)> {
    ATTRIBUTE
        .captures_iter(raw)
        .map(|cap| {
            let value = cap
                .get(2)
                .or_else(|| cap.get(3))
                .or_else(|| cap.get(4))
                .map(|m| m.as_str().to_string());
            (cap[1].to_ascii_lowercase(), value)
        })
        .collect()
}

fn is_dynamic(value: &str) -> bool {
    value.starts_with('{') || value.contains("${") || value.contains("{{")
}

/// One entry of the rule table.
pub struct Rule {
    pub id: &'static str,
    pub category: IssueCategory,
    pub condition: &'static str,
    check: fn(&Snippet<'_>) -> Vec<String>,
}

impl Rule {
    pub fn evaluate(&self, snippet: &Snippet<'_>) -> Vec<String> {
        (self.check)(snippet)
    }
}

pub static RULES: [Rule; 16] = [
    Rule {
        id: "unknown-component",
        category: IssueCategory::Error,
        condition: "a <sample-*> tag that is not part of the design system",
        check: unknown_components,
    },
    Rule {
        id: "unclosed-tag",
        category: IssueCategory::Error,
        condition: "a <sample-*> element whose open and close tags do not balance",
        check: unbalanced_tags,
    },
    Rule {
        id: "invalid-attribute-value",
        category: IssueCategory::Error,
        condition: "an enumerated attribute set to a value the component does not accept",
        check: invalid_attribute_values,
    },
    Rule {
        id: "button-missing-variant",
        category: IssueCategory::Warning,
        condition: "<sample-button> without a variant attribute",
        check: button_without_variant,
    },
    Rule {
        id: "modal-missing-id",
        category: IssueCategory::Warning,
        condition: "<sample-modal> without an id",
        check: modal_without_id,
    },
    Rule {
        id: "inline-style",
        category: IssueCategory::Warning,
        condition: "an inline style attribute",
        check: inline_styles,
    },
    Rule {
        id: "react-class-attribute",
        category: IssueCategory::Warning,
        condition: "class= on a standard element in React code",
        check: react_class_attribute,
    },
    Rule {
        id: "img-missing-alt",
        category: IssueCategory::Accessibility,
        condition: "an <img> without alt",
        check: images_without_alt,
    },
    Rule {
        id: "button-missing-label",
        category: IssueCategory::Accessibility,
        condition: "<sample-button> with no text and no aria-label",
        check: unlabelled_buttons,
    },
    Rule {
        id: "modal-missing-label",
        category: IssueCategory::Accessibility,
        condition: "<sample-modal> with no header slot and no aria-label",
        check: unlabelled_modals,
    },
    Rule {
        id: "clickable-div",
        category: IssueCategory::Accessibility,
        condition: "a click handler on a <div> or <span>",
        check: clickable_divs,
    },
    Rule {
        id: "full-package-import",
        category: IssueCategory::Performance,
        condition: "an import of the package root",
        check: full_package_import,
    },
    Rule {
        id: "unpinned-cdn",
        category: IssueCategory::Performance,
        condition: "a CDN URL without a pinned version",
        check: unpinned_cdn,
    },
    Rule {
        id: "no-components",
        category: IssueCategory::Suggestion,
        condition: "no design system component in the code",
        check: no_components,
    },
    Rule {
        id: "component-not-used",
        category: IssueCategory::Suggestion,
        condition: "the component under validation does not appear",
        check: component_not_used,
    },
    Rule {
        id: "framework-setup",
        category: IssueCategory::Suggestion,
        condition: "framework-specific custom element setup is missing",
        check: framework_setup,
    },
];

fn unknown_components(s: &Snippet<'_>) -> Vec<String> {
    let mut seen: Vec<&str> = Vec::new();
    for element in &s.elements {
        if catalog::component_for_tag(&element.tag).is_none() && !seen.contains(&element.tag.as_str()) {
            seen.push(&element.tag);
        }
    }
    seen.into_iter()
        .map(|tag| {
            format!(
                "Unknown component <{}>. Valid components: {}",
                tag,
                catalog::component_key_list()
            )
        })
        .collect()
}

fn unbalanced_tags(s: &Snippet<'_>) -> Vec<String> {
    let mut counts: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for element in &s.elements {
        counts.entry(&element.tag).or_default().0 += 1;
    }
    for tag in &s.closing_tags {
        counts.entry(tag).or_default().1 += 1;
    }

    counts
        .into_iter()
        .filter_map(|(tag, (opened, closed))| {
            let opened = opened - s.self_closed(tag);
            (opened != closed).then(|| {
                format!(
                    "<{}> is opened {} time(s) but closed {} time(s)",
                    tag, opened, closed
                )
            })
        })
        .collect()
}

fn invalid_attribute_values(s: &Snippet<'_>) -> Vec<String> {
    let mut issues = Vec::new();
    for element in &s.elements {
        let Some(component) = catalog::component_for_tag(&element.tag) else {
            continue;
        };
        if component.tag != element.tag {
            continue;
        }
        for (name, value) in &element.attrs {
            let (Some(prop), Some(value)) = (component.prop(name), value) else {
                continue;
            };
            if prop.values.is_empty() || is_dynamic(value) || prop.values.contains(&value.as_str()) {
                continue;
            }
            issues.push(format!(
                "Invalid value '{}' for attribute '{}' on <{}>. Expected one of: {}",
                value,
                name,
                element.tag,
                prop.values.join(", ")
            ));
        }
    }
    issues
}

fn button_without_variant(s: &Snippet<'_>) -> Vec<String> {
    s.elements_with_tag("sample-button")
        .filter(|e| !e.has_attr("variant"))
        .map(|_| {
            "<sample-button> has no variant attribute; set variant=\"primary\" or \"secondary\" explicitly"
                .to_string()
        })
        .collect()
}

fn modal_without_id(s: &Snippet<'_>) -> Vec<String> {
    s.elements_with_tag("sample-modal")
        .filter(|e| !e.has_attr("id"))
        .map(|_| "<sample-modal> has no id, so scripts cannot open or close it".to_string())
        .collect()
}

fn inline_styles(s: &Snippet<'_>) -> Vec<String> {
    if INLINE_STYLE.is_match(s.code) {
        vec!["Inline style attributes bypass the design tokens; use CSS custom properties instead"
            .to_string()]
    } else {
        Vec::new()
    }
}

fn react_class_attribute(s: &Snippet<'_>) -> Vec<String> {
    if s.framework == Some(Framework::React) && STANDARD_CLASS.is_match(s.code) {
        vec!["Use className instead of class on standard JSX elements".to_string()]
    } else {
        Vec::new()
    }
}

fn images_without_alt(s: &Snippet<'_>) -> Vec<String> {
    IMG.find_iter(s.code)
        .filter(|m| !ALT.is_match(m.as_str()))
        .map(|_| "Image is missing alt text; add an alt attribute describing it".to_string())
        .collect()
}

fn unlabelled_buttons(s: &Snippet<'_>) -> Vec<String> {
    s.elements_with_tag("sample-button")
        .filter(|e| e.text_content().is_empty() && !e.has_attr("aria-label"))
        .map(|_| "<sample-button> has no text content or aria-label for screen readers".to_string())
        .collect()
}

fn unlabelled_modals(s: &Snippet<'_>) -> Vec<String> {
    s.elements_with_tag("sample-modal")
        .filter(|e| {
            let has_header = e.content.contains("slot=\"header\"") || e.content.contains("slot='header'");
            !has_header && !e.has_attr("aria-label") && !e.has_attr("aria-labelledby")
        })
        .map(|_| {
            "<sample-modal> needs a header slot or aria-label so screen readers can announce it"
                .to_string()
        })
        .collect()
}

fn clickable_divs(s: &Snippet<'_>) -> Vec<String> {
    CLICKABLE_DIV
        .find_iter(s.code)
        .map(|_| {
            "Clickable <div>/<span> is not keyboard accessible; use <sample-button> instead"
                .to_string()
        })
        .collect()
}

fn full_package_import(s: &Snippet<'_>) -> Vec<String> {
    if ROOT_IMPORT.is_match(s.code) {
        vec![format!(
            "Importing {} registers every component; import {}/components/<tag> for the ones you use",
            DESIGN_SYSTEM.package, DESIGN_SYSTEM.package
        )]
    } else {
        Vec::new()
    }
}

fn unpinned_cdn(s: &Snippet<'_>) -> Vec<String> {
    if UNPINNED_CDN.is_match(s.code) {
        vec![format!(
            "Pin the CDN URL to a version (unpkg.com/{}@{}) so releases are cached and reproducible",
            DESIGN_SYSTEM.package, DESIGN_SYSTEM.version
        )]
    } else {
        Vec::new()
    }
}

fn no_components(s: &Snippet<'_>) -> Vec<String> {
    if s.elements.is_empty() {
        vec!["No design system components found; call list_components to see what is available"
            .to_string()]
    } else {
        Vec::new()
    }
}

fn component_not_used(s: &Snippet<'_>) -> Vec<String> {
    match s.component {
        Some(c) if s.elements_with_tag(c.tag).next().is_none() => vec![format!(
            "The code does not use <{}>; see get_component_info for its usage",
            c.tag
        )],
        _ => Vec::new(),
    }
}

fn framework_setup(s: &Snippet<'_>) -> Vec<String> {
    let uses_components = !s.elements.is_empty();
    let hint = match s.framework {
        Some(Framework::Vue) if uses_components && !s.code.contains("isCustomElement") => {
            "Configure compilerOptions.isCustomElement so Vue treats sample-* tags as custom elements"
        }
        Some(Framework::Angular) if uses_components && !s.code.contains("CUSTOM_ELEMENTS_SCHEMA") => {
            "Add CUSTOM_ELEMENTS_SCHEMA to the component or module schemas"
        }
        Some(Framework::React)
            if s.elements
                .iter()
                .any(|e| e.attrs.iter().any(|(n, _)| n.starts_with("on") && n.len() > 2)) =>
        {
            "Attach custom element event listeners through a ref instead of on* props"
        }
        _ => return Vec::new(),
    };
    vec![hint.to_string()]
}

/// Outcome of a validation run.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub score: u32,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
    pub accessibility_issues: Vec<String>,
    pub performance_tips: Vec<String>,
    pub checked_rules: Vec<&'static str>,
}

/// Run every rule against the code.
///
/// With `strict`, warnings count as errors.
pub fn validate(
    code: &str,
    component: Option<&'static Component>,
    framework: Option<Framework>,
    strict: bool,
) -> Result<ValidationReport> {
    let length = code.chars().count();
    if length == 0 || length > MAX_CODE_CHARS {
        return Err(Error::invalid_params(format!(
            "code must be between 1 and {} characters, got {}",
            MAX_CODE_CHARS, length
        )));
    }

    let snippet = Snippet::parse(code, component, framework);
    let mut report = ValidationReport {
        is_valid: true,
        score: 100,
        errors: Vec::new(),
        warnings: Vec::new(),
        suggestions: Vec::new(),
        accessibility_issues: Vec::new(),
        performance_tips: Vec::new(),
        checked_rules: RULES.iter().map(|r| r.id).collect(),
    };

    for rule in &RULES {
        let findings = rule.evaluate(&snippet);
        let bucket = match rule.category {
            IssueCategory::Error => &mut report.errors,
            IssueCategory::Warning => &mut report.warnings,
            IssueCategory::Accessibility => &mut report.accessibility_issues,
            IssueCategory::Performance => &mut report.performance_tips,
            IssueCategory::Suggestion => &mut report.suggestions,
        };
        bucket.extend(findings);
    }

    if strict {
        let promoted = std::mem::take(&mut report.warnings);
        report.errors.extend(promoted);
    }

    let penalty = IssueCategory::Error.penalty() * report.errors.len() as u32
        + IssueCategory::Warning.penalty() * report.warnings.len() as u32
        + IssueCategory::Accessibility.penalty() * report.accessibility_issues.len() as u32
        + IssueCategory::Performance.penalty() * report.performance_tips.len() as u32;
    report.score = 100u32.saturating_sub(penalty);
    report.is_valid = report.errors.is_empty();

    Ok(report)
}

#[derive(Debug, Deserialize)]
struct ValidateArgs {
    code: String,
    #[serde(default)]
    component: Option<String>,
    #[serde(default)]
    framework: Option<Framework>,
    #[serde(default)]
    strict: bool,
}

/// Usage validation tool.
pub struct ValidateComponentUsageTool;

impl ValidateComponentUsageTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ValidateComponentUsageTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolHandler for ValidateComponentUsageTool {
    fn definition(&self) -> Tool {
        Tool {
            name: "validate_component_usage".to_string(),
            description: "Checks a code snippet for correct component usage, accessibility and performance issues, and returns a 0-100 score".to_string(),
            input_schema: crate::tool_schema! {
                required: ["code"],
                "code": {
                    "type": "string",
                    "minLength": 1,
                    "maxLength": MAX_CODE_CHARS,
                    "description": "HTML, JSX or template code using the components"
                },
                "component": {
                    "type": "string",
                    "enum": catalog::component_keys(),
                    "description": "Component the code is expected to use"
                },
                "framework": {
                    "type": "string",
                    "enum": Framework::ALL.map(Framework::as_str),
                    "description": "Framework the code is written for"
                },
                "strict": {
                    "type": "boolean",
                    "default": false,
                    "description": "Treat warnings as errors"
                }
            },
            output_schema: Some(json!({
                "type": "object",
                "properties": {
                    "is_valid": { "type": "boolean" },
                    "score": { "type": "integer", "minimum": 0, "maximum": 100 },
                    "errors": { "type": "array", "items": { "type": "string" } },
                    "warnings": { "type": "array", "items": { "type": "string" } },
                    "suggestions": { "type": "array", "items": { "type": "string" } },
                    "accessibility_issues": { "type": "array", "items": { "type": "string" } },
                    "performance_tips": { "type": "array", "items": { "type": "string" } },
                    "checked_rules": { "type": "array", "items": { "type": "string" } }
                },
                "required": ["is_valid", "score", "errors", "warnings"]
            })),
        }
    }

    async fn execute(&self, args: HashMap<String, Value>) -> Result<ToolResult> {
        let args: ValidateArgs = parse_arguments(args)?;
        let component = args
            .component
            .as_deref()
            .map(resolve_component)
            .transpose()?;
        let report = validate(&args.code, component, args.framework, args.strict)?;
        structured_result(&report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(code: &str) -> ValidationReport {
        validate(code, None, None, false).unwrap()
    }

    #[test]
    fn test_rule_ids_are_unique() {
        let mut ids: Vec<_> = RULES.iter().map(|r| r.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), RULES.len());
    }

    #[test]
    fn test_clean_code_scores_100() {
        let report = run(r#"<sample-button variant="primary">Save</sample-button>"#);
        assert!(report.is_valid);
        assert_eq!(report.score, 100);
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
        assert!(report.accessibility_issues.is_empty());
        assert_eq!(report.checked_rules.len(), RULES.len());
    }

    #[test]
    fn test_img_without_alt_scores_85() {
        let report = run(r#"<img src="logo.png">"#);
        assert_eq!(report.accessibility_issues.len(), 1);
        assert!(report.accessibility_issues[0].contains("alt text"));
        assert_eq!(report.score, 85);
        assert!(report.is_valid);

        let ok = run(r#"<img src="logo.png" alt="Logo">"#);
        assert!(ok.accessibility_issues.is_empty());
    }

    #[test]
    fn test_empty_and_oversized_code_rejected() {
        assert_eq!(validate("", None, None, false).unwrap_err().code(), -32602);
        let long = "a".repeat(MAX_CODE_CHARS + 1);
        assert!(validate(&long, None, None, false).is_err());
        assert!(validate(&"a".repeat(MAX_CODE_CHARS), None, None, false).is_ok());
    }

    #[test]
    fn test_unknown_component_is_error() {
        let report = run("<sample-carousel></sample-carousel>");
        assert!(!report.is_valid);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("<sample-carousel>"));
        assert_eq!(report.score, 80);
    }

    #[test]
    fn test_child_tags_are_known() {
        let report = run(
            r#"<sample-accordion><sample-accordion-item label="A">x</sample-accordion-item></sample-accordion>"#,
        );
        assert!(report.errors.is_empty(), "{:?}", report.errors);
    }

    #[test]
    fn test_unclosed_tag() {
        let report = run(r#"<sample-card><p>Body</p>"#);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("opened 1 time(s) but closed 0"));

        let jsx = run(r#"<sample-card />"#);
        assert!(jsx.errors.is_empty());
    }

    #[test]
    fn test_invalid_attribute_value() {
        let report = run(r#"<sample-button variant="danger">Go</sample-button>"#);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("Expected one of: primary, secondary"));

        let dynamic = run(r#"<sample-button variant={kind}>Go</sample-button>"#);
        assert!(dynamic.errors.is_empty());
    }

    #[test]
    fn test_warnings_and_strict_mode() {
        let code = r#"<sample-button>Go</sample-button>"#;
        let relaxed = validate(code, None, None, false).unwrap();
        assert_eq!(relaxed.warnings.len(), 1);
        assert_eq!(relaxed.score, 90);
        assert!(relaxed.is_valid);

        let strict = validate(code, None, None, true).unwrap();
        assert!(strict.warnings.is_empty());
        assert_eq!(strict.errors.len(), 1);
        assert_eq!(strict.score, 80);
        assert!(!strict.is_valid);
    }

    #[test]
    fn test_modal_rules() {
        let report = run("<sample-modal><p>Hi</p></sample-modal>");
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.accessibility_issues.len(), 1);
        assert_eq!(report.score, 75);

        let good = run(
            r#"<sample-modal id="m"><div slot="header">Title</div><p>Hi</p></sample-modal>"#,
        );
        assert!(good.warnings.is_empty());
        assert!(good.accessibility_issues.is_empty());
    }

    #[test]
    fn test_icon_button_needs_label() {
        let report = run(r#"<sample-button variant="primary"><svg></svg></sample-button>"#);
        assert_eq!(report.accessibility_issues.len(), 1);

        let labelled = run(
            r#"<sample-button variant="primary" aria-label="Close"><svg></svg></sample-button>"#,
        );
        assert!(labelled.accessibility_issues.is_empty());
    }

    #[test]
    fn test_clickable_div_and_inline_style() {
        let report = run(r#"<div onclick="go()" style="color:red">Go</div>"#);
        assert_eq!(report.accessibility_issues.len(), 1);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.score, 75);
    }

    #[test]
    fn test_react_class_attribute() {
        let code = r#"<div class="wrap"><sample-card class="x">Hi</sample-card></div>"#;
        let react = validate(code, None, Some(Framework::React), false).unwrap();
        assert_eq!(react.warnings.len(), 1);

        let html = validate(code, None, Some(Framework::Vanilla), false).unwrap();
        assert!(html.warnings.is_empty());

        let only_custom = validate(
            r#"<sample-card class="x">Hi</sample-card>"#,
            None,
            Some(Framework::React),
            false,
        )
        .unwrap();
        assert!(only_custom.warnings.is_empty());
    }

    #[test]
    fn test_performance_tips() {
        let report = run(
            r#"import 'sample-design-system-educkf';
<script src="https://unpkg.com/sample-design-system-educkf/dist/components/sample-card.js"></script>
<sample-card>Hi</sample-card>"#,
        );
        assert_eq!(report.performance_tips.len(), 2);
        assert_eq!(report.score, 90);

        let pinned = run(
            r#"import 'sample-design-system-educkf/components/sample-card';
<script src="https://unpkg.com/sample-design-system-educkf@1.1.0/dist/components/sample-card.js"></script>
<sample-card>Hi</sample-card>"#,
        );
        assert!(pinned.performance_tips.is_empty());
    }

    #[test]
    fn test_suggestions_do_not_affect_score() {
        let alert = crate::catalog::component("alert");
        let report = validate("<p>Hello</p>", alert, Some(Framework::Vue), false).unwrap();
        assert_eq!(report.score, 100);
        assert_eq!(report.suggestions.len(), 2);
        assert!(report.suggestions.iter().any(|s| s.contains("<sample-alert>")));
    }

    #[test]
    fn test_framework_setup_hint() {
        let report = validate(
            r#"<sample-card>Hi</sample-card>"#,
            None,
            Some(Framework::Angular),
            false,
        )
        .unwrap();
        assert!(report
            .suggestions
            .iter()
            .any(|s| s.contains("CUSTOM_ELEMENTS_SCHEMA")));
    }

    #[test]
    fn test_score_floors_at_zero() {
        let code = "<sample-x><sample-y><sample-z><sample-w><sample-v><sample-u>";
        let report = run(code);
        assert_eq!(report.score, 0);
        assert!(!report.is_valid);
    }

    #[tokio::test]
    async fn test_tool_validates_component_argument() {
        let mut args = HashMap::new();
        args.insert("code".to_string(), json!("<p>x</p>"));
        args.insert("component".to_string(), json!("carousel"));
        let err = ValidateComponentUsageTool::new()
            .execute(args)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Valid components"));

        let mut args = HashMap::new();
        args.insert("code".to_string(), json!(""));
        let err = ValidateComponentUsageTool::new()
            .execute(args)
            .await
            .unwrap_err();
        assert_eq!(err.code(), -32602);
    }

    #[tokio::test]
    async fn test_tool_structured_output() {
        let mut args = HashMap::new();
        args.insert("code".to_string(), json!(r#"<img src="logo.png">"#));
        let result = ValidateComponentUsageTool::new().execute(args).await.unwrap();
        let structured = result.structured_content.unwrap();
        assert_eq!(structured["score"], 85);
        assert_eq!(structured["is_valid"], true);
    }
}
