//! Framework guides and the architecture overview.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::catalog::{Framework, DESIGN_SYSTEM};
use crate::error::Result;
use crate::mcp::handler::{json_result, parse_arguments, success_result, ToolHandler};
use crate::mcp::protocol::{Tool, ToolResult};

#[derive(Debug, Deserialize)]
struct GuideArgs {
    framework: Framework,
}

/// Framework-specific wiring: setup snippet and usage snippet.
fn framework_sections(framework: Framework) -> (String, String) {
    let package = DESIGN_SYSTEM.package;
    match framework {
        Framework::Vanilla => (
            format!(
                r#"```html
<script type="module">
  import '{package}';
</script>
```"#
            ),
            r#"```html
<sample-button variant="primary" id="save">Save</sample-button>

<script>
  document.getElementById('save').addEventListener('click', () => {
    console.log('saved');
  });
</script>
```"#
                .to_string(),
        ),
        Framework::React => (
            format!(
                r#"```jsx
// main.jsx
import '{package}';
```"#
            ),
            r#"```jsx
import { useEffect, useRef } from 'react';

export function SaveButton({ onSave }) {
  const ref = useRef(null);

  useEffect(() => {
    const el = ref.current;
    el.addEventListener('click', onSave);
    return () => el.removeEventListener('click', onSave);
  }, [onSave]);

  return <sample-button ref={ref} variant="primary">Save</sample-button>;
}
```

Keep `className` on regular JSX elements. Attach listeners through a ref
for custom events."#
                .to_string(),
        ),
        Framework::Vue => (
            format!(
                r#"```js
// main.js
import {{ createApp }} from 'vue';
import '{package}';
import App from './App.vue';

createApp(App).mount('#app');
```

Tell the Vue compiler which tags are custom elements:

```js
// vite.config.js
vue({{
  template: {{
    compilerOptions: {{ isCustomElement: (tag) => tag.startsWith('sample-') }}
  }}
}})
```"#
            ),
            r#"```vue
<template>
  <sample-button variant="primary" @click="save">Save</sample-button>
</template>
```"#
                .to_string(),
        ),
        Framework::Angular => (
            format!(
                r#"```ts
// main.ts
import '{package}';
```

Allow custom elements in the module or standalone component:

```ts
import {{ CUSTOM_ELEMENTS_SCHEMA }} from '@angular/core';

@Component({{
  selector: 'app-root',
  standalone: true,
  schemas: [CUSTOM_ELEMENTS_SCHEMA],
  templateUrl: './app.component.html'
}})
export class AppComponent {{}}
```"#
            ),
            r#"```html
<sample-button variant="primary" (click)="save()">Save</sample-button>
```"#
                .to_string(),
        ),
        Framework::Svelte => (
            format!(
                r#"```svelte
<script>
  import '{package}';
</script>
```"#
            ),
            r#"```svelte
<sample-button variant="primary" on:click={save}>Save</sample-button>
```"#
                .to_string(),
        ),
    }
}

/// Build the Markdown guide for one framework.
pub fn implementation_guide(framework: Framework) -> String {
    let (setup, usage) = framework_sections(framework);
    format!(
        r#"# {name} with {framework}

## 1. Install

```bash
{install}
```

Or load a single component from the CDN:

```html
<script type="module" src="{cdn}sample-button.js"></script>
```

## 2. Register the components

{setup}

Import `{package}/components/<tag>` instead to register one component at a time.

## 3. Use them

{usage}

## Notes

- Package version: {version}
- Components are standard custom elements; props map to HTML attributes.
- Styling is encapsulated in Shadow DOM and themed through CSS custom properties.
"#,
        name = DESIGN_SYSTEM.name,
        framework = framework.display_name(),
        install = DESIGN_SYSTEM.installation,
        cdn = DESIGN_SYSTEM.cdn,
        package = DESIGN_SYSTEM.package,
        version = DESIGN_SYSTEM.version,
    )
}

/// Static architecture document.
pub fn system_architecture() -> Value {
    json!({
        "name": DESIGN_SYSTEM.name,
        "package": DESIGN_SYSTEM.package,
        "version": DESIGN_SYSTEM.version,
        "architecture": DESIGN_SYSTEM.architecture,
        "technical_details": {
            "base_technology": "Web Components (Custom Elements v1)",
            "component_library": "Lit",
            "styling": "Shadow DOM with CSS custom properties",
            "module_formats": ["esm", "cjs", "umd"],
            "bundle_size": "~50KB minified",
            "tree_shaking": true,
            "typescript": true,
            "accessibility": "WCAG 2.1 AA"
        },
        "framework_support": DESIGN_SYSTEM.framework_support,
        "browser_support": DESIGN_SYSTEM.browser_support,
        "installation": {
            "npm": DESIGN_SYSTEM.installation,
            "cdn": format!("{}index.js", DESIGN_SYSTEM.cdn)
        }
    })
}

/// Implementation guide tool.
pub struct GetImplementationGuideTool;

impl GetImplementationGuideTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GetImplementationGuideTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolHandler for GetImplementationGuideTool {
    fn definition(&self) -> Tool {
        Tool {
            name: "get_implementation_guide".to_string(),
            description: "Provides a step-by-step guide for using the design system with a specific framework".to_string(),
            input_schema: crate::tool_schema! {
                required: ["framework"],
                "framework": {
                    "type": "string",
                    "description": "Target framework",
                    "enum": Framework::ALL.map(Framework::as_str)
                }
            },
            output_schema: None,
        }
    }

    async fn execute(&self, args: HashMap<String, Value>) -> Result<ToolResult> {
        let args: GuideArgs = parse_arguments(args)?;
        Ok(success_result(implementation_guide(args.framework)))
    }
}

/// Architecture overview tool.
pub struct GetSystemArchitectureTool;

impl GetSystemArchitectureTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GetSystemArchitectureTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolHandler for GetSystemArchitectureTool {
    fn definition(&self) -> Tool {
        Tool {
            name: "get_system_architecture".to_string(),
            description: "Provides detailed information about the design system architecture, browser support, and technical specifications".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {},
                "additionalProperties": false
            }),
            output_schema: None,
        }
    }

    async fn execute(&self, _args: HashMap<String, Value>) -> Result<ToolResult> {
        json_result(&system_architecture())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::protocol::ContentBlock;

    fn text(result: &ToolResult) -> &str {
        let ContentBlock::Text { text } = &result.content[0];
        text
    }

    #[test]
    fn test_every_framework_has_a_guide() {
        for framework in Framework::ALL {
            let guide = implementation_guide(framework);
            assert!(guide.starts_with("# Sample Design System with"));
            assert!(guide.contains(framework.display_name()));
            assert!(guide.contains("npm install sample-design-system-educkf"));
            assert!(guide.contains("1.1.0"));
        }
    }

    #[test]
    fn test_framework_specific_content() {
        assert!(implementation_guide(Framework::Vue).contains("isCustomElement"));
        assert!(implementation_guide(Framework::Angular).contains("CUSTOM_ELEMENTS_SCHEMA"));
        assert!(implementation_guide(Framework::React).contains("useRef"));
        assert!(implementation_guide(Framework::Svelte).contains("on:click"));
    }

    #[tokio::test]
    async fn test_guide_tool() {
        let mut args = HashMap::new();
        args.insert("framework".to_string(), json!("react"));
        let result = GetImplementationGuideTool::new().execute(args).await.unwrap();
        assert!(text(&result).contains("# Sample Design System with React"));
    }

    #[tokio::test]
    async fn test_guide_tool_rejects_unknown_framework() {
        let mut args = HashMap::new();
        args.insert("framework".to_string(), json!("ember"));
        let err = GetImplementationGuideTool::new()
            .execute(args)
            .await
            .unwrap_err();
        assert_eq!(err.code(), -32602);

        let err = GetImplementationGuideTool::new()
            .execute(HashMap::new())
            .await
            .unwrap_err();
        assert_eq!(err.code(), -32602);
    }

    #[tokio::test]
    async fn test_architecture_tool() {
        let result = GetSystemArchitectureTool::new()
            .execute(HashMap::new())
            .await
            .unwrap();
        let doc: Value = serde_json::from_str(text(&result)).unwrap();
        assert_eq!(
            doc["technical_details"]["base_technology"],
            "Web Components (Custom Elements v1)"
        );
        assert_eq!(doc["framework_support"].as_array().unwrap().len(), 5);
        assert_eq!(doc["browser_support"][0], "Chrome 54+");
    }
}
