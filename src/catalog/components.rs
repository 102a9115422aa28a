use super::{Category, Complexity, Component, Prop};

const SIZES: &[&str] = &["compact", "default", "spacious"];

pub static COMPONENTS: [Component; 6] = [
    Component {
        key: "accordion",
        name: "Accordion",
        tag: "sample-accordion",
        child_tags: &["sample-accordion-item"],
        description: "A collapsible content container that allows users to expand and collapse sections",
        usage: r#"<sample-accordion>
  <sample-accordion-item label="Section Title" expanded>
    Content goes here
  </sample-accordion-item>
</sample-accordion>"#,
        props: &[
            Prop {
                name: "variant",
                kind: "string",
                values: &["default", "minimal", "filled", "outlined"],
                default: "default",
                description: "Visual style of the accordion",
            },
            Prop {
                name: "size",
                kind: "string",
                values: SIZES,
                default: "default",
                description: "Spacing density",
            },
            Prop {
                name: "allow-multiple",
                kind: "boolean",
                values: &[],
                default: "false",
                description: "Allow several items to be expanded at once",
            },
            Prop {
                name: "disabled",
                kind: "boolean",
                values: &[],
                default: "false",
                description: "Disables every item",
            },
        ],
        features: &["Keyboard navigation", "Accessibility support", "Smooth animations"],
        examples: &["FAQ sections", "Documentation navigation", "Settings panels"],
        category: Category::Layout,
        complexity: Complexity::Moderate,
    },
    Component {
        key: "button",
        name: "Button",
        tag: "sample-button",
        child_tags: &[],
        description: "Interactive button component with multiple variants and states",
        usage: r#"<sample-button variant="primary">Click me</sample-button>"#,
        props: &[
            Prop {
                name: "variant",
                kind: "string",
                values: &["primary", "secondary"],
                default: "primary",
                description: "Button style variant",
            },
            Prop {
                name: "size",
                kind: "string",
                values: &["small", "medium", "large"],
                default: "medium",
                description: "Button size",
            },
            Prop {
                name: "disabled",
                kind: "boolean",
                values: &[],
                default: "false",
                description: "Disables the button",
            },
            Prop {
                name: "type",
                kind: "string",
                values: &["button", "submit", "reset"],
                default: "button",
                description: "Native button type",
            },
        ],
        features: &["Multiple variants", "Disabled state", "Focus management"],
        examples: &["Form submissions", "Call-to-action buttons", "Navigation actions"],
        category: Category::Action,
        complexity: Complexity::Simple,
    },
    Component {
        key: "card",
        name: "Card",
        tag: "sample-card",
        child_tags: &[],
        description: "Flexible container component for grouping related content",
        usage: r#"<sample-card>
  <h3>Card Title</h3>
  <p>Card content</p>
</sample-card>"#,
        props: &[
            Prop {
                name: "variant",
                kind: "string",
                values: &["default", "elevated", "outlined", "filled"],
                default: "default",
                description: "Visual style of the card",
            },
            Prop {
                name: "size",
                kind: "string",
                values: SIZES,
                default: "default",
                description: "Internal padding density",
            },
            Prop {
                name: "clickable",
                kind: "boolean",
                values: &[],
                default: "false",
                description: "Makes the entire card clickable",
            },
            Prop {
                name: "disabled",
                kind: "boolean",
                values: &[],
                default: "false",
                description: "Dims the card and blocks interaction",
            },
        ],
        features: &["Flexible content slots", "Optional elevation", "Responsive design"],
        examples: &["Product listings", "User profiles", "Content previews"],
        category: Category::Layout,
        complexity: Complexity::Simple,
    },
    Component {
        key: "alert",
        name: "Alert",
        tag: "sample-alert",
        child_tags: &[],
        description: "Notification component for displaying important messages",
        usage: r#"<sample-alert variant="info">This is an alert message</sample-alert>"#,
        props: &[
            Prop {
                name: "variant",
                kind: "string",
                values: &["success", "warning", "error", "info", "neutral"],
                default: "info",
                description: "Alert type and styling",
            },
            Prop {
                name: "size",
                kind: "string",
                values: SIZES,
                default: "default",
                description: "Spacing density",
            },
            Prop {
                name: "title",
                kind: "string",
                values: &[],
                default: "",
                description: "Optional heading text",
            },
            Prop {
                name: "dismissible",
                kind: "boolean",
                values: &[],
                default: "false",
                description: "Shows a close button to dismiss the alert",
            },
            Prop {
                name: "role",
                kind: "string",
                values: &["alert", "status", "region"],
                default: "alert",
                description: "ARIA role announced to assistive technology",
            },
        ],
        features: &["Multiple alert types", "Dismissible option", "Icon integration"],
        examples: &["Error messages", "Success notifications", "Warning alerts"],
        category: Category::Feedback,
        complexity: Complexity::Simple,
    },
    Component {
        key: "modal",
        name: "Modal",
        tag: "sample-modal",
        child_tags: &[],
        description: "Overlay component for displaying content above the main interface",
        usage: r#"<sample-modal id="my-modal">
  <div slot="header">Modal Title</div>
  <p>Modal content</p>
  <div slot="footer">Footer content</div>
</sample-modal>"#,
        props: &[
            Prop {
                name: "open",
                kind: "boolean",
                values: &[],
                default: "false",
                description: "Controls modal visibility",
            },
            Prop {
                name: "size",
                kind: "string",
                values: &["small", "medium", "large", "xl", "full"],
                default: "medium",
                description: "Dialog width",
            },
            Prop {
                name: "variant",
                kind: "string",
                values: &["default", "centered", "slideup", "slidedown"],
                default: "default",
                description: "Placement and entrance animation",
            },
            Prop {
                name: "backdrop-dismiss",
                kind: "boolean",
                values: &[],
                default: "true",
                description: "Close when the backdrop is clicked",
            },
            Prop {
                name: "escape-dismiss",
                kind: "boolean",
                values: &[],
                default: "true",
                description: "Close when ESC is pressed",
            },
            Prop {
                name: "close-label",
                kind: "string",
                values: &[],
                default: "Close modal",
                description: "Accessible label of the close button",
            },
        ],
        features: &[
            "Slot-based content",
            "Keyboard navigation",
            "Focus management",
            "Backdrop interaction",
        ],
        examples: &["Confirmation dialogs", "Form overlays", "Image galleries"],
        category: Category::Overlay,
        complexity: Complexity::Complex,
    },
    Component {
        key: "breadcrumb",
        name: "Breadcrumb",
        tag: "sample-breadcrumb",
        child_tags: &["sample-breadcrumb-item"],
        description: "Navigation component showing the current page location in a hierarchy",
        usage: r#"<sample-breadcrumb>
  <sample-breadcrumb-item href="/home">Home</sample-breadcrumb-item>
  <sample-breadcrumb-item href="/products">Products</sample-breadcrumb-item>
  <sample-breadcrumb-item current>Current Page</sample-breadcrumb-item>
</sample-breadcrumb>"#,
        props: &[
            Prop {
                name: "variant",
                kind: "string",
                values: &["default", "minimal", "filled", "outlined"],
                default: "default",
                description: "Visual style of the trail",
            },
            Prop {
                name: "size",
                kind: "string",
                values: SIZES,
                default: "default",
                description: "Spacing density",
            },
            Prop {
                name: "separator",
                kind: "string",
                values: &[],
                default: "/",
                description: "Custom separator between breadcrumb items",
            },
            Prop {
                name: "max-items",
                kind: "number",
                values: &[],
                default: "0",
                description: "Collapse the trail beyond this many items (0 = never)",
            },
        ],
        features: &["Custom separators", "Icon support", "Keyboard navigation"],
        examples: &[
            "E-commerce navigation",
            "Documentation hierarchy",
            "Website navigation",
        ],
        category: Category::Navigation,
        complexity: Complexity::Simple,
    },
];
