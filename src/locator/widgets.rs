use crate::facts::fact_model::{Locator, LocatorStrategy};
use crate::locator::cascade::{esc, new_locator};
use crate::locator::element_model::UiElement;

// ============================================================================
// Well-known widget table
// ============================================================================
//
// Fixed conventions for common design-system component names, resolved
// straight from the call site's attributes and children. A tag that is
// in the table but whose rule finds nothing usable declines, letting
// the caller fall through to the Component Registry.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WidgetRule {
    HeadingLike,
    TabLike,
    ButtonLike,
    LabeledInputLike,
    MenuItemLike,
    LinkLike,
    AlertLike,
    DialogLike,
}

fn rule_for(tag: &str) -> Option<WidgetRule> {
    match tag {
        "CardTitle" | "DialogTitle" | "ModalTitle" | "PageHeader" | "SectionTitle"
        | "Heading" | "Title" | "AlertTitle" => Some(WidgetRule::HeadingLike),
        "Tab" | "TabTrigger" | "TabsTrigger" => Some(WidgetRule::TabLike),
        "Button" | "IconButton" | "SubmitButton" | "LoadingButton" | "ActionButton" => {
            Some(WidgetRule::ButtonLike)
        }
        "TextField" | "TextInput" | "Input" | "InputField" | "FormField" | "FormInput"
        | "SelectField" => Some(WidgetRule::LabeledInputLike),
        "MenuItem" | "DropdownMenuItem" | "DropdownItem" | "ContextMenuItem" => {
            Some(WidgetRule::MenuItemLike)
        }
        "Link" | "NavLink" | "RouterLink" => Some(WidgetRule::LinkLike),
        "Alert" | "Toast" | "Snackbar" | "Banner" | "Callout" => Some(WidgetRule::AlertLike),
        "Dialog" | "Modal" | "Drawer" | "Sheet" => Some(WidgetRule::DialogLike),
        _ => None,
    }
}

fn role_locator(role: &str, name: &str, kind: &str, interactive: bool) -> Locator {
    new_locator(
        name,
        format!("page.getByRole('{}', {{ name: '{}' }})", role, esc(name)),
        LocatorStrategy::Role,
        kind,
        interactive,
        0.80,
    )
}

/// Resolve a PascalCase tag through the well-known widget table.
/// Returns None when the tag is unknown or its rule finds no usable
/// name, in which case the Component Registry is consulted next.
pub fn resolve_widget(el: &UiElement) -> Option<Locator> {
    let rule = rule_for(&el.tag)?;
    let text = el.literal_text();

    match rule {
        WidgetRule::HeadingLike => text
            .or_else(|| el.literal_attr("title"))
            .map(|name| role_locator("heading", name, "heading", false)),

        WidgetRule::TabLike => text.map(|name| role_locator("tab", name, "tab", true)),

        WidgetRule::ButtonLike => text
            .or_else(|| el.literal_attr("aria-label"))
            .map(|name| role_locator("button", name, "button", true)),

        WidgetRule::LabeledInputLike => el.literal_attr("label").map(|label| {
            new_locator(
                label,
                format!("page.getByLabel('{}')", esc(label)),
                LocatorStrategy::Label,
                "textbox",
                true,
                0.80,
            )
        }),

        WidgetRule::MenuItemLike => {
            text.map(|name| role_locator("menuitem", name, "menuitem", true))
        }

        WidgetRule::LinkLike => text.map(|name| role_locator("link", name, "link", true)),

        WidgetRule::AlertLike => text.map(|t| {
            new_locator(
                t,
                format!("page.getByText('{}')", esc(t)),
                LocatorStrategy::Text,
                "alert",
                false,
                0.80,
            )
        }),

        WidgetRule::DialogLike => Some(match el.literal_attr("title") {
            Some(title) => role_locator("dialog", title, "dialog", false),
            None => new_locator(
                &el.tag,
                "page.getByRole('dialog')".to_string(),
                LocatorStrategy::Role,
                "dialog",
                false,
                0.70,
            ),
        }),
    }
}
