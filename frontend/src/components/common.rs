use leptos::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Danger,
}

impl ButtonVariant {
    pub fn classes(&self) -> &'static str {
        match self {
            ButtonVariant::Primary => "bg-action-primary-bg hover:bg-action-primary-bg-hover text-action-primary-text shadow-sm",
            ButtonVariant::Secondary => "border border-border text-fg hover:bg-action-ghost-bg-hover",
            ButtonVariant::Danger => "bg-action-danger-bg hover:bg-action-danger-bg-hover text-action-danger-text",
        }
    }
}

/// Placeholder for a list that has nothing to show yet.
#[component]
pub fn EmptyState(#[prop(into)] title: String) -> impl IntoView {
    view! {
        <div class="text-center py-12 px-4 rounded-lg border-2 border-dashed border-border-strong bg-surface-muted">
            <h3 class="text-sm font-semibold text-fg">{title}</h3>
        </div>
    }
}

/// Parses a money amount typed by the user. Accepts a comma as the decimal
/// separator.
pub fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim().replace(',', ".").parse::<f64>().ok()
}

pub fn format_money(amount: f64) -> String {
    format!("{:.2}", amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_have_distinct_classes() {
        assert!(ButtonVariant::Primary.classes().contains("bg-action-primary-bg"));
        assert!(ButtonVariant::Danger.classes().contains("danger"));
        assert_ne!(
            ButtonVariant::Primary.classes(),
            ButtonVariant::Secondary.classes()
        );
    }

    #[test]
    fn amounts_accept_comma_decimals() {
        assert_eq!(parse_amount(" 12,50 "), Some(12.5));
        assert_eq!(parse_amount("100"), Some(100.0));
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(format_money(149.5), "149.50");
    }
}
