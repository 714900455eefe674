//! Minor-unit price formatting driven by storefront money-format templates.

use crate::utils::error::{Result, WidgetError};
use regex::Regex;

pub const DEFAULT_MONEY_FORMAT: &str = "${{amount}}";

const PLACEHOLDERS: [&str; 7] = [
    "{{amount}}",
    "{{amount_no_decimals}}",
    "{{amount_with_comma_separator}}",
    "{{amount_no_decimals_with_comma_separator}}",
    "{{amount_with_apostrophe_separator}}",
    "{{amount_with_space_separator}}",
    "{{amount_no_decimals_with_space_separator}}",
];

/// A money-format template such as `${{amount}}` or `{{amount_with_comma_separator}} €`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoneyFormat {
    template: String,
}

impl Default for MoneyFormat {
    fn default() -> Self {
        Self::new(DEFAULT_MONEY_FORMAT)
    }
}

impl MoneyFormat {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Every `{{amount…}}` token must be known and at least one must be present.
    pub fn validate(&self, field_name: &str) -> Result<()> {
        let invalid = |reason: String| WidgetError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: self.template.clone(),
            reason,
        };

        let re = Regex::new(r"\{\{\s*amount[^}]*\}\}").map_err(|e| WidgetError::ConfigError {
            message: format!("money placeholder pattern: {}", e),
        })?;

        let mut found = false;
        for token in re.find_iter(&self.template) {
            if !PLACEHOLDERS.contains(&token.as_str()) {
                return Err(invalid(format!("Unsupported placeholder {}", token.as_str())));
            }
            found = true;
        }
        if !found {
            return Err(invalid("Template has no {{amount}} placeholder".to_string()));
        }
        Ok(())
    }

    /// Formats `cents` into the template's first recognised placeholder.
    ///
    /// Templates are checked by `validate` at config load; one without any placeholder
    /// still renders a bare `{{amount}}` so a price is never blank.
    pub fn format(&self, cents: u64) -> String {
        let found = PLACEHOLDERS
            .iter()
            .filter_map(|p| self.template.find(p).map(|idx| (idx, *p)))
            .min_by_key(|(idx, _)| *idx);

        match found {
            Some((idx, placeholder)) => {
                let amount = render_amount(placeholder, cents);
                let mut out = String::with_capacity(self.template.len() + amount.len());
                out.push_str(&self.template[..idx]);
                out.push_str(&amount);
                out.push_str(&self.template[idx + placeholder.len()..]);
                out
            }
            None => render_amount("{{amount}}", cents),
        }
    }
}

fn render_amount(placeholder: &str, cents: u64) -> String {
    match placeholder {
        "{{amount_no_decimals}}" => group(rounded_units(cents), ","),
        "{{amount_with_comma_separator}}" => with_decimals(cents, ".", ','),
        "{{amount_no_decimals_with_comma_separator}}" => group(rounded_units(cents), "."),
        "{{amount_with_apostrophe_separator}}" => with_decimals(cents, "'", '.'),
        "{{amount_with_space_separator}}" => with_decimals(cents, " ", ','),
        "{{amount_no_decimals_with_space_separator}}" => group(rounded_units(cents), " "),
        _ => with_decimals(cents, ",", '.'),
    }
}

fn with_decimals(cents: u64, thousands: &str, decimal: char) -> String {
    format!("{}{}{:02}", group(cents / 100, thousands), decimal, cents % 100)
}

fn rounded_units(cents: u64) -> u64 {
    cents / 100 + u64::from(cents % 100 >= 50)
}

fn group(units: u64, separator: &str) -> String {
    let digits = units.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}

/// Formats with the default `${{amount}}` template.
pub fn format_money(cents: u64) -> String {
    MoneyFormat::default().format(cents)
}
