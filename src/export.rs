//! Renders a merged view as an array-literal declaration.
//!
//! The generic path emits `$<variable> = array(` ... `);` with right-padded
//! quoted keys, escaped values, and either a literal list or a bare literal
//! per line. The namespace kind bypasses all of that and emits a fixed
//! positional template.

use indoc::indoc;
use lazy_static::lazy_static;
use regex::Regex;

use crate::{error::Error, kinds::EntityKind, types::MergedView};

lazy_static! {
    // Matches an already-escaped quote or a bare one; replacing both
    // alternatives with `\'` escapes exactly the bare quotes.
    static ref QUOTE_REGEX: Regex = Regex::new(r"\\'|'").unwrap();
}

/// Renders `view` as array-literal source text.
///
/// Only records with a non-empty `current` value produce a line. Returns
/// [`Error::TooManyElements`] when a scalar-mode record carries more than
/// one element; that is a data-integrity violation, not a recoverable
/// condition.
pub fn export(view: &MergedView) -> Result<String, Error> {
    match view.kind {
        EntityKind::NamespaceNames => Ok(export_namespaces(view)),
        _ => export_array(view),
    }
}

fn export_array(view: &MergedView) -> Result<String, Error> {
    let kind = view.kind;
    let mut lines = vec![format!("${} = array(", kind.variable_name())];

    for record in &view.records {
        if record.current.is_empty() {
            continue;
        }

        let mut line = format!("\t'{}'", record.key);
        while line.len() <= kind.export_pad() {
            line.push(' ');
        }

        let normalized: Vec<String> = record
            .current
            .iter()
            .map(|value| normalize(value, kind.strip_underscores()))
            .collect();

        if kind.list_mode() {
            line.push_str(&format!("=> array( {} ),", normalized.join(", ")));
        } else {
            match normalized.as_slice() {
                [single] => line.push_str(&format!("=> {},", single)),
                _ => {
                    return Err(Error::too_many_elements(
                        kind.to_string(),
                        record.key.clone(),
                    ));
                }
            }
        }
        lines.push(line);
    }

    lines.push(");".to_string());
    Ok(lines.join("\n"))
}

/// Quotes one value element: trims it, escapes single quotes that are not
/// already escaped, and substitutes underscores for spaces where the kind
/// strips them (the inverse of the storage-side substitution).
fn normalize(value: &str, strip_underscores: bool) -> String {
    let escaped = QUOTE_REGEX.replace_all(value.trim(), r"\'");
    let escaped = if strip_underscores {
        escaped.replace(' ', "_")
    } else {
        escaped.into_owned()
    };
    format!("'{}'", escaped)
}

/// The namespace-name export is a fixed template, not the generic
/// algorithm: eighteen positional slots bound to the conventional namespace
/// numbers -2..15, with the project namespace emitted as a comment because
/// its name comes from site configuration, not from this dataset.
fn export_namespaces(view: &MergedView) -> String {
    format!(
        indoc! {"
            $namespaceNames = array(
            \tNS_MEDIA          => '{}',
            \tNS_SPECIAL        => '{}',
            \tNS_MAIN           => '{}',
            \tNS_TALK           => '{}',
            \tNS_USER           => '{}',
            \tNS_USER_TALK      => '{}',
            \t# NS_PROJECT set by site configuration
            \tNS_PROJECT_TALK   => '{}',
            \tNS_IMAGE          => '{}',
            \tNS_IMAGE_TALK     => '{}',
            \tNS_MEDIAWIKI      => '{}',
            \tNS_MEDIAWIKI_TALK => '{}',
            \tNS_TEMPLATE       => '{}',
            \tNS_TEMPLATE_TALK  => '{}',
            \tNS_HELP           => '{}',
            \tNS_HELP_TALK      => '{}',
            \tNS_CATEGORY       => '{}',
            \tNS_CATEGORY_TALK  => '{}',
            );"},
        view.current_first("-2"),
        view.current_first("-1"),
        view.current_first("0"),
        view.current_first("1"),
        view.current_first("2"),
        view.current_first("3"),
        view.current_first("5"),
        view.current_first("6"),
        view.current_first("7"),
        view.current_first("8"),
        view.current_first("9"),
        view.current_first("10"),
        view.current_first("11"),
        view.current_first("12"),
        view.current_first("13"),
        view.current_first("14"),
        view.current_first("15"),
    )
}
