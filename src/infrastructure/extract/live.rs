use crate::config::SiteConfig;
use crate::domain::{RawRow, RecordSet, MAX_RECORDS};

/// Builds the expression evaluated against the live document. It mirrors
/// the snapshot extractor exactly: primary id lookup, class fallback,
/// row/cell enumeration with the same cap and trimming. Selector strings
/// are JSON-encoded so they arrive in the page as proper string literals.
pub fn build_row_script(site: &SiteConfig) -> String {
    let id = js_string(&site.container_id_selector);
    let fallback = js_string(&site.container_class_selector);
    let row = js_string(&site.row_selector);
    let cell = js_string(&site.cell_selector);

    format!(
        r#"(() => {{
    let table = document.querySelector({id});
    if (!table) {{ table = document.querySelector({fallback}); }}
    if (!table) {{ return []; }}
    const rows = table.querySelectorAll({row});
    const out = [];
    for (let i = 0; i < Math.min(rows.length, {MAX_RECORDS}); i++) {{
        const cells = rows[i].querySelectorAll({cell});
        out.push(Array.from(cells, (c) => c.textContent.trim()));
    }}
    return out;
}})()"#
    )
}

/// Validates the evaluated rows into a record set, same rules as the
/// snapshot path.
pub fn rows_from_values(rows: Vec<RawRow>) -> RecordSet {
    RecordSet::from_rows(rows)
}

pub(crate) fn js_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_embeds_configured_selectors_and_cap() {
        let script = build_row_script(&SiteConfig::default());
        assert!(script.contains(r##""#example-table""##));
        assert!(script.contains(r#"".tabulator""#));
        assert!(script.contains(r#"".tabulator-row""#));
        assert!(script.contains(r#"".tabulator-cell""#));
        assert!(script.contains("Math.min(rows.length, 100)"));
    }

    #[test]
    fn evaluated_rows_are_validated_like_snapshot_rows() {
        let set = rows_from_values(vec![
            vec![
                "2024.01.02".to_string(),
                "2050.00".to_string(),
                "2060.00".to_string(),
                "2050.00".to_string(),
                "98,765".to_string(),
            ],
            vec!["header".to_string()],
        ]);

        assert_eq!(set.len(), 1);
        assert_eq!(set.records()[0].bid, "2050.00");
    }
}
