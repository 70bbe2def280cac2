use regex::Regex;

/// Rewrite a Google-Sheets edit URL into its CSV export form, keeping the
/// tab selection (`gid`) when present. Returns `None` when the URL carries
/// no spreadsheet document id.
pub fn csv_export_url(url: &str) -> Option<String> {
    let document = Regex::new(r"/d/([a-zA-Z0-9_-]+)").expect("hardcoded regex should be valid");
    let gid = Regex::new(r"[#?&]gid=([0-9]+)").expect("hardcoded regex should be valid");

    let document_id = document.captures(url)?.get(1)?.as_str();
    let gid = gid
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map_or("0", |m| m.as_str());
    Some(format!(
        "https://docs.google.com/spreadsheets/d/{document_id}/export?format=csv&gid={gid}"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_edit_urls() {
        let url = "https://docs.google.com/spreadsheets/d/1AbC_d-93/edit#gid=1234";
        assert_eq!(
            csv_export_url(url).unwrap(),
            "https://docs.google.com/spreadsheets/d/1AbC_d-93/export?format=csv&gid=1234"
        );
    }

    #[test]
    fn defaults_to_the_first_tab() {
        let url = "https://docs.google.com/spreadsheets/d/1AbC/edit";
        assert_eq!(
            csv_export_url(url).unwrap(),
            "https://docs.google.com/spreadsheets/d/1AbC/export?format=csv&gid=0"
        );
    }

    #[test]
    fn rejects_urls_without_a_document_id() {
        assert_eq!(csv_export_url("https://example.com/sheet"), None);
        assert_eq!(csv_export_url(""), None);
    }
}
