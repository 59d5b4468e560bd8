//! Country-reference flag fetcher.
//!
//! One GET for both countries. Records come back in whatever order the
//! provider chooses, so each is matched to its requested code through
//! the record's own `cca3` field.

use country_compare_source_models::FlagPair;
use serde::Deserialize;

use crate::SourceError;

const ALPHA_URL: &str = "https://restcountries.com/v3.1/alpha";

/// One country record, reduced to the fields the comparison uses.
#[derive(Debug, Clone, Deserialize)]
pub struct FlagRecord {
    /// Three-letter code identifying the record.
    pub cca3: String,
    /// Flag glyph.
    pub flag: String,
}

/// The lookup URL for one country pair: comma-joined lowercase codes.
#[must_use]
pub fn flags_url(codes: [&str; 2]) -> String {
    format!(
        "{ALPHA_URL}?codes={},{}",
        codes[0].to_lowercase(),
        codes[1].to_lowercase()
    )
}

/// Fetches both countries' flag glyphs, in the order given.
///
/// # Errors
///
/// Returns [`SourceError`] if the request fails, the body does not
/// decode, or a requested code is absent from the response.
pub async fn fetch_flags(
    client: &reqwest::Client,
    codes: [&str; 2],
) -> Result<FlagPair, SourceError> {
    let url = flags_url(codes);
    log::info!("Fetching flags for {}+{}", codes[0], codes[1]);

    let response = client.get(&url).send().await?.error_for_status()?;
    let records: Vec<FlagRecord> = response.json().await?;

    match_flags(&records, codes)
}

/// Matches returned records back to the requested codes by `cca3`.
///
/// # Errors
///
/// Returns [`SourceError::CountryMissing`] for a code with no record.
pub fn match_flags(records: &[FlagRecord], codes: [&str; 2]) -> Result<FlagPair, SourceError> {
    let flags = codes.map(|code| {
        records
            .iter()
            .find(|r| r.cca3.eq_ignore_ascii_case(code))
            .map(|r| r.flag.clone())
            .ok_or_else(|| SourceError::CountryMissing {
                code: code.to_string(),
            })
    });

    let [first, second] = flags;
    Ok(FlagPair {
        flags: [first?, second?],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(cca3: &str, flag: &str) -> FlagRecord {
        FlagRecord {
            cca3: cca3.to_string(),
            flag: flag.to_string(),
        }
    }

    #[test]
    fn url_lowercases_and_joins_codes() {
        assert_eq!(
            flags_url(["EST", "LVA"]),
            "https://restcountries.com/v3.1/alpha?codes=est,lva"
        );
    }

    #[test]
    fn matches_records_regardless_of_response_order() {
        let records = vec![record("LVA", "🇱🇻"), record("EST", "🇪🇪")];
        let pair = match_flags(&records, ["EST", "LVA"]).unwrap();
        assert_eq!(pair.comparison_text(), "🇪🇪 vs 🇱🇻");
    }

    #[test]
    fn missing_code_is_an_error() {
        let records = vec![record("EST", "🇪🇪")];
        let err = match_flags(&records, ["EST", "LVA"]).unwrap_err();
        assert!(matches!(
            err,
            SourceError::CountryMissing { code } if code == "LVA"
        ));
    }

    #[test]
    fn decodes_provider_records() {
        let json = r#"[{"cca3": "EST", "flag": "🇪🇪", "unrelated": 1}]"#;
        let records: Vec<FlagRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records[0].cca3, "EST");
    }
}
