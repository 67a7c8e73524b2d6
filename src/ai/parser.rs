//! Parser module for processing AI responses.
//!
//! Turns the free-form text returned by the model into a [`CommandAnalysis`].
//! Extraction is tolerant (prose, code fences and other wrapping noise are
//! skipped) while validation is strict: the recovered object must carry all
//! four fields with the right JSON types, or the whole reply is rejected.

use serde_json::{Map, Value};

use crate::error::ParseError;
use crate::security::{CommandAnalysis, SafetyLevel};

const FENCE: &str = "```";

/// Parse a command analysis from AI response text.
///
/// Looks for a JSON object shaped like:
/// ```text
/// {"explanation": "...", "safety": "...", "risks": [...], "recommendations": [...]}
/// ```
///
/// The object may be wrapped in a fenced code block (optionally tagged
/// `json`) or surrounded by prose. Candidates are tried in order and the
/// first one that parses as JSON is validated; when none parses, the error
/// from the first candidate is reported. Fields are passed through unchanged.
pub fn normalize(response: &str) -> Result<CommandAnalysis, ParseError> {
    let mut candidates = json_candidates(response).into_iter();
    let first = candidates.next().ok_or(ParseError::NoJsonObject)?;

    let first_err = match parse_candidate(first) {
        Ok(value) => return validate_shape(value),
        Err(e) => e,
    };
    for candidate in candidates {
        if let Ok(value) = parse_candidate(candidate) {
            return validate_shape(value);
        }
    }

    Err(ParseError::MalformedJson(first_err))
}

fn parse_candidate(candidate: &str) -> serde_json::Result<Value> {
    serde_json::from_str(strip_fence_noise(candidate))
}

/// Every place a JSON object might be hiding, most likely first.
///
/// Fenced blocks tagged `json` come first, then other fenced blocks that
/// contain a `{` (a quoted `find ... -exec rm {} \;` lands here), and last
/// the outermost brace span of the whole reply.
fn json_candidates(response: &str) -> Vec<&str> {
    let blocks: Vec<FencedBlock<'_>> = fenced_blocks(response)
        .into_iter()
        .filter(|block| block.body.contains('{'))
        .collect();

    let (tagged, untagged): (Vec<_>, Vec<_>) = blocks
        .into_iter()
        .partition(|block| block.tag.eq_ignore_ascii_case("json"));

    let mut candidates: Vec<&str> = tagged
        .into_iter()
        .chain(untagged)
        .map(|block| block.body)
        .collect();
    candidates.extend(extract_brace_span(response));
    candidates
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FencedBlock<'a> {
    tag: &'a str,
    body: &'a str,
}

/// All closed fenced blocks, in order.
///
/// The language tag after the opening fence (`json`, `JSON`, `bash`, ...)
/// may be preceded by spaces or tabs and is not part of the body. Scanning
/// stops at an unclosed fence.
fn fenced_blocks(response: &str) -> Vec<FencedBlock<'_>> {
    let mut blocks = Vec::new();
    let mut rest = response;

    while let Some(open) = rest.find(FENCE) {
        let after_open = rest[open + FENCE.len()..].trim_start_matches(is_inline_space);
        let tag_len = after_open
            .find(|c: char| !is_tag_char(c))
            .unwrap_or(after_open.len());
        let (tag, body_and_rest) = after_open.split_at(tag_len);

        let Some(close) = body_and_rest.find(FENCE) else {
            break;
        };
        blocks.push(FencedBlock {
            tag,
            body: &body_and_rest[..close],
        });

        rest = &body_and_rest[close + FENCE.len()..];
    }

    blocks
}

fn is_tag_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+')
}

fn is_inline_space(c: char) -> bool {
    matches!(c, ' ' | '\t')
}

/// Substring from the first `{` to the last `}` inclusive.
///
/// `None` when there is no `{`, or no `}` at or after it. A reply cut off
/// mid-object therefore only counts as "no object" when its final `}` is
/// missing entirely; otherwise it reaches the JSON parser and is reported as
/// malformed.
fn extract_brace_span(response: &str) -> Option<&str> {
    let start = response.find('{')?;
    let end = response.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&response[start..=end])
}

/// Trim and drop fence markers left over from a malformed fence.
fn strip_fence_noise(candidate: &str) -> &str {
    let mut text = candidate.trim();

    if let Some(rest) = text.strip_prefix(FENCE) {
        text = rest
            .trim_start_matches(is_inline_space)
            .trim_start_matches(is_tag_char)
            .trim_start();
    }
    if let Some(rest) = text.strip_suffix(FENCE) {
        text = rest.trim_end();
    }

    text
}

fn validate_shape(value: Value) -> Result<CommandAnalysis, ParseError> {
    let Value::Object(mut obj) = value else {
        return Err(ParseError::InvalidField("explanation"));
    };

    let explanation = take_string(&mut obj, "explanation")?;
    let safety = take_string(&mut obj, "safety")?;
    let risks = take_string_list(&mut obj, "risks")?;
    let recommendations = take_string_list(&mut obj, "recommendations")?;

    Ok(CommandAnalysis {
        explanation,
        safety_level: SafetyLevel::new(safety),
        risks,
        recommendations,
    })
}

fn take_string(obj: &mut Map<String, Value>, field: &'static str) -> Result<String, ParseError> {
    match obj.remove(field) {
        Some(Value::String(s)) => Ok(s),
        _ => Err(ParseError::InvalidField(field)),
    }
}

fn take_string_list(
    obj: &mut Map<String, Value>,
    field: &'static str,
) -> Result<Vec<String>, ParseError> {
    let Some(Value::Array(items)) = obj.remove(field) else {
        return Err(ParseError::InvalidField(field));
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::String(s) => Ok(s),
            _ => Err(ParseError::InvalidField(field)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: &str = r#"{"explanation":"Lists files.","safety":"Safe","risks":[],"recommendations":["Run in a sandbox first."]}"#;

    fn sample() -> CommandAnalysis {
        CommandAnalysis {
            explanation: "Removes the directory tree. Does not ask for confirmation.".to_string(),
            safety_level: SafetyLevel::new("Extremely Dangerous"),
            risks: vec![
                "Irreversible data loss".to_string(),
                "  untrimmed entry ".to_string(),
            ],
            recommendations: vec!["Double-check the path".to_string()],
        }
    }

    fn render_as_fenced_json(analysis: &CommandAnalysis) -> String {
        format!(
            "```json\n{}\n```",
            serde_json::to_string_pretty(analysis).unwrap()
        )
    }

    #[test]
    fn test_fenced_block_with_prose() {
        let response = format!("Sure! ```json\n{}\n```", PLAIN);

        let analysis = normalize(&response).unwrap();
        assert_eq!(analysis.explanation, "Lists files.");
        assert_eq!(analysis.safety_level.as_str(), "Safe");
        assert!(analysis.risks.is_empty());
        assert_eq!(analysis.recommendations, vec!["Run in a sandbox first."]);
    }

    #[test]
    fn test_bare_object() {
        let analysis = normalize(PLAIN).unwrap();
        assert_eq!(analysis.safety_level.as_str(), "Safe");
    }

    #[test]
    fn test_object_surrounded_by_prose() {
        let response = format!("Here is my analysis:\n{}\nHope this helps!", PLAIN);
        let analysis = normalize(&response).unwrap();
        assert_eq!(analysis.explanation, "Lists files.");
    }

    #[test]
    fn test_untagged_and_uppercase_fences() {
        let untagged = format!("```\n{}\n```", PLAIN);
        assert!(normalize(&untagged).is_ok());

        let upper = format!("```JSON\n{}\n```", PLAIN);
        assert!(normalize(&upper).is_ok());

        let inline = format!("```json{}```", PLAIN);
        assert!(normalize(&inline).is_ok());
    }

    #[test]
    fn test_fenced_round_trip() {
        let record = sample();
        assert_eq!(normalize(&render_as_fenced_json(&record)).unwrap(), record);
    }

    #[test]
    fn test_fields_pass_through_unchanged() {
        let response = r#"{"explanation":"  spaced  ","safety":"mostly harmless","risks":["a","a"],"recommendations":[" B "]}"#;
        let analysis = normalize(response).unwrap();
        assert_eq!(analysis.explanation, "  spaced  ");
        assert_eq!(analysis.safety_level.as_str(), "mostly harmless");
        assert_eq!(analysis.risks, vec!["a", "a"]);
        assert_eq!(analysis.recommendations, vec![" B "]);
    }

    #[test]
    fn test_extra_keys_ignored() {
        let response = r#"{"explanation":"x","safety":"Safe","risks":[],"recommendations":[],"confidence":0.9}"#;
        assert!(normalize(response).is_ok());
    }

    #[test]
    fn test_code_fence_without_brace_is_skipped() {
        let response = format!(
            "You ran:\n```bash\nls -la\n```\nAnalysis:\n```json\n{}\n```",
            PLAIN
        );
        assert_eq!(normalize(&response).unwrap().explanation, "Lists files.");

        // No fenced JSON at all: falls back to brace scan
        let response = format!("```sh\nls\n```\n{}", PLAIN);
        assert_eq!(normalize(&response).unwrap().explanation, "Lists files.");
    }

    #[test]
    fn test_code_fence_with_braces_before_json_block() {
        let response = format!(
            "You asked about:\n```bash\nfind . -name '*.tmp' -exec rm {{}} \\;\n```\nAnalysis:\n```json\n{}\n```",
            PLAIN
        );
        assert_eq!(normalize(&response).unwrap().explanation, "Lists files.");

        // Untagged JSON block after a brace-bearing shell block
        let response = format!("```sh\necho ${{HOME}} {{a,b}}\n```\n```\n{}\n```", PLAIN);
        assert_eq!(normalize(&response).unwrap().explanation, "Lists files.");
    }

    #[test]
    fn test_json_tagged_block_preferred() {
        let response = format!(
            "```\n{{\"note\":\"not the answer\"}}\n```\n```json\n{}\n```",
            PLAIN
        );
        assert_eq!(normalize(&response).unwrap().explanation, "Lists files.");
    }

    #[test]
    fn test_space_before_fence_tag() {
        let response = format!("``` json\n{}\n```", PLAIN);
        assert_eq!(normalize(&response).unwrap().explanation, "Lists files.");

        let response = format!("```\tJSON\n{}\n```", PLAIN);
        assert!(normalize(&response).is_ok());
    }

    #[test]
    fn test_unclosed_fence_falls_back_to_braces() {
        let response = format!("```json\n{}\n", PLAIN);
        assert_eq!(normalize(&response).unwrap().explanation, "Lists files.");
    }

    #[test]
    fn test_no_json_object() {
        for response in ["", "I cannot analyze that command.", "only { opening", "closing } only"] {
            assert!(
                matches!(normalize(response), Err(ParseError::NoJsonObject)),
                "expected NoJsonObject for {:?}",
                response
            );
        }
    }

    #[test]
    fn test_reversed_braces_is_no_json_object() {
        assert!(matches!(
            normalize("} nothing here {"),
            Err(ParseError::NoJsonObject)
        ));
    }

    #[test]
    fn test_trailing_comma_is_malformed() {
        let response = r#"{"explanation":"x","safety":"Safe","risks":[],"recommendations":[],}"#;
        assert!(matches!(normalize(response), Err(ParseError::MalformedJson(_))));
    }

    #[test]
    fn test_truncated_without_closing_brace() {
        let response = r#"{"explanation":"Deletes everything.","safety":"Extremely Dangerous","risks":["irreversible data loss""#;
        assert!(matches!(normalize(response), Err(ParseError::NoJsonObject)));
    }

    #[test]
    fn test_truncated_after_inner_brace_is_malformed() {
        // The last `}` closes a nested object, so the span is cut mid-object
        let response = r#"{"explanation":"x","meta":{"v":1},"safety":"Extre"#;
        assert!(matches!(normalize(response), Err(ParseError::MalformedJson(_))));
    }

    #[test]
    fn test_fenced_body_with_invalid_json_is_malformed() {
        let response = "```json\n{explanation: 'single quotes'}\n```";
        assert!(matches!(normalize(response), Err(ParseError::MalformedJson(_))));
    }

    #[test]
    fn test_missing_risks() {
        let response = r#"{"explanation":"x","safety":"Safe","recommendations":[]}"#;
        let err = normalize(response).unwrap_err();
        assert!(matches!(err, ParseError::InvalidField("risks")));
        assert_eq!(err.to_string(), "missing or invalid field: risks");
    }

    #[test]
    fn test_empty_risks_is_valid() {
        let response = r#"{"explanation":"x","safety":"Safe","risks":[],"recommendations":[]}"#;
        assert!(normalize(response).unwrap().risks.is_empty());
    }

    #[test]
    fn test_mistyped_fields() {
        let cases = [
            (r#"{"explanation":1,"safety":"Safe","risks":[],"recommendations":[]}"#, "explanation"),
            (r#"{"explanation":"x","safety":null,"risks":[],"recommendations":[]}"#, "safety"),
            (r#"{"explanation":"x","safety":"Safe","risks":"none","recommendations":[]}"#, "risks"),
            (r#"{"explanation":"x","safety":"Safe","risks":[],"recommendations":[1,2]}"#, "recommendations"),
            (r#"{"explanation":"x","safety":"Safe","risks":["ok",null],"recommendations":[]}"#, "risks"),
        ];

        for (response, field) in cases {
            match normalize(response) {
                Err(ParseError::InvalidField(name)) => assert_eq!(name, field),
                other => panic!("expected invalid field {}, got {:?}", field, other),
            }
        }
    }

    #[test]
    fn test_strip_fence_noise() {
        assert_eq!(strip_fence_noise("  ```json\n{}\n```  "), "{}");
        assert_eq!(strip_fence_noise("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_fence_noise("``` json\n{}\n```"), "{}");
    }

    #[test]
    fn test_fenced_blocks_record_tags() {
        let blocks = fenced_blocks("```bash\nls\n``` text ``` json {} ``` ```unclosed");
        assert_eq!(
            blocks,
            vec![
                FencedBlock { tag: "bash", body: "\nls\n" },
                FencedBlock { tag: "json", body: " {} " },
            ]
        );
    }
}
