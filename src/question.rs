use serde::Deserialize;

/// Instruction appended to every question when suffixing is enabled.
pub const FILTER_SUFFIX: &str = " - do not write any explanations";

/// Query parameters accepted by the question endpoint
#[derive(Debug, Deserialize)]
pub struct DebugParams {
    pub debug: Option<String>,
}

impl DebugParams {
    pub fn enabled(&self) -> bool {
        parse_debug_flag(self.debug.as_deref())
    }
}

/// Builds the text handed to the answering capability.
pub fn filter_question(question: &str, append_suffix: bool) -> String {
    if append_suffix {
        format!("{question}{FILTER_SUFFIX}")
    } else {
        question.to_owned()
    }
}

/// Anything other than `true` (any case) or `1` counts as off.
pub fn parse_debug_flag(raw: Option<&str>) -> bool {
    match raw.map(str::trim) {
        Some(value) => value.eq_ignore_ascii_case("true") || value == "1",
        None => false,
    }
}
