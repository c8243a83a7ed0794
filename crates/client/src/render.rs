use crate::client::ViewResult;

/// Renders a view result for display: byte results as text, anything
/// else through its default textual form. Total — never fails.
pub fn render(result: &ViewResult) -> String {
    match result {
        ViewResult::Bytes(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        ViewResult::Value(value) => value.to_string(),
    }
}
