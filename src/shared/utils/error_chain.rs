use std::error::Error;

/// Maximum number of nested causes rendered in an error report
pub const MAX_ERROR_DEPTH: usize = 5;

/// Render an error followed by up to [`MAX_ERROR_DEPTH`] of its sources,
/// one per line, each prefixed with ` ---> `.
pub fn format_error_chain(error: &(dyn Error + 'static)) -> String {
    let mut report = error.to_string();
    let mut source = error.source();
    let mut depth = 0;

    while let Some(inner) = source {
        if depth == MAX_ERROR_DEPTH {
            break;
        }
        report.push_str("\n ---> ");
        report.push_str(&inner.to_string());
        source = inner.source();
        depth += 1;
    }

    report
}
