//! Prismic predicate query builders.

/// Escapes a value for use inside a double-quoted predicate argument.
fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// `[at(path, "value")]` - the field at `path` equals `value`.
pub fn at(path: &str, value: &str) -> String {
    format!("[at({path}, {})]", quote(value))
}

/// Matches every document of a custom type.
pub fn document_type(document_type: &str) -> String {
    at("document.type", document_type)
}

/// Matches the document of `document_type` whose UID is `uid`.
pub fn uid(document_type: &str, uid: &str) -> String {
    at(&format!("my.{document_type}.uid"), uid)
}

/// Combines predicates into the value of the `q` query parameter.
pub fn combine(predicates: &[String]) -> String {
    format!("[{}]", predicates.concat())
}
