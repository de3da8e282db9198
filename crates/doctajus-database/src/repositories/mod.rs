//! Concrete repository implementations, one per table.

pub mod documento;
pub mod expediente;
pub mod historial;
pub mod permiso;
pub mod tarea;
pub mod user;
pub mod version;

/// Escape `%`, `_` and `\` so user input matches literally inside a
/// `LIKE ... ESCAPE '\'` pattern.
pub(crate) fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
