use crate::vdom::StringMap;

/// Parse an inline `style` attribute into a property → value map.
///
/// Each `;`-separated declaration is split on its first `:` only, so values
/// such as `url(http://x/a:b)` stay intact. Declarations missing a name or a
/// value after trimming are skipped.
pub fn parse_style(input: &str) -> StringMap {
    let mut styles = StringMap::new();
    for declaration in input.split(';') {
        let Some((name, value)) = declaration.split_once(':') else {
            continue;
        };
        let (name, value) = (name.trim(), value.trim());
        if name.is_empty() || value.is_empty() {
            continue;
        }
        styles.insert(name.to_string(), value.to_string());
    }
    styles
}
