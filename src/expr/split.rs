/// Split a raw path into its top-level dot-separated segments.
///
/// A `.` only ends a segment at parenthesis depth zero, so method
/// arguments like `say(a.b,c)` stay inside one segment. Unbalanced
/// parentheses are not rejected here (depth may go negative); such a
/// segment later fails the method grammar in
/// [`parse_single`](super::single::parse_single).
pub fn split(path: &str) -> Vec<String> {
    let path = path.trim();
    if path.is_empty() {
        return Vec::new();
    }
    if !path.contains('.') {
        return vec![path.to_string()];
    }
    if !path.contains('(') {
        return path.split('.').map(str::to_string).collect();
    }

    let mut segments = Vec::new();
    let mut current = String::new();
    let mut depth = 0i32;
    for ch in path.chars() {
        match ch {
            '(' => depth += 1,
            ')' => depth -= 1,
            '.' if depth == 0 => {
                segments.push(std::mem::take(&mut current));
                continue;
            }
            _ => {}
        }
        current.push(ch);
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}
