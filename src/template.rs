//! Template engine for notification reports.
//!
//! A small line-oriented engine used to render the HTML commit report.
//!
//! # Syntax
//!
//! - `${expr}` - substitutes the value of `expr`, a dotted path resolved
//!   against the context (e.g. `${file.path}`)
//! - `#if(expr)` ... `#endif` - renders the body when `expr` is truthy;
//!   the directive must sit on its own line
//! - `#for(var in expr)` ... `#endfor` - renders the body once per element
//!   of the array `expr`, binding `${var}` and `${var_index}`
//!
//! Blocks nest. The context is a `serde_json::Value`; dotted paths walk
//! object keys and numeric array indices.
//!
//! # Error Handling
//!
//! Rendering is infallible and lenient: missing paths substitute the empty
//! string, `#for` over a non-array renders nothing, and stray or
//! unterminated directives degrade to skipped lines. A notification that
//! renders with a blank field beats one that is never sent.

use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

static EXPR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([A-Za-z0-9_.]+)\}").expect("expr pattern is valid"));

static IF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*#if\s*\(([A-Za-z0-9_.]+)\)\s*$").expect("if pattern is valid"));

static FOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*#for\s*\((\w+)\s+in\s+([A-Za-z0-9_.]+)\)\s*$").expect("for pattern is valid")
});

/// Render a template against a JSON context.
///
/// The result keeps one output line per rendered template line; directive
/// lines produce no output of their own. A single trailing newline is
/// trimmed so templates ending in a newline round-trip cleanly.
pub fn render(template: &str, context: &Value) -> String {
    let lines: Vec<&str> = template.lines().collect();
    let mut rendered = render_lines(&lines, context);
    if rendered.ends_with('\n') {
        rendered.pop();
    }
    rendered
}

fn render_lines(lines: &[&str], context: &Value) -> String {
    let mut output = String::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if let Some(caps) = IF_RE.captures(line) {
            let end = find_block_end(lines, i, is_if_open, is_endif);
            if is_truthy(lookup(context, &caps[1])) {
                output.push_str(&render_lines(&lines[i + 1..end], context));
            }
            i = end + 1;
            continue;
        }

        if let Some(caps) = FOR_RE.captures(line) {
            let end = find_block_end(lines, i, is_for_open, is_endfor);
            let body = &lines[i + 1..end];
            if let Some(items) = lookup(context, &caps[2]).and_then(Value::as_array) {
                let var = &caps[1];
                for (index, item) in items.iter().enumerate() {
                    let scope = loop_scope(context, var, item, index);
                    output.push_str(&render_lines(body, &scope));
                }
            }
            i = end + 1;
            continue;
        }

        // Stray terminators from unbalanced blocks are dropped, not echoed.
        let trimmed = line.trim();
        if trimmed == "#endif" || trimmed == "#endfor" {
            i += 1;
            continue;
        }

        output.push_str(&substitute(line, context));
        output.push('\n');
        i += 1;
    }

    output
}

/// Index of the terminator matching the block opened at `start`, honoring
/// nesting; `lines.len()` when the block is unterminated.
fn find_block_end(
    lines: &[&str],
    start: usize,
    is_open: fn(&str) -> bool,
    is_close: fn(&str) -> bool,
) -> usize {
    let mut depth = 0;
    for (offset, line) in lines.iter().enumerate().skip(start) {
        if is_open(line) {
            depth += 1;
        } else if is_close(line) {
            depth -= 1;
            if depth == 0 {
                return offset;
            }
        }
    }
    lines.len()
}

fn is_if_open(line: &str) -> bool {
    IF_RE.is_match(line)
}

fn is_endif(line: &str) -> bool {
    line.trim() == "#endif"
}

fn is_for_open(line: &str) -> bool {
    FOR_RE.is_match(line)
}

fn is_endfor(line: &str) -> bool {
    line.trim() == "#endfor"
}

/// Child context for one loop iteration: the parent's bindings plus the
/// loop variable and its `_index` companion.
fn loop_scope(context: &Value, var: &str, item: &Value, index: usize) -> Value {
    let mut scope = match context {
        Value::Object(map) => map.clone(),
        _ => Map::new(),
    };
    scope.insert(var.to_string(), item.clone());
    scope.insert(format!("{}_index", var), Value::from(index));
    Value::Object(scope)
}

/// Replace every `${expr}` occurrence in a line.
fn substitute(line: &str, context: &Value) -> String {
    EXPR_RE
        .replace_all(line, |caps: &regex::Captures<'_>| {
            lookup(context, &caps[1]).map_or_else(String::new, value_to_string)
        })
        .into_owned()
}

/// Resolve a dotted path against the context.
fn lookup<'a>(context: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = context;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        // Composite values only appear when a template substitutes a
        // collection directly; render their JSON form.
        other => other.to_string(),
    }
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(_)) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_text_unchanged() {
        let result = render("line 1\nline 2", &json!({}));
        assert_eq!(result, "line 1\nline 2");
    }

    #[test]
    fn test_empty_template() {
        assert_eq!(render("", &json!({})), "");
    }

    #[test]
    fn test_simple_substitution() {
        let result = render("Hello ${name}!!!", &json!({"name": "world"}));
        assert_eq!(result, "Hello world!!!");
    }

    #[test]
    fn test_dotted_path_substitution() {
        let context = json!({"file": {"path": "pom.xml", "rev_to": 3417}});
        let result = render("${file.path} at r${file.rev_to}", &context);
        assert_eq!(result, "pom.xml at r3417");
    }

    #[test]
    fn test_missing_variable_renders_empty() {
        assert_eq!(render("[${nope}]", &json!({})), "[]");
        assert_eq!(render("[${a.b.c}]", &json!({"a": 1})), "[]");
    }

    #[test]
    fn test_null_renders_empty() {
        assert_eq!(render("[${x}]", &json!({"x": null})), "[]");
    }

    #[test]
    fn test_multiple_substitutions_per_line() {
        let result = render("${a}-${a}-${b}", &json!({"a": "X", "b": "Y"}));
        assert_eq!(result, "X-X-Y");
    }

    #[test]
    fn test_if_true_renders_body() {
        let template = "#if(flag)\nvisible\n#endif";
        assert_eq!(render(template, &json!({"flag": true})), "visible");
    }

    #[test]
    fn test_if_false_skips_body() {
        let template = "before\n#if(flag)\nhidden\n#endif";
        assert_eq!(render(template, &json!({"flag": false})), "before");
    }

    #[test]
    fn test_if_truthiness() {
        let template = "#if(x)\nyes\n#endif";
        assert_eq!(render(template, &json!({"x": 1})), "yes");
        assert_eq!(render(template, &json!({"x": 0})), "");
        assert_eq!(render(template, &json!({"x": "s"})), "yes");
        assert_eq!(render(template, &json!({"x": ""})), "");
        assert_eq!(render(template, &json!({"x": []})), "");
        assert_eq!(render(template, &json!({"x": [1]})), "yes");
        assert_eq!(render(template, &json!({})), "");
    }

    #[test]
    fn test_nested_if() {
        let template = "#if(a)\n#if(b)\ndouble true\n#endif\n#endif";
        assert_eq!(render(template, &json!({"a": true, "b": true})), "double true");
        assert_eq!(render(template, &json!({"a": true, "b": false})), "");
        assert_eq!(render(template, &json!({"a": false, "b": true})), "");
    }

    #[test]
    fn test_for_loop() {
        let template = "#for(name in names)\nHello ${name}\n#endfor";
        let context = json!({"names": ["John", "Mary", "Peter"]});
        assert_eq!(render(template, &context), "Hello John\nHello Mary\nHello Peter");
    }

    #[test]
    fn test_for_loop_index() {
        let template = "#for(name in names)\n${name_index}: ${name}\n#endfor";
        let context = json!({"names": ["a", "b"]});
        assert_eq!(render(template, &context), "0: a\n1: b");
    }

    #[test]
    fn test_for_over_missing_or_scalar_renders_nothing() {
        let template = "#for(x in xs)\n${x}\n#endfor";
        assert_eq!(render(template, &json!({})), "");
        assert_eq!(render(template, &json!({"xs": "scalar"})), "");
    }

    #[test]
    fn test_for_keeps_outer_bindings() {
        let template = "#for(name in names)\n${greeting} ${name}\n#endfor";
        let context = json!({"names": ["John"], "greeting": "Hello"});
        assert_eq!(render(template, &context), "Hello John");
    }

    #[test]
    fn test_nested_for() {
        let template = "#for(a in outer)\n- ${a}\n#for(b in inner)\n-- ${b} ${a}\n#endfor\n#endfor";
        let context = json!({"outer": ["Apple", "Pear"], "inner": ["Green", "Red"]});
        assert_eq!(
            render(template, &context),
            "- Apple\n-- Green Apple\n-- Red Apple\n- Pear\n-- Green Pear\n-- Red Pear"
        );
    }

    #[test]
    fn test_if_inside_for() {
        let template = "#for(item in items)\n#if(item.keep)\n${item.name}\n#endif\n#endfor";
        let context = json!({"items": [
            {"name": "a", "keep": true},
            {"name": "b", "keep": false},
            {"name": "c", "keep": true},
        ]});
        assert_eq!(render(template, &context), "a\nc");
    }

    #[test]
    fn test_for_over_objects_with_dotted_access() {
        let template = "#for(file in files)\n${file.path} (${file.type})\n#endfor";
        let context = json!({"files": [
            {"path": "pom.xml", "type": "mod"},
            {"path": "test.txt", "type": "added"},
        ]});
        assert_eq!(render(template, &context), "pom.xml (mod)\ntest.txt (added)");
    }

    #[test]
    fn test_unterminated_if_consumes_rest() {
        let template = "before\n#if(flag)\nbody";
        assert_eq!(render(template, &json!({"flag": true})), "before\nbody");
        assert_eq!(render(template, &json!({"flag": false})), "before");
    }

    #[test]
    fn test_stray_terminators_are_dropped() {
        let template = "a\n#endif\n#endfor\nb";
        assert_eq!(render(template, &json!({})), "a\nb");
    }

    #[test]
    fn test_directive_must_own_its_line() {
        // An inline #if is not a directive, just text.
        let result = render("text #if(x) more", &json!({"x": true}));
        assert_eq!(result, "text #if(x) more");
    }

    #[test]
    fn test_array_index_path() {
        let context = json!({"files": [{"path": "a.txt"}]});
        assert_eq!(render("${files.0.path}", &context), "a.txt");
    }

    #[test]
    fn test_html_template_shape() {
        let template = "<ul>\n#for(file in files)\n<li>${file.path}</li>\n#endfor\n</ul>";
        let context = json!({"files": [{"path": "a"}, {"path": "b"}]});
        assert_eq!(
            render(template, &context),
            "<ul>\n<li>a</li>\n<li>b</li>\n</ul>"
        );
    }
}
