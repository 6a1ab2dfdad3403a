use std::collections::HashMap;

use stencil::template::Node;
use stencil::{compile, render, Compiler, DiagnosticKind, Options, Recovery};

const NONE: &[(&str, &str)] = &[];

fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

#[test]
fn headerless_documents_render_verbatim() {
    let raw = "# Syntax\n\nWrite `#{name}` for a value and `#{?flag}...#{/flag}` for a block.\n";
    let template = compile(raw);
    assert!(!template.has_header());
    assert!(template.vars().is_empty());
    assert!(template.schema().properties.is_empty());
    assert_eq!(render(&template, NONE), raw);
}

#[test]
fn variable_free_template_renders_its_body() {
    let template = compile("---\nunused: never referenced\n---\nJust text.\n");
    assert!(template.vars().is_empty());
    assert_eq!(template.render(NONE), "Just text.\n");
    assert_eq!(template.render(NONE), template.body());
}

#[test]
fn single_required_placeholder_round_trip() {
    let template = compile("---\nx: the x\n---\n#{x} and #{x}, not #{y}.");
    assert_eq!(template.schema().required, ["x"]);
    assert_eq!(template.render(&values(&[("x", "V")])), "V and V, not #{y}.");
}

#[test]
fn optional_values() {
    let template = compile("---\ntitle?: \"The title\"\n---\n<h1>#{title}</h1>");
    assert!(template.schema().required.is_empty());
    assert_eq!(template.render(&[("title", "")]), "<h1></h1>");
    assert_eq!(template.render(NONE), "<h1>#{title}</h1>");
    assert_eq!(template.render(&[("title", "T")]), "<h1>T</h1>");
}

#[test]
fn in_body_optional_marker() {
    let template = compile("---\nsig: Signature\n---\n-- #{sig?}");
    assert!(template.var("sig").unwrap().optional);
    assert!(!template.schema().is_required("sig"));
    assert_eq!(template.render(NONE), "-- #{sig?}");
}

#[test]
fn conditional_blocks_leave_no_trace() {
    let raw = "---\nname: Name\nnote?: A note\n---\n\
        Hi #{name}.\n#{?note}\nNote: #{note} (from #{name}, re #{topic})\n#{/note}\nBye.";
    let template = compile(raw);

    let absent = template.render(&[("name", "Ava")]);
    assert_eq!(absent, "Hi Ava.\n\nBye.");
    assert!(!absent.contains("Note"));

    let empty = template.render(&[("name", "Ava"), ("note", "")]);
    assert_eq!(empty, absent);

    let present = template.render(&[("name", "Ava"), ("note", "x")]);
    assert_eq!(present, "Hi Ava.\n\nNote: x (from Ava, re #{topic})\n\nBye.");
}

#[test]
fn nested_blocks() {
    let template = compile("---\n---\n#{?a}A#{?b}B#{/b}#{/a}");
    assert_eq!(template.render(NONE), "");
    assert_eq!(template.render(&[("b", "1")]), "");
    assert_eq!(template.render(&[("a", "1")]), "A");
    assert_eq!(template.render(&[("a", "1"), ("b", "1")]), "AB");

    let outer = template.ast()[0].as_block().unwrap();
    assert_eq!(outer.variable, "a");
    assert!(matches!(outer.content[1], Node::Block(ref b) if b.variable == "b"));
}

#[test]
fn first_occurrence_wins() {
    let template = compile("---\nw: word\n---\n#{w} #{w?} #{w}");
    assert_eq!(template.vars().len(), 1);
    assert!(!template.vars()[0].optional);
    assert_eq!(template.render(&[("w", "z")]), "z z z");
}

#[test]
fn mismatched_close_is_literal() {
    let template = compile("---\n---\n#{?a}one #{/b} two#{/a}");
    assert_eq!(template.render(&[("a", "y")]), "one #{/b} two");
    assert_eq!(template.render(NONE), "");
    assert!(template.diagnostics().is_empty());
}

#[test]
fn malformed_header_is_body_text() {
    let raw = "---\nname: [oops\n---\nHi #{name}!";
    let template = compile(raw);
    assert_eq!(template.body(), raw);
    assert!(template.vars().is_empty());
    assert_eq!(template.diagnostics().len(), 1);
    assert_eq!(template.diagnostics()[0].kind, DiagnosticKind::MalformedHeader);
    assert_eq!(template.render(&[("name", "Ava")]), raw);
}

#[test]
fn unclosed_block_recovery_orders() {
    let raw = "---\nv: value\n---\nStart #{?outer}middle #{v} #{?inner}end";

    let template = compile(raw);
    assert_eq!(template.diagnostics().len(), 2);
    assert!(template.diagnostics().iter().all(|d| d.kind == DiagnosticKind::UnclosedBlock));
    assert_eq!(template.render(&[("v", "V")]), "Start #{?outer}middle V #{?inner}end");

    let reference = Compiler::new(Options::default().recovery(Recovery::InnermostFirst));
    let template = reference.compile(raw);
    assert_eq!(template.render(&[("v", "V")]), "#{?inner}end#{?outer}middle V Start ");
}

#[test]
fn toml_headers() {
    let raw = "+++\ncount = 3\n\"extra?\" = true\n+++\n#{count}#{extra}";
    let template = compile(raw);
    assert_eq!(template.var("count").unwrap().description, "3");
    assert_eq!(template.schema().required, ["count"]);
    assert_eq!(template.render(&[("count", "1"), ("extra", "!")]), "1!");

    let yaml_only = Compiler::new(Options::default().toml_headers(false)).compile(raw);
    assert!(yaml_only.vars().is_empty());
    assert_eq!(yaml_only.body(), raw);
}

#[test]
fn schema_json() {
    let template = compile("---\nb: \"\"\na?: About a\n---\n#{a} #{b} #{?c}#{/c}");
    assert_eq!(template.schema().to_json(), serde_json::json!({
        "type": "object",
        "properties": {
            "a": { "type": "string", "description": "About a" },
            "b": { "type": "string", "description": "Variable: b" },
            "c": { "type": "string", "description": "Include the `c` section" }
        },
        "required": ["b"]
    }));

    assert_eq!(template.var("b").unwrap().description, "");
}

#[test]
fn json_values() {
    let template = compile("---\nn: number\nflag?: flag\n---\n#{n}#{?flag}!#{/flag}");
    let values = serde_json::json!({ "n": 42, "flag": true });
    assert_eq!(template.render(values.as_object().unwrap()), "42!");
}

#[test]
fn check_before_render() {
    let template = Compiler::default().compile_named("mail", "---\nto: Recipient\n---\nDear #{to},");
    assert!(template.check(&[("to", "Ava")]).is_ok());

    let error = template.check(NONE).unwrap_err();
    let message = error.to_string();
    assert!(message.contains("missing required template values"));
    assert!(message.contains("template: mail"));
    assert!(message.contains("missing: to"));
}

#[test]
fn load_from_disk() {
    let dir = std::env::temp_dir().join(format!("stencil-load-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("welcome.md");
    std::fs::write(&path, "---\nuser: User name\n---\nWelcome, #{user}.").unwrap();

    let results = Compiler::default().load_all(&[&path]);
    let template = results.into_iter().next().unwrap().unwrap();
    assert_eq!(template.id(), Some("welcome"));
    assert_eq!(template.render(&[("user", "Ava")]), "Welcome, Ava.");

    std::fs::remove_dir_all(&dir).unwrap();
}
